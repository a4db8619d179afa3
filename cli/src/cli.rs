use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "picobuild")]
#[command(
    about = "Automates the process of compiling C++ programs and libraries based on a build configuration file"
)]
#[command(version)]
pub struct Args {
    /// Project directories to compile, relative to the root. Nothing is built if none are given
    pub directories: Vec<String>,

    /// Root directory the project directories live in
    #[arg(long, value_name = "dir", default_value = ".")]
    pub root: PathBuf,

    /// Output directory for executables (defaults to <root>/bin)
    #[arg(long, value_name = "dir")]
    pub bin_dir: Option<String>,

    /// Output directory for libraries (defaults to <root>/lib)
    #[arg(long, value_name = "dir")]
    pub lib_dir: Option<String>,

    /// Name of the descriptor file in each project directory
    #[arg(long, value_name = "name", default_value = picobuild::DEFAULT_DESCRIPTOR)]
    pub descriptor: String,

    /// Compiler to use instead of searching PATH
    #[arg(long, value_name = "path")]
    pub compiler: Option<PathBuf>,

    /// Log debug diagnostics to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn parse() -> Args {
    Args::parse()
}

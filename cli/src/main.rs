use std::path::Path;
use std::{fs, process};

use anyhow::Context;
use picobuild::{BuildConfig, BuildReport, Builder};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod cli;
mod os;

use os::HostOs;

fn main() -> anyhow::Result<()> {
    let args = cli::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .init();

    let root = resolve_root(&args.root)?;

    let mut config = BuildConfig::new(root).with_descriptor_name(args.descriptor);
    if let Some(dir) = &args.bin_dir {
        config = config.with_bin_dir(dir);
    }
    if let Some(dir) = &args.lib_dir {
        config = config.with_lib_dir(dir);
    }

    let builder = Builder::new(HostOs::new(args.compiler), config);
    let report = builder.build(args.directories.as_slice())?;

    if let Some(line) = summary(&report, args.directories.len()) {
        println!("{line}");
    }

    match exit_code(&report) {
        0 => Ok(()),
        code => process::exit(code),
    }
}

/// Canonical form of the root directory, without the `\\?\` prefix Windows adds.
fn resolve_root(root: &Path) -> anyhow::Result<String> {
    let root = fs::canonicalize(root)
        .with_context(|| format!("Invalid root directory {}", root.display()))?;
    let root = root.to_string_lossy();
    Ok(root.strip_prefix(r"\\?\").unwrap_or(&*root).to_string())
}

/// Totals line printed after a run. Nothing when no directory was requested.
fn summary(report: &BuildReport, requested: usize) -> Option<String> {
    (requested > 0).then(|| {
        format!(
            "{} target(s) built, {} failure(s)",
            report.succeeded(),
            report.failed()
        )
    })
}

fn exit_code(report: &BuildReport) -> i32 {
    if report.is_success() { 0 } else { 1 }
}

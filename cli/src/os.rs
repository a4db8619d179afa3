use std::env::consts::{ARCH, OS};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::{env, fs};

use anyhow::bail;
use log::debug;
use picobuild::os::{self, CompilerInfo};

const ENDIAN: &str = if cfg!(target_endian = "little") {
    "little"
} else {
    "big"
};

/// Compilers probed on `PATH`, in order of preference.
const CANDIDATES: &[&str] = if cfg!(windows) {
    &["g++", "cl"]
} else if cfg!(any(target_os = "linux", target_os = "macos")) {
    &["g++"]
} else {
    &["g++", "c++"]
};

pub struct HostOs {
    compiler: Option<PathBuf>,
}

impl HostOs {
    /// `compiler` skips the `PATH` search when given.
    pub fn new(compiler: Option<PathBuf>) -> Self {
        Self { compiler }
    }

    fn find_compiler(&self) -> os::Result<PathBuf> {
        if let Some(compiler) = &self.compiler {
            return Ok(compiler.clone());
        }

        if let Ok(cxx) = env::var("CXX") {
            match which::which(&cxx) {
                Ok(path) => return Ok(path),
                Err(e) => debug!("CXX={cxx} is not usable: {e}"),
            }
        }

        for name in CANDIDATES {
            if let Ok(path) = which::which(name) {
                return Ok(path);
            }
        }

        bail!("searched PATH for {} on {OS}", CANDIDATES.join(", "));
    }
}

fn to_path(path: &os::Path) -> &Path {
    Path::new(path.as_str())
}

impl os::Os for HostOs {
    fn print(&self, msg: &str) {
        println!("{}", msg);
    }

    fn host_machine(&self) -> os::Result<os::MachineInfo> {
        Ok(os::MachineInfo {
            system: OS.into(),
            cpu: ARCH.into(),
            endian: ENDIAN.into(),
        })
    }

    fn is_file(&self, path: &os::Path) -> os::Result<bool> {
        Ok(to_path(path).is_file())
    }
    fn is_dir(&self, path: &os::Path) -> os::Result<bool> {
        Ok(to_path(path).is_dir())
    }
    fn read_file(&self, path: &os::Path) -> os::Result<Vec<u8>> {
        Ok(fs::read(to_path(path))?)
    }
    fn create_dir_all(&self, path: &os::Path) -> os::Result<()> {
        Ok(fs::create_dir_all(to_path(path))?)
    }

    fn get_compiler(&self) -> os::Result<CompilerInfo> {
        let bin = self.find_compiler()?;
        debug!("using compiler {}", bin.display());
        Ok(CompilerInfo {
            bin: os::Path::from(bin.to_string_lossy()),
        })
    }

    fn run_command(&self, cmd: &os::Path, args: &[&str]) -> os::Result<os::RunCommandOutput> {
        debug!("Running command: {} {:?}", cmd, args);

        let status = Command::new(to_path(cmd)).args(args).status()?;

        Ok(os::RunCommandOutput {
            returncode: status.code().unwrap_or(-1) as i64,
        })
    }
}

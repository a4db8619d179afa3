pub use crate::path::Path;

pub type Result<T> = anyhow::Result<T>;

pub struct MachineInfo {
    pub system: String,
    pub cpu: String,
    pub endian: String,
}

pub struct CompilerInfo {
    pub bin: Path,
}

pub struct RunCommandOutput {
    pub returncode: i64,
}

impl RunCommandOutput {
    pub fn success(&self) -> bool {
        self.returncode == 0
    }
}

/// Everything the build pipeline needs from the outside world.
///
/// The core never touches the filesystem or spawns processes itself; an
/// implementation of this trait does it on its behalf. This keeps command
/// assembly testable without a real compiler.
pub trait Os: 'static {
    // console
    fn print(&self, msg: &str);

    // env
    fn host_machine(&self) -> Result<MachineInfo>;

    // fs
    fn is_file(&self, path: &Path) -> Result<bool>;
    fn is_dir(&self, path: &Path) -> Result<bool>;
    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;
    /// Creates `path` and any missing parents. Succeeds if it already exists.
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    // compiler
    fn get_compiler(&self) -> Result<CompilerInfo>;

    /// Runs `cmd` to completion. Only the exit status is reported back.
    fn run_command(&self, cmd: &Path, args: &[&str]) -> Result<RunCommandOutput>;
}

use crate::path::Path;

/// Name of the descriptor file looked up in every project directory.
pub const DEFAULT_DESCRIPTOR: &str = "Bldfile";

/// Locations shared by every target of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfig {
    /// Requested directories are resolved against this root. It is also the
    /// include directory handed to the compiler.
    pub project_root: Path,
    /// Executables are written here.
    pub bin_dir: Path,
    /// Dynamic and static libraries are written here, and linked from here.
    pub lib_dir: Path,
    pub descriptor_name: String,
}

impl BuildConfig {
    pub fn new(project_root: impl AsRef<str>) -> Self {
        let project_root = Path::from(project_root);
        Self {
            bin_dir: project_root.join("bin"),
            lib_dir: project_root.join("lib"),
            descriptor_name: DEFAULT_DESCRIPTOR.into(),
            project_root,
        }
    }

    pub fn with_bin_dir(mut self, dir: impl AsRef<str>) -> Self {
        self.bin_dir = self.project_root.join(dir);
        self
    }

    pub fn with_lib_dir(mut self, dir: impl AsRef<str>) -> Self {
        self.lib_dir = self.project_root.join(dir);
        self
    }

    pub fn with_descriptor_name(mut self, name: impl Into<String>) -> Self {
        self.descriptor_name = name.into();
        self
    }

    pub fn include_flag(&self) -> String {
        format!("-I{}", self.project_root)
    }
}

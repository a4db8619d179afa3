use core::fmt;
use core::str::FromStr;

use hashbrown::HashMap;

use crate::error::BuildError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    Executable,
    DynamicLibrary,
    StaticLibrary,
}

impl TargetKind {
    /// The descriptor key that declares a target of this kind.
    pub fn keyword(self) -> &'static str {
        match self {
            TargetKind::Executable => "prog",
            TargetKind::DynamicLibrary => "dynlib",
            TargetKind::StaticLibrary => "statlib",
        }
    }
}

impl FromStr for TargetKind {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prog" => Ok(TargetKind::Executable),
            "dynlib" => Ok(TargetKind::DynamicLibrary),
            "statlib" => Ok(TargetKind::StaticLibrary),
            _ => Err(BuildError::UnknownTargetKind { token: s.into() }),
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TargetKind::Executable => "executable",
            TargetKind::DynamicLibrary => "dynamic library",
            TargetKind::StaticLibrary => "static library",
        };
        write!(f, "{s}")
    }
}

/// One build unit declared in a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub kind: TargetKind,
    /// Relative to the project directory. `None` means the project directory itself.
    pub source_dir: Option<String>,
    pub files: Vec<String>,
    /// Bare library names, linked in this order.
    pub libraries: Vec<String>,
    /// Extra compiler flags, already joined with single spaces.
    pub options: Option<String>,
}

impl Target {
    pub fn new(name: impl Into<String>, kind: TargetKind) -> Self {
        Self {
            name: name.into(),
            kind,
            source_dir: None,
            files: Vec::new(),
            libraries: Vec::new(),
            options: None,
        }
    }
}

/// Something odd in a descriptor that did not stop it from being read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    pub line: usize,
    pub kind: WarningKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningKind {
    /// An attribute line appeared before any `prog`/`dynlib`/`statlib` line.
    OrphanAttribute { key: String, value: String },
    UnknownKey { key: String },
    /// A `prog`/`dynlib`/`statlib` line with an empty value.
    NamelessTarget { kind: TargetKind },
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WarningKind::OrphanAttribute { key, value } => write!(
                f,
                "line {}: no object found for {key} and {value}",
                self.line
            ),
            WarningKind::UnknownKey { key } => {
                write!(f, "line {}: unknown key `{key}` ignored", self.line)
            }
            WarningKind::NamelessTarget { kind } => write!(
                f,
                "line {}: `{}` declares a target without a name, ignored",
                self.line,
                kind.keyword()
            ),
        }
    }
}

/// Targets of one descriptor, keyed by name, in declaration order.
///
/// Redeclaring a name replaces the earlier target in place, so it keeps
/// the build position of its first declaration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BuildDescriptor {
    targets: Vec<Target>,
    index: HashMap<String, usize>,
    warnings: Vec<ParseWarning>,
}

impl BuildDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a fresh target and returns its position.
    pub fn declare(&mut self, name: &str, kind: TargetKind) -> usize {
        let target = Target::new(name, kind);
        if let Some(&idx) = self.index.get(name) {
            // Last declaration wins
            self.targets[idx] = target;
            idx
        } else {
            let idx = self.targets.len();
            self.targets.push(target);
            self.index.insert(name.into(), idx);
            idx
        }
    }

    pub(crate) fn target_mut(&mut self, idx: usize) -> &mut Target {
        &mut self.targets[idx]
    }

    pub(crate) fn warn(&mut self, warning: ParseWarning) {
        self.warnings.push(warning);
    }

    pub fn get(&self, name: &str) -> Option<&Target> {
        self.index.get(name).map(|&idx| &self.targets[idx])
    }

    pub fn targets(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter()
    }

    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

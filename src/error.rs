//! Error types for picobuild.

use thiserror::Error;

use crate::path::Path;

/// Result type for picobuild operations.
pub type Result<T> = core::result::Result<T, BuildError>;

/// Errors raised while building a set of project directories.
///
/// Only `CompilerNotFound` and output directory preparation failures abort
/// a run. Every other variant is scoped to one directory or one target.
#[derive(Error, Debug)]
pub enum BuildError {
    /// Requested project directory does not exist.
    #[error("invalid program or library directory '{path}'")]
    MissingDirectory { path: Path },

    /// Project directory has no descriptor file.
    #[error("bld file not found '{path}'")]
    MissingDescriptor { path: Path },

    /// Descriptor parsed but declared no targets.
    #[error("no objects found in {path}")]
    EmptyDescriptor { path: Path },

    /// Descriptor could not be parsed.
    #[error("error reading {path}: {source}")]
    Descriptor {
        path: Path,
        #[source]
        source: ParseError,
    },

    /// Kind token is not one of `prog`, `dynlib` or `statlib`.
    #[error("unknown type of object '{token}'")]
    UnknownTargetKind { token: String },

    /// The target's `dir` does not exist under the project directory.
    #[error("source directory {path} not found, skipping {target}")]
    MissingSourceDirectory { target: String, path: Path },

    /// One of the target's files does not exist.
    #[error("file {path} not found, skipping {target}")]
    MissingSourceFile { target: String, path: Path },

    /// The target declares no source files.
    #[error("no files to compile obj {target}, skipping")]
    NoSourceFiles { target: String },

    /// No usable compiler on this machine.
    #[error("no suitable C++ compiler found: {0}")]
    CompilerNotFound(String),

    /// The compiler exited with a non-zero status.
    #[error("compilation failed for {target} (exit status {status})")]
    InvocationFailed { target: String, status: i64 },

    /// Filesystem or process failure reported by the `Os` implementation.
    #[error(transparent)]
    Os(#[from] anyhow::Error),
}

/// Errors in the descriptor text itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: descriptor is not valid UTF-8")]
    InvalidUtf8 { line: usize },
}

//! A small build orchestrator for C and C++ project directories.
//!
//! Each project directory carries a `Bldfile` descriptor listing the
//! executables, dynamic libraries and static libraries to build from it.
//! [`Builder`] reads the descriptors of the requested directories, checks
//! that every target's sources exist and runs the compiler once per target,
//! writing executables to one output directory and libraries to another.
//!
//! All filesystem and process access goes through the [`os::Os`] trait.

mod config;
pub mod descriptor;
mod driver;
mod error;
pub mod invocation;
pub mod os;
pub mod path;
mod sources;
pub mod target;

#[cfg(test)]
mod testing;

pub use config::{BuildConfig, DEFAULT_DESCRIPTOR};
pub use driver::{BuildReport, Builder, DirectoryFailure, TargetOutcome};
pub use error::{BuildError, ParseError, Result};
pub use sources::resolve_sources;

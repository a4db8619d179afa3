use std::rc::Rc;

use log::{debug, warn};

use crate::config::BuildConfig;
use crate::descriptor::parse_descriptor_bytes;
use crate::error::{BuildError, Result};
use crate::invocation::{Invocation, Platform};
use crate::os::Os;
use crate::path::Path;
use crate::sources::resolve_sources;
use crate::target::{BuildDescriptor, Target};

/// Result of building one target.
#[derive(Debug)]
pub struct TargetOutcome {
    pub directory: String,
    pub target: String,
    /// The artifact written on success.
    pub result: Result<Path>,
}

/// A requested directory that was skipped before any target was built.
#[derive(Debug)]
pub struct DirectoryFailure {
    pub directory: String,
    pub error: BuildError,
}

#[derive(Debug, Default)]
pub struct BuildReport {
    pub targets: Vec<TargetOutcome>,
    pub directories: Vec<DirectoryFailure>,
}

impl BuildReport {
    pub fn succeeded(&self) -> usize {
        self.targets.iter().filter(|t| t.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.targets.iter().filter(|t| t.result.is_err()).count() + self.directories.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

/// Everything a single target build needs besides the target itself.
struct BuildContext<'a> {
    directory: &'a str,
    project_dir: Path,
    platform: Platform,
    compiler: Path,
}

pub struct Builder {
    os: Rc<dyn Os>,
    config: BuildConfig,
}

impl Builder {
    pub fn new(os: impl Os, config: BuildConfig) -> Self {
        let os = Rc::new(os);
        Self { os, config }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Builds every target of every requested directory, in order.
    ///
    /// Only a missing compiler or unusable output directories abort the run;
    /// any other failure is recorded in the report and the next target or
    /// directory is built.
    pub fn build<S: AsRef<str>>(&self, directories: &[S]) -> Result<BuildReport> {
        let mut report = BuildReport::default();

        if directories.is_empty() {
            self.os.print("No directories provided, nothing to compile.");
            return Ok(report);
        }

        self.prepare_output_dirs()?;

        let compiler = self
            .os
            .get_compiler()
            .map_err(|e| BuildError::CompilerNotFound(e.to_string()))?
            .bin;

        let machine = self.os.host_machine()?;
        let platform = Platform::from(&machine);
        debug!(
            "host {} ({}, {} endian), compiler {compiler}",
            machine.system, machine.cpu, machine.endian
        );

        for directory in directories {
            let directory = directory.as_ref();
            let ctx = BuildContext {
                directory,
                project_dir: self.config.project_root.join(directory),
                platform,
                compiler: compiler.clone(),
            };

            let descriptor = match self.load_descriptor(&ctx) {
                Ok(descriptor) => descriptor,
                Err(error) => {
                    self.os.print(&error.to_string());
                    warn!("skipping {directory}: {error}");
                    report.directories.push(DirectoryFailure {
                        directory: directory.into(),
                        error,
                    });
                    continue;
                }
            };

            for target in descriptor.targets() {
                let result = self.build_target(&ctx, target);
                if let Err(error) = &result {
                    self.os.print(&format!("Error: {error}"));
                }
                report.targets.push(TargetOutcome {
                    directory: directory.into(),
                    target: target.name.clone(),
                    result,
                });
            }
        }

        Ok(report)
    }

    fn prepare_output_dirs(&self) -> Result<()> {
        for dir in [&self.config.bin_dir, &self.config.lib_dir] {
            self.os.create_dir_all(dir)?;
        }
        Ok(())
    }

    fn load_descriptor(&self, ctx: &BuildContext) -> Result<BuildDescriptor> {
        if !self.os.is_dir(&ctx.project_dir)? {
            return Err(BuildError::MissingDirectory {
                path: ctx.project_dir.clone(),
            });
        }

        let path = ctx.project_dir.join(&self.config.descriptor_name);
        if !self.os.is_file(&path)? {
            return Err(BuildError::MissingDescriptor { path });
        }

        let content = self.os.read_file(&path)?;
        let descriptor = match parse_descriptor_bytes(&content) {
            Ok(descriptor) => descriptor,
            Err(source) => return Err(BuildError::Descriptor { path, source }),
        };

        for warning in descriptor.warnings() {
            self.os.print(&format!("Warning: {path}: {warning}"));
        }

        if descriptor.is_empty() {
            return Err(BuildError::EmptyDescriptor { path });
        }

        Ok(descriptor)
    }

    fn build_target(&self, ctx: &BuildContext, target: &Target) -> Result<Path> {
        debug!("{}: building {} {}", ctx.directory, target.kind, target.name);

        let sources = resolve_sources(&*self.os, target, &ctx.project_dir)?;
        let invocation = Invocation::new(target, sources, &self.config, ctx.platform, &ctx.compiler);

        self.os.print(&format!("Compiling {}...", invocation.output));
        self.os
            .print(&format!("Compile command {:?}...", invocation.command_line()));

        let output = self.os.run_command(&invocation.compiler, &invocation.args())?;
        if !output.success() {
            self.os
                .print(&format!("Error: Compilation failed for {}", invocation.output));
            return Err(BuildError::InvocationFailed {
                target: target.name.clone(),
                status: output.returncode,
            });
        }

        self.os.print(&format!(
            "Build successful! Binary created at {}",
            invocation.output
        ));
        Ok(invocation.output)
    }
}

use log::debug;

use crate::error::{BuildError, Result};
use crate::os::Os;
use crate::path::Path;
use crate::target::Target;

/// Resolves the files of `target` against `project_dir`.
///
/// Either every file exists and all of them are returned in declaration
/// order, or the first missing one fails the whole target.
pub fn resolve_sources(os: &dyn Os, target: &Target, project_dir: &Path) -> Result<Vec<Path>> {
    let base_dir = match &target.source_dir {
        Some(dir) => project_dir.join(dir),
        None => project_dir.clone(),
    };

    if !os.is_dir(&base_dir)? {
        return Err(BuildError::MissingSourceDirectory {
            target: target.name.clone(),
            path: base_dir,
        });
    }

    if target.files.is_empty() {
        return Err(BuildError::NoSourceFiles {
            target: target.name.clone(),
        });
    }

    let mut sources = Vec::with_capacity(target.files.len());
    for file in &target.files {
        let path = base_dir.join(file);
        if !os.is_file(&path)? {
            return Err(BuildError::MissingSourceFile {
                target: target.name.clone(),
                path,
            });
        }
        sources.push(path);
    }

    debug!("{}: {} source file(s) in {base_dir}", target.name, sources.len());
    Ok(sources)
}

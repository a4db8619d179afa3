use std::cell::RefCell;
use std::rc::Rc;

use anyhow::bail;
use hashbrown::{HashMap, HashSet};

use crate::os::{self, CompilerInfo, MachineInfo, RunCommandOutput};
use crate::path::Path;

#[derive(Default)]
struct State {
    system: String,
    compiler: Option<String>,
    files: HashMap<String, Vec<u8>>,
    dirs: HashSet<String>,
    failing_outputs: HashSet<String>,
    commands: Vec<Vec<String>>,
    printed: Vec<String>,
}

/// In-memory `Os` that records every command instead of running it.
///
/// Clones share state, so a test can keep one handle and give another to
/// the builder.
#[derive(Clone)]
pub struct FakeOs(Rc<RefCell<State>>);

impl FakeOs {
    pub fn new() -> Self {
        let state = State {
            system: "linux".into(),
            compiler: Some("g++".into()),
            ..Default::default()
        };
        Self(Rc::new(RefCell::new(state)))
    }

    pub fn with_system(self, system: &str) -> Self {
        self.0.borrow_mut().system = system.into();
        self
    }

    pub fn without_compiler(self) -> Self {
        self.0.borrow_mut().compiler = None;
        self
    }

    pub fn add_dir(&self, path: &str) {
        let mut state = self.0.borrow_mut();
        let mut dir = path.trim_end_matches('/');
        while !dir.is_empty() {
            state.dirs.insert(dir.into());
            dir = match dir.rfind('/') {
                Some(idx) => &dir[..idx],
                None => "",
            };
        }
    }

    pub fn add_file(&self, path: &str, content: &str) {
        self.add_file_bytes(path, content.as_bytes());
    }

    pub fn add_file_bytes(&self, path: &str, content: &[u8]) {
        if let Some(idx) = path.rfind('/') {
            self.add_dir(&path[..idx]);
        }
        self.0
            .borrow_mut()
            .files
            .insert(path.into(), content.to_vec());
    }

    /// Any command writing `output` exits with status 1.
    pub fn fail_output(&self, output: &str) {
        self.0.borrow_mut().failing_outputs.insert(output.into());
    }

    pub fn commands(&self) -> Vec<Vec<String>> {
        self.0.borrow().commands.clone()
    }

    pub fn printed(&self) -> Vec<String> {
        self.0.borrow().printed.clone()
    }

    pub fn has_dir(&self, path: &str) -> bool {
        self.0.borrow().dirs.contains(path)
    }
}

impl os::Os for FakeOs {
    fn print(&self, msg: &str) {
        self.0.borrow_mut().printed.push(msg.into());
    }

    fn host_machine(&self) -> os::Result<MachineInfo> {
        Ok(MachineInfo {
            system: self.0.borrow().system.clone(),
            cpu: "x86_64".into(),
            endian: "little".into(),
        })
    }

    fn is_file(&self, path: &Path) -> os::Result<bool> {
        Ok(self.0.borrow().files.contains_key(path.as_str()))
    }

    fn is_dir(&self, path: &Path) -> os::Result<bool> {
        Ok(self.0.borrow().dirs.contains(path.as_str()))
    }

    fn read_file(&self, path: &Path) -> os::Result<Vec<u8>> {
        match self.0.borrow().files.get(path.as_str()) {
            Some(content) => Ok(content.clone()),
            None => bail!("No such file: {path}"),
        }
    }

    fn create_dir_all(&self, path: &Path) -> os::Result<()> {
        self.add_dir(path.as_str());
        Ok(())
    }

    fn get_compiler(&self) -> os::Result<CompilerInfo> {
        match &self.0.borrow().compiler {
            Some(bin) => Ok(CompilerInfo {
                bin: Path::from(bin),
            }),
            None => bail!("searched for g++"),
        }
    }

    fn run_command(&self, cmd: &Path, args: &[&str]) -> os::Result<RunCommandOutput> {
        let mut state = self.0.borrow_mut();
        let mut command = vec![cmd.to_string()];
        command.extend(args.iter().map(|arg| arg.to_string()));
        state.commands.push(command);

        let fails = args.iter().any(|arg| state.failing_outputs.contains(*arg));
        Ok(RunCommandOutput {
            returncode: if fails { 1 } else { 0 },
        })
    }
}

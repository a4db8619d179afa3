use crate::config::BuildConfig;
use crate::os::MachineInfo;
use crate::path::Path;
use crate::target::{Target, TargetKind};

const POSITION_INDEPENDENT: &str = "-fPIC";
const SHARED: &str = "-shared";
const DEBUG_INFO: &str = "-g";
const OUTPUT: &str = "-o";

/// Host operating system family, as far as artifact naming is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Other,
}

impl Platform {
    /// Maps a `std::env::consts::OS` style system name.
    pub fn from_system(system: &str) -> Self {
        match system {
            "windows" => Platform::Windows,
            "macos" | "darwin" => Platform::MacOs,
            _ => Platform::Other,
        }
    }
}

impl From<&MachineInfo> for Platform {
    fn from(machine: &MachineInfo) -> Self {
        Platform::from_system(&machine.system)
    }
}

/// File name of the artifact produced for a target.
pub fn artifact_name(name: &str, kind: TargetKind, platform: Platform) -> String {
    let (prefix, suffix) = match (kind, platform) {
        (TargetKind::Executable, Platform::Windows) => ("", ".exe"),
        (TargetKind::Executable, _) => ("", ""),
        (TargetKind::DynamicLibrary, Platform::Windows) => ("lib", ".dll"),
        (TargetKind::DynamicLibrary, Platform::MacOs) => ("lib", ".dylib"),
        (TargetKind::DynamicLibrary, Platform::Other) => ("lib", ".so"),
        (TargetKind::StaticLibrary, Platform::Windows) => ("lib", ".lib"),
        (TargetKind::StaticLibrary, _) => ("lib", ".a"),
    };
    format!("{prefix}{name}{suffix}")
}

/// Where the artifact of a target is written: executables go to the binary
/// directory, both kinds of library to the library directory.
pub fn output_path(config: &BuildConfig, name: &str, kind: TargetKind, platform: Platform) -> Path {
    let dir = match kind {
        TargetKind::Executable => &config.bin_dir,
        TargetKind::DynamicLibrary | TargetKind::StaticLibrary => &config.lib_dir,
    };
    dir.join(artifact_name(name, kind, platform))
}

/// Search path, one `-l` per library, then the runtime search path.
/// Nothing at all when the target links no libraries.
pub fn library_flags(libraries: &[String], lib_dir: &Path) -> Vec<String> {
    if libraries.is_empty() {
        return Vec::new();
    }

    let mut flags = Vec::with_capacity(libraries.len() + 2);
    flags.push(format!("-L{lib_dir}"));
    flags.extend(libraries.iter().map(|lib| format!("-l{lib}")));
    flags.push(format!("-Wl,-rpath,{lib_dir}"));
    flags
}

/// A fully assembled compiler command for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub kind: TargetKind,
    pub compiler: Path,
    pub sources: Vec<Path>,
    pub include_flag: String,
    pub library_flags: Vec<String>,
    pub options: Option<String>,
    pub output: Path,
}

impl Invocation {
    pub fn new(
        target: &Target,
        sources: Vec<Path>,
        config: &BuildConfig,
        platform: Platform,
        compiler: &Path,
    ) -> Self {
        Self {
            kind: target.kind,
            compiler: compiler.clone(),
            sources,
            include_flag: config.include_flag(),
            library_flags: library_flags(&target.libraries, &config.lib_dir),
            options: target.options.clone(),
            output: output_path(config, &target.name, target.kind, platform),
        }
    }

    /// Arguments passed to the compiler, in command-line order.
    pub fn args(&self) -> Vec<&str> {
        let options = self.options.as_deref();
        let include = Some(self.include_flag.as_str());

        let tail: Vec<Option<&str>> = match self.kind {
            TargetKind::Executable => vec![options, include],
            TargetKind::DynamicLibrary => vec![
                include,
                options,
                Some(POSITION_INDEPENDENT),
                Some(SHARED),
            ],
            TargetKind::StaticLibrary => vec![include, options],
        };

        self.sources
            .iter()
            .map(Path::as_str)
            .chain(self.library_flags.iter().map(String::as_str))
            .chain(tail.into_iter().flatten())
            .chain([DEBUG_INFO, OUTPUT, self.output.as_str()])
            .collect()
    }

    /// The compiler followed by its arguments.
    pub fn command_line(&self) -> Vec<&str> {
        let mut command = vec![self.compiler.as_str()];
        command.extend(self.args());
        command
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> BuildConfig {
        BuildConfig::new("/work")
    }

    fn target(name: &str, kind: TargetKind) -> Target {
        let mut target = Target::new(name, kind);
        target.files = vec!["main.cpp".into()];
        target
    }

    fn basename(kind: TargetKind, name: &str, platform: Platform) -> String {
        output_path(&config(), name, kind, platform)
            .file_name()
            .unwrap()
            .to_string()
    }

    #[test]
    fn platform_from_system() {
        assert_eq!(Platform::from_system("windows"), Platform::Windows);
        assert_eq!(Platform::from_system("macos"), Platform::MacOs);
        assert_eq!(Platform::from_system("linux"), Platform::Other);
        assert_eq!(Platform::from_system("freebsd"), Platform::Other);
    }

    #[test]
    fn dynamic_library_names() {
        use TargetKind::DynamicLibrary;
        assert_eq!(basename(DynamicLibrary, "foo", Platform::Other), "libfoo.so");
        assert_eq!(basename(DynamicLibrary, "foo", Platform::Windows), "libfoo.dll");
        assert_eq!(basename(DynamicLibrary, "foo", Platform::MacOs), "libfoo.dylib");
    }

    #[test]
    fn static_library_names() {
        use TargetKind::StaticLibrary;
        assert_eq!(basename(StaticLibrary, "foo", Platform::Other), "libfoo.a");
        assert_eq!(basename(StaticLibrary, "foo", Platform::Windows), "libfoo.lib");
        assert_eq!(basename(StaticLibrary, "foo", Platform::MacOs), "libfoo.a");
    }

    #[test]
    fn executable_names() {
        use TargetKind::Executable;
        assert_eq!(basename(Executable, "app", Platform::Other), "app");
        assert_eq!(basename(Executable, "app", Platform::MacOs), "app");
        assert_eq!(basename(Executable, "app", Platform::Windows), "app.exe");
    }

    #[test]
    fn output_directories() {
        let config = config();
        let exe = output_path(&config, "app", TargetKind::Executable, Platform::Other);
        let lib = output_path(&config, "foo", TargetKind::StaticLibrary, Platform::Other);
        assert_eq!(exe.as_str(), "/work/bin/app");
        assert_eq!(lib.as_str(), "/work/lib/libfoo.a");
    }

    #[test]
    fn library_flags_keep_declaration_order() {
        let flags = library_flags(&["a".into(), "b".into()], &Path::from("/work/lib"));
        assert_eq!(
            flags,
            ["-L/work/lib", "-la", "-lb", "-Wl,-rpath,/work/lib"]
        );
    }

    #[test]
    fn no_libraries_no_flags() {
        assert!(library_flags(&[], &Path::from("/work/lib")).is_empty());

        let target = target("app", TargetKind::Executable);
        let sources = vec![Path::from("/work/app/main.cpp")];
        let invocation = Invocation::new(&target, sources, &config(), Platform::Other, &Path::from("g++"));
        assert!(invocation.library_flags.is_empty());
        assert!(!invocation.args().iter().any(|arg| arg.starts_with("-L") || arg.starts_with("-Wl")));
    }

    #[test]
    fn executable_command() {
        let mut target = target("producer", TargetKind::Executable);
        target.libraries = vec!["kafka".into()];
        target.options = Some("-std=c++17 -Wall".into());
        let sources = vec![Path::from("/work/app/main.cpp")];

        let invocation = Invocation::new(&target, sources, &config(), Platform::Other, &Path::from("g++"));
        assert_eq!(
            invocation.command_line(),
            [
                "g++",
                "/work/app/main.cpp",
                "-L/work/lib",
                "-lkafka",
                "-Wl,-rpath,/work/lib",
                "-std=c++17 -Wall",
                "-I/work",
                "-g",
                "-o",
                "/work/bin/producer",
            ]
        );
    }

    #[test]
    fn dynamic_library_command() {
        let mut target = target("kafka", TargetKind::DynamicLibrary);
        target.options = Some("-O2".into());
        let sources = vec![
            Path::from("/work/kafka/src/producer.cxx"),
            Path::from("/work/kafka/src/consumer.cxx"),
        ];

        let invocation = Invocation::new(&target, sources, &config(), Platform::Other, &Path::from("g++"));
        assert_eq!(
            invocation.command_line(),
            [
                "g++",
                "/work/kafka/src/producer.cxx",
                "/work/kafka/src/consumer.cxx",
                "-I/work",
                "-O2",
                "-fPIC",
                "-shared",
                "-g",
                "-o",
                "/work/lib/libkafka.so",
            ]
        );
    }

    #[test]
    fn static_library_command_without_options() {
        let target = target("multicore", TargetKind::StaticLibrary);
        let sources = vec![Path::from("/work/multicore/threadmanager.cxx")];

        let invocation = Invocation::new(&target, sources, &config(), Platform::Windows, &Path::from("g++"));
        assert_eq!(
            invocation.args(),
            [
                "/work/multicore/threadmanager.cxx",
                "-I/work",
                "-g",
                "-o",
                "/work/lib/libmulticore.lib",
            ]
        );
        assert!(invocation.args().iter().all(|arg| !arg.is_empty()));
    }
}

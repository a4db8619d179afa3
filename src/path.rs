use core::fmt;

/// A forward-slash separated path string.
///
/// Descriptor values, output locations and compiler arguments are all
/// plain strings in the end, so paths are kept as normalized strings and
/// only turned into `std::path::Path` at the `Os` boundary.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Path(String);

const SEP: &str = "/";

impl AsRef<str> for Path {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Path({})", self.0)
    }
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from(path: impl AsRef<str>) -> Self {
        Self(path.as_ref().replace('\\', "/"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for `/usr/src` as well as drive-letter paths like `C:/src`.
    pub fn is_absolute(&self) -> bool {
        let bytes = self.0.as_bytes();
        self.0.starts_with(SEP)
            || (bytes.len() >= 3
                && bytes[0].is_ascii_alphabetic()
                && bytes[1] == b':'
                && bytes[2] == b'/')
    }

    pub fn join(&self, path: impl AsRef<str>) -> Self {
        let path = Self::from(path);
        if path.is_absolute() || self.0.is_empty() {
            return path;
        }

        let mut new_path = String::from(self.0.trim_end_matches(SEP));
        new_path.push_str(SEP);
        new_path.push_str(path.0.trim_start_matches("./"));
        Self(new_path)
    }

    pub fn file_name(&self) -> Option<&str> {
        self.0
            .trim_end_matches(SEP)
            .rsplit(SEP)
            .next()
            .filter(|name| !name.is_empty())
    }
}

use std::path::{Component, Path, PathBuf};

use url::Url;

/// Where a source location points to, once URL syntax has been peeled off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Location {
    /// A path on the local filesystem, from a `file://` URL or a plain path.
    File(PathBuf),
    /// Anything served over a network scheme such as `http://`.
    Remote,
}

impl Location {
    pub(crate) fn parse(location: &str) -> Self {
        match Url::parse(location) {
            Ok(url) if url.scheme() == "file" => match url.to_file_path() {
                Ok(path) => Self::File(path),
                Err(()) => Self::Remote,
            },
            // Single-letter schemes are Windows drive letters, not URLs.
            Ok(url) if url.scheme().len() > 1 => Self::Remote,
            _ => Self::File(PathBuf::from(location)),
        }
    }
}

/// Collapse `.` and `..` components without touching the filesystem.
pub(crate) fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // popping past the root leaves the root in place
                if !normalized.pop() && !normalized.has_root() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Resolve `path` against `base` the way `path.resolve(base, path)` does:
/// absolute paths are kept, relative ones are joined, and the result is
/// normalized lexically.
pub(crate) fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}

/// Make `path` absolute against the current directory, falling back to the
/// path as given when the current directory is unavailable.
pub(crate) fn absolute(path: &Path) -> PathBuf {
    match std::env::current_dir() {
        Ok(cwd) => resolve(&cwd, path),
        Err(_) => normalize(path),
    }
}

/// Render a relative path with `/` separators so hashes do not depend on the
/// host platform.
pub(crate) fn to_slash(path: &Path) -> String {
    path.components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

pub(crate) fn strip_suffix<'a>(string: &'a str, suffix: &str) -> &'a str {
    string.strip_suffix(suffix).unwrap_or(string)
}

pub(crate) fn strip_prefix<'a>(string: &'a str, prefix: &str) -> &'a str {
    string.strip_prefix(prefix).unwrap_or(string)
}

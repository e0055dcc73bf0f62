//! Upward directory search for package roots.

use std::path::{Path, PathBuf};

use log::trace;

use crate::path::{absolute, Location};

/// Marker file that makes a directory a package root.
pub const PACKAGE_MANIFEST: &str = "package.json";

/// Search `starting_directory` and each of its ancestors for a file named
/// `target_filename`, returning the directory that contains it.
pub fn find_file(starting_directory: &Path, target_filename: &str) -> Option<PathBuf> {
    let mut directory = starting_directory;
    loop {
        if directory.join(target_filename).is_file() {
            return Some(directory.to_owned());
        }
        match directory.parent() {
            Some(parent) if parent != directory => directory = parent,
            // reached the filesystem root
            _ => return None,
        }
    }
}

/// Detect the nearest directory at or above `location` that contains a
/// `package.json`.
///
/// `location` may be a plain path or a `file://` URL. Network URLs
/// (`http://`, `https://`, ...) never have a package root and return `None`
/// without touching the filesystem. Relative paths are taken from the
/// current directory.
///
/// An existing directory is searched first; a file, or a path that does not
/// exist, starts the search at its parent.
pub fn detect_package_root(location: &str) -> Option<PathBuf> {
    let path = match Location::parse(location) {
        Location::File(path) => path,
        Location::Remote => return None,
    };
    let path = absolute(&path);

    let starting_directory = if path.is_dir() {
        path.as_path()
    } else {
        path.parent()?
    };
    trace!("searching for {} from {:?}", PACKAGE_MANIFEST, starting_directory);
    find_file(starting_directory, PACKAGE_MANIFEST)
}

/// [`detect_package_root`] starting from the current directory.
pub fn detect_package_root_from_cwd() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_file(&cwd, PACKAGE_MANIFEST)
}

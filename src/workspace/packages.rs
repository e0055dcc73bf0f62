use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use globwalk::{FileType, GlobWalkerBuilder};
use log::{debug, trace, warn};

use super::{Error, ErrorKind, PackageInfo, WorkspaceConfig};
use crate::{
    find_up::PACKAGE_MANIFEST,
    manifest::{PackageManifest, PackageManifestFile},
    path::absolute,
};

const IGNORED_DIRECTORIES: &str = "!**/node_modules/**";

/// Enumerate the packages matched by the workspace's package globs.
///
/// Directories whose manifest is missing or unreadable are skipped. A
/// directory matched by several patterns is reported once, in the position
/// of its first match.
pub fn get_workspace_packages(
    root: &Path,
    config: &WorkspaceConfig,
    scope: &str,
) -> Result<Vec<PackageInfo>, Error> {
    let root = absolute(root);
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut packages = Vec::new();

    for pattern in &config.packages {
        for package_directory in package_directories(&root, pattern)? {
            if !seen.insert(package_directory.clone()) {
                continue;
            }
            if let Some(package) = get_package_info(&package_directory, scope) {
                packages.push(package);
            }
        }
    }

    debug!(
        "found {} packages in {:?}: {:?}",
        packages.len(),
        root,
        packages.iter().map(PackageInfo::name).collect::<Vec<_>>()
    );
    Ok(packages)
}

/// Directories matching one workspace glob, in sorted order.
fn package_directories(root: &Path, pattern: &str) -> Result<Vec<PathBuf>, Error> {
    let pattern = pattern.trim_start_matches("./").trim_end_matches('/');
    if pattern.is_empty() || pattern == "." {
        // the workspace root as a package of its own
        return Ok(vec![root.to_owned()]);
    }

    let manifest_glob = format!("{}/{}", pattern, PACKAGE_MANIFEST);
    let walker = GlobWalkerBuilder::from_patterns(root, &[manifest_glob.as_str(), IGNORED_DIRECTORIES])
        .file_type(FileType::FILE)
        .build()
        .map_err(|source| ErrorKind::Glob {
            pattern: pattern.to_owned(),
            source,
        })?;

    let mut directories = walker
        .map(|maybe_dir_entry| -> Result<Option<PathBuf>, Error> {
            let dir_entry = maybe_dir_entry?;
            let manifest_file = PackageManifestFile::from(dir_entry.into_path());
            Ok(manifest_file.package_directory().map(ToOwned::to_owned))
        })
        .filter_map(Result::transpose)
        .collect::<Result<Vec<_>, _>>()?;
    directories.sort_unstable();
    trace!("{:?} matched {:?}", pattern, directories);
    Ok(directories)
}

/// Read the package in `package_directory`.
///
/// Returns `None` when there is no `package.json` or it cannot be parsed;
/// manifests are optional, so this is not an error. Only dependencies whose
/// names start with `scope` are kept.
pub fn get_package_info(package_directory: &Path, scope: &str) -> Option<PackageInfo> {
    let manifest_file = PackageManifestFile::in_directory(package_directory);
    let manifest = match PackageManifest::read(&manifest_file) {
        Ok(Some(manifest)) => manifest,
        Ok(None) => {
            debug!("no package manifest in {:?}", package_directory);
            return None;
        }
        Err(err) => {
            warn!("skipping package: {}", err);
            return None;
        }
    };

    Some(PackageInfo::new(
        manifest.name.clone(),
        package_directory,
        manifest.has_build_script(),
        manifest.scoped_dependencies(scope),
    ))
}

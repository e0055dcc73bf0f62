//! Convert tsconfig `compilerOptions.paths` into bundler aliases.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use log::{debug, trace};
use serde_json::Value;

use crate::{
    io::{read_optional_json, FromFileError},
    path::{absolute, resolve, strip_prefix, strip_suffix},
};

const TSCONFIG_FILE: &str = "tsconfig.json";

/// Where to load the TypeScript configuration from.
#[derive(Clone, Debug, Default)]
pub enum TsconfigSource {
    /// Look for `tsconfig.json` in the working directory only; parent
    /// directories are not searched.
    #[default]
    Detect,
    /// Read this file, relative to the working directory.
    File(PathBuf),
    /// Use an already-parsed configuration.
    Object(Value),
}

impl From<PathBuf> for TsconfigSource {
    fn from(path: PathBuf) -> Self {
        Self::File(path)
    }
}

impl From<&Path> for TsconfigSource {
    fn from(path: &Path) -> Self {
        Self::File(path.to_owned())
    }
}

impl From<Value> for TsconfigSource {
    fn from(value: Value) -> Self {
        Self::Object(value)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AliasError {
    #[error("unable to determine the current directory")]
    CurrentDir(#[source] std::io::Error),

    #[error(transparent)]
    Load(#[from] FromFileError),
}

/// Parse tsconfig path mappings into an alias-to-absolute-path map.
///
/// A tsconfig that cannot be found yields an empty map; one that exists but
/// is not valid JSON is an error. `cwd` defaults to the current directory;
/// a relative `cwd` is taken from the current directory.
///
/// For every mapping whose target is a non-empty array, the `/*` suffix is
/// removed from the key and the first target (later targets are ignored),
/// and the target is resolved against `cwd`.
pub fn parse_tsconfig_aliases(
    source: TsconfigSource,
    cwd: Option<&Path>,
) -> Result<HashMap<String, PathBuf>, AliasError> {
    let working_directory = match cwd {
        Some(cwd) => absolute(cwd),
        None => std::env::current_dir().map_err(AliasError::CurrentDir)?,
    };

    let tsconfig = match load_tsconfig(source, &working_directory)? {
        Some(tsconfig) => tsconfig,
        None => {
            debug!("no tsconfig found in {:?}", working_directory);
            return Ok(HashMap::new());
        }
    };

    let paths = tsconfig
        .get("compilerOptions")
        .and_then(|compiler_options| compiler_options.get("paths"))
        .and_then(Value::as_object);
    Ok(paths
        .map(|paths| paths_to_aliases(paths, &working_directory))
        .unwrap_or_default())
}

fn load_tsconfig(
    source: TsconfigSource,
    working_directory: &Path,
) -> Result<Option<Value>, FromFileError> {
    match source {
        TsconfigSource::Object(value) => Ok(Some(value)),
        TsconfigSource::File(path) => read_optional_json(working_directory.join(path)),
        TsconfigSource::Detect => read_optional_json(working_directory.join(TSCONFIG_FILE)),
    }
}

fn paths_to_aliases(
    paths: &serde_json::Map<String, Value>,
    working_directory: &Path,
) -> HashMap<String, PathBuf> {
    paths
        .iter()
        .filter_map(|(key, targets)| {
            let first_target = match targets.as_array().and_then(|targets| targets.first()) {
                Some(Value::String(target)) => target,
                _ => {
                    trace!("skipping tsconfig path {:?}", key);
                    return None;
                }
            };
            let alias = strip_suffix(key, "/*");
            let target = strip_prefix(strip_suffix(first_target, "/*"), "./");
            Some((
                alias.to_owned(),
                resolve(working_directory, Path::new(target)),
            ))
        })
        .collect()
}

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{
    find_up::PACKAGE_MANIFEST,
    io::{read_optional_json, FromFileError},
};

/// Path to a `package.json`.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub(crate) struct PackageManifestFile(PathBuf);

impl PackageManifestFile {
    pub fn in_directory(package_directory: &Path) -> Self {
        Self(package_directory.join(PACKAGE_MANIFEST))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// The package directory, or `None` for a bare `package.json` with no
    /// parent component.
    pub fn package_directory(&self) -> Option<&Path> {
        self.0.parent()
    }
}

impl From<PathBuf> for PackageManifestFile {
    fn from(path: PathBuf) -> Self {
        Self(path)
    }
}

/// The parts of a `package.json` the workspace builder reads.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PackageManifest {
    pub name: String,
    #[serde(default)]
    pub scripts: Map<String, Value>,
    #[serde(default)]
    pub dependencies: Map<String, Value>,
    #[serde(default)]
    pub dev_dependencies: Map<String, Value>,
}

impl PackageManifest {
    /// Read a manifest; a missing file is `Ok(None)`.
    pub fn read(manifest_file: &PackageManifestFile) -> Result<Option<Self>, FromFileError> {
        read_optional_json(manifest_file.as_path())
    }

    pub fn has_build_script(&self) -> bool {
        matches!(self.scripts.get("build"), Some(Value::String(script)) if !script.is_empty())
    }

    /// Names of regular then dev dependencies that start with `scope`, in
    /// manifest order, each listed once.
    pub fn scoped_dependencies(&self, scope: &str) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for name in self.dependencies.keys().chain(self.dev_dependencies.keys()) {
            if name.starts_with(scope) && !names.contains(name) {
                names.push(name.to_owned());
            }
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(json: &str) -> PackageManifest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn scoped_dependencies_merge_dev_dependencies() {
        let manifest = manifest(
            r#"{
                "name": "@tsaio/css",
                "dependencies": { "@tsaio/hash": "workspace:*", "react": "^19.0.0" },
                "devDependencies": { "@tsaio/dev": "workspace:*", "@tsaio/hash": "workspace:*", "vitest": "^3.0.0" }
            }"#,
        );
        assert_eq!(
            manifest.scoped_dependencies("@tsaio/"),
            vec![String::from("@tsaio/hash"), String::from("@tsaio/dev")]
        );
    }

    #[test]
    fn build_script_must_be_non_empty() {
        assert!(manifest(r#"{ "name": "a", "scripts": { "build": "rolldown -c" } }"#).has_build_script());
        assert!(!manifest(r#"{ "name": "a", "scripts": { "build": "" } }"#).has_build_script());
        assert!(!manifest(r#"{ "name": "a", "scripts": { "test": "vitest" } }"#).has_build_script());
        assert!(!manifest(r#"{ "name": "a" }"#).has_build_script());
    }
}

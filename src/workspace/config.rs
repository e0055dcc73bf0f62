use std::{fs, path::Path};

use log::trace;

use super::{Error, ErrorKind, WorkspaceConfig};
use crate::find_up::PACKAGE_MANIFEST;

pub const WORKSPACE_MANIFEST: &str = "pnpm-workspace.yaml";

/// Whether `root` holds both a `package.json` and a `pnpm-workspace.yaml`.
pub fn detect_workspace_config(root: &Path) -> bool {
    root.join(PACKAGE_MANIFEST).exists() && root.join(WORKSPACE_MANIFEST).exists()
}

/// Read the package globs from `<root>/pnpm-workspace.yaml`.
pub fn parse_workspace_config(root: &Path) -> Result<WorkspaceConfig, Error> {
    let manifest = root.join(WORKSPACE_MANIFEST);
    if !manifest.exists() {
        return Err(ErrorKind::WorkspaceManifestNotFound(manifest).into());
    }
    let content = fs::read_to_string(&manifest).map_err(|source| ErrorKind::ReadWorkspaceManifest {
        path: manifest.clone(),
        source,
    })?;
    let config = WorkspaceConfig::parse(&content);
    trace!("{:?}: {:?}", manifest, config);
    Ok(config)
}

impl WorkspaceConfig {
    /// Extract the `packages:` list from workspace manifest text.
    ///
    /// Only a top-level block list is recognised; every other key is
    /// ignored and the list ends at the first line that is not an item, a
    /// comment, or blank. Quotes around items are dropped.
    pub fn parse(content: &str) -> Self {
        let mut packages = Vec::new();
        let mut in_packages = false;

        for line in content.lines() {
            let trimmed = line.trim();
            if !in_packages {
                in_packages = trimmed == "packages:";
                continue;
            }
            if let Some(item) = trimmed.strip_prefix('-') {
                let pattern: String = item.trim().chars().filter(|c| !matches!(c, '\'' | '"')).collect();
                if !pattern.is_empty() {
                    packages.push(pattern);
                }
            } else if !trimmed.is_empty() && !trimmed.starts_with('#') {
                break;
            }
        }

        Self { packages }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns(config: &WorkspaceConfig) -> Vec<&str> {
        config.packages.iter().map(String::as_str).collect()
    }

    #[test]
    fn parses_package_list() {
        let config = WorkspaceConfig::parse("packages:\n  - packages/*\n  - examples/*\n  - tsaio\n");
        assert_eq!(patterns(&config), vec!["packages/*", "examples/*", "tsaio"]);
    }

    #[test]
    fn strips_quotes() {
        let config =
            WorkspaceConfig::parse("packages:\n  - \"packages/*\"\n  - 'examples/*'\n  - tsaio\n");
        assert_eq!(patterns(&config), vec!["packages/*", "examples/*", "tsaio"]);
    }

    #[test]
    fn skips_comments_and_blank_lines_and_stops_at_next_key() {
        let config = WorkspaceConfig::parse(
            "# workspace\npackages:\n  # first party\n  - packages/*\n\n  - apps/*\nonlyBuiltDependencies:\n  - esbuild\n",
        );
        assert_eq!(patterns(&config), vec!["packages/*", "apps/*"]);
    }

    #[test]
    fn missing_packages_key_is_empty() {
        let config = WorkspaceConfig::parse("catalog:\n  react: ^19.0.0\n");
        assert!(config.packages.is_empty());
    }
}

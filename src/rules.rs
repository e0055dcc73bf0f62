//! Share one set of markdown instructions between AI coding assistants.
//!
//! `rules/*.md` is the source of truth. Tools that read a directory of rules
//! get a copy of each file; tools that read a single file get all rules
//! concatenated in file-name order.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use log::debug;

const RULES_DIRECTORY: &str = "rules";
const SEPARATOR: &str = "\n\n---\n\n";

/// Tools that read a directory of rule files, relative to the root.
const DIRECTORY_TARGETS: &[&str] = &[".roo/rules"];

/// Tools that read a single rules file, relative to the root.
const FILE_TARGETS: &[&str] = &["CLAUDE.md", "QWEN.md"];

/// Mirror `<root>/rules/*.md` into every assistant's rules location.
///
/// `root` defaults to the current directory. Without a `rules` directory
/// there is nothing to do.
pub fn prepare_rules(root: Option<&Path>) -> Result<()> {
    let root = match root {
        Some(root) => root.to_owned(),
        None => std::env::current_dir().context("unable to determine the current directory")?,
    };
    let rules_directory = root.join(RULES_DIRECTORY);
    if !rules_directory.exists() {
        debug!("no rules directory at {:?}", rules_directory);
        return Ok(());
    }

    let rules = read_rules(&rules_directory)?;
    if rules.is_empty() {
        debug!("no markdown rules in {:?}", rules_directory);
        return Ok(());
    }

    for target in DIRECTORY_TARGETS {
        let target_directory = root.join(target);
        fs::create_dir_all(&target_directory)
            .with_context(|| format!("unable to create {:?}", target_directory))?;
        for (file_name, content) in &rules {
            let destination = target_directory.join(file_name);
            fs::write(&destination, content)
                .with_context(|| format!("unable to write {:?}", destination))?;
        }
    }

    let combined = rules
        .iter()
        .map(|(_, content)| content.as_str())
        .collect::<Vec<_>>()
        .join(SEPARATOR);
    for target in FILE_TARGETS {
        let destination = root.join(target);
        fs::write(&destination, &combined)
            .with_context(|| format!("unable to write {:?}", destination))?;
    }

    debug!("prepared {} rules from {:?}", rules.len(), rules_directory);
    Ok(())
}

/// Markdown files in `rules_directory`, sorted by file name.
fn read_rules(rules_directory: &Path) -> Result<Vec<(PathBuf, String)>> {
    let entries = fs::read_dir(rules_directory)
        .with_context(|| format!("unable to list {:?}", rules_directory))?;

    let mut file_names = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("unable to list {:?}", rules_directory))?;
        let file_name = PathBuf::from(entry.file_name());
        if file_name.extension().is_some_and(|extension| extension == "md") {
            file_names.push(file_name);
        }
    }
    file_names.sort();

    file_names
        .into_iter()
        .map(|file_name| {
            let path = rules_directory.join(&file_name);
            let content =
                fs::read_to_string(&path).with_context(|| format!("unable to read {:?}", path))?;
            Ok((file_name, content))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workspace_with_rules(rules: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(RULES_DIRECTORY)).unwrap();
        for (name, content) in rules {
            fs::write(dir.path().join(RULES_DIRECTORY).join(name), content).unwrap();
        }
        dir
    }

    #[test]
    fn missing_rules_directory_does_nothing() {
        let dir = tempfile::tempdir().unwrap();
        prepare_rules(Some(dir.path())).unwrap();
        assert!(!dir.path().join("CLAUDE.md").exists());
        assert!(!dir.path().join(".roo").exists());
    }

    #[test]
    fn rules_directory_without_markdown_writes_nothing() {
        let dir = workspace_with_rules(&[("notes.txt", "not a rule")]);
        fs::write(dir.path().join("CLAUDE.md"), "hand written").unwrap();

        prepare_rules(Some(dir.path())).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("CLAUDE.md")).unwrap(),
            "hand written"
        );
        assert!(!dir.path().join("QWEN.md").exists());
        assert!(!dir.path().join(".roo").exists());
    }

    #[test]
    fn copies_markdown_rules_and_concatenates_in_order() {
        let dir = workspace_with_rules(&[
            ("z-last.md", "# Last"),
            ("a-first.md", "# First"),
            ("m-middle.md", "# Middle"),
            ("README.txt", "not a rule"),
            ("config.json", "{}"),
        ]);
        prepare_rules(Some(dir.path())).unwrap();

        let expected = "# First\n\n---\n\n# Middle\n\n---\n\n# Last";
        assert_eq!(fs::read_to_string(dir.path().join("CLAUDE.md")).unwrap(), expected);
        assert_eq!(fs::read_to_string(dir.path().join("QWEN.md")).unwrap(), expected);

        let roo = dir.path().join(".roo/rules");
        assert_eq!(fs::read_to_string(roo.join("a-first.md")).unwrap(), "# First");
        assert_eq!(fs::read_to_string(roo.join("z-last.md")).unwrap(), "# Last");
        assert!(!roo.join("README.txt").exists());
        assert!(!roo.join("config.json").exists());
    }
}

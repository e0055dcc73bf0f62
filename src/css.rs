//! Class and variable names for CSS written inline in source code.
//!
//! At development time these tokens are computed at runtime; a build step
//! later substitutes the same names into generated CSS modules, so both sides
//! must agree on exactly how a token is derived.

use std::fmt::Display;

use sha2::{Digest, Sha256};

use crate::hash::hash_position;

const CLASS_PREFIX: &str = "cm";
const CLASS_HASH_LENGTH: usize = 16;
const VARIABLE_PREFIX: &str = "--v-";
const VARIABLE_HASH_LENGTH: usize = 3;

/// Name of a CSS class derived from the contents of a CSS block.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CssClass(String);

/// Name of a CSS custom property derived from where it is declared.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CssVariable(String);

impl CssClass {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl CssVariable {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CssClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Display for CssVariable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CssClass {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CssVariable {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Declare a CSS variable named after the calling line and column.
#[track_caller]
pub fn css_variable() -> CssVariable {
    CssVariable(format!("{}{}", VARIABLE_PREFIX, hash_position(VARIABLE_HASH_LENGTH)))
}

/// Declare a CSS class from a template split around its variables.
///
/// `segments[i]` is followed by `variables[i]`, so a template with `n`
/// variables has `n + 1` segments. Missing variables contribute nothing.
/// The class name depends only on the concatenated text.
pub fn css(segments: &[&str], variables: &[CssVariable]) -> CssClass {
    let content: String = segments
        .iter()
        .enumerate()
        .map(|(index, segment)| {
            let variable = variables.get(index).map(CssVariable::as_str).unwrap_or("");
            format!("{}{}", segment, variable)
        })
        .collect();

    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let digest = hex::encode(hasher.finalize());
    CssClass(format!("{}{}", CLASS_PREFIX, &digest[..CLASS_HASH_LENGTH]))
}

//! Stable identifiers derived from call sites.

use std::{path::Path, str::FromStr};

use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};

use crate::{
    find_up::detect_package_root,
    path::{to_slash, Location},
    trace::{trace_caller, CodePosition},
};

/// Digest used to hash code positions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Sha224,
    #[default]
    Sha256,
    Sha384,
    Sha512,
}

#[derive(Debug, thiserror::Error)]
#[error("unsupported hash algorithm {0:?}, expected one of sha224, sha256, sha384, sha512")]
pub struct ParseHashAlgorithmError(String);

impl FromStr for HashAlgorithm {
    type Err = ParseHashAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha224" => Ok(Self::Sha224),
            "sha256" => Ok(Self::Sha256),
            "sha384" => Ok(Self::Sha384),
            "sha512" => Ok(Self::Sha512),
            _ => Err(ParseHashAlgorithmError(s.to_owned())),
        }
    }
}

/// Hash the call site of this function into `length` hex characters using
/// SHA-256.
///
/// The same call site always produces the same hash; different call sites
/// produce different hashes.
#[track_caller]
pub fn hash_position(length: usize) -> String {
    hash_position_with(length, HashAlgorithm::Sha256)
}

/// [`hash_position`] with an explicit digest.
#[track_caller]
pub fn hash_position_with(length: usize, algorithm: HashAlgorithm) -> String {
    hash_code_position(&trace_caller(), length, algorithm)
}

/// Hash an arbitrary code position.
///
/// Files inside a package are hashed by their path relative to the package
/// root, so the result does not change between checkouts of the same
/// repository. Anything else is hashed by its raw url.
pub fn hash_code_position(position: &CodePosition, length: usize, algorithm: HashAlgorithm) -> String {
    let url = package_relative_url(&position.url).unwrap_or_else(|| position.url.clone());
    let digest = match algorithm {
        HashAlgorithm::Sha224 => digest_position::<Sha224>(&url, position),
        HashAlgorithm::Sha256 => digest_position::<Sha256>(&url, position),
        HashAlgorithm::Sha384 => digest_position::<Sha384>(&url, position),
        HashAlgorithm::Sha512 => digest_position::<Sha512>(&url, position),
    };
    digest.chars().take(length).collect()
}

fn digest_position<D: Digest>(url: &str, position: &CodePosition) -> String {
    let mut hasher = D::new();
    hasher.update(url.as_bytes());
    hasher.update(position.line.to_le_bytes());
    hasher.update(position.column.to_le_bytes());
    hex::encode(hasher.finalize())
}

/// Relative paths are left alone: they already carry no machine-specific
/// prefix.
fn package_relative_url(url: &str) -> Option<String> {
    let path = match Location::parse(url) {
        Location::File(path) if path.is_absolute() => path,
        _ => return None,
    };
    let root = detect_package_root(path.to_str()?)?;
    relative_to(&root, &path)
}

fn relative_to(root: &Path, path: &Path) -> Option<String> {
    path.strip_prefix(root).ok().map(to_slash)
}

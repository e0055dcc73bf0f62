use std::{
    error::Error,
    fmt::Display,
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};

use serde::Deserialize;

#[derive(Debug)]
#[non_exhaustive]
pub struct FromFileError {
    path: PathBuf,
    kind: FromFileErrorKind,
}

impl FromFileError {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> &FromFileErrorKind {
        &self.kind
    }

    /// True when the file exists and was read, but its contents are not the
    /// expected JSON.
    pub fn is_parse_error(&self) -> bool {
        matches!(self.kind, FromFileErrorKind::Parse(_))
    }
}

impl Display for FromFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            FromFileErrorKind::Open(_) => write!(f, "unable to open file {:?}", self.path),
            FromFileErrorKind::Read(_) => write!(f, "unable to read file {:?}", self.path),
            FromFileErrorKind::Parse(err) => {
                write!(f, "unable to parse file {:?}: {}", self.path, err)
            }
        }
    }
}

impl Error for FromFileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            FromFileErrorKind::Open(err) => Some(err),
            FromFileErrorKind::Read(err) => Some(err),
            FromFileErrorKind::Parse(err) => Some(err),
        }
    }
}

#[derive(Debug)]
pub enum FromFileErrorKind {
    #[non_exhaustive]
    Open(io::Error),
    #[non_exhaustive]
    Read(io::Error),
    #[non_exhaustive]
    Parse(serde_json::Error),
}

/// Read and deserialize a JSON file, keeping the path in any error.
pub(crate) fn read_json_from_file<P, T>(path: P) -> Result<T, FromFileError>
where
    P: AsRef<Path>,
    for<'de> T: Deserialize<'de>,
{
    let path = path.as_ref();
    let error = |kind| FromFileError {
        path: path.to_owned(),
        kind,
    };

    let mut file = File::open(path).map_err(|err| error(FromFileErrorKind::Open(err)))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|err| error(FromFileErrorKind::Read(err)))?;
    serde_json::from_str(&contents).map_err(|err| error(FromFileErrorKind::Parse(err)))
}

/// Read an optional JSON artifact. A missing file is `Ok(None)`; a file that
/// exists but cannot be read or parsed is still an error.
pub(crate) fn read_optional_json<P, T>(path: P) -> Result<Option<T>, FromFileError>
where
    P: AsRef<Path>,
    for<'de> T: Deserialize<'de>,
{
    let path = path.as_ref();
    if !path.is_file() {
        return Ok(None);
    }
    read_json_from_file(path).map(Some)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::Value;

    use super::*;

    #[test]
    fn missing_optional_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let value: Option<Value> = read_optional_json(dir.path().join("absent.json")).unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn missing_required_file_is_an_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("absent.json");

        let err = read_json_from_file::<_, Value>(&file).unwrap_err();
        assert!(matches!(err.kind(), FromFileErrorKind::Open(_)));
        assert!(!err.is_parse_error());
        assert_eq!(err.path(), file);
    }

    #[test]
    fn reads_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("package.json");
        fs::write(&file, r#"{ "name": "@tsaio/css" }"#).unwrap();

        let value: Value = read_json_from_file(&file).unwrap();
        assert_eq!(value["name"], "@tsaio/css");
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("broken.json");
        fs::write(&file, "{ not json").unwrap();

        let err = read_optional_json::<_, Value>(&file).unwrap_err();
        assert!(err.is_parse_error());
        assert_eq!(err.path(), file);
        assert!(err.to_string().starts_with("unable to parse file"));
    }
}

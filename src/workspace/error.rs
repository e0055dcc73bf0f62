use std::{fmt::Display, io, path::PathBuf};

use super::build::BuildError;

#[derive(Debug)]
#[non_exhaustive]
pub struct Error {
    kind: ErrorKind,
}

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ErrorKind::WorkspaceNotFound(root) => {
                write!(f, "workspace configuration not found at {:?}", root)
            }
            ErrorKind::WorkspaceManifestNotFound(path) => {
                write!(f, "pnpm-workspace.yaml not found at {:?}", path)
            }
            ErrorKind::ReadWorkspaceManifest { path, .. } => {
                write!(f, "unable to read workspace manifest {:?}", path)
            }
            ErrorKind::Glob { pattern, .. } => {
                write!(f, "invalid workspace package pattern {:?}", pattern)
            }
            ErrorKind::Walk(_) => write!(f, "unable to walk workspace directory tree"),
            ErrorKind::Build(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::WorkspaceNotFound(_) => None,
            ErrorKind::WorkspaceManifestNotFound(_) => None,
            ErrorKind::ReadWorkspaceManifest { source, .. } => Some(source),
            ErrorKind::Glob { source, .. } => Some(source),
            ErrorKind::Walk(err) => Some(err),
            // the build error already renders its cause
            ErrorKind::Build(err) => std::error::Error::source(err),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self { kind }
    }
}

impl From<globwalk::WalkError> for Error {
    fn from(err: globwalk::WalkError) -> Self {
        Self {
            kind: ErrorKind::Walk(err),
        }
    }
}

impl From<BuildError> for Error {
    fn from(err: BuildError) -> Self {
        Self {
            kind: ErrorKind::Build(err),
        }
    }
}

#[derive(Debug)]
pub enum ErrorKind {
    /// The root lacks `package.json` or `pnpm-workspace.yaml`.
    #[non_exhaustive]
    WorkspaceNotFound(PathBuf),
    #[non_exhaustive]
    WorkspaceManifestNotFound(PathBuf),
    #[non_exhaustive]
    ReadWorkspaceManifest { path: PathBuf, source: io::Error },
    #[non_exhaustive]
    Glob {
        pattern: String,
        source: globwalk::GlobError,
    },
    #[non_exhaustive]
    Walk(globwalk::WalkError),
    #[non_exhaustive]
    Build(BuildError),
}

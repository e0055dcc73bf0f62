use std::{
    fmt::Display,
    path::{Path, PathBuf},
};

/// Build progress of a single package.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PackageStatus {
    #[default]
    Pending,
    Building,
    Built,
    Failed,
}

impl Display for PackageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            PackageStatus::Pending => "pending",
            PackageStatus::Building => "building",
            PackageStatus::Built => "built",
            PackageStatus::Failed => "failed",
        };
        f.write_str(status)
    }
}

/// A package discovered in the workspace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageInfo {
    name: String,
    path: PathBuf,
    has_build_script: bool,
    dependencies: Vec<String>,
    status: PackageStatus,
}

impl PackageInfo {
    /// A package that has not been built yet.
    ///
    /// `dependencies` should only name packages inside the workspace scope.
    pub fn new<N, P>(name: N, path: P, has_build_script: bool, dependencies: Vec<String>) -> Self
    where
        N: Into<String>,
        P: Into<PathBuf>,
    {
        Self {
            name: name.into(),
            path: path.into(),
            has_build_script,
            dependencies,
            status: PackageStatus::Pending,
        }
    }

    /// Name declared in the package manifest.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory holding the package manifest.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn has_build_script(&self) -> bool {
        self.has_build_script
    }

    /// Direct dependencies on other workspace packages, in manifest order.
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    pub fn status(&self) -> PackageStatus {
        self.status
    }

    pub(crate) fn set_status(&mut self, status: PackageStatus) {
        self.status = status;
    }
}

/// The subset of `pnpm-workspace.yaml` the builder understands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkspaceConfig {
    /// Glob patterns for package directories, relative to the workspace root.
    pub packages: Vec<String>,
}

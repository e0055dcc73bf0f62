use std::{
    fmt::Display,
    io,
    process::{Command, ExitStatus},
};

use log::{debug, trace};
use rayon::prelude::*;

use super::{PackageInfo, PackageStatus};

/// The command run in a package directory to build it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildCommand {
    program: String,
    args: Vec<String>,
}

impl BuildCommand {
    pub fn new<P, I, A>(program: P, args: I) -> Self
    where
        P: Into<String>,
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for BuildCommand {
    /// `pnpm run build`
    fn default() -> Self {
        Self::new("pnpm", ["run", "build"])
    }
}

impl Display for BuildCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

#[derive(Debug)]
#[non_exhaustive]
pub struct BuildError {
    package: String,
    kind: BuildErrorKind,
}

impl BuildError {
    /// Name of the package that failed to build.
    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn kind(&self) -> &BuildErrorKind {
        &self.kind
    }
}

impl Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to build package {}: ", self.package)?;
        match &self.kind {
            BuildErrorKind::Spawn { command, source } => {
                write!(f, "unable to run {:?}: {}", command, source)
            }
            BuildErrorKind::Status {
                command,
                status,
                stderr,
            } => {
                write!(f, "{:?} exited with {}", command, status)?;
                let stderr = String::from_utf8_lossy(stderr);
                let stderr = stderr.trim();
                if !stderr.is_empty() {
                    write!(f, "\n{}", stderr)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            BuildErrorKind::Spawn { source, .. } => Some(source),
            BuildErrorKind::Status { .. } => None,
        }
    }
}

#[derive(Debug)]
pub enum BuildErrorKind {
    #[non_exhaustive]
    Spawn { command: String, source: io::Error },
    #[non_exhaustive]
    Status {
        command: String,
        status: ExitStatus,
        stderr: Vec<u8>,
    },
}

/// Build one package in its own directory.
///
/// The package is `Building` while the command runs, then `Built` or
/// `Failed`.
pub fn build_package(package: &mut PackageInfo, command: &BuildCommand) -> Result<(), BuildError> {
    package.set_status(PackageStatus::Building);
    debug!("building {} in {:?}", package.name(), package.path());

    let result = (|| {
        let output = Command::new(&command.program)
            .args(&command.args)
            .current_dir(package.path())
            .output()
            .map_err(|source| BuildErrorKind::Spawn {
                command: command.to_string(),
                source,
            })?;
        trace!(
            "{}: {}",
            package.name(),
            String::from_utf8_lossy(&output.stdout).trim_end()
        );
        if !output.status.success() {
            return Err(BuildErrorKind::Status {
                command: command.to_string(),
                status: output.status,
                stderr: output.stderr,
            });
        }
        Ok(())
    })();

    match result {
        Ok(()) => {
            package.set_status(PackageStatus::Built);
            Ok(())
        }
        Err(kind) => {
            package.set_status(PackageStatus::Failed);
            Err(BuildError {
                package: package.name().to_owned(),
                kind,
            })
        }
    }
}

/// Build every package that has a build script, concurrently.
///
/// No ordering is imposed between the packages given. The first failure is
/// returned; builds already running are allowed to finish, builds not yet
/// started may be skipped and stay `Pending`.
pub fn build_packages_parallel(
    packages: &mut [PackageInfo],
    command: &BuildCommand,
) -> Result<(), BuildError> {
    packages
        .par_iter_mut()
        .filter(|package| package.has_build_script())
        .map(|package| build_package(package, command))
        .collect()
}

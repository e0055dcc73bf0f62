//! Build every package of a pnpm workspace in dependency order.
//!
//! The pipeline is:
//!
//! 1. [`detect_workspace_config`] / [`parse_workspace_config`] read the
//!    package globs from `pnpm-workspace.yaml`,
//! 2. [`get_workspace_packages`] expands the globs and reads each
//!    `package.json`,
//! 3. [`topological_sort`] orders packages after their workspace
//!    dependencies,
//! 4. [`build_packages_parallel`] runs the build command, one wave of
//!    mutually independent packages at a time.
//!
//! [`build_workspace`] composes these steps.

use std::path::Path;

use log::debug;

use crate::logger::Logger;

mod build;
mod config;
mod error;
mod packages;
mod sort;
mod types;

pub use build::{build_package, build_packages_parallel, BuildCommand, BuildError, BuildErrorKind};
pub use config::{detect_workspace_config, parse_workspace_config, WORKSPACE_MANIFEST};
pub use error::{Error, ErrorKind};
pub use packages::{get_package_info, get_workspace_packages};
pub use sort::{build_waves, find_cycle, topological_sort};
pub use types::{PackageInfo, PackageStatus, WorkspaceConfig};

/// Dependency names starting with this prefix belong to the workspace.
pub const DEFAULT_SCOPE: &str = "@tsaio/";

/// Knobs for [`build_workspace_with`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkspaceOptions {
    /// Name prefix that marks a dependency as a workspace package.
    pub scope: String,
    /// Command run in each package directory.
    pub build_command: BuildCommand,
}

impl Default for WorkspaceOptions {
    fn default() -> Self {
        Self {
            scope: String::from(DEFAULT_SCOPE),
            build_command: BuildCommand::default(),
        }
    }
}

/// Build all packages of the workspace at `root` that have a build script,
/// using `pnpm run build` and the `@tsaio/` scope.
pub fn build_workspace(root: &Path, logger: &Logger) -> Result<Vec<PackageInfo>, Error> {
    build_workspace_with(root, &WorkspaceOptions::default(), logger)
}

/// Build all packages of the workspace at `root` that have a build script.
///
/// Packages are built in waves: every package of a wave has all of its
/// workspace dependencies built by earlier waves, and the packages within a
/// wave build concurrently. Returns the buildable packages in build order
/// with their final status.
pub fn build_workspace_with(
    root: &Path,
    options: &WorkspaceOptions,
    logger: &Logger,
) -> Result<Vec<PackageInfo>, Error> {
    if !detect_workspace_config(root) {
        return Err(ErrorKind::WorkspaceNotFound(root.to_owned()).into());
    }

    let config = parse_workspace_config(root)?;
    let buildable: Vec<PackageInfo> = get_workspace_packages(root, &config, &options.scope)?
        .into_iter()
        .filter(PackageInfo::has_build_script)
        .collect();
    if buildable.is_empty() {
        logger.info("No packages with build script found");
        return Ok(buildable);
    }

    if let Some(cycle) = find_cycle(&buildable) {
        logger.warn(format!(
            "Dependency cycle detected, build order is not guaranteed: {}",
            cycle.join(" -> ")
        ));
    }

    let sorted = topological_sort(buildable);
    let total = sorted.len();
    debug!(
        "build order: {:?}",
        sorted.iter().map(PackageInfo::name).collect::<Vec<_>>()
    );
    let mut waves = group_into_waves(sorted);

    logger.info(format!("Building {} packages in {} waves", total, waves.len()));
    for position in 0..waves.len() {
        let wave = &mut waves[position];
        let names: Vec<&str> = wave.iter().map(PackageInfo::name).collect();
        logger.debug(format!("Building {}", names.join(", ")));
        if let Err(err) = build_packages_parallel(wave, &options.build_command) {
            report_statuses(&waves, logger);
            return Err(err.into());
        }
    }
    logger.success(format!("Built {} packages", total));

    Ok(waves.into_iter().flatten().collect())
}

/// List where every package ended up after a failed wave, since the error
/// only names the first failure.
fn report_statuses(waves: &[Vec<PackageInfo>], logger: &Logger) {
    for package in waves.iter().flatten() {
        match package.status() {
            PackageStatus::Failed => logger.error(format!("{} {}", package.name(), package.status())),
            status => logger.info(format!("{} {}", package.name(), status)),
        }
    }
}

fn group_into_waves(sorted: Vec<PackageInfo>) -> Vec<Vec<PackageInfo>> {
    let wave_numbers = build_waves(&sorted);
    let wave_count = wave_numbers.iter().max().map_or(0, |wave| wave + 1);
    let mut waves: Vec<Vec<PackageInfo>> = (0..wave_count).map(|_| Vec::new()).collect();
    for (package, wave) in sorted.into_iter().zip(wave_numbers) {
        waves[wave].push(package);
    }
    waves
}

//! Development tooling for pnpm workspaces.
//!
//! The crate bundles a handful of utilities used while developing and
//! building a TypeScript monorepo:
//!
//! - **Call-site identifiers.** [`trace`] resolves source positions from the
//!   call stack, [`find_up`] locates the enclosing package, and [`hash`]
//!   turns a call site into a short, stable hash.
//! - **CSS tokens.** [`css`] derives class names from the content of a CSS
//!   block and variable names from where they are declared, so that a
//!   build-time transform can substitute identical names later.
//! - **Aliases.** [`alias`] converts tsconfig `compilerOptions.paths` into
//!   the flat alias map bundlers expect.
//! - **Workspace builds.** [`workspace`] discovers the packages listed in
//!   `pnpm-workspace.yaml`, orders them by their workspace dependencies and
//!   runs each package's build script, independent packages in parallel.
//! - **Logging.** [`logger`] is a small colored logger that is passed
//!   around explicitly instead of living in a global.
//! - **Assistant rules.** [`rules`] mirrors a `rules/` directory of markdown
//!   files into the locations AI coding assistants read.
//!
//! Hashing is deterministic: the same CSS content always yields the same
//! class, and the same call site always yields the same position hash.
//!
//! ```
//! use tsaio_dev::css::css;
//!
//! let class = css(&["display: flex;"], &[]);
//! assert!(class.as_str().starts_with("cm"));
//! assert_eq!(class, css(&["display: flex;"], &[]));
//! ```

#![forbid(unsafe_code)]
#![deny(missing_debug_implementations)]

pub mod alias;
pub mod css;
pub mod find_up;
pub mod hash;
pub mod io;
pub mod logger;
mod manifest;
mod path;
pub mod rules;
pub mod trace;
pub mod workspace;

pub use alias::{parse_tsconfig_aliases, TsconfigSource};
pub use css::{css, css_variable, CssClass, CssVariable};
pub use find_up::{detect_package_root, detect_package_root_from_cwd};
pub use hash::{hash_code_position, hash_position, hash_position_with, HashAlgorithm};
pub use logger::{LogLevel, Logger};
pub use trace::{trace_caller, trace_position, CodePosition, TraceError};
pub use workspace::{build_workspace, build_workspace_with, PackageInfo, PackageStatus, WorkspaceConfig};

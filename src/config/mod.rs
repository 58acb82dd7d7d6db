//! Configuration for a generation run
//!
//! - `types`: project settings rendered into templates
//! - `loader`: the optional `--config` file

pub mod loader;
pub mod types;

pub use loader::{ConfigFile, ModuleInitConfig};
pub use types::{DatabaseConfig, DatabaseKind, DeploymentConfig, DeploymentKind, ProjectConfig};

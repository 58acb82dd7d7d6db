//! Project settings exposed to templates as `config`

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::constants::defaults;

/// Database the generated project talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseKind {
    Postgres,
    Mysql,
}

/// Deployment target of the generated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentKind {
    Docker,
    #[value(alias = "k8s")]
    Kubernetes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseConfig {
    pub kind: DatabaseKind,
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub enable_orm: bool,
}

impl DatabaseConfig {
    /// Defaults for `kind`; the database is named after the project.
    pub fn for_kind(kind: DatabaseKind, project_name: &str) -> Self {
        let (username, password, port) = match kind {
            DatabaseKind::Postgres => ("postgres", "postgres", 5432),
            DatabaseKind::Mysql => ("root", "root", 3306),
        };
        Self {
            kind,
            username: username.to_string(),
            password: password.to_string(),
            host: defaults::DATABASE_HOST.to_string(),
            port,
            name: project_name.to_string(),
            enable_orm: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentConfig {
    pub kind: DeploymentKind,
    pub docker: bool,
    pub kubernetes: bool,
    pub ci: String,
}

impl DeploymentConfig {
    pub fn for_kind(kind: DeploymentKind) -> Self {
        Self {
            kind,
            docker: kind == DeploymentKind::Docker,
            kubernetes: kind == DeploymentKind::Kubernetes,
            ci: defaults::CI.to_string(),
        }
    }
}

/// Settings of the project being generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectConfig {
    pub environment: String,
    pub database: DatabaseConfig,
    pub deployment: DeploymentConfig,
}

impl ProjectConfig {
    pub fn new(project_name: &str, database: DatabaseKind, deployment: DeploymentKind) -> Self {
        Self {
            environment: defaults::ENVIRONMENT.to_string(),
            database: DatabaseConfig::for_kind(database, project_name),
            deployment: DeploymentConfig::for_kind(deployment),
        }
    }

    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

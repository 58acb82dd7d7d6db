//! Constants used throughout the scaffold application

/// Configuration file extensions recognised by `--config`, by format
pub const JSON_CONFIG_EXTENSIONS: &[&str] = &["json"];
pub const YAML_CONFIG_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// Reserved prefix of in-flight temporary files
pub const TEMP_FILE_PREFIX: &str = ".tmp_";

/// Length of the random temporary file name suffix
pub const TEMP_SUFFIX_LEN: usize = 12;

/// Alphabet of the random suffix. 32 symbols so a byte maps without bias.
pub const TEMP_SUFFIX_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz234567";

/// Name of the optional generation manifest
pub const MANIFEST_FILE: &str = ".scaffold.json";

/// Features that have dedicated templates
pub const KNOWN_FEATURES: &[&str] = &["auth", "metrics", "tracing"];

/// Directory skeleton created for every project
pub const BASE_DIRECTORIES: &[&str] = &[
    "cmd/api",
    "internal/api/dto",
    "internal/api/routes",
    "internal/config",
    "internal/core/errors",
    "internal/core/middleware",
    "internal/core/server",
    "internal/handlers",
    "internal/models",
    "internal/repository",
    "internal/services",
    "migrations",
    "pkg/database",
    "pkg/logger",
    "pkg/validator",
    "scripts",
    "tests/e2e",
    "tests/integration",
    "tests/unit",
];

/// Unix permission bits
pub mod permissions {
    pub const DIRECTORY_MODE: u32 = 0o750;
}

/// External module initialisation command
pub mod module_init {
    pub const PROGRAM: &str = "go";
    pub const ARGS: &[&str] = &["mod", "init"];
    /// File the command creates; its presence means the project is initialised
    pub const MANIFEST: &str = "go.mod";
}

/// Project configuration defaults
pub mod defaults {
    pub const ENVIRONMENT: &str = "development";
    pub const DATABASE_HOST: &str = "localhost";
    pub const CI: &str = "github";
}

/// Exit codes
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}

use std::process::ExitStatus;
use thiserror::Error;

use crate::constants::exit_codes;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON. Original error: {0}")]
    JSONParseError(#[from] serde_json::Error),

    #[error("Failed to parse YAML. Original error: {0}")]
    YAMLParseError(#[from] serde_yaml::Error),

    #[error("Configuration file '{path}' does not exist or has an unsupported extension (expected one of: {extensions}).")]
    ConfigNotFound { path: String, extensions: String },

    #[error("Configuration validation failed: {0}")]
    ConfigValidation(String),

    /// Represents validation failures in user input or data
    #[error("Validation error: {0}.")]
    ValidationError(String),

    #[error("Validation error: module path cannot be empty.")]
    EmptyIdentifierError,

    #[error("Validation error: invalid module path '{identifier}'. It must start with a letter or digit and contain only letters, digits, '.', '-', '_' and '/'.")]
    InvalidIdentifierError { identifier: String },

    #[error("Path '{path}' escapes its root: {reason}.")]
    PathEscapeError { path: String, reason: String },

    #[error("Template '{template}' does not exist.")]
    TemplateNotFoundError { template: String },

    #[error("Failed to parse template '{template}'. Original error: {reason}")]
    TemplateSyntaxError { template: String, reason: String },

    #[error("Failed to render template '{template}'. Original error: {source}")]
    TemplateExecutionError {
        template: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("Rendering produced an empty file for '{target}'.")]
    EmptyOutputError { target: String },

    #[error("Failed to write '{target}'. Original error: {source}")]
    WriteError {
        target: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to commit '{target}'. Original error: {source}")]
    CommitError {
        target: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory '{path}'. Original error: {source}")]
    DirectoryError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command '{command}' could not be started. Original error: {source}")]
    SubprocessSpawnError {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command '{command}' failed with status: {status}")]
    SubprocessError { command: String, status: ExitStatus },

    #[error("Failed to generate '{target}'. {source}")]
    GenerationError {
        target: String,
        #[source]
        source: Box<Error>,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Wraps `self` with the registry target it was raised for.
    pub fn for_target<S: Into<String>>(self, target: S) -> Self {
        Error::GenerationError { target: target.into(), source: Box::new(self) }
    }

    /// Unwraps any `GenerationError` layers and returns the underlying cause.
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::GenerationError { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Convenience type alias for Results with scaffold's Error as the error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(exit_codes::FAILURE);
}

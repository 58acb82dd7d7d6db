/// Handles argument parsing and the top-level workflow.
pub mod cli;

/// Project settings and the optional configuration file.
pub mod config;

pub mod constants;

/// Values bound to every template render.
pub mod context;

/// Defines custom error types.
pub mod error;

pub mod ext;

/// Drives a generation run.
pub mod generator;

/// Path validation for template sources and generation targets.
pub mod guard;

/// A set of helpers for working with the file system.
pub mod ioutils;

/// Template sources: built-in or a local directory.
pub mod loader;

/// Generation manifest.
pub mod manifest;

/// Module initialisation command.
pub mod modinit;

/// Target-to-template mapping.
pub mod registry;

/// Template parsing and rendering functionality.
pub mod renderer;

/// Input validators.
pub mod validation;

/// Crash-safe file output.
pub mod writer;

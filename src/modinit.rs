use std::path::Path;
use std::process::{Command, Stdio};

use crate::config::ModuleInitConfig;
use crate::constants::module_init;
use crate::error::{Error, Result};
use crate::generator::Operation;
use crate::validation::ModulePath;

/// Runs `go mod init <module>` in a generated tree.
///
/// The program and its leading arguments are fixed; the validated module
/// path is appended as a single final argument. No shell is involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleInitializer {
    program: String,
    args: Vec<String>,
    /// File whose presence means the module already exists
    manifest: Option<String>,
}

impl Default for ModuleInitializer {
    fn default() -> Self {
        Self {
            program: module_init::PROGRAM.to_string(),
            args: module_init::ARGS.iter().map(|arg| arg.to_string()).collect(),
            manifest: Some(module_init::MANIFEST.to_string()),
        }
    }
}

impl ModuleInitializer {
    #[cfg(test)]
    fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            manifest: None,
        }
    }

    /// The initializer, or `None` when the config file disables it.
    pub fn from_config(config: &ModuleInitConfig) -> Option<Self> {
        config.enabled.then(Self::default)
    }

    /// Skips the command when `manifest` already exists in the project root.
    #[cfg(test)]
    fn with_manifest(mut self, manifest: impl Into<String>) -> Self {
        self.manifest = Some(manifest.into());
        self
    }

    /// The full command line, for display only.
    pub fn command_line(&self, module: &ModulePath) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .chain(std::iter::once(module.as_str()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Runs the command in `project_root` with inherited stdout and stderr.
    ///
    /// # Returns
    /// * `Result<bool>` - `false` when skipped because the manifest file exists
    ///
    /// # Errors
    /// * `Error::SubprocessSpawnError` if the program cannot be started
    /// * `Error::SubprocessError` if it exits unsuccessfully
    pub fn run<P: AsRef<Path>>(&self, module: &ModulePath, project_root: P) -> Result<bool> {
        let project_root = project_root.as_ref();
        let command = self.command_line(module);

        if let Some(manifest) = &self.manifest {
            if project_root.join(manifest).exists() {
                log::info!("Skipping '{command}': '{manifest}' already exists");
                return Ok(false);
            }
        }

        let op = Operation::InitModule {
            command: command.clone(),
            directory: project_root.to_path_buf(),
        };
        log::info!("{}", op.get_message(false));

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(module.as_str())
            .current_dir(project_root)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| Error::SubprocessSpawnError { command: command.clone(), source })?;

        if !status.success() {
            return Err(Error::SubprocessError { command, status });
        }
        Ok(true)
    }
}

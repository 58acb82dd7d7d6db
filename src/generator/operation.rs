use std::path::PathBuf;

/// A single filesystem or process effect of a generation run.
#[derive(Debug)]
pub enum Operation {
    CreateDirectory { target: PathBuf, target_exists: bool },
    Write { target: PathBuf, source: String, target_exists: bool },
    InitModule { command: String, directory: PathBuf },
}

impl Operation {
    /// Gets a message describing the operation.
    ///
    /// # Arguments
    /// * `dry_run` - Whether this is a dry run (no actual file operations)
    pub fn get_message(&self, dry_run: bool) -> String {
        let prefix = if dry_run { "[DRY RUN] " } else { "" };

        match self {
            Operation::CreateDirectory { target, target_exists } => {
                if *target_exists {
                    format!(
                        "{}Skipping directory creation '{}' (already exists)",
                        prefix,
                        target.display()
                    )
                } else {
                    format!("{}Creating directory '{}'", prefix, target.display())
                }
            }

            Operation::Write { target, source, target_exists } => {
                if *target_exists {
                    format!(
                        "{}Writing '{}' from '{}' (overwriting existing file)",
                        prefix,
                        target.display(),
                        source
                    )
                } else {
                    format!("{}Writing '{}' from '{}'", prefix, target.display(), source)
                }
            }

            Operation::InitModule { command, directory } => {
                format!("{}Running '{}' in '{}'", prefix, command, directory.display())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_directory_messages() {
        let target = PathBuf::from("/out/cmd/api");
        let op = Operation::CreateDirectory { target: target.clone(), target_exists: false };
        assert_eq!(op.get_message(false), "Creating directory '/out/cmd/api'");

        let op = Operation::CreateDirectory { target, target_exists: true };
        assert_eq!(
            op.get_message(false),
            "Skipping directory creation '/out/cmd/api' (already exists)"
        );
    }

    #[test]
    fn write_messages() {
        let op = Operation::Write {
            target: PathBuf::from("/out/go.mod"),
            source: "go.mod.tmpl".into(),
            target_exists: true,
        };
        assert_eq!(
            op.get_message(false),
            "Writing '/out/go.mod' from 'go.mod.tmpl' (overwriting existing file)"
        );
    }

    #[test]
    fn init_module_message() {
        let op = Operation::InitModule {
            command: "go mod init example.com/demo".into(),
            directory: PathBuf::from("/out"),
        };
        assert_eq!(op.get_message(false), "Running 'go mod init example.com/demo' in '/out'");
    }

    #[test]
    fn test_dry_run_messages() {
        let op = Operation::Write {
            target: PathBuf::from("/out/main.go"),
            source: "main.go.tmpl".into(),
            target_exists: false,
        };
        assert_eq!(op.get_message(true), format!("[DRY RUN] {}", op.get_message(false)));
    }
}

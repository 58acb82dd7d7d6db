//! Drives a generation run: directory skeleton first, then every registry
//! entry in target order. The first failure stops the run; files committed
//! before it stay in place.

pub mod operation;

pub use operation::Operation;

use log::info;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::context::GenerationContext;
use crate::error::{Error, Result};
use crate::registry::TemplateRegistry;
use crate::renderer::TemplateRenderer;
use crate::writer::AtomicFileWriter;
use crate::{guard, ioutils};

/// A file produced (or, in a dry run, planned) by [`Generator::generate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    /// Registry target, as given
    pub target: String,
    /// Template identifier it was rendered from
    pub source: String,
    /// Absolute location on disk
    pub path: PathBuf,
    /// Hex SHA-256 of the content
    pub sha256: String,
    pub size: usize,
}

/// Outcome of a successful generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub base: PathBuf,
    /// Directories that did not exist before the run
    pub directories: Vec<PathBuf>,
    pub files: Vec<GeneratedFile>,
    pub dry_run: bool,
}

/// Renders registry entries and writes them beneath a fixed base directory.
pub struct Generator<'a> {
    renderer: &'a dyn TemplateRenderer,
    writer: AtomicFileWriter,
    directories: Vec<String>,
    dry_run: bool,
}

impl<'a> Generator<'a> {
    /// Creates a generator confined to `base`.
    pub fn new<P: AsRef<Path>>(renderer: &'a dyn TemplateRenderer, base: P) -> Result<Self> {
        Ok(Self {
            renderer,
            writer: AtomicFileWriter::new(base)?,
            directories: Vec::new(),
            dry_run: false,
        })
    }

    /// Directories to create before any file is written, relative to the base.
    pub fn with_directories<I, S>(mut self, directories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.directories.extend(directories.into_iter().map(Into::into));
        self
    }

    /// Renders everything but writes nothing.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn base(&self) -> &Path {
        self.writer.base()
    }

    pub fn writer(&self) -> &AtomicFileWriter {
        &self.writer
    }

    /// Generates every entry of `registry` with `context`.
    ///
    /// # Errors
    /// * `Error::PathEscapeError` / `Error::DirectoryError` from the directory skeleton
    /// * `Error::GenerationError` naming the first registry target that failed
    pub fn generate(
        &self,
        registry: &TemplateRegistry,
        context: &GenerationContext,
    ) -> Result<GenerationReport> {
        let directories = self.provision()?;

        let mut files = Vec::with_capacity(registry.len());
        for (target, source) in registry.iter() {
            let file = self
                .generate_entry(target, source, context)
                .map_err(|e| e.for_target(target))?;
            files.push(file);
        }

        Ok(GenerationReport {
            base: self.base().to_path_buf(),
            directories,
            files,
            dry_run: self.dry_run,
        })
    }

    fn provision(&self) -> Result<Vec<PathBuf>> {
        if self.dry_run {
            let mut planned = Vec::new();
            for path in std::iter::once(Ok(self.base().to_path_buf())).chain(
                self.directories.iter().map(|dir| guard::resolve(dir, self.base())),
            ) {
                let path = path?;
                if !path.is_dir() && !planned.contains(&path) {
                    let op = Operation::CreateDirectory { target: path.clone(), target_exists: false };
                    info!("{}", op.get_message(true));
                    planned.push(path);
                }
            }
            return Ok(planned);
        }

        let created = ioutils::ensure_tree(self.base(), &self.directories)?;
        for path in &created {
            let op = Operation::CreateDirectory { target: path.clone(), target_exists: false };
            info!("{}", op.get_message(false));
        }
        Ok(created)
    }

    fn generate_entry(
        &self,
        target: &str,
        source: &str,
        context: &GenerationContext,
    ) -> Result<GeneratedFile> {
        let path = guard::resolve(target, self.base())?;
        let content = self.renderer.render(source, context)?;
        if content.is_empty() {
            return Err(Error::EmptyOutputError { target: target.to_string() });
        }

        let op = Operation::Write {
            target: path.clone(),
            source: source.to_string(),
            target_exists: path.exists(),
        };
        info!("{}", op.get_message(self.dry_run));

        let path = if self.dry_run { path } else { self.writer.write(target, &content)? };
        Ok(GeneratedFile {
            target: target.to_string(),
            source: source.to_string(),
            path,
            sha256: ioutils::sha256_hex(&content),
            size: content.len(),
        })
    }
}

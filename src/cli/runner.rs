use crate::{
    cli::Args,
    config::{ConfigFile, ProjectConfig},
    constants::BASE_DIRECTORIES,
    context::GenerationContext,
    error::Result,
    generator::{GenerationReport, Generator},
    guard,
    loader::get_template_source,
    manifest::GenerationManifest,
    modinit::ModuleInitializer,
    registry::TemplateRegistry,
    renderer::MiniJinjaRenderer,
    validation::{parse_features, validate_project_name, ModulePath},
    writer::AtomicFileWriter,
};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Main CLI runner that orchestrates the entire generation workflow
pub struct Runner {
    args: Args,
}

impl Runner {
    pub fn new(args: Args) -> Self {
        Self { args }
    }

    /// Executes the complete generation workflow
    pub fn run(self) -> Result<GenerationReport> {
        validate_project_name(&self.args.name)?;
        let module = ModulePath::parse(self.args.module.as_str())?;
        let features = parse_features(&self.args.features)?;

        let config_file = self.load_config()?;
        let project = self.project_config(&config_file);
        let output_root = self.output_root()?;

        let source = get_template_source(self.template_dir(&config_file))?;
        let renderer = MiniJinjaRenderer::new(source);
        let registry = self.build_registry(&features, &project, &config_file);

        let context = GenerationContext::new(
            self.args.name.as_str(),
            module,
            features,
            project.to_value(),
            config_file.resources.clone(),
        );

        let generator = Generator::new(&renderer, &output_root)?
            .with_directories(
                BASE_DIRECTORIES
                    .iter()
                    .copied()
                    .chain(config_file.directories.iter().map(String::as_str)),
            )
            .dry_run(self.args.dry_run);
        let report = generator.generate(&registry, &context)?;

        self.initialize_module(&config_file, &context, generator.base())?;
        self.write_manifest(&context, &report, generator.writer())?;

        if self.args.dry_run {
            println!(
                "[DRY RUN] Generation of {} files planned in {}.",
                report.files.len(),
                generator.base().display()
            );
        } else {
            println!(
                "Project generation completed successfully in {}.",
                generator.base().display()
            );
        }
        Ok(report)
    }

    /// Loads the config file if one was given
    fn load_config(&self) -> Result<ConfigFile> {
        match &self.args.config {
            Some(path) => ConfigFile::load(path),
            None => Ok(ConfigFile::default()),
        }
    }

    /// Project settings from the CLI, with config file overrides
    fn project_config(&self, config_file: &ConfigFile) -> ProjectConfig {
        let mut project = ProjectConfig::new(&self.args.name, self.args.db, self.args.deployment);
        if let Some(environment) = &config_file.environment {
            project.environment = environment.clone();
        }
        if let Some(ci) = &config_file.ci {
            project.deployment.ci = ci.clone();
        }
        project
    }

    fn output_root(&self) -> Result<PathBuf> {
        let output = self.args.output.clone().unwrap_or_else(|| PathBuf::from(&self.args.name));
        guard::absolutize(output)
    }

    /// `--templates` wins over the config file's `template_dir`
    fn template_dir<'a>(&'a self, config_file: &'a ConfigFile) -> Option<&'a Path> {
        self.args.templates.as_deref().or(config_file.template_dir.as_deref())
    }

    fn build_registry(
        &self,
        features: &BTreeSet<String>,
        project: &ProjectConfig,
        config_file: &ConfigFile,
    ) -> TemplateRegistry {
        let mut registry = TemplateRegistry::builtin(features, &project.deployment);
        registry.apply_config(config_file);
        log::debug!("Registry holds {} templates", registry.len());
        registry
    }

    /// Runs the module initialisation command unless skipped or disabled
    fn initialize_module(
        &self,
        config_file: &ConfigFile,
        context: &GenerationContext,
        project_root: &Path,
    ) -> Result<()> {
        if self.args.skip_mod_init {
            log::info!("Skipping module initialisation (--skip-mod-init)");
            return Ok(());
        }
        let Some(initializer) = ModuleInitializer::from_config(&config_file.module_init) else {
            log::info!("Skipping module initialisation (disabled in configuration)");
            return Ok(());
        };
        if self.args.dry_run {
            log::info!(
                "[DRY RUN] Running '{}' in '{}'",
                initializer.command_line(context.module_path()),
                project_root.display()
            );
            return Ok(());
        }
        initializer.run(context.module_path(), project_root)?;
        Ok(())
    }

    fn write_manifest(
        &self,
        context: &GenerationContext,
        report: &GenerationReport,
        writer: &AtomicFileWriter,
    ) -> Result<()> {
        if !self.args.manifest || self.args.dry_run {
            return Ok(());
        }
        let path = GenerationManifest::new(context, report).save(writer)?;
        log::info!("Wrote manifest to '{}'", path.display());
        Ok(())
    }
}

/// Main entry point for CLI execution
pub fn run(args: Args) -> Result<()> {
    let runner = Runner::new(args);
    runner.run().map(|_| ())
}

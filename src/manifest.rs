use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::MANIFEST_FILE;
use crate::context::GenerationContext;
use crate::error::Result;
use crate::generator::GenerationReport;
use crate::writer::AtomicFileWriter;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub path: String,
    pub sha256: String,
}

/// Record of a generation run, stored as `.scaffold.json` in the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationManifest {
    pub project_name: String,
    pub module_path: String,
    pub features: Vec<String>,
    pub generated_at: DateTime<Utc>,
    pub files: Vec<ManifestEntry>,
}

impl GenerationManifest {
    pub fn new(context: &GenerationContext, report: &GenerationReport) -> Self {
        Self::at(context, report, Utc::now())
    }

    fn at(context: &GenerationContext, report: &GenerationReport, now: DateTime<Utc>) -> Self {
        Self {
            project_name: context.project_name().to_string(),
            module_path: context.module_path().to_string(),
            features: context.features().iter().cloned().collect(),
            generated_at: now,
            files: report
                .files
                .iter()
                .map(|file| ManifestEntry { path: file.target.clone(), sha256: file.sha256.clone() })
                .collect(),
        }
    }

    /// Writes the manifest through `writer`, replacing any previous one.
    pub fn save(&self, writer: &AtomicFileWriter) -> Result<PathBuf> {
        let mut content = serde_json::to_vec_pretty(self)?;
        content.push(b'\n');
        writer.write(MANIFEST_FILE, &content)
    }
}

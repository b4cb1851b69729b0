//! Export session: one export at a time, failures reported at the boundary,
//! artifacts written atomically.

use crate::archive::export_archive;
use crate::config::ExportConfig;
use crate::error::{ExportError, ExportResult};
use crate::preview::export_preview;
use crate::site::export_site;
use dnamatrix_blocks::ProjectState;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tempfile::NamedTempFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Site,
    Archive,
    Json,
    Preview,
}

impl ExportKind {
    /// Output file name for this kind, from the config.
    pub fn file_name(self, config: &ExportConfig) -> &str {
        match self {
            ExportKind::Site => &config.files.site,
            ExportKind::Archive => &config.files.archive,
            ExportKind::Json => &config.files.json,
            ExportKind::Preview => &config.files.preview,
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportKind::Site => write!(f, "site"),
            ExportKind::Archive => write!(f, "archive"),
            ExportKind::Json => write!(f, "json"),
            ExportKind::Preview => write!(f, "preview"),
        }
    }
}

/// A finished export, not yet written anywhere.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub kind: ExportKind,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct ExportSession {
    running: AtomicBool,
}

/// Clears the running flag when dropped, whether the export succeeded,
/// failed or panicked.
pub struct ExportGuard<'a> {
    running: &'a AtomicBool,
}

impl Drop for ExportGuard<'_> {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

impl ExportSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Claim the session. Fails with `ExportInProgress` while another guard
    /// is alive.
    pub fn begin(&self) -> ExportResult<ExportGuard<'_>> {
        self.running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| ExportError::ExportInProgress)?;
        Ok(ExportGuard {
            running: &self.running,
        })
    }

    /// Run one export under the guard, logging the outcome.
    pub fn run<T>(
        &self,
        kind: ExportKind,
        export: impl FnOnce() -> ExportResult<T>,
    ) -> ExportResult<T> {
        let _guard = match self.begin() {
            Ok(guard) => guard,
            Err(e) => {
                log::warn!("{} export refused: {}", kind, e);
                return Err(e);
            }
        };
        match export() {
            Ok(value) => {
                log::info!("{} export finished", kind);
                Ok(value)
            }
            Err(e) => {
                log::error!("{} export failed: {}", kind, e);
                Err(e)
            }
        }
    }

    pub fn export(
        &self,
        kind: ExportKind,
        state: &ProjectState,
        config: &ExportConfig,
    ) -> ExportResult<Artifact> {
        self.run(kind, || {
            let bytes = match kind {
                ExportKind::Site => export_site(state, config)?.html.into_bytes(),
                ExportKind::Archive => export_archive(state)?,
                ExportKind::Json => state.to_json()?.into_bytes(),
                ExportKind::Preview => export_preview(state, config)?.into_bytes(),
            };
            Ok(Artifact {
                kind,
                file_name: kind.file_name(config).to_string(),
                bytes,
            })
        })
    }
}

/// Write an artifact into `dir` through a sibling temp file, so a failed
/// write never leaves a partial file behind.
pub fn write_artifact(dir: &Path, artifact: &Artifact) -> ExportResult<PathBuf> {
    fs::create_dir_all(dir)?;
    let target = dir.join(&artifact.file_name);
    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(&artifact.bytes)?;
    temp.as_file().sync_all()?;
    temp.persist(&target).map_err(|e| e.error)?;
    log::debug!("wrote {} ({} bytes)", target.display(), artifact.bytes.len());
    Ok(target)
}

/// Read and validate a project JSON file.
pub fn read_project(path: &Path) -> ExportResult<ProjectState> {
    let json = fs::read_to_string(path)?;
    Ok(ProjectState::from_json(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_export_refused_while_running() {
        let session = ExportSession::new();
        let guard = session.begin().unwrap();
        let result = session.export(ExportKind::Json, &ProjectState::new(), &ExportConfig::default());
        assert!(matches!(result.unwrap_err(), ExportError::ExportInProgress));
        drop(guard);
        assert!(!session.is_running());
        assert!(session
            .export(ExportKind::Json, &ProjectState::new(), &ExportConfig::default())
            .is_ok());
    }

    #[test]
    fn test_flag_resets_after_failure() {
        let session = ExportSession::new();
        let config = ExportConfig {
            page: "missing".to_string(),
            ..ExportConfig::default()
        };
        let result = session.export(ExportKind::Site, &ProjectState::new(), &config);
        assert!(matches!(result.unwrap_err(), ExportError::Project(_)));
        assert!(!session.is_running());
    }

    #[test]
    fn test_write_artifact_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut artifact = Artifact {
            kind: ExportKind::Json,
            file_name: "dna-project.json".to_string(),
            bytes: b"old".to_vec(),
        };
        write_artifact(dir.path(), &artifact).unwrap();
        artifact.bytes = b"new".to_vec();
        let path = write_artifact(dir.path(), &artifact).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"new");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}

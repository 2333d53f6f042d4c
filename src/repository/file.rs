//! File-backed repository (YAML or JSON list of assessments)

use std::path::{Path, PathBuf};

use tokio::sync::Mutex;

use super::AssessmentRepository;
use crate::error::{BoardError, Result};
use crate::types::{Assessment, AssessmentId, AssessmentUpdate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Yaml,
    Json,
}

impl FileFormat {
    fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => FileFormat::Json,
            _ => FileFormat::Yaml,
        }
    }
}

/// Repository that reads and rewrites a single data file.
///
/// The format follows the file extension: `.json` is JSON, anything else is
/// YAML. A missing file reads as an empty board.
#[derive(Debug)]
pub struct FileRepository {
    path: PathBuf,
    format: FileFormat,
    // Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl FileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = FileFormat::for_path(&path);
        Self {
            path,
            format,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Vec<Assessment>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("data file {} not found, board is empty", self.path.display());
                return Ok(vec![]);
            }
            Err(e) => return Err(io_error("read", &self.path, e)),
        };

        if content.trim().is_empty() {
            return Ok(vec![]);
        }

        let records = match self.format {
            FileFormat::Yaml => serde_yaml_ng::from_str(&content)?,
            FileFormat::Json => serde_json::from_str(&content)?,
        };
        Ok(records)
    }

    async fn write_all(&self, records: &[Assessment]) -> Result<()> {
        let content = match self.format {
            FileFormat::Yaml => serde_yaml_ng::to_string(records)?,
            FileFormat::Json => serde_json::to_string_pretty(records)?,
        };

        write_file_atomic(&self.path, &content).await
    }
}

fn io_error(operation: &str, path: &Path, e: std::io::Error) -> BoardError {
    BoardError::Io(std::io::Error::new(
        e.kind(),
        format!("Failed to {} {}: {}", operation, path.display(), e),
    ))
}

/// Write through a sibling temp file and rename it over `path`.
///
/// Either the new content is fully written or the old file is left as it was.
async fn write_file_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| io_error("create directory for", path, e))?;
    }

    let temp_path = path.with_extension("tmp");
    tokio::fs::write(&temp_path, content)
        .await
        .map_err(|e| io_error("write", &temp_path, e))?;

    if let Err(e) = tokio::fs::rename(&temp_path, path).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(io_error("rename", path, e));
    }
    Ok(())
}

#[async_trait::async_trait]
impl AssessmentRepository for FileRepository {
    async fn fetch_assessments(&self) -> Result<Vec<Assessment>> {
        self.read_all().await
    }

    async fn update_assessment(&self, id: &AssessmentId, update: AssessmentUpdate) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.read_all().await?;
        let record = records
            .iter_mut()
            .find(|a| &a.id == id)
            .ok_or_else(|| BoardError::AssessmentNotFound(id.to_string()))?;
        update.apply_to(record);

        self.write_all(&records).await
    }
}

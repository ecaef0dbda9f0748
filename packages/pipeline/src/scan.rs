//! Input directory discovery.

use std::path::{Path, PathBuf};

use crate::error::{PipelineError, Result};

/// Make sure `dir` exists, creating it (and its parents) when missing.
pub async fn ensure_input_dir(dir: &Path) -> Result<()> {
    if tokio::fs::try_exists(dir).await.unwrap_or(false) {
        return Ok(());
    }

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| PipelineError::InputDir {
            path: dir.to_path_buf(),
            source,
        })?;
    tracing::info!(dir = %dir.display(), "created input directory");
    Ok(())
}

/// `true` for paths ending in `.xml`, in any letter case.
pub fn is_xml_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
}

/// List the `*.xml` files directly inside `dir`, in file-system listing order.
///
/// The directory is created first if it does not exist. Subdirectories are
/// not descended into.
pub async fn discover_files(dir: &Path) -> Result<Vec<PathBuf>> {
    ensure_input_dir(dir).await?;

    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|source| PipelineError::InputDir {
            path: dir.to_path_buf(),
            source,
        })?;

    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !is_xml_file(&path) {
            continue;
        }
        if entry.file_type().await?.is_file() {
            files.push(path);
        }
    }

    tracing::debug!(dir = %dir.display(), count = files.len(), "discovered input files");
    Ok(files)
}

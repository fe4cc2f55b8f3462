//! Async file I/O with atomic writes

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::{Error, PortablePath, Result};

/// Read text content from a file.
pub async fn read_text(path: &PortablePath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path)
        .await
        .map_err(|e| Error::io(&native_path, e))
}

/// Write text content to a file atomically.
///
/// Uses write-to-temp-then-rename so readers never observe a partially
/// written configuration file.
pub async fn write_text_atomic(path: &PortablePath, content: &str) -> Result<()> {
    let native_path = path.to_native();

    if let Some(parent) = native_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::io(parent, e))?;
    }

    // Temp file in the same directory, so the rename stays on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        path.file_name().unwrap_or("config"),
        std::process::id()
    );
    let temp_path = native_path.with_file_name(&temp_name);

    let mut temp_file = fs::File::create(&temp_path)
        .await
        .map_err(|e| Error::io(&temp_path, e))?;
    temp_file
        .write_all(content.as_bytes())
        .await
        .map_err(|e| Error::io(&temp_path, e))?;
    temp_file
        .sync_all()
        .await
        .map_err(|e| Error::io(&temp_path, e))?;
    drop(temp_file);

    fs::rename(&temp_path, &native_path)
        .await
        .map_err(|e| Error::io(&native_path, e))?;

    debug!(path = %path, bytes = content.len(), "wrote file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[tokio::test]
    async fn read_text_returns_content() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.json");
        std::fs::write(&file, "{}").unwrap();

        let content = read_text(&PortablePath::new(&file)).await.unwrap();
        assert_eq!(content, "{}");
    }

    #[tokio::test]
    async fn read_text_reports_path_on_failure() {
        let err = read_text(&PortablePath::new("no/such/file.json"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no/such/file.json"));
    }

    #[tokio::test]
    async fn write_text_atomic_replaces_content() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.json");
        std::fs::write(&file, "old").unwrap();

        let path = PortablePath::new(&file);
        write_text_atomic(&path, "new").await.unwrap();

        assert_eq!(std::fs::read_to_string(&file).unwrap(), "new");
        // No temp file left behind
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use rfd::AsyncFileDialog;
use tokio::process::Command;

use crate::error::ActionError;

/// Asks where to save `bytes`, suggesting `file_name`. `None` when cancelled.
pub async fn save_download(
    file_name: String,
    bytes: Arc<[u8]>,
) -> Result<Option<PathBuf>, ActionError> {
    let Some(handle) = AsyncFileDialog::new()
        .set_title("Lưu kết quả")
        .set_file_name(&file_name)
        .save_file()
        .await
    else {
        log::info!("Download of {file_name} cancelled");
        return Ok(None);
    };

    let path = handle.path().to_path_buf();
    write_file(&path, &bytes).await?;
    log::info!("Saved {} ({} bytes)", path.display(), bytes.len());
    Ok(Some(path))
}

pub async fn write_file(path: &Path, bytes: &[u8]) -> Result<(), ActionError> {
    tokio::fs::write(path, bytes).await?;
    Ok(())
}

pub async fn print_pdf(file_name: String, bytes: Arc<[u8]>) -> Result<(), ActionError> {
    let path = spool_path(&file_name);
    write_file(&path, &bytes).await?;
    log::info!("Printing {}", path.display());

    let status = print_command(&path).status().await;

    if let Err(err) = tokio::fs::remove_file(&path).await {
        log::warn!("Unable to remove {}: {err}", path.display());
    }

    let status = status?;
    if !status.success() {
        return Err(ActionError::PrintCommand(status));
    }
    Ok(())
}

static SPOOL_JOBS: AtomicU64 = AtomicU64::new(0);

pub fn spool_path(file_name: &str) -> PathBuf {
    let job = SPOOL_JOBS.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!(
        "result-viewer-{}-{job}-{file_name}",
        std::process::id()
    ))
}

#[cfg(target_os = "windows")]
fn print_command(path: &Path) -> Command {
    let mut command = Command::new("powershell");
    command.args(["-NoProfile", "-Command", "Start-Process", "-Verb", "Print", "-Wait", "-FilePath"]);
    command.arg(path);
    command
}

#[cfg(not(target_os = "windows"))]
fn print_command(path: &Path) -> Command {
    let mut command = Command::new("lp");
    command.arg(path);
    command
}

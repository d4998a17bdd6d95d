//! Clipboard image acquisition via OS-specific helpers
//!
//! There is no portable clipboard-image API worth carrying for a CLI, so
//! this shells out: AppleScript (with a `pngpaste` fallback) on macOS,
//! `xclip` or `xsel` on Linux. The image lands in a temp PNG that the caller
//! cleans up with [`cleanup`].

use std::path::{Path, PathBuf};

use tokio::process::Command;

use crate::prelude::*;

fn temp_image_path() -> PathBuf {
    std::env::temp_dir().join("opcli-clipboard.png")
}

/// Save the clipboard image to a temp file and return its path.
pub async fn image_from_clipboard() -> Result<PathBuf> {
    if cfg!(target_os = "macos") {
        image_macos().await
    } else if cfg!(target_os = "linux") {
        image_linux().await
    } else {
        Err(eyre!("clipboard capture is not supported on this platform"))
    }
}

async fn image_macos() -> Result<PathBuf> {
    let target = temp_image_path();

    let script = format!(
        r#"
        use framework "AppKit"
        set pb to current application's NSPasteboard's generalPasteboard()
        set imgData to pb's dataForType:(current application's NSPasteboardTypePNG)
        if imgData is missing value then
            error "no image on the clipboard"
        end if
        imgData's writeToFile:"{}" atomically:true
        "#,
        target.display()
    );

    if let Ok(output) = Command::new("osascript")
        .args(["-l", "AppleScript", "-e", &script])
        .output()
        .await
    {
        if output.status.success() && target.exists() {
            return Ok(target);
        }
    }

    // AppleScript can be blocked by automation permissions; pngpaste is the
    // usual way out.
    if which::which("pngpaste").is_ok() {
        let status = Command::new("pngpaste")
            .arg(&target)
            .status()
            .await
            .map_err(|e| eyre!("failed to run pngpaste: {}", e))?;
        if status.success() {
            return Ok(target);
        }
        return Err(eyre!("no image on the clipboard"));
    }

    Err(eyre!(
        "no image on the clipboard (install pngpaste: brew install pngpaste)"
    ))
}

async fn image_linux() -> Result<PathBuf> {
    let target = temp_image_path();

    if which::which("xclip").is_ok() {
        let output = Command::new("xclip")
            .args(["-selection", "clipboard", "-t", "image/png", "-o"])
            .output()
            .await
            .map_err(|e| eyre!("failed to run xclip: {}", e))?;
        if !output.status.success() || output.stdout.is_empty() {
            return Err(eyre!("no image on the clipboard"));
        }
        tokio::fs::write(&target, &output.stdout)
            .await
            .map_err(|e| eyre!("failed to write {}: {}", target.display(), e))?;
        return Ok(target);
    }

    if which::which("xsel").is_ok() {
        let output = Command::new("xsel")
            .args(["--clipboard", "--output"])
            .output()
            .await
            .map_err(|e| eyre!("failed to run xsel: {}", e))?;
        if !output.status.success() || output.stdout.is_empty() {
            return Err(eyre!("no image on the clipboard"));
        }
        tokio::fs::write(&target, &output.stdout)
            .await
            .map_err(|e| eyre!("failed to write {}: {}", target.display(), e))?;
        return Ok(target);
    }

    Err(eyre!("install xclip or xsel to use the clipboard on Linux"))
}

/// Remove a temp image produced by [`image_from_clipboard`]. Paths outside
/// the temp directory are left alone.
pub async fn cleanup(path: &Path) {
    if path.starts_with(std::env::temp_dir()) {
        let _ = tokio::fs::remove_file(path).await;
    }
}

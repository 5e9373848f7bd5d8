//! Best-effort clipboard access through platform utilities.
//!
//! Failures here are always recoverable: callers warn and tell the operator
//! to copy manually.

use crate::error::{Result, SetupError};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;

/// Copy `content` to the system clipboard.
///
/// Uses `pbcopy` on macOS, `clip` on Windows, and `wl-copy` or
/// `xclip` on Linux depending on what is installed.
pub async fn copy(content: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        pipe_to("pbcopy", &[], content).await
    }

    #[cfg(target_os = "windows")]
    {
        pipe_to("clip", &[], content).await
    }

    #[cfg(target_os = "linux")]
    {
        if which::which("wl-copy").is_ok() {
            return pipe_to("wl-copy", &[], content).await;
        }
        if which::which("xclip").is_ok() {
            return pipe_to("xclip", &["-selection", "clipboard"], content).await;
        }
        Err(SetupError::Clipboard(
            "no clipboard utility found (install wl-clipboard or xclip)".to_string(),
        ))
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
    {
        let _ = content;
        Err(SetupError::Clipboard("unsupported platform".to_string()))
    }
}

async fn pipe_to(program: &str, args: &[&str], content: &str) -> Result<()> {
    let mut child = tokio::process::Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| SetupError::Clipboard(format!("failed to start {program}: {e}")))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(content.as_bytes())
            .await
            .map_err(|e| SetupError::Clipboard(format!("failed to pipe to {program}: {e}")))?;
        // stdin drops here so the utility sees EOF
    }

    let status = child
        .wait()
        .await
        .map_err(|e| SetupError::Clipboard(format!("failed to wait for {program}: {e}")))?;

    if !status.success() {
        return Err(SetupError::Clipboard(format!("{program} exited with {status}")));
    }

    Ok(())
}

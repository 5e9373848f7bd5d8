//! Idempotent artifact writes.
//!
//! Every generated file goes through [`safe_write`]: a missing file is
//! written, an empty file is overwritten, and a non-empty file is only
//! replaced after the operator explicitly chooses to override it. "Keep"
//! is a no-op that leaves the existing file authoritative for the run.

use crate::error::Result;
use crate::prompts::prompt_override_keep;
use crate::{success, warn};
use std::path::Path;

/// State of a target path before a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Absent,
    Empty,
    NonEmpty,
}

/// Classify an artifact path. Whitespace-only files count as empty.
pub async fn disposition(path: &Path) -> Result<Disposition> {
    if !tokio::fs::try_exists(path).await? {
        return Ok(Disposition::Absent);
    }
    let existing = tokio::fs::read(path).await?;
    if existing.iter().all(u8::is_ascii_whitespace) {
        Ok(Disposition::Empty)
    } else {
        Ok(Disposition::NonEmpty)
    }
}

/// Write `content` to `path`, consulting `decide` only when the file already
/// exists with content. Returns whether the file was written.
///
/// The decision is injected so the policy is testable without a TTY.
pub async fn safe_write_with<F>(path: &Path, content: &str, decide: F) -> Result<bool>
where
    F: FnOnce(&Path) -> Result<bool>,
{
    if disposition(path).await? == Disposition::NonEmpty && !decide(path)? {
        return Ok(false);
    }
    tokio::fs::write(path, content).await?;
    Ok(true)
}

/// Interactive safe write: prompts override/keep on conflict.
pub async fn safe_write(path: &Path, content: &str) -> Result<()> {
    if safe_write_with(path, content, prompt_override_keep).await? {
        success!("Saved: {}", path.display());
    } else {
        warn!("Keeping existing file: {}", path.display());
    }
    Ok(())
}

pub async fn ensure_dir(path: &Path) -> Result<()> {
    tokio::fs::create_dir_all(path).await?;
    Ok(())
}

//! Thin wrappers around the `openssl` binary.
//!
//! The wizard does no cryptography itself: it constructs arguments, runs the
//! tool, and surfaces failures. Output bytes (keys, CSRs, PKCS#12 bundles)
//! are never parsed.

use crate::error::{Result, SetupError};
use std::path::Path;

/// Check that `openssl` is reachable before a certificate topic runs.
///
/// This is a CRITICAL check: the mTLS and Apple-profile flows cannot proceed
/// without it, so a missing binary fails fast with install guidance.
pub async fn check_openssl() -> Result<()> {
    if which::which("openssl").is_err() {
        return Err(SetupError::MissingDependency(
            "OpenSSL/LibreSSL not found in PATH.\n\
             \n\
             To install:\n\
             • macOS: brew install openssl (or use system LibreSSL)\n\
             • Ubuntu/Debian: sudo apt-get install openssl\n\
             \n\
             Required for: client key, CSR, and PKCS#12 generation"
                .to_string(),
        ));
    }

    let output = tokio::process::Command::new("openssl")
        .arg("version")
        .output()
        .await
        .map_err(|e| SetupError::CommandExecution(format!("Failed to run openssl version: {e}")))?;

    let version_str = String::from_utf8_lossy(&output.stdout);
    if !version_str.trim().is_empty() {
        eprintln!("✓ Found: {}", version_str.trim());
    }

    Ok(())
}

/// Generate an RSA 2048 private key.
pub async fn generate_key(out: &Path) -> Result<()> {
    run_openssl(&["genrsa", "-out", path_str(out)?, "2048"]).await
}

/// Generate a CSR bound to the given common name.
pub async fn generate_csr(key: &Path, out: &Path, common_name: &str) -> Result<()> {
    let subject = format!("/CN={common_name}");
    run_openssl(&[
        "req",
        "-new",
        "-key",
        path_str(key)?,
        "-out",
        path_str(out)?,
        "-subj",
        &subject,
    ])
    .await
}

/// Bundle a key + certificate pair into a PKCS#12 archive.
///
/// Exported with an empty passphrase; the profile carrying it is meant for
/// immediate device import, not long-term storage.
pub async fn export_p12(out: &Path, key: &Path, pem: &Path) -> Result<()> {
    run_openssl(&[
        "pkcs12",
        "-export",
        "-out",
        path_str(out)?,
        "-inkey",
        path_str(key)?,
        "-in",
        path_str(pem)?,
        "-passout",
        "pass:",
    ])
    .await
}

fn path_str(path: &Path) -> Result<&str> {
    path.to_str()
        .ok_or_else(|| SetupError::InvalidConfig(format!("Non-UTF-8 path: {}", path.display())))
}

async fn run_openssl(args: &[&str]) -> Result<()> {
    let output = tokio::process::Command::new("openssl")
        .args(args)
        .output()
        .await
        .map_err(|e| SetupError::CommandExecution(format!("Failed to run openssl {}: {e}", args[0])))?;

    if !output.status.success() {
        return Err(SetupError::CommandExecution(format!(
            "openssl {} failed: {}",
            args[0],
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    Ok(())
}

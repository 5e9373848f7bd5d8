//! GitHub SSH onboarding topic.
//!
//! Independent of the shared domain configuration: generates a personal key
//! pair, walks the operator through registering it with GitHub, adds it to
//! the local agent, and optionally pushes it to a remote machine.

use crate::error::{Result, SetupError};
use crate::prompts::{ask, press_enter, print_section, prompt_override_keep};
use crate::{artifact, clipboard};
use crate::{error as error_msg, success, warn};
use std::path::{Path, PathBuf};

const DEFAULT_KEY_NAME: &str = "github-key";

pub async fn run() -> Result<()> {
    print_section("GitHub SSH Onboarding");
    check_ssh_tools()?;

    let home = dirs::home_dir()
        .ok_or_else(|| SetupError::MissingConfig("HOME directory not set".to_string()))?;
    let default_ssh_dir = home.join(".ssh");
    let default_ssh_dir_str = default_ssh_dir.to_string_lossy();

    let ssh_dir_raw = ask("SSH directory", Some(default_ssh_dir_str.as_ref()))?;
    let ssh_dir = PathBuf::from(shellexpand::tilde(&ssh_dir_raw).to_string());
    let key_name = ask("Key name", Some(DEFAULT_KEY_NAME))?;
    let email = ask("Identifier email (key comment)", None)?;

    let private_key = ssh_dir.join(&key_name);
    let public_key = ssh_dir.join(format!("{key_name}.pub"));
    artifact::ensure_dir(&ssh_dir).await?;

    // Same keep/override policy as every other generated artifact.
    if tokio::fs::try_exists(&private_key).await? {
        if prompt_override_keep(&private_key)? {
            generate_key_pair(&private_key, &email).await?;
        }
    } else {
        generate_key_pair(&private_key, &email).await?;
    }

    if tokio::fs::try_exists(&public_key).await? {
        let pub_content = tokio::fs::read_to_string(&public_key).await?;
        match clipboard::copy(&pub_content).await {
            Ok(()) => success!("Public key copied to clipboard"),
            Err(e) => warn!("{e}; copy {} manually", public_key.display()),
        }

        println!("\n1. Go to: https://github.com/settings/keys");
        println!("2. Click 'New SSH key' and paste the public key.");
        press_enter("\nPress Enter once the key is added to GitHub")?;
    }

    add_to_agent(&private_key).await?;
    success!("Key registered with the SSH agent");

    print_section("[Optional] Copy identity to a remote machine");
    println!("Allows password-less login to a remote server (e.g. an RPi or cloud instance).");
    let remote = ask("user@host (leave blank to skip)", None)?;

    if remote.trim().is_empty() {
        println!("Skipping remote machine sync.");
        return Ok(());
    }

    // Remote push is best-effort: a bad address must not sink the run.
    match copy_id_to_remote(&private_key, remote.trim()).await {
        Ok(()) => success!("Identity copied to {}", remote.trim()),
        Err(e) => {
            error_msg!("Failed to copy the key to {}: {e}", remote.trim());
            warn!("Check the address and credentials; continuing.");
        }
    }

    Ok(())
}

fn check_ssh_tools() -> Result<()> {
    if which::which("ssh-keygen").is_err() {
        return Err(SetupError::MissingDependency(
            "ssh-keygen not found in PATH. Install the OpenSSH client package.".to_string(),
        ));
    }
    Ok(())
}

/// `ssh-keygen` arguments: RSA 2048, no passphrase, email as the comment.
pub fn keygen_args(key_path: &Path, email: &str) -> Vec<String> {
    vec![
        "-t".to_string(),
        "rsa".to_string(),
        "-b".to_string(),
        "2048".to_string(),
        "-f".to_string(),
        key_path.display().to_string(),
        "-C".to_string(),
        email.to_string(),
        "-N".to_string(),
        String::new(),
    ]
}

/// `ssh-add` arguments; macOS also stores the passphrase in the keychain.
pub fn ssh_add_args(key_path: &Path) -> Vec<String> {
    let mut args = Vec::new();
    if cfg!(target_os = "macos") {
        args.push("--apple-use-keychain".to_string());
    }
    args.push(key_path.display().to_string());
    args
}

async fn generate_key_pair(key_path: &Path, email: &str) -> Result<()> {
    run_tool("ssh-keygen", &keygen_args(key_path, email)).await?;
    success!("Key pair generated: {}", key_path.display());
    Ok(())
}

async fn add_to_agent(key_path: &Path) -> Result<()> {
    println!("Adding key to the SSH agent...");
    run_tool("ssh-add", &ssh_add_args(key_path)).await
}

async fn copy_id_to_remote(key_path: &Path, remote: &str) -> Result<()> {
    run_tool(
        "ssh-copy-id",
        &[
            "-i".to_string(),
            key_path.display().to_string(),
            remote.to_string(),
        ],
    )
    .await
}

async fn run_tool(program: &str, args: &[String]) -> Result<()> {
    let output = tokio::process::Command::new(program)
        .args(args)
        .output()
        .await
        .map_err(|e| SetupError::CommandExecution(format!("Failed to run {program}: {e}")))?;

    if !output.status.success() {
        return Err(SetupError::CommandExecution(format!(
            "{program} failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    Ok(())
}

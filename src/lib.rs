//! Interactive wizard for provisioning home-lab security artifacts.
//!
//! Sequencing, prompting, and safe file writes live here. Cryptography and
//! system manipulation are delegated to external tools: `openssl` for keys,
//! CSRs, and PKCS#12 bundles, `ssh-keygen`/`ssh-add`/`ssh-copy-id` for SSH
//! onboarding, and platform utilities for clipboard access.

pub mod artifact;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod menu;
pub mod prompts;
pub mod ssl;
pub mod topics;

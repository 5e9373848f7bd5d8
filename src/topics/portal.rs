//! FileBrowser portal configuration topic.
//!
//! Produces the docker-compose descriptor and the FileBrowser settings
//! document, then populates the download area with the mTLS artifacts when
//! they exist.

use crate::config::{SessionConfig, APPLE_PROFILE, DEVICE_P12};
use crate::error::Result;
use crate::prompts::print_section;
use crate::{artifact, success, warn};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct PortalSettings {
    pub port: u16,
    pub address: String,
    pub cert: String,
    pub key: String,
    pub log: String,
    pub database: String,
    pub root: String,
    pub auth: AuthSettings,
    pub branding: BrandingSettings,
}

#[derive(Debug, Serialize)]
pub struct AuthSettings {
    pub method: String,
}

#[derive(Debug, Serialize)]
pub struct BrandingSettings {
    pub name: String,
    #[serde(rename = "disableExternal")]
    pub disable_external: bool,
}

impl Default for PortalSettings {
    fn default() -> Self {
        Self {
            port: 443,
            address: "0.0.0.0".to_string(),
            cert: "/certs/fb-cert.pem".to_string(),
            key: "/certs/fb-key.pem".to_string(),
            log: "stdout".to_string(),
            database: "/database/filebrowser.db".to_string(),
            root: "/srv".to_string(),
            auth: AuthSettings {
                method: "json".to_string(),
            },
            branding: BrandingSettings {
                name: "Secure Setup Portal".to_string(),
                disable_external: true,
            },
        }
    }
}

/// Compose descriptor parameterized by the computed srv and cert paths.
pub fn docker_compose_template(srv_dir: &Path, cert_dir: &Path) -> String {
    format!(
        r#"services:
  filebrowser:
    image: filebrowser/filebrowser:latest
    container_name: filebrowser
    restart: unless-stopped
    volumes:
      - {srv}:/srv
      - ./filebrowser.db:/database/filebrowser.db
      - ./settings.json:/config/settings.json
      - {certs}:/certs:ro
    environment:
      - PUID=1000
      - PGID=1000
    ports:
      - "8443:443"
"#,
        srv = srv_dir.display(),
        certs = cert_dir.display(),
    )
}

pub async fn run(config: &SessionConfig) -> Result<()> {
    print_section("Portal Configuration");

    let conf_dir = config.portal_conf_dir();
    let srv_dir = config.portal_srv_dir();
    artifact::ensure_dir(&conf_dir).await?;
    artifact::ensure_dir(&srv_dir).await?;

    let compose = docker_compose_template(&srv_dir, &config.cert_dir());
    let settings = serde_json::to_string_pretty(&PortalSettings::default())?;

    artifact::safe_write(&conf_dir.join("docker-compose.yml"), &compose).await?;
    artifact::safe_write(&conf_dir.join("settings.json"), &settings).await?;

    // Make the device bundle and profile downloadable through the portal.
    // Absence is not fatal: the operator may be running portal-only first.
    let p12_src = config.p12_path();
    let profile_src = config.profile_path();
    if tokio::fs::try_exists(&p12_src).await? && tokio::fs::try_exists(&profile_src).await? {
        tokio::fs::copy(&p12_src, srv_dir.join(DEVICE_P12)).await?;
        tokio::fs::copy(&profile_src, srv_dir.join(APPLE_PROFILE)).await?;
        success!("Copied mTLS files to the portal download area");
    } else {
        warn!("Skipping copy of mTLS files (not found in tunnel_cert); portal starts empty");
    }

    success!("Portal configuration written to {}", conf_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn compose_mounts_computed_paths() {
        let compose = docker_compose_template(
            &PathBuf::from("/tmp/setup/filebrowser/srv"),
            &PathBuf::from("/tmp/setup/tunnel_cert"),
        );

        assert!(compose.contains("image: filebrowser/filebrowser:latest"));
        assert!(compose.contains("- /tmp/setup/filebrowser/srv:/srv"));
        assert!(compose.contains("- /tmp/setup/tunnel_cert:/certs:ro"));
        assert!(compose.contains("restart: unless-stopped"));
        assert!(compose.contains("\"8443:443\""));
    }

    #[test]
    fn settings_document_matches_container_layout() {
        let json = serde_json::to_string_pretty(&PortalSettings::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["port"], 443);
        assert_eq!(value["address"], "0.0.0.0");
        assert_eq!(value["root"], "/srv");
        assert_eq!(value["auth"]["method"], "json");
        assert_eq!(value["branding"]["disableExternal"], true);
        assert_eq!(value["branding"]["name"], "Secure Setup Portal");
    }
}

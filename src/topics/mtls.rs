//! mTLS identity and Apple configuration profile topics.
//!
//! The identity flow generates a client key and CSR, hands the CSR to the
//! operator for signing by the tunnel provider, and waits for the signed
//! certificate. The profile flow bundles key + certificate into a PKCS#12
//! archive and wraps it in a `.mobileconfig` property list.

use crate::config::{reverse_dns_identifier, SessionConfig, CLIENT_PEM};
use crate::error::{Result, SetupError};
use crate::prompts::{press_enter, print_section, prompt_override_keep, prompt_yes_no};
use crate::{artifact, clipboard, ssl};
use crate::{success, warn};
use base64::Engine;
use uuid::Uuid;

/// Generate the client key and CSR, then pause until the operator has saved
/// the signed certificate as `client.pem`.
pub async fn generate_certificates(config: &SessionConfig) -> Result<()> {
    print_section("mTLS Identity");
    ssl::check_openssl().await?;
    artifact::ensure_dir(&config.cert_dir()).await?;

    let key_path = config.client_key_path();
    let csr_path = config.client_csr_path();
    let common_name = config.common_name();

    // Key regeneration follows the same keep/override policy as file writes.
    if tokio::fs::try_exists(&key_path).await? {
        if prompt_override_keep(&key_path)? {
            ssl::generate_key(&key_path).await?;
            success!("Private key regenerated: {}", key_path.display());
        }
    } else {
        ssl::generate_key(&key_path).await?;
        success!("Private key written: {}", key_path.display());
    }

    ssl::generate_csr(&key_path, &csr_path, &common_name).await?;
    success!("CSR generated for {common_name}");

    let csr_content = tokio::fs::read_to_string(&csr_path).await?;
    match clipboard::copy(&csr_content).await {
        Ok(()) => success!("CSR copied to clipboard"),
        Err(e) => warn!("{e}; copy {} manually", csr_path.display()),
    }

    let pem_path = config.client_pem_path();
    println!("\n1. Upload the CSR to your tunnel provider (Zero Trust > Security > Certificates).");
    println!("2. Paste the signed certificate into: {}", pem_path.display());
    press_enter("\nPress Enter once client.pem is saved")?;

    if !tokio::fs::try_exists(&pem_path).await? {
        return Err(SetupError::MissingArtifact(format!(
            "{} not found; save the signed certificate before continuing",
            pem_path.display()
        )));
    }
    success!("Signed certificate found");
    Ok(())
}

/// Check that the named files exist in `tunnel_cert/` before a dependent
/// topic runs. Missing files are fatal with a pointer at the identity step.
pub async fn verify_prerequisites(config: &SessionConfig, files: &[&str]) -> Result<()> {
    let mut missing = Vec::new();
    for file in files {
        if !tokio::fs::try_exists(config.cert_dir().join(file)).await? {
            missing.push(*file);
        }
    }

    if !missing.is_empty() {
        return Err(SetupError::MissingArtifact(format!(
            "missing {} in {} — run the 'mTLS Identity Only' step first or place existing keys there",
            missing.join(", "),
            config.cert_dir().display()
        )));
    }
    Ok(())
}

/// Bundle the identity into a PKCS#12 archive and write the `.mobileconfig`
/// profile embedding it.
pub async fn generate_apple_profile(config: &SessionConfig) -> Result<()> {
    print_section("Apple Profile");

    let key_path = config.client_key_path();
    let pem_path = config.client_pem_path();
    let p12_path = config.p12_path();

    if !tokio::fs::try_exists(&pem_path).await? {
        return Err(SetupError::MissingArtifact(format!(
            "{CLIENT_PEM} not found at {}; generate and save it first",
            pem_path.display()
        )));
    }

    if tokio::fs::try_exists(&p12_path).await? {
        if prompt_yes_no(&format!("{} exists. Regenerate it?", p12_path.display()))? {
            ssl::export_p12(&p12_path, &key_path, &pem_path).await?;
        }
    } else {
        ssl::export_p12(&p12_path, &key_path, &pem_path).await?;
    }

    // The P12 bytes are passed through opaquely, only base64-encoded for the
    // plist <data> element.
    let p12_bytes = tokio::fs::read(&p12_path).await?;
    let base64_data = base64::engine::general_purpose::STANDARD.encode(&p12_bytes);

    let profile = apple_profile_template(&ProfileParams {
        file_name: format!("{}.p12", config.ha_subdomain),
        base64_data,
        display_name: format!("mTLS: {}", config.ha_subdomain),
        identifier: reverse_dns_identifier(&config.domain),
        payload_uuid: Uuid::new_v4().to_string(),
        profile_uuid: Uuid::new_v4().to_string(),
    });

    artifact::safe_write(&config.profile_path(), &profile).await?;
    Ok(())
}

pub struct ProfileParams {
    pub file_name: String,
    pub base64_data: String,
    pub display_name: String,
    pub identifier: String,
    pub payload_uuid: String,
    pub profile_uuid: String,
}

/// Fixed-structure Apple configuration profile with a single
/// `com.apple.certificate.pkcs12` payload.
pub fn apple_profile_template(p: &ProfileParams) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>PayloadContent</key>
    <array>
        <dict>
            <key>PayloadCertificateFileName</key>
            <string>{file_name}</string>
            <key>PayloadContent</key>
            <data>{base64_data}</data>
            <key>PayloadType</key>
            <string>com.apple.certificate.pkcs12</string>
            <key>PayloadUUID</key>
            <string>{payload_uuid}</string>
            <key>PayloadVersion</key>
            <integer>1</integer>
        </dict>
    </array>
    <key>PayloadDisplayName</key>
    <string>{display_name}</string>
    <key>PayloadIdentifier</key>
    <string>{identifier}</string>
    <key>PayloadType</key>
    <string>Configuration</string>
    <key>PayloadUUID</key>
    <string>{profile_uuid}</string>
    <key>PayloadVersion</key>
    <integer>1</integer>
</dict>
</plist>"#,
        file_name = p.file_name,
        base64_data = p.base64_data,
        payload_uuid = p.payload_uuid,
        display_name = p.display_name,
        identifier = p.identifier,
        profile_uuid = p.profile_uuid,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ProfileParams {
        ProfileParams {
            file_name: "ha.p12".to_string(),
            base64_data: "AAEC".to_string(),
            display_name: "mTLS: ha".to_string(),
            identifier: "com.example.mtls".to_string(),
            payload_uuid: Uuid::new_v4().to_string(),
            profile_uuid: Uuid::new_v4().to_string(),
        }
    }

    #[test]
    fn profile_embeds_pkcs12_payload() {
        let p = params();
        let xml = apple_profile_template(&p);

        assert!(xml.starts_with("<?xml version=\"1.0\""));
        assert!(xml.contains("<string>com.apple.certificate.pkcs12</string>"));
        assert!(xml.contains("<string>ha.p12</string>"));
        assert!(xml.contains("<data>AAEC</data>"));
        assert!(xml.contains("<string>com.example.mtls</string>"));
        assert!(xml.contains("<string>mTLS: ha</string>"));
    }

    #[test]
    fn profile_uses_independent_uuids() {
        let p = params();
        assert_ne!(p.payload_uuid, p.profile_uuid);

        let xml = apple_profile_template(&p);
        assert!(xml.contains(&p.payload_uuid));
        assert!(xml.contains(&p.profile_uuid));
    }

    #[tokio::test]
    async fn prerequisites_report_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = SessionConfig {
            mode: crate::config::OperationMode::AppleProfileOnly,
            work_dir: dir.path().to_path_buf(),
            domain: "example.com".to_string(),
            ha_subdomain: "ha".to_string(),
            portal_subdomain: "setup".to_string(),
        };

        let err = verify_prerequisites(&config, &["client.key", "client.pem"])
            .await
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("client.key"));
        assert!(msg.contains("client.pem"));

        std::fs::create_dir_all(config.cert_dir()).unwrap();
        std::fs::write(config.client_key_path(), "key").unwrap();
        std::fs::write(config.client_pem_path(), "pem").unwrap();
        assert!(verify_prerequisites(&config, &["client.key", "client.pem"])
            .await
            .is_ok());
    }
}

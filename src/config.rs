//! Session configuration and derived artifact paths.

use std::path::PathBuf;

/// File names under `<work_dir>/tunnel_cert/`.
pub const CLIENT_KEY: &str = "client.key";
pub const CLIENT_CSR: &str = "client.csr";
pub const CLIENT_PEM: &str = "client.pem";
pub const DEVICE_P12: &str = "device-cert.p12";
pub const APPLE_PROFILE: &str = "apple-secure.mobileconfig";

/// Default subdomain for the tunnel identity (Home Assistant endpoint)
pub const DEFAULT_HA_SUBDOMAIN: &str = "ha";

/// Default subdomain for the file portal
pub const DEFAULT_PORTAL_SUBDOMAIN: &str = "setup";

/// Execution scope of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    FullSetup,
    MtlsOnly,
    AppleProfileOnly,
    PortalOnly,
    GithubSsh,
}

impl OperationMode {
    /// Whether this mode needs the shared domain configuration.
    /// SSH onboarding is independent of the domain setup.
    pub fn requires_domain(self) -> bool {
        !matches!(self, Self::GithubSsh)
    }

    /// Whether the portal subdomain prompt is worth asking.
    pub fn generates_portal(self) -> bool {
        matches!(self, Self::FullSetup | Self::PortalOnly)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::FullSetup => "Full Setup",
            Self::MtlsOnly => "mTLS Identity Only",
            Self::AppleProfileOnly => "Apple Profile Only",
            Self::PortalOnly => "Portal Configuration Only",
            Self::GithubSsh => "GitHub SSH Onboarding",
        }
    }
}

/// Per-run configuration, built once from flags and interactive answers.
/// Never persisted; read-only after the configuration phase.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub mode: OperationMode,
    pub work_dir: PathBuf,
    pub domain: String,
    pub ha_subdomain: String,
    pub portal_subdomain: String,
}

impl SessionConfig {
    pub fn cert_dir(&self) -> PathBuf {
        self.work_dir.join("tunnel_cert")
    }

    pub fn client_key_path(&self) -> PathBuf {
        self.cert_dir().join(CLIENT_KEY)
    }

    pub fn client_csr_path(&self) -> PathBuf {
        self.cert_dir().join(CLIENT_CSR)
    }

    pub fn client_pem_path(&self) -> PathBuf {
        self.cert_dir().join(CLIENT_PEM)
    }

    pub fn p12_path(&self) -> PathBuf {
        self.cert_dir().join(DEVICE_P12)
    }

    pub fn profile_path(&self) -> PathBuf {
        self.cert_dir().join(APPLE_PROFILE)
    }

    pub fn portal_dir(&self) -> PathBuf {
        self.work_dir.join("filebrowser")
    }

    pub fn portal_conf_dir(&self) -> PathBuf {
        self.portal_dir().join("conf")
    }

    pub fn portal_srv_dir(&self) -> PathBuf {
        self.portal_dir().join("srv")
    }

    /// Common name for the client certificate, `<subdomain>.<domain>`.
    pub fn common_name(&self) -> String {
        format!("{}.{}", self.ha_subdomain, self.domain)
    }
}

/// Reverse-DNS payload identifier for the Apple profile.
///
/// `a.b.com` becomes `com.b.a.mtls`.
pub fn reverse_dns_identifier(domain: &str) -> String {
    let mut parts: Vec<&str> = domain.split('.').filter(|p| !p.is_empty()).collect();
    parts.reverse();
    format!("{}.mtls", parts.join("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> SessionConfig {
        SessionConfig {
            mode: OperationMode::FullSetup,
            work_dir: PathBuf::from("/tmp/setup"),
            domain: "example.com".to_string(),
            ha_subdomain: "ha".to_string(),
            portal_subdomain: "setup".to_string(),
        }
    }

    #[test]
    fn reverse_dns_identifier_reverses_labels() {
        assert_eq!(reverse_dns_identifier("a.b.com"), "com.b.a.mtls");
        assert_eq!(reverse_dns_identifier("example.com"), "com.example.mtls");
    }

    #[test]
    fn reverse_dns_identifier_single_label() {
        assert_eq!(reverse_dns_identifier("lan"), "lan.mtls");
    }

    #[test]
    fn reverse_dns_identifier_ignores_empty_labels() {
        assert_eq!(reverse_dns_identifier("example.com."), "com.example.mtls");
    }

    #[test]
    fn common_name_joins_subdomain_and_domain() {
        assert_eq!(fixture().common_name(), "ha.example.com");
    }

    #[test]
    fn artifact_paths_follow_layout() {
        let config = fixture();
        assert_eq!(
            config.client_key_path(),
            PathBuf::from("/tmp/setup/tunnel_cert/client.key")
        );
        assert_eq!(
            config.profile_path(),
            PathBuf::from("/tmp/setup/tunnel_cert/apple-secure.mobileconfig")
        );
        assert_eq!(
            config.portal_conf_dir(),
            PathBuf::from("/tmp/setup/filebrowser/conf")
        );
        assert_eq!(
            config.portal_srv_dir(),
            PathBuf::from("/tmp/setup/filebrowser/srv")
        );
    }

    #[test]
    fn ssh_mode_does_not_require_domain() {
        assert!(!OperationMode::GithubSsh.requires_domain());
        assert!(OperationMode::MtlsOnly.requires_domain());
        assert!(OperationMode::PortalOnly.requires_domain());
    }
}

use anyhow::Result;
use clap::Parser;
use secure_setup::artifact;
use secure_setup::config::{
    OperationMode, SessionConfig, CLIENT_KEY, CLIENT_PEM, DEFAULT_HA_SUBDOMAIN,
    DEFAULT_PORTAL_SUBDOMAIN,
};
use secure_setup::error::SetupError;
use secure_setup::menu::Menu;
use secure_setup::prompts::{ask, print_header, print_section};
use secure_setup::success;
use secure_setup::topics::{github_ssh, mtls, portal};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "secure-setup")]
#[command(version, about = "Provision home-lab mTLS, Apple profile, portal, and SSH artifacts")]
struct Cli {
    /// Run the full setup (mTLS identity, Apple profile, portal)
    #[arg(long, conflicts_with_all = ["mtls_only", "apple_profile", "portal", "github_ssh"])]
    full: bool,

    /// Generate the mTLS identity only (key & CSR)
    #[arg(long, conflicts_with_all = ["full", "apple_profile", "portal", "github_ssh"])]
    mtls_only: bool,

    /// Regenerate the .mobileconfig profile from existing keys
    #[arg(long, conflicts_with_all = ["full", "mtls_only", "portal", "github_ssh"])]
    apple_profile: bool,

    /// Generate the portal configuration only (docker-compose & FileBrowser)
    #[arg(long, conflicts_with_all = ["full", "mtls_only", "apple_profile", "github_ssh"])]
    portal: bool,

    /// Run GitHub SSH onboarding
    #[arg(long, conflicts_with_all = ["full", "mtls_only", "apple_profile", "portal"])]
    github_ssh: bool,

    /// Working directory for generated artifacts (prompted when omitted)
    #[arg(long)]
    work_dir: Option<PathBuf>,

    /// Root domain, e.g. example.com (prompted when omitted)
    #[arg(long)]
    domain: Option<String>,

    /// Subdomain for the tunnel identity
    #[arg(long)]
    ha_subdomain: Option<String>,

    /// Subdomain for the file portal
    #[arg(long)]
    portal_subdomain: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    print_header("Secure Infrastructure Setup");

    let mode = match flag_mode(&cli) {
        Some(mode) => mode,
        None => build_menu().show()?,
    };

    if mode == OperationMode::GithubSsh {
        github_ssh::run().await?;
    } else {
        let config = gather_configuration(&cli, mode)?;
        scaffold_directories(&config).await?;
        run_mode(&config).await?;
    }

    success!("Task finished.");
    Ok(())
}

fn flag_mode(cli: &Cli) -> Option<OperationMode> {
    if cli.full {
        Some(OperationMode::FullSetup)
    } else if cli.mtls_only {
        Some(OperationMode::MtlsOnly)
    } else if cli.apple_profile {
        Some(OperationMode::AppleProfileOnly)
    } else if cli.portal {
        Some(OperationMode::PortalOnly)
    } else if cli.github_ssh {
        Some(OperationMode::GithubSsh)
    } else {
        None
    }
}

fn build_menu() -> Menu {
    let mut menu = Menu::new("Select Operation");
    menu.add_option(
        "Full Setup (mTLS identity, Apple profile, portal)",
        OperationMode::FullSetup,
    );
    menu.add_option("mTLS Identity Only (key & CSR)", OperationMode::MtlsOnly);
    menu.add_option(
        "Apple Profile Only (regenerate .mobileconfig from existing keys)",
        OperationMode::AppleProfileOnly,
    );
    menu.add_option(
        "Portal Configuration Only (docker-compose & FileBrowser)",
        OperationMode::PortalOnly,
    );
    menu.add_option("GitHub SSH Onboarding", OperationMode::GithubSsh);
    menu
}

/// Gather the shared configuration, preferring flags over prompts.
///
/// The domain is mandatory for every mode that reaches this point; an empty
/// answer aborts before any artifact is written.
fn gather_configuration(cli: &Cli, mode: OperationMode) -> Result<SessionConfig, SetupError> {
    print_section("Configuration");

    let work_dir = match &cli.work_dir {
        Some(dir) => dir.clone(),
        None => {
            let default_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("git");
            let default_str = default_dir.to_string_lossy();
            let raw = ask("Working directory", Some(default_str.as_ref()))?;
            PathBuf::from(shellexpand::tilde(&raw).to_string())
        }
    };

    let domain = match &cli.domain {
        Some(d) => d.clone(),
        None => ask("Root domain (e.g. example.com)", None)?,
    };
    if mode.requires_domain() && domain.trim().is_empty() {
        return Err(SetupError::MissingConfig(
            "a root domain is required to proceed".to_string(),
        ));
    }

    let ha_subdomain = match &cli.ha_subdomain {
        Some(s) => s.clone(),
        None => ask("Tunnel (HA) subdomain", Some(DEFAULT_HA_SUBDOMAIN))?,
    };

    // Only worth asking when the portal will actually be generated.
    let portal_subdomain = if mode.generates_portal() {
        match &cli.portal_subdomain {
            Some(s) => s.clone(),
            None => ask("Portal subdomain", Some(DEFAULT_PORTAL_SUBDOMAIN))?,
        }
    } else {
        cli.portal_subdomain
            .clone()
            .unwrap_or_else(|| DEFAULT_PORTAL_SUBDOMAIN.to_string())
    };

    Ok(SessionConfig {
        mode,
        work_dir,
        domain: domain.trim().to_string(),
        ha_subdomain,
        portal_subdomain,
    })
}

/// Create the directory structure up front. Safe and idempotent.
async fn scaffold_directories(config: &SessionConfig) -> Result<(), SetupError> {
    artifact::ensure_dir(&config.cert_dir()).await?;
    artifact::ensure_dir(&config.portal_conf_dir()).await?;
    artifact::ensure_dir(&config.portal_srv_dir()).await?;
    Ok(())
}

async fn run_mode(config: &SessionConfig) -> Result<(), SetupError> {
    match config.mode {
        OperationMode::FullSetup => {
            mtls::generate_certificates(config).await?;
            mtls::generate_apple_profile(config).await?;
            portal::run(config).await?;
        }
        OperationMode::MtlsOnly => {
            mtls::generate_certificates(config).await?;
        }
        OperationMode::AppleProfileOnly => {
            mtls::verify_prerequisites(config, &[CLIENT_KEY, CLIENT_PEM]).await?;
            mtls::generate_apple_profile(config).await?;
        }
        OperationMode::PortalOnly => {
            portal::run(config).await?;
        }
        OperationMode::GithubSsh => {
            github_ssh::run().await?;
        }
    }
    Ok(())
}

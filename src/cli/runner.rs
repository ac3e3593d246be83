//! CLI command runner

use std::io::{self, BufRead};
use std::path::PathBuf;

use crate::api::{MagentoClient, StoreCredentials};
use crate::config::Settings;
use crate::credentials::CredentialStore;
use crate::export::{finished_message, Exporter};

use super::{Cli, Commands, ConfigCommands, CredentialsCommands, ExportArgs};

/// Run the CLI application
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::ExportCustomers(args)) => run_export(cli.store_url, cli.var_dir, args).await,
        Some(Commands::Config(args)) => run_config(args.command),
        Some(Commands::Credentials(args)) => run_credentials(cli.store_url, args.command),
        None => {
            println!("Customer Export Tool");
            println!("Use --help for usage information");
            Ok(())
        }
    }
}

/// Run the export command
async fn run_export(
    store_url: Option<String>,
    var_dir: Option<PathBuf>,
    args: ExportArgs,
) -> anyhow::Result<()> {
    let settings = Settings::load()?;
    let base_url = settings.resolve_store_url(store_url.as_deref())?;
    let export_dir = settings.resolve_export_dir(var_dir.as_deref())?;
    let credentials = resolve_credentials(&settings, &base_url, args.token)?;

    let client = MagentoClient::new(&base_url, credentials)?;
    tracing::info!("Exporting customers from {}", client.base_url());

    let exporter = Exporter::new(client, export_dir).with_page_size(settings.store.page_size);
    let path = exporter.run(args.output.as_deref()).await?;

    println!("{}", finished_message(&path));
    Ok(())
}

/// Run settings commands
fn run_config(cmd: ConfigCommands) -> anyhow::Result<()> {
    match cmd {
        ConfigCommands::Show => {
            let path = Settings::config_path()?;
            let settings = Settings::load()?;
            println!("Settings file: {}", path.display());
            println!("{}", serde_json::to_string_pretty(&settings)?);
            println!("Export directory: {}", settings.resolve_export_dir(None)?.display());
        }

        ConfigCommands::SetStore {
            url,
            username,
            page_size,
        } => {
            let mut settings = Settings::load()?;
            settings.store.base_url = Some(url.trim_end_matches('/').to_string());
            if username.is_some() {
                settings.store.username = username;
            }
            if let Some(page_size) = page_size {
                settings.store.page_size = page_size;
            }
            settings.save()?;
            println!("✓ Store set to '{}'", url);
        }

        ConfigCommands::SetVarDir { dir } => {
            let mut settings = Settings::load()?;
            let resolved = settings.resolve_var_dir(Some(dir.as_path()))?;
            settings.var_dir = Some(resolved.clone());
            settings.save()?;
            println!("✓ Var directory set to '{}'", resolved.display());
        }
    }

    Ok(())
}

/// Run credential commands
fn run_credentials(store_url: Option<String>, cmd: CredentialsCommands) -> anyhow::Result<()> {
    let settings = Settings::load()?;
    let base_url = settings.resolve_store_url(store_url.as_deref())?;

    match cmd {
        CredentialsCommands::SetToken => {
            let token = read_secret(&format!("Enter access token for '{}': ", base_url))?;
            CredentialStore::store_token(&base_url, &token)?;
            println!("✓ Token stored for '{}'", base_url);
        }

        CredentialsCommands::SetPassword => {
            if settings.store.username.is_none() {
                anyhow::bail!(
                    "No admin username configured. Use: customer-export config set-store <url> --username <user>"
                );
            }
            let password = read_secret(&format!("Enter admin password for '{}': ", base_url))?;
            CredentialStore::store_password(&base_url, &password)?;
            println!("✓ Password stored for '{}'", base_url);
        }

        CredentialsCommands::Delete => {
            CredentialStore::delete_token(&base_url)?;
            CredentialStore::delete_password(&base_url)?;
            println!("✓ Credentials deleted for '{}'", base_url);
        }
    }

    Ok(())
}

/// Prompt on stderr and read one non-empty line from stdin
fn read_secret(prompt: &str) -> anyhow::Result<String> {
    eprintln!("{}", prompt);
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let secret = line.trim();

    if secret.is_empty() {
        anyhow::bail!("Value cannot be empty");
    }
    Ok(secret.to_string())
}

/// Resolve store credentials: explicit token, stored token, then admin user + stored password
fn resolve_credentials(
    settings: &Settings,
    base_url: &str,
    token: Option<String>,
) -> anyhow::Result<StoreCredentials> {
    if let Some(token) = token.filter(|t| !t.is_empty()) {
        return Ok(StoreCredentials::Token(token));
    }

    if let Some(token) = CredentialStore::get_token(base_url)? {
        return Ok(StoreCredentials::Token(token));
    }

    if let Some(username) = &settings.store.username {
        let password = CredentialStore::get_password(base_url)?.ok_or_else(|| {
            anyhow::anyhow!(
                "No password stored for admin '{}'. Use: customer-export credentials set-password",
                username
            )
        })?;
        return Ok(StoreCredentials::Admin {
            username: username.clone(),
            password,
        });
    }

    anyhow::bail!(
        "No credentials for store '{}'. Use --token, set CUSTOMER_EXPORT_TOKEN, or: customer-export credentials set-token",
        base_url
    )
}

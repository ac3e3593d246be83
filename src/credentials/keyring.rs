//! OS-native credential storage with file-based fallback
//!
//! Keeps the store access token (and optionally the admin password) in the
//! system keychain, keyed by store URL. Falls back to an obfuscated file
//! when no keychain is available.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::error::{AppError, Result};

const SERVICE_NAME: &str = "customer-export";

/// Get the credentials file path
fn get_creds_file() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "customer-export", "customer-export")
        .map(|dirs| dirs.data_dir().join("credentials.json"))
}

/// Obfuscate a string (XOR + base64). Not encryption.
fn obfuscate(data: &str) -> String {
    let key = format!("{}-token-store-key", SERVICE_NAME);
    let key_bytes = key.as_bytes();
    let obfuscated: Vec<u8> = data
        .bytes()
        .enumerate()
        .map(|(i, b)| b ^ key_bytes[i % key_bytes.len()])
        .collect();
    BASE64.encode(obfuscated)
}

fn deobfuscate(data: &str) -> Option<String> {
    let key = format!("{}-token-store-key", SERVICE_NAME);
    let key_bytes = key.as_bytes();
    let decoded = BASE64.decode(data).ok()?;
    let plain: Vec<u8> = decoded
        .iter()
        .enumerate()
        .map(|(i, b)| b ^ key_bytes[i % key_bytes.len()])
        .collect();
    String::from_utf8(plain).ok()
}

fn load_file_creds() -> HashMap<String, String> {
    get_creds_file()
        .and_then(|path| fs::read_to_string(path).ok())
        .and_then(|content| serde_json::from_str(&content).ok())
        .unwrap_or_default()
}

fn save_file_creds(creds: &HashMap<String, String>) -> Result<()> {
    let Some(path) = get_creds_file() else {
        return Err(AppError::Credential(
            "Could not determine credentials directory".into(),
        ));
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            AppError::Credential(format!("Failed to create credentials directory: {}", e))
        })?;
    }
    let json = serde_json::to_string_pretty(creds)
        .map_err(|e| AppError::Credential(format!("Failed to serialize credentials: {}", e)))?;
    fs::write(&path, json)
        .map_err(|e| AppError::Credential(format!("Failed to write credentials file: {}", e)))?;
    tracing::debug!("Saved credentials to file: {:?}", path);
    Ok(())
}

/// Credential manager using OS keychain with file fallback
pub struct CredentialStore;

impl CredentialStore {
    /// Store the access token for a store URL
    pub fn store_token(store_url: &str, token: &str) -> Result<()> {
        Self::store_secret(store_url, token)
    }

    /// Retrieve the access token for a store URL
    pub fn get_token(store_url: &str) -> Result<Option<String>> {
        Self::get_secret(store_url)
    }

    /// Delete the access token for a store URL
    pub fn delete_token(store_url: &str) -> Result<()> {
        Self::delete_secret(store_url)
    }

    /// Store the admin password for a store URL
    pub fn store_password(store_url: &str, password: &str) -> Result<()> {
        Self::store_secret(&format!("{}_password", store_url), password)
    }

    /// Retrieve the admin password for a store URL
    pub fn get_password(store_url: &str) -> Result<Option<String>> {
        Self::get_secret(&format!("{}_password", store_url))
    }

    /// Delete the admin password for a store URL
    pub fn delete_password(store_url: &str) -> Result<()> {
        Self::delete_secret(&format!("{}_password", store_url))
    }

    /// Store a secret (tries keyring first, then file fallback)
    fn store_secret(account: &str, secret: &str) -> Result<()> {
        match Self::store_keyring(account, secret) {
            Ok(()) => {
                if let Ok(Some(stored)) = Self::get_keyring(account) {
                    if stored == secret {
                        tracing::info!("Secret stored in system keyring");
                        return Ok(());
                    }
                }
                tracing::warn!("Keyring store succeeded but verification failed, using file fallback");
            }
            Err(e) => tracing::warn!("Keyring store failed, using file fallback: {}", e),
        }

        tracing::warn!(
            "Storing secret for '{}' in file fallback with basic obfuscation only",
            account
        );
        let mut creds = load_file_creds();
        creds.insert(account.to_string(), obfuscate(secret));
        save_file_creds(&creds)
    }

    fn store_keyring(account: &str, secret: &str) -> Result<()> {
        let entry = keyring::Entry::new(SERVICE_NAME, account)
            .map_err(|e| AppError::Credential(format!("Failed to create keyring entry: {}", e)))?;

        entry
            .set_password(secret)
            .map_err(|e| AppError::Credential(format!("Failed to store secret in keyring: {}", e)))
    }

    /// Retrieve a secret (tries keyring first, then file fallback)
    fn get_secret(account: &str) -> Result<Option<String>> {
        if let Ok(Some(secret)) = Self::get_keyring(account) {
            tracing::debug!("Found secret for '{}' in system keyring", account);
            return Ok(Some(secret));
        }

        let creds = load_file_creds();
        Ok(creds.get(account).and_then(|s| deobfuscate(s)))
    }

    fn get_keyring(account: &str) -> Result<Option<String>> {
        let entry = keyring::Entry::new(SERVICE_NAME, account)
            .map_err(|e| AppError::Credential(format!("Failed to create keyring entry: {}", e)))?;

        match entry.get_password() {
            Ok(secret) => Ok(Some(secret)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(AppError::Credential(format!(
                "Failed to retrieve secret: {}",
                e
            ))),
        }
    }

    /// Delete a secret from both keyring and file
    fn delete_secret(account: &str) -> Result<()> {
        if let Ok(entry) = keyring::Entry::new(SERVICE_NAME, account) {
            match entry.delete_credential() {
                Ok(()) | Err(keyring::Error::NoEntry) => {}
                Err(e) => tracing::warn!("Failed to delete keyring entry: {}", e),
            }
        }

        let mut creds = load_file_creds();
        if creds.remove(account).is_some() {
            save_file_creds(&creds)?;
            tracing::debug!("Deleted secret for '{}' from file fallback", account);
        }
        Ok(())
    }
}

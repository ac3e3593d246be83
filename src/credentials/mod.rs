//! Credential storage for store access tokens

pub mod keyring;

pub use self::keyring::CredentialStore;

/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::fmt;

use crate::transport::CredentialException;

pub type Result<T> = std::result::Result<T, PasskeyError>;

/// Everything an operation can fail with, flattened into one enum. Each
/// variant renders with its own prefix and keeps the platform's original
/// message text, so callers always get a diagnosable string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasskeyError {
    /// The challenge JSON did not match the expected envelope.
    Parse(String),
    /// The platform handed back a credential variant this SDK does not use.
    UnexpectedCredential(String),
    /// WebAuthn-defined failure reported by the ceremony, e.g. an excluded
    /// credential already exists on the device.
    Dom(String),
    /// The user dismissed the platform credential sheet.
    Cancelled(String),
    /// Transient platform failure. The platform marks this retryable; the
    /// SDK never retries on its own.
    Interrupted(String),
    /// No usable credential provider is configured on the host.
    ProviderConfiguration(String),
    /// Failure the platform itself could not classify.
    Unknown(String),
    /// A third-party credential provider reported an opaque failure.
    CustomProvider(String),
    /// Exception kind outside the known platform taxonomy.
    Unclassified { class_name: String, message: String },
}

impl fmt::Display for PasskeyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PasskeyError::Parse(msg) => write!(f, "Failed to parse publicKey JSON: {}", msg),
            PasskeyError::UnexpectedCredential(msg) => write!(f, "Unexpected credential: {}", msg),
            PasskeyError::Dom(msg) => write!(f, "WebAuthn DOM failure: {}", msg),
            PasskeyError::Cancelled(msg) => write!(f, "Cancelled by the user: {}", msg),
            PasskeyError::Interrupted(msg) => write!(f, "Interrupted, retry may succeed: {}", msg),
            PasskeyError::ProviderConfiguration(msg) => {
                write!(f, "Provider configuration error: {}", msg)
            }
            PasskeyError::Unknown(msg) => write!(f, "Unknown platform error: {}", msg),
            PasskeyError::CustomProvider(msg) => write!(f, "Custom provider error: {}", msg),
            PasskeyError::Unclassified {
                class_name,
                message,
            } => write!(f, "Unexpected exception type {}: {}", class_name, message),
        }
    }
}

impl std::error::Error for PasskeyError {}

impl From<serde_json::Error> for PasskeyError {
    fn from(e: serde_json::Error) -> Self {
        PasskeyError::Parse(e.to_string())
    }
}

impl From<CredentialException> for PasskeyError {
    fn from(e: CredentialException) -> Self {
        match e {
            CredentialException::Dom(msg) => PasskeyError::Dom(msg),
            CredentialException::Cancelled(msg) => PasskeyError::Cancelled(msg),
            CredentialException::Interrupted(msg) => PasskeyError::Interrupted(msg),
            CredentialException::ProviderConfiguration(msg) => {
                PasskeyError::ProviderConfiguration(msg)
            }
            CredentialException::Unknown(msg) => PasskeyError::Unknown(msg),
            CredentialException::Custom(msg) => PasskeyError::CustomProvider(msg),
            CredentialException::Other {
                class_name,
                message,
            } => PasskeyError::Unclassified {
                class_name,
                message,
            },
        }
    }
}

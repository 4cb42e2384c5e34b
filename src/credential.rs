/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use serde_json::Value;

use crate::errors::PasskeyError;

/// Creation request handed to the platform. Wraps the translated
/// registration challenge JSON verbatim; the platform parses it itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePublicKeyCredentialRequest {
    request_json: String,
}

impl CreatePublicKeyCredentialRequest {
    pub fn new(request_json: String) -> Self {
        Self { request_json }
    }

    pub fn request_json(&self) -> &str {
        &self.request_json
    }
}

/// A single public-key option inside a [`GetCredentialRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetPublicKeyCredentialOption {
    request_json: String,
}

impl GetPublicKeyCredentialOption {
    pub fn new(request_json: String) -> Self {
        Self { request_json }
    }

    pub fn request_json(&self) -> &str {
        &self.request_json
    }
}

/// Retrieval request handed to the platform. The platform API accepts a
/// list of options; this SDK only ever supplies one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetCredentialRequest {
    options: Vec<GetPublicKeyCredentialOption>,
}

impl GetCredentialRequest {
    pub fn new(option: GetPublicKeyCredentialOption) -> Self {
        Self {
            options: vec![option],
        }
    }

    pub fn options(&self) -> &[GetPublicKeyCredentialOption] {
        &self.options
    }
}

/// Result of a platform create ceremony.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateCredentialResponse {
    /// The passkey was created; carries the registration response JSON
    /// produced by the platform.
    PublicKey { registration_response_json: String },
    /// A creation result this SDK has no use for.
    Other { credential_type: String },
}

/// Credential variants a platform get ceremony can produce.
#[derive(Debug, Clone, PartialEq)]
pub enum Credential {
    /// Passkey assertion; carries the authentication response JSON
    /// produced by the platform.
    PublicKey {
        authentication_response_json: String,
    },
    /// Stored username/password pair.
    Password { id: String, password: String },
    /// Provider-specific credential with an opaque payload.
    Custom { credential_type: String, data: Value },
}

/// Result of a platform get ceremony.
#[derive(Debug, Clone, PartialEq)]
pub struct GetCredentialResponse {
    pub credential: Credential,
}

/// Accepts only the public-key creation variant and passes its response
/// JSON through untouched, ready to forward to the relying party.
pub fn handle_create_result(response: CreateCredentialResponse) -> crate::Result<String> {
    match response {
        CreateCredentialResponse::PublicKey {
            registration_response_json,
        } => Ok(registration_response_json),
        CreateCredentialResponse::Other { credential_type } => {
            Err(PasskeyError::UnexpectedCredential(credential_type))
        }
    }
}

/// Accepts only a public-key credential. Password and provider-specific
/// credentials are rejected outright, never forwarded to the caller.
pub fn handle_get_result(response: GetCredentialResponse) -> crate::Result<String> {
    match response.credential {
        Credential::PublicKey {
            authentication_response_json,
        } => Ok(authentication_response_json),
        Credential::Password { id, .. } => {
            debug!("rejecting password credential for {}", id);
            Err(PasskeyError::UnexpectedCredential(
                "PasswordCredential not supported".to_string(),
            ))
        }
        Credential::Custom {
            credential_type, ..
        } => {
            debug!("rejecting custom credential of type {}", credential_type);
            Err(PasskeyError::UnexpectedCredential(
                "CustomCredential not supported".to_string(),
            ))
        }
    }
}

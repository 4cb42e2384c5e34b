/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::credential::{
    CreatePublicKeyCredentialRequest, GetCredentialRequest, GetPublicKeyCredentialOption,
};
use crate::errors::PasskeyError;

// Overrides applied to every registration challenge. The SDK always asks
// for a discoverable credential, whatever the relying party requested.
const REQUIRE_RESIDENT_KEY: &str = "requireResidentKey";
const RESIDENT_KEY: &str = "residentKey";
const RESIDENT_KEY_PREFERENCE: &str = "preferred";

/// Registration challenge as issued by the relying party, in the WebAuthn
/// JSON wire format with its `{"publicKey": {...}}` envelope.
///
/// The descriptor fields stay opaque JSON maps and the flattened tail
/// keeps any field not named here, so everything the relying party sent
/// survives the round trip untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationChallenge {
    pub public_key: RegistrationPublicKey,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationPublicKey {
    pub rp: Map<String, Value>,
    pub user: Map<String, Value>,
    pub challenge: String,
    pub pub_key_cred_params: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attestation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_credentials: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authenticator_selection: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Authentication challenge in the same envelope shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationChallenge {
    pub public_key: AuthenticationPublicKey,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationPublicKey {
    pub rp_id: String,
    pub challenge: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_verification: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_credentials: Option<Vec<Value>>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Parses a registration challenge, forces the resident-key fields inside
/// `authenticatorSelection`, and re-serializes the inner object into the
/// platform request.
///
/// A challenge without `authenticatorSelection` is rejected as a parse
/// error; there is nothing to write the overrides into.
pub fn build_registration_request(
    request_json: &str,
) -> crate::Result<CreatePublicKeyCredentialRequest> {
    let mut envelope: RegistrationChallenge = serde_json::from_str(request_json)?;

    let selection = envelope
        .public_key
        .authenticator_selection
        .as_mut()
        .ok_or_else(|| {
            PasskeyError::Parse("publicKey.authenticatorSelection is missing".to_string())
        })?;
    selection.insert(REQUIRE_RESIDENT_KEY.to_string(), Value::Bool(true));
    selection.insert(
        RESIDENT_KEY.to_string(),
        Value::String(RESIDENT_KEY_PREFERENCE.to_string()),
    );

    let public_key = serde_json::to_string(&envelope.public_key)?;
    Ok(CreatePublicKeyCredentialRequest::new(public_key))
}

/// Parses an authentication challenge and re-serializes the inner object
/// into the platform request. Pure pass-through, no field is modified.
pub fn build_authentication_request(request_json: &str) -> crate::Result<GetCredentialRequest> {
    let envelope: AuthenticationChallenge = serde_json::from_str(request_json)?;

    let public_key = serde_json::to_string(&envelope.public_key)?;
    Ok(GetCredentialRequest::new(GetPublicKeyCredentialOption::new(
        public_key,
    )))
}

/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::sync::mpsc::channel;

use assert_matches::assert_matches;
use serde_json::Value;

use crate::credential::{CreateCredentialResponse, Credential, GetCredentialResponse};
use crate::errors::PasskeyError;
use crate::transport::CredentialException;
use crate::virtualprovider::VirtualProvider;
use crate::PasskeyManager;

mod common;

const REGISTRATION_CHALLENGE: &str = r#"{
  "publicKey": {
    "rp": {"id": "example.com", "name": "Example"},
    "user": {"id": "dXNlci1pZA", "name": "j.doe", "displayName": "Jane Doe"},
    "challenge": "Y2hhbGxlbmdl",
    "pubKeyCredParams": [{"type": "public-key", "alg": -7}],
    "timeout": 60000,
    "attestation": "none",
    "excludeCredentials": [],
    "authenticatorSelection": {"userVerification": "required"}
  }
}"#;

const AUTHENTICATION_CHALLENGE: &str = r#"{
  "publicKey": {
    "rpId": "example.com",
    "challenge": "Y2hhbGxlbmdl",
    "timeout": 60000,
    "userVerification": "required",
    "allowCredentials": []
  }
}"#;

#[test]
fn test_register_delivers_the_platform_json() {
    common::setup();

    let mut provider = VirtualProvider::new();
    provider.push_create_outcome(Ok(CreateCredentialResponse::PublicKey {
        registration_response_json: r#"{"id":"new-credential"}"#.to_string(),
    }));
    let log = provider.request_log();

    let manager = PasskeyManager::new(Box::new(provider)).unwrap();
    let (tx, rx) = channel();
    manager.register_passkey(REGISTRATION_CHALLENGE, move |rv| {
        tx.send(rv).unwrap();
    });

    let result = rx.recv().unwrap();
    assert_eq!(result.unwrap(), r#"{"id":"new-credential"}"#);

    // The platform saw the translated challenge, resident key forced.
    let requests = log.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let sent: Value = serde_json::from_str(&requests[0]).unwrap();
    assert_eq!(
        sent["authenticatorSelection"]["requireResidentKey"],
        Value::Bool(true)
    );
    assert_eq!(sent["authenticatorSelection"]["residentKey"], "preferred");
    assert_eq!(sent["rp"]["id"], "example.com");
}

#[test]
fn test_register_parse_failure_never_reaches_the_platform() {
    common::setup();

    let provider = VirtualProvider::new();
    let log = provider.request_log();

    let manager = PasskeyManager::new(Box::new(provider)).unwrap();
    let (tx, rx) = channel();
    manager.register_passkey("{\"publicKey\": {", move |rv| {
        tx.send(rv).unwrap();
    });

    let result = rx.recv().unwrap();
    assert_matches!(result, Err(PasskeyError::Parse(_)));
    assert!(rx.try_recv().is_err());
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn test_register_rejects_a_non_passkey_creation_result() {
    common::setup();

    let mut provider = VirtualProvider::new();
    provider.push_create_outcome(Ok(CreateCredentialResponse::Other {
        credential_type: "androidx.credentials.CreatePasswordResponse".to_string(),
    }));

    let manager = PasskeyManager::new(Box::new(provider)).unwrap();
    let (tx, rx) = channel();
    manager.register_passkey(REGISTRATION_CHALLENGE, move |rv| {
        tx.send(rv).unwrap();
    });

    let err = rx.recv().unwrap().unwrap_err();
    assert_matches!(err, PasskeyError::UnexpectedCredential(_));
    assert!(err
        .to_string()
        .contains("androidx.credentials.CreatePasswordResponse"));
}

#[test]
fn test_authenticate_delivers_the_assertion_json() {
    common::setup();

    let mut provider = VirtualProvider::new();
    provider.push_get_outcome(Ok(GetCredentialResponse {
        credential: Credential::PublicKey {
            authentication_response_json: r#"{"id":"cred","response":{}}"#.to_string(),
        },
    }));
    let log = provider.request_log();

    let manager = PasskeyManager::new(Box::new(provider)).unwrap();
    let (tx, rx) = channel();
    manager.authenticate_passkey(AUTHENTICATION_CHALLENGE, move |rv| {
        tx.send(rv).unwrap();
    });

    let result = rx.recv().unwrap();
    assert_eq!(result.unwrap(), r#"{"id":"cred","response":{}}"#);

    // Authentication is a pure pass-through.
    let requests = log.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let sent: Value = serde_json::from_str(&requests[0]).unwrap();
    let expected: Value = serde_json::from_str(AUTHENTICATION_CHALLENGE).unwrap();
    assert_eq!(sent, expected["publicKey"]);
}

#[test]
fn test_authenticate_rejects_a_password_credential() {
    common::setup();

    let mut provider = VirtualProvider::new();
    provider.push_get_outcome(Ok(GetCredentialResponse {
        credential: Credential::Password {
            id: "j.doe".to_string(),
            password: "hunter2".to_string(),
        },
    }));

    let manager = PasskeyManager::new(Box::new(provider)).unwrap();
    let (tx, rx) = channel();
    manager.authenticate_passkey(AUTHENTICATION_CHALLENGE, move |rv| {
        tx.send(rv).unwrap();
    });

    let err = rx.recv().unwrap().unwrap_err();
    assert!(err.to_string().contains("PasswordCredential not supported"));
}

#[test]
fn test_platform_exceptions_reach_the_error_callback() {
    common::setup();

    let mut provider = VirtualProvider::new();
    provider.push_get_outcome(Err(CredentialException::Cancelled(
        "user closed the sheet".to_string(),
    )));

    let manager = PasskeyManager::new(Box::new(provider)).unwrap();
    let (tx, rx) = channel();
    manager.authenticate_passkey(AUTHENTICATION_CHALLENGE, move |rv| {
        tx.send(rv).unwrap();
    });

    let err = rx.recv().unwrap().unwrap_err();
    assert_matches!(err, PasskeyError::Cancelled(_));
    assert!(err.to_string().contains("user closed the sheet"));
}

#[test]
fn test_two_requests_share_the_queue_without_crossing() {
    common::setup();

    let mut provider = VirtualProvider::new();
    provider.push_create_outcome(Ok(CreateCredentialResponse::PublicKey {
        registration_response_json: r#"{"id":"first"}"#.to_string(),
    }));
    provider.push_create_outcome(Ok(CreateCredentialResponse::PublicKey {
        registration_response_json: r#"{"id":"second"}"#.to_string(),
    }));

    let manager = PasskeyManager::new(Box::new(provider)).unwrap();
    let (tx_a, rx_a) = channel();
    manager.register_passkey(REGISTRATION_CHALLENGE, move |rv| {
        tx_a.send(rv).unwrap();
    });
    let (tx_b, rx_b) = channel();
    manager.register_passkey(REGISTRATION_CHALLENGE, move |rv| {
        tx_b.send(rv).unwrap();
    });

    assert_eq!(rx_a.recv().unwrap().unwrap(), r#"{"id":"first"}"#);
    assert_eq!(rx_b.recv().unwrap().unwrap(), r#"{"id":"second"}"#);
}

#[test]
fn test_retryable_failures_are_not_retried() {
    common::setup();

    let mut provider = VirtualProvider::new();
    provider.push_get_outcome(Err(CredentialException::Interrupted(
        "provider restarted".to_string(),
    )));

    let manager = PasskeyManager::new(Box::new(provider)).unwrap();
    let (tx, rx) = channel();
    manager.authenticate_passkey(AUTHENTICATION_CHALLENGE, move |rv| {
        tx.send(rv).unwrap();
    });

    // No retry happens for retryable kinds; the error comes straight back.
    let err = rx.recv().unwrap().unwrap_err();
    assert_matches!(err, PasskeyError::Interrupted(_));
    assert!(rx.recv().is_err());
}

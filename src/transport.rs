/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::credential::{
    CreateCredentialResponse, CreatePublicKeyCredentialRequest, GetCredentialRequest,
    GetCredentialResponse,
};

/// Failure kinds a platform credential service reports, flattened into an
/// enum so the normalizer can match on them. Every variant carries the
/// platform's own message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialException {
    /// WebAuthn-spec failure, e.g. an excluded credential already exists
    /// on the local device.
    Dom(String),
    /// The user chose not to complete the ceremony.
    Cancelled(String),
    /// Transient failure; the platform considers the call retryable.
    Interrupted(String),
    /// The provider dependency is missing or misconfigured on the host.
    ProviderConfiguration(String),
    /// The platform could not classify the failure.
    Unknown(String),
    /// Raised by a third-party credential provider.
    Custom(String),
    /// Anything outside the platform taxonomy.
    Other { class_name: String, message: String },
}

/// Per-call abort handle handed to the transport alongside the request.
/// The manager creates a fresh one for every dispatched call and never
/// triggers it; transports may poll it while waiting on the platform.
#[derive(Clone, Debug, Default)]
pub struct CancellationSignal {
    cancelled: Arc<AtomicBool>,
}

impl CancellationSignal {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Boundary to the host platform's credential service. Implementations run
/// on the manager's worker queue and may block until the platform ceremony
/// completes; the invoking thread is never the caller's.
pub trait CredentialTransport {
    fn create_credential(
        &mut self,
        request: &CreatePublicKeyCredentialRequest,
        cancel: &CancellationSignal,
    ) -> Result<CreateCredentialResponse, CredentialException>;

    fn get_credential(
        &mut self,
        request: &GetCredentialRequest,
        cancel: &CancellationSignal,
    ) -> Result<GetCredentialResponse, CredentialException>;
}

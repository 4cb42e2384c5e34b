/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! In-process stand-in for the platform credential service. Replays
//! scripted outcomes and records every request JSON it receives, so
//! integrations can be exercised without a host platform.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::credential::{
    CreateCredentialResponse, CreatePublicKeyCredentialRequest, GetCredentialRequest,
    GetCredentialResponse,
};
use crate::transport::{CancellationSignal, CredentialException, CredentialTransport};

type Outcome<T> = Result<T, CredentialException>;

#[derive(Default)]
pub struct VirtualProvider {
    create_outcomes: VecDeque<Outcome<CreateCredentialResponse>>,
    get_outcomes: VecDeque<Outcome<GetCredentialResponse>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl VirtualProvider {
    pub fn new() -> Self {
        Default::default()
    }

    /// Queues the outcome of the next create ceremony.
    pub fn push_create_outcome(&mut self, outcome: Outcome<CreateCredentialResponse>) {
        self.create_outcomes.push_back(outcome);
    }

    /// Queues the outcome of the next get ceremony.
    pub fn push_get_outcome(&mut self, outcome: Outcome<GetCredentialResponse>) {
        self.get_outcomes.push_back(outcome);
    }

    /// Shared handle to the request JSON log, in arrival order. Survives
    /// the provider moving onto the manager's worker thread.
    pub fn request_log(&self) -> Arc<Mutex<Vec<String>>> {
        self.requests.clone()
    }
}

impl CredentialTransport for VirtualProvider {
    fn create_credential(
        &mut self,
        request: &CreatePublicKeyCredentialRequest,
        _cancel: &CancellationSignal,
    ) -> Result<CreateCredentialResponse, CredentialException> {
        self.requests
            .lock()
            .unwrap()
            .push(request.request_json().to_string());
        self.create_outcomes.pop_front().unwrap_or_else(|| {
            Err(CredentialException::Unknown(
                "no scripted create outcome".to_string(),
            ))
        })
    }

    fn get_credential(
        &mut self,
        request: &GetCredentialRequest,
        _cancel: &CancellationSignal,
    ) -> Result<GetCredentialResponse, CredentialException> {
        let mut requests = self.requests.lock().unwrap();
        for option in request.options() {
            requests.push(option.request_json().to_string());
        }
        drop(requests);
        self.get_outcomes.pop_front().unwrap_or_else(|| {
            Err(CredentialException::Unknown(
                "no scripted get outcome".to_string(),
            ))
        })
    }
}

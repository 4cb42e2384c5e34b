/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::io;
use std::sync::mpsc::{channel, RecvTimeoutError, Sender};
use std::time::Duration;

use runloop::RunLoop;

use crate::challenge;
use crate::credential::{self, CreatePublicKeyCredentialRequest, GetCredentialRequest};
use crate::errors::PasskeyError;
use crate::statecallback::StateCallback;
use crate::transport::{CancellationSignal, CredentialTransport};

enum QueueAction {
    Register {
        request: CreatePublicKeyCredentialRequest,
        callback: StateCallback<crate::Result<String>>,
    },
    Sign {
        request: GetCredentialRequest,
        callback: StateCallback<crate::Result<String>>,
    },
}

/// Callback-based entry point for passkey ceremonies. Owns the single
/// worker queue on which every platform call for this instance runs, so
/// the calling thread (typically a UI thread) never blocks.
///
/// Calls are independent: two concurrent invocations issue two platform
/// calls on the same queue, in whatever order the queue drains them.
pub struct PasskeyManager {
    queue: RunLoop,
    tx: Sender<QueueAction>,
}

impl PasskeyManager {
    /// Spawns the worker queue. The transport moves onto the worker thread
    /// and stays there for the lifetime of the manager.
    pub fn new(transport: Box<dyn CredentialTransport + Send>) -> io::Result<Self> {
        let (tx, rx) = channel();

        // Start a new work queue thread.
        let queue = RunLoop::new(move |alive| {
            let mut transport = transport;

            while alive() {
                match rx.recv_timeout(Duration::from_millis(50)) {
                    Ok(QueueAction::Register { request, callback }) => {
                        debug!("running create ceremony on the worker queue");
                        let cancel = CancellationSignal::new();
                        let result = transport
                            .create_credential(&request, &cancel)
                            .map_err(PasskeyError::from)
                            .and_then(credential::handle_create_result);
                        callback.callback(result);
                    }
                    Ok(QueueAction::Sign { request, callback }) => {
                        debug!("running get ceremony on the worker queue");
                        let cancel = CancellationSignal::new();
                        let result = transport
                            .get_credential(&request, &cancel)
                            .map_err(PasskeyError::from)
                            .and_then(credential::handle_get_result);
                        callback.callback(result);
                    }
                    Err(RecvTimeoutError::Disconnected) => {
                        break;
                    }
                    _ => { /* continue */ }
                }
            }
        })?;

        Ok(Self { queue, tx })
    }

    /// Registers a passkey for the challenge in `request_json`. On success
    /// the callback receives the platform's registration response JSON,
    /// ready to forward to the relying party.
    ///
    /// The callback fires exactly once. Parse failures are reported
    /// through it before anything reaches the platform.
    pub fn register_passkey<F>(&self, request_json: &str, callback: F)
    where
        F: FnOnce(crate::Result<String>),
        F: Send + 'static,
    {
        let callback = StateCallback::new(Box::new(callback));

        let request = match challenge::build_registration_request(request_json) {
            Ok(request) => request,
            Err(e) => {
                callback.callback(Err(e));
                return;
            }
        };

        self.dispatch(
            QueueAction::Register {
                request,
                callback: callback.clone(),
            },
            callback,
        );
    }

    /// Requests a passkey assertion for the challenge in `request_json`.
    /// On success the callback receives the platform's authentication
    /// response JSON. Same callback contract as [`register_passkey`].
    ///
    /// [`register_passkey`]: PasskeyManager::register_passkey
    pub fn authenticate_passkey<F>(&self, request_json: &str, callback: F)
    where
        F: FnOnce(crate::Result<String>),
        F: Send + 'static,
    {
        let callback = StateCallback::new(Box::new(callback));

        let request = match challenge::build_authentication_request(request_json) {
            Ok(request) => request,
            Err(e) => {
                callback.callback(Err(e));
                return;
            }
        };

        self.dispatch(
            QueueAction::Sign {
                request,
                callback: callback.clone(),
            },
            callback,
        );
    }

    fn dispatch(&self, action: QueueAction, callback: StateCallback<crate::Result<String>>) {
        if self.tx.send(action).is_err() {
            error!("worker queue is gone, failing the request");
            callback.callback(Err(PasskeyError::Unknown(
                "worker queue is gone".to_string(),
            )));
        }
    }
}

impl Drop for PasskeyManager {
    fn drop(&mut self) {
        self.queue.cancel();
    }
}

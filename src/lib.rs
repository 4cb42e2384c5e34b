/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

#[macro_use]
extern crate log;

pub mod challenge;
pub mod credential;
pub mod errors;
mod manager;
mod statecallback;
pub mod transport;
pub mod virtualprovider;

#[cfg(test)]
mod tests;

pub use crate::errors::{PasskeyError, Result};
pub use crate::manager::PasskeyManager;
pub use crate::statecallback::StateCallback;
pub use crate::transport::{CancellationSignal, CredentialException, CredentialTransport};

/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::sync::{Arc, Mutex};

/// Wraps the caller-supplied completion callback so it can be shared with
/// the worker queue while still firing at most once. Clones share the same
/// slot; whichever side delivers first wins, later attempts are dropped.
pub struct StateCallback<T> {
    callback: Arc<Mutex<Option<Box<dyn FnOnce(T) + Send>>>>,
}

impl<T> StateCallback<T> {
    pub fn new(cb: Box<dyn FnOnce(T) + Send>) -> Self {
        Self {
            callback: Arc::new(Mutex::new(Some(cb))),
        }
    }

    pub fn callback(&self, state: T) {
        if let Some(cb) = self.callback.lock().unwrap().take() {
            cb(state);
        } else {
            warn!("state callback was already delivered");
        }
    }
}

impl<T> Clone for StateCallback<T> {
    fn clone(&self) -> Self {
        Self {
            callback: self.callback.clone(),
        }
    }
}

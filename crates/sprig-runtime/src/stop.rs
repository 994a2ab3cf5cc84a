// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Cooperative stop flag with an interruptible sleep.

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug)]
struct Inner {
    running: AtomicBool,
    interrupt_tx: Sender<()>,
    interrupt_rx: Receiver<()>,
}

/// The session's `running` flag.
///
/// Goes from running to stopped exactly once. Stopping also wakes a thread
/// blocked in [`sleep`](Self::sleep). Clones share the same flag.
#[derive(Debug, Clone)]
pub struct StopSignal {
    inner: Arc<Inner>,
}

impl StopSignal {
    /// Creates a signal in the running state.
    pub fn new() -> Self {
        let (interrupt_tx, interrupt_rx) = crossbeam_channel::bounded(1);
        Self {
            inner: Arc::new(Inner {
                running: AtomicBool::new(true),
                interrupt_tx,
                interrupt_rx,
            }),
        }
    }

    /// `true` until the first stop request.
    pub fn is_running(&self) -> bool {
        self.inner.running.load(Ordering::Acquire)
    }

    /// Requests a stop. Returns `true` for the request that actually stopped
    /// the session; later calls are no-ops.
    pub fn request_stop(&self) -> bool {
        if self.inner.running.swap(false, Ordering::AcqRel) {
            let _ = self.inner.interrupt_tx.try_send(());
            log::debug!("Stop requested");
            true
        } else {
            false
        }
    }

    /// Sleeps for `duration` unless a stop arrives first.
    ///
    /// Returns `true` if the sleep was cut short by a stop.
    pub fn sleep(&self, duration: Duration) -> bool {
        if !self.is_running() {
            return true;
        }
        match self.inner.interrupt_rx.recv_timeout(duration) {
            Ok(()) => true,
            Err(RecvTimeoutError::Timeout) => !self.is_running(),
            Err(RecvTimeoutError::Disconnected) => true,
        }
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}

//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//


//! Read observers and the profile ledger

use std::collections::HashMap;
use std::time::Duration;

/// Diagnostic hook notified for every chunk a read primitive receives.
///
/// Observers see the data but cannot influence the read. Any closure with the matching
/// signature is an observer:
///
/// ```
/// use telnetio_client::{ClientConfig, TelnetClient};
///
/// let mut client = TelnetClient::new(ClientConfig::new("localhost", 23));
/// client.add_observer(|operation: &str, counter: usize, chunk: &[u8], total: usize, elapsed: f64| {
///     eprintln!("{operation}#{counter}: {} bytes ({total} total) in {elapsed:.3}s", chunk.len());
/// });
/// ```
pub trait ReadObserver: Send {
    /// Called after each chunk.
    ///
    /// * `operation` - name of the read primitive
    /// * `counter` - 1-based chunk number within this call
    /// * `chunk` - bytes just read
    /// * `total` - bytes read so far by this call
    /// * `elapsed` - seconds spent waiting for this chunk
    fn on_read(&mut self, operation: &str, counter: usize, chunk: &[u8], total: usize, elapsed: f64);
}

impl<F> ReadObserver for F
where
    F: FnMut(&str, usize, &[u8], usize, f64) + Send,
{
    fn on_read(&mut self, operation: &str, counter: usize, chunk: &[u8], total: usize, elapsed: f64) {
        self(operation, counter, chunk, total, elapsed);
    }
}

pub(crate) fn notify(
    observers: &mut [Box<dyn ReadObserver>],
    operation: &str,
    counter: usize,
    chunk: &[u8],
    total: usize,
    elapsed: Duration,
) {
    for observer in observers.iter_mut() {
        observer.on_read(operation, counter, chunk, total, elapsed.as_secs_f64());
    }
}

/// Elapsed time of the most recent call of each read operation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileLedger {
    entries: HashMap<String, Duration>,
}

impl ProfileLedger {
    /// Record `elapsed` as the latest timing for `operation`.
    pub fn record(&mut self, operation: &str, elapsed: Duration) {
        self.entries.insert(operation.to_string(), elapsed);
    }

    /// Latest timing for `operation`, in seconds.
    pub fn seconds(&self, operation: &str) -> Option<f64> {
        self.entries.get(operation).map(Duration::as_secs_f64)
    }

    /// Latest timing for `operation`.
    pub fn get(&self, operation: &str) -> Option<Duration> {
        self.entries.get(operation).copied()
    }

    /// Operations and their latest timings.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Duration)> {
        self.entries.iter().map(|(name, elapsed)| (name.as_str(), *elapsed))
    }

    /// Number of profiled operations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been profiled.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget all timings.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

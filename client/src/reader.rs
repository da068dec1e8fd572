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


//! Buffered read primitives
//!
//! Every primitive starts by checking the session is live and clearing the read buffer, and
//! ends by storing what it read as the new read buffer (and in the read history when auto
//! stacking is on). Blocking primitives wait at most the I/O timeout per underlying read, so
//! a call made of several reads can take several timeouts in total.

use crate::observer::notify;
use crate::transport::is_idle;
use crate::{ClientError, ConnectionState, Result, TelnetClient, Transport};
use bytes::BytesMut;
use regex::bytes::Regex;
use std::io;
use std::time::Instant;
use tracing::{debug, trace, warn};

/// Largest chunk requested from the transport in a single read.
const READ_CHUNK: usize = 4096;

/// How a `read_until` style call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStatus {
    /// The literal or pattern matched; the buffer ends at the match.
    Success,
    /// Nothing arrived within the I/O timeout.
    Timeout,
    /// The read bound was reached or the stream ended without a match.
    NoMatchFound,
}

/// Outcome of one transport read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Fetched {
    Data(usize),
    Idle,
    Closed,
}

impl<T: Transport> TelnetClient<T> {
    /// Read a single byte.
    ///
    /// Returns `None` when nothing arrives within the I/O timeout or the stream ends.
    pub fn read_char(&mut self) -> Result<Option<u8>> {
        self.pre_read()?;
        let started = Instant::now();
        let byte = match self.fetch(1) {
            Fetched::Data(_) => {
                notify(
                    &mut self.observers,
                    "read_char",
                    1,
                    &self.read_buffer,
                    1,
                    started.elapsed(),
                );
                self.read_buffer.last().copied()
            }
            Fetched::Idle => {
                self.mark_timed_out();
                None
            }
            Fetched::Closed => None,
        };
        self.post_read("read_char", started);
        Ok(byte)
    }

    /// Read until `count` bytes arrived, the stream ended or a read timed out.
    ///
    /// A short buffer is returned as is; getting no bytes at all is
    /// [`ClientError::EndOfStream`].
    pub fn read_bytes(&mut self, count: usize) -> Result<BytesMut> {
        self.pre_read()?;
        let started = Instant::now();
        let mut counter = 0;
        while self.read_buffer.len() < count {
            let waited = Instant::now();
            let before = self.read_buffer.len();
            match self.fetch(count - before) {
                Fetched::Data(_) => {
                    counter += 1;
                    notify(
                        &mut self.observers,
                        "read_bytes",
                        counter,
                        &self.read_buffer[before..],
                        self.read_buffer.len(),
                        waited.elapsed(),
                    );
                }
                Fetched::Idle => {
                    self.mark_timed_out();
                    break;
                }
                Fetched::Closed => break,
            }
        }
        let buffer = self.post_read("read_bytes", started);
        if count > 0 && buffer.is_empty() {
            return Err(ClientError::EndOfStream);
        }
        Ok(buffer)
    }

    /// Read one byte at a time until the buffer ends with `literal`.
    ///
    /// The trailing window is only compared when the newest byte equals the last byte of
    /// `literal`. Reading stops after `max_bytes` bytes; 0 falls back to the configured
    /// `max_read_bytes`, where 0 means unbounded. Unread bytes after the match stay in the
    /// stream.
    ///
    /// With `strict` set, any outcome other than [`ReadStatus::Success`] is returned as
    /// [`ClientError::NoMatchFound`] instead of a status. The partial buffer is available
    /// from [`read_buffer`](TelnetClient::read_buffer) either way.
    pub fn read_until(
        &mut self,
        literal: &[u8],
        max_bytes: usize,
        strict: bool,
    ) -> Result<(BytesMut, ReadStatus)> {
        let Some(&last) = literal.last() else {
            return Err(ClientError::Configuration(
                "read_until needs a non-empty literal".to_string(),
            ));
        };
        self.pre_read()?;
        let started = Instant::now();
        let limit = self.read_limit(max_bytes);
        let status = self.scan("read_until", limit, |buffer| {
            buffer.last() == Some(&last) && buffer.ends_with(literal)
        });
        let buffer = self.post_read("read_until", started);
        debug!(?status, bytes = buffer.len(), "read_until finished");
        settle(buffer, status, strict, || {
            String::from_utf8_lossy(literal).into_owned()
        })
    }

    /// Like [`read_until`](TelnetClient::read_until) but stops once the whole buffer matches
    /// the regular expression `pattern`.
    ///
    /// The pattern is re-run over the entire buffer after every byte, which is much slower
    /// than a literal. Use it only for markers a literal cannot describe, such as prompts with
    /// a variable suffix.
    pub fn read_until_pattern(
        &mut self,
        pattern: &str,
        max_bytes: usize,
        strict: bool,
    ) -> Result<(BytesMut, ReadStatus)> {
        let regex = Regex::new(pattern).map_err(|error| {
            ClientError::Configuration(format!("invalid pattern {pattern:?}: {error}"))
        })?;
        self.pre_read()?;
        let started = Instant::now();
        let limit = self.read_limit(max_bytes);
        let status = self.scan("read_until_pattern", limit, |buffer| regex.is_match(buffer));
        let buffer = self.post_read("read_until_pattern", started);
        debug!(?status, bytes = buffer.len(), "read_until_pattern finished");
        settle(buffer, status, strict, || pattern.to_string())
    }

    /// Drain whatever is pending without waiting.
    ///
    /// Never fails; an empty buffer means nothing was pending or there is no session.
    pub fn read_all_available(&mut self) -> BytesMut {
        let started = Instant::now();
        self.read_buffer.clear();
        let Some(transport) = self.transport.as_mut() else {
            return self.post_read("read_all_available", started);
        };
        if let Err(error) = transport.set_nonblocking(true) {
            warn!(%error, "Unable to switch to non-blocking reads");
            return self.post_read("read_all_available", started);
        }

        let mut counter = 0;
        loop {
            let waited = Instant::now();
            let before = self.read_buffer.len();
            match self.fetch(READ_CHUNK) {
                Fetched::Data(_) => {
                    counter += 1;
                    notify(
                        &mut self.observers,
                        "read_all_available",
                        counter,
                        &self.read_buffer[before..],
                        self.read_buffer.len(),
                        waited.elapsed(),
                    );
                }
                Fetched::Idle | Fetched::Closed => break,
            }
        }

        if let Some(transport) = self.transport.as_mut() {
            if let Err(error) = transport.set_nonblocking(false) {
                warn!(%error, "Unable to restore blocking reads");
            }
        }
        self.post_read("read_all_available", started)
    }

    fn pre_read(&mut self) -> Result<()> {
        if self.state != ConnectionState::Connected || self.transport.is_none() {
            return Err(ClientError::ConnectionLost);
        }
        self.read_buffer.clear();
        Ok(())
    }

    fn post_read(&mut self, operation: &str, started: Instant) -> BytesMut {
        if self.settings.profiling {
            self.profile.record(operation, started.elapsed());
        }
        if self.settings.auto_stack {
            self.read_history.push(self.read_buffer.clone());
        }
        self.read_buffer.clone()
    }

    fn read_limit(&self, max_bytes: usize) -> usize {
        if max_bytes == 0 {
            self.settings.max_read_bytes
        } else {
            max_bytes
        }
    }

    fn mark_timed_out(&mut self) {
        if self.transport.is_some() {
            debug!(timeout = ?self.settings.io_timeout, "Read timed out");
            self.state = ConnectionState::TimedOut;
        }
    }

    /// Byte-at-a-time loop shared by the `read_until` family.
    fn scan<F>(&mut self, operation: &str, limit: usize, mut matched: F) -> ReadStatus
    where
        F: FnMut(&[u8]) -> bool,
    {
        let mut counter = 0;
        loop {
            let waited = Instant::now();
            match self.fetch(1) {
                Fetched::Data(_) => {
                    counter += 1;
                    let total = self.read_buffer.len();
                    if !self.observers.is_empty() {
                        notify(
                            &mut self.observers,
                            operation,
                            counter,
                            &self.read_buffer[total - 1..],
                            total,
                            waited.elapsed(),
                        );
                    }
                    if matched(&self.read_buffer[..]) {
                        return ReadStatus::Success;
                    }
                    if limit > 0 && total >= limit {
                        return ReadStatus::NoMatchFound;
                    }
                }
                Fetched::Idle => {
                    self.mark_timed_out();
                    return ReadStatus::Timeout;
                }
                Fetched::Closed => return ReadStatus::NoMatchFound,
            }
        }
    }

    /// Read up to `limit` bytes from the transport, appending them to the read buffer.
    ///
    /// A closed or failed stream drops the transport and leaves the client disconnected.
    pub(crate) fn fetch(&mut self, limit: usize) -> Fetched {
        let Some(transport) = self.transport.as_mut() else {
            return Fetched::Closed;
        };
        let start = self.read_buffer.len();
        self.read_buffer.resize(start + limit.clamp(1, READ_CHUNK), 0);
        let outcome = loop {
            match transport.read(&mut self.read_buffer[start..]) {
                Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
                outcome => break outcome,
            }
        };
        match outcome {
            Ok(0) => {
                self.read_buffer.truncate(start);
                debug!("End of stream");
                self.drop_transport();
                Fetched::Closed
            }
            Ok(count) => {
                self.read_buffer.truncate(start + count);
                trace!(count, "Read");
                Fetched::Data(count)
            }
            Err(error) if is_idle(&error) => {
                self.read_buffer.truncate(start);
                Fetched::Idle
            }
            Err(error) => {
                self.read_buffer.truncate(start);
                warn!(%error, "Read failed");
                self.drop_transport();
                Fetched::Closed
            }
        }
    }
}

fn settle(
    buffer: BytesMut,
    status: ReadStatus,
    strict: bool,
    expected: impl FnOnce() -> String,
) -> Result<(BytesMut, ReadStatus)> {
    if strict && status != ReadStatus::Success {
        return Err(ClientError::NoMatchFound {
            expected: expected(),
            received: String::from_utf8_lossy(&buffer).into_owned(),
        });
    }
    Ok((buffer, status))
}

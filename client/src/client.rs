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


//! Telnet client state

use crate::observer::{ProfileLedger, ReadObserver};
use crate::{ClientConfig, Transport};
use bytes::BytesMut;
use std::net::TcpStream;
use telnetio_codec::TelnetCodec;
use tracing::trace;

/// Connection state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No stream is open
    Disconnected,
    /// Stream open and answering
    Connected,
    /// Stream open but the last blocking read got no data within the I/O timeout.
    ///
    /// Reads and writes are refused until a successful
    /// [`is_connected(true)`](TelnetClient::is_connected) poke.
    TimedOut,
}

/// Blocking Telnet client.
///
/// One client drives one remote session over a [`Transport`], a TCP stream unless another
/// transport is [attached](TelnetClient::attach).
pub struct TelnetClient<T: Transport = TcpStream> {
    /// Pending configuration, applied by the next connect
    pub(crate) config: ClientConfig,
    /// Configuration of the open session
    pub(crate) settings: ClientConfig,
    pub(crate) transport: Option<T>,
    pub(crate) state: ConnectionState,
    pub(crate) codec: TelnetCodec,
    pub(crate) read_buffer: BytesMut,
    pub(crate) read_history: Vec<BytesMut>,
    pub(crate) profile: ProfileLedger,
    pub(crate) observers: Vec<Box<dyn ReadObserver>>,
}

impl TelnetClient {
    /// Create a disconnected TCP client.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_config(config)
    }
}

impl<T: Transport> TelnetClient<T> {
    /// Create a disconnected client for any transport.
    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            settings: config.clone(),
            config,
            transport: None,
            state: ConnectionState::Disconnected,
            codec: TelnetCodec::new(),
            read_buffer: BytesMut::new(),
            read_history: Vec::new(),
            profile: ProfileLedger::default(),
            observers: Vec::new(),
        }
    }

    /// Configuration used by the next connect.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Edit the configuration; changes will not affect the current connection.
    pub fn config_mut(&mut self) -> &mut ClientConfig {
        &mut self.config
    }

    /// Configuration of the current (or most recent) session.
    pub fn settings(&self) -> &ClientConfig {
        &self.settings
    }

    /// Current connection state.
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Whether the last blocking read ran into the I/O timeout.
    pub fn is_timed_out(&self) -> bool {
        self.state == ConnectionState::TimedOut
    }

    /// Bytes produced by the most recent read.
    pub fn read_buffer(&self) -> &[u8] {
        &self.read_buffer
    }

    /// Every read buffer captured while auto stacking was on, oldest first.
    pub fn read_history(&self) -> &[BytesMut] {
        &self.read_history
    }

    /// Forget the read history.
    pub fn clear_read_history(&mut self) {
        self.read_history.clear();
    }

    /// Turn read history stacking on or off, for this session and the next.
    pub fn set_auto_stack(&mut self, enabled: bool) {
        self.config.auto_stack = enabled;
        self.settings.auto_stack = enabled;
    }

    /// Whether reads are added to the read history.
    pub fn auto_stack(&self) -> bool {
        self.settings.auto_stack
    }

    /// Timings of the most recent call of each read operation.
    ///
    /// Empty unless profiling is enabled; cleared on connect and disconnect.
    pub fn profile(&self) -> &ProfileLedger {
        &self.profile
    }

    /// Register an observer notified of every chunk read.
    pub fn add_observer(&mut self, observer: impl ReadObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Remove every registered observer.
    pub fn clear_observers(&mut self) {
        self.observers.clear();
    }

    /// Sleep for the pacing delay so the remote can respond.
    pub(crate) fn pace(&self) {
        if !self.settings.command_delay.is_zero() {
            trace!(delay = ?self.settings.command_delay, "pacing");
            std::thread::sleep(self.settings.command_delay);
        }
    }

    /// Start a session: take a snapshot of the configuration and drop per-session data.
    pub(crate) fn reset_session(&mut self) {
        self.settings = self.config.clone();
        self.codec = TelnetCodec::new();
        self.read_buffer.clear();
        self.read_history.clear();
        self.profile.clear();
    }
}

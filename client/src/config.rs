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


//! Client configuration

use crate::{ClientError, Result};
use std::time::Duration;
use telnetio_codec::{HandshakeParams, naws::WindowSize};

/// Telnet client configuration
///
/// Settings are read when [`TelnetClient::connect`](crate::TelnetClient::connect) runs; editing
/// them afterwards will not affect the current connection.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Server hostname or IP address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Bound on establishing the TCP connection
    pub connect_timeout: Duration,

    /// Bound on each individual blocking read
    pub io_timeout: Duration,

    /// Pause after each command or negotiation before reading the reply
    pub command_delay: Duration,

    /// Literal that marks the remote shell as ready for the next command
    pub prompt: String,

    /// Literal of a yes/no confirmation prompt
    pub confirm_prompt: String,

    /// Literal of a pagination prompt
    pub page_prompt: String,

    /// Appended to terminated writes
    pub line_terminator: String,

    /// Terminal type to report (e.g., "xterm-256color")
    pub terminal_type: String,

    /// Terminal width in columns
    pub terminal_width: u16,

    /// Terminal height in rows
    pub terminal_height: u16,

    /// Transmit and receive speed reported to the server
    pub terminal_speed: String,

    /// Default read bound for `read_until` style calls; 0 is unbounded
    pub max_read_bytes: usize,

    /// Send the option handshake on connect
    pub handshake: bool,

    /// Keep every read buffer in the read history
    pub auto_stack: bool,

    /// Record elapsed time of read operations
    pub profiling: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 23,
            connect_timeout: Duration::from_secs(10),
            io_timeout: Duration::from_secs(10),
            command_delay: Duration::from_millis(250),
            prompt: "$ ".to_string(),
            confirm_prompt: "[y/n]".to_string(),
            page_prompt: "--More--".to_string(),
            line_terminator: "\r\n".to_string(),
            terminal_type: "dumb".to_string(),
            terminal_width: 80,
            terminal_height: 24,
            terminal_speed: "38400,38400".to_string(),
            max_read_bytes: 0,
            handshake: true,
            auto_stack: false,
            profiling: false,
        }
    }
}

impl ClientConfig {
    /// Create a new client configuration with the given host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Set the connection timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the per-read timeout
    pub fn with_io_timeout(mut self, timeout: Duration) -> Self {
        self.io_timeout = timeout;
        self
    }

    /// Set the pacing delay
    pub fn with_command_delay(mut self, delay: Duration) -> Self {
        self.command_delay = delay;
        self
    }

    /// Set the command prompt literal
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Set the confirmation prompt literal
    pub fn with_confirm_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.confirm_prompt = prompt.into();
        self
    }

    /// Set the pagination prompt literal
    pub fn with_page_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.page_prompt = prompt.into();
        self
    }

    /// Set the line terminator
    pub fn with_line_terminator(mut self, terminator: impl Into<String>) -> Self {
        self.line_terminator = terminator.into();
        self
    }

    /// Set the terminal type
    pub fn with_terminal_type(mut self, terminal_type: impl Into<String>) -> Self {
        self.terminal_type = terminal_type.into();
        self
    }

    /// Set the terminal size
    pub fn with_terminal_size(mut self, width: u16, height: u16) -> Self {
        self.terminal_width = width;
        self.terminal_height = height;
        self
    }

    /// Set the terminal speed
    pub fn with_terminal_speed(mut self, speed: impl Into<String>) -> Self {
        self.terminal_speed = speed.into();
        self
    }

    /// Set the default read bound
    pub fn with_max_read_bytes(mut self, max: usize) -> Self {
        self.max_read_bytes = max;
        self
    }

    /// Enable or suppress the connect handshake
    pub fn with_handshake(mut self, enabled: bool) -> Self {
        self.handshake = enabled;
        self
    }

    /// Enable read history stacking
    pub fn with_auto_stack(mut self, enabled: bool) -> Self {
        self.auto_stack = enabled;
        self
    }

    /// Enable read profiling
    pub fn with_profiling(mut self, enabled: bool) -> Self {
        self.profiling = enabled;
        self
    }

    /// Get the server address as a string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parameters for the connect handshake
    pub fn handshake_params(&self) -> HandshakeParams {
        HandshakeParams {
            window: WindowSize::new(self.terminal_width, self.terminal_height),
            terminal_speed: self.terminal_speed.clone(),
            terminal_type: self.terminal_type.clone(),
        }
    }

    /// Checks the settings a connection cannot work without.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(ClientError::Configuration("host must not be empty".to_string()));
        }
        if self.connect_timeout.is_zero() {
            return Err(ClientError::Configuration(
                "connect timeout must be positive".to_string(),
            ));
        }
        if self.io_timeout.is_zero() {
            return Err(ClientError::Configuration("I/O timeout must be positive".to_string()));
        }
        for (name, literal) in [
            ("prompt", &self.prompt),
            ("confirmation prompt", &self.confirm_prompt),
            ("page prompt", &self.page_prompt),
        ] {
            if literal.is_empty() {
                return Err(ClientError::Configuration(format!("{name} must not be empty")));
            }
        }
        if self.terminal_width == 0 || self.terminal_height == 0 {
            return Err(ClientError::Configuration(
                "terminal dimensions must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("example.org", 2323);
        assert_eq!(config.address(), "example.org:2323");
        assert_eq!(config.io_timeout, Duration::from_secs(10));
        assert_eq!(config.command_delay, Duration::from_millis(250));
        assert_eq!(config.terminal_type, "dumb");
        assert!(config.handshake);
        assert_eq!(ClientConfig::default().port, 23);
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::new("host", 23)
            .with_prompt("# ")
            .with_terminal_size(132, 43)
            .with_handshake(false)
            .with_auto_stack(true);
        assert_eq!(config.prompt, "# ");
        assert_eq!(config.handshake_params().window, WindowSize::new(132, 43));
        assert!(!config.handshake);
        assert!(config.auto_stack);
    }

    #[test]
    fn test_validate() {
        assert!(ClientConfig::new("host", 23).validate().is_ok());
        assert!(matches!(
            ClientConfig::default().validate(),
            Err(ClientError::Configuration(_))
        ));
        assert!(
            ClientConfig::new("host", 23)
                .with_io_timeout(Duration::ZERO)
                .validate()
                .is_err()
        );
        assert!(ClientConfig::new("host", 23).with_prompt("").validate().is_err());
        assert!(
            ClientConfig::new("host", 23)
                .with_terminal_size(0, 24)
                .validate()
                .is_err()
        );
    }
}

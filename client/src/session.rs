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


//! Prompt-synchronized command execution

use crate::{ReadStatus, Result, TelnetClient, Transport};
use bytes::BytesMut;
use telnetio_codec::{TelnetFrame, strip_negotiation};
use tracing::debug;

impl<T: Transport> TelnetClient<T> {
    /// Read until the command prompt.
    pub fn wait_for_prompt(&mut self, strict: bool) -> Result<(BytesMut, ReadStatus)> {
        let prompt = self.settings.prompt.clone();
        self.read_until(prompt.as_bytes(), 0, strict)
    }

    /// Read until the confirmation prompt.
    pub fn wait_for_confirmation(&mut self, strict: bool) -> Result<(BytesMut, ReadStatus)> {
        let prompt = self.settings.confirm_prompt.clone();
        self.read_until(prompt.as_bytes(), 0, strict)
    }

    /// Read until the pagination prompt.
    pub fn wait_for_next_page(&mut self, strict: bool) -> Result<(BytesMut, ReadStatus)> {
        let prompt = self.settings.page_prompt.clone();
        self.read_until(prompt.as_bytes(), 0, strict)
    }

    /// Run `command` and return its output.
    ///
    /// Writes the command line, waits the pacing delay and drains whatever arrived. Protocol
    /// sequences are removed, then the echoed command line and the trailing prompt are
    /// trimmed off. Output still in flight after the delay is not waited for.
    pub fn run_command(&mut self, command: &str) -> Result<String> {
        self.read_buffer.clear();
        self.write(command.as_bytes(), true)?;
        self.pace();
        let raw = self.read_all_available();
        let (output, request) = strip_negotiation(&raw);
        if !request.is_empty() {
            debug!(?request, "Ignoring negotiation in command output");
        }
        let text = String::from_utf8_lossy(&output);
        let result = trim_command_output(&text, command, &self.settings.prompt);
        debug!(command, bytes = raw.len(), "Command finished");
        Ok(result)
    }

    /// Send Are You There.
    pub fn send_are_you_there(&mut self) -> Result<()> {
        self.send_control(TelnetFrame::AreYouThere)
    }

    /// Send Interrupt Process.
    pub fn send_interrupt(&mut self) -> Result<()> {
        self.send_control(TelnetFrame::InterruptProcess)
    }

    /// Send Break.
    pub fn send_break(&mut self) -> Result<()> {
        self.send_control(TelnetFrame::Break)
    }
}

/// Drops the echoed command line and the trailing prompt fragment.
///
/// The prompt fragment is the whole last line when the output ends with the configured
/// prompt, otherwise the last line if it has no line break after it.
fn trim_command_output(output: &str, command: &str, prompt: &str) -> String {
    let command = command.trim();
    let mut body = match output.split_once('\n') {
        Some((first, rest)) if first.trim() == command => rest,
        None if output.trim() == command => "",
        _ => output,
    };
    if let Some(head) = body.strip_suffix(prompt) {
        body = head.rsplit_once('\n').map_or("", |(lines, _)| lines);
    } else if let Some((head, tail)) = body.rsplit_once('\n') {
        if !tail.trim().is_empty() {
            body = head;
        }
    }
    body.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock::MockTransport;
    use crate::{ClientConfig, ClientError};
    use proptest::prelude::*;
    use std::time::Duration;
    use telnetio_codec::consts::{self, IAC, WILL};

    fn connected(inbound: &[u8]) -> (TelnetClient<MockTransport>, MockTransport) {
        let transport = MockTransport::new(inbound);
        let mut client = TelnetClient::with_config(
            ClientConfig::new("localhost", 23)
                .with_handshake(false)
                .with_command_delay(Duration::ZERO)
                .with_confirm_prompt("(yes/no)? "),
        );
        client.attach(transport.clone()).unwrap();
        (client, transport)
    }

    #[test]
    fn test_trim_command_output() {
        assert_eq!(trim_command_output("whoami\r\nroot\r\n$ ", "whoami", "$ "), "root");
        assert_eq!(trim_command_output("whoami\nroot\n$ ", "whoami", "login: "), "root");
        assert_eq!(trim_command_output("root\n", "whoami", "$ "), "root");
        assert_eq!(trim_command_output("whoami\r\n", "whoami", "$ "), "");
        assert_eq!(trim_command_output("whoami", "whoami", "$ "), "");
        assert_eq!(
            trim_command_output("ls\r\na\r\nb\r\nhost:~# ", "ls", "$ "),
            "a\r\nb"
        );
        assert_eq!(
            trim_command_output("whoami\r\nroot\r\nuser@host:~$ ", "whoami", "$ "),
            "root"
        );
        assert_eq!(trim_command_output("whoami\r\nuser@host:~$ ", "whoami", "$ "), "");
    }

    #[test]
    fn test_wait_for_prompts() {
        let (mut client, _transport) = connected(b"Last login\r\n$ Really? (yes/no)? --More--");
        let (buffer, status) = client.wait_for_prompt(true).unwrap();
        assert_eq!(&buffer[..], b"Last login\r\n$ ");
        assert_eq!(status, ReadStatus::Success);
        let (buffer, _) = client.wait_for_confirmation(true).unwrap();
        assert_eq!(&buffer[..], b"Really? (yes/no)? ");
        let (buffer, _) = client.wait_for_next_page(true).unwrap();
        assert_eq!(&buffer[..], b"--More--");
    }

    #[test]
    fn test_wait_for_prompt_strict_times_out() {
        let (mut client, _transport) = connected(b"password: ");
        let err = client.wait_for_prompt(true).unwrap_err();
        assert!(matches!(err, ClientError::NoMatchFound { .. }));
    }

    #[test]
    fn test_run_command() {
        let (mut client, transport) = connected(b"whoami\r\nroot\r\n$ ");
        assert_eq!(client.run_command("whoami").unwrap(), "root");
        assert_eq!(transport.written(), b"whoami\r\n");
    }

    #[test]
    fn test_run_command_drops_full_prompt_line() {
        let (mut client, _transport) = connected(b"whoami\r\nroot\r\nuser@host:~$ ");
        assert_eq!(client.run_command("whoami").unwrap(), "root");
    }

    #[test]
    fn test_run_command_strips_negotiation() {
        let mut inbound = b"uptime\r\n".to_vec();
        inbound.extend_from_slice(&[IAC, WILL, consts::option::ECHO]);
        inbound.extend_from_slice(b" 10:00 up 3 days\r\n$ ");
        let (mut client, _transport) = connected(&inbound);
        assert_eq!(client.run_command("uptime").unwrap(), "10:00 up 3 days");
    }

    #[test]
    fn test_control_commands() {
        let (mut client, transport) = connected(b"");
        client.send_are_you_there().unwrap();
        client.send_interrupt().unwrap();
        client.send_break().unwrap();
        assert_eq!(
            transport.written(),
            vec![IAC, consts::AYT, IAC, consts::IP, IAC, consts::BRK]
        );
    }

    proptest! {
        #[test]
        fn trimmed_output_is_the_body_alone(
            command in "[a-z]{1,8}",
            lines in prop::collection::vec("[a-z0-9 ./-]{0,16}", 0..6),
        ) {
            let body = lines.join("\r\n");
            let output = format!("{command}\r\n{body}\r\nuser@host:~$ ");
            prop_assert_eq!(trim_command_output(&output, &command, "$ "), body.trim());
        }
    }
}

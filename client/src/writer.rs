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


//! Write primitives

use crate::{ClientError, ConnectionState, Result, TelnetClient, Transport};
use bytes::BytesMut;
use telnetio_codec::TelnetFrame;
use tokio_util::codec::Encoder;
use tracing::trace;

impl<T: Transport> TelnetClient<T> {
    /// Write data, doubling every IAC byte so it arrives as data.
    ///
    /// With `terminate` set the configured line terminator is appended.
    pub fn write(&mut self, data: &[u8], terminate: bool) -> Result<()> {
        let mut payload = BytesMut::with_capacity(data.len() + 2);
        self.codec.encode(data, &mut payload)?;
        self.transmit(payload, terminate)
    }

    /// Write bytes verbatim; `data` is expected to hold its own command sequences.
    pub fn write_command(&mut self, data: &[u8], terminate: bool) -> Result<()> {
        self.transmit(BytesMut::from(data), terminate)
    }

    /// Encode and write a single frame.
    pub fn write_frame(&mut self, frame: TelnetFrame) -> Result<()> {
        let mut payload = BytesMut::with_capacity(frame.len());
        self.codec.encode(frame, &mut payload)?;
        self.transmit(payload, false)
    }

    fn transmit(&mut self, mut payload: BytesMut, terminate: bool) -> Result<()> {
        if terminate {
            payload.extend_from_slice(self.settings.line_terminator.as_bytes());
        }
        let transport = self.pre_write()?;
        transport
            .write_all(&payload)
            .and_then(|()| transport.flush())
            .map_err(ClientError::write_failed)?;
        trace!(bytes = payload.len(), "Wrote");
        Ok(())
    }

    /// A write invalidates whatever half-read reply the buffer held.
    fn pre_write(&mut self) -> Result<&mut T> {
        if self.state != ConnectionState::Connected {
            return Err(ClientError::ConnectionLost);
        }
        self.read_buffer.clear();
        self.transport.as_mut().ok_or(ClientError::ConnectionLost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientConfig;
    use crate::transport::mock::MockTransport;
    use telnetio_codec::{TelnetOption, consts};

    fn connected() -> (TelnetClient<MockTransport>, MockTransport) {
        let transport = MockTransport::default();
        let mut client =
            TelnetClient::with_config(ClientConfig::new("localhost", 23).with_handshake(false));
        client.attach(transport.clone()).unwrap();
        (client, transport)
    }

    #[test]
    fn test_write_escapes_iac() {
        let (mut client, transport) = connected();
        client.write(&[b'a', 0xFF, b'b'], false).unwrap();
        assert_eq!(transport.written(), vec![b'a', 0xFF, 0xFF, b'b']);
    }

    #[test]
    fn test_write_appends_terminator() {
        let (mut client, transport) = connected();
        client.write(b"ls -l", true).unwrap();
        assert_eq!(transport.written(), b"ls -l\r\n");
    }

    #[test]
    fn test_write_command_is_verbatim() {
        let (mut client, transport) = connected();
        client
            .write_command(&[consts::IAC, consts::AYT], false)
            .unwrap();
        assert_eq!(transport.written(), vec![consts::IAC, consts::AYT]);
    }

    #[test]
    fn test_write_frame() {
        let (mut client, transport) = connected();
        client.write_frame(TelnetFrame::Wont(TelnetOption::Echo)).unwrap();
        assert_eq!(
            transport.written(),
            vec![consts::IAC, consts::WONT, consts::option::ECHO]
        );
    }

    #[test]
    fn test_write_clears_read_buffer() {
        let transport = MockTransport::new(b"stale");
        let mut client =
            TelnetClient::with_config(ClientConfig::new("localhost", 23).with_handshake(false));
        client.attach(transport).unwrap();
        client.read_bytes(5).unwrap();
        assert_eq!(client.read_buffer(), b"stale");
        client.write(b"x", false).unwrap();
        assert!(client.read_buffer().is_empty());
    }

    #[test]
    fn test_write_failure_reports_code() {
        let (mut client, transport) = connected();
        transport.fail_writes();
        let err = client.write(b"x", true).unwrap_err();
        assert!(matches!(err, ClientError::WriteFailed { .. }));
        assert!(err.is_connection_error());
    }

    #[test]
    fn test_write_requires_connection() {
        let mut client: TelnetClient<MockTransport> =
            TelnetClient::with_config(ClientConfig::new("localhost", 23));
        assert!(matches!(
            client.write(b"x", false),
            Err(ClientError::ConnectionLost)
        ));
    }
}

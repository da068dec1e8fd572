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


//! Connection management

use crate::reader::Fetched;
use crate::{ClientError, ConnectionState, Result, TelnetClient, Transport};
use std::io;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;
use telnetio_codec::{TelnetFrame, consts, handshake_sequence};
use tracing::{debug, info, trace, warn};

impl TelnetClient {
    /// Open a TCP connection to the configured host and run the option handshake.
    ///
    /// Any session that is still open is closed first.
    pub fn connect(&mut self) -> Result<()> {
        self.config.validate()?;
        self.disconnect()?;

        let address = self.config.address();
        info!(%address, "Connecting");
        let stream = open_stream(&address, self.config.connect_timeout)
            .and_then(|stream| {
                stream.set_nodelay(true)?;
                stream.set_write_timeout(Some(self.config.io_timeout))?;
                Ok(stream)
            })
            .map_err(|source| ClientError::Connection { address, source })?;
        self.attach(stream)
    }
}

impl<T: Transport> TelnetClient<T> {
    /// Adopt an already open transport as a new session.
    ///
    /// Performs the same steps as [`connect`](TelnetClient::connect) after the stream is
    /// established: apply the I/O timeout, reset per-session state and send the handshake
    /// unless it is disabled.
    pub fn attach(&mut self, mut transport: T) -> Result<()> {
        self.config.validate()?;
        self.disconnect()?;

        transport
            .set_read_timeout(Some(self.config.io_timeout))
            .map_err(|source| ClientError::Connection {
                address: self.config.address(),
                source,
            })?;
        self.transport = Some(transport);
        self.state = ConnectionState::Connected;
        self.reset_session();
        info!(address = %self.settings.address(), "Connected");

        if self.settings.handshake {
            self.send_handshake()?;
        }
        Ok(())
    }

    fn send_handshake(&mut self) -> Result<()> {
        let frames = handshake_sequence(&self.settings.handshake_params());
        debug!(frames = frames.len(), "Sending option handshake");
        for frame in frames {
            trace!(%frame, "Handshake");
            self.write_frame(frame)?;
            self.pace();
        }
        Ok(())
    }

    /// Close the session.
    ///
    /// Sends `exit` and a LOGOUT request on a best effort basis, then always closes the
    /// stream. Calling this on a disconnected client does nothing.
    pub fn disconnect(&mut self) -> Result<()> {
        let Some(mut transport) = self.transport.take() else {
            self.state = ConnectionState::Disconnected;
            return Ok(());
        };

        let mut farewell = b"exit".to_vec();
        farewell.extend_from_slice(self.settings.line_terminator.as_bytes());
        farewell.extend_from_slice(&[consts::IAC, consts::DO, consts::option::LOGOUT]);
        if let Err(error) = transport
            .write_all(&farewell)
            .and_then(|()| transport.flush())
        {
            warn!(%error, "Logout failed");
        }
        if let Err(error) = transport.shutdown() {
            debug!(%error, "Shutdown failed");
        }

        self.state = ConnectionState::Disconnected;
        self.read_buffer.clear();
        self.profile.clear();
        info!(address = %self.settings.address(), "Disconnected");
        Ok(())
    }

    /// Whether the session is live.
    ///
    /// Without `poke` this reports the current state. With `poke` it sends Are You There and
    /// waits up to the I/O timeout for any reply byte; an answer also clears a timed out
    /// state. The read buffer is emptied before and after the probe.
    pub fn is_connected(&mut self, poke: bool) -> bool {
        if self.transport.is_none() {
            return false;
        }
        if !poke {
            return self.state == ConnectionState::Connected;
        }

        self.read_buffer.clear();
        let sent = self.transport.as_mut().is_some_and(|transport| {
            transport
                .write_all(&[consts::IAC, consts::AYT])
                .and_then(|()| transport.flush())
                .is_ok()
        });
        let answered = sent && matches!(self.fetch(1), Fetched::Data(_));
        self.read_buffer.clear();

        if self.transport.is_some() {
            self.state = if answered {
                ConnectionState::Connected
            } else {
                ConnectionState::TimedOut
            };
        }
        debug!(answered, "Poked remote");
        answered
    }

    /// Close the stream without a logout; the remote is already gone.
    pub(crate) fn drop_transport(&mut self) {
        if let Some(mut transport) = self.transport.take() {
            if let Err(error) = transport.shutdown() {
                trace!(%error, "Shutdown after stream end failed");
            }
            info!(address = %self.settings.address(), "Remote closed the connection");
        }
        self.state = ConnectionState::Disconnected;
    }

    /// Send a bare command such as Are You There.
    pub(crate) fn send_control(&mut self, frame: TelnetFrame) -> Result<()> {
        debug!(%frame, "Sending control command");
        self.write_frame(frame)
    }
}

fn open_stream(address: &str, timeout: Duration) -> io::Result<TcpStream> {
    let mut last_error = None;
    for addr in address.to_socket_addrs()? {
        match TcpStream::connect_timeout(&addr, timeout) {
            Ok(stream) => return Ok(stream),
            Err(error) => {
                debug!(%addr, %error, "Connect attempt failed");
                last_error = Some(error);
            }
        }
    }
    Err(last_error.unwrap_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "address resolved to nothing")
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientConfig;
    use crate::transport::mock::MockTransport;
    use bytes::BytesMut;
    use telnetio_codec::{TelnetCodec, TelnetOption};
    use tokio_util::codec::Decoder;
    use tracing_test::traced_test;

    fn client(config: ClientConfig) -> TelnetClient<MockTransport> {
        TelnetClient::with_config(config.with_command_delay(Duration::ZERO))
    }

    fn decoded(bytes: &[u8]) -> Vec<TelnetFrame> {
        let mut codec = TelnetCodec::new();
        let mut buffer = BytesMut::from(bytes);
        let mut frames = Vec::new();
        while let Some(frame) = codec.decode(&mut buffer).unwrap() {
            frames.push(frame);
        }
        frames
    }

    #[test]
    fn test_attach_sends_handshake() {
        let transport = MockTransport::default();
        let mut client = client(ClientConfig::new("localhost", 23));
        client.attach(transport.clone()).unwrap();

        assert_eq!(client.state(), ConnectionState::Connected);
        let expected = handshake_sequence(&client.settings().handshake_params());
        assert_eq!(decoded(&transport.written()), expected);
    }

    #[test]
    fn test_attach_without_handshake_is_silent() {
        let transport = MockTransport::default();
        let mut client = client(ClientConfig::new("localhost", 23).with_handshake(false));
        client.attach(transport.clone()).unwrap();
        assert!(transport.written().is_empty());
    }

    #[test]
    fn test_attach_requires_host() {
        let mut client = client(ClientConfig::default());
        let err = client.attach(MockTransport::default()).unwrap_err();
        assert!(matches!(err, ClientError::Configuration(_)));
        assert_eq!(client.state(), ConnectionState::Disconnected);
    }

    #[test]
    fn test_disconnect_sends_logout_and_closes() {
        let transport = MockTransport::default();
        let mut client = client(ClientConfig::new("localhost", 23).with_handshake(false));
        client.attach(transport.clone()).unwrap();
        client.disconnect().unwrap();

        let mut expected = b"exit\r\n".to_vec();
        expected.extend_from_slice(&[consts::IAC, consts::DO, consts::option::LOGOUT]);
        assert_eq!(transport.written(), expected);
        assert!(transport.is_shut_down());
        assert_eq!(client.state(), ConnectionState::Disconnected);
        assert_eq!(
            decoded(&expected[6..]),
            vec![TelnetFrame::Do(TelnetOption::Logout)]
        );
    }

    #[test]
    #[traced_test]
    fn test_disconnect_swallows_write_failure() {
        let transport = MockTransport::default();
        let mut client = client(ClientConfig::new("localhost", 23).with_handshake(false));
        client.attach(transport.clone()).unwrap();
        transport.fail_writes();
        assert!(client.disconnect().is_ok());
        assert!(transport.is_shut_down());
        assert_eq!(client.state(), ConnectionState::Disconnected);
        assert!(logs_contain("Logout failed"));
    }

    #[test]
    fn test_disconnect_twice_is_noop() {
        let mut client = client(ClientConfig::new("localhost", 23));
        assert!(client.disconnect().is_ok());
        assert!(client.disconnect().is_ok());
        assert_eq!(client.state(), ConnectionState::Disconnected);
    }

    #[test]
    fn test_poke_answered() {
        let transport = MockTransport::default();
        let mut client = client(ClientConfig::new("localhost", 23).with_handshake(false));
        client.attach(transport.clone()).unwrap();
        transport.push(b"[Yes]");

        assert!(client.is_connected(true));
        assert_eq!(transport.take_written(), vec![consts::IAC, consts::AYT]);
        assert!(client.read_buffer().is_empty());
        assert_eq!(transport.remaining(), b"Yes]");
    }

    #[test]
    fn test_poke_unanswered_times_out() {
        let transport = MockTransport::default();
        let mut client = client(ClientConfig::new("localhost", 23).with_handshake(false));
        client.attach(transport.clone()).unwrap();

        assert!(!client.is_connected(true));
        assert!(client.is_timed_out());
        assert!(!client.is_connected(false));

        transport.push(b"!");
        assert!(client.is_connected(true));
        assert_eq!(client.state(), ConnectionState::Connected);
    }

    #[test]
    fn test_poke_on_closed_stream() {
        let transport = MockTransport::default();
        let mut client = client(ClientConfig::new("localhost", 23).with_handshake(false));
        client.attach(transport.clone()).unwrap();
        transport.close();

        assert!(!client.is_connected(true));
        assert_eq!(client.state(), ConnectionState::Disconnected);
        assert!(!client.is_connected(false));
    }
}

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


//! End-to-end read and command scenarios against loopback remotes

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use telnetio_client::{
    ClientConfig, ClientError, ConnectionState, ReadStatus, TelnetClient, TelnetOption, consts,
};

// ============================================================================
// Helper Functions
// ============================================================================

fn scripted_remote<F, R>(script: F) -> (u16, JoinHandle<R>)
where
    F: FnOnce(TcpStream) -> R + Send + 'static,
    R: Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        script(stream)
    });
    (port, handle)
}

/// Reads from `stream` until the received bytes end with `marker`.
fn read_line(stream: &mut TcpStream, marker: &[u8]) -> Vec<u8> {
    let mut received = Vec::new();
    let mut byte = [0u8; 1];
    while !received.ends_with(marker) {
        if stream.read(&mut byte).unwrap() == 0 {
            break;
        }
        received.push(byte[0]);
    }
    received
}

/// Sends `payload`, then waits for the client to hang up.
fn send_and_wait(payload: &'static [u8]) -> impl FnOnce(TcpStream) + Send + 'static {
    move |mut stream| {
        stream.write_all(payload).unwrap();
        let mut sink = Vec::new();
        let _ = stream.read_to_end(&mut sink);
    }
}

fn connect(config: ClientConfig) -> TelnetClient {
    let mut client = TelnetClient::new(
        config
            .with_connect_timeout(Duration::from_secs(2))
            .with_io_timeout(Duration::from_secs(2))
            .with_handshake(false),
    );
    client.connect().unwrap();
    client
}

fn config(port: u16) -> ClientConfig {
    ClientConfig::new("127.0.0.1", port).with_command_delay(Duration::ZERO)
}

// ============================================================================
// Read Primitives
// ============================================================================

#[test]
fn test_read_until_leaves_remaining_bytes() {
    let (port, remote) = scripted_remote(send_and_wait(b"abc<END>def"));
    let mut client = connect(config(port));

    let (buffer, status) = client.read_until(b"<END>", 0, false).unwrap();
    assert_eq!(&buffer[..], b"abc<END>");
    assert_eq!(status, ReadStatus::Success);
    assert_eq!(&client.read_bytes(3).unwrap()[..], b"def");

    client.disconnect().unwrap();
    remote.join().unwrap();
}

#[test]
fn test_read_until_max_bytes() {
    let (port, remote) = scripted_remote(send_and_wait(b"0123456789"));
    let mut client = connect(config(port));

    let (buffer, status) = client.read_until(b"#", 5, false).unwrap();
    assert_eq!(&buffer[..], b"01234");
    assert_eq!(status, ReadStatus::NoMatchFound);

    let err = client.read_until(b"#", 5, true).unwrap_err();
    assert!(matches!(err, ClientError::NoMatchFound { .. }));
    assert_eq!(client.read_buffer(), b"56789");

    client.disconnect().unwrap();
    remote.join().unwrap();
}

#[test]
fn test_read_until_pattern_variable_prompt() {
    let (port, remote) = scripted_remote(send_and_wait(b"motd\r\nuser@host-42:~$ "));
    let mut client = connect(config(port));

    let (buffer, status) = client
        .read_until_pattern(r"@host-\d+:~\$ $", 0, true)
        .unwrap();
    assert_eq!(&buffer[..], b"motd\r\nuser@host-42:~$ ");
    assert_eq!(status, ReadStatus::Success);

    client.disconnect().unwrap();
    remote.join().unwrap();
}

#[test]
fn test_read_until_remote_hangs_up() {
    let (port, remote) = scripted_remote(|mut stream: TcpStream| {
        stream.write_all(b"goodbye").unwrap();
    });
    let mut client = connect(config(port));
    remote.join().unwrap();

    let (buffer, status) = client.read_until(b"$ ", 0, false).unwrap();
    assert_eq!(&buffer[..], b"goodbye");
    assert_eq!(status, ReadStatus::NoMatchFound);
    assert_eq!(client.state(), ConnectionState::Disconnected);
}

#[test]
fn test_read_history_and_profile() {
    let (port, remote) = scripted_remote(send_and_wait(b"one$ two$ "));
    let mut client = connect(config(port).with_auto_stack(true).with_profiling(true));

    client.wait_for_prompt(true).unwrap();
    client.wait_for_prompt(true).unwrap();
    let history: Vec<&[u8]> = client.read_history().iter().map(|b| &b[..]).collect();
    assert_eq!(history, vec![&b"one$ "[..], &b"two$ "[..]]);
    assert!(client.profile().seconds("read_until").is_some());

    client.disconnect().unwrap();
    remote.join().unwrap();
}

// ============================================================================
// Sessions
// ============================================================================

#[test]
fn test_login_prompt_then_command() {
    let (lines_tx, lines_rx) = mpsc::channel();
    let (port, remote) = scripted_remote(move |mut stream: TcpStream| {
        stream.write_all(b"login: ").unwrap();
        let line = read_line(&mut stream, b"\r\n");
        lines_tx.send(line).unwrap();
        stream.write_all(b"whoami\r\nroot\n$ ").unwrap();
        let mut sink = Vec::new();
        let _ = stream.read_to_end(&mut sink);
    });
    let mut client = connect(
        config(port)
            .with_prompt("login: ")
            .with_command_delay(Duration::from_millis(300)),
    );

    let (buffer, status) = client.wait_for_prompt(false).unwrap();
    assert_eq!(&buffer[..], b"login: ");
    assert_eq!(status, ReadStatus::Success);

    assert_eq!(client.run_command("whoami").unwrap(), "root");
    assert_eq!(lines_rx.recv().unwrap(), b"whoami\r\n");

    client.disconnect().unwrap();
    remote.join().unwrap();
}

#[test]
fn test_offer_option_against_remote() {
    let (port, remote) = scripted_remote(|mut stream: TcpStream| {
        let mut offer = [0u8; 3];
        stream.read_exact(&mut offer).unwrap();
        stream
            .write_all(&[consts::IAC, consts::DONT, offer[2]])
            .unwrap();
        let mut request = [0u8; 3];
        stream.read_exact(&mut request).unwrap();
        stream
            .write_all(&[consts::IAC, consts::WILL, request[2]])
            .unwrap();
        let mut sink = Vec::new();
        let _ = stream.read_to_end(&mut sink);
        (offer, request)
    });
    let mut client = connect(config(port));

    assert!(!client.offer_option(TelnetOption::NAWS).unwrap());
    assert!(client.request_option(TelnetOption::SuppressGoAhead).unwrap());

    client.disconnect().unwrap();
    let (offer, request) = remote.join().unwrap();
    assert_eq!(offer, [consts::IAC, consts::WILL, consts::option::NAWS]);
    assert_eq!(request, [consts::IAC, consts::DO, consts::option::SGA]);
}

#[test]
fn test_binary_data_is_escaped_on_the_wire() {
    let (tx, rx) = mpsc::channel();
    let (port, remote) = scripted_remote(move |mut stream: TcpStream| {
        let received = read_line(&mut stream, b"\r\n");
        tx.send(received).unwrap();
        let mut sink = Vec::new();
        let _ = stream.read_to_end(&mut sink);
    });
    let mut client = connect(config(port));

    client.write(&[0x01, 0xFF, 0x02], true).unwrap();
    assert_eq!(rx.recv().unwrap(), vec![0x01, 0xFF, 0xFF, 0x02, b'\r', b'\n']);

    client.disconnect().unwrap();
    remote.join().unwrap();
}

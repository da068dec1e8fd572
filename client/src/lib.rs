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


//! # Telnetio Telnet Client
//!
//! Blocking, line-oriented Telnet client for driving a remote shell: connect, present a
//! terminal through the option handshake, then synchronize on prompts.
//!
//! ## Features
//!
//! - **Option Handshake** - Announces NAWS, terminal speed, terminal type and NEW-ENVIRON on connect
//! - **Buffered Reads** - Exact byte counts, literal markers, regular expressions or a non-blocking drain
//! - **IAC Escaping** - Data writes double `0xFF`; command writes go out verbatim
//! - **Directed Negotiation** - Offer or request a single option and learn the answer
//! - **Diagnostics** - Read observers, a per-operation profile ledger and a read history
//!
//! ## Quick Start
//!
//! ```no_run
//! use telnetio_client::{ClientConfig, TelnetClient};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("localhost", 23)
//!         .with_prompt("$ ")
//!         .with_terminal_type("vt100");
//!
//!     let mut client = TelnetClient::new(config);
//!     client.connect()?;
//!     client.read_until(b"login: ", 0, true)?;
//!     client.write(b"guest", true)?;
//!     client.wait_for_prompt(true)?;
//!
//!     let output = client.run_command("uname -a")?;
//!     println!("{output}");
//!
//!     client.disconnect()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Timeouts
//!
//! Every blocking read waits at most [`ClientConfig::io_timeout`]. A read that runs into the
//! timeout moves the client to [`ConnectionState::TimedOut`]; further reads and writes fail
//! with [`ClientError::ConnectionLost`] until [`TelnetClient::is_connected`] with `poke`
//! gets an answer from the remote.
#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

mod client;
mod config;
mod connection;
mod error;
mod negotiation;
mod observer;
mod reader;
mod session;
mod transport;
mod writer;

pub use client::{ConnectionState, TelnetClient};
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use observer::{ProfileLedger, ReadObserver};
pub use reader::ReadStatus;
pub use transport::Transport;

// Re-export the protocol vocabulary callers need alongside the client
pub use telnetio_codec::{
    NegotiationRequest, NegotiationVerb, TelnetFrame, TelnetOption, consts, escape,
    strip_negotiation, symbols, unescape,
};

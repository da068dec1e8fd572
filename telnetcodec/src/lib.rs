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


//! # Telnetio Telnet Protocol Codec
//!
//! The wire layer of the Telnet client: symbol tables, framing, escaping and option
//! negotiation parsing. Nothing in this crate performs I/O.
//!
//! ## Core Components
//!
//! ### [`symbols`]
//!
//! Process-wide name ↔ byte tables for commands (`IAC`, `WILL`, `AYT`, ...) and options
//! (`ECHO`, `SGA`, `NAWS`, ...). Lookups by name ignore case.
//!
//! ### [`TelnetCodec`]
//!
//! Implements `tokio_util::codec::{Encoder, Decoder}` for [`TelnetFrame`]. The encoder escapes
//! `IAC` in data and subnegotiation payloads; the decoder is a byte-at-a-time state machine.
//!
//! ### [`NegotiationRequest`]
//!
//! The result of scanning captured bytes for `IAC DO|DONT|WILL|WONT <option>` triples, plus
//! [`NegotiationRequest::refusal`] to decline everything the peer proposed.
//!
//! ### [`handshake_sequence`]
//!
//! The frames a client announces right after connecting.
//!
//! ## Usage Example
//!
//! ```rust
//! use telnetio_codec::{NegotiationRequest, TelnetCodec, TelnetFrame, TelnetOption, escape, unescape};
//! use tokio_util::codec::{Decoder, Encoder};
//! use bytes::BytesMut;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut codec = TelnetCodec::new();
//!
//! let mut buffer = BytesMut::new();
//! codec.encode(TelnetFrame::Will(TelnetOption::NAWS), &mut buffer)?;
//! assert_eq!(&buffer[..], b"\xFF\xFB\x1F");
//!
//! let mut input = BytesMut::from(&b"Hi\xFF\xFD\x01"[..]);
//! while let Some(frame) = codec.decode(&mut input)? {
//!     println!("{frame}");
//! }
//!
//! let parsed = NegotiationRequest::parse(b"\xFF\xFD\x01");
//! assert_eq!(parsed.do_options, vec![TelnetOption::Echo]);
//!
//! assert_eq!(&unescape(&escape(b"\xFF"))[..], b"\xFF");
//! # Ok(())
//! # }
//! ```
//!
//! ## IAC Escaping
//!
//! Since 0xFF (IAC) is a special byte, it must be escaped when transmitted as data by
//! sending it twice: `IAC IAC` represents a literal 0xFF byte in the data stream.
//!
//! ## Related RFCs
//!
//! - RFC 854: Telnet Protocol Specification
//! - RFC 855: Telnet Option Specifications
//! - RFC 1073: Window Size
//! - RFC 1079: Terminal Speed
//! - RFC 1091: Terminal Type
//! - RFC 1572: New Environment

#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(
    clippy::option_if_let_else,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc
)]

mod args;
mod codec;
pub mod consts;
mod frame;
mod handshake;
mod negotiation;
mod options;
mod result;
pub mod symbols;

pub use self::args::{TelnetArgument, naws};
pub use self::codec::{TelnetCodec, escape, escape_into, unescape};
pub use self::frame::TelnetFrame;
pub use self::handshake::{HandshakeParams, handshake_sequence};
pub use self::negotiation::{NegotiationRequest, NegotiationVerb, strip_negotiation};
pub use self::options::TelnetOption;
pub use self::result::{CodecError, CodecResult};

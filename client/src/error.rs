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


//! Client error types

use std::io;
use telnetio_codec::{CodecError, TelnetOption};
use thiserror::Error;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Telnet client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Missing or invalid configuration value
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// The byte stream to the remote host could not be established
    #[error("Unable to connect to {address}: {source}")]
    Connection {
        /// Address that was dialed
        address: String,
        /// Underlying transport error
        #[source]
        source: io::Error,
    },

    /// The stream is absent, closed or timed out
    #[error("Connection lost")]
    ConnectionLost,

    /// A blocking read produced no bytes at all
    #[error("End of stream reached before any data was read")]
    EndOfStream,

    /// A literal or pattern never matched within the read bounds
    #[error("Expected {expected:?} but received {received:?}")]
    NoMatchFound {
        /// Literal or pattern that was awaited
        expected: String,
        /// Bytes read before giving up
        received: String,
    },

    /// The peer answered a negotiation with something other than accept or refuse
    #[error("Negotiation of {option} failed, peer replied {reply:02X?}")]
    NegotiationFailed {
        /// Option that was negotiated
        option: TelnetOption,
        /// Raw reply bytes
        reply: Vec<u8>,
    },

    /// Option is not present in the option symbol table
    #[error("Unknown telnet option: {0}")]
    UnknownOption(String),

    /// A write was rejected or only partially completed
    #[error("Write failed (os error {code:?}): {source}")]
    WriteFailed {
        /// Raw OS error code, when the platform supplied one
        code: Option<i32>,
        /// Underlying transport error
        #[source]
        source: io::Error,
    },

    /// Error from the codec layer
    #[error("Protocol error: {0}")]
    Codec(#[from] CodecError),
}

impl ClientError {
    /// Wraps a failed write, keeping the OS error code for diagnostics.
    pub(crate) fn write_failed(source: io::Error) -> Self {
        ClientError::WriteFailed {
            code: source.raw_os_error(),
            source,
        }
    }

    /// Check if the error is a connection error
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            ClientError::Connection { .. }
                | ClientError::ConnectionLost
                | ClientError::EndOfStream
                | ClientError::WriteFailed { .. }
        )
    }

    /// Check if the error came from the peer speaking the protocol unexpectedly
    pub fn is_protocol_error(&self) -> bool {
        matches!(
            self,
            ClientError::NegotiationFailed { .. }
                | ClientError::UnknownOption(_)
                | ClientError::Codec(_)
        )
    }
}

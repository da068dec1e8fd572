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


/// Result Type for Codec Operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Represents possible errors that can occur in the codec handling process.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// An I/O error occurred while writing an encoded frame.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An unknown or invalid telnet command byte was encountered.
    #[error("Unknown telnet command: 0x{0:02X}")]
    UnknownCommand(u8),

    /// A symbolic option name has no entry in the option table.
    #[error("Unknown telnet option: {0}")]
    UnknownOption(String),

    /// Error occurred while building or reading a subnegotiation payload.
    #[error("Subnegotiation error for option {option}: {reason}")]
    Subnegotiation {
        /// The telnet option being subnegotiated
        option: u8,
        /// Specific reason for the failure
        reason: String,
    },
}

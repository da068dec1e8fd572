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


//! Negotiate About Window Size (RFC 1073)

use crate::{CodecError, CodecResult, consts};
use byteorder::{BigEndian, ByteOrder};

/// Terminal dimensions carried by a NAWS subnegotiation.
///
/// On the wire this is the width followed by the height, each a big-endian `u16`.
///
/// ```
/// use telnetio_codec::naws::WindowSize;
///
/// let size = WindowSize::new(80, 24);
/// assert_eq!(size.to_bytes(), [0, 80, 0, 24]);
/// assert_eq!(WindowSize::from_payload(&[0, 80, 0, 24]).unwrap(), size);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowSize {
    /// Columns
    pub width: u16,
    /// Rows
    pub height: u16,
}

impl WindowSize {
    /// A window of `width` columns by `height` rows.
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// The unescaped four byte payload. A dimension of 255 yields an `IAC` byte that must be
    /// doubled when framed.
    pub fn to_bytes(&self) -> [u8; 4] {
        let mut bytes = [0u8; 4];
        BigEndian::write_u16(&mut bytes[..2], self.width);
        BigEndian::write_u16(&mut bytes[2..], self.height);
        bytes
    }

    /// Parses an unescaped payload, which must be exactly four bytes long.
    pub fn from_payload(payload: &[u8]) -> CodecResult<Self> {
        if payload.len() != 4 {
            return Err(CodecError::Subnegotiation {
                option: consts::option::NAWS,
                reason: format!("expected 4 payload bytes, got {}", payload.len()),
            });
        }
        Ok(Self::new(
            BigEndian::read_u16(&payload[..2]),
            BigEndian::read_u16(&payload[2..]),
        ))
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

impl std::fmt::Display for WindowSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

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


//! The option announcements a client sends right after connecting.
//!
//! Presenting the same options a real terminal client offers keeps servers from falling back to
//! modes that break prompt detection. The order of the frames is significant.

use crate::naws::WindowSize;
use crate::{TelnetArgument, TelnetFrame, TelnetOption};
use bytes::BytesMut;

/// Values advertised in the handshake subnegotiations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandshakeParams {
    /// Window size sent with NAWS.
    pub window: WindowSize,
    /// Terminal speed sent with TSPEED, formatted `"<transmit>,<receive>"`.
    pub terminal_speed: String,
    /// Terminal type sent with TTYPE.
    pub terminal_type: String,
}

impl Default for HandshakeParams {
    fn default() -> Self {
        HandshakeParams {
            window: WindowSize::default(),
            terminal_speed: "38400,38400".to_string(),
            terminal_type: "dumb".to_string(),
        }
    }
}

/// Builds the connect-time handshake.
///
/// The sequence is WILL NAWS, WILL TSPEED, WILL TTYPE, WILL NEW-ENVIRON, DO ECHO, WILL SGA,
/// DO SGA, WONT XDISPLOC, WONT OLD-ENVIRON, followed by the NAWS, TSPEED, NEW-ENVIRON (empty)
/// and TTYPE subnegotiations.
///
/// ```
/// use telnetio_codec::{HandshakeParams, TelnetFrame, TelnetOption, handshake_sequence};
///
/// let frames = handshake_sequence(&HandshakeParams::default());
/// assert_eq!(frames[0], TelnetFrame::Will(TelnetOption::NAWS));
/// assert_eq!(frames.len(), 13);
/// ```
pub fn handshake_sequence(params: &HandshakeParams) -> Vec<TelnetFrame> {
    vec![
        TelnetFrame::Will(TelnetOption::NAWS),
        TelnetFrame::Will(TelnetOption::TSPEED),
        TelnetFrame::Will(TelnetOption::TTYPE),
        TelnetFrame::Will(TelnetOption::NewEnvironment),
        TelnetFrame::Do(TelnetOption::Echo),
        TelnetFrame::Will(TelnetOption::SuppressGoAhead),
        TelnetFrame::Do(TelnetOption::SuppressGoAhead),
        TelnetFrame::Wont(TelnetOption::XDISPLOC),
        TelnetFrame::Wont(TelnetOption::Environment),
        TelnetFrame::Subnegotiate(TelnetArgument::WindowSize(params.window)),
        TelnetFrame::Subnegotiate(TelnetArgument::TerminalSpeed(params.terminal_speed.clone())),
        TelnetFrame::Subnegotiate(TelnetArgument::NewEnvironment(BytesMut::new())),
        TelnetFrame::Subnegotiate(TelnetArgument::TerminalType(params.terminal_type.clone())),
    ]
}

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


//! Wire values for Telnet commands and options.
//!
//! Byte values follow RFC 854 and the IANA Telnet option registry. They are a compatibility
//! contract with real hosts and must never be renumbered.

/// End of File (RFC 1184)
pub const EOF: u8 = 236;
/// Suspend Process (RFC 1184)
pub const SUSP: u8 = 237;
/// Abort Process (RFC 1184)
pub const ABORT: u8 = 238;
/// End of Record (RFC 885)
pub const EOR: u8 = 239;
/// Subnegotiation End
pub const SE: u8 = 240;
/// No Operation
pub const NOP: u8 = 241;
/// Data Mark
pub const DM: u8 = 242;
/// Break
pub const BRK: u8 = 243;
/// Interrupt Process
pub const IP: u8 = 244;
/// Abort Output
pub const AO: u8 = 245;
/// Are You There
pub const AYT: u8 = 246;
/// Erase Character
pub const EC: u8 = 247;
/// Erase Line
pub const EL: u8 = 248;
/// Go Ahead
pub const GA: u8 = 249;
/// Subnegotiation Begin
pub const SB: u8 = 250;
/// Sender wants to enable an option locally
pub const WILL: u8 = 251;
/// Sender refuses to enable an option locally
pub const WONT: u8 = 252;
/// Sender asks the receiver to enable an option
pub const DO: u8 = 253;
/// Sender asks the receiver to disable an option
pub const DONT: u8 = 254;
/// Interpret As Command
pub const IAC: u8 = 255;
/// NUL data byte
pub const NULL: u8 = 0;

/// Carriage Return
pub const CR: u8 = b'\r';
/// Line Feed
pub const LF: u8 = b'\n';

/// Subnegotiation `IS` qualifier (RFC 1091, RFC 1079, RFC 1572)
pub const IS: u8 = 0;
/// Subnegotiation `SEND` qualifier
pub const SEND: u8 = 1;

/// Option codes from the [IANA registry](https://www.iana.org/assignments/telnet-options/telnet-options.xhtml)
pub mod option {
    /// Binary Transmission [RFC856]
    pub const BINARY: u8 = 0;
    /// Echo [RFC857]
    pub const ECHO: u8 = 1;
    /// Reconnection
    pub const RCP: u8 = 2;
    /// Suppress Go Ahead [RFC858]
    pub const SGA: u8 = 3;
    /// Approx Message Size Negotiation
    pub const NAMS: u8 = 4;
    /// Status [RFC859]
    pub const STATUS: u8 = 5;
    /// Timing Mark [RFC860]
    pub const TM: u8 = 6;
    /// Remote Controlled Trans and Echo [RFC726]
    pub const RCTE: u8 = 7;
    /// Output Line Width
    pub const NAOL: u8 = 8;
    /// Output Page Size
    pub const NAOP: u8 = 9;
    /// Output Carriage-Return Disposition [RFC652]
    pub const NAOCRD: u8 = 10;
    /// Output Horizontal Tab Stops [RFC653]
    pub const NAOHTS: u8 = 11;
    /// Output Horizontal Tab Disposition [RFC654]
    pub const NAOHTD: u8 = 12;
    /// Output Formfeed Disposition [RFC655]
    pub const NAOFFD: u8 = 13;
    /// Output Vertical Tabstops [RFC656]
    pub const NAOVTS: u8 = 14;
    /// Output Vertical Tab Disposition [RFC657]
    pub const NAOVTD: u8 = 15;
    /// Output Linefeed Disposition [RFC658]
    pub const NAOLFD: u8 = 16;
    /// Extended ASCII [RFC698]
    pub const XASCII: u8 = 17;
    /// Logout [RFC727]
    pub const LOGOUT: u8 = 18;
    /// Byte Macro [RFC735]
    pub const BM: u8 = 19;
    /// Data Entry Terminal [RFC1043]
    pub const DET: u8 = 20;
    /// SUPDUP [RFC736]
    pub const SUPDUP: u8 = 21;
    /// SUPDUP Output [RFC749]
    pub const SUPDUP_OUTPUT: u8 = 22;
    /// Send Location [RFC779]
    pub const SNDLOC: u8 = 23;
    /// Terminal Type [RFC1091]
    pub const TTYPE: u8 = 24;
    /// End of Record [RFC885]
    pub const EOR: u8 = 25;
    /// TACACS User Identification [RFC927]
    pub const TUID: u8 = 26;
    /// Output Marking [RFC933]
    pub const OUTMRK: u8 = 27;
    /// Terminal Location Number [RFC946]
    pub const TTYLOC: u8 = 28;
    /// Telnet 3270 Regime [RFC1041]
    pub const OPT3270REGIME: u8 = 29;
    /// X.3 PAD [RFC1053]
    pub const X3PAD: u8 = 30;
    /// Negotiate About Window Size [RFC1073]
    pub const NAWS: u8 = 31;
    /// Terminal Speed [RFC1079]
    pub const TSPEED: u8 = 32;
    /// Remote Flow Control [RFC1372]
    pub const LFLOW: u8 = 33;
    /// Linemode [RFC1184]
    pub const LINEMODE: u8 = 34;
    /// X Display Location [RFC1096]
    pub const XDISPLOC: u8 = 35;
    /// Environment Option [RFC1408]
    pub const OLD_ENVIRONMENT: u8 = 36;
    /// Authentication Option [RFC2941]
    pub const AUTHENTICATION: u8 = 37;
    /// Encryption Option [RFC2946]
    pub const ENCRYPTION: u8 = 38;
    /// New Environment Option [RFC1572]
    pub const NEW_ENVIRONMENT: u8 = 39;
    /// TN3270E [RFC2355]
    pub const TN3270E: u8 = 40;
    /// XAUTH
    pub const XAUTH: u8 = 41;
    /// CHARSET [RFC2066]
    pub const CHARSET: u8 = 42;
    /// Telnet Remote Serial Port
    pub const TRSP: u8 = 43;
    /// Com Port Control Option [RFC2217]
    pub const CPCO: u8 = 44;
    /// Telnet Suppress Local Echo
    pub const TSLE: u8 = 45;
    /// Telnet Start TLS
    pub const START_TLS: u8 = 46;
    /// KERMIT [RFC2840]
    pub const KERMIT: u8 = 47;
    /// SEND-URL
    pub const SENDURL: u8 = 48;
    /// FORWARD_X
    pub const FORWARDX: u8 = 49;
    /// Extended-Options-List [RFC861]
    pub const EXOPL: u8 = 255;
}

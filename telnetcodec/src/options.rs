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

use crate::{CodecError, CodecResult, consts, symbols};

/// Declares [`TelnetOption`] together with its byte conversions and `Display`, from one
/// `Variant = CONST, "description";` row per assigned option.
macro_rules! telnet_options {
    ($($variant:ident = $code:ident, $doc:literal;)+) => {
        ///
        /// [Telnet Terminal Options](https://www.iana.org/assignments/telnet-options/telnet-options.xhtml)
        ///
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        pub enum TelnetOption {
            $(
                #[doc = $doc]
                $variant,
            )+
            /// Option byte without an assignment
            Unknown(u8),
        }

        impl TelnetOption {
            /// Converts a `TelnetOption` into its wire byte.
            pub fn to_u8(&self) -> u8 {
                match self {
                    $(TelnetOption::$variant => consts::option::$code,)+
                    TelnetOption::Unknown(byte) => *byte,
                }
            }

            /// Converts a wire byte into a `TelnetOption`.
            ///
            /// Bytes without an assignment map to [`TelnetOption::Unknown`] holding the original
            /// value.
            pub fn from_u8(byte: u8) -> Self {
                match byte {
                    $(consts::option::$code => TelnetOption::$variant,)+
                    other => TelnetOption::Unknown(other),
                }
            }
        }

        impl std::fmt::Display for TelnetOption {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(TelnetOption::$variant => f.write_str(stringify!($variant)),)+
                    TelnetOption::Unknown(byte) => write!(f, "Unknown({byte})"),
                }
            }
        }
    };
}

telnet_options! {
    TransmitBinary = BINARY, "Binary Transmission ([RFC856](https://tools.ietf.org/html/rfc856))";
    Echo = ECHO, "Echo ([RFC857](https://tools.ietf.org/html/rfc857))";
    Reconnection = RCP, "Prepare to Reconnect";
    SuppressGoAhead = SGA, "Suppress Go Ahead ([RFC858](https://tools.ietf.org/html/rfc858))";
    NegotiateApproxMessageSize = NAMS, "Negotiate Approximate Message Size";
    Status = STATUS, "Status ([RFC859](http://www.iana.org/go/rfc859))";
    TimingMark = TM, "Timing Mark ([RFC860](http://www.iana.org/go/rfc860))";
    RCTE = RCTE, "Remote-Controlled Transmission and Echo ([RFC726](http://www.iana.org/go/rfc726))";
    OutLineWidth = NAOL, "Output Line Width";
    OutPageSize = NAOP, "Output Page Size";
    NAOCRD = NAOCRD, "Output Carriage-Return Disposition ([RFC652](http://www.iana.org/go/rfc652))";
    NAOHTS = NAOHTS, "Output Horizontal Tab Stops ([RFC653](http://www.iana.org/go/rfc653))";
    NAOHTD = NAOHTD, "Output Horizontal Tab Disposition ([RFC654](http://www.iana.org/go/rfc654))";
    NAOFFD = NAOFFD, "Output Form Feed Disposition ([RFC655](http://www.iana.org/go/rfc655))";
    NAOVTS = NAOVTS, "Output Vertical Tab Stops ([RFC656](http://www.iana.org/go/rfc656))";
    NAOVTD = NAOVTD, "Output Vertical Tab Disposition ([RFC657](http://www.iana.org/go/rfc657))";
    NAOLFD = NAOLFD, "Output Linefeed Disposition ([RFC658](http://www.iana.org/go/rfc658))";
    XASCII = XASCII, "Extended ASCII ([RFC698](http://www.iana.org/go/rfc698))";
    Logout = LOGOUT, "Logout ([RFC727](http://www.iana.org/go/rfc727))";
    ByteMacro = BM, "Byte Macro ([RFC735](http://www.iana.org/go/rfc735))";
    DET = DET, "Data Entry Terminal ([RFC1043](http://www.iana.org/go/rfc1043))";
    SUPDUP = SUPDUP, "SUPDUP ([RFC736](http://www.iana.org/go/rfc736))";
    SUPDUPOutput = SUPDUP_OUTPUT, "SUPDUP Output ([RFC749](http://www.iana.org/go/rfc749))";
    SNDLOC = SNDLOC, "Send Location ([RFC779](http://www.iana.org/go/rfc779))";
    TTYPE = TTYPE, "Terminal Type ([RFC1091](http://www.iana.org/go/rfc1091))";
    EOR = EOR, "End of Record ([RFC885](http://www.iana.org/go/rfc885))";
    TUID = TUID, "TACACS User Identification ([RFC927](http://www.iana.org/go/rfc927))";
    OUTMRK = OUTMRK, "Output Marking ([RFC933](http://www.iana.org/go/rfc933))";
    TTYLOC = TTYLOC, "Terminal Location Number ([RFC946](http://www.iana.org/go/rfc946))";
    OPT3270Regime = OPT3270REGIME, "Telnet 3270 Regime ([RFC1041](http://www.iana.org/go/rfc1041))";
    X3PAD = X3PAD, "X.3 PAD ([RFC1053](http://www.iana.org/go/rfc1053))";
    NAWS = NAWS, "Negotiate About Window Size ([RFC1073](http://www.iana.org/go/rfc1073))";
    TSPEED = TSPEED, "Terminal Speed ([RFC1079](http://www.iana.org/go/rfc1079))";
    LFLOW = LFLOW, "Remote Flow Control ([RFC1372](http://www.iana.org/go/rfc1372))";
    Linemode = LINEMODE, "Linemode ([RFC1184](http://www.iana.org/go/rfc1184))";
    XDISPLOC = XDISPLOC, "X Display Location ([RFC1096](http://www.iana.org/go/rfc1096))";
    Environment = OLD_ENVIRONMENT, "Environment Option ([RFC1408](http://www.iana.org/go/rfc1408))";
    Authentication = AUTHENTICATION, "Authentication Option ([RFC2941](http://www.iana.org/go/rfc2941))";
    Encryption = ENCRYPTION, "Encryption Option ([RFC2946](http://www.iana.org/go/rfc2946))";
    NewEnvironment = NEW_ENVIRONMENT, "New Environment Option ([RFC1572](http://www.iana.org/go/rfc1572))";
    TN3270E = TN3270E, "TN3270E ([RFC2355](http://www.iana.org/go/rfc2355))";
    XAUTH = XAUTH, "XAUTH";
    Charset = CHARSET, "Charset ([RFC2066](http://www.iana.org/go/rfc2066))";
    TRSP = TRSP, "Telnet Remote Serial Port";
    CPCO = CPCO, "Com Port Control Option ([RFC2217](http://www.iana.org/go/rfc2217))";
    TSLE = TSLE, "Telnet Suppress Local Echo";
    StartTLS = START_TLS, "Telnet Start TLS";
    Kermit = KERMIT, "Kermit ([RFC2840](http://www.iana.org/go/rfc2840))";
    SendUrl = SENDURL, "SEND-URL";
    ForwardX = FORWARDX, "FORWARD_X";
    EXOPL = EXOPL, "Extended-Options-List ([RFC861](http://www.iana.org/go/rfc861))";
}

impl TelnetOption {
    /// Resolves an option by its symbol table name, ignoring case.
    ///
    /// ```
    /// use telnetio_codec::TelnetOption;
    ///
    /// assert_eq!(TelnetOption::from_name("naws").unwrap(), TelnetOption::NAWS);
    /// assert!(TelnetOption::from_name("bogus").is_err());
    /// ```
    pub fn from_name(name: &str) -> CodecResult<Self> {
        symbols::options()
            .code(name)
            .map(TelnetOption::from_u8)
            .ok_or_else(|| CodecError::UnknownOption(name.to_string()))
    }

    /// The symbol table name of this option, if it has one.
    pub fn name(&self) -> Option<&'static str> {
        symbols::options().name(self.to_u8())
    }

    /// Whether this option has an entry in the option symbol table.
    pub fn is_known(&self) -> bool {
        symbols::options().contains(self.to_u8())
    }
}

impl From<u8> for TelnetOption {
    fn from(byte: u8) -> Self {
        Self::from_u8(byte)
    }
}

impl From<TelnetOption> for u8 {
    fn from(option: TelnetOption) -> Self {
        option.to_u8()
    }
}

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


use crate::args::naws::WindowSize;
use crate::result::CodecResult;
use crate::{TelnetOption, consts};
use bytes::{BufMut, BytesMut};

pub mod naws;

///
/// Telnet Subnegotiation Argument
///
/// Each variant knows its option and its unescaped payload, i.e. the bytes between
/// `IAC SB <option>` and `IAC SE` before `IAC` doubling.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TelnetArgument {
    /// Window size in characters (NAWS).
    WindowSize(WindowSize),
    /// Terminal speed reply, `IS "<transmit>,<receive>"` (TSPEED).
    TerminalSpeed(String),
    /// Terminal type reply, `IS "<type>"` (TTYPE).
    TerminalType(String),
    /// New environment reply, `IS <variables>` (NEW-ENVIRON). Empty means "no variables".
    NewEnvironment(BytesMut),
    /// A subnegotiation for any other option, or one whose payload could not be interpreted.
    Unknown(TelnetOption, BytesMut),
}

impl TelnetArgument {
    /// The option this argument belongs to.
    pub fn option(&self) -> TelnetOption {
        match self {
            TelnetArgument::WindowSize(_) => TelnetOption::NAWS,
            TelnetArgument::TerminalSpeed(_) => TelnetOption::TSPEED,
            TelnetArgument::TerminalType(_) => TelnetOption::TTYPE,
            TelnetArgument::NewEnvironment(_) => TelnetOption::NewEnvironment,
            TelnetArgument::Unknown(option, _) => *option,
        }
    }

    /// Writes the unescaped payload into `dst`.
    pub fn encode<T: BufMut>(&self, dst: &mut T) -> CodecResult<()> {
        match self {
            TelnetArgument::WindowSize(size) => dst.put_slice(&size.to_bytes()),
            TelnetArgument::TerminalSpeed(text) | TelnetArgument::TerminalType(text) => {
                dst.put_u8(consts::IS);
                dst.put_slice(text.as_bytes());
            }
            TelnetArgument::NewEnvironment(vars) => {
                dst.put_u8(consts::IS);
                dst.put_slice(vars);
            }
            TelnetArgument::Unknown(_, payload) => dst.put_slice(payload),
        }
        Ok(())
    }

    /// The unescaped payload as an owned buffer.
    pub fn payload(&self) -> CodecResult<BytesMut> {
        let mut buffer = BytesMut::new();
        self.encode(&mut buffer)?;
        Ok(buffer)
    }

    /// Interprets an unescaped payload received for `option`.
    ///
    /// Payloads that do not fit the expected shape (for example a `SEND` request rather than an
    /// `IS` reply) are kept verbatim as [`TelnetArgument::Unknown`].
    pub fn decode(option: TelnetOption, payload: &[u8]) -> TelnetArgument {
        match (option, payload.split_first()) {
            (TelnetOption::NAWS, _) => match WindowSize::from_payload(payload) {
                Ok(size) => TelnetArgument::WindowSize(size),
                Err(_) => TelnetArgument::Unknown(option, BytesMut::from(payload)),
            },
            (TelnetOption::TSPEED, Some((&consts::IS, rest))) => {
                TelnetArgument::TerminalSpeed(String::from_utf8_lossy(rest).into_owned())
            }
            (TelnetOption::TTYPE, Some((&consts::IS, rest))) => {
                TelnetArgument::TerminalType(String::from_utf8_lossy(rest).into_owned())
            }
            (TelnetOption::NewEnvironment, Some((&consts::IS, rest))) => {
                TelnetArgument::NewEnvironment(BytesMut::from(rest))
            }
            _ => TelnetArgument::Unknown(option, BytesMut::from(payload)),
        }
    }
}

impl std::fmt::Display for TelnetArgument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TelnetArgument::WindowSize(size) => write!(f, "NAWS {size}"),
            TelnetArgument::TerminalSpeed(speed) => write!(f, "TSPEED IS {speed}"),
            TelnetArgument::TerminalType(kind) => write!(f, "TTYPE IS {kind}"),
            TelnetArgument::NewEnvironment(vars) => write!(f, "NEW-ENVIRON IS ({} bytes)", vars.len()),
            TelnetArgument::Unknown(option, payload) => {
                write!(f, "{option} ({} bytes)", payload.len())
            }
        }
    }
}

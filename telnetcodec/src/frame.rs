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


use crate::{TelnetArgument, TelnetOption, consts};

///
/// A single unit of the Telnet byte stream.
///
/// `Data` frames carry one application byte; every other variant is an `IAC`-introduced
/// command, negotiation verb or subnegotiation block.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TelnetFrame {
    /// Telnet Data Byte
    Data(u8),
    /// No Operation
    NoOperation,
    /// End of urgent Data Stream
    DataMark,
    /// Operator pressed the Break key or the Attention key.
    Break,
    /// Interrupt current process.
    InterruptProcess,
    /// Cancel output from the current process.
    AbortOutput,
    /// Request acknowledgment.
    AreYouThere,
    /// Request that the operator erase the previous character.
    EraseCharacter,
    /// Request that the operator erase the previous line.
    EraseLine,
    /// End of input for half-duplex connections.
    GoAhead,
    /// End of Record
    EndOfRecord,
    /// Ask the peer to enable an option.
    Do(TelnetOption),
    /// Ask the peer to disable an option.
    Dont(TelnetOption),
    /// Offer to enable an option locally.
    Will(TelnetOption),
    /// Refuse to enable an option locally.
    Wont(TelnetOption),
    /// Subnegotiation Payload
    Subnegotiate(TelnetArgument),
}

impl TelnetFrame {
    /// The command byte following `IAC` for two-byte commands, `None` for data, verbs and
    /// subnegotiation.
    pub fn command_byte(&self) -> Option<u8> {
        match self {
            TelnetFrame::NoOperation => Some(consts::NOP),
            TelnetFrame::DataMark => Some(consts::DM),
            TelnetFrame::Break => Some(consts::BRK),
            TelnetFrame::InterruptProcess => Some(consts::IP),
            TelnetFrame::AbortOutput => Some(consts::AO),
            TelnetFrame::AreYouThere => Some(consts::AYT),
            TelnetFrame::EraseCharacter => Some(consts::EC),
            TelnetFrame::EraseLine => Some(consts::EL),
            TelnetFrame::GoAhead => Some(consts::GA),
            TelnetFrame::EndOfRecord => Some(consts::EOR),
            _ => None,
        }
    }

    /// Builds the two-byte command frame for a command byte, if there is one.
    pub fn from_command_byte(byte: u8) -> Option<TelnetFrame> {
        match byte {
            consts::NOP => Some(TelnetFrame::NoOperation),
            consts::DM => Some(TelnetFrame::DataMark),
            consts::BRK => Some(TelnetFrame::Break),
            consts::IP => Some(TelnetFrame::InterruptProcess),
            consts::AO => Some(TelnetFrame::AbortOutput),
            consts::AYT => Some(TelnetFrame::AreYouThere),
            consts::EC => Some(TelnetFrame::EraseCharacter),
            consts::EL => Some(TelnetFrame::EraseLine),
            consts::GA => Some(TelnetFrame::GoAhead),
            consts::EOR => Some(TelnetFrame::EndOfRecord),
            _ => None,
        }
    }

    /// Number of bytes this frame occupies on the wire, ignoring payload escaping.
    pub fn len(&self) -> usize {
        match self {
            TelnetFrame::Data(consts::IAC) => 2,
            TelnetFrame::Data(_) => 1,
            TelnetFrame::Do(_) | TelnetFrame::Dont(_) | TelnetFrame::Will(_) | TelnetFrame::Wont(_) => 3,
            TelnetFrame::Subnegotiate(argument) => {
                5 + argument.payload().map(|payload| payload.len()).unwrap_or(0)
            }
            _ => 2,
        }
    }

    /// Frames always occupy at least one byte.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl std::fmt::Display for TelnetFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TelnetFrame::Data(byte) => write!(f, "Data(0x{byte:02X})"),
            TelnetFrame::Do(option) => write!(f, "DO {option}"),
            TelnetFrame::Dont(option) => write!(f, "DONT {option}"),
            TelnetFrame::Will(option) => write!(f, "WILL {option}"),
            TelnetFrame::Wont(option) => write!(f, "WONT {option}"),
            TelnetFrame::Subnegotiate(argument) => write!(f, "SB {argument}"),
            other => write!(f, "{other:?}"),
        }
    }
}

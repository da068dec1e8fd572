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


//! Scanning captured bytes for option negotiation.
//!
//! The scanner understands just enough of the stream to find `IAC DO|DONT|WILL|WONT <option>`
//! triples. An `IAC IAC` pair is escaped data and its second byte is never read as a verb, and
//! `IAC SB ... IAC SE` blocks are skipped whole so payload bytes are never mistaken for verbs.

use crate::{TelnetOption, consts};
use bytes::{BufMut, BytesMut};
use tracing::trace;

/// One of the four negotiation verbs.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum NegotiationVerb {
    /// `IAC DO`
    Do,
    /// `IAC DONT`
    Dont,
    /// `IAC WILL`
    Will,
    /// `IAC WONT`
    Wont,
}

impl NegotiationVerb {
    /// Maps a command byte to a verb.
    pub fn from_u8(byte: u8) -> Option<NegotiationVerb> {
        match byte {
            consts::DO => Some(NegotiationVerb::Do),
            consts::DONT => Some(NegotiationVerb::Dont),
            consts::WILL => Some(NegotiationVerb::Will),
            consts::WONT => Some(NegotiationVerb::Wont),
            _ => None,
        }
    }

    /// The command byte of this verb.
    pub fn to_u8(self) -> u8 {
        match self {
            NegotiationVerb::Do => consts::DO,
            NegotiationVerb::Dont => consts::DONT,
            NegotiationVerb::Will => consts::WILL,
            NegotiationVerb::Wont => consts::WONT,
        }
    }

    /// The verb that refuses this one, if this verb proposes enabling something.
    ///
    /// `DO` is refused with `WONT` and `WILL` with `DONT`.
    pub fn refusal(self) -> Option<NegotiationVerb> {
        match self {
            NegotiationVerb::Do => Some(NegotiationVerb::Wont),
            NegotiationVerb::Will => Some(NegotiationVerb::Dont),
            NegotiationVerb::Dont | NegotiationVerb::Wont => None,
        }
    }
}

impl std::fmt::Display for NegotiationVerb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NegotiationVerb::Do => write!(f, "DO"),
            NegotiationVerb::Dont => write!(f, "DONT"),
            NegotiationVerb::Will => write!(f, "WILL"),
            NegotiationVerb::Wont => write!(f, "WONT"),
        }
    }
}

/// The negotiation requests found in a byte sequence, grouped by verb in order of appearance.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NegotiationRequest {
    /// Options the peer asked us to enable (`IAC DO`).
    pub do_options: Vec<TelnetOption>,
    /// Options the peer asked us to disable (`IAC DONT`).
    pub dont_options: Vec<TelnetOption>,
    /// Options the peer offered to enable (`IAC WILL`).
    pub will_options: Vec<TelnetOption>,
    /// Options the peer refused (`IAC WONT`).
    pub wont_options: Vec<TelnetOption>,
}

impl NegotiationRequest {
    /// Scans `bytes` for negotiation triples.
    ///
    /// ```
    /// use telnetio_codec::{NegotiationRequest, TelnetOption};
    ///
    /// let parsed = NegotiationRequest::parse(b"\xFF\xFD\x01\xFF\xFC\x05");
    /// assert_eq!(parsed.do_options, vec![TelnetOption::Echo]);
    /// assert_eq!(parsed.wont_options, vec![TelnetOption::Status]);
    /// assert!(parsed.will_options.is_empty());
    /// ```
    pub fn parse(bytes: &[u8]) -> NegotiationRequest {
        scan(bytes, None)
    }

    /// The options recorded for `verb`.
    pub fn options(&self, verb: NegotiationVerb) -> &[TelnetOption] {
        match verb {
            NegotiationVerb::Do => &self.do_options,
            NegotiationVerb::Dont => &self.dont_options,
            NegotiationVerb::Will => &self.will_options,
            NegotiationVerb::Wont => &self.wont_options,
        }
    }

    /// Records `option` under `verb`.
    pub fn push(&mut self, verb: NegotiationVerb, option: TelnetOption) {
        match verb {
            NegotiationVerb::Do => self.do_options.push(option),
            NegotiationVerb::Dont => self.dont_options.push(option),
            NegotiationVerb::Will => self.will_options.push(option),
            NegotiationVerb::Wont => self.wont_options.push(option),
        }
    }

    /// Whether `option` was recorded under `verb`.
    pub fn contains(&self, verb: NegotiationVerb, option: TelnetOption) -> bool {
        self.options(verb).contains(&option)
    }

    /// Whether no negotiation was found at all.
    pub fn is_empty(&self) -> bool {
        self.do_options.is_empty()
            && self.dont_options.is_empty()
            && self.will_options.is_empty()
            && self.wont_options.is_empty()
    }

    /// Total number of recorded negotiation triples.
    pub fn len(&self) -> usize {
        self.do_options.len() + self.dont_options.len() + self.will_options.len() + self.wont_options.len()
    }

    /// Builds the reply that declines everything the peer proposed to enable.
    ///
    /// Every `DO` is answered with `WONT` and every `WILL` with `DONT`; `DONT` and `WONT` need
    /// no answer.
    pub fn refusal(&self) -> BytesMut {
        let mut reply = BytesMut::with_capacity(3 * (self.do_options.len() + self.will_options.len()));
        for (verb, options) in [
            (NegotiationVerb::Do, &self.do_options),
            (NegotiationVerb::Will, &self.will_options),
        ] {
            let Some(answer) = verb.refusal() else {
                continue;
            };
            for option in options {
                reply.put_u8(consts::IAC);
                reply.put_u8(answer.to_u8());
                reply.put_u8(option.to_u8());
            }
        }
        reply
    }
}

/// Removes every Telnet command sequence from `bytes`.
///
/// Negotiation triples are dropped and returned in the [`NegotiationRequest`], two-byte
/// commands and whole `IAC SB ... IAC SE` blocks are dropped, and `IAC IAC` becomes a single
/// `0xFF` data byte. A sequence truncated by the end of the input is dropped.
pub fn strip_negotiation(bytes: &[u8]) -> (BytesMut, NegotiationRequest) {
    let mut data = BytesMut::with_capacity(bytes.len());
    let request = scan(bytes, Some(&mut data));
    (data, request)
}

fn scan(bytes: &[u8], mut data: Option<&mut BytesMut>) -> NegotiationRequest {
    let mut request = NegotiationRequest::default();
    let mut index = 0;
    while index < bytes.len() {
        let byte = bytes[index];
        if byte != consts::IAC {
            if let Some(data) = data.as_deref_mut() {
                data.put_u8(byte);
            }
            index += 1;
            continue;
        }
        let Some(&command) = bytes.get(index + 1) else {
            break;
        };
        match command {
            consts::IAC => {
                if let Some(data) = data.as_deref_mut() {
                    data.put_u8(consts::IAC);
                }
                index += 2;
            }
            consts::SB => {
                index = skip_subnegotiation(bytes, index + 2);
            }
            verb_byte => match NegotiationVerb::from_u8(verb_byte) {
                Some(verb) => {
                    let Some(&option) = bytes.get(index + 2) else {
                        break;
                    };
                    trace!(%verb, option, "found negotiation");
                    request.push(verb, TelnetOption::from_u8(option));
                    index += 3;
                }
                None => index += 2,
            },
        }
    }
    request
}

/// Returns the index just past the `IAC SE` closing a subnegotiation whose payload starts at
/// `start`, or the end of input if it is never closed.
fn skip_subnegotiation(bytes: &[u8], start: usize) -> usize {
    let mut index = start;
    while index < bytes.len() {
        if bytes[index] == consts::IAC {
            match bytes.get(index + 1) {
                Some(&consts::SE) => return index + 2,
                Some(_) => index += 2,
                None => return bytes.len(),
            }
        } else {
            index += 1;
        }
    }
    bytes.len()
}

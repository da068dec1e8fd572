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


use super::{CodecError, TelnetArgument, TelnetFrame, TelnetOption, consts};
use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::warn;

/// Doubles every `IAC` byte in `data` so it is transmitted as data rather than as a command
/// introducer.
///
/// ```
/// use telnetio_codec::escape;
///
/// assert_eq!(&escape(b"a\xFFb")[..], b"a\xFF\xFFb");
/// ```
pub fn escape(data: &[u8]) -> BytesMut {
    let mut dst = BytesMut::with_capacity(data.len());
    escape_into(data, &mut dst);
    dst
}

/// Appends `data` to `dst`, doubling every `IAC` byte.
pub fn escape_into(data: &[u8], dst: &mut BytesMut) {
    let extra = data.iter().filter(|&&byte| byte == consts::IAC).count();
    dst.reserve(data.len() + extra);
    for &byte in data {
        if byte == consts::IAC {
            dst.put_u8(consts::IAC);
        }
        dst.put_u8(byte);
    }
}

/// Collapses every `IAC IAC` pair in `data` into a single `0xFF` byte.
///
/// All other bytes, including a lone `IAC` at the end of the input, are copied unchanged. For
/// any input, `unescape(&escape(data)) == data`.
pub fn unescape(data: &[u8]) -> BytesMut {
    let mut dst = BytesMut::with_capacity(data.len());
    let mut index = 0;
    while index < data.len() {
        let byte = data[index];
        dst.put_u8(byte);
        if byte == consts::IAC && data.get(index + 1) == Some(&consts::IAC) {
            index += 2;
        } else {
            index += 1;
        }
    }
    dst
}

/// A codec for the Telnet wire format.
///
/// Encoding turns [`TelnetFrame`]s into bytes, escaping `IAC` in data and subnegotiation
/// payloads. Decoding is a byte-at-a-time state machine that yields one frame per call and
/// resumes correctly when a sequence is split across reads.
///
/// The codec does not track negotiation state; answering the peer is left to the caller.
#[derive(Debug, Default)]
pub struct TelnetCodec {
    phase: Phase,
    payload: BytesMut,
}

impl TelnetCodec {
    /// Creates a codec positioned between frames.
    ///
    /// # Example
    /// ```
    /// use telnetio_codec::TelnetCodec;
    ///
    /// let codec = TelnetCodec::new();
    /// assert!(codec.is_idle());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the decoder sits between frames.
    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Text
    }

    /// Encodes a sequence of frames into a fresh buffer.
    pub fn encode_all<I>(&mut self, frames: I) -> Result<BytesMut, CodecError>
    where
        I: IntoIterator<Item = TelnetFrame>,
    {
        let mut out = BytesMut::new();
        frames
            .into_iter()
            .try_for_each(|frame| self.encode(frame, &mut out))?;
        Ok(out)
    }

    /// Advances the parser by one byte, returning a frame when one completes.
    fn step(&mut self, byte: u8) -> Option<TelnetFrame> {
        let (next, frame) = match self.phase {
            Phase::Text if byte == consts::IAC => (Phase::Command, None),
            Phase::Text => (Phase::Text, Some(TelnetFrame::Data(byte))),
            Phase::Command => match byte {
                consts::IAC => (Phase::Text, Some(TelnetFrame::Data(consts::IAC))),
                consts::DO | consts::DONT | consts::WILL | consts::WONT => {
                    (Phase::Verb(byte), None)
                }
                consts::SB => (Phase::SubOption, None),
                _ => (Phase::Text, Some(command_frame(byte))),
            },
            Phase::Verb(verb) => (Phase::Text, Some(verb_frame(verb, byte))),
            Phase::SubOption => (Phase::SubPayload(byte), None),
            Phase::SubPayload(option) if byte == consts::IAC => (Phase::SubPayloadIac(option), None),
            Phase::SubPayload(option) => {
                self.payload.put_u8(byte);
                (Phase::SubPayload(option), None)
            }
            Phase::SubPayloadIac(option) => match byte {
                consts::IAC => {
                    self.payload.put_u8(consts::IAC);
                    (Phase::SubPayload(option), None)
                }
                consts::SE => {
                    let payload = self.payload.split();
                    let argument = TelnetArgument::decode(TelnetOption::from_u8(option), &payload);
                    (Phase::Text, Some(TelnetFrame::Subnegotiate(argument)))
                }
                _ => {
                    self.payload.clear();
                    warn!(option, command = byte, "Subnegotiation interrupted, discarding payload");
                    (Phase::Text, Some(TelnetFrame::NoOperation))
                }
            },
        };
        self.phase = next;
        frame
    }
}

impl Decoder for TelnetCodec {
    type Item = TelnetFrame;
    type Error = CodecError;

    /// Decodes the next frame from `src`.
    ///
    /// Returns `Ok(None)` once `src` is exhausted; any partially received sequence is kept in
    /// the decoder state and completed by the next call. Unknown commands and malformed
    /// subnegotiation terminators are logged and reported as [`TelnetFrame::NoOperation`].
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<TelnetFrame>, Self::Error> {
        while src.has_remaining() {
            if let Some(frame) = self.step(src.get_u8()) {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }
}

fn command_frame(byte: u8) -> TelnetFrame {
    TelnetFrame::from_command_byte(byte).unwrap_or_else(|| {
        warn!(command = byte, "Unknown command byte after IAC");
        TelnetFrame::NoOperation
    })
}

fn verb_frame(verb: u8, option: u8) -> TelnetFrame {
    let option = TelnetOption::from_u8(option);
    match verb {
        consts::DO => TelnetFrame::Do(option),
        consts::DONT => TelnetFrame::Dont(option),
        consts::WILL => TelnetFrame::Will(option),
        _ => TelnetFrame::Wont(option),
    }
}

impl Encoder<TelnetFrame> for TelnetCodec {
    type Error = CodecError;

    fn encode(&mut self, item: TelnetFrame, dst: &mut BytesMut) -> Result<(), Self::Error> {
        match item {
            TelnetFrame::Data(byte) => escape_into(&[byte], dst),
            TelnetFrame::Do(option) => put_verb(dst, consts::DO, option),
            TelnetFrame::Dont(option) => put_verb(dst, consts::DONT, option),
            TelnetFrame::Will(option) => put_verb(dst, consts::WILL, option),
            TelnetFrame::Wont(option) => put_verb(dst, consts::WONT, option),
            TelnetFrame::Subnegotiate(argument) => {
                let payload = argument.payload()?;
                dst.extend_from_slice(&[consts::IAC, consts::SB, argument.option().to_u8()]);
                escape_into(&payload, dst);
                dst.extend_from_slice(&[consts::IAC, consts::SE]);
            }
            command => {
                let byte = command
                    .command_byte()
                    .ok_or(CodecError::UnknownCommand(consts::NULL))?;
                dst.extend_from_slice(&[consts::IAC, byte]);
            }
        }
        Ok(())
    }
}

impl Encoder<u8> for TelnetCodec {
    type Error = CodecError;

    fn encode(&mut self, item: u8, dst: &mut BytesMut) -> Result<(), Self::Error> {
        self.encode(TelnetFrame::Data(item), dst)
    }
}

impl Encoder<&[u8]> for TelnetCodec {
    type Error = CodecError;

    fn encode(&mut self, item: &[u8], dst: &mut BytesMut) -> Result<(), Self::Error> {
        escape_into(item, dst);
        Ok(())
    }
}

fn put_verb(dst: &mut BytesMut, verb: u8, option: TelnetOption) {
    dst.extend_from_slice(&[consts::IAC, verb, option.to_u8()]);
}

/// Where the decoder sits within the byte stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Phase {
    /// Between frames.
    #[default]
    Text,
    /// After `IAC`.
    Command,
    /// After `IAC` and a verb byte, awaiting the option.
    Verb(u8),
    /// After `IAC SB`, awaiting the option.
    SubOption,
    /// Collecting the payload for an option.
    SubPayload(u8),
    /// Saw `IAC` inside a payload.
    SubPayloadIac(u8),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naws::WindowSize;
    use tracing_test::traced_test;

    fn decode_all(codec: &mut TelnetCodec, input: &[u8]) -> Vec<TelnetFrame> {
        let mut buffer = BytesMut::from(input);
        let mut frames = Vec::new();
        while let Some(frame) = codec.decode(&mut buffer).unwrap() {
            frames.push(frame);
        }
        frames
    }

    #[test]
    fn escape_doubles_iac() {
        assert_eq!(&escape(&[1, 0xFF, 2, 0xFF, 0xFF])[..], &[1, 0xFF, 0xFF, 2, 0xFF, 0xFF, 0xFF, 0xFF]);
        assert!(escape(&[]).is_empty());
    }

    #[test]
    fn unescape_collapses_pairs() {
        assert_eq!(&unescape(&[0xFF, 0xFF, b'a'])[..], &[0xFF, b'a']);
        assert_eq!(&unescape(&[b'a', 0xFF])[..], &[b'a', 0xFF]);
        assert_eq!(&unescape(&[0xFF, 0xFF, 0xFF])[..], &[0xFF, 0xFF]);
    }

    #[test]
    fn decode_data_and_negotiation() {
        let mut codec = TelnetCodec::new();
        let frames = decode_all(&mut codec, b"ok\xFF\xFD\x01\xFF\xFC\x05!");
        assert_eq!(
            frames,
            vec![
                TelnetFrame::Data(b'o'),
                TelnetFrame::Data(b'k'),
                TelnetFrame::Do(TelnetOption::Echo),
                TelnetFrame::Wont(TelnetOption::Status),
                TelnetFrame::Data(b'!'),
            ]
        );
    }

    #[test]
    fn decode_escaped_iac_as_data() {
        let mut codec = TelnetCodec::new();
        let frames = decode_all(&mut codec, &[consts::IAC, consts::IAC, consts::DO, 1]);
        assert_eq!(
            frames,
            vec![
                TelnetFrame::Data(consts::IAC),
                TelnetFrame::Data(consts::DO),
                TelnetFrame::Data(1),
            ]
        );
    }

    #[test]
    fn decode_resumes_split_sequences() {
        let mut codec = TelnetCodec::new();
        assert!(decode_all(&mut codec, &[consts::IAC]).is_empty());
        assert!(!codec.is_idle());
        assert_eq!(
            decode_all(&mut codec, &[consts::WILL, consts::option::SGA]),
            vec![TelnetFrame::Will(TelnetOption::SuppressGoAhead)]
        );
        assert!(codec.is_idle());
    }

    #[test]
    fn decode_subnegotiation() {
        let mut codec = TelnetCodec::new();
        let frames = decode_all(
            &mut codec,
            &[consts::IAC, consts::SB, consts::option::NAWS, 0, 80, 0, 24, consts::IAC, consts::SE],
        );
        assert_eq!(
            frames,
            vec![TelnetFrame::Subnegotiate(TelnetArgument::WindowSize(WindowSize::new(80, 24)))]
        );
    }

    #[test]
    fn encode_subnegotiation_escapes_payload() {
        let mut codec = TelnetCodec::new();
        let mut buffer = BytesMut::new();
        codec
            .encode(
                TelnetFrame::Subnegotiate(TelnetArgument::WindowSize(WindowSize::new(255, 24))),
                &mut buffer,
            )
            .unwrap();
        assert_eq!(
            &buffer[..],
            &[consts::IAC, consts::SB, consts::option::NAWS, 0, 0xFF, 0xFF, 0, 24, consts::IAC, consts::SE]
        );
    }

    #[test]
    fn encode_commands_and_verbs() {
        let mut codec = TelnetCodec::new();
        let buffer = codec
            .encode_all([
                TelnetFrame::AreYouThere,
                TelnetFrame::Will(TelnetOption::NAWS),
                TelnetFrame::Data(0xFF),
            ])
            .unwrap();
        assert_eq!(
            &buffer[..],
            &[consts::IAC, consts::AYT, consts::IAC, consts::WILL, 31, 0xFF, 0xFF]
        );
    }

    #[test]
    #[traced_test]
    fn interrupted_subnegotiation_is_discarded() {
        let mut codec = TelnetCodec::new();
        let frames = decode_all(
            &mut codec,
            &[consts::IAC, consts::SB, consts::option::NAWS, 0, 80, consts::IAC, consts::NOP, b'x'],
        );
        assert_eq!(frames, vec![TelnetFrame::NoOperation, TelnetFrame::Data(b'x')]);
        assert!(codec.is_idle());
        assert!(logs_contain("Subnegotiation interrupted"));
    }
}

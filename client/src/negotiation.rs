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


//! Directed option negotiation

use crate::{ClientError, Result, TelnetClient, Transport};
use telnetio_codec::{NegotiationRequest, NegotiationVerb, TelnetFrame, TelnetOption};
use tracing::debug;

impl<T: Transport> TelnetClient<T> {
    /// Offer to enable `option` locally (`IAC WILL option`).
    ///
    /// Returns `true` if the peer answers DO and `false` if it answers DONT. Any other
    /// reply is [`ClientError::NegotiationFailed`].
    pub fn offer_option(&mut self, option: TelnetOption) -> Result<bool> {
        self.negotiate(NegotiationVerb::Will, option)
    }

    /// Ask the peer to enable `option` (`IAC DO option`).
    ///
    /// Returns `true` if the peer answers WILL and `false` if it answers WONT.
    pub fn request_option(&mut self, option: TelnetOption) -> Result<bool> {
        self.negotiate(NegotiationVerb::Do, option)
    }

    /// Refuse everything the peer proposed in `request`.
    pub fn refuse(&mut self, request: &NegotiationRequest) -> Result<()> {
        let refusal = request.refusal();
        if refusal.is_empty() {
            return Ok(());
        }
        debug!(options = request.len(), "Refusing peer proposals");
        self.write_command(&refusal, false)
    }

    fn negotiate(&mut self, verb: NegotiationVerb, option: TelnetOption) -> Result<bool> {
        if !option.is_known() {
            return Err(ClientError::UnknownOption(option.to_string()));
        }
        let (frame, accept, decline) = match verb {
            NegotiationVerb::Will | NegotiationVerb::Wont => (
                TelnetFrame::Will(option),
                NegotiationVerb::Do,
                NegotiationVerb::Dont,
            ),
            NegotiationVerb::Do | NegotiationVerb::Dont => (
                TelnetFrame::Do(option),
                NegotiationVerb::Will,
                NegotiationVerb::Wont,
            ),
        };

        debug!(%frame, "Negotiating");
        self.write_frame(frame)?;
        self.pace();
        let reply = self.read_bytes(3)?;
        let parsed = NegotiationRequest::parse(&reply);

        if parsed.contains(accept, option) {
            debug!(%option, "Peer accepted");
            Ok(true)
        } else if parsed.contains(decline, option) {
            debug!(%option, "Peer declined");
            Ok(false)
        } else {
            Err(ClientError::NegotiationFailed {
                option,
                reply: reply.to_vec(),
            })
        }
    }
}

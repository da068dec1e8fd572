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


//! Unit tests for telnetcodec components

use proptest::prelude::*;
use telnetio_codec::{TelnetArgument, TelnetFrame, TelnetOption, naws, symbols};

// ============================================================================
// Symbol Table Tests
// ============================================================================

#[test]
fn command_table_contents() {
    let table = symbols::commands();
    for name in [
        "NULL", "EOR", "SE", "NOP", "DM", "BRK", "IP", "AO", "AYT", "EC", "EL", "GA", "SB",
        "WILL", "WONT", "DO", "DONT", "IAC",
    ] {
        assert!(table.code(name).is_some(), "missing command {name}");
    }
}

#[test]
fn option_table_contents() {
    let table = symbols::options();
    for name in [
        "BINARY",
        "ECHO",
        "SGA",
        "STATUS",
        "TM",
        "TTYPE",
        "EOR",
        "NAWS",
        "TSPEED",
        "LFLOW",
        "LINEMODE",
        "NEW_ENVIRON",
        "AUTHENTICATION",
        "ENCRYPT",
        "START_TLS",
    ] {
        assert!(table.code(name).is_some(), "missing option {name}");
    }
}

#[test]
fn tables_are_shared() {
    assert!(std::ptr::eq(symbols::commands(), symbols::commands()));
    assert!(std::ptr::eq(symbols::options(), symbols::options()));
}

#[test]
fn tables_are_usable_from_threads() {
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| symbols::options().code("echo")))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), Some(1));
    }
}

proptest! {
    #[test]
    fn option_lookup_round_trips(index in 0usize..51) {
        let (name, code) = symbols::options().all()[index % symbols::options().len()];
        prop_assert_eq!(symbols::options().name(code), Some(name));
        prop_assert_eq!(symbols::options().code(&name.to_lowercase()), Some(code));
    }
}

// ============================================================================
// TelnetOption Tests
// ============================================================================

#[test]
fn telnet_option_from_u8() {
    assert_eq!(TelnetOption::from(0), TelnetOption::TransmitBinary);
    assert_eq!(TelnetOption::from(1), TelnetOption::Echo);
    assert_eq!(TelnetOption::from(3), TelnetOption::SuppressGoAhead);
    assert_eq!(TelnetOption::from(255), TelnetOption::EXOPL);
    assert_eq!(TelnetOption::from(200), TelnetOption::Unknown(200));
}

#[test]
fn telnet_option_to_u8() {
    assert_eq!(u8::from(TelnetOption::TransmitBinary), 0);
    assert_eq!(u8::from(TelnetOption::NAWS), 31);
    assert_eq!(u8::from(TelnetOption::StartTLS), 46);
    assert_eq!(u8::from(TelnetOption::Unknown(200)), 200);
}

#[test]
fn telnet_option_from_name() {
    assert_eq!(TelnetOption::from_name("ttype").unwrap(), TelnetOption::TTYPE);
    assert_eq!(TelnetOption::from_name("LOGOUT").unwrap(), TelnetOption::Logout);
    assert!(TelnetOption::from_name("NOT_AN_OPTION").is_err());
}

// ============================================================================
// TelnetFrame / TelnetArgument Tests
// ============================================================================

#[test]
fn telnet_frame_command_bytes() {
    assert_eq!(TelnetFrame::AreYouThere.command_byte(), Some(246));
    assert_eq!(TelnetFrame::from_command_byte(244), Some(TelnetFrame::InterruptProcess));
    assert_eq!(TelnetFrame::Data(b'a').command_byte(), None);
}

#[test]
fn telnet_frame_len() {
    assert_eq!(TelnetFrame::Data(b'a').len(), 1);
    assert_eq!(TelnetFrame::Data(0xFF).len(), 2);
    assert_eq!(TelnetFrame::Will(TelnetOption::Echo).len(), 3);
    assert_eq!(
        TelnetFrame::Subnegotiate(TelnetArgument::WindowSize(naws::WindowSize::default())).len(),
        9
    );
}

#[test]
fn telnet_frame_display() {
    assert_eq!(TelnetFrame::Do(TelnetOption::Echo).to_string(), "DO Echo");
    assert_eq!(
        TelnetFrame::Subnegotiate(TelnetArgument::TerminalType("vt100".to_string())).to_string(),
        "SB TTYPE IS vt100"
    );
}

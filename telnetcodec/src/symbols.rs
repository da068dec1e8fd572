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


//! Bidirectional name ↔ byte tables for Telnet commands and options.
//!
//! Two tables exist for the lifetime of the process: [`commands`] and [`options`]. Both are built
//! on first access and are read-only afterwards, so they can be shared freely between threads.
//!
//! ```
//! use telnetio_codec::symbols;
//!
//! assert_eq!(symbols::commands().code("iac"), Some(255));
//! assert_eq!(symbols::options().name(1), Some("ECHO"));
//! ```

use crate::consts::{self, option};
use std::collections::HashMap;
use std::sync::LazyLock;

const COMMAND_SYMBOLS: &[(&str, u8)] = &[
    ("NULL", consts::NULL),
    ("EOF", consts::EOF),
    ("SUSP", consts::SUSP),
    ("ABORT", consts::ABORT),
    ("EOR", consts::EOR),
    ("SE", consts::SE),
    ("NOP", consts::NOP),
    ("DM", consts::DM),
    ("BRK", consts::BRK),
    ("IP", consts::IP),
    ("AO", consts::AO),
    ("AYT", consts::AYT),
    ("EC", consts::EC),
    ("EL", consts::EL),
    ("GA", consts::GA),
    ("SB", consts::SB),
    ("WILL", consts::WILL),
    ("WONT", consts::WONT),
    ("DO", consts::DO),
    ("DONT", consts::DONT),
    ("IAC", consts::IAC),
];

const OPTION_SYMBOLS: &[(&str, u8)] = &[
    ("BINARY", option::BINARY),
    ("ECHO", option::ECHO),
    ("RCP", option::RCP),
    ("SGA", option::SGA),
    ("NAMS", option::NAMS),
    ("STATUS", option::STATUS),
    ("TM", option::TM),
    ("RCTE", option::RCTE),
    ("NAOL", option::NAOL),
    ("NAOP", option::NAOP),
    ("NAOCRD", option::NAOCRD),
    ("NAOHTS", option::NAOHTS),
    ("NAOHTD", option::NAOHTD),
    ("NAOFFD", option::NAOFFD),
    ("NAOVTS", option::NAOVTS),
    ("NAOVTD", option::NAOVTD),
    ("NAOLFD", option::NAOLFD),
    ("XASCII", option::XASCII),
    ("LOGOUT", option::LOGOUT),
    ("BM", option::BM),
    ("DET", option::DET),
    ("SUPDUP", option::SUPDUP),
    ("SUPDUP_OUTPUT", option::SUPDUP_OUTPUT),
    ("SNDLOC", option::SNDLOC),
    ("TTYPE", option::TTYPE),
    ("EOR", option::EOR),
    ("TUID", option::TUID),
    ("OUTMRK", option::OUTMRK),
    ("TTYLOC", option::TTYLOC),
    ("3270_REGIME", option::OPT3270REGIME),
    ("X3PAD", option::X3PAD),
    ("NAWS", option::NAWS),
    ("TSPEED", option::TSPEED),
    ("LFLOW", option::LFLOW),
    ("LINEMODE", option::LINEMODE),
    ("XDISPLOC", option::XDISPLOC),
    ("OLD_ENVIRON", option::OLD_ENVIRONMENT),
    ("AUTHENTICATION", option::AUTHENTICATION),
    ("ENCRYPT", option::ENCRYPTION),
    ("NEW_ENVIRON", option::NEW_ENVIRONMENT),
    ("TN3270E", option::TN3270E),
    ("XAUTH", option::XAUTH),
    ("CHARSET", option::CHARSET),
    ("RSP", option::TRSP),
    ("COM_PORT_OPTION", option::CPCO),
    ("SUPPRESS_LOCAL_ECHO", option::TSLE),
    ("START_TLS", option::START_TLS),
    ("KERMIT", option::KERMIT),
    ("SEND_URL", option::SENDURL),
    ("FORWARD_X", option::FORWARDX),
    ("EXOPL", option::EXOPL),
];

static COMMANDS: LazyLock<SymbolTable> = LazyLock::new(|| SymbolTable::new(COMMAND_SYMBOLS));
static OPTIONS: LazyLock<SymbolTable> = LazyLock::new(|| SymbolTable::new(OPTION_SYMBOLS));

/// The Telnet command table (`IAC`, `WILL`, `SB`, `AYT`, ...).
pub fn commands() -> &'static SymbolTable {
    &COMMANDS
}

/// The Telnet option table (`ECHO`, `SGA`, `NAWS`, `TTYPE`, ...).
pub fn options() -> &'static SymbolTable {
    &OPTIONS
}

/// An immutable mapping between symbolic names and single-byte wire codes.
///
/// Name lookups ignore ASCII case. Codes are unique within a table.
#[derive(Debug)]
pub struct SymbolTable {
    entries: &'static [(&'static str, u8)],
    by_name: HashMap<String, u8>,
    by_code: HashMap<u8, &'static str>,
}

impl SymbolTable {
    fn new(entries: &'static [(&'static str, u8)]) -> SymbolTable {
        let mut by_name = HashMap::with_capacity(entries.len());
        let mut by_code = HashMap::with_capacity(entries.len());
        for &(name, code) in entries {
            by_name.insert(name.to_ascii_uppercase(), code);
            let previous = by_code.insert(code, name);
            debug_assert!(previous.is_none(), "duplicate code {code} for {name}");
        }
        SymbolTable {
            entries,
            by_name,
            by_code,
        }
    }

    /// Looks up the wire code for `name`, ignoring case.
    pub fn code(&self, name: &str) -> Option<u8> {
        self.by_name.get(&name.trim().to_ascii_uppercase()).copied()
    }

    /// Looks up the canonical name for `code`.
    pub fn name(&self, code: u8) -> Option<&'static str> {
        self.by_code.get(&code).copied()
    }

    /// Returns `true` if `code` is defined in this table.
    pub fn contains(&self, code: u8) -> bool {
        self.by_code.contains_key(&code)
    }

    /// All `(name, code)` pairs in definition order.
    pub fn all(&self) -> &'static [(&'static str, u8)] {
        self.entries
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

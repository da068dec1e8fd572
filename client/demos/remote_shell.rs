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


//! Remote shell demo
//!
//! Logs in to a Telnet host and runs each line typed on stdin as a remote command.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p telnetio-client --example remote_shell -- localhost 23 guest
//! ```

use std::io::{self, BufRead, Write};
use telnetio_client::{ClientConfig, ReadStatus, TelnetClient};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let host = args.get(1).map_or("localhost", String::as_str);
    let port: u16 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(23);
    let user = args.get(3).map_or("guest", String::as_str);

    let mut client = TelnetClient::new(ClientConfig::new(host, port));
    client.connect()?;

    let (banner, status) = client.read_until(b"login: ", 0, false)?;
    print!("{}", String::from_utf8_lossy(&banner));
    if status == ReadStatus::Success {
        client.write(user.as_bytes(), true)?;
    }
    let (greeting, _) = client.wait_for_prompt(false)?;
    print!("{}", String::from_utf8_lossy(&greeting));
    io::stdout().flush()?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim() == "exit" {
            break;
        }
        println!("{}", client.run_command(&line)?);
        print!("{}", client.settings().prompt);
        io::stdout().flush()?;
    }

    client.disconnect()?;
    Ok(())
}

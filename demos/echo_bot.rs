//! Echo bot example
//!
//! Connects to a server, registers, joins a channel and repeats every
//! channel message that starts with `!echo `. `!quit` makes it leave.
//!
//! ```text
//! RUST_LOG=slirc_line=debug cargo run --example echo_bot -- irc.libera.chat 6667 '#slirc-test'
//! ```

use std::env;

use slirc_line::{Connection, ConnectionError, ReadMode};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = env::args().skip(1);
    let host = args.next().unwrap_or_else(|| "irc.libera.chat".to_owned());
    let port = args.next().map(|p| p.parse()).transpose()?.unwrap_or(6667);
    let channel = args.next().unwrap_or_else(|| "#slirc-test".to_owned());

    let mut conn = Connection::new();
    conn.connect(&host, port)?;
    conn.set_nick("slirc_echo")?;
    conn.set_user(None, Some("slirc-line echo bot"))?;

    loop {
        let event = match conn.parse(ReadMode::Blocking) {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(ConnectionError::TransportClosed) => {
                info!("server closed the connection");
                return Ok(());
            }
            Err(e) => {
                error!(error = %e, "connection lost");
                return Err(e.into());
            }
        };

        if event.is_fallback() {
            info!(line = ?event.message(), "unparsed line");
            continue;
        }

        match event.command() {
            // End of MOTD: registration is complete.
            Some("376") | Some("422") => {
                conn.join(&channel, None)?;
                info!(%channel, "joined");
            }
            Some("PRIVMSG") => {
                let target = event.destination().map(|d| d.first().to_owned());
                let text = event.message().unwrap_or_default();
                if let (Some(target), Some(echo)) = (target, text.strip_prefix("!echo ")) {
                    conn.say(&target, echo)?;
                } else if text == "!quit" {
                    conn.quit(Some("asked to leave"));
                    return Ok(());
                }
            }
            _ => {}
        }
    }
}

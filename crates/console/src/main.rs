//! Replays a JSON session script through the catalog and prints the payload.
//!
//! Usage: `shopdesk-console [SCRIPT.json]` (reads stdin when no path is given).

mod config;
mod script;

use std::io::Read;

use anyhow::Context;

use shopdesk_catalog::CategoryBoard;

use crate::config::ConsoleConfig;
use crate::script::SessionScript;

fn main() -> anyhow::Result<()> {
    shopdesk_observability::init();

    let config = ConsoleConfig::from_env()?;

    let raw = match std::env::args().nth(1) {
        Some(path) => {
            std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading script from stdin")?;
            buf
        }
    };

    let script = SessionScript::parse(&raw)?;
    let mut board = CategoryBoard::new();
    let submission = script.replay(&mut board, config.wizard)?;

    tracing::info!(product_id = %submission.id, "payload ready");
    println!("{}", submission.to_json_pretty()?);
    Ok(())
}

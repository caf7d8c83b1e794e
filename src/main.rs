// SPDX-FileCopyrightText: 2026 Mocap Link contributors
// SPDX-License-Identifier: LicenseRef-MocapLink-Proprietary
//
// All rights reserved.
//
// This file is part of Mocap Link and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mocap Link CLI entrypoint.
//!
//! Runs the interactive TUI by default. `replay` drives a session headlessly from a TOML script
//! and prints the resulting selection snapshot as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use mocap_link::config::{ReplayScript, SessionConfig};
use mocap_link::replay;

#[derive(Debug, Parser)]
#[command(name = "mocap-link")]
#[command(about = "Linked-index selection for multi-trial motion capture")]
struct Cli {
    /// Session description (stride, trials, key bindings).
    #[arg(long, global = true)]
    session: Option<PathBuf>,

    /// Use the built-in demo trials instead of the ones listed in the session file.
    #[arg(long, global = true)]
    demo: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive terminal UI (default)
    Tui,
    /// Apply a script of input cycles and print the selection snapshot
    Replay {
        #[arg(long, short)]
        script: PathBuf,

        /// Write the snapshot here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

fn init_logging(interactive: bool) {
    // The TUI owns the terminal; only log there when explicitly asked to.
    let default_filter = if interactive { "off" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Tui);
    init_logging(matches!(command, Command::Tui));

    let config = match &cli.session {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("failed to load session {}", path.display()))?,
        None => SessionConfig::default(),
    };
    let mut session = config.build_session(cli.demo).context("failed to build session")?;
    info!("session ready with {} trials", session.trials().len());

    match command {
        Command::Tui => mocap_link::tui::run(session, config.keys).context("terminal UI failed"),
        Command::Replay { script, output } => {
            let script = ReplayScript::load(&script)
                .with_context(|| format!("failed to load script {}", script.display()))?;
            let outcome = replay::run_script(&mut session, &script)?;
            let json = outcome.to_json()?;
            match output {
                Some(path) => std::fs::write(&path, json)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => println!("{json}"),
            }
            Ok(())
        }
    }
}

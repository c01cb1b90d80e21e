// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

mod board_format;
mod cli;
mod config;
mod history;
mod ids;
mod input;
mod locale;
mod met;
mod report;
mod state;
mod types;
mod ui;

use board_format::AsciiBoard;
use cli::{CliArgs, Scope};
use history::StatsStore;
use log::debug;
use report::{AlwaysOverwrite, ConfirmOverwrite, Destination, ExportContext, ExportOutcome};

const GENERATOR: &str = concat!("gammon-report ", env!("CARGO_PKG_VERSION"));

fn main() {
    env_logger::init();

    // Parse CLI arguments
    let args = CliArgs::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        ui::print_error(&e);
        std::process::exit(1);
    }

    match run(&args) {
        Ok(ExportOutcome::Written(targets)) => {
            let files: Vec<String> =
                targets.iter().filter(|t| **t != Destination::Stdout).map(|t| t.to_string()).collect();
            if !files.is_empty() {
                ui::status(&format!("Wrote {}", files.join(", ")));
            }
        }
        Ok(ExportOutcome::Declined) => {
            ui::status("Export cancelled; existing file left unchanged");
        }
        Err(e) => {
            ui::print_error(&e);
            std::process::exit(1);
        }
    }
}

/// Load everything the export needs and run it
fn run(args: &CliArgs) -> Result<ExportOutcome, String> {
    let settings = config::build_settings(args).map_err(|e| format!("Configuration error: {}", e))?;
    let dest = Destination::parse(args.output_arg()?)?;

    let mut m = input::load_match(&args.input)?;
    for game in &mut m.games {
        report::update_from_game(game);
    }

    let locale = config::load_locale(args)?;
    let met = config::load_met(args)?;
    let store = config::open_stats_store(args);
    if settings.units == report::OutputUnits::Mwc && met.is_none() {
        debug!("No match equity table configured; equities are shown instead of MWC");
    }

    let ctx = ExportContext {
        settings: &settings,
        players: &m.players,
        info: &m.info,
        renderer: &AsciiBoard,
        locale: locale.as_ref(),
        met: met.as_ref(),
        history: store.as_ref().map(|s| s as &dyn StatsStore),
        generated_on: chrono::Local::now().date_naive(),
        generator: GENERATOR,
    };

    let prompt: Box<dyn ConfirmOverwrite> = if args.force { Box::new(AlwaysOverwrite) } else { Box::new(ui::PromptConfirm) };
    let game = args.game_index().unwrap_or_else(|| m.games.len().saturating_sub(1));

    debug!("Exporting {:?} of {} to {}", args.scope, args.input.display(), dest);
    match args.scope {
        Scope::Match => report::export_match(&m, &dest, prompt.as_ref(), &ctx),
        Scope::Game => report::export_game(&m, game, &dest, prompt.as_ref(), &ctx),
        Scope::Position => report::export_position(&m, game, args.record_index(), &dest, prompt.as_ref(), &ctx),
    }
}

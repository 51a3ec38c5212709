#![forbid(unsafe_code)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::sync::atomic::Ordering;
use std::sync::{mpsc, Arc};
use std::time::Duration;
use tracing::{debug, info, warn};
use tracing_subscriber::FmtSubscriber;

use cli::{field_value, Cli, Command, EditOp};
use tzboard::codec::link_path;
use tzboard::config::{log_level_from_env, Settings};
use tzboard::constants::display;
use tzboard::ticker::{interrupt_flag, local_now, spawn_ticker};
use tzboard::{decode, BoardView, Field, FieldUpdate, FieldValue, WidgetId, WidgetStore};

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level_from_env())
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;
    debug!(?settings, "settings ready");

    match cli.command {
        Command::New { direction } => {
            let mut store = WidgetStore::with_seed(&settings.seed, settings.max_widgets);
            store.set_direction(direction.unwrap_or(settings.default_direction));
            println!("{}", store.share_url(&settings.base_url)?);
        }
        Command::Show { link, watch, ticks } => {
            let path = link_path(&link, &settings.base_url);
            if watch {
                watch_board(path, ticks)?;
            } else {
                let board = decode(path);
                println!("{}", BoardView::compose(&board, local_now()).render_text());
            }
        }
        Command::Inspect { link } => {
            let board = decode(link_path(&link, &settings.base_url));
            println!("{}", serde_json::to_string_pretty(&board)?);
        }
        Command::Edit { link, op } => {
            let board = decode(link_path(&link, &settings.base_url));
            let mut store = WidgetStore::from_decoded(board, settings.max_widgets);
            apply_edit(&mut store, &settings, op)?;
            let url = store
                .share_url(&settings.base_url)
                .context("Edited board cannot be shared")?;
            println!("{url}");
        }
    }

    Ok(())
}

/// Redraw the board on every tick until interrupted or `limit` redraws
fn watch_board(path: &str, limit: Option<u64>) -> Result<()> {
    let board = decode(path);
    let stop = interrupt_flag()?;
    let (tx, rx) = mpsc::channel();
    let handle = spawn_ticker(
        tx,
        Duration::from_millis(display::TICK_INTERVAL_MS),
        Arc::clone(&stop),
        local_now,
    );

    let mut stdout = io::stdout();
    for tick in rx.iter() {
        let view = BoardView::compose(&board, tick.at);
        writeln!(stdout, "\x1b[2J\x1b[H{}", view.render_text())?;
        stdout.flush()?;

        if limit.is_some_and(|limit| tick.sequence + 1 >= limit) {
            stop.store(true, Ordering::Relaxed);
            break;
        }
    }
    drop(rx);

    if handle.join().is_err() {
        warn!("clock ticker thread panicked");
    }
    info!("stopped watching board");
    Ok(())
}

fn card_at(store: &WidgetStore, position: usize) -> Result<WidgetId> {
    position
        .checked_sub(1)
        .and_then(|index| store.id_at(index))
        .with_context(|| format!("No card at position {position} (board has {})", store.len()))
}

fn apply_edit(store: &mut WidgetStore, settings: &Settings, op: EditOp) -> Result<()> {
    match op {
        EditOp::Add { tz, label, team } => {
            let mut seed = settings.seed_card();
            if let Some(tz) = tz {
                // A new zone without a label shows the zone id
                seed.set(Field::Label, FieldValue::text(tz.clone()));
                seed.set(Field::Tz, FieldValue::text(tz));
            }
            if let Some(label) = label {
                seed.set(Field::Label, FieldValue::text(label));
            }
            if let Some(team) = team {
                seed.set(Field::Team, field_value(&Field::Team, &team));
            }
            if store.insert(&seed).is_none() {
                anyhow::bail!("Board already holds the maximum of {} cards", store.max_widgets());
            }
        }
        EditOp::Set { position, field, value } => {
            let id = card_at(store, position)?;
            let field = Field::parse(&field);
            let value = field_value(&field, &value);
            store.set_field(id, FieldUpdate::new(field, value));
        }
        EditOp::Remove { position } => {
            let id = card_at(store, position)?;
            store.remove(id);
        }
        EditOp::Move { from, to } => {
            let from = card_at(store, from)?;
            let to = card_at(store, to)?;
            store.reorder(from, to);
        }
        EditOp::Direction { direction } => store.set_direction(direction),
    }
    Ok(())
}

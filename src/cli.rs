use clap::{Parser, Subcommand};
use std::path::PathBuf;

use tzboard::model::parse_team_input;
use tzboard::{Direction, Field, FieldValue};

#[derive(Parser, Debug)]
#[command(name = "tzboard", version, about = "Build and view shareable world clock boards")]
pub struct Cli {
    /// Settings JSON (defaults to the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the share link of a fresh board built from the seed cards
    New {
        /// Board stacking: row or column
        #[arg(long)]
        direction: Option<Direction>,
    },
    /// Decode a link and print its clocks
    Show {
        /// Share URL or bare path
        link: String,

        /// Redraw once per second until interrupted
        #[arg(long)]
        watch: bool,

        /// Stop watching after this many redraws
        #[arg(long, requires = "watch")]
        ticks: Option<u64>,
    },
    /// Print the cards decoded from a link as JSON
    Inspect {
        /// Share URL or bare path
        link: String,
    },
    /// Apply one edit to a link and print the new link
    Edit {
        /// Share URL or bare path
        link: String,

        #[command(subcommand)]
        op: EditOp,
    },
}

/// Cards are addressed by 1-based position in the link
#[derive(Subcommand, Debug)]
pub enum EditOp {
    /// Append a copy of the first seed card
    Add {
        #[arg(long)]
        tz: Option<String>,
        #[arg(long)]
        label: Option<String>,
        /// Comma-separated names
        #[arg(long)]
        team: Option<String>,
    },
    /// Replace one field of a card
    Set {
        position: usize,
        /// tz, label, team, format24, layout or compact
        field: String,
        value: String,
    },
    /// Delete a card
    Remove { position: usize },
    /// Move a card into another card's slot
    Move { from: usize, to: usize },
    /// Change the board stacking
    Direction { direction: Direction },
}

/// Read a command-line value the way the editor's form controls would produce it
///
/// Team input is split on commas and flags accept true/false. Anything else is
/// kept as text, even for flag fields; sharing reports the mismatch.
pub fn field_value(field: &Field, raw: &str) -> FieldValue {
    match field {
        Field::Team => FieldValue::List(parse_team_input(raw)),
        field if field.is_flag() => match raw.trim().to_lowercase().as_str() {
            "true" | "on" | "yes" => FieldValue::Flag(true),
            "false" | "off" | "no" => FieldValue::Flag(false),
            _ => FieldValue::text(raw),
        },
        _ => FieldValue::text(raw),
    }
}

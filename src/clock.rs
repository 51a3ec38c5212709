//! Clock face composition for the standalone board
//!
//! Faces are built from validated cards and an instant supplied by the caller;
//! nothing here reads the system clock.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::warn;

use crate::codec::DecodedBoard;
use crate::constants::display;
use crate::model::{Direction, Layout, TimezoneCard};

/// Everything needed to draw one card at one instant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClockFace {
    pub heading: String,
    pub time: String,
    /// Hidden on compact and horizontal cards
    pub date: Option<String>,
    /// Roster tooltip text
    pub roster: String,
    pub orientation: Layout,
    pub compact: bool,
    /// False when the timezone id was not recognised and local time is shown
    pub zone_resolved: bool,
}

impl ClockFace {
    pub fn compose(card: &TimezoneCard, now: DateTime<FixedOffset>) -> Self {
        let (wall, zone_resolved) = match card.tz.parse::<Tz>() {
            Ok(zone) => (now.with_timezone(&zone).naive_local(), true),
            Err(err) => {
                warn!(tz = %card.tz, error = %err, "Unknown timezone, showing local time");
                (now.naive_local(), false)
            }
        };

        let orientation = card.orientation();
        let date = (!card.compact && orientation == Layout::Vertical).then(|| format_date(&wall));
        let roster = if card.team.is_empty() {
            display::EMPTY_TEAM.to_string()
        } else {
            card.team.join(display::TEAM_JOIN)
        };

        Self {
            heading: card.heading().to_string(),
            time: format_time(&wall, card.format24),
            date,
            roster,
            orientation,
            compact: card.compact,
            zone_resolved,
        }
    }

    /// Plain-text lines: stacked for vertical faces, a single row otherwise
    pub fn lines(&self) -> Vec<String> {
        match self.orientation {
            Layout::Vertical => {
                let mut lines = vec![
                    format!("{}  [{}]", self.heading, self.roster),
                    self.time.clone(),
                ];
                lines.extend(self.date.clone());
                lines
            }
            Layout::Horizontal => {
                vec![format!("[{}] {}  {}", self.roster, self.heading, self.time)]
            }
        }
    }
}

/// en-US style: `15:05` or `3:05 PM`
fn format_time(wall: &NaiveDateTime, format24: bool) -> String {
    let pattern = if format24 { "%H:%M" } else { "%-I:%M %p" };
    wall.format(pattern).to_string()
}

/// en-US short date: `10/18/2026`
fn format_date(wall: &NaiveDateTime) -> String {
    wall.format("%-m/%-d/%Y").to_string()
}

/// What the standalone page shows for a decoded link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum BoardView {
    /// Any malformed card replaces the whole board with a static message
    Failed { message: &'static str },
    Clocks {
        direction: Direction,
        faces: Vec<ClockFace>,
    },
}

impl BoardView {
    pub fn compose(board: &DecodedBoard, now: DateTime<FixedOffset>) -> Self {
        let failed = BoardView::Failed {
            message: display::FAILURE_MESSAGE,
        };
        if !board.ok {
            return failed;
        }
        match board.cards() {
            Ok(cards) => BoardView::Clocks {
                direction: board.direction,
                faces: cards.iter().map(|card| ClockFace::compose(card, now)).collect(),
            },
            Err(_) => failed,
        }
    }

    /// Terminal rendering; a row board puts each face on one line side by side
    pub fn render_text(&self) -> String {
        match self {
            BoardView::Failed { message } => message.to_string(),
            BoardView::Clocks {
                direction: Direction::Column,
                faces,
            } => faces
                .iter()
                .map(|face| face.lines().join("\n"))
                .collect::<Vec<_>>()
                .join("\n\n"),
            BoardView::Clocks {
                direction: Direction::Row,
                faces,
            } => faces
                .iter()
                .map(|face| face.lines().join("  "))
                .collect::<Vec<_>>()
                .join("  |  "),
        }
    }
}

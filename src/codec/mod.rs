//! Share-link codec
//!
//! A board is written as a URL path:
//! - **direction**: first segment, `dir=column` or `dir=row`
//! - **cards**: one segment per card, fields joined by `&&`
//!
//! Within a card, `name` is a true flag, `!name` a false flag, `name=a,b` a
//! list and `name=value` text. Values are percent-encoded.

mod decode;
mod encode;

pub use decode::{decode, decode_segment};
pub use encode::{encode, encode_segment};

use serde::Serialize;

use crate::error::ValidationError;
use crate::model::{Direction, TimezoneCard, WidgetConfig};

/// Result of reading a share path
#[derive(Debug, Clone, Serialize)]
pub struct DecodedBoard {
    pub direction: Direction,
    /// Every card read from the link, including ones that failed validation
    pub widgets: Vec<WidgetConfig>,
    /// False when any card lacks the shape a clock face needs
    pub ok: bool,
}

impl DecodedBoard {
    /// Typed cards, or the first validation error
    pub fn cards(&self) -> Result<Vec<TimezoneCard>, ValidationError> {
        self.widgets.iter().map(WidgetConfig::validate).collect()
    }
}

/// Strip a full share URL down to the board path
///
/// Accepts either a bare path or `<base_url><path>`; query strings and
/// fragments are dropped.
pub fn link_path<'a>(link: &'a str, base_url: &str) -> &'a str {
    let link = link.trim();
    let link = link.split(['?', '#']).next().unwrap_or_default();
    let base_url = base_url.trim_end_matches('/');
    if !base_url.is_empty() {
        if let Some(path) = link.strip_prefix(base_url) {
            return path;
        }
    }
    link
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{default_seed, Field, FieldValue, Layout};

    fn sample_cards() -> Vec<TimezoneCard> {
        vec![
            TimezoneCard {
                tz: "America/Los_Angeles".to_string(),
                label: "PST".to_string(),
                team: vec!["Tom".to_string(), "Bob".to_string()],
                format24: false,
                layout: Layout::Vertical,
                compact: false,
            },
            TimezoneCard {
                tz: "Europe/London".to_string(),
                label: "R&D / London, UK".to_string(),
                team: Vec::new(),
                format24: true,
                layout: Layout::Horizontal,
                compact: true,
            },
            TimezoneCard {
                tz: "Asia/Kolkata".to_string(),
                label: "100% Chai".to_string(),
                team: vec!["Smith, J".to_string(), "Ana".to_string()],
                format24: true,
                layout: Layout::Vertical,
                compact: false,
            },
        ]
    }

    #[test]
    fn test_roundtrip_preserves_fields_and_direction() {
        for direction in [Direction::Column, Direction::Row] {
            let widgets: Vec<WidgetConfig> =
                sample_cards().iter().map(WidgetConfig::from).collect();
            let board = decode(&encode(direction, &widgets));

            assert!(board.ok);
            assert_eq!(board.direction, direction);
            assert_eq!(board.widgets.len(), widgets.len());
            for (decoded, original) in board.widgets.iter().zip(&widgets) {
                assert!(decoded.same_fields(original), "{decoded:?} != {original:?}");
                assert_ne!(decoded.id, original.id);
            }
            assert_eq!(board.cards().unwrap(), sample_cards());
        }
    }

    #[test]
    fn test_roundtrip_default_seed() {
        let widgets: Vec<WidgetConfig> = default_seed().iter().map(WidgetConfig::from).collect();
        let board = decode(&encode(Direction::Column, &widgets));
        assert_eq!(board.cards().unwrap(), default_seed());
    }

    #[test]
    fn test_reencoding_decoded_board_is_idempotent() {
        let paths = [
            "/dir=column/tz=America/Los_Angeles",
            concat!(
                "/dir=row/tz=Europe/London&&label=LDN&&team=Ada,Bob",
                "&&!format24&&layout=horizontal&&compact"
            ),
            "/dir=column/garbage",
            "/tz&&team=Tom, Bob,",
        ];
        for path in paths {
            let first = decode(path);
            let second = decode(&encode(first.direction, &first.widgets));
            assert_eq!(first.direction, second.direction);
            assert_eq!(first.ok, second.ok);
            assert_eq!(first.widgets.len(), second.widgets.len());
            for (a, b) in first.widgets.iter().zip(&second.widgets) {
                assert!(a.same_fields(b), "{path}: {a:?} != {b:?}");
            }
        }
    }

    #[test]
    fn test_format24_false_writes_negation_token() {
        let widget = WidgetConfig::new("UTC").with(Field::Format24, FieldValue::Flag(false));
        let path = encode(Direction::Column, &[widget]);
        assert_eq!(path, "/dir=column/tz=UTC&&!format24");
        assert!(!decode(&path).cards().unwrap()[0].format24);
    }

    #[test]
    fn test_unknown_fields_survive_reencoding() {
        let board = decode("/tz=UTC&&theme=dark&&!blink");
        let path = encode(board.direction, &board.widgets);
        assert!(path.contains("theme=dark"));
        assert!(path.contains("!blink"));
    }

    #[test]
    fn test_cards_reports_first_failure() {
        let board = decode("/tz=UTC/label=Oops");
        assert!(!board.ok);
        assert_eq!(board.cards(), Err(ValidationError::Missing(Field::Tz)));
    }

    #[test]
    fn test_link_path() {
        let base = "https://wotion.co/widgets/time";
        assert_eq!(
            link_path("https://wotion.co/widgets/time/dir=row/tz=UTC", base),
            "/dir=row/tz=UTC"
        );
        assert_eq!(link_path("/dir=row/tz=UTC", base), "/dir=row/tz=UTC");
        assert_eq!(link_path("  /dir=row/tz=UTC?utm=x#top ", base), "/dir=row/tz=UTC");
        assert_eq!(link_path("/dir=row", ""), "/dir=row");
    }
}

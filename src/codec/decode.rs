use std::borrow::Cow;

use tracing::{debug, warn};

use super::DecodedBoard;
use crate::constants::{fields, wire};
use crate::model::{Direction, Field, FieldValue, WidgetConfig};

/// Read a share path back into a board
///
/// Never fails: unrecognised tokens are kept as unknown fields, missing fields
/// get their defaults, and any card that still lacks the required shape clears
/// [`DecodedBoard::ok`] while staying in the returned list.
pub fn decode(path: &str) -> DecodedBoard {
    let mut segments = path
        .split(wire::SEGMENT_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .peekable();

    let direction = match segments.peek().and_then(|first| parse_direction(first)) {
        Some(direction) => {
            segments.next();
            direction
        }
        None => Direction::default(),
    };

    let mut ok = true;
    let mut widgets = Vec::new();
    for (index, segment) in rejoin_split_values(segments).iter().enumerate() {
        let widget = decode_segment(segment);
        if let Err(err) = widget.validate() {
            warn!(card = index + 1, segment = %segment, error = %err, "Card in link is malformed");
            ok = false;
        }
        widgets.push(widget);
    }

    debug!(direction = %direction, cards = widgets.len(), ok, "Decoded share path");
    DecodedBoard {
        direction,
        widgets,
        ok,
    }
}

/// `dir=<value>` → direction; `None` if the segment is a card
fn parse_direction(segment: &str) -> Option<Direction> {
    let (name, rest) = segment.split_once(wire::ASSIGN)?;
    if name != wire::DIRECTION_KEY {
        return None;
    }
    let value = rest.split(wire::ASSIGN).next().unwrap_or_default();
    Some(Direction::from_wire(value))
}

/// Glue back segments that were split on a raw `/` inside a value
///
/// Hand-written links such as `/tz=America/Los_Angeles` split into
/// `tz=America` and `Los_Angeles`. A segment whose first token cannot start a
/// card field continues the value at the end of the previous segment.
fn rejoin_split_values<'a>(segments: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut joined: Vec<String> = Vec::new();
    for segment in segments {
        match joined.last_mut() {
            Some(previous) if ends_with_value(previous.as_str()) && continues_value(segment) => {
                previous.push(wire::SEGMENT_SEPARATOR);
                previous.push_str(segment);
            }
            _ => joined.push(segment.to_string()),
        }
    }
    joined
}

fn ends_with_value(segment: &str) -> bool {
    segment
        .rsplit(wire::TOKEN_SEPARATOR)
        .next()
        .is_some_and(|token| token.contains(wire::ASSIGN))
}

fn continues_value(segment: &str) -> bool {
    let first = segment.split(wire::TOKEN_SEPARATOR).next().unwrap_or_default();
    !first.is_empty()
        && !first.contains(wire::ASSIGN)
        && !first.starts_with(wire::NEGATION_MARKER)
        && matches!(Field::parse(first), Field::Other(_))
}

/// One card segment; token order does not matter
pub fn decode_segment(segment: &str) -> WidgetConfig {
    let mut widget = WidgetConfig::empty();

    for token in segment
        .split(wire::TOKEN_SEPARATOR)
        .filter(|token| !token.is_empty())
    {
        if let Some((name, value)) = token.split_once(wire::ASSIGN) {
            let field = Field::parse(&unescape(name));
            let value = if field == Field::Team {
                FieldValue::List(split_team(value))
            } else {
                FieldValue::Text(unescape(value).into_owned())
            };
            widget.set(field, value);
        } else if let Some(name) = token.strip_prefix(wire::NEGATION_MARKER) {
            widget.set(Field::parse(&unescape(name)), FieldValue::Flag(false));
        } else {
            widget.set(Field::parse(&unescape(token)), FieldValue::Flag(true));
        }
    }

    fill_defaults(&mut widget);
    widget
}

/// Team members are comma separated; names are trimmed after unescaping and empty ones dropped
fn split_team(value: &str) -> Vec<String> {
    value
        .split(wire::LIST_SEPARATOR)
        .map(unescape)
        .filter_map(|name| {
            let name = name.trim();
            (!name.is_empty()).then(|| name.to_string())
        })
        .collect()
}

/// Absent, empty text and `!name` all mean "use the default"
fn is_blank(value: Option<&FieldValue>) -> bool {
    match value {
        None => true,
        Some(FieldValue::Text(text)) => text.is_empty(),
        Some(FieldValue::Flag(flag)) => !flag,
        Some(FieldValue::List(_)) => false,
    }
}

fn fill_defaults(widget: &mut WidgetConfig) {
    if is_blank(widget.get(&Field::Label)) {
        let label = widget
            .get(&Field::Tz)
            .cloned()
            .unwrap_or_else(|| FieldValue::text(""));
        widget.set(Field::Label, label);
    }

    if !widget.contains(&Field::Format24) {
        widget.set(Field::Format24, FieldValue::Flag(true));
    }
    if is_blank(widget.get(&Field::Team)) {
        widget.set(Field::Team, FieldValue::List(Vec::new()));
    }
    if is_blank(widget.get(&Field::Layout)) {
        widget.set(Field::Layout, FieldValue::text(fields::LAYOUT_VERTICAL));
    }

    if !widget.contains(&Field::Compact) {
        widget.set(Field::Compact, FieldValue::Flag(false));
    }
}

/// Undo percent-encoding; malformed escapes are kept verbatim
fn unescape(value: &str) -> Cow<'_, str> {
    urlencoding::decode(value).unwrap_or(Cow::Borrowed(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Layout, TimezoneCard};

    fn card(path: &str) -> TimezoneCard {
        let board = decode(path);
        assert!(board.ok, "expected '{path}' to decode cleanly");
        assert_eq!(board.widgets.len(), 1);
        board.widgets[0].validate().unwrap()
    }

    #[test]
    fn test_decode_minimal_scenario() {
        let board = decode("/dir=column/tz=America/Los_Angeles");
        assert!(board.ok);
        assert_eq!(board.direction, Direction::Column);
        assert_eq!(board.widgets.len(), 1);

        let card = board.widgets[0].validate().unwrap();
        assert_eq!(
            card,
            TimezoneCard {
                tz: "America/Los_Angeles".to_string(),
                label: "America/Los_Angeles".to_string(),
                team: Vec::new(),
                format24: true,
                layout: Layout::Vertical,
                compact: false,
            }
        );
    }

    #[test]
    fn test_decode_full_scenario() {
        let board = decode(
            concat!(
                "/dir=row/tz=Europe/London&&label=LDN&&team=Ada,Bob",
                "&&!format24&&layout=horizontal&&compact"
            ),
        );
        assert!(board.ok);
        assert_eq!(board.direction, Direction::Row);

        let card = board.widgets[0].validate().unwrap();
        assert_eq!(card.tz, "Europe/London");
        assert_eq!(card.label, "LDN");
        assert_eq!(card.team, vec!["Ada", "Bob"]);
        assert!(!card.format24);
        assert_eq!(card.layout, Layout::Horizontal);
        assert!(card.compact);
    }

    #[test]
    fn test_decode_malformed_scenario() {
        let board = decode("/dir=column/garbage");
        assert!(!board.ok);
        assert_eq!(board.direction, Direction::Column);
        assert_eq!(board.widgets.len(), 1);

        // Failing card is still returned, with defaults filled in
        let widget = &board.widgets[0];
        assert_eq!(widget.tz(), None);
        assert_eq!(widget.label(), Some(""));
        assert_eq!(widget.get(&Field::Format24), Some(&FieldValue::Flag(true)));
        assert_eq!(widget.get(&Field::Team), Some(&FieldValue::List(Vec::new())));
        assert_eq!(widget.get(&Field::Compact), Some(&FieldValue::Flag(false)));
        assert_eq!(
            widget.get(&Field::Other("garbage".to_string())),
            Some(&FieldValue::Flag(true))
        );
    }

    #[test]
    fn test_decode_direction_variants() {
        assert_eq!(decode("/dir=row").direction, Direction::Row);
        assert_eq!(decode("/dir=banana/tz=UTC").direction, Direction::Column);
        assert_eq!(decode("/dir=column").direction, Direction::Column);

        // No direction segment: every segment is a card
        let board = decode("/tz=UTC&&label=Z");
        assert_eq!(board.direction, Direction::Column);
        assert_eq!(board.widgets.len(), 1);
        assert!(board.ok);
    }

    #[test]
    fn test_decode_direction_only_in_first_segment() {
        let board = decode("/tz=UTC/dir=row");
        assert_eq!(board.direction, Direction::Column);
        assert_eq!(board.widgets.len(), 2);
        assert!(!board.ok);
    }

    #[test]
    fn test_decode_format24_negation() {
        assert!(!card("/tz=UTC&&!format24").format24);
        assert!(card("/tz=UTC&&format24").format24);
        assert!(card("/tz=UTC").format24);
    }

    #[test]
    fn test_decode_team_trimmed() {
        assert_eq!(card("/tz=UTC&&team=Tom, Bob,").team, vec!["Tom", "Bob"]);
    }

    #[test]
    fn test_decode_empty_team_forms() {
        assert!(card("/tz=UTC&&team=").team.is_empty());
        assert!(card("/tz=UTC").team.is_empty());
        assert!(card("/tz=UTC&&team= , ,").team.is_empty());
    }

    #[test]
    fn test_decode_token_order_irrelevant() {
        let a = card("/tz=UTC&&label=Z&&compact&&!format24");
        let b = card("/!format24&&compact&&label=Z&&tz=UTC");
        assert_eq!(a, b);
    }

    #[test]
    fn test_decode_escaped_values() {
        let card = card("/tz=America%2FLos_Angeles&&label=R%26D%2C%20West&&team=Smith%2C%20J,Ana");
        assert_eq!(card.tz, "America/Los_Angeles");
        assert_eq!(card.label, "R&D, West");
        assert_eq!(card.team, vec!["Smith, J", "Ana"]);
    }

    #[test]
    fn test_decode_raw_slash_does_not_start_new_card() {
        let board = decode("/dir=row/tz=America/Indiana/Indianapolis&&label=Indy/tz=Asia/Tokyo");
        assert!(board.ok);
        assert_eq!(board.widgets.len(), 2);
        assert_eq!(board.widgets[0].tz(), Some("America/Indiana/Indianapolis"));
        assert_eq!(board.widgets[0].label(), Some("Indy"));
        assert_eq!(board.widgets[1].tz(), Some("Asia/Tokyo"));
    }

    #[test]
    fn test_decode_flag_segment_starts_new_card() {
        let board = decode("/tz=UTC/compact");
        assert_eq!(board.widgets.len(), 2);
        assert_eq!(board.widgets[0].tz(), Some("UTC"));
        assert!(!board.ok);
    }

    #[test]
    fn test_decode_bare_tz_is_malformed() {
        let board = decode("/dir=column/tz");
        assert!(!board.ok);
        assert_eq!(board.widgets[0].get(&Field::Tz), Some(&FieldValue::Flag(true)));
        // Label copies whatever tz held
        assert_eq!(board.widgets[0].get(&Field::Label), Some(&FieldValue::Flag(true)));
    }

    #[test]
    fn test_decode_empty_value_and_extra_equals() {
        assert_eq!(card("/tz=UTC&&label=a=b").label, "a=b");

        // An empty tz is kept but the card cannot render
        let board = decode("/tz=&&label=Nowhere");
        assert!(!board.ok);
        assert_eq!(board.widgets[0].tz(), Some(""));
    }

    #[test]
    fn test_decode_escaped_team_whitespace_trimmed() {
        assert_eq!(card("/tz=UTC&&team=Tom,%20Bob,%20").team, vec!["Tom", "Bob"]);
        assert_eq!(card("/tz=UTC&&team=%20Ana%20, ,%2C").team, vec!["Ana", ","]);
    }

    #[test]
    fn test_decode_negated_team_and_layout_use_defaults() {
        let negated = card("/tz=UTC&&!team&&!layout&&!label");
        assert!(negated.team.is_empty());
        assert_eq!(negated.layout, Layout::Vertical);
        assert_eq!(negated.label, "UTC");

        // An empty layout value also falls back
        assert_eq!(card("/tz=UTC&&layout=").layout, Layout::Vertical);
    }

    #[test]
    fn test_decode_skips_empty_segments_and_tokens() {
        let board = decode("//dir=row//tz=UTC&&&&compact/");
        assert!(board.ok);
        assert_eq!(board.direction, Direction::Row);
        assert_eq!(board.widgets.len(), 1);
        assert!(board.widgets[0].validate().unwrap().compact);
    }

    #[test]
    fn test_decode_empty_path() {
        let board = decode("");
        assert!(board.ok);
        assert_eq!(board.direction, Direction::Column);
        assert!(board.widgets.is_empty());
    }

    #[test]
    fn test_decode_empty_label_falls_back_to_tz() {
        assert_eq!(card("/tz=UTC&&label=").label, "UTC");
    }

    #[test]
    fn test_decode_fresh_ids() {
        let board = decode("/tz=UTC/tz=UTC");
        assert_ne!(board.widgets[0].id, board.widgets[1].id);
        let again = decode("/tz=UTC/tz=UTC");
        assert_ne!(board.widgets[0].id, again.widgets[0].id);
    }
}

use std::borrow::Cow;

use crate::constants::wire;
use crate::model::{Direction, Field, FieldValue, WidgetConfig};

/// Write the board as a share path: `/dir=<direction>/<card>/<card>...`
///
/// Every field is written except empty text, which is left for the decoder's
/// defaults. `false` flags are always written as `!name` because a missing
/// flag means "use the default", and `format24` defaults to true.
pub fn encode(direction: Direction, widgets: &[WidgetConfig]) -> String {
    let mut path = String::new();
    path.push(wire::SEGMENT_SEPARATOR);
    path.push_str(&direction_segment(direction));

    for widget in widgets {
        path.push(wire::SEGMENT_SEPARATOR);
        path.push_str(&encode_segment(widget));
    }

    path
}

pub(crate) fn direction_segment(direction: Direction) -> String {
    format!("{}{}{}", wire::DIRECTION_KEY, wire::ASSIGN, direction.as_str())
}

/// One card as `token&&token&&...`; the card id is never written
pub fn encode_segment(widget: &WidgetConfig) -> String {
    widget
        .fields()
        .filter_map(|(field, value)| encode_token(field, value))
        .collect::<Vec<_>>()
        .join(wire::TOKEN_SEPARATOR)
}

fn encode_token(field: &Field, value: &FieldValue) -> Option<String> {
    let name = escape(field.as_str());
    match value {
        FieldValue::Flag(true) => Some(name.into_owned()),
        FieldValue::Flag(false) => Some(format!("{}{name}", wire::NEGATION_MARKER)),
        FieldValue::List(items) => {
            let separator = wire::LIST_SEPARATOR.to_string();
            let joined = items
                .iter()
                .map(|item| escape(item))
                .collect::<Vec<_>>()
                .join(separator.as_str());
            Some(format!("{name}{}{joined}", wire::ASSIGN))
        }
        FieldValue::Text(text) if text.is_empty() => None,
        FieldValue::Text(text) => Some(format!("{name}{}{}", wire::ASSIGN, escape(text))),
    }
}

/// Percent-encode so `/`, `&`, `,` and spaces inside values cannot split tokens
fn escape(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

//! Card records shared by the editor, the share-link codec and the clock faces
//!
//! A [`WidgetConfig`] is deliberately loose: it maps field names to whatever
//! value the editor or a link put there. [`WidgetConfig::validate`] turns it
//! into a fully typed [`TimezoneCard`] at the render/encode boundary.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::constants::{fields, wire};
use crate::error::ValidationError;

/// Session-scoped card identifier, never written to a share link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(Uuid);

impl WidgetId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Name of a card field
///
/// Declaration order is the order fields are written into a link.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Field {
    Tz,
    Label,
    Team,
    Format24,
    Layout,
    Compact,
    /// Unrecognised name read from a link, kept so it survives re-encoding
    Other(String),
}

impl Field {
    pub fn parse(name: &str) -> Self {
        match name {
            fields::TZ => Self::Tz,
            fields::LABEL => Self::Label,
            fields::TEAM => Self::Team,
            fields::FORMAT24 => Self::Format24,
            fields::LAYOUT => Self::Layout,
            fields::COMPACT => Self::Compact,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Tz => fields::TZ,
            Self::Label => fields::LABEL,
            Self::Team => fields::TEAM,
            Self::Format24 => fields::FORMAT24,
            Self::Layout => fields::LAYOUT,
            Self::Compact => fields::COMPACT,
            Self::Other(name) => name,
        }
    }

    /// Fields whose declared type is a boolean
    pub fn is_flag(&self) -> bool {
        matches!(self, Self::Format24 | Self::Compact)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Field {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl From<Field> for String {
    fn from(field: Field) -> Self {
        field.as_str().to_string()
    }
}

/// Value held by a card field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    List(Vec<String>),
    Text(String),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Human-readable type name used in validation errors
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Flag(_) => "a flag",
            Self::List(_) => "a list",
            Self::Text(_) => "text",
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

/// Whole-field replacement applied by the editor
///
/// The value is not checked against the field's declared type here; a
/// mismatch surfaces when the board is validated for sharing or rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldUpdate {
    pub field: Field,
    pub value: FieldValue,
}

impl FieldUpdate {
    pub fn new(field: Field, value: FieldValue) -> Self {
        Self { field, value }
    }
}

/// Orientation of a single card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Vertical,
    Horizontal,
}

impl Layout {
    /// Anything other than `horizontal` reads as vertical
    pub fn from_wire(value: &str) -> Self {
        if value == fields::LAYOUT_HORIZONTAL {
            Self::Horizontal
        } else {
            Self::Vertical
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vertical => fields::LAYOUT_VERTICAL,
            Self::Horizontal => fields::LAYOUT_HORIZONTAL,
        }
    }
}

/// Stacking of the whole board, independent of each card's own layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    #[serde(alias = "vertical")]
    Column,
    #[serde(alias = "horizontal")]
    Row,
}

impl Direction {
    /// `row` selects side-by-side stacking, any other value falls back to column
    pub fn from_wire(value: &str) -> Self {
        if value == wire::DIRECTION_ROW {
            Self::Row
        } else {
            Self::Column
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Column => wire::DIRECTION_COLUMN,
            Self::Row => wire::DIRECTION_ROW,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    /// Strict parse for user input; links go through [`Direction::from_wire`]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "column" | "vertical" => Ok(Self::Column),
            "row" | "horizontal" => Ok(Self::Row),
            other => Err(format!("unknown direction '{other}' (expected row or column)")),
        }
    }
}

/// One card as held by the editor and produced by the decoder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetConfig {
    pub id: WidgetId,
    #[serde(flatten)]
    fields: BTreeMap<Field, FieldValue>,
}

impl WidgetConfig {
    /// Card with a fresh id and no fields set
    pub fn empty() -> Self {
        Self {
            id: WidgetId::generate(),
            fields: BTreeMap::new(),
        }
    }

    /// Card for `tz` with every other field left to its default
    pub fn new(tz: impl Into<String>) -> Self {
        Self::empty().with(Field::Tz, FieldValue::Text(tz.into()))
    }

    pub fn with(mut self, field: Field, value: FieldValue) -> Self {
        self.set(field, value);
        self
    }

    pub fn get(&self, field: &Field) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &Field) -> bool {
        self.fields.contains_key(field)
    }

    pub fn set(&mut self, field: Field, value: FieldValue) {
        self.fields.insert(field, value);
    }

    /// Fields in link order
    pub fn fields(&self) -> impl Iterator<Item = (&Field, &FieldValue)> {
        self.fields.iter()
    }

    pub fn tz(&self) -> Option<&str> {
        self.get(&Field::Tz).and_then(FieldValue::as_text)
    }

    pub fn label(&self) -> Option<&str> {
        self.get(&Field::Label).and_then(FieldValue::as_text)
    }

    /// Copy of this card's fields under a new id
    pub fn duplicate(&self) -> Self {
        Self {
            id: WidgetId::generate(),
            fields: self.fields.clone(),
        }
    }

    /// Field-for-field equality, ignoring ids
    pub fn same_fields(&self, other: &WidgetConfig) -> bool {
        self.fields == other.fields
    }

    /// Check the card has the shape a clock face needs and read it into a typed card
    pub fn validate(&self) -> Result<TimezoneCard, ValidationError> {
        let tz = self.required(Field::Tz, FieldValue::as_text, "text")?;
        // Empty text is never written to a link, so an empty tz could not be read back
        if tz.is_empty() {
            return Err(ValidationError::Empty(Field::Tz));
        }
        let label = self.required(Field::Label, FieldValue::as_text, "text")?;
        let team = self.required(Field::Team, FieldValue::as_list, "a list")?;
        let format24 = self.required(Field::Format24, FieldValue::as_flag, "a flag")?;

        let layout = self
            .get(&Field::Layout)
            .and_then(FieldValue::as_text)
            .map(Layout::from_wire)
            .unwrap_or_default();
        let compact = self
            .get(&Field::Compact)
            .and_then(FieldValue::as_flag)
            .unwrap_or(false);

        Ok(TimezoneCard {
            tz: tz.to_string(),
            label: label.to_string(),
            team: team.to_vec(),
            format24,
            layout,
            compact,
        })
    }

    fn required<'a, T>(
        &'a self,
        field: Field,
        read: impl Fn(&'a FieldValue) -> Option<T>,
        expected: &'static str,
    ) -> Result<T, ValidationError> {
        let value = self
            .get(&field)
            .ok_or_else(|| ValidationError::Missing(field.clone()))?;
        read(value).ok_or_else(|| ValidationError::wrong_type(field, expected, value.kind()))
    }
}

/// Fully typed card, ready to render or share
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimezoneCard {
    /// IANA timezone identifier, e.g. "America/Los_Angeles"
    pub tz: String,
    /// Short display label such as "PST"; empty means show the timezone id
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub team: Vec<String>,
    #[serde(default)]
    pub format24: bool,
    #[serde(default)]
    pub layout: Layout,
    /// Hides the date and forces a single-row card
    #[serde(default)]
    pub compact: bool,
}

impl TimezoneCard {
    pub fn heading(&self) -> &str {
        if self.label.is_empty() { &self.tz } else { &self.label }
    }

    /// Orientation actually drawn; compact cards are always a single row
    pub fn orientation(&self) -> Layout {
        if self.compact { Layout::Horizontal } else { self.layout }
    }
}

impl From<&TimezoneCard> for WidgetConfig {
    fn from(card: &TimezoneCard) -> Self {
        WidgetConfig::empty()
            .with(Field::Tz, FieldValue::text(card.tz.clone()))
            .with(Field::Label, FieldValue::text(card.label.clone()))
            .with(Field::Team, FieldValue::List(card.team.clone()))
            .with(Field::Format24, FieldValue::Flag(card.format24))
            .with(Field::Layout, FieldValue::text(card.layout.as_str()))
            .with(Field::Compact, FieldValue::Flag(card.compact))
    }
}

/// Cards a fresh editor session starts from; new cards copy the first one
pub fn default_seed() -> Vec<TimezoneCard> {
    let card = |tz: &str, label: &str, format24: bool| TimezoneCard {
        tz: tz.to_string(),
        label: label.to_string(),
        team: Vec::new(),
        format24,
        layout: Layout::Vertical,
        compact: false,
    };

    vec![
        card("America/Los_Angeles", "PST", false),
        card("Europe/London", "London", true),
        card("Asia/Tokyo", "Tokyo", true),
    ]
}

/// Parse the editor's comma-separated team input
pub fn parse_team_input(input: &str) -> Vec<String> {
    input
        .split(wire::LIST_SEPARATOR)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

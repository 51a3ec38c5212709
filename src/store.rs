use tracing::{debug, info};

use crate::codec::{encode, DecodedBoard};
use crate::constants::limits;
use crate::error::ValidationError;
use crate::model::{Direction, FieldUpdate, TimezoneCard, WidgetConfig, WidgetId};

/// Editing session state: the ordered cards plus the board direction
/// Owned by the editor; nothing outside it holds references into the list
#[derive(Debug, Clone)]
pub struct WidgetStore {
    direction: Direction,
    widgets: Vec<WidgetConfig>,
    max_widgets: usize,
}

impl Default for WidgetStore {
    fn default() -> Self {
        Self::new(limits::MAX_WIDGETS)
    }
}

impl WidgetStore {
    pub fn new(max_widgets: usize) -> Self {
        Self {
            direction: Direction::default(),
            widgets: Vec::new(),
            max_widgets,
        }
    }

    /// Start a session from the seed cards (at most `max_widgets` of them)
    pub fn with_seed(seed: &[TimezoneCard], max_widgets: usize) -> Self {
        let widgets = seed
            .iter()
            .take(max_widgets)
            .map(WidgetConfig::from)
            .collect();
        Self {
            direction: Direction::default(),
            widgets,
            max_widgets,
        }
    }

    /// Resume editing a board read from a link
    /// Cards are kept even past the limit; only insertion is capped
    pub fn from_decoded(board: DecodedBoard, max_widgets: usize) -> Self {
        Self {
            direction: board.direction,
            widgets: board.widgets,
            max_widgets,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        debug!(direction = %direction, "Board direction changed");
        self.direction = direction;
    }

    pub fn widgets(&self) -> &[WidgetConfig] {
        &self.widgets
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn max_widgets(&self) -> usize {
        self.max_widgets
    }

    /// The editor hides its add action once this is true
    pub fn is_full(&self) -> bool {
        self.widgets.len() >= self.max_widgets
    }

    pub fn get(&self, id: WidgetId) -> Option<&WidgetConfig> {
        self.widgets.iter().find(|w| w.id == id)
    }

    pub fn id_at(&self, index: usize) -> Option<WidgetId> {
        self.widgets.get(index).map(|w| w.id)
    }

    fn position(&self, id: WidgetId) -> Option<usize> {
        self.widgets.iter().position(|w| w.id == id)
    }

    /// Replace one field of a card; unknown ids are ignored
    pub fn set_field(&mut self, id: WidgetId, update: FieldUpdate) -> bool {
        let Some(widget) = self.widgets.iter_mut().find(|w| w.id == id) else {
            debug!(id = %id, field = %update.field, "Ignoring edit for unknown card");
            return false;
        };
        debug!(id = %id, field = %update.field, value = ?update.value, "Card field updated");
        widget.set(update.field, update.value);
        true
    }

    /// Append a copy of `seed` under a fresh id; refused once the board is full
    pub fn insert(&mut self, seed: &WidgetConfig) -> Option<WidgetId> {
        if self.is_full() {
            debug!(max = self.max_widgets, "Board is full, not adding card");
            return None;
        }
        let widget = seed.duplicate();
        let id = widget.id;
        self.widgets.push(widget);
        info!(id = %id, count = self.widgets.len(), "Card added");
        Some(id)
    }

    pub fn remove(&mut self, id: WidgetId) -> bool {
        let Some(index) = self.position(id) else {
            debug!(id = %id, "Ignoring removal of unknown card");
            return false;
        };
        self.widgets.remove(index);
        info!(id = %id, count = self.widgets.len(), "Card removed");
        true
    }

    /// Move `from` into the slot currently held by `to`, shifting the cards between
    pub fn reorder(&mut self, from: WidgetId, to: WidgetId) -> bool {
        if from == to {
            return false;
        }
        let (Some(old_index), Some(new_index)) = (self.position(from), self.position(to)) else {
            debug!(from = %from, to = %to, "Ignoring reorder of unknown card");
            return false;
        };
        let widget = self.widgets.remove(old_index);
        self.widgets.insert(new_index, widget);
        debug!(from = old_index, to = new_index, "Card moved");
        true
    }

    /// Validate every card; this is the boundary edits are checked at
    pub fn snapshot(&self) -> Result<Vec<TimezoneCard>, ValidationError> {
        self.widgets.iter().map(WidgetConfig::validate).collect()
    }

    /// Share path for the current board, once every card validates
    pub fn share_path(&self) -> Result<String, ValidationError> {
        self.snapshot()?;
        Ok(encode(self.direction, &self.widgets))
    }

    pub fn share_url(&self, base_url: &str) -> Result<String, ValidationError> {
        Ok(format!("{}{}", base_url.trim_end_matches('/'), self.share_path()?))
    }
}

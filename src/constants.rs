//! Application-wide constants
//!
//! This module contains all magic numbers and string literals used throughout
//! the application, providing a single source of truth for constant values.

/// Share link grammar
pub mod wire {
    /// Separator between path segments (direction segment, one segment per card)
    pub const SEGMENT_SEPARATOR: char = '/';

    /// Separator between field tokens inside one card segment
    /// Two characters so single `&` inside values never splits a token
    pub const TOKEN_SEPARATOR: &str = "&&";

    /// Separator between `name` and `value` in a field token
    pub const ASSIGN: char = '=';

    /// Separator between team members in a list value
    pub const LIST_SEPARATOR: char = ',';

    /// Prefix marking a boolean field explicitly set to false
    pub const NEGATION_MARKER: char = '!';

    /// Name of the direction pseudo-field in the first segment
    pub const DIRECTION_KEY: &str = "dir";

    /// Direction value for side-by-side stacking
    pub const DIRECTION_ROW: &str = "row";

    /// Direction value for top-to-bottom stacking
    pub const DIRECTION_COLUMN: &str = "column";
}

/// Card field names as they appear on the wire
pub mod fields {
    pub const TZ: &str = "tz";
    pub const LABEL: &str = "label";
    pub const TEAM: &str = "team";
    pub const FORMAT24: &str = "format24";
    pub const LAYOUT: &str = "layout";
    pub const COMPACT: &str = "compact";

    /// Layout value for a single-row card
    pub const LAYOUT_HORIZONTAL: &str = "horizontal";

    /// Layout value for a stacked card (default)
    pub const LAYOUT_VERTICAL: &str = "vertical";
}

/// Editing limits
pub mod limits {
    /// Maximum number of cards the editor allows on one board
    pub const MAX_WIDGETS: usize = 6;

    /// Upper bound accepted for a configured `max_widgets`
    pub const MAX_WIDGETS_CEILING: usize = 24;
}

/// Clock face presentation
pub mod display {
    /// Shown instead of the board when a link fails validation
    pub const FAILURE_MESSAGE: &str = "Failed to render.";

    /// Roster tooltip for a card without team members
    pub const EMPTY_TEAM: &str = "No team members";

    /// Separator used when listing team members in the roster tooltip
    pub const TEAM_JOIN: &str = ", ";

    /// Redraw interval of the live clock
    pub const TICK_INTERVAL_MS: u64 = 1000;
}

/// Configuration file constants
pub mod config {
    /// Application directory under the user config dir
    pub const APP_DIR: &str = "tzboard";

    /// Settings file name
    pub const FILENAME: &str = "settings.json";

    /// Public page the share path is appended to
    pub const DEFAULT_BASE_URL: &str = "https://wotion.co/widgets/time";

    /// Environment variable overriding the share base URL
    pub const ENV_BASE_URL: &str = "TZBOARD_BASE_URL";

    /// Environment variable overriding the card limit
    pub const ENV_MAX_WIDGETS: &str = "TZBOARD_MAX_WIDGETS";

    /// Environment variable selecting the log level
    pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
}

#![forbid(unsafe_code)]

//! World clock boards encoded in shareable links
//!
//! - [`codec`] reads and writes the link path
//! - [`store`] holds the cards while a board is being edited
//! - [`clock`] turns validated cards and an instant into clock faces

pub mod clock;
pub mod codec;
pub mod config;
pub mod constants;
pub mod error;
pub mod model;
pub mod store;
pub mod ticker;

pub use clock::{BoardView, ClockFace};
pub use codec::{decode, encode, DecodedBoard};
pub use error::ValidationError;
pub use model::{
    Direction, Field, FieldUpdate, FieldValue, Layout, TimezoneCard, WidgetConfig, WidgetId,
};
pub use store::WidgetStore;

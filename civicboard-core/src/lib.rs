//! Core types for civicboard.
//!
//! - `event`, `media` and `category`: the records an editor manages
//! - `filter`: filtering and sorting of event lists
//! - `calendar`: month grid layout
//! - `state`: the view state threaded through those engines
//! - `store`: record storage with snapshot subscriptions
//! - `board` and `config`: where the collections live

pub mod board;
pub mod calendar;
pub mod category;
pub mod config;
pub mod error;
pub mod event;
pub mod filter;
pub mod media;
pub mod state;
pub mod store;

pub use board::Board;
pub use category::Category;
pub use error::{BoardError, BoardResult};
pub use event::Event;
pub use media::{Media, MediaContent, MediaKind};

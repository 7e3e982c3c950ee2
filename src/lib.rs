//! Presentation effects for a single portfolio page: scroll reveal,
//! parallax, pointer tilt, a persisted light/dark theme, active nav link
//! tracking and an image collage overlay.
//!
//! State and geometry live in `vitrina-core`; this crate binds them to the
//! DOM.

mod app;
pub mod collage;
mod dom;
pub mod nav;
pub mod parallax;
pub mod reveal;
pub mod settings;
pub mod storage;
pub mod theme;
pub mod tilt;

pub use app::{run, Page, YEAR_ID};
pub use theme::SharedStore;
pub use vitrina_core;

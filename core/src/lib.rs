pub mod collage;
pub mod config;
pub mod frame;
pub mod nav;
pub mod parallax;
pub mod prefs;
pub mod reveal;
pub mod theme;
pub mod tilt;

pub use collage::{collage_sources, tile_specs, Closed, Collage, Stagger, TileFallback, TileSpec};
pub use config::{ConfigError, FxConfig, MAX_COLLAGE_VARIANTS};
pub use frame::FrameGate;
pub use nav::{ClickPlan, NavHighlighter, SectionReport};
pub use parallax::Parallax;
pub use prefs::{MemoryStore, PreferenceStore, StoreError};
pub use reveal::RevealTracker;
pub use theme::{Theme, ThemeController};
pub use tilt::{Rect, Rotation, Tilt};

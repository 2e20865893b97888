// Core infrastructure module
// Provides foundational systems that other modules depend on

pub mod app;
pub mod chooser_config;
pub mod events;
pub mod grid_config;

pub use app::App;
pub use chooser_config::{ChooserConfig, ConfigError, PanelPosition};
pub use events::{AppEvent, EventHandler, InputContext};
pub use grid_config::{ChooserOverrides, GridConfig};

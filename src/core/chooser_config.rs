// Chooser Configuration
// Defaults compiled from config.yaml at build time, with per-grid overrides
// merged in from grid.yaml

use thiserror::Error;

use crate::chooser::ChooserMode;
use crate::tree::SearchEditorOptions;

use super::grid_config::ChooserOverrides;

// Include the auto-generated config from build.rs
pub mod compiled {
    include!(concat!(env!("OUT_DIR"), "/compiled_config.rs"));
}

/// Where the chooser panel is anchored within the grid area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
    Center,
}

impl PanelPosition {
    /// Parse a position descriptor from configuration
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value {
            "top-left" => Ok(Self::TopLeft),
            "top-right" => Ok(Self::TopRight),
            "bottom-left" => Ok(Self::BottomLeft),
            "bottom-right" => Ok(Self::BottomRight),
            "center" => Ok(Self::Center),
            other => Err(ConfigError::UnknownPosition(other.to_string())),
        }
    }
}

/// Checkbox-selection behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionOptions {
    pub allow_select_all: bool,
    pub select_by_click: bool,
    pub recursive: bool,
}

/// Search box behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    pub enabled: bool,
    pub timeout_ms: u64,
    pub editor_options: SearchEditorOptions,
}

/// The column chooser's full option surface
///
/// Only `mode` and `selection.recursive` affect the synchronizer; the rest
/// is panel chrome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChooserConfig {
    pub enabled: bool,
    pub mode: ChooserMode,
    pub title: String,
    pub empty_panel_text: String,
    pub width: u16,
    pub height: u16,
    pub position: PanelPosition,
    pub selection: SelectionOptions,
    pub search: SearchOptions,
}

impl Default for ChooserConfig {
    fn default() -> Self {
        Self {
            enabled: compiled::CHOOSER_ENABLED,
            mode: ChooserMode::parse(compiled::CHOOSER_MODE),
            title: compiled::CHOOSER_TITLE.to_string(),
            empty_panel_text: compiled::EMPTY_PANEL_TEXT.to_string(),
            width: compiled::PANEL_WIDTH,
            height: compiled::PANEL_HEIGHT,
            position: PanelPosition::default(),
            selection: SelectionOptions {
                allow_select_all: compiled::ALLOW_SELECT_ALL,
                select_by_click: compiled::SELECT_BY_CLICK,
                recursive: compiled::RECURSIVE_SELECTION,
            },
            search: SearchOptions {
                enabled: compiled::SEARCH_ENABLED,
                timeout_ms: compiled::SEARCH_TIMEOUT_MS,
                editor_options: SearchEditorOptions::default(),
            },
        }
    }
}

/// Configuration problems worth failing startup over
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("column chooser panel size must be non-zero (got {width}x{height})")]
    InvalidPanelSize { width: u16, height: u16 },

    #[error("unknown column chooser position '{0}'")]
    UnknownPosition(String),
}

impl ChooserConfig {
    /// Apply a grid.yaml override section on top of the compiled defaults
    pub fn apply_overrides(&mut self, overrides: &ChooserOverrides) -> Result<(), ConfigError> {
        if let Some(enabled) = overrides.enabled {
            self.enabled = enabled;
        }
        if let Some(mode) = &overrides.mode {
            self.mode = ChooserMode::parse(mode);
        }
        if let Some(title) = &overrides.title {
            self.title = title.clone();
        }
        if let Some(text) = &overrides.empty_panel_text {
            self.empty_panel_text = text.clone();
        }
        if let Some(width) = overrides.width {
            self.width = width;
        }
        if let Some(height) = overrides.height {
            self.height = height;
        }
        if let Some(position) = &overrides.position {
            self.position = PanelPosition::parse(position)?;
        }

        if let Some(selection) = &overrides.selection {
            if let Some(value) = selection.allow_select_all {
                self.selection.allow_select_all = value;
            }
            if let Some(value) = selection.select_by_click {
                self.selection.select_by_click = value;
            }
            if let Some(value) = selection.recursive {
                self.selection.recursive = value;
            }
        }

        if let Some(search) = &overrides.search {
            if let Some(value) = search.enabled {
                self.search.enabled = value;
            }
            if let Some(value) = search.timeout {
                self.search.timeout_ms = value;
            }
            if let Some(placeholder) = &search.placeholder {
                self.search.editor_options.placeholder = placeholder.clone();
            }
        }

        self.validate()
    }

    /// Sanity checks after merging; invalid configs fail startup
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidPanelSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

// Build script - reads config.yaml at compile time and generates defaults
// This allows changing chooser defaults during development without editing source code

use std::env;
use std::fs;
use std::path::Path;

fn main() {
    // Tell Cargo to rerun if config.yaml changes
    println!("cargo:rerun-if-changed=src/config.yaml");

    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("compiled_config.rs");

    // Try to read config.yaml from src/, fall back to hardcoded defaults if not found
    let config = if Path::new("src/config.yaml").exists() {
        let content = fs::read_to_string("src/config.yaml")
            .expect("Failed to read src/config.yaml");
        parse_config(&content)
    } else {
        // Fallback defaults if config.yaml doesn't exist
        CompiledConfig::default()
    };

    // Generate Rust code with the compiled-in values
    let generated = format!(
        r#"// Auto-generated from config.yaml at compile time
// Do not edit - modify config.yaml and rebuild instead

pub const CHOOSER_ENABLED: bool = {chooser_enabled};
pub const CHOOSER_MODE: &str = "{chooser_mode}";
pub const CHOOSER_TITLE: &str = "{chooser_title}";
pub const EMPTY_PANEL_TEXT: &str = "{empty_panel_text}";
pub const PANEL_WIDTH: u16 = {panel_width};
pub const PANEL_HEIGHT: u16 = {panel_height};

pub const ALLOW_SELECT_ALL: bool = {allow_select_all};
pub const SELECT_BY_CLICK: bool = {select_by_click};
pub const RECURSIVE_SELECTION: bool = {recursive_selection};

pub const SEARCH_ENABLED: bool = {search_enabled};
pub const SEARCH_TIMEOUT_MS: u64 = {search_timeout_ms};

pub const MOUSE_ENABLED: bool = {mouse_enabled};
pub const APP_TITLE: &str = "{app_title}";
"#,
        chooser_enabled = config.chooser_enabled,
        chooser_mode = config.chooser_mode,
        chooser_title = config.chooser_title,
        empty_panel_text = config.empty_panel_text,
        panel_width = config.panel_width,
        panel_height = config.panel_height,
        allow_select_all = config.allow_select_all,
        select_by_click = config.select_by_click,
        recursive_selection = config.recursive_selection,
        search_enabled = config.search_enabled,
        search_timeout_ms = config.search_timeout_ms,
        mouse_enabled = config.mouse_enabled,
        app_title = config.app_title,
    );

    fs::write(&dest_path, generated).expect("Failed to write compiled config");
}

struct CompiledConfig {
    chooser_enabled: bool,
    chooser_mode: String,
    chooser_title: String,
    empty_panel_text: String,
    panel_width: u16,
    panel_height: u16,
    allow_select_all: bool,
    select_by_click: bool,
    recursive_selection: bool,
    search_enabled: bool,
    search_timeout_ms: u64,
    mouse_enabled: bool,
    app_title: String,
}

impl Default for CompiledConfig {
    fn default() -> Self {
        Self {
            chooser_enabled: true,
            chooser_mode: "select".to_string(),
            chooser_title: "Column Chooser".to_string(),
            empty_panel_text: "Drag a column here to hide it".to_string(),
            panel_width: 34,
            panel_height: 16,
            allow_select_all: false,
            select_by_click: false,
            recursive_selection: false,
            search_enabled: false,
            search_timeout_ms: 500,
            mouse_enabled: true,
            app_title: "Grid Chooser".to_string(),
        }
    }
}

fn parse_config(content: &str) -> CompiledConfig {
    let mut config = CompiledConfig::default();

    // Simple YAML parsing (avoiding external dependencies in build script)
    let mut in_chooser = false;
    let mut in_selection = false;
    let mut in_search = false;
    let mut in_application = false;

    for line in content.lines() {
        let trimmed = line.trim();

        // Track which section we're in
        if trimmed.starts_with("column_chooser:") {
            in_chooser = true;
            in_application = false;
            in_selection = false;
            in_search = false;
            continue;
        } else if trimmed.starts_with("application:") {
            in_application = true;
            in_chooser = false;
            in_selection = false;
            in_search = false;
            continue;
        } else if in_chooser && trimmed.starts_with("selection:") {
            in_selection = true;
            in_search = false;
            continue;
        } else if in_chooser && trimmed.starts_with("search:") {
            in_search = true;
            in_selection = false;
            continue;
        } else if !line.starts_with(' ') && !trimmed.is_empty() && trimmed.ends_with(':') {
            // New top-level section
            in_chooser = false;
            in_application = false;
            in_selection = false;
            in_search = false;
            continue;
        }

        let Some((key, value)) = split_key_value(trimmed) else {
            continue;
        };

        if in_chooser && in_selection {
            match key {
                "allow_select_all" => config.allow_select_all = value == "true",
                "select_by_click" => config.select_by_click = value == "true",
                "recursive" => config.recursive_selection = value == "true",
                _ => {}
            }
        } else if in_chooser && in_search {
            match key {
                "enabled" => config.search_enabled = value == "true",
                "timeout" => {
                    if let Ok(ms) = value.parse() {
                        config.search_timeout_ms = ms;
                    }
                }
                _ => {}
            }
        } else if in_chooser {
            match key {
                "enabled" => config.chooser_enabled = value == "true",
                "mode" => config.chooser_mode = unquote(value),
                "title" => config.chooser_title = unquote(value),
                "empty_panel_text" => config.empty_panel_text = unquote(value),
                "width" => {
                    if let Ok(w) = value.parse() {
                        config.panel_width = w;
                    }
                }
                "height" => {
                    if let Ok(h) = value.parse() {
                        config.panel_height = h;
                    }
                }
                _ => {}
            }
        } else if in_application {
            match key {
                "title" => config.app_title = unquote(value),
                "mouse_enabled" => config.mouse_enabled = value == "true",
                _ => {}
            }
        }
    }

    config
}

fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    Some((key.trim(), value))
}

fn unquote(value: &str) -> String {
    value.trim_matches(|c| c == '"' || c == '\'').to_string()
}

// Grid Configuration
// Grid-level settings loaded from grid.yaml: column definitions (with one
// level of band nesting), demo row data, and chooser overrides

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::columns::Column;

/// Grid definition loaded from grid.yaml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GridConfig {
    /// Column definitions; bands nest child columns one level deep or more
    #[serde(default)]
    pub columns: Vec<ColumnSpec>,

    /// Demo row data keyed by `data_field`
    #[serde(default)]
    pub rows: Vec<HashMap<String, String>>,

    /// Column chooser overrides for this grid
    #[serde(default)]
    pub column_chooser: Option<ChooserOverrides>,
}

/// One column definition, possibly a band with nested children
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ColumnSpec {
    pub caption: Option<String>,

    pub data_field: Option<String>,

    #[serde(default = "default_true")]
    pub visible: bool,

    /// Absent means hiding is permitted
    pub allow_hiding: Option<bool>,

    pub css_class: Option<String>,

    #[serde(default = "default_true")]
    pub show_in_chooser: bool,

    /// Child columns; non-empty makes this a band
    #[serde(default)]
    pub columns: Vec<ColumnSpec>,
}

/// Partial chooser settings; anything absent keeps the compiled default
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChooserOverrides {
    pub enabled: Option<bool>,
    pub mode: Option<String>,
    pub title: Option<String>,
    pub empty_panel_text: Option<String>,
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub position: Option<String>,
    pub selection: Option<SelectionOverrides>,
    pub search: Option<SearchOverrides>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SelectionOverrides {
    pub allow_select_all: Option<bool>,
    pub select_by_click: Option<bool>,
    pub recursive: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SearchOverrides {
    pub enabled: Option<bool>,
    pub timeout: Option<u64>,
    pub placeholder: Option<String>,
}

fn default_true() -> bool {
    true
}

impl GridConfig {
    /// Load a grid definition from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read grid config: {}", path.display()))?;

        let config: GridConfig =
            serde_yaml::from_str(&content).context("Failed to parse grid config YAML")?;

        Ok(config)
    }

    /// Load a grid definition from a workspace root
    pub fn load_from_workspace(workspace_root: &Path, config_name: &str) -> Result<Self> {
        let config_path = workspace_root.join(config_name);
        Self::load(&config_path)
    }

    /// Flatten the nested column specs into the engine's column list
    ///
    /// Indices are assigned in depth-first declaration order; children get
    /// their band's index as `owner_band`.
    pub fn build_columns(&self) -> Vec<Column> {
        let mut columns = Vec::new();
        let mut next_index = 0;

        for spec in &self.columns {
            flatten_spec(spec, None, &mut next_index, &mut columns);
        }

        columns
    }
}

fn flatten_spec(
    spec: &ColumnSpec,
    owner_band: Option<usize>,
    next_index: &mut usize,
    out: &mut Vec<Column>,
) {
    let index = *next_index;
    *next_index += 1;

    out.push(Column {
        index,
        caption: spec.caption.clone().unwrap_or_default(),
        data_field: spec.data_field.clone(),
        visible: spec.visible,
        allow_hiding: spec.allow_hiding,
        css_class: spec.css_class.clone(),
        owner_band,
        has_columns: !spec.columns.is_empty(),
        show_in_chooser: spec.show_in_chooser,
    });

    for child in &spec.columns {
        flatten_spec(child, Some(index), next_index, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
columns:
  - caption: "Order"
    data_field: "order_id"
    allow_hiding: false
  - caption: "Shipping"
    columns:
      - caption: "City"
        data_field: "city"
      - caption: "Carrier"
        data_field: "carrier"
        visible: false
rows:
  - order_id: "1"
    city: "Lyon"
    carrier: "Speedy"
column_chooser:
  mode: "select"
  selection:
    recursive: true
"#;

    #[test]
    fn test_flattening_assigns_indices_and_bands() {
        let config: GridConfig = serde_yaml::from_str(SAMPLE).unwrap();
        let columns = config.build_columns();

        assert_eq!(columns.len(), 4);

        assert_eq!(columns[0].caption, "Order");
        assert_eq!(columns[0].allow_hiding, Some(false));
        assert_eq!(columns[0].owner_band, None);

        assert_eq!(columns[1].caption, "Shipping");
        assert!(columns[1].has_columns);

        assert_eq!(columns[2].caption, "City");
        assert_eq!(columns[2].owner_band, Some(1));

        assert_eq!(columns[3].caption, "Carrier");
        assert!(!columns[3].visible);
    }

    #[test]
    fn test_chooser_overrides_parse() {
        let config: GridConfig = serde_yaml::from_str(SAMPLE).unwrap();
        let overrides = config.column_chooser.unwrap();

        assert_eq!(overrides.mode.as_deref(), Some("select"));
        assert_eq!(overrides.selection.unwrap().recursive, Some(true));
    }

    #[test]
    fn test_defaults_for_sparse_spec() {
        let config: GridConfig = serde_yaml::from_str("columns:\n  - caption: \"A\"\n").unwrap();
        let columns = config.build_columns();

        assert!(columns[0].visible);
        assert!(columns[0].show_in_chooser);
        assert_eq!(columns[0].allow_hiding, None);
        assert!(!columns[0].has_columns);
    }
}

// Column Chooser Panel
// Popup lifecycle, mode handling, and the public chooser surface

use crate::columns::{Column, ColumnEngine, ColumnsChangedEvent};
use crate::core::chooser_config::ChooserConfig;
use crate::tree::{TreeItem, TreeList, TreeListConfig, TreeListEvent};

use super::sync::SelectionSync;
use super::ChooserMode;

/// Row label used in drag mode: hidden headers presented as grabbable chips
fn drag_item_label(item: &TreeItem) -> String {
    format!("≡ {}", item.text)
}

/// The column chooser: a popup panel over the grid listing its columns
///
/// The tree list is built lazily on first show and rebuilt on configuration
/// changes. All tree/engine notifications triggered from here are routed
/// through the synchronizer within the same gesture.
#[derive(Debug, Default)]
pub struct ColumnChooser {
    config: ChooserConfig,
    sync: SelectionSync,
    tree: Option<TreeList>,
    visible: bool,
    search_focused: bool,
    saved_scroll: u16,
    pending_scroll_restore: Option<u16>,
}

impl ColumnChooser {
    pub fn new(config: ChooserConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &ChooserConfig {
        &self.config
    }

    /// The tree list, once built by the first show
    pub fn tree(&self) -> Option<&TreeList> {
        self.tree.as_ref()
    }

    pub fn is_select_mode(&self) -> bool {
        self.config.mode == ChooserMode::Select
    }

    pub fn is_column_chooser_visible(&self) -> bool {
        self.visible
    }

    /// Open the panel, building the tree on first use
    pub fn show_column_chooser(&mut self, engine: &ColumnEngine) {
        if !self.config.enabled {
            return;
        }

        if self.tree.is_none() {
            self.rebuild_tree(engine);
        }
        self.visible = true;
    }

    /// Close the panel; tree state (items, scroll) is kept for reopening
    pub fn hide_column_chooser(&mut self) {
        self.visible = false;
        self.search_focused = false;
    }

    /// Proxy to the engine's chooser-column query
    pub fn get_columns<'a>(&self, engine: &'a ColumnEngine) -> Vec<&'a Column> {
        engine.chooser_columns(false)
    }

    /// Enabled, and at least one chooser column is hidden
    pub fn has_hidden_columns(&self, engine: &ColumnEngine) -> bool {
        self.config.enabled
            && self
                .get_columns(engine)
                .iter()
                .any(|column| !column.visible)
    }

    /// Whether a column may be dragged out of the chooser back into the grid
    pub fn allow_dragging(&self, engine: &ColumnEngine, column: &Column) -> bool {
        self.is_column_chooser_visible()
            && engine.is_parent_column_visible(column.index)
            && !column.visible
            && column.hiding_allowed()
    }

    /// Whether a grid header may be dragged into the chooser to hide it
    pub fn allow_column_header_dragging(&self, column: &Column) -> bool {
        !self.is_select_mode() && self.is_column_chooser_visible() && column.hiding_allowed()
    }

    /// Replace the chooser configuration; rebuilds the tree when one exists
    pub fn set_config(&mut self, config: ChooserConfig, engine: &ColumnEngine) {
        self.config = config;

        if self.tree.is_some() {
            self.rebuild_tree(engine);
        }
        if !self.config.enabled {
            self.visible = false;
        }
    }

    /// Route a column-engine notification into the synchronizer
    pub fn handle_columns_changed(&mut self, event: &ColumnsChangedEvent, engine: &mut ColumnEngine) {
        let mode = self.config.mode;
        let recursive = self.config.selection.recursive;

        let Some(tree) = self.tree.as_mut() else {
            return;
        };
        self.saved_scroll = tree.scroll_top();

        if mode == ChooserMode::Select {
            self.sync.on_columns_changed(event, tree, engine, mode, recursive);
        } else if event.touches_chooser_items() || event.all_columns {
            // The drag panel lists hidden columns; refresh that list
            self.sync.update_items(tree, engine, mode, recursive);
        }

        for event in tree.drain_events() {
            if matches!(event, TreeListEvent::ContentReady) {
                self.pending_scroll_restore = Some(self.saved_scroll);
            }
        }
    }

    /// Activate the row under the cursor
    ///
    /// Select mode toggles the checkbox and runs the synchronizer; drag mode
    /// restores the hidden column to the grid (the keyboard stand-in for
    /// dragging it out), gated by `allow_dragging`.
    pub fn toggle_at_cursor(&mut self, engine: &mut ColumnEngine) -> bool {
        let mode = self.config.mode;
        let recursive = self.config.selection.recursive;

        if mode == ChooserMode::Select {
            let Some(tree) = self.tree.as_mut() else {
                return false;
            };

            if !tree.toggle_at_cursor() {
                return false;
            }

            for event in tree.drain_events() {
                if matches!(event, TreeListEvent::SelectionChanged) {
                    self.sync.on_selection_changed(tree, engine, mode, recursive);
                }
            }
            true
        } else {
            let Some(tree) = self.tree.as_ref() else {
                return false;
            };
            let Some(key) = tree.visible_rows().get(tree.cursor()).map(|row| row.key) else {
                return false;
            };

            let can_restore = match engine.column(key) {
                Some(column) => self.allow_dragging(engine, column),
                None => false,
            };
            if !can_restore {
                return false;
            }

            engine.set_visible(key, true);
            true
        }
    }

    /// Select-all affordance, available in checkbox mode only
    pub fn toggle_select_all(&mut self, engine: &mut ColumnEngine) {
        let mode = self.config.mode;
        let recursive = self.config.selection.recursive;

        if mode != ChooserMode::Select || !self.config.selection.allow_select_all {
            return;
        }
        let Some(tree) = self.tree.as_mut() else {
            return;
        };

        tree.toggle_select_all();
        for event in tree.drain_events() {
            if matches!(event, TreeListEvent::SelectionChanged) {
                self.sync.on_selection_changed(tree, engine, mode, recursive);
            }
        }
    }

    pub fn cursor_up(&mut self) {
        if let Some(tree) = self.tree.as_mut() {
            tree.cursor_up();
        }
        self.scroll_cursor_into_view();
    }

    pub fn cursor_down(&mut self) {
        if let Some(tree) = self.tree.as_mut() {
            tree.cursor_down();
        }
        self.scroll_cursor_into_view();
    }

    /// Keep the cursor row inside the panel's scrolled window
    fn scroll_cursor_into_view(&mut self) {
        let capacity = self.list_capacity() as usize;
        let Some(tree) = self.tree.as_mut() else {
            return;
        };

        let cursor = tree.cursor();
        let top = tree.scroll_top() as usize;

        if cursor < top {
            tree.set_scroll_top(cursor as u16);
        } else if capacity > 0 && cursor >= top + capacity {
            tree.set_scroll_top((cursor + 1 - capacity) as u16);
        }
    }

    pub fn toggle_expand_at_cursor(&mut self) {
        if let Some(tree) = self.tree.as_mut() {
            tree.toggle_expand_at_cursor();
        }
    }

    pub fn is_search_focused(&self) -> bool {
        self.search_focused
    }

    pub fn focus_search(&mut self) {
        if self.config.search.enabled {
            self.search_focused = true;
        }
    }

    pub fn blur_search(&mut self) {
        self.search_focused = false;
    }

    pub fn search_input(&mut self, c: char) {
        if let Some(tree) = self.tree.as_mut() {
            let mut value = tree.search_value().to_string();
            value.push(c);
            tree.set_search_value(value);
        }
    }

    pub fn search_backspace(&mut self) {
        if let Some(tree) = self.tree.as_mut() {
            let mut value = tree.search_value().to_string();
            value.pop();
            tree.set_search_value(value);
        }
    }

    /// Rows that fit inside the panel below its chrome
    pub fn list_capacity(&self) -> u16 {
        let mut rows = self.config.height.saturating_sub(2);
        if self.config.search.enabled {
            rows = rows.saturating_sub(1);
        }
        if self.is_select_mode() && self.config.selection.allow_select_all {
            rows = rows.saturating_sub(1);
        }
        rows
    }

    /// Deferred follow-up after a completed draw: restore the scroll
    /// position a rebuild reset
    pub fn after_render(&mut self) {
        if let Some(scroll) = self.pending_scroll_restore.take() {
            if let Some(tree) = self.tree.as_mut() {
                tree.set_scroll_top(scroll);
            }
        }
    }

    fn rebuild_tree(&mut self, engine: &ColumnEngine) {
        let mode = self.config.mode;
        let recursive = self.config.selection.recursive;

        if let Some(tree) = &self.tree {
            self.saved_scroll = tree.scroll_top();
        }

        let tree_config = if mode == ChooserMode::Select {
            self.prepare_select_config()
        } else {
            self.prepare_drag_config()
        };

        let mut tree = self.tree.take().unwrap_or_default();
        tree.set_config(tree_config);
        self.sync.update_items(&mut tree, engine, mode, recursive);

        for event in tree.drain_events() {
            if matches!(event, TreeListEvent::ContentReady) {
                self.pending_scroll_restore = Some(self.saved_scroll);
            }
        }

        self.tree = Some(tree);
    }

    fn prepare_drag_config(&self) -> TreeListConfig {
        TreeListConfig {
            no_data_text: self.config.empty_panel_text.clone(),
            search_enabled: self.config.search.enabled,
            search_timeout_ms: self.config.search.timeout_ms,
            search_editor: self.config.search.editor_options.clone(),
            item_formatter: Some(drag_item_label),
            ..TreeListConfig::default()
        }
    }

    fn prepare_select_config(&self) -> TreeListConfig {
        TreeListConfig {
            show_select_all: self.config.selection.allow_select_all,
            recursive_selection: self.config.selection.recursive,
            select_by_click: self.config.selection.select_by_click,
            no_data_text: self.config.empty_panel_text.clone(),
            search_enabled: self.config.search.enabled,
            search_timeout_ms: self.config.search.timeout_ms,
            search_editor: self.config.search.editor_options.clone(),
            item_formatter: None,
            ..TreeListConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::Column;

    fn column(index: usize, caption: &str, visible: bool) -> Column {
        Column {
            index,
            caption: caption.to_string(),
            data_field: None,
            visible,
            allow_hiding: None,
            css_class: None,
            owner_band: None,
            has_columns: false,
            show_in_chooser: true,
        }
    }

    fn engine() -> ColumnEngine {
        ColumnEngine::new(vec![
            column(0, "Order", true),
            column(1, "Customer", true),
            column(2, "Carrier", false),
        ])
    }

    fn config(mode: ChooserMode) -> ChooserConfig {
        ChooserConfig {
            mode,
            enabled: true,
            ..ChooserConfig::default()
        }
    }

    #[test]
    fn test_show_builds_tree_lazily() {
        let engine = engine();
        let mut chooser = ColumnChooser::new(config(ChooserMode::Select));

        assert!(chooser.tree().is_none());
        chooser.show_column_chooser(&engine);

        assert!(chooser.is_column_chooser_visible());
        assert_eq!(chooser.tree().unwrap().nodes().len(), 3);
    }

    #[test]
    fn test_disabled_chooser_does_not_open() {
        let engine = engine();
        let mut chooser = ColumnChooser::new(ChooserConfig {
            enabled: false,
            ..config(ChooserMode::Select)
        });

        chooser.show_column_chooser(&engine);
        assert!(!chooser.is_column_chooser_visible());
    }

    #[test]
    fn test_drag_mode_lists_hidden_columns_only() {
        let engine = engine();
        let mut chooser = ColumnChooser::new(config(ChooserMode::DragAndDrop));
        chooser.show_column_chooser(&engine);

        let tree = chooser.tree().unwrap();
        assert_eq!(tree.nodes().len(), 1);
        assert_eq!(tree.nodes()[0].key, 2);
        assert_eq!(tree.visible_rows()[0].label, "≡ Carrier");
    }

    #[test]
    fn test_mode_switch_rebuilds_items() {
        // Scenario C: runtime switch from drag to select
        let engine = engine();
        let mut chooser = ColumnChooser::new(config(ChooserMode::DragAndDrop));
        chooser.show_column_chooser(&engine);

        let generation = chooser.tree().unwrap().generation();

        chooser.set_config(config(ChooserMode::Select), &engine);

        let tree = chooser.tree().unwrap();
        assert_eq!(tree.generation(), generation + 1);
        assert_eq!(tree.nodes().len(), 3);
        // Items gained explicit selection state, drag labeling is gone
        assert_eq!(tree.nodes()[0].selected, Some(true));
        assert!(tree.config().item_formatter.is_none());
        assert_eq!(tree.visible_rows()[0].label, "Order");
    }

    #[test]
    fn test_checkbox_toggle_hides_column() {
        let mut engine = engine();
        let mut chooser = ColumnChooser::new(config(ChooserMode::Select));
        chooser.show_column_chooser(&engine);

        // Cursor starts on the first row ("Order")
        chooser.cursor_down(); // "Customer"
        assert!(chooser.toggle_at_cursor(&mut engine));

        assert!(!engine.column(1).unwrap().visible);
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn test_drag_restore_respects_gating() {
        let mut engine = engine();
        let mut chooser = ColumnChooser::new(config(ChooserMode::DragAndDrop));

        // Panel closed: nothing may be restored
        assert!(!chooser.toggle_at_cursor(&mut engine));

        chooser.show_column_chooser(&engine);
        assert!(chooser.toggle_at_cursor(&mut engine));
        assert!(engine.column(2).unwrap().visible);
    }

    #[test]
    fn test_has_hidden_columns() {
        let mut engine = engine();
        let chooser = ColumnChooser::new(config(ChooserMode::Select));

        assert!(chooser.has_hidden_columns(&engine));

        engine.set_visible(2, true);
        engine.drain_events();
        assert!(!chooser.has_hidden_columns(&engine));
    }

    #[test]
    fn test_scroll_restored_after_rebuild() {
        let mut engine = engine();
        let mut chooser = ColumnChooser::new(config(ChooserMode::Select));
        chooser.show_column_chooser(&engine);
        chooser.after_render();

        chooser.tree.as_mut().unwrap().set_scroll_top(2);

        // A caption change rebuilds the item list, resetting scroll
        engine.set_caption(1, "Client");
        for event in engine.drain_events() {
            chooser.handle_columns_changed(&event, &mut engine);
        }
        assert_eq!(chooser.tree().unwrap().scroll_top(), 0);

        // The restore is deferred until after the next draw
        chooser.after_render();
        assert_eq!(chooser.tree().unwrap().scroll_top(), 2);
    }

    #[test]
    fn test_cursor_movement_keeps_row_in_window() {
        let engine = ColumnEngine::new(
            (0..8)
                .map(|index| column(index, &format!("Col {index}"), true))
                .collect(),
        );

        // Height 6 minus borders leaves room for 4 rows
        let mut chooser = ColumnChooser::new(ChooserConfig {
            height: 6,
            ..config(ChooserMode::Select)
        });
        assert_eq!(chooser.list_capacity(), 4);

        chooser.show_column_chooser(&engine);
        chooser.after_render();

        // Walking past the last visible row drags the window down
        for _ in 0..5 {
            chooser.cursor_down();
        }
        assert_eq!(chooser.tree().unwrap().cursor(), 5);
        assert_eq!(chooser.tree().unwrap().scroll_top(), 2);

        // Walking back above the window drags it up again
        for _ in 0..5 {
            chooser.cursor_up();
        }
        assert_eq!(chooser.tree().unwrap().cursor(), 0);
        assert_eq!(chooser.tree().unwrap().scroll_top(), 0);
    }

    #[test]
    fn test_header_drag_gating() {
        let engine = engine();
        let mut chooser = ColumnChooser::new(config(ChooserMode::DragAndDrop));

        let header = engine.column(0).unwrap();
        assert!(!chooser.allow_column_header_dragging(header));

        chooser.show_column_chooser(&engine);
        assert!(chooser.allow_column_header_dragging(header));

        // Select mode gates header dragging off entirely
        chooser.set_config(config(ChooserMode::Select), &engine);
        chooser.show_column_chooser(&engine);
        assert!(!chooser.allow_column_header_dragging(header));
    }
}

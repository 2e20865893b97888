// Tree List Widget
// Checkable tree over a flat item list, with batched selection notifications

use std::collections::HashSet;
use std::collections::VecDeque;

use super::item::TreeItem;
use super::node::{find_node_mut, TreeNode};

/// Options for the embedded search box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEditorOptions {
    pub placeholder: String,
}

impl Default for SearchEditorOptions {
    fn default() -> Self {
        Self {
            placeholder: "Search".to_string(),
        }
    }
}

/// Tree list configuration surface
#[derive(Debug, Clone)]
pub struct TreeListConfig {
    /// Show a select-all affordance in checkbox mode
    pub show_select_all: bool,

    /// Cascade selection to descendants and derive parent states
    pub recursive_selection: bool,

    /// Toggle selection from a plain activation, not just the checkbox.
    /// Stored configuration only: input routing decides what counts as an
    /// activation before calling `toggle_item`.
    pub select_by_click: bool,

    /// Search box on/off
    pub search_enabled: bool,

    /// Debounce for search input, in milliseconds. Stored configuration
    /// only: the widget applies search values as they are set, the event
    /// loop owns input timing.
    pub search_timeout_ms: u64,

    pub search_editor: SearchEditorOptions,

    /// Shown when the item list is empty
    pub no_data_text: String,

    /// Optional row-label customization hook
    pub item_formatter: Option<fn(&TreeItem) -> String>,
}

impl Default for TreeListConfig {
    fn default() -> Self {
        Self {
            show_select_all: false,
            recursive_selection: false,
            select_by_click: false,
            search_enabled: false,
            search_timeout_ms: 500,
            search_editor: SearchEditorOptions::default(),
            no_data_text: String::new(),
            item_formatter: None,
        }
    }
}

/// Notifications delivered through the drainable queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeListEvent {
    /// Node selection changed (coalesced per update batch)
    SelectionChanged,

    /// The node forest was rebuilt from a new item list
    ContentReady,
}

/// A row of the currently visible (expanded, search-filtered) tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleRow {
    pub key: usize,
    pub depth: usize,
    pub label: String,
    pub selected: Option<bool>,
    pub disabled: bool,
    pub expanded: bool,
    pub has_children: bool,
}

/// Checkable tree list over flat id/parent-id items
#[derive(Debug, Default)]
pub struct TreeList {
    config: TreeListConfig,
    roots: Vec<TreeNode>,
    generation: u64,
    update_depth: usize,
    selection_dirty: bool,
    events: VecDeque<TreeListEvent>,
    scroll_top: u16,
    cursor: usize,
    search_value: String,
}

impl TreeList {
    pub fn new(config: TreeListConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &TreeListConfig {
        &self.config
    }

    /// Replace the configuration without touching the current items
    pub fn set_config(&mut self, config: TreeListConfig) {
        if !config.search_enabled {
            self.search_value.clear();
        }
        self.config = config;
    }

    /// Replace the item list and rebuild the node forest
    ///
    /// Resets cursor and scroll; callers that want to keep the viewport
    /// restore the scroll position after the next render.
    pub fn set_items(&mut self, items: Vec<TreeItem>) {
        self.roots = build_forest(&items);

        if self.config.recursive_selection {
            for root in &mut self.roots {
                refresh_parent_state(root);
            }
        }

        self.generation += 1;
        self.cursor = 0;
        self.scroll_top = 0;
        self.events.push_back(TreeListEvent::ContentReady);
    }

    /// Root nodes of the assembled forest
    pub fn nodes(&self) -> &[TreeNode] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Monotonic counter bumped on every `set_items` rebuild
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Mark the node with the given key selected
    pub fn select_item(&mut self, key: usize) {
        self.set_selected(key, true);
    }

    /// Mark the node with the given key unselected
    pub fn unselect_item(&mut self, key: usize) {
        self.set_selected(key, false);
    }

    /// User-gesture toggle; refuses disabled items
    ///
    /// An indeterminate parent toggles to fully selected.
    pub fn toggle_item(&mut self, key: usize) -> bool {
        let target = match super::node::find_node(&self.roots, key) {
            Some(node) if !node.item.disabled => node.selected != Some(true),
            _ => return false,
        };

        self.set_selected(key, target);
        true
    }

    /// Toggle the row under the cursor
    pub fn toggle_at_cursor(&mut self) -> bool {
        match self.visible_rows().get(self.cursor) {
            Some(row) => self.toggle_item(row.key),
            None => false,
        }
    }

    /// Select-all affordance: selects every enabled node, or clears them all
    /// when everything selectable is already selected
    pub fn toggle_select_all(&mut self) {
        let keys = flatten_keys(&self.roots);
        let all_selected = self.roots.iter().all(subtree_fully_selected);

        self.begin_update();
        for key in keys {
            let disabled = super::node::find_node(&self.roots, key)
                .map_or(false, |node| node.item.disabled);
            if disabled {
                continue;
            }

            if all_selected {
                self.unselect_item(key);
            } else {
                self.select_item(key);
            }
        }
        self.end_update();
    }

    /// Open a batched-update scope; nestable
    pub fn begin_update(&mut self) {
        self.update_depth += 1;
    }

    /// Close a batched-update scope, flushing one coalesced notification
    pub fn end_update(&mut self) {
        if self.update_depth > 0 {
            self.update_depth -= 1;
        }

        if self.update_depth == 0 && self.selection_dirty {
            self.selection_dirty = false;
            self.events.push_back(TreeListEvent::SelectionChanged);
        }
    }

    /// Take all pending notifications, oldest first
    pub fn drain_events(&mut self) -> Vec<TreeListEvent> {
        self.events.drain(..).collect()
    }

    pub fn scroll_top(&self) -> u16 {
        self.scroll_top
    }

    pub fn set_scroll_top(&mut self, scroll_top: u16) {
        self.scroll_top = scroll_top;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        let max = self.visible_rows().len().saturating_sub(1);
        if self.cursor < max {
            self.cursor += 1;
        }
    }

    /// Expand or collapse the band under the cursor
    pub fn toggle_expand_at_cursor(&mut self) {
        let key = match self.visible_rows().get(self.cursor) {
            Some(row) if row.has_children => row.key,
            _ => return,
        };

        if let Some(node) = find_node_mut(&mut self.roots, key) {
            node.expanded = !node.expanded;
        }
    }

    pub fn search_value(&self) -> &str {
        &self.search_value
    }

    pub fn set_search_value(&mut self, value: impl Into<String>) {
        self.search_value = value.into();
        self.cursor = 0;
    }

    /// The rows currently presentable: expansion-aware, search-filtered
    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        let mut rows = Vec::new();
        let query = self.search_value.to_lowercase();

        for root in &self.roots {
            collect_rows(root, 0, &query, &self.config, &mut rows);
        }

        rows
    }

    fn set_selected(&mut self, key: usize, value: bool) {
        let recursive = self.config.recursive_selection;

        let changed = match find_node_mut(&mut self.roots, key) {
            Some(node) => apply_selection(node, value, recursive),
            None => false,
        };

        if changed {
            if recursive {
                for root in &mut self.roots {
                    refresh_parent_state(root);
                }
            }
            self.note_selection_changed();
        }
    }

    fn note_selection_changed(&mut self) {
        if self.update_depth > 0 {
            self.selection_dirty = true;
        } else {
            self.events.push_back(TreeListEvent::SelectionChanged);
        }
    }
}

/// Assemble the forest from the flat list, linking one level at a time.
/// Items whose parent is absent from the list become roots.
fn build_forest(items: &[TreeItem]) -> Vec<TreeNode> {
    let ids: HashSet<usize> = items.iter().map(|item| item.id).collect();

    fn children_of(items: &[TreeItem], parent: usize) -> Vec<TreeNode> {
        items
            .iter()
            .filter(|item| item.parent_id == Some(parent))
            .map(|item| {
                let mut node = TreeNode::new(item.clone());
                node.children = children_of(items, item.id);
                node
            })
            .collect()
    }

    items
        .iter()
        .filter(|item| match item.parent_id {
            None => true,
            Some(parent) => !ids.contains(&parent),
        })
        .map(|item| {
            let mut node = TreeNode::new(item.clone());
            node.children = children_of(items, item.id);
            node
        })
        .collect()
}

/// Set a node's state; in recursive mode the value cascades to descendants.
/// Returns whether any node actually changed.
fn apply_selection(node: &mut TreeNode, value: bool, recursive: bool) -> bool {
    let mut changed = node.selected != Some(value);
    node.selected = Some(value);

    if recursive {
        for child in &mut node.children {
            changed |= apply_selection(child, value, recursive);
        }
    }

    changed
}

/// Derive parent states from children: all on, all off, or indeterminate
fn refresh_parent_state(node: &mut TreeNode) {
    if node.children.is_empty() {
        return;
    }

    for child in &mut node.children {
        refresh_parent_state(child);
    }

    let all = node.children.iter().all(|c| c.selected == Some(true));
    let none = node.children.iter().all(|c| c.selected == Some(false));

    node.selected = if all {
        Some(true)
    } else if none {
        Some(false)
    } else {
        None
    };
}

fn subtree_fully_selected(node: &TreeNode) -> bool {
    if node.children.is_empty() {
        node.selected == Some(true) || node.item.disabled
    } else {
        node.children.iter().all(subtree_fully_selected)
    }
}

fn flatten_keys(nodes: &[TreeNode]) -> Vec<usize> {
    let mut keys = Vec::new();
    for node in nodes {
        keys.push(node.key);
        keys.extend(flatten_keys(&node.children));
    }
    keys
}

fn collect_rows(
    node: &TreeNode,
    depth: usize,
    query: &str,
    config: &TreeListConfig,
    rows: &mut Vec<VisibleRow>,
) {
    let include = query.is_empty() || subtree_matches(node, query);
    if !include {
        return;
    }

    let label = match config.item_formatter {
        Some(formatter) => formatter(&node.item),
        None => node.item.text.clone(),
    };

    rows.push(VisibleRow {
        key: node.key,
        depth,
        label,
        selected: node.selected,
        disabled: node.item.disabled,
        expanded: node.expanded,
        has_children: !node.children.is_empty(),
    });

    // While a search is active all matching branches are shown expanded
    if node.expanded || !query.is_empty() {
        for child in &node.children {
            collect_rows(child, depth + 1, query, config, rows);
        }
    }
}

fn subtree_matches(node: &TreeNode, query: &str) -> bool {
    node.item.text.to_lowercase().contains(query)
        || node.children.iter().any(|child| subtree_matches(child, query))
}

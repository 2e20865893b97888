// Selection Synchronizer
// Keeps tree selection and column visibility mutually consistent without
// feedback loops, and keeps the item list in sync with the column model

use std::cell::Cell;

use crate::columns::{ColumnEngine, ColumnsChangedEvent};
use crate::tree::{TreeList, TreeListEvent, TreeNode};

use super::items::process_items;
use super::ChooserMode;

/// Per-node snapshot used by the corrective passes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSnapshot {
    pub key: usize,
    pub allow_hiding: Option<bool>,
    pub selected: Option<bool>,
}

/// Two-way bridge between the tree list and the column engine
///
/// The two flags break the notification cycle: one marks "I am correcting
/// tree selection", the other "I am writing column visibility". Self-caused
/// notifications are routed back through the handlers while the matching
/// flag is held, so they land as no-ops instead of cascading.
#[derive(Debug, Default)]
pub struct SelectionSync {
    updating_selection: Cell<bool>,
    updating_column_visibility: Cell<bool>,
    completed_passes: Cell<u64>,
}

/// Scoped flag acquisition: cleared on drop, error paths included
struct ScopedFlag<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> ScopedFlag<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.get() {
            None
        } else {
            flag.set(true);
            Some(Self { flag })
        }
    }
}

impl Drop for ScopedFlag<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

impl SelectionSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed tree-to-columns synchronization passes
    pub fn completed_passes(&self) -> u64 {
        self.completed_passes.get()
    }

    /// Rebuild the item list from the current column model
    pub fn update_items(
        &self,
        tree: &mut TreeList,
        engine: &ColumnEngine,
        mode: ChooserMode,
        recursive: bool,
    ) {
        let select_mode = mode == ChooserMode::Select;
        let columns = engine.chooser_columns(select_mode);
        let items = process_items(&columns, select_mode, recursive);
        tree.set_items(items);
    }

    /// Tree selection changed: correct it, then mirror it into the columns
    ///
    /// Returns false when the pass was suppressed by a guard flag.
    pub fn on_selection_changed(
        &self,
        tree: &mut TreeList,
        engine: &mut ColumnEngine,
        mode: ChooserMode,
        recursive: bool,
    ) -> bool {
        // Pass 1: a non-hideable column can never be deselected, no matter
        // what the tree's own cascade computed. Re-assert those nodes.
        {
            let Some(_guard) = ScopedFlag::acquire(&self.updating_selection) else {
                return false;
            };

            let snapshot = flatten_nodes(tree.nodes());

            tree.begin_update();
            for node in &snapshot {
                if node.allow_hiding == Some(false) {
                    tree.select_item(node.key);
                }
            }
            tree.end_update();

            // Route the corrections' own notification while the flag is held
            for event in tree.drain_events() {
                if matches!(event, TreeListEvent::SelectionChanged) {
                    self.on_selection_changed(tree, engine, mode, recursive);
                }
            }
        }

        // Pass 2: propagate the corrected selection into column visibility
        {
            let Some(_guard) = ScopedFlag::acquire(&self.updating_column_visibility) else {
                return false;
            };

            let snapshot = flatten_nodes(tree.nodes());

            engine.begin_update();
            for node in &snapshot {
                engine.set_visible(node.key, node.selected != Some(false));
            }
            engine.end_update();

            for event in engine.drain_events() {
                self.on_columns_changed(&event, tree, engine, mode, recursive);
            }
        }

        self.completed_passes.set(self.completed_passes.get() + 1);
        true
    }

    /// Column options changed: refresh selection, and rebuild items unless
    /// the change was a lone visibility toggle
    ///
    /// Returns false when the event was irrelevant or self-caused.
    pub fn on_columns_changed(
        &self,
        event: &ColumnsChangedEvent,
        tree: &mut TreeList,
        engine: &mut ColumnEngine,
        mode: ChooserMode,
        recursive: bool,
    ) -> bool {
        if mode != ChooserMode::Select {
            return false;
        }

        // Visibility writes we issued ourselves must not re-derive selection
        if self.updating_column_visibility.get() {
            return false;
        }

        let need_update =
            event.touches_chooser_items() || (event.changed_columns && event.all_columns);
        if !need_update {
            return false;
        }

        self.update_items_selection(event.column_indices.as_deref(), tree, engine, mode, recursive);

        // A lone visible toggle keeps the item list (and with it the tree's
        // scroll and expansion state); anything else rebuilds it
        if !event.only_visible_changed() {
            self.update_items(tree, engine, mode, recursive);
        }

        true
    }

    /// Targeted columns-to-tree path: mirror changed columns' visibility
    /// into node selection, batched into one tree notification
    fn update_items_selection(
        &self,
        column_indices: Option<&[usize]>,
        tree: &mut TreeList,
        engine: &mut ColumnEngine,
        mode: ChooserMode,
        recursive: bool,
    ) {
        let changed: Vec<(usize, bool)> = column_indices
            .unwrap_or(&[])
            .iter()
            .filter_map(|index| engine.column(*index).map(|c| (c.index, c.visible)))
            .collect();

        tree.begin_update();
        for (index, visible) in &changed {
            if *visible {
                tree.select_item(*index);
            } else {
                tree.unselect_item(*index);
            }
        }
        tree.end_update();

        for event in tree.drain_events() {
            if matches!(event, TreeListEvent::SelectionChanged) {
                self.on_selection_changed(tree, engine, mode, recursive);
            }
        }
    }
}

/// Depth-first pre-order flatten of the node forest: each node, then its
/// children. Deterministic so the corrective passes are reproducible.
pub fn flatten_nodes(nodes: &[TreeNode]) -> Vec<NodeSnapshot> {
    let mut flat = Vec::new();
    collect(nodes, &mut flat);
    flat
}

fn collect(nodes: &[TreeNode], flat: &mut Vec<NodeSnapshot>) {
    for node in nodes {
        flat.push(NodeSnapshot {
            key: node.key,
            allow_hiding: node.item.allow_hiding,
            selected: node.selected,
        });
        collect(&node.children, flat);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::Column;
    use crate::tree::TreeListConfig;

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

    fn flat_engine() -> ColumnEngine {
        let mut pinned = column(0, "Order", true);
        pinned.allow_hiding = Some(false);

        ColumnEngine::new(vec![
            pinned,
            column(1, "Customer", true),
            column(2, "Amount", true),
        ])
    }

    fn banded_engine() -> ColumnEngine {
        let mut band = column(0, "Shipping", true);
        band.has_columns = true;

        let mut city = column(1, "City", true);
        city.owner_band = Some(0);

        let mut country = column(2, "Country", true);
        country.owner_band = Some(0);

        ColumnEngine::new(vec![band, city, country])
    }

    fn select_tree(recursive: bool) -> TreeList {
        TreeList::new(TreeListConfig {
            recursive_selection: recursive,
            ..TreeListConfig::default()
        })
    }

    fn sync_setup(engine: &ColumnEngine, recursive: bool) -> (SelectionSync, TreeList) {
        let sync = SelectionSync::new();
        let mut tree = select_tree(recursive);
        sync.update_items(&mut tree, engine, ChooserMode::Select, recursive);
        tree.drain_events();
        (sync, tree)
    }

    #[test]
    fn test_non_hideable_node_stays_selected() {
        // Scenario A: deselecting the pinned column's node must not stick
        let mut engine = flat_engine();
        let (sync, mut tree) = sync_setup(&engine, false);

        tree.unselect_item(0);
        tree.drain_events();

        assert!(sync.on_selection_changed(&mut tree, &mut engine, ChooserMode::Select, false));

        assert_eq!(tree.nodes()[0].selected, Some(true));
        assert!(engine.column(0).unwrap().visible);
    }

    #[test]
    fn test_selection_mirrors_into_column_visibility() {
        let mut engine = flat_engine();
        let (sync, mut tree) = sync_setup(&engine, false);

        tree.unselect_item(1);
        tree.drain_events();
        sync.on_selection_changed(&mut tree, &mut engine, ChooserMode::Select, false);

        assert!(!engine.column(1).unwrap().visible);
        assert!(engine.column(2).unwrap().visible);

        for node in flatten_nodes(tree.nodes()) {
            let column = engine.column(node.key).unwrap();
            assert_eq!(column.visible, node.selected != Some(false));
        }
    }

    #[test]
    fn test_handler_runs_once_per_gesture() {
        let mut engine = flat_engine();
        let (sync, mut tree) = sync_setup(&engine, false);

        tree.unselect_item(1);
        tree.drain_events();
        sync.on_selection_changed(&mut tree, &mut engine, ChooserMode::Select, false);

        // Self-caused notifications were consumed inertly: nothing queued,
        // and exactly one synchronization pass completed
        assert_eq!(sync.completed_passes(), 1);
        assert!(tree.drain_events().is_empty());
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn test_guarded_handler_is_inert() {
        let mut engine = flat_engine();
        let (sync, mut tree) = sync_setup(&engine, false);

        let flag = ScopedFlag::acquire(&sync.updating_selection).unwrap();
        assert!(!sync.on_selection_changed(&mut tree, &mut engine, ChooserMode::Select, false));
        drop(flag);

        assert!(sync.on_selection_changed(&mut tree, &mut engine, ChooserMode::Select, false));
    }

    #[test]
    fn test_guard_released_after_pass() {
        let mut engine = flat_engine();
        let (sync, mut tree) = sync_setup(&engine, false);

        sync.on_selection_changed(&mut tree, &mut engine, ChooserMode::Select, false);

        assert!(!sync.updating_selection.get());
        assert!(!sync.updating_column_visibility.get());
    }

    #[test]
    fn test_lone_visibility_change_keeps_item_list() {
        // Targeted path: only the node's selection flips, no rebuild
        let mut engine = flat_engine();
        let (sync, mut tree) = sync_setup(&engine, false);
        let generation = tree.generation();

        engine.set_visible(2, false);
        for event in engine.drain_events() {
            sync.on_columns_changed(&event, &mut tree, &mut engine, ChooserMode::Select, false);
        }

        assert_eq!(tree.generation(), generation);
        let node = crate::tree::find_node(tree.nodes(), 2).unwrap();
        assert_eq!(node.selected, Some(false));
    }

    #[test]
    fn test_caption_change_rebuilds_item_list() {
        let mut engine = flat_engine();
        let (sync, mut tree) = sync_setup(&engine, false);
        let generation = tree.generation();

        engine.set_caption(1, "Client");
        for event in engine.drain_events() {
            sync.on_columns_changed(&event, &mut tree, &mut engine, ChooserMode::Select, false);
        }

        assert_eq!(tree.generation(), generation + 1);
        let node = crate::tree::find_node(tree.nodes(), 1).unwrap();
        assert_eq!(node.item.text, "Client");
    }

    #[test]
    fn test_bulk_change_triggers_full_rebuild() {
        // Scenario D: an all-columns notification takes the rebuild path
        let mut engine = flat_engine();
        let (sync, mut tree) = sync_setup(&engine, false);
        let generation = tree.generation();

        engine.notify_all_changed();
        for event in engine.drain_events() {
            assert!(sync.on_columns_changed(
                &event,
                &mut tree,
                &mut engine,
                ChooserMode::Select,
                false
            ));
        }

        assert_eq!(tree.generation(), generation + 1);
    }

    #[test]
    fn test_drag_mode_ignores_column_events() {
        let mut engine = flat_engine();
        let (sync, mut tree) = sync_setup(&engine, false);

        engine.set_visible(1, false);
        for event in engine.drain_events() {
            assert!(!sync.on_columns_changed(
                &event,
                &mut tree,
                &mut engine,
                ChooserMode::DragAndDrop,
                false
            ));
        }
    }

    #[test]
    fn test_recursive_band_child_selection() {
        // Scenario B: band state is the tree's business; only tracked
        // columns receive visibility writes that stick
        let mut engine = banded_engine();
        engine.set_visible(1, false);
        engine.set_visible(2, false);
        engine.drain_events();

        let (sync, mut tree) = sync_setup(&engine, true);

        tree.select_item(1);
        tree.drain_events();
        sync.on_selection_changed(&mut tree, &mut engine, ChooserMode::Select, true);

        // One child on, one off: the band node is indeterminate
        assert_eq!(tree.nodes()[0].selected, None);
        assert!(engine.column(1).unwrap().visible);
        assert!(!engine.column(2).unwrap().visible);
    }

    #[test]
    fn test_recursive_cascade_respects_non_hideable_child() {
        let mut band = column(0, "Band", true);
        band.has_columns = true;

        let mut pinned = column(1, "Pinned", true);
        pinned.owner_band = Some(0);
        pinned.allow_hiding = Some(false);

        let mut loose = column(2, "Loose", true);
        loose.owner_band = Some(0);

        let mut engine = ColumnEngine::new(vec![band, pinned, loose]);
        let (sync, mut tree) = sync_setup(&engine, true);

        // Deselecting the band cascades over both children
        tree.unselect_item(0);
        tree.drain_events();
        sync.on_selection_changed(&mut tree, &mut engine, ChooserMode::Select, true);

        assert!(engine.column(1).unwrap().visible);
        assert!(!engine.column(2).unwrap().visible);

        let pinned_node = crate::tree::find_node(tree.nodes(), 1).unwrap();
        assert_eq!(pinned_node.selected, Some(true));
    }

    #[test]
    fn test_empty_column_set_is_a_no_op() {
        let mut engine = ColumnEngine::new(Vec::new());
        let (sync, mut tree) = sync_setup(&engine, false);

        assert!(tree.is_empty());
        assert!(sync.on_selection_changed(&mut tree, &mut engine, ChooserMode::Select, false));
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn test_flatten_is_depth_first_preorder() {
        let engine = banded_engine();
        let (_sync, tree) = sync_setup(&engine, false);

        let keys: Vec<usize> = flatten_nodes(tree.nodes()).iter().map(|n| n.key).collect();
        assert_eq!(keys, vec![0, 1, 2]);
    }
}

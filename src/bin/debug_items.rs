// Debug script to show the chooser item projection for a grid config

use std::path::Path;

use grid_chooser::chooser::{flatten_nodes, process_items, ChooserMode, SelectionSync};
use grid_chooser::core::{ChooserConfig, GridConfig};
use grid_chooser::tree::{TreeList, TreeListConfig};
use grid_chooser::ColumnEngine;

fn main() {
    let grid_config = GridConfig::load(Path::new("grid.yaml")).expect("Failed to load grid.yaml");

    let mut chooser_config = ChooserConfig::default();
    if let Some(overrides) = &grid_config.column_chooser {
        chooser_config
            .apply_overrides(overrides)
            .expect("Invalid column_chooser overrides");
    }

    let select_mode = chooser_config.mode == ChooserMode::Select;
    let recursive = chooser_config.selection.recursive;

    let engine = ColumnEngine::new(grid_config.build_columns());

    println!("=== COLUMNS ===");
    for column in engine.columns() {
        println!(
            "  [{}] {:20} visible={} band={:?} allow_hiding={:?} chooser={}",
            column.index,
            column.caption,
            column.visible,
            column.owner_band,
            column.allow_hiding,
            column.show_in_chooser
        );
    }
    println!();

    println!("=== CHOOSER ITEMS (mode={:?}, recursive={}) ===", chooser_config.mode, recursive);
    let columns = engine.chooser_columns(select_mode);
    let items = process_items(&columns, select_mode, recursive);
    for item in &items {
        println!(
            "  id={} parent={:?} text={:?} selected={:?} disabled={}",
            item.id, item.parent_id, item.text, item.selected, item.disabled
        );
    }
    println!();

    println!("=== TREE FOREST (pre-order flatten) ===");
    let sync = SelectionSync::new();
    let mut tree = TreeList::new(TreeListConfig {
        recursive_selection: recursive,
        ..TreeListConfig::default()
    });
    sync.update_items(&mut tree, &engine, chooser_config.mode, recursive);

    for node in flatten_nodes(tree.nodes()) {
        println!(
            "  key={} selected={:?} allow_hiding={:?}",
            node.key, node.selected, node.allow_hiding
        );
    }
    println!();

    println!("Synchronization passes completed: {}", sync.completed_passes());
}

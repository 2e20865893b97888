// Tree Nodes
// The assembled node forest exposed for introspection

use super::item::TreeItem;

/// A node of the assembled forest
///
/// `key` equals the originating item's `id`. `selected` is tri-state:
/// `Some(true)`, `Some(false)`, or `None` for an indeterminate parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub key: usize,
    pub item: TreeItem,
    pub selected: Option<bool>,
    pub expanded: bool,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(item: TreeItem) -> Self {
        Self {
            key: item.id,
            selected: item.selected,
            expanded: item.expanded,
            item,
            children: Vec::new(),
        }
    }
}

/// Find a node by key anywhere in the forest
pub fn find_node<'a>(nodes: &'a [TreeNode], key: usize) -> Option<&'a TreeNode> {
    for node in nodes {
        if node.key == key {
            return Some(node);
        }
        if let Some(found) = find_node(&node.children, key) {
            return Some(found);
        }
    }
    None
}

/// Find a node by key anywhere in the forest, mutably
pub fn find_node_mut<'a>(nodes: &'a mut [TreeNode], key: usize) -> Option<&'a mut TreeNode> {
    for node in nodes {
        if node.key == key {
            return Some(node);
        }
        if let Some(found) = find_node_mut(&mut node.children, key) {
            return Some(found);
        }
    }
    None
}

//! Nested data -> flat tree item sequence.
//!
//! Emission order is pre-order with siblings in source order: each node is
//! followed by its whole subtree before its next sibling. The traversal uses an
//! explicit stack, so arbitrarily deep input cannot overflow the call stack.

use crate::model::{ItemDiagnostic, ItemId, ItemIndex, TreeItem, TreeItemMetadata, TreeNode};
use std::collections::HashSet;
use tracing::warn;

/// Options applied to every item of one flatten call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlattenOptions {
    /// Initial expansion of items that have children.
    pub expanded: bool,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self { expanded: true }
    }
}

impl FlattenOptions {
    /// Every parent item starts collapsed.
    pub fn collapsed() -> Self {
        Self { expanded: false }
    }
}

/// A node waiting on the traversal stack with its computed position.
struct Pending<'a, N> {
    node: &'a N,
    level: usize,
    parent: Option<ItemIndex>,
    inset: usize,
    size: usize,
}

/// Flatten with default options (every parent expanded).
pub fn flatten<N: TreeNode>(source: &[N]) -> Vec<TreeItem<N::Data>> {
    flatten_with(source, &FlattenOptions::default())
}

/// Flatten `source` into one item per node.
///
/// Identifiers come from [`TreeNode::id`] when present and not already taken
/// earlier in this call; otherwise a fresh identifier is generated.
pub fn flatten_with<N: TreeNode>(
    source: &[N],
    options: &FlattenOptions,
) -> Vec<TreeItem<N::Data>> {
    let mut items = Vec::with_capacity(source.len());
    let mut used = HashSet::new();
    let mut stack = Vec::new();

    push_siblings(&mut stack, source, 1, None);

    while let Some(Pending {
        node,
        level,
        parent,
        inset,
        size,
    }) = stack.pop()
    {
        let index = ItemIndex::new(items.len());
        let children = node.children();
        let metadata = TreeItemMetadata {
            level,
            size,
            inset,
            has_children: !children.is_empty(),
            expanded: Some(options.expanded),
        };
        let identifier = claim_identifier(node.id(), &mut used);

        items.push(TreeItem::new(node.to_data(), metadata, parent, Some(identifier)));
        push_siblings(&mut stack, children, level + 1, Some(index));
    }

    items
}

/// Push a sibling group so that the first sibling pops first.
fn push_siblings<'a, N>(
    stack: &mut Vec<Pending<'a, N>>,
    siblings: &'a [N],
    level: usize,
    parent: Option<ItemIndex>,
) {
    let size = siblings.len();
    for (position, node) in siblings.iter().enumerate().rev() {
        stack.push(Pending {
            node,
            level,
            parent,
            inset: position + 1,
            size,
        });
    }
}

fn claim_identifier(requested: Option<&str>, used: &mut HashSet<ItemId>) -> ItemId {
    if let Some(raw) = requested {
        let id = ItemId::new(raw);
        if !used.contains(&id) {
            used.insert(id.clone());
            return id;
        }
        warn!("{}", ItemDiagnostic::DuplicateIdentifier(id));
    }

    loop {
        let id = ItemId::generate();
        if used.insert(id.clone()) {
            return id;
        }
    }
}

/// Total number of nodes in a nested forest.
pub fn count_nodes<N: TreeNode>(source: &[N]) -> usize {
    let mut count = 0;
    let mut stack: Vec<&N> = source.iter().collect();
    while let Some(node) = stack.pop() {
        count += 1;
        stack.extend(node.children());
    }
    count
}

#[cfg(test)]
#[path = "flatten_tests.rs"]
mod tests;

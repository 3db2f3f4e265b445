use serde::{Deserialize, Serialize};

use crate::Section;

/// Entry in the navigable table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineNode {
    pub id: String,
    pub title: String,
    pub level: u8,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    fn leaf(section: &Section) -> Self {
        Self {
            id: section.id.clone(),
            title: section.title.clone(),
            level: section.level,
            children: Vec::new(),
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Node still being assembled; children are arena indices.
struct PendingNode {
    node: OutlineNode,
    children: Vec<usize>,
}

/// Fold the flat section sequence into an outline forest.
///
/// A level-1 section always starts a fresh root and resets the open scopes.
/// Any other section closes every open scope whose level is greater than or
/// equal to its own, then becomes a child of the remaining innermost scope, or
/// a root when none is left. Levels are never validated, so jumps such as
/// 1 → 4 → 2 are accepted as they come.
pub fn build_outline(sections: &[Section]) -> Vec<OutlineNode> {
    let mut arena: Vec<PendingNode> = Vec::with_capacity(sections.len());
    let mut roots: Vec<usize> = Vec::new();
    let mut stack: Vec<usize> = Vec::new();

    for section in sections {
        let index = arena.len();
        arena.push(PendingNode {
            node: OutlineNode::leaf(section),
            children: Vec::new(),
        });

        if section.level == 1 {
            roots.push(index);
            stack.clear();
            stack.push(index);
            continue;
        }

        while let Some(&top) = stack.last() {
            if arena[top].node.level < section.level {
                break;
            }
            stack.pop();
        }

        match stack.last() {
            Some(&parent) => arena[parent].children.push(index),
            None => roots.push(index),
        }
        stack.push(index);
    }

    let mut slots: Vec<Option<PendingNode>> = arena.into_iter().map(Some).collect();
    roots
        .into_iter()
        .filter_map(|index| assemble(&mut slots, index))
        .collect()
}

// Every index is referenced by exactly one parent or the root list, so each
// slot is taken once.
fn assemble(slots: &mut [Option<PendingNode>], index: usize) -> Option<OutlineNode> {
    let PendingNode { mut node, children } = slots.get_mut(index)?.take()?;
    node.children = children
        .into_iter()
        .filter_map(|child| assemble(slots, child))
        .collect();
    Some(node)
}

/// Total number of nodes across the forest.
pub fn count_nodes(forest: &[OutlineNode]) -> usize {
    forest
        .iter()
        .map(|node| 1 + count_nodes(&node.children))
        .sum()
}

/// Nodes in pre-order: each node before its children, siblings in order.
pub fn walk_preorder(forest: &[OutlineNode]) -> Vec<&OutlineNode> {
    let mut visited = Vec::with_capacity(count_nodes(forest));
    let mut pending: Vec<&OutlineNode> = forest.iter().rev().collect();

    while let Some(node) = pending.pop() {
        visited.push(node);
        pending.extend(node.children.iter().rev());
    }

    visited
}

//! FILENAME: grid-model/src/tree.rs
//! PURPOSE: Converts an ordered label sequence into a rooted label tree.
//! CONTEXT: Each node's key is its ancestors' values plus its own value.
//! Nodes live in an arena owned by the tree; parents and children refer to
//! each other by index. The arena is filled breadth-first, so arena order is
//! level order: every level is contiguous and laid out left to right, and a
//! child always has a larger id than its parent.
//!
//! Client data for nodes (display values, resolved spans, ...) lives in a
//! parallel `NodeData<T>` instead of on the nodes, so a walk never has to
//! clone the tree to avoid aliasing payloads.

use std::collections::VecDeque;
use std::ops::Index;
use rustc_hash::FxHashSet;
use crate::error::LayoutError;
use crate::label::{Axis, Label, LabelKey, Labels};

/// Index of a node inside its tree's arena.
pub type NodeId = usize;

/// One label at one level of an index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelNode {
    pub value: Label,
    pub key: LabelKey,
    /// `None` for top-level nodes (children of the synthetic root).
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl LabelNode {
    /// 1-based level of this node (top-level nodes are depth 1).
    pub fn depth(&self) -> usize {
        self.key.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A label tree under a synthetic, label-less root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelTree {
    axis: Axis,
    levels: usize,
    nodes: Vec<LabelNode>,
    roots: Vec<NodeId>,
}

/// A queued run of label suffixes waiting to become children of `parent`.
struct PendingLevel<'a> {
    parent: Option<NodeId>,
    rows: Vec<&'a [Label]>,
}

impl LabelTree {
    /// Builds the tree for one axis.
    ///
    /// Tuples are grouped by shared prefix, preserving first-seen order.
    /// Only the first level is required to be contiguous; deeper levels are
    /// grouped run by run.
    pub fn build(axis: Axis, labels: &Labels) -> Result<Self, LayoutError> {
        let levels = labels.levels();
        check_arity(axis, labels)?;
        check_first_level_contiguity(axis, labels)?;

        let mut tree = LabelTree {
            axis,
            levels,
            nodes: Vec::with_capacity(labels.len()),
            roots: Vec::new(),
        };

        let mut queue = VecDeque::new();
        queue.push_back(PendingLevel {
            parent: None,
            rows: labels.tuples().iter().map(|t| t.as_slice()).collect(),
        });

        while let Some(PendingLevel { parent, rows }) = queue.pop_front() {
            let mut start = 0;
            while start < rows.len() {
                let head = &rows[start][0];

                // Last level: every tuple is its own leaf, even repeated ones.
                if rows[start].len() == 1 {
                    tree.push_node(parent, head.clone());
                    start += 1;
                    continue;
                }

                let mut end = start + 1;
                while end < rows.len() && rows[end][0] == *head {
                    end += 1;
                }

                let id = tree.push_node(parent, head.clone());
                queue.push_back(PendingLevel {
                    parent: Some(id),
                    rows: rows[start..end].iter().map(|&r| &r[1..]).collect(),
                });
                start = end;
            }
        }

        Ok(tree)
    }

    fn push_node(&mut self, parent: Option<NodeId>, value: Label) -> NodeId {
        let id = self.nodes.len();
        let mut key = match parent {
            Some(p) => self.nodes[p].key.clone(),
            None => LabelKey::new(),
        };
        key.push(value.clone());

        self.nodes.push(LabelNode {
            value,
            key,
            parent,
            children: Vec::new(),
        });

        match parent {
            Some(p) => self.nodes[p].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Declared number of index levels (1 for a flat sequence).
    pub fn levels(&self) -> usize {
        self.levels
    }

    /// Total number of nodes, excluding the synthetic root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &LabelNode {
        &self.nodes[id]
    }

    /// Children of the synthetic root, in declared order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// All nodes in arena order, which is level order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &LabelNode)> {
        self.nodes.iter().enumerate()
    }

    /// Node ids top-down, each level left to right.
    pub fn level_order(&self) -> impl Iterator<Item = NodeId> {
        0..self.nodes.len()
    }

    /// Node ids parent-before-children, siblings in declared order.
    pub fn pre_order(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.nodes[id].children.iter().rev().copied());
        }
        out
    }

    /// Node ids children-before-parent, siblings in declared order.
    pub fn post_order(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(NodeId, bool)> = self.roots.iter().rev().map(|&id| (id, false)).collect();
        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                out.push(id);
                continue;
            }
            stack.push((id, true));
            stack.extend(self.nodes[id].children.iter().rev().map(|&c| (c, false)));
        }
        out
    }

    /// Leaf ids in declared order. Leaves map one-to-one onto table rows
    /// (or columns).
    pub fn leaves(&self) -> Vec<NodeId> {
        self.pre_order()
            .into_iter()
            .filter(|&id| self.nodes[id].is_leaf())
            .collect()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Finds the first node whose composite key equals `key`.
    pub fn find(&self, key: &[Label]) -> Option<NodeId> {
        let (first, rest) = key.split_first()?;
        let mut current = *self.roots.iter().find(|&&id| self.nodes[id].value == *first)?;
        for label in rest {
            current = *self.nodes[current]
                .children
                .iter()
                .find(|&&id| self.nodes[id].value == *label)?;
        }
        Some(current)
    }

    /// Computes a payload for every node, visiting in level order.
    /// Stateful closures can rely on that order (e.g. running cursors).
    pub fn map_level_order<T>(&self, mut f: impl FnMut(NodeId, &LabelNode) -> T) -> NodeData<T> {
        NodeData::from_vec(self.nodes.iter().enumerate().map(|(id, n)| f(id, n)).collect())
    }

    /// Fails with `DuplicateLabel` if two leaves share a composite key.
    pub fn check_unique_leaves(&self) -> Result<(), LayoutError> {
        let mut seen = FxHashSet::default();
        for id in self.leaves() {
            let key = &self.nodes[id].key;
            if !seen.insert(key) {
                return Err(LayoutError::DuplicateLabel {
                    axis: self.axis,
                    key: crate::label::key_to_string(key),
                });
            }
        }
        Ok(())
    }
}

fn check_arity(axis: Axis, labels: &Labels) -> Result<(), LayoutError> {
    let expected = labels.levels();
    for (position, tuple) in labels.tuples().iter().enumerate() {
        if tuple.len() != expected {
            return Err(LayoutError::RaggedLabels {
                axis,
                expected,
                found: tuple.len(),
                position,
            });
        }
    }
    Ok(())
}

/// A first-level value may only appear as one unbroken run.
fn check_first_level_contiguity(axis: Axis, labels: &Labels) -> Result<(), LayoutError> {
    if labels.levels() < 2 {
        return Ok(());
    }

    let mut finished: FxHashSet<&Label> = FxHashSet::default();
    let mut current: Option<&Label> = None;
    for (position, tuple) in labels.tuples().iter().enumerate() {
        let head = &tuple[0];
        if current == Some(head) {
            continue;
        }
        if finished.contains(head) {
            return Err(LayoutError::NonContiguousIndex {
                axis,
                label: head.to_string(),
                position,
            });
        }
        if let Some(prev) = current {
            finished.insert(prev);
        }
        current = Some(head);
    }
    Ok(())
}

/// Per-node client data, parallel to a `LabelTree`'s arena.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData<T> {
    values: Vec<T>,
}

impl<T> NodeData<T> {
    pub fn from_vec(values: Vec<T>) -> Self {
        NodeData { values }
    }

    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.values.get(id)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &T)> {
        self.values.iter().enumerate()
    }

    /// Maps every value, stopping at the first error.
    pub fn try_map<U, E>(&self, f: impl FnMut(&T) -> Result<U, E>) -> Result<NodeData<U>, E> {
        Ok(NodeData {
            values: self.values.iter().map(f).collect::<Result<_, _>>()?,
        })
    }
}

impl<T> Index<NodeId> for NodeData<T> {
    type Output = T;

    fn index(&self, id: NodeId) -> &T {
        &self.values[id]
    }
}

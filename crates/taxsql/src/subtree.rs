//! Subtree selection over the node hierarchy
//!
//! Builds a parent → children index from the node map and walks it from a
//! root. Nodes hanging off parents that are never reached are left out
//! without complaint, including whole branches under parent ids that are
//! missing from the dump.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::debug;

use crate::taxdump::{NodeMap, TaxId};

/// Order in which the hierarchy is walked
///
/// Both orders select the same set of taxa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Traversal {
    #[default]
    BreadthFirst,
    DepthFirst,
}

/// Parent id → child ids, children in node-map order
#[derive(Debug, Default)]
pub struct ChildIndex {
    children: HashMap<TaxId, Vec<TaxId>>,
}

impl ChildIndex {
    /// Index every node under its parent id
    ///
    /// A self-parented node (the dump root) is not recorded as its own child.
    pub fn build(nodes: &NodeMap) -> Self {
        let mut children: HashMap<TaxId, Vec<TaxId>> = HashMap::new();

        for node in nodes.values() {
            if node.is_self_parented() {
                continue;
            }
            children.entry(node.parent_tax_id).or_default().push(node.tax_id);
        }

        Self { children }
    }

    /// Children of `parent`, empty when it has none
    pub fn children(&self, parent: TaxId) -> &[TaxId] {
        self.children.get(&parent).map(Vec::as_slice).unwrap_or_default()
    }
}

/// A root taxon and every taxon reachable below it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subtree {
    root: TaxId,
    members: HashSet<TaxId>,
}

impl Subtree {
    pub fn root(&self) -> TaxId {
        self.root
    }

    pub fn contains(&self, tax_id: TaxId) -> bool {
        self.members.contains(&tax_id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false: the root is a member
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member ids in ascending order
    pub fn sorted_ids(&self) -> Vec<TaxId> {
        let mut ids: Vec<TaxId> = self.members.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn iter(&self) -> impl Iterator<Item = TaxId> + '_ {
        self.members.iter().copied()
    }
}

/// Select `root` and all of its descendants, breadth-first
pub fn select_subtree(nodes: &NodeMap, root: TaxId) -> Subtree {
    select_subtree_with(nodes, root, Traversal::BreadthFirst)
}

/// Select `root` and all of its descendants using the given traversal
///
/// The root is a member even if `nodes` lacks it.
pub fn select_subtree_with(nodes: &NodeMap, root: TaxId, traversal: Traversal) -> Subtree {
    let index = ChildIndex::build(nodes);
    let members: HashSet<TaxId> = walk(&index, root, traversal).into_iter().collect();

    debug!(root, selected = members.len(), total = nodes.len(), "Selected subtree");
    Subtree { root, members }
}

/// Visit order of a walk from `root`
///
/// Each id is queued at most once, so duplicate edges and cycles cannot make
/// the walk revisit a node.
fn walk(index: &ChildIndex, root: TaxId, traversal: Traversal) -> Vec<TaxId> {
    let mut queued = HashSet::from([root]);
    let mut pending = VecDeque::from([root]);
    let mut visited = Vec::new();

    loop {
        let current = match traversal {
            Traversal::BreadthFirst => pending.pop_front(),
            Traversal::DepthFirst => pending.pop_back(),
        };
        let Some(current) = current else {
            break;
        };
        visited.push(current);

        for &child in index.children(current) {
            if queued.insert(child) {
                pending.push_back(child);
            }
        }
    }

    visited
}

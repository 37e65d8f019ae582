//! Store traits and dimension tags.
//!
//! The tree engine never owns nodes. Every "pointer" is a `u32` index into a
//! caller-owned store, and the store decides which [`TreeNode`] participation
//! a tag selects. One store can therefore carry several independent trees
//! over the same records, one per tag.

use std::cmp::Ordering;

use crate::node::TreeNode;

/// Tag selecting the left-key participation of a record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LeftTag;

/// Tag selecting the right-key participation of a record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RightTag;

/// Index-addressed access to the tree participation selected by `Tag`.
///
/// Implementations may panic when `id` does not designate a live node: the
/// tree only follows links it created itself.
pub trait NodeStore<Tag> {
    type Key;

    fn node(&self, id: u32) -> &TreeNode<Self::Key>;
    fn node_mut(&mut self, id: u32) -> &mut TreeNode<Self::Key>;
}

/// Comparator shape accepted by the trees: a strict weak order.
pub type Comparator<K> = fn(&K, &K) -> Ordering;

/// Natural ordering, used when no comparator is supplied.
pub fn natural_order<K: Ord>(a: &K, b: &K) -> Ordering {
    a.cmp(b)
}

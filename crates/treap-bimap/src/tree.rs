//! Randomized balanced search tree (treap) over index links.
//!
//! A [`CartesianTree`] keeps two orders at once: keys are in BST order under
//! the tree's comparator and priorities are in max-heap order. Priorities
//! are drawn independently of keys, so the expected height is logarithmic.
//!
//! The tree value itself acts as the anchor above the root. Its only child
//! is `root`, and the anchor is the "one past the end" position, written as
//! `None` wherever a position is expected. The anchor never takes part in
//! split or merge, which is equivalent to it holding the maximal priority.
//!
//! Split and merge are loops that thread a single attachment point down the
//! tree, so no operation recurses on the native stack.

use std::cmp::Ordering;
use std::marker::PhantomData;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

use crate::types::NodeStore;

/// Where the next subtree produced by [`CartesianTree::merge`] is hung.
#[derive(Clone, Copy)]
enum Hook {
    Left(u32),
    Right(u32),
}

pub struct CartesianTree<T, C> {
    root: Option<u32>,
    comparator: C,
    rng: Xoshiro256StarStar,
    _tag: PhantomData<fn() -> T>,
}

/// The clone's generator is moved `2^192` draws ahead, so the copy and the
/// original no longer hand out the same priorities.
impl<T, C: Clone> Clone for CartesianTree<T, C> {
    fn clone(&self) -> Self {
        let mut rng = self.rng.clone();
        rng.long_jump();
        Self {
            root: self.root,
            comparator: self.comparator.clone(),
            rng,
            _tag: PhantomData,
        }
    }
}

impl<T, C> CartesianTree<T, C> {
    /// Creates an empty tree whose priorities come from a generator seeded
    /// with `seed`.
    pub fn new(comparator: C, seed: u64) -> Self {
        Self {
            root: None,
            comparator,
            rng: Xoshiro256StarStar::seed_from_u64(seed),
            _tag: PhantomData,
        }
    }

    #[inline]
    pub fn root(&self) -> Option<u32> {
        self.root
    }

    #[inline]
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Draws a fresh priority, strictly below `u64::MAX`.
    pub fn draw_priority(&mut self) -> u64 {
        self.rng.gen_range(0..u64::MAX)
    }

    /// Forgets every node. The store keeps whatever the links pointed at.
    pub fn clear(&mut self) {
        self.root = None;
    }

    // ── links ─────────────────────────────────────────────────────────────

    #[inline]
    fn link_left<S: NodeStore<T>>(store: &mut S, parent: u32, child: Option<u32>) {
        store.node_mut(parent).l = child;
        if let Some(c) = child {
            store.node_mut(c).p = Some(parent);
        }
    }

    #[inline]
    fn link_right<S: NodeStore<T>>(store: &mut S, parent: u32, child: Option<u32>) {
        store.node_mut(parent).r = child;
        if let Some(c) = child {
            store.node_mut(c).p = Some(parent);
        }
    }

    fn attach<S: NodeStore<T>>(
        store: &mut S,
        root: &mut Option<u32>,
        hook: Option<Hook>,
        child: Option<u32>,
    ) {
        match hook {
            None => {
                *root = child;
                if let Some(c) = child {
                    store.node_mut(c).p = None;
                }
            }
            Some(Hook::Left(parent)) => Self::link_left(store, parent, child),
            Some(Hook::Right(parent)) => Self::link_right(store, parent, child),
        }
    }

    // ── traversal ─────────────────────────────────────────────────────────

    /// Leftmost node, or `None` for an empty tree.
    pub fn first<S: NodeStore<T>>(&self, store: &S) -> Option<u32> {
        let mut curr = self.root?;
        while let Some(l) = store.node(curr).l {
            curr = l;
        }
        Some(curr)
    }

    /// Rightmost node, or `None` for an empty tree.
    pub fn last<S: NodeStore<T>>(&self, store: &S) -> Option<u32> {
        let mut curr = self.root?;
        while let Some(r) = store.node(curr).r {
            curr = r;
        }
        Some(curr)
    }

    /// In-order successor. The successor of the maximum is the anchor
    /// (`None`).
    pub fn next<S: NodeStore<T>>(&self, store: &S, node: u32) -> Option<u32> {
        if let Some(r) = store.node(node).r {
            let mut curr = r;
            while let Some(l) = store.node(curr).l {
                curr = l;
            }
            return Some(curr);
        }
        let mut curr = node;
        let mut p = store.node(node).p;
        while let Some(pi) = p {
            if store.node(pi).r == Some(curr) {
                curr = pi;
                p = store.node(pi).p;
            } else {
                return Some(pi);
            }
        }
        None
    }

    /// In-order predecessor. The predecessor of the minimum is the anchor
    /// (`None`).
    pub fn prev<S: NodeStore<T>>(&self, store: &S, node: u32) -> Option<u32> {
        if let Some(l) = store.node(node).l {
            let mut curr = l;
            while let Some(r) = store.node(curr).r {
                curr = r;
            }
            return Some(curr);
        }
        let mut curr = node;
        let mut p = store.node(node).p;
        while let Some(pi) = p {
            if store.node(pi).l == Some(curr) {
                curr = pi;
                p = store.node(pi).p;
            } else {
                return Some(pi);
            }
        }
        None
    }

    /// Steps back from a position; stepping back from the anchor yields the
    /// maximum.
    pub fn step_back<S: NodeStore<T>>(&self, store: &S, pos: Option<u32>) -> Option<u32> {
        match pos {
            Some(node) => self.prev(store, node),
            None => self.last(store),
        }
    }

    /// Node count, by walking the tree.
    pub fn len<S: NodeStore<T>>(&self, store: &S) -> usize {
        let mut count = 0;
        let mut stack: Vec<u32> = self.root.into_iter().collect();
        while let Some(node) = stack.pop() {
            count += 1;
            let n = store.node(node);
            stack.extend(n.l);
            stack.extend(n.r);
        }
        count
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn height<S: NodeStore<T>>(&self, store: &S) -> usize {
        let mut height = 0;
        let mut stack: Vec<(u32, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            let n = store.node(node);
            stack.extend(n.l.map(|l| (l, depth + 1)));
            stack.extend(n.r.map(|r| (r, depth + 1)));
        }
        height
    }

    // ── split / merge ─────────────────────────────────────────────────────

    /// Partitions the subtree at `root` into the nodes for which `goes_left`
    /// holds (a prefix in key order) and the rest. Both returned roots are
    /// detached from any parent.
    fn split_by<S, F>(store: &mut S, root: Option<u32>, goes_left: F) -> (Option<u32>, Option<u32>)
    where
        S: NodeStore<T>,
        F: Fn(&S, u32) -> bool,
    {
        let mut less = None;
        let mut rest = None;
        let mut less_hook: Option<u32> = None;
        let mut rest_hook: Option<u32> = None;
        let mut curr = root;
        while let Some(node) = curr {
            if goes_left(&*store, node) {
                Self::attach(store, &mut less, less_hook.map(Hook::Right), Some(node));
                less_hook = Some(node);
                curr = store.node(node).r;
            } else {
                Self::attach(store, &mut rest, rest_hook.map(Hook::Left), Some(node));
                rest_hook = Some(node);
                curr = store.node(node).l;
            }
        }
        if let Some(h) = less_hook {
            store.node_mut(h).r = None;
        }
        if let Some(h) = rest_hook {
            store.node_mut(h).l = None;
        }
        (less, rest)
    }

    /// Splits the subtree at `root` into keys `< key` and keys `>= key`.
    pub fn split<S>(&self, store: &mut S, root: Option<u32>, key: &S::Key) -> (Option<u32>, Option<u32>)
    where
        S: NodeStore<T>,
        C: Fn(&S::Key, &S::Key) -> Ordering,
    {
        let cmp = &self.comparator;
        Self::split_by(store, root, |s, node| cmp(&s.node(node).key, key) == Ordering::Less)
    }

    /// Same as [`split`](Self::split), with the pivot key read from node
    /// `pivot` of the same store.
    fn split_at_node<S>(&self, store: &mut S, root: Option<u32>, pivot: u32) -> (Option<u32>, Option<u32>)
    where
        S: NodeStore<T>,
        C: Fn(&S::Key, &S::Key) -> Ordering,
    {
        let cmp = &self.comparator;
        Self::split_by(store, root, |s, node| {
            cmp(&s.node(node).key, &s.node(pivot).key) == Ordering::Less
        })
    }

    /// Joins two subtrees where every key of `left` is below every key of
    /// `right`. The root with the higher priority stays on top; ties go to
    /// `right`.
    pub fn merge<S: NodeStore<T>>(store: &mut S, mut left: Option<u32>, mut right: Option<u32>) -> Option<u32> {
        let mut root = None;
        let mut hook = None;
        loop {
            let (top, below) = match (left, right) {
                (Some(a), Some(b)) if store.node(a).priority > store.node(b).priority => {
                    left = store.node(a).r;
                    (Some(a), Some(Hook::Right(a)))
                }
                (Some(_), Some(b)) => {
                    right = store.node(b).l;
                    (Some(b), Some(Hook::Left(b)))
                }
                (rest, None) | (None, rest) => (rest, None),
            };
            Self::attach(store, &mut root, hook, top);
            match below {
                Some(next_hook) => hook = Some(next_hook),
                None => return root,
            }
        }
    }

    // ── keyed operations ──────────────────────────────────────────────────

    /// Node whose key compares equal to `key`.
    pub fn find<S>(&self, store: &S, key: &S::Key) -> Option<u32>
    where
        S: NodeStore<T>,
        C: Fn(&S::Key, &S::Key) -> Ordering,
    {
        let mut curr = self.root;
        while let Some(node) = curr {
            let n = store.node(node);
            curr = match (self.comparator)(key, &n.key) {
                Ordering::Less => n.l,
                Ordering::Greater => n.r,
                Ordering::Equal => return Some(node),
            };
        }
        None
    }

    /// Node with the smallest key `>= key`, or `None` if every key is below
    /// `key`.
    pub fn lower_bound<S>(&self, store: &S, key: &S::Key) -> Option<u32>
    where
        S: NodeStore<T>,
        C: Fn(&S::Key, &S::Key) -> Ordering,
    {
        if let Some(found) = self.find(store, key) {
            return Some(found);
        }
        let cmp = &self.comparator;
        let below = |node: u32| cmp(&store.node(node).key, key) == Ordering::Less;

        let mut curr = self.root;
        while let Some(node) = curr {
            if !below(node) {
                break;
            }
            curr = store.node(node).r;
        }
        let mut best = curr?;
        curr = store.node(best).l;
        while let Some(node) = curr {
            if below(node) {
                curr = store.node(node).r;
            } else {
                if cmp(&store.node(node).key, &store.node(best).key) == Ordering::Less {
                    best = node;
                }
                curr = store.node(node).l;
            }
        }
        Some(best)
    }

    /// Links `node` into the tree. The node must already carry its priority
    /// and its key must not be present.
    pub fn insert<S>(&mut self, store: &mut S, node: u32)
    where
        S: NodeStore<T>,
        C: Fn(&S::Key, &S::Key) -> Ordering,
    {
        store.node_mut(node).unlink();
        let (less, rest) = self.split_at_node(store, self.root, node);
        let less = Self::merge(store, less, Some(node));
        self.root = Self::merge(store, less, rest);
    }

    /// Unlinks the node holding `key` and returns it.
    pub fn remove<S>(&mut self, store: &mut S, key: &S::Key) -> Option<u32>
    where
        S: NodeStore<T>,
        C: Fn(&S::Key, &S::Key) -> Ordering,
    {
        let node = self.find(store, key)?;
        self.remove_node(store, node);
        Some(node)
    }

    /// Unlinks `node`, which must belong to this tree. The node comes back
    /// with all links cleared; its storage is left to the caller.
    pub fn remove_node<S>(&mut self, store: &mut S, node: u32)
    where
        S: NodeStore<T>,
        C: Fn(&S::Key, &S::Key) -> Ordering,
    {
        let successor = self.next(store, node);
        let (less, rest) = self.split_at_node(store, self.root, node);
        let greater = match successor {
            Some(succ) => {
                let (isolated, greater) = self.split_at_node(store, rest, succ);
                debug_assert_eq!(isolated, Some(node));
                greater
            }
            None => None,
        };
        self.root = Self::merge(store, less, greater);
        store.node_mut(node).unlink();
    }

    /// Walks the whole tree and asserts BST order, heap order and parent
    /// links. Returns the node count.
    pub fn check<S>(&self, store: &S) -> usize
    where
        S: NodeStore<T>,
        C: Fn(&S::Key, &S::Key) -> Ordering,
    {
        if let Some(root) = self.root {
            assert_eq!(store.node(root).p, None, "root {root} has a parent");
        }
        let mut stack: Vec<u32> = self.root.into_iter().collect();
        while let Some(node) = stack.pop() {
            let n = store.node(node);
            for child in [n.l, n.r].into_iter().flatten() {
                let c = store.node(child);
                assert_eq!(c.p, Some(node), "child {child} does not point back to {node}");
                assert!(c.priority <= n.priority, "heap order broken at {node} -> {child}");
                stack.push(child);
            }
        }

        let mut count = 0;
        let mut prev: Option<u32> = None;
        let mut curr = self.first(store);
        while let Some(node) = curr {
            if let Some(p) = prev {
                assert_eq!(
                    (self.comparator)(&store.node(p).key, &store.node(node).key),
                    Ordering::Less,
                    "keys out of order at {p} -> {node}"
                );
            }
            count += 1;
            prev = Some(node);
            curr = self.next(store, node);
        }
        assert_eq!(count, self.len(store), "in-order walk missed nodes");
        count
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

use std::cmp::Ordering;
use std::fmt;

use log::{debug, trace};
use rand::rngs::OsRng;
use rand::RngCore;

use crate::config::Config;
use crate::cursor::{LeftIter, LeftPos, RightIter, RightPos};
use crate::error::{Error, Result};
use crate::node::{EntryRecord, Records};
use crate::tree::CartesianTree;
use crate::types::{natural_order, Comparator, LeftTag, RightTag};

/// Ordered one-to-one map between left values and right values.
///
/// Every entry is a single [`EntryRecord`] linked into two treaps, one
/// ordered by `CL` over left values and one ordered by `CR` over right
/// values. Either side is a unique key with lookups, bounds and ordered
/// traversal.
///
/// # Examples
///
/// ```
/// use treap_bimap::BiMap;
///
/// let mut map = BiMap::new();
/// map.insert(1, "a");
/// map.insert(2, "b");
///
/// assert_eq!(map.at_left(&2), Ok(&"b"));
/// assert_eq!(map.at_right(&"a"), Ok(&1));
///
/// // Either key already present: the pair is rejected.
/// assert!(map.insert(3, "a").is_end());
/// assert_eq!(map.len(), 2);
/// ```
#[derive(Clone)]
pub struct BiMap<L, R, CL = Comparator<L>, CR = Comparator<R>> {
    records: Records<L, R>,
    left: CartesianTree<LeftTag, CL>,
    right: CartesianTree<RightTag, CR>,
    len: usize,
}

impl<L: Ord, R: Ord> BiMap<L, R> {
    /// Empty map ordered by `Ord` on both sides, with seeds from the OS.
    pub fn new() -> Self {
        Self::with_config(natural_order::<L>, natural_order::<R>, Config::default())
    }

    /// Empty map with reproducible priorities.
    pub fn from_seed(seed: u64) -> Self {
        Self::with_config(natural_order::<L>, natural_order::<R>, Config::seeded(seed))
    }
}

impl<L: Ord, R: Ord> Default for BiMap<L, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L, R, CL, CR> BiMap<L, R, CL, CR> {
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.left.clear();
        self.right.clear();
        self.records.clear();
        self.len = 0;
    }

    /// Exchanges the whole contents of two maps.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    #[inline]
    fn live(&self, node: Option<u32>) -> Option<u32> {
        node.filter(|&id| self.records.get(id).is_some())
    }

    // ── positions ─────────────────────────────────────────────────────────

    pub fn begin_left(&self) -> LeftPos {
        LeftPos(self.left.first(&self.records))
    }

    pub fn end_left(&self) -> LeftPos {
        LeftPos::END
    }

    pub fn begin_right(&self) -> RightPos {
        RightPos(self.right.first(&self.records))
    }

    pub fn end_right(&self) -> RightPos {
        RightPos::END
    }

    /// The following position in left order; the end stays at the end.
    pub fn next_left(&self, pos: LeftPos) -> LeftPos {
        LeftPos(self.live(pos.0).and_then(|id| self.left.next(&self.records, id)))
    }

    /// The preceding position in left order. Stepping back from the end
    /// yields the last entry, stepping back from the first yields the end.
    pub fn prev_left(&self, pos: LeftPos) -> LeftPos {
        match pos.0 {
            Some(id) if self.records.get(id).is_none() => LeftPos::END,
            node => LeftPos(self.left.step_back(&self.records, node)),
        }
    }

    pub fn next_right(&self, pos: RightPos) -> RightPos {
        RightPos(self.live(pos.0).and_then(|id| self.right.next(&self.records, id)))
    }

    pub fn prev_right(&self, pos: RightPos) -> RightPos {
        match pos.0 {
            Some(id) if self.records.get(id).is_none() => RightPos::END,
            node => RightPos(self.right.step_back(&self.records, node)),
        }
    }

    /// The `(left, right)` entry at `pos`, or `None` at the end.
    pub fn left_at(&self, pos: LeftPos) -> Option<(&L, &R)> {
        let record = self.records.get(pos.0?)?;
        Some((&record.left.key, &record.right.key))
    }

    /// The `(right, left)` entry at `pos`, or `None` at the end.
    pub fn right_at(&self, pos: RightPos) -> Option<(&R, &L)> {
        let record = self.records.get(pos.0?)?;
        Some((&record.right.key, &record.left.key))
    }

    // ── iteration ─────────────────────────────────────────────────────────

    pub fn iter_left(&self) -> LeftIter<'_, L, R, CL, CR> {
        LeftIter::new(self, self.begin_left(), LeftPos::END, self.len)
    }

    pub fn iter_right(&self) -> RightIter<'_, L, R, CL, CR> {
        RightIter::new(self, self.begin_right(), RightPos::END, self.len)
    }

    /// Left-order iteration starting at `pos`. Sizing the iterator walks
    /// from `pos` to the end once.
    pub fn iter_left_from(&self, pos: LeftPos) -> LeftIter<'_, L, R, CL, CR> {
        let front = LeftPos(self.live(pos.0));
        let mut remaining = 0;
        let mut curr = front;
        while !curr.is_end() {
            remaining += 1;
            curr = self.next_left(curr);
        }
        LeftIter::new(self, front, LeftPos::END, remaining)
    }

    /// Right-order iteration starting at `pos`.
    pub fn iter_right_from(&self, pos: RightPos) -> RightIter<'_, L, R, CL, CR> {
        let front = RightPos(self.live(pos.0));
        let mut remaining = 0;
        let mut curr = front;
        while !curr.is_end() {
            remaining += 1;
            curr = self.next_right(curr);
        }
        RightIter::new(self, front, RightPos::END, remaining)
    }
}

impl<L, R, CL, CR> BiMap<L, R, CL, CR>
where
    CL: Fn(&L, &L) -> Ordering,
    CR: Fn(&R, &R) -> Ordering,
{
    /// Empty map with custom orderings, with seeds from the OS.
    pub fn with_comparators(left_cmp: CL, right_cmp: CR) -> Self {
        Self::with_config(left_cmp, right_cmp, Config::default())
    }

    pub fn with_config(left_cmp: CL, right_cmp: CR, config: Config) -> Self {
        let left_seed = config.left_seed.unwrap_or_else(|| OsRng.next_u64());
        let right_seed = config.right_seed.unwrap_or_else(|| OsRng.next_u64());
        debug!("bimap created with priority seeds left={left_seed:#018x} right={right_seed:#018x}");
        Self {
            records: Records::new(),
            left: CartesianTree::new(left_cmp, left_seed),
            right: CartesianTree::new(right_cmp, right_seed),
            len: 0,
        }
    }

    // ── insertion ─────────────────────────────────────────────────────────

    /// Adds the pair unless either key is already present.
    ///
    /// Returns the position of the new entry, or [`end_left`](Self::end_left)
    /// when the pair conflicts with an existing entry. Existing entries are
    /// never replaced.
    pub fn insert(&mut self, left: L, right: R) -> LeftPos {
        if self.left.find(&self.records, &left).is_some()
            || self.right.find(&self.records, &right).is_some()
        {
            trace!("insert rejected: a key of the pair is already mapped");
            return LeftPos::END;
        }
        LeftPos(Some(self.insert_unchecked(left, right)))
    }

    fn insert_unchecked(&mut self, left: L, right: R) -> u32 {
        let left_priority = self.left.draw_priority();
        let right_priority = self.right.draw_priority();
        let id = self
            .records
            .alloc(EntryRecord::new(left, left_priority, right, right_priority));
        self.left.insert(&mut self.records, id);
        self.right.insert(&mut self.records, id);
        self.len += 1;
        id
    }

    // ── removal ───────────────────────────────────────────────────────────

    /// The single physical removal path: unlink from both trees, then free
    /// the record.
    fn remove_record(&mut self, id: u32) -> Option<(L, R)> {
        self.left.remove_node(&mut self.records, id);
        self.right.remove_node(&mut self.records, id);
        let record = self.records.free(id)?;
        self.len -= 1;
        Some(record.into_pair())
    }

    /// Removes the entry keyed by `key` on the left and returns the pair.
    pub fn remove_left(&mut self, key: &L) -> Option<(L, R)> {
        let id = self.left.find(&self.records, key)?;
        self.remove_record(id)
    }

    /// Removes the entry keyed by `key` on the right and returns the pair.
    pub fn remove_right(&mut self, key: &R) -> Option<(L, R)> {
        let id = self.right.find(&self.records, key)?;
        self.remove_record(id)
    }

    pub fn erase_left(&mut self, key: &L) -> bool {
        let erased = self.remove_left(key).is_some();
        trace!("erase_left: erased={erased}");
        erased
    }

    pub fn erase_right(&mut self, key: &R) -> bool {
        let erased = self.remove_right(key).is_some();
        trace!("erase_right: erased={erased}");
        erased
    }

    /// Erases the entry at `pos` and returns the position that followed it
    /// in left order. Positions of other entries are unaffected.
    pub fn erase_left_at(&mut self, pos: LeftPos) -> LeftPos {
        let Some(id) = self.live(pos.0) else {
            return LeftPos::END;
        };
        let next = self.next_left(pos);
        self.remove_record(id);
        next
    }

    /// Erases the entry at `pos` and returns the position that followed it
    /// in right order.
    pub fn erase_right_at(&mut self, pos: RightPos) -> RightPos {
        let Some(id) = self.live(pos.0) else {
            return RightPos::END;
        };
        let next = self.next_right(pos);
        self.remove_record(id);
        next
    }

    /// Erases `[first, last)` in left order and returns `last`.
    pub fn erase_left_range(&mut self, mut first: LeftPos, last: LeftPos) -> LeftPos {
        while first != last && !first.is_end() {
            first = self.erase_left_at(first);
        }
        last
    }

    /// Erases `[first, last)` in right order and returns `last`.
    pub fn erase_right_range(&mut self, mut first: RightPos, last: RightPos) -> RightPos {
        while first != last && !first.is_end() {
            first = self.erase_right_at(first);
        }
        last
    }

    // ── lookup ────────────────────────────────────────────────────────────

    pub fn find_left(&self, key: &L) -> LeftPos {
        LeftPos(self.left.find(&self.records, key))
    }

    pub fn find_right(&self, key: &R) -> RightPos {
        RightPos(self.right.find(&self.records, key))
    }

    pub fn contains_left(&self, key: &L) -> bool {
        self.left.find(&self.records, key).is_some()
    }

    pub fn contains_right(&self, key: &R) -> bool {
        self.right.find(&self.records, key).is_some()
    }

    /// The right value paired with `key`, if any.
    pub fn get_by_left(&self, key: &L) -> Option<&R> {
        let id = self.left.find(&self.records, key)?;
        Some(&self.records.record(id).right.key)
    }

    /// The left value paired with `key`, if any.
    pub fn get_by_right(&self, key: &R) -> Option<&L> {
        let id = self.right.find(&self.records, key)?;
        Some(&self.records.record(id).left.key)
    }

    /// The right value paired with `key`, failing with [`Error::NotFound`].
    pub fn at_left(&self, key: &L) -> Result<&R> {
        self.get_by_left(key).ok_or(Error::NotFound)
    }

    /// The left value paired with `key`, failing with [`Error::NotFound`].
    pub fn at_right(&self, key: &R) -> Result<&L> {
        self.get_by_right(key).ok_or(Error::NotFound)
    }

    /// The right value paired with `key`, inserting `(key, R::default())`
    /// when `key` is absent.
    ///
    /// If another entry already holds `R::default()` on the right, that
    /// entry is erased first so the new pair can take the default value.
    pub fn at_left_or_default(&mut self, key: L) -> &R
    where
        R: Default,
    {
        if let Some(id) = self.left.find(&self.records, &key) {
            return &self.records.record(id).right.key;
        }
        let default = R::default();
        if let Some(id) = self.right.find(&self.records, &default) {
            trace!("at_left_or_default: displacing the entry that holds the default right value");
            self.remove_record(id);
        }
        let id = self.insert_unchecked(key, default);
        &self.records.record(id).right.key
    }

    /// The left value paired with `key`, inserting `(L::default(), key)`
    /// when `key` is absent.
    ///
    /// If another entry already holds `L::default()` on the left, that entry
    /// is erased first.
    pub fn at_right_or_default(&mut self, key: R) -> &L
    where
        L: Default,
    {
        if let Some(id) = self.right.find(&self.records, &key) {
            return &self.records.record(id).left.key;
        }
        let default = L::default();
        if let Some(id) = self.left.find(&self.records, &default) {
            trace!("at_right_or_default: displacing the entry that holds the default left value");
            self.remove_record(id);
        }
        let id = self.insert_unchecked(default, key);
        &self.records.record(id).left.key
    }

    // ── bounds ────────────────────────────────────────────────────────────

    /// First entry whose left key is `>= key`.
    pub fn lower_bound_left(&self, key: &L) -> LeftPos {
        LeftPos(self.left.lower_bound(&self.records, key))
    }

    /// First entry whose left key is `> key`.
    pub fn upper_bound_left(&self, key: &L) -> LeftPos {
        let lower = self.lower_bound_left(key);
        match self.left_at(lower) {
            Some((found, _)) if (self.left.comparator())(found, key) == Ordering::Equal => {
                self.next_left(lower)
            }
            _ => lower,
        }
    }

    /// First entry whose right key is `>= key`.
    pub fn lower_bound_right(&self, key: &R) -> RightPos {
        RightPos(self.right.lower_bound(&self.records, key))
    }

    /// First entry whose right key is `> key`.
    pub fn upper_bound_right(&self, key: &R) -> RightPos {
        let lower = self.lower_bound_right(key);
        match self.right_at(lower) {
            Some((found, _)) if (self.right.comparator())(found, key) == Ordering::Equal => {
                self.next_right(lower)
            }
            _ => lower,
        }
    }

    /// Asserts the structural invariants of both trees and the entry count.
    ///
    /// # Panics
    ///
    /// On any broken link, heap order, key order or count.
    #[doc(hidden)]
    pub fn check_invariants(&self) {
        let left = self.left.check(&self.records);
        let right = self.right.check(&self.records);
        assert_eq!(left, self.len, "left tree holds {left} nodes, map counts {}", self.len);
        assert_eq!(right, self.len, "right tree holds {right} nodes, map counts {}", self.len);
        assert_eq!(self.records.live(), self.len, "live records disagree with the map count");
        for (l, r) in self.iter_left() {
            let id = self.right.find(&self.records, r);
            assert!(
                id.is_some_and(|id| std::ptr::eq(&self.records.record(id).left.key, l)),
                "entry is missing from the right tree"
            );
        }
    }
}

impl<L, R, CL, CR> fmt::Debug for BiMap<L, R, CL, CR>
where
    L: fmt::Debug,
    R: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter_left()).finish()
    }
}

/// Maps are equal when they hold the same pairs.
impl<L: PartialEq, R: PartialEq, CL, CR> PartialEq for BiMap<L, R, CL, CR> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter_left().eq(other.iter_left())
    }
}

impl<L: Eq, R: Eq, CL, CR> Eq for BiMap<L, R, CL, CR> {}

impl<'a, L, R, CL, CR> IntoIterator for &'a BiMap<L, R, CL, CR> {
    type Item = (&'a L, &'a R);
    type IntoIter = LeftIter<'a, L, R, CL, CR>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_left()
    }
}

/// Pairs that conflict with earlier ones are skipped, as with
/// [`BiMap::insert`].
impl<L, R, CL, CR> Extend<(L, R)> for BiMap<L, R, CL, CR>
where
    CL: Fn(&L, &L) -> Ordering,
    CR: Fn(&R, &R) -> Ordering,
{
    fn extend<I: IntoIterator<Item = (L, R)>>(&mut self, iter: I) {
        for (left, right) in iter {
            self.insert(left, right);
        }
    }
}

impl<L: Ord, R: Ord> FromIterator<(L, R)> for BiMap<L, R> {
    fn from_iter<I: IntoIterator<Item = (L, R)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

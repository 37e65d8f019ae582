//! Positions and borrowing iterators.
//!
//! A position is a plain `Copy` handle naming one record in one ordering, or
//! the end of that ordering. It does not borrow the map, so it can be kept
//! across insertions and passed back to erasing methods.
//!
//! Positions stay valid while their own entry is alive. Once that entry is
//! erased the position is dangling: accessors return `None` until the slot
//! is reused, after which the position names whatever entry took the slot.
//! Using a dangling position is a caller bug, never a memory-safety issue.

use std::iter::FusedIterator;

use crate::map::BiMap;

/// Position in left-key order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LeftPos(pub(crate) Option<u32>);

/// Position in right-key order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RightPos(pub(crate) Option<u32>);

impl LeftPos {
    /// The one-past-the-end position of the left ordering.
    pub const END: LeftPos = LeftPos(None);

    #[inline]
    pub fn is_end(self) -> bool {
        self.0.is_none()
    }

    /// The same entry, seen from the right ordering. The end maps to the
    /// end.
    #[inline]
    pub fn flip(self) -> RightPos {
        RightPos(self.0)
    }
}

impl RightPos {
    /// The one-past-the-end position of the right ordering.
    pub const END: RightPos = RightPos(None);

    #[inline]
    pub fn is_end(self) -> bool {
        self.0.is_none()
    }

    /// The same entry, seen from the left ordering. The end maps to the
    /// end.
    #[inline]
    pub fn flip(self) -> LeftPos {
        LeftPos(self.0)
    }
}

/// Entries in ascending left-key order, as `(left, right)`.
pub struct LeftIter<'a, L, R, CL, CR> {
    map: &'a BiMap<L, R, CL, CR>,
    front: LeftPos,
    back: LeftPos,
    remaining: usize,
}

impl<'a, L, R, CL, CR> LeftIter<'a, L, R, CL, CR> {
    /// `remaining` must equal the number of entries in `[front, back)`.
    pub(crate) fn new(map: &'a BiMap<L, R, CL, CR>, front: LeftPos, back: LeftPos, remaining: usize) -> Self {
        Self {
            map,
            front,
            back,
            remaining,
        }
    }
}

impl<L, R, CL, CR> Clone for LeftIter<'_, L, R, CL, CR> {
    fn clone(&self) -> Self {
        Self {
            map: self.map,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, L, R, CL, CR> Iterator for LeftIter<'a, L, R, CL, CR> {
    type Item = (&'a L, &'a R);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.map.left_at(self.front)?;
        self.front = self.map.next_left(self.front);
        self.remaining -= 1;
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<L, R, CL, CR> DoubleEndedIterator for LeftIter<'_, L, R, CL, CR> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.back = self.map.prev_left(self.back);
        self.remaining -= 1;
        self.map.left_at(self.back)
    }
}

impl<L, R, CL, CR> ExactSizeIterator for LeftIter<'_, L, R, CL, CR> {}

impl<L, R, CL, CR> FusedIterator for LeftIter<'_, L, R, CL, CR> {}

/// Entries in ascending right-key order, as `(right, left)`.
pub struct RightIter<'a, L, R, CL, CR> {
    map: &'a BiMap<L, R, CL, CR>,
    front: RightPos,
    back: RightPos,
    remaining: usize,
}

impl<'a, L, R, CL, CR> RightIter<'a, L, R, CL, CR> {
    /// `remaining` must equal the number of entries in `[front, back)`.
    pub(crate) fn new(map: &'a BiMap<L, R, CL, CR>, front: RightPos, back: RightPos, remaining: usize) -> Self {
        Self {
            map,
            front,
            back,
            remaining,
        }
    }
}

impl<L, R, CL, CR> Clone for RightIter<'_, L, R, CL, CR> {
    fn clone(&self) -> Self {
        Self {
            map: self.map,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, L, R, CL, CR> Iterator for RightIter<'a, L, R, CL, CR> {
    type Item = (&'a R, &'a L);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.map.right_at(self.front)?;
        self.front = self.map.next_right(self.front);
        self.remaining -= 1;
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<L, R, CL, CR> DoubleEndedIterator for RightIter<'_, L, R, CL, CR> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.back = self.map.prev_right(self.back);
        self.remaining -= 1;
        self.map.right_at(self.back)
    }
}

impl<L, R, CL, CR> ExactSizeIterator for RightIter<'_, L, R, CL, CR> {}

impl<L, R, CL, CR> FusedIterator for RightIter<'_, L, R, CL, CR> {}

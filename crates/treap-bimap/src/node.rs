use crate::types::{LeftTag, NodeStore, RightTag};

/// One tree participation: structural links, balancing priority and key.
///
/// Links are indices into the owning [`Records`] arena. They never own the
/// node they point at.
#[derive(Clone, Debug)]
pub struct TreeNode<K> {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub priority: u64,
    pub key: K,
}

impl<K> TreeNode<K> {
    pub fn new(key: K, priority: u64) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            priority,
            key,
        }
    }

    pub(crate) fn unlink(&mut self) {
        self.p = None;
        self.l = None;
        self.r = None;
    }
}

/// A logical `(left, right)` entry taking part in both trees at once.
///
/// Both participations share the record's arena slot, so the index reached
/// through either tree designates the sibling participation as well.
#[derive(Clone, Debug)]
pub struct EntryRecord<L, R> {
    pub left: TreeNode<L>,
    pub right: TreeNode<R>,
}

impl<L, R> EntryRecord<L, R> {
    pub fn new(left: L, left_priority: u64, right: R, right_priority: u64) -> Self {
        Self {
            left: TreeNode::new(left, left_priority),
            right: TreeNode::new(right, right_priority),
        }
    }

    pub fn into_pair(self) -> (L, R) {
        (self.left.key, self.right.key)
    }
}

/// Slot arena owning every record of a map.
///
/// Vacated slots are recycled, and a live record never moves, so an index
/// stays meaningful until its own record is freed.
#[derive(Clone, Debug)]
pub struct Records<L, R> {
    slots: Vec<Option<EntryRecord<L, R>>>,
    vacant: Vec<u32>,
}

impl<L, R> Default for Records<L, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L, R> Records<L, R> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            vacant: Vec::new(),
        }
    }

    /// Stores `record` and returns its index.
    pub fn alloc(&mut self, record: EntryRecord<L, R>) -> u32 {
        if let Some(id) = self.vacant.pop() {
            self.slots[id as usize] = Some(record);
            return id;
        }
        let id = u32::try_from(self.slots.len()).unwrap_or_else(|_| {
            panic!("record arena exhausted: more than {} live entries", u32::MAX)
        });
        self.slots.push(Some(record));
        id
    }

    /// Takes the record out of its slot and makes the slot reusable.
    pub fn free(&mut self, id: u32) -> Option<EntryRecord<L, R>> {
        let record = self.slots.get_mut(id as usize)?.take()?;
        self.vacant.push(id);
        Some(record)
    }

    pub fn get(&self, id: u32) -> Option<&EntryRecord<L, R>> {
        self.slots.get(id as usize).and_then(Option::as_ref)
    }

    /// Number of live records.
    pub fn live(&self) -> usize {
        self.slots.len() - self.vacant.len()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.vacant.clear();
    }

    pub(crate) fn record(&self, id: u32) -> &EntryRecord<L, R> {
        match self.get(id) {
            Some(record) => record,
            None => panic!("tree link points at vacant record slot {id}"),
        }
    }

    fn record_mut(&mut self, id: u32) -> &mut EntryRecord<L, R> {
        match self.slots.get_mut(id as usize).and_then(Option::as_mut) {
            Some(record) => record,
            None => panic!("tree link points at vacant record slot {id}"),
        }
    }
}

impl<L, R> NodeStore<LeftTag> for Records<L, R> {
    type Key = L;

    #[inline]
    fn node(&self, id: u32) -> &TreeNode<L> {
        &self.record(id).left
    }

    #[inline]
    fn node_mut(&mut self, id: u32) -> &mut TreeNode<L> {
        &mut self.record_mut(id).left
    }
}

impl<L, R> NodeStore<RightTag> for Records<L, R> {
    type Key = R;

    #[inline]
    fn node(&self, id: u32) -> &TreeNode<R> {
        &self.record(id).right
    }

    #[inline]
    fn node_mut(&mut self, id: u32) -> &mut TreeNode<R> {
        &mut self.record_mut(id).right
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

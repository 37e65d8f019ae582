//! The treap engine driven directly through its modules, outside a map.

use treap_bimap::node::{EntryRecord, Records};
use treap_bimap::tree::CartesianTree;
use treap_bimap::types::{natural_order, Comparator, LeftTag, RightTag};

#[test]
fn record_arena_feeds_both_trees() {
    let mut records: Records<u32, char> = Records::new();
    let mut left: CartesianTree<LeftTag, Comparator<u32>> = CartesianTree::new(natural_order as Comparator<u32>, 1);
    let mut right: CartesianTree<RightTag, Comparator<char>> = CartesianTree::new(natural_order as Comparator<char>, 2);

    for (l, r) in [(3, 'a'), (1, 'c'), (2, 'b')] {
        let lp = left.draw_priority();
        let rp = right.draw_priority();
        let id = records.alloc(EntryRecord::new(l, lp, r, rp));
        left.insert(&mut records, id);
        right.insert(&mut records, id);
    }
    assert_eq!(left.check(&records), 3);
    assert_eq!(right.check(&records), 3);

    // The record found by left key 1 is the one found by right key 'c'.
    let by_left = left.find(&records, &1);
    assert!(by_left.is_some());
    assert_eq!(by_left, right.find(&records, &'c'));

    let first = left.first(&records).and_then(|id| records.get(id));
    assert_eq!(first.map(|r| (r.left.key, r.right.key)), Some((1, 'c')));
    let first = right.first(&records).and_then(|id| records.get(id));
    assert_eq!(first.map(|r| (r.left.key, r.right.key)), Some((3, 'a')));

    let id = left.remove(&mut records, &2).unwrap();
    right.remove_node(&mut records, id);
    assert_eq!(records.free(id).map(EntryRecord::into_pair), Some((2, 'b')));
    assert_eq!(records.live(), 2);
    assert_eq!(left.check(&records), 2);
    assert_eq!(right.check(&records), 2);
}

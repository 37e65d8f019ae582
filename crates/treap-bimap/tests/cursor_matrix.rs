use treap_bimap::{BiMap, LeftPos, RightPos};

fn squares() -> BiMap<u32, u32> {
    let mut map = BiMap::from_seed(17);
    // Right values run opposite to left values: 1 <-> 100, ..., 10 <-> 1.
    for i in 1..=10u32 {
        map.insert(i, (11 - i) * (11 - i));
    }
    map
}

#[test]
fn walk_forward_and_backward_by_position() {
    let map = squares();
    let mut pos = map.begin_left();
    let mut seen = Vec::new();
    while pos != map.end_left() {
        seen.push(*map.left_at(pos).unwrap().0);
        pos = map.next_left(pos);
    }
    assert_eq!(seen, (1..=10).collect::<Vec<_>>());

    // Stepping back from the end reaches the maximum, then walks down.
    let mut pos = map.prev_left(map.end_left());
    let mut back = Vec::new();
    while !pos.is_end() {
        back.push(*map.left_at(pos).unwrap().0);
        pos = map.prev_left(pos);
    }
    assert_eq!(back, (1..=10).rev().collect::<Vec<_>>());

    assert_eq!(map.next_left(map.end_left()), map.end_left());
    assert_eq!(map.left_at(map.end_left()), None);
    assert_eq!(map.right_at(map.end_right()), None);
}

#[test]
fn flip_is_an_involution_and_resolves_the_pair() {
    let map = squares();
    let mut pos = map.begin_left();
    while !pos.is_end() {
        let (left, right) = map.left_at(pos).unwrap();
        let flipped = pos.flip();
        assert_eq!(flipped.flip(), pos);
        assert_eq!(map.right_at(flipped), Some((right, left)));
        assert_eq!(flipped, map.find_right(right));
        pos = map.next_left(pos);
    }
    assert_eq!(LeftPos::END.flip(), RightPos::END);
    assert_eq!(RightPos::END.flip(), LeftPos::END);
}

#[test]
fn flipped_position_walks_in_right_order() {
    let map = squares();
    // Left 4 pairs with right 49; the next right value is 64 (left 3).
    let pos = map.find_left(&4).flip();
    assert_eq!(map.right_at(pos), Some((&49, &4)));
    let next = map.next_right(pos);
    assert_eq!(map.right_at(next), Some((&64, &3)));
    let prev = map.prev_right(pos);
    assert_eq!(map.right_at(prev), Some((&36, &5)));
}

#[test]
fn erase_at_returns_successor_and_keeps_other_positions() {
    let mut map = squares();
    let three = map.find_left(&3);
    let seven = map.find_left(&7);
    let five = map.find_left(&5);

    let after = map.erase_left_at(five);
    assert_eq!(map.left_at(after), Some((&6, &25)));
    assert_eq!(map.left_at(three), Some((&3, &64)));
    assert_eq!(map.left_at(seven), Some((&7, &16)));
    assert_eq!(map.left_at(five), None);
    assert_eq!(map.len(), 9);

    // In right order 16 (left 7) is followed by 25 (left 6).
    let after = map.erase_right_at(seven.flip());
    assert_eq!(map.right_at(after), Some((&25, &6)));
    assert!(!map.contains_left(&7));
    assert_eq!(map.left_at(three), Some((&3, &64)));

    // Erasing the last entry in an order returns the end.
    let last = map.prev_left(map.end_left());
    assert_eq!(map.erase_left_at(last), map.end_left());
    assert_eq!(map.erase_left_at(map.end_left()), map.end_left());
    map.check_invariants();
}

#[test]
fn dangling_position_reads_as_absent() {
    let mut map = squares();
    let pos = map.find_left(&2);
    assert!(map.erase_left(&2));
    assert_eq!(map.left_at(pos), None);
    assert_eq!(map.next_left(pos), map.end_left());
    assert_eq!(map.prev_left(pos), map.end_left());
    assert_eq!(map.erase_left_at(pos), map.end_left());
    assert_eq!(map.iter_left_from(pos).count(), 0);
    assert_eq!(map.len(), 9);
}

#[test]
fn erase_range_in_left_order() {
    let mut map = squares();
    let first = map.find_left(&3);
    let last = map.find_left(&7);
    assert_eq!(map.erase_left_range(first, last), last);
    let lefts: Vec<u32> = map.iter_left().map(|(l, _)| *l).collect();
    assert_eq!(lefts, vec![1, 2, 7, 8, 9, 10]);

    let from = map.find_left(&8);
    let end = map.end_left();
    assert_eq!(map.erase_left_range(from, end), end);
    let lefts: Vec<u32> = map.iter_left().map(|(l, _)| *l).collect();
    assert_eq!(lefts, vec![1, 2, 7]);

    let empty = map.find_left(&2);
    assert_eq!(map.erase_left_range(empty, empty), empty);
    assert_eq!(map.len(), 3);
    map.check_invariants();
}

#[test]
fn erase_range_in_right_order() {
    let mut map = squares();
    // Right values 1, 4, 9 belong to lefts 10, 9, 8.
    let first = map.begin_right();
    let last = map.find_right(&16);
    map.erase_right_range(first, last);
    let rights: Vec<u32> = map.iter_right().map(|(r, _)| *r).collect();
    assert_eq!(rights, vec![16, 25, 36, 49, 64, 81, 100]);
    assert!(!map.contains_left(&10));
    assert!(map.contains_left(&7));

    let all_first = map.begin_right();
    let all_last = map.end_right();
    map.erase_right_range(all_first, all_last);
    assert!(map.is_empty());
    map.check_invariants();
}

#[test]
fn iterators_are_double_ended() {
    let map = squares();
    let mut iter = map.iter_left();
    assert_eq!(iter.next(), Some((&1, &100)));
    assert_eq!(iter.next_back(), Some((&10, &1)));
    assert_eq!(iter.next_back(), Some((&9, &4)));
    let middle: Vec<u32> = iter.map(|(l, _)| *l).collect();
    assert_eq!(middle, vec![2, 3, 4, 5, 6, 7, 8]);

    let rights: Vec<u32> = map.iter_right().rev().map(|(r, _)| *r).collect();
    assert_eq!(rights, vec![100, 81, 64, 49, 36, 25, 16, 9, 4, 1]);

    // Front and back meet without yielding twice.
    let mut iter = map.iter_right();
    let mut count = 0;
    loop {
        let front = iter.next();
        let back = iter.next_back();
        count += front.is_some() as usize + back.is_some() as usize;
        if front.is_none() || back.is_none() {
            break;
        }
    }
    assert_eq!(count, 10);
    assert_eq!(iter.next(), None);
}

#[test]
fn iteration_from_a_position() {
    let map = squares();
    let tail: Vec<u32> = map.iter_left_from(map.find_left(&8)).map(|(l, _)| *l).collect();
    assert_eq!(tail, vec![8, 9, 10]);

    let tail: Vec<u32> = map
        .iter_right_from(map.lower_bound_right(&50))
        .map(|(_, l)| *l)
        .collect();
    assert_eq!(tail, vec![3, 2, 1]);

    assert_eq!(map.iter_left_from(map.end_left()).next(), None);
    let reversed: Vec<u32> = map.iter_left_from(map.find_left(&8)).rev().map(|(l, _)| *l).collect();
    assert_eq!(reversed, vec![10, 9, 8]);
}

#[test]
fn positions_survive_unrelated_insertions() {
    let mut map = squares();
    let pos = map.find_left(&6);
    for i in 100..200u32 {
        map.insert(i, i * 1000);
    }
    assert_eq!(map.left_at(pos), Some((&6, &25)));
    assert_eq!(map.left_at(map.next_left(pos)), Some((&7, &16)));
    map.check_invariants();
}

#[test]
fn empty_map_positions() {
    let mut map: BiMap<i32, i32> = BiMap::from_seed(0);
    assert_eq!(map.begin_left(), map.end_left());
    assert_eq!(map.prev_left(map.end_left()), map.end_left());
    assert_eq!(map.prev_right(map.end_right()), map.end_right());
    assert_eq!(map.lower_bound_left(&0), map.end_left());
    assert_eq!(map.upper_bound_right(&0), map.end_right());
    assert_eq!(map.iter_left().next_back(), None);
    assert_eq!(map.erase_left_range(map.begin_left(), map.end_left()), map.end_left());
}

#[test]
fn iterators_report_exact_length() {
    let map: BiMap<i32, i32> = (0..10).map(|k| (k, k)).collect();
    assert_eq!(map.iter_left().size_hint(), (10, Some(10)));
    assert_eq!(map.iter_right().len(), 10);

    let mut iter = map.iter_left();
    iter.next();
    iter.next_back();
    iter.next();
    assert_eq!(iter.len(), 7);
    assert_eq!(iter.size_hint(), (7, Some(7)));
    assert_eq!(iter.clone().count(), 7);

    let mut iter = map.iter_right();
    while iter.next_back().is_some() {}
    assert_eq!(iter.len(), 0);
    assert_eq!(iter.next(), None);

    let from = map.iter_left_from(map.find_left(&6));
    assert_eq!(from.len(), 4);
    let mut from = map.iter_right_from(map.lower_bound_right(&8));
    from.next_back();
    assert_eq!(from.size_hint(), (1, Some(1)));
    assert_eq!(map.iter_left_from(map.end_left()).len(), 0);
}

use broadside::{BitBoard, BitBoardError};

#[test]
fn test_try_new_sizes() {
    // Success for board that fits
    let ok = BitBoard::<u128, 10>::try_new();
    assert!(ok.is_ok());

    // Failure when board is too large
    let err = BitBoard::<u8, 3>::try_new();
    assert!(matches!(err, Err(BitBoardError::SizeTooLarge { .. })));
}

#[test]
fn test_get_set_clear() {
    let mut bb = BitBoard::<u16, 4>::new();
    assert!(bb.is_empty());

    bb.set(1, 1).unwrap();
    assert!(bb.get(1, 1).unwrap());
    assert!(bb.contains(1, 1));

    bb.clear(1, 1).unwrap();
    assert!(!bb.get(1, 1).unwrap());

    assert_eq!(
        bb.set(4, 0),
        Err(BitBoardError::IndexOutOfBounds { row: 4, col: 0 })
    );
    assert!(!bb.contains(7, 7));
}

#[test]
fn test_from_cells_and_iter() {
    let bb = BitBoard::<u16, 4>::from_cells([(0, 1), (3, 3)]).unwrap();
    let bits: Vec<_> = bb.iter_set_bits().collect();
    assert_eq!(bits, vec![(0, 1), (3, 3)]);
}

#[test]
fn test_not_stays_in_bounds() {
    let bb = BitBoard::<u32, 5>::new();
    assert_eq!((!bb).count_ones(), 25);
    assert_eq!(!bb, BitBoard::<u32, 5>::full());
}

#[test]
fn test_spread_covers_neighbourhood() {
    let corner = BitBoard::<u128, 10>::from_cells([(0, 0)]).unwrap();
    let grown = corner.spread();
    assert_eq!(grown.count_ones(), 4);
    assert!(grown.contains(1, 1));

    let middle = BitBoard::<u128, 10>::from_cells([(5, 5)]).unwrap();
    assert_eq!(middle.spread().count_ones(), 9);

    // Spreading never wraps from one row end to the next row.
    let edge = BitBoard::<u128, 10>::from_cells([(3, 9)]).unwrap();
    let grown = edge.spread();
    assert_eq!(grown.count_ones(), 6);
    assert!(!grown.contains(4, 0));
    assert!(!grown.contains(2, 0));
}

#[test]
fn test_subset_and_intersects() {
    let a = BitBoard::<u16, 4>::from_cells([(0, 0), (0, 1)]).unwrap();
    let b = BitBoard::<u16, 4>::from_cells([(0, 0), (0, 1), (2, 2)]).unwrap();
    assert!(a.is_subset_of(&b));
    assert!(!b.is_subset_of(&a));
    assert!(a.intersects(&b));
    assert!(!a.intersects(&BitBoard::from_cells([(3, 3)]).unwrap()));
}

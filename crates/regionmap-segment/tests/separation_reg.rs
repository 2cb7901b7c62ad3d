//! Erosion-separation regression test
//!
//! Two filled shapes touching at a thin bridge must come out as two black
//! regions, not one merged region. This is the rationale for the
//! erode-then-grow strategy: direct labeling of the black mask would see a
//! single component.
//!
//! Run with:
//! ```
//! cargo test -p regionmap-segment --test separation_reg
//! ```

use regionmap_core::Grid;
use regionmap_segment::{BlackFinder, Connectivity, RegionFinder, binarize_below, label_components};

/// 64x24 white raster with two 14x14 black squares joined by a 1px-high
/// black bridge at y = 10.
fn bridged_squares() -> Grid<u8> {
    let mut gray = Grid::from_raw(64, 24, vec![255u8; 64 * 24]).unwrap();
    for y in 4..18 {
        for x in 4..18 {
            gray.set(x, y, 0);
        }
        for x in 30..44 {
            gray.set(x, y, 0);
        }
    }
    for x in 18..30 {
        gray.set(x, 10, 0);
    }
    gray
}

#[test]
fn direct_labeling_merges_bridged_shapes() {
    // Sanity: without erosion the bridge makes this a single component.
    let gray = bridged_squares();
    let mask = binarize_below(&gray, 128).unwrap();
    let (_, count) = label_components(&mask, Connectivity::FourWay).unwrap();
    assert_eq!(count, 1);
}

#[test]
fn erosion_growth_separates_bridged_shapes() {
    let gray = bridged_squares();
    let labeling = BlackFinder::new(128, 2, 50).find(&gray).unwrap();

    assert_eq!(
        labeling.survivors.len(),
        2,
        "bridged shapes must split into two regions"
    );

    // Each region keeps at least its own square's area; together they
    // partition the whole black mask including the bridge.
    let total: u64 = labeling.survivors.iter().map(|&(_, s)| s).sum();
    assert_eq!(total, 14 * 14 * 2 + 12);
    for &(_, size) in &labeling.survivors {
        assert!(size >= 14 * 14, "region lost area during regrowth: {size}");
    }
}

#[test]
fn separation_is_deterministic() {
    let gray = bridged_squares();
    let a = BlackFinder::new(128, 2, 50).find(&gray).unwrap();
    let b = BlackFinder::new(128, 2, 50).find(&gray).unwrap();
    assert_eq!(a.survivors, b.survivors);
    assert_eq!(a.labels.as_slice(), b.labels.as_slice());
}

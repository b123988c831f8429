#![allow(missing_docs)]
//! Host-level tests for the serpentine addressing model.

use matrix_envoy::layout::SerpentineLayout;

type Panel16 = SerpentineLayout<16, 16>;
type Panel4x3 = SerpentineLayout<4, 3>;

#[test]
fn geometry_constants_match_dimensions() {
    assert_eq!(Panel16::TOTAL, 256);
    assert_eq!(Panel16::width(), 16);
    assert_eq!(Panel16::height(), 16);
    assert_eq!(Panel4x3::TOTAL, 12);
}

#[test]
fn even_rows_run_right_to_left() {
    assert_eq!(Panel16::physical_index(0, 0), 15);
    assert_eq!(Panel16::physical_index(0, 15), 0);
    assert_eq!(Panel16::physical_index(2, 0), 47);
}

#[test]
fn odd_rows_run_left_to_right() {
    assert_eq!(Panel16::physical_index(1, 0), 16);
    assert_eq!(Panel16::physical_index(1, 15), 31);
}

#[test]
fn small_panel_full_wiring_order() {
    const EXPECTED: [[usize; 4]; 3] = [[3, 2, 1, 0], [4, 5, 6, 7], [11, 10, 9, 8]];
    for (row, expected_row) in EXPECTED.iter().enumerate() {
        for (col, expected_index) in expected_row.iter().enumerate() {
            assert_eq!(Panel4x3::physical_index(row, col), *expected_index);
        }
    }
}

#[test]
fn logical_coords_inverts_physical_index() {
    for row in 0..16 {
        for col in 0..16 {
            let index = Panel16::physical_index(row, col);
            assert_eq!(Panel16::logical_coords(index), (row, col));
        }
    }
}

#[test]
fn physical_index_inverts_logical_coords() {
    for index in 0..Panel16::TOTAL {
        let (row, col) = Panel16::logical_coords(index);
        assert_eq!(Panel16::physical_index(row, col), index);
    }
}

#[test]
fn physical_index_is_injective() {
    let mut seen = [false; Panel16::TOTAL];
    for row in 0..16 {
        for col in 0..16 {
            let index = Panel16::physical_index(row, col);
            assert!(!seen[index], "index {index} hit twice");
            seen[index] = true;
        }
    }
    assert!(seen.iter().all(|&hit| hit));
}

#[test]
#[should_panic(expected = "row out of bounds")]
fn physical_index_panics_on_row_overflow() {
    let _ = Panel4x3::physical_index(3, 0);
}

#[test]
#[should_panic(expected = "column out of bounds")]
fn physical_index_panics_on_column_overflow() {
    let _ = Panel4x3::physical_index(0, 4);
}

#[test]
#[should_panic(expected = "index out of bounds")]
fn logical_coords_panics_past_end() {
    let _ = Panel4x3::logical_coords(12);
}

#![allow(missing_docs)]
//! Host-level tests for the pairing-passkey override and the panel glue.

use embassy_futures::block_on;
use matrix_envoy::Result;
use matrix_envoy::matrix::{Matrix, Rgb, StripDriver};
use matrix_envoy::panel::Panel;
use matrix_envoy::passkey::{BondingState, PasskeyOverride};
use matrix_envoy::segments::{SEGMENT_HEIGHT, SEGMENT_WIDTH, SegmentedDisplay};

type Panel16 = Panel<256, 16, 16>;
type Override16 = PasskeyOverride<256, 16, 16>;

const INK: Rgb = SegmentedDisplay::<16, 16>::DEFAULT_COLOR;

const ZERO: [&str; 5] = ["XXX", "X.X", "X.X", "X.X", "XXX"];
const ONE: [&str; 5] = ["..X", ".XX", "X.X", "..X", "..X"];
const TWO: [&str; 5] = ["XXX", "..X", "XXX", "X..", "XXX"];
const FOUR: [&str; 5] = ["X.X", "X.X", "XXX", "..X", "..X"];
const SIX: [&str; 5] = ["XXX", "X..", "XXX", "X.X", "XXX"];

struct RecordingStrip<const N: usize> {
    frames: Vec<[Rgb; N]>,
}

impl<const N: usize> StripDriver<N> for RecordingStrip<N> {
    async fn update(&mut self, pixels: &[Rgb; N]) -> Result<()> {
        self.frames.push(*pixels);
        Ok(())
    }
}

/// Asserts the 3×5 glyph area of one cell against an `X`/`.` pattern.
fn assert_cell(
    matrix: &Matrix<256, 16, 16>,
    cell_col: usize,
    cell_row: usize,
    pattern: [&str; 5],
    ink: Rgb,
) {
    for (row, line) in pattern.iter().enumerate() {
        for (col, mark) in line.chars().enumerate() {
            let expected = if mark == 'X' { ink } else { Rgb::new(0, 0, 0) };
            let actual = matrix
                .pixel(
                    cell_row * SEGMENT_HEIGHT + row,
                    cell_col * SEGMENT_WIDTH + col,
                )
                .unwrap();
            assert_eq!(
                actual, expected,
                "cell ({cell_col}, {cell_row}) glyph pixel ({row}, {col})"
            );
        }
    }
}

#[test]
fn new_override_is_idle_and_blank() {
    let over = Override16::new();
    assert_eq!(over.state(), BondingState::Idle);
    assert!(!over.is_bonding());
    assert!(
        over.matrix()
            .frame()
            .iter()
            .all(|&pixel| pixel == Rgb::new(0, 0, 0))
    );
}

#[test]
fn show_passkey_renders_six_digits_across_two_rows() {
    let mut over = Override16::new();
    over.show_passkey(123_456).unwrap();
    assert!(over.is_bonding());
    assert_eq!(over.state(), BondingState::Bonding);
    // 123456 lands as 1 2 3 4 on the top cell row, 5 6 on the next.
    assert_cell(over.matrix(), 0, 0, ONE, INK);
    assert_cell(over.matrix(), 3, 0, FOUR, INK);
    assert_cell(over.matrix(), 1, 1, SIX, INK);
}

#[test]
fn short_passkeys_are_left_zero_padded() {
    let mut over = Override16::new();
    over.show_passkey(42).unwrap();
    assert_cell(over.matrix(), 0, 0, ZERO, INK);
    assert_cell(over.matrix(), 3, 0, ZERO, INK);
    assert_cell(over.matrix(), 0, 1, FOUR, INK);
    assert_cell(over.matrix(), 1, 1, TWO, INK);
}

#[test]
fn a_new_passkey_repaints_from_the_top_left() {
    let mut over = Override16::new();
    over.show_passkey(123_456).unwrap();
    over.show_passkey(42).unwrap();
    assert_cell(over.matrix(), 0, 0, ZERO, INK);
    // The previous digits are gone, not just overdrawn.
    assert_cell(over.matrix(), 2, 1, ["...", "...", "...", "...", "..."], INK);
}

#[test]
fn override_ink_color_is_configurable() {
    let mut over = Override16::new();
    over.set_color(Rgb::new(200, 0, 0));
    over.show_passkey(0).unwrap();
    assert_cell(over.matrix(), 0, 0, ZERO, Rgb::new(200, 0, 0));
}

#[test]
fn cancel_blanks_the_override_matrix() {
    let mut over = Override16::new();
    over.show_passkey(999_999).unwrap();
    over.cancel();
    assert_eq!(over.state(), BondingState::Idle);
    assert!(
        over.matrix()
            .frame()
            .iter()
            .all(|&pixel| pixel == Rgb::new(0, 0, 0))
    );
}

#[test]
fn security_changed_releases_the_override() {
    let mut over = Override16::new();
    over.show_passkey(123_456).unwrap();
    over.security_changed();
    assert!(!over.is_bonding());
}

// Panel glue

#[test]
fn bonding_snapshot_hides_control_state() {
    let mut panel = Panel16::new();
    panel.service_mut().write_color(0, &[200, 0, 0]).unwrap();
    panel.service_mut().write_brightness(0, &[128]).unwrap();

    let (frame, brightness) = panel.frame_snapshot();
    assert_eq!(brightness, 128);
    assert_eq!(frame[0], Rgb::new(200, 0, 0));

    panel.show_passkey(123_456).unwrap();
    assert!(panel.is_bonding());
    let (frame, brightness) = panel.frame_snapshot();
    // Brightness still comes from the control protocol.
    assert_eq!(brightness, 128);
    // The client's pixel is withheld while the passkey owns the display.
    assert_eq!(frame[0], Rgb::new(0, 0, 0));
    // Digit '1' lights logical (0, 2), physical slot 13 on the serpentine.
    assert_eq!(frame[13], INK);
}

#[test]
fn cancel_pairing_blanks_both_frames() {
    let mut panel = Panel16::new();
    panel
        .service_mut()
        .write_cursor(0, &(-1i16).to_le_bytes())
        .unwrap();
    panel.service_mut().write_color(0, &[7, 8, 9]).unwrap();
    panel.show_passkey(123_456).unwrap();

    panel.cancel_pairing();
    assert!(!panel.is_bonding());
    let (frame, _) = panel.frame_snapshot();
    assert!(frame.iter().all(|&pixel| pixel == Rgb::new(0, 0, 0)));
    assert_eq!(
        panel.service().matrix().pixel_at(0).unwrap(),
        Rgb::new(0, 0, 0)
    );
}

#[test]
fn security_changed_hands_a_blank_display_back() {
    let mut panel = Panel16::new();
    panel.show_passkey(123_456).unwrap();
    // Control writes keep landing while the passkey is up.
    panel.service_mut().write_color(0, &[9, 9, 9]).unwrap();

    panel.security_changed();
    assert!(!panel.is_bonding());
    let (frame, _) = panel.frame_snapshot();
    assert!(frame.iter().all(|&pixel| pixel == Rgb::new(0, 0, 0)));
}

#[test]
fn commit_while_bonding_scales_the_digits() {
    let mut panel = Panel16::new();
    panel.service_mut().write_brightness(0, &[128]).unwrap();
    panel.show_passkey(123_456).unwrap();

    let mut strip = RecordingStrip { frames: Vec::new() };
    block_on(panel.commit(&mut strip)).unwrap();
    // Floor of 64 * 128 / 255.
    assert_eq!(strip.frames[0][13], Rgb::new(32, 32, 32));
    assert_eq!(strip.frames[0][15], Rgb::new(0, 0, 0));
}

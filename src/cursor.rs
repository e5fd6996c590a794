//! Hardware cursor control through the CRT controller's index/data
//! port pair, plus the logical position it shadows.

use crate::buffer::{BUFFER_HEIGHT, BUFFER_WIDTH};
use crate::hw::Hardware;

pub const CRTC_INDEX: u16 = 0x3D4;
pub const CRTC_DATA: u16 = 0x3D5;

const CURSOR_START_REG: u8 = 0x0A;
const CURSOR_END_REG: u8 = 0x0B;
const CURSOR_LOCATION_HIGH_REG: u8 = 0x0E;
const CURSOR_LOCATION_LOW_REG: u8 = 0x0F;

// Visible shape: the conventional underline, scan lines 13 through 15.
const CURSOR_SCAN_START: u8 = 13;
const CURSOR_SCAN_END: u8 = 15;

bitflags! {
  /// Cursor start register (index 0x0A): low five bits hold the first
  /// scan line of the glyph, bit 5 blanks the cursor entirely.
  struct CursorStart: u8 {
    const SCAN_LINE = 0x1F;
    const DISABLED = 1 << 5;
  }
}

/// Logical cursor position and visibility. The position is kept in
/// grid bounds by clamping on every mutation; the hardware glyph is
/// rewritten on every move so it never drifts from the logical state.
pub struct Cursor {
  line: usize,
  column: usize,
  enabled: bool,
}

impl Cursor {
  pub const fn new() -> Cursor {
    Cursor {
      line: 0,
      column: 0,
      enabled: true,
    }
  }

  pub fn position(&self) -> (usize, usize) {
    (self.line, self.column)
  }

  pub fn line(&self) -> usize {
    self.line
  }

  pub fn column(&self) -> usize {
    self.column
  }

  pub fn is_enabled(&self) -> bool {
    self.enabled
  }

  /// Sets the logical position, clamped to the grid, then relocates
  /// the hardware glyph by writing the linear offset through the
  /// location register pair.
  pub fn move_to<H: Hardware>(&mut self, hw: &mut H, line: usize, column: usize) {
    self.line = line.min(BUFFER_HEIGHT - 1);
    self.column = column.min(BUFFER_WIDTH - 1);
    let offset = self.line * BUFFER_WIDTH + self.column;
    write_register(hw, CURSOR_LOCATION_HIGH_REG, (offset >> 8) as u8);
    write_register(hw, CURSOR_LOCATION_LOW_REG, (offset & 0xFF) as u8);
  }

  /// Makes the glyph visible with the underline shape. The non-shape
  /// bits of both registers are preserved, so repeated calls settle on
  /// the same register contents.
  pub fn enable<H: Hardware>(&mut self, hw: &mut H) {
    let start = read_register(hw, CURSOR_START_REG)
      & !(CursorStart::DISABLED.bits() | CursorStart::SCAN_LINE.bits());
    write_register(hw, CURSOR_START_REG, start | CURSOR_SCAN_START);
    let end = read_register(hw, CURSOR_END_REG) & !CursorStart::SCAN_LINE.bits();
    write_register(hw, CURSOR_END_REG, end | CURSOR_SCAN_END);
    self.enabled = true;
  }

  /// Blanks the glyph. The logical position is retained, so a later
  /// enable resumes at the same cell.
  pub fn disable<H: Hardware>(&mut self, hw: &mut H) {
    let start = read_register(hw, CURSOR_START_REG);
    write_register(hw, CURSOR_START_REG, start | CursorStart::DISABLED.bits());
    self.enabled = false;
  }
}

fn write_register<H: Hardware>(hw: &mut H, index: u8, value: u8) {
  hw.write_port(CRTC_INDEX, index);
  hw.write_port(CRTC_DATA, value);
}

fn read_register<H: Hardware>(hw: &mut H, index: u8) -> u8 {
  hw.write_port(CRTC_INDEX, index);
  hw.read_port(CRTC_DATA)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::hw::sim::SimHardware;

  #[test]
  fn move_to_writes_offset_bytes() {
    let mut hw = SimHardware::new();
    let mut cursor = Cursor::new();
    cursor.move_to(&mut hw, 3, 17);
    let offset = (3 * BUFFER_WIDTH + 17) as u16;
    assert_eq!(
      hw.port_writes,
      vec![
        (CRTC_INDEX, CURSOR_LOCATION_HIGH_REG),
        (CRTC_DATA, (offset >> 8) as u8),
        (CRTC_INDEX, CURSOR_LOCATION_LOW_REG),
        (CRTC_DATA, (offset & 0xFF) as u8),
      ]
    );
  }

  #[test]
  fn move_to_clamps_and_reads_back() {
    let mut hw = SimHardware::new();
    let mut cursor = Cursor::new();
    cursor.move_to(&mut hw, 3, BUFFER_WIDTH);
    assert_eq!(cursor.position(), (3, BUFFER_WIDTH - 1));
    cursor.move_to(&mut hw, BUFFER_HEIGHT + 10, 0);
    assert_eq!(cursor.position(), (BUFFER_HEIGHT - 1, 0));
  }

  #[test]
  fn enable_sets_shape_and_clears_disable_bit() {
    let mut hw = SimHardware::new();
    let mut cursor = Cursor::new();
    cursor.enable(&mut hw);
    assert_eq!(hw.crtc_reg(CURSOR_START_REG), CURSOR_SCAN_START);
    assert_eq!(hw.crtc_reg(CURSOR_END_REG), CURSOR_SCAN_END);
    assert!(cursor.is_enabled());
  }

  #[test]
  fn disable_sets_disable_bit_and_keeps_position() {
    let mut hw = SimHardware::new();
    let mut cursor = Cursor::new();
    cursor.move_to(&mut hw, 7, 42);
    cursor.disable(&mut hw);
    assert_ne!(hw.crtc_reg(CURSOR_START_REG) & 0x20, 0);
    assert!(!cursor.is_enabled());
    assert_eq!(cursor.position(), (7, 42));
  }

  #[test]
  fn enable_after_disable_restores_original_shape() {
    let mut hw = SimHardware::new();
    let mut cursor = Cursor::new();
    cursor.enable(&mut hw);
    let visible_start = hw.crtc_reg(CURSOR_START_REG);
    let visible_end = hw.crtc_reg(CURSOR_END_REG);
    cursor.disable(&mut hw);
    cursor.disable(&mut hw);
    cursor.enable(&mut hw);
    cursor.enable(&mut hw);
    assert_eq!(hw.crtc_reg(CURSOR_START_REG), visible_start);
    assert_eq!(hw.crtc_reg(CURSOR_END_REG), visible_end);
    assert!(cursor.is_enabled());
  }
}

//! The output state machine: one call per character, cell writes going
//! through the buffer layer, wrap and scroll folded into a single
//! newline transition, hardware cursor re-synchronized after every
//! step.

use core::fmt;

use crate::buffer::{self, BUFFER_HEIGHT, BUFFER_WIDTH};
use crate::cursor::Cursor;
use crate::hw::Hardware;
use crate::scroll;

/// Light gray on black, the attribute the hardware resets to.
pub const DEFAULT_ATTRIBUTE: u8 = 0x07;

pub struct Writer<H: Hardware> {
  cursor: Cursor,
  attribute: u8,
  hw: H,
}

impl<H: Hardware> Writer<H> {
  pub fn new(hw: H) -> Writer<H> {
    Writer {
      cursor: Cursor::new(),
      attribute: DEFAULT_ATTRIBUTE,
      hw,
    }
  }

  /// Outputs one character. A newline moves to column 0 of the next
  /// row; anything else is written at the cursor with the default
  /// attribute. Reaching the last column wraps like a newline, so the
  /// cursor is in bounds before and after every call.
  pub fn print_char(&mut self, byte: u8) {
    match byte {
      b'\n' => self.new_line(),
      byte => {
        let (line, column) = self.cursor.position();
        buffer::write_cell(&mut self.hw, line, column, byte, self.attribute);
        if column + 1 < BUFFER_WIDTH {
          self.cursor.move_to(&mut self.hw, line, column + 1);
        } else {
          self.new_line();
        }
      }
    }
  }

  /// The newline transition without consuming a character. Past the
  /// last row the grid scrolls up one row and the cursor stays pinned
  /// to the bottom.
  pub fn new_line(&mut self) {
    let line = self.cursor.line();
    if line + 1 < BUFFER_HEIGHT {
      self.cursor.move_to(&mut self.hw, line + 1, 0);
    } else {
      scroll::scroll_up(&mut self.hw, 1, self.attribute);
      self.cursor.move_to(&mut self.hw, BUFFER_HEIGHT - 1, 0);
    }
  }

  pub fn write_string(&mut self, s: &str) {
    for byte in s.bytes() {
      match byte {
        // printable ASCII byte or newline
        0x20..=0x7E | b'\n' => self.print_char(byte),
        // not part of printable ASCII range
        _ => self.print_char(0xFE),
      }
    }
  }

  /// Absolute repositioning, clamped to the grid. Callers use this for
  /// backspace-style editing or goto sequences.
  pub fn move_cursor(&mut self, line: usize, column: usize) {
    self.cursor.move_to(&mut self.hw, line, column);
  }

  pub fn enable_cursor(&mut self) {
    self.cursor.enable(&mut self.hw);
  }

  pub fn disable_cursor(&mut self) {
    self.cursor.disable(&mut self.hw);
  }

  pub fn cursor_position(&self) -> (usize, usize) {
    self.cursor.position()
  }

  pub fn cursor_enabled(&self) -> bool {
    self.cursor.is_enabled()
  }

  pub fn set_attribute(&mut self, attribute: u8) {
    self.attribute = attribute;
  }

  pub fn attribute(&self) -> u8 {
    self.attribute
  }

  /// Blanks the grid with the default attribute and homes the cursor.
  pub fn clear_screen(&mut self) {
    for line in 0..BUFFER_HEIGHT {
      buffer::clear_row(&mut self.hw, line, self.attribute);
    }
    self.cursor.move_to(&mut self.hw, 0, 0);
  }
}

impl<H: Hardware> fmt::Write for Writer<H> {
  fn write_str(&mut self, s: &str) -> fmt::Result {
    self.write_string(s);
    Ok(())
  }
}

//! Array-backed stand-in for the display, with a small CRT controller
//! model (index latch plus register file) and a log of raw port writes
//! so tests can check the exact index/data sequences.

use super::Hardware;
use crate::buffer::{ScreenChar, BUFFER_HEIGHT, BUFFER_WIDTH};
use crate::cursor::{CRTC_DATA, CRTC_INDEX};

const CRTC_REGS: usize = 0x19;

pub struct SimHardware {
  pub cells: [[ScreenChar; BUFFER_WIDTH]; BUFFER_HEIGHT],
  pub port_writes: Vec<(u16, u8)>,
  crtc_index: u8,
  crtc_regs: [u8; CRTC_REGS],
}

impl SimHardware {
  pub fn new() -> SimHardware {
    SimHardware {
      cells: [[ScreenChar::blank(0x07); BUFFER_WIDTH]; BUFFER_HEIGHT],
      port_writes: Vec::new(),
      crtc_index: 0,
      crtc_regs: [0; CRTC_REGS],
    }
  }

  pub fn crtc_reg(&self, index: u8) -> u8 {
    self.crtc_regs[index as usize]
  }

  /// The characters of one row, trailing blanks trimmed.
  pub fn row_text(&self, line: usize) -> String {
    let text: String = self.cells[line]
      .iter()
      .map(|cell| cell.ascii_character as char)
      .collect();
    text.trim_end().to_string()
  }
}

impl Hardware for SimHardware {
  fn read_cell(&self, line: usize, column: usize) -> ScreenChar {
    self.cells[line][column]
  }

  fn write_cell(&mut self, line: usize, column: usize, cell: ScreenChar) {
    self.cells[line][column] = cell;
  }

  fn read_port(&mut self, port: u16) -> u8 {
    match port {
      CRTC_DATA => self.crtc_regs[self.crtc_index as usize],
      _ => 0,
    }
  }

  fn write_port(&mut self, port: u16, value: u8) {
    self.port_writes.push((port, value));
    match port {
      CRTC_INDEX => self.crtc_index = value,
      CRTC_DATA => self.crtc_regs[self.crtc_index as usize] = value,
      _ => {}
    }
  }
}

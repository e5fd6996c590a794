use volatile::Volatile;
use x86_64::instructions::port::Port;

use super::Hardware;
use crate::buffer::{ScreenChar, BUFFER_HEIGHT, BUFFER_WIDTH};

const VGA_BUFFER_ADDR: usize = 0xB8000;

#[repr(transparent)]
struct VgaCells {
  chars: [[Volatile<ScreenChar>; BUFFER_WIDTH]; BUFFER_HEIGHT],
}

/// The real display: the text buffer mapped at `0xB8000` and port I/O
/// for the CRT controller.
pub struct VgaHardware {
  cells: &'static mut VgaCells,
}

impl VgaHardware {
  /// # Safety
  ///
  /// The caller must hold exclusive ownership of the VGA text buffer
  /// and the CRT controller ports for the lifetime of the system. At
  /// most one `VgaHardware` may exist, and `0xB8000` must be mapped.
  pub unsafe fn new() -> VgaHardware {
    VgaHardware {
      cells: &mut *(VGA_BUFFER_ADDR as *mut VgaCells),
    }
  }
}

impl Hardware for VgaHardware {
  fn read_cell(&self, line: usize, column: usize) -> ScreenChar {
    self.cells.chars[line][column].read()
  }

  fn write_cell(&mut self, line: usize, column: usize, cell: ScreenChar) {
    self.cells.chars[line][column].write(cell)
  }

  fn read_port(&mut self, port: u16) -> u8 {
    let mut port: Port<u8> = Port::new(port);
    unsafe { port.read() }
  }

  fn write_port(&mut self, port: u16, value: u8) {
    let mut port: Port<u8> = Port::new(port);
    unsafe { port.write(value) }
  }
}

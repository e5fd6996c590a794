//! Text-mode console driver for VGA-compatible display hardware.
//!
//! The driver turns a stream of printed characters into positioned
//! writes to the 80x25 cell grid at `0xB8000`, wrapping at the last
//! column, scrolling at the last row and keeping the hardware cursor
//! glyph in step with the logical position through the CRT controller
//! ports. All hardware access sits behind the [`hw::Hardware`] trait,
//! so the state machine itself runs against a simulated display in the
//! test suite.
//!
//! On x86_64 targets the crate exposes a single global console over
//! the real hardware; callers serialize access through its lock. The
//! core performs no locking of its own and interrupt-context callers
//! must not re-enter a half-finished operation.

#![cfg_attr(not(test), no_std)]

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate static_assertions;

pub mod buffer;
pub mod cursor;
pub mod hw;
pub mod scroll;
pub mod writer;

pub use crate::buffer::{ScreenChar, BUFFER_HEIGHT, BUFFER_WIDTH};
pub use crate::cursor::Cursor;
pub use crate::hw::Hardware;
pub use crate::writer::{Writer, DEFAULT_ATTRIBUTE};

#[cfg(target_arch = "x86_64")]
pub use crate::global::*;

#[cfg(target_arch = "x86_64")]
mod global {
  use core::fmt;
  use log::{Level, LevelFilter, Metadata, Record};
  use spin::Mutex;

  use crate::hw::vga::VgaHardware;
  use crate::writer::Writer;

  pub type SafeWriter = Mutex<Writer<VgaHardware>>;

  lazy_static! {
    /// The one console over the one display. Exclusive ownership of
    /// the text buffer and CRT ports is asserted here and nowhere
    /// else.
    pub static ref CONSOLE: SafeWriter =
      Mutex::new(Writer::new(unsafe { VgaHardware::new() }));
  }

  /// Clears the screen, shows the cursor and installs the console as
  /// the global `log` sink.
  pub fn init() {
    {
      let mut console = CONSOLE.lock();
      console.clear_screen();
      console.enable_cursor();
    }
    ::log::set_logger(&CONSOLE).expect("could not setup logging");
    ::log::set_max_level(LevelFilter::Info);
  }

  pub fn print_char(byte: u8) {
    CONSOLE.lock().print_char(byte);
  }

  pub fn new_line() {
    CONSOLE.lock().new_line();
  }

  pub fn move_cursor(line: usize, column: usize) {
    CONSOLE.lock().move_cursor(line, column);
  }

  pub fn enable_cursor() {
    CONSOLE.lock().enable_cursor();
  }

  pub fn disable_cursor() {
    CONSOLE.lock().disable_cursor();
  }

  pub fn set_attribute(attribute: u8) {
    CONSOLE.lock().set_attribute(attribute);
  }

  pub fn clear_screen() {
    CONSOLE.lock().clear_screen();
  }

  pub fn print(args: fmt::Arguments) {
    use core::fmt::Write;
    CONSOLE
      .lock()
      .write_fmt(args)
      .expect("could not write to vga buffer");
  }

  /// Panic-path output: steals the lock from whatever was interrupted,
  /// since the holder may never resume.
  pub fn print_emergency(args: fmt::Arguments) {
    use core::fmt::Write;
    unsafe { CONSOLE.force_unlock() };
    let w = CONSOLE.try_lock();
    w.and_then(|mut w| {
      w.write_fmt(args).expect("could not write to vga buffer");
      Some(w)
    })
    .expect("need to print to vga");
  }

  impl ::log::Log for CONSOLE {
    fn enabled(&self, metadata: &Metadata) -> bool {
      metadata.level() <= Level::Info
    }

    fn log(&self, record: &Record) {
      if self.enabled(record.metadata()) {
        use core::fmt::Write;
        unsafe { self.force_unlock() };
        self
          .try_lock()
          .and_then(|mut console| {
            console
              .write_fmt(format_args!(
                "{:5} {} - {}\n",
                record.level(),
                record.target(),
                record.args(),
              ))
              .ok()
          })
          .expect("console did not print");
      }
    }

    fn flush(&self) {}
  }
}

#[cfg(target_arch = "x86_64")]
#[macro_export]
macro_rules! vga_print {
  ($($arg:tt)*) => {
    $crate::print(format_args!($($arg)*))
  };
}

#[cfg(target_arch = "x86_64")]
#[macro_export]
macro_rules! vga_println {
  () => ($crate::vga_print!("\n"));
  ($fmt:expr) => ($crate::vga_print!(concat!($fmt, "\n")));
  ($fmt:expr, $($arg:tt)*) => ($crate::vga_print!(concat!($fmt, "\n"), $($arg)*));
}

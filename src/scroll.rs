use crate::buffer::{self, BUFFER_HEIGHT};
use crate::hw::Hardware;

/// Discards the top `count` rows, shifts the rest up and blanks the
/// vacated bottom rows with the given attribute. A count of at least
/// `BUFFER_HEIGHT` clears the whole grid; scrolling never fails.
pub fn scroll_up<H: Hardware>(hw: &mut H, count: usize, attribute: u8) {
  if count == 0 {
    return;
  }
  let count = count.min(BUFFER_HEIGHT);
  buffer::shift_rows_up(hw, count);
  for line in BUFFER_HEIGHT - count..BUFFER_HEIGHT {
    buffer::clear_row(hw, line, attribute);
  }
}

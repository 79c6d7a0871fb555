//! Byte-level dump rendering for `hexdump`.
//!
//! Despite the command's conventional name, each byte is rendered as an
//! 8-digit binary group (MSB first), not two hex digits. The offset column
//! is hexadecimal. The format is fixed bit-for-bit; tools downstream parse
//! the column layout.

use std::fmt::Write;

/// Default bytes rendered per line.
pub const BYTES_PER_LINE: usize = 8;

/// Render `buf` as an offset-indexed binary+ASCII listing.
///
/// Offsets are absolute: `base_offset` plus the position within `buf`,
/// printed as 8 hex digits. Missing slots on the final short line are padded
/// with 9 blanks (8 digit positions plus the separator) so the ASCII column
/// always starts at the same column, and contribute a blank to the ASCII
/// column itself.
pub fn format_dump(buf: &[u8], base_offset: u64, bytes_per_line: usize) -> String {
    let mut out = String::new();

    for (line_offset, line) in buf.chunks(bytes_per_line).enumerate() {
        let addr = base_offset + (line_offset * bytes_per_line) as u64;
        let _ = write!(out, "{addr:08x}: ");

        let mut ascii = String::with_capacity(bytes_per_line);
        for slot in 0..bytes_per_line {
            match line.get(slot) {
                Some(&byte) => {
                    let _ = write!(out, "{byte:08b} ");
                    if byte.is_ascii_graphic() || byte == b' ' {
                        ascii.push(byte as char);
                    } else {
                        ascii.push('.');
                    }
                }
                None => {
                    out.push_str("         ");
                    ascii.push(' ');
                }
            }
        }

        out.push(' ');
        out.push_str(&ascii);
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer_renders_nothing() {
        assert_eq!(format_dump(&[], 0, BYTES_PER_LINE), "");
    }

    #[test]
    fn single_byte_line_shape() {
        let out = format_dump(&[0x41], 0, BYTES_PER_LINE);
        let expected = format!(
            "00000000: 01000001 {} A{}\n",
            "         ".repeat(7),
            " ".repeat(7),
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn full_line_has_no_filler() {
        let out = format_dump(b"ABCDEFGH", 0, BYTES_PER_LINE);
        assert_eq!(out.lines().count(), 1);
        let line = out.lines().next().unwrap();
        assert!(line.starts_with("00000000: 01000001 01000010 "));
        assert!(line.ends_with(" ABCDEFGH"));
    }

    #[test]
    fn base_offset_shifts_addresses() {
        let out = format_dump(b"0123456789", 0x100, BYTES_PER_LINE);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("00000100: "));
        assert!(lines[1].starts_with("00000108: "));
    }

    #[test]
    fn non_printable_bytes_become_dots() {
        let out = format_dump(&[0x00, 0x1F, 0x7F, b'x'], 0, BYTES_PER_LINE);
        assert!(out.ends_with(" ...x    \n"));
    }

    #[test]
    fn ascii_column_is_aligned_on_short_lines() {
        // Column position of the ASCII section must match between a full
        // line and a short one.
        let full = format_dump(b"ABCDEFGH", 0, BYTES_PER_LINE);
        let short = format_dump(b"A", 0, BYTES_PER_LINE);
        let full_col = full.find(" ABCDEFGH").unwrap();
        let short_col = short.find(" A").unwrap();
        assert_eq!(full_col, short_col);
    }
}

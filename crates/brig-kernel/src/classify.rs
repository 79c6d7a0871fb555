//! Content classification: text vs. binary, plus a MIME guess by extension.
//!
//! The classifier is a bounded heuristic, not a decoder. It scores at most
//! the first 512 bytes and tolerates malformed UTF-8 by counting it against
//! the non-printable budget instead of rejecting outright, so classification
//! never depends on buffer size beyond the scan window.

/// Bytes inspected by [`is_text`]. Classification ignores everything after.
pub const SCAN_WINDOW: usize = 512;

/// Non-printable density (percent) at or above which a buffer is binary.
const BINARY_THRESHOLD_PCT: usize = 30;

/// Classify a buffer as text or binary.
///
/// Empty buffers are text. A NUL byte anywhere in the scan window is an
/// immediate binary verdict. Otherwise each scanned unit scores: control
/// codes other than tab/newline/carriage-return count as non-printable;
/// a recognized UTF-8 lead byte consumes its full sequence length and counts
/// as one non-printable unit if any continuation byte is malformed; an
/// unrecognized lead byte counts as one non-printable byte. The buffer is
/// text iff strictly less than 30% of the scanned bytes were non-printable.
pub fn is_text(buf: &[u8]) -> bool {
    if buf.is_empty() {
        return true;
    }

    let total = buf.len().min(SCAN_WINDOW);
    let window = &buf[..total];
    let mut non_printable = 0usize;

    let mut i = 0;
    while i < total {
        let b = window[i];

        if b == 0 {
            return false;
        }

        if b < 32 {
            if b != b'\t' && b != b'\n' && b != b'\r' {
                non_printable += 1;
            }
            i += 1;
            continue;
        }

        if b >= 0x80 {
            let seq_len = if b & 0xE0 == 0xC0 {
                2
            } else if b & 0xF0 == 0xE0 {
                3
            } else if b & 0xF8 == 0xF0 {
                4
            } else {
                // Invalid lead byte.
                non_printable += 1;
                i += 1;
                continue;
            };

            let mut valid = true;
            for j in 1..seq_len {
                if i + j >= total {
                    break;
                }
                if window[i + j] & 0xC0 != 0x80 {
                    valid = false;
                    break;
                }
            }
            if !valid {
                non_printable += 1;
            }

            i += seq_len;
            continue;
        }

        // Printable ASCII.
        i += 1;
    }

    non_printable * 100 / total < BINARY_THRESHOLD_PCT
}

/// Best-effort MIME type guess from a file name's extension.
///
/// Returns `None` when there is no extension or it is not in the table.
pub fn mime_for_extension(name: &str) -> Option<&'static str> {
    let ext = name.rsplit_once('.')?.1.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "txt" => "text/plain",
        "cpp" | "cc" | "c" => "text/x-c++src",
        "h" | "hpp" => "text/x-c++hdr",
        "py" => "text/x-python",
        "js" => "text/javascript",
        "html" => "text/html",
        "css" => "text/css",
        "json" => "application/json",
        "xml" => "application/xml",
        "pdf" => "application/pdf",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "zip" => "application/zip",
        "tar" => "application/x-tar",
        "gz" => "application/gzip",
        _ => return None,
    };
    Some(mime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer_is_text() {
        assert!(is_text(b""));
    }

    #[test]
    fn plain_ascii_is_text() {
        assert!(is_text(b"hello, world\nsecond line\r\n\ttabbed"));
    }

    #[test]
    fn nul_byte_is_binary() {
        assert!(!is_text(b"\x00abc"));
        assert!(!is_text(b"abc\x00def"));
    }

    #[test]
    fn nul_outside_window_is_ignored() {
        let mut buf = vec![b'a'; SCAN_WINDOW];
        buf.push(0);
        assert!(is_text(&buf));
    }

    #[test]
    fn valid_utf8_accents_are_text() {
        assert!(is_text("héllo wörld — café naïve".as_bytes()));
        assert!(is_text("日本語のテキスト".as_bytes()));
    }

    #[test]
    fn control_heavy_buffer_is_binary() {
        // 154 of 512 bytes (>= 30%) are control codes.
        let mut buf = vec![b'a'; 512];
        for slot in buf.iter_mut().take(154) {
            *slot = 0x01;
        }
        assert!(!is_text(&buf));
    }

    #[test]
    fn control_light_buffer_is_text() {
        // 153 of 512 (just under 30%) stays text.
        let mut buf = vec![b'a'; 512];
        for slot in buf.iter_mut().take(153) {
            *slot = 0x01;
        }
        assert!(is_text(&buf));
    }

    #[test]
    fn malformed_utf8_scores_but_tolerates() {
        // A lone continuation byte and a truncated sequence in mostly-ASCII
        // content stay under the threshold.
        let mut buf = b"mostly ascii text here ".to_vec();
        buf.push(0x80); // invalid lead
        buf.push(0xC3); // lead expecting a continuation...
        buf.push(b'x'); // ...that never comes
        assert!(is_text(&buf));
    }

    #[test]
    fn dense_invalid_lead_bytes_are_binary() {
        let buf = vec![0xFFu8; 64];
        assert!(!is_text(&buf));
    }

    #[test]
    fn mime_table_lookups() {
        assert_eq!(mime_for_extension("notes.txt"), Some("text/plain"));
        assert_eq!(mime_for_extension("Photo.JPG"), Some("image/jpeg"));
        assert_eq!(mime_for_extension("data.json"), Some("application/json"));
        assert_eq!(mime_for_extension("archive.tar"), Some("application/x-tar"));
        assert_eq!(mime_for_extension("noext"), None);
        assert_eq!(mime_for_extension("weird.xyz"), None);
    }
}

//! # Code Page 437 Encoding
//!
//! Converts label text to the single-byte code page 437, the power-on
//! character table of ESC/POS printers after `ESC @`.
//!
//! The block and box-drawing characters used for label separators
//! (`▄`, `═`, `─`) all live in the upper half of the table. ASCII, including
//! control bytes such as LF, passes through unchanged. Characters outside
//! CP437 become `?` and are logged.

use codepage_437::CP437_CONTROL;
use tracing::warn;

/// Encode a Unicode string as CP437 bytes.
pub fn encode(s: &str) -> Vec<u8> {
    s.chars()
        .map(|ch| {
            CP437_CONTROL.encode(ch).unwrap_or_else(|| {
                warn!(character = %ch, code_point = ch as u32, "no CP437 mapping, printing '?'");
                b'?'
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passthrough() {
        assert_eq!(encode("Large Coffee\n"), b"Large Coffee\n");
        assert_eq!(encode(""), b"");
    }

    #[test]
    fn test_separator_glyphs() {
        assert_eq!(encode("▄▄"), vec![0xDC, 0xDC]);
        assert_eq!(encode("═"), vec![0xCD]);
        assert_eq!(encode("─"), vec![0xC4]);
    }

    #[test]
    fn test_accented_names() {
        // "Zoë" and "Café au lait" show up on drink labels
        assert_eq!(encode("Zoë"), vec![b'Z', b'o', 0x89]);
        assert_eq!(encode("Café"), vec![0x43, 0x61, 0x66, 0x82]);
        assert_eq!(encode("Año"), vec![0x41, 0xA4, 0x6F]);
    }

    #[test]
    fn test_degree_and_fractions() {
        assert_eq!(encode("350°"), vec![b'3', b'5', b'0', 0xF8]);
        assert_eq!(encode("½ cup"), vec![0xAB, b' ', b'c', b'u', b'p']);
    }

    #[test]
    fn test_unmapped_char_becomes_question_mark() {
        assert_eq!(encode("★"), vec![b'?']);
        assert_eq!(encode("tea ☕"), b"tea ?".to_vec());
    }
}

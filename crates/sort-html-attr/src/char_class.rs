//! Character classes the start tag grammar is built from.
//!
//! Bytes are used wherever a class is pure ASCII. Attribute names are the
//! exception: they exclude the C1 control range, which is multi-byte in UTF-8,
//! so names are classified per `char`.

/// Space characters: space, tab, LF, FF and CR.
pub(crate) fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0c | b'\r')
}

/// Control characters: U+0000 to U+001F and U+007F to U+009F.
pub(crate) fn is_control(c: char) -> bool {
    matches!(c, '\u{0000}'..='\u{001f}' | '\u{007f}'..='\u{009f}')
}

pub(crate) fn is_attribute_name_char(c: char) -> bool {
    !is_control(c) && !matches!(c, ' ' | '"' | '\'' | '>' | '/' | '=')
}

pub(crate) fn is_tag_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric()
}

/// Byte length of the attribute name starting at `at`, zero if there is none.
pub(crate) fn attribute_name_length(text: &str, at: usize) -> usize {
    text[at..]
        .char_indices()
        .find(|&(_, c)| !is_attribute_name_char(c))
        .map_or(text.len() - at, |(offset, _)| offset)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_space_chars() {
        for b in [b' ', b'\t', b'\n', 0x0c, b'\r'] {
            assert!(is_space(b));
        }
        assert!(!is_space(0x0b));
        assert!(!is_space(b'a'));
    }

    #[test]
    fn test_attribute_name_chars() {
        assert!(is_attribute_name_char('a'));
        assert!(is_attribute_name_char(':'));
        assert!(is_attribute_name_char('@'));
        assert!(is_attribute_name_char('<'));
        assert!(is_attribute_name_char('é'));
        assert!(!is_attribute_name_char('\u{0085}'));
        assert!(!is_attribute_name_char('\u{007f}'));
        assert!(!is_attribute_name_char('\t'));
        for c in [' ', '"', '\'', '>', '/', '='] {
            assert!(!is_attribute_name_char(c));
        }
    }

    #[test]
    fn test_attribute_name_length() {
        assert_eq!(attribute_name_length("data-x=1", 0), 6);
        assert_eq!(attribute_name_length(" hidden>", 1), 6);
        assert_eq!(attribute_name_length("hidden", 0), 6);
        assert_eq!(attribute_name_length("=x", 0), 0);
        assert_eq!(attribute_name_length("naïve/", 0), "naïve".len());
    }
}

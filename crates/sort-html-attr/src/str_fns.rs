use std::borrow::Cow;

use crate::macros::strspn;

/// Finds the first ASCII case-insensitive occurrence of `pattern` in `s` at or
/// after byte `offset`.
pub fn stripos(s: &str, pattern: &str, offset: usize) -> Option<usize> {
    let s = s.as_bytes();
    let pattern = pattern.as_bytes();
    let p_len = pattern.len();

    if p_len == 0 {
        return Some(offset);
    }

    if (offset + p_len) > s.len() {
        return None;
    }

    let p_end = pattern[p_len - 1];

    (offset..=(s.len() - p_len)).find(|&at| {
        p_end.eq_ignore_ascii_case(&s[at + p_len - 1])
            && pattern.eq_ignore_ascii_case(&s[at..(at + p_len)])
    })
}

/// Blanks out `//` and `/* */` comments outside of JSON strings.
///
/// Comment characters become spaces and newlines are kept, so line and column
/// numbers in parse errors still point into the original text.
pub fn strip_json_comments(json: &str) -> Cow<'_, str> {
    if memchr::memchr(b'/', json.as_bytes()).is_none() {
        return Cow::Borrowed(json);
    }

    let mut stripped = String::with_capacity(json.len());
    let mut chars = json.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            stripped.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        stripped.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                stripped.push(c);
            }

            ('/', Some('/')) => {
                chars.next();
                stripped.push_str("  ");
                while let Some(&next) = chars.peek() {
                    if next == '\n' {
                        break;
                    }
                    stripped.push(' ');
                    chars.next();
                }
            }

            ('/', Some('*')) => {
                chars.next();
                stripped.push_str("  ");
                let mut previous = '\0';
                for next in chars.by_ref() {
                    stripped.push(if next == '\n' { '\n' } else { ' ' });
                    if previous == '*' && next == '/' {
                        break;
                    }
                    previous = next;
                }
            }

            _ => stripped.push(c),
        }
    }

    Cow::Owned(stripped)
}

/// Blanks out commas directly followed by `}` or `]` outside of JSON strings.
pub fn strip_trailing_commas(json: &str) -> Cow<'_, str> {
    let bytes = json.as_bytes();
    let mut trailing_commas = Vec::new();
    let mut in_string = false;
    let mut at = 0;

    while at < bytes.len() {
        match bytes[at] {
            b'\\' if in_string => at += 1,
            b'"' => in_string = !in_string,
            b',' if !in_string => {
                let next = at + 1 + strspn!(bytes, b' ' | b'\t' | b'\n' | b'\r', at + 1);
                if matches!(bytes.get(next), Some(b'}' | b']')) {
                    trailing_commas.push(at);
                }
            }
            _ => {}
        }
        at += 1;
    }

    if trailing_commas.is_empty() {
        return Cow::Borrowed(json);
    }

    let mut stripped = String::with_capacity(json.len());
    let mut was_at = 0;
    for at in trailing_commas {
        stripped.push_str(&json[was_at..at]);
        stripped.push(' ');
        was_at = at + 1;
    }
    stripped.push_str(&json[was_at..]);

    Cow::Owned(stripped)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_stripos() {
        assert_eq!(stripos("Packages/HTML/HTML.sublime-syntax", "html", 0), Some(9));
        assert_eq!(stripos("Packages/HTML/HTML.sublime-syntax", "html", 10), Some(14));
        assert_eq!(stripos("text.html.basic", "HTML", 0), Some(5));
        assert_eq!(stripos("Plain Text", "html", 0), None);
        assert_eq!(stripos("XML", "xml", 0), Some(0));
        assert_eq!(stripos("ab", "abc", 0), None);
        assert_eq!(stripos("anything", "", 3), Some(3));
    }

    #[test]
    fn test_strip_line_comments() {
        let json = "{\n  // the order\n  \"priority\": [\"id\"] // trailing\n}";
        let stripped = strip_json_comments(json);
        assert_eq!(stripped.len(), json.len());
        assert_eq!(
            stripped.split_whitespace().collect::<String>(),
            "{\"priority\":[\"id\"]}"
        );
        assert_eq!(stripped.lines().count(), json.lines().count());
    }

    #[test]
    fn test_strip_block_comments() {
        let json = "{ /* a\n b */ \"a\": 1 /**/ }";
        let stripped = strip_json_comments(json);
        assert_eq!(stripped.split_whitespace().collect::<String>(), "{\"a\":1}");
        assert_eq!(stripped.lines().count(), 2);
    }

    #[test]
    fn test_comment_markers_inside_strings() {
        let json = r#"{"url": "http://example.com/*x*/", "e": "\"//"}"#;
        assert_eq!(strip_json_comments(json), json);
    }

    #[test]
    fn test_strip_trailing_commas() {
        assert_eq!(
            strip_trailing_commas("{\"a\": [1, 2,], \"b\": \",}\",\n}"),
            "{\"a\": [1, 2 ], \"b\": \",}\" \n}"
        );
        assert!(matches!(strip_trailing_commas("[1, 2]"), Cow::Borrowed(_)));
    }
}

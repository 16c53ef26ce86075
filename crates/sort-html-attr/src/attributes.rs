use crate::char_class::{attribute_name_length, is_space};
use crate::macros::{strcspn, strspn};

/// How an attribute's value is written in the source, if it has one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quoting {
    /// No value, e.g. `hidden`.
    Boolean,
    DoubleQuoted,
    SingleQuoted,
    Unquoted,
}

/// One attribute occurrence inside a start tag.
///
/// All offsets are byte offsets into the text the attribute was scanned from,
/// which for a located tag is the tag text itself, not the whole buffer.
///
/// ```text
/// <div  class="post" hidden>
///     ^ ^           ^
///     | |           `-- end
///     | `-- text_starts_at (name starts here)
///     `-- start (leading whitespace starts here)
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeToken {
    /// Where the leading whitespace run starts.
    pub start: usize,

    /// Where the attribute name starts, right after the leading whitespace.
    pub text_starts_at: usize,

    /// The byte length of the name.
    pub name_length: usize,

    /// Where the value starts, including any opening quote.
    pub value_starts_at: Option<usize>,

    pub quoting: Quoting,

    /// One past the last byte of the attribute.
    pub end: usize,
}

impl AttributeToken {
    /// The exact source text, leading whitespace included.
    pub fn full_text<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }

    /// The source text without the leading whitespace: `name` or `name=value`.
    pub fn text<'a>(&self, text: &'a str) -> &'a str {
        &text[self.text_starts_at..self.end]
    }

    pub fn name<'a>(&self, text: &'a str) -> &'a str {
        &text[self.text_starts_at..self.text_starts_at + self.name_length]
    }

    /// The raw value, quotes included, or `None` for boolean attributes.
    pub fn raw_value<'a>(&self, text: &'a str) -> Option<&'a str> {
        self.value_starts_at.map(|at| &text[at..self.end])
    }

    pub fn leading_whitespace<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.text_starts_at]
    }
}

/// Matches a single attribute at `at`.
///
/// The attribute must begin with at least one space character followed by a
/// name. The optional `=value` part is only taken when a complete value
/// follows; `a= >` yields the boolean attribute `a`.
pub fn parse_attribute_at(text: &str, at: usize) -> Option<AttributeToken> {
    let bytes = text.as_bytes();

    let space_length = strspn!(bytes, b if is_space(b), at);
    if 0 == space_length {
        return None;
    }

    let text_starts_at = at + space_length;
    let name_length = attribute_name_length(text, text_starts_at);
    if 0 == name_length {
        return None;
    }

    let name_ends_at = text_starts_at + name_length;
    let (value_starts_at, quoting, end) = match parse_value_at(bytes, name_ends_at) {
        Some((value_starts_at, quoting, end)) => (Some(value_starts_at), quoting, end),
        None => (None, Quoting::Boolean, name_ends_at),
    };

    Some(AttributeToken {
        start: at,
        text_starts_at,
        name_length,
        value_starts_at,
        quoting,
        end,
    })
}

/// Matches `[space]*=[space]*value` following an attribute name.
fn parse_value_at(bytes: &[u8], at: usize) -> Option<(usize, Quoting, usize)> {
    let mut at = at + strspn!(bytes, b if is_space(b), at);
    if bytes.get(at) != Some(&b'=') {
        return None;
    }
    at += 1;
    at += strspn!(bytes, b if is_space(b), at);

    match *bytes.get(at)? {
        quote @ (b'"' | b'\'') => {
            let closing_quote_at = memchr::memchr(quote, &bytes[at + 1..])? + at + 1;
            let quoting = if quote == b'"' {
                Quoting::DoubleQuoted
            } else {
                Quoting::SingleQuoted
            };
            Some((at, quoting, closing_quote_at + 1))
        }

        _ => {
            let value_length = strcspn!(
                bytes,
                b' ' | b'\t' | b'\n' | 0x0c | b'\r' | b'"' | b'\'' | b'=' | b'<' | b'>' | b'`' | b'/',
                at
            );
            if 0 == value_length {
                return None;
            }
            Some((at, Quoting::Unquoted, at + value_length))
        }
    }
}

/// Matches the longest run of consecutive attributes starting at `at`.
pub fn parse_attributes(text: &str, at: usize) -> Vec<AttributeToken> {
    let mut attributes = Vec::new();
    let mut at = at;
    while let Some(attribute) = parse_attribute_at(text, at) {
        at = attribute.end;
        attributes.push(attribute);
    }

    debug_assert!(attributes
        .windows(2)
        .all(|pair| pair[0].end == pair[1].start));
    debug_assert!(attributes
        .iter()
        .all(|attribute| is_space(text.as_bytes()[attribute.start])));

    attributes
}

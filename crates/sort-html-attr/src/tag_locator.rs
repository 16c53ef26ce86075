use std::ops::Range;

use crate::attributes::{parse_attributes, AttributeToken};
use crate::char_class::{is_space, is_tag_name_byte};
use crate::macros::strspn;

/// A start tag with at least one attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagMatch {
    /// Byte offset of the `<` in the scanned text.
    pub start: usize,

    /// Byte length of the tag, from `<` through `>`.
    pub length: usize,

    /// Byte length of the tag name, namespace prefix included.
    pub name_length: usize,

    /// Attributes in source order. Offsets are relative to the tag start so
    /// they index directly into the tag text.
    pub attributes: Vec<AttributeToken>,

    /// Whether the tag ends in `/>`.
    pub is_self_closing: bool,
}

impl TagMatch {
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    pub fn span(&self) -> Range<usize> {
        self.start..self.end()
    }

    pub fn text<'a>(&self, buffer: &'a str) -> &'a str {
        &buffer[self.span()]
    }

    pub fn tag_name<'a>(&self, buffer: &'a str) -> &'a str {
        &buffer[self.start + 1..self.start + 1 + self.name_length]
    }
}

/// Scans text for start tags carrying attributes.
///
/// Tags are found in ascending order and never overlap. A candidate `<` that
/// doesn't open a matching tag is skipped, and scanning resumes at the next
/// `<` even when that lies inside the rejected candidate.
///
/// ```
/// use sort_html_attr::tag_locator::TagLocator;
///
/// let html = r#"<p>Hi</p><img src="a.png" alt="">"#;
/// let tags: Vec<_> = TagLocator::new(html).collect();
/// assert_eq!(tags.len(), 1);
/// assert_eq!(tags[0].tag_name(html), "img");
/// ```
pub struct TagLocator<'a> {
    text: &'a str,
    bytes_already_parsed: usize,
}

impl<'a> TagLocator<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            bytes_already_parsed: 0,
        }
    }

    /// Finds the next start tag, advancing past it.
    pub fn next_tag(&mut self) -> Option<TagMatch> {
        let bytes = self.text.as_bytes();

        while self.bytes_already_parsed < bytes.len() {
            let at = self.bytes_already_parsed
                + memchr::memchr(b'<', &bytes[self.bytes_already_parsed..])?;

            if let Some(tag) = match_tag_at(self.text, at) {
                log::trace!(
                    target: "sort_html_attr.locator",
                    "matched <{}> at {} with {} attributes",
                    tag.tag_name(self.text),
                    tag.start,
                    tag.attributes.len()
                );
                self.bytes_already_parsed = tag.end();
                return Some(tag);
            }

            self.bytes_already_parsed = at + 1;
        }

        None
    }
}

impl Iterator for TagLocator<'_> {
    type Item = TagMatch;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_tag()
    }
}

/// Finds every start tag with attributes, in ascending order of position.
pub fn locate(text: &str) -> Vec<TagMatch> {
    TagLocator::new(text).collect()
}

/// Matches a start tag beginning exactly at byte offset `at`.
///
/// The tag name is either `segment:segment` or `segment(-segment)*`, where
/// each segment is a run of ASCII letters and digits. It must be followed by
/// one or more attributes, optional whitespace, an optional `/` and `>`.
///
/// ```text
/// <svg:rect x="0" y="0"/>
/// <my-custom-element some-prop>
/// ```
pub fn match_tag_at(text: &str, at: usize) -> Option<TagMatch> {
    let tag_text = text.get(at..)?;
    let bytes = tag_text.as_bytes();

    if bytes.first() != Some(&b'<') {
        return None;
    }

    let name_length = tag_name_length(bytes);
    if 0 == name_length {
        return None;
    }

    let attributes = parse_attributes(tag_text, 1 + name_length);
    let last_attribute = attributes.last()?;

    let mut tag_ends_at = last_attribute.end;
    tag_ends_at += strspn!(bytes, b if is_space(b), tag_ends_at);

    let is_self_closing = bytes.get(tag_ends_at) == Some(&b'/');
    if is_self_closing {
        tag_ends_at += 1;
    }

    if bytes.get(tag_ends_at) != Some(&b'>') {
        return None;
    }

    Some(TagMatch {
        start: at,
        length: tag_ends_at + 1,
        name_length,
        attributes,
        is_self_closing,
    })
}

/// Length of the tag name following the `<` at the start of `bytes`.
///
/// Returns zero when there is no valid name, e.g. for closing tags, for a
/// name with two namespace separators, or for a dangling `-` or `:`.
fn tag_name_length(bytes: &[u8]) -> usize {
    let segment_length = |at: usize| strspn!(bytes, b if is_tag_name_byte(b), at);

    let mut name_ends_at = 1 + segment_length(1);
    if 1 == name_ends_at {
        return 0;
    }

    match bytes.get(name_ends_at) {
        Some(b':') => {
            let length = segment_length(name_ends_at + 1);
            if 0 == length {
                return 0;
            }
            name_ends_at += 1 + length;
        }

        _ => {
            while bytes.get(name_ends_at) == Some(&b'-') {
                let length = segment_length(name_ends_at + 1);
                if 0 == length {
                    break;
                }
                name_ends_at += 1 + length;
            }
        }
    }

    name_ends_at - 1
}

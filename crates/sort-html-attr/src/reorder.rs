use std::borrow::Cow;

use crate::attributes::AttributeToken;
use crate::priority::PriorityList;
use crate::tag_locator::match_tag_at;

/// How a tag is rebuilt once its attributes are sorted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WhitespaceMode {
    /// Rejoin the sorted attributes with a single space between each.
    ///
    /// ```text
    /// <div
    ///   class="a"
    ///   id="b">     becomes     <div id="b" class="a">
    /// ```
    #[default]
    Normalize,

    /// Keep every whitespace run in place and permute the attributes through
    /// the original attribute positions.
    ///
    /// ```text
    /// <div
    ///   class="a"               <div
    ///   id="b">     becomes       id="b"
    ///                             class="a">
    /// ```
    Preserve,
}

impl From<bool> for WhitespaceMode {
    fn from(preserve_white_space: bool) -> Self {
        if preserve_white_space {
            WhitespaceMode::Preserve
        } else {
            WhitespaceMode::Normalize
        }
    }
}

/// Orders attributes by `(weight, name)`.
///
/// The sort is stable, so duplicate attributes keep their relative order.
pub fn sort_attributes<'a>(
    tag: &str,
    attributes: &'a [AttributeToken],
    priority: &PriorityList,
) -> Vec<&'a AttributeToken> {
    let mut sorted: Vec<&AttributeToken> = attributes.iter().collect();
    sorted.sort_by_key(|attribute| {
        let name = attribute.name(tag);
        (priority.weight(name), name)
    });
    sorted
}

/// Rescans a single start tag and returns it with its attributes sorted.
///
/// Text that isn't exactly one start tag with attributes comes back
/// unchanged.
///
/// ```
/// use sort_html_attr::priority::PriorityList;
/// use sort_html_attr::reorder::{reorder, WhitespaceMode};
///
/// let priority = PriorityList::new(["id", "class"]);
/// let sorted = reorder(
///     r#"<div class="a" id="b" data-x="1">"#,
///     &priority,
///     WhitespaceMode::Normalize,
/// );
/// assert_eq!(sorted, r#"<div id="b" class="a" data-x="1">"#);
/// ```
pub fn reorder<'a>(tag: &'a str, priority: &PriorityList, mode: WhitespaceMode) -> Cow<'a, str> {
    match match_tag_at(tag, 0) {
        Some(tag_match) if tag_match.length == tag.len() => {
            reorder_tag(tag, &tag_match.attributes, priority, mode)
        }
        _ => Cow::Borrowed(tag),
    }
}

/// Rebuilds `tag` from attributes already scanned out of it.
///
/// Returns the original text, borrowed, when the attributes are already in
/// order or when there are none.
pub fn reorder_tag<'a>(
    tag: &'a str,
    attributes: &[AttributeToken],
    priority: &PriorityList,
    mode: WhitespaceMode,
) -> Cow<'a, str> {
    let (Some(first), Some(last)) = (attributes.first(), attributes.last()) else {
        return Cow::Borrowed(tag);
    };

    let sorted = sort_attributes(tag, attributes, priority);
    let mut updated = String::with_capacity(tag.len() + attributes.len());

    match mode {
        WhitespaceMode::Preserve => {
            let mut was_at = 0;
            for (slot, attribute) in attributes.iter().zip(&sorted) {
                updated.push_str(&tag[was_at..slot.text_starts_at]);
                updated.push_str(attribute.text(tag));
                was_at = slot.end;
            }
            updated.push_str(&tag[was_at..]);
        }

        WhitespaceMode::Normalize => {
            updated.push_str(&tag[..first.start]);
            for attribute in &sorted {
                updated.push(' ');
                updated.push_str(attribute.text(tag));
            }
            updated.push_str(&tag[last.end..]);
        }
    }

    if updated == tag {
        Cow::Borrowed(tag)
    } else {
        Cow::Owned(updated)
    }
}

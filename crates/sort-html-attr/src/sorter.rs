use std::borrow::Cow;
use std::ops::Range;

use serde::Serialize;

use crate::priority::PriorityList;
use crate::reorder::{reorder, reorder_tag, WhitespaceMode};
use crate::settings::Settings;
use crate::tag_locator::TagLocator;

/// Replace `length` bytes at `start` with `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextReplacement {
    pub start: usize,
    pub length: usize,
    pub text: String,
}

impl TextReplacement {
    pub fn new(start: usize, length: usize, text: impl Into<String>) -> Self {
        Self {
            start,
            length,
            text: text.into(),
        }
    }

    pub fn span(&self) -> Range<usize> {
        self.start..self.start + self.length
    }
}

/// Sorts the attributes of every start tag in a document.
#[derive(Debug, Clone, Default)]
pub struct AttributeSorter {
    priority: PriorityList,
    mode: WhitespaceMode,
}

impl AttributeSorter {
    pub fn new(priority: PriorityList, mode: WhitespaceMode) -> Self {
        Self { priority, mode }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.priority_list(), settings.whitespace_mode())
    }

    pub fn priority(&self) -> &PriorityList {
        &self.priority
    }

    pub fn mode(&self) -> WhitespaceMode {
        self.mode
    }

    /// Sorts the attributes of a single start tag.
    pub fn sort_tag<'a>(&self, tag: &'a str) -> Cow<'a, str> {
        reorder(tag, &self.priority, self.mode)
    }

    /// Computes the edits that sort every start tag in `html`.
    ///
    /// Tags already in order produce no edit. Edits come last tag first, so
    /// applying them one at a time never shifts a pending edit's offsets.
    pub fn replacements(&self, html: &str) -> Vec<TextReplacement> {
        let mut replacements: Vec<TextReplacement> = TagLocator::new(html)
            .filter_map(|tag| {
                match reorder_tag(tag.text(html), &tag.attributes, &self.priority, self.mode) {
                    Cow::Owned(sorted) => Some(TextReplacement::new(tag.start, tag.length, sorted)),
                    Cow::Borrowed(_) => None,
                }
            })
            .collect();
        replacements.reverse();

        log::debug!(
            target: "sort_html_attr.sorter",
            "{} start tags need sorting",
            replacements.len()
        );

        replacements
    }

    /// Returns `html` with the attributes of every start tag sorted.
    pub fn sort<'a>(&self, html: &'a str) -> Cow<'a, str> {
        let replacements = self.replacements(html);
        if replacements.is_empty() {
            Cow::Borrowed(html)
        } else {
            Cow::Owned(apply_replacements(html, &replacements))
        }
    }
}

/// Applies non-overlapping replacements given in descending order of position.
pub fn apply_replacements(html: &str, replacements: &[TextReplacement]) -> String {
    let mut updated = String::with_capacity(html.len());
    let mut was_at = 0;

    for replacement in replacements.iter().rev() {
        debug_assert!(
            replacement.start >= was_at,
            "replacements must be in descending order and must not overlap"
        );
        updated.push_str(&html[was_at..replacement.start]);
        updated.push_str(&replacement.text);
        was_at = replacement.start + replacement.length;
    }

    updated.push_str(&html[was_at..]);
    updated
}

#[cfg(test)]
mod test {
    use super::*;

    fn sorter(priority: &[&str], mode: WhitespaceMode) -> AttributeSorter {
        AttributeSorter::new(PriorityList::new(priority), mode)
    }

    #[test]
    fn test_replacements_are_descending() {
        let html = r#"<a href="/" id=a>x</a> <b class=c id=b> <i id=i class=c>"#;
        let replacements = sorter(&["id"], WhitespaceMode::Normalize).replacements(html);
        assert_eq!(
            replacements,
            [
                TextReplacement::new(23, 16, "<b id=b class=c>"),
                TextReplacement::new(0, 17, r#"<a id=a href="/">"#),
            ]
        );
    }

    #[test]
    fn test_sort_document() {
        let html = "<ul class=nav id=menu>\n  <li data-i=1 class=item>One</li>\n</ul>\n";
        let sorted = sorter(&["id", "class"], WhitespaceMode::Normalize).sort(html);
        assert_eq!(
            sorted,
            "<ul id=menu class=nav>\n  <li class=item data-i=1>One</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_sorted_document_is_borrowed() {
        let html = "<p id=x class=y>Already</p>";
        let sorted = sorter(&["id", "class"], WhitespaceMode::Normalize).sort(html);
        assert!(matches!(sorted, Cow::Borrowed(_)));
    }

    #[test]
    fn test_growing_and_shrinking_replacements() {
        let html = "<a  b  a>x<c\n\nz\n\ny>";
        let sorted = sorter(&[], WhitespaceMode::Normalize).sort(html);
        assert_eq!(sorted, "<a a b>x<c y z>");
    }

    #[test]
    fn test_apply_replacements() {
        let html = "0123456789";
        let replacements = [
            TextReplacement::new(8, 1, "eight"),
            TextReplacement::new(2, 3, ""),
        ];
        assert_eq!(apply_replacements(html, &replacements), "01567eight9");
        assert_eq!(apply_replacements(html, &[]), html);
    }

    #[test]
    fn test_from_settings() {
        let settings = Settings {
            priority: vec!["id".into()],
            preserve_white_space: true,
            ..Default::default()
        };
        let sorter = AttributeSorter::from_settings(&settings);
        assert_eq!(sorter.mode(), WhitespaceMode::Preserve);
        assert_eq!(sorter.priority().weight("id"), 0);
        assert_eq!(sorter.sort_tag("<a\tb\nid=1>"), "<a\tid=1\nb>");
    }
}

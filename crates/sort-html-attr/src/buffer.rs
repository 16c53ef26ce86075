//! Running the sorter against a mutable editor buffer.
//!
//! Hosts implement [`EditorBuffer`] over their own text storage and call
//! [`run_command`] from an explicit command or [`on_pre_save`] from their
//! save hook. Hosts that prefer to apply edits themselves can use
//! [`AttributeSorter::replacements`] instead.

use std::borrow::Cow;
use std::ops::Range;

use crate::settings::Settings;
use crate::sorter::AttributeSorter;
use crate::tag_locator::locate;

/// The view of a host text buffer needed to sort its start tags.
///
/// Spans are byte ranges into [`EditorBuffer::text`].
pub trait EditorBuffer {
    /// The name of the buffer's syntax or language, e.g.
    /// `"Packages/HTML/HTML.sublime-syntax"`.
    fn syntax(&self) -> &str;

    fn text(&self) -> &str;

    fn substr(&self, span: Range<usize>) -> &str {
        &self.text()[span]
    }

    fn replace(&mut self, span: Range<usize>, text: &str);
}

/// An in-memory buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringBuffer {
    syntax: String,
    text: String,
}

impl StringBuffer {
    pub fn new(syntax: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            syntax: syntax.into(),
            text: text.into(),
        }
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl EditorBuffer for StringBuffer {
    fn syntax(&self) -> &str {
        &self.syntax
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn replace(&mut self, span: Range<usize>, text: &str) {
        self.text.replace_range(span, text);
    }
}

/// Sorts the attributes of every start tag in the buffer.
///
/// Does nothing unless the buffer's syntax is allowed by the settings.
/// Tags are rewritten from the end of the buffer towards the start. Returns
/// the number of tags rewritten.
pub fn run_command<B: EditorBuffer + ?Sized>(buffer: &mut B, settings: &Settings) -> usize {
    if !settings.is_syntax_allowed(buffer.syntax()) {
        log::debug!(
            target: "sort_html_attr.sorter",
            "skipping buffer with syntax {:?}, allowed syntaxes are {:?}",
            buffer.syntax(),
            settings.allowed_syntaxes
        );
        return 0;
    }

    let sorter = AttributeSorter::from_settings(settings);
    let start_tags = locate(buffer.text());
    let mut rewritten = 0;

    for tag in start_tags.into_iter().rev() {
        let sorted = match sorter.sort_tag(buffer.substr(tag.span())) {
            Cow::Owned(sorted) => sorted,
            Cow::Borrowed(_) => continue,
        };

        log::trace!(
            target: "sort_html_attr.sorter",
            "rewriting start tag at {}..{}",
            tag.start,
            tag.end()
        );
        buffer.replace(tag.span(), &sorted);
        rewritten += 1;
    }

    log::debug!(
        target: "sort_html_attr.sorter",
        "rewrote {rewritten} start tags"
    );

    rewritten
}

/// Save hook: sorts the buffer when `sort_on_save` is enabled.
pub fn on_pre_save<B: EditorBuffer + ?Sized>(buffer: &mut B, settings: &Settings) -> usize {
    if !settings.sort_on_save {
        return 0;
    }

    run_command(buffer, settings)
}

#[cfg(test)]
mod test {
    use super::*;

    fn settings(priority: &[&str]) -> Settings {
        Settings {
            priority: priority.iter().map(|name| name.to_string()).collect(),
            allowed_syntaxes: vec!["HTML".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_run_command() {
        let mut buffer = StringBuffer::new(
            "Packages/HTML/HTML.sublime-syntax",
            r#"<div class="a" id="b" data-x="1"><span lang=en title=t id=s>x</span></div>"#,
        );
        assert_eq!(run_command(&mut buffer, &settings(&["id", "class"])), 2);
        assert_eq!(
            buffer.text(),
            r#"<div id="b" class="a" data-x="1"><span id=s lang=en title=t>x</span></div>"#
        );
    }

    #[test]
    fn test_syntax_not_allowed() {
        let html = "<p b a>";
        let mut buffer = StringBuffer::new("Plain Text", html);
        assert_eq!(run_command(&mut buffer, &settings(&[])), 0);
        assert_eq!(buffer.text(), html);
    }

    #[test]
    fn test_on_pre_save() {
        let html = "<p b a>";

        let mut buffer = StringBuffer::new("HTML", html);
        assert_eq!(on_pre_save(&mut buffer, &settings(&[])), 0);
        assert_eq!(buffer.text(), html);

        let sort_on_save = Settings {
            sort_on_save: true,
            ..settings(&[])
        };
        assert_eq!(on_pre_save(&mut buffer, &sort_on_save), 1);
        assert_eq!(buffer.into_text(), "<p a b>");
    }

    #[test]
    fn test_matches_immutable_sort() {
        let html = "<a\n z=1\n y=2>\n<b c d>\n<e f=\"<g i h>\">";
        let settings = Settings {
            preserve_white_space: true,
            ..settings(&["y"])
        };

        let mut buffer = StringBuffer::new("HTML", html);
        run_command(&mut buffer, &settings);

        let sorted = AttributeSorter::from_settings(&settings).sort(html).into_owned();
        assert_eq!(buffer.into_text(), sorted);
    }
}

//! JavaScript bindings for editors hosted in a browser or in Node.
//!
//! ```js
//! import { HtmlAttributeSorter } from "sort-html-attr-wasm";
//!
//! const sorter = new HtmlAttributeSorter('{ "priority": ["id", "class"] }');
//! if (sorter.is_syntax_allowed(languageId)) {
//!     text = sorter.sort(text);
//! }
//! ```

extern crate wasm_bindgen;

use log::{LevelFilter, Log, Metadata, Record};
use sort_html_attr::{AttributeSorter, Settings, TextReplacement};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    // Use `js_namespace` here to bind `console.log(..)` instead of just
    // `log(..)`
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => (log(&format_args!($($t)*).to_string()))
}

struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            console_log!("[{} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Forwards sorter logging to `console.log`.
///
/// `level` is one of `"error"`, `"warn"`, `"info"`, `"debug"` or `"trace"`;
/// anything else turns logging off. Returns `false`, leaving the level
/// untouched, when some other logger was installed first.
#[wasm_bindgen]
pub fn enable_logging(level: &str) -> bool {
    static LOGGER: ConsoleLogger = ConsoleLogger;

    let installed = log::set_logger(&LOGGER).is_ok()
        || std::ptr::addr_eq(log::logger() as *const dyn Log, &LOGGER as *const ConsoleLogger);
    if installed {
        log::set_max_level(level.parse().unwrap_or(LevelFilter::Off));
    }
    installed
}

/// Re-expresses byte offsets as UTF-16 code unit offsets, which is how
/// JavaScript indexes strings. Replacements must be in descending order.
fn to_utf16_offsets(html: &str, replacements: Vec<TextReplacement>) -> Vec<TextReplacement> {
    let mut byte_at = 0;
    let mut utf16_at = 0;

    let mut converted: Vec<TextReplacement> = replacements
        .into_iter()
        .rev()
        .map(|replacement| {
            utf16_at += html[byte_at..replacement.start].encode_utf16().count();
            let length = html[replacement.span()].encode_utf16().count();
            let start = utf16_at;

            byte_at = replacement.start + replacement.length;
            utf16_at += length;
            TextReplacement::new(start, length, replacement.text)
        })
        .collect();
    converted.reverse();
    converted
}

#[wasm_bindgen]
pub struct HtmlAttributeSorter {
    settings: Settings,
    sorter: AttributeSorter,
}

#[wasm_bindgen]
impl HtmlAttributeSorter {
    /// Creates a sorter from the JSON settings text, or from the default
    /// settings when none is given.
    #[wasm_bindgen(constructor)]
    pub fn new(settings_json: Option<String>) -> Result<HtmlAttributeSorter, JsError> {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        let settings = match settings_json {
            Some(json) => Settings::from_json(&json)?,
            None => Settings::default(),
        };
        let sorter = AttributeSorter::from_settings(&settings);

        Ok(Self { settings, sorter })
    }

    pub fn is_syntax_allowed(&self, syntax: &str) -> bool {
        self.settings.is_syntax_allowed(syntax)
    }

    #[wasm_bindgen(getter)]
    pub fn sort_on_save(&self) -> bool {
        self.settings.sort_on_save
    }

    /// Sorts every start tag in `html`, regardless of syntax.
    pub fn sort(&self, html: &str) -> String {
        self.sorter.sort(html).into_owned()
    }

    /// Sorts every start tag in `html` when `syntax` is allowed, otherwise
    /// returns `html` unchanged.
    pub fn sort_for_syntax(&self, html: &str, syntax: &str) -> String {
        if self.is_syntax_allowed(syntax) {
            self.sort(html)
        } else {
            html.to_owned()
        }
    }

    /// Sorts a single start tag.
    pub fn sort_tag(&self, tag: &str) -> String {
        self.sorter.sort_tag(tag).into_owned()
    }

    /// The edits that sort `html` as a JSON array of
    /// `{ "start": number, "length": number, "text": string }`, last edit
    /// first. Offsets count UTF-16 code units, so they can be passed straight
    /// to `String.prototype.slice`.
    pub fn replacements(&self, html: &str) -> Result<String, JsError> {
        let replacements = to_utf16_offsets(html, self.sorter.replacements(html));
        Ok(serde_json::to_string(&replacements)?)
    }
}

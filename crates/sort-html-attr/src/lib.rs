//! Sorts the attributes of HTML and XML start tags by a priority list.
//!
//! ```
//! use sort_html_attr::{AttributeSorter, PriorityList, WhitespaceMode};
//!
//! let sorter = AttributeSorter::new(PriorityList::new(["id", "class"]), WhitespaceMode::Normalize);
//! assert_eq!(
//!     sorter.sort(r#"<p>Hi <a class="x" href="/" id="y">there</a></p>"#),
//!     r#"<p>Hi <a id="y" class="x" href="/">there</a></p>"#
//! );
//! ```

mod char_class;
mod macros;

pub mod attributes;
pub mod buffer;
pub mod errors;
pub mod priority;
pub mod reorder;
pub mod settings;
pub mod sorter;
pub mod str_fns;
pub mod tag_locator;

pub use buffer::{on_pre_save, run_command, EditorBuffer, StringBuffer};
pub use errors::SettingsError;
pub use priority::PriorityList;
pub use reorder::{reorder, WhitespaceMode};
pub use settings::Settings;
pub use sorter::{apply_replacements, AttributeSorter, TextReplacement};
pub use tag_locator::{locate, TagLocator, TagMatch};

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::SettingsError;
use crate::priority::PriorityList;
use crate::reorder::WhitespaceMode;
use crate::str_fns::{strip_json_comments, strip_trailing_commas, stripos};

/// User configuration, as stored in the editor's settings file.
///
/// ```json
/// {
///     // Attributes are ordered by their position in this list. "*" stands
///     // for every attribute that isn't named.
///     "priority": ["id", "class", "*", "onclick"],
///     "allowed_syntaxes": ["HTML", "XML"],
///     "preserve_white_space": false,
///     "sort_on_save": false,
/// }
/// ```
///
/// Missing keys and `null` values take their defaults. Unknown keys are
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Attribute names in the desired order. Defaults to empty, which sorts
    /// attributes by name.
    #[serde(deserialize_with = "null_as_default")]
    pub priority: Vec<String>,

    /// Sorting only runs when the buffer's syntax name contains one of these,
    /// ignoring case. Defaults to `["HTML", "XML"]`.
    #[serde(deserialize_with = "null_as_default_syntaxes")]
    pub allowed_syntaxes: Vec<String>,

    /// Keep the whitespace between attributes instead of rejoining them with
    /// single spaces. Defaults to `false`.
    #[serde(alias = "preserve_whitespace", deserialize_with = "null_as_default")]
    pub preserve_white_space: bool,

    /// Sort before the buffer is saved. Defaults to `false`.
    #[serde(deserialize_with = "null_as_default")]
    pub sort_on_save: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            priority: Vec::new(),
            allowed_syntaxes: default_allowed_syntaxes(),
            preserve_white_space: false,
            sort_on_save: false,
        }
    }
}

fn default_allowed_syntaxes() -> Vec<String> {
    vec!["HTML".to_string(), "XML".to_string()]
}

fn null_as_default_syntaxes<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_else(default_allowed_syntaxes))
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Settings {
    /// Parses settings from JSON, tolerating comments and trailing commas.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let json = strip_json_comments(json);
        let json = strip_trailing_commas(&json);
        Ok(serde_json::from_str(&json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::debug!(
            target: "sort_html_attr.settings",
            "loaded settings from {}: {:?}",
            path.display(),
            settings
        );
        Ok(settings)
    }

    /// Whether sorting applies to a buffer with the given syntax name.
    ///
    /// The syntax name matches when it contains any allowed syntax, ignoring
    /// case, so `"HTML"` allows `"Packages/HTML/HTML.sublime-syntax"` and
    /// `"text.html.vue"` alike. Non-ASCII names are compared by their
    /// Unicode upper case.
    pub fn is_syntax_allowed(&self, syntax: &str) -> bool {
        self.allowed_syntaxes.iter().any(|allowed| {
            if syntax.is_ascii() && allowed.is_ascii() {
                stripos(syntax, allowed, 0).is_some()
            } else {
                syntax.to_uppercase().contains(&allowed.to_uppercase())
            }
        })
    }

    pub fn priority_list(&self) -> PriorityList {
        PriorityList::new(&self.priority)
    }

    pub fn whitespace_mode(&self) -> WhitespaceMode {
        self.preserve_white_space.into()
    }
}

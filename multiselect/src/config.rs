//! Control options.
//!
//! Everything has a default, so hosts only set what they care about, either
//! through the `with_*` builders or by deserializing a camelCase JSON
//! document:
//!
//! ```
//! use multiselect::{Options, SelectionMode};
//!
//! let options = Options::from_json(r#"{ "mode": "multi", "maxDisplayItems": 2 }"#).unwrap();
//! assert_eq!(options.mode, SelectionMode::Multi);
//! assert_eq!(options.max_display_items, 2);
//! assert_eq!(options.row_height, 35);
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::selection::SelectionMode;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Single or multi selection. Fixed once the control is built.
    pub mode: SelectionMode,
    /// How many labels the summary shows before collapsing into `+N`.
    pub max_display_items: usize,
    /// Show the selection summary in the closed input.
    pub show_summary: bool,
    /// Height of one row.
    pub row_height: u32,
    /// Upper bound for the list viewport.
    pub max_viewport_height: u32,
    /// Height taken by the select-all header in multi mode.
    pub header_height: u32,
    /// Shown in the input when it would otherwise be empty.
    pub placeholder: String,
    pub presentation: Presentation,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            mode: SelectionMode::Single,
            max_display_items: 1,
            show_summary: false,
            row_height: 35,
            max_viewport_height: 400,
            header_height: 45,
            placeholder: "Select items...".into(),
            presentation: Presentation::default(),
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        let options: Options = serde_json::from_str(source)?;
        options.validate()?;
        Ok(options)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Options loaded from {}", path.display());
        Self::from_json(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.row_height == 0 {
            return Err(ConfigError::ZeroRowHeight);
        }
        Ok(())
    }

    pub fn with_mode(mut self, mode: SelectionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn multi(self) -> Self {
        self.with_mode(SelectionMode::Multi)
    }

    pub fn with_max_display_items(mut self, max: usize) -> Self {
        self.max_display_items = max;
        self
    }

    pub fn with_summary(mut self, show: bool) -> Self {
        self.show_summary = show;
        self
    }

    pub fn with_row_height(mut self, height: u32) -> Self {
        self.row_height = height;
        self
    }

    pub fn with_max_viewport_height(mut self, height: u32) -> Self {
        self.max_viewport_height = height;
        self
    }

    pub fn with_header_height(mut self, height: u32) -> Self {
        self.header_height = height;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_presentation(mut self, presentation: Presentation) -> Self {
        self.presentation = presentation;
        self
    }
}

/// Visual parameters handed through to the renderer untouched.
///
/// Values are whatever the host's renderer understands (CSS lengths, hex
/// colors, ...). The only thing the core decides is which of the row colors
/// applies, see [`Row::background`](crate::window::Row::background).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Presentation {
    pub width: String,
    pub height: String,
    pub input_height: String,
    pub background: String,
    pub text: String,
    pub hover: String,
    pub selected: String,
    pub checkmark: String,
    pub clear_button: String,
    pub item_padding: String,
    pub input_padding: String,
    pub input_font_size: String,
    pub dropdown_font_size: String,
    /// Extra panel style overrides.
    pub dropdown_styles: BTreeMap<String, String>,
}

impl Default for Presentation {
    fn default() -> Self {
        Self {
            width: "300px".into(),
            height: "400px".into(),
            input_height: "38px".into(),
            background: "#ffffff".into(),
            text: "#333333".into(),
            hover: "#f0f0f0".into(),
            selected: "#e0e0e0".into(),
            checkmark: "#2196f3".into(),
            clear_button: "#666".into(),
            item_padding: "8px 12px".into(),
            input_padding: "0 8px".into(),
            input_font_size: "14px".into(),
            dropdown_font_size: "14px".into(),
            dropdown_styles: BTreeMap::new(),
        }
    }
}

//! Shared row configuration.

use serde::{Deserialize, Serialize};

/// Presentation-independent state every row model carries.
///
/// Plain data. Hosts decide how a title is laid out, what a highlight looks
/// like, and where `no_value_display_text` lands; the models only keep the
/// flags consistent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RowConfig {
    /// Leading label text.
    pub title: Option<String>,
    /// A disabled row ignores editing gestures.
    pub disabled: bool,
    /// Set while the row is actively editing.
    pub highlighted: bool,
    /// Detail text shown when the row has no value.
    pub no_value_display_text: Option<String>,
}

impl RowConfig {
    /// A default config with a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

use serde::{Deserialize, Serialize};

/// Post being edited; persisted between sessions until published or reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Draft {
    /// Post title, plain text.
    pub title: String,
    /// Post content, editor HTML.
    pub content: String,
}

impl Draft {
    /// True when both fields are blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.trim().is_empty() && self.content.trim().is_empty()
    }

    /// Resets both fields.
    pub fn clear(&mut self) {
        self.title.clear();
        self.content.clear();
    }
}

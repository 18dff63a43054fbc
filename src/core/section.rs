use serde::Serialize;
use std::fmt;

/*-------------------------------------------------------------------------------------------------
  Section
-------------------------------------------------------------------------------------------------*/

/// A titled list of items (prefixes, peers, members, ...) that renders as a heading followed by
/// one line per item, or as a single "no data" message when the list is empty.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Section<T> {
    pub heading: String,
    pub empty_message: String,
    pub items: Vec<T>,
}

impl<T: fmt::Display> Section<T> {
    pub fn new(heading: impl Into<String>, empty_message: impl Into<String>, items: Vec<T>) -> Self {
        Self {
            heading: heading.into(),
            empty_message: empty_message.into(),
            items,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Rendered lines; never empty.
    pub fn lines(&self) -> Vec<String> {
        if self.items.is_empty() {
            return vec![self.empty_message.clone()];
        }

        std::iter::once(self.heading.clone())
            .chain(self.items.iter().map(ToString::to_string))
            .collect()
    }

    pub(crate) fn block(&self, title: impl Into<String>) -> TextBlock {
        TextBlock {
            title: title.into(),
            lines: self.lines(),
            empty: self.is_empty(),
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Text Block
-------------------------------------------------------------------------------------------------*/

/// Rendered output for one part of a record.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TextBlock {
    pub title: String,
    pub lines: Vec<String>,

    /// Set when the block only carries a "no data" message.
    pub empty: bool,
}

impl TextBlock {
    pub(crate) fn single(title: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: vec![line.into()],
            empty: false,
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

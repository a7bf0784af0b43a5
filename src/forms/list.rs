//! Editor for ordered free-text collections (deliverables, criteria, terms,
//! products/services). The editor always shows at least one editable row;
//! the value it reports upward is the blank-filtered sequence.

/// Ordered collection of free-text entries with add/edit/remove mutations.
///
/// Mutations cannot fail; the worst outcome is an empty reported value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEditor {
    rows: Vec<String>,
}

impl Default for ListEditor {
    fn default() -> Self {
        Self {
            rows: vec![String::new()],
        }
    }
}

impl ListEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows currently displayed to the user, blanks included.
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Append one empty row at the tail for continued typing.
    pub fn add_entry(&mut self) {
        self.rows.push(String::new());
    }

    /// Replace the row at `index`; out-of-range indexes are ignored.
    pub fn edit_entry(&mut self, index: usize, value: impl Into<String>) {
        if let Some(row) = self.rows.get_mut(index) {
            *row = value.into();
        }
        self.compact();
    }

    /// Remove the row at `index`; out-of-range indexes are ignored.
    pub fn remove_entry(&mut self, index: usize) {
        if index < self.rows.len() {
            self.rows.remove(index);
        }
        self.compact();
    }

    /// The externally-observed value: trimmed non-blank entries in display
    /// order. This is what gets written into the owning form session.
    pub fn values(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| row.trim())
            .filter(|row| !row.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }

    /// Drop blank rows after an edit or removal, keeping one editable row
    /// on screen when everything was filtered away.
    fn compact(&mut self) {
        self.rows.retain(|row| !row.trim().is_empty());
        if self.rows.is_empty() {
            self.rows.push(String::new());
        }
    }
}

use crate::journal::api::{Entry, JournalError};

/// Read-only forward cursor over a snapshot slice of journal entries.
///
/// The backing slice is captured at construction; appends made to the journal
/// afterwards are not visible through an existing iterator.
#[derive(Debug)]
pub struct JournalIterator {
    entries: Vec<Entry>,
    cursor: usize,
}

impl JournalIterator {
    pub(super) fn new(entries: Vec<Entry>) -> Self {
        JournalIterator { entries, cursor: 0 }
    }

    pub(super) fn empty() -> Self {
        JournalIterator::new(Vec::new())
    }

    /// Number of entries in the snapshot, independent of cursor position.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn has_next(&self) -> bool {
        self.cursor < self.entries.len()
    }

    /// Returns the entry under the cursor and advances. Fails with
    /// `NoMoreElements` once the snapshot is exhausted.
    pub fn next(&mut self) -> Result<Entry, JournalError> {
        if !self.has_next() {
            return Err(JournalError::NoMoreElements);
        }

        let entry = self.entries[self.cursor].clone();
        self.cursor += 1;
        Ok(entry)
    }
}

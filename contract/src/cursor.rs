//! Scoped ownership of a range-scan cursor.
//!
//! A `StateCursor` holds backend iteration state that must be released
//! before the operation that opened it returns. `CursorGuard` closes the
//! cursor when dropped, so early returns via `?` and panics release it
//! too. The success path calls [`CursorGuard::close`] explicitly.

use ledgerstore_hostapi::{HostError, KeyValue, StateCursor};

/// Owns a cursor and closes it exactly once.
pub struct CursorGuard<'a> {
    cursor: Box<dyn StateCursor + 'a>,
    closed: bool,
}

impl<'a> CursorGuard<'a> {
    pub fn new(cursor: Box<dyn StateCursor + 'a>) -> Self {
        Self {
            cursor,
            closed: false,
        }
    }

    /// Returns true if another entry is available.
    pub fn has_next(&mut self) -> bool {
        !self.closed && self.cursor.has_next()
    }

    /// Advance the cursor.
    pub fn next_entry(&mut self) -> Result<KeyValue, HostError> {
        if self.closed {
            return Err(HostError::cursor_closed());
        }
        self.cursor.next_entry()
    }

    /// Close the cursor now.
    ///
    /// A close failure is returned here but the guard still counts the
    /// cursor as released and will not retry on drop.
    pub fn close(mut self) -> Result<(), HostError> {
        self.release()
    }

    fn release(&mut self) -> Result<(), HostError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.cursor.close()
    }
}

impl Drop for CursorGuard<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.release() {
            tracing::warn!(error = %err, "failed to close range cursor");
        }
    }
}

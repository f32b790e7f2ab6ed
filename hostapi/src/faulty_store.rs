//! Failure-injecting world state for testing error paths.
//!
//! `FaultyStore` wraps another `WorldState` and fails reads, writes, or
//! range scans on demand. It also counts cursors that were opened but not
//! yet closed, so tests can assert that every exit path releases its
//! cursor.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::HostError;
use crate::state_store::{KeyValue, StateCursor, WorldState};

/// `WorldState` wrapper with configurable failures.
#[derive(Debug)]
pub struct FaultyStore<S> {
    inner: S,
    /// Keys whose `get` fails.
    failing_reads: BTreeSet<String>,
    /// Number of successful `put` calls allowed before every further put fails.
    writes_allowed: Option<usize>,
    writes_done: usize,
    /// Fail `range_scan` itself.
    fail_scan_setup: bool,
    /// Number of entries a cursor yields before `next_entry` fails.
    fail_scan_after: Option<usize>,
    /// Fail `close` on every cursor.
    fail_close: bool,
    open_cursors: Arc<AtomicUsize>,
}

impl<S: WorldState> FaultyStore<S> {
    /// Wrap `inner` with no failures configured.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            failing_reads: BTreeSet::new(),
            writes_allowed: None,
            writes_done: 0,
            fail_scan_setup: false,
            fail_scan_after: None,
            fail_close: false,
            open_cursors: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Make `get` fail for `key`.
    pub fn fail_read(mut self, key: impl Into<String>) -> Self {
        self.failing_reads.insert(key.into());
        self
    }

    /// Allow `n` more successful writes, then fail every subsequent write.
    pub fn fail_writes_after(mut self, n: usize) -> Self {
        self.writes_allowed = Some(self.writes_done + n);
        self
    }

    /// Make `range_scan` fail before returning a cursor.
    pub fn fail_scan_setup(mut self) -> Self {
        self.fail_scan_setup = true;
        self
    }

    /// Make cursors fail after yielding `n` entries.
    pub fn fail_scan_after(mut self, n: usize) -> Self {
        self.fail_scan_after = Some(n);
        self
    }

    /// Make `close` fail on every cursor. The cursor still counts as released.
    pub fn fail_close(mut self) -> Self {
        self.fail_close = true;
        self
    }

    /// Number of cursors opened and not yet closed.
    pub fn open_cursors(&self) -> usize {
        self.open_cursors.load(Ordering::SeqCst)
    }

    /// Number of successful writes so far.
    pub fn writes_done(&self) -> usize {
        self.writes_done
    }

    /// Access the wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Consume the wrapper and return the wrapped store.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: WorldState> WorldState for FaultyStore<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, HostError> {
        if self.failing_reads.contains(key) {
            return Err(HostError::internal(format!("injected read failure for {key}")));
        }
        self.inner.get(key)
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), HostError> {
        if let Some(allowed) = self.writes_allowed {
            if self.writes_done >= allowed {
                return Err(HostError::internal(format!("injected write failure for {key}")));
            }
        }
        self.inner.put(key, value)?;
        self.writes_done += 1;
        Ok(())
    }

    fn range_scan<'a>(
        &'a self,
        start: &str,
        end: &str,
    ) -> Result<Box<dyn StateCursor + 'a>, HostError> {
        if self.fail_scan_setup {
            return Err(HostError::internal("injected range scan failure"));
        }
        let inner = self.inner.range_scan(start, end)?;
        self.open_cursors.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FaultyCursor {
            inner,
            yielded: 0,
            fail_after: self.fail_scan_after,
            fail_close: self.fail_close,
            open_cursors: Arc::clone(&self.open_cursors),
            closed: false,
        }))
    }
}

struct FaultyCursor<'a> {
    inner: Box<dyn StateCursor + 'a>,
    yielded: usize,
    fail_after: Option<usize>,
    fail_close: bool,
    open_cursors: Arc<AtomicUsize>,
    closed: bool,
}

impl StateCursor for FaultyCursor<'_> {
    fn has_next(&mut self) -> bool {
        self.inner.has_next()
    }

    fn next_entry(&mut self) -> Result<KeyValue, HostError> {
        if self.fail_after.is_some_and(|n| self.yielded >= n) {
            return Err(HostError::internal("injected iteration failure"));
        }
        let entry = self.inner.next_entry()?;
        self.yielded += 1;
        Ok(entry)
    }

    fn close(&mut self) -> Result<(), HostError> {
        if !self.closed {
            self.closed = true;
            self.open_cursors.fetch_sub(1, Ordering::SeqCst);
        }
        self.inner.close()?;
        if self.fail_close {
            return Err(HostError::internal("injected close failure"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mem_store::MemStore;

    fn seeded() -> MemStore {
        let mut store = MemStore::new();
        store.insert("a", b"1".to_vec());
        store.insert("b", b"2".to_vec());
        store.insert("c", b"3".to_vec());
        store
    }

    #[test]
    fn test_passthrough() {
        let mut store = FaultyStore::new(MemStore::new());
        store.put("k", b"v").unwrap();
        assert_eq!(store.get("k").unwrap(), Some(b"v".to_vec()));
        assert_eq!(store.writes_done(), 1);
    }

    #[test]
    fn test_fail_read() {
        let store = FaultyStore::new(seeded()).fail_read("b");
        assert!(store.get("a").unwrap().is_some());
        assert!(store.get("b").is_err());
    }

    #[test]
    fn test_fail_writes_after() {
        let mut store = FaultyStore::new(MemStore::new()).fail_writes_after(2);
        store.put("k0", b"v").unwrap();
        store.put("k1", b"v").unwrap();
        assert!(store.put("k2", b"v").is_err());
        assert_eq!(store.inner().len(), 2);
    }

    #[test]
    fn test_open_cursor_tracking() {
        let store = FaultyStore::new(seeded());
        let mut cursor = store.range_scan("", "").unwrap();
        assert_eq!(store.open_cursors(), 1);
        cursor.close().unwrap();
        assert_eq!(store.open_cursors(), 0);
    }

    #[test]
    fn test_fail_scan_after() {
        let store = FaultyStore::new(seeded()).fail_scan_after(1);
        let mut cursor = store.range_scan("", "").unwrap();
        assert_eq!(cursor.next_entry().unwrap().key, "a");
        assert!(cursor.has_next());
        assert!(cursor.next_entry().is_err());
        cursor.close().unwrap();
        assert_eq!(store.open_cursors(), 0);
    }

    #[test]
    fn test_fail_scan_setup_opens_nothing() {
        let store = FaultyStore::new(seeded()).fail_scan_setup();
        assert!(store.range_scan("", "").is_err());
        assert_eq!(store.open_cursors(), 0);
    }

    #[test]
    fn test_fail_close_still_releases() {
        let store = FaultyStore::new(seeded()).fail_close();
        let mut cursor = store.range_scan("", "").unwrap();
        assert!(cursor.close().is_err());
        assert_eq!(store.open_cursors(), 0);
    }
}

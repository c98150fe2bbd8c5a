use crate::domain::BridgeState;
use crate::foundation::Result;
use crate::infrastructure::storage::StateStore;
use crate::storage_err;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

/// Copy-on-write state cell.
///
/// Readers clone the committed `Arc`; a writer clones the state behind it, mutates the clone and
/// swaps it in on success. Cloning the state only bumps the sub-store reference counts, so a
/// transition copies just the sub-stores it mutates.
pub struct MemoryStateStore {
    committed: RwLock<Arc<BridgeState>>,
    writer: Mutex<()>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::with_state(BridgeState::default())
    }

    pub fn with_state(state: BridgeState) -> Self {
        Self { committed: RwLock::new(Arc::new(state)), writer: Mutex::new(()) }
    }

    fn lock_writer(&self) -> Result<MutexGuard<'_, ()>> {
        self.writer.lock().map_err(|_| storage_err!("memory state writer lock", "poisoned"))
    }

    /// Same as `apply`, with `before_commit(committed, next)` run while the writer lock is still
    /// held. An error from the hook discards the copy.
    pub(crate) fn apply_with(
        &self,
        mutation: &mut dyn FnMut(&mut BridgeState) -> Result<()>,
        before_commit: impl FnOnce(&BridgeState, &BridgeState) -> Result<()>,
    ) -> Result<()> {
        let _writer = self.lock_writer()?;
        let committed = self.snapshot()?;
        let mut working = (*committed).clone();
        mutation(&mut working)?;
        before_commit(&committed, &working)?;

        let mut committed = self.committed.write().map_err(|_| storage_err!("memory state commit", "poisoned"))?;
        *committed = Arc::new(working);
        Ok(())
    }
}

impl Default for MemoryStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore for MemoryStateStore {
    fn snapshot(&self) -> Result<Arc<BridgeState>> {
        let committed = self.committed.read().map_err(|_| storage_err!("memory state read", "poisoned"))?;
        Ok(Arc::clone(&committed))
    }

    fn apply(&self, mutation: &mut dyn FnMut(&mut BridgeState) -> Result<()>) -> Result<()> {
        self.apply_with(mutation, |_, _| Ok(()))
    }
}

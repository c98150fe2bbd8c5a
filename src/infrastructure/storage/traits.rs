use crate::domain::BridgeState;
use crate::foundation::Result;
use crate::storage_err;
use std::sync::Arc;

/// Committed bridge state plus a serialized, all-or-nothing write path.
pub trait StateStore: Send + Sync {
    /// Point-in-time view of the last committed state. Never observes a half-applied mutation.
    fn snapshot(&self) -> Result<Arc<BridgeState>>;

    /// Runs `mutation` against a private copy of the committed state and publishes the copy only
    /// when the mutation returns `Ok`. Mutations are applied one at a time.
    fn apply(&self, mutation: &mut dyn FnMut(&mut BridgeState) -> Result<()>) -> Result<()>;

    fn health_check(&self) -> Result<()> {
        self.snapshot().map(|_| ())
    }
}

/// Applies `mutation` through `store`, handing its return value back to the caller.
pub fn transact<T>(store: &dyn StateStore, mutation: impl FnOnce(&mut BridgeState) -> Result<T>) -> Result<T> {
    let mut mutation = Some(mutation);
    let mut output = None;
    store.apply(&mut |state| {
        let run = mutation.take().ok_or_else(|| storage_err!("transact", "mutation invoked twice"))?;
        output = Some(run(state)?);
        Ok(())
    })?;
    output.ok_or_else(|| storage_err!("transact", "mutation produced no result"))
}

//! File-backed state store.
//!
//! Same transactional semantics as `MemoryStateStore`. Each sub-store lives in its own bincode
//! file `<part>-<generation>.bin` in the data dir, and a manifest records which generation of
//! every part is current. A commit writes only the parts whose `Arc` the transition replaced,
//! then renames a new manifest into place. That rename is the commit point: a crash before it
//! leaves the previous manifest and the files it names untouched.

use crate::domain::BridgeState;
use crate::foundation::{BridgeError, Result, STATE_SCHEMA_VERSION};
use crate::infrastructure::storage::{MemoryStateStore, StateStore};
use crate::storage_err;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

pub const MANIFEST_FILE_NAME: &str = "bridge-state.manifest";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StatePart {
    Pool,
    Valsets,
    Batches,
    Confirmations,
    Denominators,
}

impl StatePart {
    const ALL: [StatePart; 5] =
        [StatePart::Pool, StatePart::Valsets, StatePart::Batches, StatePart::Confirmations, StatePart::Denominators];

    fn name(self) -> &'static str {
        match self {
            StatePart::Pool => "pool",
            StatePart::Valsets => "valsets",
            StatePart::Batches => "batches",
            StatePart::Confirmations => "confirmations",
            StatePart::Denominators => "denominators",
        }
    }

    fn changed(self, before: &BridgeState, after: &BridgeState) -> bool {
        match self {
            StatePart::Pool => !Arc::ptr_eq(&before.pool, &after.pool),
            StatePart::Valsets => !Arc::ptr_eq(&before.valsets, &after.valsets),
            StatePart::Batches => !Arc::ptr_eq(&before.batches, &after.batches),
            StatePart::Confirmations => !Arc::ptr_eq(&before.confirmations, &after.confirmations),
            StatePart::Denominators => !Arc::ptr_eq(&before.denominators, &after.denominators),
        }
    }

    fn encode(self, state: &BridgeState) -> Result<Vec<u8>> {
        let bytes = match self {
            StatePart::Pool => bincode::serialize(&*state.pool)?,
            StatePart::Valsets => bincode::serialize(&*state.valsets)?,
            StatePart::Batches => bincode::serialize(&*state.batches)?,
            StatePart::Confirmations => bincode::serialize(&*state.confirmations)?,
            StatePart::Denominators => bincode::serialize(&*state.denominators)?,
        };
        Ok(bytes)
    }

    fn decode_into(self, bytes: &[u8], state: &mut BridgeState) -> Result<()> {
        match self {
            StatePart::Pool => state.pool = Arc::new(bincode::deserialize(bytes)?),
            StatePart::Valsets => state.valsets = Arc::new(bincode::deserialize(bytes)?),
            StatePart::Batches => state.batches = Arc::new(bincode::deserialize(bytes)?),
            StatePart::Confirmations => state.confirmations = Arc::new(bincode::deserialize(bytes)?),
            StatePart::Denominators => state.denominators = Arc::new(bincode::deserialize(bytes)?),
        }
        Ok(())
    }

    fn file_name(self, generation: u64) -> String {
        format!("{}-{}.bin", self.name(), generation)
    }
}

/// Current generation per part. Parts never written are absent and load as empty.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
struct StateManifest {
    generation: u64,
    parts: BTreeMap<String, u64>,
}

pub struct FileStateStore {
    dir: PathBuf,
    manifest: Mutex<StateManifest>,
    inner: MemoryStateStore,
}

impl FileStateStore {
    /// Opens the store in `data_dir`, creating the directory if needed and loading the committed
    /// state if a manifest exists.
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
        let dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|err| storage_err!("create data dir", err))?;

        let manifest_path = dir.join(MANIFEST_FILE_NAME);
        let (manifest, state) = if manifest_path.exists() {
            let (manifest, state) = load_state(&dir, &manifest_path)?;
            info!(
                "loaded bridge state dir={} generation={} pool_len={} valsets={} batches={}",
                dir.display(),
                manifest.generation,
                state.pool.len(),
                state.valsets.len(),
                state.batches.len()
            );
            (manifest, state)
        } else {
            info!("initializing fresh bridge state dir={} schema_version={}", dir.display(), STATE_SCHEMA_VERSION);
            (StateManifest::default(), BridgeState::default())
        };
        Ok(Self { dir, manifest: Mutex::new(manifest), inner: MemoryStateStore::with_state(state) })
    }

    pub fn data_dir(&self) -> &Path {
        &self.dir
    }

    fn lock_manifest(&self) -> Result<MutexGuard<'_, StateManifest>> {
        self.manifest.lock().map_err(|_| storage_err!("state manifest lock", "poisoned"))
    }

    fn persist_changes(&self, before: &BridgeState, after: &BridgeState) -> Result<()> {
        let changed: Vec<StatePart> = StatePart::ALL.into_iter().filter(|part| part.changed(before, after)).collect();
        if changed.is_empty() {
            return Ok(());
        }

        let mut manifest = self.lock_manifest()?;
        let mut next = manifest.clone();
        next.generation = manifest.generation.checked_add(1).ok_or_else(|| BridgeError::overflow("state generation"))?;

        let mut bytes_written = 0usize;
        for part in &changed {
            let bytes = part.encode(after)?;
            write_synced(&self.dir.join(part.file_name(next.generation)), &bytes)?;
            next.parts.insert(part.name().to_string(), next.generation);
            bytes_written += bytes.len();
        }

        // schema version first, so a reader can check it before decoding the rest
        let manifest_bytes = bincode::serialize(&(STATE_SCHEMA_VERSION, &next))?;
        let tmp_path = self.dir.join(format!("{}.tmp", MANIFEST_FILE_NAME));
        write_synced(&tmp_path, &manifest_bytes)?;
        fs::rename(&tmp_path, self.dir.join(MANIFEST_FILE_NAME)).map_err(|err| storage_err!("rename state manifest", err))?;

        for part in &changed {
            if let Some(previous) = manifest.parts.get(part.name()) {
                let stale = self.dir.join(part.file_name(*previous));
                if let Err(err) = fs::remove_file(&stale) {
                    warn!("failed to remove superseded state file path={} error={}", stale.display(), err);
                }
            }
        }

        debug!(
            "persisted bridge state dir={} generation={} parts={:?} bytes={}",
            self.dir.display(),
            next.generation,
            changed.iter().map(|part| part.name()).collect::<Vec<_>>(),
            bytes_written
        );
        *manifest = next;
        Ok(())
    }
}

impl StateStore for FileStateStore {
    fn snapshot(&self) -> Result<Arc<BridgeState>> {
        self.inner.snapshot()
    }

    fn apply(&self, mutation: &mut dyn FnMut(&mut BridgeState) -> Result<()>) -> Result<()> {
        self.inner.apply_with(mutation, |before, after| self.persist_changes(before, after))
    }

    fn health_check(&self) -> Result<()> {
        if !self.dir.is_dir() {
            return Err(storage_err!("health check", format!("state directory missing: {}", self.dir.display())));
        }
        self.inner.health_check()
    }
}

fn load_state(dir: &Path, manifest_path: &Path) -> Result<(StateManifest, BridgeState)> {
    let bytes = fs::read(manifest_path).map_err(|err| storage_err!("read state manifest", err))?;
    let stored: u32 = bincode::deserialize(&bytes)?;
    if stored != STATE_SCHEMA_VERSION {
        return Err(BridgeError::SchemaMismatch { stored, current: STATE_SCHEMA_VERSION });
    }
    let (_, manifest): (u32, StateManifest) = bincode::deserialize(&bytes)?;

    let mut state = BridgeState::default();
    for part in StatePart::ALL {
        if let Some(generation) = manifest.parts.get(part.name()) {
            let path = dir.join(part.file_name(*generation));
            let bytes = fs::read(&path).map_err(|err| storage_err!(format!("read state part {}", path.display()), err))?;
            part.decode_into(&bytes, &mut state)?;
        }
    }
    Ok((manifest, state))
}

fn write_synced(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|err| storage_err!("create state file", err))?;
    file.write_all(bytes).map_err(|err| storage_err!("write state file", err))?;
    file.sync_all().map_err(|err| storage_err!("sync state file", err))?;
    Ok(())
}

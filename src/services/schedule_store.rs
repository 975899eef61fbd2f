use std::fs::create_dir_all;
use std::path::Path;

use heed::{Database, Env, EnvFlags, EnvOpenOptions, RwTxn};
use tracing::{debug, info};

use crate::types::{
    error::{ResultExt, SchedulerError},
    structs::schedule_key::{FreqCodec, ScheduleKey, ScheduleKeyCodec},
};

type ScheduleDb = Database<ScheduleKeyCodec, FreqCodec>;

const PAGE_SIZE: usize = 4096;

// Persistent ordered schedule over LMDB. The key codec makes bytewise order
// equal ascending (score, hash), so the default comparator is the schedule
// comparator and never needs re-registering per transaction.
pub struct ScheduleStore {
    env: Env,
    db: ScheduleDb,
}

impl ScheduleStore {
    // Opens (creating if needed) the schedule environment. Syncs are off:
    // a process crash survives, power loss may lose the last transaction.
    pub fn open(path: &Path, map_size: usize) -> Result<Self, SchedulerError> {
        create_dir_all(path)?;

        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(1)
                .flags(EnvFlags::NO_TLS | EnvFlags::NO_SYNC)
                .open(path)
        }
        .context("opening schedule environment")?;

        let db = {
            let mut txn = env.write_txn().context("starting schedule transaction")?;
            let db = env
                .create_database::<ScheduleKeyCodec, FreqCodec>(&mut txn, Some("schedule"))
                .context("opening schedule database")?;
            txn.commit().context("committing schedule transaction")?;
            db
        };

        info!(path = %path.display(), "schedule store open");
        Ok(Self { env, db })
    }

    // One read-write session; LMDB serialises writers, so at most one of
    // these is live per environment.
    pub fn session(&self) -> Result<ScheduleSession<'_>, SchedulerError> {
        let txn = self
            .env
            .write_txn()
            .context("starting schedule transaction")?;

        Ok(ScheduleSession { txn, db: self.db })
    }

    // Grow the map so at least `min_size` bytes fit. Never shrinks; no-op
    // when the map is already large enough.
    pub fn expand(&self, min_size: usize) -> Result<(), SchedulerError> {
        let current = self.env.info().map_size;
        if min_size <= current {
            return Ok(());
        }

        // LMDB wants a page-multiple map size
        let new_size = min_size.div_ceil(PAGE_SIZE) * PAGE_SIZE;
        unsafe { self.env.resize(new_size) }.context("resizing schedule map")?;

        debug!(from = current, to = new_size, "expanded schedule map");
        Ok(())
    }

    // Snapshot of the whole schedule in ascending (score, hash) order.
    pub fn entries(&self) -> Result<Vec<(ScheduleKey, f32)>, SchedulerError> {
        let txn = self.env.read_txn().context("starting schedule transaction")?;
        let mut entries = Vec::new();

        for item in self
            .db
            .iter(&txn)
            .context("iterating over schedule")?
        {
            entries.push(item.context("iterating over schedule")?);
        }

        Ok(entries)
    }
}

// Scoped transactional access to the schedule. Committing consumes the
// session; dropping it without commit aborts the transaction, which is also
// the cleanup on every error path.
pub struct ScheduleSession<'env> {
    txn: RwTxn<'env>,
    db: ScheduleDb,
}

impl ScheduleSession<'_> {
    // Entry with the smallest (score, hash), decoded by value so the caller
    // never holds pointers into the map across a mutation.
    pub fn first(&self) -> Result<Option<(ScheduleKey, f32)>, SchedulerError> {
        self.db.first(&self.txn).context("getting head of schedule")
    }

    // No-op when freq is not positive: the schedule only holds entries it
    // can derive a revisit period for.
    pub fn insert(&mut self, key: &ScheduleKey, freq: f32) -> Result<(), SchedulerError> {
        if freq <= 0.0 {
            return Ok(());
        }

        self.db
            .put(&mut self.txn, key, &freq)
            .context("adding page to schedule")
    }

    pub fn remove(&mut self, key: &ScheduleKey) -> Result<bool, SchedulerError> {
        self.db
            .delete(&mut self.txn, key)
            .context("deleting entry from schedule")
    }

    pub fn commit(self) -> Result<(), SchedulerError> {
        self.txn
            .commit()
            .context("committing schedule transaction")
    }
}

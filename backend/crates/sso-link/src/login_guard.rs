//! Per-external-id critical section around login resolution.
//!
//! Two callbacks for the same never-seen external id (double click, replayed
//! redirect) would otherwise both reach the provisioning branch and create two
//! accounts. Holding a permit serializes them, so the second one finds the
//! link written by the first. Only covers callers inside this process.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type Slots = Arc<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>>;

#[derive(Clone, Default)]
pub struct LoginGuard {
    slots: Slots,
}

impl LoginGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `key`.
    pub async fn acquire(&self, key: &str) -> LoginPermit {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(|p| p.into_inner());
            slots
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };

        let guard = slot.lock_owned().await;

        LoginPermit {
            key: key.to_string(),
            slots: Arc::clone(&self.slots),
            _guard: guard,
        }
    }

    /// Keys currently held or awaited
    pub fn in_flight(&self) -> usize {
        self.slots.lock().unwrap_or_else(|p| p.into_inner()).len()
    }
}

/// Exclusive access to one key; released on drop.
pub struct LoginPermit {
    key: String,
    slots: Slots,
    _guard: OwnedMutexGuard<()>,
}

impl Drop for LoginPermit {
    fn drop(&mut self) {
        let mut slots = self.slots.lock().unwrap_or_else(|p| p.into_inner());

        // One reference in the map, one held by our guard: nobody is waiting.
        if let Some(slot) = slots.get(&self.key)
            && Arc::strong_count(slot) <= 2
        {
            slots.remove(&self.key);
        }
    }
}

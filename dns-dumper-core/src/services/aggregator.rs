//! Result aggregation

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::{CoreError, CoreResult};
use crate::types::{LookupOutcome, RecordType, ScanResult, Target, TargetResult};

struct Slot {
    target: Target,
    outcomes: HashMap<RecordType, LookupOutcome>,
}

#[derive(Default)]
struct State {
    slots: Vec<Slot>,
    index: HashMap<String, usize>,
    finalized: bool,
}

impl State {
    fn slot_for(&mut self, target: &Target) -> &mut Slot {
        let idx = if let Some(&idx) = self.index.get(&target.name) {
            idx
        } else {
            self.slots.push(Slot {
                target: target.clone(),
                outcomes: HashMap::new(),
            });
            let idx = self.slots.len() - 1;
            self.index.insert(target.name.clone(), idx);
            idx
        };
        &mut self.slots[idx]
    }
}

/// Folds lookup outcomes into one ordered [`ScanResult`].
///
/// `add` may be called from many tasks at once; calls are serialized on an
/// internal mutex. Targets keep registration order and each target's outcomes
/// are exposed in canonical [`RecordType`] order, so the result does not
/// depend on completion order.
pub struct Aggregator {
    domain: String,
    timestamp: String,
    state: Mutex<State>,
}

impl Aggregator {
    #[must_use]
    pub fn new(domain: &str) -> Self {
        Self::with_timestamp(domain, chrono::Local::now().to_rfc3339())
    }

    #[must_use]
    pub fn with_timestamp(domain: &str, timestamp: String) -> Self {
        Self {
            domain: domain.to_string(),
            timestamp,
            state: Mutex::new(State::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reserve a position for `target` ahead of its outcomes.
    ///
    /// Registering an already known target is a no-op.
    pub fn register(&self, target: &Target) -> CoreResult<()> {
        let mut state = self.lock();
        if state.finalized {
            return Err(CoreError::InvalidState(format!(
                "register({}) after finalize",
                target.name
            )));
        }
        state.slot_for(target);
        Ok(())
    }

    /// Record one outcome. A second outcome for the same (target, type) pair
    /// replaces the first.
    pub fn add(&self, outcome: LookupOutcome) -> CoreResult<()> {
        let mut state = self.lock();
        if state.finalized {
            return Err(CoreError::InvalidState(format!(
                "add({} {}) after finalize",
                outcome.target.name, outcome.record_type
            )));
        }
        let slot = state.slot_for(&outcome.target);
        slot.outcomes.insert(outcome.record_type, outcome);
        Ok(())
    }

    /// Number of outcomes held so far.
    pub fn len(&self) -> usize {
        self.lock().slots.iter().map(|s| s.outcomes.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Produce the final result. Further `add`, `register` or `finalize`
    /// calls fail with [`CoreError::InvalidState`].
    pub fn finalize(&self) -> CoreResult<ScanResult> {
        let mut state = self.lock();
        if state.finalized {
            return Err(CoreError::InvalidState(
                "finalize called twice".to_string(),
            ));
        }
        state.finalized = true;
        state.index.clear();

        let targets = std::mem::take(&mut state.slots)
            .into_iter()
            .map(|slot| {
                let mut outcomes: Vec<LookupOutcome> = slot.outcomes.into_values().collect();
                outcomes.sort_by_key(|o| o.record_type);
                TargetResult {
                    target: slot.target,
                    outcomes,
                }
            })
            .collect();

        Ok(ScanResult::new(
            self.domain.clone(),
            self.timestamp.clone(),
            targets,
        ))
    }
}

// SPDX-FileCopyrightText: 2026 Mocap Link contributors
// SPDX-License-Identifier: LicenseRef-MocapLink-Proprietary
//
// All rights reserved.
//
// This file is part of Mocap Link and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;

use log::debug;

use super::broadcast::UpdateBroadcaster;
use crate::model::{AttributeRecord, GlobalIndex, IndexError, IndexRange, IndexSpace};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushReport {
    /// Distinct indices delivered to the broadcaster.
    pub notified: usize,
    /// Consumer updates that changed at least one element.
    pub applied: usize,
    /// Consumer updates that were filtered as not-ours or missing.
    pub skipped: usize,
}

/// One attribute record per global index; the only writer of selection state.
///
/// Mutations mark indices dirty instead of notifying right away. `flush` delivers each dirty
/// index once, with its latest value, so intermediate states written during the same cycle never
/// reach consumers.
#[derive(Debug, Clone)]
pub struct AttributeStore {
    index_space: IndexSpace,
    records: Vec<AttributeRecord>,
    dirty: BTreeSet<GlobalIndex>,
}

impl AttributeStore {
    pub fn new(index_space: IndexSpace) -> Self {
        Self { index_space, records: Vec::new(), dirty: BTreeSet::new() }
    }

    pub fn with_trials(index_space: IndexSpace, trial_count: usize) -> Result<Self, IndexError> {
        let mut store = Self::new(index_space);
        store.reserve_trials(trial_count)?;
        Ok(store)
    }

    pub fn index_space(&self) -> &IndexSpace {
        &self.index_space
    }

    pub fn capacity(&self) -> usize {
        self.records.len()
    }

    /// Grows the store so it covers `trial_count` full trial blocks. Never shrinks.
    pub fn reserve_trials(&mut self, trial_count: usize) -> Result<(), IndexError> {
        let capacity = self.index_space.capacity(trial_count)?;
        if capacity > self.records.len() {
            self.records.resize(capacity, AttributeRecord::Normal);
        }
        Ok(())
    }

    /// Indices never written read as `Normal`.
    pub fn get(&self, index: GlobalIndex) -> AttributeRecord {
        self.records.get(index.get()).copied().unwrap_or_default()
    }

    /// Overwrites the record at `index`; returns whether the value changed.
    pub fn set(&mut self, index: GlobalIndex, value: AttributeRecord) -> Result<bool, IndexError> {
        let capacity = self.records.len();
        let Some(slot) = self.records.get_mut(index.get()) else {
            return Err(IndexError::BeyondCapacity { index, capacity });
        };
        if *slot == value {
            return Ok(false);
        }
        *slot = value;
        self.dirty.insert(index);
        Ok(true)
    }

    /// Writes `value` to every index of `range`; returns how many records changed.
    pub fn set_range(
        &mut self,
        range: IndexRange,
        value: AttributeRecord,
    ) -> Result<usize, IndexError> {
        if range.is_empty() {
            return Ok(0);
        }
        self.check_range(range)?;

        let mut changed = 0;
        for index in range.iter() {
            if self.set(index, value)? {
                changed += 1;
            }
        }
        Ok(changed)
    }

    /// Resets every index of the half-open `range` to `Normal`, touching nothing outside it.
    pub fn clear_range(&mut self, range: IndexRange) -> Result<usize, IndexError> {
        self.set_range(range, AttributeRecord::Normal)
    }

    pub fn pending(&self) -> usize {
        self.dirty.len()
    }

    /// Notifies every index changed since the last flush, in ascending index order.
    pub fn flush(&mut self, broadcaster: &mut UpdateBroadcaster) -> FlushReport {
        let mut report = FlushReport::default();
        for index in std::mem::take(&mut self.dirty) {
            let notify = broadcaster.notify(index, self.get(index));
            report.notified += 1;
            report.applied += notify.applied;
            report.skipped += notify.skipped;
        }
        if report.notified > 0 {
            debug!(
                "flushed {} indices ({} applied, {} skipped)",
                report.notified, report.applied, report.skipped
            );
        }
        report
    }

    /// Every index whose record is not `Normal`, ascending.
    pub fn iter_marked(&self) -> impl Iterator<Item = (GlobalIndex, AttributeRecord)> + '_ {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| **record != AttributeRecord::Normal)
            .map(|(idx, record)| (GlobalIndex::new(idx), *record))
    }

    /// Records of `range` in order; indices past capacity read as `Normal`.
    pub fn records_in(&self, range: IndexRange) -> impl Iterator<Item = AttributeRecord> + '_ {
        range.iter().map(|index| self.get(index))
    }

    fn check_range(&self, range: IndexRange) -> Result<(), IndexError> {
        let capacity = self.records.len();
        if range.end().get() > capacity {
            let last = GlobalIndex::new(range.end().get() - 1);
            return Err(IndexError::BeyondCapacity { index: last, capacity });
        }
        Ok(())
    }
}

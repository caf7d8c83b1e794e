// SPDX-FileCopyrightText: 2026 Mocap Link contributors
// SPDX-License-Identifier: LicenseRef-MocapLink-Proprietary
//
// All rights reserved.
//
// This file is part of Mocap Link and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use log::trace;

use super::{LinkError, VisualConsumer};
use crate::model::{AttributeRecord, GlobalIndex};

/// Arena slot of a subscribed consumer; stable for the lifetime of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConsumerId(usize);

impl ConsumerId {
    pub fn get(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotifyReport {
    /// Consumers that owned the index and changed at least one element.
    pub applied: usize,
    /// Consumers that filtered the update out.
    pub skipped: usize,
}

/// Fans attribute changes out to every subscribed consumer, in subscription order.
#[derive(Default)]
pub struct UpdateBroadcaster {
    consumers: Vec<Box<dyn VisualConsumer>>,
}

impl UpdateBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, consumer: Box<dyn VisualConsumer>) -> ConsumerId {
        let id = ConsumerId(self.consumers.len());
        self.consumers.push(consumer);
        id
    }

    pub fn len(&self) -> usize {
        self.consumers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consumers.is_empty()
    }

    pub fn get(&self, id: ConsumerId) -> Option<&dyn VisualConsumer> {
        self.consumers.get(id.0).map(|consumer| consumer.as_ref())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn VisualConsumer>> {
        self.consumers.iter_mut()
    }

    /// Delivers `(index, record)` to every consumer synchronously.
    pub fn notify(&mut self, index: GlobalIndex, record: AttributeRecord) -> NotifyReport {
        let mut report = NotifyReport::default();
        for consumer in &mut self.consumers {
            match consumer.on_update(index, record) {
                Ok(_) => report.applied += 1,
                Err(LinkError::OutOfRange(_)) => report.skipped += 1,
                Err(err @ LinkError::MissingElement { .. }) => {
                    trace!("skipping {record} for {index}: {err}");
                    report.skipped += 1;
                }
            }
        }
        report
    }
}

impl fmt::Debug for UpdateBroadcaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateBroadcaster").field("consumers", &self.consumers.len()).finish()
    }
}

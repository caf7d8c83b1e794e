// SPDX-FileCopyrightText: 2026 Mocap Link contributors
// SPDX-License-Identifier: LicenseRef-MocapLink-Proprietary
//
// All rights reserved.
//
// This file is part of Mocap Link and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use crate::model::{AttributeRecord, GroupKind, TrialOrdinal};
use crate::select::SelectionMode;

/// Inclusive run of local frames, serialized as `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[usize; 2]", into = "[usize; 2]")]
pub struct FrameRun {
    pub start: usize,
    pub end: usize,
}

impl From<[usize; 2]> for FrameRun {
    fn from([start, end]: [usize; 2]) -> Self {
        Self { start, end }
    }
}

impl From<FrameRun> for [usize; 2] {
    fn from(run: FrameRun) -> Self {
        [run.start, run.end]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialSnapshot {
    pub ordinal: TrialOrdinal,
    pub label: String,
    pub frame_count: usize,
    pub highlighted: Vec<FrameRun>,
    pub masked: Vec<FrameRun>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSnapshot {
    pub trial: TrialOrdinal,
    pub kind: GroupKind,
    pub mode: SelectionMode,
    pub alt_select: bool,
}

/// Serializable view of the selection state of a whole session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionSnapshot {
    pub stride: usize,
    pub slider: f32,
    pub trials: Vec<TrialSnapshot>,
    pub groups: Vec<GroupSnapshot>,
}

impl SelectionSnapshot {
    pub fn trial(&self, ordinal: TrialOrdinal) -> Option<&TrialSnapshot> {
        self.trials.iter().find(|trial| trial.ordinal == ordinal)
    }
}

/// Collapses consecutive frames holding `wanted` into inclusive runs.
pub(crate) fn runs_of(
    records: impl IntoIterator<Item = AttributeRecord>,
    wanted: AttributeRecord,
) -> Vec<FrameRun> {
    let mut runs: Vec<FrameRun> = Vec::new();
    for (frame, record) in records.into_iter().enumerate() {
        if record != wanted {
            continue;
        }
        match runs.last_mut() {
            Some(run) if run.end + 1 == frame => run.end = frame,
            _ => runs.push(FrameRun { start: frame, end: frame }),
        }
    }
    runs
}

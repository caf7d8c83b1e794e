// SPDX-FileCopyrightText: 2026 Mocap Link contributors
// SPDX-License-Identifier: LicenseRef-MocapLink-Proprietary
//
// All rights reserved.
//
// This file is part of Mocap Link and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Headless driver: feeds a [`ReplayScript`] through a session, one input cycle at a time.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{CycleConfig, ReplayScript};
use crate::model::{LocalFrame, TrialOrdinal};
use crate::session::{InputCycle, LinkedSession, SelectionSnapshot, SessionError};

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("cycle {cycle}: trial {trial} is not loaded ({loaded} trials)")]
    UnknownTrial { cycle: usize, trial: usize, loaded: usize },
    #[error("cycle {cycle}: {source}")]
    Session {
        cycle: usize,
        #[source]
        source: SessionError,
    },
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayOutcome {
    /// Input cycles stepped, repetitions included.
    pub cycles: usize,
    /// Distinct index notifications across all cycles.
    pub notifications: usize,
    pub snapshot: SelectionSnapshot,
}

impl ReplayOutcome {
    pub fn to_json(&self) -> Result<String, ReplayError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub fn run_script(
    session: &mut LinkedSession,
    script: &ReplayScript,
) -> Result<ReplayOutcome, ReplayError> {
    let mut cycles = 0;
    let mut notifications = 0;

    for (table, cycle) in script.cycles.iter().enumerate() {
        let input = prepare(session, table, cycle)?;
        for repetition in 0..cycle.repeat {
            if repetition > 0 {
                if let Some(step) = cycle.slider_step {
                    session.nudge_slider(step);
                }
            }
            let report = session.step(&input);
            cycles += 1;
            notifications += report.flush.notified;
        }
    }

    info!("replayed {cycles} cycles ({notifications} notifications)");
    Ok(ReplayOutcome { cycles, notifications, snapshot: session.snapshot() })
}

/// Applies the one-off parts of a cycle table and resolves its pick.
fn prepare(
    session: &mut LinkedSession,
    table: usize,
    cycle: &CycleConfig,
) -> Result<InputCycle, ReplayError> {
    if let Some(mode) = cycle.mode {
        session.set_mode(mode);
    }
    if let Some(value) = cycle.slider {
        session.set_slider(value);
    }
    if let Some(mask) = cycle.mask {
        let trial = known_trial(session, table, mask.trial)?;
        let [start, end] = mask.frames;
        session
            .set_masked(trial, start..end, mask.masked)
            .map_err(|source| ReplayError::Session { cycle: table, source })?;
    }

    let pick = match cycle.pick {
        Some(pick) => {
            let trial = known_trial(session, table, pick.trial)?;
            let element = session.element_at(trial, pick.kind, LocalFrame::new(pick.frame));
            if element.is_none() {
                debug!(
                    "cycle {table}: no pickable {} at frame {} of trial {trial}",
                    pick.kind, pick.frame
                );
            }
            element
        }
        None => None,
    };

    Ok(InputCycle {
        primary_down: cycle.primary_down,
        pick,
        clear_pressed: cycle.clear,
        brush_held: cycle.brush_held,
        alt_pressed: cycle.alt_down,
    })
}

fn known_trial(
    session: &LinkedSession,
    cycle: usize,
    trial: usize,
) -> Result<TrialOrdinal, ReplayError> {
    let loaded = session.trials().len();
    if trial >= loaded {
        return Err(ReplayError::UnknownTrial { cycle, trial, loaded });
    }
    Ok(TrialOrdinal::new(trial))
}

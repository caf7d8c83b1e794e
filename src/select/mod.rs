// SPDX-FileCopyrightText: 2026 Mocap Link contributors
// SPDX-License-Identifier: LicenseRef-MocapLink-Proprietary
//
// All rights reserved.
//
// This file is part of Mocap Link and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Interactive selection.
//!
//! One `SelectionController` per visual group turns the input of a cycle into attribute writes.
//! Exactly one mode is active per controller; the per-cycle dispatch matches on that mode, so two
//! handlers can never see the same input.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{GlobalIndex, IndexError, LocalFrame, TrialOrdinal};

pub mod controller;

pub use controller::SelectionController;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    #[default]
    None,
    Click,
    Brush,
    SliderRange,
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Click => f.write_str("click"),
            Self::Brush => f.write_str("brush"),
            Self::SliderRange => f.write_str("slider"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("selection group of trial {trial} received input while no mode is active")]
    InvalidModeTransition { trial: TrialOrdinal },
    #[error(transparent)]
    Index(#[from] IndexError),
}

/// Continuous time-slider position in local frames; negative means inactive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SliderValue(f32);

impl SliderValue {
    pub const INACTIVE: Self = Self(-1.0);
    pub const START: Self = Self(0.0);

    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::INACTIVE;
        }
        Self(value)
    }

    pub fn get(self) -> f32 {
        self.0
    }

    pub fn is_active(self) -> bool {
        self.0 >= 0.0
    }

    /// The frame under the slider, `floor(value)`.
    pub fn frame(self) -> Option<LocalFrame> {
        self.is_active().then(|| LocalFrame::new(self.0.floor() as usize))
    }
}

impl Default for SliderValue {
    fn default() -> Self {
        Self::INACTIVE
    }
}

/// Input of one cycle as seen by one group, with the pick already resolved by the group's
/// consumer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GroupInput {
    pub primary_down: bool,
    pub hit: Option<GlobalIndex>,
    pub clear_pressed: bool,
    pub brush_held: bool,
    pub alt_pressed: bool,
    pub slider: SliderValue,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleOutcome {
    /// Records whose value changed.
    pub changed: usize,
    /// The slider must go back to its start position once every group has run.
    pub reset_slider: bool,
    /// The controller left its mode on its own (slider cleared).
    pub deactivated: bool,
}

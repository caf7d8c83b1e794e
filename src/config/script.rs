// SPDX-FileCopyrightText: 2026 Mocap Link contributors
// SPDX-License-Identifier: LicenseRef-MocapLink-Proprietary
//
// All rights reserved.
//
// This file is part of Mocap Link and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{read_file, ConfigError};
use crate::model::GroupKind;
use crate::select::SelectionMode;

/// Element the pointer is over, by trial, frame, and element kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PickConfig {
    pub trial: usize,
    pub frame: usize,
    #[serde(default = "default_pick_kind")]
    pub kind: GroupKind,
}

fn default_pick_kind() -> GroupKind {
    GroupKind::Markers
}

/// Mask or unmask the half-open local frame range `frames` before the cycle runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaskConfig {
    pub trial: usize,
    pub frames: [usize; 2],
    #[serde(default = "default_true")]
    pub masked: bool,
}

fn default_true() -> bool {
    true
}

fn default_repeat() -> usize {
    1
}

/// One `[[cycle]]` table.
///
/// `mode`, `slider` and `mask` are applied once before the first repetition; `slider_step` is
/// added to the slider before every repetition after the first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CycleConfig {
    #[serde(default)]
    pub mode: Option<SelectionMode>,
    #[serde(default)]
    pub slider: Option<f32>,
    #[serde(default)]
    pub slider_step: Option<f32>,
    #[serde(default)]
    pub mask: Option<MaskConfig>,
    #[serde(default)]
    pub primary_down: bool,
    #[serde(default)]
    pub pick: Option<PickConfig>,
    #[serde(default)]
    pub clear: bool,
    #[serde(default)]
    pub brush_held: bool,
    #[serde(default)]
    pub alt_down: bool,
    #[serde(default = "default_repeat")]
    pub repeat: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReplayScript {
    #[serde(default, rename = "cycle")]
    pub cycles: Vec<CycleConfig>,
}

impl ReplayScript {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_toml_str(&read_file(path)?)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Total number of input cycles the script produces.
    pub fn cycle_count(&self) -> usize {
        self.cycles.iter().map(|cycle| cycle.repeat).sum()
    }
}

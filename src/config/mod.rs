// SPDX-FileCopyrightText: 2026 Mocap Link contributors
// SPDX-License-Identifier: LicenseRef-MocapLink-Proprietary
//
// All rights reserved.
//
// This file is part of Mocap Link and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! TOML session descriptions and replay scripts.
//!
//! A session file names the stride, the trials to synthesize, and the TUI key bindings:
//!
//! ```toml
//! stride = 1800
//!
//! [[trials]]
//! label = "Trial 101"
//! frame_count = 500
//! markers = 4
//! pose_frames = [0, 5, 10]
//! nan_samples = [[1, 42]]
//!
//! [keys]
//! clear = "x"
//! ```

use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::fixtures::{demo_trials, SyntheticTrial, MAX_BONES_PER_POSE};
use crate::model::{IndexError, Stride, TrialData, TrialError, DEFAULT_STRIDE};
use crate::session::{LinkedSession, SessionError};

pub mod script;

pub use script::{CycleConfig, MaskConfig, PickConfig, ReplayScript};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Parse(#[from] toml::de::Error),
    #[error("invalid stride: {0}")]
    Stride(#[from] IndexError),
    #[error(
        "trial '{label}': NaN sample ({marker}, {frame}) is outside {markers} markers x {frame_count} frames"
    )]
    NanSampleOutOfRange {
        label: String,
        marker: usize,
        frame: usize,
        markers: usize,
        frame_count: usize,
    },
    #[error(transparent)]
    Trial(#[from] TrialError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

pub(crate) fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path)
        .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })
}

fn default_markers() -> usize {
    4
}

fn default_bones_per_pose() -> usize {
    3
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrialConfig {
    pub label: String,
    pub frame_count: usize,
    #[serde(default = "default_markers")]
    pub markers: usize,
    /// `[marker, frame]` pairs whose sample is untracked.
    #[serde(default)]
    pub nan_samples: Vec<[usize; 2]>,
    #[serde(default)]
    pub pose_frames: Vec<usize>,
    #[serde(default = "default_bones_per_pose")]
    pub bones_per_pose: usize,
}

impl TrialConfig {
    fn check_nan_samples(&self) -> Result<(), ConfigError> {
        let outside = self
            .nan_samples
            .iter()
            .find(|[marker, frame]| *marker >= self.markers || *frame >= self.frame_count);
        match outside {
            Some(&[marker, frame]) => Err(ConfigError::NanSampleOutOfRange {
                label: self.label.clone(),
                marker,
                frame,
                markers: self.markers,
                frame_count: self.frame_count,
            }),
            None => Ok(()),
        }
    }

    pub fn build(&self) -> TrialData {
        let mut trial = SyntheticTrial::new(self.label.clone(), self.frame_count, self.markers)
            .with_nan_samples(self.nan_samples.iter().map(|&[m, f]| (m, f)).collect())
            .with_pose_frames(self.pose_frames.clone());
        trial.bones_per_pose = self.bones_per_pose();
        trial.build()
    }

    /// Configured bones per pose, clamped to `1..=MAX_BONES_PER_POSE`.
    pub fn bones_per_pose(&self) -> usize {
        self.bones_per_pose.clamp(1, MAX_BONES_PER_POSE)
    }
}

/// Keys of the interactive front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeyBindings {
    pub click: char,
    pub brush: char,
    pub slider: char,
    pub clear: char,
    pub alt: char,
    pub mask: char,
    pub unmask: char,
    pub separate: char,
    pub quit: char,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            click: '1',
            brush: '2',
            slider: '3',
            clear: 'x',
            alt: 'a',
            mask: 'm',
            unmask: 'u',
            separate: 's',
            quit: 'q',
        }
    }
}

impl KeyBindings {
    fn all(&self) -> [char; 9] {
        [
            self.click,
            self.brush,
            self.slider,
            self.clear,
            self.alt,
            self.mask,
            self.unmask,
            self.separate,
            self.quit,
        ]
    }

    pub fn has_duplicates(&self) -> bool {
        let keys = self.all();
        keys.iter().enumerate().any(|(idx, key)| keys[idx + 1..].contains(key))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub stride: usize,
    pub trials: Vec<TrialConfig>,
    pub keys: KeyBindings,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { stride: DEFAULT_STRIDE, trials: Vec::new(), keys: KeyBindings::default() }
    }
}

impl SessionConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_toml_str(&read_file(path)?)
    }

    /// Parses and validates; duplicate key bindings fall back to the defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(text)?;
        if config.keys.has_duplicates() {
            warn!("ignoring key bindings with duplicate keys: {:?}", config.keys);
            config.keys = KeyBindings::default();
        }
        config.validate()?;
        Ok(config)
    }

    pub fn stride(&self) -> Result<Stride, ConfigError> {
        Ok(Stride::new(self.stride)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let stride = self.stride()?;
        for trial in &self.trials {
            trial.check_nan_samples()?;
            if trial.bones_per_pose() != trial.bones_per_pose {
                warn!(
                    "trial '{}': bones_per_pose {} clamped to {}",
                    trial.label,
                    trial.bones_per_pose,
                    trial.bones_per_pose()
                );
            }
            trial.build().validate(stride.get())?;
        }
        Ok(())
    }

    /// Builds the configured trials, or the demo trials when `demo` is set or none are listed.
    pub fn build_session(&self, demo: bool) -> Result<LinkedSession, ConfigError> {
        let stride = self.stride()?;
        let trials = if demo || self.trials.is_empty() {
            demo_trials()
        } else {
            self.trials.iter().map(TrialConfig::build).collect()
        };
        Ok(LinkedSession::from_trials(stride, trials)?)
    }
}

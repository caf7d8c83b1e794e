// SPDX-FileCopyrightText: 2026 Mocap Link contributors
// SPDX-License-Identifier: LicenseRef-MocapLink-Proprietary
//
// All rights reserved.
//
// This file is part of Mocap Link and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Deterministic synthetic trials (no RNG) for the demo session, configs without data, and tests.

use super::ids::LocalFrame;
use super::trial::{BoneMesh, MarkerSample, MarkerSeries, PoseFrames, PoseMeshSet, TrialData};

const BONE_NAMES: [&str; 8] =
    ["pelvis", "femur_l", "femur_r", "tibia_l", "tibia_r", "spine", "skull", "mandible"];

/// Number of distinct bones a synthetic pose can carry.
pub const MAX_BONES_PER_POSE: usize = BONE_NAMES.len();

/// Shape of a synthetic trial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticTrial {
    pub label: String,
    pub frame_count: usize,
    pub markers: usize,
    /// `(marker, frame)` pairs whose sample is NaN.
    pub nan_samples: Vec<(usize, usize)>,
    pub pose_frames: Vec<usize>,
    /// Bones per pose frame; anything past [`MAX_BONES_PER_POSE`] is dropped.
    pub bones_per_pose: usize,
}

impl SyntheticTrial {
    pub fn new(label: impl Into<String>, frame_count: usize, markers: usize) -> Self {
        Self {
            label: label.into(),
            frame_count,
            markers,
            nan_samples: Vec::new(),
            pose_frames: Vec::new(),
            bones_per_pose: 3,
        }
    }

    pub fn with_nan_samples(mut self, nan_samples: Vec<(usize, usize)>) -> Self {
        self.nan_samples = nan_samples;
        self
    }

    pub fn with_pose_frames(mut self, pose_frames: Vec<usize>) -> Self {
        self.pose_frames = pose_frames;
        self
    }

    pub fn build(&self) -> TrialData {
        let markers = (0..self.markers)
            .map(|marker| {
                let samples = (0..self.frame_count)
                    .map(|frame| {
                        if self.nan_samples.contains(&(marker, frame)) {
                            MarkerSample::MISSING
                        } else {
                            helix_sample(marker, frame)
                        }
                    })
                    .collect();
                MarkerSeries::new(format!("marker_{marker:02}"), samples)
            })
            .collect();

        let data = TrialData::new(self.label.clone(), self.frame_count, markers);
        if self.pose_frames.is_empty() {
            return data;
        }

        let poses: PoseFrames = self
            .pose_frames
            .iter()
            .map(|&frame| {
                let meshes = BONE_NAMES.iter().take(self.bones_per_pose).map(|name| BoneMesh::new(*name));
                (LocalFrame::new(frame), PoseMeshSet::new(meshes))
            })
            .collect();
        data.with_poses(poses)
    }
}

fn helix_sample(marker: usize, frame: usize) -> MarkerSample {
    let t = frame as f32 * 0.05;
    let radius = 0.2 + marker as f32 * 0.05;
    MarkerSample::new(radius * t.cos(), 0.01 * frame as f32, radius * t.sin())
}

/// Three trials of uneven length; the second has no poses and a few untracked samples.
pub fn demo_trials() -> Vec<TrialData> {
    vec![
        SyntheticTrial::new("Trial 101", 500, 4)
            .with_pose_frames((0..500).step_by(5).collect())
            .build(),
        SyntheticTrial::new("Trial 102", 420, 4)
            .with_nan_samples(vec![(0, 10), (1, 10), (2, 10), (3, 10), (2, 200)])
            .build(),
        SyntheticTrial::new("Trial 104", 610, 3)
            .with_pose_frames((0..610).step_by(2).collect())
            .build(),
    ]
}

#[cfg(test)]
mod tests {
    use super::{demo_trials, SyntheticTrial};
    use crate::model::index::DEFAULT_STRIDE;

    #[test]
    fn synthetic_trial_marks_requested_samples_missing() {
        let data = SyntheticTrial::new("t", 20, 2).with_nan_samples(vec![(1, 7)]).build();
        assert!(data.markers()[0].samples()[7].is_tracked());
        assert!(!data.markers()[1].samples()[7].is_tracked());
    }

    #[test]
    fn demo_trials_fit_the_default_stride() {
        for trial in demo_trials() {
            trial.validate(DEFAULT_STRIDE).expect("demo trial must validate");
        }
    }
}

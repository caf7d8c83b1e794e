// SPDX-FileCopyrightText: 2026 Mocap Link contributors
// SPDX-License-Identifier: LicenseRef-MocapLink-Proprietary
//
// All rights reserved.
//
// This file is part of Mocap Link and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Logical shape of one loaded trial.
//!
//! The loader owns file formats; by the time data reaches this module it is already filtered to the
//! selected markers and converted into scene coordinates.

use std::collections::BTreeMap;

use smallvec::SmallVec;
use thiserror::Error;

use super::ids::LocalFrame;

/// One 3D marker sample. Any axis may be NaN when the marker was not tracked in that frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerSample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl MarkerSample {
    pub const MISSING: Self = Self { x: f32::NAN, y: f32::NAN, z: f32::NAN };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn is_tracked(&self) -> bool {
        !(self.x.is_nan() || self.y.is_nan() || self.z.is_nan())
    }

    pub fn position(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

/// Time series of one selected marker, one sample per local frame.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSeries {
    label: String,
    samples: Vec<MarkerSample>,
}

impl MarkerSeries {
    pub fn new(label: impl Into<String>, samples: Vec<MarkerSample>) -> Self {
        Self { label: label.into(), samples }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn samples(&self) -> &[MarkerSample] {
        &self.samples
    }
}

/// One bone mesh of a skeletal pose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoneMesh {
    name: String,
}

impl BoneMesh {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// All bone meshes that make up the pose of a single frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoseMeshSet {
    bones: SmallVec<[BoneMesh; 8]>,
}

impl PoseMeshSet {
    pub fn new(bones: impl IntoIterator<Item = BoneMesh>) -> Self {
        Self { bones: bones.into_iter().collect() }
    }

    pub fn bones(&self) -> &[BoneMesh] {
        &self.bones
    }
}

/// Sparse frame → pose map; frames without a pose file are simply absent.
pub type PoseFrames = BTreeMap<LocalFrame, PoseMeshSet>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrialError {
    #[error("trial '{label}' has {frame_count} frames but the stride only reserves {stride}")]
    TooManyFrames { label: String, frame_count: usize, stride: usize },
    #[error("marker '{marker}' of trial '{label}' has {samples} samples, expected {frame_count}")]
    SeriesLength { label: String, marker: String, samples: usize, frame_count: usize },
    #[error("pose frame {frame} of trial '{label}' is past its last frame ({frame_count})")]
    PoseFrameOutOfRange { label: String, frame: LocalFrame, frame_count: usize },
}

/// Everything the loader hands over for one trial.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialData {
    label: String,
    frame_count: usize,
    markers: Vec<MarkerSeries>,
    poses: Option<PoseFrames>,
}

impl TrialData {
    pub fn new(label: impl Into<String>, frame_count: usize, markers: Vec<MarkerSeries>) -> Self {
        Self { label: label.into(), frame_count, markers, poses: None }
    }

    pub fn with_poses(mut self, poses: PoseFrames) -> Self {
        self.poses = Some(poses);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn markers(&self) -> &[MarkerSeries] {
        &self.markers
    }

    pub fn poses(&self) -> Option<&PoseFrames> {
        self.poses.as_ref()
    }

    pub fn validate(&self, stride: usize) -> Result<(), TrialError> {
        if self.frame_count > stride {
            return Err(TrialError::TooManyFrames {
                label: self.label.clone(),
                frame_count: self.frame_count,
                stride,
            });
        }

        for series in &self.markers {
            if series.samples().len() != self.frame_count {
                return Err(TrialError::SeriesLength {
                    label: self.label.clone(),
                    marker: series.label().to_owned(),
                    samples: series.samples().len(),
                    frame_count: self.frame_count,
                });
            }
        }

        if let Some(poses) = &self.poses {
            if let Some((&frame, _)) =
                poses.iter().find(|(frame, _)| frame.get() >= self.frame_count)
            {
                return Err(TrialError::PoseFrameOutOfRange {
                    label: self.label.clone(),
                    frame,
                    frame_count: self.frame_count,
                });
            }
        }

        Ok(())
    }
}

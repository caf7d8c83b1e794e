// SPDX-FileCopyrightText: 2026 Mocap Link contributors
// SPDX-License-Identifier: LicenseRef-MocapLink-Proprietary
//
// All rights reserved.
//
// This file is part of Mocap Link and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Concrete visual consumers: marker spheres and skeletal poses of one trial.
//!
//! Each consumer owns its elements in flat per-trial collections; the trial ordinal is the only
//! grouping key. Updates translate the global index back to a local frame and touch that frame's
//! elements in O(markers) / O(bones).

pub mod marker;
pub mod pose;

pub use marker::{MarkerTrialConsumer, Sphere};
pub use pose::{Bone, PoseTrialConsumer};

fn add_offset(offset: &mut [f32; 3], delta: [f32; 3]) {
    for (axis, d) in offset.iter_mut().zip(delta) {
        *axis += d;
    }
}

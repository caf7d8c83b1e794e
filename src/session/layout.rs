// SPDX-FileCopyrightText: 2026 Mocap Link contributors
// SPDX-License-Identifier: LicenseRef-MocapLink-Proprietary
//
// All rights reserved.
//
// This file is part of Mocap Link and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Distance between neighbouring trials when they are pulled apart.
pub const SEPARATION_STEP: f32 = 5.0;

/// Per-trial x offsets for the "separate trials" view.
///
/// Trials before the midpoint move left by `(i + 1) * step`; the midpoint and everything after it
/// move right by `(i - mid) * step`. With an odd trial count the middle trial stays in place.
pub fn separation_offsets(trial_count: usize, step: f32) -> Vec<f32> {
    let mid = trial_count / 2;
    (0..trial_count)
        .map(|i| if i < mid { -((i + 1) as f32) * step } else { (i - mid) as f32 * step })
        .collect()
}

// SPDX-FileCopyrightText: 2026 Mocap Link contributors
// SPDX-License-Identifier: LicenseRef-MocapLink-Proprietary
//
// All rights reserved.
//
// This file is part of Mocap Link and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Per-trial marker colours.
//!
//! Five palettes of five colours each. Trial `n` draws from palette `n % 5` and marker `m` of that
//! trial gets colour `m % 5`, so neighbouring trials stay distinguishable.

use crate::model::{Rgba, TrialOrdinal};

/// Colour of highlighted marker spheres and pose bones.
pub const HIGHLIGHT: Rgba = Rgba::opaque(55, 189, 238);

/// Base colour of pose bones.
pub const POSE_BASE: Rgba = Rgba::WHITE;

const PURPLE: [Rgba; 5] = [
    Rgba::opaque(128, 35, 146),
    Rgba::opaque(153, 95, 163),
    Rgba::opaque(197, 164, 203),
    Rgba::opaque(130, 149, 238),
    Rgba::opaque(122, 35, 154),
];

const ORANGE: [Rgba; 5] = [
    Rgba::opaque(255, 106, 26),
    Rgba::opaque(226, 113, 29),
    Rgba::opaque(128, 57, 14),
    Rgba::opaque(255, 182, 39),
    Rgba::opaque(238, 140, 89),
];

const GREEN: [Rgba; 5] = [
    Rgba::opaque(20, 49, 9),
    Rgba::opaque(90, 152, 84),
    Rgba::new(208, 214, 127, 179),
    Rgba::new(15, 96, 23, 179),
    Rgba::new(186, 217, 106, 179),
];

const PINK: [Rgba; 5] = [
    Rgba::opaque(239, 81, 89),
    Rgba::opaque(243, 131, 117),
    Rgba::opaque(243, 139, 170),
    Rgba::opaque(241, 102, 147),
    Rgba::opaque(183, 112, 130),
];

const BLUE: [Rgba; 5] = [
    Rgba::opaque(35, 54, 255),
    Rgba::opaque(2, 8, 135),
    Rgba::opaque(47, 66, 180),
    Rgba::opaque(1, 83, 121),
    Rgba::opaque(68, 136, 185),
];

const PALETTES: [&[Rgba; 5]; 5] = [&PURPLE, &ORANGE, &GREEN, &PINK, &BLUE];

/// Colours for the markers of one trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialTheme {
    palette: &'static [Rgba; 5],
}

impl TrialTheme {
    pub fn for_trial(trial: TrialOrdinal) -> Self {
        Self { palette: PALETTES[trial.get() % PALETTES.len()] }
    }

    pub fn marker_color(&self, marker: usize) -> Rgba {
        self.palette[marker % self.palette.len()]
    }

    /// First palette entry; used where a whole trial needs one colour.
    pub fn accent(&self) -> Rgba {
        self.palette[0]
    }
}

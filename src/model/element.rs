// SPDX-FileCopyrightText: 2026 Mocap Link contributors
// SPDX-License-Identifier: LicenseRef-MocapLink-Proprietary
//
// All rights reserved.
//
// This file is part of Mocap Link and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::ids::{LocalFrame, TrialOrdinal};

/// A pickable visual element, as reported by the external ray caster.
///
/// Elements are addressed by arena keys rather than scene-graph handles: the trial ordinal is the
/// grouping key and the remaining fields locate the element inside its consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementHandle {
    Marker { trial: TrialOrdinal, marker: usize, frame: LocalFrame },
    Bone { trial: TrialOrdinal, frame: LocalFrame, bone: usize },
}

impl ElementHandle {
    pub fn trial(&self) -> TrialOrdinal {
        match self {
            Self::Marker { trial, .. } | Self::Bone { trial, .. } => *trial,
        }
    }
}

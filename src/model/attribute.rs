// SPDX-FileCopyrightText: 2026 Mocap Link contributors
// SPDX-License-Identifier: LicenseRef-MocapLink-Proprietary
//
// All rights reserved.
//
// This file is part of Mocap Link and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Selection state of one global index.
///
/// The three states are mutually exclusive. Consumers check `Masked` before `Highlighted`, so a
/// masked frame is never drawn highlighted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeRecord {
    #[default]
    Normal,
    Highlighted,
    Masked,
}

impl AttributeRecord {
    pub fn is_masked(self) -> bool {
        matches!(self, Self::Masked)
    }

    pub fn is_highlighted(self) -> bool {
        matches!(self, Self::Highlighted)
    }
}

impl fmt::Display for AttributeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => f.write_str("normal"),
            Self::Highlighted => f.write_str("highlighted"),
            Self::Masked => f.write_str("masked"),
        }
    }
}

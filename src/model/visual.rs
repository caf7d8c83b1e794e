// SPDX-FileCopyrightText: 2026 Mocap Link contributors
// SPDX-License-Identifier: LicenseRef-MocapLink-Proprietary
//
// All rights reserved.
//
// This file is part of Mocap Link and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::attribute::AttributeRecord;
use super::color::Rgba;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    #[default]
    Default,
    Highlight,
}

/// Renderer-facing state of one visual element: the only effect that crosses into rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementVisual {
    pub enabled: bool,
    pub material: Material,
    pub color: Rgba,
}

impl ElementVisual {
    pub fn new(color: Rgba) -> Self {
        Self { enabled: true, material: Material::Default, color }
    }

    /// Applies `record`. Masked is checked first, then Highlighted, else the element is restored
    /// to `base`.
    pub fn apply(&mut self, record: AttributeRecord, base: Rgba, highlight: Rgba) {
        if record.is_masked() {
            self.enabled = false;
        } else if record.is_highlighted() {
            self.enabled = true;
            self.material = Material::Highlight;
            self.color = highlight;
        } else {
            self.enabled = true;
            self.material = Material::Default;
            self.color = base;
        }
    }

    pub fn is_highlighted(&self) -> bool {
        self.enabled && self.material == Material::Highlight
    }
}

// SPDX-FileCopyrightText: 2026 Mocap Link contributors
// SPDX-License-Identifier: LicenseRef-MocapLink-Proprietary
//
// All rights reserved.
//
// This file is part of Mocap Link and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::link::{LinkError, VisualConsumer};
use crate::model::{
    AttributeRecord, ElementHandle, ElementVisual, GlobalIndex, GroupKind, IndexSpace, LocalFrame,
    Rgba, TrialData, TrialOrdinal,
};
use crate::palette::{TrialTheme, HIGHLIGHT};

use super::add_offset;

/// One rendered marker sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub position: [f32; 3],
    pub visual: ElementVisual,
}

#[derive(Debug, Clone, PartialEq)]
struct MarkerTrack {
    color: Rgba,
    // `None` where the sample was untracked (NaN); such frames have nothing to draw or pick.
    spheres: Vec<Option<Sphere>>,
}

/// Marker spheres of one trial: one track per selected marker, one sphere per tracked frame.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerTrialConsumer {
    trial: TrialOrdinal,
    space: IndexSpace,
    frame_count: usize,
    tracks: Vec<MarkerTrack>,
    offset: [f32; 3],
}

impl MarkerTrialConsumer {
    pub fn new(trial: TrialOrdinal, space: IndexSpace, data: &TrialData) -> Self {
        let theme = TrialTheme::for_trial(trial);
        let tracks = data
            .markers()
            .iter()
            .enumerate()
            .map(|(marker, series)| {
                let color = theme.marker_color(marker);
                let spheres = series
                    .samples()
                    .iter()
                    .map(|sample| {
                        sample.is_tracked().then(|| Sphere {
                            position: sample.position(),
                            visual: ElementVisual::new(color),
                        })
                    })
                    .collect();
                MarkerTrack { color, spheres }
            })
            .collect();

        Self { trial, space, frame_count: data.frame_count(), tracks, offset: [0.0; 3] }
    }

    pub fn marker_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn sphere(&self, marker: usize, frame: LocalFrame) -> Option<&Sphere> {
        self.tracks.get(marker)?.spheres.get(frame.get())?.as_ref()
    }

    /// Sphere position with the trial container offset applied.
    pub fn world_position(&self, marker: usize, frame: LocalFrame) -> Option<[f32; 3]> {
        let sphere = self.sphere(marker, frame)?;
        let mut position = sphere.position;
        add_offset(&mut position, self.offset);
        Some(position)
    }
}

impl VisualConsumer for MarkerTrialConsumer {
    fn trial(&self) -> TrialOrdinal {
        self.trial
    }

    fn kind(&self) -> GroupKind {
        GroupKind::Markers
    }

    fn frame_count(&self) -> usize {
        self.frame_count
    }

    fn on_update(
        &mut self,
        index: GlobalIndex,
        record: AttributeRecord,
    ) -> Result<usize, LinkError> {
        let frame = self.space.to_local(index, self.trial, self.frame_count)?;

        let mut touched = 0;
        for track in &mut self.tracks {
            if let Some(sphere) = track.spheres.get_mut(frame.get()).and_then(Option::as_mut) {
                sphere.visual.apply(record, track.color, HIGHLIGHT);
                touched += 1;
            }
        }

        if touched == 0 {
            return Err(LinkError::MissingElement { trial: self.trial, frame });
        }
        Ok(touched)
    }

    fn resolve_hit(&self, hit: &ElementHandle) -> Option<LocalFrame> {
        let ElementHandle::Marker { trial, marker, frame } = *hit else {
            return None;
        };
        if trial != self.trial {
            return None;
        }
        let sphere = self.sphere(marker, frame)?;
        sphere.visual.enabled.then_some(frame)
    }

    fn element_at(&self, frame: LocalFrame) -> Option<ElementHandle> {
        let marker = (0..self.tracks.len())
            .find(|&marker| self.sphere(marker, frame).is_some_and(|s| s.visual.enabled))?;
        Some(ElementHandle::Marker { trial: self.trial, marker, frame })
    }

    fn frame_visual(&self, frame: LocalFrame) -> Option<ElementVisual> {
        (0..self.tracks.len()).find_map(|marker| self.sphere(marker, frame)).map(|s| s.visual)
    }

    fn offset(&self) -> [f32; 3] {
        self.offset
    }

    fn translate(&mut self, delta: [f32; 3]) {
        add_offset(&mut self.offset, delta);
    }
}

// SPDX-FileCopyrightText: 2026 Mocap Link contributors
// SPDX-License-Identifier: LicenseRef-MocapLink-Proprietary
//
// All rights reserved.
//
// This file is part of Mocap Link and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! A linked multi-trial session.
//!
//! `LinkedSession` owns the attribute store, the consumer arena, and one selection group per
//! trial and element kind. Every input cycle goes through [`LinkedSession::step`], which runs the
//! active controllers against a snapshot of the shared slider and then flushes the store once.

use std::ops::Range;

use log::{debug, error, info};
use thiserror::Error;

use crate::consumer::{MarkerTrialConsumer, PoseTrialConsumer};
use crate::link::{AttributeStore, ConsumerId, FlushReport, UpdateBroadcaster, VisualConsumer};
use crate::model::{
    AttributeRecord, ElementHandle, GlobalIndex, GroupKind, IndexError, IndexRange, IndexSpace,
    LocalFrame, Stride, TrialData, TrialError, TrialOrdinal,
};
use crate::select::{GroupInput, SelectionController, SelectionMode, SliderValue};

pub mod layout;
pub mod snapshot;

pub use layout::{separation_offsets, SEPARATION_STEP};
pub use snapshot::{FrameRun, GroupSnapshot, SelectionSnapshot, TrialSnapshot};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Trial(#[from] TrialError),
    #[error(transparent)]
    Index(#[from] IndexError),
    #[error("no trial with ordinal {0} is loaded")]
    UnknownTrial(TrialOrdinal),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialInfo {
    pub ordinal: TrialOrdinal,
    pub label: String,
    pub frame_count: usize,
    pub has_poses: bool,
}

/// A controller bound to the consumer whose picks it resolves.
#[derive(Debug, Clone)]
pub struct SelectionGroup {
    trial: TrialOrdinal,
    kind: GroupKind,
    consumer: ConsumerId,
    controller: SelectionController,
}

impl SelectionGroup {
    pub fn trial(&self) -> TrialOrdinal {
        self.trial
    }

    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    pub fn consumer(&self) -> ConsumerId {
        self.consumer
    }

    pub fn controller(&self) -> &SelectionController {
        &self.controller
    }
}

/// Raw input of one cycle, shared by every group.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputCycle {
    pub primary_down: bool,
    /// Element under the pointer, if the pick ray hit anything.
    pub pick: Option<ElementHandle>,
    pub clear_pressed: bool,
    pub brush_held: bool,
    pub alt_pressed: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub changed: usize,
    pub slider_reset: bool,
    pub deactivated: usize,
    pub flush: FlushReport,
}

#[derive(Debug)]
pub struct LinkedSession {
    space: IndexSpace,
    trials: Vec<TrialInfo>,
    store: AttributeStore,
    broadcaster: UpdateBroadcaster,
    groups: Vec<SelectionGroup>,
    slider: SliderValue,
    separated: bool,
}

impl LinkedSession {
    pub fn new(stride: Stride) -> Self {
        let space = IndexSpace::new(stride);
        Self {
            space,
            trials: Vec::new(),
            store: AttributeStore::new(space),
            broadcaster: UpdateBroadcaster::new(),
            groups: Vec::new(),
            slider: SliderValue::INACTIVE,
            separated: false,
        }
    }

    pub fn from_trials(
        stride: Stride,
        trials: impl IntoIterator<Item = TrialData>,
    ) -> Result<Self, SessionError> {
        let mut session = Self::new(stride);
        for trial in trials {
            session.add_trial(trial)?;
        }
        Ok(session)
    }

    /// Registers a trial under the next ordinal and subscribes its consumers.
    ///
    /// The new trial joins in `None` mode, or in the current separated layout if trials are
    /// pulled apart.
    pub fn add_trial(&mut self, data: TrialData) -> Result<TrialOrdinal, SessionError> {
        data.validate(self.space.stride())?;
        let ordinal = TrialOrdinal::new(self.trials.len());
        self.store.reserve_trials(ordinal.get() + 1)?;

        let was_separated = self.separated;
        self.unseparate_trials();

        let markers = MarkerTrialConsumer::new(ordinal, self.space, &data);
        let consumer = self.broadcaster.subscribe(Box::new(markers));
        self.push_group(ordinal, GroupKind::Markers, consumer, data.frame_count());

        if let Some(poses) = data.poses() {
            let pose = PoseTrialConsumer::new(ordinal, self.space, data.frame_count(), poses);
            let consumer = self.broadcaster.subscribe(Box::new(pose));
            self.push_group(ordinal, GroupKind::Poses, consumer, data.frame_count());
        }

        info!(
            "loaded trial {ordinal} '{}' ({} frames, {} markers{})",
            data.label(),
            data.frame_count(),
            data.markers().len(),
            if data.poses().is_some() { ", poses" } else { "" }
        );
        self.trials.push(TrialInfo {
            ordinal,
            label: data.label().to_owned(),
            frame_count: data.frame_count(),
            has_poses: data.poses().is_some(),
        });

        if was_separated {
            self.separate_trials();
        }
        Ok(ordinal)
    }

    fn push_group(
        &mut self,
        trial: TrialOrdinal,
        kind: GroupKind,
        consumer: ConsumerId,
        frame_count: usize,
    ) {
        self.groups.push(SelectionGroup {
            trial,
            kind,
            consumer,
            controller: SelectionController::new(trial, self.space, frame_count),
        });
    }

    pub fn index_space(&self) -> &IndexSpace {
        &self.space
    }

    pub fn trials(&self) -> &[TrialInfo] {
        &self.trials
    }

    pub fn trial(&self, ordinal: TrialOrdinal) -> Result<&TrialInfo, SessionError> {
        self.trials.get(ordinal.get()).ok_or(SessionError::UnknownTrial(ordinal))
    }

    pub fn store(&self) -> &AttributeStore {
        &self.store
    }

    pub fn groups(&self) -> &[SelectionGroup] {
        &self.groups
    }

    pub fn group(&self, trial: TrialOrdinal, kind: GroupKind) -> Option<&SelectionGroup> {
        self.groups.iter().find(|group| group.trial == trial && group.kind == kind)
    }

    pub fn consumer(&self, trial: TrialOrdinal, kind: GroupKind) -> Option<&dyn VisualConsumer> {
        let group = self.group(trial, kind)?;
        self.broadcaster.get(group.consumer)
    }

    /// Mode of the marker groups, which every mode change reaches.
    pub fn mode(&self) -> SelectionMode {
        self.groups
            .iter()
            .find(|group| group.kind == GroupKind::Markers)
            .map(|group| group.controller.mode())
            .unwrap_or_default()
    }

    pub fn enable_click(&mut self) {
        self.set_mode(SelectionMode::Click);
    }

    pub fn enable_brush(&mut self) {
        self.set_mode(SelectionMode::Brush);
    }

    /// Slider ranges drive marker groups only; pose groups drop to `None`.
    pub fn enable_slider(&mut self) {
        self.set_mode(SelectionMode::SliderRange);
    }

    pub fn disable_selection(&mut self) {
        self.set_mode(SelectionMode::None);
    }

    pub fn set_mode(&mut self, mode: SelectionMode) {
        for group in &mut self.groups {
            let mode = match (mode, group.kind) {
                (SelectionMode::SliderRange, GroupKind::Poses) => SelectionMode::None,
                (mode, _) => mode,
            };
            group.controller.set_mode(mode);
        }
        debug!("selection mode set to {mode} on {} groups", self.groups.len());
    }

    pub fn slider(&self) -> SliderValue {
        self.slider
    }

    /// Moves the shared slider; values are clamped to `[-1, stride - 1]`.
    ///
    /// Each slider group further clamps the value to its own trial's last frame.
    pub fn set_slider(&mut self, value: f32) {
        let max = (self.space.stride() - 1) as f32;
        self.slider = SliderValue::new(value.clamp(SliderValue::INACTIVE.get(), max));
    }

    pub fn nudge_slider(&mut self, delta: f32) {
        self.set_slider(self.slider.get() + delta);
    }

    /// Runs one input cycle.
    ///
    /// Every active group sees the slider value the cycle started with. A reset requested by any
    /// group is applied after all groups have run, then the store is flushed once.
    pub fn step(&mut self, input: &InputCycle) -> CycleReport {
        let slider = self.slider;
        let mut report = CycleReport::default();

        for group in &mut self.groups {
            if !group.controller.is_active() {
                continue;
            }
            let hit = input.pick.and_then(|pick| {
                let consumer = self.broadcaster.get(group.consumer)?;
                let frame = consumer.resolve_hit(&pick)?;
                self.space.to_global(consumer.trial(), frame).ok()
            });
            let group_input = GroupInput {
                primary_down: input.primary_down,
                hit,
                clear_pressed: input.clear_pressed,
                brush_held: input.brush_held,
                alt_pressed: input.alt_pressed,
                slider,
            };

            match group.controller.process(&group_input, &mut self.store) {
                Ok(outcome) => {
                    report.changed += outcome.changed;
                    report.slider_reset |= outcome.reset_slider;
                    report.deactivated += usize::from(outcome.deactivated);
                }
                Err(err) => {
                    error!("{} group of trial {}: {err}", group.kind, group.trial);
                    if cfg!(debug_assertions) {
                        panic!("selection invariant violated: {err}");
                    }
                }
            }
        }

        if report.slider_reset {
            self.slider = SliderValue::START;
        }
        report.flush = self.store.flush(&mut self.broadcaster);
        report
    }

    /// Flushes writes made outside of `step`.
    pub fn commit(&mut self) -> FlushReport {
        self.store.flush(&mut self.broadcaster)
    }

    /// A pickable element of `frame`, standing in for a ray hit.
    pub fn element_at(
        &self,
        trial: TrialOrdinal,
        kind: GroupKind,
        frame: LocalFrame,
    ) -> Option<ElementHandle> {
        self.consumer(trial, kind)?.element_at(frame)
    }

    /// Masks or unmasks `frames` of `trial` and commits right away.
    ///
    /// Frames past the trial's last frame are ignored. Unmasking only touches masked frames.
    pub fn set_masked(
        &mut self,
        trial: TrialOrdinal,
        frames: Range<usize>,
        masked: bool,
    ) -> Result<usize, SessionError> {
        let real = self.real_frames(self.trial(trial)?);
        let base = real.start().get();
        let range = IndexRange::new(
            GlobalIndex::new(base.saturating_add(frames.start)),
            GlobalIndex::new(base.saturating_add(frames.end)),
        )
        .clamp_to(real);

        let mut changed = 0;
        for index in range.iter() {
            let next = match (masked, self.store.get(index)) {
                (true, _) => AttributeRecord::Masked,
                (false, AttributeRecord::Masked) => AttributeRecord::Normal,
                (false, _) => continue,
            };
            changed += usize::from(self.store.set(index, next)?);
        }
        self.commit();
        Ok(changed)
    }

    /// Turns every highlighted frame of every trial into a masked one.
    pub fn mask_highlighted(&mut self) -> Result<usize, SessionError> {
        self.replace_records(AttributeRecord::Highlighted, AttributeRecord::Masked)
    }

    pub fn unmask_all(&mut self) -> Result<usize, SessionError> {
        self.replace_records(AttributeRecord::Masked, AttributeRecord::Normal)
    }

    fn replace_records(
        &mut self,
        from: AttributeRecord,
        to: AttributeRecord,
    ) -> Result<usize, SessionError> {
        let indices: Vec<GlobalIndex> = self
            .store
            .iter_marked()
            .filter(|(_, record)| *record == from)
            .map(|(index, _)| index)
            .collect();
        for &index in &indices {
            self.store.set(index, to)?;
        }
        self.commit();
        Ok(indices.len())
    }

    pub fn is_separated(&self) -> bool {
        self.separated
    }

    /// Pulls the trials apart along x. Calling it twice changes nothing.
    pub fn separate_trials(&mut self) {
        if self.separated {
            return;
        }
        self.shift_trials(1.0);
        self.separated = true;
    }

    /// Moves separated trials back to their original offsets.
    pub fn unseparate_trials(&mut self) {
        if !self.separated {
            return;
        }
        self.shift_trials(-1.0);
        self.separated = false;
    }

    fn shift_trials(&mut self, sign: f32) {
        let offsets = separation_offsets(self.trials.len(), SEPARATION_STEP);
        for consumer in self.broadcaster.iter_mut() {
            if let Some(offset) = offsets.get(consumer.trial().get()) {
                consumer.translate([sign * offset, 0.0, 0.0]);
            }
        }
    }

    /// Real frames of a trial, without padding.
    fn real_frames(&self, info: &TrialInfo) -> IndexRange {
        let start = self.space.trial_range(info.ordinal).start();
        IndexRange::new(start, GlobalIndex::new(start.get() + info.frame_count))
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        let trials = self
            .trials
            .iter()
            .map(|info| {
                let records: Vec<AttributeRecord> =
                    self.store.records_in(self.real_frames(info)).collect();
                TrialSnapshot {
                    ordinal: info.ordinal,
                    label: info.label.clone(),
                    frame_count: info.frame_count,
                    highlighted: snapshot::runs_of(
                        records.iter().copied(),
                        AttributeRecord::Highlighted,
                    ),
                    masked: snapshot::runs_of(records.iter().copied(), AttributeRecord::Masked),
                }
            })
            .collect();
        let groups = self
            .groups
            .iter()
            .map(|group| GroupSnapshot {
                trial: group.trial,
                kind: group.kind,
                mode: group.controller.mode(),
                alt_select: group.controller.alt_select_mode(),
            })
            .collect();

        SelectionSnapshot {
            stride: self.space.stride(),
            slider: self.slider.get(),
            trials,
            groups,
        }
    }
}

#[cfg(test)]
mod tests;

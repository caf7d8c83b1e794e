// SPDX-FileCopyrightText: 2026 Mocap Link contributors
// SPDX-License-Identifier: LicenseRef-MocapLink-Proprietary
//
// All rights reserved.
//
// This file is part of Mocap Link and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use log::debug;

use super::{CycleOutcome, GroupInput, SelectionError, SelectionMode};
use crate::link::AttributeStore;
use crate::model::{AttributeRecord, GlobalIndex, IndexRange, IndexSpace, LocalFrame, TrialOrdinal};

/// Mode plus the transient state that only that mode may carry.
///
/// Keeping the slider anchor inside the `Slider` variant means leaving slider mode drops any
/// half-finished range gesture by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModeState {
    Idle,
    Click,
    Brush,
    Slider { anchor: Option<GlobalIndex> },
}

/// Selection state machine of one visual group (one trial's markers or poses).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionController {
    trial: TrialOrdinal,
    space: IndexSpace,
    frame_count: usize,
    state: ModeState,
}

impl SelectionController {
    /// `frame_count` bounds the slider; frames past it are padding and never highlighted.
    pub fn new(trial: TrialOrdinal, space: IndexSpace, frame_count: usize) -> Self {
        Self { trial, space, frame_count: frame_count.min(space.stride()), state: ModeState::Idle }
    }

    pub fn trial(&self) -> TrialOrdinal {
        self.trial
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn mode(&self) -> SelectionMode {
        match self.state {
            ModeState::Idle => SelectionMode::None,
            ModeState::Click => SelectionMode::Click,
            ModeState::Brush => SelectionMode::Brush,
            ModeState::Slider { .. } => SelectionMode::SliderRange,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state != ModeState::Idle
    }

    pub fn alt_select_mode(&self) -> bool {
        matches!(self.state, ModeState::Slider { anchor: Some(_) })
    }

    pub fn range_anchor(&self) -> Option<GlobalIndex> {
        match self.state {
            ModeState::Slider { anchor } => anchor,
            _ => None,
        }
    }

    pub fn enable_click(&mut self) {
        self.transition(ModeState::Click);
    }

    pub fn enable_brush(&mut self) {
        self.transition(ModeState::Brush);
    }

    pub fn enable_slider(&mut self) {
        self.transition(ModeState::Slider { anchor: None });
    }

    pub fn disable(&mut self) {
        self.transition(ModeState::Idle);
    }

    pub fn set_mode(&mut self, mode: SelectionMode) {
        match mode {
            SelectionMode::None => self.disable(),
            SelectionMode::Click => self.enable_click(),
            SelectionMode::Brush => self.enable_brush(),
            SelectionMode::SliderRange => self.enable_slider(),
        }
    }

    /// Runs the handler of the active mode against one cycle of input.
    pub fn process(
        &mut self,
        input: &GroupInput,
        store: &mut AttributeStore,
    ) -> Result<CycleOutcome, SelectionError> {
        match self.state {
            ModeState::Idle => Err(SelectionError::InvalidModeTransition { trial: self.trial }),
            ModeState::Click => self.process_click(input, store),
            ModeState::Brush => self.process_brush(input, store),
            ModeState::Slider { anchor } => self.process_slider(anchor, input, store),
        }
    }

    fn transition(&mut self, next: ModeState) {
        if self.state != next {
            debug!("trial {}: selection mode {} -> {:?}", self.trial, self.mode(), next);
        }
        self.state = next;
    }

    fn trial_range(&self) -> IndexRange {
        self.space.trial_range(self.trial)
    }

    fn own_hit(&self, hit: Option<GlobalIndex>) -> Option<GlobalIndex> {
        let hit = hit?;
        if self.trial_range().contains(hit) {
            return Some(hit);
        }
        debug!("trial {}: ignoring hit {hit} outside the trial block", self.trial);
        None
    }

    fn clear_trial(&self, store: &mut AttributeStore) -> Result<usize, SelectionError> {
        Ok(store.clear_range(self.trial_range())?)
    }

    fn process_click(
        &mut self,
        input: &GroupInput,
        store: &mut AttributeStore,
    ) -> Result<CycleOutcome, SelectionError> {
        let changed = if input.primary_down {
            match self.own_hit(input.hit) {
                Some(index) => usize::from(store.set(index, AttributeRecord::Highlighted)?),
                None => 0,
            }
        } else if input.clear_pressed {
            self.clear_trial(store)?
        } else {
            0
        };
        Ok(CycleOutcome { changed, ..CycleOutcome::default() })
    }

    // Brushing only ever adds: frames the pointer already passed stay highlighted.
    fn process_brush(
        &mut self,
        input: &GroupInput,
        store: &mut AttributeStore,
    ) -> Result<CycleOutcome, SelectionError> {
        let changed = if input.clear_pressed {
            self.clear_trial(store)?
        } else if input.brush_held {
            match self.own_hit(input.hit) {
                Some(index) => usize::from(store.set(index, AttributeRecord::Highlighted)?),
                None => 0,
            }
        } else {
            0
        };
        Ok(CycleOutcome { changed, ..CycleOutcome::default() })
    }

    fn process_slider(
        &mut self,
        anchor: Option<GlobalIndex>,
        input: &GroupInput,
        store: &mut AttributeStore,
    ) -> Result<CycleOutcome, SelectionError> {
        let range = self.trial_range();

        let frame = match input.slider.frame() {
            Some(frame) if !input.clear_pressed => frame,
            _ => {
                let changed = self.clear_trial(store)?;
                self.transition(ModeState::Idle);
                return Ok(CycleOutcome { changed, reset_slider: true, deactivated: true });
            }
        };
        let Some(last) = self.frame_count.checked_sub(1) else {
            return Ok(CycleOutcome::default());
        };
        let frame = LocalFrame::new(frame.get().min(last));
        let current = self.space.to_global(self.trial, frame)?;

        if input.alt_pressed {
            self.state = ModeState::Slider { anchor: Some(current) };
            debug!("trial {}: slider anchored at {frame}", self.trial);
            let changed = store.clear_range(IndexRange::new(range.start(), current))?;
            return Ok(CycleOutcome { changed, ..CycleOutcome::default() });
        }

        // Alt windows are [anchor, current); plain windows are [start, current]. In both cases
        // `current` itself is never cleared.
        let window = match anchor {
            Some(anchor) => IndexRange::new(anchor, current),
            None => IndexRange::inclusive(range.start(), current),
        };
        let ahead = IndexRange::new(current.next(), range.end());

        let mut changed = store.set_range(window, AttributeRecord::Highlighted)?;
        changed += store.clear_range(ahead)?;
        Ok(CycleOutcome { changed, ..CycleOutcome::default() })
    }
}

// SPDX-FileCopyrightText: 2026 Mocap Link contributors
// SPDX-License-Identifier: LicenseRef-MocapLink-Proprietary
//
// All rights reserved.
//
// This file is part of Mocap Link and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Flat global index space.
//!
//! Every (trial, frame) pair maps to `trial * stride + frame`. The stride is the maximum frame
//! count a trial may carry; frames past a trial's real frame count are padding and never map back
//! to data.

use thiserror::Error;

use super::ids::{GlobalIndex, LocalFrame, TrialOrdinal};

/// Default per-trial reservation in the global index space.
pub const DEFAULT_STRIDE: usize = 1800;

/// Largest accepted stride: about five hours of capture at 60 Hz per trial.
pub const MAX_STRIDE: usize = 1 << 20;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    #[error("stride must be at least 1")]
    ZeroStride,
    #[error("stride {stride} exceeds the maximum of {max}")]
    StrideTooLarge { stride: usize, max: usize },
    #[error("{trials} trials of stride {stride} overflow the global index space")]
    CapacityOverflow { trials: usize, stride: usize },
    #[error("local frame {frame} is outside stride {stride}")]
    FrameOutsideStride { frame: usize, stride: usize },
    #[error("index {index} does not belong to trial {trial} (frame count {frame_count})")]
    OutOfRange { index: GlobalIndex, trial: TrialOrdinal, frame_count: usize },
    #[error("index {index} exceeds store capacity {capacity}")]
    BeyondCapacity { index: GlobalIndex, capacity: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Stride(usize);

impl Stride {
    pub fn new(value: usize) -> Result<Self, IndexError> {
        if value == 0 {
            return Err(IndexError::ZeroStride);
        }
        if value > MAX_STRIDE {
            return Err(IndexError::StrideTooLarge { stride: value, max: MAX_STRIDE });
        }
        Ok(Self(value))
    }

    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for Stride {
    fn default() -> Self {
        Self(DEFAULT_STRIDE)
    }
}

/// Half-open run of global indices `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexRange {
    start: GlobalIndex,
    end: GlobalIndex,
}

impl IndexRange {
    /// Builds `[start, end)`; an inverted pair yields an empty range anchored at `start`.
    pub fn new(start: GlobalIndex, end: GlobalIndex) -> Self {
        if end < start {
            return Self { start, end: start };
        }
        Self { start, end }
    }

    pub fn inclusive(start: GlobalIndex, last: GlobalIndex) -> Self {
        Self::new(start, last.next())
    }

    pub fn start(&self) -> GlobalIndex {
        self.start
    }

    pub fn end(&self) -> GlobalIndex {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end.get() - self.start.get()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, index: GlobalIndex) -> bool {
        self.start <= index && index < self.end
    }

    /// Restricts this range to `bounds`.
    pub fn clamp_to(&self, bounds: IndexRange) -> Self {
        let start = self.start.max(bounds.start);
        let end = self.end.min(bounds.end);
        Self::new(start, end)
    }

    pub fn iter(&self) -> impl Iterator<Item = GlobalIndex> {
        (self.start.get()..self.end.get()).map(GlobalIndex::new)
    }
}

/// Pure conversions between global indices and `(trial, local frame)` pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexSpace {
    stride: Stride,
}

impl IndexSpace {
    pub fn new(stride: Stride) -> Self {
        Self { stride }
    }

    pub fn stride(&self) -> usize {
        self.stride.get()
    }

    pub fn to_global(
        &self,
        trial: TrialOrdinal,
        frame: LocalFrame,
    ) -> Result<GlobalIndex, IndexError> {
        let stride = self.stride();
        if frame.get() >= stride {
            return Err(IndexError::FrameOutsideStride { frame: frame.get(), stride });
        }
        trial
            .get()
            .checked_mul(stride)
            .and_then(|base| base.checked_add(frame.get()))
            .map(GlobalIndex::new)
            .ok_or(IndexError::CapacityOverflow { trials: trial.get(), stride })
    }

    /// Maps `index` back into `trial`, rejecting padding past `frame_count`.
    pub fn to_local(
        &self,
        index: GlobalIndex,
        trial: TrialOrdinal,
        frame_count: usize,
    ) -> Result<LocalFrame, IndexError> {
        let limit = frame_count.min(self.stride());
        let local =
            trial.get().checked_mul(self.stride()).and_then(|base| index.get().checked_sub(base));
        match local {
            Some(local) if local < limit => Ok(LocalFrame::new(local)),
            _ => Err(IndexError::OutOfRange { index, trial, frame_count }),
        }
    }

    /// Splits any index into its owning trial and frame, ignoring per-trial frame counts.
    pub fn decompose(&self, index: GlobalIndex) -> (TrialOrdinal, LocalFrame) {
        let stride = self.stride();
        (TrialOrdinal::new(index.get() / stride), LocalFrame::new(index.get() % stride))
    }

    /// The full block reserved for `trial`, padding included.
    ///
    /// Saturates at `usize::MAX`; such a block lies past any store capacity.
    pub fn trial_range(&self, trial: TrialOrdinal) -> IndexRange {
        let start = trial.get().saturating_mul(self.stride());
        IndexRange::new(
            GlobalIndex::new(start),
            GlobalIndex::new(start.saturating_add(self.stride())),
        )
    }

    /// Number of indices covering `trial_count` full blocks.
    pub fn capacity(&self, trial_count: usize) -> Result<usize, IndexError> {
        trial_count
            .checked_mul(self.stride())
            .ok_or(IndexError::CapacityOverflow { trials: trial_count, stride: self.stride() })
    }
}

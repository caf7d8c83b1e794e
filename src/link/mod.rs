// SPDX-FileCopyrightText: 2026 Mocap Link contributors
// SPDX-License-Identifier: LicenseRef-MocapLink-Proprietary
//
// All rights reserved.
//
// This file is part of Mocap Link and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Linked-index state and its propagation.
//!
//! `AttributeStore` is the single writer of per-index selection state. Writes made during one
//! input cycle are coalesced and pushed through `UpdateBroadcaster` to every registered
//! `VisualConsumer` when the cycle is flushed.

use thiserror::Error;

use crate::model::{
    AttributeRecord, ElementHandle, ElementVisual, GlobalIndex, GroupKind, IndexError, LocalFrame,
    TrialOrdinal,
};

pub mod broadcast;
pub mod store;

pub use broadcast::{ConsumerId, NotifyReport, UpdateBroadcaster};
pub use store::{AttributeStore, FlushReport};

/// Failures a consumer reports for an update it could not apply.
///
/// Both variants are expected in normal operation and are filtered by the broadcaster.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error(transparent)]
    OutOfRange(#[from] IndexError),
    #[error("no visual element for frame {frame} of trial {trial}")]
    MissingElement { trial: TrialOrdinal, frame: LocalFrame },
}

/// Anything that renders frames of one trial and must follow attribute changes.
pub trait VisualConsumer {
    fn trial(&self) -> TrialOrdinal;

    fn kind(&self) -> GroupKind;

    /// Number of real (non-padding) frames of the trial.
    fn frame_count(&self) -> usize;

    /// Applies `record` to the elements of the frame `index` maps to.
    ///
    /// Returns the number of elements touched. Indices of other trials yield
    /// `LinkError::OutOfRange`; frames without elements yield `LinkError::MissingElement`.
    fn on_update(&mut self, index: GlobalIndex, record: AttributeRecord)
        -> Result<usize, LinkError>;

    /// Maps a picked element back to the local frame that owns it, if the element is ours.
    fn resolve_hit(&self, hit: &ElementHandle) -> Option<LocalFrame>;

    /// A pickable element of `frame`, standing in for a ray hit on that frame.
    fn element_at(&self, frame: LocalFrame) -> Option<ElementHandle>;

    /// Representative visual state of `frame`, if any element exists there.
    fn frame_visual(&self, frame: LocalFrame) -> Option<ElementVisual>;

    fn offset(&self) -> [f32; 3];

    fn translate(&mut self, delta: [f32; 3]);
}

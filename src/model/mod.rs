// SPDX-FileCopyrightText: 2026 Mocap Link contributors
// SPDX-License-Identifier: LicenseRef-MocapLink-Proprietary
//
// All rights reserved.
//
// This file is part of Mocap Link and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Typed ids, the global index space, per-index attribute records, and the logical shape of
//! loaded trials (marker series plus sparse poses).

pub mod attribute;
pub mod color;
pub mod element;
pub mod fixtures;
pub mod ids;
pub mod index;
pub mod trial;
pub mod visual;

pub use attribute::AttributeRecord;
pub use color::Rgba;
pub use element::ElementHandle;
pub use ids::{GlobalIndex, GroupKind, LocalFrame, TrialOrdinal};
pub use index::{IndexError, IndexRange, IndexSpace, Stride, DEFAULT_STRIDE, MAX_STRIDE};
pub use trial::{
    BoneMesh, MarkerSample, MarkerSeries, PoseFrames, PoseMeshSet, TrialData, TrialError,
};
pub use visual::{ElementVisual, Material};

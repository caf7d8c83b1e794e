// SPDX-FileCopyrightText: 2026 Mocap Link contributors
// SPDX-License-Identifier: LicenseRef-MocapLink-Proprietary
//
// All rights reserved.
//
// This file is part of Mocap Link and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mocap Link: linked-index selection across motion-capture trials.
//!
//! Every frame of every loaded trial has one global index (`trial * stride + frame`). Selecting
//! a frame in any view writes that index's attribute record once; marker spheres and skeletal
//! poses of the trial follow through their consumers.

pub mod config;
pub mod consumer;
pub mod link;
pub mod model;
pub mod palette;
pub mod replay;
pub mod select;
pub mod session;
pub mod tui;

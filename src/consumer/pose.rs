// SPDX-FileCopyrightText: 2026 Mocap Link contributors
// SPDX-License-Identifier: LicenseRef-MocapLink-Proprietary
//
// All rights reserved.
//
// This file is part of Mocap Link and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use smallvec::SmallVec;

use crate::link::{LinkError, VisualConsumer};
use crate::model::{
    AttributeRecord, ElementHandle, ElementVisual, GlobalIndex, GroupKind, IndexSpace, LocalFrame,
    PoseFrames, TrialOrdinal,
};
use crate::palette::{HIGHLIGHT, POSE_BASE};

use super::add_offset;

#[derive(Debug, Clone, PartialEq)]
pub struct Bone {
    pub name: String,
    pub visual: ElementVisual,
}

/// Skeletal poses of one trial. Poses are sparse: only frames with a loaded mesh set exist.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseTrialConsumer {
    trial: TrialOrdinal,
    space: IndexSpace,
    frame_count: usize,
    poses: BTreeMap<LocalFrame, SmallVec<[Bone; 8]>>,
    offset: [f32; 3],
}

impl PoseTrialConsumer {
    pub fn new(
        trial: TrialOrdinal,
        space: IndexSpace,
        frame_count: usize,
        poses: &PoseFrames,
    ) -> Self {
        let poses = poses
            .iter()
            .map(|(&frame, meshes)| {
                let bones = meshes
                    .bones()
                    .iter()
                    .map(|mesh| Bone {
                        name: mesh.name().to_owned(),
                        visual: ElementVisual::new(POSE_BASE),
                    })
                    .collect();
                (frame, bones)
            })
            .collect();

        Self { trial, space, frame_count, poses, offset: [0.0; 3] }
    }

    pub fn pose_count(&self) -> usize {
        self.poses.len()
    }

    pub fn has_pose(&self, frame: LocalFrame) -> bool {
        self.poses.contains_key(&frame)
    }

    pub fn bones(&self, frame: LocalFrame) -> Option<&[Bone]> {
        self.poses.get(&frame).map(|bones| bones.as_slice())
    }
}

impl VisualConsumer for PoseTrialConsumer {
    fn trial(&self) -> TrialOrdinal {
        self.trial
    }

    fn kind(&self) -> GroupKind {
        GroupKind::Poses
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
        let missing = LinkError::MissingElement { trial: self.trial, frame };

        let bones = self.poses.get_mut(&frame).ok_or_else(|| missing.clone())?;
        if bones.is_empty() {
            return Err(missing);
        }
        for bone in bones.iter_mut() {
            bone.visual.apply(record, POSE_BASE, HIGHLIGHT);
        }
        Ok(bones.len())
    }

    fn resolve_hit(&self, hit: &ElementHandle) -> Option<LocalFrame> {
        let ElementHandle::Bone { trial, frame, bone } = *hit else {
            return None;
        };
        if trial != self.trial {
            return None;
        }
        let bone = self.poses.get(&frame)?.get(bone)?;
        bone.visual.enabled.then_some(frame)
    }

    fn element_at(&self, frame: LocalFrame) -> Option<ElementHandle> {
        let bones = self.poses.get(&frame)?;
        let bone = bones.iter().position(|bone| bone.visual.enabled)?;
        Some(ElementHandle::Bone { trial: self.trial, frame, bone })
    }

    fn frame_visual(&self, frame: LocalFrame) -> Option<ElementVisual> {
        self.poses.get(&frame)?.first().map(|bone| bone.visual)
    }

    fn offset(&self) -> [f32; 3] {
        self.offset
    }

    fn translate(&mut self, delta: [f32; 3]) {
        add_offset(&mut self.offset, delta);
    }
}

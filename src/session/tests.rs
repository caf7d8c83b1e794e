// SPDX-FileCopyrightText: 2026 Mocap Link contributors
// SPDX-License-Identifier: LicenseRef-MocapLink-Proprietary
//
// All rights reserved.
//
// This file is part of Mocap Link and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::{fixture, rstest};

use super::{FrameRun, InputCycle, LinkedSession, SessionError};
use crate::model::fixtures::SyntheticTrial;
use crate::model::{
    AttributeRecord, ElementHandle, GlobalIndex, GroupKind, LocalFrame, Stride, TrialError,
    TrialOrdinal,
};
use crate::select::{SelectionMode, SliderValue};

const STRIDE: usize = 1800;

fn t(ordinal: usize) -> TrialOrdinal {
    TrialOrdinal::new(ordinal)
}

#[fixture]
fn session() -> LinkedSession {
    LinkedSession::from_trials(
        Stride::new(STRIDE).unwrap(),
        [
            SyntheticTrial::new("walk", 500, 4).with_pose_frames(vec![0, 10, 20]).build(),
            SyntheticTrial::new("run", 420, 3).build(),
        ],
    )
    .unwrap()
}

fn record(session: &LinkedSession, trial: usize, frame: usize) -> AttributeRecord {
    session.store().get(GlobalIndex::new(trial * STRIDE + frame))
}

fn highlighted(session: &LinkedSession, trial: usize) -> Vec<usize> {
    (0..STRIDE).filter(|&frame| record(session, trial, frame) == AttributeRecord::Highlighted).collect()
}

fn marker_highlighted(session: &LinkedSession, trial: usize, frame: usize) -> bool {
    session
        .consumer(t(trial), GroupKind::Markers)
        .and_then(|consumer| consumer.frame_visual(LocalFrame::new(frame)))
        .is_some_and(|visual| visual.is_highlighted())
}

fn pick_marker(trial: usize, frame: usize) -> Option<ElementHandle> {
    Some(ElementHandle::Marker { trial: t(trial), marker: 0, frame: LocalFrame::new(frame) })
}

fn click(trial: usize, frame: usize) -> InputCycle {
    InputCycle { primary_down: true, pick: pick_marker(trial, frame), ..InputCycle::default() }
}

fn brush(trial: usize, frame: usize) -> InputCycle {
    InputCycle { brush_held: true, pick: pick_marker(trial, frame), ..InputCycle::default() }
}

fn idle() -> InputCycle {
    InputCycle::default()
}

#[rstest]
fn trials_get_one_group_per_element_kind(session: LinkedSession) {
    let groups: Vec<_> = session.groups().iter().map(|g| (g.trial(), g.kind())).collect();
    assert_eq!(
        groups,
        vec![
            (t(0), GroupKind::Markers),
            (t(0), GroupKind::Poses),
            (t(1), GroupKind::Markers),
        ]
    );
    assert_eq!(session.store().capacity(), 2 * STRIDE);
    assert!(session.groups().iter().all(|g| g.controller().mode() == SelectionMode::None));
    assert!(session.trial(t(0)).unwrap().has_poses);
}

#[rstest]
fn trials_longer_than_the_stride_are_rejected(mut session: LinkedSession) {
    let err = session.add_trial(SyntheticTrial::new("long", STRIDE + 1, 1).build()).unwrap_err();
    assert!(matches!(err, SessionError::Trial(TrialError::TooManyFrames { .. })));
    assert_eq!(session.trials().len(), 2);
    assert_eq!(session.groups().len(), 3);
}

#[rstest]
fn unknown_trials_are_reported(mut session: LinkedSession) {
    assert_eq!(session.set_masked(t(7), 0..3, true), Err(SessionError::UnknownTrial(t(7))));
}

#[rstest]
fn idle_session_ignores_input(mut session: LinkedSession) {
    let report = session.step(&click(1, 10));
    assert_eq!(report.changed, 0);
    assert!(highlighted(&session, 1).is_empty());
}

#[rstest]
fn click_on_a_marker_highlights_its_frame_in_that_trial_only(mut session: LinkedSession) {
    session.enable_click();

    let report = session.step(&click(1, 10));

    assert_eq!(report.changed, 1);
    assert_eq!(report.flush.notified, 1);
    assert_eq!(record(&session, 1, 10), AttributeRecord::Highlighted);
    assert_eq!(record(&session, 0, 10), AttributeRecord::Normal);
    assert!(marker_highlighted(&session, 1, 10));
    assert!(!marker_highlighted(&session, 0, 10));
}

#[rstest]
fn click_on_a_bone_highlights_the_markers_of_that_frame(mut session: LinkedSession) {
    session.enable_click();
    let pick = Some(ElementHandle::Bone { trial: t(0), frame: LocalFrame::new(20), bone: 1 });

    session.step(&InputCycle { primary_down: true, pick, ..InputCycle::default() });

    assert_eq!(highlighted(&session, 0), vec![20]);
    assert!(marker_highlighted(&session, 0, 20));
    let bones = session.consumer(t(0), GroupKind::Poses).unwrap();
    assert!(bones.frame_visual(LocalFrame::new(20)).unwrap().is_highlighted());
}

#[rstest]
fn clear_resets_every_trial_in_click_mode(mut session: LinkedSession) {
    session.enable_click();
    session.step(&click(0, 3));
    session.step(&click(1, 4));

    session.step(&InputCycle { clear_pressed: true, ..InputCycle::default() });

    assert!(highlighted(&session, 0).is_empty());
    assert!(highlighted(&session, 1).is_empty());
    assert!(!marker_highlighted(&session, 1, 4));
}

#[rstest]
fn brush_accumulates_frames(mut session: LinkedSession) {
    session.enable_brush();
    for frame in [3, 7, 3] {
        session.step(&brush(0, frame));
    }
    assert_eq!(highlighted(&session, 0), vec![3, 7]);
    assert!(highlighted(&session, 1).is_empty());
}

#[rstest]
fn slider_mode_leaves_pose_groups_idle(mut session: LinkedSession) {
    session.enable_slider();
    assert_eq!(session.mode(), SelectionMode::SliderRange);
    assert_eq!(
        session.group(t(0), GroupKind::Poses).unwrap().controller().mode(),
        SelectionMode::None
    );
    session.enable_brush();
    assert_eq!(
        session.group(t(0), GroupKind::Poses).unwrap().controller().mode(),
        SelectionMode::Brush
    );
}

#[rstest]
fn shared_slider_drives_every_trial(mut session: LinkedSession) {
    session.set_slider(-1.0);
    session.enable_slider();

    session.set_slider(0.0);
    session.step(&idle());
    assert_eq!(highlighted(&session, 0), vec![0]);
    assert_eq!(highlighted(&session, 1), vec![0]);

    session.set_slider(50.0);
    session.step(&idle());
    let expected: Vec<usize> = (0..=50).collect();
    assert_eq!(highlighted(&session, 0), expected);
    assert_eq!(highlighted(&session, 1), expected);
    assert!(marker_highlighted(&session, 1, 50));
}

#[rstest]
fn moving_the_slider_back_notifies_each_cleared_frame_once(mut session: LinkedSession) {
    session.enable_slider();
    session.set_slider(50.0);
    session.step(&idle());

    session.set_slider(20.0);
    let report = session.step(&idle());

    // Frames 21..=50 of both trials.
    assert_eq!(report.flush.notified, 60);
    assert_eq!(highlighted(&session, 0), (0..=20).collect::<Vec<_>>());
    assert!(!marker_highlighted(&session, 0, 21));
}

#[rstest]
fn inactive_slider_clears_every_group_before_resetting(mut session: LinkedSession) {
    session.enable_slider();
    session.set_slider(30.0);
    session.step(&idle());

    session.set_slider(-1.0);
    let report = session.step(&idle());

    assert!(report.slider_reset);
    assert_eq!(report.deactivated, 2);
    assert_eq!(session.slider(), SliderValue::START);
    assert!(highlighted(&session, 0).is_empty());
    assert!(highlighted(&session, 1).is_empty());
    assert_eq!(session.mode(), SelectionMode::None);
}

#[rstest]
fn alt_anchor_applies_to_every_trial(mut session: LinkedSession) {
    session.enable_slider();
    session.set_slider(20.0);
    session.step(&InputCycle { alt_pressed: true, ..InputCycle::default() });

    session.set_slider(60.0);
    session.step(&idle());

    let expected: Vec<usize> = (20..60).collect();
    assert_eq!(highlighted(&session, 0), expected);
    assert_eq!(highlighted(&session, 1), expected);
    let snapshot = session.snapshot();
    assert!(snapshot.groups.iter().filter(|g| g.kind == GroupKind::Markers).all(|g| g.alt_select));
}

#[rstest]
fn slider_is_clamped_to_the_stride(mut session: LinkedSession) {
    session.set_slider(5000.0);
    assert_eq!(session.slider().get(), (STRIDE - 1) as f32);
    session.set_slider(-30.0);
    assert_eq!(session.slider(), SliderValue::INACTIVE);
    session.nudge_slider(1.0);
    assert_eq!(session.slider(), SliderValue::START);
}

#[rstest]
fn slider_past_a_short_trial_stops_at_its_last_frame(mut session: LinkedSession) {
    session.enable_slider();
    session.set_slider(450.0);
    session.step(&idle());

    assert_eq!(highlighted(&session, 0), (0..=450).collect::<Vec<_>>());
    assert_eq!(highlighted(&session, 1), (0..420).collect::<Vec<_>>());
    assert_eq!(record(&session, 1, 430), AttributeRecord::Normal);
    assert!(marker_highlighted(&session, 1, 419));

    assert_eq!(session.mask_highlighted().unwrap(), 451 + 420);
}

#[rstest]
fn masked_frames_hide_and_refuse_picks(mut session: LinkedSession) {
    let changed = session.set_masked(t(1), 5..8, true).unwrap();
    assert_eq!(changed, 3);
    let consumer = session.consumer(t(1), GroupKind::Markers).unwrap();
    assert!(!consumer.frame_visual(LocalFrame::new(6)).unwrap().enabled);

    session.enable_click();
    session.step(&click(1, 6));
    assert_eq!(record(&session, 1, 6), AttributeRecord::Masked);

    session.set_masked(t(1), 0..10, false).unwrap();
    assert_eq!(record(&session, 1, 6), AttributeRecord::Normal);
    let consumer = session.consumer(t(1), GroupKind::Markers).unwrap();
    assert!(consumer.frame_visual(LocalFrame::new(6)).unwrap().enabled);
}

#[rstest]
fn masking_ignores_padding_frames(mut session: LinkedSession) {
    let changed = session.set_masked(t(1), 415..900, true).unwrap();
    assert_eq!(changed, 5);
    assert_eq!(record(&session, 1, 420), AttributeRecord::Normal);
}

#[rstest]
fn mask_highlighted_then_unmask_all(mut session: LinkedSession) {
    session.enable_brush();
    session.step(&brush(0, 2));
    session.step(&brush(1, 9));

    assert_eq!(session.mask_highlighted().unwrap(), 2);
    assert_eq!(record(&session, 0, 2), AttributeRecord::Masked);
    assert_eq!(record(&session, 1, 9), AttributeRecord::Masked);

    assert_eq!(session.unmask_all().unwrap(), 2);
    assert!(session.store().iter_marked().next().is_none());
}

#[rstest]
fn separation_is_idempotent_and_reversible(mut session: LinkedSession) {
    let offset = |session: &LinkedSession, trial| {
        session.consumer(t(trial), GroupKind::Markers).unwrap().offset()[0]
    };

    session.separate_trials();
    session.separate_trials();
    assert!(session.is_separated());
    assert_eq!(offset(&session, 0), -5.0);
    assert_eq!(offset(&session, 1), 0.0);
    assert_eq!(session.consumer(t(0), GroupKind::Poses).unwrap().offset()[0], -5.0);

    session.unseparate_trials();
    session.unseparate_trials();
    assert_eq!(offset(&session, 0), 0.0);
}

#[rstest]
fn adding_a_trial_keeps_the_separated_layout(mut session: LinkedSession) {
    session.separate_trials();
    session.add_trial(SyntheticTrial::new("jump", 100, 2).build()).unwrap();

    let offsets: Vec<f32> = (0..3)
        .map(|trial| session.consumer(t(trial), GroupKind::Markers).unwrap().offset()[0])
        .collect();
    assert_eq!(offsets, vec![-5.0, 0.0, 5.0]);
}

#[rstest]
fn element_at_stands_in_for_a_ray_hit(mut session: LinkedSession) {
    session.enable_click();
    let pick = session.element_at(t(0), GroupKind::Poses, LocalFrame::new(10));
    assert!(pick.is_some());
    assert_eq!(session.element_at(t(0), GroupKind::Poses, LocalFrame::new(11)), None);
    assert_eq!(session.element_at(t(1), GroupKind::Poses, LocalFrame::new(10)), None);

    session.step(&InputCycle { primary_down: true, pick, ..InputCycle::default() });
    assert_eq!(highlighted(&session, 0), vec![10]);
}

#[rstest]
fn snapshot_collapses_frames_into_runs(mut session: LinkedSession) {
    session.enable_brush();
    for frame in [4, 5, 6, 9] {
        session.step(&brush(1, frame));
    }
    session.set_masked(t(0), 0..2, true).unwrap();

    let snapshot = session.snapshot();

    assert_eq!(snapshot.stride, STRIDE);
    let run = snapshot.trial(t(1)).unwrap();
    assert_eq!(run.highlighted, vec![FrameRun { start: 4, end: 6 }, FrameRun { start: 9, end: 9 }]);
    assert_eq!(snapshot.trial(t(0)).unwrap().masked, vec![FrameRun { start: 0, end: 1 }]);
    assert_eq!(snapshot.groups.len(), 3);
}

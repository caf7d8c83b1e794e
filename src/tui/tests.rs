// SPDX-FileCopyrightText: 2026 Mocap Link contributors
// SPDX-License-Identifier: LicenseRef-MocapLink-Proprietary
//
// All rights reserved.
//
// This file is part of Mocap Link and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use rstest::{fixture, rstest};

use super::{column_frames, draw, App};
use crate::config::KeyBindings;
use crate::model::fixtures::SyntheticTrial;
use crate::model::{AttributeRecord, GlobalIndex, Stride};
use crate::select::{SelectionMode, SliderValue};
use crate::session::LinkedSession;

const WIDTH: u16 = 80;
const HEIGHT: u16 = 10;
// Inner strip area starts at x = 1 (border) + 18 (labels).
const FRAME_X: u16 = 19;
const ROW_T0_MARKERS: u16 = 2;
const ROW_T0_POSES: u16 = 3;
const ROW_T1_MARKERS: u16 = 4;

struct Ctx {
    app: App,
    terminal: Terminal<TestBackend>,
}

impl Ctx {
    fn render(&mut self) -> Buffer {
        self.terminal.draw(|frame| draw(frame, &mut self.app)).unwrap();
        self.terminal.backend().buffer().clone()
    }

    fn key(&mut self, code: KeyCode) {
        self.app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
        self.render();
    }

    fn mouse(&mut self, kind: MouseEventKind, column: u16, row: u16) {
        self.app.handle_mouse(MouseEvent { kind, column, row, modifiers: KeyModifiers::NONE });
        self.render();
    }

    fn record(&self, trial: usize, frame: usize) -> AttributeRecord {
        self.app.session.store().get(GlobalIndex::new(trial * 1800 + frame))
    }
}

fn symbol(buffer: &Buffer, x: u16, y: u16) -> &str {
    buffer.content[usize::from(y * buffer.area.width + x)].symbol()
}

fn row_text(buffer: &Buffer, y: u16) -> String {
    (0..buffer.area.width).map(|x| symbol(buffer, x, y)).collect()
}

#[fixture]
fn ctx() -> Ctx {
    let session = LinkedSession::from_trials(
        Stride::default(),
        [
            SyntheticTrial::new("walk", 100, 2).with_pose_frames(vec![0, 50]).build(),
            SyntheticTrial::new("run", 60, 2).build(),
        ],
    )
    .unwrap();
    let mut ctx = Ctx {
        app: App::new(session, KeyBindings::default()),
        terminal: Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap(),
    };
    ctx.render();
    ctx
}

#[rstest]
fn renders_one_labelled_strip_per_group(mut ctx: Ctx) {
    let buffer = ctx.render();

    assert!(row_text(&buffer, ROW_T0_MARKERS).contains(" t0 markers"));
    assert!(row_text(&buffer, ROW_T0_POSES).contains(" t0 poses"));
    assert!(row_text(&buffer, ROW_T1_MARKERS).contains(" t1 markers"));
    assert_eq!(ctx.app.strips.len(), 3);
    assert!(row_text(&buffer, 0).contains("Mode:none"));
}

#[rstest]
fn pose_strips_only_draw_frames_with_a_pose(mut ctx: Ctx) {
    let buffer = ctx.render();
    assert_eq!(symbol(&buffer, FRAME_X, ROW_T0_POSES), "▁");
    assert_eq!(symbol(&buffer, FRAME_X + 1, ROW_T0_POSES), " ");
}

#[rstest]
fn clicking_a_strip_highlights_the_frame_under_the_pointer(mut ctx: Ctx) {
    ctx.key(KeyCode::Char('1'));
    assert_eq!(ctx.app.session.mode(), SelectionMode::Click);

    ctx.mouse(MouseEventKind::Down(MouseButton::Left), FRAME_X + 10, ROW_T1_MARKERS);

    assert_eq!(ctx.record(1, 10), AttributeRecord::Highlighted);
    assert_eq!(ctx.record(0, 10), AttributeRecord::Normal);
    let buffer = ctx.render();
    assert_eq!(symbol(&buffer, FRAME_X + 10, ROW_T1_MARKERS), "█");
}

#[rstest]
fn dragging_only_paints_in_brush_mode(mut ctx: Ctx) {
    ctx.key(KeyCode::Char('1'));
    ctx.mouse(MouseEventKind::Drag(MouseButton::Left), FRAME_X + 3, ROW_T1_MARKERS);
    assert_eq!(ctx.record(1, 3), AttributeRecord::Normal);

    ctx.key(KeyCode::Char('2'));
    for column in 3..6 {
        ctx.mouse(MouseEventKind::Drag(MouseButton::Left), FRAME_X + column, ROW_T1_MARKERS);
    }
    assert!((3..6).all(|frame| ctx.record(1, frame) == AttributeRecord::Highlighted));
}

#[rstest]
fn clicks_on_labels_pick_nothing(mut ctx: Ctx) {
    ctx.key(KeyCode::Char('1'));
    ctx.mouse(MouseEventKind::Down(MouseButton::Left), 4, ROW_T1_MARKERS);
    assert_eq!(ctx.app.session.store().iter_marked().count(), 0);
}

#[rstest]
fn slider_keys_grow_the_range_and_clear_resets(mut ctx: Ctx) {
    ctx.key(KeyCode::Char('3'));
    ctx.key(KeyCode::Right);
    assert_eq!(ctx.app.session.slider(), SliderValue::START);
    assert_eq!(ctx.record(0, 0), AttributeRecord::Highlighted);

    ctx.key(KeyCode::PageUp);
    assert!((0..=10).all(|frame| ctx.record(1, frame) == AttributeRecord::Highlighted));

    ctx.key(KeyCode::Char('x'));
    assert_eq!(ctx.app.session.store().iter_marked().count(), 0);
    assert_eq!(ctx.app.session.mode(), SelectionMode::None);
    assert_eq!(ctx.app.toast.as_ref().map(|toast| toast.message.as_str()), Some("Selection cleared"));
}

#[rstest]
fn mask_key_hides_highlighted_frames(mut ctx: Ctx) {
    ctx.key(KeyCode::Char('1'));
    ctx.mouse(MouseEventKind::Down(MouseButton::Left), FRAME_X + 7, ROW_T1_MARKERS);

    ctx.key(KeyCode::Char('m'));
    assert_eq!(ctx.record(1, 7), AttributeRecord::Masked);
    let buffer = ctx.render();
    assert_eq!(symbol(&buffer, FRAME_X + 7, ROW_T1_MARKERS), "·");

    ctx.key(KeyCode::Char('u'));
    assert_eq!(ctx.record(1, 7), AttributeRecord::Normal);
}

#[rstest]
fn separate_key_toggles_the_layout(mut ctx: Ctx) {
    ctx.key(KeyCode::Char('s'));
    assert!(ctx.app.session.is_separated());
    assert!(row_text(&ctx.render(), 0).contains("separated"));
    ctx.key(KeyCode::Char('s'));
    assert!(!ctx.app.session.is_separated());
}

#[rstest]
#[case::quit_key(KeyCode::Char('q'))]
#[case::escape(KeyCode::Esc)]
fn quit_keys_stop_the_loop(mut ctx: Ctx, #[case] code: KeyCode) {
    ctx.key(code);
    assert!(ctx.app.should_quit);
}

#[test]
fn columns_cover_every_frame_once_when_frames_outnumber_columns() {
    let covered: Vec<usize> = (0..60)
        .flat_map(|column| {
            let (start, end) = column_frames(column, 60, 100);
            start..end
        })
        .collect();
    assert_eq!(covered, (0..100).collect::<Vec<_>>());
}

#[test]
fn columns_repeat_frames_when_columns_outnumber_frames() {
    assert_eq!(column_frames(0, 60, 30), (0, 1));
    assert_eq!(column_frames(1, 60, 30), (0, 1));
    assert_eq!(column_frames(59, 60, 30), (29, 30));
}

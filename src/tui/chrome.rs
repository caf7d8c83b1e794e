// SPDX-FileCopyrightText: 2026 Mocap Link contributors
// SPDX-License-Identifier: LicenseRef-MocapLink-Proprietary
//
// All rights reserved.
//
// This file is part of Mocap Link and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Header, strip, and footer helpers used by TUI rendering.
fn header_line(app: &App) -> Line<'static> {
    let session = &app.session;
    let slider = match session.slider().frame() {
        Some(frame) => frame.get().to_string(),
        None => "off".to_owned(),
    };
    let mut spans = Vec::<Span<'static>>::new();
    push_footer_entry(&mut spans, "MODE", &session.mode().to_string());
    push_footer_entry(&mut spans, "SLIDER", &slider);
    push_footer_entry(&mut spans, "TRIALS", &session.trials().len().to_string());
    if session.is_separated() {
        push_footer_entry(&mut spans, "LAYOUT", "separated");
    }
    Line::from(spans)
}

fn strip_rows(inner: Rect, session: &LinkedSession) -> Vec<StripRow> {
    let width = inner.width.saturating_sub(LABEL_WIDTH);
    session
        .groups()
        .iter()
        .zip(inner.y..inner.y.saturating_add(inner.height))
        .filter_map(|(group, y)| {
            let frame_count = session.trial(group.trial()).ok()?.frame_count;
            Some(StripRow {
                trial: group.trial(),
                kind: group.kind(),
                frame_count,
                y,
                x: inner.x + LABEL_WIDTH,
                width,
            })
        })
        .collect()
}

/// Frames `[start, end)` drawn in `column` of a strip `width` columns wide.
fn column_frames(column: u16, width: u16, frame_count: usize) -> (usize, usize) {
    let (column, width) = (usize::from(column), usize::from(width.max(1)));
    let start = column * frame_count / width;
    let end = ((column + 1) * frame_count / width).max(start + 1).min(frame_count);
    (start, end)
}

fn strip_line(session: &LinkedSession, row: &StripRow) -> Line<'static> {
    let mode = session
        .group(row.trial, row.kind)
        .map(|group| group.controller().mode().to_string())
        .unwrap_or_default();
    let label = format!("{:>3} {:<8}{:<6}", row.trial.to_string(), row.kind.to_string(), mode);
    let accent = rgba_color(TrialTheme::for_trial(row.trial).accent());
    let mut spans = vec![Span::styled(label, Style::default().fg(accent))];

    let Some(consumer) = session.consumer(row.trial, row.kind) else {
        return Line::from(spans);
    };
    let slider = session.slider().frame().map(LocalFrame::get);

    for column in 0..row.width {
        let (start, end) = column_frames(column, row.width, row.frame_count);
        let visuals =
            (start..end).filter_map(|frame| consumer.frame_visual(LocalFrame::new(frame)));

        let mut cell: Option<(&'static str, Color)> = None;
        for visual in visuals {
            if !visual.enabled {
                cell = Some(("·", MASKED_COLOR));
                break;
            }
            let color = rgba_color(visual.color);
            if visual.is_highlighted() {
                cell = Some(("█", color));
            } else if cell.is_none() {
                cell = Some(("▁", color));
            }
        }

        let (symbol, color) = cell.unwrap_or((" ", Color::Reset));
        let mut style = Style::default().fg(color);
        if slider.is_some_and(|frame| (start..end).contains(&frame)) {
            style = style.bg(SLIDER_COLOR);
        }
        spans.push(Span::styled(symbol, style));
    }
    Line::from(spans)
}

fn rgba_color(color: crate::model::Rgba) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

fn footer_help_line(keys: &KeyBindings, toast_suffix: &str) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();
    push_footer_entry(&mut spans, "CLICK", &keys.click.to_string());
    push_footer_entry(&mut spans, "BRUSH", &keys.brush.to_string());
    push_footer_entry(&mut spans, "SLIDER", &format!("{} ←→", keys.slider));
    push_footer_entry(&mut spans, "ALT", &keys.alt.to_string());
    push_footer_entry(&mut spans, "CLEAR", &keys.clear.to_string());
    push_footer_entry(&mut spans, "MASK", &format!("{}/{}", keys.mask, keys.unmask));
    push_footer_entry(&mut spans, "SPLIT", &keys.separate.to_string());
    push_footer_entry(&mut spans, "QUIT", &keys.quit.to_string());
    if !toast_suffix.is_empty() {
        spans.push(Span::raw(toast_suffix.to_owned()));
    }
    Line::from(spans)
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, label: &str, value: &str) {
    if !spans.is_empty() {
        spans.push(Span::styled(" | ", Style::default().fg(FOOTER_LABEL_COLOR)));
    }
    spans.push(Span::styled(
        format!("{}:", footer_label_ucfirst(label)),
        Style::default().fg(FOOTER_LABEL_COLOR),
    ));
    spans.push(Span::styled(
        value.to_owned(),
        Style::default().fg(FOOTER_KEY_COLOR).add_modifier(Modifier::BOLD),
    ));
}

fn footer_label_ucfirst(label: &str) -> String {
    let lower = label.to_lowercase();
    let mut chars = lower.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = first.to_uppercase().collect::<String>();
    out.push_str(chars.as_str());
    out
}

use std::rc::Rc;
use std::time::Duration;

use approx::assert_abs_diff_eq;
use smithay::utils::{Logical, Point, Rectangle, Size, Transform};
use taskview_config::LayoutKind;

use super::*;
use crate::headless::{DrawCall, HeadlessHost};
use crate::host::{Input, Monitors, RenderPass, Renderer, WindowId, Workspaces};
use crate::utils::center_of;

const MON: MonitorId = MonitorId(1);

fn ws(id: i64) -> WorkspaceId {
    WorkspaceId(id)
}

fn host(workspaces: &[i64]) -> HeadlessHost {
    host_at(workspaces, Point::from((0., 0.)), Transform::Normal)
}

fn host_at(
    workspaces: &[i64],
    position: Point<f64, Logical>,
    transform: Transform,
) -> HeadlessHost {
    let mut host = HeadlessHost::new();
    host.add_monitor(MON, position, Size::from((1920., 1080.)), 1., transform);
    for id in workspaces {
        host.add_workspace(ws(*id), MON);
    }
    // Park the pointer away from any monitor.
    host.set_pointer(Point::from((-1000., -1000.)));
    host
}

fn options(layout: LayoutKind) -> Options {
    Options {
        layout,
        gap_size: 10.,
        grid_rows: 3,
        strip_height: 300.,
        ..Options::default()
    }
}

fn view(layout: LayoutKind, clock: &Clock) -> View {
    View::new(MON, clock.clone(), Rc::new(options(layout)))
}

fn view_with(options: Options, clock: &Clock) -> View {
    View::new(MON, clock.clone(), Rc::new(options))
}

/// Lets every running animation finish.
fn settle(clock: &Clock, view: &mut View, ms: &mut u64) {
    *ms += 1000;
    clock.set_unadjusted(Duration::from_millis(*ms));
    view.advance_animations();
}

fn opened(layout: LayoutKind, host: &mut HeadlessHost, clock: &Clock) -> View {
    let mut view = view(layout, clock);
    view.show(host).unwrap();
    let mut ms = 0;
    settle(clock, &mut view, &mut ms);
    view.refresh_layout(host, ViewStage::Animating).unwrap();
    view
}

fn slot_center(view: &View, host: &HeadlessHost, id: WorkspaceId) -> Point<f64, Logical> {
    center_of(view.workspace_global_rect(host, id).unwrap())
}

#[test]
fn show_opens_and_captures_origin() {
    let clock = Clock::with_time(Duration::ZERO);
    let mut host = host(&[1, 2, 3]);
    host.switch_to(MON, ws(2));
    let mut view = view(LayoutKind::Linear, &clock);

    view.show(&mut host).unwrap();
    assert!(view.is_active());
    assert!(!view.is_closing());
    assert_eq!(view.origin_workspace(), Some(ws(2)));
    assert_eq!(host.cursor_override(), Some("left_ptr"));
    assert!(host.is_damaged(MON));
    assert_eq!(view.slots().len(), 4);

    clock.set_unadjusted(Duration::from_secs(1));
    view.advance_animations();
    assert_eq!(view.offsets().reveal, 300.);
    assert_abs_diff_eq!(view.blur_strength(), 2.);
    assert_abs_diff_eq!(view.dim_opacity(), 0.4);

    // Already active.
    host.switch_to(MON, ws(3));
    view.show(&mut host).unwrap();
    assert_eq!(view.origin_workspace(), Some(ws(2)));
}

#[test]
fn hide_closes_after_reveal_completes() {
    let clock = Clock::with_time(Duration::ZERO);
    let mut host = host(&[1, 2]);
    let mut view = opened(LayoutKind::Linear, &mut host, &clock);

    view.hide(&mut host);
    assert!(view.is_active());
    assert!(view.is_closing());
    assert_eq!(view.origin_workspace(), None);
    assert_eq!(host.cursor_override(), None);

    clock.set_unadjusted(Duration::from_millis(1100));
    view.advance_animations();
    assert!(view.is_active());

    clock.set_unadjusted(Duration::from_secs(3));
    view.advance_animations();
    assert!(!view.is_active());
    assert!(!view.is_closing());
    assert_eq!(view.offsets().reveal, 0.);
}

#[test]
fn hide_while_closing_is_noop() {
    let clock = Clock::with_time(Duration::ZERO);
    let mut host = host(&[1, 2]);
    let mut view = opened(LayoutKind::Linear, &mut host, &clock);

    view.hide(&mut host);
    clock.set_unadjusted(Duration::from_millis(1100));
    let before = view.offsets();
    assert!(view.are_animations_ongoing());

    host.set_cursor_override("other");
    view.hide(&mut host);
    assert!(view.is_closing());
    assert_eq!(view.offsets(), before);
    assert_eq!(host.cursor_override(), Some("other"));
}

#[test]
fn hide_when_closed_is_noop() {
    let clock = Clock::with_time(Duration::ZERO);
    let mut host = host(&[1]);
    let mut view = view(LayoutKind::Grid, &clock);

    view.hide(&mut host);
    assert!(!view.is_active());
    assert!(!view.is_closing());
    assert!(!host.is_damaged(MON));
}

#[test]
fn show_while_closing_is_ignored() {
    let clock = Clock::with_time(Duration::ZERO);
    let mut host = host(&[1, 2]);
    let mut view = opened(LayoutKind::Grid, &mut host, &clock);

    view.hide(&mut host);
    view.show(&mut host).unwrap();
    assert!(view.is_closing());

    clock.set_unadjusted(Duration::from_secs(5));
    view.advance_animations();
    assert!(!view.is_active());
    assert!(!view.is_closing());
}

#[test]
fn hide_focuses_hovered_window() {
    let clock = Clock::with_time(Duration::ZERO);
    let mut host = host(&[1]);
    host.add_window(
        WindowId(7),
        ws(1),
        Rectangle::new(Point::from((100., 100.)), Size::from((400., 300.))),
    );
    let mut view = opened(LayoutKind::Grid, &mut host, &clock);

    host.set_pointer(Point::from((200., 200.)));
    view.hide(&mut host);
    assert_eq!(host.focused_window(), Some(WindowId(7)));
}

#[test]
fn exit_target_falls_back_to_original() {
    let clock = Clock::with_time(Duration::ZERO);
    let mut host = host(&[1, 2, 3]);
    host.switch_to(MON, ws(2));

    let mut options = options(LayoutKind::Grid);
    options.exit_behavior = vec![String::from("hovered"), String::from("original")];
    let mut view = view_with(options, &clock);
    view.show(&mut host).unwrap();

    host.switch_to(MON, ws(3));
    assert_eq!(host.monitor_at(host.pointer_position()), None);
    assert_eq!(view.resolve_exit_target(&host, false), Some(ws(2)));
}

#[test]
fn exit_target_skips_unknown_keywords() {
    let clock = Clock::with_time(Duration::ZERO);
    let mut host = host(&[1, 2, 3]);
    host.switch_to(MON, ws(3));

    let mut options = options(LayoutKind::Grid);
    options.exit_behavior = vec![String::from("bogus"), String::from("interacted")];
    let view = view_with(options, &clock);
    assert_eq!(view.resolve_exit_target(&host, false), Some(ws(3)));
}

#[test]
fn exit_target_skips_destroyed_origin() {
    let clock = Clock::with_time(Duration::ZERO);
    let mut host = host(&[1, 2, 3]);
    host.switch_to(MON, ws(2));

    let mut options = options(LayoutKind::Grid);
    options.exit_behavior = vec![String::from("original")];
    let mut view = view_with(options, &clock);
    view.show(&mut host).unwrap();

    host.remove_workspace(ws(2));
    assert_eq!(view.resolve_exit_target(&host, false), None);
}

#[test]
fn hovered_slot_overrides_exit_behavior() {
    let clock = Clock::with_time(Duration::ZERO);
    let mut host = host(&[1, 2, 3]);

    let mut options = options(LayoutKind::Grid);
    options.exit_behavior = vec![String::from("interacted")];
    let mut view = view_with(options, &clock);
    view.show(&mut host).unwrap();
    let mut ms = 0;
    settle(&clock, &mut view, &mut ms);
    view.refresh_layout(&host, ViewStage::Animating).unwrap();

    let center = slot_center(&view, &host, ws(3));
    host.set_pointer(center);
    assert_eq!(view.resolve_exit_target(&host, false), Some(ws(1)));
    assert_eq!(view.resolve_exit_target(&host, true), Some(ws(3)));
}

#[test]
fn exit_into_pending_slot_creates_workspace() {
    let clock = Clock::with_time(Duration::ZERO);
    let mut host = host(&[1, 2, 3]);
    let mut view = opened(LayoutKind::Grid, &mut host, &clock);

    let center = slot_center(&view, &host, ws(4));
    host.set_pointer(center);
    view.do_exit_behavior(&mut host, true);

    assert!(host.workspace_exists(ws(4)));
    assert_eq!(host.active_workspace(MON), Some(ws(4)));
}

#[test]
fn grid_navigation() {
    let clock = Clock::with_time(Duration::ZERO);
    let mut host = host(&[1, 2, 3]);
    let mut view = view(LayoutKind::Grid, &clock);

    view.navigate(&mut host, Direction::Right).unwrap();
    assert_eq!(host.active_workspace(MON), Some(ws(2)));
    assert!(view.is_navigating());
    assert_eq!(
        view.nav_slide(),
        Some(NavSlide {
            from: ws(1),
            to: ws(2),
            dx: 1,
            dy: 0,
        })
    );

    clock.set_unadjusted(Duration::from_secs(1));
    view.advance_animations();
    assert!(!view.is_navigating());
    assert_eq!(view.nav_slide(), None);

    // Down from 2 lands on nothing: the pending slot is at (0, 1).
    view.navigate(&mut host, Direction::Down).unwrap();
    assert_eq!(host.active_workspace(MON), Some(ws(2)));

    view.navigate(&mut host, Direction::Left).unwrap();
    view.navigate(&mut host, Direction::Down).unwrap();
    assert!(host.workspace_exists(ws(4)));
    assert_eq!(host.active_workspace(MON), Some(ws(4)));
}

#[test]
fn navigation_does_not_wrap() {
    let clock = Clock::with_time(Duration::ZERO);
    let mut host = host(&[1, 2, 3]);
    let mut view = view(LayoutKind::Grid, &clock);

    for direction in [Direction::Left, Direction::Up] {
        view.navigate(&mut host, direction).unwrap();
        assert_eq!(host.active_workspace(MON), Some(ws(1)));
        assert!(!view.is_navigating());
    }

    host.switch_to(MON, ws(3));
    view.navigate(&mut host, Direction::Right).unwrap();
    assert_eq!(host.active_workspace(MON), Some(ws(3)));
    assert!(host.switches().iter().all(|(_, id)| *id != ws(4)));
}

#[test]
fn navigation_while_closing_is_ignored() {
    let clock = Clock::with_time(Duration::ZERO);
    let mut host = host(&[1, 2, 3]);
    let mut view = opened(LayoutKind::Grid, &mut host, &clock);

    view.hide(&mut host);
    view.navigate(&mut host, Direction::Right).unwrap();
    assert_eq!(host.active_workspace(MON), Some(ws(1)));
}

#[test]
fn navigation_inside_open_overview_has_no_slide() {
    let clock = Clock::with_time(Duration::ZERO);
    let mut host = host(&[1, 2, 3]);
    let mut view = opened(LayoutKind::Grid, &mut host, &clock);

    view.navigate(&mut host, Direction::Right).unwrap();
    assert_eq!(host.active_workspace(MON), Some(ws(2)));
    assert!(!view.is_navigating());
    assert_eq!(view.nav_slide(), None);
}

#[test]
fn linear_navigation_scrolls_strip() {
    let clock = Clock::with_time(Duration::ZERO);
    let mut host = host(&[1, 2, 3, 4, 5]);
    let mut view = view(LayoutKind::Linear, &clock);

    // Only columns exist in a strip.
    view.navigate(&mut host, Direction::Down).unwrap();
    assert_eq!(host.active_workspace(MON), Some(ws(1)));

    // Slot 2 is already in view.
    view.navigate(&mut host, Direction::Right).unwrap();
    assert_eq!(host.active_workspace(MON), Some(ws(2)));
    assert!(!view.is_navigating());

    host.switch_to(MON, ws(3));
    view.navigate(&mut host, Direction::Right).unwrap();
    assert_eq!(host.active_workspace(MON), Some(ws(4)));
    assert!(view.is_navigating());

    clock.set_unadjusted(Duration::from_secs(1));
    view.advance_animations();
    assert!(!view.is_navigating());

    // Slot 4 now ends one gap before the right edge.
    let slot_w = 280. * 1920. / 1080.;
    let right = view.offsets().scroll + 3. * (10. + slot_w) + 10. + slot_w + 10.;
    assert_abs_diff_eq!(right, 1920., epsilon = 1e-6);
}

#[test]
fn render_restores_active_workspace() {
    let clock = Clock::with_time(Duration::ZERO);
    let mut host = host(&[1, 2, 3]);
    let mut view = opened(LayoutKind::Grid, &mut host, &clock);
    host.take_draw_calls();

    view.render(&mut host, Duration::ZERO, 1.).unwrap();
    assert_eq!(host.render_active_workspace(MON), Some(ws(1)));

    let workspaces: Vec<_> = host
        .draw_calls()
        .iter()
        .filter_map(|call| match call {
            DrawCall::Workspace {
                workspace,
                pass,
                render_active,
                ..
            } => Some((*workspace, *pass, *render_active)),
            _ => None,
        })
        .collect();

    assert_eq!(
        workspaces,
        vec![
            (Some(ws(1)), RenderPass::Background, Some(ws(1))),
            (Some(ws(1)), RenderPass::Slot, Some(ws(1))),
            (Some(ws(2)), RenderPass::Slot, Some(ws(2))),
            (Some(ws(3)), RenderPass::Slot, Some(ws(3))),
            // The pending slot only gets the layers, with the real active workspace in place.
            (None, RenderPass::Slot, Some(ws(1))),
        ]
    );

    let borders = host
        .draw_calls()
        .iter()
        .filter(|call| matches!(call, DrawCall::Border { .. }))
        .count();
    assert_eq!(borders, 4);
}

#[test]
fn linear_render_draws_opaque_backdrop() {
    let clock = Clock::with_time(Duration::ZERO);
    let mut host = host(&[1, 2]);
    let mut view = opened(LayoutKind::Linear, &mut host, &clock);
    host.take_draw_calls();

    view.render(&mut host, Duration::ZERO, 1.).unwrap();
    let rects: Vec<_> = host
        .draw_calls()
        .iter()
        .filter_map(|call| match call {
            DrawCall::Rect {
                rect, color, blur, ..
            } => Some((*rect, *color, *blur)),
            _ => None,
        })
        .collect();

    assert_eq!(rects.len(), 2);
    let (dim, dim_color, blur) = rects[0];
    assert_eq!(dim.size, Size::from((1920., 1080.)));
    assert_abs_diff_eq!(dim_color.a, 0.4);
    assert_eq!(blur, Some(2.));

    let (strip, strip_color, _) = rects[1];
    assert_eq!(strip.loc, Point::from((0., 780.)));
    assert_eq!(strip_color.a, 1.);
}

#[test]
fn rotated_monitor_swaps_draw_size_only() {
    let clock = Clock::with_time(Duration::ZERO);
    let mut host = host_at(&[1], Point::from((0., 0.)), Transform::_90);
    let mut view = opened(LayoutKind::Grid, &mut host, &clock);
    host.take_draw_calls();
    view.render(&mut host, Duration::ZERO, 1.).unwrap();

    let slot = *view.slots().get(ws(1)).unwrap();
    assert_abs_diff_eq!(slot.rect.size.w, (1080. - 40.) / 3., epsilon = 1e-9);
    assert_abs_diff_eq!(slot.rect.size.h, (1920. - 40.) / 3., epsilon = 1e-9);

    let drawn = host
        .draw_calls()
        .iter()
        .find_map(|call| match call {
            DrawCall::Workspace {
                workspace: Some(id),
                pass: RenderPass::Slot,
                rect,
                ..
            } if *id == ws(1) => Some(*rect),
            _ => None,
        })
        .unwrap();
    assert_eq!(drawn.loc, slot.rect.loc);
    assert_eq!(drawn.size, Size::from((slot.rect.size.h, slot.rect.size.w)));

    // Hit testing keeps the untransposed rectangle: a point inside the slot but outside the
    // transposed draw rectangle still hits.
    let pos = Point::from((
        slot.rect.loc.x + slot.rect.size.w - 1.,
        slot.rect.loc.y + slot.rect.size.h - 1.,
    ));
    assert!(pos.y > drawn.loc.y + drawn.size.h);
    assert_eq!(view.workspace_id_at(&host, pos), Some(ws(1)));
}

#[test]
fn slot_centers_round_trip_on_offset_monitor() {
    let clock = Clock::with_time(Duration::ZERO);
    let mut host = host_at(&[1, 2, 3, 7], Point::from((1920., 0.)), Transform::Normal);

    for layout in [LayoutKind::Grid, LayoutKind::Linear] {
        let view = opened(layout, &mut host, &clock);
        assert_eq!(view.slots().len(), 5);
        for slot in view.slots().iter() {
            let center = slot_center(&view, &host, slot.id);
            assert_eq!(view.workspace_id_at(&host, center), Some(slot.id));
        }
    }
}

#[test]
fn global_rect_lookup_misses() {
    let clock = Clock::with_time(Duration::ZERO);
    let mut host = host(&[1]);
    let view = opened(LayoutKind::Grid, &mut host, &clock);

    assert_eq!(view.workspace_global_rect(&host, ws(42)), None);
    host.remove_monitor(MON);
    assert_eq!(view.workspace_global_rect(&host, ws(1)), None);
    assert_eq!(view.workspace_id_at(&host, Point::from((20., 20.))), None);
}

#[test]
fn missing_monitor_is_tolerated() {
    let clock = Clock::with_time(Duration::ZERO);
    let mut host = host(&[1, 2]);
    host.remove_monitor(MON);
    let mut view = view(LayoutKind::Grid, &clock);

    assert!(view.compute_layout(&host, ViewStage::Opened).unwrap().is_empty());
    view.show(&mut host).unwrap();
    assert!(!view.is_active());
    view.navigate(&mut host, Direction::Right).unwrap();
    assert!(host.switches().is_empty());
    assert!(!view.should_manage_mouse(&host));
    assert_eq!(view.drag_window_scale(&host), 1.);
    view.render(&mut host, Duration::ZERO, 1.).unwrap();
    assert!(host.draw_calls().is_empty());
}

#[test]
fn broken_config_fails_show_without_state_change() {
    let clock = Clock::with_time(Duration::ZERO);
    let mut host = host(&[1]);
    let mut options = options(LayoutKind::Linear);
    options.strip_height = 2000.;
    let mut view = view_with(options, &clock);

    assert!(view.show(&mut host).is_err());
    assert!(!view.is_active());
    assert_eq!(host.cursor_override(), None);

    // Reported again on the next call, the operation still fails.
    assert!(view.navigate(&mut host, Direction::Right).is_err());
    assert_eq!(host.active_workspace(MON), Some(ws(1)));
}

#[test]
fn update_config_switches_layout() {
    let clock = Clock::with_time(Duration::ZERO);
    let mut host = host(&[1, 2]);
    let mut view = opened(LayoutKind::Grid, &mut host, &clock);
    assert_eq!(view.layout_name(), "grid");

    view.update_config(&host, Rc::new(options(LayoutKind::Linear)));
    assert_eq!(view.layout_kind(), LayoutKind::Linear);

    clock.set_unadjusted(Duration::from_secs(5));
    view.advance_animations();
    assert_eq!(view.offsets().reveal, 300.);
}

#[test]
fn close_open_lerp_warps() {
    let clock = Clock::with_time(Duration::ZERO);
    let host = host(&[1]);
    let mut view = view(LayoutKind::Linear, &clock);

    view.close_open_lerp(&host, 0.5);
    assert_abs_diff_eq!(view.offsets().reveal, 150.);
    assert_abs_diff_eq!(view.blur_strength(), 1.);
    assert_abs_diff_eq!(view.dim_opacity(), 0.2);
    assert!(!view.are_animations_ongoing());
}

#[test]
fn linear_axis_only_in_strip() {
    let clock = Clock::with_time(Duration::ZERO);
    let mut host = host(&[1, 2, 3, 4, 5, 6]);
    let mut view = opened(LayoutKind::Linear, &mut host, &clock);

    host.set_pointer(Point::from((500., 100.)));
    assert!(!view.on_mouse_axis(&mut host, 3.).unwrap());

    host.set_pointer(Point::from((500., 900.)));
    assert!(view.on_mouse_axis(&mut host, 3.).unwrap());
    clock.set_unadjusted(Duration::from_secs(5));
    view.advance_animations();
    assert_eq!(view.offsets().scroll, -30.);

    // Scrolling back past the start snaps to it.
    assert!(view.on_mouse_axis(&mut host, -10.).unwrap());
    clock.set_unadjusted(Duration::from_secs(10));
    view.advance_animations();
    assert_eq!(view.offsets().scroll, 0.);
}

#[test]
fn strip_edges_on_scaled_monitor() {
    let clock = Clock::with_time(Duration::ZERO);
    let mut host = HeadlessHost::new();
    host.add_monitor(
        MON,
        Point::from((1000., 0.)),
        Size::from((1920., 1080.)),
        2.,
        Transform::Normal,
    );
    host.add_workspace(ws(1), MON);
    let view = opened(LayoutKind::Linear, &mut host, &clock);

    // 600 px of strip at scale 2 is the bottom 300 of 540 logical pixels.
    host.set_pointer(Point::from((1500., 240.)));
    assert!(view.should_manage_mouse(&host));
    host.set_pointer(Point::from((1500., 239.5)));
    assert!(!view.should_manage_mouse(&host));
    host.set_pointer(Point::from((1959.5, 539.5)));
    assert!(view.should_manage_mouse(&host));
    host.set_pointer(Point::from((1960., 300.)));
    assert!(!view.should_manage_mouse(&host));
    host.set_pointer(Point::from((1500., 540.)));
    assert!(!view.should_manage_mouse(&host));
}

#[test]
fn linear_render_skips_offscreen_slots() {
    let clock = Clock::with_time(Duration::ZERO);
    let mut host = host(&[1, 2, 3, 4, 5, 6, 7, 8]);
    let mut view = opened(LayoutKind::Linear, &mut host, &clock);
    host.take_draw_calls();

    view.render(&mut host, Duration::ZERO, 1.).unwrap();
    let borders: Vec<_> = host
        .draw_calls()
        .iter()
        .filter_map(|call| match call {
            DrawCall::Border { rect, .. } => Some(*rect),
            _ => None,
        })
        .collect();

    // Four slots fit the first 1920 pixels, the fifth starts right past the edge.
    assert_eq!(view.slots().len(), 9);
    assert_eq!(borders.len(), 4);
    assert!(borders.iter().all(|rect| rect.loc.x < 1920.));
}

#[test]
fn grid_ignores_axis() {
    let clock = Clock::with_time(Duration::ZERO);
    let mut host = host(&[1, 2]);
    let mut view = opened(LayoutKind::Grid, &mut host, &clock);

    host.set_pointer(Point::from((500., 500.)));
    assert!(view.should_manage_mouse(&host));
    assert!(!view.on_mouse_axis(&mut host, 3.).unwrap());
}

#[test]
fn click_exits_onto_slot() {
    let clock = Clock::with_time(Duration::ZERO);
    let mut host = host(&[1, 2, 3]);
    let mut view = opened(LayoutKind::Grid, &mut host, &clock);

    let center = slot_center(&view, &host, ws(2));
    host.set_pointer(center);
    assert!(!view.on_mouse_button(&mut host, true).unwrap());
    assert!(view.on_mouse_button(&mut host, false).unwrap());
    assert_eq!(host.active_workspace(MON), Some(ws(2)));
    assert!(view.is_closing());
}

#[test]
fn click_without_exit_on_click_passes_through() {
    let clock = Clock::with_time(Duration::ZERO);
    let mut host = host(&[1, 2, 3]);
    let mut options = options(LayoutKind::Grid);
    options.exit_on_click = false;
    let mut view = view_with(options, &clock);
    view.show(&mut host).unwrap();

    host.set_pointer(Point::from((500., 500.)));
    assert!(!view.on_mouse_button(&mut host, false).unwrap());
    assert!(!view.is_closing());
}

#[test]
fn drop_window_into_slot() {
    let clock = Clock::with_time(Duration::ZERO);
    let mut host = host(&[1, 2, 3]);
    host.add_window(
        WindowId(7),
        ws(1),
        Rectangle::new(Point::from((100., 100.)), Size::from((400., 300.))),
    );
    let mut view = opened(LayoutKind::Grid, &mut host, &clock);

    let center = slot_center(&view, &host, ws(4));
    host.set_pointer(center);
    host.set_dragged_window(Some(WindowId(7)));

    assert!(view.on_mouse_button(&mut host, false).unwrap());
    assert!(host.workspace_exists(ws(4)));
    assert_eq!(host.window_workspace(WindowId(7)), Some(ws(4)));
    // Still open: dropping a window doesn't leave the overview.
    assert!(!view.is_closing());
}

#[test]
fn window_render_filter() {
    let clock = Clock::with_time(Duration::ZERO);
    let mut host = host(&[1, 2]);
    host.add_monitor(
        MonitorId(2),
        Point::from((1920., 0.)),
        Size::from((1920., 1080.)),
        1.,
        Transform::Normal,
    );
    host.add_workspace(ws(9), MonitorId(2));
    let geometry = Rectangle::new(Point::from((100., 100.)), Size::from((400., 300.)));
    host.add_window(WindowId(1), ws(1), geometry);
    host.add_window(WindowId(2), ws(9), geometry);
    let view = opened(LayoutKind::Grid, &mut host, &clock);

    assert!(view.should_render_window(&host, WindowId(1), RenderPass::Slot, true));
    assert!(!view.should_render_window(&host, WindowId(1), RenderPass::Slot, false));
    // No slot for a workspace of another monitor.
    assert!(!view.should_render_window(&host, WindowId(2), RenderPass::Slot, true));
    assert!(view.should_render_window(&host, WindowId(2), RenderPass::Background, true));

    host.set_dragged_window(Some(WindowId(1)));
    assert!(!view.should_render_window(&host, WindowId(1), RenderPass::Background, true));
}

#[test]
fn window_maps_into_its_slot() {
    let clock = Clock::with_time(Duration::ZERO);
    let mut host = host(&[1, 2]);
    host.add_window(
        WindowId(1),
        ws(2),
        Rectangle::new(Point::from((960., 540.)), Size::from((192., 108.))),
    );
    let view = opened(LayoutKind::Linear, &mut host, &clock);

    let slot = view.workspace_global_rect(&host, ws(2)).unwrap();
    let rect = view.window_global_rect(&host, WindowId(1)).unwrap();
    let factor = slot.size.w / 1920.;
    assert_abs_diff_eq!(rect.loc.x, slot.loc.x + 960. * factor, epsilon = 1e-9);
    assert_abs_diff_eq!(rect.size.w, 192. * factor, epsilon = 1e-9);

    // And back to where it is on the full-size workspace.
    let back = view.pos_relative_to_workspace(&host, rect.loc, ws(2));
    assert_abs_diff_eq!(back.x, 960., epsilon = 1e-6);
    assert_abs_diff_eq!(back.y, 540., epsilon = 1e-6);

    let unknown = Point::from((5., 5.));
    assert_eq!(view.pos_relative_to_workspace(&host, unknown, ws(42)), unknown);
}

#[test]
fn drag_preview_scale() {
    let clock = Clock::with_time(Duration::ZERO);
    let mut host = host(&[1, 2]);
    let view = opened(LayoutKind::Linear, &mut host, &clock);

    host.set_pointer(Point::from((500., 100.)));
    assert_eq!(view.drag_window_scale(&host), 1.);

    host.set_pointer(Point::from((500., 900.)));
    assert_abs_diff_eq!(
        view.drag_window_scale(&host),
        280. / 1080.,
        epsilon = 1e-9
    );
}

#[test]
fn show_cancels_in_flight_navigation() {
    let clock = Clock::with_time(Duration::ZERO);
    let mut host = host(&[1, 2, 3, 4, 5, 6]);
    let mut view = opened(LayoutKind::Linear, &mut host, &clock);
    view.hide(&mut host);
    clock.set_unadjusted(Duration::from_secs(5));
    view.advance_animations();
    assert!(!view.is_active());

    host.switch_to(MON, ws(3));
    view.navigate(&mut host, Direction::Right).unwrap();
    assert!(view.is_navigating());

    // Reopen mid-navigation: the navigation is dropped and never fires afterwards.
    view.show(&mut host).unwrap();
    assert!(!view.is_navigating());
    clock.set_unadjusted(Duration::from_secs(10));
    view.advance_animations();
    assert!(view.is_active());
    assert!(!view.is_navigating());
}

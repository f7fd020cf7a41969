//! Conversions between the coordinate spaces the overview deals with.
//!
//! - *Pixel space*: monitor-local, before the output transform (what draw calls expect).
//! - *Transformed space*: monitor-local, after the output transform. Slot rectangles live here.
//! - *Global space*: the multi-monitor space of pointer coordinates.
//!
//! None of these conversions happen implicitly.

use smithay::utils::{Coordinate, Logical, Physical, Point, Rectangle, Size, Transform};

use crate::host::MonitorSnapshot;

/// Maps a wl_output transform code to a [`Transform`].
///
/// Codes 0 to 3 are the plain rotations in 90° steps, 4 to 7 their flipped variants.
pub fn transform_from_code(code: u8) -> Option<Transform> {
    let transform = match code {
        0 => Transform::Normal,
        1 => Transform::_90,
        2 => Transform::_180,
        3 => Transform::_270,
        4 => Transform::Flipped,
        5 => Transform::Flipped90,
        6 => Transform::Flipped180,
        7 => Transform::Flipped270,
        _ => return None,
    };
    Some(transform)
}

/// Whether the transform swaps width and height.
pub fn swaps_axes(transform: Transform) -> bool {
    matches!(
        transform,
        Transform::_90 | Transform::_270 | Transform::Flipped90 | Transform::Flipped270
    )
}

/// Moves a monitor-local rectangle into the global space. The size is kept as is.
pub fn to_global(
    rect: Rectangle<f64, Physical>,
    monitor: &MonitorSnapshot,
) -> Rectangle<f64, Logical> {
    Rectangle::new(
        Point::from((
            rect.loc.x + monitor.position.x,
            rect.loc.y + monitor.position.y,
        )),
        Size::from((rect.size.w, rect.size.h)),
    )
}

/// Moves a global point into the monitor-local space.
pub fn to_monitor_local(
    pos: Point<f64, Logical>,
    monitor: &MonitorSnapshot,
) -> Point<f64, Physical> {
    Point::from((pos.x - monitor.position.x, pos.y - monitor.position.y))
}

/// Turns a transformed-space slot rectangle into the rectangle handed to draw calls.
///
/// Draw calls take pre-rotation dimensions, so width and height swap on rotated monitors. The
/// position is left alone. Hit testing must keep using the untouched slot rectangle.
pub fn render_rect(
    rect: Rectangle<f64, Physical>,
    transform: Transform,
) -> Rectangle<f64, Physical> {
    if swaps_axes(transform) {
        Rectangle::new(rect.loc, Size::from((rect.size.h, rect.size.w)))
    } else {
        rect
    }
}

pub fn center_of<N: Coordinate, Kind>(rect: Rectangle<N, Kind>) -> Point<f64, Kind> {
    Point::from((
        rect.loc.x.to_f64() + rect.size.w.to_f64() / 2.,
        rect.loc.y.to_f64() + rect.size.h.to_f64() / 2.,
    ))
}

/// Scales `rect` by `factor` around `origin`.
pub fn scale_around<Kind>(
    rect: Rectangle<f64, Kind>,
    origin: Point<f64, Kind>,
    factor: f64,
) -> Rectangle<f64, Kind> {
    Rectangle::new(
        Point::from((
            origin.x + (rect.loc.x - origin.x) * factor,
            origin.y + (rect.loc.y - origin.y) * factor,
        )),
        Size::from((rect.size.w * factor, rect.size.h * factor)),
    )
}

/// Exact at both ends.
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from * (1. - t) + to * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MonitorId;

    fn monitor(transform: Transform) -> MonitorSnapshot {
        MonitorSnapshot {
            id: MonitorId(1),
            position: Point::from((1920., 0.)),
            pixel_size: Size::from((1920., 1080.)),
            scale: 1.,
            transform,
        }
    }

    #[test]
    fn global_round_trip() {
        let mon = monitor(Transform::Normal);
        let rect = Rectangle::new(Point::from((10., 20.)), Size::from((100., 50.)));
        let global = to_global(rect, &mon);
        assert_eq!(global.loc, Point::from((1930., 20.)));
        assert_eq!(global.size, Size::from((100., 50.)));
        assert_eq!(to_monitor_local(global.loc, &mon), rect.loc);
    }

    #[test]
    fn render_rect_swaps_only_on_odd_transforms() {
        let rect = Rectangle::new(Point::from((5., 6.)), Size::from((300., 100.)));

        let normal = render_rect(rect, Transform::Normal);
        assert_eq!(normal, rect);
        let flipped = render_rect(rect, Transform::_180);
        assert_eq!(flipped, rect);

        let rotated = render_rect(rect, Transform::_90);
        assert_eq!(rotated.loc, rect.loc);
        assert_eq!(rotated.size, Size::from((100., 300.)));
        assert_eq!(render_rect(rect, Transform::_270).size, rotated.size);
    }

    #[test]
    fn transformed_size_of_rotated_monitor() {
        assert_eq!(
            monitor(Transform::_90).transformed_size(),
            Size::from((1080., 1920.))
        );
        assert_eq!(
            monitor(Transform::_180).transformed_size(),
            Size::from((1920., 1080.))
        );
    }

    #[test]
    fn transform_codes() {
        assert_eq!(transform_from_code(0), Some(Transform::Normal));
        assert_eq!(transform_from_code(3), Some(Transform::_270));
        assert_eq!(transform_from_code(8), None);
        assert!(swaps_axes(transform_from_code(1).unwrap()));
        assert!(!swaps_axes(transform_from_code(2).unwrap()));
    }

    #[test]
    fn scale_around_point() {
        let rect: Rectangle<f64, Logical> =
            Rectangle::new(Point::from((100., 100.)), Size::from((200., 100.)));
        let scaled = scale_around(rect, Point::from((100., 100.)), 0.5);
        assert_eq!(scaled.loc, Point::from((100., 100.)));
        assert_eq!(scaled.size, Size::from((100., 50.)));
    }
}

//! CoordinateMapper: client video coordinates → device physical coordinates.

use mirror_core::{Point, Position, ScreenInfo};
use tracing::debug;

use super::device_state::DeviceState;

/// Maps `position` into device space using a fresh snapshot of `state`.
///
/// Returns `None` when the client's video size is not the current one.  That
/// happens right after a rotation, before the client has seen the new frame
/// size; the event should be dropped, not retried.
pub fn map_to_device(state: &DeviceState, position: &Position) -> Option<Point> {
    let info = state.screen_info();
    let point = scale_to_device(&info, position);
    if point.is_none() {
        debug!(
            "dropping input at ({}, {}): client video {} is stale, current is {}",
            position.point.x, position.point.y, position.screen_size, info.video_size
        );
    }
    point
}

/// Scales `position` against a given snapshot.
///
/// `x * device_width / video_width` (and likewise for y), with truncating
/// division in 64 bits.  The last video pixel lands on
/// `device_len - ceil(device_len / video_len)`, so when the video is
/// downscaled it falls short of the last device pixel by less than one
/// scale step, not by less than one pixel.
pub fn scale_to_device(info: &ScreenInfo, position: &Position) -> Option<Point> {
    let video = info.video_size;
    if position.screen_size != video {
        return None;
    }

    let device = info.device_size;
    let scale = |value: i32, device_len: u32, video_len: u32| -> i32 {
        let scaled = i64::from(value) * i64::from(device_len) / i64::from(video_len);
        scaled.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    };

    Some(Point::new(
        scale(position.point.x, device.width, video.width),
        scale(position.point.y, device.height, video.height),
    ))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::device_state::GeometryOptions;
    use crate::application::platform::DisplayInfo;
    use mirror_core::{compute_screen_info, Rotation, Size};

    fn info_1080p_capped_720() -> ScreenInfo {
        compute_screen_info(Size::new(1080, 1920), 720, None, false).unwrap()
    }

    fn at(x: i32, y: i32, screen: Size) -> Position {
        Position::new(Point::new(x, y), screen)
    }

    #[test]
    fn test_scale_origin_maps_to_origin() {
        let info = info_1080p_capped_720();
        let point = scale_to_device(&info, &at(0, 0, info.video_size));
        assert_eq!(point, Some(Point::new(0, 0)));
    }

    #[test]
    fn test_scale_last_video_pixel_falls_short_by_less_than_one_scale_step() {
        // Arrange: video is 406x720 for a 1080x1920 device
        let info = info_1080p_capped_720();

        // Act
        let point = scale_to_device(&info, &at(405, 719, info.video_size)).unwrap();

        // Assert: 405 * 1080 / 406 = 1077, 719 * 1920 / 720 = 1917, each two
        // short of the last device pixel; a scale step is ceil(2.66) = 3
        assert_eq!(point, Point::new(1077, 1917));
        assert!(1079 - point.x < 3 && 1919 - point.y < 3);
    }

    #[test]
    fn test_scale_truncates_toward_zero() {
        let info = info_1080p_capped_720();
        // 1 * 1080 / 406 = 2.66 -> 2
        let point = scale_to_device(&info, &at(1, 1, info.video_size)).unwrap();
        assert_eq!(point, Point::new(2, 2));
    }

    #[test]
    fn test_scale_returns_none_for_stale_video_size() {
        let info = info_1080p_capped_720();
        let stale = info.video_size.rotate();
        assert_eq!(scale_to_device(&info, &at(10, 10, stale)), None);
    }

    #[test]
    fn test_scale_returns_none_for_off_by_two_video_size() {
        let info = info_1080p_capped_720();
        assert_eq!(scale_to_device(&info, &at(10, 10, Size::new(404, 720))), None);
    }

    #[test]
    fn test_scale_passes_points_outside_video_through_proportionally() {
        let info = compute_screen_info(Size::new(1000, 2000), 1000, None, false).unwrap();
        // video is 500x1000; -10 * 1000 / 500 = -20
        let point = scale_to_device(&info, &at(-10, 1000, info.video_size)).unwrap();
        assert_eq!(point, Point::new(-20, 2000));
    }

    #[test]
    fn test_scale_saturates_instead_of_overflowing() {
        let info = compute_screen_info(Size::new(4000, 4000), 2, None, false).unwrap();
        let point = scale_to_device(&info, &at(i32::MAX, i32::MIN, info.video_size)).unwrap();
        assert_eq!(point, Point::new(i32::MAX, i32::MIN));
    }

    #[test]
    fn test_map_to_device_reads_current_state() {
        // Arrange
        let display = DisplayInfo {
            size: Size::new(1080, 1920),
            rotation: Rotation::Deg0,
        };
        let state = DeviceState::new(display, GeometryOptions::default()).unwrap();

        // Act
        let point = map_to_device(&state, &at(540, 960, Size::new(1080, 1920)));

        // Assert: unscaled video maps 1:1
        assert_eq!(point, Some(Point::new(540, 960)));
    }
}

//! Integration tests for the coordinate mapping bounds.
//!
//! With truncating division the last video pixel cannot always reach the last
//! device pixel: it falls short by less than one scale step,
//! `ceil(device_len / video_len)`.  These sweep that bound across real-world
//! panels, caps, and crops.

use mirror_core::{compute_screen_info, Point, Position, Rect, ScreenInfo, Size};
use mirror_device::application::coordinate_mapper::scale_to_device;

const DEVICE_SIZES: &[(u32, u32)] = &[
    (480, 800),
    (720, 1280),
    (1080, 1920),
    (1080, 2340),
    (1179, 2556),
    (1440, 3200),
    (1001, 1999),
];

const MAX_SIZES: &[u32] = &[0, 2, 100, 406, 720, 721, 1024, 1920, 4096];

fn ceil_div(a: u32, b: u32) -> i64 {
    i64::from(a.div_ceil(b))
}

/// Checks one axis: `last` is where the last video pixel landed.
fn assert_axis_bound(info: &ScreenInfo, last: i32, device_len: u32, video_len: u32) {
    let last = i64::from(last);
    let last_device = i64::from(device_len) - 1;
    assert!(
        (0..=last_device).contains(&last),
        "{info:?}: last pixel {last} outside device"
    );
    let step = ceil_div(device_len, video_len);
    assert!(
        last_device - last < step.max(1),
        "{info:?}: last pixel {last} is {} short, step is {step}",
        last_device - last
    );
}

fn assert_corners(info: &ScreenInfo) {
    let video = info.video_size;
    let device = info.device_size;

    let origin = scale_to_device(info, &Position::new(Point::new(0, 0), video));
    assert_eq!(origin, Some(Point::new(0, 0)));

    let corner = Point::new(video.width as i32 - 1, video.height as i32 - 1);
    let mapped = scale_to_device(info, &Position::new(corner, video))
        .expect("current video size must map");
    assert_axis_bound(info, mapped.x, device.width, video.width);
    assert_axis_bound(info, mapped.y, device.height, video.height);
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn test_last_video_pixel_within_one_scale_step_across_devices_and_caps() {
    for &(w, h) in DEVICE_SIZES {
        for device in [Size::new(w, h), Size::new(w, h).rotate()] {
            for &max_size in MAX_SIZES {
                let info = compute_screen_info(device, max_size, None, false).unwrap();
                assert_corners(&info);
            }
        }
    }
}

#[test]
fn test_last_video_pixel_within_one_scale_step_with_crops() {
    for &(w, h) in DEVICE_SIZES {
        let device = Size::new(w, h);
        let crops = [
            Rect::new(0, (h / 2) as i32, w, h / 2),
            Rect::new(17, 33, w / 3 + 1, h / 5 + 3),
        ];
        for &max_size in MAX_SIZES {
            for crop in crops {
                let info = compute_screen_info(device, max_size, Some(crop), false).unwrap();
                assert_corners(&info);
            }
        }
    }
}

#[test]
fn test_unscaled_even_device_maps_last_pixel_exactly() {
    let info = compute_screen_info(Size::new(1080, 1920), 0, None, false).unwrap();
    let corner = Position::new(Point::new(1079, 1919), info.video_size);

    assert_eq!(scale_to_device(&info, &corner), Some(Point::new(1079, 1919)));
}

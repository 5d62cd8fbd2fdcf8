// SPDX-License-Identifier: MPL-2.0

//! Integration tests for the transition blur

use camera_preview::backends::camera::synthetic::render_pattern;
use camera_preview::backends::camera::types::{CameraFacing, CameraFrame};
use camera_preview::constants::transition;
use camera_preview::fast_blur;
use camera_preview::pipelines::blur::{BlurredFrame, transition_blur};

#[test]
fn test_blur_is_deterministic() {
    let frame = render_pattern(320, 240, CameraFacing::Back, 7);

    let first = fast_blur(&frame, transition::BLUR_SCALE, transition::BLUR_RADIUS);
    let second = fast_blur(&frame, transition::BLUR_SCALE, transition::BLUR_RADIUS);

    assert_eq!(first, second);
    assert_eq!((first.width, first.height), (80, 60));
}

#[test]
fn test_blur_does_not_touch_input() {
    let frame = render_pattern(64, 64, CameraFacing::Front, 0);
    let before = frame.data.to_vec();

    let _ = transition_blur(&frame);

    assert_eq!(&frame.data[..], &before[..]);
}

#[test]
fn test_blur_changes_patterned_frame() {
    let frame = render_pattern(64, 64, CameraFacing::Back, 0);
    let downsampled_only = fast_blur(&frame, transition::BLUR_SCALE, 0);
    let blurred = transition_blur(&frame);

    assert_eq!(downsampled_only.width, blurred.width);
    assert_ne!(downsampled_only.data, blurred.data);
}

#[test]
fn test_blank_frame_is_substituted() {
    let blurred = transition_blur(&CameraFrame::blank());
    assert_eq!(blurred, BlurredFrame::blank());
    assert_eq!(&blurred.data[..], &[0, 0, 0, 0]);
}

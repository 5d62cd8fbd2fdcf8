// SPDX-License-Identifier: MPL-2.0

//! Integration tests for constants module

use camera_preview::constants::transition;
use std::time::Duration;

#[test]
fn test_transition_blur_pair() {
    assert_eq!(transition::BLUR_SCALE, 0.25);
    assert_eq!(transition::BLUR_RADIUS, 25);
    assert!(transition::BLUR_RADIUS <= transition::MAX_BLUR_RADIUS);
}

#[test]
fn test_hide_delay_forms_agree() {
    assert_eq!(transition::OVERLAY_HIDE_DELAY, Duration::from_millis(300));
    assert_eq!(
        transition::OVERLAY_HIDE_DELAY,
        Duration::from_millis(transition::OVERLAY_HIDE_DELAY_MS)
    );
}

// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

/// Camera switch transition parameters
///
/// The blur pair (scale, radius) defines the look of the freeze-frame shown
/// while the preview rebinds. Changing either value changes the visual result.
pub mod transition {
    use std::time::Duration;

    /// Downsample factor applied before blurring (0.25 = quarter resolution)
    pub const BLUR_SCALE: f32 = 0.25;

    /// Stack blur radius in pixels of the downsampled image
    pub const BLUR_RADIUS: u32 = 25;

    /// Largest radius the stack blur supports
    pub const MAX_BLUR_RADIUS: u32 = 254;

    /// Delay between showing the blurred overlay and hiding it again
    pub const OVERLAY_HIDE_DELAY: Duration = Duration::from_millis(300);

    /// Same delay in milliseconds, for config serialization
    pub const OVERLAY_HIDE_DELAY_MS: u64 = 300;
}

/// Live preview defaults
pub mod preview {
    /// Default synthetic camera width
    pub const DEFAULT_WIDTH: u32 = 640;

    /// Default synthetic camera height
    pub const DEFAULT_HEIGHT: u32 = 480;

    /// Interval between synthetic preview frames (~30 fps)
    pub const FRAME_INTERVAL_MS: u64 = 33;
}

/// Application identity, used for config and output directories
pub mod app_info {
    /// Directory name under the user's config dir
    pub const CONFIG_DIR_NAME: &str = "camera-preview";

    /// Config file name
    pub const CONFIG_FILE_NAME: &str = "config.json";

    /// Sub-directory of the pictures dir used for CLI output
    pub const PICTURES_SUBDIR: &str = "camera";
}

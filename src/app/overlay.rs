// SPDX-License-Identifier: GPL-3.0-only

//! Static image layer drawn above the live preview

use crate::pipelines::blur::BlurredFrame;

#[derive(Debug, Default)]
pub struct OverlayImage {
    image: Option<BlurredFrame>,
    visible: bool,
    /// How many times an image was shown, for diagnostics
    shown_count: u64,
}

impl OverlayImage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the displayed image and make the overlay visible
    pub fn show(&mut self, image: BlurredFrame) {
        self.image = Some(image);
        self.visible = true;
        self.shown_count += 1;
    }

    /// Hide the overlay and release its image
    pub fn hide(&mut self) {
        self.visible = false;
        self.image = None;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn image(&self) -> Option<&BlurredFrame> {
        self.image.as_ref()
    }

    pub fn shown_count(&self) -> u64 {
        self.shown_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_then_hide_releases_image() {
        let mut overlay = OverlayImage::new();
        assert!(!overlay.is_visible());
        overlay.show(BlurredFrame::blank());
        assert!(overlay.is_visible());
        assert!(overlay.image().is_some());
        overlay.hide();
        assert!(!overlay.is_visible());
        assert!(overlay.image().is_none());
        assert_eq!(overlay.shown_count(), 1);
    }
}

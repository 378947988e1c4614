//! Virtual-to-viewport coordinate mapping and pixel locking.

use glyphrun_core::geometry::{Rect, Size};
use glyphrun_core::math::Vec2;

/// Maps positions given in a virtual rectangle onto the current viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTransform {
    virtual_rect: Rect<f32>,
    viewport: Size<f32>,
}

impl ViewportTransform {
    /// `None` when either side has no area, which would make the mapping
    /// degenerate.
    pub fn new(virtual_rect: Rect<f32>, viewport: Size<f32>) -> Option<Self> {
        if virtual_rect.is_empty() || !(viewport.width > 0.0 && viewport.height > 0.0) {
            return None;
        }
        Some(Self {
            virtual_rect,
            viewport,
        })
    }

    fn scale(&self) -> Vec2 {
        Vec2::new(
            self.viewport.width / self.virtual_rect.width,
            self.viewport.height / self.virtual_rect.height,
        )
    }

    pub fn position_to_viewport(&self, position: Vec2) -> Vec2 {
        (position - Vec2::new(self.virtual_rect.x, self.virtual_rect.y)) * self.scale()
    }

    pub fn width_to_viewport(&self, width: f32) -> f32 {
        width * self.scale().x
    }

    pub fn height_to_viewport(&self, height: f32) -> f32 {
        height * self.scale().y
    }

    /// Map a size measured in viewport pixels back into virtual units.
    pub fn size_from_viewport(&self, size: Size<f32>) -> Size<f32> {
        let scale = self.scale();
        Size::new(size.width / scale.x, size.height / scale.y)
    }
}

/// Blend `position` toward the nearest whole pixel. A ratio of 1.0 snaps
/// fully; halves round to even.
pub fn lock_to_pixel(position: Vec2, ratio: f32) -> Vec2 {
    let snapped = Vec2::new(position.x.round_ties_even(), position.y.round_ties_even());
    position * (1.0 - ratio) + snapped * ratio
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_transforms() {
        assert!(ViewportTransform::new(Rect::new(0.0, 0.0, 0.0, 10.0), Size::new(10.0, 10.0))
            .is_none());
        assert!(ViewportTransform::new(Rect::new(0.0, 0.0, 10.0, 10.0), Size::new(0.0, 10.0))
            .is_none());
    }

    #[test]
    fn test_position_mapping() {
        let transform =
            ViewportTransform::new(Rect::new(-1.0, -1.0, 2.0, 2.0), Size::new(800.0, 600.0))
                .unwrap();
        assert_eq!(
            transform.position_to_viewport(Vec2::new(0.0, 0.0)),
            Vec2::new(400.0, 300.0)
        );
        assert_eq!(transform.width_to_viewport(0.5), 200.0);
        assert_eq!(transform.height_to_viewport(0.5), 150.0);
    }

    #[test]
    fn test_size_round_trip() {
        let transform =
            ViewportTransform::new(Rect::new(0.0, 0.0, 100.0, 50.0), Size::new(400.0, 100.0))
                .unwrap();
        assert_eq!(
            transform.size_from_viewport(Size::new(40.0, 24.0)),
            Size::new(10.0, 12.0)
        );
    }

    #[test]
    fn test_lock_to_pixel() {
        assert_eq!(lock_to_pixel(Vec2::new(10.3, 4.7), 1.0), Vec2::new(10.0, 5.0));
        assert_eq!(lock_to_pixel(Vec2::new(2.5, 3.5), 1.0), Vec2::new(2.0, 4.0));
        assert_eq!(lock_to_pixel(Vec2::new(10.4, 0.0), 0.0), Vec2::new(10.4, 0.0));

        let half = lock_to_pixel(Vec2::new(1.0, 3.0) + Vec2::new(0.4, 0.0), 0.5);
        assert!((half.x - 1.2).abs() < 1e-5);
    }
}

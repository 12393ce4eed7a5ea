use super::Vec2;

/// Viewport size in logical pixels.
///
/// Provides the window-space <-> NDC mapping used for pointer input and for
/// algorithms that need to work on a pixel grid.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Maps a window position (logical px, +Y down) to NDC (+Y up).
    #[inline]
    pub fn to_ndc(self, px: Vec2) -> Vec2 {
        Vec2::new(px.x / self.width * 2.0 - 1.0, -px.y / self.height * 2.0 + 1.0)
    }

    /// Maps an NDC point back to window space.
    #[inline]
    pub fn to_pixels(self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            (ndc.x + 1.0) / 2.0 * self.width,
            (ndc.y - 1.0) / 2.0 * self.height * -1.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── to_ndc ────────────────────────────────────────────────────────────

    #[test]
    fn corners_map_to_unit_square() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.to_ndc(Vec2::new(0.0, 0.0)), Vec2::new(-1.0, 1.0));
        assert_eq!(vp.to_ndc(Vec2::new(800.0, 600.0)), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn center_maps_to_origin() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.to_ndc(Vec2::new(400.0, 300.0)), Vec2::new(0.0, 0.0));
    }

    // ── to_pixels ─────────────────────────────────────────────────────────

    #[test]
    fn to_pixels_inverts_to_ndc() {
        let vp = Viewport::new(1000.0, 500.0);
        let px = Vec2::new(250.0, 125.0);
        assert_eq!(vp.to_pixels(vp.to_ndc(px)), px);
    }

    #[test]
    fn is_valid_rejects_zero_size() {
        assert!(!Viewport::new(0.0, 10.0).is_valid());
        assert!(Viewport::new(1.0, 1.0).is_valid());
    }
}

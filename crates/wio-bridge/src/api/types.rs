use glam::UVec2;

/// Canvas geometry as observed by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowGeometry {
    /// Size in CSS pixels.
    pub logical: UVec2,
    /// Size of the backing store in device pixels.
    pub physical: UVec2,
    /// Device pixel ratio.
    pub scale: f64,
}

impl WindowGeometry {
    /// Geometry whose backing store is the logical size scaled by `scale`,
    /// truncated to whole pixels.
    pub fn from_logical(logical: UVec2, scale: f64) -> Self {
        Self {
            logical,
            physical: (logical.as_dvec2() * scale).as_uvec2(),
            scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn physical_is_scaled_logical() {
        let g = WindowGeometry::from_logical(UVec2::new(400, 300), 2.0);
        assert_eq!(g.physical, UVec2::new(800, 600));
    }

    #[test]
    fn fractional_scale_truncates() {
        let g = WindowGeometry::from_logical(UVec2::new(101, 33), 1.5);
        assert_eq!(g.physical, UVec2::new(151, 49));
    }
}

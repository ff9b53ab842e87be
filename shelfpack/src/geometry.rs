/// Relative tolerance used for every boundary comparison the packer makes.
pub const EPSILON: f64 = 1e-6;

/// Tells whether `extent` stays within `limit`, allowing for floating point
/// rounding at exact row and page boundaries.
#[inline]
pub(crate) fn fits(extent: f64, limit: f64) -> bool {
    extent <= limit + EPSILON * limit.abs().max(1.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Rect {
    pub pos: (f64, f64),
    pub size: (f64, f64),
}

impl Rect {
    pub fn max(&self) -> (f64, f64) {
        (self.pos.0 + self.size.0, self.pos.1 + self.size.1)
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        let self_max = self.max();
        let other_max = other.max();

        let x_overlap = self.pos.0 < other_max.0 && other.pos.0 < self_max.0;
        let y_overlap = self.pos.1 < other_max.1 && other.pos.1 < self_max.1;

        x_overlap && y_overlap
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fits_within_tolerance() {
        assert!(fits(200.0, 200.0));
        assert!(fits(200.0 + 1e-9, 200.0));
        assert!(!fits(200.1, 200.0));
    }

    #[test]
    fn touching_rects_do_not_intersect() {
        let a = Rect {
            pos: (0.0, 0.0),
            size: (10.0, 10.0),
        };
        let b = Rect {
            pos: (10.0, 0.0),
            size: (10.0, 10.0),
        };
        let c = Rect {
            pos: (5.0, 5.0),
            size: (10.0, 10.0),
        };

        assert!(!a.intersects(&b));
        assert!(a.intersects(&c));
        assert!(b.intersects(&c));
    }
}

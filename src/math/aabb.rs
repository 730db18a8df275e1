use glam::DVec3;

/// Axis-aligned bounding box in the internal millimeter, Z-up frame
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AABB {
    pub min: DVec3,
    pub max: DVec3,
}

impl AABB {
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Tight bounds around a point set, `None` when empty
    pub fn from_points(points: &[DVec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        Some(rest.iter().fold(Self::new(*first, *first), |acc, &p| AABB {
            min: acc.min.min(p),
            max: acc.max.max(p),
        }))
    }

    pub fn union(&self, other: &AABB) -> AABB {
        AABB {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Signed distances from the local origin to the top and to the bottom of the box,
    /// measured along Z. A box spanning z in [-300, 20] yields (20, 300).
    pub fn vertical_extents(&self) -> (f64, f64) {
        (self.max.z, -self.min.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_from_points() {
        let points = vec![
            DVec3::new(-1.0, -2.0, -3.0),
            DVec3::new(1.0, 2.0, 3.0),
            DVec3::new(0.0, 0.0, 0.0),
        ];

        let aabb = AABB::from_points(&points).unwrap();

        assert_eq!(aabb.min, DVec3::new(-1.0, -2.0, -3.0));
        assert_eq!(aabb.max, DVec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_aabb_from_no_points() {
        assert!(AABB::from_points(&[]).is_none());
    }

    #[test]
    fn test_aabb_center() {
        let aabb = AABB::new(DVec3::new(0.0, 0.0, 0.0), DVec3::new(2.0, 4.0, 6.0));
        assert_eq!(aabb.center(), DVec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_aabb_union_non_overlapping() {
        let aabb1 = AABB::new(DVec3::new(0.0, 0.0, 0.0), DVec3::new(1.0, 1.0, 1.0));
        let aabb2 = AABB::new(DVec3::new(2.0, 2.0, 2.0), DVec3::new(3.0, 3.0, 3.0));
        let union = aabb1.union(&aabb2);
        assert_eq!(union.min, DVec3::new(0.0, 0.0, 0.0));
        assert_eq!(union.max, DVec3::new(3.0, 3.0, 3.0));
    }

    #[test]
    fn test_vertical_extents_hanging_shade() {
        let aabb = AABB::new(DVec3::new(-100.0, -100.0, -300.0), DVec3::new(100.0, 100.0, 20.0));
        assert_eq!(aabb.vertical_extents(), (20.0, 300.0));
    }

    #[test]
    fn test_vertical_extents_entirely_below_origin() {
        // Top extent goes negative when the model starts below its origin
        let aabb = AABB::new(DVec3::new(0.0, 0.0, -50.0), DVec3::new(1.0, 1.0, -10.0));
        assert_eq!(aabb.vertical_extents(), (-10.0, 50.0));
    }
}

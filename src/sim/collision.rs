//! Collision primitives
//!
//! Everything in Sea Defenders collides with axis-aligned boxes, except
//! islands, which test the ship's center against the island outline.

use glam::Vec2;

/// Player bullet vs enemy hull
pub const BULLET_ENEMY_EXTENTS: Vec2 = Vec2::new(20.0, 20.0);
/// Enemy bullet vs player hull
pub const BULLET_PLAYER_EXTENTS: Vec2 = Vec2::new(30.0, 20.0);
/// Enemy ramming the player
pub const RAM_EXTENTS: Vec2 = Vec2::new(40.0, 30.0);
/// Player center vs whirlpool center
pub const WHIRLPOOL_EXTENTS: Vec2 = Vec2::new(20.0, 20.0);

/// True if `a` and `b` are strictly closer than `half_extents` on both axes
#[inline]
pub fn boxes_overlap(a: Vec2, b: Vec2, half_extents: Vec2) -> bool {
    let d = (a - b).abs();
    d.x < half_extents.x && d.y < half_extents.y
}

/// Even-odd ray cast against a closed polygon (last point joins the first).
///
/// Casts a ray toward +x and counts edge crossings. Horizontal edges never
/// count because the half-open `>` test puts both endpoints on the same side.
pub fn point_in_polygon(points: &[Vec2], p: Vec2) -> bool {
    let mut inside = false;
    let mut j = points.len().wrapping_sub(1);
    for (i, &a) in points.iter().enumerate() {
        let b = points[j];
        if (a.y > p.y) != (b.y > p.y) {
            let cross_x = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
            if p.x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Vec2> {
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 0.0),
            Vec2::new(100.0, 100.0),
            Vec2::new(0.0, 100.0),
        ]
    }

    #[test]
    fn test_boxes_overlap_is_strict() {
        let a = Vec2::new(100.0, 100.0);
        assert!(boxes_overlap(a, Vec2::new(119.0, 81.0), BULLET_ENEMY_EXTENTS));
        assert!(!boxes_overlap(a, Vec2::new(120.0, 100.0), BULLET_ENEMY_EXTENTS));
        assert!(!boxes_overlap(a, Vec2::new(100.0, 130.0), RAM_EXTENTS));
        assert!(boxes_overlap(a, Vec2::new(139.0, 129.0), RAM_EXTENTS));
    }

    #[test]
    fn test_boxes_overlap_asymmetric_extents() {
        let player = Vec2::new(0.0, 0.0);
        assert!(boxes_overlap(player, Vec2::new(29.0, 0.0), BULLET_PLAYER_EXTENTS));
        assert!(!boxes_overlap(player, Vec2::new(0.0, 25.0), BULLET_PLAYER_EXTENTS));
    }

    #[test]
    fn test_point_in_square() {
        let poly = square();
        assert!(point_in_polygon(&poly, Vec2::new(50.0, 50.0)));
        assert!(point_in_polygon(&poly, Vec2::new(1.0, 99.0)));
        assert!(!point_in_polygon(&poly, Vec2::new(150.0, 50.0)));
        assert!(!point_in_polygon(&poly, Vec2::new(-1.0, 50.0)));
        assert!(!point_in_polygon(&poly, Vec2::new(50.0, -10.0)));
    }

    #[test]
    fn test_point_in_concave_polygon() {
        // U shape opening upward (screen y grows down)
        let poly = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(30.0, 0.0),
            Vec2::new(30.0, 70.0),
            Vec2::new(70.0, 70.0),
            Vec2::new(70.0, 0.0),
            Vec2::new(100.0, 0.0),
            Vec2::new(100.0, 100.0),
            Vec2::new(0.0, 100.0),
        ];
        assert!(point_in_polygon(&poly, Vec2::new(15.0, 20.0)));
        assert!(point_in_polygon(&poly, Vec2::new(85.0, 20.0)));
        assert!(!point_in_polygon(&poly, Vec2::new(50.0, 20.0)));
        assert!(point_in_polygon(&poly, Vec2::new(50.0, 90.0)));
    }

    #[test]
    fn test_empty_polygon_contains_nothing() {
        assert!(!point_in_polygon(&[], Vec2::ZERO));
    }
}

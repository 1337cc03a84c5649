//! Sticker geometry and 3D rotations.
//!
//! Every face of the cube is built from the same template sticker on the
//! `z = 1` plane, translated to its grid cell and then carried to its face by
//! one of six fixed orientations. The cube spans `[-1, 1]` on every axis.

use std::cmp::Ordering;

/// A point in 3D space.
pub type Vec3 = [f64; 3];

/// Number of points in a sticker outline. The first point is repeated at the
/// end to close the polygon.
pub const STICKER_POINTS: usize = 9;

/// The closed outline of one sticker.
pub type Sticker = [Vec3; STICKER_POINTS];

const STICKER_WIDTH: f64 = 0.9;
const STICKER_MARGIN: f64 = 0.5 * (1.0 - STICKER_WIDTH);
const STICKER_THICKNESS: f64 = 0.001;

/// Maps the `+Z` template face onto each of the six faces, indexed by color.
///
/// - 0: `+Y` (up, white)
/// - 1: `-Y` (down, yellow)
/// - 2: `-X` (left, orange)
/// - 3: `+X` (right, red)
/// - 4: `-Z` (back, blue)
/// - 5: `+Z` (front, green)
pub const ORIENTATIONS: [fn(Vec3) -> Vec3; 6] = [
    |[x, y, z]| [x, z, -y],
    |[x, y, z]| [x, -z, y],
    |[x, y, z]| [-z, y, x],
    |[x, y, z]| [z, y, -x],
    |[x, y, z]| [-x, y, -z],
    |[x, y, z]| [x, y, z],
];

/// Geometry of a single facelet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceletGeometry {
    /// Index into [`ORIENTATIONS`]; doubles as the color index.
    pub color: usize,
    /// Center of the facelet's cell on the cube surface. Used to select layers.
    pub anchor: Vec3,
    /// Center of the sticker, slightly above the surface.
    pub centroid: Vec3,
    pub sticker: Sticker,
}

impl FaceletGeometry {
    pub fn transform(&mut self, rotation: &Rotation) {
        self.anchor = rotation.apply(self.anchor);
        self.centroid = rotation.apply(self.centroid);
        for point in &mut self.sticker {
            *point = rotation.apply(*point);
        }
    }
}

/// The template sticker: an octagon with clipped corners, inset by the
/// sticker margin and raised by its thickness.
fn base_sticker() -> Sticker {
    let d1 = 1.0 - STICKER_MARGIN;
    let d2 = 1.0 - 2.0 * STICKER_MARGIN;
    let d3 = 1.0 + STICKER_THICKNESS;
    [
        [d1, d2, d3],
        [d2, d1, d3],
        [-d2, d1, d3],
        [-d1, d2, d3],
        [-d1, -d2, d3],
        [-d2, -d1, d3],
        [d2, -d1, d3],
        [d1, -d2, d3],
        [d1, d2, d3],
    ]
}

/// Builds the facelets of an NxNxN cube in canonical order.
pub fn build_facelets(size: usize) -> Vec<FaceletGeometry> {
    let n = size as f64;
    let cell_width = 2.0 / n;
    let template = base_sticker();

    let mut facelets = Vec::with_capacity(6 * size * size);
    for (color, orient) in ORIENTATIONS.iter().enumerate() {
        for i in 0..size {
            for j in 0..size {
                let tx = -1.0 + (i as f64 + 0.5) * cell_width;
                let ty = -1.0 + (j as f64 + 0.5) * cell_width;

                let sticker = template.map(|[x, y, z]| orient([x / n + tx, y / n + ty, z]));
                facelets.push(FaceletGeometry {
                    color,
                    anchor: orient([tx, ty, 1.0]),
                    centroid: orient([tx, ty, 1.0 + STICKER_THICKNESS]),
                    sticker,
                });
            }
        }
    }

    facelets.sort_by(canonical_order);
    facelets
}

/// Canonical facelet order: by color, then anchor `z`, `y`, `x`.
fn canonical_order(a: &FaceletGeometry, b: &FaceletGeometry) -> Ordering {
    // adding 0.0 folds -0.0 into 0.0 so total_cmp treats them as equal
    let key = |facelet: &FaceletGeometry| {
        let [x, y, z] = facelet.anchor;
        [z + 0.0, y + 0.0, x + 0.0]
    };
    a.color.cmp(&b.color).then_with(|| {
        key(a)
            .iter()
            .zip(key(b).iter())
            .map(|(lhs, rhs)| lhs.total_cmp(rhs))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    })
}

/// Whether an anchor lies in the slab of `layer` (0 is the outer layer)
/// perpendicular to `axis`.
pub fn in_layer(anchor: Vec3, axis: Vec3, layer: usize, size: usize) -> bool {
    let cell_width = 2.0 / size as f64;
    let projection = dot(anchor, axis);
    projection > 0.9 - (layer + 1) as f64 * cell_width
        && projection < 1.1 - layer as f64 * cell_width
}

pub fn dot(a: Vec3, b: Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// A unit quaternion `w + xi + yj + zk`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Quaternion {
    /// Rotation by `angle` radians about `axis` (right-handed).
    pub fn from_axis_angle(axis: Vec3, angle: f64) -> Self {
        let norm = dot(axis, axis).sqrt();
        let (sin, cos) = (angle / 2.0).sin_cos();
        let scale = if norm > 0.0 { sin / norm } else { 0.0 };
        Self {
            w: cos,
            x: axis[0] * scale,
            y: axis[1] * scale,
            z: axis[2] * scale,
        }
    }

    pub fn to_rotation(&self) -> Rotation {
        let Quaternion { w, x, y, z } = *self;
        Rotation {
            matrix: [
                [
                    1.0 - 2.0 * (y * y + z * z),
                    2.0 * (x * y - w * z),
                    2.0 * (x * z + w * y),
                ],
                [
                    2.0 * (x * y + w * z),
                    1.0 - 2.0 * (x * x + z * z),
                    2.0 * (y * z - w * x),
                ],
                [
                    2.0 * (x * z - w * y),
                    2.0 * (y * z + w * x),
                    1.0 - 2.0 * (x * x + y * y),
                ],
            ],
        }
    }
}

/// A 3x3 rotation matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rotation {
    pub matrix: [[f64; 3]; 3],
}

impl Rotation {
    /// Rotation by `turns` quarter turns, clockwise when seen from the tip of
    /// `axis`.
    pub fn quarter_turns(axis: Vec3, turns: f64) -> Self {
        Quaternion::from_axis_angle(axis, -turns * std::f64::consts::FRAC_PI_2).to_rotation()
    }

    pub fn apply(&self, point: Vec3) -> Vec3 {
        self.matrix.map(|row| dot(row, point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vec3, b: Vec3) {
        for (lhs, rhs) in a.iter().zip(b.iter()) {
            assert!((lhs - rhs).abs() < 1e-9, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn test_orientations_send_front_to_each_face() {
        let normals: Vec<Vec3> = ORIENTATIONS.iter().map(|orient| orient([0.0, 0.0, 1.0])).collect();
        assert_eq!(
            normals,
            vec![
                [0.0, 1.0, -0.0],
                [0.0, -1.0, 0.0],
                [-1.0, 0.0, 0.0],
                [1.0, 0.0, -0.0],
                [-0.0, 0.0, -1.0],
                [0.0, 0.0, 1.0],
            ]
        );
    }

    #[test]
    fn test_canonical_order_groups_by_color() {
        let facelets = build_facelets(3);
        assert_eq!(facelets.len(), 54);
        for (index, facelet) in facelets.iter().enumerate() {
            assert_eq!(facelet.color, index / 9);
        }
        // each face's center sits in the middle of its block
        for color in 0..6 {
            let center = facelets[color * 9 + 4].anchor;
            assert!(center.iter().filter(|c| c.abs() < 1e-12).count() == 2);
        }
    }

    #[test]
    fn test_sticker_is_closed_and_on_its_face() {
        for facelet in build_facelets(2) {
            assert_eq!(facelet.sticker[0], facelet.sticker[STICKER_POINTS - 1]);
            let normal = ORIENTATIONS[facelet.color]([0.0, 0.0, 1.0]);
            for point in facelet.sticker {
                assert!((dot(point, normal) - (1.0 + STICKER_THICKNESS)).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_quarter_turn_is_clockwise_from_outside() {
        // seen from +Y, a clockwise turn carries the front (+Z) to the left (-X)
        let rotation = Rotation::quarter_turns([0.0, 1.0, 0.0], 1.0);
        assert_close(rotation.apply([0.0, 0.0, 1.0]), [-1.0, 0.0, 0.0]);
        assert_close(rotation.apply([0.0, 1.0, 0.0]), [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_layer_selection() {
        let size = 3;
        let axis = [0.0, 1.0, 0.0];
        let top = [0.0, 1.0, 0.0];
        let upper_row = [0.0, 2.0 / 3.0, 1.0];
        let middle_row = [0.0, 0.0, 1.0];
        assert!(in_layer(top, axis, 0, size));
        assert!(in_layer(upper_row, axis, 0, size));
        assert!(!in_layer(middle_row, axis, 0, size));
        assert!(in_layer(middle_row, axis, 1, size));
        assert!(!in_layer(top, axis, 1, size));
        assert!(!in_layer([0.0, -1.0, 0.0], axis, 1, size));
        assert!(in_layer([0.0, -1.0, 0.0], axis, 2, size));
    }
}

/// A 3×3 matrix, row major
pub type Mat3 = [[f64; 3]; 3];

pub const IDENTITY3: Mat3 = [[1., 0., 0.], [0., 1., 0.], [0., 0., 1.]];

#[must_use]
pub fn mat3_mul(a: &Mat3, b: &Mat3) -> Mat3 {
    let mut m = [[0.; 3]; 3];
    for (i, row) in m.iter_mut().enumerate() {
        for (j, element) in row.iter_mut().enumerate() {
            *element = a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j];
        }
    }
    m
}

#[must_use]
pub fn mat3_transpose(a: &Mat3) -> Mat3 {
    [
        [a[0][0], a[1][0], a[2][0]],
        [a[0][1], a[1][1], a[2][1]],
        [a[0][2], a[1][2], a[2][2]],
    ]
}

#[must_use]
pub fn mat3_apply(a: &Mat3, v: [f64; 3]) -> [f64; 3] {
    [
        a[0][0] * v[0] + a[0][1] * v[1] + a[0][2] * v[2],
        a[1][0] * v[0] + a[1][1] * v[1] + a[1][2] * v[2],
        a[2][0] * v[0] + a[2][1] * v[1] + a[2][2] * v[2],
    ]
}

#[must_use]
pub fn mat3_determinant(a: &Mat3) -> f64 {
    a[0][0] * (a[1][1] * a[2][2] - a[1][2] * a[2][1])
        - a[0][1] * (a[1][0] * a[2][2] - a[1][2] * a[2][0])
        + a[0][2] * (a[1][0] * a[2][1] - a[1][1] * a[2][0])
}

/// The inverse by cofactors, `None` if the matrix is numerically singular
#[must_use]
pub fn mat3_inverse(a: &Mat3) -> Option<Mat3> {
    let det = mat3_determinant(a);
    if det.abs() < 1e-300 || !det.is_finite() {
        return None;
    }
    let r = 1. / det;
    Some([
        [
            r * (a[1][1] * a[2][2] - a[1][2] * a[2][1]),
            r * (a[0][2] * a[2][1] - a[0][1] * a[2][2]),
            r * (a[0][1] * a[1][2] - a[0][2] * a[1][1]),
        ],
        [
            r * (a[1][2] * a[2][0] - a[1][0] * a[2][2]),
            r * (a[0][0] * a[2][2] - a[0][2] * a[2][0]),
            r * (a[0][2] * a[1][0] - a[0][0] * a[1][2]),
        ],
        [
            r * (a[1][0] * a[2][1] - a[1][1] * a[2][0]),
            r * (a[0][1] * a[2][0] - a[0][0] * a[2][1]),
            r * (a[0][0] * a[1][1] - a[0][1] * a[1][0]),
        ],
    ])
}

/// Rotation of the coordinate frame by `angle` around the first axis
#[must_use]
pub fn rot_x(angle: f64) -> Mat3 {
    let (s, c) = angle.sin_cos();
    [[1., 0., 0.], [0., c, -s], [0., s, c]]
}

/// Rotation around the second axis
#[must_use]
pub fn rot_y(angle: f64) -> Mat3 {
    let (s, c) = angle.sin_cos();
    [[c, 0., s], [0., 1., 0.], [-s, 0., c]]
}

/// Rotation around the third axis
#[must_use]
pub fn rot_z(angle: f64) -> Mat3 {
    let (s, c) = angle.sin_cos();
    [[c, -s, 0.], [s, c, 0.], [0., 0., 1.]]
}

#[must_use]
pub fn norm3(v: [f64; 3]) -> f64 {
    v[0].hypot(v[1]).hypot(v[2])
}

#[must_use]
pub fn dot3(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

// ----- Affine transformations ----------------------------------------------------

/// A 4×4 homogeneous transformation, `[R t; 0 1]`, stored as its upper 3×4 block
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine4 {
    pub linear: Mat3,
    pub translation: [f64; 3],
}

impl Default for Affine4 {
    fn default() -> Affine4 {
        Affine4::identity()
    }
}

impl Affine4 {
    #[must_use]
    pub fn identity() -> Affine4 {
        Affine4 {
            linear: IDENTITY3,
            translation: [0.; 3],
        }
    }

    #[must_use]
    pub fn new(linear: Mat3, translation: [f64; 3]) -> Affine4 {
        Affine4 {
            linear,
            translation,
        }
    }

    /// The full 4×4 matrix
    #[must_use]
    pub fn matrix(&self) -> [[f64; 4]; 4] {
        let (m, t) = (&self.linear, &self.translation);
        [
            [m[0][0], m[0][1], m[0][2], t[0]],
            [m[1][0], m[1][1], m[1][2], t[1]],
            [m[2][0], m[2][1], m[2][2], t[2]],
            [0., 0., 0., 1.],
        ]
    }

    /// Homogeneous matrix-vector product, with the implied fourth component 1
    #[must_use]
    pub fn apply(&self, v: [f64; 3]) -> [f64; 3] {
        let r = mat3_apply(&self.linear, v);
        [
            r[0] + self.translation[0],
            r[1] + self.translation[1],
            r[2] + self.translation[2],
        ]
    }

    /// `self ∘ other`, i.e. apply `other` first
    #[must_use]
    pub fn then_after(&self, other: &Affine4) -> Affine4 {
        Affine4 {
            linear: mat3_mul(&self.linear, &other.linear),
            translation: self.apply(other.translation),
        }
    }

    #[must_use]
    pub fn inverse(&self) -> Option<Affine4> {
        let linear = mat3_inverse(&self.linear)?;
        let t = mat3_apply(&linear, self.translation);
        Some(Affine4 {
            linear,
            translation: [-t[0], -t[1], -t[2]],
        })
    }
}

// ----- Tests ---------------------------------------------------------------------

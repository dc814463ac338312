//! The (longitude, latitude, radius) families: celestiomagnetic, equatorial
//! inertial, and the solar and heliospheric frames. All of them are spherical
//! forms of the celestiocentric frame of their ORM.
use super::*;

/// Below this, a component is treated as zero when resolving the quadrant
const NEAR_ZERO: f64 = 1e-10;

/// Cartesian (X, Y, Z) to (longitude, latitude, radius). The quadrant of
/// the longitude is resolved explicitly, and positions on the axis snap to
/// the poles (or to the origin) instead of dividing by a vanishing distance.
#[must_use]
pub(crate) fn spherical_from_cartesian(xyz: [f64; 3]) -> [f64; 3] {
    let [x, y, z] = xyz;
    let radius = norm3(xyz);
    let w = x.hypot(y);

    let longitude = if x.abs() < NEAR_ZERO {
        if y.abs() < NEAR_ZERO {
            0.
        } else {
            FRAC_PI_2.copysign(y)
        }
    } else if x > 0. {
        (y / x).atan()
    } else if y >= 0. {
        (y / x).atan() + PI
    } else {
        (y / x).atan() - PI
    };

    let latitude = if w < NEAR_ZERO {
        if z.abs() < NEAR_ZERO {
            0.
        } else {
            FRAC_PI_2.copysign(z)
        }
    } else {
        (z / w).atan()
    };

    [longitude, latitude, radius]
}

#[must_use]
pub(crate) fn cartesian_from_spherical(values: [f64; 3]) -> [f64; 3] {
    let [lon, lat, r] = values;
    let (slam, clam) = lon.sin_cos();
    let (sphi, cphi) = lat.sin_cos();
    [r * cphi * clam, r * cphi * slam, r * sphi]
}

/// Any of the spherical families to celestiocentric
pub(crate) struct SphericalEngine;

impl Engine for SphericalEngine {
    fn targets(&self) -> &'static [Target] {
        &TO_CELESTIOCENTRIC
    }

    fn convert(
        &mut self,
        target: Target,
        src: &Srf,
        _dest: &Srf,
        values: [f64; 3],
    ) -> Result<([f64; 3], Validity), Error> {
        match target {
            Target::Undefined => Ok(pass_through(src, values)),
            T(Celestiocentric) => Ok((
                cartesian_from_spherical(values),
                intrinsic(src.template(), values),
            )),
            _ => Err(unsupported(src, target)),
        }
    }
}

// ----- Tests ---------------------------------------------------------------------

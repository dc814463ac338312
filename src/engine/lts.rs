//! Local tangent space: a topocentric frame at a tangent point, with the y axis
//! rotated `azimuth` clockwise from north. The Euclidean template carries a
//! false (x, y) origin; the cylindrical and azimuthal spherical templates are
//! polar forms of the same frame.
use super::*;
use crate::boundary::check;

/// The affine transformations between celestiocentric and local coordinates
#[derive(Clone, Copy, Debug)]
pub(crate) struct LocalFrame {
    pub to_local: Affine4,
    pub from_local: Affine4,
}

impl LocalFrame {
    pub fn new(ellps: &Ellipsoid, params: &LtsParameters) -> LocalFrame {
        let (slam, clam) = params.geodetic_longitude.sin_cos();
        let (sphi, cphi) = params.geodetic_latitude.sin_cos();
        let (saz, caz) = params.azimuth.sin_cos();

        let east = [-slam, clam, 0.];
        let north = [-sphi * clam, -sphi * slam, cphi];
        let up = [cphi * clam, cphi * slam, sphi];

        let x = [0, 1, 2].map(|i| east[i] * caz - north[i] * saz);
        let y = [0, 1, 2].map(|i| east[i] * saz + north[i] * caz);
        let rotation = [x, y, up];

        let origin = ellps.cartesian([
            params.geodetic_longitude,
            params.geodetic_latitude,
            params.height_offset,
        ]);
        let t = mat3_apply(&rotation, origin);
        LocalFrame {
            to_local: Affine4::new(rotation, [-t[0], -t[1], -t[2]]),
            from_local: Affine4::new(mat3_transpose(&rotation), origin),
        }
    }

    pub fn of(srf: &Srf) -> Result<LocalFrame, Error> {
        match srf.parameters() {
            Parameters::Lts(p) => Ok(LocalFrame::new(&srf.ellipsoid(), p)),
            _ => Err(Error::Inactionable(format!(
                "{:?} is not a local tangent space",
                srf.template()
            ))),
        }
    }
}

/// Local Euclidean (x, y, z), before the false origin, to the canonical form of the template
pub(crate) fn local_to_template(template: SrfTemplate, xyz: [f64; 3]) -> [f64; 3] {
    let [x, y, z] = xyz;
    match template {
        LocalTangentSpaceCylindrical => [x.hypot(y), y.atan2(x), z],
        LocalTangentSpaceAzimuthalSpherical => {
            let range = norm3(xyz);
            let elevation = if range == 0. { 0. } else { (z / range).asin() };
            [x.atan2(y), elevation, range]
        }
        _ => xyz,
    }
}

/// The inverse of [local_to_template]
pub(crate) fn template_to_local(template: SrfTemplate, values: [f64; 3]) -> [f64; 3] {
    match template {
        LocalTangentSpaceCylindrical => {
            let [rho, theta, z] = values;
            [rho * theta.cos(), rho * theta.sin(), z]
        }
        LocalTangentSpaceAzimuthalSpherical => {
            let [azimuth, elevation, range] = values;
            let horizontal = range * elevation.cos();
            [horizontal * azimuth.sin(), horizontal * azimuth.cos(), range * elevation.sin()]
        }
        _ => values,
    }
}

// ----- The engine ----------------------------------------------------------------

/// Local tangent space (any of the three templates) to celestiocentric
#[derive(Default)]
pub(crate) struct LocalTangentEngine {
    frame: Option<(SrfHandle, LocalFrame)>,
}

impl Engine for LocalTangentEngine {
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
        if target != T(Celestiocentric) {
            if target == Target::Undefined {
                return Ok(pass_through(src, values));
            }
            return Err(unsupported(src, target));
        }

        let frame = match self.frame {
            Some((id, frame)) if id == src.id() => frame,
            _ => {
                let frame = LocalFrame::of(src)?;
                self.frame = Some((src.id(), frame));
                frame
            }
        };

        let mut validity = intrinsic(src.template(), values);
        let local = if src.template() == LocalTangentSpaceEuclidean {
            offset(src, values, -1.)
        } else {
            template_to_local(src.template(), values)
        };
        let cartesian = frame.from_local.apply(local);

        // Set members have their domain in celestiodetic space
        if src.member().is_some() {
            let geodetic = src.orm().geodetic_regions().geodetic(cartesian)?;
            validity = validity.max(check(src, geodetic)?);
        }
        Ok((cartesian, validity))
    }
}

// ----- Tests ---------------------------------------------------------------------

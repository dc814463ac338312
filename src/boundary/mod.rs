//! Validity regions: the classification of a coordinate with respect to the
//! domain of applicability of an SRF.
//!
//! The checks are pure functions of the template (and, for set members, of
//! the set and member code). For map projections and set members, the domain
//! is expressed in celestiodetic terms: the caller converts to the
//! celestiodetic interim SRF first, then calls [check].
mod sets;

use crate::authoring::*;
use crate::opmanager::convert;

/// The validity classification, ordered from best to worst.
/// Chains of conversions report the worst region seen, i.e. the maximum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Validity {
    /// Within the nominal domain of the SRF
    #[default]
    Valid,
    /// Outside the nominal domain, but within its extension margin
    ExtendedValid,
    /// Outside the extended domain, but mathematically well defined
    Defined,
    /// At or beyond a singularity: the values are not meaningful
    Undefined,
}

impl Validity {
    /// The worse of the two
    #[must_use]
    pub fn worst(self, other: Validity) -> Validity {
        self.max(other)
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self == Validity::Valid
    }
}

/// The template in which the domain of an SRF is expressed
#[must_use]
pub(crate) fn boundary_template(srf: &Srf) -> SrfTemplate {
    if srf.template().is_map_projection() || srf.member().is_some() {
        return SrfTemplate::Celestiodetic;
    }
    srf.template()
}

/// The template level range checks, applicable to any SRF of the template
#[must_use]
pub(crate) fn intrinsic(template: SrfTemplate, values: [f64; 3]) -> Validity {
    use SrfTemplate::*;
    if values.iter().any(|v| !v.is_finite()) {
        return Validity::Undefined;
    }
    let ok = match template {
        Celestiodetic => values[1].abs() <= FRAC_PI_2,
        LocalTangentSpaceCylindrical => values[0] >= 0.,
        LocalTangentSpaceAzimuthalSpherical => values[2] >= 0. && values[1].abs() <= FRAC_PI_2,
        t if t.is_spherical() => values[2] >= 0. && values[1].abs() <= FRAC_PI_2,
        _ => true,
    };
    if ok {
        Validity::Valid
    } else {
        Validity::Undefined
    }
}

/// The validity of `values`, given in the boundary template of `srf`
pub(crate) fn check(srf: &Srf, values: [f64; 3]) -> Result<Validity, Error> {
    let mut validity = intrinsic(boundary_template(srf), values);
    if validity == Validity::Undefined {
        return Ok(validity);
    }
    if srf.template().is_map_projection() {
        validity = validity.max(projection_domain(srf, values[0], values[1]));
    }
    if let Some((set, member)) = srf.member() {
        validity = validity.max(sets::refine(set, member, values[0], values[1])?);
    }
    Ok(validity)
}

/// The validity of `values`, given in the template of `srf`: through the
/// celestiodetic interim SRF where the domain is expressed in those terms
pub(crate) fn classify(srf: &Srf, values: [f64; 3]) -> Result<Validity, Error> {
    let template = boundary_template(srf);
    if template == srf.template() {
        return check(srf, values);
    }
    let interim = srf.interim(template, srf.orm(), srf.hsr())?;
    let (values, validity) = convert(srf, &interim, values)?;
    Ok(validity.max(check(srf, values)?))
}

/// The domain of a map projection, from the celestiodetic longitude and latitude
fn projection_domain(srf: &Srf, lon: f64, lat: f64) -> Validity {
    let pole = FRAC_PI_2;
    match srf.parameters() {
        Parameters::Tm(p) => {
            let dlon = delta_lambda_min(lon, p.origin_longitude).abs();
            if dlon >= FRAC_PI_2 {
                Validity::Undefined
            } else if dlon > 0.35 {
                Validity::Defined
            } else {
                Validity::Valid
            }
        }
        Parameters::Lcc(p) => {
            // The cone apex is at the pole nearest the standard parallels
            let apex = (p.latitude1 + p.latitude2).signum();
            if (lat + apex * pole).abs() < 1e-10 {
                Validity::Undefined
            } else if lat.abs() > 89_f64.to_radians() {
                Validity::Defined
            } else {
                Validity::Valid
            }
        }
        Parameters::Mercator(_) => {
            if pole - lat.abs() < 1e-10 {
                Validity::Undefined
            } else if lat.abs() > 85_f64.to_radians() {
                Validity::Defined
            } else {
                Validity::Valid
            }
        }
        Parameters::Ps(p) => {
            let s = p.aspect.sign();
            if (lat + s * pole).abs() < 1e-10 {
                Validity::Undefined
            } else if s * lat < 0. {
                Validity::Defined
            } else {
                Validity::Valid
            }
        }
        _ => Validity::Valid,
    }
}

// ----- Tests ---------------------------------------------------------------------

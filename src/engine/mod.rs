//! The conversion engines: one per source SRF template family, each converting
//! directly into the handful of destination templates it declares.
//!
//! Longer conversions are chained by the operation manager, walking the graph
//! spanned by the declared [targets](Engine::targets).
mod celestiocentric;
mod celestiodetic;
mod lts;
mod projected;
mod spherical;

pub(crate) use lts::LocalFrame;

use crate::authoring::*;
use crate::boundary::intrinsic;

/// A destination of a single conversion step
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Target {
    Template(SrfTemplate),
    /// Pass the values through unchanged: used between SRFs of identical definition
    Undefined,
}

/// A conversion engine for one source template. Engines are owned by their
/// source SRF instance, and cache constants per destination SRF instance.
pub(crate) trait Engine {
    /// The destinations reachable in a single step
    fn targets(&self) -> &'static [Target];

    /// Convert `values`, given in the canonical form of the template of `src`,
    /// into the canonical form of `target`, as represented by `dest`
    fn convert(
        &mut self,
        target: Target,
        src: &Srf,
        dest: &Srf,
        values: [f64; 3],
    ) -> Result<([f64; 3], Validity), Error>;
}

use SrfTemplate::*;
use Target::Template as T;

#[rustfmt::skip]
const FROM_CELESTIOCENTRIC: [Target; 13] = [
    T(Celestiodetic),
    T(LocalTangentSpaceEuclidean), T(LocalTangentSpaceCylindrical), T(LocalTangentSpaceAzimuthalSpherical),
    T(Celestiomagnetic), T(EquatorialInertial), T(SolarEcliptic), T(SolarEquatorial),
    T(HeliosphericAriesEcliptic), T(HeliosphericEarthEcliptic), T(HeliosphericEarthEquatorial),
    T(Celestiocentric),
    Target::Undefined,
];

const FROM_CELESTIODETIC: [Target; 6] = [
    T(Celestiocentric),
    T(TransverseMercator),
    T(LambertConformalConic),
    T(Mercator),
    T(PolarStereographic),
    Target::Undefined,
];

const FROM_PROJECTED: [Target; 2] = [T(Celestiodetic), Target::Undefined];

const TO_CELESTIOCENTRIC: [Target; 2] = [T(Celestiocentric), Target::Undefined];

/// The destinations directly reachable from a template
#[must_use]
pub(crate) fn reachable(template: SrfTemplate) -> &'static [Target] {
    match template {
        Celestiocentric => &FROM_CELESTIOCENTRIC,
        Celestiodetic => &FROM_CELESTIODETIC,
        t if t.is_map_projection() => &FROM_PROJECTED,
        _ => &TO_CELESTIOCENTRIC,
    }
}

/// The engine for a source template
#[must_use]
pub(crate) fn new(template: SrfTemplate) -> Box<dyn Engine> {
    match template {
        Celestiocentric => Box::new(celestiocentric::CelestiocentricEngine::default()),
        Celestiodetic => Box::new(celestiodetic::CelestiodeticEngine::default()),
        t if t.is_map_projection() => Box::new(projected::ProjectedEngine::default()),
        t if t.is_local_tangent() => Box::new(lts::LocalTangentEngine::default()),
        _ => Box::new(spherical::SphericalEngine),
    }
}

/// The values unchanged, with the template level classification only
fn pass_through(src: &Srf, values: [f64; 3]) -> ([f64; 3], Validity) {
    (values, intrinsic(src.template(), values))
}

fn unsupported(src: &Srf, target: Target) -> Error {
    warn!("No direct conversion from {:?} to {target:?}", src.template());
    Error::NotImplemented(format!(
        "direct conversion from {:?} to {target:?}",
        src.template()
    ))
}

/// Add (or, with `sign` = -1, remove) the false origin of an SRF
fn offset(srf: &Srf, values: [f64; 3], sign: f64) -> [f64; 3] {
    let [x0, y0] = srf.parameters().false_origin();
    [values[0] + sign * x0, values[1] + sign * y0, values[2]]
}

// ----- Tests ---------------------------------------------------------------------

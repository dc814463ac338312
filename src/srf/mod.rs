//! Spatial reference frames: a template, an ORM, an HSR, and the
//! template specific parameters. Each SRF instance owns the lazily built
//! caches used when converting *from* it.
//!
//! An SRF instance is deliberately neither `Send` nor `Sync`: its caches are
//! mutated through shared references, so each thread of control must use its
//! own SRF instances.
mod definition;
mod set;

pub use set::SrfSet;

use crate::cache::BoundedCache;
use crate::engine::Engine;
use crate::opmanager::OpSeq;
use crate::opmanager::OPSEQ_CACHE_BOUND;
use crate::orm::validate_orm_hsr;
use crate::Ellipsoid;
use crate::Error;
use crate::HsrCode;
use crate::OrmCode;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::f64::consts::FRAC_PI_2;
use std::rc::Rc;

/// The identity of an SRF instance
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct SrfHandle(uuid::Uuid);
impl SrfHandle {
    pub fn new() -> Self {
        SrfHandle(uuid::Uuid::new_v4())
    }
}
impl Default for SrfHandle {
    fn default() -> Self {
        SrfHandle(uuid::Uuid::new_v4())
    }
}

// ----- Templates -----------------------------------------------------------------

/// The mathematical family of an SRF. The comment on each variant gives
/// the component order of its coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SrfTemplate {
    /// (X, Y, Z)
    Celestiocentric,
    /// (longitude, latitude, ellipsoidal height)
    Celestiodetic,
    /// (easting, northing, ellipsoidal height)
    TransverseMercator,
    /// (easting, northing, ellipsoidal height)
    LambertConformalConic,
    /// (easting, northing, ellipsoidal height)
    Mercator,
    /// (easting, northing, ellipsoidal height)
    PolarStereographic,
    /// (x, y, height)
    LocalTangentSpaceEuclidean,
    /// (radius, bearing, height)
    LocalTangentSpaceCylindrical,
    /// (azimuth, elevation, range)
    LocalTangentSpaceAzimuthalSpherical,
    /// (longitude, latitude, radius)
    Celestiomagnetic,
    /// (right ascension, declination, radius)
    EquatorialInertial,
    /// (longitude, latitude, radius)
    SolarEcliptic,
    /// (longitude, latitude, radius)
    SolarEquatorial,
    /// (longitude, latitude, radius)
    HeliosphericAriesEcliptic,
    /// (longitude, latitude, radius)
    HeliosphericEarthEcliptic,
    /// (longitude, latitude, radius)
    HeliosphericEarthEquatorial,
}

impl SrfTemplate {
    #[must_use]
    pub fn is_map_projection(self) -> bool {
        use SrfTemplate::*;
        matches!(
            self,
            TransverseMercator | LambertConformalConic | Mercator | PolarStereographic
        )
    }

    #[must_use]
    pub fn is_local_tangent(self) -> bool {
        use SrfTemplate::*;
        matches!(
            self,
            LocalTangentSpaceEuclidean
                | LocalTangentSpaceCylindrical
                | LocalTangentSpaceAzimuthalSpherical
        )
    }

    /// The (longitude, latitude, radius) families
    #[must_use]
    pub fn is_spherical(self) -> bool {
        use SrfTemplate::*;
        matches!(
            self,
            Celestiomagnetic
                | EquatorialInertial
                | SolarEcliptic
                | SolarEquatorial
                | HeliosphericAriesEcliptic
                | HeliosphericEarthEcliptic
                | HeliosphericEarthEquatorial
        )
    }

    /// Which of the three components are angles
    #[must_use]
    pub fn angular_components(self) -> [bool; 3] {
        use SrfTemplate::*;
        match self {
            Celestiodetic => [true, true, false],
            LocalTangentSpaceCylindrical => [false, true, false],
            LocalTangentSpaceAzimuthalSpherical => [true, true, false],
            t if t.is_spherical() => [true, true, false],
            _ => [false, false, false],
        }
    }

    /// Look up a template by its short name, as used in definitions
    pub fn named(name: &str) -> Result<SrfTemplate, Error> {
        use SrfTemplate::*;
        Ok(match name.trim().to_lowercase().as_str() {
            "cc" | "celestiocentric" => Celestiocentric,
            "cd" | "celestiodetic" => Celestiodetic,
            "tm" | "transverse_mercator" => TransverseMercator,
            "lcc" | "lambert_conformal_conic" => LambertConformalConic,
            "m" | "merc" | "mercator" => Mercator,
            "ps" | "polar_stereographic" => PolarStereographic,
            "ltse" => LocalTangentSpaceEuclidean,
            "ltsc" => LocalTangentSpaceCylindrical,
            "ltsas" => LocalTangentSpaceAzimuthalSpherical,
            "cm" | "celestiomagnetic" => Celestiomagnetic,
            "ei" | "equatorial_inertial" => EquatorialInertial,
            "sec" | "solar_ecliptic" => SolarEcliptic,
            "seq" | "solar_equatorial" => SolarEquatorial,
            "haec" => HeliosphericAriesEcliptic,
            "heec" => HeliosphericEarthEcliptic,
            "heeq" => HeliosphericEarthEquatorial,
            _ => return Err(Error::NotFound(name.to_string(), String::from(": unknown SRF template"))),
        })
    }
}

// ----- Parameters ----------------------------------------------------------------

/// Transverse Mercator. Angles in radians, lengths in metres
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TmParameters {
    pub origin_longitude: f64,
    pub origin_latitude: f64,
    pub central_scale: f64,
    pub false_easting: f64,
    pub false_northing: f64,
}

impl Default for TmParameters {
    fn default() -> Self {
        TmParameters {
            origin_longitude: 0.,
            origin_latitude: 0.,
            central_scale: 1.,
            false_easting: 0.,
            false_northing: 0.,
        }
    }
}

/// Lambert Conformal Conic, one or two standard parallels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LccParameters {
    pub origin_longitude: f64,
    pub origin_latitude: f64,
    pub latitude1: f64,
    pub latitude2: f64,
    pub false_easting: f64,
    pub false_northing: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MercatorParameters {
    pub origin_longitude: f64,
    pub central_scale: f64,
    pub false_easting: f64,
    pub false_northing: f64,
}

impl Default for MercatorParameters {
    fn default() -> Self {
        MercatorParameters {
            origin_longitude: 0.,
            central_scale: 1.,
            false_easting: 0.,
            false_northing: 0.,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PolarAspect {
    #[default]
    North,
    South,
}

impl PolarAspect {
    /// +1 for the northern aspect, -1 for the southern
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            PolarAspect::North => 1.,
            PolarAspect::South => -1.,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PsParameters {
    pub aspect: PolarAspect,
    pub origin_longitude: f64,
    pub central_scale: f64,
    pub false_easting: f64,
    pub false_northing: f64,
}

impl Default for PsParameters {
    fn default() -> Self {
        PsParameters {
            aspect: PolarAspect::North,
            origin_longitude: 0.,
            central_scale: 1.,
            false_easting: 0.,
            false_northing: 0.,
        }
    }
}

/// The local tangent space families. The false origin is used by the
/// Euclidean template only.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LtsParameters {
    pub geodetic_longitude: f64,
    pub geodetic_latitude: f64,
    /// Clockwise from north, of the y axis
    pub azimuth: f64,
    pub height_offset: f64,
    pub false_x_origin: f64,
    pub false_y_origin: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Parameters {
    #[default]
    None,
    Tm(TmParameters),
    Lcc(LccParameters),
    Mercator(MercatorParameters),
    Ps(PsParameters),
    Lts(LtsParameters),
}

impl Parameters {
    /// The (false easting, false northing) of the map projections, or the
    /// false (x, y) origin of the local tangent space Euclidean
    #[must_use]
    pub fn false_origin(&self) -> [f64; 2] {
        match self {
            Parameters::Tm(p) => [p.false_easting, p.false_northing],
            Parameters::Lcc(p) => [p.false_easting, p.false_northing],
            Parameters::Mercator(p) => [p.false_easting, p.false_northing],
            Parameters::Ps(p) => [p.false_easting, p.false_northing],
            Parameters::Lts(p) => [p.false_x_origin, p.false_y_origin],
            Parameters::None => [0., 0.],
        }
    }

    /// The central meridian of the map projections
    #[must_use]
    pub fn origin_longitude(&self) -> f64 {
        match self {
            Parameters::Tm(p) => p.origin_longitude,
            Parameters::Lcc(p) => p.origin_longitude,
            Parameters::Mercator(p) => p.origin_longitude,
            Parameters::Ps(p) => p.origin_longitude,
            Parameters::Lts(p) => p.geodetic_longitude,
            Parameters::None => 0.,
        }
    }

    fn validate(&self, template: SrfTemplate) -> Result<(), Error> {
        use SrfTemplate::*;
        let bad = |what: &str| Err(Error::InvalidInput(format!("{template:?}: {what}")));
        let latitude_ok = |lat: f64| lat.is_finite() && lat.abs() <= FRAC_PI_2;
        match (template, self) {
            (TransverseMercator, Parameters::Tm(p)) => {
                if !(p.central_scale > 0.) {
                    return bad("central scale must be positive");
                }
                if !latitude_ok(p.origin_latitude) {
                    return bad("origin latitude out of range");
                }
            }
            (LambertConformalConic, Parameters::Lcc(p)) => {
                if !latitude_ok(p.origin_latitude) {
                    return bad("origin latitude out of range");
                }
                for lat in [p.latitude1, p.latitude2] {
                    if !lat.is_finite() || lat.abs() >= FRAC_PI_2 - 1e-10 {
                        return bad("standard parallels must be strictly between the poles");
                    }
                }
                if (p.latitude1 + p.latitude2).abs() < 1e-10 {
                    return bad("standard parallels must not be symmetric around the equator");
                }
            }
            (Mercator, Parameters::Mercator(p)) => {
                if !(p.central_scale > 0.) {
                    return bad("central scale must be positive");
                }
            }
            (PolarStereographic, Parameters::Ps(p)) => {
                if !(p.central_scale > 0.) {
                    return bad("central scale must be positive");
                }
            }
            (t, Parameters::Lts(p)) if t.is_local_tangent() => {
                if !latitude_ok(p.geodetic_latitude) {
                    return bad("tangent point latitude out of range");
                }
            }
            (t, Parameters::None)
                if t == Celestiocentric || t == Celestiodetic || t.is_spherical() => {}
            _ => return bad("parameters do not match the template"),
        }
        Ok(())
    }
}

// ----- S R F ---------------------------------------------------------------------

pub struct Srf {
    id: SrfHandle,
    template: SrfTemplate,
    parameters: Parameters,
    orm: OrmCode,
    hsr: HsrCode,
    member: Option<(SrfSet, u16)>,
    pub(crate) opseqs: RefCell<BoundedCache<SrfHandle, Rc<OpSeq>>>,
    interims: RefCell<BTreeMap<String, Rc<Srf>>>,
    engine: RefCell<Option<Box<dyn Engine>>>,
}

impl std::fmt::Debug for Srf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Srf")
            .field("id", &self.id)
            .field("template", &self.template)
            .field("parameters", &self.parameters)
            .field("orm", &self.orm)
            .field("hsr", &self.hsr)
            .field("member", &self.member)
            .finish()
    }
}

impl Srf {
    /// The generic constructor: all the specific ones end up here
    pub fn new(
        template: SrfTemplate,
        parameters: Parameters,
        orm: OrmCode,
        hsr: HsrCode,
    ) -> Result<Srf, Error> {
        parameters.validate(template)?;
        validate_orm_hsr(orm, hsr)?;
        Ok(Srf {
            id: SrfHandle::new(),
            template,
            parameters,
            orm,
            hsr,
            member: None,
            opseqs: RefCell::new(BoundedCache::new(OPSEQ_CACHE_BOUND)),
            interims: RefCell::new(BTreeMap::new()),
            engine: RefCell::new(None),
        })
    }

    pub(crate) fn with_member(mut self, set: SrfSet, member: u16) -> Srf {
        self.member = Some((set, member));
        self
    }

    pub fn celestiocentric(orm: OrmCode, hsr: HsrCode) -> Result<Srf, Error> {
        Srf::new(SrfTemplate::Celestiocentric, Parameters::None, orm, hsr)
    }

    pub fn celestiodetic(orm: OrmCode, hsr: HsrCode) -> Result<Srf, Error> {
        Srf::new(SrfTemplate::Celestiodetic, Parameters::None, orm, hsr)
    }

    pub fn transverse_mercator(
        parameters: TmParameters,
        orm: OrmCode,
        hsr: HsrCode,
    ) -> Result<Srf, Error> {
        Srf::new(SrfTemplate::TransverseMercator, Parameters::Tm(parameters), orm, hsr)
    }

    pub fn lambert_conformal_conic(
        parameters: LccParameters,
        orm: OrmCode,
        hsr: HsrCode,
    ) -> Result<Srf, Error> {
        Srf::new(SrfTemplate::LambertConformalConic, Parameters::Lcc(parameters), orm, hsr)
    }

    pub fn mercator(parameters: MercatorParameters, orm: OrmCode, hsr: HsrCode) -> Result<Srf, Error> {
        Srf::new(SrfTemplate::Mercator, Parameters::Mercator(parameters), orm, hsr)
    }

    pub fn polar_stereographic(
        parameters: PsParameters,
        orm: OrmCode,
        hsr: HsrCode,
    ) -> Result<Srf, Error> {
        Srf::new(SrfTemplate::PolarStereographic, Parameters::Ps(parameters), orm, hsr)
    }

    pub fn local_tangent_space_euclidean(
        parameters: LtsParameters,
        orm: OrmCode,
        hsr: HsrCode,
    ) -> Result<Srf, Error> {
        Srf::new(SrfTemplate::LocalTangentSpaceEuclidean, Parameters::Lts(parameters), orm, hsr)
    }

    pub fn local_tangent_space_cylindrical(
        parameters: LtsParameters,
        orm: OrmCode,
        hsr: HsrCode,
    ) -> Result<Srf, Error> {
        Srf::new(SrfTemplate::LocalTangentSpaceCylindrical, Parameters::Lts(parameters), orm, hsr)
    }

    pub fn local_tangent_space_azimuthal_spherical(
        parameters: LtsParameters,
        orm: OrmCode,
        hsr: HsrCode,
    ) -> Result<Srf, Error> {
        Srf::new(
            SrfTemplate::LocalTangentSpaceAzimuthalSpherical,
            Parameters::Lts(parameters),
            orm,
            hsr,
        )
    }

    /// One of the (longitude, latitude, radius) families
    pub fn spherical(template: SrfTemplate, orm: OrmCode, hsr: HsrCode) -> Result<Srf, Error> {
        if !template.is_spherical() {
            return Err(Error::InvalidInput(format!("{template:?} is not a spherical SRF")));
        }
        Srf::new(template, Parameters::None, orm, hsr)
    }

    // ----- Accessors -----------------------------------------------------------------

    #[must_use]
    pub fn id(&self) -> SrfHandle {
        self.id
    }

    #[must_use]
    pub fn template(&self) -> SrfTemplate {
        self.template
    }

    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    #[must_use]
    pub fn orm(&self) -> OrmCode {
        self.orm
    }

    #[must_use]
    pub fn hsr(&self) -> HsrCode {
        self.hsr
    }

    /// The SRF set and member code, for SRFs built as set members
    #[must_use]
    pub fn member(&self) -> Option<(SrfSet, u16)> {
        self.member
    }

    #[must_use]
    pub fn ellipsoid(&self) -> Ellipsoid {
        self.orm.ellipsoid()
    }

    /// Do the two SRFs describe the same frame, with identical parameters?
    #[must_use]
    pub fn same_definition(&self, other: &Srf) -> bool {
        self.template == other.template
            && self.parameters == other.parameters
            && self.orm == other.orm
            && self.hsr == other.hsr
            && self.member == other.member
    }

    // ----- Caches --------------------------------------------------------------------

    /// Set the maximum number of operation sequences cached on this SRF
    pub fn set_cache_bound(&self, bound: usize) -> Result<(), Error> {
        if bound == 0 {
            return Err(Error::InvalidInput(String::from("cache bound must be at least 1")));
        }
        self.opseqs.borrow_mut().set_bound(bound);
        Ok(())
    }

    #[must_use]
    pub fn cache_bound(&self) -> usize {
        self.opseqs.borrow().bound()
    }

    /// The number of operation sequences currently cached on this SRF
    #[must_use]
    pub fn cached_opseq_count(&self) -> usize {
        self.opseqs.borrow().len()
    }

    /// A parameterless helper SRF (celestiocentric, celestiodetic), created on
    /// first use and cached on this SRF
    pub(crate) fn interim(
        &self,
        template: SrfTemplate,
        orm: OrmCode,
        hsr: HsrCode,
    ) -> Result<Rc<Srf>, Error> {
        let tag = format!("{template:?}/{orm:?}/{hsr:?}");
        if let Some(srf) = self.interims.borrow().get(&tag) {
            return Ok(srf.clone());
        }
        let srf = Rc::new(Srf::new(template, Parameters::None, orm, hsr)?);
        log::debug!("Interim SRF {tag} created for {:?}", self.id);
        self.interims.borrow_mut().insert(tag, srf.clone());
        Ok(srf)
    }

    /// Run `f` on the conversion engine of this SRF, building it on first use
    pub(crate) fn with_engine<R>(&self, f: impl FnOnce(&mut dyn Engine) -> R) -> R {
        let mut engine = self.engine.borrow_mut();
        let engine = engine.get_or_insert_with(|| crate::engine::new(self.template));
        f(engine.as_mut())
    }
}

// ----- Tests ---------------------------------------------------------------------

//! *Spatial Reference Model*: object reference models (datums), spatial
//! reference frames, and the engine converting coordinates, directions and
//! orientations between any two of them.
//!
//! The model follows ISO/IEC 18026 (SRM 4.0). Angles are radians, lengths
//! are metres, and every coordinate is a triple ordered as documented by
//! its [SrfTemplate].
//!
//! ```
//! use srm::prelude::*;
//! let cd = Srf::celestiodetic(OrmCode::Wgs1984, HsrCode::Identity)?;
//! let cc = Srf::celestiocentric(OrmCode::Wgs1984, HsrCode::Identity)?;
//! let p = Coordinate::new(&cd, [10_f64.to_radians(), 20_f64.to_radians(), 100.]);
//! let (q, validity) = cc.change_coordinate_srf(&p)?;
//! assert_eq!(validity, Validity::Valid);
//! assert!((q.values()[0] - 5_904_838.698_311_626).abs() < 1e-6);
//! # Ok::<(), srm::Error>(())
//! ```

mod boundary;
mod cache;
mod coordinate;
mod derived;
mod ellipsoid;
mod engine;
pub mod math;
mod natural;
mod opmanager;
mod orm;
mod projection;
mod srf;

pub use boundary::Validity;
pub use coordinate::Coordinate;
pub use coordinate::Direction;
pub use coordinate::Orientation;
pub use derived::convergence_of_meridian;
pub use derived::euclidean_distance;
pub use derived::geodesic_distance;
pub use derived::point_scale_factor;
pub use ellipsoid::Ellipsoid;
pub use engine::Target;
pub use natural::natural_srf_set_member;
pub use opmanager::OPSEQ_CACHE_BOUND;
pub use orm::Hsr;
pub use orm::HsrCode;
pub use orm::Orm;
pub use orm::OrmCode;
pub use orm::Rd;
pub use orm::RdCode;
pub use srf::LccParameters;
pub use srf::LtsParameters;
pub use srf::MercatorParameters;
pub use srf::Parameters;
pub use srf::PolarAspect;
pub use srf::PsParameters;
pub use srf::Srf;
pub use srf::SrfHandle;
pub use srf::SrfSet;
pub use srf::SrfTemplate;
pub use srf::TmParameters;

use thiserror::Error;

/// Everything needed for everyday use of the crate
pub mod prelude {
    pub use crate::convergence_of_meridian;
    pub use crate::euclidean_distance;
    pub use crate::geodesic_distance;
    pub use crate::natural_srf_set_member;
    pub use crate::point_scale_factor;
    pub use crate::Coordinate;
    pub use crate::Direction;
    pub use crate::Error;
    pub use crate::HsrCode;
    pub use crate::LccParameters;
    pub use crate::LtsParameters;
    pub use crate::MercatorParameters;
    pub use crate::Orientation;
    pub use crate::OrmCode;
    pub use crate::Parameters;
    pub use crate::PolarAspect;
    pub use crate::PsParameters;
    pub use crate::Srf;
    pub use crate::SrfSet;
    pub use crate::SrfTemplate;
    pub use crate::TmParameters;
    pub use crate::Validity;
}

/// Preamble for crate-internal modules
pub(crate) mod authoring {
    pub use std::collections::BTreeMap;
    pub use std::f64::consts::FRAC_PI_2;
    pub use std::f64::consts::PI;
    pub use std::rc::Rc;

    pub use log::debug;
    pub use log::trace;
    pub use log::warn;

    pub use crate::boundary::Validity;
    pub use crate::cache::BoundedCache;
    pub use crate::ellipsoid::Ellipsoid;
    pub use crate::engine::Target;
    pub use crate::math::ancillary::*;
    pub use crate::math::matrix::*;
    pub use crate::orm::*;
    pub use crate::srf::*;
    pub use crate::Error;
}

/// The error type of the crate.
///
/// The variants follow the SRM error taxonomy. All failures are reported
/// synchronously at the point of detection, and leave the tables and any
/// caches already built intact.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid source coordinate: {0}")]
    InvalidSourceCoordinate(String),

    #[error("invalid target coordinate: {0}")]
    InvalidTargetCoordinate(String),

    #[error("invalid source direction: {0}")]
    InvalidSourceDirection(String),

    #[error("invalid source orientation: {0}")]
    InvalidSourceOrientation(String),

    #[error("invalid source SRF: {0}")]
    InvalidSourceSrf(String),

    #[error("invalid target SRF: {0}")]
    InvalidTargetSrf(String),

    #[error("not implemented: {0}")]
    NotImplemented(String),

    #[error("inactionable: {0}")]
    Inactionable(String),

    #[error("{0} not found{1}")]
    NotFound(String, String),

    #[error("missing required parameter {0}")]
    MissingParam(String),

    #[error("malformed value for parameter {0}: {1}")]
    BadParam(String, String),
}

/// Literature, that has been useful in designing and implementing this library.
pub enum Bibliography {
    /// B.R. Bowring (1976): *Transformation from spatial to geographical coordinates*.
    /// Survey Review 23(181), pp. 323–327.
    Bow76,

    /// B.R. Bowring (1985): *The accuracy of geodetic latitude and height equations*.
    /// Survey Review, 28(218), pp.202-206,
    /// [DOI](https://doi.org/10.1179/sre.1985.28.218.202)
    Bow85,

    /// Toshio Fukushima (2006): *Transformation from Cartesian to Geodetic Coordinates Accelerated by Halley’s Method*.
    /// Journal of Geodesy, 79(12), pp.689-693
    /// [DOI](https://doi.org/10.1007/s00190-006-0023-2)
    Fuk06,

    /// S.J. Claessens (2019): *Efficient transformation from Cartesian to geodetic coordinates*.
    /// Computers and Geosciences, Vol. 133, article 104307
    /// [DOI](https://doi.org/10.1016/j.cageo.2019.104307)
    Cla19,

    /// R. Toms (1996): *An improved algorithm for geocentric to geodetic coordinate conversion*.
    /// Lawrence Livermore National Laboratory, UCRL-JC-123138.
    Tom96,

    /// J.P. Snyder (1987): *Map Projections - A Working Manual*.
    /// U.S. Geological Survey Professional Paper 1395.
    Sny87,

    /// J.F. Redfearn (1948): *Transverse Mercator formulae*.
    /// Empire Survey Review 9(69), pp.318-322.
    Red48,

    /// ISO/IEC 18026:2009: *Information technology — Spatial Reference Model (SRM)*.
    Iso18026,

    /// T. Vincenty (1975) Direct and Inverse Solutions of Geodesics on the Ellipsoid
    /// with application of nested equations.
    /// Survey Review, 23(176): 88-93.
    /// [pdf](https://www.ngs.noaa.gov/PUBS_LIB/inverse.pdf)
    Vin75,

    /// T. Vincenty (1976). Correspondence. Survey Review. 23(180): 294.
    Vin76,
}

//! The map projections: celestiodetic (longitude, latitude) to and from
//! (easting, northing), excluding the false origin, which is handled by the engines.
mod lcc;
mod merc;
mod stere;
mod tmerc;

use crate::authoring::*;
use crate::ellipsoid::ConformalSeries;
use crate::ellipsoid::MeridianArc;

use lcc::Lcc;
use merc::Merc;
use stere::Stere;
use tmerc::Tmerc;

/// The precomputed constants of a map projection SRF
#[derive(Clone, Debug)]
pub(crate) enum Projection {
    Tm(Tmerc),
    Lcc(Lcc),
    Mercator(Merc),
    Ps(Stere),
}

impl Projection {
    pub fn new(srf: &Srf) -> Result<Projection, Error> {
        let ellps = srf.ellipsoid();
        Ok(match srf.parameters() {
            Parameters::Tm(p) => Projection::Tm(Tmerc::new(&ellps, p)),
            Parameters::Lcc(p) => Projection::Lcc(Lcc::new(&ellps, p)),
            Parameters::Mercator(p) => Projection::Mercator(Merc::new(&ellps, p)),
            Parameters::Ps(p) => Projection::Ps(Stere::new(&ellps, p)),
            _ => {
                return Err(Error::Inactionable(format!(
                    "{:?} is not a map projection",
                    srf.template()
                )))
            }
        })
    }

    /// (longitude, latitude) to (easting, northing)
    pub fn fwd(&self, lon: f64, lat: f64) -> Result<[f64; 2], Error> {
        let xy = match self {
            Projection::Tm(p) => p.fwd(lon, lat),
            Projection::Lcc(p) => p.fwd(lon, lat)?,
            Projection::Mercator(p) => p.fwd(lon, lat)?,
            Projection::Ps(p) => p.fwd(lon, lat)?,
        };
        if xy.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidSourceCoordinate(format!(
                "({lon}, {lat}) has no finite projection"
            )));
        }
        Ok(xy)
    }

    /// (easting, northing) to (longitude, latitude)
    pub fn inv(&self, x: f64, y: f64) -> Result<[f64; 2], Error> {
        let lonlat = match self {
            Projection::Tm(p) => p.inv(x, y),
            Projection::Lcc(p) => p.inv(x, y),
            Projection::Mercator(p) => p.inv(x, y),
            Projection::Ps(p) => p.inv(x, y),
        };
        if lonlat.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidSourceCoordinate(format!(
                "({x}, {y}) has no finite inverse projection"
            )));
        }
        Ok(lonlat)
    }
}

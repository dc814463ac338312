//! Object reference models (datums), their reference datums (ellipsoids and
//! spheres), and the horizontal shift representations (seven parameter
//! Helmert transformations) tying each ORM to its reference ORM.
//!
//! All three tables are process-wide, read only, and built on first use.
//! Each is a dense array indexed by the ordinal of its code enumeration.
mod hsr;
mod tables;

pub(crate) use hsr::datum_shift;
pub(crate) use hsr::DatumShift;

use crate::ellipsoid::GeodeticRegions;
use crate::Ellipsoid;
use crate::Error;

// ----- Reference datums ----------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RdCode {
    Wgs1984,
    Grs1980,
    Clarke1866,
    International1924,
    Airy1830,
    Clarke1880Ign,
    Bessel1841,
    Wgs1972,
    Moon,
    Mars2000,
    Sphere,
}

/// A reference datum: the size and shape of the body model
#[derive(Clone, Debug)]
pub struct Rd {
    pub code: RdCode,
    pub label: &'static str,
    /// Equatorial semi-axis, *A*
    pub a: f64,
    /// Polar semi-axis, *C*
    pub c: f64,
}

impl Rd {
    #[must_use]
    pub fn get(code: RdCode) -> &'static Rd {
        &tables::RD[code as usize]
    }

    #[must_use]
    pub fn ellipsoid(&self) -> Ellipsoid {
        ellipsoid(self.code)
    }
}

/// The derived ellipsoid of a reference datum
#[must_use]
pub(crate) fn ellipsoid(code: RdCode) -> Ellipsoid {
    tables::ELLIPSOIDS[code as usize]
}

/// The constants of the cartesian-to-geographical inverse, for a reference datum
#[must_use]
pub(crate) fn geodetic_regions(code: RdCode) -> &'static GeodeticRegions {
    &tables::REGIONS[code as usize]
}

// ----- Object reference models ---------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OrmCode {
    Wgs1984,
    Wgs1972,
    NorthAmerican1983,
    NorthAmerican1927,
    European1950,
    Osgb1936,
    Ntf,
    Tokyo,
    Wgs1984Geomagnetic,
    Sphere,
    Moon,
    Mars2000,
}

/// An object reference model
#[derive(Clone, Debug)]
pub struct Orm {
    pub code: OrmCode,
    pub label: &'static str,
    pub description: &'static str,
    pub rd: RdCode,
    /// The ORM of the body this ORM is anchored to. Coordinates can only be
    /// compared, or converted, between ORMs sharing the reference ORM
    pub reference: OrmCode,
    /// The HSR used when none is given explicitly
    pub default_hsr: HsrCode,
}

impl Orm {
    #[must_use]
    pub fn get(code: OrmCode) -> &'static Orm {
        &tables::ORM[code as usize]
    }
}

impl OrmCode {
    /// Look up an ORM by its label, e.g. "wgs84" or "ed50"
    pub fn named(name: &str) -> Result<OrmCode, Error> {
        let name = name.trim().to_lowercase();
        tables::ORM
            .iter()
            .find(|orm| orm.label == name)
            .map(|orm| orm.code)
            .ok_or_else(|| Error::NotFound(name, String::from(": unknown ORM")))
    }

    #[must_use]
    pub fn ellipsoid(self) -> Ellipsoid {
        ellipsoid(Orm::get(self).rd)
    }

    #[must_use]
    pub fn reference(self) -> OrmCode {
        Orm::get(self).reference
    }

    #[must_use]
    pub fn default_hsr(self) -> HsrCode {
        Orm::get(self).default_hsr
    }

    pub(crate) fn geodetic_regions(self) -> &'static GeodeticRegions {
        geodetic_regions(Orm::get(self).rd)
    }
}

// ----- Horizontal shift representations ------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HsrCode {
    /// No shift: the ORM coincides with its reference ORM
    Identity,
    Wgs1972ToWgs1984,
    European1950Mean,
    NorthAmerican1927Conus,
    Osgb1936ToWgs1984,
    NtfToWgs1984,
    TokyoMean,
    GeomagneticDipole,
}

/// A seven parameter Helmert transformation from an ORM to its reference ORM,
/// in the position vector convention, and its region of applicability.
#[derive(Clone, Debug)]
pub struct Hsr {
    pub code: HsrCode,
    pub label: &'static str,
    /// The ORM the parameters are given for. `None` for HSRs applicable to any ORM
    pub orm: Option<OrmCode>,
    /// Translations (m)
    pub translation: [f64; 3],
    /// Rotations (radians) around the X, Y and Z axes
    pub rotation: [f64; 3],
    /// Scale difference (unitless, i.e. ppm × 1e-6)
    pub scale: f64,
    /// Region of applicability (radians): `[west, south, east, north]`. `None` for global
    pub region: Option<[f64; 4]>,
}

impl Hsr {
    #[must_use]
    pub fn get(code: HsrCode) -> &'static Hsr {
        &tables::HSR[code as usize]
    }

    /// Is the geographical position (longitude, latitude) within the region of applicability?
    #[must_use]
    pub fn covers(&self, longitude: f64, latitude: f64) -> bool {
        let Some([west, south, east, north]) = self.region else {
            return true;
        };
        (west..=east).contains(&longitude) && (south..=north).contains(&latitude)
    }
}

impl HsrCode {
    /// Look up an HSR by its label, e.g. "identity" or "osgb36_wgs84"
    pub fn named(name: &str) -> Result<HsrCode, Error> {
        let name = name.trim().to_lowercase();
        tables::HSR
            .iter()
            .find(|hsr| hsr.label == name)
            .map(|hsr| hsr.code)
            .ok_or_else(|| Error::NotFound(name, String::from(": unknown HSR")))
    }
}

/// Check that an HSR is usable with an ORM
pub(crate) fn validate_orm_hsr(orm: OrmCode, hsr: HsrCode) -> Result<(), Error> {
    match Hsr::get(hsr).orm {
        Some(keyed) if keyed != orm => Err(Error::InvalidInput(format!(
            "HSR {hsr:?} is defined for ORM {keyed:?}, not {orm:?}"
        ))),
        _ => Ok(()),
    }
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_dense() {
        for (i, rd) in tables::RD.iter().enumerate() {
            assert_eq!(rd.code as usize, i);
        }
        for (i, orm) in tables::ORM.iter().enumerate() {
            assert_eq!(orm.code as usize, i);
        }
        for (i, hsr) in tables::HSR.iter().enumerate() {
            assert_eq!(hsr.code as usize, i);
        }
        assert_eq!(tables::ELLIPSOIDS.len(), tables::RD.len());
        assert_eq!(tables::REGIONS.len(), tables::RD.len());
    }

    #[test]
    fn lookup() -> Result<(), Error> {
        assert_eq!(OrmCode::named("WGS84")?, OrmCode::Wgs1984);
        assert_eq!(OrmCode::named("ed50")?, OrmCode::European1950);
        assert!(matches!(OrmCode::named("atlantis"), Err(Error::NotFound(..))));
        assert_eq!(HsrCode::named("osgb36_wgs84")?, HsrCode::Osgb1936ToWgs1984);

        let wgs84 = OrmCode::Wgs1984.ellipsoid();
        assert_eq!(wgs84.semimajor_axis(), 6_378_137.);
        assert!((1. / wgs84.flattening() - 298.257_223_563).abs() < 1e-8);

        let clarke = OrmCode::NorthAmerican1927.ellipsoid();
        assert!((clarke.semiminor_axis() - 6_356_583.8).abs() < 1e-6);

        assert!(OrmCode::Moon.ellipsoid().is_sphere());
        assert_eq!(OrmCode::Moon.reference(), OrmCode::Moon);
        assert_eq!(OrmCode::Osgb1936.reference(), OrmCode::Wgs1984);
        assert_eq!(OrmCode::Osgb1936.default_hsr(), HsrCode::Osgb1936ToWgs1984);
        Ok(())
    }

    #[test]
    fn compatibility() {
        assert!(validate_orm_hsr(OrmCode::Osgb1936, HsrCode::Osgb1936ToWgs1984).is_ok());
        assert!(validate_orm_hsr(OrmCode::Osgb1936, HsrCode::Identity).is_ok());
        assert!(validate_orm_hsr(OrmCode::Wgs1984, HsrCode::Osgb1936ToWgs1984).is_err());
    }

    #[test]
    fn region_of_applicability() {
        let osgb = Hsr::get(HsrCode::Osgb1936ToWgs1984);
        assert!(osgb.covers((-1_f64).to_radians(), 52_f64.to_radians()));
        assert!(!osgb.covers(20_f64.to_radians(), 52_f64.to_radians()));
        assert!(Hsr::get(HsrCode::Identity).covers(3., 1.));
    }
}

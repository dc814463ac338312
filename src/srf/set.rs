//! SRF sets: families of related SRFs, addressed by an integer member code
use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SrfSet {
    /// Universal Transverse Mercator: 1-60 northern, 61-120 southern hemisphere
    Utm,
    /// Universal Polar Stereographic: 1 north, 2 south
    Ups,
    /// Alabama State Plane Coordinate System: 1 east, 2 west
    AlabamaSpcs,
    /// Wisconsin State Plane Coordinate System: 1 north, 2 central, 3 south
    WisconsinSpcs,
    /// Lambert NTF: zones I, II, III and IV (Corsica)
    LambertNtf,
    /// Global Transverse Reference System: 5°×5° cells, local tangent space Euclidean
    Gtrs,
}

pub(crate) const GTRS_CELL: f64 = 5.;
pub(crate) const GTRS_COLUMNS: u16 = 72;
pub(crate) const GTRS_ROWS: u16 = 36;

/// The nominal region of a set member, in degrees. Longitudes are checked as
/// the shortest difference from the centre, so regions may straddle the antimeridian
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct NominalRegion {
    pub center_longitude: f64,
    pub half_width: f64,
    pub south: f64,
    pub north: f64,
    pub longitude_margin: f64,
    pub latitude_margin: f64,
}

fn dms(d: f64, m: f64) -> f64 {
    (d.abs() + m / 60.).copysign(d)
}

impl SrfSet {
    /// Look up a set by its short name, as used in definitions
    pub fn named(name: &str) -> Result<SrfSet, Error> {
        use SrfSet::*;
        Ok(match name.trim().to_lowercase().as_str() {
            "utm" => Utm,
            "ups" => Ups,
            "alabama_spcs" => AlabamaSpcs,
            "wisconsin_spcs" => WisconsinSpcs,
            "lambert_ntf" => LambertNtf,
            "gtrs" => Gtrs,
            _ => return Err(Error::NotFound(name.to_string(), String::from(": unknown SRF set"))),
        })
    }

    #[must_use]
    pub fn member_count(self) -> u16 {
        use SrfSet::*;
        match self {
            Utm => 120,
            Ups => 2,
            AlabamaSpcs => 2,
            WisconsinSpcs => 3,
            LambertNtf => 4,
            Gtrs => GTRS_ROWS * GTRS_COLUMNS,
        }
    }

    /// The template shared by all members of the set
    #[must_use]
    pub fn template(self) -> SrfTemplate {
        use SrfSet::*;
        match self {
            Utm | AlabamaSpcs => SrfTemplate::TransverseMercator,
            Ups => SrfTemplate::PolarStereographic,
            WisconsinSpcs | LambertNtf => SrfTemplate::LambertConformalConic,
            Gtrs => SrfTemplate::LocalTangentSpaceEuclidean,
        }
    }

    fn validate(self, member: u16) -> Result<(), Error> {
        if member == 0 || member > self.member_count() {
            return Err(Error::InvalidInput(format!(
                "{self:?} has no member {member} (valid: 1..={})",
                self.member_count()
            )));
        }
        Ok(())
    }

    /// The template parameters of a set member
    pub fn parameters(self, member: u16) -> Result<Parameters, Error> {
        self.validate(member)?;
        let m = member as f64;
        let r = f64::to_radians;
        Ok(match self {
            SrfSet::Utm => {
                let zone = if member > 60 { m - 60. } else { m };
                Parameters::Tm(TmParameters {
                    origin_longitude: r(-183. + 6. * zone),
                    origin_latitude: 0.,
                    central_scale: 0.9996,
                    false_easting: 500_000.,
                    false_northing: if member > 60 { 10_000_000. } else { 0. },
                })
            }

            SrfSet::Ups => Parameters::Ps(PsParameters {
                aspect: if member == 1 { PolarAspect::North } else { PolarAspect::South },
                origin_longitude: 0.,
                central_scale: 0.994,
                false_easting: 2_000_000.,
                false_northing: 2_000_000.,
            }),

            SrfSet::AlabamaSpcs => {
                let (lat_0, lon_0, k_0, x_0) = if member == 1 {
                    (30.5, dms(-85., 50.), 1. - 1. / 25_000., 200_000.)
                } else {
                    (30., dms(-87., 30.), 1. - 1. / 15_000., 600_000.)
                };
                Parameters::Tm(TmParameters {
                    origin_longitude: r(lon_0),
                    origin_latitude: r(lat_0),
                    central_scale: k_0,
                    false_easting: x_0,
                    false_northing: 0.,
                })
            }

            SrfSet::WisconsinSpcs => {
                let (lat_1, lat_2, lat_0) = match member {
                    1 => (dms(45., 34.), dms(46., 46.), dms(45., 10.)),
                    2 => (dms(44., 15.), dms(45., 30.), dms(43., 50.)),
                    _ => (dms(42., 44.), dms(44., 4.), dms(42., 0.)),
                };
                Parameters::Lcc(LccParameters {
                    origin_longitude: r(-90.),
                    origin_latitude: r(lat_0),
                    latitude1: r(lat_1),
                    latitude2: r(lat_2),
                    false_easting: 600_000.,
                    false_northing: 0.,
                })
            }

            SrfSet::LambertNtf => {
                #[rustfmt::skip]
                let (lat_1, lat_2, lat_0, x_0, y_0) = match member {
                    1 => (48.598_522_778, 50.395_911_667, 49.5,   600_000., 200_000.),
                    2 => (45.898_918_889, 47.696_014_444, 46.8,   600_000., 200_000.),
                    3 => (43.199_291_389, 44.996_093_889, 44.1,   600_000., 200_000.),
                    _ => (41.560_387_222, 42.767_638_333, 42.165, 234.358,  185_861.369),
                };
                Parameters::Lcc(LccParameters {
                    origin_longitude: r(2.337_229_167),
                    origin_latitude: r(lat_0),
                    latitude1: r(lat_1),
                    latitude2: r(lat_2),
                    false_easting: x_0,
                    false_northing: y_0,
                })
            }

            SrfSet::Gtrs => {
                let (row, col) = gtrs_cell(member);
                Parameters::Lts(LtsParameters {
                    geodetic_longitude: r(-180. + GTRS_CELL * col as f64 + GTRS_CELL / 2.),
                    geodetic_latitude: r(-90. + GTRS_CELL * row as f64 + GTRS_CELL / 2.),
                    ..Default::default()
                })
            }
        })
    }

    /// The nominal region of a set member
    pub(crate) fn nominal_region(self, member: u16) -> Result<NominalRegion, Error> {
        self.validate(member)?;
        let band = |west: f64, east: f64, south: f64, north: f64, margin: f64| NominalRegion {
            center_longitude: (west + east) / 2.,
            half_width: (east - west) / 2.,
            south,
            north,
            longitude_margin: margin,
            latitude_margin: margin,
        };
        Ok(match self {
            SrfSet::Utm => {
                let zone = if member > 60 { member - 60 } else { member };
                let (south, north) = if member > 60 { (-80., 0.) } else { (0., 84.) };
                NominalRegion {
                    center_longitude: -183. + 6. * zone as f64,
                    half_width: 3.,
                    south,
                    north,
                    longitude_margin: 1.,
                    latitude_margin: 0.5,
                }
            }
            SrfSet::Ups => {
                let (south, north) = if member == 1 { (84., 90.) } else { (-90., -80.) };
                NominalRegion {
                    center_longitude: 0.,
                    half_width: 180.,
                    south,
                    north,
                    longitude_margin: 0.,
                    latitude_margin: 0.5,
                }
            }
            SrfSet::AlabamaSpcs => match member {
                1 => band(-86.62, -84.9, 30.2, 35.0, 0.25),
                _ => band(-88.5, -86.62, 30.2, 35.0, 0.25),
            },
            SrfSet::WisconsinSpcs => match member {
                1 => band(-92.9, -86.8, 45.5, 47.1, 0.25),
                2 => band(-92.9, -86.8, 44.25, 45.5, 0.25),
                _ => band(-92.9, -86.8, 42.48, 44.25, 0.25),
            },
            SrfSet::LambertNtf => match member {
                1 => band(-5.5, 8.5, 48.15, 51.1, 0.25),
                2 => band(-5.5, 8.5, 45.45, 48.15, 0.25),
                3 => band(-5.5, 8.5, 42.3, 45.45, 0.25),
                _ => band(8., 9.7, 41.3, 43.2, 0.25),
            },
            SrfSet::Gtrs => {
                let (row, col) = gtrs_cell(member);
                let west = -180. + GTRS_CELL * col as f64;
                let south = -90. + GTRS_CELL * row as f64;
                band(west, west + GTRS_CELL, south, south + GTRS_CELL, 0.5)
            }
        })
    }
}

/// (row, column) of a GTRS cell, counting from the south-west corner
fn gtrs_cell(member: u16) -> (u16, u16) {
    ((member - 1) / GTRS_COLUMNS, (member - 1) % GTRS_COLUMNS)
}

impl Srf {
    /// A member of an SRF set
    pub fn set_member(set: SrfSet, member: u16, orm: OrmCode, hsr: HsrCode) -> Result<Srf, Error> {
        let parameters = set.parameters(member)?;
        Ok(Srf::new(set.template(), parameters, orm, hsr)?.with_member(set, member))
    }
}

// ----- Tests ---------------------------------------------------------------------

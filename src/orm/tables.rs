//! The ORM, RD and HSR records. The order of each table follows the
//! ordinals of its code enumeration.
use super::*;
use once_cell::sync::Lazy;

/// Helper for the RDs defined by semimajor axis and reciprocal flattening
fn by_flattening(code: RdCode, label: &'static str, a: f64, rf: f64) -> Rd {
    Rd {
        code,
        label,
        a,
        c: a * (1. - 1. / rf),
    }
}

fn by_axes(code: RdCode, label: &'static str, a: f64, c: f64) -> Rd {
    Rd { code, label, a, c }
}

#[rustfmt::skip]
pub(super) static RD: Lazy<Vec<Rd>> = Lazy::new(|| {
    use RdCode::*;
    vec![
        by_flattening(Wgs1984,           "wgs84",   6_378_137.0,   298.257_223_563),
        by_flattening(Grs1980,           "grs80",   6_378_137.0,   298.257_222_100_882_7),
        by_axes(      Clarke1866,        "clrk66",  6_378_206.4,   6_356_583.8),
        by_flattening(International1924, "intl",    6_378_388.0,   297.0),
        by_axes(      Airy1830,          "airy",    6_377_563.396, 6_356_256.909),
        by_axes(      Clarke1880Ign,     "clrk80ign", 6_378_249.2, 6_356_515.0),
        by_flattening(Bessel1841,        "bessel",  6_377_397.155, 299.152_812_8),
        by_flattening(Wgs1972,           "wgs72",   6_378_135.0,   298.26),
        by_axes(      Moon,              "moon",    1_737_400.0,   1_737_400.0),
        by_axes(      Mars2000,          "mars2000", 3_396_190.0,  3_376_200.0),
        by_axes(      Sphere,            "sphere",  6_371_000.0,   6_371_000.0),
    ]
});

pub(super) static ELLIPSOIDS: Lazy<Vec<Ellipsoid>> = Lazy::new(|| {
    RD.iter()
        .map(|rd| {
            if rd.a == rd.c {
                Ellipsoid::sphere(rd.a)
            } else {
                Ellipsoid::from_axes(rd.a, rd.c)
            }
        })
        .collect()
});

pub(super) static REGIONS: Lazy<Vec<GeodeticRegions>> =
    Lazy::new(|| ELLIPSOIDS.iter().map(GeodeticRegions::new).collect());

fn orm(
    code: OrmCode,
    label: &'static str,
    description: &'static str,
    rd: RdCode,
    reference: OrmCode,
    default_hsr: HsrCode,
) -> Orm {
    Orm {
        code,
        label,
        description,
        rd,
        reference,
        default_hsr,
    }
}

#[rustfmt::skip]
pub(super) static ORM: Lazy<Vec<Orm>> = Lazy::new(|| {
    use OrmCode::*;
    vec![
        orm(Wgs1984,            "wgs84",     "World Geodetic System 1984",          RdCode::Wgs1984,           Wgs1984,  HsrCode::Identity),
        orm(Wgs1972,            "wgs72",     "World Geodetic System 1972",          RdCode::Wgs1972,           Wgs1984,  HsrCode::Wgs1972ToWgs1984),
        orm(NorthAmerican1983,  "nad83",     "North American Datum 1983",           RdCode::Grs1980,           Wgs1984,  HsrCode::Identity),
        orm(NorthAmerican1927,  "nad27",     "North American Datum 1927",           RdCode::Clarke1866,        Wgs1984,  HsrCode::NorthAmerican1927Conus),
        orm(European1950,       "ed50",      "European Datum 1950",                 RdCode::International1924, Wgs1984,  HsrCode::European1950Mean),
        orm(Osgb1936,           "osgb36",    "Ordnance Survey of Great Britain 1936", RdCode::Airy1830,        Wgs1984,  HsrCode::Osgb1936ToWgs1984),
        orm(Ntf,                "ntf",       "Nouvelle Triangulation Française",    RdCode::Clarke1880Ign,     Wgs1984,  HsrCode::NtfToWgs1984),
        orm(Tokyo,              "tokyo",     "Tokyo Datum",                         RdCode::Bessel1841,        Wgs1984,  HsrCode::TokyoMean),
        orm(Wgs1984Geomagnetic, "wgs84_geomagnetic", "WGS 1984, geomagnetic dipole axes", RdCode::Wgs1984,   Wgs1984,  HsrCode::GeomagneticDipole),
        orm(Sphere,             "sphere",    "Perfect sphere of mean Earth radius", RdCode::Sphere,            Sphere,   HsrCode::Identity),
        orm(Moon,               "moon",      "The Moon, spherical",                 RdCode::Moon,              Moon,     HsrCode::Identity),
        orm(Mars2000,           "mars2000",  "Mars, IAU 2000",                      RdCode::Mars2000,          Mars2000, HsrCode::Identity),
    ]
});

const ARCSEC: f64 = std::f64::consts::PI / (180. * 3600.);

/// Helper for the HSRs given in the customary units: m, arcsec, ppm and degrees
fn hsr(
    code: HsrCode,
    label: &'static str,
    orm: Option<OrmCode>,
    translation: [f64; 3],
    rotation: [f64; 3],
    ppm: f64,
    region: Option<[f64; 4]>,
) -> Hsr {
    Hsr {
        code,
        label,
        orm,
        translation,
        rotation: rotation.map(|r| r * ARCSEC),
        scale: ppm * 1e-6,
        region: region.map(|r| r.map(f64::to_radians)),
    }
}

#[rustfmt::skip]
pub(super) static HSR: Lazy<Vec<Hsr>> = Lazy::new(|| {
    use HsrCode::*;
    use OrmCode as O;
    vec![
        hsr(Identity,               "identity",       None,
            [0., 0., 0.],                   [0., 0., 0.],              0.,      None),
        hsr(Wgs1972ToWgs1984,       "wgs72_wgs84",    Some(O::Wgs1972),
            [0., 0., 4.5],                  [0., 0., 0.554],           0.2263,  None),
        hsr(European1950Mean,       "ed50_mean",      Some(O::European1950),
            [-87., -98., -121.],            [0., 0., 0.],              0.,      Some([-10., 34., 32., 72.])),
        hsr(NorthAmerican1927Conus, "nad27_conus",    Some(O::NorthAmerican1927),
            [-8., 160., 176.],              [0., 0., 0.],              0.,      Some([-125., 24., -66., 50.])),
        hsr(Osgb1936ToWgs1984,      "osgb36_wgs84",   Some(O::Osgb1936),
            [446.448, -125.157, 542.06],    [0.15, 0.247, 0.842],      -20.489, Some([-9., 49.5, 2.5, 61.])),
        hsr(NtfToWgs1984,           "ntf_wgs84",      Some(O::Ntf),
            [-168., -60., 320.],            [0., 0., 0.],              0.,      Some([-5.5, 41., 10., 51.5])),
        hsr(TokyoMean,              "tokyo_mean",     Some(O::Tokyo),
            [-148., 507., 685.],            [0., 0., 0.],              0.,      Some([122., 20., 154., 46.])),
        // Dipole axis at 80.65°N, 72.68°W: a rotation of 9.35° around Y, then -72.68° around Z
        hsr(GeomagneticDipole,      "geomagnetic_dipole", Some(O::Wgs1984Geomagnetic),
            [0., 0., 0.],                   [0., 33_660., -261_648.],  0.,      None),
    ]
});

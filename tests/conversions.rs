//! End to end conversions through the public API
use float_eq::assert_float_eq;
use srm::math::ancillary::delta_lambda_min;
use srm::prelude::*;
use std::f64::consts::{FRAC_PI_2, PI};

fn deg(lon: f64, lat: f64, h: f64) -> [f64; 3] {
    [lon.to_radians(), lat.to_radians(), h]
}

#[test]
fn worked_example() -> Result<(), Error> {
    let cd = Srf::celestiodetic(OrmCode::Wgs1984, HsrCode::Identity)?;
    let cc = Srf::celestiocentric(OrmCode::Wgs1984, HsrCode::Identity)?;
    let p = Coordinate::new(&cd, deg(10., 20., 100.));
    let (q, validity) = cc.change_coordinate_srf(&p)?;
    assert_eq!(validity, Validity::Valid);
    let v = q.values();
    assert_float_eq!(v[0], 5_904_838.698_311_626, abs <= 1e-6);
    assert_float_eq!(v[1], 1_041_182.379_243_791_5, abs <= 1e-6);
    assert_float_eq!(v[2], 2_167_730.989_843_083_5, abs <= 1e-6);
    Ok(())
}

#[test]
fn celestiodetic_roundtrips() -> Result<(), Error> {
    let orms = [
        (OrmCode::Wgs1984, HsrCode::Identity),
        (OrmCode::European1950, HsrCode::European1950Mean),
        (OrmCode::Osgb1936, HsrCode::Osgb1936ToWgs1984),
        (OrmCode::Mars2000, HsrCode::Identity),
        (OrmCode::Moon, HsrCode::Identity),
    ];
    // Near the surface at low and high latitudes, far, very far, and in the interior
    let heights = [0., 10_000., 3_000_000., 100_000_000., -1_000_000.];
    let latitudes = [-89.9, -70., -30., 0., 0.5, 30., 70., 89.9];

    for (orm, hsr) in orms {
        let cd = Srf::celestiodetic(orm, hsr)?;
        let cc = Srf::celestiocentric(orm, hsr)?;
        for h in heights {
            for lat in latitudes {
                for lon in [-179.5, -20., 0., 45., 180.] {
                    let p = Coordinate::new(&cd, deg(lon, lat, h));
                    let (q, _) = cc.change_coordinate_srf(&p)?;
                    let (r, validity) = cd.change_coordinate_srf(&q)?;
                    assert_eq!(validity, Validity::Valid);
                    let (a, b) = (p.values(), r.values());
                    assert!(delta_lambda_min(a[0], b[0]).abs() < 1e-9);
                    assert!((a[1] - b[1]).abs() < 1e-9);
                    assert!((a[2] - b[2]).abs() < 1e-6 * h.abs().max(1.));
                }
            }
        }
    }
    Ok(())
}

#[test]
fn poles_and_equator() -> Result<(), Error> {
    let cd = Srf::celestiodetic(OrmCode::Wgs1984, HsrCode::Identity)?;
    let cc = Srf::celestiocentric(OrmCode::Wgs1984, HsrCode::Identity)?;
    let b = 6_356_752.314_245_179;

    let north = Coordinate::new(&cc, [0., 0., b + 10.]);
    let (p, validity) = cd.change_coordinate_srf(&north)?;
    assert_eq!(validity, Validity::Valid);
    assert_eq!(p.values()[1], FRAC_PI_2);
    assert_float_eq!(p.values()[2], 10., abs <= 1e-6);

    let south = Coordinate::new(&cc, [0., 0., -b]);
    assert_eq!(cd.change_coordinate_srf(&south)?.0.values()[1], -FRAC_PI_2);

    let equator = Coordinate::new(&cc, [-6_378_137., 0., 0.]);
    let (p, _) = cd.change_coordinate_srf(&equator)?;
    assert_eq!(p.values()[1], 0.);
    assert_float_eq!(p.values()[0].abs(), PI, abs <= 1e-15);

    // Deep inside, close to the geocentre
    let inside = Coordinate::new(&cc, [10_000., 0., 1.]);
    let (p, validity) = cd.change_coordinate_srf(&inside)?;
    assert_eq!(validity, Validity::Valid);
    assert!(p.values()[1].abs() < 1e-4);
    assert_float_eq!(p.values()[2], -6_368_137., abs <= 1e-3);

    let geocentre = Coordinate::new(&cc, [0., 0., 0.]);
    assert!(matches!(
        cd.change_coordinate_srf(&geocentre),
        Err(Error::InvalidSourceCoordinate(_))
    ));

    // The failure leaves the SRFs usable
    let (p, _) = cd.change_coordinate_srf(&north)?;
    assert_eq!(p.values()[1], FRAC_PI_2);
    Ok(())
}

#[test]
fn projected_roundtrips() -> Result<(), Error> {
    let wgs84 = (OrmCode::Wgs1984, HsrCode::Identity);
    let cd = Srf::celestiodetic(wgs84.0, wgs84.1)?;
    let cases = [
        (Srf::set_member(SrfSet::Utm, 32, wgs84.0, wgs84.1)?, deg(10., 56., 30.)),
        (Srf::set_member(SrfSet::Utm, 92, wgs84.0, wgs84.1)?, deg(8., -33., 0.)),
        (Srf::set_member(SrfSet::Ups, 1, wgs84.0, wgs84.1)?, deg(-120., 86., 0.)),
        (Srf::set_member(SrfSet::Ups, 2, wgs84.0, wgs84.1)?, deg(60., -85., 0.)),
        (Srf::set_member(SrfSet::AlabamaSpcs, 2, wgs84.0, wgs84.1)?, deg(-87.5, 32., 0.)),
        (Srf::set_member(SrfSet::WisconsinSpcs, 3, wgs84.0, wgs84.1)?, deg(-89.4, 43.07, 0.)),
        (Srf::set_member(SrfSet::LambertNtf, 1, wgs84.0, wgs84.1)?, deg(2.35, 48.85, 0.)),
        (Srf::from_definition("merc lon_0=10")?, deg(15., 60., 0.)),
    ];
    for (srf, geo) in &cases {
        let p = Coordinate::new(&cd, *geo);
        let (q, validity) = srf.change_coordinate_srf(&p)?;
        assert_eq!(validity, Validity::Valid, "{:?}", srf.member());
        assert_eq!(srf.check_coordinate(&q)?, Validity::Valid);
        let (r, _) = cd.change_coordinate_srf(&q)?;
        let back = r.values();
        assert!(delta_lambda_min(back[0], geo[0]).abs() < 1e-9);
        assert!((back[1] - geo[1]).abs() < 1e-9);
        assert!((back[2] - geo[2]).abs() < 1e-6);
    }
    Ok(())
}

#[test]
fn across_datums() -> Result<(), Error> {
    let osgb = Srf::from_definition("tm lat_0=49 lon_0=-2 k_0=0.9996012717 x_0=400000 y_0=-100000 orm=osgb36")?;
    let wgs84 = Srf::celestiodetic(OrmCode::Wgs1984, HsrCode::Identity)?;

    // Somewhere in Cambridgeshire
    let p = Coordinate::new(&wgs84, deg(0.1, 52.2, 50.));
    let (q, validity) = osgb.change_coordinate_srf(&p)?;
    assert_eq!(validity, Validity::Valid);
    let (r, validity) = wgs84.change_coordinate_srf(&q)?;
    assert_eq!(validity, Validity::Valid);
    for (a, b) in p.values().iter().zip(r.values()) {
        assert!((a - b).abs() < 1e-6);
    }

    let moon = Srf::celestiodetic(OrmCode::Moon, HsrCode::Identity)?;
    assert!(matches!(
        moon.change_coordinate_srf(&p),
        Err(Error::InvalidTargetSrf(_))
    ));
    Ok(())
}

#[test]
fn local_and_spherical_frames() -> Result<(), Error> {
    let cd = Srf::celestiodetic(OrmCode::Wgs1984, HsrCode::Identity)?;
    let frames = [
        Srf::from_definition("ltse lon_0=12 lat_0=55 azimuth=30 x_0=1000 y_0=2000")?,
        Srf::from_definition("ltsc lon_0=12 lat_0=55")?,
        Srf::from_definition("ltsas lon_0=12 lat_0=55 h_0=100")?,
        Srf::from_definition("ei")?,
        Srf::from_definition("heeq")?,
        Srf::set_member(SrfSet::Gtrs, 1 + 29 * 72 + 38, OrmCode::Wgs1984, HsrCode::Identity)?,
    ];
    let p = Coordinate::new(&cd, deg(12.1, 55.05, 300.));
    for srf in &frames {
        let (q, validity) = srf.change_coordinate_srf(&p)?;
        assert_eq!(validity, Validity::Valid, "{:?}", srf.template());
        let (r, _) = cd.change_coordinate_srf(&q)?;
        for (a, b) in p.values().iter().zip(r.values()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    // The tangent point is the origin of the local Euclidean frame, save the false origin
    let origin = Coordinate::new(&cd, deg(12., 55., 0.));
    let (q, _) = frames[0].change_coordinate_srf(&origin)?;
    let v = q.values();
    assert_float_eq!(v[0], 1000., abs <= 1e-6);
    assert_float_eq!(v[1], 2000., abs <= 1e-6);
    assert_float_eq!(v[2], 0., abs <= 1e-6);
    Ok(())
}

#[test]
fn distance_symmetry() -> Result<(), Error> {
    let cd = Srf::celestiodetic(OrmCode::Wgs1984, HsrCode::Identity)?;
    let ed50 = Srf::celestiodetic(OrmCode::European1950, HsrCode::European1950Mean)?;
    let utm = Srf::set_member(SrfSet::Utm, 33, OrmCode::Wgs1984, HsrCode::Identity)?;
    let lts = Srf::from_definition("ltse lon_0=12 lat_0=55 azimuth=45")?;

    let points = [
        Coordinate::new(&cd, deg(12., 55., 0.)),
        Coordinate::new(&ed50, deg(18., 59., 20.)),
        Coordinate::new(&utm, [500_000., 6_100_000., 10.]),
        Coordinate::new(&lts, [-3000., 4000., 12.]),
    ];
    for a in &points {
        assert_eq!(euclidean_distance(a, a)?, 0.);
        for b in &points {
            assert_eq!(euclidean_distance(a, b)?, euclidean_distance(b, a)?);
        }
    }

    // Directly checkable in the local frame
    let origin = Coordinate::new(&lts, [0., 0., 0.]);
    assert_float_eq!(euclidean_distance(&origin, &points[3])?, 12_f64.hypot(5000.), abs <= 1e-6);
    Ok(())
}

#[test]
fn longitude_seam() {
    let values = [-PI, -3., -1., 0., 0.5, 3., PI, 7., -9.];
    for a in values {
        for b in values {
            let d = delta_lambda_min(a, b);
            assert!(d > -PI && d <= PI);
            // Half a turn apart, rounding decides the sign
            if d.abs() > PI - 1e-9 {
                continue;
            }
            assert!((delta_lambda_min(a + 2. * PI, b) - d).abs() < 1e-12);
            assert!((delta_lambda_min(a, b - 2. * PI) - d).abs() < 1e-12);
            assert!((d + delta_lambda_min(b, a)).abs() < 1e-12);
        }
    }
}

#[test]
fn worst_validity_of_the_chain() -> Result<(), Error> {
    // CD -> CC, CC -> CC (datum shift), CC -> CD. Only the middle stage
    // leaves its domain: the ED50 shift is not meant for Australia
    let ed50 = Srf::celestiodetic(OrmCode::European1950, HsrCode::European1950Mean)?;
    let wgs84 = Srf::celestiodetic(OrmCode::Wgs1984, HsrCode::Identity)?;

    let europe = Coordinate::new(&ed50, deg(12., 55., 0.));
    assert_eq!(wgs84.change_coordinate_srf(&europe)?.1, Validity::Valid);

    let australia = Coordinate::new(&ed50, deg(135., -25., 0.));
    let (p, validity) = wgs84.change_coordinate_srf(&australia)?;
    assert_eq!(validity, Validity::Defined);
    assert_eq!(wgs84.check_coordinate(&p)?, Validity::Valid);

    // A projected source outside its zone
    let z32 = Srf::set_member(SrfSet::Utm, 32, OrmCode::Wgs1984, HsrCode::Identity)?;
    let z33 = Srf::set_member(SrfSet::Utm, 33, OrmCode::Wgs1984, HsrCode::Identity)?;
    let (east, validity) = z32.change_coordinate_srf(&Coordinate::new(&wgs84, deg(14.5, 55., 0.)))?;
    assert_eq!(validity, Validity::Defined);
    assert_eq!(z32.check_coordinate(&east)?, Validity::Defined);
    assert_eq!(z33.change_coordinate_srf(&east)?.1, Validity::Defined);
    Ok(())
}

#[test]
fn cache_bound() -> Result<(), Error> {
    let cd = Srf::celestiodetic(OrmCode::Wgs1984, HsrCode::Identity)?;
    assert_eq!(cd.cache_bound(), srm::OPSEQ_CACHE_BOUND);
    assert!(cd.set_cache_bound(0).is_err());
    cd.set_cache_bound(4)?;

    let zones: Vec<Srf> = (28..=37)
        .map(|zone| Srf::set_member(SrfSet::Utm, zone, OrmCode::Wgs1984, HsrCode::Identity))
        .collect::<Result<_, _>>()?;
    let p = Coordinate::new(&cd, deg(9., 55., 0.));

    let first: Vec<[f64; 3]> = zones
        .iter()
        .map(|zone| Ok(zone.change_coordinate_srf(&p)?.0.values()))
        .collect::<Result<_, Error>>()?;
    for zone in &zones {
        zone.change_coordinate_srf(&p)?;
        assert!(cd.cached_opseq_count() <= 4);
    }
    assert_eq!(cd.cached_opseq_count(), 4);

    // The evicted sequences are rebuilt, and give the same results
    for (zone, expected) in zones.iter().zip(&first) {
        let (q, _) = zone.change_coordinate_srf(&p)?;
        assert_eq!(q.values(), *expected);
        assert!(cd.cached_opseq_count() <= 4);
    }
    Ok(())
}

#[test]
fn directions_and_orientations() -> Result<(), Error> {
    let cd = Srf::celestiodetic(OrmCode::Wgs1984, HsrCode::Identity)?;
    let cc = Srf::celestiocentric(OrmCode::Wgs1984, HsrCode::Identity)?;
    let base = Coordinate::new(&cd, deg(0., 0., 0.));

    // Up, at (0, 0), is the X axis
    let up = Direction::new(base, [0., 0., 1.]);
    assert_eq!(cd.check_direction(&up)?, Validity::Valid);
    let (d, validity) = cc.change_direction_srf(&up)?;
    assert_eq!(validity, Validity::Valid);
    let v = d.vector();
    assert_float_eq!(v[0], 1., abs <= 1e-6);
    assert_float_eq!(v[1], 0., abs <= 1e-6);
    assert_float_eq!(v[2], 0., abs <= 1e-6);

    // And back
    let (e, _) = cd.change_direction_srf(&d)?;
    let w = e.vector();
    assert_float_eq!(w[2], 1., abs <= 1e-6);

    // Orientations compose with the frames on both sides
    let o = Orientation::new(base, [[0., 1., 0.], [-1., 0., 0.], [0., 0., 1.]]);
    assert_eq!(cd.check_orientation(&o)?, Validity::Valid);
    let (m, _) = cc.change_orientation_srf(&o)?;
    let (n, _) = cd.change_orientation_srf(&m)?;
    for (row, expected) in n.matrix().iter().zip(o.matrix().iter()) {
        for (a, b) in row.iter().zip(expected) {
            assert_float_eq!(*a, *b, abs <= 1e-6);
        }
    }

    // Degenerate input is rejected by both entry points
    let zero = Direction::new(base, [0., 0., 0.]);
    assert!(matches!(cd.check_direction(&zero), Err(Error::InvalidSourceDirection(_))));
    assert!(matches!(cc.change_direction_srf(&zero), Err(Error::InvalidSourceDirection(_))));
    let singular = Orientation::new(base, [[1., 2., 3.], [2., 4., 6.], [0., 0., 1.]]);
    assert!(matches!(cd.check_orientation(&singular), Err(Error::InvalidSourceOrientation(_))));
    assert!(matches!(
        cc.change_orientation_srf(&singular),
        Err(Error::InvalidSourceOrientation(_))
    ));

    // A coordinate is only checked by the SRF owning it
    let q = Coordinate::new(&cc, [6_378_137., 0., 0.]);
    assert!(matches!(cd.check_coordinate(&q), Err(Error::InvalidSourceCoordinate(_))));
    Ok(())
}

#[test]
fn natural_members() -> Result<(), Error> {
    let cd = Srf::celestiodetic(OrmCode::Wgs1984, HsrCode::Identity)?;
    let cases = [
        (deg(12.57, 55.68, 0.), SrfSet::Utm, 33),
        (deg(151.2, -33.87, 0.), SrfSet::Utm, 116),
        (deg(45., -85.5, 0.), SrfSet::Ups, 2),
        (deg(-86.3, 32.37, 0.), SrfSet::AlabamaSpcs, 1),
        (deg(-89.4, 43.07, 0.), SrfSet::WisconsinSpcs, 3),
        (deg(8.74, 41.92, 0.), SrfSet::LambertNtf, 4),
    ];
    for (values, set, expected) in cases {
        let p = Coordinate::new(&cd, values);
        let member = natural_srf_set_member(&p, set)?;
        assert_eq!(member, expected);

        // The natural member takes the coordinate without complaint
        let srf = Srf::set_member(set, member, OrmCode::Wgs1984, HsrCode::Identity)?;
        let (_, validity) = srf.change_coordinate_srf(&p)?;
        assert!(validity <= Validity::ExtendedValid);
    }
    Ok(())
}

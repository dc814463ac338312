//! Scalar quantities derived from coordinates: distances, and the local
//! distortion of map projections.
use crate::authoring::*;
use crate::opmanager::convert;
use crate::Coordinate;

/// The celestiocentric position of `coordinate`, in the frame of the
/// reference ORM of its SRF
fn reference_cartesian(coordinate: &Coordinate) -> Result<[f64; 3], Error> {
    let srf = coordinate.srf();
    let orm = srf.orm().reference();
    let cc = srf.interim(SrfTemplate::Celestiocentric, orm, orm.default_hsr())?;
    Ok(convert(srf, &cc, coordinate.values())?.0)
}

fn same_body(a: &Coordinate, b: &Coordinate) -> Result<(), Error> {
    let (ra, rb) = (a.srf().orm().reference(), b.srf().orm().reference());
    if ra != rb {
        return Err(Error::InvalidInput(format!(
            "no common reference frame for {:?} and {:?}",
            a.srf().orm(),
            b.srf().orm()
        )));
    }
    Ok(())
}

/// The straight line distance between two coordinates, given in any SRFs of
/// the same body. The distance is exactly symmetric in its arguments.
///
/// # Examples
///
/// ```
/// use srm::prelude::*;
/// let cd = Srf::celestiodetic(OrmCode::Wgs1984, HsrCode::Identity)?;
/// let cc = Srf::celestiocentric(OrmCode::Wgs1984, HsrCode::Identity)?;
/// let a = Coordinate::new(&cd, [0., 0., 0.]);
/// let b = Coordinate::new(&cc, [6_378_137., 0., 1000.]);
/// assert!((euclidean_distance(&a, &b)? - 1000.).abs() < 1e-6);
/// # Ok::<(), srm::Error>(())
/// ```
pub fn euclidean_distance(a: &Coordinate, b: &Coordinate) -> Result<f64, Error> {
    same_body(a, b)?;
    let p = reference_cartesian(a)?;
    let q = reference_cartesian(b)?;
    Ok(norm3([p[0] - q[0], p[1] - q[1], p[2] - q[2]]))
}

/// The length of the geodesic between the surface projections of two
/// coordinates, on the ellipsoid of the SRF of the first
pub fn geodesic_distance(a: &Coordinate, b: &Coordinate) -> Result<f64, Error> {
    same_body(a, b)?;
    let srf = a.srf();
    let cd = srf.interim(SrfTemplate::Celestiodetic, srf.orm(), srf.hsr())?;
    let (p, _) = convert(srf, &cd, a.values())?;
    let (q, _) = convert(b.srf(), &cd, b.values())?;
    Ok(srf.ellipsoid().distance([p[0], p[1]], [q[0], q[1]]))
}

// ----- Map projection distortion -------------------------------------------------

/// Latitude step of the numerical derivatives
const DELTA: f64 = 1e-6;

/// The grid displacement along a short stretch of the meridian through
/// `coordinate`, and the length of that stretch on the ellipsoid
fn meridian_step(coordinate: &Coordinate) -> Result<([f64; 2], f64), Error> {
    let srf = coordinate.srf();
    if !srf.template().is_map_projection() {
        return Err(Error::InvalidSourceSrf(format!(
            "{:?} is not a map projection",
            srf.template()
        )));
    }
    let cd = srf.interim(SrfTemplate::Celestiodetic, srf.orm(), srf.hsr())?;
    let ([lon, lat, h], _) = convert(srf, &cd, coordinate.values())?;

    // Step inwards from the poles
    let lat = lat.clamp(-FRAC_PI_2 + 2. * DELTA, FRAC_PI_2 - 2. * DELTA);
    let (north, _) = convert(&cd, srf, [lon, lat + DELTA, h])?;
    let (south, _) = convert(&cd, srf, [lon, lat - DELTA, h])?;
    let length = 2. * DELTA * srf.ellipsoid().meridian_radius_of_curvature(lat);
    Ok(([north[0] - south[0], north[1] - south[1]], length))
}

/// The point scale factor of a map projection SRF at `coordinate`
pub fn point_scale_factor(coordinate: &Coordinate) -> Result<f64, Error> {
    let ([de, dn], length) = meridian_step(coordinate)?;
    Ok(de.hypot(dn) / length)
}

/// The convergence of the meridian at `coordinate`: the angle from grid north
/// to true north, positive when true north lies west of grid north
pub fn convergence_of_meridian(coordinate: &Coordinate) -> Result<f64, Error> {
    let ([de, dn], _) = meridian_step(coordinate)?;
    Ok((-de).atan2(dn))
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn distances() -> Result<(), Error> {
        let d = f64::to_radians;
        let cd = Srf::celestiodetic(OrmCode::NorthAmerican1983, HsrCode::Identity)?;
        let ed50 = Srf::celestiodetic(OrmCode::European1950, HsrCode::European1950Mean)?;
        let moon = Srf::celestiodetic(OrmCode::Moon, HsrCode::Identity)?;

        let cph = Coordinate::new(&cd, [d(12.), d(55.), 0.]);
        let par = Coordinate::new(&cd, [d(2.), d(49.), 0.]);
        assert_float_eq!(geodesic_distance(&cph, &par)?, 956_066.231_959, abs <= 1e-5);

        let chord = euclidean_distance(&cph, &par)?;
        assert!(chord < 956_066.231_959 && chord > 950_000.);

        let elsewhere = Coordinate::new(&ed50, [d(12.), d(55.), 0.]);
        assert_eq!(euclidean_distance(&cph, &elsewhere)?, euclidean_distance(&elsewhere, &cph)?);
        assert_eq!(euclidean_distance(&cph, &cph)?, 0.);

        let tycho = Coordinate::new(&moon, [d(-11.), d(-43.), 0.]);
        assert!(matches!(euclidean_distance(&cph, &tycho), Err(Error::InvalidInput(_))));
        assert!(matches!(geodesic_distance(&tycho, &cph), Err(Error::InvalidInput(_))));
        Ok(())
    }

    #[test]
    fn utm_distortion() -> Result<(), Error> {
        let d = f64::to_radians;
        let cd = Srf::celestiodetic(OrmCode::Wgs1984, HsrCode::Identity)?;
        let z32 = Srf::set_member(SrfSet::Utm, 32, OrmCode::Wgs1984, HsrCode::Identity)?;

        // On the central meridian: the scale is k_0, the convergence zero
        let p = Coordinate::new(&cd, [d(9.), d(55.), 0.]);
        let (q, _) = z32.change_coordinate_srf(&p)?;
        assert_float_eq!(point_scale_factor(&q)?, 0.9996, abs <= 1e-8);
        assert_float_eq!(convergence_of_meridian(&q)?, 0., abs <= 1e-8);

        // East of it: k grows past 1, and true north turns west of grid north,
        // by roughly atan(tan(dlon) sin(lat))
        let p = Coordinate::new(&cd, [d(12.), d(55.), 0.]);
        let (q, _) = z32.change_coordinate_srf(&p)?;
        let k = point_scale_factor(&q)?;
        assert!(k > 1.000_03 && k < 1.000_08);
        let gamma = convergence_of_meridian(&q)?;
        let expected = (d(3.).tan() * d(55.).sin()).atan();
        assert_float_eq!(gamma, expected, abs <= 1e-4);

        let geographic = Coordinate::new(&cd, [0., 0., 0.]);
        assert!(matches!(point_scale_factor(&geographic), Err(Error::InvalidSourceSrf(_))));
        Ok(())
    }

    #[test]
    fn mercator_scale() -> Result<(), Error> {
        let d = f64::to_radians;
        let merc = Srf::mercator(MercatorParameters::default(), OrmCode::Sphere, HsrCode::Identity)?;
        let cd = Srf::celestiodetic(OrmCode::Sphere, HsrCode::Identity)?;
        let p = Coordinate::new(&cd, [d(20.), d(60.), 0.]);
        let (q, _) = merc.change_coordinate_srf(&p)?;
        // On the sphere, k = sec(lat)
        assert_float_eq!(point_scale_factor(&q)?, 2., abs <= 1e-6);
        assert_float_eq!(convergence_of_meridian(&q)?, 0., abs <= 1e-9);
        Ok(())
    }
}

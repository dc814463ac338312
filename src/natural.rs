//! The natural member of an SRF set for a coordinate: the zone, pole,
//! state plane zone or cell the coordinate falls in.
use crate::authoring::*;
use crate::opmanager::convert;
use crate::Coordinate;

/// The member of `set` whose nominal region contains `coordinate`. Longitudes
/// wrap around the antimeridian; latitudes outside the region of a set are
/// assigned to the closest member.
///
/// # Examples
///
/// ```
/// use srm::prelude::*;
/// let cd = Srf::celestiodetic(OrmCode::Wgs1984, HsrCode::Identity)?;
/// let copenhagen = Coordinate::new(&cd, [12.57_f64.to_radians(), 55.68_f64.to_radians(), 0.]);
/// assert_eq!(natural_srf_set_member(&copenhagen, SrfSet::Utm)?, 33);
/// # Ok::<(), srm::Error>(())
/// ```
pub fn natural_srf_set_member(coordinate: &Coordinate, set: SrfSet) -> Result<u16, Error> {
    let srf = coordinate.srf();
    let cd = srf.interim(SrfTemplate::Celestiodetic, srf.orm(), srf.hsr())?;
    let ([lon, lat, _], validity) = convert(srf, &cd, coordinate.values())?;
    if validity == Validity::Undefined {
        return Err(Error::InvalidSourceCoordinate(format!(
            "{:?} has no celestiodetic counterpart",
            coordinate.values()
        )));
    }
    // Normalize to [-180, 180)
    let lon = delta_lambda_min(lon, 0.).to_degrees();
    let lon = if lon >= 180. { lon - 360. } else { lon };
    let lat = lat.to_degrees();
    Ok(member(set, lon, lat))
}

/// The classification proper, in degrees
fn member(set: SrfSet, lon: f64, lat: f64) -> u16 {
    match set {
        SrfSet::Utm => {
            let zone = (((lon + 180.) / 6.).floor() as u16).min(59) + 1;
            if lat < 0. {
                zone + 60
            } else {
                zone
            }
        }

        SrfSet::Ups => {
            if lat >= 0. {
                1
            } else {
                2
            }
        }

        SrfSet::AlabamaSpcs => {
            if lon >= -86.62 {
                1
            } else {
                2
            }
        }

        SrfSet::WisconsinSpcs => {
            if lat >= 45.5 {
                1
            } else if lat >= 44.25 {
                2
            } else {
                3
            }
        }

        SrfSet::LambertNtf => {
            // Corsica first
            if lon >= 8. && lat <= 43.2 {
                4
            } else if lat >= 48.15 {
                1
            } else if lat >= 45.45 {
                2
            } else {
                3
            }
        }

        SrfSet::Gtrs => {
            let cell = |angle: f64, cells: u16| ((angle / 5.).floor().max(0.) as u16).min(cells - 1);
            let row = cell(lat + 90., 36);
            let col = cell(lon + 180., 72);
            1 + row * 72 + col
        }
    }
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utm() -> Result<(), Error> {
        assert_eq!(member(SrfSet::Utm, 9., 55.), 32);
        assert_eq!(member(SrfSet::Utm, 12., 55.), 33);
        assert_eq!(member(SrfSet::Utm, -180., 10.), 1);
        assert_eq!(member(SrfSet::Utm, 179.99, 10.), 60);
        assert_eq!(member(SrfSet::Utm, 9., -33.), 92);

        // The antimeridian, seen from either side
        let cd = Srf::celestiodetic(OrmCode::Wgs1984, HsrCode::Identity)?;
        let east = Coordinate::new(&cd, [PI, 0.1, 0.]);
        let west = Coordinate::new(&cd, [-PI, 0.1, 0.]);
        assert_eq!(natural_srf_set_member(&east, SrfSet::Utm)?, 1);
        assert_eq!(natural_srf_set_member(&west, SrfSet::Utm)?, 1);
        Ok(())
    }

    #[test]
    fn gtrs() {
        assert_eq!(member(SrfSet::Gtrs, -180., -90.), 1);
        assert_eq!(member(SrfSet::Gtrs, 179.9, 90.), 2592);
        assert_eq!(member(SrfSet::Gtrs, 12., 55.), 1 + 29 * 72 + 38);
    }

    #[test]
    fn regional() -> Result<(), Error> {
        assert_eq!(member(SrfSet::Ups, 0., 88.), 1);
        assert_eq!(member(SrfSet::Ups, 0., -88.), 2);
        assert_eq!(member(SrfSet::AlabamaSpcs, -86., 33.), 1);
        assert_eq!(member(SrfSet::AlabamaSpcs, -87.5, 33.), 2);
        assert_eq!(member(SrfSet::WisconsinSpcs, -89., 46.), 1);
        assert_eq!(member(SrfSet::WisconsinSpcs, -89., 45.), 2);
        assert_eq!(member(SrfSet::WisconsinSpcs, -89., 43.), 3);
        assert_eq!(member(SrfSet::LambertNtf, 2.35, 48.85), 1);
        assert_eq!(member(SrfSet::LambertNtf, 9., 42.), 4);
        assert_eq!(member(SrfSet::LambertNtf, 5.4, 43.3), 3);

        // Through a projected coordinate
        let cd = Srf::celestiodetic(OrmCode::Wgs1984, HsrCode::Identity)?;
        let z32 = Srf::set_member(SrfSet::Utm, 32, OrmCode::Wgs1984, HsrCode::Identity)?;
        let geo = Coordinate::new(&cd, [13.5_f64.to_radians(), 55_f64.to_radians(), 0.]);
        let (p, validity) = z32.change_coordinate_srf(&geo)?;
        assert_eq!(validity, Validity::Defined);
        assert_eq!(natural_srf_set_member(&p, SrfSet::Utm)?, 33);
        assert_eq!(natural_srf_set_member(&p, SrfSet::Gtrs)?, 1 + 29 * 72 + 38);
        Ok(())
    }
}

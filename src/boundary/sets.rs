//! Validity refinement for SRF set members: the nominal region of the member
//! and its extension margin
use super::*;

/// Classify a celestiodetic (longitude, latitude) with respect to a set member
pub(super) fn refine(set: SrfSet, member: u16, lon: f64, lat: f64) -> Result<Validity, Error> {
    let region = set.nominal_region(member)?;
    let dlon = delta_lambda_min(lon, region.center_longitude.to_radians())
        .to_degrees()
        .abs();
    let lat = lat.to_degrees();

    let within = |lon_margin: f64, lat_margin: f64| {
        dlon <= region.half_width + lon_margin
            && lat >= region.south - lat_margin
            && lat <= region.north + lat_margin
    };

    if within(0., 0.) {
        return Ok(Validity::Valid);
    }
    if within(region.longitude_margin, region.latitude_margin) {
        return Ok(Validity::ExtendedValid);
    }
    Ok(Validity::Defined)
}

// ----- Tests ---------------------------------------------------------------------

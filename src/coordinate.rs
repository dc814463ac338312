//! Coordinates, directions and orientations: component values bound to an owning SRF,
//! and the entry points for converting them into, and checking them against, an SRF.
use crate::authoring::*;
use crate::boundary::classify;
use crate::opmanager::convert;

/// A position, given by its three components in the canonical form of the
/// template of its SRF
#[derive(Clone, Copy, Debug)]
pub struct Coordinate<'s> {
    srf: &'s Srf,
    values: [f64; 3],
}

impl<'s> Coordinate<'s> {
    #[must_use]
    pub fn new(srf: &'s Srf, values: [f64; 3]) -> Coordinate<'s> {
        Coordinate { srf, values }
    }

    #[must_use]
    pub fn srf(&self) -> &'s Srf {
        self.srf
    }

    #[must_use]
    pub fn values(&self) -> [f64; 3] {
        self.values
    }

    pub fn set_values(&mut self, values: [f64; 3]) {
        self.values = values;
    }
}

/// A vector at a reference position, given in the localization frame of the
/// SRF at that position
#[derive(Clone, Copy, Debug)]
pub struct Direction<'s> {
    reference: Coordinate<'s>,
    vector: [f64; 3],
}

impl<'s> Direction<'s> {
    #[must_use]
    pub fn new(reference: Coordinate<'s>, vector: [f64; 3]) -> Direction<'s> {
        Direction { reference, vector }
    }

    #[must_use]
    pub fn reference(&self) -> &Coordinate<'s> {
        &self.reference
    }

    #[must_use]
    pub fn vector(&self) -> [f64; 3] {
        self.vector
    }

    pub fn set_vector(&mut self, vector: [f64; 3]) {
        self.vector = vector;
    }

    fn validate(&self) -> Result<(), Error> {
        let norm = norm3(self.vector);
        if !norm.is_finite() || norm < 1e-15 {
            return Err(Error::InvalidSourceDirection(format!(
                "degenerate direction vector {:?}",
                self.vector
            )));
        }
        Ok(())
    }
}

/// A direction cosine matrix at a reference position, relative to the
/// localization frame of the SRF at that position
#[derive(Clone, Copy, Debug)]
pub struct Orientation<'s> {
    reference: Coordinate<'s>,
    matrix: Mat3,
}

impl<'s> Orientation<'s> {
    #[must_use]
    pub fn new(reference: Coordinate<'s>, matrix: Mat3) -> Orientation<'s> {
        Orientation { reference, matrix }
    }

    #[must_use]
    pub fn reference(&self) -> &Coordinate<'s> {
        &self.reference
    }

    #[must_use]
    pub fn matrix(&self) -> Mat3 {
        self.matrix
    }

    pub fn set_matrix(&mut self, matrix: Mat3) {
        self.matrix = matrix;
    }

    fn validate(&self) -> Result<(), Error> {
        let det = mat3_determinant(&self.matrix);
        if !det.is_finite() || det.abs() < 1e-6 {
            return Err(Error::InvalidSourceOrientation(format!(
                "singular orientation matrix (determinant {det})"
            )));
        }
        Ok(())
    }
}

// ----- Localization frames -------------------------------------------------------

/// The localization frame of `srf` at `values`: the columns are the
/// orthonormalized partial derivatives of the mapping into the
/// celestiocentric frame of the reference ORM
fn localization_frame(srf: &Srf, values: [f64; 3]) -> Result<Mat3, Error> {
    let orm = srf.orm().reference();
    let cc = srf.interim(SrfTemplate::Celestiocentric, orm, orm.default_hsr())?;
    let angular = srf.template().angular_components();

    let mut columns = [[0.; 3]; 3];
    for i in 0..3 {
        let h = if angular[i] { 1e-7 } else { 1.0 };
        let mut ahead = values;
        let mut behind = values;
        ahead[i] += h;
        behind[i] -= h;
        let (p, _) = convert(srf, &cc, ahead)?;
        let (q, _) = convert(srf, &cc, behind)?;
        columns[i] = [0, 1, 2].map(|k| p[k] - q[k]);
    }

    // Gram-Schmidt
    for i in 0..3 {
        for j in 0..i {
            let projection = dot3(columns[i], columns[j]);
            columns[i] = [0, 1, 2].map(|k| columns[i][k] - projection * columns[j][k]);
        }
        let norm = norm3(columns[i]);
        if !(norm > 1e-12) {
            return Err(Error::InvalidSourceCoordinate(format!(
                "no localization frame at {values:?} in {:?}",
                srf.template()
            )));
        }
        columns[i] = columns[i].map(|c| c / norm);
    }
    Ok(mat3_transpose(&columns))
}

// ----- Entry points --------------------------------------------------------------

impl Srf {
    /// Convert a coordinate, owned by any SRF, into this SRF
    pub fn change_coordinate_srf<'a>(
        &'a self,
        source: &Coordinate,
    ) -> Result<(Coordinate<'a>, Validity), Error> {
        let (values, validity) = convert(source.srf, self, source.values)?;
        Ok((Coordinate::new(self, values), validity))
    }

    /// Convert a direction, owned by any SRF, into this SRF
    pub fn change_direction_srf<'a>(
        &'a self,
        source: &Direction,
    ) -> Result<(Direction<'a>, Validity), Error> {
        source.validate()?;
        let (reference, validity) = self.change_coordinate_srf(&source.reference)?;
        let from = localization_frame(source.reference.srf, source.reference.values)?;
        let to = localization_frame(self, reference.values)?;
        let global = mat3_apply(&from, source.vector);
        let vector = mat3_apply(&mat3_transpose(&to), global);
        Ok((Direction::new(reference, vector), validity))
    }

    /// Convert an orientation, owned by any SRF, into this SRF
    pub fn change_orientation_srf<'a>(
        &'a self,
        source: &Orientation,
    ) -> Result<(Orientation<'a>, Validity), Error> {
        source.validate()?;
        let (reference, validity) = self.change_coordinate_srf(&source.reference)?;
        let from = localization_frame(source.reference.srf, source.reference.values)?;
        let to = localization_frame(self, reference.values)?;
        let matrix = mat3_mul(&source.matrix, &mat3_mul(&mat3_transpose(&from), &to));
        Ok((Orientation::new(reference, matrix), validity))
    }

    /// The validity of a coordinate owned by this SRF
    pub fn check_coordinate(&self, coordinate: &Coordinate) -> Result<Validity, Error> {
        if coordinate.srf.id() != self.id() {
            return Err(Error::InvalidSourceCoordinate(String::from(
                "the coordinate belongs to another SRF",
            )));
        }
        classify(self, coordinate.values)
    }

    /// The validity of a direction owned by this SRF
    pub fn check_direction(&self, direction: &Direction) -> Result<Validity, Error> {
        direction.validate()?;
        self.check_coordinate(&direction.reference)
    }

    /// The validity of an orientation owned by this SRF
    pub fn check_orientation(&self, orientation: &Orientation) -> Result<Validity, Error> {
        orientation.validate()?;
        self.check_coordinate(&orientation.reference)
    }
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn owning_srf() -> Result<(), Error> {
        let cd = Srf::celestiodetic(OrmCode::Wgs1984, HsrCode::Identity)?;
        let other = Srf::celestiodetic(OrmCode::Wgs1984, HsrCode::Identity)?;
        let mut p = Coordinate::new(&cd, [0.1, 0.2, 0.]);
        assert_eq!(cd.check_coordinate(&p)?, Validity::Valid);
        assert!(matches!(other.check_coordinate(&p), Err(Error::InvalidSourceCoordinate(_))));

        p.set_values([0.1, 2., 0.]);
        assert_eq!(cd.check_coordinate(&p)?, Validity::Undefined);
        assert_eq!(p.srf().id(), cd.id());
        Ok(())
    }

    #[test]
    fn frame_of_celestiodetic() -> Result<(), Error> {
        let cd = Srf::celestiodetic(OrmCode::Wgs1984, HsrCode::Identity)?;
        // At (0, 0): east is +Y, north is +Z, up is +X
        let frame = localization_frame(&cd, [0., 0., 0.])?;
        let expected = [[0., 0., 1.], [1., 0., 0.], [0., 1., 0.]];
        for i in 0..3 {
            for j in 0..3 {
                assert_float_eq!(frame[i][j], expected[i][j], abs <= 1e-8);
            }
        }

        // No frame at the pole
        assert!(localization_frame(&cd, [0., FRAC_PI_2, 0.]).is_err());
        Ok(())
    }

    #[test]
    fn direction_into_local_tangent_space() -> Result<(), Error> {
        let d = f64::to_radians;
        let cd = Srf::celestiodetic(OrmCode::Wgs1984, HsrCode::Identity)?;
        let params = LtsParameters {
            geodetic_longitude: d(12.),
            geodetic_latitude: d(55.),
            azimuth: d(90.),
            ..Default::default()
        };
        let lts = Srf::local_tangent_space_euclidean(params, OrmCode::Wgs1984, HsrCode::Identity)?;

        // Due north at the tangent point: with the y axis pointing east, x points south
        let north = Direction::new(Coordinate::new(&cd, [d(12.), d(55.), 0.]), [0., 1., 0.]);
        let (local, validity) = lts.change_direction_srf(&north)?;
        assert_eq!(validity, Validity::Valid);
        let v = local.vector();
        assert_float_eq!(v[0], -1., abs <= 1e-6);
        assert_float_eq!(v[1], 0., abs <= 1e-6);
        assert_float_eq!(v[2], 0., abs <= 1e-6);
        Ok(())
    }

    #[test]
    fn degenerate() -> Result<(), Error> {
        let cd = Srf::celestiodetic(OrmCode::Wgs1984, HsrCode::Identity)?;
        let cc = Srf::celestiocentric(OrmCode::Wgs1984, HsrCode::Identity)?;
        let p = Coordinate::new(&cd, [0.1, 0.2, 0.]);

        let zero = Direction::new(p, [0., 0., 0.]);
        assert!(matches!(cd.check_direction(&zero), Err(Error::InvalidSourceDirection(_))));
        assert!(matches!(cc.change_direction_srf(&zero), Err(Error::InvalidSourceDirection(_))));

        let flat = Orientation::new(p, [[1., 0., 0.], [0., 1., 0.], [1., 1., 0.]]);
        assert!(matches!(cd.check_orientation(&flat), Err(Error::InvalidSourceOrientation(_))));
        assert!(matches!(cc.change_orientation_srf(&flat), Err(Error::InvalidSourceOrientation(_))));

        let fine = Orientation::new(p, IDENTITY3);
        assert_eq!(cd.check_orientation(&fine)?, Validity::Valid);
        Ok(())
    }
}

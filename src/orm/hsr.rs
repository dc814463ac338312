//! The Helmert transformations between an ORM and its reference ORM
use super::*;
use crate::math::matrix::*;
use crate::Validity;

impl Hsr {
    /// The transformation of celestiocentric coordinates from the HSR's ORM into
    /// the reference ORM: X_ref = T + (1 + ΔS)·Rz·Ry·Rx·X
    #[must_use]
    pub fn to_reference(&self) -> Affine4 {
        let [rx, ry, rz] = self.rotation;
        let r = mat3_mul(&rot_z(rz), &mat3_mul(&rot_y(ry), &rot_x(rx)));
        let s = 1. + self.scale;
        Affine4::new(r.map(|row| row.map(|e| e * s)), self.translation)
    }

    /// The exact inverse of [to_reference](Hsr::to_reference)
    pub fn from_reference(&self) -> Result<Affine4, Error> {
        self.to_reference().inverse().ok_or_else(|| {
            Error::Inactionable(format!("HSR {:?} is not invertible", self.code))
        })
    }
}

/// A celestiocentric to celestiocentric shift between two (ORM, HSR) pairs
/// sharing the same reference ORM
#[derive(Clone, Debug)]
pub struct DatumShift {
    pub affine: Affine4,
    /// The source side shift into the reference ORM, for checking applicability
    to_reference: Affine4,
    source: HsrCode,
    target: HsrCode,
    reference: OrmCode,
}

impl DatumShift {
    /// Apply the shift, classifying the validity by whether the point is
    /// within the regions of applicability of both HSRs
    pub fn apply(&self, cartesian: [f64; 3]) -> ([f64; 3], Validity) {
        let shifted = self.affine.apply(cartesian);
        let reference = self.to_reference.apply(cartesian);
        let validity = match self.reference.geodetic_regions().geodetic(reference) {
            Ok([lon, lat, _]) => {
                if Hsr::get(self.source).covers(lon, lat) && Hsr::get(self.target).covers(lon, lat) {
                    Validity::Valid
                } else {
                    Validity::Defined
                }
            }
            Err(_) => Validity::Defined,
        };
        (shifted, validity)
    }
}

/// Build the shift from (source ORM, source HSR) into (target ORM, target HSR).
pub(crate) fn datum_shift(
    source: (OrmCode, HsrCode),
    target: (OrmCode, HsrCode),
) -> Result<DatumShift, Error> {
    let reference = source.0.reference();
    if target.0.reference() != reference {
        return Err(Error::InvalidTargetSrf(format!(
            "{:?} and {:?} do not share a reference ORM",
            source.0, target.0
        )));
    }
    let to_reference = Hsr::get(source.1).to_reference();
    let from_reference = Hsr::get(target.1).from_reference()?;
    Ok(DatumShift {
        affine: from_reference.then_after(&to_reference),
        to_reference,
        source: source.1,
        target: target.1,
        reference,
    })
}

// ----- Tests ---------------------------------------------------------------------

//! Celestiocentric (X, Y, Z) to celestiodetic, local tangent space, the
//! spherical families, and celestiocentric frames of other ORMs
use super::lts::local_to_template;
use super::spherical::spherical_from_cartesian;
use super::*;
use crate::boundary::check;
use crate::opmanager::OPSEQ_CACHE_BOUND;

/// The constants needed for converting into a given destination SRF
enum Constants {
    Local(LocalFrame),
    Shift(DatumShift),
}

#[derive(Default)]
pub(crate) struct CelestiocentricEngine {
    constants: Option<BoundedCache<SrfHandle, Rc<Constants>>>,
}

impl CelestiocentricEngine {
    fn constants(&mut self, src: &Srf, dest: &Srf) -> Result<Rc<Constants>, Error> {
        let cache = self
            .constants
            .get_or_insert_with(|| BoundedCache::new(OPSEQ_CACHE_BOUND));
        if let Some(constants) = cache.get(&dest.id()) {
            return Ok(constants.clone());
        }
        let constants = if dest.template() == Celestiocentric {
            Constants::Shift(datum_shift((src.orm(), src.hsr()), (dest.orm(), dest.hsr()))?)
        } else {
            Constants::Local(LocalFrame::of(dest)?)
        };
        let constants = Rc::new(constants);
        cache.insert(dest.id(), constants.clone());
        Ok(constants)
    }
}

impl Engine for CelestiocentricEngine {
    fn targets(&self) -> &'static [Target] {
        &FROM_CELESTIOCENTRIC
    }

    fn convert(
        &mut self,
        target: Target,
        src: &Srf,
        dest: &Srf,
        values: [f64; 3],
    ) -> Result<([f64; 3], Validity), Error> {
        let T(template) = target else {
            return Ok(pass_through(src, values));
        };
        let validity = intrinsic(Celestiocentric, values);

        match template {
            Celestiodetic => {
                let geodetic = dest.orm().geodetic_regions().geodetic(values)?;
                Ok((geodetic, validity.max(intrinsic(Celestiodetic, geodetic))))
            }

            Celestiocentric => {
                let Constants::Shift(shift) = &*self.constants(src, dest)? else {
                    return Err(Error::Inactionable(String::from("datum shift expected")));
                };
                let (shifted, region) = shift.apply(values);
                Ok((shifted, validity.max(region)))
            }

            t if t.is_local_tangent() => {
                let Constants::Local(frame) = &*self.constants(src, dest)? else {
                    return Err(Error::Inactionable(String::from("local frame expected")));
                };
                let local = frame.to_local.apply(values);
                let result = if t == LocalTangentSpaceEuclidean {
                    offset(dest, local, 1.)
                } else {
                    local_to_template(t, local)
                };

                // Set members (GTRS) have their domain in celestiodetic space
                let mut validity = validity.max(intrinsic(t, result));
                if dest.member().is_some() {
                    let geodetic = dest.orm().geodetic_regions().geodetic(values)?;
                    validity = validity.max(check(dest, geodetic)?);
                }
                Ok((result, validity))
            }

            t if t.is_spherical() => {
                let result = spherical_from_cartesian(values);
                Ok((result, validity.max(intrinsic(t, result))))
            }

            _ => Err(unsupported(src, target)),
        }
    }
}

// ----- Tests ---------------------------------------------------------------------

//! Celestiodetic (longitude, latitude, height) to celestiocentric and to the
//! map projections
use super::*;
use crate::boundary::check;
use crate::opmanager::OPSEQ_CACHE_BOUND;
use crate::projection::Projection;

#[derive(Default)]
pub(crate) struct CelestiodeticEngine {
    projections: Option<BoundedCache<SrfHandle, Rc<Projection>>>,
}

impl CelestiodeticEngine {
    fn projection(&mut self, dest: &Srf) -> Result<Rc<Projection>, Error> {
        let cache = self
            .projections
            .get_or_insert_with(|| BoundedCache::new(OPSEQ_CACHE_BOUND));
        if let Some(projection) = cache.get(&dest.id()) {
            return Ok(projection.clone());
        }
        let projection = Rc::new(Projection::new(dest)?);
        cache.insert(dest.id(), projection.clone());
        Ok(projection)
    }
}

impl Engine for CelestiodeticEngine {
    fn targets(&self) -> &'static [Target] {
        &FROM_CELESTIODETIC
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
        let validity = intrinsic(Celestiodetic, values);

        match template {
            Celestiocentric => Ok((dest.ellipsoid().cartesian(values), validity)),

            t if t.is_map_projection() => {
                let validity = validity.max(check(dest, values)?);
                let [x, y] = self.projection(dest)?.fwd(values[0], values[1])?;
                Ok((offset(dest, [x, y, values[2]], 1.), validity))
            }

            _ => Err(unsupported(src, target)),
        }
    }
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn worked_example() -> Result<(), Error> {
        let cd = Srf::celestiodetic(OrmCode::Wgs1984, HsrCode::Identity)?;
        let cc = Srf::celestiocentric(OrmCode::Wgs1984, HsrCode::Identity)?;
        let mut engine = CelestiodeticEngine::default();
        let geo = [10_f64.to_radians(), 20_f64.to_radians(), 100.];
        let (xyz, validity) = engine.convert(T(Celestiocentric), &cd, &cc, geo)?;
        assert_eq!(validity, Validity::Valid);
        assert_float_eq!(xyz[0], 5_904_838.698_311_626, abs <= 1e-6);
        assert_float_eq!(xyz[1], 1_041_182.379_243_791_5, abs <= 1e-6);
        assert_float_eq!(xyz[2], 2_167_730.989_843_083_5, abs <= 1e-6);
        Ok(())
    }

    #[test]
    fn utm() -> Result<(), Error> {
        let cd = Srf::celestiodetic(OrmCode::NorthAmerican1983, HsrCode::Identity)?;
        let z32 = Srf::set_member(SrfSet::Utm, 32, OrmCode::NorthAmerican1983, HsrCode::Identity)?;
        let mut engine = CelestiodeticEngine::default();

        let geo = [12_f64.to_radians(), 55_f64.to_radians(), 42.];
        let (en, validity) = engine.convert(T(TransverseMercator), &cd, &z32, geo)?;
        assert_eq!(validity, Validity::Valid);
        assert_float_eq!(en[0], 691_875.632_139_661, abs <= 1e-3);
        assert_float_eq!(en[1], 6_098_907.825_005_012, abs <= 1e-3);
        assert_eq!(en[2], 42.);

        // Outside the zone, but within the margin
        let geo = [12.5_f64.to_radians(), 55_f64.to_radians(), 0.];
        let (_, validity) = engine.convert(T(TransverseMercator), &cd, &z32, geo)?;
        assert_eq!(validity, Validity::ExtendedValid);

        // The constants are cached per destination
        assert_eq!(engine.projections.as_ref().map(|c| c.len()), Some(1));
        Ok(())
    }

    #[test]
    fn southern_pole_of_ups_north() -> Result<(), Error> {
        let cd = Srf::celestiodetic(OrmCode::Wgs1984, HsrCode::Identity)?;
        let ups = Srf::set_member(SrfSet::Ups, 1, OrmCode::Wgs1984, HsrCode::Identity)?;
        let mut engine = CelestiodeticEngine::default();
        let south_pole = [0., -FRAC_PI_2, 0.];
        let result = engine.convert(T(PolarStereographic), &cd, &ups, south_pole);
        assert!(matches!(result, Err(Error::InvalidSourceCoordinate(_))));
        Ok(())
    }
}

//! The map projections (easting, northing, height) back to celestiodetic
use super::*;
use crate::boundary::check;
use crate::projection::Projection;

#[derive(Default)]
pub(crate) struct ProjectedEngine {
    projection: Option<(SrfHandle, Rc<Projection>)>,
}

impl Engine for ProjectedEngine {
    fn targets(&self) -> &'static [Target] {
        &FROM_PROJECTED
    }

    fn convert(
        &mut self,
        target: Target,
        src: &Srf,
        _dest: &Srf,
        values: [f64; 3],
    ) -> Result<([f64; 3], Validity), Error> {
        match target {
            Target::Undefined => return Ok(pass_through(src, values)),
            T(Celestiodetic) => (),
            _ => return Err(unsupported(src, target)),
        }

        let projection = match &self.projection {
            Some((id, projection)) if *id == src.id() => projection.clone(),
            _ => {
                let projection = Rc::new(Projection::new(src)?);
                self.projection = Some((src.id(), projection.clone()));
                projection
            }
        };

        let [x, y, h] = offset(src, values, -1.);
        let [lon, lat] = projection.inv(x, y)?;
        let geodetic = [lon, lat, h];
        Ok((geodetic, check(src, geodetic)?))
    }
}

// ----- Tests ---------------------------------------------------------------------

//! Textual SRF definitions, in the key=value style:
//! ```txt
//! tm lon_0=9 k_0=0.9996 x_0=500000 orm=wgs84
//! utm zone=32 south
//! lcc lat_1=33 lat_2=45 lon_0=10 orm=nad83
//! ```
//! The first word names a template or an SRF set. Angles are in degrees.
//! Missing `orm` defaults to `wgs84`, missing `hsr` to the default HSR of the ORM.
use super::*;

/// The parameters of a definition, split into key=value pairs. Flags are
/// represented as `flag=true`, and the leading word as `name=...`
#[derive(Debug)]
struct Definition {
    name: String,
    parameters: BTreeMap<String, String>,
}

impl Definition {
    fn parse(definition: &str) -> Result<Definition, Error> {
        let normalized = definition
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .replace(" =", "=")
            .replace("= ", "=");
        let mut elements = normalized.split_whitespace();
        let Some(name) = elements.next() else {
            return Err(Error::InvalidInput(String::from("empty SRF definition")));
        };
        if name.contains('=') {
            return Err(Error::MissingParam(String::from("name")));
        }

        let mut parameters = BTreeMap::new();
        for element in elements {
            let (key, value) = element.split_once('=').unwrap_or((element, "true"));
            if parameters.insert(key.to_lowercase(), value.to_string()).is_some() {
                return Err(Error::BadParam(key.to_string(), String::from("given more than once")));
            }
        }
        Ok(Definition {
            name: name.to_lowercase(),
            parameters,
        })
    }

    /// Take a numeric parameter, falling back to `default` if given
    fn real(&mut self, key: &str, default: Option<f64>) -> Result<f64, Error> {
        match self.parameters.remove(key) {
            Some(value) => value
                .parse::<f64>()
                .map_err(|_| Error::BadParam(key.to_string(), value.clone())),
            None => default.ok_or_else(|| Error::MissingParam(key.to_string())),
        }
    }

    /// An angle given in degrees. The default is in radians
    fn angle(&mut self, key: &str, default: Option<f64>) -> Result<f64, Error> {
        if !self.parameters.contains_key(key) {
            return default.ok_or_else(|| Error::MissingParam(key.to_string()));
        }
        Ok(self.real(key, None)?.to_radians())
    }

    fn natural(&mut self, key: &str, default: Option<u16>) -> Result<u16, Error> {
        match self.parameters.remove(key) {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| Error::BadParam(key.to_string(), value.clone())),
            None => default.ok_or_else(|| Error::MissingParam(key.to_string())),
        }
    }

    fn flag(&mut self, key: &str) -> Result<bool, Error> {
        match self.parameters.remove(key) {
            None => Ok(false),
            Some(value) => match value.as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(Error::BadParam(key.to_string(), value)),
            },
        }
    }

    fn orm_and_hsr(&mut self) -> Result<(OrmCode, HsrCode), Error> {
        let orm = match self.parameters.remove("orm") {
            Some(name) => OrmCode::named(&name)?,
            None => OrmCode::Wgs1984,
        };
        let hsr = match self.parameters.remove("hsr") {
            Some(name) => HsrCode::named(&name)?,
            None => orm.default_hsr(),
        };
        Ok((orm, hsr))
    }

    /// Everything must be used: leftovers are misspellings
    fn finish(self) -> Result<(), Error> {
        if let Some((key, value)) = self.parameters.into_iter().next() {
            return Err(Error::BadParam(key, format!("{value} (unknown to {})", self.name)));
        }
        Ok(())
    }
}

impl Srf {
    /// Build an SRF from a textual definition
    ///
    /// ```
    /// use srm::prelude::*;
    /// let utm = Srf::from_definition("utm zone=32")?;
    /// assert_eq!(utm.member(), Some((SrfSet::Utm, 32)));
    /// let tm = Srf::from_definition("tm lon_0=9 k_0=0.9996 x_0=500000")?;
    /// assert_eq!(tm.parameters(), utm.parameters());
    /// # Ok::<(), srm::Error>(())
    /// ```
    pub fn from_definition(definition: &str) -> Result<Srf, Error> {
        let mut def = Definition::parse(definition)?;
        let (orm, hsr) = def.orm_and_hsr()?;

        // SRF sets first
        if let Ok(set) = SrfSet::named(&def.name) {
            let member = match set {
                SrfSet::Utm => {
                    let zone = def.natural("zone", None)?;
                    if !(1..=60).contains(&zone) {
                        return Err(Error::BadParam(String::from("zone"), zone.to_string()));
                    }
                    if def.flag("south")? {
                        zone + 60
                    } else {
                        zone
                    }
                }
                SrfSet::Ups => {
                    if def.flag("south")? {
                        2
                    } else {
                        1
                    }
                }
                _ => def.natural("member", None)?,
            };
            def.finish()?;
            return Srf::set_member(set, member, orm, hsr);
        }

        let template = SrfTemplate::named(&def.name)?;
        use SrfTemplate::*;
        let parameters = match template {
            TransverseMercator => Parameters::Tm(TmParameters {
                origin_longitude: def.angle("lon_0", Some(0.))?,
                origin_latitude: def.angle("lat_0", Some(0.))?,
                central_scale: def.real("k_0", Some(1.))?,
                false_easting: def.real("x_0", Some(0.))?,
                false_northing: def.real("y_0", Some(0.))?,
            }),
            LambertConformalConic => {
                let latitude1 = def.angle("lat_1", None)?;
                Parameters::Lcc(LccParameters {
                    origin_longitude: def.angle("lon_0", Some(0.))?,
                    latitude1,
                    latitude2: def.angle("lat_2", Some(latitude1))?,
                    origin_latitude: def.angle("lat_0", Some(latitude1))?,
                    false_easting: def.real("x_0", Some(0.))?,
                    false_northing: def.real("y_0", Some(0.))?,
                })
            }
            Mercator => Parameters::Mercator(MercatorParameters {
                origin_longitude: def.angle("lon_0", Some(0.))?,
                central_scale: def.real("k_0", Some(1.))?,
                false_easting: def.real("x_0", Some(0.))?,
                false_northing: def.real("y_0", Some(0.))?,
            }),
            PolarStereographic => Parameters::Ps(PsParameters {
                aspect: if def.flag("south")? {
                    PolarAspect::South
                } else {
                    PolarAspect::North
                },
                origin_longitude: def.angle("lon_0", Some(0.))?,
                central_scale: def.real("k_0", Some(1.))?,
                false_easting: def.real("x_0", Some(0.))?,
                false_northing: def.real("y_0", Some(0.))?,
            }),
            t if t.is_local_tangent() => Parameters::Lts(LtsParameters {
                geodetic_longitude: def.angle("lon_0", None)?,
                geodetic_latitude: def.angle("lat_0", None)?,
                azimuth: def.angle("azimuth", Some(0.))?,
                height_offset: def.real("h_0", Some(0.))?,
                false_x_origin: def.real("x_0", Some(0.))?,
                false_y_origin: def.real("y_0", Some(0.))?,
            }),
            _ => Parameters::None,
        };
        def.finish()?;
        Srf::new(template, parameters, orm, hsr)
    }
}

// ----- Tests ---------------------------------------------------------------------

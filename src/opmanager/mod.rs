//! The operation manager: resolves the chain of engine steps leading from a
//! source SRF to a destination SRF, caches it on the source SRF, and executes it.
//!
//! Only celestiocentric and celestiodetic SRFs are used as interior nodes of
//! a chain. When the two SRFs have different ORMs or HSRs, the chain passes
//! through a celestiocentric datum shift between the two.
use crate::authoring::*;
use crate::boundary::classify;
use crate::engine::reachable;
use std::collections::VecDeque;

/// The default maximum number of operation sequences cached per source SRF
pub const OPSEQ_CACHE_BOUND: usize = 200;

/// A node of an operation sequence: the SRF a step starts from, or ends in
#[derive(Clone, Debug)]
pub(crate) enum Node {
    Source,
    Destination,
    Interim(Rc<Srf>),
}

impl Node {
    fn srf<'a>(&'a self, src: &'a Srf, dest: &'a Srf) -> &'a Srf {
        match self {
            Node::Source => src,
            Node::Destination => dest,
            Node::Interim(srf) => srf,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Step {
    from: Node,
    to: Node,
    target: Target,
}

/// The resolved steps between a pair of SRF instances
#[derive(Debug)]
pub(crate) struct OpSeq {
    steps: Vec<Step>,
}

impl OpSeq {
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Run the steps in order, reporting the worst validity seen
    pub fn execute(
        &self,
        src: &Srf,
        dest: &Srf,
        values: [f64; 3],
    ) -> Result<([f64; 3], Validity), Error> {
        let mut values = values;
        let mut validity = Validity::Valid;
        for step in &self.steps {
            let from = step.from.srf(src, dest);
            let to = step.to.srf(src, dest);
            let (v, region) = match step.target {
                // Unchanged values, classified against the full domain of the destination
                Target::Undefined => (values, classify(to, values)?),
                target => from.with_engine(|engine| engine.convert(target, from, to, values))?,
            };
            values = v;
            validity = validity.max(region);
        }
        Ok((values, validity))
    }
}

/// The operation sequence from `src` to `dest`, from the cache of `src` if available
pub(crate) fn opseq(src: &Srf, dest: &Srf) -> Result<Rc<OpSeq>, Error> {
    let cached = src.opseqs.borrow_mut().get(&dest.id()).cloned();
    if let Some(seq) = cached {
        return Ok(seq);
    }
    let seq = Rc::new(resolve(src, dest)?);
    debug!(
        "Resolved {:?} -> {:?}: {:?}",
        src.template(),
        dest.template(),
        seq.steps.iter().map(|s| s.target).collect::<Vec<_>>()
    );
    src.opseqs.borrow_mut().insert(dest.id(), seq.clone());
    Ok(seq)
}

/// Convert `values` from `src` to `dest`
pub(crate) fn convert(src: &Srf, dest: &Srf, values: [f64; 3]) -> Result<([f64; 3], Validity), Error> {
    opseq(src, dest)?.execute(src, dest, values)
}

/// The shortest chain of templates from `from` to `to`, endpoints included,
/// with at least one step, and only CC/CD in the interior
fn route(from: SrfTemplate, to: SrfTemplate) -> Result<Vec<SrfTemplate>, Error> {
    let mut previous: BTreeMap<SrfTemplate, SrfTemplate> = BTreeMap::new();
    let mut queue = VecDeque::from([from]);

    while let Some(node) = queue.pop_front() {
        if node != from && node != SrfTemplate::Celestiocentric && node != SrfTemplate::Celestiodetic {
            continue;
        }
        for target in reachable(node) {
            let Target::Template(next) = *target else {
                continue;
            };
            // Datum shifts are handled separately
            if next == node {
                continue;
            }
            if next == to {
                let mut path = vec![to, node];
                let mut current = node;
                while current != from {
                    current = previous[&current];
                    path.push(current);
                }
                path.reverse();
                return Ok(path);
            }
            if next != from && !previous.contains_key(&next) {
                previous.insert(next, node);
                queue.push_back(next);
            }
        }
    }
    Err(Error::InvalidTargetSrf(format!("no conversion path from {from:?} to {to:?}")))
}

/// Turn a chain of templates into steps, with the interior nodes taken from
/// the interim SRFs of `src`, for the given ORM and HSR
fn steps(
    src: &Srf,
    templates: &[SrfTemplate],
    first: Node,
    last: Node,
    orm: OrmCode,
    hsr: HsrCode,
) -> Result<Vec<Step>, Error> {
    let mut nodes = vec![first];
    for template in &templates[1..templates.len() - 1] {
        nodes.push(Node::Interim(src.interim(*template, orm, hsr)?));
    }
    nodes.push(last);
    Ok(nodes
        .windows(2)
        .zip(&templates[1..])
        .map(|(pair, template)| Step {
            from: pair[0].clone(),
            to: pair[1].clone(),
            target: Target::Template(*template),
        })
        .collect())
}

fn resolve(src: &Srf, dest: &Srf) -> Result<OpSeq, Error> {
    use SrfTemplate::Celestiocentric as CC;

    if src.id() == dest.id() || src.same_definition(dest) {
        return Ok(OpSeq {
            steps: vec![Step {
                from: Node::Source,
                to: Node::Destination,
                target: Target::Undefined,
            }],
        });
    }

    if src.orm().reference() != dest.orm().reference() {
        return Err(Error::InvalidTargetSrf(format!(
            "{:?} and {:?} belong to different bodies",
            src.orm(),
            dest.orm()
        )));
    }

    // Same ORM and HSR: a plain walk through the template graph
    if src.orm() == dest.orm() && src.hsr() == dest.hsr() {
        let templates = route(src.template(), dest.template())?;
        let steps = steps(src, &templates, Node::Source, Node::Destination, src.orm(), src.hsr())?;
        return Ok(OpSeq { steps });
    }

    // Different ORM or HSR: up to celestiocentric, shift, and down again
    let mut all = Vec::new();
    let source_cc = if src.template() == CC {
        Node::Source
    } else {
        let cc = Node::Interim(src.interim(CC, src.orm(), src.hsr())?);
        let up = route(src.template(), CC)?;
        all.extend(steps(src, &up, Node::Source, cc.clone(), src.orm(), src.hsr())?);
        cc
    };

    let target_cc = if dest.template() == CC {
        Node::Destination
    } else {
        Node::Interim(src.interim(CC, dest.orm(), dest.hsr())?)
    };
    all.push(Step {
        from: source_cc,
        to: target_cc.clone(),
        target: Target::Template(CC),
    });

    if dest.template() != CC {
        let down = route(CC, dest.template())?;
        all.extend(steps(src, &down, target_cc, Node::Destination, dest.orm(), dest.hsr())?);
    }
    Ok(OpSeq { steps: all })
}

// ----- Tests ---------------------------------------------------------------------

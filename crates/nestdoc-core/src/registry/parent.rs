use crate::{
    error::{Error, ErrorOrigin},
    model::entity::{EntityRef, ParentReference, ParentTarget},
    registry::{MetadataRegistry, TypeMapper},
    traits::EntityKind,
};
use std::{any::TypeId, collections::HashSet};

///
/// ParentSegment
///
/// One resolved ancestor: the collection it lives in and the field on the
/// child holding its id.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ParentSegment {
    pub collection: &'static str,
    pub local_field: &'static str,
}

/// Ordered ancestor segments for a mapped type, outermost first.
#[must_use]
pub fn resolve_parent_chain<E>(mapper: &TypeMapper<E>) -> &[ParentSegment] {
    mapper.parents()
}

// Turn declared parent references into segments, building mapped parents'
// mappers through the registry.
pub(super) fn resolve_parent_segments(
    registry: &MetadataRegistry,
    entity_path: &'static str,
    parents: &[ParentReference],
) -> Result<Vec<ParentSegment>, Error> {
    parents
        .iter()
        .map(|parent| {
            let collection = match parent.target {
                ParentTarget::Collection(name) if name.is_empty() => {
                    return Err(Error::declaration(
                        ErrorOrigin::Registry,
                        format!(
                            "empty parent collection for field '{}' on {entity_path}",
                            parent.local_field
                        ),
                    ));
                }
                ParentTarget::Collection(name) => name,
                ParentTarget::Entity(target) => (target.resolve_collection)(registry)?,
            };

            Ok(ParentSegment {
                collection,
                local_field: parent.local_field,
            })
        })
        .collect()
}

///
/// check_parent_cycles
///
/// Walk the declarations reachable through mapped parents and fail if `E`
/// can reach a type that is already on the current trail.
///

pub(super) fn check_parent_cycles<E: EntityKind>() -> Result<(), Error> {
    let mut walk = CycleWalk::default();

    walk.visit(EntityRef::of::<E>())
}

#[derive(Default)]
struct CycleWalk {
    trail: Vec<EntityRef>,
    done: HashSet<TypeId>,
}

impl CycleWalk {
    fn visit(&mut self, node: EntityRef) -> Result<(), Error> {
        if self.done.contains(&node.type_id) {
            return Ok(());
        }

        if let Some(start) = self.trail.iter().position(|seen| *seen == node) {
            let mut cycle: Vec<_> = self.trail[start..].iter().map(|seen| seen.path).collect();
            cycle.push(node.path);

            return Err(Error::parent_cycle(cycle));
        }

        self.trail.push(node);
        for parent in node.describe().parents {
            if let ParentTarget::Entity(target) = parent.target {
                self.visit(target)?;
            }
        }
        self.trail.pop();
        self.done.insert(node.type_id);

        Ok(())
    }
}

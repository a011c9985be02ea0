//! [`ProbingEnvironment`] over a built [`Universe`].

use crate::environment::{ElementAdapter, ProbingEnvironment, TreeContext};
use crate::kind::ElementKind;
use crate::node::ElementNode;
use apidelta_model::{AnnotationInstance, DeclId, TypeDatabase, Universe};
use apidelta_signature::{annotation_human_readable, human_readable_decl};
use std::rc::Rc;
use std::sync::Arc;

/// Handles are declaration ids of one universe. A handle is available once
/// the universe holds a declaration for it.
#[derive(Clone, Debug)]
pub struct UniverseEnvironment {
    universe: Arc<Universe>,
}

impl UniverseEnvironment {
    pub fn new(universe: Arc<Universe>) -> Self {
        UniverseEnvironment { universe }
    }

    pub fn universe(&self) -> &Arc<Universe> {
        &self.universe
    }
}

impl ProbingEnvironment for UniverseEnvironment {
    type Handle = DeclId;

    fn is_available(&self, handle: &DeclId) -> bool {
        self.universe.declaration(*handle).is_some()
    }

    fn enclosed_sub_declarations(&self, handle: &DeclId) -> Vec<DeclId> {
        self.universe
            .declaration(*handle)
            .map(|decl| decl.enclosed().to_vec())
            .unwrap_or_default()
    }

    fn attached_annotations(&self, handle: &DeclId) -> Vec<AnnotationInstance> {
        self.universe.annotations(*handle).to_vec()
    }

    fn render_handle(&self, handle: &DeclId) -> String {
        human_readable_decl(&*self.universe, *handle)
    }

    fn render_annotation(&self, annotation: &AnnotationInstance) -> String {
        annotation_human_readable(&*self.universe, annotation)
    }
}

/// Adapts every declaration the universe knows, picking the node category
/// from the declaration kind. Ids without a declaration are declined.
#[derive(Copy, Clone, Debug, Default)]
pub struct DeclarationAdapter;

impl ElementAdapter<UniverseEnvironment> for DeclarationAdapter {
    fn adapt(
        &self,
        raw: &DeclId,
        context: &Rc<TreeContext<UniverseEnvironment>>,
    ) -> Option<Rc<ElementNode<UniverseEnvironment>>> {
        let decl = context.env().universe().declaration(*raw)?;
        Some(ElementNode::new(
            ElementKind::of_declaration(decl),
            context,
            *raw,
        ))
    }
}

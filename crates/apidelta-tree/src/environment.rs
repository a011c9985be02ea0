//! Seams to the frontend: the probing environment that owns handles and
//! the adapter that turns raw sub-declarations into nodes.

use crate::node::ElementNode;
use apidelta_model::AnnotationInstance;
use std::rc::Rc;

/// Per-run view of declaration handles.
///
/// A handle may exist before the frontend has resolved it (probing); until
/// `is_available` reports true, nodes do not materialise children from it.
pub trait ProbingEnvironment {
    type Handle: Clone + std::fmt::Debug;

    fn is_available(&self, handle: &Self::Handle) -> bool;

    /// Structural sub-declarations in the frontend's native order.
    fn enclosed_sub_declarations(&self, handle: &Self::Handle) -> Vec<Self::Handle>;

    fn attached_annotations(&self, handle: &Self::Handle) -> Vec<AnnotationInstance>;

    /// Human-readable signature of the handle.
    fn render_handle(&self, handle: &Self::Handle) -> String;

    /// Human-readable form of an attached annotation.
    fn render_annotation(&self, annotation: &AnnotationInstance) -> String;
}

/// Decides which raw sub-declarations become tree nodes.
pub trait ElementAdapter<E: ProbingEnvironment> {
    /// Build a node for `raw`, or `None` for categories that are not
    /// modelled. The parent link is set by the caller.
    fn adapt(&self, raw: &E::Handle, context: &Rc<TreeContext<E>>) -> Option<Rc<ElementNode<E>>>;
}

/// Everything the nodes of one tree share.
pub struct TreeContext<E: ProbingEnvironment> {
    env: E,
    adapter: Box<dyn ElementAdapter<E>>,
}

impl<E: ProbingEnvironment> TreeContext<E> {
    pub fn new(env: E, adapter: impl ElementAdapter<E> + 'static) -> Rc<Self> {
        Rc::new(TreeContext {
            env,
            adapter: Box::new(adapter),
        })
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    pub(crate) fn adapter(&self) -> &dyn ElementAdapter<E> {
        &*self.adapter
    }
}

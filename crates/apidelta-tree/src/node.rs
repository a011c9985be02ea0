//! Lazily materialised element nodes.

use crate::environment::{ProbingEnvironment, TreeContext};
use crate::kind::ElementKind;
use apidelta_model::AnnotationInstance;
use once_cell::unsync::OnceCell;
use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};
use tracing::{debug, trace};

/// Lifecycle of a node's children.
///
/// ```text
/// Unlinked --get_children, handle unavailable--> PendingHandle
/// Unlinked | PendingHandle --get_children, handle available--> Initialized
/// ```
///
/// `PendingHandle` is not terminal: every later `get_children` retries.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NodeState {
    /// Children never requested.
    Unlinked,
    /// Children requested while the handle was missing or unresolved.
    PendingHandle,
    /// Children materialised; the adapter never runs for this node again.
    Initialized,
}

enum Origin<H> {
    Declaration(RefCell<Option<H>>),
    Annotation(AnnotationInstance),
}

pub struct ElementNode<E: ProbingEnvironment> {
    kind: ElementKind,
    context: Rc<TreeContext<E>>,
    origin: Origin<E::Handle>,
    parent: RefCell<Weak<ElementNode<E>>>,
    /// Keyed by the child's full display string.
    children: RefCell<BTreeMap<String, Rc<ElementNode<E>>>>,
    /// Children whose handles are not available yet, so they have no display
    /// string to be keyed by. Moved into `children` once they resolve.
    unresolved: RefCell<Vec<Rc<ElementNode<E>>>>,
    state: Cell<NodeState>,
    display: OnceCell<String>,
}

impl<E: ProbingEnvironment> ElementNode<E> {
    pub fn new(kind: ElementKind, context: &Rc<TreeContext<E>>, handle: E::Handle) -> Rc<Self> {
        Self::with_origin(
            kind,
            context,
            Origin::Declaration(RefCell::new(Some(handle))),
            NodeState::Unlinked,
        )
    }

    /// A node whose handle the frontend has not produced yet. See
    /// [`attach_handle`](Self::attach_handle).
    pub fn pending(kind: ElementKind, context: &Rc<TreeContext<E>>) -> Rc<Self> {
        Self::with_origin(
            kind,
            context,
            Origin::Declaration(RefCell::new(None)),
            NodeState::Unlinked,
        )
    }

    /// Synthetic child standing for an annotation attached to a declaration.
    pub(crate) fn annotation(context: &Rc<TreeContext<E>>, annotation: AnnotationInstance) -> Rc<Self> {
        Self::with_origin(
            ElementKind::Annotation,
            context,
            Origin::Annotation(annotation),
            NodeState::Initialized,
        )
    }

    fn with_origin(
        kind: ElementKind,
        context: &Rc<TreeContext<E>>,
        origin: Origin<E::Handle>,
        state: NodeState,
    ) -> Rc<Self> {
        Rc::new(ElementNode {
            kind,
            context: Rc::clone(context),
            origin,
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(BTreeMap::new()),
            unresolved: RefCell::new(Vec::new()),
            state: Cell::new(state),
            display: OnceCell::new(),
        })
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn state(&self) -> NodeState {
        self.state.get()
    }

    pub fn context(&self) -> &Rc<TreeContext<E>> {
        &self.context
    }

    pub fn handle(&self) -> Option<E::Handle> {
        match &self.origin {
            Origin::Declaration(handle) => handle.borrow().clone(),
            Origin::Annotation(_) => None,
        }
    }

    pub fn annotation_instance(&self) -> Option<&AnnotationInstance> {
        match &self.origin {
            Origin::Annotation(annotation) => Some(annotation),
            Origin::Declaration(_) => None,
        }
    }

    /// Supply the handle of a pending node. Ignored (returns `false`) once
    /// the children have been materialised or for annotation nodes.
    pub fn attach_handle(&self, handle: E::Handle) -> bool {
        let Origin::Declaration(slot) = &self.origin else {
            return false;
        };
        if self.state.get() == NodeState::Initialized {
            return false;
        }
        *slot.borrow_mut() = Some(handle);
        true
    }

    pub fn parent(&self) -> Option<Rc<Self>> {
        self.parent.borrow().upgrade()
    }

    fn set_parent(&self, parent: &Rc<Self>) {
        *self.parent.borrow_mut() = Rc::downgrade(parent);
    }

    fn available_handle(&self) -> Option<E::Handle> {
        let handle = self.handle()?;
        self.context.env().is_available(&handle).then_some(handle)
    }

    /// Children ordered by their full display strings.
    ///
    /// While the handle is missing or unavailable this returns whatever is
    /// there (normally nothing) and leaves the node retryable. The first
    /// call with an available handle runs the adapter once per structural
    /// sub-declaration and wraps every attached annotation. The adapter
    /// never runs again after that.
    ///
    /// Children whose own handles are still unavailable follow the ordered
    /// ones in adapter order. Each call moves those that have resolved since
    /// into the ordered set.
    pub fn get_children(self: &Rc<Self>) -> Vec<Rc<Self>> {
        if self.state.get() != NodeState::Initialized {
            match self.available_handle() {
                Some(handle) => self.materialize_children(&handle),
                None => {
                    trace!(kind = %self.kind, "children requested before handle is available");
                    self.state.set(NodeState::PendingHandle);
                }
            }
        }

        self.key_resolved_children();

        let mut children: Vec<Rc<Self>> = self.children.borrow().values().cloned().collect();
        children.extend(self.unresolved.borrow().iter().cloned());
        children
    }

    fn materialize_children(self: &Rc<Self>, handle: &E::Handle) {
        let env = self.context.env();
        let adapter = self.context.adapter();

        let mut declined = 0usize;
        for raw in env.enclosed_sub_declarations(handle) {
            match adapter.adapt(&raw, &self.context) {
                Some(child) => self.adopt(child),
                None => declined += 1,
            }
        }

        for annotation in env.attached_annotations(handle) {
            self.adopt(ElementNode::annotation(&self.context, annotation));
        }

        self.state.set(NodeState::Initialized);
        debug!(
            node = %self.full_display_string(),
            children = self.children.borrow().len(),
            unresolved = self.unresolved.borrow().len(),
            declined,
            "materialized children"
        );
    }

    /// Link `child` under this node. A child whose display string is
    /// already present is dropped; a child without one waits in
    /// `unresolved`.
    fn adopt(self: &Rc<Self>, child: Rc<Self>) {
        child.set_parent(self);
        match child.resolved_display() {
            Some(key) => {
                let key = key.to_string();
                self.insert_child(key, child);
            }
            None => self.unresolved.borrow_mut().push(child),
        }
    }

    fn insert_child(&self, key: String, child: Rc<Self>) {
        match self.children.borrow_mut().entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(child);
            }
            Entry::Occupied(slot) => {
                trace!(key = %slot.key(), "dropping child with duplicate display string");
            }
        }
    }

    fn key_resolved_children(&self) {
        if self.unresolved.borrow().is_empty() {
            return;
        }

        let pending = std::mem::take(&mut *self.unresolved.borrow_mut());
        let mut still_unresolved = Vec::new();
        for child in pending {
            match child.resolved_display() {
                Some(key) => {
                    let key = key.to_string();
                    self.insert_child(key, child);
                }
                None => still_unresolved.push(child),
            }
        }
        *self.unresolved.borrow_mut() = still_unresolved;
    }

    /// The cached display string, computing it if the handle is available.
    fn resolved_display(&self) -> Option<&str> {
        if let Some(display) = self.display.get() {
            return Some(display);
        }

        let rendered = match &self.origin {
            Origin::Annotation(annotation) => self.context.env().render_annotation(annotation),
            Origin::Declaration(_) => {
                let handle = self.available_handle()?;
                self.context.env().render_handle(&handle)
            }
        };

        Some(
            self.display
                .get_or_init(|| format!("{} {}", self.kind.label(), rendered)),
        )
    }

    /// Category label followed by the human-readable signature.
    ///
    /// Computed once the handle is available and cached from then on. Before
    /// that, only the label is returned and nothing is cached.
    pub fn full_display_string(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.resolved_display().unwrap_or(self.kind.label()))
    }
}

impl<E: ProbingEnvironment> PartialEq for ElementNode<E> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || self.full_display_string() == other.full_display_string()
    }
}

impl<E: ProbingEnvironment> Eq for ElementNode<E> {}

impl<E: ProbingEnvironment> Hash for ElementNode<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.full_display_string().hash(state);
    }
}

impl<E: ProbingEnvironment> PartialOrd for ElementNode<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E: ProbingEnvironment> Ord for ElementNode<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.full_display_string().cmp(&other.full_display_string())
    }
}

impl<E: ProbingEnvironment> fmt::Display for ElementNode<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_display_string())
    }
}

impl<E: ProbingEnvironment> fmt::Debug for ElementNode<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementNode")
            .field("kind", &self.kind)
            .field("state", &self.state.get())
            .field("display", &self.full_display_string())
            .finish()
    }
}

#[cfg(test)]
#[path = "../tests/node_tests.rs"]
mod tests;

use super::*;
use crate::environment::ElementAdapter;
use apidelta_model::TypeId;
use rustc_hash::{FxHashMap, FxHashSet};

/// Handles are plain numbers; handle 0 is the root.
struct MockEnv {
    available: Cell<bool>,
    /// Handles that stay unavailable even while `available` is set.
    unresolved: RefCell<FxHashSet<u32>>,
    names: FxHashMap<u32, &'static str>,
    children: FxHashMap<u32, Vec<u32>>,
    annotations: FxHashMap<u32, Vec<AnnotationInstance>>,
}

impl MockEnv {
    fn new(available: bool) -> Self {
        let mut names = FxHashMap::default();
        names.insert(0, "com.acme.Foo");
        names.insert(1, "com.acme.Foo.zeta");
        names.insert(2, "com.acme.Foo.alpha");
        names.insert(3, "com.acme.Foo.mid");
        names.insert(4, "com.acme.Foo.skipped");
        names.insert(10, "com.acme.Foo.yankee");
        names.insert(11, "com.acme.Foo.zulu");

        let mut children = FxHashMap::default();
        children.insert(0, vec![1, 4, 2, 3]);

        let mut annotations = FxHashMap::default();
        annotations.insert(0, vec![AnnotationInstance::new(TypeId(100))]);

        MockEnv {
            available: Cell::new(available),
            unresolved: RefCell::new(FxHashSet::default()),
            names,
            children,
            annotations,
        }
    }
}

impl ProbingEnvironment for MockEnv {
    type Handle = u32;

    fn is_available(&self, handle: &u32) -> bool {
        self.available.get() && !self.unresolved.borrow().contains(handle)
    }

    fn enclosed_sub_declarations(&self, handle: &u32) -> Vec<u32> {
        self.children.get(handle).cloned().unwrap_or_default()
    }

    fn attached_annotations(&self, handle: &u32) -> Vec<AnnotationInstance> {
        self.annotations.get(handle).cloned().unwrap_or_default()
    }

    fn render_handle(&self, handle: &u32) -> String {
        self.names.get(handle).copied().unwrap_or("?").to_string()
    }

    fn render_annotation(&self, _annotation: &AnnotationInstance) -> String {
        "@com.acme.Marker".to_string()
    }
}

/// Counts every call and declines handle 4.
struct CountingAdapter {
    calls: Rc<Cell<usize>>,
}

impl ElementAdapter<MockEnv> for CountingAdapter {
    fn adapt(&self, raw: &u32, context: &Rc<TreeContext<MockEnv>>) -> Option<Rc<ElementNode<MockEnv>>> {
        self.calls.set(self.calls.get() + 1);
        if *raw == 4 {
            return None;
        }
        Some(ElementNode::new(ElementKind::Field, context, *raw))
    }
}

fn tree(available: bool) -> (Rc<ElementNode<MockEnv>>, Rc<Cell<usize>>) {
    let calls = Rc::new(Cell::new(0));
    let context = TreeContext::new(
        MockEnv::new(available),
        CountingAdapter {
            calls: Rc::clone(&calls),
        },
    );
    (ElementNode::new(ElementKind::Class, &context, 0), calls)
}

fn displays(nodes: &[Rc<ElementNode<MockEnv>>]) -> Vec<String> {
    nodes.iter().map(|n| n.full_display_string().into_owned()).collect()
}

#[test]
fn test_children_are_ordered_by_display_string() {
    let (root, _) = tree(true);
    assert_eq!(root.state(), NodeState::Unlinked);

    let children = root.get_children();
    assert_eq!(
        displays(&children),
        vec![
            "annotation @com.acme.Marker",
            "field com.acme.Foo.alpha",
            "field com.acme.Foo.mid",
            "field com.acme.Foo.zeta",
        ]
    );
    assert_eq!(root.state(), NodeState::Initialized);
}

#[test]
fn test_get_children_is_idempotent() {
    let (root, calls) = tree(true);

    let first = root.get_children();
    let second = root.get_children();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert!(Rc::ptr_eq(a, b));
    }
    // One call per structural sub-declaration, the declined one included.
    assert_eq!(calls.get(), 4);
}

#[test]
fn test_unavailable_handle_keeps_retrying() {
    let (root, calls) = tree(false);

    assert!(root.get_children().is_empty());
    assert_eq!(root.state(), NodeState::PendingHandle);
    assert!(root.get_children().is_empty());
    assert_eq!(root.state(), NodeState::PendingHandle);
    assert_eq!(calls.get(), 0);

    root.context().env().available.set(true);
    assert_eq!(root.get_children().len(), 4);
    assert_eq!(root.state(), NodeState::Initialized);
    assert_eq!(calls.get(), 4);

    // Once initialized, losing availability changes nothing.
    root.context().env().available.set(false);
    assert_eq!(root.get_children().len(), 4);
    assert_eq!(calls.get(), 4);
}

#[test]
fn test_unresolved_children_are_not_merged_and_get_keyed_later() {
    let calls = Rc::new(Cell::new(0));
    let mut env = MockEnv::new(true);
    env.children.insert(0, vec![10, 11, 2]);
    env.annotations.clear();
    env.unresolved.borrow_mut().extend([10, 11]);
    let context = TreeContext::new(
        env,
        CountingAdapter {
            calls: Rc::clone(&calls),
        },
    );
    let root = ElementNode::new(ElementKind::Class, &context, 0);

    // Both unresolved children only have the label so far; neither is lost.
    assert_eq!(
        displays(&root.get_children()),
        vec!["field com.acme.Foo.alpha", "field", "field"]
    );
    assert_eq!(root.state(), NodeState::Initialized);
    assert_eq!(calls.get(), 3);

    root.context().env().unresolved.borrow_mut().remove(&11);
    assert_eq!(
        displays(&root.get_children()),
        vec!["field com.acme.Foo.alpha", "field com.acme.Foo.zulu", "field"]
    );

    root.context().env().unresolved.borrow_mut().clear();
    let children = root.get_children();
    assert_eq!(
        displays(&children),
        vec![
            "field com.acme.Foo.alpha",
            "field com.acme.Foo.yankee",
            "field com.acme.Foo.zulu",
        ]
    );
    assert_eq!(calls.get(), 3);
    for child in &children {
        let parent = child.parent().expect("parent link");
        assert!(Rc::ptr_eq(&parent, &root));
    }
}

#[test]
fn test_pending_node_receives_its_handle_later() {
    let (root, calls) = tree(true);
    let pending = ElementNode::pending(ElementKind::Class, root.context());

    assert_eq!(pending.full_display_string(), "class");
    assert!(pending.get_children().is_empty());
    assert_eq!(pending.state(), NodeState::PendingHandle);

    assert!(pending.attach_handle(0));
    assert_eq!(pending.full_display_string(), "class com.acme.Foo");
    assert_eq!(pending.get_children().len(), 4);
    assert_eq!(calls.get(), 4);
    assert!(!pending.attach_handle(1));
    assert_eq!(pending.handle(), Some(0));
}

#[test]
fn test_children_link_back_to_parent() {
    let (root, _) = tree(true);
    for child in root.get_children() {
        let parent = child.parent().expect("parent link");
        assert!(Rc::ptr_eq(&parent, &root));
    }
    assert!(root.parent().is_none());
}

#[test]
fn test_annotation_children_are_leaves() {
    let (root, _) = tree(true);
    let children = root.get_children();
    let annotation = children
        .iter()
        .find(|c| c.kind() == ElementKind::Annotation)
        .expect("annotation child");

    assert_eq!(annotation.state(), NodeState::Initialized);
    assert!(annotation.get_children().is_empty());
    assert!(annotation.handle().is_none());
    assert!(annotation.annotation_instance().is_some());
    assert!(!annotation.attach_handle(0));
}

#[test]
fn test_display_string_is_cached_once_available() {
    let (root, _) = tree(true);
    assert_eq!(root.full_display_string(), "class com.acme.Foo");

    root.context().env().available.set(false);
    assert_eq!(root.full_display_string(), "class com.acme.Foo");
    assert_eq!(root.to_string(), "class com.acme.Foo");
}

#[test]
fn test_identity_is_the_display_string() {
    let (old_root, _) = tree(true);
    let (new_root, _) = tree(true);
    assert!(!Rc::ptr_eq(old_root.context(), new_root.context()));

    assert_eq!(old_root.full_display_string(), "class com.acme.Foo");
    assert_eq!(*old_root, *new_root);

    let mut set = FxHashSet::default();
    set.insert(Rc::clone(&old_root));
    assert!(!set.insert(Rc::clone(&new_root)));

    let field = ElementNode::new(ElementKind::Field, old_root.context(), 0);
    assert_ne!(*old_root, *field);
    assert!(*old_root < *field);
}

use apidelta_model::{AnnotationInstance, AnnotationValue, DeclId, TypeDeclKind, TypeId, Universe};
use apidelta_tree::{
    DeclarationAdapter, ElementKind, ElementNode, NodeState, TreeContext, UniverseEnvironment,
};
use rustc_hash::FxHashSet;
use std::rc::Rc;
use std::sync::Arc;

struct Library {
    universe: Arc<Universe>,
    package: DeclId,
    foo: DeclId,
}

/// `com.acme.Foo` with a field, a method `int foo(String a, String b)` and an
/// annotation. `reversed` declares members in the opposite order.
fn library(reversed: bool) -> Library {
    let mut u = Universe::new();
    let package = u.add_package("com.acme");
    let foo = u
        .add_type(TypeDeclKind::Class, "com.acme.Foo", Some(package))
        .unwrap();
    let string = u.types_mut().declared("String", &[]);

    let add_field = |u: &mut Universe| u.add_field(foo, "count", TypeId::INT).unwrap();
    let add_method = |u: &mut Universe| {
        let method = u.add_method(foo, "foo", TypeId::INT).unwrap();
        u.add_parameter(method, "a", string).unwrap();
        u.add_parameter(method, "b", string).unwrap();
    };
    if reversed {
        add_method(&mut u);
        add_field(&mut u);
    } else {
        add_field(&mut u);
        add_method(&mut u);
    }

    let since = u.types_mut().declared("com.acme.Since", &[]);
    u.annotate(
        foo,
        AnnotationInstance::new(since).with_attribute("value", AnnotationValue::string("1.0")),
    )
    .unwrap();

    Library {
        universe: Arc::new(u),
        package,
        foo,
    }
}

fn root(lib: &Library) -> Rc<ElementNode<UniverseEnvironment>> {
    let context = TreeContext::new(
        UniverseEnvironment::new(Arc::clone(&lib.universe)),
        DeclarationAdapter,
    );
    ElementNode::new(ElementKind::Package, &context, lib.package)
}

fn displays(nodes: &[Rc<ElementNode<UniverseEnvironment>>]) -> Vec<String> {
    nodes
        .iter()
        .map(|n| n.full_display_string().into_owned())
        .collect()
}

#[test]
fn test_tree_materializes_from_universe() {
    let lib = library(false);
    let package = root(&lib);
    assert_eq!(package.full_display_string(), "package com.acme");

    let types = package.get_children();
    assert_eq!(displays(&types), vec!["class com.acme.Foo"]);
    assert_eq!(types[0].handle(), Some(lib.foo));

    let members = types[0].get_children();
    assert_eq!(
        displays(&members),
        vec![
            "annotation @com.acme.Since(value = 1.0)",
            "field com.acme.Foo.count",
            "method int com.acme.Foo::foo(String a, String b)",
        ]
    );

    let method = &members[2];
    assert_eq!(
        displays(&method.get_children()),
        vec![
            "parameter int com.acme.Foo::foo(===String a===, String b)",
            "parameter int com.acme.Foo::foo(String a, ===String b===)",
        ]
    );
    assert_eq!(method.state(), NodeState::Initialized);
}

#[test]
fn test_trees_from_two_runs_correlate_by_display_string() {
    let old = library(false);
    let new = library(true);
    let old_root = root(&old);
    let new_root = root(&new);

    let old_foo = old_root.get_children().remove(0);
    let new_foo = new_root.get_children().remove(0);
    assert_eq!(old_foo.full_display_string(), "class com.acme.Foo");
    assert_eq!(old_foo, new_foo);

    let mut seen = FxHashSet::default();
    seen.insert(Rc::clone(&old_foo));
    assert!(seen.contains(&new_foo));

    // Native declaration order differs; the child order does not.
    assert_eq!(
        displays(&old_foo.get_children()),
        displays(&new_foo.get_children())
    );
}

#[test]
fn test_unknown_handle_stays_pending() {
    let lib = library(false);
    let context = TreeContext::new(
        UniverseEnvironment::new(Arc::clone(&lib.universe)),
        DeclarationAdapter,
    );
    let missing = ElementNode::new(ElementKind::Class, &context, DeclId(9_999));

    assert!(missing.get_children().is_empty());
    assert_eq!(missing.state(), NodeState::PendingHandle);
    assert_eq!(missing.full_display_string(), "class");
}

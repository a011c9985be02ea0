//! Two independently built universes describing the same library.

use apidelta_model::{
    AnnotationInstance, AnnotationValue, DeclId, TypeDatabase, TypeDeclKind, TypeId, Universe,
};
use apidelta_signature::{
    SubtypeCalculator, ValueComparator, canonical, human_readable, human_readable_decl, is_equal,
    is_same_type,
};
use rayon::prelude::*;

struct Library {
    universe: Universe,
    list: TypeId,
    sorted: TypeId,
    base: TypeId,
    method: DeclId,
    param: DeclId,
    annotation: AnnotationValue,
}

/// Builds `com.acme` with `Base`, `Sorted<T extends Comparable<T>> extends Base`
/// and `Sorted::insert(List<T> items)`. `padding` shifts every allocated id.
fn library(padding: usize) -> Library {
    let mut u = Universe::new();
    for n in 0..padding {
        u.types_mut().declared(&format!("com.acme.Padding{n}"), &[]);
    }

    let pkg = u.add_package("com.acme");
    let base_decl = u
        .add_type(TypeDeclKind::Class, "com.acme.Base", Some(pkg))
        .unwrap();
    let sorted_decl = u
        .add_type(TypeDeclKind::Class, "com.acme.Sorted", Some(pkg))
        .unwrap();
    let (t_param, t) = u.add_type_parameter(sorted_decl, "T").unwrap();
    let comparable = u.types_mut().declared("java.lang.Comparable", &[t]);
    u.set_type_parameter_bounds(t_param, &[comparable]).unwrap();

    let base = u.declared_type(base_decl).unwrap();
    let sorted = u.declared_type(sorted_decl).unwrap();
    u.add_supertypes(sorted, &[base]);

    let list = u.types_mut().declared("java.util.List", &[t]);
    let method = u.add_method(sorted_decl, "insert", TypeId::BOOLEAN).unwrap();
    let param = u.add_parameter(method, "items", list).unwrap();

    let retention = u.types_mut().declared("com.acme.Retention", &[]);
    let annotation = AnnotationValue::Annotation(
        AnnotationInstance::new(retention)
            .with_attribute("types", AnnotationValue::Array(vec![AnnotationValue::Type(list)]))
            .with_attribute("since", AnnotationValue::int(3)),
    );

    Library {
        universe: u,
        list,
        sorted,
        base,
        method,
        param,
        annotation,
    }
}

#[test]
fn test_structurally_identical_libraries_render_identically() {
    let old = library(0);
    let new = library(5);
    assert_ne!(old.list, new.list);

    for (a, b) in [(old.list, new.list), (old.sorted, new.sorted), (old.base, new.base)] {
        assert!(is_same_type(&old.universe, a, &new.universe, b));
        assert_eq!(
            human_readable(&old.universe, a),
            human_readable(&new.universe, b)
        );
    }
    assert_eq!(
        canonical(&old.universe, old.sorted),
        "com.acme.Sorted<java.lang.Comparable<%>+>"
    );
    assert_eq!(
        human_readable_decl(&old.universe, old.method),
        human_readable_decl(&new.universe, new.method)
    );
    assert_eq!(
        human_readable_decl(&new.universe, new.param),
        "boolean com.acme.Sorted<T extends java.lang.Comparable<T extends java.lang.Comparable<T>>>::insert(===java.util.List<T> items===)"
    );
    assert_ne!(old.universe.universe_id(), new.universe.universe_id());
}

#[test]
fn test_subtype_and_value_queries_across_runs() {
    let old = library(0);
    let new = library(3);

    let calc = SubtypeCalculator::new(&new.universe);
    assert!(calc.is_subtype(new.sorted, &[old.base], &old.universe));
    assert!(!calc.is_subtype(new.base, &[old.sorted], &old.universe));

    let cmp = ValueComparator::new(&old.universe, &new.universe);
    assert!(cmp.is_equal(&old.annotation, &new.annotation));
}

#[test]
fn test_realised_universes_compare_in_parallel() {
    let old = library(0);
    let new = library(7);
    let pairs: Vec<(TypeId, TypeId)> = (0..64)
        .map(|n| match n % 3 {
            0 => (old.list, new.list),
            1 => (old.sorted, new.sorted),
            _ => (old.base, new.base),
        })
        .collect();

    let all_same = pairs
        .par_iter()
        .all(|&(a, b)| is_same_type(&old.universe, a, &new.universe, b));
    assert!(all_same);

    let equal_values = (0..32)
        .into_par_iter()
        .filter(|_| is_equal(&old.universe, &old.annotation, &new.universe, &new.annotation))
        .count();
    assert_eq!(equal_values, 32);
}

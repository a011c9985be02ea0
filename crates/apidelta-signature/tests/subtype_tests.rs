use super::*;
use apidelta_model::Universe;

struct Hierarchy {
    universe: Universe,
    a: TypeId,
    b: TypeId,
    c: TypeId,
    i: TypeId,
    j: TypeId,
}

/// `C extends B implements I`, `B extends A`, `I extends J`.
fn hierarchy() -> Hierarchy {
    let mut universe = Universe::new();
    let types = universe.types_mut();
    let a = types.declared("com.acme.A", &[]);
    let b = types.declared("com.acme.B", &[]);
    let c = types.declared("com.acme.C", &[]);
    let i = types.declared("com.acme.I", &[]);
    let j = types.declared("com.acme.J", &[]);
    universe.add_supertypes(c, &[b, i]);
    universe.add_supertypes(b, &[a]);
    universe.add_supertypes(i, &[j]);
    Hierarchy {
        universe,
        a,
        b,
        c,
        i,
        j,
    }
}

#[test]
fn test_direct_supertypes_delegate_to_universe() {
    let h = hierarchy();
    let calc = SubtypeCalculator::new(&h.universe);
    assert_eq!(calc.direct_supertypes(h.c), vec![h.b, h.i]);
    assert!(calc.direct_supertypes(h.a).is_empty());
}

#[test]
fn test_super_class_chain_follows_first_supertype() {
    let h = hierarchy();
    let calc = SubtypeCalculator::new(&h.universe);
    assert_eq!(calc.super_class_chain(h.c), vec![h.b, h.a]);
    assert_eq!(calc.super_class_chain(h.i), vec![h.j]);
    assert!(calc.super_class_chain(h.a).is_empty());
}

#[test]
fn test_all_super_types_is_depth_first_closure() {
    let h = hierarchy();
    let calc = SubtypeCalculator::new(&h.universe);
    assert_eq!(calc.all_super_types(h.c), vec![h.b, h.a, h.i, h.j]);
    assert!(calc.all_super_types(h.a).is_empty());
}

#[test]
fn test_is_subtype_is_reflexive() {
    let h = hierarchy();
    let calc = SubtypeCalculator::new(&h.universe);
    for ty in [h.a, h.b, h.c, h.i, h.j, TypeId::INT] {
        assert!(calc.is_subtype(ty, &[ty], &h.universe));
    }
}

#[test]
fn test_is_subtype_follows_class_chain_and_interfaces() {
    let h = hierarchy();
    let calc = SubtypeCalculator::new(&h.universe);
    assert!(calc.is_subtype(h.c, &[h.a], &h.universe));
    assert!(calc.is_subtype(h.c, &[h.j], &h.universe));
    assert!(calc.is_subtype(h.c, &[TypeId::INT, h.j], &h.universe));
    assert!(!calc.is_subtype(h.a, &[h.c], &h.universe));
    assert!(!calc.is_subtype(h.b, &[h.i], &h.universe));
    assert!(!calc.is_subtype(h.c, &[], &h.universe));
}

#[test]
fn test_is_subtype_across_universes() {
    let old = hierarchy();
    let mut new = Universe::new();
    new.types_mut().declared("com.acme.Padding", &[]);
    let new_a = new.types_mut().declared("com.acme.A", &[]);
    let new_i = new.types_mut().declared("com.acme.I", &[]);

    let calc = SubtypeCalculator::new(&old.universe);
    assert!(calc.is_subtype(old.c, &[new_a], &new));
    assert!(calc.is_subtype(old.b, &[new_a], &new));
    assert!(!calc.is_subtype(old.b, &[new_i], &new));
}

#[test]
fn test_diamond_closure_keeps_duplicates_unless_guarded() {
    let mut u = Universe::new();
    let types = u.types_mut();
    let top = types.declared("Top", &[]);
    let left = types.declared("Left", &[]);
    let right = types.declared("Right", &[]);
    let bottom = types.declared("Bottom", &[]);
    u.add_supertypes(left, &[top]);
    u.add_supertypes(right, &[top]);
    u.add_supertypes(bottom, &[left, right]);

    assert_eq!(
        SubtypeCalculator::new(&u).all_super_types(bottom),
        vec![left, top, right, top]
    );
    assert_eq!(
        SubtypeCalculator::with_cycle_guard(&u).all_super_types(bottom),
        vec![left, top, right]
    );
}

#[test]
fn test_cycle_guard_terminates_on_cyclic_graph() {
    let mut u = Universe::new();
    let types = u.types_mut();
    let x = types.declared("X", &[]);
    let y = types.declared("Y", &[]);
    let z = types.declared("Z", &[]);
    u.add_supertypes(x, &[y]);
    u.add_supertypes(y, &[x]);

    let calc = SubtypeCalculator::with_cycle_guard(&u);
    assert_eq!(calc.all_super_types(x), vec![y]);
    assert_eq!(calc.super_class_chain(x), vec![y]);
    assert!(calc.is_subtype(x, &[y], &u));
    assert!(!calc.is_subtype(x, &[z], &u));
}

//! Tests for the bdd module

use super::*;

#[test]
fn test_terminal_nodes() {
    let manager = BddManager::new();
    let t = manager.constant(true);
    let f = manager.constant(false);

    assert!(t.is_true());
    assert!(!t.is_false());
    assert!(f.is_false());
    assert!(!f.is_true());
    assert!(t.is_terminal());
    assert!(f.is_terminal());
}

#[test]
fn test_variable_creation() {
    let manager = BddManager::new();
    let a = manager.var(0);
    let b = manager.var(1);

    assert!(!a.is_terminal());
    assert!(!b.is_terminal());
    assert_ne!(a, b);
    assert_eq!(manager.var_count(), 2);
}

#[test]
fn test_var_count_tracks_highest_index() {
    let manager = BddManager::new();
    assert_eq!(manager.var_count(), 0);

    manager.var(41);
    assert_eq!(manager.var_count(), 42);

    // Allocating a lower index does not shrink the pool
    manager.var(3);
    assert_eq!(manager.var_count(), 42);
}

#[test]
fn test_hash_consing() {
    let manager = BddManager::new();
    let a1 = manager.var(7);
    let a2 = manager.var(7);

    // Same variable index yields the same node
    assert_eq!(a1, a2);
}

#[test]
fn test_and_operation() {
    let manager = BddManager::new();
    let t = manager.constant(true);
    let f = manager.constant(false);
    let a = manager.var(0);
    let b = manager.var(1);

    assert_eq!(a.and(&t), a);
    assert!(a.and(&f).is_false());
    assert_eq!(t.and(&a), a);
    assert!(f.and(&a).is_false());

    let result = a.and(&b);
    assert!(!result.is_terminal());

    // a AND a = a
    assert_eq!(a.and(&a), a);
}

#[test]
fn test_or_operation() {
    let manager = BddManager::new();
    let t = manager.constant(true);
    let f = manager.constant(false);
    let a = manager.var(0);
    let b = manager.var(1);

    assert_eq!(a.or(&f), a);
    assert!(a.or(&t).is_true());
    assert_eq!(f.or(&a), a);
    assert!(t.or(&a).is_true());

    let result = a.or(&b);
    assert!(!result.is_terminal());

    // a OR a = a
    assert_eq!(a.or(&a), a);
}

#[test]
fn test_not_operation() {
    let manager = BddManager::new();
    let t = manager.constant(true);
    let f = manager.constant(false);
    let a = manager.var(0);

    assert!(t.not().is_false());
    assert!(f.not().is_true());

    let not_a = a.not();
    assert!(!not_a.is_terminal());
    assert_eq!(not_a.not(), a);

    // a AND NOT a = false, a OR NOT a = true
    assert!(a.and(&not_a).is_false());
    assert!(a.or(&not_a).is_true());
}

#[test]
fn test_canonicity_of_equivalent_functions() {
    let manager = BddManager::new();
    let a = manager.var(0);
    let b = manager.var(1);

    // De Morgan: NOT (a AND b) = NOT a OR NOT b
    let lhs = a.and(&b).not();
    let rhs = a.not().or(&b.not());
    assert_eq!(lhs, rhs);
}

#[test]
fn test_compose_renames_disjoint_variable() {
    let manager = BddManager::new();
    let a = manager.var(0);
    let b = manager.var(1);
    let z = manager.var(9);

    // f = a AND NOT b, rename b to z
    let f = a.and(&b.not());
    let renamed = f.compose(&z, 1);

    assert_eq!(renamed.support(), vec![0, 9]);
    assert_eq!(renamed, a.and(&z.not()));

    // Renaming back restores the original
    let back = renamed.compose(&b, 9);
    assert_eq!(back, f);
}

#[test]
fn test_compose_with_general_replacement() {
    let manager = BddManager::new();
    let a = manager.var(0);
    let b = manager.var(1);
    let c = manager.var(2);

    // (a AND b)[b := b OR c] = a AND (b OR c)
    let f = a.and(&b);
    let composed = f.compose(&b.or(&c), 1);
    assert_eq!(composed, a.and(&b.or(&c)));
}

#[test]
fn test_compose_of_absent_variable_is_identity() {
    let manager = BddManager::new();
    let a = manager.var(0);
    let z = manager.var(5);

    assert_eq!(a.compose(&z, 3), a);
}

#[test]
fn test_exist_abstract() {
    let manager = BddManager::new();
    let a = manager.var(0);
    let b = manager.var(1);

    // EXISTS b. (a AND b) = a
    let f = a.and(&b);
    assert_eq!(f.exist_abstract(1), a);

    // EXISTS a. (a OR b) = true
    let g = a.or(&b);
    assert!(g.exist_abstract(0).is_true());

    // Abstracting an absent variable is the identity
    assert_eq!(a.exist_abstract(7), a);
}

#[test]
fn test_exist_abstract_removes_from_support() {
    let manager = BddManager::new();
    let a = manager.var(0);
    let b = manager.var(1);
    let c = manager.var(2);

    let f = a.and(&b).and(&c);
    let g = f.exist_abstract(1);
    assert_eq!(g.support(), vec![0, 2]);
}

#[test]
fn test_node_count() {
    let manager = BddManager::new();
    let t = manager.constant(true);
    assert_eq!(t.node_count(), 1);

    let a = manager.var(0);
    // One decision node plus two terminals
    assert_eq!(a.node_count(), 3);
}

#[test]
fn test_support() {
    let manager = BddManager::new();
    let t = manager.constant(true);
    assert!(t.support().is_empty());

    let a = manager.var(2);
    let b = manager.var(5);
    assert_eq!(a.and(&b).support(), vec![2, 5]);
}

#[test]
fn test_cubes_of_constants() {
    let manager = BddManager::new();
    manager.var(1);

    assert!(manager.constant(false).cubes().is_empty());

    let cubes = manager.constant(true).cubes();
    assert_eq!(cubes, vec![vec![None, None]]);
}

#[test]
fn test_cubes_fix_path_variables_only() {
    let manager = BddManager::new();
    let a = manager.var(0);
    let b = manager.var(1);
    let c = manager.var(2);

    let f = a.and(&c);
    let cubes = f.cubes();
    assert_eq!(cubes, vec![vec![Some(true), None, Some(true)]]);

    // a XOR b has two disjoint cubes
    let xor = a.and(&b.not()).or(&a.not().and(&b));
    let mut cubes = xor.cubes();
    cubes.sort();
    assert_eq!(
        cubes,
        vec![
            vec![Some(false), Some(true), None],
            vec![Some(true), Some(false), None],
        ]
    );
}

#[test]
fn test_image_round_trip() {
    let manager = BddManager::new();
    let a = manager.var(0);
    let b = manager.var(3);
    let f = a.and(&b.not()).or(&a.not().and(&b));

    let mut image = Vec::new();
    f.write_image(&mut image).unwrap();

    // Reload into a fresh manager: same function over the same indices
    let other = BddManager::new();
    let g = other.read_image(&mut image.as_slice()).unwrap();
    assert_eq!(g.support(), f.support());
    assert_eq!(g.cubes(), f.cubes());
    assert_eq!(other.var_count(), manager.var_count());

    // Reload into the original manager: canonicity collapses to the same root
    let h = manager.read_image(&mut image.as_slice()).unwrap();
    assert_eq!(h, f);
}

#[test]
fn test_image_round_trip_of_terminal() {
    let manager = BddManager::new();
    let t = manager.constant(true);

    let mut image = Vec::new();
    t.write_image(&mut image).unwrap();

    let other = BddManager::new();
    let g = other.read_image(&mut image.as_slice()).unwrap();
    assert!(g.is_true());
}

#[test]
fn test_image_rejects_bad_magic() {
    let manager = BddManager::new();
    let bogus = b"NOPE\x01\x00\x00\x00";
    assert!(manager.read_image(&mut bogus.as_slice()).is_err());
}

#[test]
fn test_dot_output_shape() {
    let manager = BddManager::new();
    let a = manager.var(0);
    let b = manager.var(1);
    let f = a.and(&b);

    let mut out = Vec::new();
    f.write_dot(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.starts_with("digraph bdd {"));
    assert!(text.contains("label=\"x0\""));
    assert!(text.contains("label=\"x1\""));
    assert!(text.contains("style=dashed"));
    assert!(text.trim_end().ends_with('}'));
}

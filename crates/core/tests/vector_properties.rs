//! Algebraic properties of the vector library that the steering math
//! depends on.

use approx::assert_relative_eq;
use flock_sim_core::Vec3;

#[test]
fn test_normalized_vectors_have_unit_length() {
    let samples = [
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(-3.0, 4.0, 12.0),
        Vec3::new(0.01, -0.02, 0.03),
        Vec3::new(250.0, -125.0, 62.5),
    ];
    for v in samples {
        let unit = v.normalized().expect("sample vectors are nonzero");
        assert_relative_eq!(unit.length(), 1.0, epsilon = 1e-5);
    }
}

#[test]
fn test_zero_vector_has_no_direction() {
    assert!(Vec3::ZERO.normalized().is_none());
    // Sub-epsilon vectors count as zero rather than dividing by almost-zero.
    assert!(Vec3::new(1e-10, 0.0, 0.0).normalized().is_none());
}

#[test]
fn test_distance_is_symmetric_and_zero_on_self() {
    let a = Vec3::new(1.0, -2.0, 3.5);
    let b = Vec3::new(-4.0, 0.25, 9.0);
    assert_eq!(a.distance(b), b.distance(a));
    assert_eq!(a.distance(a), 0.0);
}

#[test]
fn test_cross_antisymmetry_and_dot_symmetry() {
    let a = Vec3::new(2.0, -1.0, 0.5);
    let b = Vec3::new(-0.25, 3.0, 1.0);
    assert_eq!(a.cross(b), -b.cross(a));
    assert_eq!(a.dot(b), b.dot(a));
}

#[test]
fn test_cross_is_orthogonal_to_operands() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(-2.0, 0.5, 4.0);
    let c = a.cross(b);
    assert_relative_eq!(c.dot(a), 0.0, epsilon = 1e-5);
    assert_relative_eq!(c.dot(b), 0.0, epsilon = 1e-5);
}

#[test]
fn test_negation_reverses_direction_preserves_length() {
    let v = Vec3::new(3.0, -4.0, 5.0);
    assert_eq!((-v).length(), v.length());
    assert_eq!(v + -v, Vec3::ZERO);
}

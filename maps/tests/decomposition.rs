use std::sync::Arc;

use proptest::prelude::*;
use vf::assert_approx_eq;
use vf::math::{ApproxEq, Mat3, Mat4, Vec3, vec3};
use voxform_maps::{
    AffineMap, Map, ScaleMap, UnitaryMap, approx_inverse,
    create_fully_decomposed_map, create_polar_decomposed_map,
    create_symmetric_map, simplify,
};

const EPS: f64 = 1e-9;

fn sample_points() -> [Vec3; 5] {
    [
        Vec3::zero(),
        vec3(1.0, 0.0, 0.0),
        vec3(0.0, 1.0, 0.0),
        vec3(-3.5, 2.0, 7.25),
        vec3(100.0, -40.0, 0.5),
    ]
}

fn element() -> impl Strategy<Value = f64> {
    -5.0f64..5.0
}

fn vector() -> impl Strategy<Value = Vec3> {
    [element(), element(), element()].prop_map(Vec3::new)
}

fn invertible_mat3() -> impl Strategy<Value = Mat3> {
    [
        [element(), element(), element()],
        [element(), element(), element()],
        [element(), element(), element()],
    ]
    .prop_map(Mat3::new)
    .prop_filter("near-singular", |m| m.determinant().abs() > 0.5)
}

fn symmetric_mat3() -> impl Strategy<Value = Mat3> {
    [element(), element(), element(), element(), element(), element()]
        .prop_map(|[a, b, c, d, e, f]| {
            Mat3::new([[a, b, c], [b, d, e], [c, e, f]])
        })
        .prop_filter("near-singular", |m| m.determinant().abs() > 0.5)
}

fn nonzero_scale() -> impl Strategy<Value = f64> {
    prop_oneof![0.25f64..5.0, -5.0f64..-0.25]
}

proptest! {
    #[test]
    fn symmetric_map_applies_matrix(m in symmetric_mat3(), v in vector()) {
        let sym = create_symmetric_map(&m).unwrap();
        prop_assert!(sym.apply_map(&v).approx_eq_eps(&m.apply(&v), &EPS));
    }

    #[test]
    fn polar_factors_are_unitary_and_symmetric(m in invertible_mat3()) {
        let polar = create_polar_decomposed_map(&m).unwrap();

        let u = *polar.second_map().matrix();
        let s = polar.first_map().to_affine().mat3();

        prop_assert!((u * u.transpose()).approx_eq_eps(&Mat3::identity(), &EPS));
        prop_assert!(s.approx_eq_eps(&s.transpose(), &EPS));
        // Row vectors: scale first, then rotate
        prop_assert!((s * u).approx_eq_eps(&m, &EPS));
    }

    #[test]
    fn full_decomposition_reproduces_affine(
        linear in invertible_mat3(),
        translation in vector(),
    ) {
        let m = Mat4::from_mat3_translation(&linear, &translation);
        let full = create_fully_decomposed_map(&m).unwrap();

        for p in sample_points() {
            prop_assert!(full.apply_map(&p).approx_eq_eps(&m.apply_point(&p), &EPS));
            prop_assert!(full.apply_inverse_map(&full.apply_map(&p)).approx_eq_eps(&p, &EPS));
        }
    }

    #[test]
    fn simplify_is_idempotent(
        scale in [nonzero_scale(), nonzero_scale(), nonzero_scale()],
        translation in vector(),
    ) {
        let m = Mat4::from_mat3_translation(
            &Mat3::from_diagonal(&Vec3::new(scale)),
            &translation,
        );
        let once = simplify(Arc::new(AffineMap::new(m).unwrap()));
        let twice = simplify(Arc::new(AffineMap::from_map(&once).unwrap()));

        prop_assert_eq!(once.map_type(), twice.map_type());
        for p in sample_points() {
            prop_assert!(once.apply_map(&p).approx_eq_eps(&m.apply_point(&p), &EPS));
            prop_assert!(twice.apply_map(&p).approx_eq_eps(&once.apply_map(&p), &EPS));
        }
    }

    #[test]
    fn approx_inverse_of_invertible_is_exact(
        linear in invertible_mat3(),
        translation in vector(),
    ) {
        let m = Mat4::from_mat3_translation(&linear, &translation);
        let inv = approx_inverse(&m);
        prop_assert!((m * inv).approx_eq_eps(&Mat4::identity(), &EPS));
    }

    #[test]
    fn approx_inverse_twice_restores_singular_symmetric(
        a in nonzero_scale(),
        b in nonzero_scale(),
        angle in -3.0f64..3.0,
        translation in vector(),
    ) {
        // Rank two, with the null space exactly along z
        let q = *UnitaryMap::from_axis_angle(&vec3(0.0, 0.0, 1.0), angle)
            .unwrap()
            .matrix();
        let linear = q * Mat3::from_diagonal(&vec3(a, b, 0.0)) * q.transpose();
        let m = Mat4::from_mat3_translation(&linear, &translation);

        let twice = approx_inverse(&approx_inverse(&m));
        prop_assert!(twice.mat3().approx_eq_eps(&linear, &EPS));
    }

    #[test]
    fn approx_inverse_never_panics(
        linear in [[element(), element(), element()],
                   [element(), element(), element()],
                   [element(), element(), element()]],
        rank_one in vector(),
    ) {
        let _ = approx_inverse(&Mat4::from_mat3_translation(
            &Mat3::new(linear), &Vec3::zero(),
        ));
        // Outer products u ⊗ v are singular and generally non-symmetric
        let [x, y, z] = rank_one.0;
        let singular = Mat3::new([
            [x, 2.0 * x, -x],
            [y, 2.0 * y, -y],
            [z, 2.0 * z, -z],
        ]);
        let inv = approx_inverse(&Mat4::from_mat3_translation(&singular, &rank_one));
        prop_assert!(inv.is_affine());
    }
}

#[test]
fn non_symmetric_matrix_is_rejected() {
    let m = Mat3::new([[0.0, 1.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]]);
    assert!(create_symmetric_map(&m).is_err());
}

#[test]
fn non_affine_matrix_is_rejected() {
    let mut m = Mat4::identity();
    m[3] = [1.0, 2.0, 3.0, 2.0];
    assert!(create_fully_decomposed_map(&m).is_err());

    let mut m = Mat4::identity();
    m[1][3] = 1.0;
    assert!(create_fully_decomposed_map(&m).is_err());
}

#[test]
fn uniform_scale_simplifies_to_uniform_scale_map() {
    let m = Mat4::from_mat3_translation(&(Mat3::identity() * 2.0), &Vec3::zero());
    let simplified = simplify(Arc::new(AffineMap::new(m).unwrap()));

    assert_eq!(simplified.map_type(), "UniformScaleMap");
    assert!(simplified.is_scale());
}

#[test]
fn principal_scale_carries_determinant() {
    let m = Mat4::from_mat3_translation(
        &Mat3::new([[2.0, 1.0, 0.0], [1.0, 3.0, 0.0], [0.0, 0.0, 1.0]]),
        &vec3(1.0, 2.0, 3.0),
    );
    let full = create_fully_decomposed_map(&m).unwrap();
    let scale: ScaleMap = *full.first_map().first_map().second_map();

    assert_approx_eq!(scale.determinant(), 5.0);
    assert_approx_eq!(full.determinant(), 5.0);
}

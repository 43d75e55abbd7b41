use approx::assert_abs_diff_eq;
use nme_core::{BoundingBox, Validate};
use nme_geometry::nurbs::{clamped_knots, uniform_knots};
use nme_geometry::{
    basis, create_cone, create_cylinder, create_plane, create_sphere, create_torus,
    evaluate_curve, evaluate_surface, tessellate, NurbsCurve, NurbsSurface,
};
use nme_math::{dvec3, ControlPoint};

fn primitives() -> Vec<(&'static str, NurbsSurface)> {
    vec![
        ("plane", create_plane(3.0, 2.0).unwrap()),
        ("sphere", create_sphere(1.0).unwrap()),
        ("cylinder", create_cylinder(1.0, 2.0).unwrap()),
        ("cone", create_cone(1.0, 0.25, 2.0).unwrap()),
        ("torus", create_torus(2.0, 0.5).unwrap()),
    ]
}

#[test]
fn test_partition_of_unity_over_domain() {
    for (degree, count) in [(1, 2), (2, 5), (3, 4), (3, 9), (4, 7)] {
        let knots = clamped_knots(degree, count).unwrap();
        for k in 0..=200 {
            let t = k as f64 / 200.0;
            let sum: f64 = (0..count).map(|i| basis(i, degree, t, &knots)).sum();
            assert_abs_diff_eq!(sum, 1.0, epsilon = 1e-9);
        }
    }

    let knots = uniform_knots(3, 8).unwrap();
    let (lo, hi) = (knots[3], knots[8]);
    for k in 0..100 {
        let t = lo + (hi - lo) * k as f64 / 100.0;
        let sum: f64 = (0..8).map(|i| basis(i, 3, t, &knots)).sum();
        assert_abs_diff_eq!(sum, 1.0, epsilon = 1e-9);
    }
}

#[test]
fn test_curve_endpoint_interpolation() {
    let knots = clamped_knots(3, 6).unwrap();
    let points: Vec<_> = (0..6)
        .map(|i| {
            let f = i as f64;
            ControlPoint::new(dvec3(f.sin() * 3.0, f * 0.5, f.cos()), 0.5 + f * 0.25)
        })
        .collect();
    let curve = NurbsCurve::try_from_parts(3, knots, points.clone()).unwrap();

    let start = evaluate_curve(&curve, 0.0);
    assert_abs_diff_eq!((start - points[0].position).length(), 0.0, epsilon = 1e-10);

    let near_end = evaluate_curve(&curve, 1.0 - 1e-9);
    assert_abs_diff_eq!((near_end - points[5].position).length(), 0.0, epsilon = 1e-6);

    let end = evaluate_curve(&curve, 1.0);
    assert_abs_diff_eq!((end - points[5].position).length(), 0.0, epsilon = 1e-10);
}

#[test]
fn test_degree_one_midpoint() {
    let curve = NurbsCurve::try_from_parts(
        1,
        vec![0.0, 0.0, 1.0, 1.0],
        vec![
            ControlPoint::unit(dvec3(0.0, 0.0, 0.0)),
            ControlPoint::unit(dvec3(2.0, 0.0, 0.0)),
        ],
    )
    .unwrap();
    assert_eq!(evaluate_curve(&curve, 0.5), dvec3(1.0, 0.0, 0.0));
}

#[test]
fn test_plane_center() {
    let plane = create_plane(4.0, 6.0).unwrap();
    let (min, max) = plane.bounding_box();
    assert_eq!(min, dvec3(-2.0, 0.0, -3.0));
    assert_eq!(max, dvec3(2.0, 0.0, 3.0));
    assert_eq!(evaluate_surface(&plane, 0.5, 0.5).position, dvec3(0.0, 0.0, 0.0));
}

#[test]
fn test_sphere_samples_on_radius() {
    let sphere = create_sphere(2.5).unwrap();
    let mesh = tessellate(&sphere, 20, 20);
    for p in mesh.positions() {
        assert!((p.length() - 2.5).abs() < 0.025, "sample {p:?}");
    }
}

#[test]
fn test_primitive_tessellation_indices() {
    for (name, surface) in primitives() {
        assert!(surface.is_valid(), "{name} invalid");
        for (ru, rv) in [(2, 2), (20, 20), (7, 31)] {
            let mesh = tessellate(&surface, ru, rv);
            assert_eq!(mesh.triangle_count(), (ru - 1) * (rv - 1) * 2, "{name}");
            assert!(
                mesh.indices.iter().all(|&i| (i as usize) < ru * rv),
                "{name} index out of range"
            );
            assert!(mesh.points.iter().all(|p| (p.normal.length() - 1.0).abs() < 1e-9));
        }
    }
}

#[test]
fn test_cached_tessellation_is_idempotent() {
    for (name, mut surface) in primitives() {
        let first = surface.tessellation(20, 20).clone();
        let second = surface.tessellation(20, 20).clone();
        assert_eq!(first, second, "{name}");
        assert_eq!(first, tessellate(&surface, 20, 20), "{name}");
    }
}

#[test]
fn test_edit_invalidates_cache() {
    let mut sphere = create_sphere(1.0).unwrap();
    let before = sphere.tessellation(10, 10).clone();
    let mut cp = *sphere.control_point(3, 2).unwrap();
    cp.position *= 2.0;
    assert!(sphere.set_control_point(3, 2, cp));
    assert!(sphere.is_dirty());
    let after = sphere.tessellation(10, 10).clone();
    assert_ne!(before, after);
}

use approx::assert_abs_diff_eq;
use nme_geometry::{create_cylinder, create_plane, create_sphere, create_torus};
use nme_math::{dvec3, Ray, Transform};
use nme_mesh::{intersect, pick};

#[test]
fn test_ray_sphere_distance() {
    let sphere = create_sphere(1.0).unwrap();
    let result = intersect(dvec3(0.0, 0.0, 5.0), dvec3(0.0, 0.0, -1.0), &sphere);
    assert!(result.hit);
    assert_abs_diff_eq!(result.distance, 4.0, epsilon = 0.05);
    assert_abs_diff_eq!(result.point.z, 1.0, epsilon = 0.05);
    assert!(result.normal.z > 0.9, "normal {:?}", result.normal);
}

#[test]
fn test_unnormalized_direction_reports_world_distance() {
    let sphere = create_sphere(1.0).unwrap();
    let result = intersect(dvec3(0.0, 0.0, 5.0), dvec3(0.0, 0.0, -10.0), &sphere);
    assert!(result.hit);
    assert_abs_diff_eq!(result.distance, 4.0, epsilon = 0.05);
}

#[test]
fn test_ray_misses_sphere() {
    let sphere = create_sphere(1.0).unwrap();
    let result = intersect(dvec3(3.0, 0.0, 5.0), dvec3(0.0, 0.0, -1.0), &sphere);
    assert!(!result.hit);
    assert_eq!(result.distance, f64::INFINITY);
}

#[test]
fn test_torus_hole_and_ring() {
    let torus = create_torus(2.0, 0.5).unwrap();
    let through_hole = intersect(dvec3(0.0, 5.0, 0.0), dvec3(0.0, -1.0, 0.0), &torus);
    assert!(!through_hole.hit);

    let ring = intersect(dvec3(1.9, 5.0, 0.3), dvec3(0.0, -1.0, 0.0), &torus);
    assert!(ring.hit);
    let radial = (1.9_f64 * 1.9 + 0.3 * 0.3).sqrt();
    let top = (0.25 - (radial - 2.0).powi(2)).sqrt();
    assert_abs_diff_eq!(ring.distance, 5.0 - top, epsilon = 0.02);
}

#[test]
fn test_cylinder_side_hit() {
    let cylinder = create_cylinder(1.0, 2.0).unwrap();
    let result = intersect(dvec3(5.0, 0.3, 0.2), dvec3(-1.0, 0.0, 0.0), &cylinder);
    assert!(result.hit);
    let surface_x = (1.0_f64 - 0.04).sqrt();
    assert_abs_diff_eq!(result.distance, 5.0 - surface_x, epsilon = 0.01);
}

#[test]
fn test_intersection_leaves_render_cache_alone() {
    let mut sphere = create_sphere(1.0).unwrap();
    sphere.tessellation(20, 20);
    let result = intersect(dvec3(0.0, 0.0, 5.0), dvec3(0.0, 0.0, -1.0), &sphere);
    assert!(result.hit);
    assert!(!sphere.is_dirty());
    assert_eq!(sphere.cached_tessellation().unwrap().resolution(), (20, 20));
}

#[test]
fn test_pick_front_most_object() {
    let mut floor = create_plane(10.0, 10.0).unwrap();
    floor.transform(&Transform::from_translation(dvec3(0.0, -1.0, 0.0)));
    let mut ball = create_sphere(1.0).unwrap();
    ball.transform(&Transform::from_translation(dvec3(0.0, 1.0, 0.0)));
    let scene = vec![floor, ball];

    let ray = Ray::new(dvec3(0.05, 10.0, 0.1), dvec3(0.0, -1.0, 0.0));
    let (index, hit) = pick(&ray, &scene, 50).unwrap();
    assert_eq!(index, 1);
    assert_abs_diff_eq!(hit.distance, 8.0, epsilon = 0.05);

    let ray = Ray::new(dvec3(4.0, 10.0, 4.1), dvec3(0.0, -1.0, 0.0));
    let (index, hit) = pick(&ray, &scene, 50).unwrap();
    assert_eq!(index, 0);
    assert_abs_diff_eq!(hit.distance, 11.0, epsilon = 1e-9);
}

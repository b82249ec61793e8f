use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use far_west::entities::Direction;
use far_west::geometry::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn angles_follow_screen_coordinates() {
    assert!(close(angle_between_points(0.0, 0.0, 10.0, 0.0), 0.0));
    // y grows downward, so "below" is a positive angle.
    assert!(close(angle_between_points(0.0, 0.0, 0.0, 10.0), FRAC_PI_2));
    assert!(close(angle_between_points(0.0, 0.0, 0.0, -10.0), -FRAC_PI_2));
    assert!(close(angle_between_points(5.0, 5.0, -5.0, 5.0), PI));
    assert!(close(angle_between_points(0.0, 0.0, 1.0, 1.0), FRAC_PI_4));
}

#[test]
fn distance_is_euclidean() {
    assert_eq!(distance_between_points(0.0, 0.0, 3.0, 4.0), 5.0);
    assert_eq!(distance_between_points(3.0, 4.0, 0.0, 0.0), 5.0);
    assert_eq!(distance_between_points(7.0, 7.0, 7.0, 7.0), 0.0);
}

#[test]
fn cardinal_buckets_centre_on_the_axes() {
    assert_eq!(cardinal_from_angle(0.0), Direction::Right);
    assert_eq!(cardinal_from_angle(FRAC_PI_2), Direction::Down);
    assert_eq!(cardinal_from_angle(-FRAC_PI_2), Direction::Up);
    assert_eq!(cardinal_from_angle(PI), Direction::Left);
    assert_eq!(cardinal_from_angle(-PI), Direction::Left);
}

#[test]
fn cardinal_bucket_edges_belong_to_the_clockwise_side() {
    assert_eq!(cardinal_from_angle(FRAC_PI_4), Direction::Right);
    assert_eq!(cardinal_from_angle(3.0 * FRAC_PI_4), Direction::Down);
    assert_eq!(cardinal_from_angle(-FRAC_PI_4), Direction::Up);
    assert_eq!(cardinal_from_angle(-3.0 * FRAC_PI_4), Direction::Left);
}

#[test]
fn cardinal_wraps_large_angles() {
    assert_eq!(cardinal_from_angle(2.0 * PI), Direction::Right);
    assert_eq!(cardinal_from_angle(2.0 * PI + FRAC_PI_2), Direction::Down);
    assert_eq!(cardinal_from_angle(-2.0 * PI - FRAC_PI_2), Direction::Up);
}

#[test]
fn axes_list_their_directions() {
    assert_eq!(Axis::Horizontal.directions(), [Direction::Left, Direction::Right]);
    assert_eq!(Axis::Vertical.directions(), [Direction::Up, Direction::Down]);
    assert!(Axis::Vertical.contains(Direction::Down));
    assert!(!Axis::Vertical.contains(Direction::Left));
    assert!(!Axis::Horizontal.contains(Direction::RightUp));
}

#[test]
fn dodge_axis_is_perpendicular_to_the_threat() {
    // Bullet to the left of the actor, flying right.
    assert_eq!(dodge_axis(0.0), Axis::Vertical);
    assert_eq!(dodge_axis(PI), Axis::Vertical);
    // Bullet above or below.
    assert_eq!(dodge_axis(FRAC_PI_2), Axis::Horizontal);
    assert_eq!(dodge_axis(-FRAC_PI_2), Axis::Horizontal);
}

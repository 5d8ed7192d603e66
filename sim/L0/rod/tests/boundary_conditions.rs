//! Reference scenarios for the rod boundary conditions.
//!
//! Random rod states are drawn from a seeded RNG so failures reproduce.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use nalgebra::{Matrix3, Point3, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sim_rod::{
    ConstraintApplier, FreeRod, HelicalBucklingBc, OneEndFixedRod, RodState, Tolerance,
};

const NUM_NODES: usize = 20;

fn random_vector(rng: &mut StdRng) -> Vector3<f64> {
    Vector3::from_fn(|_, _| rng.gen::<f64>())
}

fn random_rod(rng: &mut StdRng, n: usize) -> RodState {
    RodState::new(
        (0..n).map(|_| Point3::from(random_vector(rng))).collect(),
        (0..n).map(|_| Matrix3::from_fn(|_, _| rng.gen::<f64>())).collect(),
        (0..n).map(|_| random_vector(rng)).collect(),
        (0..n).map(|_| random_vector(rng)).collect(),
    )
    .unwrap()
}

#[test]
fn free_rod_leaves_state_untouched() {
    let tol = Tolerance::default();
    let mut rng = StdRng::seed_from_u64(7);
    let mut rod = random_rod(&mut rng, NUM_NODES);
    let expected = rod.clone();

    FreeRod.constrain_values(&mut rod, 0.0);
    assert!(tol.rod_eq(&rod, &expected));

    FreeRod.constrain_rates(&mut rod, 0.0);
    assert!(tol.rod_eq(&rod, &expected));
}

#[test]
fn one_end_fixed_rod_clamps_start() {
    let tol = Tolerance::default();
    let mut rng = StdRng::seed_from_u64(11);

    let start_position = Point3::from(random_vector(&mut rng));
    let start_directors = Matrix3::from_fn(|_, _| rng.gen::<f64>());
    let clamp = OneEndFixedRod::new(start_position, start_directors);

    let mut rod = random_rod(&mut rng, NUM_NODES);
    let mut expected = rod.clone();

    clamp.constrain_values(&mut rod, 0.0);
    expected.position[0] = start_position;
    expected.directors[0] = start_directors;
    assert!(tol.rod_eq(&rod, &expected));

    // Applying again changes nothing.
    clamp.constrain_values(&mut rod, 0.0);
    assert!(tol.rod_eq(&rod, &expected));

    rod.velocity = (0..NUM_NODES).map(|_| random_vector(&mut rng)).collect();
    rod.omega = (0..NUM_NODES).map(|_| random_vector(&mut rng)).collect();
    let mut expected = rod.clone();

    clamp.constrain_rates(&mut rod, 0.0);
    expected.velocity[0] = Vector3::zeros();
    expected.omega[0] = Vector3::zeros();
    assert!(tol.rod_eq(&rod, &expected));
}

fn helical_buckling_setup(rng: &mut StdRng) -> (RodState, HelicalBucklingBc) {
    let twisting_time = 500.0;
    let slack = 3.0;
    let number_of_rotations = 27.0;

    let mut rod = random_rod(rng, NUM_NODES);
    rod.position[0] = Point3::origin();
    rod.position[NUM_NODES - 1] = Point3::new(100.0, 0.0, 0.0);
    rod.directors = vec![Matrix3::identity(); NUM_NODES];

    let bc = HelicalBucklingBc::new(
        rod.position[0],
        rod.position[NUM_NODES - 1],
        rod.directors[0],
        rod.directors[NUM_NODES - 1],
        twisting_time,
        slack,
        number_of_rotations,
    );
    (rod, bc)
}

#[test]
fn helical_buckling_rates_while_twisting() {
    let tol = Tolerance::default();
    let mut rng = StdRng::seed_from_u64(23);
    let (mut rod, bc) = helical_buckling_setup(&mut rng);
    let mut expected = rod.clone();

    bc.constrain_rates(&mut rod, 499.0);

    let omega = std::f64::consts::PI * 27.0 / 500.0;
    expected.velocity[0] = Vector3::new(0.003, 0.0, 0.0);
    expected.velocity[NUM_NODES - 1] = -Vector3::new(0.003, 0.0, 0.0);
    expected.omega[0] = Vector3::new(omega, 0.0, 0.0);
    expected.omega[NUM_NODES - 1] = -Vector3::new(omega, 0.0, 0.0);
    assert!(tol.rod_eq(&rod, &expected));

    let reference = Tolerance::reference();
    assert!(reference.vector_eq(&rod.omega[0], &Vector3::new(0.169_646, 0.0, 0.0)));
    assert!(reference.vector_eq(
        &rod.omega[NUM_NODES - 1],
        &Vector3::new(-0.169_646, 0.0, 0.0)
    ));
}

#[test]
fn helical_buckling_rates_after_release() {
    let tol = Tolerance::default();
    let mut rng = StdRng::seed_from_u64(29);
    let (mut rod, bc) = helical_buckling_setup(&mut rng);

    bc.constrain_rates(&mut rod, 499.0);
    let mut expected = rod.clone();

    bc.constrain_rates(&mut rod, 501.0);
    for i in [0, NUM_NODES - 1] {
        expected.velocity[i] = Vector3::zeros();
        expected.omega[i] = Vector3::zeros();
    }
    assert!(tol.rod_eq(&rod, &expected));
    assert_eq!(rod.velocity[0], Vector3::zeros());
    assert_eq!(rod.omega[NUM_NODES - 1], Vector3::zeros());
}

#[test]
fn helical_buckling_post_twist_pose() {
    let tol = Tolerance::default();
    let mut rng = StdRng::seed_from_u64(31);
    let (mut rod, bc) = helical_buckling_setup(&mut rng);
    let mut expected = rod.clone();

    bc.constrain_values(&mut rod, 501.0);

    expected.position[0] = Point3::new(1.5, 0.0, 0.0);
    expected.position[NUM_NODES - 1] = Point3::new(98.5, 0.0, 0.0);
    expected.directors[0] = Matrix3::new(
        1.0, 0.0, 0.0, //
        0.0, -1.0, -6.859_260_04e-15, //
        0.0, 6.859_260_04e-15, -1.0,
    );
    expected.directors[NUM_NODES - 1] = Matrix3::new(
        1.0, 0.0, 0.0, //
        0.0, -1.0, 6.859_260_04e-15, //
        0.0, -6.859_260_04e-15, -1.0,
    );
    assert!(tol.rod_eq(&rod, &expected));

    for q in [rod.directors[0], rod.directors[NUM_NODES - 1]] {
        assert!(tol.matrix_eq(&(q * q.transpose()), &Matrix3::identity()));
        assert!(tol.approx_eq(q.determinant(), 1.0));
        assert!(q[(1, 2)].abs() < 1e-14);
        assert!(q[(2, 1)].abs() < 1e-14);
        assert!(tol.approx_eq(q[(1, 2)], -q[(2, 1)]));
    }
}

#[test]
fn helical_buckling_values_are_phase_independent() {
    let mut rng = StdRng::seed_from_u64(37);
    let (rod, bc) = helical_buckling_setup(&mut rng);

    let mut early = rod.clone();
    let mut late = rod;
    bc.constrain_values(&mut early, 0.0);
    bc.constrain_values(&mut late, 1_000.0);

    assert_eq!(early, late);
}

#[test]
fn helical_buckling_director_residual_signs() {
    let tight = Tolerance::strict().with_atol(1e-16);
    let mut rng = StdRng::seed_from_u64(41);
    let (_, bc) = helical_buckling_setup(&mut rng);
    let (q_start, q_end) = bc.final_directors();

    assert!(tight.approx_eq(q_start[(1, 2)], -6.859_260_04e-15));
    assert!(tight.approx_eq(q_start[(2, 1)], 6.859_260_04e-15));
    assert!(tight.approx_eq(q_end[(1, 2)], 6.859_260_04e-15));
    assert!(tight.approx_eq(q_end[(2, 1)], -6.859_260_04e-15));
}

//! End-to-end runs mirroring the demonstration driver, plus trace counts.

use approx::assert_relative_eq;

use vecmat_core::trace::{BinOp, Event, Operand, Origin};
use vecmat_core::{Kind, Matrix, Tracker, Vector};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn vector_scenario() {
    init();
    let tracker = Tracker::logging();
    let v1 = Vector::from_vec_in(vec![1.0, 2.0, 3.0], &tracker);
    let v2 = Vector::from_vec_in(vec![4.0, 5.0, 6.0], &tracker);

    assert_eq!((&v1 + &v2).as_slice(), &[5.0, 7.0, 9.0]);
    assert_eq!((&v1 - &v2).as_slice(), &[-3.0, -3.0, -3.0]);
    assert_relative_eq!(&v1 * &v2, 32.0);
    assert_eq!((-&v1).as_slice(), &[-1.0, -2.0, -3.0]);
    assert_eq!((2.5 * &v1).as_slice(), &[2.5, 5.0, 7.5]);
    assert_eq!((2.5 * &v1).to_string(), "[2.5, 5, 7.5]");
}

#[test]
fn matrix_scenario() {
    init();
    let tracker = Tracker::logging();
    let m1 = Matrix::from_rows_in(&[[1.0, 2.0], [3.0, 4.0]], &tracker).unwrap();
    let m2 = Matrix::from_rows_in(&[[5.0, 6.0], [7.0, 8.0]], &tracker).unwrap();

    assert_eq!((&m1 + &m2).as_slice(), &[6.0, 8.0, 10.0, 12.0]);
    assert_eq!((&m1 * &m2).as_slice(), &[19.0, 22.0, 43.0, 50.0]);
    assert_eq!((-&m1).as_slice(), &[-1.0, -2.0, -3.0, -4.0]);
    assert_eq!((3.0 * &m1).as_slice(), &[3.0, 6.0, 9.0, 12.0]);
    assert_eq!((3.0 * &m1).to_string(), "3 6\n9 12");
}

#[test]
fn matrix_vector_scenario() {
    init();
    let tracker = Tracker::logging();
    let m1 = Matrix::from_rows_in(&[[1.0, 2.0], [3.0, 4.0]], &tracker).unwrap();
    let v = Vector::from_vec_in(vec![1.0, 2.0], &tracker);

    let r = &m1 * &v;

    assert_eq!(r.dimension(), 2);
    assert_eq!(r.as_slice(), &[5.0, 11.0]);
}

#[test]
fn one_event_per_operator() {
    let (tracker, sink) = Tracker::recording();
    let v1 = Vector::from_vec_in(vec![1.0, 2.0], &tracker);
    let v2 = Vector::from_vec_in(vec![3.0, 4.0], &tracker);
    let m = Matrix::identity_in(2, &tracker);
    sink.clear();

    let _ = v1.dot(&v2);
    assert_eq!(sink.len(), 1);
    assert_eq!(
        sink.events()[0],
        Event::Binary { op: BinOp::Dot, lhs: operand(&v1), rhs: operand(&v2) }
    );
    sink.clear();

    // op, result created, result dropped
    let _ = &m * &v1;
    assert_eq!(sink.len(), 3);
    assert!(matches!(sink.events()[0], Event::Binary { op: BinOp::Mul, .. }));
    assert!(matches!(sink.events()[1], Event::Created { origin: Origin::Sized(2), .. }));
    assert!(matches!(sink.events()[2], Event::Dropped(_)));
    sink.clear();

    let _ = 2.0 * &m;
    assert_eq!(sink.len(), 3);
}

#[test]
fn failed_operation_emits_nothing() {
    let (tracker, sink) = Tracker::recording();
    let a = Vector::new_in(2, &tracker);
    let b = Vector::new_in(3, &tracker);
    sink.clear();

    assert!(a.checked_add(&b).is_err());
    assert!(sink.is_empty());
    assert_eq!(tracker.vectors_created(), 2);
}

#[test]
fn assign_event_names_both_sides() {
    let (tracker, sink) = Tracker::recording();
    let mut a = Matrix::empty_in(&tracker);
    let b = Matrix::identity_in(2, &tracker);
    sink.clear();

    a.clone_from(&b);

    let lines: Vec<String> = sink.events().iter().map(ToString::to_string).collect();
    assert_eq!(lines, vec!["matrix #1 = matrix #2".to_string()]);
}

fn operand(v: &Vector) -> Operand {
    Operand { kind: Kind::Vector, id: v.id() }
}

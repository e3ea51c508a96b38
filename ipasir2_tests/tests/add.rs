use std::collections::LinkedList;

use ipasir2_bridge::{
    structures::{clause::Redundancy, literal::ABLiteral},
    types::err::ErrorCode,
};
use ipasir2_mock::{AddCall, Ipasir2Mock};
use ipasir2_tests::{assert_mock_finished, init_logs, MiniLit};

mod add {

    use super::*;

    fn add_call(clause: &[i32], redundancy: Redundancy) -> AddCall {
        AddCall {
            clause: clause.to_vec(),
            redundancy,
            ..Default::default()
        }
    }

    #[test]
    fn inline_clauses() {
        init_logs();
        let mock = Ipasir2Mock::new();
        let ipasir2 = mock.ipasir2();

        mock.expect_init_call(1);
        mock.expect_call(1, add_call(&[1], Redundancy::None));
        mock.expect_call(1, add_call(&[1, -2], Redundancy::None));
        mock.expect_call(1, add_call(&[1, -2, 3], Redundancy::None));
        mock.expect_call(1, add_call(&[1, -2, 3, -4], Redundancy::None));

        let mut solver = ipasir2.create_solver().unwrap();
        assert!(solver.add(&[1]).is_ok());
        assert!(solver.add(&[1, -2]).is_ok());
        assert!(solver.add(&[1, -2, 3]).is_ok());
        assert!(solver.add(&[1, -2, 3, -4]).is_ok());

        drop(solver);
        assert_mock_finished(&mock);
    }

    #[test]
    fn redundancy_is_passed_through() {
        let mock = Ipasir2Mock::new();
        let ipasir2 = mock.ipasir2();

        mock.expect_init_call(1);
        mock.expect_call(1, add_call(&[1], Redundancy::Equivalent));
        mock.expect_call(1, add_call(&[1, -2], Redundancy::Equisatisfiable));
        mock.expect_call(1, add_call(&[1, -2, 3], Redundancy::Forgettable));
        mock.expect_call(1, add_call(&[1, -2, 3, -4], Redundancy::None));

        let mut solver = ipasir2.create_solver().unwrap();
        assert!(solver.add_unit(1, Redundancy::Equivalent).is_ok());
        assert!(solver.add_clause(&[1, -2], Redundancy::Equisatisfiable).is_ok());
        assert!(solver.add_clause(&[1, -2, 3], Redundancy::Forgettable).is_ok());
        assert!(solver.add_clause(&[1, -2, 3, -4], Redundancy::None).is_ok());

        drop(solver);
        assert_mock_finished(&mock);
    }

    #[test]
    fn containers() {
        let mock = Ipasir2Mock::new();
        let ipasir2 = mock.ipasir2();

        let clause = vec![1, -2, 3];
        let listed: LinkedList<i32> = [1, 2, 3].into_iter().collect();

        mock.expect_init_call(1);
        mock.expect_call(1, add_call(&clause, Redundancy::None));
        mock.expect_call(1, add_call(&clause, Redundancy::Forgettable));
        mock.expect_call(1, add_call(&[1, 2, 3], Redundancy::None));
        mock.expect_call(1, add_call(&[2, 4, 6], Redundancy::None));

        let mut solver = ipasir2.create_solver().unwrap();
        assert!(solver.add(&clause).is_ok());
        assert!(solver.add_clause(&clause, Redundancy::Forgettable).is_ok());
        assert!(solver.add_iter(listed.iter().copied(), Redundancy::None).is_ok());
        assert!(solver
            .add_iter((1..=3).map(|atom| 2 * atom), Redundancy::None)
            .is_ok());

        drop(solver);
        assert_mock_finished(&mock);
    }

    #[test]
    fn custom_literals() {
        let mock = Ipasir2Mock::new();
        let ipasir2 = mock.ipasir2();

        let p = ABLiteral::new(1, true);
        let q = ABLiteral::new(2, false);
        let r = ABLiteral::new(3, true);

        let listed: LinkedList<ABLiteral> = [p, -r].into_iter().collect();
        let mini = vec![MiniLit::new(0, false), MiniLit::new(4, true)];

        mock.expect_init_call(1);
        mock.expect_call(1, add_call(&[1], Redundancy::None));
        mock.expect_call(1, add_call(&[1, -2, 3], Redundancy::None));
        mock.expect_call(1, add_call(&[1, -2, 3], Redundancy::Forgettable));
        mock.expect_call(1, add_call(&[1, -3], Redundancy::None));
        mock.expect_call(1, add_call(&[1, -5], Redundancy::None));

        let mut solver = ipasir2.create_solver().unwrap();
        assert!(solver.add(&[p]).is_ok());
        assert!(solver.add(&[p, q, r]).is_ok());
        assert!(solver.add_clause(&[p, q, r], Redundancy::Forgettable).is_ok());
        assert!(solver.add_iter(listed.iter().copied(), Redundancy::None).is_ok());
        assert!(solver.add(&mini).is_ok());

        drop(solver);
        assert_mock_finished(&mock);
    }

    #[test]
    fn empty_clause() {
        let mock = Ipasir2Mock::new();
        let ipasir2 = mock.ipasir2();

        mock.expect_init_call(1);
        mock.expect_call(1, add_call(&[], Redundancy::None));
        mock.expect_call(1, add_call(&[], Redundancy::None));

        let empty: Vec<i32> = Vec::new();
        let mut solver = ipasir2.create_solver().unwrap();
        assert!(solver.add(&empty).is_ok());
        assert!(solver
            .add_iter(std::iter::empty::<ABLiteral>(), Redundancy::None)
            .is_ok());

        drop(solver);
        assert_mock_finished(&mock);
    }

    #[test]
    fn failing_add() {
        let mock = Ipasir2Mock::new();
        let ipasir2 = mock.ipasir2();

        fn invalid(clause: &[i32]) -> AddCall {
            AddCall {
                clause: clause.to_vec(),
                status: ErrorCode::InvalidArgument.as_raw(),
                ..Default::default()
            }
        }

        let clause = vec![1, -2, 3];

        mock.expect_init_call(1);
        mock.expect_call(1, invalid(&clause));
        mock.expect_call(1, invalid(&clause));
        mock.expect_call(1, invalid(&[1]));

        let mut solver = ipasir2.create_solver().unwrap();

        let error = solver.add(&clause).unwrap_err();
        assert_eq!(error.code(), Some(ErrorCode::InvalidArgument));
        assert_eq!(error.function(), Some("ipasir2_add"));

        assert!(solver
            .add_iter(clause.iter().copied(), Redundancy::None)
            .is_err());
        assert!(solver.add_unit(1, Redundancy::None).is_err());

        drop(solver);
        assert_mock_finished(&mock);
    }
}

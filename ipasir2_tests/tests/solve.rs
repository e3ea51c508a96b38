use ipasir2_bridge::{
    structures::{literal::ABLiteral, optional_bool::OptionalBool},
    types::err::ErrorCode,
};
use ipasir2_mock::{Ipasir2Mock, SolveCall};
use ipasir2_tests::{assert_mock_finished, MiniLit};

mod solve {

    use super::*;

    fn solve_call(assumptions: &[i32], result: i32) -> SolveCall {
        SolveCall {
            assumptions: assumptions.to_vec(),
            result,
            ..Default::default()
        }
    }

    #[test]
    fn result_codes() {
        let mock = Ipasir2Mock::new();
        let ipasir2 = mock.ipasir2();

        mock.expect_init_call(1);
        mock.expect_call(1, solve_call(&[], 10));
        mock.expect_call(1, solve_call(&[], 20));
        mock.expect_call(1, solve_call(&[], 0));
        mock.expect_call(1, solve_call(&[], 30));

        let mut solver = ipasir2.create_solver().unwrap();
        assert_eq!(solver.solve().unwrap(), OptionalBool::new(true));
        assert_eq!(solver.solve().unwrap(), OptionalBool::new(false));
        assert_eq!(solver.solve().unwrap(), OptionalBool::none());
        assert_eq!(solver.solve().unwrap(), OptionalBool::none());

        drop(solver);
        assert_mock_finished(&mock);
    }

    #[test]
    fn assumptions() {
        let mock = Ipasir2Mock::new();
        let ipasir2 = mock.ipasir2();

        let assumptions = vec![1, -2];

        mock.expect_init_call(1);
        mock.expect_call(1, solve_call(&[1, -2], 10));
        mock.expect_call(1, solve_call(&[1, -2], 20));
        mock.expect_call(1, solve_call(&[-1, 2], 10));
        mock.expect_call(1, solve_call(&[3, -4], 20));
        mock.expect_call(1, solve_call(&[], 10));

        let mut solver = ipasir2.create_solver().unwrap();
        assert_eq!(solver.solve_assuming(&assumptions).unwrap(), OptionalBool::new(true));
        assert_eq!(
            solver.solve_assuming_iter(assumptions.iter().copied()).unwrap(),
            OptionalBool::new(false)
        );
        assert_eq!(
            solver
                .solve_assuming(&[ABLiteral::new(1, false), ABLiteral::new(2, true)])
                .unwrap(),
            OptionalBool::new(true)
        );
        assert_eq!(
            solver
                .solve_assuming(&[MiniLit::new(2, false), MiniLit::new(3, true)])
                .unwrap(),
            OptionalBool::new(false)
        );
        assert_eq!(solver.solve_assuming::<i32>(&[]).unwrap(), OptionalBool::new(true));

        drop(solver);
        assert_mock_finished(&mock);
    }

    #[test]
    fn failing_solve() {
        let mock = Ipasir2Mock::new();
        let ipasir2 = mock.ipasir2();

        mock.expect_init_call(1);
        mock.expect_call(
            1,
            SolveCall {
                result: 10,
                status: ErrorCode::InvalidState.as_raw(),
                ..Default::default()
            },
        );

        let mut solver = ipasir2.create_solver().unwrap();
        let error = solver.solve().unwrap_err();
        assert_eq!(error.code(), Some(ErrorCode::InvalidState));
        assert_eq!(error.function(), Some("ipasir2_solve"));

        drop(solver);
        assert_mock_finished(&mock);
    }

    #[test]
    fn unrecognised_status() {
        let mock = Ipasir2Mock::new();
        let ipasir2 = mock.ipasir2();

        mock.expect_init_call(1);
        mock.expect_call(
            1,
            SolveCall {
                status: 99,
                ..Default::default()
            },
        );

        let mut solver = ipasir2.create_solver().unwrap();
        let error = solver.solve().unwrap_err();
        assert_eq!(error.code(), None);
        assert!(error.message().contains("99"));

        drop(solver);
        assert_mock_finished(&mock);
    }
}

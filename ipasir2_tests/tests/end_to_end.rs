use ipasir2_bridge::structures::{clause::Redundancy, optional_bool::OptionalBool};
use ipasir2_mock::{AddCall, Ipasir2Mock, SolveCall, ValCall};
use ipasir2_tests::{assert_mock_finished, init_logs};

mod end_to_end {

    use super::*;

    #[test]
    fn small_formula() {
        init_logs();
        let mock = Ipasir2Mock::new();
        let ipasir2 = mock.ipasir2();

        mock.expect_init_call(1);
        for clause in [vec![1, 2, 3], vec![-1], vec![-2]] {
            mock.expect_call(
                1,
                AddCall {
                    clause,
                    ..Default::default()
                },
            );
        }
        mock.expect_call(
            1,
            SolveCall {
                result: 10,
                ..Default::default()
            },
        );
        for (literal, result) in [(1, -1), (2, -2), (3, 3)] {
            mock.expect_call(
                1,
                ValCall {
                    literal,
                    result,
                    ..Default::default()
                },
            );
        }

        let mut solver = ipasir2.create_solver().unwrap();
        assert!(solver.add(&[1, 2, 3]).is_ok());
        assert!(solver.add_unit(-1, Redundancy::None).is_ok());
        assert!(solver.add(&[-2]).is_ok());

        assert_eq!(solver.solve().unwrap(), OptionalBool::new(true));

        let model = (1..=3)
            .map(|atom| solver.lit_value(atom).unwrap())
            .collect::<Vec<_>>();
        assert_eq!(
            model,
            vec![
                OptionalBool::new(false),
                OptionalBool::new(false),
                OptionalBool::new(true)
            ]
        );

        drop(solver);
        assert_mock_finished(&mock);
    }
}

use std::cell::Cell;

use ipasir2_bridge::{types::err::ErrorCode, Ipasir2};
use ipasir2_mock::{AddCall, Ipasir2Mock, SetTerminateCall, SolveCall};
use ipasir2_tests::assert_mock_finished;

mod construction {

    use super::*;

    #[test]
    fn failing_init() {
        let mock = Ipasir2Mock::new();
        let ipasir2 = mock.ipasir2();

        mock.expect_init_call_and_fail(ErrorCode::Unknown.as_raw());

        let error = ipasir2.create_solver().unwrap_err();
        assert_eq!(error.code(), Some(ErrorCode::Unknown));
        assert_eq!(error.function(), Some("ipasir2_init"));

        // Nothing was created, so nothing is released.
        assert_mock_finished(&mock);
    }

    #[test]
    fn release_on_drop() {
        let mock = Ipasir2Mock::new();
        let ipasir2 = mock.ipasir2();

        mock.expect_init_call(1);
        let solver = ipasir2.create_solver().unwrap();
        assert!(mock.has_outstanding_expects());

        drop(solver);
        assert_mock_finished(&mock);
    }

    #[test]
    fn native_handle() {
        let mock = Ipasir2Mock::new();
        let ipasir2 = mock.ipasir2();

        mock.expect_init_call(7);
        let solver = ipasir2.create_solver().unwrap();
        assert_eq!(solver.native_handle(), mock.handle(7));

        drop(solver);
        assert_mock_finished(&mock);
    }

    #[test]
    fn signature() {
        let mock = Ipasir2Mock::new();
        let ipasir2 = mock.ipasir2();

        mock.set_signature("mock 1.0", 0);
        assert_eq!(ipasir2.signature().unwrap(), "mock 1.0");

        mock.set_signature("mock 1.0", ErrorCode::Unsupported.as_raw());
        let error = ipasir2.signature().unwrap_err();
        assert_eq!(error.code(), Some(ErrorCode::Unsupported));
        assert_eq!(error.function(), Some("ipasir2_signature"));

        assert_mock_finished(&mock);
    }

    #[test]
    fn independent_instances() {
        let mock = Ipasir2Mock::new();
        let ipasir2 = mock.ipasir2();

        mock.expect_init_call(1);
        let mut first = ipasir2.create_solver().unwrap();
        mock.expect_init_call(2);
        let mut second = ipasir2.clone().create_solver().unwrap();

        mock.expect_call(
            2,
            AddCall {
                clause: vec![2],
                ..Default::default()
            },
        );
        mock.expect_call(
            1,
            AddCall {
                clause: vec![1],
                ..Default::default()
            },
        );

        assert!(second.add(&[2]).is_ok());
        assert!(first.add(&[1]).is_ok());

        drop(first);
        drop(second);
        assert_mock_finished(&mock);
    }

    #[test]
    fn moved_solver_keeps_callbacks() {
        let mock = Ipasir2Mock::new();
        let ipasir2 = mock.ipasir2();
        let calls = Cell::new(0);

        mock.expect_init_call(1);
        mock.expect_call(
            1,
            SetTerminateCall {
                set: true,
                ..Default::default()
            },
        );

        let mut solver = ipasir2.create_solver().unwrap();
        solver
            .set_terminate_callback(|| {
                calls.set(calls.get() + 1);
                false
            })
            .unwrap();

        let mut moved = vec![solver];
        let boxed = Box::new(moved.pop().unwrap());

        mock.simulate_terminate_callback_call(1, 0);
        assert_eq!(calls.get(), 1);

        drop(boxed);
        assert_mock_finished(&mock);
    }

    #[test]
    fn solver_per_thread() {
        fn assert_shareable<T: Clone + Send + Sync>() {}
        assert_shareable::<Ipasir2>();

        std::thread::scope(|scope| {
            for id in 1..=4 {
                scope.spawn(move || {
                    let mock = Ipasir2Mock::new();
                    let ipasir2 = mock.ipasir2();

                    mock.expect_init_call(id);
                    mock.expect_call(
                        id,
                        SolveCall {
                            result: 10,
                            ..Default::default()
                        },
                    );

                    let mut solver = ipasir2.create_solver().unwrap();
                    assert!(solver.solve().unwrap().unwrap());

                    drop(solver);
                    assert_mock_finished(&mock);
                });
            }
        });
    }
}

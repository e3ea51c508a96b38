use ipasir2_bridge::{structures::optional_bool::OptionalBool, Ipasir2};
use ipasir2_tests::{fixture_library, init_logs};

mod dynamic_loading {

    use super::*;

    #[test]
    fn missing_library() {
        let path = "./no_such_directory/libno_such_solver.so";
        let error = Ipasir2::load(path).unwrap_err();

        assert_eq!(error.message(), format!("Could not open {path}"));
        assert_eq!(error.code(), None);
    }

    // The C library is present on any glibc system, and has none of the IPASIR-2 symbols.
    #[test]
    #[cfg(all(target_os = "linux", target_env = "gnu"))]
    fn library_without_symbols() {
        let error = Ipasir2::load("libc.so.6").unwrap_err();

        assert_eq!(
            error.message(),
            "Symbol ipasir2_signature not found in libc.so.6"
        );
    }

    #[test]
    fn library_missing_one_symbol() {
        init_logs();
        let path = fixture_library("ipasir2_fixture_no_export");
        let error = Ipasir2::load(&path).unwrap_err();

        assert_eq!(
            error.message(),
            format!("Symbol ipasir2_set_export not found in {}", path.display())
        );
        assert_eq!(error.code(), None);
    }

    #[test]
    fn solve_with_loaded_library() {
        init_logs();
        let ipasir2 = Ipasir2::load(fixture_library("ipasir2_fixture")).unwrap();
        assert_eq!(ipasir2.signature().unwrap(), "ipasir2_fixture 0.1.0");

        let mut solver = ipasir2.create_solver().unwrap();
        solver.add(&[1, 2, 3]).unwrap();
        solver.add(&[-1]).unwrap();
        solver.add(&[-2]).unwrap();

        assert_eq!(solver.solve().unwrap(), OptionalBool::new(true));
        assert_eq!(solver.lit_value(1).unwrap(), OptionalBool::new(false));
        assert_eq!(solver.lit_value(-2).unwrap(), OptionalBool::new(true));
        assert_eq!(solver.lit_value(3).unwrap(), OptionalBool::new(true));

        assert_eq!(solver.solve_assuming(&[-3]).unwrap(), OptionalBool::new(false));
        assert!(solver.assumption_failed(-3).unwrap());
        assert!(!solver.assumption_failed(3).unwrap());

        assert!(solver.options().unwrap().is_empty());
    }

    #[test]
    fn library_outlives_every_ipasir2() {
        init_logs();
        let ipasir2 = Ipasir2::load(fixture_library("ipasir2_fixture")).unwrap();
        let clone = ipasir2.clone();

        let mut solver = ipasir2.create_solver().unwrap();
        drop(ipasir2);

        let mut other = clone.create_solver().unwrap();
        drop(clone);

        // The library is open for as long as some solver is.
        solver.add(&[1, -2]).unwrap();
        solver.add(&[2]).unwrap();
        assert_eq!(solver.solve().unwrap(), OptionalBool::new(true));
        assert_eq!(solver.lit_value(1).unwrap(), OptionalBool::new(true));
        drop(solver);

        other.add(&[-1]).unwrap();
        assert_eq!(other.solve_assuming(&[1]).unwrap(), OptionalBool::new(false));
        drop(other);
    }

    #[test]
    fn callbacks_through_loaded_library() {
        init_logs();
        let ipasir2 = Ipasir2::load(fixture_library("ipasir2_fixture")).unwrap();

        let mut polls = 0;
        let mut solver = ipasir2.create_solver().unwrap();
        solver.add(&[1, 2]).unwrap();
        solver
            .set_terminate_callback(|| {
                polls += 1;
                true
            })
            .unwrap();
        solver.set_export_callback(|_: &[i32]| {}, 2).unwrap();

        assert_eq!(solver.solve().unwrap(), OptionalBool::none());

        solver.clear_terminate_callback().unwrap();
        assert_eq!(solver.solve().unwrap(), OptionalBool::new(true));

        drop(solver);
        assert_eq!(polls, 1);
    }

    #[test]
    fn panic_in_callback_of_loaded_library() {
        init_logs();
        let ipasir2 = Ipasir2::load(fixture_library("ipasir2_fixture")).unwrap();

        let mut solver = ipasir2.create_solver().unwrap();
        solver.add(&[1]).unwrap();
        solver
            .set_terminate_callback(|| panic!("stop requested"))
            .unwrap();

        let payload = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| solver.solve()))
            .unwrap_err();
        assert_eq!(payload.downcast_ref::<&str>(), Some(&"stop requested"));

        solver.clear_terminate_callback().unwrap();
        assert_eq!(solver.solve().unwrap(), OptionalBool::new(true));
    }
}

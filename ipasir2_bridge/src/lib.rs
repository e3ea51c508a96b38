//! A safe interface to incremental satisfiability solvers implementing the IPASIR-2 API.
//!
//! ipasir2_bridge wraps the C entry points of an IPASIR-2 solver, so clauses may be added, formulas solved under assumptions, results queried, callbacks registered, and options set, without unsafe code and without adding behaviour the solver does not have.
//!
//! # Orientation
//!
//! The library is designed around two structures:
//! - An [Ipasir2], which holds a table of solver entry points, and from which solvers are created.
//!   The table may come from symbols resolved at link time, from a library loaded at runtime, or be built by hand.
//! - A [Solver], which owns a single solver instance.
//!
//! Useful starting points, then, may be:
//! - The [solver] module for the operations on a solver.
//! - The [literal](structures::literal) module, to see what may be used as a literal.
//! - The [callbacks](ipasir::callbacks) module, to see how closures are called by a solver, and what happens when a closure panics.
//!
//! # Examples
//!
//! + Load a solver library, and solve a small formula.
//!
//! ```rust,no_run
//! # use ipasir2_bridge::{Ipasir2, structures::optional_bool::OptionalBool};
//! let ipasir2 = Ipasir2::load("libcadical.so").unwrap();
//! println!("Solving with {}", ipasir2.signature().unwrap());
//!
//! let mut solver = ipasir2.create_solver().unwrap();
//! solver.add(&[1, 2, 3]).unwrap();
//! solver.add(&[-1]).unwrap();
//! solver.add(&[-2]).unwrap();
//!
//! assert_eq!(solver.solve().unwrap(), OptionalBool::new(true));
//! assert_eq!(solver.lit_value(3).unwrap(), OptionalBool::new(true));
//! ```
//!
//! + Stop a solve after some time, and observe short learnt clauses.
//!
//! ```rust,no_run
//! # use ipasir2_bridge::{Ipasir2, structures::literal::ABLiteral};
//! # let ipasir2 = Ipasir2::load("libcadical.so").unwrap();
//! let start = std::time::Instant::now();
//! let mut learnt = Vec::new();
//!
//! let mut solver = ipasir2.create_solver().unwrap();
//! solver
//!     .set_terminate_callback(|| start.elapsed().as_secs() > 10)
//!     .unwrap();
//! solver
//!     .set_export_callback(|clause: &[ABLiteral]| learnt.push(clause.to_vec()), 2)
//!     .unwrap();
//!
//! let result = solver.solve().unwrap();
//! ```
//!
//! # Logs
//!
//! Calls across the boundary with the solver are logged using the [log] facade, with targets given in [misc::log::targets].
//! No logger is installed by the library.

pub mod api;
pub use api::Ipasir2;

pub mod config;
pub mod ipasir;
pub mod marshal;
pub mod misc;

pub mod solver;
pub use solver::Solver;

pub mod structures;
pub mod types;

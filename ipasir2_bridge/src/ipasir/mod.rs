//! The boundary with a solver implementing the IPASIR-2 API.
//!
//! Raw items of the API are given in [ipasir_two], the bridge for callbacks made by a solver in [callbacks], and the loading of a solver library at runtime in [loader].
//!
//! Information about the API may be found at <https://github.com/ipasir2/ipasir2>.

pub mod callbacks;
pub mod ipasir_two;
pub mod loader;

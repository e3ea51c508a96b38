/*!
Miscelanous items related to [logging](log).

Calls to the log macro are made at the boundary with the solver, and when callbacks are registered or fail.
These are intended to help diagnose a misbehaving solver library, or a misbehaving callback.

Note, no log implementation is provided.
For more details, see [log].
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to calls through the [IPASIR-2 entry points](crate::ipasir::ipasir_two)
    pub const FFI: &str = "ffi";

    /// Logs related to [callbacks](crate::ipasir::callbacks)
    pub const CALLBACK: &str = "callback";

    /// Logs related to [solver options](crate::config)
    pub const OPTIONS: &str = "options";

    /// Logs related to [loading a solver library](crate::ipasir::loader)
    pub const LOADER: &str = "loader";

    /// Logs related to [marshalling](crate::marshal) literals
    pub const MARSHAL: &str = "marshal";
}

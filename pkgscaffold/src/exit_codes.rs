//! Stable exit codes for pkgscaffold CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Invalid config or arguments, or a filesystem error.
pub const INVALID: i32 = 1;
/// `install` or `check` ran a tool that exited non-zero.
pub const TOOL_FAILED: i32 = 2;
/// `install` or `check` ran a tool that was killed after its timeout.
pub const TOOL_TIMED_OUT: i32 = 3;

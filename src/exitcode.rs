//! Standard exit codes (BSD sysexits.h compatible)

/// Command line usage error (including an invalid node count or degree cap)
pub const USAGE: i32 = 64;

/// Internal software error
pub const SOFTWARE: i32 = 70;

/// Input/output error
pub const IOERR: i32 = 74;

/// Configuration error
pub const CONFIG: i32 = 78;

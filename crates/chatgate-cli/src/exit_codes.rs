//! Exit codes. Part of the public contract of the `chatgate` binary.

pub const SUCCESS: i32 = 0;
pub const DENIED: i32 = 1; // `explain` evaluated a request and nothing was granted
pub const CONFIG_ERROR: i32 = 2; // unreadable or invalid policy/request file

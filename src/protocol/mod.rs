//! Hook I/O protocol shared by every rampart hook.
//!
//! The assistant runs a hook once per tool-use event:
//! 1. The event payload arrives as one JSON document on stdin ([`HookInput`])
//! 2. The hook decides a [`Verdict`] from its rule table
//! 3. At most one [`HookResponse`] is written to stdout
//! 4. The process exits with [`Verdict::exit_code`]
//!
//! ## Exit codes
//!
//! - `0`: allow (feedback, if any, is informational)
//! - `1`: non-blocking warning
//! - `2`: blocking failure

mod payload;
mod response;
mod verdict;

pub use payload::{parse_payload, read_payload, HookInput, PayloadError, ToolInput};
pub use response::{HookOutcome, HookResponse};
pub use verdict::Verdict;

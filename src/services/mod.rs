//! Query resolution services.

mod ask;
mod context;
mod lookback;
mod temporal;

pub use ask::{AskOutcome, AskService, QueryMode, wants_lookback};
pub use context::{DEFAULT_CONTEXT_LIMIT, assemble, present, select_recent};
pub use lookback::{DAYS_PER_MONTH, parse_lookback};
pub use temporal::{closest, within};

pub mod diff_engine;
pub mod outcome;
pub mod rate_limit;

pub use diff_engine::{diff_namespaces, NamespaceDiff, ReconcilePlan};
pub use outcome::{MutationAction, MutationOutcome};
pub use rate_limit::{FixedDelay, NoDelay, RateLimitPolicy};

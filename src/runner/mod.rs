pub mod suite;
pub mod types;

pub use suite::{DEFAULT_SUITE_NAME, TestSuite};
pub use types::{Hook, HookKind, SuiteOptions, SuiteState, TestOutcome};

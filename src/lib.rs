//! checkup - 一个极简的单元测试框架
//!
//! 注册测试、执行并记录结果、输出可读报告，并提供一组链式断言。
pub mod assertion;
pub mod capture;
pub mod config;
pub mod error;
pub mod logger;
pub mod report;
pub mod runner;
pub mod utils;

// Re-export commonly used types
pub use assertion::{Assertion, Value, assert_that};
pub use config::{ConfigLoader, SuiteConfig};
pub use error::{CheckError, ErrorKind, LifecycleViolation, Location, Result, StructuredError};
pub use report::{BufferSink, ConsoleSink, PrintOptions, ReportSummary, TextSink};
pub use runner::{HookKind, SuiteOptions, SuiteState, TestOutcome, TestSuite};

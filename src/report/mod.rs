/// 报告模块 - 汇总测试结果并输出横幅、明细、汇总表、失败列表和一句话总结
pub mod printer;
pub mod sink;
pub mod summary;

pub use printer::{PrintOptions, banner_width};
pub use sink::{BufferSink, ConsoleSink, TextSink};
pub use summary::{DEFAULT_TITLE, IntoOutcomes, ReportSummary};

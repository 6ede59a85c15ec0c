use crate::error::StructuredError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 单个测试的执行结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestOutcome {
    /// 测试名称（不要求唯一）
    name: String,

    /// 是否通过
    succeeded: bool,

    /// 失败原因（仅在失败时存在）
    error: Option<StructuredError>,
}

impl TestOutcome {
    pub fn passed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            succeeded: true,
            error: None,
        }
    }

    pub fn failed(name: impl Into<String>, error: StructuredError) -> Self {
        Self {
            name: name.into(),
            succeeded: false,
            error: Some(error),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    pub fn error(&self) -> Option<&StructuredError> {
        self.error.as_ref()
    }
}

/// 套件选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteOptions {
    /// 关闭所有输出
    pub quiet: bool,

    /// 测试体抛出非断言错误时立即输出到错误通道
    pub print_errors_on_test: bool,

    pub print_report_individual_test_results: bool,
    pub print_report_summary: bool,
    pub print_report_summary_table: bool,
    pub print_report_banner: bool,
    pub print_report_failed_tests: bool,

    /// 输出是否带颜色
    pub color: bool,
}

impl SuiteOptions {
    /// 所有报告段落都关闭的选项
    pub fn silent_report() -> Self {
        Self {
            print_report_individual_test_results: false,
            print_report_summary: false,
            print_report_summary_table: false,
            print_report_banner: false,
            print_report_failed_tests: false,
            ..Self::default()
        }
    }

    pub fn quiet() -> Self {
        Self {
            quiet: true,
            ..Self::default()
        }
    }
}

impl Default for SuiteOptions {
    fn default() -> Self {
        Self {
            quiet: false,
            print_errors_on_test: false,
            print_report_individual_test_results: true,
            print_report_summary: true,
            print_report_summary_table: true,
            print_report_banner: true,
            print_report_failed_tests: true,
            color: true,
        }
    }
}

/// 生命周期钩子
pub type Hook<'a> = Box<dyn FnMut() + 'a>;

/// 钩子挂载的生命周期事件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    /// 第一个测试开始前，只触发一次
    Start,
    /// 每个测试开始前
    TestStart,
    /// 生成结果前
    ShowResults,
    /// 每个测试结束后（无论成败）
    TestFinish,
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HookKind::Start => "on-start",
            HookKind::TestStart => "on-test-start",
            HookKind::ShowResults => "on-show-results",
            HookKind::TestFinish => "on-test-finish",
        };
        write!(f, "{}", name)
    }
}

/// 套件状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteState {
    /// 尚未运行任何测试
    Fresh,
    /// 至少运行过一个测试
    Running,
    /// 结果已生成，套件冻结
    Finished,
}

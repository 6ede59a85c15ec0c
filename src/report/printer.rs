use crate::error::StructuredError;
use crate::report::sink::TextSink;
use crate::report::summary::ReportSummary;
use crate::runner::{SuiteOptions, TestOutcome};
use crate::utils::Painter;
use colored::Color;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Table};

const BANNER_PADDING: &str = " - - ";
const BANNER_SIDES: &str = "== ";

/// 打印哪些报告段落
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintOptions {
    pub banner: bool,
    pub detailed_report: bool,
    pub summary_table: bool,
    pub failures: bool,
    pub summary: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            banner: true,
            detailed_report: true,
            summary_table: true,
            failures: true,
            summary: true,
        }
    }
}

impl From<&SuiteOptions> for PrintOptions {
    fn from(options: &SuiteOptions) -> Self {
        Self {
            banner: options.print_report_banner,
            detailed_report: options.print_report_individual_test_results,
            summary_table: options.print_report_summary_table,
            failures: options.print_report_failed_tests,
            summary: options.print_report_summary,
        }
    }
}

/// 横幅边框宽度：标题长度 + 两侧填充与标记
pub fn banner_width(title: &str) -> usize {
    title.chars().count() + BANNER_PADDING.len() * 2 + BANNER_SIDES.len() * 2 - 1
}

impl ReportSummary {
    /// 按固定顺序打印各段落
    pub fn print<S>(&self, options: &PrintOptions, painter: Painter, sink: &mut S)
    where
        S: TextSink + ?Sized,
    {
        if options.banner {
            sink.line(&self.banner());
        }

        if options.detailed_report {
            sink.line(&self.detailed_report(painter));
        }

        if options.summary_table {
            sink.table(&self.summary_table());
        }

        if options.failures
            && let Some(failures) = self.failures_list(painter)
        {
            sink.line("Failed Tests:");
            sink.line(&failures);
        }

        if options.summary {
            sink.line(&painter.paint(&self.one_line_summary(), self.summary_color()));
        }
    }

    /// 居中标题的横幅
    pub fn banner(&self) -> String {
        let row = "=".repeat(banner_width(self.title()));
        format!(
            "\n{row}\n{sides}{padding}{title}{padding}{sides}\n{row}\n",
            row = row,
            sides = BANNER_SIDES,
            padding = BANNER_PADDING,
            title = self.title()
        )
    }

    /// 每个测试一行，失败的测试附带原因
    pub fn detailed_report(&self, painter: Painter) -> String {
        let entries: Vec<String> = self
            .outcomes()
            .iter()
            .map(|outcome| format!(" {}", format_outcome(outcome, painter)))
            .collect();

        format!("Tests:\n\n{} \n", entries.join("\n"))
    }

    /// 五行汇总表
    pub fn summary_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL).set_header(vec!["", "Values"]);

        let rows = [
            ("Total Tests", self.total_tests().to_string()),
            ("Succeeded", self.total_succeeded().to_string()),
            ("Failed", self.total_failed().to_string()),
            ("Success Rate", format!("{} %", self.success_rate())),
            ("Failure Rate", format!("{} %", self.failure_rate())),
        ];

        for (key, value) in rows {
            table.add_row(vec![
                Cell::new(key).set_alignment(CellAlignment::Center),
                Cell::new(value).set_alignment(CellAlignment::Center),
            ]);
        }

        table
    }

    /// 失败测试名称列表，没有失败时为 `None`
    pub fn failures_list(&self, painter: Painter) -> Option<String> {
        if !self.has_failures() {
            return None;
        }

        let names: Vec<&str> = self.failed().iter().map(TestOutcome::name).collect();
        Some(format!("{}\n", painter.paint(&names.join(", "), Color::Red)))
    }

    /// 一句话总结
    pub fn one_line_summary(&self) -> String {
        let total = self.total_tests();
        let failed = self.total_failed();

        if failed == 0 {
            return format!("All {} tests have passed!", total);
        }
        if failed == total {
            return format!("All {} tests have failed.", total);
        }

        let (test_plural, have_plural) = if failed == 1 {
            ("test", "has")
        } else {
            ("tests", "have")
        };
        format!(
            "{} {} out of {} {} failed.",
            failed, test_plural, total, have_plural
        )
    }

    fn summary_color(&self) -> Color {
        if self.has_failures() {
            Color::Red
        } else {
            Color::Green
        }
    }
}

fn format_outcome(outcome: &TestOutcome, painter: Painter) -> String {
    match outcome.error() {
        None => format!("{} {}", painter.paint("[✔]", Color::Green), outcome.name()),
        Some(error) => format!(
            "{} {}:\n\t{} {}",
            painter.paint("[X]", Color::Red),
            outcome.name(),
            cause_tag(error, painter),
            painter.paint(error.message(), Color::Yellow)
        ),
    }
}

/// 断言失败显示固定标签，其他错误尽量显示 `[文件:行号]`
fn cause_tag(error: &StructuredError, painter: Painter) -> String {
    if error.is_assertion_failure() {
        return painter.paint("[Assertion Failed]", Color::Cyan);
    }

    match error.location() {
        Some(location) => painter.paint(&format!("[{}]", location), Color::Blue),
        None => String::new(),
    }
}

use crate::runner::TestOutcome;
use serde::Serialize;

/// 未设置标题时使用的默认标题
pub const DEFAULT_TITLE: &str = "Test Results";

/// 可被汇总的测试结果集合
///
/// 支持单个结果、一组结果，以及多个套件的结果（展开一层）。
pub trait IntoOutcomes {
    fn into_outcomes(self) -> Vec<TestOutcome>;
}

impl IntoOutcomes for TestOutcome {
    fn into_outcomes(self) -> Vec<TestOutcome> {
        vec![self]
    }
}

impl IntoOutcomes for Vec<TestOutcome> {
    fn into_outcomes(self) -> Vec<TestOutcome> {
        self
    }
}

impl IntoOutcomes for &[TestOutcome] {
    fn into_outcomes(self) -> Vec<TestOutcome> {
        self.to_vec()
    }
}

impl IntoOutcomes for Vec<Vec<TestOutcome>> {
    fn into_outcomes(self) -> Vec<TestOutcome> {
        self.into_iter().flatten().collect()
    }
}

impl IntoOutcomes for &[Vec<TestOutcome>] {
    fn into_outcomes(self) -> Vec<TestOutcome> {
        self.iter().flatten().cloned().collect()
    }
}

/// 测试结果汇总（只读视图，标题除外）
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    title: String,
    outcomes: Vec<TestOutcome>,
    succeeded: Vec<TestOutcome>,
    failed: Vec<TestOutcome>,
    success_rate: f64,
    failure_rate: f64,
}

impl ReportSummary {
    pub fn new(outcomes: impl IntoOutcomes) -> Self {
        let outcomes = outcomes.into_outcomes();
        let (succeeded, failed): (Vec<TestOutcome>, Vec<TestOutcome>) =
            outcomes.iter().cloned().partition(TestOutcome::succeeded);

        let total = outcomes.len();
        let success_rate = percentage(succeeded.len(), total);
        let failure_rate = percentage(failed.len(), total);

        Self {
            title: DEFAULT_TITLE.to_string(),
            outcomes,
            succeeded,
            failed,
            success_rate,
            failure_rate,
        }
    }

    /// 设置标题（作为横幅打印）
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn outcomes(&self) -> &[TestOutcome] {
        &self.outcomes
    }

    pub fn succeeded(&self) -> &[TestOutcome] {
        &self.succeeded
    }

    pub fn failed(&self) -> &[TestOutcome] {
        &self.failed
    }

    pub fn total_tests(&self) -> usize {
        self.outcomes.len()
    }

    pub fn total_succeeded(&self) -> usize {
        self.succeeded.len()
    }

    pub fn total_failed(&self) -> usize {
        self.failed.len()
    }

    /// 成功率（百分比，保留两位小数）
    pub fn success_rate(&self) -> f64 {
        self.success_rate
    }

    pub fn failure_rate(&self) -> f64 {
        self.failure_rate
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// 没有任何结果时返回 0
fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 / total as f64 * 10000.0).round() / 100.0
}

use crate::Result;
use crate::capture;
use crate::config::SuiteConfig;
use crate::error::{CheckError, ErrorKind, LifecycleViolation};
use crate::report::{ConsoleSink, PrintOptions, ReportSummary, TextSink};
use crate::runner::types::{Hook, HookKind, SuiteOptions, SuiteState, TestOutcome};
use crate::utils::Painter;

/// 未提供名称时使用的套件名
pub const DEFAULT_SUITE_NAME: &str = "N/A";

/// 测试套件：注册钩子、执行测试、生成报告
///
/// 状态只会 Fresh → Running → Finished 单向推进。
///
/// ```
/// use checkup::{SuiteOptions, TestSuite, assert_that};
///
/// let mut suite = TestSuite::new("math", SuiteOptions::quiet());
/// suite.run_test("adds", || {
///     assert_that(1 + 1).equals(2)?;
///     Ok(())
/// }).unwrap();
/// let outcomes = suite.finalize().unwrap();
/// assert!(outcomes[0].succeeded());
/// ```
pub struct TestSuite<'a> {
    name: String,
    options: SuiteOptions,
    outcomes: Vec<TestOutcome>,

    on_start: Vec<Hook<'a>>,
    on_test_start: Vec<Hook<'a>>,
    on_show_results: Vec<Hook<'a>>,
    on_test_finish: Vec<Hook<'a>>,

    has_begun: bool,
    has_finished: bool,

    sink: Box<dyn TextSink + 'a>,
}

impl<'a> TestSuite<'a> {
    pub fn new(name: impl Into<String>, options: SuiteOptions) -> Self {
        Self {
            name: name.into(),
            options,
            outcomes: Vec::new(),
            on_start: Vec::new(),
            on_test_start: Vec::new(),
            on_show_results: Vec::new(),
            on_test_finish: Vec::new(),
            has_begun: false,
            has_finished: false,
            sink: Box::new(ConsoleSink),
        }
    }

    /// 使用默认名称 `N/A`
    pub fn unnamed(options: SuiteOptions) -> Self {
        Self::new(DEFAULT_SUITE_NAME, options)
    }

    pub fn from_config(config: SuiteConfig) -> Self {
        Self::new(config.name, config.options)
    }

    /// 替换输出目的地
    pub fn with_sink(mut self, sink: impl TextSink + 'a) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &SuiteOptions {
        &self.options
    }

    /// 已记录的结果（按注册顺序）
    pub fn outcomes(&self) -> &[TestOutcome] {
        &self.outcomes
    }

    pub fn state(&self) -> SuiteState {
        match (self.has_begun, self.has_finished) {
            (_, true) => SuiteState::Finished,
            (true, false) => SuiteState::Running,
            (false, false) => SuiteState::Fresh,
        }
    }

    /// 注册一组钩子，测试开始后不允许再注册
    pub fn register_hooks<I>(&mut self, kind: HookKind, hooks: I) -> Result<()>
    where
        I: IntoIterator<Item = Hook<'a>>,
    {
        self.check_can_modify()?;

        let list = match kind {
            HookKind::Start => &mut self.on_start,
            HookKind::TestStart => &mut self.on_test_start,
            HookKind::ShowResults => &mut self.on_show_results,
            HookKind::TestFinish => &mut self.on_test_finish,
        };
        let before = list.len();
        list.extend(hooks);
        tracing::trace!(suite = %self.name, %kind, added = list.len() - before, "hooks registered");

        Ok(())
    }

    pub fn on_start(&mut self, hook: impl FnMut() + 'a) -> Result<()> {
        self.register_hooks(HookKind::Start, [Box::new(hook) as Hook<'a>])
    }

    pub fn on_test_start(&mut self, hook: impl FnMut() + 'a) -> Result<()> {
        self.register_hooks(HookKind::TestStart, [Box::new(hook) as Hook<'a>])
    }

    pub fn on_show_results(&mut self, hook: impl FnMut() + 'a) -> Result<()> {
        self.register_hooks(HookKind::ShowResults, [Box::new(hook) as Hook<'a>])
    }

    pub fn on_test_finish(&mut self, hook: impl FnMut() + 'a) -> Result<()> {
        self.register_hooks(HookKind::TestFinish, [Box::new(hook) as Hook<'a>])
    }

    /// 执行一个测试
    ///
    /// 测试体返回 `Err` 或 panic 都记为失败；只有生命周期违规会返回 `Err`。
    pub fn run_test<F>(&mut self, name: impl Into<String>, body: F) -> Result<()>
    where
        F: FnOnce() -> anyhow::Result<()>,
    {
        let name = name.into();
        self.check_can_test(&name)?;
        self.begin_tests();

        run_hooks(&mut self.on_test_start);

        let outcome = match capture::invoke(body) {
            Ok(()) => TestOutcome::passed(&name),
            Err(error) => {
                if self.options.print_errors_on_test
                    && !self.options.quiet
                    && error.kind() != ErrorKind::AssertionFailure
                {
                    tracing::warn!(suite = %self.name, test = %name, "{}", error.describe());
                    self.sink.error_line(&error.describe());
                }
                TestOutcome::failed(&name, error)
            }
        };
        tracing::debug!(suite = %self.name, test = %name, succeeded = outcome.succeeded(), "test finished");
        self.outcomes.push(outcome);

        run_hooks(&mut self.on_test_finish);

        Ok(())
    }

    /// 结束测试：触发 on-show-results 钩子，生成（并按需打印）报告，返回全部结果
    pub fn finalize(&mut self) -> Result<Vec<TestOutcome>> {
        self.check_can_generate_results()?;

        run_hooks(&mut self.on_show_results);
        self.has_finished = true;

        let summary = self.produce_report(!self.options.quiet)?;
        tracing::info!(
            suite = %self.name,
            total = summary.total_tests(),
            failed = summary.total_failed(),
            "suite finished"
        );

        Ok(self.outcomes.clone())
    }

    /// 生成报告，`print` 为 true 时按选项输出到文本通道
    pub fn produce_report(&mut self, print: bool) -> Result<ReportSummary> {
        self.check_report_is_ready()?;

        let mut summary = ReportSummary::new(self.outcomes.as_slice());
        summary.set_title(self.name.as_str());

        if print {
            summary.print(
                &PrintOptions::from(&self.options),
                Painter::new(self.options.color),
                self.sink.as_mut(),
            );
        }

        Ok(summary)
    }

    fn check_report_is_ready(&self) -> Result<()> {
        if !self.has_finished {
            return Err(LifecycleViolation::ReportNotReady.into());
        }
        Ok(())
    }

    fn check_can_generate_results(&self) -> Result<()> {
        if !self.has_begun {
            return Err(LifecycleViolation::NoTestsRun.into());
        }
        if self.has_finished {
            return Err(LifecycleViolation::ResultsAlreadyCalculated.into());
        }
        Ok(())
    }

    fn check_can_modify(&self) -> Result<()> {
        if self.has_begun {
            return Err(CheckError::modify_after_started(&self.name));
        }
        Ok(())
    }

    fn check_can_test(&self, name: &str) -> Result<()> {
        if self.has_finished {
            return Err(CheckError::add_after_finished(name));
        }
        Ok(())
    }

    fn begin_tests(&mut self) {
        if !self.has_begun {
            self.has_begun = true;
            tracing::debug!(suite = %self.name, "testing has begun");
            run_hooks(&mut self.on_start);
        }
    }
}

impl Default for TestSuite<'_> {
    fn default() -> Self {
        Self::unnamed(SuiteOptions::default())
    }
}

fn run_hooks(hooks: &mut [Hook<'_>]) {
    for hook in hooks.iter_mut() {
        hook();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::BufferSink;
    use std::cell::RefCell;

    #[test]
    fn test_state_transitions() {
        let mut suite = TestSuite::new("states", SuiteOptions::quiet());
        assert_eq!(suite.state(), SuiteState::Fresh);

        suite.run_test("one", || Ok(())).unwrap();
        assert_eq!(suite.state(), SuiteState::Running);

        suite.finalize().unwrap();
        assert_eq!(suite.state(), SuiteState::Finished);
    }

    #[test]
    fn test_hooks_fire_in_order() {
        let events = RefCell::new(Vec::new());
        {
            let mut suite = TestSuite::new("hooks", SuiteOptions::quiet());
            suite.on_start(|| events.borrow_mut().push("start")).unwrap();
            suite.on_test_start(|| events.borrow_mut().push("test-start")).unwrap();
            suite.on_test_finish(|| events.borrow_mut().push("test-finish")).unwrap();
            suite.on_show_results(|| events.borrow_mut().push("show-results")).unwrap();

            suite.run_test("a", || Ok(())).unwrap();
            suite
                .run_test("b", || Err(anyhow::anyhow!("boom")))
                .unwrap();
            suite.finalize().unwrap();
        }

        assert_eq!(
            events.into_inner(),
            vec![
                "start",
                "test-start",
                "test-finish",
                "test-start",
                "test-finish",
                "show-results",
            ]
        );
    }

    #[test]
    fn test_echoes_non_assertion_errors() {
        let mut sink = BufferSink::new();
        {
            let options = SuiteOptions {
                print_errors_on_test: true,
                ..SuiteOptions::silent_report()
            };
            let mut suite = TestSuite::new("echo", options).with_sink(&mut sink);
            suite
                .run_test("assertion", || Err(CheckError::failure("expected 'a', got 'b'").into()))
                .unwrap();
            suite
                .run_test("thrown", || Err(anyhow::anyhow!("Error Thrown!")))
                .unwrap();
        }

        assert_eq!(sink.errors(), &["Error: Error Thrown!".to_string()]);
    }

    #[test]
    fn test_quiet_suppresses_echo() {
        let mut sink = BufferSink::new();
        {
            let options = SuiteOptions {
                quiet: true,
                print_errors_on_test: true,
                ..SuiteOptions::default()
            };
            let mut suite = TestSuite::new("quiet", options).with_sink(&mut sink);
            suite
                .run_test("thrown", || Err(anyhow::anyhow!("Error Thrown!")))
                .unwrap();
            suite.finalize().unwrap();
        }

        assert!(sink.is_empty());
    }

    #[test]
    fn test_default_name() {
        assert_eq!(TestSuite::default().name(), DEFAULT_SUITE_NAME);
    }
}

//! 每个输出开关单独打开时，报告只包含对应段落
use checkup::{BufferSink, SuiteOptions, TestSuite, assert_that};

type Scenario = fn(SuiteOptions, &mut BufferSink);

/// 两个失败（一个断言、一个 panic）加一个通过
fn tests_with_failures(options: SuiteOptions, sink: &mut BufferSink) {
    let mut suite = TestSuite::new("test", options).with_sink(sink);
    suite
        .run_test("assertTrue", || Ok(assert_that(true).is_true()?))
        .unwrap();
    suite
        .run_test("assertTrueAndFails", || Ok(assert_that(false).is_true()?))
        .unwrap();
    suite
        .run_test("assertButFailureOccurs", || panic!("Error Thrown!"))
        .unwrap();
    suite.finalize().unwrap();
}

fn tests_without_failures(options: SuiteOptions, sink: &mut BufferSink) {
    let mut suite = TestSuite::new("test", options).with_sink(sink);
    suite
        .run_test("assertTrue", || Ok(assert_that(true).is_true()?))
        .unwrap();
    suite
        .run_test("assertTrueAndFails", || Ok(assert_that(false).is_false()?))
        .unwrap();
    suite
        .run_test("assert1is1", || Ok(assert_that(1).equals(1)?))
        .unwrap();
    suite.finalize().unwrap();
}

fn singular_test_with_failure(options: SuiteOptions, sink: &mut BufferSink) {
    let mut suite = TestSuite::new("test", options).with_sink(sink);
    suite
        .run_test("assertTrue", || Ok(assert_that(false).is_true()?))
        .unwrap();
    suite.finalize().unwrap();
}

fn singular_test_without_failure(options: SuiteOptions, sink: &mut BufferSink) {
    let mut suite = TestSuite::new("test", options).with_sink(sink);
    suite
        .run_test("assertTrue", || Ok(assert_that(true).is_true()?))
        .unwrap();
    suite.finalize().unwrap();
}

const SCENARIOS: [(&str, Scenario); 4] = [
    ("singularFails", singular_test_with_failure),
    ("singularPasses", singular_test_without_failure),
    ("multipleFailures", tests_with_failures),
    ("multiplePasses", tests_without_failures),
];

/// 在 `enable` 打开的选项下运行场景，返回（普通输出，错误输出）
fn capture(scenario: Scenario, enable: fn(&mut SuiteOptions)) -> (String, Vec<String>) {
    let mut options = SuiteOptions {
        color: false,
        ..SuiteOptions::silent_report()
    };
    enable(&mut options);

    let mut sink = BufferSink::new();
    scenario(options, &mut sink);
    (sink.plain_output(), sink.errors().to_vec())
}

fn assert_contains_all(output: &str, expected: &[&str], context: &str) {
    for needle in expected {
        assert!(
            output.contains(needle),
            "{}: expected output to contain {:?}\n---\n{}",
            context,
            needle,
            output
        );
    }
}

#[test]
fn test_all_sections_disabled_prints_nothing() {
    for (label, scenario) in SCENARIOS {
        let (output, errors) = capture(scenario, |_| {});
        assert!(output.is_empty(), "{}: {}", label, output);
        assert!(errors.is_empty(), "{}: {:?}", label, errors);
    }
}

#[test]
fn test_print_report_summary() {
    let expected = [
        "All 1 tests have failed",
        "All 1 tests have passed",
        "2 tests out of 3 have failed",
        "All 3 tests have passed",
    ];

    for ((label, scenario), expected) in SCENARIOS.into_iter().zip(expected) {
        let (output, _) = capture(scenario, |o| o.print_report_summary = true);
        assert_contains_all(&output, &[expected], label);
        assert!(!output.contains("Tests:"), "{}", label);
    }
}

#[test]
fn test_print_report_summary_table() {
    let expected: [&[&str]; 4] = [
        &["Total Tests", "Succeeded", "Failed", "0 %", "100 %"],
        &["Total Tests", "Succeeded", "Failed", "100 %", "0 %"],
        &["Total Tests", "33.33 %", "66.67 %"],
        &["Total Tests", "100 %", "0 %"],
    ];

    for ((label, scenario), expected) in SCENARIOS.into_iter().zip(expected) {
        let (output, _) = capture(scenario, |o| o.print_report_summary_table = true);
        assert_contains_all(&output, expected, label);
        assert!(!output.contains("have passed"), "{}", label);
    }
}

#[test]
fn test_print_report_banner() {
    for (label, scenario) in SCENARIOS {
        let (output, _) = capture(scenario, |o| o.print_report_banner = true);
        assert_contains_all(&output, &["==  - - test - - =="], label);
        assert!(!output.contains("Total Tests"), "{}", label);
    }
}

#[test]
fn test_print_report_failed_tests() {
    let expected: [&[&str]; 4] = [
        &["Failed Tests:"],
        &[],
        &["Failed Tests:", "assertTrueAndFails, assertButFailureOccurs"],
        &[],
    ];

    for ((label, scenario), expected) in SCENARIOS.into_iter().zip(expected) {
        let (output, _) = capture(scenario, |o| o.print_report_failed_tests = true);
        assert_contains_all(&output, expected, label);
        if expected.is_empty() {
            assert!(output.is_empty(), "{}: {}", label, output);
        }
    }
}

#[test]
fn test_print_errors_on_test() {
    let expected: [&[&str]; 4] = [&[], &[], &["Error: Error Thrown!"], &[]];

    for ((label, scenario), expected) in SCENARIOS.into_iter().zip(expected) {
        let (output, errors) = capture(scenario, |o| o.print_errors_on_test = true);
        assert_eq!(errors, expected, "{}", label);
        assert!(output.is_empty(), "{}: {}", label, output);
    }
}

#[test]
fn test_print_report_individual_test_results() {
    let expected: [&[&str]; 4] = [
        &["[X] assertTrue", "[Assertion Failed]"],
        &["[✔] assertTrue"],
        &[
            "[✔] assertTrue",
            "[X] assertTrueAndFails:",
            "[Assertion Failed]",
            "[X] assertButFailureOccurs:",
            "[settings_test.rs:",
        ],
        &["[✔] assertTrue", "[✔] assertTrueAndFails", "[✔] assert1is1"],
    ];

    for ((label, scenario), expected) in SCENARIOS.into_iter().zip(expected) {
        let (output, _) = capture(scenario, |o| {
            o.print_report_individual_test_results = true
        });
        assert_contains_all(&output, expected, label);
    }
}

#[test]
fn test_quiet_overrides_every_flag() {
    for (label, scenario) in SCENARIOS {
        let (output, errors) = capture(scenario, |o| {
            *o = SuiteOptions {
                quiet: true,
                print_errors_on_test: true,
                ..SuiteOptions::default()
            }
        });
        assert!(output.is_empty(), "{}: {}", label, output);
        assert!(errors.is_empty(), "{}: {:?}", label, errors);
    }
}

// End-to-end checks on rendered JUnit XML documents.

use std::time::Duration;

use proptest::prelude::*;
use verdict::{
    junit_xml_report, Diagnostic, File, Pos, ReportError, Run, SourceRange, Sources, Status, Suite,
    FAILED_TEST_SUMMARY,
};

fn render(suite: &Suite) -> String {
    render_with(suite, &Sources::new())
}

fn render_with(suite: &Suite, sources: &Sources) -> String {
    String::from_utf8(junit_xml_report(suite, sources).unwrap()).unwrap()
}

#[test]
fn no_tests() {
    let suite = Suite::new(Status::Pass);
    assert_eq!(
        render(&suite),
        r#"<?xml version="1.0" encoding="UTF-8"?><testsuites></testsuites>"#
    );
}

#[test]
fn one_passing_test() {
    let suite = Suite::new(Status::Skip).with_file(
        File::new("test_name.tftest.hcl", Status::Skip)
            .with_run(Run::new("test_one", Status::Pass)),
    );
    assert_eq!(
        render(&suite),
        r#"<?xml version="1.0" encoding="UTF-8"?><testsuites>
  <testsuite name="test_name.tftest.hcl" tests="1" skipped="0" failures="0" errors="0">
    <testcase name="test_one" classname="test_name.tftest.hcl"></testcase>
  </testsuite>
</testsuites>"#
    );
}

#[test]
fn one_skipped_test() {
    let suite = Suite::new(Status::Skip).with_file(
        File::new("test_name.tftest.hcl", Status::Skip)
            .with_run(Run::new("test_one", Status::Skip)),
    );
    assert_eq!(
        render(&suite),
        r#"<?xml version="1.0" encoding="UTF-8"?><testsuites>
  <testsuite name="test_name.tftest.hcl" tests="1" skipped="1" failures="0" errors="0">
    <testcase name="test_one" classname="test_name.tftest.hcl">
      <skipped></skipped>
    </testcase>
  </testsuite>
</testsuites>"#
    );
}

#[test]
fn one_failed_test() {
    let suite = Suite::new(Status::Fail).with_file(
        File::new("test_name.tftest.hcl", Status::Fail)
            .with_run(Run::new("test_one", Status::Fail)),
    );
    assert_eq!(
        render(&suite),
        r#"<?xml version="1.0" encoding="UTF-8"?><testsuites>
  <testsuite name="test_name.tftest.hcl" tests="1" skipped="0" failures="1" errors="0">
    <testcase name="test_one" classname="test_name.tftest.hcl">
      <failure message="Test run failed"></failure>
    </testcase>
  </testsuite>
</testsuites>"#
    );
}

#[test]
fn three_tests_each_different_status() {
    let suite = Suite::new(Status::Fail).with_file(
        File::new("test_name.tftest.hcl", Status::Fail)
            .with_run(Run::new("test_one", Status::Pass))
            .with_run(Run::new("test_two", Status::Skip))
            .with_run(Run::new("test_three", Status::Fail)),
    );
    assert_eq!(
        render(&suite),
        r#"<?xml version="1.0" encoding="UTF-8"?><testsuites>
  <testsuite name="test_name.tftest.hcl" tests="3" skipped="1" failures="1" errors="0">
    <testcase name="test_one" classname="test_name.tftest.hcl"></testcase>
    <testcase name="test_two" classname="test_name.tftest.hcl">
      <skipped></skipped>
    </testcase>
    <testcase name="test_three" classname="test_name.tftest.hcl">
      <failure message="Test run failed"></failure>
    </testcase>
  </testsuite>
</testsuites>"#
    );
}

#[test]
fn multiple_test_files_with_various_tests() {
    // Inserted out of order on purpose.
    let suite = Suite::new(Status::Fail)
        .with_file(
            File::new("test_file_two.tftest.hcl", Status::Fail)
                .with_run(Run::new("test_two", Status::Skip))
                .with_run(Run::new("test_three", Status::Fail)),
        )
        .with_file(
            File::new("test_file_one.tftest.hcl", Status::Pass)
                .with_run(Run::new("test_one", Status::Pass)),
        );
    assert_eq!(
        render(&suite),
        r#"<?xml version="1.0" encoding="UTF-8"?><testsuites>
  <testsuite name="test_file_one.tftest.hcl" tests="1" skipped="0" failures="0" errors="0">
    <testcase name="test_one" classname="test_file_one.tftest.hcl"></testcase>
  </testsuite>
  <testsuite name="test_file_two.tftest.hcl" tests="2" skipped="1" failures="1" errors="0">
    <testcase name="test_two" classname="test_file_two.tftest.hcl">
      <skipped></skipped>
    </testcase>
    <testcase name="test_three" classname="test_file_two.tftest.hcl">
      <failure message="Test run failed"></failure>
    </testcase>
  </testsuite>
</testsuites>"#
    );
}

#[test]
fn file_without_runs_is_an_empty_suite() {
    let suite = Suite::new(Status::Pass).with_file(File::new("empty.tftest.hcl", Status::Pass));
    assert_eq!(
        render(&suite),
        r#"<?xml version="1.0" encoding="UTF-8"?><testsuites>
  <testsuite name="empty.tftest.hcl" tests="0" skipped="0" failures="0" errors="0"></testsuite>
</testsuites>"#
    );
}

#[test]
fn diagnostics_are_triaged_with_source_context() {
    let mut sources = Sources::new();
    sources.insert(
        "main.tftest.hcl".to_string(),
        b"run \"check\" {\n  assert {\n    condition = 1 < 0\n  }\n}\n".to_vec(),
    );

    let assertion = Diagnostic::error(FAILED_TEST_SUMMARY, "Condition & friends were <false>.")
        .with_subject(SourceRange::new(
            "main.tftest.hcl",
            Pos::new(3, 17, 40),
            Pos::new(3, 22, 45),
        ));
    let suite = Suite::new(Status::Error).with_file(
        File::new("main.tftest.hcl", Status::Error)
            .with_run(
                Run::new("check", Status::Fail)
                    .with_duration(Duration::from_millis(250))
                    .with_diagnostic(Diagnostic::warning("Value is deprecated", ""))
                    .with_diagnostic(assertion),
            )
            .with_run(
                Run::new("broken", Status::Error)
                    .with_diagnostic(Diagnostic::warning("Value is deprecated", ""))
                    .with_diagnostic(Diagnostic::error("Reference to undeclared input", "")),
            ),
    );

    assert_eq!(
        render_with(&suite, &sources),
        r#"<?xml version="1.0" encoding="UTF-8"?><testsuites>
  <testsuite name="main.tftest.hcl" tests="2" skipped="0" failures="1" errors="1">
    <testcase name="check" classname="main.tftest.hcl" time="0.25">
      <failure message="Test run failed"><![CDATA[
Error: Test assertion failed

  on main.tftest.hcl line 3:
     3:     condition = 1 < 0

Condition & friends were <false>.
]]></failure>
      <system-err><![CDATA[
Warning: Value is deprecated
]]></system-err>
    </testcase>
    <testcase name="broken" classname="main.tftest.hcl">
      <error message="Encountered an error"><![CDATA[
Warning: Value is deprecated

Error: Reference to undeclared input
]]></error>
    </testcase>
  </testsuite>
</testsuites>"#
    );
}

#[test]
fn pending_suite_is_a_contract_violation() {
    let suite = Suite::new(Status::Pending).with_file(
        File::new("a.tftest.hcl", Status::Pass).with_run(Run::new("one", Status::Pass)),
    );
    let err = junit_xml_report(&suite, &Sources::new()).unwrap_err();
    assert!(matches!(err, ReportError::PendingSuite));
    assert!(err.is_contract_violation());
}

#[test]
fn control_characters_in_error_bodies_are_replaced() {
    let suite = Suite::new(Status::Error).with_file(
        File::new("main.tftest.hcl", Status::Error).with_run(
            Run::new("coloured", Status::Error).with_diagnostic(Diagnostic::error(
                "Provider produced invalid output",
                "value was \"\u{1b}[31mred\u{1b}[0m\" \u{0}",
            )),
        ),
    );
    assert_eq!(
        render(&suite),
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8"?><testsuites>"#,
            "\n",
            r#"  <testsuite name="main.tftest.hcl" tests="1" skipped="0" "#,
            r#"failures="0" errors="1">"#,
            "\n",
            r#"    <testcase name="coloured" classname="main.tftest.hcl">"#,
            "\n",
            r#"      <error message="Encountered an error"><![CDATA["#,
            "\nError: Provider produced invalid output\n",
            "\nvalue was \"\u{FFFD}[31mred\u{FFFD}[0m\" \u{FFFD}\n",
            "]]></error>\n",
            "    </testcase>\n",
            "  </testsuite>\n",
            "</testsuites>",
        )
    );
}

#[test]
fn pending_run_in_finished_suite_is_a_bare_case() {
    let suite = Suite::new(Status::Pass).with_file(
        File::new("a.tftest.hcl", Status::Pass).with_run(Run::new("later", Status::Pending)),
    );
    assert_eq!(
        render(&suite),
        r#"<?xml version="1.0" encoding="UTF-8"?><testsuites>
  <testsuite name="a.tftest.hcl" tests="1" skipped="0" failures="0" errors="0">
    <testcase name="later" classname="a.tftest.hcl"></testcase>
  </testsuite>
</testsuites>"#
    );
}

fn status_strategy() -> impl Strategy<Value = Status> {
    prop_oneof![
        Just(Status::Pass),
        Just(Status::Skip),
        Just(Status::Fail),
        Just(Status::Error),
    ]
}

fn file_strategy() -> impl Strategy<Value = Vec<(String, Vec<Status>)>> {
    prop::collection::btree_map(
        "[a-zA-Z0-9_.]{1,12}",
        prop::collection::vec(status_strategy(), 0..5),
        0..8,
    )
    .prop_map(|files| files.into_iter().collect::<Vec<_>>())
}

fn build_suite(files: &[(String, Vec<Status>)]) -> Suite {
    files.iter().fold(Suite::new(Status::Pass), |suite, (name, statuses)| {
        let file = statuses
            .iter()
            .enumerate()
            .fold(File::new(name.clone(), Status::Pass), |file, (i, status)| {
                file.with_run(Run::new(format!("run_{i}"), *status))
            });
        suite.with_file(file)
    })
}

fn attr<'a>(line: &'a str, name: &str) -> &'a str {
    let key = format!(" {name}=\"");
    let start = line.find(&key).unwrap() + key.len();
    let end = start + line[start..].find('"').unwrap();
    &line[start..end]
}

proptest! {
    #[test]
    fn output_is_independent_of_insertion_order(files in file_strategy()) {
        let mut reversed = files.clone();
        reversed.reverse();

        let forward = render(&build_suite(&files));
        let backward = render(&build_suite(&reversed));
        prop_assert_eq!(&forward, &backward);

        let names: Vec<&str> = forward
            .lines()
            .filter(|line| line.trim_start().starts_with("<testsuite "))
            .map(|line| attr(line, "name"))
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        prop_assert_eq!(names, sorted);
    }

    #[test]
    fn suite_counts_match_cases(files in file_strategy()) {
        let xml = render(&build_suite(&files));
        prop_assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?><testsuites>"#));
        prop_assert!(xml.ends_with("</testsuites>"));
        prop_assert_eq!(xml.matches("<testsuites>").count(), 1);

        let mut lines = xml.lines();
        while let Some(line) = lines.next() {
            if !line.trim_start().starts_with("<testsuite ") {
                continue;
            }
            let tests: usize = attr(line, "tests").parse().unwrap();
            let skipped: usize = attr(line, "skipped").parse().unwrap();
            let failures: usize = attr(line, "failures").parse().unwrap();
            let errors: usize = attr(line, "errors").parse().unwrap();

            let (mut cases, mut seen_skipped, mut seen_failures, mut seen_errors) = (0, 0, 0, 0);
            if !line.ends_with("</testsuite>") {
                for inner in lines.by_ref() {
                    let inner = inner.trim_start();
                    if inner.starts_with("</testsuite>") {
                        break;
                    }
                    if inner.starts_with("<testcase ") {
                        cases += 1;
                    }
                    if inner.starts_with("<skipped>") {
                        seen_skipped += 1;
                    }
                    if inner.starts_with("<failure ") {
                        seen_failures += 1;
                    }
                    if inner.starts_with("<error ") {
                        seen_errors += 1;
                    }
                }
            }
            prop_assert_eq!(tests, cases);
            prop_assert_eq!(skipped, seen_skipped);
            prop_assert_eq!(failures, seen_failures);
            prop_assert_eq!(errors, seen_errors);
        }
    }
}

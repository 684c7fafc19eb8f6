//! Run directory lock tests: written runs verify offline, and any edit to
//! the normative report is caught.

use lock_tests::fixtures::{double_square, random_graph};
use matchbound_harness::report_dir::{verify_run_dir, write_run_dir, RunDirVerifyError};
use matchbound_harness::runner::run_instance;
use matchbound_search::observer::NoopObserver;
use matchbound_search::policy::SearchPolicyV1;

#[test]
fn written_runs_verify() {
    for graph in [double_square(), random_graph(11, 9, 0.3)] {
        let outcome =
            run_instance(graph, &SearchPolicyV1::default(), &mut NoopObserver, true).unwrap();
        let dir = tempfile::tempdir().unwrap();
        write_run_dir(&outcome, dir.path()).unwrap();

        assert_eq!(verify_run_dir(dir.path()).unwrap(), outcome.report.digest);
        let dot = std::fs::read_to_string(dir.path().join("matching.dot")).unwrap();
        assert_eq!(
            dot.matches("included").count(),
            outcome.result.best_state().unwrap().matching_size()
        );
    }
}

#[test]
fn identical_runs_write_identical_normative_files() {
    let a = tempfile::tempdir().unwrap();
    let b = tempfile::tempdir().unwrap();
    for dir in [&a, &b] {
        let outcome = run_instance(
            double_square(),
            &SearchPolicyV1::default(),
            &mut NoopObserver,
            true,
        )
        .unwrap();
        write_run_dir(&outcome, dir.path()).unwrap();
    }
    for name in ["report_digest.txt", "trace.json", "matching.dot"] {
        assert_eq!(
            std::fs::read(a.path().join(name)).unwrap(),
            std::fs::read(b.path().join(name)).unwrap(),
            "{name} differs between identical runs"
        );
    }
}

#[test]
fn edited_report_fails_verification() {
    let outcome = run_instance(
        double_square(),
        &SearchPolicyV1::default(),
        &mut NoopObserver,
        false,
    )
    .unwrap();
    let dir = tempfile::tempdir().unwrap();
    write_run_dir(&outcome, dir.path()).unwrap();

    let path = dir.path().join("report.json");
    let text = std::fs::read_to_string(&path).unwrap();
    let edited = text.replacen("\"matching_size\":3", "\"matching_size\":4", 1);
    assert_ne!(text, edited);
    std::fs::write(&path, edited).unwrap();

    assert!(matches!(
        verify_run_dir(dir.path()),
        Err(RunDirVerifyError::Report(_))
    ));
}

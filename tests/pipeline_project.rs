// tests/pipeline_project.rs

use std::path::Path;

use recomp::{ChangeState, InputRecord, Pipeline, RecompError};
use recomp_test_utils::builders::SettingsBuilder;
use recomp_test_utils::fake_engine::{FakeEngine, SharedReporter};
use recomp_test_utils::init_tracing;

#[tokio::test]
async fn project_pass_defers_all_output_to_end_of_input() {
    init_tracing();

    let engine = FakeEngine::new();
    let options = SettingsBuilder::new().build();
    let mut pipeline = Pipeline::new(engine, options);

    let (mut run, mut primary, _declarations) = pipeline.start().expect("start run");

    run.feed(InputRecord::new("a.ts", "1")).expect("feed a.ts");
    run.feed(InputRecord::new("b.ts", "2")).expect("feed b.ts");

    // Nothing is emitted until the single whole-project pass runs.
    assert!(primary.try_recv().is_none());

    run.finish().expect("finish run");

    let mut names = Vec::new();
    while let Some(output) = primary.recv().await {
        names.push(output.path.file_name().and_then(|n| n.to_str()).map(String::from));
    }
    assert_eq!(
        names,
        vec![Some("a.out".to_string()), Some("b.out".to_string())]
    );
}

#[tokio::test]
async fn unchanged_generation_recompiles_the_full_file_set_without_reparsing() {
    init_tracing();

    let engine = FakeEngine::new();
    let options = SettingsBuilder::new().build();
    let mut pipeline = Pipeline::new(engine.clone(), options);

    let (mut run, primary, _declarations) = pipeline.start().expect("start run 1");
    run.feed(InputRecord::new("a.ts", "1")).expect("feed a.ts");
    run.feed(InputRecord::new("b.ts", "2")).expect("feed b.ts");
    run.finish().expect("finish run 1");
    assert_eq!(primary.collect().await.len(), 2);
    assert_eq!(engine.parse_count(), 2);

    // Same inputs again: parsed representations are reused, but the project
    // pass still covers the whole current generation.
    let (mut run, primary, _declarations) = pipeline.start().expect("start run 2");
    run.feed(InputRecord::new("a.ts", "1")).expect("feed a.ts");
    run.feed(InputRecord::new("b.ts", "2")).expect("feed b.ts");
    run.finish().expect("finish run 2");
    assert_eq!(primary.collect().await.len(), 2);
    assert_eq!(engine.parse_count(), 2, "no reparse for unchanged files");

    assert_eq!(pipeline.file_change("a.ts").state, ChangeState::Equal);
}

#[tokio::test]
async fn declaration_outputs_flow_on_their_own_channel() {
    init_tracing();

    let engine = FakeEngine::new();
    let options = SettingsBuilder::new().declarations(true).build();
    let mut pipeline = Pipeline::new(engine, options);

    let (mut run, primary, declarations) = pipeline.start().expect("start run");
    run.feed(InputRecord::new("a.ts", "1")).expect("feed a.ts");
    run.finish().expect("finish run");

    let primary_outputs = primary.collect().await;
    let declaration_outputs = declarations.collect().await;

    assert_eq!(primary_outputs.len(), 1);
    assert_eq!(declaration_outputs.len(), 1);

    // Channel pairing: both outputs reference the same source entity.
    assert_eq!(primary_outputs[0].source, declaration_outputs[0].source);
    assert_eq!(
        declaration_outputs[0].path.file_name().and_then(|n| n.to_str()),
        Some("a.decl")
    );
}

#[tokio::test]
async fn sorted_output_uses_the_caller_supplied_comparator() {
    init_tracing();

    let engine = FakeEngine::new();
    let options = SettingsBuilder::new().sorted_output(true).build();
    let mut pipeline =
        Pipeline::new(engine, options).with_output_order(|a, b| b.path.cmp(&a.path));

    let (mut run, primary, _declarations) = pipeline.start().expect("start run");
    run.feed(InputRecord::new("a.ts", "1")).expect("feed a.ts");
    run.feed(InputRecord::new("b.ts", "2")).expect("feed b.ts");
    run.feed(InputRecord::new("c.ts", "3")).expect("feed c.ts");
    run.finish().expect("finish run");

    let names: Vec<_> = primary
        .collect()
        .await
        .into_iter()
        .filter_map(|o| o.path.file_name().and_then(|n| n.to_str()).map(String::from))
        .collect();

    assert_eq!(names, vec!["c.out", "b.out", "a.out"]);
}

#[tokio::test]
async fn fail_fast_project_pass_reports_but_emits_nothing() {
    init_tracing();

    let engine = FakeEngine::new();
    engine.mark_malformed("bad.ts");

    let options = SettingsBuilder::new().fail_fast(true).build();
    let mut pipeline = Pipeline::new(engine, options);

    let reporter = SharedReporter::new();
    let (mut run, primary, _declarations) = pipeline
        .start_with_reporter(Box::new(reporter.clone()))
        .expect("start run");

    run.feed(InputRecord::new("a.ts", "1")).expect("feed a.ts");
    run.feed(InputRecord::new("bad.ts", "@@@")).expect("feed bad.ts");

    let err = run.finish().expect_err("fail_fast fails the pass");
    assert!(matches!(err, RecompError::CompileFailed(_)));

    assert_eq!(reporter.error_count(), 1);
    assert!(primary.collect().await.is_empty());
}

#[tokio::test]
async fn without_fail_fast_the_pass_completes_and_good_files_emit() {
    init_tracing();

    let engine = FakeEngine::new();
    engine.mark_malformed("bad.ts");

    let options = SettingsBuilder::new().build();
    let mut pipeline = Pipeline::new(engine, options);

    let reporter = SharedReporter::new();
    let (mut run, primary, _declarations) = pipeline
        .start_with_reporter(Box::new(reporter.clone()))
        .expect("start run");

    run.feed(InputRecord::new("a.ts", "1")).expect("feed a.ts");
    run.feed(InputRecord::new("bad.ts", "@@@")).expect("feed bad.ts");
    run.feed(InputRecord::new("c.ts", "3")).expect("feed c.ts");
    run.finish().expect("pass completes despite errors");

    assert_eq!(reporter.error_count(), 1);
    assert_eq!(primary.collect().await.len(), 2);
}

#[tokio::test]
async fn relative_outputs_resolve_against_base_dir_and_out_dir() {
    init_tracing();

    let engine = FakeEngine::new();
    let options = SettingsBuilder::new().out_dir("build").build();
    let mut pipeline = Pipeline::new(engine, options);

    let (mut run, primary, _declarations) = pipeline.start().expect("start run");
    run.feed(InputRecord::new("src/a.ts", "1").with_base_dir("proj"))
        .expect("feed a.ts");
    run.finish().expect("finish run");

    let outputs = primary.collect().await;
    assert_eq!(outputs[0].path, Path::new("proj/build/a.out"));
}

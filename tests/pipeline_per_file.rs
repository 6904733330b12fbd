// tests/pipeline_per_file.rs

use recomp::{InputRecord, Pipeline, RecompError};
use recomp_test_utils::builders::SettingsBuilder;
use recomp_test_utils::fake_engine::{FakeEngine, SharedReporter};
use recomp_test_utils::{init_tracing, with_timeout};

#[tokio::test]
async fn malformed_file_yields_diagnostics_but_others_still_compile() {
    init_tracing();

    let engine = FakeEngine::new();
    engine.mark_malformed("bad.ts");

    let options = SettingsBuilder::new().isolated_units(true).build();
    let mut pipeline = Pipeline::new(engine, options);

    let reporter = SharedReporter::new();
    let (mut run, primary, _declarations) = pipeline
        .start_with_reporter(Box::new(reporter.clone()))
        .expect("start run");

    run.feed(InputRecord::new("a.ts", "1")).expect("feed a.ts");
    run.feed(InputRecord::new("bad.ts", "@@@")).expect("feed bad.ts");
    run.feed(InputRecord::new("c.ts", "3")).expect("feed c.ts");
    run.finish().expect("finish run");

    let outputs = primary.collect().await;
    let names: Vec<_> = outputs
        .iter()
        .filter_map(|o| o.path.file_name().map(|n| n.to_string_lossy().into_owned()))
        .collect();

    assert_eq!(names, vec!["a.out", "c.out"]);
    assert_eq!(reporter.error_count(), 1);
    assert!(reporter.diagnostics()[0]
        .file
        .as_deref()
        .is_some_and(|f| f == "bad.ts"));
}

#[tokio::test]
async fn outputs_are_emitted_incrementally_as_input_arrives() {
    init_tracing();

    let engine = FakeEngine::new();
    let options = SettingsBuilder::new().isolated_units(true).build();
    let mut pipeline = Pipeline::new(engine, options);

    let (mut run, mut primary, _declarations) = pipeline.start().expect("start run");

    run.feed(InputRecord::new("a.ts", "1")).expect("feed a.ts");

    // Per-file compilation does not wait for end-of-input.
    let first = primary.try_recv().expect("output available before finish");
    assert_eq!(first.path.file_name().and_then(|n| n.to_str()), Some("a.out"));
    assert_eq!(first.content, "compiled:1");
    assert_eq!(first.source.as_deref(), Some("a.ts"));

    run.finish().expect("finish run");
    assert!(with_timeout(primary.recv()).await.is_none());
}

#[tokio::test]
async fn isolated_units_disable_declaration_output() {
    init_tracing();

    let engine = FakeEngine::new();
    // declarations = true is downgraded by validation under isolated_units.
    let options = SettingsBuilder::new()
        .isolated_units(true)
        .declarations(true)
        .build();
    assert!(!options.declarations);

    let mut pipeline = Pipeline::new(engine, options);
    let (mut run, _primary, declarations) = pipeline.start().expect("start run");

    run.feed(InputRecord::new("a.ts", "1")).expect("feed a.ts");
    run.finish().expect("finish run");

    assert!(declarations.collect().await.is_empty());
}

#[tokio::test]
async fn fail_fast_turns_a_bad_file_into_a_hard_failure() {
    init_tracing();

    let engine = FakeEngine::new();
    engine.mark_malformed("bad.ts");

    let options = SettingsBuilder::new()
        .isolated_units(true)
        .fail_fast(true)
        .build();
    let mut pipeline = Pipeline::new(engine, options);

    let reporter = SharedReporter::new();
    let (mut run, primary, _declarations) = pipeline
        .start_with_reporter(Box::new(reporter.clone()))
        .expect("start run");

    run.feed(InputRecord::new("a.ts", "1")).expect("a.ts compiles");

    let err = run
        .feed(InputRecord::new("bad.ts", "@@@"))
        .expect_err("fail_fast surfaces the error");
    assert!(matches!(err, RecompError::CompileFailed(_)));

    // The diagnostic was still delivered before the hard failure.
    assert_eq!(reporter.error_count(), 1);

    drop(run);
    let outputs = primary.collect().await;
    assert_eq!(outputs.len(), 1, "only the file compiled before the failure");
}

#[tokio::test]
async fn undecodable_records_are_reported_and_skipped() {
    init_tracing();

    let engine = FakeEngine::new();
    let options = SettingsBuilder::new().isolated_units(true).build();
    let mut pipeline = Pipeline::new(engine, options);

    let reporter = SharedReporter::new();
    let (mut run, primary, _declarations) = pipeline
        .start_with_reporter(Box::new(reporter.clone()))
        .expect("start run");

    run.feed_bytes("bad.bin", &[0xff, 0xfe, 0x00, 0x80])
        .expect("decode failure does not abort the run");
    run.feed_bytes("a.ts", "let x = 1;".as_bytes())
        .expect("feed a.ts");
    run.finish().expect("finish run");

    assert_eq!(reporter.error_count(), 1);
    assert_eq!(primary.collect().await.len(), 1);
}

#[tokio::test]
async fn byte_order_mark_is_stripped_on_decode() {
    init_tracing();

    let record = InputRecord::from_bytes("a.ts", "\u{feff}let x = 1;".as_bytes())
        .expect("valid UTF-8 with BOM");
    assert_eq!(record.content, "let x = 1;");
}

// tests/incremental_cache.rs

use std::sync::Arc;

use recomp::cache::{ChangeState, FileEntity, IncrementalCache};
use recomp::engine::{CompileEngine, ParsedSource};
use recomp::Options;
use recomp_test_utils::fake_engine::{FakeEngine, FakeParsed};
use recomp_test_utils::init_tracing;

fn new_cache(engine: &Arc<FakeEngine>) -> IncrementalCache {
    let engine = Arc::clone(engine) as Arc<dyn CompileEngine>;
    IncrementalCache::new(engine, Arc::new(Options::default()))
}

#[test]
fn equal_file_across_generations_reuses_parsed_representation() {
    init_tracing();

    let engine = FakeEngine::new();
    let mut cache = new_cache(&engine);

    cache.add(FileEntity::from_content("a.ts", "x"));
    assert_eq!(engine.parse_count(), 1);

    let first = cache.get_file("a.ts").expect("a.ts in generation 0");
    let first_parsed = first.parsed().expect("parsed in generation 0").clone();

    cache.reset();
    cache.add(FileEntity::from_content("a.ts", "x"));

    // No reparse happened, and the representation is reference-identical.
    assert_eq!(engine.parse_count(), 1);
    let second = cache.get_file("a.ts").expect("a.ts in generation 1");
    let second_parsed = second.parsed().expect("parsed in generation 1");
    assert!(ParsedSource::ptr_eq(&first_parsed, second_parsed));

    assert_eq!(cache.get_file_change("a.ts").state, ChangeState::Equal);
}

#[test]
fn modified_file_is_reparsed_with_new_version_tag() {
    init_tracing();

    let engine = FakeEngine::new();
    let mut cache = new_cache(&engine);

    cache.add(FileEntity::from_content("a.ts", "x"));
    let first_parsed = cache
        .get_file("a.ts")
        .and_then(|f| f.parsed().cloned())
        .expect("parsed in generation 0");

    cache.reset();
    cache.add(FileEntity::from_content("a.ts", "y"));

    assert_eq!(engine.parse_count(), 2);
    assert_eq!(cache.get_file_change("a.ts").state, ChangeState::Modified);

    let second = cache.get_file("a.ts").expect("a.ts in generation 1");
    let second_parsed = second.parsed().expect("parsed in generation 1");
    assert!(!ParsedSource::ptr_eq(&first_parsed, second_parsed));

    // The fresh parse is tagged with the generation that produced it.
    let fake = second_parsed
        .downcast_ref::<FakeParsed>()
        .expect("FakeEngine stores FakeParsed");
    assert_eq!(fake.version_tag, "1");
}

#[test]
fn file_missing_from_next_generation_is_deleted() {
    init_tracing();

    let engine = FakeEngine::new();
    let mut cache = new_cache(&engine);

    cache.add(FileEntity::from_content("a.ts", "x"));
    cache.add(FileEntity::from_content("b.ts", "y"));

    cache.reset();
    cache.add(FileEntity::from_content("a.ts", "x"));

    assert_eq!(cache.get_file_change("b.ts").state, ChangeState::Deleted);
    assert!(cache.get_file("b.ts").is_none());
}

#[test]
fn first_generation_files_are_new_and_unknown_paths_are_not_found() {
    init_tracing();

    let engine = FakeEngine::new();
    let mut cache = new_cache(&engine);

    cache.add(FileEntity::from_content("a.ts", "x"));

    assert_eq!(cache.get_file_change("a.ts").state, ChangeState::New);
    assert_eq!(cache.get_file_change("nope.ts").state, ChangeState::NotFound);
}

#[test]
fn generations_two_steps_back_are_unreachable() {
    init_tracing();

    let engine = FakeEngine::new();
    let mut cache = new_cache(&engine);

    cache.add(FileEntity::from_content("old.ts", "x"));
    assert_eq!(cache.version(), 0);

    cache.reset();
    assert_eq!(cache.get_file_change("old.ts").state, ChangeState::Deleted);

    cache.reset();
    assert_eq!(cache.version(), 2);
    assert_eq!(cache.get_file_change("old.ts").state, ChangeState::NotFound);
}

#[test]
fn re_adding_a_path_within_one_generation_supersedes_the_earlier_entry() {
    init_tracing();

    let engine = FakeEngine::new();
    let mut cache = new_cache(&engine);

    cache.add(FileEntity::from_content("a.ts", "x"));
    cache.add(FileEntity::from_content("a.ts", "y"));

    let current = cache.get_file("a.ts").expect("a.ts present");
    assert_eq!(current.content, "y");
    assert_eq!(cache.current_len(), 1);
    // Both inserts materialized.
    assert_eq!(engine.parse_count(), 2);
}

#[test]
fn config_entities_are_cached_but_never_parsed() {
    init_tracing();

    let engine = FakeEngine::new();
    let mut cache = new_cache(&engine);

    cache.add(FileEntity::from_content("project.json", "{}"));

    assert_eq!(engine.parse_count(), 0);
    let config = cache.get_file("project.json").expect("config cached");
    assert!(config.parsed().is_none());
    assert!(cache.current_sources().is_empty());
}

#[test]
fn lookup_is_case_and_separator_insensitive() {
    init_tracing();

    let engine = FakeEngine::new();
    let mut cache = new_cache(&engine);

    cache.add(FileEntity::from_content("Src\\A.ts", "x"));

    let found = cache.get_file("src/a.ts").expect("normalized lookup hits");
    assert_eq!(found.path_original, "Src\\A.ts");
}

use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, Mutex};

use recomp::engine::{CompileEngine, CompileResult, Diagnostic, OutputFile, ParsedSource};
use recomp::{FileEntity, Options, OutputChannel, TargetLevel};

/// The value a [`FakeEngine`] stores behind `ParsedSource`.
///
/// Tests can downcast to check which generation a representation came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeParsed {
    pub path: String,
    pub version_tag: String,
}

/// A fake compile engine that:
/// - records every `parse` call (so reuse vs. reparse is observable)
/// - "compiles" by wrapping the content, emitting one primary output and one
///   declaration output per file
/// - reports an error diagnostic (and emits nothing) for paths marked
///   malformed.
#[derive(Debug, Default)]
pub struct FakeEngine {
    parse_calls: Mutex<Vec<String>>,
    malformed: Mutex<HashSet<String>>,
}

impl FakeEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make `compile_file` / `compile_project` report a syntax error for this
    /// original path.
    pub fn mark_malformed(&self, path: &str) {
        let mut guard = self.malformed.lock().unwrap();
        guard.insert(path.to_string());
    }

    /// Original paths handed to `parse`, in call order.
    pub fn parsed_paths(&self) -> Vec<String> {
        self.parse_calls.lock().unwrap().clone()
    }

    pub fn parse_count(&self) -> usize {
        self.parse_calls.lock().unwrap().len()
    }

    fn is_malformed(&self, path: &str) -> bool {
        self.malformed.lock().unwrap().contains(path)
    }

    fn compile_one(&self, file: &FileEntity) -> CompileResult {
        if self.is_malformed(&file.path_original) {
            return CompileResult {
                outputs: Vec::new(),
                diagnostics: vec![Diagnostic::error(
                    Some(file.path_original.clone()),
                    format!("syntax error in {}", file.path_original),
                )],
            };
        }

        let file_name = Path::new(&file.path_original)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.path_original.clone());
        let stem = file_name.rsplit_once('.').map_or(file_name.as_str(), |(s, _)| s);

        CompileResult {
            outputs: vec![
                OutputFile {
                    path: format!("{stem}.out").into(),
                    content: format!("compiled:{}", file.content),
                    channel: OutputChannel::Primary,
                    source: Some(file.path_normalized.clone()),
                },
                OutputFile {
                    path: format!("{stem}.decl").into(),
                    content: format!("declarations:{}", file.path_original),
                    channel: OutputChannel::Declaration,
                    source: Some(file.path_normalized.clone()),
                },
            ],
            diagnostics: Vec::new(),
        }
    }
}

/// A reporter backed by shared storage, so tests keep a handle to the
/// diagnostics after moving the reporter into a pipeline run.
#[derive(Debug, Clone, Default)]
pub struct SharedReporter {
    diagnostics: Arc<Mutex<Vec<Diagnostic>>>,
}

impl SharedReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.lock().unwrap().clone()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.severity == recomp::Severity::Error)
            .count()
    }
}

impl recomp::reporter::Reporter for SharedReporter {
    fn diagnostic(&mut self, diagnostic: &Diagnostic) {
        self.diagnostics.lock().unwrap().push(diagnostic.clone());
    }
}

impl CompileEngine for FakeEngine {
    fn parse(
        &self,
        path: &str,
        _content: &str,
        _target: TargetLevel,
        version_tag: &str,
    ) -> ParsedSource {
        let mut guard = self.parse_calls.lock().unwrap();
        guard.push(path.to_string());

        ParsedSource::new(FakeParsed {
            path: path.to_string(),
            version_tag: version_tag.to_string(),
        })
    }

    fn compile_project(&self, files: &[Arc<FileEntity>], _options: &Options) -> CompileResult {
        let mut result = CompileResult::default();
        for file in files {
            let one = self.compile_one(file);
            result.outputs.extend(one.outputs);
            result.diagnostics.extend(one.diagnostics);
        }
        result
    }

    fn compile_file(&self, file: &FileEntity, _options: &Options) -> CompileResult {
        self.compile_one(file)
    }
}

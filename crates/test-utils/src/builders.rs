#![allow(dead_code)]

use recomp::{InputRecord, Options, RawSettings, TargetLevel};

/// Builder for [`Options`] to simplify test setup.
pub struct SettingsBuilder {
    raw: RawSettings,
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawSettings::default(),
        }
    }

    pub fn target(mut self, target: TargetLevel) -> Self {
        self.raw.target = Some(target);
        self
    }

    pub fn declarations(mut self, value: bool) -> Self {
        self.raw.declarations = Some(value);
        self
    }

    pub fn isolated_units(mut self, value: bool) -> Self {
        self.raw.isolated_units = Some(value);
        self
    }

    pub fn sorted_output(mut self, value: bool) -> Self {
        self.raw.sorted_output = Some(value);
        self
    }

    pub fn fail_fast(mut self, value: bool) -> Self {
        self.raw.fail_fast = Some(value);
        self
    }

    pub fn out_dir(mut self, dir: &str) -> Self {
        self.raw.out_dir = Some(dir.into());
        self
    }

    pub fn raw(self) -> RawSettings {
        self.raw
    }

    pub fn build(self) -> Options {
        Options::try_from(self.raw).expect("Failed to build valid options from builder")
    }
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Shorthand for an input record with inline content.
pub fn record(path: &str, content: &str) -> InputRecord {
    InputRecord::new(path, content)
}

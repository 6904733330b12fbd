use std::str::FromStr;

use serde::Deserialize;

/// Output language level requested from the engine.
///
/// The engine decides what each level concretely means; the orchestrator only
/// forwards it to `parse` and carries it inside [`crate::config::Options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetLevel {
    Legacy,
    Stable,
    Latest,
}

impl Default for TargetLevel {
    fn default() -> Self {
        TargetLevel::Stable
    }
}

impl FromStr for TargetLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "legacy" => Ok(TargetLevel::Legacy),
            "stable" => Ok(TargetLevel::Stable),
            "latest" => Ok(TargetLevel::Latest),
            other => Err(format!(
                "invalid target: {other} (expected \"legacy\", \"stable\" or \"latest\")"
            )),
        }
    }
}

/// Which of the two output sequences an emitted file belongs to.
///
/// - `Primary`: the main compiled outputs.
/// - `Declaration`: the auxiliary declaration outputs (emitted only when
///   `declarations = true` in the options).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputChannel {
    Primary,
    Declaration,
}

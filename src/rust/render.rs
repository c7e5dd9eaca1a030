//! Terminal presentation of startup status and per-request outcomes.
//!
//! Every function returns the text to print instead of printing it, so the
//! request loop decides where output goes and tests can inspect it.

use colored::*;

use crate::artifacts::{ArtifactInfo, ArtifactLoadError};
use crate::classifier::{PredictError, PredictionResult};

pub fn banner() -> String {
    format!(
        "{}\n{}",
        "🎭 AI-Based Emotion Prediction".bright_magenta().bold(),
        "Analyze emotional tone instantly with advanced NLP models".purple()
    )
}

/// Confirmation shown once both artifacts are loaded.
pub fn loaded(sources: &[ArtifactInfo]) -> String {
    let mut out = format!("{}", "✅ Model Loaded Successfully ✔".green().bold());
    for info in sources {
        // Short digest is enough to tell artifact versions apart
        let digest = info.sha256.get(..12).unwrap_or(&info.sha256);
        out.push_str(&format!(
            "\n   {} ({} bytes, sha256 {})",
            info.path.display(),
            info.size_bytes,
            digest.dimmed()
        ));
    }
    out
}

pub fn load_failure(err: &ArtifactLoadError) -> String {
    format!("{}\n   {}", "❌ Artifact files not found!".red().bold(), err)
}

pub fn prompt() -> String {
    format!("{} ", "✍️  Enter text to analyze emotion (or 'exit'):".bold())
}

/// Result card: colored icon and name, the raw label, and the input echo.
pub fn prediction(result: &PredictionResult) -> String {
    let (r, g, b) = result.emotion.rgb();
    let bar = "▌".truecolor(r, g, b);
    format!(
        "{bar} {} {}\n{bar} {}\n{bar} Input: {}",
        result.emotion.icon(),
        result.emotion.display_name().truecolor(r, g, b).bold(),
        format!("Model Label: {}", result.label).dimmed(),
        result.echo().bold(),
    )
}

pub fn failure(err: &PredictError) -> String {
    match err {
        PredictError::ValidationError(_) => format!("{}", "⚠️  Please enter some text!".yellow()),
        PredictError::InferenceError(msg) => format!("{}", format!("Error: {}", msg).red()),
    }
}

/// Renders whatever a single request produced.
pub fn outcome(outcome: &Result<PredictionResult, PredictError>) -> String {
    match outcome {
        Ok(result) => prediction(result),
        Err(err) => failure(err),
    }
}

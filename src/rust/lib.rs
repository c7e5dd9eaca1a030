//! Emotion prediction for free-form text, backed by a pre-trained TF-IDF
//! vectorizer and a linear SVC loaded from disk.
//!
//! # Basic Usage
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use amygdala::{ArtifactPaths, EmotionPredictor};
//!
//! // Reads tfidf_vectorizer.json and tfidf_svc_model.json from the working directory
//! let predictor = EmotionPredictor::from_artifacts(&ArtifactPaths::default())?;
//!
//! let result = predictor.predict_emotion("I feel amazing today!")?;
//! println!("{} {} (label {})", result.emotion.icon(), result.emotion.display_name(), result.label);
//! # Ok(())
//! # }
//! ```
//!
//! # Custom Capabilities
//!
//! Anything implementing [`TextVectorizer`] and [`TextClassifier`] can stand in
//! for the bundled TF-IDF and linear SVC implementations:
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use amygdala::{EmotionPredictor, FeatureVector, IntegerLabel, TextClassifier, TextVectorizer};
//!
//! struct Length;
//! impl TextVectorizer for Length {
//!     fn transform(&self, text: &str) -> anyhow::Result<FeatureVector> {
//!         Ok(FeatureVector::from(vec![text.len() as f64]))
//!     }
//! }
//!
//! struct AlwaysSurprised;
//! impl TextClassifier for AlwaysSurprised {
//!     fn predict(&self, _: &FeatureVector) -> anyhow::Result<IntegerLabel> {
//!         Ok(5)
//!     }
//! }
//!
//! let predictor = EmotionPredictor::new(Length, AlwaysSurprised);
//! assert_eq!(predictor.predict_emotion("what?!")?.emotion.name(), "surprise");
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! Loaded artifacts are never mutated, so an [`EmotionPredictor`] can be cloned
//! or shared through `Arc` and queried from several threads without locking.

pub mod artifacts;
pub mod classifier;
pub mod render;

pub use artifacts::{load_artifact, ArtifactInfo, ArtifactLoadError, ArtifactPaths, LoadedArtifact};
pub use classifier::{
    resolve_label, truncate_echo, Emotion, EmotionPredictor, FeatureVector, IntegerLabel, LinearSvc, Norm,
    PredictError, PredictionResult, TextClassifier, TextVectorizer, TfidfVectorizer, ECHO_MAX_CHARS, LABEL_MAP,
};

pub fn init_logger() {
    env_logger::init();
}

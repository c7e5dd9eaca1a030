use std::sync::Arc;

use log::{debug, error, info, warn};

use super::error::PredictError;
use super::labels::{resolve_label, Emotion, IntegerLabel};
use super::svc::{LinearSvc, TextClassifier};
use super::vectorizer::{TextVectorizer, TfidfVectorizer};
use crate::artifacts::{load_artifact, ArtifactInfo, ArtifactLoadError, ArtifactPaths};

/// Maximum number of characters echoed back from the input.
pub const ECHO_MAX_CHARS: usize = 120;
const ELLIPSIS: &str = "...";

/// Outcome of a single successful prediction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionResult {
    pub emotion: Emotion,
    pub label: IntegerLabel,
    pub text: String,
}

impl PredictionResult {
    /// The input text, cut to [`ECHO_MAX_CHARS`] for display.
    pub fn echo(&self) -> String {
        truncate_echo(&self.text)
    }
}

/// Shortens `text` to at most [`ECHO_MAX_CHARS`] characters, replacing the
/// tail with `...` when it had to be cut.
pub fn truncate_echo(text: &str) -> String {
    if text.chars().count() <= ECHO_MAX_CHARS {
        return text.to_string();
    }
    let keep = ECHO_MAX_CHARS - ELLIPSIS.len();
    let mut echo: String = text.chars().take(keep).collect();
    echo.push_str(ELLIPSIS);
    echo
}

/// The loaded vectorizer and classifier, shared read-only by every request.
///
/// An `EmotionPredictor` only exists once both artifacts are in hand, so a
/// failed startup leaves nothing that could accept a request.
///
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use amygdala::{EmotionPredictor, LinearSvc, TfidfVectorizer};
/// use std::collections::HashMap;
///
/// let vocabulary = HashMap::from([("amazing".to_string(), 0), ("awful".to_string(), 1)]);
/// let vectorizer = TfidfVectorizer::new(vocabulary, vec![1.0, 1.0])?;
/// let classifier = LinearSvc::new(vec![0, 2], vec![vec![1.0, -1.0]], vec![0.0])?;
/// let predictor = EmotionPredictor::new(vectorizer, classifier);
///
/// let result = predictor.predict_emotion("I feel amazing today!")?;
/// assert_eq!(result.emotion.name(), "joy");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct EmotionPredictor {
    vectorizer: Arc<dyn TextVectorizer>,
    classifier: Arc<dyn TextClassifier>,
    sources: Vec<ArtifactInfo>,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<EmotionPredictor>();
    }
};

impl std::fmt::Debug for EmotionPredictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmotionPredictor")
            .field("sources", &self.sources)
            .finish_non_exhaustive()
    }
}

impl EmotionPredictor {
    /// Wraps already-constructed capabilities.
    pub fn new<V, C>(vectorizer: V, classifier: C) -> Self
    where
        V: TextVectorizer + 'static,
        C: TextClassifier + 'static,
    {
        Self::from_shared(Arc::new(vectorizer), Arc::new(classifier))
    }

    /// Wraps capabilities that are already shared elsewhere.
    pub fn from_shared(vectorizer: Arc<dyn TextVectorizer>, classifier: Arc<dyn TextClassifier>) -> Self {
        Self {
            vectorizer,
            classifier,
            sources: Vec::new(),
        }
    }

    /// Loads the TF-IDF vectorizer and the linear SVC from `paths`.
    ///
    /// # Errors
    /// The first [`ArtifactLoadError`] encountered; the classifier is not read
    /// when the vectorizer already failed.
    pub fn from_artifacts(paths: &ArtifactPaths) -> Result<Self, ArtifactLoadError> {
        let vectorizer = load_artifact::<TfidfVectorizer, _>(&paths.vectorizer)?;
        info!("Vectorizer ready ({} features)", vectorizer.artifact.num_features());

        let classifier = load_artifact::<LinearSvc, _>(&paths.classifier)?;
        info!(
            "Classifier ready ({} classes, {} features)",
            classifier.artifact.classes().len(),
            classifier.artifact.num_features()
        );
        if vectorizer.artifact.num_features() != classifier.artifact.num_features() {
            // Not fatal: every request will report the mismatch instead
            warn!(
                "Vectorizer produces {} features but the classifier expects {}",
                vectorizer.artifact.num_features(),
                classifier.artifact.num_features()
            );
        }

        let mut predictor = Self::new(vectorizer.artifact, classifier.artifact);
        predictor.sources = vec![vectorizer.info, classifier.info];
        Ok(predictor)
    }

    /// Provenance of the loaded artifacts; empty for injected capabilities.
    pub fn sources(&self) -> &[ArtifactInfo] {
        &self.sources
    }

    /// Predicts the emotion expressed by `text`.
    ///
    /// The text is passed to the vectorizer exactly as given. Labels outside
    /// the known set resolve to [`Emotion::Unknown`] rather than failing.
    ///
    /// # Errors
    /// * `ValidationError` if `text` is empty after trimming; neither artifact
    ///   is consulted
    /// * `InferenceError` if vectorization or classification fails, carrying
    ///   the underlying message
    pub fn predict_emotion(&self, text: &str) -> Result<PredictionResult, PredictError> {
        debug!("Validating input ({} chars)", text.chars().count());
        if text.trim().is_empty() {
            warn!("Rejected empty input");
            return Err(PredictError::ValidationError("Input text cannot be empty".into()));
        }

        debug!("Vectorizing input");
        let features = self.vectorizer.transform(text).map_err(|e| {
            error!("Vectorization failed: {:#}", e);
            PredictError::from(e)
        })?;

        debug!("Classifying {}-dimensional feature vector", features.len());
        let label = self.classifier.predict(&features).map_err(|e| {
            error!("Classification failed: {:#}", e);
            PredictError::from(e)
        })?;

        let emotion = resolve_label(label);
        if !emotion.is_known() {
            warn!("Classifier produced unmapped label {}", label);
        }
        debug!("Resolved label {} to {}", label, emotion);

        Ok(PredictionResult {
            emotion,
            label,
            text: text.to_string(),
        })
    }
}

mod error;
mod labels;
mod predictor;
mod svc;
mod utils;
mod vectorizer;

pub use error::PredictError;
pub use labels::{resolve_label, Emotion, IntegerLabel, LABEL_MAP};
pub use predictor::{truncate_echo, EmotionPredictor, PredictionResult, ECHO_MAX_CHARS};
pub use svc::{LinearSvc, TextClassifier};
pub use vectorizer::{FeatureVector, Norm, TextVectorizer, TfidfVectorizer};

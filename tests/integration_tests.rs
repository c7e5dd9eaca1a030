use amygdala::{ArtifactLoadError, ArtifactPaths, Emotion, EmotionPredictor, PredictError};
use env_logger::{Builder, Env};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// Initialize test logger
fn init() {
    let _ = Builder::from_env(Env::default().default_filter_or("warn"))
        .is_test(true)
        .try_init();
}

const VECTORIZER_JSON: &str = r#"{
    "vocabulary": {
        "furious": 0, "terrified": 1, "amazing": 2,
        "adore": 3, "lonely": 4, "shocked": 5
    },
    "idf": [1.2, 1.4, 1.1, 1.6, 1.3, 1.5],
    "lowercase": true,
    "token_pattern": "(?u)\\b\\w\\w+\\b",
    "ngram_range": [1, 1],
    "sublinear_tf": false,
    "norm": "l2"
}"#;

const CLASSIFIER_JSON: &str = r#"{
    "classes": [0, 1, 2, 3, 4, 5],
    "coef": [
        [2.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        [0.0, 2.0, 0.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 2.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 2.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 0.0, 2.0, 0.0],
        [0.0, 0.0, 0.0, 0.0, 0.0, 2.0]
    ],
    "intercept": [-0.5, -0.5, -0.2, -0.5, -0.4, -0.5]
}"#;

fn write_artifacts(dir: &Path, vectorizer: &str, classifier: &str) -> ArtifactPaths {
    let paths = ArtifactPaths::in_dir(dir);
    fs::write(&paths.vectorizer, vectorizer).unwrap();
    fs::write(&paths.classifier, classifier).unwrap();
    paths
}

#[test]
fn test_load_and_predict_from_disk() -> Result<(), Box<dyn std::error::Error>> {
    init();
    let dir = TempDir::new()?;
    let paths = write_artifacts(dir.path(), VECTORIZER_JSON, CLASSIFIER_JSON);
    let predictor = EmotionPredictor::from_artifacts(&paths)?;

    let cases = [
        ("I am FURIOUS about this", Emotion::Anger),
        ("terrified of the dark", Emotion::Fear),
        ("I feel amazing today!", Emotion::Joy),
        ("I adore my cat", Emotion::Love),
        ("so lonely tonight", Emotion::Sadness),
        ("shocked by the news", Emotion::Surprise),
    ];
    for (text, expected) in cases {
        let result = predictor.predict_emotion(text)?;
        assert_eq!(result.emotion, expected, "text: {}", text);
    }

    // Nothing in vocabulary: all scores are intercepts, joy's is highest
    let result = predictor.predict_emotion("the weather report")?;
    assert_eq!(result.emotion, Emotion::Joy);
    assert_eq!(result.label, 2);
    Ok(())
}

#[test]
fn test_sources_record_provenance() -> Result<(), Box<dyn std::error::Error>> {
    init();
    let dir = TempDir::new()?;
    let paths = write_artifacts(dir.path(), VECTORIZER_JSON, CLASSIFIER_JSON);
    let predictor = EmotionPredictor::from_artifacts(&paths)?;

    let sources = predictor.sources();
    assert_eq!(sources.len(), 2);
    assert_eq!(sources[0].path, paths.vectorizer);
    assert_eq!(sources[1].path, paths.classifier);
    assert_eq!(sources[0].size_bytes, VECTORIZER_JSON.len());
    assert_ne!(sources[0].sha256, sources[1].sha256);
    Ok(())
}

#[test]
fn test_missing_vectorizer_fails_startup() {
    init();
    let dir = TempDir::new().unwrap();
    let paths = ArtifactPaths::in_dir(dir.path());
    fs::write(&paths.classifier, CLASSIFIER_JSON).unwrap();

    let err = EmotionPredictor::from_artifacts(&paths).unwrap_err();
    assert!(matches!(err, ArtifactLoadError::NotFound { .. }));
    assert_eq!(err.path(), paths.vectorizer.as_path());
}

#[test]
fn test_missing_classifier_fails_startup() {
    init();
    let dir = TempDir::new().unwrap();
    let paths = ArtifactPaths::in_dir(dir.path());
    fs::write(&paths.vectorizer, VECTORIZER_JSON).unwrap();

    let err = EmotionPredictor::from_artifacts(&paths).unwrap_err();
    assert!(matches!(err, ArtifactLoadError::NotFound { .. }));
    assert_eq!(err.path(), paths.classifier.as_path());
}

#[test]
fn test_corrupt_artifacts_fail_startup() {
    init();
    let dir = TempDir::new().unwrap();

    let paths = write_artifacts(dir.path(), "corrupted data", CLASSIFIER_JSON);
    let err = EmotionPredictor::from_artifacts(&paths).unwrap_err();
    assert!(matches!(err, ArtifactLoadError::Corrupt { .. }));

    // Well-formed JSON that fails structural checks is corrupt too
    let paths = write_artifacts(
        dir.path(),
        VECTORIZER_JSON,
        r#"{"classes": [0, 1, 2], "coef": [[1.0], [1.0]], "intercept": [0.0, 0.0]}"#,
    );
    let err = EmotionPredictor::from_artifacts(&paths).unwrap_err();
    assert!(matches!(err, ArtifactLoadError::Corrupt { .. }));
    assert!(err.to_string().contains("expected 2 classes"));
}

#[test]
fn test_incompatible_artifacts_fail_per_request() -> Result<(), Box<dyn std::error::Error>> {
    init();
    let dir = TempDir::new()?;
    let classifier = r#"{"classes": [0, 1], "coef": [[1.0, 1.0]], "intercept": [0.0]}"#;
    let paths = write_artifacts(dir.path(), VECTORIZER_JSON, classifier);
    let predictor = EmotionPredictor::from_artifacts(&paths)?;

    for _ in 0..2 {
        let err = predictor.predict_emotion("I feel amazing today!").unwrap_err();
        assert_eq!(
            err,
            PredictError::InferenceError(
                "X has 6 features, but LinearSVC is expecting 2 features as input".into()
            )
        );
    }
    // Validation still happens before the artifacts are consulted
    assert!(predictor.predict_emotion(" ").unwrap_err().is_validation());
    Ok(())
}

#[test]
fn test_unmapped_label_from_disk_is_unknown() -> Result<(), Box<dyn std::error::Error>> {
    init();
    let dir = TempDir::new()?;
    let classifier = r#"{"classes": [2, 17], "coef": [[0.0, 0.0, 1.0, 0.0, 0.0, 0.0]], "intercept": [0.0]}"#;
    let paths = write_artifacts(dir.path(), VECTORIZER_JSON, classifier);
    let predictor = EmotionPredictor::from_artifacts(&paths)?;

    let result = predictor.predict_emotion("amazing")?;
    assert_eq!(result.label, 17);
    assert_eq!(result.emotion, Emotion::Unknown);
    assert_eq!(result.emotion.icon(), "🤖");
    assert_eq!(result.emotion.color(), "#6366F1");
    Ok(())
}

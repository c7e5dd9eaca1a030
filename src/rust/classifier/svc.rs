use anyhow::{bail, Result};
use ndarray::{Array1, Array2};
use serde::Deserialize;

use super::labels::IntegerLabel;
use super::vectorizer::FeatureVector;

/// Maps a [`FeatureVector`] to exactly one integer class label.
pub trait TextClassifier: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<IntegerLabel>;
}

#[derive(Debug, Deserialize)]
struct LinearSvcDocument {
    classes: Vec<IntegerLabel>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
}

/// A fitted one-vs-rest linear support vector classifier.
///
/// Multi-class models carry one coefficient row per class and predict the class
/// with the highest decision score. Binary models carry a single row; a positive
/// score selects the second class.
///
/// Weights are kept in `f64`, the precision the models are fitted and exported
/// in, so near-tied decision scores rank the same way they did at training time.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "LinearSvcDocument")]
pub struct LinearSvc {
    classes: Vec<IntegerLabel>,
    coef: Array2<f64>,
    intercept: Array1<f64>,
}

impl TryFrom<LinearSvcDocument> for LinearSvc {
    type Error = String;

    fn try_from(doc: LinearSvcDocument) -> Result<Self, Self::Error> {
        Self::new(doc.classes, doc.coef, doc.intercept).map_err(|e| e.to_string())
    }
}

impl LinearSvc {
    pub fn new(classes: Vec<IntegerLabel>, coef: Vec<Vec<f64>>, intercept: Vec<f64>) -> Result<Self> {
        let rows = coef.len();
        if rows == 0 {
            bail!("coef must have at least one row");
        }
        let width = coef[0].len();
        if width == 0 {
            bail!("coef rows must not be empty");
        }
        if let Some(pos) = coef.iter().position(|row| row.len() != width) {
            bail!("coef row {} has {} columns, expected {}", pos, coef[pos].len(), width);
        }
        if intercept.len() != rows {
            bail!("intercept has {} entries for {} coef rows", intercept.len(), rows);
        }
        let expected_classes = if rows == 1 { 2 } else { rows };
        if classes.len() != expected_classes {
            bail!("expected {} classes for {} coef rows, found {}", expected_classes, rows, classes.len());
        }

        let coef = Array2::from_shape_vec((rows, width), coef.into_iter().flatten().collect())?;
        Ok(Self {
            classes,
            coef,
            intercept: Array1::from(intercept),
        })
    }

    /// Number of features each input vector must have.
    pub fn num_features(&self) -> usize {
        self.coef.ncols()
    }

    pub fn classes(&self) -> &[IntegerLabel] {
        &self.classes
    }

    /// Signed distance to each separating hyperplane.
    pub fn decision_function(&self, features: &FeatureVector) -> Result<Array1<f64>> {
        if features.len() != self.num_features() {
            bail!(
                "X has {} features, but LinearSVC is expecting {} features as input",
                features.len(),
                self.num_features()
            );
        }
        Ok(self.coef.dot(features) + &self.intercept)
    }
}

impl TextClassifier for LinearSvc {
    fn predict(&self, features: &FeatureVector) -> Result<IntegerLabel> {
        let scores = self.decision_function(features)?;

        let index = if scores.len() == 1 {
            usize::from(scores[0] > 0.0)
        } else {
            // First maximum wins on ties
            scores
                .iter()
                .enumerate()
                .fold((0, f64::NEG_INFINITY), |best, (i, &s)| if s > best.1 { (i, s) } else { best })
                .0
        };
        Ok(self.classes[index])
    }
}

use ndarray::Array1;

const MIN_NORM: f64 = 1e-10;

/// Scales a TF-IDF row to unit Euclidean length. Rows with no vocabulary hits
/// stay all-zero.
pub(crate) fn l2_normalize(row: &Array1<f64>) -> Array1<f64> {
    scale_by(row, row.dot(row).sqrt())
}

/// Scales a TF-IDF row so its absolute weights sum to one.
pub(crate) fn l1_normalize(row: &Array1<f64>) -> Array1<f64> {
    scale_by(row, row.mapv(f64::abs).sum())
}

fn scale_by(row: &Array1<f64>, norm: f64) -> Array1<f64> {
    if norm > MIN_NORM {
        row / norm
    } else {
        Array1::zeros(row.len())
    }
}

/// Capitalizes the first character, leaving the rest untouched.
pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

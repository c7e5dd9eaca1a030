use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};

/// Conventional file name of the fitted TF-IDF vectorizer.
pub const VECTORIZER_FILE: &str = "tfidf_vectorizer.json";
/// Conventional file name of the fitted linear SVC model.
pub const CLASSIFIER_FILE: &str = "tfidf_svc_model.json";

#[derive(Debug, thiserror::Error)]
pub enum ArtifactLoadError {
    #[error("Artifact not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("Failed to read artifact {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Corrupt artifact {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ArtifactLoadError {
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path } | Self::Unreadable { path, .. } | Self::Corrupt { path, .. } => path,
        }
    }
}

/// Locations of the two artifacts read at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub vectorizer: PathBuf,
    pub classifier: PathBuf,
}

impl Default for ArtifactPaths {
    /// The conventional file names, relative to the working directory.
    fn default() -> Self {
        Self {
            vectorizer: PathBuf::from(VECTORIZER_FILE),
            classifier: PathBuf::from(CLASSIFIER_FILE),
        }
    }
}

impl ArtifactPaths {
    /// The conventional file names inside `dir`.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            vectorizer: dir.join(VECTORIZER_FILE),
            classifier: dir.join(CLASSIFIER_FILE),
        }
    }
}

/// Where an artifact came from and what exactly was loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactInfo {
    pub path: PathBuf,
    pub size_bytes: usize,
    /// Lowercase hex SHA-256 of the file contents
    pub sha256: String,
}

/// A deserialized artifact together with its provenance.
#[derive(Debug)]
pub struct LoadedArtifact<T> {
    pub artifact: T,
    pub info: ArtifactInfo,
}

/// Reads and deserializes one artifact.
///
/// A missing file, an I/O failure and a document that does not deserialize
/// (including one that fails the artifact's own structural checks) each map to
/// a distinct [`ArtifactLoadError`] variant.
pub fn load_artifact<T, P>(path: P) -> Result<LoadedArtifact<T>, ArtifactLoadError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref().to_path_buf();
    log::info!("Loading artifact from {:?}", path);

    let bytes = fs::read(&path).map_err(|source| {
        log::error!("Failed to read artifact {:?}: {}", path, source);
        if source.kind() == io::ErrorKind::NotFound {
            ArtifactLoadError::NotFound { path: path.clone() }
        } else {
            ArtifactLoadError::Unreadable { path: path.clone(), source }
        }
    })?;
    log::info!("Read {} bytes", bytes.len());

    let artifact = serde_json::from_slice(&bytes).map_err(|source| {
        log::error!("Failed to deserialize artifact {:?}: {}", path, source);
        ArtifactLoadError::Corrupt { path: path.clone(), source }
    })?;

    let sha256 = sha256_hex(&bytes);
    log::info!("Artifact {:?} loaded (sha256 {})", path, sha256);

    Ok(LoadedArtifact {
        artifact,
        info: ArtifactInfo {
            path,
            size_bytes: bytes.len(),
            sha256,
        },
    })
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

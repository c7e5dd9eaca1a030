use std::fmt;

use super::utils::capitalize;

/// Raw class index produced by a [`TextClassifier`](super::TextClassifier).
pub type IntegerLabel = i64;

/// The closed set of emotions the classifier was trained on, plus the
/// fallback used for any label outside that set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emotion {
    Anger,
    Fear,
    Joy,
    Love,
    Sadness,
    Surprise,
    Unknown,
}

/// Label index → emotion. Position in the array is the integer label.
pub const LABEL_MAP: [Emotion; 6] = [
    Emotion::Anger,
    Emotion::Fear,
    Emotion::Joy,
    Emotion::Love,
    Emotion::Sadness,
    Emotion::Surprise,
];

/// Resolves a classifier label to its emotion.
///
/// Labels outside `0..=5` (including negatives) resolve to [`Emotion::Unknown`].
pub fn resolve_label(label: IntegerLabel) -> Emotion {
    usize::try_from(label)
        .ok()
        .and_then(|idx| LABEL_MAP.get(idx))
        .copied()
        .unwrap_or(Emotion::Unknown)
}

impl Emotion {
    /// Canonical lowercase name, or `"Unknown"` for the fallback.
    pub fn name(self) -> &'static str {
        match self {
            Self::Anger => "anger",
            Self::Fear => "fear",
            Self::Joy => "joy",
            Self::Love => "love",
            Self::Sadness => "sadness",
            Self::Surprise => "surprise",
            Self::Unknown => "Unknown",
        }
    }

    /// Capitalized name for display ("Joy").
    pub fn display_name(self) -> String {
        capitalize(self.name())
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Anger => "😡",
            Self::Fear => "😨",
            Self::Joy => "😊",
            Self::Love => "❤️",
            Self::Sadness => "😢",
            Self::Surprise => "😮",
            Self::Unknown => "🤖",
        }
    }

    /// Accent color as a `#RRGGBB` hex string.
    pub fn color(self) -> &'static str {
        match self {
            Self::Anger => "#DC2626",
            Self::Fear => "#374151",
            Self::Joy => "#10B981",
            Self::Love => "#BE185D",
            Self::Sadness => "#6B7280",
            Self::Surprise => "#D97706",
            Self::Unknown => "#6366F1",
        }
    }

    /// Accent color as an RGB triple.
    pub fn rgb(self) -> (u8, u8, u8) {
        let hex = &self.color()[1..];
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        (channel(0), channel(2), channel(4))
    }

    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

use serde::{Deserialize, Serialize};

/// Base URL of the upstream whisper.cpp model repository.
const MODEL_BASE_URL: &str = "https://huggingface.co/ggerganov/whisper.cpp/resolve/main";

/// A whisper.cpp model variant.
///
/// The set is closed: every supported combination of model family,
/// quantization and language restriction is listed here, and each maps to a
/// fixed `ggml-*.bin` filename. The filenames double as the on-disk cache
/// naming scheme, so they must stay stable across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WhisperModel {
    Tiny,
    TinyQ5_1,
    TinyQ8_0,
    TinyEn,
    TinyEnQ5_1,
    TinyEnQ8_0,
    Base,
    BaseQ5_1,
    BaseQ8_0,
    BaseEn,
    BaseEnQ5_1,
    BaseEnQ8_0,
    Small,
    SmallQ5_1,
    SmallQ8_0,
    SmallEn,
    SmallEnQ5_1,
    SmallEnQ8_0,
    Medium,
    MediumQ5_1,
    MediumQ8_0,
    MediumEn,
    MediumEnQ5_1,
    MediumEnQ8_0,
    Large,
    LargeV2,
    LargeV2Q5_0,
    LargeV2Q8_0,
    LargeV3,
    LargeV3Q5_0,
    LargeV3Turbo,
    LargeV3TurboQ5_0,
    LargeV3TurboQ8_0,
}

impl WhisperModel {
    /// Canonical filename of this variant in the upstream repository and
    /// in the local cache.
    pub fn filename(&self) -> &'static str {
        match self {
            WhisperModel::Tiny => "ggml-tiny.bin",
            WhisperModel::TinyQ5_1 => "ggml-tiny-q5_1.bin",
            WhisperModel::TinyQ8_0 => "ggml-tiny-q8_0.bin",
            WhisperModel::TinyEn => "ggml-tiny.en.bin",
            WhisperModel::TinyEnQ5_1 => "ggml-tiny.en-q5_1.bin",
            WhisperModel::TinyEnQ8_0 => "ggml-tiny.en-q8_0.bin",
            WhisperModel::Base => "ggml-base.bin",
            WhisperModel::BaseQ5_1 => "ggml-base-q5_1.bin",
            WhisperModel::BaseQ8_0 => "ggml-base-q8_0.bin",
            WhisperModel::BaseEn => "ggml-base.en.bin",
            WhisperModel::BaseEnQ5_1 => "ggml-base.en-q5_1.bin",
            WhisperModel::BaseEnQ8_0 => "ggml-base.en-q8_0.bin",
            WhisperModel::Small => "ggml-small.bin",
            WhisperModel::SmallQ5_1 => "ggml-small-q5_1.bin",
            WhisperModel::SmallQ8_0 => "ggml-small-q8_0.bin",
            WhisperModel::SmallEn => "ggml-small.en.bin",
            WhisperModel::SmallEnQ5_1 => "ggml-small.en-q5_1.bin",
            WhisperModel::SmallEnQ8_0 => "ggml-small.en-q8_0.bin",
            WhisperModel::Medium => "ggml-medium.bin",
            WhisperModel::MediumQ5_1 => "ggml-medium-q5_1.bin",
            WhisperModel::MediumQ8_0 => "ggml-medium-q8_0.bin",
            WhisperModel::MediumEn => "ggml-medium.en.bin",
            WhisperModel::MediumEnQ5_1 => "ggml-medium.en-q5_1.bin",
            WhisperModel::MediumEnQ8_0 => "ggml-medium.en-q8_0.bin",
            WhisperModel::Large => "ggml-large.bin",
            WhisperModel::LargeV2 => "ggml-large-v2.bin",
            WhisperModel::LargeV2Q5_0 => "ggml-large-v2-q5_0.bin",
            WhisperModel::LargeV2Q8_0 => "ggml-large-v2-q8_0.bin",
            WhisperModel::LargeV3 => "ggml-large-v3.bin",
            WhisperModel::LargeV3Q5_0 => "ggml-large-v3-q5_0.bin",
            WhisperModel::LargeV3Turbo => "ggml-large-v3-turbo.bin",
            WhisperModel::LargeV3TurboQ5_0 => "ggml-large-v3-turbo-q5_0.bin",
            WhisperModel::LargeV3TurboQ8_0 => "ggml-large-v3-turbo-q8_0.bin",
        }
    }

    /// Download URL of this variant.
    pub fn url(&self) -> String {
        format!("{}/{}", MODEL_BASE_URL, self.filename())
    }

    /// Reverse lookup from a cache filename.
    pub fn from_filename(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|m| m.filename() == name)
    }

    /// Every variant in the catalog.
    pub fn all() -> &'static [WhisperModel] {
        &[
            WhisperModel::Tiny,
            WhisperModel::TinyQ5_1,
            WhisperModel::TinyQ8_0,
            WhisperModel::TinyEn,
            WhisperModel::TinyEnQ5_1,
            WhisperModel::TinyEnQ8_0,
            WhisperModel::Base,
            WhisperModel::BaseQ5_1,
            WhisperModel::BaseQ8_0,
            WhisperModel::BaseEn,
            WhisperModel::BaseEnQ5_1,
            WhisperModel::BaseEnQ8_0,
            WhisperModel::Small,
            WhisperModel::SmallQ5_1,
            WhisperModel::SmallQ8_0,
            WhisperModel::SmallEn,
            WhisperModel::SmallEnQ5_1,
            WhisperModel::SmallEnQ8_0,
            WhisperModel::Medium,
            WhisperModel::MediumQ5_1,
            WhisperModel::MediumQ8_0,
            WhisperModel::MediumEn,
            WhisperModel::MediumEnQ5_1,
            WhisperModel::MediumEnQ8_0,
            WhisperModel::Large,
            WhisperModel::LargeV2,
            WhisperModel::LargeV2Q5_0,
            WhisperModel::LargeV2Q8_0,
            WhisperModel::LargeV3,
            WhisperModel::LargeV3Q5_0,
            WhisperModel::LargeV3Turbo,
            WhisperModel::LargeV3TurboQ5_0,
            WhisperModel::LargeV3TurboQ8_0,
        ]
    }

    /// Whether this variant only recognizes English.
    pub fn english_only(&self) -> bool {
        self.filename().contains(".en")
    }
}

impl std::fmt::Display for WhisperModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.filename())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_is_idempotent() {
        let a = WhisperModel::BaseEnQ5_1.filename();
        let b = WhisperModel::BaseEnQ5_1.filename();
        assert_eq!(a, b);
        assert_eq!(a, "ggml-base.en-q5_1.bin");
    }

    #[test]
    fn test_url_is_idempotent() {
        let a = WhisperModel::TinyQ8_0.url();
        let b = WhisperModel::TinyQ8_0.url();
        assert_eq!(a, b);
        assert_eq!(
            a,
            "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-tiny-q8_0.bin"
        );
    }

    #[test]
    fn test_filenames_are_unique() {
        let mut names: Vec<&str> = WhisperModel::all().iter().map(|m| m.filename()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), WhisperModel::all().len());
    }

    #[test]
    fn test_from_filename_roundtrip() {
        for model in WhisperModel::all() {
            assert_eq!(WhisperModel::from_filename(model.filename()), Some(*model));
        }
        assert_eq!(WhisperModel::from_filename("ggml-huge.bin"), None);
    }

    #[test]
    fn test_english_only_detection() {
        assert!(WhisperModel::TinyEn.english_only());
        assert!(!WhisperModel::LargeV3Turbo.english_only());
    }
}

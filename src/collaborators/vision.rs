use crate::core::AxisScores;
use crate::errors::{CertigradeError, Result};
use serde::{Deserialize, Serialize};

/// Most images accepted for one card.
pub const MAX_IMAGES_PER_CARD: usize = 5;

/// Largest accepted image, in bytes.
pub const MAX_IMAGE_SIZE: u64 = 10 * 1024 * 1024;

/// A reference to one photo of the card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardImage {
    pub uri: String,
    pub size_bytes: u64,
}

impl CardImage {
    pub fn new(uri: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            uri: uri.into(),
            size_bytes,
        }
    }
}

/// The photos submitted for one grading, validated for count and size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSet(Vec<CardImage>);

impl ImageSet {
    pub fn new(images: Vec<CardImage>) -> Result<Self> {
        if images.is_empty() {
            return Err(CertigradeError::invalid_input(
                "at least one card image is required",
            ));
        }
        if images.len() > MAX_IMAGES_PER_CARD {
            return Err(CertigradeError::invalid_input(format!(
                "at most {} images per card, got {}",
                MAX_IMAGES_PER_CARD,
                images.len()
            )));
        }
        if let Some(image) = images.iter().find(|image| image.uri.trim().is_empty()) {
            return Err(CertigradeError::invalid_input(format!(
                "image of {} bytes has no uri",
                image.size_bytes
            )));
        }
        if let Some(image) = images.iter().find(|image| image.size_bytes > MAX_IMAGE_SIZE) {
            return Err(CertigradeError::invalid_input(format!(
                "image {} is {} bytes, limit is {}",
                image.uri, image.size_bytes, MAX_IMAGE_SIZE
            )));
        }
        Ok(Self(images))
    }

    pub fn images(&self) -> &[CardImage] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Condition analysis service turning card photos into axis scores.
///
/// Implementations report outages as `UpstreamUnavailable` and must never
/// substitute made-up scores.
pub trait ConditionAnalyzer: Send + Sync {
    fn analyze(&self, images: &ImageSet) -> Result<AxisScores>;
}

/// Analyzer that returns scores already known to the caller, e.g. scores
/// entered by hand or produced by an offline model run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnownScores(pub AxisScores);

impl ConditionAnalyzer for KnownScores {
    fn analyze(&self, _images: &ImageSet) -> Result<AxisScores> {
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_up_to_five_images() {
        let images = (0..5)
            .map(|i| CardImage::new(format!("file:///front-{}.jpg", i), 1024))
            .collect();
        assert_eq!(ImageSet::new(images).unwrap().len(), 5);
    }

    #[test]
    fn rejects_empty_and_oversized_sets() {
        assert!(ImageSet::new(Vec::new()).is_err());

        let six = (0..6).map(|i| CardImage::new(format!("{}", i), 1)).collect();
        assert!(ImageSet::new(six).is_err());
    }

    #[test]
    fn rejects_large_images() {
        let err = ImageSet::new(vec![CardImage::new("front.jpg", MAX_IMAGE_SIZE + 1)]).unwrap_err();
        assert!(matches!(err, CertigradeError::InvalidInput(_)));
        assert!(ImageSet::new(vec![CardImage::new("front.jpg", MAX_IMAGE_SIZE)]).is_ok());
    }

    #[test]
    fn rejects_blank_uri() {
        assert!(ImageSet::new(vec![CardImage::new("  ", 10)]).is_err());
    }
}

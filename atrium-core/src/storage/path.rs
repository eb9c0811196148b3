use std::path::Path;

use atrium_model::MediaRef;
use chrono::Utc;
use rand::Rng;

use crate::media_type::ImageMediaType;

const MAX_EXTENSION_LEN: usize = 10;

/// Generates collision-resistant blob locators of the form
/// `<prefix>/<unix-millis>-<random hex><extension>`.
#[derive(Debug, Clone)]
pub struct StoragePathGenerator {
    prefix: String,
}

impl StoragePathGenerator {
    /// Generator for locators under `prefix`. Surrounding slashes are dropped.
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into().trim_matches('/').to_string();
        Self { prefix }
    }

    /// Locator prefix without slashes.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The original file extension is preserved when it is usable, otherwise
    /// the canonical extension of `media_type` is used.
    pub fn generate(
        &self,
        original_name: Option<&str>,
        media_type: ImageMediaType,
    ) -> MediaRef {
        let extension = original_name
            .and_then(sanitized_extension)
            .unwrap_or_else(|| media_type.extension().to_string());
        let suffix: u32 = rand::rng().random();
        let file_name = format!(
            "{}-{:08x}{}",
            Utc::now().timestamp_millis(),
            suffix,
            extension
        );

        let locator = if self.prefix.is_empty() {
            file_name
        } else {
            format!("{}/{}", self.prefix, file_name)
        };
        // Never blank: the file name always carries the timestamp.
        MediaRef::new(locator).unwrap_or_else(|| unreachable!())
    }
}

impl Default for StoragePathGenerator {
    fn default() -> Self {
        Self::new("uploads")
    }
}

fn sanitized_extension(name: &str) -> Option<String> {
    let ext = Path::new(name).extension()?.to_str()?;
    if ext.is_empty()
        || ext.len() > MAX_EXTENSION_LEN
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }
    Some(format!(".{ext}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn preserves_original_extension() {
        let generator = StoragePathGenerator::default();
        let media_ref =
            generator.generate(Some("holiday.JPEG"), ImageMediaType::Jpeg);
        assert!(media_ref.as_str().starts_with("uploads/"));
        assert!(media_ref.as_str().ends_with(".JPEG"));
    }

    #[test]
    fn falls_back_to_canonical_extension() {
        let generator = StoragePathGenerator::new("media/");
        let without_ext = generator.generate(Some("photo"), ImageMediaType::Png);
        assert!(without_ext.as_str().starts_with("media/"));
        assert!(without_ext.as_str().ends_with(".png"));

        let hostile =
            generator.generate(Some("x.p/../ng"), ImageMediaType::Webp);
        assert!(hostile.as_str().ends_with(".webp"));

        let unnamed = generator.generate(None, ImageMediaType::Gif);
        assert!(unnamed.as_str().ends_with(".gif"));
    }

    #[test]
    fn generated_paths_do_not_collide() {
        let generator = StoragePathGenerator::default();
        let refs: HashSet<_> = (0..500)
            .map(|_| generator.generate(Some("a.png"), ImageMediaType::Png))
            .collect();
        assert_eq!(refs.len(), 500);
    }
}

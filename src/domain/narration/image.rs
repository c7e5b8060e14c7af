//! Image URL construction for a prompt-addressed image generator

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;
use crate::domain::multiverse::{Character, Location};

pub const IMAGE_BASE_URL: &str = "https://image.pollinations.ai/prompt";

/// Rendering options appended to an image URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageOptions {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub seed: Option<u64>,
    pub model: String,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            seed: None,
            model: "flux".to_string(),
        }
    }
}

impl ImageOptions {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Builds the URL at which the generator renders `prompt`
///
/// No request is made; the image is produced when the URL is fetched.
pub fn image_url(prompt: &str, options: &ImageOptions) -> Result<String, DomainError> {
    let mut url = Url::parse(IMAGE_BASE_URL)
        .map_err(|e| DomainError::internal(format!("Invalid image base URL: {}", e)))?;

    url.path_segments_mut()
        .map_err(|_| DomainError::internal("Image base URL cannot carry a path"))?
        .push(prompt);

    {
        let mut query = url.query_pairs_mut();
        query.append_pair("width", &options.width.to_string());
        query.append_pair("height", &options.height.to_string());
        if let Some(seed) = options.seed {
            query.append_pair("seed", &seed.to_string());
        }
        if !options.model.is_empty() {
            query.append_pair("model", &options.model);
        }
    }

    Ok(url.to_string())
}

/// Fixed-style scene prompt for a location
pub fn location_scene_prompt(location: &Location) -> String {
    format!(
        "Rick and Morty style sci-fi illustration of {}, a {} in {}. \
         Vibrant colors, cartoon style, science fiction elements, \
         portal green accents, cosmic background, detailed environment. \
         High quality digital art, animated series aesthetic.",
        location.name, location.kind, location.dimension
    )
}

/// Fixed-style scene prompt for two characters talking
pub fn dialogue_scene_prompt(first: &Character, second: &Character) -> String {
    format!(
        "Rick and Morty animated style scene showing {} and {} having a conversation. \
         Both characters clearly visible, vibrant colors, cartoon aesthetic, \
         science fiction background, expressive faces, high quality digital art \
         matching the show's style. Wide shot, detailed characters, \
         portal green and space blue color scheme.",
        first.name, second.name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::multiverse::fixtures;

    #[test]
    fn test_image_options_default() {
        let options = ImageOptions::default();
        assert_eq!(options.width, 1024);
        assert_eq!(options.height, 768);
        assert_eq!(options.model, "flux");
        assert!(options.seed.is_none());
    }

    #[test]
    fn test_image_url_encodes_prompt() {
        let url = image_url("portal gun/blueprint #1", &ImageOptions::default()).unwrap();

        assert!(url.starts_with("https://image.pollinations.ai/prompt/portal%20gun%2Fblueprint%20%231?"));
        assert!(url.ends_with("width=1024&height=768&model=flux"));
    }

    #[test]
    fn test_image_url_with_seed() {
        let options = ImageOptions::default().with_size(512, 512).with_seed(42);
        let url = image_url("Rick", &options).unwrap();

        assert_eq!(
            url,
            "https://image.pollinations.ai/prompt/Rick?width=512&height=512&seed=42&model=flux"
        );
    }

    #[test]
    fn test_scene_prompts() {
        let location = fixtures::location(1, "Earth (C-137)", &[]);
        assert!(location_scene_prompt(&location).contains("of Earth (C-137), a Planet in Dimension C-137."));

        let rick = fixtures::character(1, "Rick Sanchez");
        let morty = fixtures::character(2, "Morty Smith");
        assert!(dialogue_scene_prompt(&rick, &morty).contains("showing Rick Sanchez and Morty Smith having"));
    }
}

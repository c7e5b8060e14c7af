//! Narration domain - prompts, evaluation parsing and image URLs

mod evaluation;
mod image;
pub mod prompts;

pub use evaluation::{EvaluationResult, MAX_SCORE};
pub use image::{
    IMAGE_BASE_URL, ImageOptions, dialogue_scene_prompt, image_url, location_scene_prompt,
};

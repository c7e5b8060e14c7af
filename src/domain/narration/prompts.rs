//! Prompt builders for narration and evaluation

use crate::domain::multiverse::{Character, Location};

/// Longest dialogue excerpt quoted back into an image prompt
const DIALOGUE_EXCERPT_CHARS: usize = 200;

pub fn location_summary(location: &Location) -> String {
    format!(
        "You are the narrator from Rick and Morty. Generate a short, witty summary (2-3 sentences) \
         about this location in the distinctive cynical and absurdist tone of the show.\n\n\
         Location Details:\n\
         - Name: {}\n\
         - Type: {}\n\
         - Dimension: {}\n\
         - Number of Residents: {}\n\n\
         Make it funny, slightly dark, and remember to include some existential dread or sci-fi absurdity.",
        location.name,
        location.kind,
        location.dimension,
        location.resident_count()
    )
}

pub fn location_image(location: &Location, summary: &str) -> String {
    format!(
        "Based on this Rick and Morty location and its summary, create a detailed image generation \
         prompt that would produce a high-quality visual representation.\n\n\
         Location: {}\n\
         Type: {}\n\
         Dimension: {}\n\
         Summary: {}\n\n\
         Generate a single detailed prompt (2-3 sentences) for an AI image generator that captures:\n\
         - The sci-fi, cartoon aesthetic of Rick and Morty\n\
         - Key visual elements of this specific location\n\
         - Vibrant colors and the show's art style\n\n\
         Return ONLY the image prompt, nothing else.",
        location.name, location.kind, location.dimension, summary
    )
}

pub fn character_analysis(character: &Character) -> String {
    format!(
        "Provide a brief character analysis (2-3 sentences) for this Rick and Morty character.\n\
         Focus on their significance, relationships, or interesting facts.\n\n\
         Character:\n\
         - Name: {}\n\
         - Species: {}\n\
         - Status: {}\n\
         - Gender: {}\n\
         - Origin: {}\n\
         - Current Location: {}\n\
         - Episodes Appeared: {}\n\n\
         Be informative but keep the Rick and Morty vibe.",
        character.name,
        character.species,
        character.status,
        character.gender,
        character.origin.name,
        character.location.name,
        character.episode.len()
    )
}

pub fn dialogue(first: &Character, second: &Character) -> String {
    format!(
        "Generate a short dialogue (4-6 lines) between these two Rick and Morty characters.\n\
         Make it authentic to the show's humor and the characters' personalities.\n\n\
         {}\n\
         {}\n\
         Format the dialogue as:\n\
         {}: [their line]\n\
         {}: [their line]\n\
         (continue for 4-6 exchanges)",
        dialogue_participant(1, first),
        dialogue_participant(2, second),
        first.name,
        second.name
    )
}

fn dialogue_participant(position: usize, character: &Character) -> String {
    format!(
        "Character {}:\n\
         - Name: {}\n\
         - Species: {}\n\
         - Status: {}\n\
         - Location: {}\n",
        position, character.name, character.species, character.status, character.location.name
    )
}

pub fn dialogue_image(first: &Character, second: &Character, dialogue: &str) -> String {
    let excerpt: String = dialogue.chars().take(DIALOGUE_EXCERPT_CHARS).collect();

    format!(
        "Based on this Rick and Morty dialogue between two characters, create a detailed image \
         generation prompt for a scene showing them in conversation.\n\n\
         Character 1: {} ({})\n\
         Character 2: {} ({})\n\n\
         Dialogue excerpt:\n\
         {}...\n\n\
         Generate a single detailed prompt (2-3 sentences) for an AI image generator that:\n\
         - Shows both characters in the Rick and Morty animated art style\n\
         - Captures the mood and setting of their conversation\n\
         - Uses vibrant colors and the show's signature sci-fi aesthetic\n\
         - Shows the characters clearly with expressive poses\n\n\
         Return ONLY the image prompt, nothing else.",
        first.name, first.species, second.name, second.species, excerpt
    )
}

pub fn factual_consistency(generated_text: &str, source_data: &serde_json::Value) -> String {
    let source = serde_json::to_string_pretty(source_data).unwrap_or_else(|_| source_data.to_string());

    format!(
        "Evaluate if the following generated text is factually consistent with the source data.\n\
         Rate on a scale of 1-10 and explain your reasoning.\n\n\
         Source Data:\n\
         {}\n\n\
         Generated Text:\n\
         {}\n\n\
         Respond in this format:\n\
         Score: [1-10]\n\
         Reasoning: [Your explanation]\n\
         Issues: [List any factual inconsistencies, or \"None\" if consistent]",
        source, generated_text
    )
}

pub fn creativity(generated_text: &str) -> String {
    format!(
        "Evaluate the creativity and entertainment value of this Rick and Morty themed text.\n\
         Consider humor, originality, and how well it captures the show's tone.\n\
         Rate on a scale of 1-10.\n\n\
         Generated Text:\n\
         {}\n\n\
         Respond in this format:\n\
         Score: [1-10]\n\
         Reasoning: [Your explanation]\n\
         Strengths: [What works well]\n\
         Improvements: [What could be better]",
        generated_text
    )
}

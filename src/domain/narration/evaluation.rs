//! Structured result of an LLM self-evaluation

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const MAX_SCORE: u8 = 10;

static SCORE_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").unwrap());

/// Score, reasoning and free-form details parsed from an evaluation reply
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub score: u8,
    pub raw_response: String,
    pub reasoning: String,
    pub details: BTreeMap<String, String>,
}

impl EvaluationResult {
    /// Parses a reply written in `Label: value` lines
    ///
    /// `Score:` takes its first number, clamped to 0..=10 (0 when absent).
    /// `Reasoning:` fills `reasoning`. Any other line containing a colon
    /// becomes a `details` entry; everything else is ignored.
    pub fn parse(response: &str) -> Self {
        let mut result = Self {
            raw_response: response.to_string(),
            ..Default::default()
        };

        for line in response.trim().lines().map(str::trim) {
            if let Some(rest) = line.strip_prefix("Score:") {
                result.score = parse_score(rest);
            } else if let Some(rest) = line.strip_prefix("Reasoning:") {
                result.reasoning = rest.trim().to_string();
            } else if let Some((key, value)) = line.split_once(':') {
                result
                    .details
                    .insert(key.trim().to_string(), value.trim().to_string());
            }
        }

        result
    }
}

fn parse_score(text: &str) -> u8 {
    SCORE_DIGITS
        .find(text)
        .map(|m| match m.as_str().parse::<u64>() {
            Ok(score) => score.min(MAX_SCORE as u64) as u8,
            // only ASCII digits match, so a failed parse is an overflow
            Err(_) => MAX_SCORE,
        })
        .unwrap_or(0)
}

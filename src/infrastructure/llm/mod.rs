//! Text generation provider implementations

mod gemini;
mod http_client;

pub(crate) use gemini::model_path;
pub use gemini::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, GeminiTextGenerator};
pub use http_client::{HttpClient, HttpClientTrait};

#[cfg(test)]
pub use http_client::mock::MockHttpClient;

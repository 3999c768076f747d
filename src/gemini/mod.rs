// Generative model access: trait-based so the provider can be swapped or
// stubbed. GeminiClient implements it over the Gemini REST API.

pub mod client;
pub mod traits;

pub use client::GeminiClient;
pub use traits::{ContentGenerator, Part};

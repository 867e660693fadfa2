//! Search gateway backed by the Gemini `generateContent` API with Google Maps
//! grounding.

pub mod client;
pub mod error;
pub mod gateway;
pub mod normalize;
pub mod types;

pub use client::GeminiClient;
pub use error::GeminiError;
pub use normalize::to_search_result;

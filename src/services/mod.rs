pub mod gemini;
pub mod prompt;
pub mod relay;

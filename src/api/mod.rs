/// External generative endpoint integration
///
/// Only one collaborator exists today (Gemini); the wire types live next to
/// the client that owns them.

pub mod gemini;

pub use gemini::GeminiClient;

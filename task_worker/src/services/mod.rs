mod content_generation;
mod transcription;

pub use content_generation::{ContentGenerationError, ContentGenerationService};
pub use transcription::{TranscriptionError, TranscriptionService};

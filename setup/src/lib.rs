mod app;
mod fallback;

pub use app::{build_and_run, Application};
pub use fallback::FallbackTranscriptionModel;

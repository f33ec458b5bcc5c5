use std::sync::Arc;

use scribe_application::TranscribeUseCase;

#[derive(Clone)]
pub struct AppState {
    pub usecase: Arc<dyn TranscribeUseCase>,
}

impl AppState {
    pub fn new(usecase: Arc<dyn TranscribeUseCase>) -> Self {
        Self { usecase }
    }
}

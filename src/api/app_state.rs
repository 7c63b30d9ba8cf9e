use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::ml::ModelArtifacts;
use crate::observability::AppMetrics;
use crate::security::validation::RequestValidator;
use crate::services::{
    FileProcessingService, PredictionService, ProviderDirectory, SeizureChatbot, SymptomChecker,
    TesseractCli, create_chatbot, create_file_processor, create_prediction_service,
    create_provider_directory,
};
use crate::storage::ProviderStore;
use std::sync::Arc;

/// Application state containing all shared services
#[derive(Clone)]
pub struct AppState {
    /// Service version reported by health checks
    pub version: String,
    /// Risk classifier, `None` when the model artifacts failed to load
    pub predictor: Option<Arc<dyn PredictionService>>,
    /// Keyword symptom analyzer
    pub symptom_checker: Arc<SymptomChecker>,
    /// Conversational responder with its transcript
    pub chatbot: Arc<SeizureChatbot>,
    /// Provider lookup over the read-only directory
    pub providers: Arc<ProviderDirectory>,
    /// Upload feature extraction
    pub file_processor: Arc<dyn FileProcessingService>,
    /// Input validation
    pub validator: Arc<RequestValidator>,
    /// Request and domain counters
    pub metrics: Arc<AppMetrics>,
    /// Multipart body limit in bytes
    pub max_upload_size: usize,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("version", &self.version)
            .field("predictor_loaded", &self.predictor.is_some())
            .field("symptom_checker", &"Arc<SymptomChecker>")
            .field("chatbot", &"Arc<SeizureChatbot>")
            .field("providers", &"Arc<ProviderDirectory>")
            .field("file_processor", &"Arc<dyn FileProcessingService>")
            .field("validator", &self.validator)
            .field("max_upload_size", &self.max_upload_size)
            .finish()
    }
}

impl AppState {
    /// Create new application state
    pub fn new(
        predictor: Option<Arc<dyn PredictionService>>,
        chatbot: Arc<SeizureChatbot>,
        providers: Arc<ProviderDirectory>,
        file_processor: Arc<dyn FileProcessingService>,
        max_upload_size: usize,
    ) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            predictor,
            symptom_checker: Arc::new(SymptomChecker::new()),
            chatbot,
            providers,
            file_processor,
            validator: Arc::new(RequestValidator::new()),
            metrics: Arc::new(AppMetrics::default()),
            max_upload_size,
        }
    }

    /// Wire every service from configuration.
    ///
    /// Missing model artifacts leave the predictor unloaded; a malformed provider
    /// table is a startup error.
    pub fn from_config(config: &AppConfig, artifacts: Option<ModelArtifacts>) -> Result<Self> {
        let store = ProviderStore::load(config.providers.data_path.as_deref())?;
        tracing::info!("Provider directory loaded: {} records", store.len());

        let ocr = Arc::new(TesseractCli::from_config(&config.extraction));

        Ok(Self::new(
            artifacts.map(create_prediction_service),
            create_chatbot()?,
            create_provider_directory(Arc::new(store)),
            create_file_processor(ocr),
            config.server.max_upload_size,
        ))
    }

    pub fn predictor_loaded(&self) -> bool {
        self.predictor.is_some()
    }

    /// Classifier, or `ModelNotLoaded`
    pub fn predictor(&self) -> Result<&Arc<dyn PredictionService>> {
        self.predictor.as_ref().ok_or(AppError::ModelNotLoaded)
    }
}

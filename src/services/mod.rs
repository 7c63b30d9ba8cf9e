//! 服务模块

pub mod chatbot;
pub mod file_processor;
pub mod predictor;
pub mod provider_directory;
pub mod symptom_checker;

pub use chatbot::{ChatIntent, SeizureChatbot, create_chatbot};
pub use file_processor::{
    FileProcessingService, FileProcessor, MockOcrEngine, OcrEngine, TesseractCli,
    create_file_processor,
};
pub use predictor::{PredictionService, Predictor, create_prediction_service};
pub use provider_directory::{ProviderDirectory, create_provider_directory, recommendations_text};
pub use symptom_checker::SymptomChecker;

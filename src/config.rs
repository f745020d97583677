use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub max_file_size: usize,
    pub model_path: PathBuf,
    /// Suffix a file must carry to be picked up from an archive. Matched case-sensitively.
    pub recording_extension: String,
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8000);

        let max_file_size_mb = std::env::var("MAX_FILE_SIZE_MB")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(25);

        let model_path = std::env::var("MODEL_PATH")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "app/fraud_detector_model.json".to_string());

        let recording_extension = std::env::var("RECORDING_EXTENSION")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| ".gpx".to_string());

        Self {
            port,
            max_file_size: max_file_size_mb * 1024 * 1024,
            model_path: PathBuf::from(model_path),
            recording_extension,
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub google_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub log_level: String,
    pub user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("google_api_key", &"[redacted]")
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("log_level", &self.log_level)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

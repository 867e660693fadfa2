use crate::locale::Locale;
use crate::types::Coordinates;

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub locale: Locale,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    /// Total deadline for one search call; unset leaves it to the service.
    pub request_timeout_secs: Option<u64>,
    /// Position configured up front; takes precedence over any lookup.
    pub fixed_location: Option<Coordinates>,
    pub ip_locate_enabled: bool,
    pub ip_locate_url: String,
    pub locate_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("locale", &self.locale)
            .field("gemini_api_key", &"[redacted]")
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("fixed_location", &self.fixed_location)
            .field("ip_locate_enabled", &self.ip_locate_enabled)
            .field("ip_locate_url", &self.ip_locate_url)
            .field("locate_timeout_secs", &self.locate_timeout_secs)
            .finish()
    }
}

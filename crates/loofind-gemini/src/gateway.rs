use loofind_core::{Prompt, SearchError, SearchGateway, SearchResult};

use crate::client::GeminiClient;
use crate::error::GeminiError;
use crate::normalize::to_search_result;

impl SearchGateway for GeminiClient {
    async fn search(&self, prompt: &Prompt) -> Result<SearchResult, SearchError> {
        match self.generate_content(prompt).await {
            Ok(response) => Ok(to_search_result(&response, self.locale())),
            Err(e) => {
                tracing::error!(model = %self.model(), error = %e, "toilet search failed");
                Err(normalize_error(&e, self.model(), self.locale()))
            }
        }
    }
}

/// Collapses a raw client error into the two user-facing failure kinds.
fn normalize_error(err: &GeminiError, model: &str, locale: loofind_core::Locale) -> SearchError {
    if err.is_not_found() {
        SearchError::service_unavailable(model, locale)
    } else {
        SearchError::search_failed(locale)
    }
}

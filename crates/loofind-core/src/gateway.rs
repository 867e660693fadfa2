use std::future::Future;

use crate::error::SearchError;
use crate::query::Prompt;
use crate::types::SearchResult;

/// An external grounded-generation service that answers a prompt with a
/// summary and place citations.
///
/// Implementations make exactly one round trip per call, never retry, and
/// return errors already normalized to [`SearchError`].
pub trait SearchGateway {
    fn search(
        &self,
        prompt: &Prompt,
    ) -> impl Future<Output = Result<SearchResult, SearchError>> + Send;
}

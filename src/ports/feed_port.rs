//! Upstream yield-curve feed port trait.

use async_trait::async_trait;

use crate::domain::error::FeedError;
use crate::domain::feed::FeedPeriod;

#[async_trait]
pub trait FeedPort: Send + Sync {
    /// Returns the raw feed body for one calendar month.
    ///
    /// One attempt per call. Transport failures and non-success statuses are
    /// reported as [`FeedError::UpstreamUnavailable`].
    async fn fetch_month(&self, period: FeedPeriod) -> Result<String, FeedError>;
}

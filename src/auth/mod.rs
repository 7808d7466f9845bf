// Authorization module
// Produces the bearer token the calendar lister needs

use crate::error::AppResult;
use async_trait::async_trait;

pub mod google;

pub use google::GoogleAuthorizer;

/// Obtains an access credential. The token is opaque to callers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authorizer: Send + Sync {
    async fn authorize(&self) -> AppResult<String>;
}

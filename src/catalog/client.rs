//! HTTP client for the remote user catalog.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};

use super::types::User;
use crate::error::Result;

/// Bound on any single catalog request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the remote user catalog.
pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a new catalog client for the given base URL.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Fetch every user in the catalog.
    pub async fn find_all(&self) -> Result<Vec<User>> {
        let url = format!("{}/users", self.base_url.trim_end_matches('/'));
        info!(url = %url, "Fetching users");

        let users: Vec<User> = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!(count = users.len(), "Fetched users");
        Ok(users)
    }

    /// Fetch a single user by id.
    pub async fn find_by_id(&self, id: i64) -> Result<User> {
        let url = format!("{}/users/{id}", self.base_url.trim_end_matches('/'));
        info!(url = %url, "Fetching user");

        let user = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(user)
    }
}

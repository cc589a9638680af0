use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;

/// Shared per-request context: the one outbound HTTP client and the
/// loaded config. Cheap to clone into handlers.
#[derive(Clone)]
pub struct State {
    pub client: reqwest::Client,
    pub config: Arc<Config>,
}

impl State {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .gzip(true)
            .build()?;
        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }
}

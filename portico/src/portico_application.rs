use anyhow::Result;

use crate::adapter::HttpAdapter;
use crate::mode::ModeConfig;

/// A fully assembled mode, ready to bind.
pub struct PorticoApplication<H: HttpAdapter> {
    http_adapter: H,
    mode: ModeConfig,
}

impl<H: HttpAdapter> PorticoApplication<H> {
    pub fn new(http_adapter: H, mode: ModeConfig) -> Self {
        Self { http_adapter, mode }
    }

    pub fn mode(&self) -> &ModeConfig {
        &self.mode
    }

    pub fn into_adapter(self) -> H {
        self.http_adapter
    }

    /// Binds the mode's address and serves. Only returns on failure.
    pub async fn listen(self) -> Result<()> {
        self.http_adapter
            .listen(self.mode.port, &self.mode.hostname)
            .await
    }
}

use std::sync::Arc;

use tracing::debug;

use super::RequestContext;
use crate::collaborators::{Cache, CacheError, Collaborators, MailError, Mailer};
use crate::cookies::{CookiePolicy, CookieSigner, ResponseCookies};
use crate::http_helpers::HttpRequest;
use crate::mode::{HandleResolution, ModeConfig};

#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Mail(#[from] MailError),
}

enum Handles {
    Shared {
        cache: Arc<dyn Cache>,
        mailer: Arc<dyn Mailer>,
    },
    PerRequest(Collaborators),
}

/// Produces a [`RequestContext`] per request, shaped the same in every mode.
pub struct ContextBuilder {
    handles: Handles,
    policy: CookiePolicy,
    signer: Option<Arc<CookieSigner>>,
}

impl ContextBuilder {
    /// With [`HandleResolution::OncePerProcess`] the cache and mailer are resolved
    /// here, so a failing provider fails startup.
    pub async fn new(mode: &ModeConfig, collaborators: Collaborators) -> Result<Self, ContextError> {
        let handles = match mode.handles {
            HandleResolution::OncePerProcess => Handles::Shared {
                cache: collaborators.cache.get_cache().await?,
                mailer: collaborators.mailer.get_mailer().await?,
            },
            HandleResolution::PerRequest => Handles::PerRequest(collaborators),
        };

        Ok(Self {
            handles,
            policy: mode.cookie_policy,
            signer: mode
                .cookie_secret
                .as_ref()
                .map(|secret| Arc::new(CookieSigner::new(secret))),
        })
    }

    pub async fn build(
        &self,
        req: &HttpRequest,
        response: ResponseCookies,
    ) -> Result<RequestContext, ContextError> {
        let (cache, mailer) = match &self.handles {
            Handles::Shared { cache, mailer } => (cache.clone(), mailer.clone()),
            Handles::PerRequest(collaborators) => {
                debug!("resolving cache and mailer for request");
                (
                    collaborators.cache.get_cache().await?,
                    collaborators.mailer.get_mailer().await?,
                )
            }
        };

        Ok(RequestContext::new(
            cache,
            mailer,
            Arc::new(req.headers.clone()),
            Arc::new(req.cookies.clone()),
            response,
            self.policy,
            self.signer.clone(),
        ))
    }
}

//! Seams to the collaborators the request context hands to resolvers.

mod cache;
mod mail;

use std::sync::Arc;

pub use cache::{Cache, CacheError, CacheProvider, MemoryCache, MemoryCacheProvider};
pub use mail::{
    EmailDetails, LogMailer, LogMailerProvider, MailError, MailReceipt, Mailer, MailerProvider,
};

/// Providers a mode resolves its cache and mailer handles from.
#[derive(Clone)]
pub struct Collaborators {
    pub cache: Arc<dyn CacheProvider>,
    pub mailer: Arc<dyn MailerProvider>,
}

impl Collaborators {
    pub fn new(cache: Arc<dyn CacheProvider>, mailer: Arc<dyn MailerProvider>) -> Self {
        Self { cache, mailer }
    }

    /// In-memory cache and logging mailer.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryCacheProvider::new()),
            Arc::new(LogMailerProvider::new()),
        )
    }
}

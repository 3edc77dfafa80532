use std::sync::{Arc, Mutex};

/// `Set-Cookie` values collected while one response is being produced.
///
/// Cloning shares the same sink; the route handler keeps one clone and drains
/// it into the outgoing response once the resolvers have finished.
#[derive(Debug, Clone, Default)]
pub struct ResponseCookies {
    pending: Arc<Mutex<Vec<String>>>,
}

impl ResponseCookies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, set_cookie: String) {
        self.pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(set_cookie);
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.pending.lock().unwrap_or_else(|e| e.into_inner()))
    }
}

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::collaborators::{Cache, EmailDetails, MailError, MailReceipt, Mailer};
use crate::cookies::{
    CookieJar, CookieOptions, CookiePolicy, CookieSigner, ResponseCookies, get_cookie, prefixed,
    serialize_cookie,
};
use crate::http_helpers::Headers;

/// Capabilities handed to resolvers for one request.
///
/// Built fresh by [`ContextBuilder`](super::ContextBuilder) for every request and
/// bound to that request's cookie jar and that response's cookie sink. It is
/// deliberately not `Clone`.
pub struct RequestContext {
    cache: Arc<dyn Cache>,
    mailer: Arc<dyn Mailer>,
    headers: Arc<Headers>,
    cookies: Arc<CookieJar>,
    response: ResponseCookies,
    policy: CookiePolicy,
    signer: Option<Arc<CookieSigner>>,
}

impl RequestContext {
    pub(crate) fn new(
        cache: Arc<dyn Cache>,
        mailer: Arc<dyn Mailer>,
        headers: Arc<Headers>,
        cookies: Arc<CookieJar>,
        response: ResponseCookies,
        policy: CookiePolicy,
        signer: Option<Arc<CookieSigner>>,
    ) -> Self {
        Self {
            cache,
            mailer,
            headers,
            cookies,
            response,
            policy,
            signer,
        }
    }

    /// Process-wide cache/session store.
    pub fn cache(&self) -> &Arc<dyn Cache> {
        &self.cache
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Value of the application cookie `name`, or `None` if the request did not carry it.
    pub fn get_cookie(&self, name: &str) -> Option<&str> {
        get_cookie(name, &self.cookies)
    }

    /// Like [`get_cookie`](Self::get_cookie) but only returns values whose
    /// signature verifies against this mode's secret.
    pub fn get_signed_cookie(&self, name: &str) -> Option<String> {
        let signer = self.signer.as_ref()?;
        signer.unsign(self.get_cookie(name)?)
    }

    /// Whether this mode has a cookie secret.
    pub fn signs_cookies(&self) -> bool {
        self.signer.is_some()
    }

    /// Writes `PREFIX + name` onto the response. The mode's cookie policy is
    /// applied over `options` and cannot be overridden by the caller.
    pub fn set_cookie(&self, name: &str, value: &str, options: CookieOptions) {
        let options = self.policy.apply(options);

        let value = match (&self.signer, options.signed) {
            (Some(signer), true) => signer.sign(value),
            (None, true) => {
                warn!(cookie = name, "no cookie secret configured, emitting unsigned cookie");
                value.to_string()
            }
            (_, false) => value.to_string(),
        };

        self.response
            .push(serialize_cookie(&prefixed(name), &value, &options));
    }

    /// Expires `PREFIX + name`. `Path` defaults to `/`.
    pub fn clear_cookie(&self, name: &str, options: CookieOptions) {
        let options = CookieOptions {
            path: options.path.or_else(|| Some("/".to_string())),
            expires: Some(DateTime::<Utc>::UNIX_EPOCH),
            max_age: None,
            signed: false,
            ..options
        };

        self.response
            .push(serialize_cookie(&prefixed(name), "", &options));
    }

    /// Forwards to the mailer bound for this request. Errors are returned as-is.
    pub async fn send_mail(&self, details: EmailDetails) -> Result<MailReceipt, MailError> {
        self.mailer.send_mail(&details).await
    }
}

impl std::fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestContext")
            .field("headers", &self.headers.len())
            .field("cookies", &self.cookies.len())
            .field("policy", &self.policy)
            .field("signed", &self.signer.is_some())
            .finish_non_exhaustive()
    }
}

//! Demo schema: a cookie-backed session, a per-session visit counter and a
//! welcome mail.

use std::time::Duration;

use async_graphql::{Context, EmptySubscription, Object, Result};
use portico::{CookieOptions, EmailDetails, RequestContext, SameSite};
use portico_async_graphql::{async_trait, ContextExt, ResolverSet, Resolvers};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "session";
const SESSION_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

fn session_key(id: &str) -> String {
    format!("session:{id}")
}

/// Session id from the request cookie, verified when the mode signs cookies.
fn session_id(rc: &RequestContext) -> Option<String> {
    if rc.signs_cookies() {
        rc.get_signed_cookie(SESSION_COOKIE)
    } else {
        rc.get_cookie(SESSION_COOKIE).map(str::to_string)
    }
}

async fn current_user(rc: &RequestContext) -> Result<Option<String>> {
    match session_id(rc) {
        Some(id) => Ok(rc.cache().get(&session_key(&id)).await?),
        None => Ok(None),
    }
}

pub struct Query;

#[Object]
impl Query {
    async fn hello(&self, name: Option<String>) -> String {
        format!("Hello, {}!", name.as_deref().unwrap_or("world"))
    }

    /// Email of the logged-in user.
    async fn me(&self, ctx: &Context<'_>) -> Result<Option<String>> {
        current_user(ctx.request_context()?).await
    }

    /// Counts calls per session, or for all anonymous callers together.
    async fn visits(&self, ctx: &Context<'_>) -> Result<u64> {
        let rc = ctx.request_context()?;
        let key = format!(
            "visits:{}",
            session_id(rc).unwrap_or_else(|| "anonymous".to_string())
        );

        let cache = rc.cache();
        let count = cache
            .get(&key)
            .await?
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0)
            + 1;
        cache.set(&key, count.to_string(), Some(SESSION_TTL)).await?;
        Ok(count)
    }

    async fn user_agent(&self, ctx: &Context<'_>) -> Result<Option<String>> {
        Ok(ctx
            .request_context()?
            .headers()
            .get("user-agent")
            .map(str::to_string))
    }
}

pub struct Mutation;

#[Object]
impl Mutation {
    /// Starts a session for `email` and returns it.
    async fn login(&self, ctx: &Context<'_>, email: String) -> Result<String> {
        if !email.contains('@') {
            return Err("invalid email".into());
        }

        let rc = ctx.request_context()?;
        let id = Uuid::new_v4().to_string();
        rc.cache()
            .set(&session_key(&id), email.clone(), Some(SESSION_TTL))
            .await?;

        rc.set_cookie(
            SESSION_COOKIE,
            &id,
            CookieOptions::new()
                .path("/")
                .http_only(true)
                .secure(true)
                .same_site(SameSite::Lax)
                .max_age(SESSION_TTL.as_secs() as i64)
                .signed(rc.signs_cookies()),
        );
        Ok(email)
    }

    async fn logout(&self, ctx: &Context<'_>) -> Result<bool> {
        let rc = ctx.request_context()?;
        let removed = match session_id(rc) {
            Some(id) => rc.cache().delete(&session_key(&id)).await?,
            None => false,
        };
        rc.clear_cookie(SESSION_COOKIE, CookieOptions::new());
        Ok(removed)
    }

    /// Sends a welcome mail and returns the mailer's message id.
    async fn send_welcome(&self, ctx: &Context<'_>, to: String) -> Result<String> {
        let details = EmailDetails::new(to, "Welcome")
            .text("Thanks for signing up.")
            .html("<p>Thanks for signing up.</p>");

        let receipt = ctx.request_context()?.send_mail(details).await?;
        Ok(receipt.message_id)
    }
}

pub struct AppResolvers;

#[async_trait]
impl ResolverSet for AppResolvers {
    type Query = Query;
    type Mutation = Mutation;
    type Subscription = EmptySubscription;

    async fn get_resolvers(&self) -> anyhow::Result<Resolvers<Query, Mutation, EmptySubscription>> {
        Ok(Resolvers::new(Query, Mutation, EmptySubscription))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use portico::collaborators::{LogMailerProvider, MemoryCacheProvider};
    use portico::{
        Body, Collaborators, ContextBuilder, GraphQLRoute, Headers, HttpRequest, HttpResponse,
        ModeConfig, SchemaProvider,
    };
    use portico_async_graphql::GraphQLModule;
    use serde_json::{json, Value};

    use super::*;

    async fn route(mode: ModeConfig, collaborators: Collaborators) -> GraphQLRoute {
        let executor = GraphQLModule::for_root(AppResolvers)
            .build_schema()
            .await
            .unwrap();
        let builder = ContextBuilder::new(&mode, collaborators).await.unwrap();
        GraphQLRoute::new(executor, Arc::new(builder))
    }

    async fn post(route: &GraphQLRoute, query: &str, cookie: Option<&str>) -> HttpResponse {
        let mut headers = vec![("content-type".to_string(), "application/json".to_string())];
        if let Some(cookie) = cookie {
            headers.push(("cookie".to_string(), cookie.to_string()));
        }
        let req = HttpRequest::new(
            "POST",
            "/graphql",
            headers.into_iter().collect::<Headers>(),
            Body::Json(json!({ "query": query })),
        );
        route.handle(req).await
    }

    fn data(response: &HttpResponse) -> Value {
        match &response.body {
            Some(Body::Json(value)) => value["data"].clone(),
            other => panic!("unexpected body {other:?}"),
        }
    }

    /// `name=value` of the first Set-Cookie header.
    fn cookie_pair(response: &HttpResponse) -> String {
        let (_, value) = response
            .headers
            .iter()
            .find(|(k, _)| k == "set-cookie")
            .unwrap();
        value.split(';').next().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_hello() {
        let route = route(ModeConfig::development(), Collaborators::in_memory()).await;
        let res = post(&route, r#"{ hello(name: "Ada") }"#, None).await;
        assert_eq!(data(&res), json!({ "hello": "Hello, Ada!" }));
    }

    #[tokio::test]
    async fn test_login_session_in_production() {
        let route = route(ModeConfig::production("secret"), Collaborators::in_memory()).await;

        let res = post(&route, r#"mutation { login(email: "ada@example.com") }"#, None).await;
        assert_eq!(data(&res), json!({ "login": "ada@example.com" }));
        let cookie = cookie_pair(&res);
        assert!(cookie.starts_with("__portico_session="));

        let res = post(&route, "{ me visits }", Some(&cookie)).await;
        assert_eq!(data(&res), json!({ "me": "ada@example.com", "visits": 1 }));

        let res = post(&route, "{ visits }", Some(&cookie)).await;
        assert_eq!(data(&res), json!({ "visits": 2 }));
    }

    #[tokio::test]
    async fn test_tampered_session_is_ignored_in_production() {
        let route = route(ModeConfig::production("secret"), Collaborators::in_memory()).await;

        let res = post(&route, r#"mutation { login(email: "ada@example.com") }"#, None).await;
        let cookie = cookie_pair(&res);
        let (_, value) = cookie.split_once('=').unwrap();
        let (id, _) = value.split_once('.').unwrap();

        let forged = format!("__portico_session={id}");
        let res = post(&route, "{ me }", Some(&forged)).await;
        assert_eq!(data(&res), json!({ "me": null }));
    }

    #[tokio::test]
    async fn test_development_session_is_unsigned_and_relaxed() {
        let route = route(ModeConfig::development(), Collaborators::in_memory()).await;

        let res = post(&route, r#"mutation { login(email: "ada@example.com") }"#, None).await;
        let (_, header) = res.headers.iter().find(|(k, _)| k == "set-cookie").unwrap();
        assert!(header.ends_with("; HttpOnly; SameSite=None"));
        assert!(!header.contains("Secure"));

        let res = post(&route, "{ me }", Some(&cookie_pair(&res))).await;
        assert_eq!(data(&res), json!({ "me": "ada@example.com" }));
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let route = route(ModeConfig::production("secret"), Collaborators::in_memory()).await;

        let res = post(&route, r#"mutation { login(email: "ada@example.com") }"#, None).await;
        let cookie = cookie_pair(&res);

        let res = post(&route, "mutation { logout }", Some(&cookie)).await;
        assert_eq!(data(&res), json!({ "logout": true }));
        let (_, header) = res.headers.iter().find(|(k, _)| k == "set-cookie").unwrap();
        assert!(header.starts_with("__portico_session=; Path=/; Expires=Thu, 01 Jan 1970 00:00:00 GMT"));

        let res = post(&route, "{ me }", Some(&cookie)).await;
        assert_eq!(data(&res), json!({ "me": null }));
    }

    #[tokio::test]
    async fn test_send_welcome() {
        let mailer = LogMailerProvider::new();
        let collaborators = Collaborators::new(
            Arc::new(MemoryCacheProvider::new()),
            Arc::new(mailer.clone()),
        );
        let route = route(ModeConfig::production("secret"), collaborators).await;

        let res = post(&route, r#"mutation { sendWelcome(to: "ada@example.com") }"#, None).await;
        assert_eq!(data(&res), json!({ "sendWelcome": "log-1" }));
        assert_eq!(mailer.mailer().sent(), 1);
    }

    #[tokio::test]
    async fn test_invalid_login_is_a_field_error() {
        let route = route(ModeConfig::development(), Collaborators::in_memory()).await;
        let res = post(&route, r#"mutation { login(email: "nope") }"#, None).await;
        match &res.body {
            Some(Body::Json(value)) => {
                assert_eq!(value["errors"][0]["message"], "invalid email");
            }
            other => panic!("unexpected body {other:?}"),
        }
    }
}

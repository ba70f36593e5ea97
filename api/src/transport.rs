//! Credential transport: how tokens travel between client and server
//!
//! Under [`TransportPolicy::Cookie`] tokens are set as cookies at login and
//! read back from the access cookie. Under [`TransportPolicy::Body`] they are
//! returned in the response body only and presented as
//! `Authorization: Bearer <token>`.

use actix_web::cookie::{time::Duration, Cookie, SameSite};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, HttpResponseBuilder};
use ak_core::domain::entities::token::TokenPair;
use ak_shared::{AuthConfig, SessionConfig, TransportPolicy};

use crate::dto::AuthResponse;

/// Delivers, extracts and clears tokens according to the transport policy
#[derive(Debug, Clone)]
pub struct TokenTransport {
    policy: TransportPolicy,
    session: SessionConfig,
}

impl TokenTransport {
    pub fn new(policy: TransportPolicy, session: SessionConfig) -> Self {
        Self { policy, session }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.transport, config.session.clone())
    }

    pub fn policy(&self) -> TransportPolicy {
        self.policy
    }

    /// Raw access token presented by the client, if any
    pub fn extract(&self, req: &HttpRequest) -> Option<String> {
        let token = match self.policy {
            TransportPolicy::Cookie => req
                .cookie(&self.session.access_cookie_name)
                .map(|c| c.value().to_string()),
            TransportPolicy::Body => bearer_token(req),
        };

        token.filter(|t| !t.is_empty())
    }

    /// Login response carrying the pair
    ///
    /// The JSON body always holds both tokens. Under the cookie policy they are
    /// also set as cookies whose max-age is the token lifetime.
    pub fn deliver(&self, pair: &TokenPair) -> HttpResponse {
        let mut response = HttpResponse::Ok();

        if self.policy == TransportPolicy::Cookie {
            response
                .cookie(self.token_cookie(
                    &self.session.access_cookie_name,
                    &pair.access_token,
                    pair.access_expires_in,
                ))
                .cookie(self.token_cookie(
                    &self.session.refresh_cookie_name,
                    &pair.refresh_token,
                    pair.refresh_expires_in,
                ));
        }

        response.json(AuthResponse::from(pair))
    }

    /// Adds removal cookies for both tokens under the cookie policy
    pub fn clear(&self, response: &mut HttpResponseBuilder) {
        if self.policy != TransportPolicy::Cookie {
            return;
        }

        for name in [&self.session.access_cookie_name, &self.session.refresh_cookie_name] {
            let mut cookie = Cookie::build(name.clone(), "")
                .path(self.session.path.clone())
                .finish();
            cookie.make_removal();
            response.cookie(cookie);
        }
    }

    fn token_cookie(&self, name: &str, value: &str, max_age_seconds: i64) -> Cookie<'static> {
        Cookie::build(name.to_string(), value.to_string())
            .http_only(self.session.http_only)
            .secure(self.session.secure)
            .same_site(parse_same_site(&self.session.same_site))
            .path(self.session.path.clone())
            .max_age(Duration::seconds(max_age_seconds))
            .finish()
    }
}

/// Extracts Bearer token from Authorization header
fn bearer_token<R: HttpMessage>(req: &R) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
}

fn parse_same_site(value: &str) -> SameSite {
    match value.to_lowercase().as_str() {
        "strict" => SameSite::Strict,
        "none" => SameSite::None,
        _ => SameSite::Lax,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn pair() -> TokenPair {
        TokenPair {
            access_token: "access.jwt".to_string(),
            refresh_token: "refresh.jwt".to_string(),
            access_expires_in: 1800,
            refresh_expires_in: 2592000,
            record_id: 1,
        }
    }

    #[test]
    fn test_extract_bearer_token() {
        let transport = TokenTransport::new(TransportPolicy::Body, SessionConfig::default());

        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_http_request();
        assert_eq!(transport.extract(&req), Some("test_token_123".to_string()));

        let req_no_bearer = TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_http_request();
        assert_eq!(transport.extract(&req_no_bearer), None);

        let req_empty = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer "))
            .to_http_request();
        assert_eq!(transport.extract(&req_empty), None);

        let req_no_header = TestRequest::default().to_http_request();
        assert_eq!(transport.extract(&req_no_header), None);
    }

    #[test]
    fn test_body_policy_ignores_cookie() {
        let transport = TokenTransport::new(TransportPolicy::Body, SessionConfig::default());

        let req = TestRequest::default()
            .cookie(Cookie::new("access_token", "from-cookie"))
            .to_http_request();

        assert_eq!(transport.extract(&req), None);
    }

    #[test]
    fn test_cookie_policy_reads_access_cookie() {
        let transport = TokenTransport::new(TransportPolicy::Cookie, SessionConfig::default());

        let req = TestRequest::default()
            .cookie(Cookie::new("access_token", "from-cookie"))
            .insert_header((AUTHORIZATION, "Bearer from-header"))
            .to_http_request();

        assert_eq!(transport.extract(&req), Some("from-cookie".to_string()));
    }

    #[test]
    fn test_cookie_policy_sets_cookie_attributes() {
        let transport = TokenTransport::new(TransportPolicy::Cookie, SessionConfig::default());

        let response = transport.deliver(&pair());
        let cookies: Vec<Cookie<'_>> = response.cookies().collect();
        assert_eq!(cookies.len(), 2);

        let access = cookies.iter().find(|c| c.name() == "access_token").unwrap();
        assert_eq!(access.value(), "access.jwt");
        assert_eq!(access.http_only(), Some(true));
        assert_eq!(access.secure(), Some(true));
        assert_eq!(access.same_site(), Some(SameSite::Lax));
        assert_eq!(access.path(), Some("/"));
        assert_eq!(access.max_age(), Some(Duration::seconds(1800)));

        let refresh = cookies.iter().find(|c| c.name() == "refresh_token").unwrap();
        assert_eq!(refresh.max_age(), Some(Duration::seconds(2592000)));
    }

    #[test]
    fn test_body_policy_sets_no_cookies() {
        let transport = TokenTransport::new(TransportPolicy::Body, SessionConfig::default());

        let response = transport.deliver(&pair());

        assert_eq!(response.cookies().count(), 0);
    }

    #[test]
    fn test_clear_emits_removal_cookies() {
        let transport = TokenTransport::new(TransportPolicy::Cookie, SessionConfig::default());

        let mut builder = HttpResponse::Ok();
        transport.clear(&mut builder);
        let response = builder.finish();

        let cookies: Vec<Cookie<'_>> = response.cookies().collect();
        assert_eq!(cookies.len(), 2);
        for cookie in cookies {
            assert_eq!(cookie.value(), "");
            assert_eq!(cookie.max_age(), Some(Duration::ZERO));
        }
    }
}

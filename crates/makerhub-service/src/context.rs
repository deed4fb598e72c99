//! Request context carrying the authenticated identity.

use makerhub_auth::jwt::Claims;

/// Identity of the caller of an authenticated operation.
///
/// Built by the authorization gate from a verified bearer token and passed
/// into service methods. Services never take the acting email from a
/// request body; it always comes from here.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Email the bearer token is bound to.
    pub email: String,
    /// All verified claims of the bearer token.
    pub claims: Claims,
}

impl RequestContext {
    /// Creates a context from verified claims.
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            email: claims.email.clone(),
            claims,
        }
    }
}

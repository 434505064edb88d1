use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use chrono::{Duration, Utc};
use futures::future::{ready, LocalBoxFuture, Ready};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

const TOKEN_LIFETIME_HOURS: i64 = 24;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,     // email
    pub exp: usize,      // expiration time
    pub iat: usize,      // issued at
    pub user_id: String, // hex ObjectId of the profile
}

pub fn issue_token(secret: &str, email: &str, user_id: &str) -> Result<String, ApiError> {
    let now = Utc::now();
    let claims = Claims {
        sub: email.to_string(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::hours(TOKEN_LIFETIME_HOURS)).timestamp() as usize,
        user_id: user_id.to_string(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| {
        log::error!("Failed to sign token: {}", e);
        ApiError::Internal("Failed to generate token".to_string())
    })
}

pub fn decode_token(secret: &str, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.set_required_spec_claims(&["exp", "iat", "sub", "user_id"]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
}

/// Token from an `Authorization: Bearer ...` header, if there is one.
pub fn bearer_token(req: &actix_web::HttpRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

/// Rejects requests without a valid bearer token and stores the decoded
/// [`Claims`] in the request extensions. Rejections are answered here as a
/// JSON 401 rather than propagated as a service error.
pub struct AuthMiddleware {
    secret: String,
}

impl AuthMiddleware {
    pub fn new(secret: &str) -> Self {
        Self {
            secret: secret.to_string(),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            secret: self.secret.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    secret: String,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let rejection = match bearer_token(req.request()) {
            None => "No authorization header",
            Some(token) => match decode_token(&self.secret, token) {
                Ok(claims) => {
                    req.extensions_mut().insert(claims);
                    let fut = self.service.call(req);
                    return Box::pin(async move { Ok(fut.await?.map_into_left_body()) });
                }
                Err(err) => {
                    log::debug!("Rejected token: {:?}", err);
                    "Invalid token"
                }
            },
        };

        let response = req
            .error_response(ApiError::Unauthorized(rejection.to_string()))
            .map_into_right_body();
        Box::pin(ready(Ok(response)))
    }
}

use std::future::{ready, Ready};

use actix_web::{dev::Payload, web, Error, FromRequest, HttpMessage, HttpRequest};
use mongodb::bson::oid::ObjectId;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::middleware::auth::{bearer_token, decode_token, Claims};

#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub email: String,
}

impl AuthenticatedUser {
    pub fn object_id(&self) -> Result<ObjectId, ApiError> {
        ObjectId::parse_str(&self.user_id)
            .map_err(|_| ApiError::Unauthorized("Invalid user id in token".to_string()))
    }
}

impl From<Claims> for AuthenticatedUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.sub,
        }
    }
}

/// Requires claims placed by [`AuthMiddleware`](crate::middleware::auth::AuthMiddleware).
impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>() {
            Some(claims) => ready(Ok(claims.clone().into())),
            None => ready(Err(
                ApiError::Unauthorized("User not authenticated".to_string()).into()
            )),
        }
    }
}

/// Signed-in user when a valid bearer token is sent, anonymous otherwise.
/// Used on routes that work for everyone but do more for signed-in users.
#[derive(Clone, Debug)]
pub struct OptionalUser(pub Option<AuthenticatedUser>);

impl FromRequest for OptionalUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        if let Some(claims) = req.extensions().get::<Claims>() {
            return ready(Ok(OptionalUser(Some(claims.clone().into()))));
        }

        let user = match (bearer_token(req), req.app_data::<web::Data<AppConfig>>()) {
            (Some(token), Some(config)) => match decode_token(&config.jwt_secret, token) {
                Ok(claims) => Some(claims.into()),
                Err(err) => {
                    log::debug!("Ignoring invalid token on optional route: {:?}", err);
                    None
                }
            },
            _ => None,
        };
        ready(Ok(OptionalUser(user)))
    }
}

use actix_web::{
    cookie::{time::Duration as CookieDuration, Cookie, SameSite},
    http::header,
    web, HttpRequest, HttpResponse,
};
use chrono::Utc;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::middleware::auth::issue_token;
use crate::middleware::auth_context::AuthenticatedUser;
use crate::models::google_auth::GoogleAuthCallbackParams;
use crate::models::user::UserSession;
use crate::services::google_auth_service::GoogleOAuth;
use crate::services::history_service::HistoryStore;

pub const OAUTH_STATE_COOKIE: &str = "oauth_state";
const OAUTH_STATE_PATH: &str = "/api/auth/google";
const OAUTH_STATE_TTL_MINUTES: i64 = 10;

fn state_cookie(value: String) -> Cookie<'static> {
    Cookie::build(OAUTH_STATE_COOKIE, value)
        .path(OAUTH_STATE_PATH)
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::minutes(OAUTH_STATE_TTL_MINUTES))
        .finish()
}

/// The callback's `state` must echo the value stored when the redirect was issued.
fn verify_state(req: &HttpRequest, state: Option<&str>) -> Result<(), ApiError> {
    let expected = req.cookie(OAUTH_STATE_COOKIE);
    match (expected, state) {
        (Some(cookie), Some(state)) if !state.is_empty() && cookie.value() == state => Ok(()),
        _ => {
            log::warn!("OAuth callback with missing or mismatched state");
            Err(ApiError::Validation("Invalid OAuth state".to_string()))
        }
    }
}

fn oauth_client(config: &AppConfig) -> Result<GoogleOAuth, ApiError> {
    let oauth = config
        .google_oauth
        .as_ref()
        .ok_or_else(|| ApiError::NotConfigured("Google sign-in is not configured".to_string()))?;
    GoogleOAuth::new(oauth).map_err(|e| {
        log::error!("Invalid Google OAuth configuration: {}", e);
        ApiError::NotConfigured("Google sign-in is not configured".to_string())
    })
}

/*
    /api/auth/google
*/
pub async fn google_auth_init(config: web::Data<AppConfig>) -> Result<HttpResponse, ApiError> {
    let oauth = oauth_client(&config)?;
    let (auth_url, csrf_token) = oauth.authorize_url();
    log::debug!("Redirecting to Google sign-in");

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, auth_url.to_string()))
        .cookie(state_cookie(csrf_token.secret().clone()))
        .finish())
}

/*
    /api/auth/google/callback
*/
pub async fn google_auth_callback(
    req: HttpRequest,
    config: web::Data<AppConfig>,
    store: web::Data<HistoryStore>,
    query: web::Query<GoogleAuthCallbackParams>,
) -> Result<HttpResponse, ApiError> {
    let params = query.into_inner();
    if let Some(error) = params.error {
        log::warn!("OAuth error received: {}", error);
        return Err(ApiError::Validation(format!("OAuth error: {}", error)));
    }
    verify_state(&req, params.state.as_deref())?;
    let code = params
        .code
        .ok_or_else(|| ApiError::Validation("Missing authorization code".to_string()))?;

    let oauth = oauth_client(&config)?;
    let access_token = oauth.exchange_code(code).await.map_err(|e| {
        log::error!("{}", e);
        ApiError::Upstream(e.to_string())
    })?;
    let info = oauth.user_info(&access_token).await.map_err(|e| {
        log::error!("{}", e);
        ApiError::Upstream(e.to_string())
    })?;

    let user = store.upsert_user(&info, Utc::now()).await?;
    let user_id = user
        .id
        .map(|id| id.to_hex())
        .ok_or_else(|| ApiError::Internal("Stored user has no id".to_string()))?;
    log::info!("User {} signed in with Google", user.email);

    let token = issue_token(&config.jwt_secret, &user.email, &user_id)?;
    let redirect_url = format!(
        "{}/?token={}",
        config.frontend_url.trim_end_matches('/'),
        token
    );

    let mut spent = state_cookie(String::new());
    spent.make_removal();

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, redirect_url))
        .cookie(spent)
        .finish())
}

/*
    /api/auth/session
*/
pub async fn user_session(
    user: AuthenticatedUser,
    store: web::Data<HistoryStore>,
) -> Result<HttpResponse, ApiError> {
    let profile = store.get_user(user.object_id()?).await?;
    Ok(HttpResponse::Ok().json(UserSession::from(profile)))
}

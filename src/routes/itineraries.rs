use actix_web::{
    http::header::{self, ContentDisposition, DispositionParam, DispositionType},
    web, HttpResponse,
};
use serde::Deserialize;

use crate::error::ApiError;
use crate::middleware::auth_context::AuthenticatedUser;
use crate::models::history::{ItineraryView, SearchView};
use crate::services::export_service::{export_filename, render_markdown};
use crate::services::history_service::HistoryStore;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteUpdate {
    pub is_favorite: bool,
}

/*
    /api/searches
*/
pub async fn list_searches(
    user: AuthenticatedUser,
    store: web::Data<HistoryStore>,
) -> Result<HttpResponse, ApiError> {
    let searches = store.list_searches(user.object_id()?).await?;
    let views: Vec<SearchView> = searches.into_iter().map(SearchView::from).collect();
    Ok(HttpResponse::Ok().json(views))
}

/*
    /api/itineraries
*/
pub async fn list_itineraries(
    user: AuthenticatedUser,
    store: web::Data<HistoryStore>,
) -> Result<HttpResponse, ApiError> {
    let saved = store.list_itineraries(user.object_id()?).await?;
    let views: Vec<ItineraryView> = saved.into_iter().map(ItineraryView::from).collect();
    Ok(HttpResponse::Ok().json(views))
}

/*
    /api/itineraries/{id}
*/
pub async fn get_itinerary(
    user: AuthenticatedUser,
    store: web::Data<HistoryStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let saved = store.get_itinerary(user.object_id()?, &path).await?;
    Ok(HttpResponse::Ok().json(ItineraryView::from(saved)))
}

/*
    /api/itineraries/{id}/favorite
*/
pub async fn set_favorite(
    user: AuthenticatedUser,
    store: web::Data<HistoryStore>,
    path: web::Path<String>,
    body: web::Json<FavoriteUpdate>,
) -> Result<HttpResponse, ApiError> {
    let saved = store
        .set_favorite(user.object_id()?, &path, body.is_favorite)
        .await?;
    Ok(HttpResponse::Ok().json(ItineraryView::from(saved)))
}

/*
    DELETE /api/itineraries/{id}
*/
pub async fn delete_itinerary(
    user: AuthenticatedUser,
    store: web::Data<HistoryStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    store.delete_itinerary(user.object_id()?, &path).await?;
    log::info!("Deleted itinerary {} for {}", path.as_str(), user.email);
    Ok(HttpResponse::NoContent().finish())
}

/*
    /api/itineraries/{id}/export
*/
pub async fn export_itinerary(
    user: AuthenticatedUser,
    store: web::Data<HistoryStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let saved = store.get_itinerary(user.object_id()?, &path).await?;
    let document = render_markdown(&saved);

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "text/markdown; charset=utf-8"))
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(export_filename(
                &saved.destination,
            ))],
        })
        .body(document))
}

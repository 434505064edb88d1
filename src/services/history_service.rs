use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::ReturnDocument,
    Client, Collection, Database,
};
use thiserror::Error;

use crate::models::google_auth::GoogleUserInfo;
use crate::models::history::{SavedItinerary, UserSearch};
use crate::models::plan::OptimizedTrip;
use crate::models::trip_request::TripRequest;
use crate::models::user::UserProfile;

pub const USERS: &str = "Users";
pub const SEARCHES: &str = "Searches";
pub const ITINERARIES: &str = "Itineraries";

pub const SEARCH_HISTORY_LIMIT: i64 = 20;
pub const ITINERARY_LIST_LIMIT: i64 = 50;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid ID: {0}")]
    InvalidId(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),
}

pub fn parse_object_id(id: &str) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}

/// Searches, saved itineraries and profiles of signed-in travellers.
///
/// Every itinerary query is scoped to the owning user; an id that exists but
/// belongs to someone else is reported as not found.
#[derive(Clone)]
pub struct HistoryStore {
    db: Database,
}

impl HistoryStore {
    pub fn new(client: &Client, database: &str) -> Self {
        Self {
            db: client.database(database),
        }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    fn users(&self) -> Collection<UserProfile> {
        self.db.collection(USERS)
    }

    fn searches(&self) -> Collection<UserSearch> {
        self.db.collection(SEARCHES)
    }

    fn itineraries(&self) -> Collection<SavedItinerary> {
        self.db.collection(ITINERARIES)
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    pub async fn record_search(
        &self,
        user_id: ObjectId,
        request: &TripRequest,
    ) -> Result<Option<ObjectId>, StoreError> {
        let search = UserSearch::from_request(user_id, request, Utc::now());
        let result = self.searches().insert_one(&search).await?;
        log::debug!("Recorded search {} -> {}", search.source, search.destination);
        Ok(result.inserted_id.as_object_id())
    }

    pub async fn list_searches(&self, user_id: ObjectId) -> Result<Vec<UserSearch>, StoreError> {
        let cursor = self
            .searches()
            .find(doc! { "user_id": user_id })
            .sort(doc! { "search_date": -1 })
            .limit(SEARCH_HISTORY_LIMIT)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn save_itinerary(
        &self,
        user_id: ObjectId,
        search_id: Option<ObjectId>,
        request: &TripRequest,
        trip: &OptimizedTrip,
    ) -> Result<SavedItinerary, StoreError> {
        let mut saved = SavedItinerary {
            id: None,
            user_id,
            search_id,
            source: request.source.trim().to_string(),
            destination: request.destination.trim().to_string(),
            created_at: Utc::now(),
            optimization_result: trip.clone(),
            is_favorite: false,
        };
        let result = self.itineraries().insert_one(&saved).await?;
        saved.id = result.inserted_id.as_object_id();
        Ok(saved)
    }

    pub async fn list_itineraries(
        &self,
        user_id: ObjectId,
    ) -> Result<Vec<SavedItinerary>, StoreError> {
        let cursor = self
            .itineraries()
            .find(doc! { "user_id": user_id })
            .sort(doc! { "created_at": -1 })
            .limit(ITINERARY_LIST_LIMIT)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn get_itinerary(
        &self,
        user_id: ObjectId,
        id: &str,
    ) -> Result<SavedItinerary, StoreError> {
        let id = parse_object_id(id)?;
        self.itineraries()
            .find_one(doc! { "_id": id, "user_id": user_id })
            .await?
            .ok_or_else(|| StoreError::NotFound("Itinerary".to_string()))
    }

    pub async fn set_favorite(
        &self,
        user_id: ObjectId,
        id: &str,
        favorite: bool,
    ) -> Result<SavedItinerary, StoreError> {
        let id = parse_object_id(id)?;
        self.itineraries()
            .find_one_and_update(
                doc! { "_id": id, "user_id": user_id },
                doc! { "$set": { "is_favorite": favorite } },
            )
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| StoreError::NotFound("Itinerary".to_string()))
    }

    pub async fn delete_itinerary(&self, user_id: ObjectId, id: &str) -> Result<(), StoreError> {
        let id = parse_object_id(id)?;
        let result = self
            .itineraries()
            .delete_one(doc! { "_id": id, "user_id": user_id })
            .await?;
        if result.deleted_count == 0 {
            return Err(StoreError::NotFound("Itinerary".to_string()));
        }
        Ok(())
    }

    /// Creates the profile on first sign-in, otherwise refreshes it.
    pub async fn upsert_user(
        &self,
        info: &GoogleUserInfo,
        now: DateTime<Utc>,
    ) -> Result<UserProfile, StoreError> {
        let now = mongodb::bson::DateTime::from_chrono(now);
        self.users()
            .find_one_and_update(
                doc! { "email": &info.email },
                doc! {
                    "$set": {
                        "name": info.name.clone(),
                        "image": info.picture.clone(),
                        "google_id": &info.id,
                        "last_login": now,
                    },
                    "$setOnInsert": { "created_at": now },
                },
            )
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| StoreError::NotFound("User".to_string()))
    }

    pub async fn get_user(&self, user_id: ObjectId) -> Result<UserProfile, StoreError> {
        self.users()
            .find_one(doc! { "_id": user_id })
            .await?
            .ok_or_else(|| StoreError::NotFound("User".to_string()))
    }
}

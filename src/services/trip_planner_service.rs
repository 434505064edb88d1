use crate::config::AppConfig;
use crate::error::ApiError;
use crate::models::plan::{OptimizedTrip, TravelPlan};
use crate::models::trip_request::TripRequest;
use crate::services::enrichment_service::enrich_itinerary;
use crate::services::gemini_service::{GeminiClient, LlmError, PlanGenerator};
use crate::services::maps_service::{
    DirectionsQuery, GoogleMapsClient, MapsProvider, TransitMode, TravelMode,
};
use crate::services::places_service::{direct_trains, top_accommodations, top_restaurants};
use crate::services::retry::{retry_with_backoff, BackoffPolicy};

pub const ACCOMMODATION_LIMIT: usize = 3;
pub const FOOD_SPOT_LIMIT: usize = 5;

/// Drafts a trip with the plan generator and enriches it with places data.
pub struct TripPlanner<G = GeminiClient, M = GoogleMapsClient> {
    generator: G,
    maps: M,
    backoff: BackoffPolicy,
}

impl TripPlanner {
    /// Planner backed by Gemini and Google Maps Platform.
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        let generator = GeminiClient::new(
            &config.gemini_api_key,
            &config.gemini_model,
            &config.gemini_base_url,
        )
        .map_err(|e| ApiError::Internal(format!("Failed to build Gemini client: {}", e)))?;
        let maps = GoogleMapsClient::new(
            &config.maps_api_key,
            &config.maps_base_url,
            &config.places_base_url,
        )
        .map_err(|e| ApiError::Internal(format!("Failed to build Maps client: {}", e)))?;
        Ok(Self::new(generator, maps))
    }
}

impl<G: PlanGenerator, M: MapsProvider> TripPlanner<G, M> {
    pub fn new(generator: G, maps: M) -> Self {
        Self {
            generator,
            maps,
            backoff: BackoffPolicy::default(),
        }
    }

    pub fn with_backoff(mut self, backoff: BackoffPolicy) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn maps(&self) -> &M {
        &self.maps
    }

    async fn draft(&self, request: &TripRequest) -> Result<TravelPlan, ApiError> {
        let plan = retry_with_backoff(self.backoff, LlmError::is_rate_limit, || {
            self.generator.generate(request)
        })
        .await
        .map_err(|e| {
            log::error!("Itinerary generation failed: {}", e);
            e
        })?;
        Ok(plan)
    }

    pub async fn optimize(&self, request: &TripRequest) -> Result<OptimizedTrip, ApiError> {
        request.validate()?;
        log::info!(
            "Optimizing {} trip {} -> {} ({} days)",
            request.trip_type.as_str(),
            request.source,
            request.destination,
            request.trip_days()
        );

        let mut plan = self.draft(request).await?;
        // Prices are asked for in the requested currency whatever label comes back.
        plan.currency = request.currency;

        let destination = request.destination.trim();
        let center = self.maps.geocode(destination).await.map_err(|e| {
            log::error!("Geocoding {} failed: {}", destination, e);
            e
        })?;

        let trains_query = DirectionsQuery {
            origin: request.source.trim().to_string(),
            destination: destination.to_string(),
            mode: TravelMode::Transit,
            transit_modes: vec![TransitMode::Train],
        };

        let itinerary = std::mem::take(&mut plan.itinerary);
        let (routes, accommodations, food_spots, days) = tokio::join!(
            self.maps.directions(&trains_query),
            top_accommodations(&self.maps, center, ACCOMMODATION_LIMIT),
            top_restaurants(&self.maps, center, FOOD_SPOT_LIMIT),
            enrich_itinerary(&self.maps, itinerary, destination, request.currency),
        );

        plan.itinerary = days;
        Ok(OptimizedTrip {
            plan,
            direct_trains: direct_trains(&routes?),
            recommended_accommodations: accommodations?,
            famous_food_spots: food_spots?,
        })
    }
}

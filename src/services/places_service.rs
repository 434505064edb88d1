use std::cmp::Ordering;

use crate::models::places::{Accommodation, Coordinates, FoodSpot, NearbyDining, TrainOption};
use crate::services::maps_service::{MapsError, MapsProvider, NearbyQuery, Place, Route};

const EARTH_RADIUS_KM: f64 = 6371.0;

pub const LODGING_RADIUS_M: f64 = 5000.0;
pub const DINING_RADIUS_M: f64 = 1000.0;
pub const MAX_TRAIN_OPTIONS: usize = 4;

const LODGING_TYPES: [&str; 6] = [
    "hotel",
    "resort_hotel",
    "hostel",
    "guest_house",
    "bed_and_breakfast",
    "motel",
];
const DINING_TYPES: [&str; 2] = ["restaurant", "cafe"];

const LODGING_FIELDS: &str = "places.displayName,places.rating,places.userRatingCount,places.types,places.websiteUri,places.photos";
const RESTAURANT_FIELDS: &str = "places.displayName,places.rating,places.userRatingCount,places.types,places.priceLevel,places.googleMapsUri";
const DINING_FIELDS: &str = "places.displayName,places.rating,places.types,places.priceLevel,places.formattedAddress,places.googleMapsUri,places.location";

/// Popularity score: rating weighted by number of reviews.
fn popularity(place: &Place) -> f64 {
    place.rating.unwrap_or(0.0) * f64::from(place.user_rating_count.unwrap_or(1))
}

fn by_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

fn rated(places: Vec<Place>) -> Vec<Place> {
    places.into_iter().filter(|p| p.rating.is_some()).collect()
}

fn first_type(place: &Place, fallback: &str) -> String {
    place
        .types
        .first()
        .cloned()
        .unwrap_or_else(|| fallback.to_string())
}

fn place_name(place: &Place) -> String {
    place.name().unwrap_or("Unknown").to_string()
}

pub async fn top_accommodations<M: MapsProvider>(
    maps: &M,
    center: Coordinates,
    limit: usize,
) -> Result<Vec<Accommodation>, MapsError> {
    let query = NearbyQuery {
        center,
        radius_meters: LODGING_RADIUS_M,
        included_types: LODGING_TYPES.to_vec(),
        max_results: None,
        field_mask: LODGING_FIELDS,
    };
    let mut places = rated(maps.search_nearby(&query).await?);
    places.sort_by(|a, b| by_desc(popularity(a), popularity(b)));

    Ok(places
        .iter()
        .take(limit)
        .map(|p| Accommodation {
            name: place_name(p),
            kind: first_type(p, "Hotel"),
            rating: p.rating.unwrap_or(0.0),
            price_per_night: 0.0,
            booking_link: p.website_uri.clone().unwrap_or_default(),
            photos: p.photos.iter().map(|photo| photo.name.clone()).collect(),
        })
        .collect())
}

pub async fn top_restaurants<M: MapsProvider>(
    maps: &M,
    center: Coordinates,
    limit: usize,
) -> Result<Vec<FoodSpot>, MapsError> {
    let query = NearbyQuery {
        center,
        radius_meters: LODGING_RADIUS_M,
        included_types: DINING_TYPES.to_vec(),
        max_results: None,
        field_mask: RESTAURANT_FIELDS,
    };
    let mut places = rated(maps.search_nearby(&query).await?);
    places.sort_by(|a, b| by_desc(popularity(a), popularity(b)));

    Ok(places
        .iter()
        .take(limit)
        .map(|p| FoodSpot {
            name: place_name(p),
            kind: first_type(p, "restaurant"),
            rating: p.rating.unwrap_or(0.0),
            price_level: p.price_level.clone(),
            map_url: p.google_maps_uri.clone().unwrap_or_default(),
        })
        .collect())
}

/// Best-rated restaurants and cafes within walking distance of `center`.
pub async fn nearby_dining<M: MapsProvider>(
    maps: &M,
    center: Coordinates,
    limit: usize,
) -> Result<Vec<NearbyDining>, MapsError> {
    let query = NearbyQuery {
        center,
        radius_meters: DINING_RADIUS_M,
        included_types: DINING_TYPES.to_vec(),
        max_results: Some(limit as u32),
        field_mask: DINING_FIELDS,
    };
    let mut places = rated(maps.search_nearby(&query).await?);
    places.sort_by(|a, b| by_desc(a.rating.unwrap_or(0.0), b.rating.unwrap_or(0.0)));

    Ok(places
        .iter()
        .take(limit)
        .map(|p| NearbyDining {
            name: place_name(p),
            kind: first_type(p, "restaurant"),
            rating: p.rating.unwrap_or(0.0),
            price_level: p.price_level.clone(),
            address: p
                .formatted_address
                .clone()
                .unwrap_or_else(|| "N/A".to_string()),
            map_url: p.google_maps_uri.clone().unwrap_or_default(),
            distance: p
                .coordinates()
                .map(|to| format_distance(haversine_km(center, to))),
        })
        .collect())
}

/// Great-circle distance in kilometres.
pub fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lng = (to.lng - from.lng).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + from.lat.to_radians().cos() * to.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{}m", (km * 1000.0).round())
    } else {
        format!("{:.1}km", km)
    }
}

fn station_name(address: &str) -> String {
    address.split(',').next().unwrap_or("").trim().to_string()
}

/// Turns transit routes into the train options shown to the traveller.
pub fn direct_trains(routes: &[Route]) -> Vec<TrainOption> {
    routes
        .iter()
        .take(MAX_TRAIN_OPTIONS)
        .map(|route| {
            let leg = route.legs.first();
            let train_name = leg
                .and_then(|l| l.steps.first())
                .and_then(|s| s.transit_details.as_ref())
                .and_then(|t| t.line.as_ref())
                .and_then(|line| line.agencies.first())
                .and_then(|a| a.name.clone())
                .unwrap_or_else(|| "N/A".to_string());

            TrainOption {
                train_name,
                departure_station: leg.map(|l| station_name(&l.start_address)).unwrap_or_default(),
                arrival_station: leg.map(|l| station_name(&l.end_address)).unwrap_or_default(),
                price: route
                    .fare
                    .as_ref()
                    .and_then(|f| f.currency.clone())
                    .unwrap_or_else(|| "N/A".to_string()),
                fare_value: route.fare.as_ref().and_then(|f| f.value).unwrap_or(0.0),
                duration: leg
                    .and_then(|l| l.duration.as_ref())
                    .map(|d| d.text.clone())
                    .unwrap_or_else(|| "N/A".to_string()),
                details: route.summary.clone(),
            }
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::fakes::{place, FakeMaps};
    use super::*;

    const JAIPUR: Coordinates = Coordinates {
        lat: 26.9124,
        lng: 75.7873,
    };

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(0.4567), "457m");
        assert_eq!(format_distance(1.0), "1.0km");
        assert_eq!(format_distance(2.345), "2.3km");
    }

    #[test]
    fn test_haversine() {
        assert_eq!(haversine_km(JAIPUR, JAIPUR), 0.0);
        // Jaipur to Delhi is roughly 240 km as the crow flies.
        let delhi = Coordinates {
            lat: 28.6139,
            lng: 77.2090,
        };
        let d = haversine_km(JAIPUR, delhi);
        assert!(d > 230.0 && d < 245.0, "got {}", d);
    }

    #[actix_rt::test]
    async fn test_accommodations_ranked_by_popularity() {
        let maps = FakeMaps {
            nearby_results: vec![
                place("Boutique", Some(4.9), Some(10)),
                place("Unrated", None, Some(5000)),
                place("Rambagh", Some(4.6), Some(8000)),
                place("Hostel", Some(4.2), None),
                place("Trident", Some(4.5), Some(3000)),
            ],
            ..Default::default()
        };

        let top = top_accommodations(&maps, JAIPUR, 3).await.unwrap();
        let names: Vec<_> = top.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Rambagh", "Trident", "Boutique"]);
        assert_eq!(top[0].kind, "Hotel");
        assert_eq!(top[0].price_per_night, 0.0);
        assert_eq!(top[0].booking_link, "");
    }

    #[actix_rt::test]
    async fn test_nearby_dining_sorted_by_rating() {
        let mut close = place("Tapri", Some(4.3), None);
        close.location = Some(crate::services::maps_service::LatLng {
            latitude: 26.9150,
            longitude: 75.7873,
        });
        let maps = FakeMaps {
            nearby_results: vec![
                close,
                place("Laxmi Mishthan", Some(4.6), None),
                place("Nowhere", None, None),
            ],
            ..Default::default()
        };

        let dining = nearby_dining(&maps, JAIPUR, 3).await.unwrap();
        assert_eq!(dining.len(), 2);
        assert_eq!(dining[0].name, "Laxmi Mishthan");
        assert_eq!(dining[0].address, "N/A");
        assert!(dining[0].distance.is_none());
        assert_eq!(dining[1].distance.as_deref(), Some("289m"));
    }

    #[test]
    fn test_direct_trains() {
        let route: Route = serde_json::from_value(serde_json::json!({
            "summary": "Via Ratlam",
            "fare": { "currency": "INR", "value": 755.0 },
            "legs": [{
                "start_address": "Mumbai Central, Mumbai, Maharashtra, India",
                "end_address": "Jaipur Junction, Jaipur, Rajasthan, India",
                "duration": { "text": "17 hours 5 mins", "value": 61500 },
                "steps": [{ "transit_details": { "line": { "agencies": [{ "name": "Indian Railways" }] } } }]
            }]
        }))
        .unwrap();

        let mut routes = vec![route; 5];
        routes.push(Route::default());
        let trains = direct_trains(&routes);
        assert_eq!(trains.len(), MAX_TRAIN_OPTIONS);
        assert_eq!(trains[0].train_name, "Indian Railways");
        assert_eq!(trains[0].departure_station, "Mumbai Central");
        assert_eq!(trains[0].arrival_station, "Jaipur Junction");
        assert_eq!(trains[0].price, "INR");
        assert_eq!(trains[0].fare_value, 755.0);

        let bare = direct_trains(&[Route::default()]);
        assert_eq!(bare[0].train_name, "N/A");
        assert_eq!(bare[0].price, "N/A");
        assert_eq!(bare[0].duration, "N/A");
        assert_eq!(bare[0].fare_value, 0.0);
    }
}

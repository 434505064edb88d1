use std::fmt::Write;

use crate::models::history::SavedItinerary;
use crate::models::plan::{ItineraryActivity, OptimizedTrip};
use crate::services::cost_service::CostBreakdown;

/// `itinerary-{slug}.md`, where the slug is the lowercased destination with
/// every run of non-alphanumerics collapsed into a single dash.
pub fn export_filename(destination: &str) -> String {
    let mut slug = String::new();
    for c in destination.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "itinerary.md".to_string()
    } else {
        format!("itinerary-{}.md", slug)
    }
}

fn money(symbol: &str, amount: f64) -> String {
    format!("{}{:.0}", symbol, amount)
}

fn write_activity(out: &mut String, activity: &ItineraryActivity) -> std::fmt::Result {
    writeln!(out, "- **{}**: {}", activity.time, activity.activity)?;
    if !activity.description.is_empty() {
        writeln!(out, "  {}", activity.description)?;
    }
    if let Some(address) = &activity.address {
        writeln!(out, "  - Address: {}", address)?;
    }
    if let Some(rating) = activity.rating {
        writeln!(out, "  - Rating: {:.1}", rating)?;
    }
    if let Some(hours) = &activity.opening_hours {
        writeln!(out, "  - Hours: {}", hours)?;
    }
    if let Some(fee) = &activity.entry_fee {
        writeln!(out, "  - Entry fee: {}", fee)?;
    }
    if let Some(d) = &activity.directions {
        writeln!(
            out,
            "  - Directions from {}: {} ({})",
            d.origin, d.duration, d.distance
        )?;
        for step in &d.steps {
            writeln!(out, "    - {}", step)?;
        }
    }
    if let Some(dining) = activity.nearby_dining.as_ref().filter(|d| !d.is_empty()) {
        let names: Vec<String> = dining
            .iter()
            .map(|d| match &d.distance {
                Some(distance) => format!("{} ({:.1}, {})", d.name, d.rating, distance),
                None => format!("{} ({:.1})", d.name, d.rating),
            })
            .collect();
        writeln!(out, "  - Nearby dining: {}", names.join(", "))?;
    }
    Ok(())
}

fn write_trip(out: &mut String, title: &str, trip: &OptimizedTrip) -> std::fmt::Result {
    let plan = &trip.plan;
    let symbol = plan.currency.symbol();

    writeln!(out, "# {}\n", title)?;

    writeln!(out, "## Summary\n")?;
    if !plan.optimal_dates.is_empty() {
        writeln!(out, "**Best dates:** {}\n", plan.optimal_dates)?;
    }
    if !plan.alternative_destinations.is_empty() {
        writeln!(out, "**Alternatives:** {}\n", plan.alternative_destinations)?;
    }
    if !plan.reasoning.is_empty() {
        writeln!(out, "{}\n", plan.reasoning)?;
    }
    if !plan.places_to_visit.is_empty() {
        writeln!(out, "**Places to visit:** {}\n", plan.places_to_visit.join(", "))?;
    }

    writeln!(out, "## Getting there\n")?;
    let flight = &plan.cheapest_flight;
    writeln!(
        out,
        "- Flight: {} ({}) {}",
        flight.airline,
        money(symbol, flight.price),
        flight.details
    )?;
    for train in &trip.direct_trains {
        writeln!(
            out,
            "- Train: {} from {} to {}, {}",
            train.train_name, train.departure_station, train.arrival_station, train.duration
        )?;
    }
    writeln!(out)?;

    if !trip.recommended_accommodations.is_empty() {
        writeln!(out, "## Where to stay\n")?;
        for stay in &trip.recommended_accommodations {
            writeln!(out, "- {} ({}, rated {:.1})", stay.name, stay.kind, stay.rating)?;
        }
        writeln!(out)?;
    }

    if !trip.famous_food_spots.is_empty() {
        writeln!(out, "## Where to eat\n")?;
        for spot in &trip.famous_food_spots {
            writeln!(out, "- {} (rated {:.1})", spot.name, spot.rating)?;
        }
        writeln!(out)?;
    }

    for day in &plan.itinerary {
        writeln!(out, "## Day {}: {}\n", day.day, day.title)?;
        for activity in &day.activities {
            write_activity(out, activity)?;
        }
        writeln!(out)?;
    }

    let costs = CostBreakdown::from_trip(trip);
    writeln!(out, "## Estimated cost per person ({})\n", plan.currency.code())?;
    writeln!(out, "| Item | Amount | Share |")?;
    writeln!(out, "|---|---:|---:|")?;
    for (label, amount) in costs.rows() {
        writeln!(
            out,
            "| {} | {} | {:.0}% |",
            label,
            money(symbol, amount),
            costs.percentage(amount)
        )?;
    }
    writeln!(out, "| **Total** | **{}** | |", money(symbol, costs.total))?;
    Ok(())
}

/// Renders a saved itinerary as a standalone Markdown document.
pub fn render_markdown(saved: &SavedItinerary) -> String {
    let title = format!("{} → {}", saved.source, saved.destination);
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_trip(&mut out, &title, &saved.optimization_result);
    out
}

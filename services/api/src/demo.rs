use crate::infra::{load_catalog, InMemoryCarrierCatalog};
use bagster::error::AppError;
use bagster::selection::{
    CarrierSelectionService, SelectionRequest, SelectionResponse, DEFAULT_RECOMMENDATION_LIMIT,
};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct SelectArgs {
    /// Pickup location
    #[arg(long)]
    pub(crate) origin: String,
    /// Delivery location (city, region, or country)
    #[arg(long)]
    pub(crate) destination: String,
    /// Package weight in kilograms
    #[arg(long)]
    pub(crate) weight_kg: f64,
    /// cheapest, best_rated, balanced (default), or destination_focused
    #[arg(long)]
    pub(crate) strategy: Option<String>,
    /// Country the shipment should specialize in
    #[arg(long)]
    pub(crate) destination_country: Option<String>,
    /// Exclude carriers whose total cost exceeds this amount
    #[arg(long)]
    pub(crate) max_price: Option<f64>,
    /// Exclude carriers rated below this value (0-5)
    #[arg(long)]
    pub(crate) min_rating: Option<f64>,
    /// Capability the carrier must offer (repeatable)
    #[arg(long = "service")]
    pub(crate) services: Vec<String>,
    /// Carrier catalog CSV export. Defaults to the built-in demo catalog.
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Number of recommendations to include
    #[arg(long, default_value_t = DEFAULT_RECOMMENDATION_LIMIT)]
    pub(crate) limit: usize,
    /// Print the JSON response instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Carrier catalog CSV export. Defaults to the built-in demo catalog.
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

pub(crate) fn run_select(args: SelectArgs) -> Result<(), AppError> {
    let SelectArgs {
        origin,
        destination,
        weight_kg,
        strategy,
        destination_country,
        max_price,
        min_rating,
        services,
        catalog,
        limit,
        json,
    } = args;

    let service = selection_service(catalog, limit)?;
    let response = service.select(SelectionRequest {
        origin,
        destination,
        weight_kg,
        strategy,
        destination_country,
        max_price,
        min_rating,
        required_services: services,
    })?;

    if json {
        println!("{}", selection_json(&response)?);
    } else {
        render_selection(&response);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = selection_service(args.catalog, DEFAULT_RECOMMENDATION_LIMIT)?;

    println!("Bagster carrier selection demo");
    for (title, request) in demo_scenarios() {
        println!(
            "\n{} ({} -> {}, {} kg)",
            title, request.origin, request.destination, request.weight_kg
        );
        match service.select(request) {
            Ok(response) => render_selection(&response),
            Err(err) => println!("  Request rejected: {}", err),
        }
    }

    Ok(())
}

fn selection_service(
    catalog: Option<PathBuf>,
    limit: usize,
) -> Result<CarrierSelectionService<InMemoryCarrierCatalog>, AppError> {
    let catalog = load_catalog(catalog.as_deref())?;
    Ok(CarrierSelectionService::new(Arc::new(catalog), limit))
}

fn demo_request(strategy: Option<&str>, destination: &str, weight_kg: f64) -> SelectionRequest {
    SelectionRequest {
        origin: "Lagos".to_string(),
        destination: destination.to_string(),
        weight_kg,
        strategy: strategy.map(str::to_string),
        destination_country: None,
        max_price: None,
        min_rating: None,
        required_services: Vec::new(),
    }
}

pub(crate) fn demo_scenarios() -> Vec<(&'static str, SelectionRequest)> {
    vec![
        (
            "Cheapest carrier",
            demo_request(Some("cheapest"), "Abuja, Nigeria", 5.0),
        ),
        (
            "Best rated carrier",
            demo_request(Some("best_rated"), "Abuja, Nigeria", 5.0),
        ),
        (
            "Balanced recommendation",
            demo_request(None, "Kano, Nigeria", 25.0),
        ),
        (
            "Destination focused (Ghana)",
            SelectionRequest {
                destination_country: Some("Ghana".to_string()),
                ..demo_request(Some("destination_focused"), "Accra", 12.0)
            },
        ),
        (
            "Express with tracking only",
            SelectionRequest {
                required_services: vec!["express".to_string(), "tracking".to_string()],
                ..demo_request(Some("balanced"), "Nairobi", 8.0)
            },
        ),
        (
            "Five-star carriers only",
            SelectionRequest {
                min_rating: Some(5.0),
                ..demo_request(None, "Abuja", 5.0)
            },
        ),
        (
            "Negative weight",
            demo_request(Some("cheapest"), "Abuja", -1.0),
        ),
    ]
}

fn selection_json(response: &SelectionResponse) -> Result<String, AppError> {
    serde_json::to_string_pretty(response)
        .map_err(|err| AppError::Io(std::io::Error::from(err)))
}

fn render_selection(response: &SelectionResponse) {
    println!("  {}", response.scoring_breakdown.explanation);

    let Some(selected) = &response.selected_carrier else {
        println!("  No carriers available; try different parameters.");
        return;
    };

    println!(
        "  Selected: {} ({}) at {:.2} -> {}",
        selected.carrier_name, selected.carrier_id, selected.total_cost, selected.selection_reason
    );
    println!(
        "  Recommendations ({} of {} evaluated):",
        response.recommendations.len(),
        response.total_evaluated
    );
    for (rank, score) in response.recommendations.iter().enumerate() {
        println!(
            "    {}. {} | cost {:.2} | score {:.3} (price {:.2}, rating {:.2}, destination {:.2})",
            rank + 1,
            score.carrier_name,
            score.total_cost,
            score.total_score,
            score.price_score,
            score.rating_score,
            score.destination_score
        );
    }
}

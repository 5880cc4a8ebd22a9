use super::super::domain::{Carrier, ShipmentRequest};
use super::super::rates::calculate_cost;
use super::super::strategy::SelectionCriteria;
use super::super::validation::SelectionError;

/// Carrier that passed every hard filter, paired with its quoted cost.
#[derive(Debug)]
pub(crate) struct EligibleCarrier<'a> {
    pub carrier: &'a Carrier,
    pub total_cost: f64,
}

pub(crate) fn eligible_carriers<'a>(
    carriers: &'a [Carrier],
    request: &ShipmentRequest,
    criteria: &SelectionCriteria,
) -> Result<Vec<EligibleCarrier<'a>>, SelectionError> {
    let filters = criteria.filters();
    let destination_country = criteria.destination_country();
    let mut eligible = Vec::new();

    for carrier in carriers {
        if !carrier.is_approved() {
            continue;
        }

        if !serves_destination(carrier, &request.destination, destination_country) {
            continue;
        }

        if let Some(min_rating) = filters.min_rating {
            if carrier.rating.is_nan() || carrier.rating < min_rating {
                continue;
            }
        }

        if !filters
            .required_services
            .iter()
            .all(|service| carrier.offers_service(service))
        {
            continue;
        }

        let total_cost = calculate_cost(carrier, request.weight_kg)?;
        if let Some(max_price) = filters.max_price {
            if total_cost > max_price {
                continue;
            }
        }

        eligible.push(EligibleCarrier {
            carrier,
            total_cost,
        });
    }

    Ok(eligible)
}

/// Whether any of the carrier's service areas covers the destination.
///
/// Matching is on whole words, ignoring case and punctuation: an area
/// matches when its words appear as a run in the destination, or the
/// destination's words appear as a run in the area. `All <Country>` covers
/// destinations naming that country (or the requested destination country)
/// and a bare `All` or `*` covers everything.
pub fn serves_destination(
    carrier: &Carrier,
    destination: &str,
    destination_country: Option<&str>,
) -> bool {
    let destination = words(destination);
    if destination.is_empty() {
        return false;
    }

    carrier
        .service_areas
        .iter()
        .any(|area| area_matches(area, &destination, destination_country))
}

fn area_matches(area: &str, destination: &[String], destination_country: Option<&str>) -> bool {
    let trimmed = area.trim();
    if trimmed == "*" {
        return true;
    }

    let area = words(trimmed);
    match area.split_first() {
        None => false,
        Some((first, [])) if first == "all" => true,
        Some((first, region)) if first == "all" => {
            contains_run(destination, region)
                || destination_country
                    .map(|country| words(country) == region)
                    .unwrap_or(false)
        }
        Some(_) => contains_run(destination, &area) || contains_run(&area, destination),
    }
}

fn words(value: &str) -> Vec<String> {
    value
        .split(|ch: char| !ch.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn contains_run(haystack: &[String], needle: &[String]) -> bool {
    !needle.is_empty()
        && needle.len() <= haystack.len()
        && haystack.windows(needle.len()).any(|window| window == needle)
}

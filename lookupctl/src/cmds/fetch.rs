//! `fetch` sub-command: live positions from the flight feed.
//!
//! The feed wants a bearer token and an `Accept-Version` header, and the query string is built
//! by hand (see `Fr24Query::url()`).
//!

use std::fs;

use clap::{crate_name, crate_version};
use eyre::Result;
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::{debug, info, trace};

use lookup_common::{validate_radius, BB};
use lookup_formats::{check_position, FlightPositions, FlightSummary, Fr24Query, FR24_API_VERSION};

use crate::{CtlConfig, FetchOpts, Status, API_KEY_ENV};

/// Pick the query from the options, position falling back to `home`.
///
#[tracing::instrument(skip(cfg))]
pub fn build_query(cfg: &CtlConfig, opts: &FetchOpts) -> Result<Fr24Query> {
    let center = match (opts.lat, opts.lon) {
        (Some(lat), Some(lon)) => Some(check_position(lat, lon)?),
        _ => cfg.home,
    };
    let bounds = match center {
        Some(center) => {
            let radius = validate_radius(opts.radius.unwrap_or(cfg.tracker.radius_km))?;
            Some(BB::from_location(&center, radius).to_bounds_string())
        }
        None => None,
    };

    let query = Fr24Query::from_criteria(
        opts.flight.as_deref(),
        opts.origin.as_deref(),
        opts.destination.as_deref(),
        bounds.as_deref(),
    )
    .ok_or(Status::NoCriteria)?;
    debug!("query = {query:?}");
    Ok(query)
}

#[tracing::instrument(skip(cfg))]
pub async fn fetch_flights(cfg: &CtlConfig, opts: &FetchOpts) -> Result<String> {
    trace!("fetch_flights");

    let token = cfg
        .api_key
        .as_deref()
        .ok_or(Status::NoApiKey(API_KEY_ENV))?;
    let url = build_query(cfg, opts)?.url();
    info!("Fetching {url}");

    let client = reqwest::Client::new();
    let resp = client
        .get(&url)
        .header("user-agent", format!("{}/{}", crate_name!(), crate_version!()))
        .header("accept", "application/json")
        .header("accept-version", FR24_API_VERSION)
        .header("authorization", format!("Bearer {token}"))
        .send()
        .await?;

    let code = resp.status();
    let body = resp.text().await?;
    trace!("resp={body}");
    if !code.is_success() {
        return Err(Status::FeedError(code.as_u16(), body).into());
    }

    if let Some(output) = &opts.output {
        info!("Saving raw answer to {output:?}");
        fs::write(output, &body)?;
    }

    let data = FlightPositions::from_json(&body)?;
    Ok(list_summaries(&data.to_summaries()))
}

pub fn list_summaries(flights: &[FlightSummary]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Id", "Flight", "From", "To", "Airline", "ETA"]);

    flights.iter().for_each(|f| {
        builder.push_record([
            f.id.clone(),
            f.ident.clone(),
            f.origin.clone(),
            f.destination.clone(),
            f.airline.clone(),
            f.arrival_time
                .map(|t| t.format("%H:%M").to_string())
                .unwrap_or_default(),
        ]);
    });
    let table = builder.build().with(Style::modern()).to_string();
    format!("{} flights\n{table}", flights.len())
}

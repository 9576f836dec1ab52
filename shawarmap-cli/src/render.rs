//! Text and JSON output for the `nearby` command.

use serde::Serialize;
use shawarmap_core::{GeoPoint, Locale, LocationError};
use shawarmap_data::{Discovery, Place};
use std::io::Write;

use crate::CliError;

/// Serialisable view of a discovery listing.
#[derive(Debug, Serialize)]
pub(crate) struct NearbyReport<'a> {
    #[serde(skip)]
    pub(crate) language: Locale,
    pub(crate) locale: &'static str,
    pub(crate) sort: &'static str,
    pub(crate) fell_back: bool,
    pub(crate) user: Option<GeoPoint>,
    pub(crate) location_error: Option<LocationErrorReport>,
    pub(crate) places: Vec<PlaceReport<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct LocationErrorReport {
    pub(crate) code: u8,
    pub(crate) message: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct PlaceReport<'a> {
    #[serde(flatten)]
    pub(crate) place: &'a Place,
    pub(crate) distance_km: Option<f64>,
    pub(crate) distance: Option<String>,
}

impl<'a> NearbyReport<'a> {
    pub(crate) fn new(
        discovery: &Discovery<'a>,
        locale: Locale,
        location_error: Option<LocationError>,
    ) -> Self {
        Self {
            language: locale,
            locale: locale.code(),
            sort: discovery.sort.as_str(),
            fell_back: discovery.fell_back,
            user: discovery.user.map(|user| user.point),
            location_error: location_error.map(|error| LocationErrorReport {
                code: error.code(),
                message: locale.location_error_message(error),
            }),
            places: discovery
                .listings
                .iter()
                .map(|listing| PlaceReport {
                    place: listing.place,
                    distance_km: listing.distance_km,
                    distance: listing.formatted_distance(locale),
                })
                .collect(),
        }
    }
}

pub(crate) fn write_json(writer: &mut dyn Write, report: &NearbyReport<'_>) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(report).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

pub(crate) fn write_text(writer: &mut dyn Write, report: &NearbyReport<'_>) -> Result<(), CliError> {
    render_text(writer, report, report.language).map_err(CliError::WriteOutput)
}

fn render_text(
    writer: &mut dyn Write,
    report: &NearbyReport<'_>,
    locale: Locale,
) -> std::io::Result<()> {
    if let Some(error) = &report.location_error {
        writeln!(writer, "! {}", error.message)?;
    }
    if report.places.is_empty() {
        return writeln!(writer, "{}", locale.no_places_message());
    }
    for (rank, entry) in report.places.iter().enumerate() {
        let place = entry.place;
        write!(
            writer,
            "{:>2}. {}  {:.1}★ ({})  {}",
            rank + 1,
            place.name,
            place.rating,
            place.reviews,
            place.price_symbol()
        )?;
        if let Some(distance) = &entry.distance {
            write!(writer, "  {distance}")?;
        }
        writeln!(writer, "  {}", locale.open_label(place.open_now))?;

        let tags: Vec<&str> = place.tags.iter().map(|tag| tag.as_str()).collect();
        if tags.is_empty() {
            writeln!(writer, "    {}", place.address)?;
        } else {
            writeln!(writer, "    {}  [{}]", place.address, tags.join(", "))?;
        }
    }
    Ok(())
}

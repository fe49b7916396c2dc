//! CSV export of the current filtered view

use crate::error::PanelResult;
use backoffice_core::utils::format_date;
use backoffice_core::{Application, Status, Trip};
use std::io::Write;

/// Column headers of an application export
pub const APPLICATION_COLUMNS: [&str; 6] =
    ["Name", "Email", "Job Title", "Experience", "Status", "Applied"];

/// Column headers of a trip export
pub const TRIP_COLUMNS: [&str; 9] = [
    "ID",
    "From",
    "To",
    "Airline",
    "Flight",
    "Date",
    "Time",
    "Status",
    "Host",
];

fn text(value: Option<&String>) -> &str {
    value.map_or("", String::as_str)
}

fn place(city: Option<&String>, country: Option<&String>) -> String {
    match (city, country) {
        (Some(city), Some(country)) => format!("{city}, {country}"),
        (Some(only), None) | (None, Some(only)) => only.clone(),
        (None, None) => String::new(),
    }
}

/// Write applications as CSV, one row per record
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn write_applications<'a, W: Write>(
    writer: W,
    applications: impl IntoIterator<Item = &'a Application>,
) -> PanelResult<usize> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(APPLICATION_COLUMNS)?;

    let mut rows = 0;
    for app in applications {
        let applied = app.applied.as_deref().map(format_date).unwrap_or_default();
        csv.write_record([
            text(app.name.as_ref()),
            text(app.email.as_ref()),
            text(app.job_title.as_ref()),
            text(app.experience.as_ref()),
            app.status.as_ref().map_or("", Status::as_str),
            applied.as_str(),
        ])?;
        rows += 1;
    }
    csv.flush()?;
    Ok(rows)
}

/// Write trips as CSV, one row per record
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn write_trips<'a, W: Write>(
    writer: W,
    trips: impl IntoIterator<Item = &'a Trip>,
) -> PanelResult<usize> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(TRIP_COLUMNS)?;

    let mut rows = 0;
    for trip in trips {
        let host = trip
            .host
            .as_ref()
            .and_then(|host| host.name.as_ref().or(host.email.as_ref()));
        let date = trip.travel_date.as_deref().map(format_date).unwrap_or_default();
        let from = place(trip.from_city.as_ref(), trip.from_country.as_ref());
        let to = place(trip.to_city.as_ref(), trip.to_country.as_ref());
        csv.write_record([
            trip.id.as_str(),
            from.as_str(),
            to.as_str(),
            text(trip.airline.as_ref()),
            text(trip.flight_number.as_ref()),
            date.as_str(),
            text(trip.travel_time.as_ref()),
            trip.status.as_ref().map_or("", Status::as_str),
            text(host),
        ])?;
        rows += 1;
    }
    csv.flush()?;
    Ok(rows)
}

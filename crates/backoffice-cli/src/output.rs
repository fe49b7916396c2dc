//! Plain-text tables and JSON output for the console

use anyhow::{Context, Result};
use backoffice_core::utils::{format_date, truncate};
use backoffice_core::{Application, Job, Match, ModerationRecord, Offer, Status, Trip};
use backoffice_panel::{DetailView, Group, Page, StatusCounts};
use serde::Serialize;
use std::fmt::Write as _;

const MAX_CELL: usize = 40;

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns
    Table,
    /// Pretty-printed JSON
    Json,
}

impl OutputFormat {
    /// Parse the configured default, falling back to a table
    pub fn from_config(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Table
        }
    }
}

/// A record type the console can show as a table row
pub trait Row {
    /// Column headers
    const HEADERS: &'static [&'static str];

    /// Cell values, one per header
    fn cells(&self) -> Vec<String>;
}

fn opt(value: Option<&String>) -> String {
    value.cloned().unwrap_or_default()
}

fn status<S: Status>(value: Option<S>) -> String {
    value.map(|s| s.as_str().to_string()).unwrap_or_default()
}

fn date(value: Option<&String>) -> String {
    value.map(String::as_str).map(format_date).unwrap_or_default()
}

impl Row for Trip {
    const HEADERS: &'static [&'static str] = &["ID", "Route", "Airline", "Flight", "Date", "Status", "Host"];

    fn cells(&self) -> Vec<String> {
        let host = self
            .host
            .as_ref()
            .and_then(|h| h.name.as_ref().or(h.email.as_ref()));
        vec![
            self.id.to_string(),
            self.route(),
            opt(self.airline.as_ref()),
            opt(self.flight_number.as_ref()),
            date(self.travel_date.as_ref()),
            status(self.status),
            opt(host),
        ]
    }
}

impl Row for Match {
    const HEADERS: &'static [&'static str] = &["ID", "Trip", "Requester", "Email", "Status"];

    fn cells(&self) -> Vec<String> {
        let requester = self.requester.as_ref();
        vec![
            self.id.to_string(),
            self.trip_ref().map(|id| id.to_string()).unwrap_or_default(),
            opt(requester.and_then(|r| r.name.as_ref())),
            opt(requester.and_then(|r| r.email.as_ref())),
            status(self.status),
        ]
    }
}

impl Row for ModerationRecord {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Email", "Location", "Status", "Reason"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            opt(self.name.as_ref()),
            opt(self.email.as_ref().or(self.owner.as_ref())),
            opt(self.location.as_ref()),
            status(self.status),
            opt(self.rejection_reason.as_ref()),
        ]
    }
}

impl Row for Job {
    const HEADERS: &'static [&'static str] = &["ID", "Title", "Location", "Type", "Status"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            opt(self.title.as_ref()),
            opt(self.location.as_ref()),
            opt(self.employment_type.as_ref()),
            status(self.status),
        ]
    }
}

impl Row for Application {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Email", "Experience", "Status", "Applied"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            opt(self.name.as_ref()),
            opt(self.email.as_ref()),
            opt(self.experience.as_ref()),
            status(self.status),
            date(self.applied.as_ref()),
        ]
    }
}

impl Row for Offer {
    const HEADERS: &'static [&'static str] = &["ID", "Candidate", "Position", "Salary", "Start", "Status"];

    fn cells(&self) -> Vec<String> {
        let salary = match (&self.salary, &self.currency) {
            (Some(amount), Some(currency)) => format!("{amount} {currency}"),
            (Some(amount), None) => amount.clone(),
            _ => String::new(),
        };
        vec![
            self.id.to_string(),
            opt(self.candidate_name.as_ref()),
            opt(self.position.as_ref()),
            salary,
            date(self.start_date.as_ref()),
            status(self.status),
        ]
    }
}

fn push_line<S: AsRef<str>>(out: &mut String, values: &[S], widths: &[usize]) {
    let padded: Vec<String> = values
        .iter()
        .zip(widths)
        .map(|(value, width)| format!("{:<width$}", value.as_ref()))
        .collect();
    let _ = writeln!(out, "{}", padded.join("  ").trim_end());
}

/// Render rows as aligned columns
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|cell| truncate(cell, MAX_CELL)).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, headers, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for row in &cells {
        push_line(&mut out, row, &widths);
    }
    out
}

/// Render a list of records as a table
pub fn records_table<T: Row>(records: &[T]) -> String {
    let rows: Vec<Vec<String>> = records.iter().map(Row::cells).collect();
    render_table(T::HEADERS, &rows)
}

/// Pretty JSON of any serializable value
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("failed to serialize output")
}

/// Print records in the chosen format
pub fn print_records<T: Row + Serialize>(format: OutputFormat, records: &[T]) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", to_json(records)?),
        OutputFormat::Table if records.is_empty() => println!("No records found."),
        OutputFormat::Table => print!("{}", records_table(records)),
    }
    Ok(())
}

/// Render one page of groups
pub fn groups_table<T: Row>(page: &Page<Group<T>>) -> String {
    let mut out = String::new();
    for group in &page.items {
        let _ = writeln!(out, "== {} ({})", group.key, group.count());
        out.push_str(&records_table(&group.records));
        out.push('\n');
    }
    let _ = writeln!(
        out,
        "Page {} of {} ({} groups){}{}",
        page.page,
        page.total_pages,
        page.total_items,
        if page.has_prev { ", --page for previous" } else { "" },
        if page.has_next { ", more pages available" } else { "" },
    );
    out
}

/// Print a page of groups in the chosen format
pub fn print_groups<T: Row + Serialize>(format: OutputFormat, page: &Page<Group<T>>) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", to_json(page)?),
        OutputFormat::Table => print!("{}", groups_table(page)),
    }
    Ok(())
}

/// Render a record's full field listing
pub fn detail_text(view: &DetailView) -> String {
    let width = view
        .fields
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for (label, value) in &view.fields {
        let _ = writeln!(out, "{label:>width$}: {value}");
    }
    out
}

/// Print a detail view in the chosen format
pub fn print_detail(format: OutputFormat, view: &DetailView) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let map: serde_json::Map<String, serde_json::Value> = view
                .fields
                .iter()
                .map(|(label, value)| (label.clone(), serde_json::Value::String(value.clone())))
                .collect();
            println!("{}", to_json(&map)?);
        }
        OutputFormat::Table => print!("{}", detail_text(view)),
    }
    Ok(())
}

/// One-line summary of tab counts, e.g. `All 4 | active 2 | cancelled 1`
pub fn counts_line<S: Status>(counts: &StatusCounts<S>) -> String {
    let mut parts = vec![format!("All {}", counts.total)];
    parts.extend(
        counts
            .by_status
            .iter()
            .map(|(status, count)| format!("{} {count}", status.as_str())),
    );
    parts.join(" | ")
}

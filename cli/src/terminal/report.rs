//! Tabular rendering of a finished run.
//!
//! Every row carries one cell per port label seen across the whole run.
//! Labels a domain never declared read `undefined`.

use std::collections::BTreeSet;

use colored::*;

use cloudscout_common::inventory::DomainSpec;
use cloudscout_common::record::{DomainResult, Provider, Status};

use crate::terminal::colors;

pub const UNDEFINED: &str = "undefined";

const FIXED_HEADERS: [&str; 6] = ["Domain", "Status", "Cloud", "Service", "IP", "SMTP"];

pub struct Report {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Sorted union of the port labels declared by `domains`.
pub fn port_columns(domains: &[DomainSpec]) -> Vec<String> {
    domains
        .iter()
        .flat_map(|domain| domain.ports.keys().cloned())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

pub fn build(results: &[DomainResult], columns: &[String]) -> Report {
    let headers = FIXED_HEADERS
        .iter()
        .map(|header| header.to_uppercase())
        .chain(columns.iter().map(|label| label.to_uppercase()))
        .collect();

    let rows = results.iter().map(|result| row(result, columns)).collect();
    Report { headers, rows }
}

fn row(result: &DomainResult, columns: &[String]) -> Vec<String> {
    let mut cells = vec![
        result.name.clone(),
        colorize_status(result.status()).to_string(),
        colorize_cloud(result.attribution.provider).to_string(),
        result.attribution.service.clone(),
        result.address.to_string(),
        result.smtp().to_string(),
    ];
    cells.extend(columns.iter().map(|label| port_cell(result, label)));
    cells
}

pub fn port_cell(result: &DomainResult, label: &str) -> String {
    match result.ports.get(label) {
        Some(state) => state.to_string(),
        None => UNDEFINED.to_string(),
    }
}

pub fn colorize_status(status: Status) -> ColoredString {
    match status {
        Status::Active => status.to_string().green(),
        Status::Deactive => status.to_string().red(),
    }
}

pub fn colorize_cloud(provider: Provider) -> ColoredString {
    match provider {
        Provider::Aws => provider.to_string().yellow(),
        Provider::Azure => provider.to_string().cyan(),
        Provider::Gcp => provider.to_string().blue(),
        Provider::Unknown => provider.to_string().normal(),
    }
}

/// Draws `report` as a box table, one string per terminal line.
pub fn render(report: &Report) -> Vec<String> {
    let mut widths: Vec<usize> = report.headers.iter().map(|h| console::measure_text_width(h)).collect();
    for row in &report.rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(console::measure_text_width(cell));
        }
    }

    let mut lines = Vec::with_capacity(report.rows.len() + 4);
    lines.push(border(&widths, '┌', '┬', '┐'));
    lines.push(line(&widths, &report.headers, true));
    lines.push(border(&widths, '├', '┼', '┤'));
    for row in &report.rows {
        lines.push(line(&widths, row, false));
    }
    lines.push(border(&widths, '└', '┴', '┘'));
    lines
}

fn border(widths: &[usize], left: char, joint: char, right: char) -> String {
    let inner: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{left}{}{right}", inner.join(&joint.to_string()))
        .color(colors::SEPARATOR)
        .to_string()
}

fn line(widths: &[usize], cells: &[String], header: bool) -> String {
    let bar = "│".color(colors::SEPARATOR).to_string();
    let mut out = bar.clone();
    for (width, cell) in widths.iter().zip(cells) {
        let pad = " ".repeat(width.saturating_sub(console::measure_text_width(cell)));
        let cell = if header {
            cell.color(colors::PRIMARY).bold().to_string()
        } else {
            cell.clone()
        };
        out.push_str(&format!(" {cell}{pad} {bar}"));
    }
    out
}

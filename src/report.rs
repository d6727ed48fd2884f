//! Report rendering over aggregate search outcomes.
//!
//! Consumes the per-engine reports and the banned-engine list; the core
//! never depends on how results are presented.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::json;

use crate::aggregator::AggregateOutcome;
use crate::query::Query;
use crate::session::Termination;

/// Prints a human-readable report to stdout.
pub fn print_console(query: &Query, outcome: &AggregateOutcome) {
    println!("Results for \"{}\"", query.dispatch_string());
    for report in &outcome.reports {
        println!();
        println!("[{}] {} results", report.engine, report.items.len());
        match report.termination {
            Termination::Done => {}
            Termination::Banned => println!("  (banned after {} pages)", report.pages),
            Termination::Failed => {
                let cause = report
                    .error
                    .as_ref()
                    .map(|error| error.to_string())
                    .unwrap_or_else(|| "unknown error".to_string());
                println!("  (failed: {cause})");
            }
        }
        for (index, item) in report.items.iter().enumerate() {
            println!("{:3}. {}", index + 1, item.title);
            println!("     {}", item.link);
            if !item.text.is_empty() {
                println!("     {}", item.text);
            }
        }
    }
    println!();
    println!(
        "{} merged results from {} engines",
        outcome.results.len(),
        outcome.reports.len()
    );
    if !outcome.banned_engines.is_empty() {
        println!("Banned engines: {}", outcome.banned_engines.join(", "));
    }
}

/// Renders the outcome as a standalone HTML document.
pub fn to_html(query: &Query, outcome: &AggregateOutcome) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Search results for {q}</title>\n</head>\n<body>\n<h1>{q}</h1>\n",
        q = escape_html(&query.dispatch_string())
    );
    for report in &outcome.reports {
        let _ = write!(
            html,
            "<h2>{} ({} results)</h2>\n<ol>\n",
            escape_html(&report.engine),
            report.items.len()
        );
        for item in &report.items {
            let _ = write!(
                html,
                "<li><a href=\"{}\">{}</a><br>{}</li>\n",
                escape_html(&item.link),
                escape_html(&item.title),
                escape_html(&item.text)
            );
        }
        html.push_str("</ol>\n");
    }
    if !outcome.banned_engines.is_empty() {
        let _ = write!(
            html,
            "<p>Banned engines: {}</p>\n",
            escape_html(&outcome.banned_engines.join(", "))
        );
    }
    html.push_str("</body>\n</html>\n");
    html
}

/// Renders the outcome as CSV with one row per item.
pub fn to_csv(query: &Query, outcome: &AggregateOutcome) -> String {
    let mut csv = String::from("query,engine,host,link,title,text\n");
    let query = query.dispatch_string();
    for report in &outcome.reports {
        for item in &report.items {
            let row = [
                query.as_str(),
                report.engine.as_str(),
                item.host.as_str(),
                item.link.as_str(),
                item.title.as_str(),
                item.text.as_str(),
            ];
            let escaped: Vec<String> = row.iter().map(|field| escape_csv(field)).collect();
            csv.push_str(&escaped.join(","));
            csv.push('\n');
        }
    }
    csv
}

/// Renders the outcome as pretty-printed JSON.
pub fn to_json(query: &Query, outcome: &AggregateOutcome) -> String {
    let mut engines = serde_json::Map::new();
    for report in &outcome.reports {
        engines.insert(
            report.engine.clone(),
            serde_json::to_value(&report.items).unwrap_or_default(),
        );
    }
    let value = json!({
        "query": query.dispatch_string(),
        "results": engines,
        "merged": outcome.results.items(),
        "banned_engines": outcome.banned_engines,
    });
    serde_json::to_string_pretty(&value).unwrap_or_default()
}

/// Writes rendered report data to a file.
pub fn write_file(data: &str, path: &Path) -> io::Result<()> {
    fs::write(path, data)
}

/// Default report path derived from the query terms.
pub fn default_path(query: &Query, extension: &str) -> PathBuf {
    let stem: String = query
        .terms()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    PathBuf::from(format!("{stem}.{extension}"))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn escape_csv(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

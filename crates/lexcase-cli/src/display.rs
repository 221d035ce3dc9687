//! Text card rendering for assembled case reports.
//!
//! Sections arrive already ordered and filtered; this module only lays them
//! out according to their [`Presentation`].

use std::fmt::Write;

use lexcase_core::{Presentation, RatedItem, Report, Section};

pub const EMPTY_STATE: &str = "No analysis data available";

const TITLE: &str = "=== Case Analysis ===";
const WRAP: usize = 76;

// ── Public API ──

/// Render a report as a vertical card, one block per section.
pub fn render_report(report: &Report) -> String {
    if report.is_empty() {
        return format!("{EMPTY_STATE}\n");
    }

    let mut out = String::new();
    let _ = writeln!(out, "{TITLE}");
    let _ = writeln!(out);
    for section in report {
        render_section(&mut out, section);
    }
    out
}

// ── Section rendering ──

fn render_section(out: &mut String, section: &Section) {
    let heading = section.heading();
    match section {
        Section::CaseType(t) => {
            let _ = writeln!(out, "{:<20} [{}]", heading, t);
        }
        Section::Summary(t) | Section::EstimatedOutcome(t) | Section::Timeline(t) => {
            let _ = writeln!(out, "{heading}");
            let indent = match section.presentation() {
                Presentation::Narrative => "  > ",
                _ => "  ",
            };
            for line in wrap(t, WRAP - indent.len()) {
                let _ = writeln!(out, "{indent}{line}");
            }
        }
        Section::KeyFacts(items) | Section::EvidenceNeeded(items) | Section::Precedents(items) => {
            let _ = writeln!(out, "{heading} ({})", items.len());
            for item in items {
                let _ = writeln!(out, "  - {item}");
            }
        }
        Section::LegalIssues(items)
        | Section::Weaknesses(items)
        | Section::RecommendedActions(items) => {
            let _ = writeln!(out, "{heading} ({})", items.len());
            for (i, item) in items.iter().enumerate() {
                render_rated(out, i + 1, item);
            }
        }
        Section::ApplicableLaws(laws) => {
            let _ = writeln!(out, "{heading} ({})", laws.len());
            for law in laws {
                let _ = writeln!(out, "  * {}", law.law);
                detail_line(out, "covers", &law.description);
                detail_line(out, "relevance", &law.relevance);
            }
        }
        Section::Strengths(points) => {
            let _ = writeln!(out, "{heading} ({})", points.len());
            for p in points {
                let _ = writeln!(out, "  + {}", p.point);
                detail_line(out, "", &p.explanation);
            }
        }
    }
    let _ = writeln!(out);
}

fn render_rated(out: &mut String, n: usize, item: &RatedItem) {
    let level = item.level.as_deref().filter(|l| !l.is_empty()).unwrap_or("-");
    let _ = writeln!(
        out,
        "  {n}. {} [{}] ({})",
        item.title,
        level.to_uppercase(),
        item.category
    );
    detail_line(out, "", &item.detail);
}

fn detail_line(out: &mut String, label: &str, text: &str) {
    if text.is_empty() {
        return;
    }
    let prefix = if label.is_empty() {
        String::new()
    } else {
        format!("{label}: ")
    };
    for (i, line) in wrap(&format!("{prefix}{text}"), WRAP - 5).iter().enumerate() {
        let indent = if i == 0 { "     " } else { "       " };
        let _ = writeln!(out, "{indent}{line}");
    }
}

// ── Helpers ──

/// Greedy word wrap. Words longer than `width` are left whole.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

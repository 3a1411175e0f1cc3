use anyhow::Result;
use colored::Colorize;
use std::io::Write;

use crate::planner::{TripPreferences, join_labels};
use crate::session::{ActionOutcome, ValidationWarning};

pub(crate) fn banner<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "{}", "🌎 AI Travel Planner".bold())?;
    writeln!(out, "Welcome to your personal AI Travel Assistant! 🌟")?;
    writeln!(out, "We'll use your inputs to craft a personalized itinerary.")?;
    Ok(())
}

/// The trip summary shown before the user confirms.
pub(crate) fn travel_summary<W: Write>(out: &mut W, prefs: &TripPreferences) -> Result<()> {
    let destination = prefs.destination.trim();
    let rows = [
        ("Destination", destination.to_string()),
        ("Duration", format!("{} days", prefs.duration_days)),
        ("Budget", prefs.budget.to_string()),
        ("Travel Styles", join_labels(&prefs.travel_style, "")),
        ("Accommodation Preferences", join_labels(&prefs.accommodation, "")),
        ("Dietary Preferences", prefs.dietary_or("None specified").to_string()),
        ("Mobility", prefs.mobility.to_string()),
        ("Specific Interests", join_labels(&prefs.interests, "Not specified")),
    ];

    writeln!(out)?;
    for (label, value) in rows {
        writeln!(out, "  {} {value}", format!("{label}:").bold())?;
    }
    writeln!(out)?;
    Ok(())
}

/// Prints markdown with light terminal styling: headings bold, links
/// underlined. Anything else passes through untouched.
pub(crate) fn markdown<W: Write>(out: &mut W, text: &str) -> Result<()> {
    for line in text.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with('#') {
            let heading = trimmed.trim_start_matches('#').trim();
            writeln!(out, "{}", heading.bold().cyan())?;
        } else if trimmed.contains("http://") || trimmed.contains("https://") {
            writeln!(out, "{}", highlight_links(line))?;
        } else {
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}

fn highlight_links(line: &str) -> String {
    line.split(' ')
        .map(|word| {
            if word.contains("http://") || word.contains("https://") {
                word.underline().to_string()
            } else {
                word.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn warning<W: Write>(out: &mut W, warning: &ValidationWarning) -> Result<()> {
    writeln!(out, "{}", format!("⚠️  {warning}").yellow())?;
    Ok(())
}

pub(crate) fn outcome<W: Write>(out: &mut W, outcome: &ActionOutcome) -> Result<()> {
    match outcome {
        ActionOutcome::Warning(warning) => self::warning(out, warning)?,
        ActionOutcome::PlanReady(plan) => {
            writeln!(out)?;
            markdown(out, plan.as_str())?;
        }
        ActionOutcome::Answer(answer) => {
            writeln!(out)?;
            markdown(out, answer)?;
        }
        ActionOutcome::Failed { message, hint } => {
            writeln!(out, "{}", format!("❌ {message}").red())?;
            if let Some(hint) = hint {
                writeln!(out, "ℹ️  {hint}")?;
            }
        }
    }
    Ok(())
}

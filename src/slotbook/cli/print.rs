use chrono::{DateTime, Utc};
use colored::Colorize;
use slotbook::commands::query::Availability;
use slotbook::model::{Appointment, Provider};
use slotbook::SlotbookError;
use std::io::{self, Write};
use timeago::Formatter;
use unicode_width::UnicodeWidthStr;

const NAME_WIDTH: usize = 20;
const DATE_FORMAT: &str = "%d-%m-%Y";

pub(super) fn success<W: Write>(out: &mut W, msg: &str) -> io::Result<()> {
    writeln!(out, "{}", msg.green())
}

pub(super) fn info<W: Write>(out: &mut W, msg: &str) -> io::Result<()> {
    writeln!(out, "{}", msg.dimmed())
}

pub(super) fn error<W: Write>(out: &mut W, err: &SlotbookError) -> io::Result<()> {
    writeln!(out, "{}", err.to_string().red())
}

pub(super) fn warning<W: Write>(out: &mut W, msg: &str) -> io::Result<()> {
    writeln!(out, "{}", msg.yellow())
}

pub(super) fn providers<W: Write>(out: &mut W, providers: &[Provider]) -> io::Result<()> {
    if providers.is_empty() {
        return info(out, "No providers registered.");
    }
    for p in providers {
        let free = if p.slots.is_empty() {
            "fully booked".dimmed().to_string()
        } else {
            p.slots.join(", ")
        };
        writeln!(
            out,
            "{:>4}. {}{}  {}",
            p.id.0,
            p.name.bold(),
            pad_to(&p.name, NAME_WIDTH),
            free
        )?;
    }
    Ok(())
}

pub(super) fn availability<W: Write>(out: &mut W, view: &Availability) -> io::Result<()> {
    writeln!(out, "{} (ID: {})", view.provider.name.bold(), view.provider.id)?;
    if view.free().is_empty() {
        info(out, "  no free slots")?;
    } else {
        writeln!(out, "  free:   {}", view.free().join(", "))?;
    }
    for appt in &view.booked {
        writeln!(
            out,
            "  booked: {} by client {} {}",
            appt.slot.yellow(),
            appt.client_id,
            time_ago(appt.created_at).dimmed()
        )?;
    }
    Ok(())
}

/// One-line description of an appointment, e.g. `10:00 with Alex (14-10-2026)`.
pub(super) fn appointment_line(appt: &Appointment, provider_name: Option<&str>) -> String {
    let with = match provider_name {
        Some(name) => name.to_string(),
        None => format!("provider {}", appt.provider_id),
    };
    format!(
        "{} with {} ({})",
        appt.slot,
        with,
        appt.date.format(DATE_FORMAT)
    )
}

fn pad_to(s: &str, width: usize) -> String {
    " ".repeat(width.saturating_sub(s.width()))
}

fn time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    Formatter::new().convert(duration.to_std().unwrap_or_default())
}

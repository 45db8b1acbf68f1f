use std::fmt::Display;

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate, TimeZone};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use inquire::Text;

use crate::config::{AppConfig, parse_timezone};
use crate::models::availability::CommonSlot;
use crate::models::booking::parse_booking_url;
use crate::service::availability_service::BookingLinkClient;
use crate::service::slot_format::{format_slot_date_in, format_slot_time_in};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the owner and event type of a booking link
    Parse { url: String },
    /// Find windows where every booking link is free
    Query {
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
        /// IANA zone used to display slots, e.g. Europe/Berlin
        #[arg(long)]
        timezone: Option<String>,
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Print the display date and clock time of a timestamp
    Format {
        iso: String,
        #[arg(long)]
        timezone: Option<String>,
    },
    /// Prompt for booking links and a date range, then query
    Interactive {},
}

pub async fn run(config: AppConfig) -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Parse { url } => {
            let identity = parse_booking_url(&url)?;
            println!("owner: {}", identity.owner_handle);
            println!("event: {}", identity.event_slug);
        }
        Commands::Query {
            start,
            end,
            timezone,
            urls,
        } => {
            let zone = display_zone(&config, timezone.as_deref())?;
            query(&config, &urls, start, end, zone).await?;
        }
        Commands::Format { iso, timezone } => {
            let lines = match display_zone(&config, timezone.as_deref())? {
                Some(tz) => format_lines(&iso, &tz)?,
                None => format_lines(&iso, &Local)?,
            };
            println!("{}", lines);
        }
        Commands::Interactive {} => {
            let (urls, start, end) = prompt_query()?;
            let zone = display_zone(&config, None)?;
            query(&config, &urls, start, end, zone).await?;
        }
    }
    Ok(())
}

async fn query(
    config: &AppConfig,
    urls: &[String],
    start: NaiveDate,
    end: NaiveDate,
    zone: Option<Tz>,
) -> Result<()> {
    if start > end {
        bail!("Start date {} is after end date {}", start, end);
    }
    let timeout = config.timeout().map_err(anyhow::Error::msg)?;
    let client = BookingLinkClient::with_base_url(&config.base_url(), timeout)
        .map_err(anyhow::Error::msg)?;
    let slots = client
        .query_common_availability(urls, &start.to_string(), &end.to_string())
        .await?;

    if slots.is_empty() {
        println!("No common availability found.");
        return Ok(());
    }
    for slot in &slots {
        let line = match zone {
            Some(tz) => render_slot(slot, &tz),
            None => render_slot(slot, &Local),
        };
        println!("{}", line);
    }
    Ok(())
}

fn display_zone(config: &AppConfig, flag: Option<&str>) -> Result<Option<Tz>> {
    match flag {
        Some(name) => Ok(Some(parse_timezone(name).map_err(anyhow::Error::msg)?)),
        None => config.display_timezone().map_err(anyhow::Error::msg),
    }
}

fn format_lines<Z: TimeZone>(iso: &str, tz: &Z) -> Result<String>
where
    Z::Offset: Display,
{
    Ok(format!(
        "date: {}\ntime: {}",
        format_slot_date_in(iso, tz)?,
        format_slot_time_in(iso, tz)?
    ))
}

/// `2024-03-15 2:00 PM - 2:30 PM`, or the raw JSON when the slot has no
/// readable `start`/`end`.
pub fn render_slot<Z: TimeZone>(slot: &CommonSlot, tz: &Z) -> String
where
    Z::Offset: Display,
{
    let rendered = match (slot.start(), slot.end()) {
        (Some(start), Some(end)) => format_slot_date_in(start, tz).and_then(|date| {
            Ok(format!(
                "{} {} - {}",
                date,
                format_slot_time_in(start, tz)?,
                format_slot_time_in(end, tz)?
            ))
        }),
        _ => return slot.as_json().to_string(),
    };
    rendered.unwrap_or_else(|_| slot.as_json().to_string())
}

fn prompt_query() -> Result<(Vec<String>, NaiveDate, NaiveDate)> {
    let raw_urls = Text::new("Booking links (comma separated)").prompt()?;
    let urls: Vec<String> = raw_urls
        .split(',')
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .collect();
    if urls.is_empty() {
        bail!("No booking links provided");
    }
    let start = prompt_date("Start date (YYYY-MM-DD)")?;
    let end = prompt_date("End date (YYYY-MM-DD)")?;
    Ok((urls, start, end))
}

fn prompt_date(message: &str) -> Result<NaiveDate> {
    let raw = Text::new(message).prompt()?;
    raw.trim()
        .parse::<NaiveDate>()
        .with_context(|| format!("Invalid date {:?}", raw))
}

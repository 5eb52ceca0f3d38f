//! Panchang Almanac Tool
//!
//! Prints the full panchang (five elements, calendar metadata, and the
//! muhurta windows) for a date and location.
//!
//! Usage:
//!   cargo run --bin panchang -- --date 2024-01-15
//!   cargo run --bin panchang -- --date 2024-01-15 --lat 13.0827 --lon 80.2707 --json

use chrono::NaiveDate;
use clap::{ArgAction, Parser};

use panchanga::{ObservationPoint, Panchanga};

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Panchang Almanac Tool
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Computes the Vedic almanac (panchang) for a date and location",
    long_about = None
)]
struct Args {
    /// Calendar date (YYYY-MM-DD); defaults to today
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Observer latitude in degrees, positive north
    #[arg(long, default_value_t = panchanga::constants::DEFAULT_LATITUDE_DEG)]
    lat: f64,

    /// Observer longitude in degrees, positive east
    #[arg(long, default_value_t = panchanga::constants::DEFAULT_LONGITUDE_DEG)]
    lon: f64,

    /// Timezone offset from UTC in hours
    #[arg(long, default_value_t = panchanga::constants::DEFAULT_TZ_OFFSET_HOURS)]
    tz: f64,

    /// Skip the muhurta windows
    #[arg(long, action = ArgAction::SetTrue)]
    no_muhurta: bool,

    /// Emit the wire-format JSON instead of formatted text
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

/// Prints a section header with a title and separator line
fn print_section_header(title: &str) {
    println!("\n{}:", title);
    println!("-------------------------------------------------------");
}

/// Helper to print named values in a formatted way
fn print_named_value(name: &str, value: impl std::fmt::Display) {
    println!("{:<22} {}", name, value);
}

fn main() -> Result<()> {
    let args = Args::parse();

    let date = args
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let point = ObservationPoint::new(date, args.lat, args.lon, args.tz);
    let engine = Panchanga::new();

    if args.json {
        let response = engine.response(&point, !args.no_muhurta)?;
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    let bundle = engine.panchang(&point, !args.no_muhurta)?;
    let p = &bundle.panchang;

    println!(
        "Panchang for {} at {:.4} N, {:.4} E (UTC{:+})",
        date, args.lat, args.lon, args.tz
    );

    print_section_header("Day");
    print_named_value("Weekday", &p.weekday.weekday_name);
    print_named_value("Vara", &p.weekday.vedic_weekday_name);
    print_named_value("Sunrise", p.sun_rise.format("%H:%M"));
    print_named_value("Sunset", p.sun_set.format("%H:%M"));

    print_section_header("Elements");
    print_named_value(
        "Tithi",
        format!(
            "{} ({} paksha), ends {}",
            p.tithi.name,
            p.tithi.paksha.name(),
            p.tithi.ends_at.format("%H:%M")
        ),
    );
    print_named_value(
        "Nakshatra",
        format!("{}, ends {}", p.nakshatra.name, p.nakshatra.ends_at.format("%H:%M")),
    );
    for y in &p.yoga {
        print_named_value(
            "Yoga",
            format!("{}, ends {}", y.name, y.ends_at.format("%H:%M")),
        );
    }
    for k in &p.karana {
        print_named_value(
            "Karana",
            format!("{}, ends {}", k.name, k.ends_at.format("%H:%M")),
        );
    }

    print_section_header("Calendar");
    print_named_value("Lunar month", &p.lunar_month.full_name);
    print_named_value("Ritu", &p.ritu.name);
    print_named_value("Aayanam", p.aayanam.name());
    print_named_value(
        "Saka year",
        format!(
            "{} ({})",
            p.year.saka_salivahana_number, p.year.saka_salivahana_year_name
        ),
    );
    print_named_value(
        "Vikram year",
        format!(
            "{} ({})",
            p.year.vikram_chaitradi_number, p.year.vikram_chaitradi_year_name
        ),
    );

    if let Some(muhurta) = &bundle.muhurta {
        print_section_header("Muhurta");
        for w in muhurta.auspicious().iter().chain(muhurta.inauspicious().iter()) {
            print_named_value(
                &w.name,
                format!("{} - {}", w.start.format("%H:%M"), w.end.format("%H:%M")),
            );
        }
        print_named_value(
            "Day duration",
            format!(
                "{}h {:02}m",
                muhurta.day_duration.hours, muhurta.day_duration.minutes
            ),
        );
    }

    Ok(())
}

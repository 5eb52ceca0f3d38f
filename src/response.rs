//! Wire shapes consumed by the presentation layer
//!
//! The core model keeps yoga/karana as ordered lists; the wire layer
//! re-keys them by occurrence order ("1", "2") because that is the shape
//! the pages consume. Clock times serialize as strings so the payload is
//! renderable without date math on the client.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::muhurta::{MuhurtaResult, MuhurtaWindow};
use crate::panchang::PanchangResult;
use crate::Provenance;

/// Request shape accepted from the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanchangRequest {
    /// ISO-8601 calendar date
    pub date: chrono::NaiveDate,
    /// Observer latitude in degrees
    pub latitude: f64,
    /// Observer longitude in degrees, positive east
    pub longitude: f64,
    /// Offset from UTC in hours; defaults to IST when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone_offset_hours: Option<f64>,
}

fn clock(t: &NaiveDateTime) -> String {
    t.format("%H:%M").to_string()
}

fn timestamp(t: &NaiveDateTime) -> String {
    t.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// One element entry with a completion timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementEntry {
    /// 1-based element number
    pub number: u8,
    /// Element name
    pub name: String,
    /// Local completion time
    pub ends_at: String,
    /// Percentage remaining at the reference instant
    pub percentage_remaining: f64,
}

/// Tithi with its paksha.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TithiEntry {
    /// 1-based tithi number (1-30)
    pub number: u8,
    /// Tithi name
    pub name: String,
    /// "Shukla" or "Krishna"
    pub paksha: String,
    /// Local completion time
    pub ends_at: String,
    /// Percentage remaining at the reference instant
    pub percentage_remaining: f64,
}

/// Nakshatra with its span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NakshatraEntry {
    /// 1-based nakshatra number (1-27)
    pub number: u8,
    /// Nakshatra name
    pub name: String,
    /// Local start time
    pub starts_at: String,
    /// Local end time
    pub ends_at: String,
    /// Percentage remaining at the reference instant
    pub percentage_remaining: f64,
}

/// Weekday block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayBlock {
    /// Civil weekday number, 1 = Sunday
    pub weekday_number: u8,
    /// Civil weekday name
    pub weekday_name: String,
    /// Vedic weekday number, 1 = Ravivara
    pub vedic_weekday_number: u8,
    /// Vedic weekday name
    pub vedic_weekday_name: String,
}

/// Lunar month block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LunarMonthBlock {
    /// 1-based month number (1 = Chaitra)
    pub lunar_month_number: u8,
    /// Month name
    pub lunar_month_name: String,
    /// Month name with intercalation qualifier
    pub lunar_month_full_name: String,
    /// Intercalary month
    pub adhika: bool,
    /// Omitted-month condition
    pub kshaya: bool,
    /// Ordinary month
    pub nija: bool,
}

/// Ritu block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RituBlock {
    /// 1-based ritu number
    pub number: u8,
    /// Season name
    pub name: String,
}

/// Era year block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearBlock {
    /// Saka era year number
    pub saka_salivahana_number: i32,
    /// Saka samvatsara name
    pub saka_salivahana_year_name: String,
    /// Vikram era year number
    pub vikram_chaitradi_number: i32,
    /// Vikram samvatsara name
    pub vikram_chaitradi_year_name: String,
}

/// One muhurta window on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowBlock {
    /// Local start clock time
    pub start: String,
    /// Local end clock time
    pub end: String,
    /// Display description
    pub description: String,
}

/// A named window inside the grouped lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedWindowBlock {
    /// Window name
    pub name: String,
    /// Local start clock time
    pub start: String,
    /// Local end clock time
    pub end: String,
    /// Display description
    pub description: String,
}

/// Day duration block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayDurationBlock {
    /// Whole hours of daylight
    pub hours: i64,
    /// Remaining minutes
    pub minutes: i64,
}

/// Muhurta section of the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MuhurtaBlock {
    /// The 96 minutes ending at sunrise
    pub brahma_muhurta: WindowBlock,
    /// The middle fifteenth of daylight
    pub abhijit_muhurta: WindowBlock,
    /// Rahu's segment
    pub rahu_kaal: WindowBlock,
    /// Yama's segment
    pub yamaganda: WindowBlock,
    /// Gulika's segment
    pub gulika_kaal: WindowBlock,
    /// Favorable windows in start order
    pub auspicious_times: Vec<NamedWindowBlock>,
    /// Unfavorable windows in start order
    pub inauspicious_times: Vec<NamedWindowBlock>,
    /// Sunrise-to-sunset length
    pub day_duration: DayDurationBlock,
}

/// Full response for one observation point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanchangResponse {
    /// Where the result came from: the archive or a fresh computation
    pub source: Provenance,
    /// Local sunrise clock time
    pub sun_rise: String,
    /// Local sunset clock time
    pub sun_set: String,
    /// Weekday block
    pub weekday: WeekdayBlock,
    /// Current tithi
    pub tithi: TithiEntry,
    /// Current nakshatra
    pub nakshatra: NakshatraEntry,
    /// Yoga periods keyed by occurrence order ("1", "2")
    pub yoga: BTreeMap<String, ElementEntry>,
    /// Karana periods keyed by occurrence order ("1", "2")
    pub karana: BTreeMap<String, ElementEntry>,
    /// Lunar month block
    pub lunar_month: LunarMonthBlock,
    /// Season block
    pub ritu: RituBlock,
    /// "Uttarayana" or "Dakshinayana"
    pub aayanam: String,
    /// Era years
    pub year: YearBlock,
    /// Muhurta section, present when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muhurta: Option<MuhurtaBlock>,
}

fn window_block(w: &MuhurtaWindow) -> WindowBlock {
    WindowBlock {
        start: clock(&w.start),
        end: clock(&w.end),
        description: w.description.clone(),
    }
}

fn named_window_block(w: &MuhurtaWindow) -> NamedWindowBlock {
    NamedWindowBlock {
        name: w.name.clone(),
        start: clock(&w.start),
        end: clock(&w.end),
        description: w.description.clone(),
    }
}

fn muhurta_block(muhurta: &MuhurtaResult) -> MuhurtaBlock {
    MuhurtaBlock {
        brahma_muhurta: window_block(&muhurta.brahma_muhurta),
        abhijit_muhurta: window_block(&muhurta.abhijit_muhurta),
        rahu_kaal: window_block(&muhurta.rahu_kaal),
        yamaganda: window_block(&muhurta.yamaganda),
        gulika_kaal: window_block(&muhurta.gulika_kaal),
        auspicious_times: muhurta.auspicious().into_iter().map(named_window_block).collect(),
        inauspicious_times: muhurta
            .inauspicious()
            .into_iter()
            .map(named_window_block)
            .collect(),
        day_duration: DayDurationBlock {
            hours: muhurta.day_duration.hours,
            minutes: muhurta.day_duration.minutes,
        },
    }
}

impl PanchangResponse {
    /// Assemble the wire response from the computed bundle.
    pub fn from_results(
        panchang: &PanchangResult,
        muhurta: Option<&MuhurtaResult>,
        source: Provenance,
    ) -> Self {
        let yoga = panchang
            .yoga
            .iter()
            .enumerate()
            .map(|(i, y)| {
                (
                    (i + 1).to_string(),
                    ElementEntry {
                        number: y.number,
                        name: y.name.clone(),
                        ends_at: timestamp(&y.ends_at),
                        percentage_remaining: y.percentage_remaining,
                    },
                )
            })
            .collect();
        let karana = panchang
            .karana
            .iter()
            .enumerate()
            .map(|(i, k)| {
                (
                    (i + 1).to_string(),
                    ElementEntry {
                        number: k.number,
                        name: k.name.clone(),
                        ends_at: timestamp(&k.ends_at),
                        percentage_remaining: k.percentage_remaining,
                    },
                )
            })
            .collect();

        Self {
            source,
            sun_rise: clock(&panchang.sun_rise),
            sun_set: clock(&panchang.sun_set),
            weekday: WeekdayBlock {
                weekday_number: panchang.weekday.weekday_number,
                weekday_name: panchang.weekday.weekday_name.clone(),
                vedic_weekday_number: panchang.weekday.vedic_weekday_number,
                vedic_weekday_name: panchang.weekday.vedic_weekday_name.clone(),
            },
            tithi: TithiEntry {
                number: panchang.tithi.number,
                name: panchang.tithi.name.clone(),
                paksha: panchang.tithi.paksha.name().to_string(),
                ends_at: timestamp(&panchang.tithi.ends_at),
                percentage_remaining: panchang.tithi.percentage_remaining,
            },
            nakshatra: NakshatraEntry {
                number: panchang.nakshatra.number,
                name: panchang.nakshatra.name.clone(),
                starts_at: timestamp(&panchang.nakshatra.starts_at),
                ends_at: timestamp(&panchang.nakshatra.ends_at),
                percentage_remaining: panchang.nakshatra.percentage_remaining,
            },
            yoga,
            karana,
            lunar_month: LunarMonthBlock {
                lunar_month_number: panchang.lunar_month.number,
                lunar_month_name: panchang.lunar_month.name.clone(),
                lunar_month_full_name: panchang.lunar_month.full_name.clone(),
                adhika: panchang.lunar_month.adhika,
                kshaya: panchang.lunar_month.kshaya,
                nija: panchang.lunar_month.nija,
            },
            ritu: RituBlock {
                number: panchang.ritu.number,
                name: panchang.ritu.name.clone(),
            },
            aayanam: panchang.aayanam.name().to_string(),
            year: YearBlock {
                saka_salivahana_number: panchang.year.saka_salivahana_number,
                saka_salivahana_year_name: panchang.year.saka_salivahana_year_name.clone(),
                vikram_chaitradi_number: panchang.year.vikram_chaitradi_number,
                vikram_chaitradi_year_name: panchang.year.vikram_chaitradi_year_name.clone(),
            },
            muhurta: muhurta.map(muhurta_block),
        }
    }
}

impl PanchangRequest {
    /// Convert into an observation point, applying the IST default for a
    /// missing timezone offset.
    pub fn into_observation_point(self) -> crate::ObservationPoint {
        crate::ObservationPoint::new(
            self.date,
            self.latitude,
            self.longitude,
            self.timezone_offset_hours
                .unwrap_or(crate::constants::DEFAULT_TZ_OFFSET_HOURS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::{AnalyticEphemeris, EphemerisProvider};
    use crate::ObservationPoint;
    use chrono::NaiveDate;

    fn response() -> PanchangResponse {
        let point = ObservationPoint::new(
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            17.38333,
            78.4666,
            5.5,
        );
        let eph = AnalyticEphemeris::new();
        let positions = eph.positions(&point).unwrap();
        let panchang = crate::panchang::compute(&eph, &positions, &point).unwrap();
        let muhurta = crate::muhurta::derive(&panchang, &positions, &point).unwrap();
        PanchangResponse::from_results(&panchang, Some(&muhurta), Provenance::Computed)
    }

    #[test]
    fn field_names_on_the_wire() {
        let json = serde_json::to_value(response()).unwrap();
        assert!(json.get("sun_rise").is_some());
        assert!(json.get("sun_set").is_some());
        assert!(json["weekday"].get("weekday_name").is_some());
        assert!(json["tithi"].get("paksha").is_some());
        assert!(json["lunar_month"].get("lunar_month_full_name").is_some());
        assert!(json["year"].get("vikram_chaitradi_year_name").is_some());
        assert!(json["year"].get("saka_salivahana_year_name").is_some());
        assert!(json["muhurta"].get("brahma_muhurta").is_some());
        assert!(json["muhurta"].get("gulika_kaal").is_some());
        assert!(json["muhurta"]["day_duration"].get("hours").is_some());
        assert_eq!(json["source"], "computed");
    }

    #[test]
    fn yoga_collection_keyed_by_order() {
        let resp = response();
        assert!(resp.yoga.contains_key("1"));
        assert!(resp.karana.contains_key("1"));
        assert!(resp.yoga.len() <= 2);
    }

    #[test]
    fn clock_times_render_as_hh_mm() {
        let resp = response();
        assert_eq!(resp.sun_rise.len(), 5, "sun_rise = {}", resp.sun_rise);
        assert!(resp.sun_rise.contains(':'));
    }

    #[test]
    fn request_defaults_timezone_to_ist() {
        let req: PanchangRequest = serde_json::from_str(
            r#"{"date": "2024-01-15", "latitude": 17.38333, "longitude": 78.4666}"#,
        )
        .unwrap();
        let point = req.into_observation_point();
        assert!((point.timezone_offset_hours - 5.5).abs() < 1e-12);
    }
}

//! Result types for the panchang calculator
//!
//! These are the persisted/cacheable entities: everything derives serde
//! traits so the store can serialize them, and `PartialEq` so idempotence
//! is directly assertable.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Waxing or waning half of the lunar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Paksha {
    /// Waxing half (tithis 1-15, new moon to full moon)
    Shukla,
    /// Waning half (tithis 16-30, full moon to new moon)
    Krishna,
}

impl Paksha {
    /// Display name of the paksha.
    pub fn name(self) -> &'static str {
        match self {
            Self::Shukla => "Shukla",
            Self::Krishna => "Krishna",
        }
    }
}

/// Solstice half of the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Aayanam {
    /// Sun heading north: Makara through Mithuna
    Uttarayana,
    /// Sun heading south: Karka through Dhanu
    Dakshinayana,
}

impl Aayanam {
    /// Display name of the aayanam.
    pub fn name(self) -> &'static str {
        match self {
            Self::Uttarayana => "Uttarayana",
            Self::Dakshinayana => "Dakshinayana",
        }
    }
}

/// Tithi (lunar day) with its completion instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TithiInfo {
    /// 1-based tithi number (1-30)
    pub number: u8,
    /// Sanskrit name
    pub name: String,
    /// Waxing or waning half
    pub paksha: Paksha,
    /// Local time at which this tithi completes
    pub ends_at: NaiveDateTime,
    /// Percentage of the tithi remaining at the reference instant [0, 100]
    pub percentage_remaining: f64,
}

/// Nakshatra (lunar mansion) with its span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NakshatraInfo {
    /// 1-based nakshatra number (1-27)
    pub number: u8,
    /// Sanskrit name
    pub name: String,
    /// Local time at which the Moon entered this nakshatra
    pub starts_at: NaiveDateTime,
    /// Local time at which the Moon leaves this nakshatra
    pub ends_at: NaiveDateTime,
    /// Percentage remaining at the reference instant [0, 100]
    pub percentage_remaining: f64,
}

/// One yoga period touching the civil day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YogaInfo {
    /// 1-based yoga number (1-27)
    pub number: u8,
    /// Sanskrit name
    pub name: String,
    /// Local time at which this yoga completes
    pub ends_at: NaiveDateTime,
    /// Percentage remaining at the reference instant [0, 100]
    pub percentage_remaining: f64,
}

/// One karana (half-tithi) period touching the civil day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KaranaInfo {
    /// 1-based position in the 60-karana month (1-60)
    pub number: u8,
    /// Sanskrit name
    pub name: String,
    /// Local time at which this karana completes
    pub ends_at: NaiveDateTime,
    /// Percentage remaining at the reference instant [0, 100]
    pub percentage_remaining: f64,
}

/// Civil and Vedic weekday. The Vedic day runs sunrise to sunrise, so
/// before local sunrise it is still the previous civil day's vara.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayInfo {
    /// Civil weekday number, 1 = Sunday .. 7 = Saturday
    pub weekday_number: u8,
    /// Civil weekday name
    pub weekday_name: String,
    /// Vedic weekday number, 1 = Ravivara .. 7 = Shanivara
    pub vedic_weekday_number: u8,
    /// Vedic weekday (vara) name
    pub vedic_weekday_name: String,
}

/// Amanta lunar month with intercalation flags. At most one of `adhika`,
/// `kshaya`, `nija` is true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LunarMonthInfo {
    /// 1-based month number (1 = Chaitra .. 12 = Phalguna)
    pub number: u8,
    /// Month name
    pub name: String,
    /// Full name including the intercalation qualifier
    pub full_name: String,
    /// Intercalary (repeated) month
    pub adhika: bool,
    /// Omitted-month condition (two sankrantis in one lunation)
    pub kshaya: bool,
    /// Ordinary month
    pub nija: bool,
}

/// Ritu (season).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RituInfo {
    /// 1-based ritu number (1 = Vasanta .. 6 = Shishira)
    pub number: u8,
    /// Season name
    pub name: String,
}

/// Era year numbers and samvatsara names for the running lunar year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearInfo {
    /// Saka (Salivahana) era year number
    pub saka_salivahana_number: i32,
    /// Samvatsara name of the Saka year (southern cycle)
    pub saka_salivahana_year_name: String,
    /// Vikram (chaitradi) era year number
    pub vikram_chaitradi_number: i32,
    /// Samvatsara name of the Vikram year (northern cycle)
    pub vikram_chaitradi_year_name: String,
}

/// The persisted almanac for one observation point.
///
/// Exactly one tithi and one nakshatra are current at the reference
/// instant; yoga and karana are ordered lists (at most 2 entries, sorted
/// by start) because more than one period can touch a single civil day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanchangResult {
    /// Local sunrise
    pub sun_rise: NaiveDateTime,
    /// Local sunset
    pub sun_set: NaiveDateTime,
    /// Civil and Vedic weekday
    pub weekday: WeekdayInfo,
    /// Current tithi
    pub tithi: TithiInfo,
    /// Current nakshatra
    pub nakshatra: NakshatraInfo,
    /// Yoga periods touching the civil day, in start order
    pub yoga: Vec<YogaInfo>,
    /// Karana periods touching the civil day, in start order
    pub karana: Vec<KaranaInfo>,
    /// Amanta lunar month
    pub lunar_month: LunarMonthInfo,
    /// Season
    pub ritu: RituInfo,
    /// Solstice half
    pub aayanam: Aayanam,
    /// Era years
    pub year: YearInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paksha_names() {
        assert_eq!(Paksha::Shukla.name(), "Shukla");
        assert_eq!(Paksha::Krishna.name(), "Krishna");
    }

    #[test]
    fn aayanam_names() {
        assert_eq!(Aayanam::Uttarayana.name(), "Uttarayana");
        assert_eq!(Aayanam::Dakshinayana.name(), "Dakshinayana");
    }
}

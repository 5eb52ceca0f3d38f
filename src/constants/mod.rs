//! Constants for panchang calculations

// Time constants
/// Seconds in a day
pub const DAY_S: f64 = 86_400.0;
/// Minutes in a day
pub const DAY_MIN: f64 = 1_440.0;
/// J2000.0 epoch as Julian date
pub const J2000: f64 = 2_451_545.0;
/// Days in a Julian century
pub const JULIAN_CENTURY_DAYS: f64 = 36_525.0;
/// Mean synodic month (new moon to new moon) in days
pub const SYNODIC_MONTH_DAYS: f64 = 29.530_588_853;

// Angular segments of the panchang elements
/// Arc of one tithi: 360/30 degrees of Sun-Moon elongation
pub const TITHI_ARC_DEG: f64 = 12.0;
/// Arc of one karana (half-tithi): 360/60 degrees of elongation
pub const KARANA_ARC_DEG: f64 = 6.0;
/// Arc of one nakshatra: 360/27 degrees of the Moon's longitude
pub const NAKSHATRA_ARC_DEG: f64 = 360.0 / 27.0;
/// Arc of one yoga: 360/27 degrees of the Sun+Moon longitude sum
pub const YOGA_ARC_DEG: f64 = 360.0 / 27.0;
/// Arc of one rashi (sidereal solar month)
pub const RASHI_ARC_DEG: f64 = 30.0;

/// Number of tithis in a lunar month
pub const TITHI_COUNT: u8 = 30;
/// Number of karanas in a lunar month
pub const KARANA_COUNT: u8 = 60;
/// Number of nakshatras in the 27-fold scheme
pub const NAKSHATRA_COUNT: u8 = 27;
/// Number of yogas
pub const YOGA_COUNT: u8 = 27;

// Sidereal reference (Lahiri / Chitrapaksha)
/// Lahiri ayanamsha at J2000.0 in degrees (Spica at 0 deg Libra sidereal)
pub const LAHIRI_AYANAMSHA_J2000_DEG: f64 = 23.853;
/// General precession in ecliptic longitude, degrees per Julian century
pub const PRECESSION_DEG_PER_CENTURY: f64 = 1.396_971;

// Era epochs
/// Offset from CE year to Saka (Salivahana) year at the lunar year start
pub const SAKA_YEAR_OFFSET: i32 = 78;
/// Offset from CE year to Vikram (chaitradi) year at the lunar year start
pub const VIKRAM_YEAR_OFFSET: i32 = 57;
/// Reference epoch for the 60-year samvatsara cycle: CE 1987 = Prabhava
pub const SAMVATSARA_EPOCH_YEAR: i32 = 1987;
/// The northern (Vikram chaitradi) cycle runs this many names ahead of the
/// southern (Saka) cycle
pub const VIKRAM_CYCLE_SHIFT: i32 = 14;

// Muhurta geometry
/// Number of equal daylight segments for Rahu Kaal / Yamaganda / Gulika Kaal
pub const DAYLIGHT_SEGMENTS: u32 = 8;
/// Length of Brahma Muhurta in minutes (two muhurtas of 48 minutes each)
pub const BRAHMA_MUHURTA_MIN: i64 = 96;
/// Abhijit Muhurta is the middle 1/15th of the daylight span
pub const ABHIJIT_DIVISIONS: u32 = 15;

// Cache geometry
/// Decimal places kept in cache-key coordinates (1e-4 deg is about 11 m;
/// close enough that the almanac cannot differ within one cell)
pub const CACHE_COORD_DECIMALS: u32 = 4;
/// Scale factor implied by [`CACHE_COORD_DECIMALS`]
pub const CACHE_COORD_SCALE: f64 = 10_000.0;

// Default observer (used by callers when geolocation is unavailable)
/// Default latitude: Hyderabad, India
pub const DEFAULT_LATITUDE_DEG: f64 = 17.38333;
/// Default longitude: Hyderabad, India
pub const DEFAULT_LONGITUDE_DEG: f64 = 78.4666;
/// Default timezone offset in hours (IST)
pub const DEFAULT_TZ_OFFSET_HOURS: f64 = 5.5;

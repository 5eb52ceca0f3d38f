//! Name tables for the panchang elements
//!
//! All tables are 0-indexed; the public result types carry 1-based
//! numbers, so callers index with `number - 1`.

/// The 30 tithis: Shukla Pratipada through Purnima, then Krishna
/// Pratipada through Amavasya.
pub const TITHI_NAMES: [&str; 30] = [
    "Pratipada",
    "Dwitiya",
    "Tritiya",
    "Chaturthi",
    "Panchami",
    "Shashthi",
    "Saptami",
    "Ashtami",
    "Navami",
    "Dashami",
    "Ekadashi",
    "Dwadashi",
    "Trayodashi",
    "Chaturdashi",
    "Purnima",
    "Pratipada",
    "Dwitiya",
    "Tritiya",
    "Chaturthi",
    "Panchami",
    "Shashthi",
    "Saptami",
    "Ashtami",
    "Navami",
    "Dashami",
    "Ekadashi",
    "Dwadashi",
    "Trayodashi",
    "Chaturdashi",
    "Amavasya",
];

/// The 27 nakshatras from Ashwini to Revati (uniform 13 deg 20' each).
pub const NAKSHATRA_NAMES: [&str; 27] = [
    "Ashwini",
    "Bharani",
    "Krittika",
    "Rohini",
    "Mrigashira",
    "Ardra",
    "Punarvasu",
    "Pushya",
    "Ashlesha",
    "Magha",
    "Purva Phalguni",
    "Uttara Phalguni",
    "Hasta",
    "Chitra",
    "Swati",
    "Vishakha",
    "Anuradha",
    "Jyeshtha",
    "Mula",
    "Purva Ashadha",
    "Uttara Ashadha",
    "Shravana",
    "Dhanishtha",
    "Shatabhisha",
    "Purva Bhadrapada",
    "Uttara Bhadrapada",
    "Revati",
];

/// The 27 yogas from Vishkambha to Vaidhriti.
pub const YOGA_NAMES: [&str; 27] = [
    "Vishkambha",
    "Priti",
    "Ayushman",
    "Saubhagya",
    "Shobhana",
    "Atiganda",
    "Sukarman",
    "Dhriti",
    "Shula",
    "Ganda",
    "Vriddhi",
    "Dhruva",
    "Vyaghata",
    "Harshana",
    "Vajra",
    "Siddhi",
    "Vyatipata",
    "Variyana",
    "Parigha",
    "Shiva",
    "Siddha",
    "Sadhya",
    "Shubha",
    "Shukla",
    "Brahma",
    "Indra",
    "Vaidhriti",
];

/// The 7 movable karanas, cycling through positions 2-57 of the month.
pub const KARANA_MOVABLE_NAMES: [&str; 7] = [
    "Bava", "Balava", "Kaulava", "Taitila", "Garija", "Vanija", "Vishti",
];

/// Name of a karana by its 0-based position in the 60-karana month.
///
/// Four karanas are fixed: Kimstughna opens the month (first half of
/// Shukla Pratipada) and Shakuni, Chatushpada, Naga close it; the seven
/// movable karanas repeat eight times in between.
pub fn karana_name(position: u8) -> &'static str {
    match position {
        0 => "Kimstughna",
        57 => "Shakuni",
        58 => "Chatushpada",
        59 => "Naga",
        p => KARANA_MOVABLE_NAMES[((p - 1) % 7) as usize],
    }
}

/// The 12 amanta lunar months, Chaitra first.
pub const MASA_NAMES: [&str; 12] = [
    "Chaitra",
    "Vaishakha",
    "Jyeshtha",
    "Ashadha",
    "Shravana",
    "Bhadrapada",
    "Ashwina",
    "Kartika",
    "Margashirsha",
    "Pausha",
    "Magha",
    "Phalguna",
];

/// The 6 ritus (seasons), two sidereal solar months each.
pub const RITU_NAMES: [&str; 6] = [
    "Vasanta", "Grishma", "Varsha", "Sharad", "Hemanta", "Shishira",
];

/// Civil weekday names, Sunday first.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Vedic weekday (vara) names, Sunday first.
pub const VEDIC_WEEKDAY_NAMES: [&str; 7] = [
    "Ravivara",
    "Somavara",
    "Mangalavara",
    "Budhavara",
    "Guruvara",
    "Shukravara",
    "Shanivara",
];

/// The 60 samvatsaras of the Jovian cycle, Prabhava first.
pub const SAMVATSARA_NAMES: [&str; 60] = [
    "Prabhava",
    "Vibhava",
    "Shukla",
    "Pramodoota",
    "Prajothpatti",
    "Angirasa",
    "Shrimukha",
    "Bhava",
    "Yuva",
    "Dhaatu",
    "Eeshvara",
    "Bahudhanya",
    "Pramaathi",
    "Vikrama",
    "Vrisha",
    "Chitrabhanu",
    "Svabhanu",
    "Taarana",
    "Paarthiva",
    "Vyaya",
    "Sarvajit",
    "Sarvadhari",
    "Virodhi",
    "Vikruti",
    "Khara",
    "Nandana",
    "Vijaya",
    "Jaya",
    "Manmatha",
    "Durmukhi",
    "Hevilambi",
    "Vilambi",
    "Vikari",
    "Sharvari",
    "Plava",
    "Shubhakrut",
    "Shobhakrut",
    "Krodhi",
    "Vishvavasu",
    "Paraabhava",
    "Plavanga",
    "Keelaka",
    "Saumya",
    "Sadharana",
    "Virodhikrut",
    "Paridhavi",
    "Pramaadhi",
    "Aananda",
    "Raakshasa",
    "Naala",
    "Pingala",
    "Kaalayukti",
    "Siddharthi",
    "Raudri",
    "Durmathi",
    "Dundubhi",
    "Rudhirodgaari",
    "Raktaakshi",
    "Krodhana",
    "Akshaya",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tithi_halves_mirror() {
        // Krishna paksha repeats the Shukla names except the last entry
        for i in 0..14 {
            assert_eq!(TITHI_NAMES[i], TITHI_NAMES[i + 15]);
        }
        assert_eq!(TITHI_NAMES[14], "Purnima");
        assert_eq!(TITHI_NAMES[29], "Amavasya");
    }

    #[test]
    fn karana_fixed_positions() {
        assert_eq!(karana_name(0), "Kimstughna");
        assert_eq!(karana_name(57), "Shakuni");
        assert_eq!(karana_name(58), "Chatushpada");
        assert_eq!(karana_name(59), "Naga");
    }

    #[test]
    fn karana_movable_cycle() {
        assert_eq!(karana_name(1), "Bava");
        assert_eq!(karana_name(7), "Vishti");
        assert_eq!(karana_name(8), "Bava");
        // Last movable slot before the closing fixed karanas
        assert_eq!(karana_name(56), "Vishti");
    }

    #[test]
    fn names_nonempty() {
        for name in TITHI_NAMES
            .iter()
            .chain(NAKSHATRA_NAMES.iter())
            .chain(YOGA_NAMES.iter())
            .chain(MASA_NAMES.iter())
            .chain(RITU_NAMES.iter())
            .chain(SAMVATSARA_NAMES.iter())
        {
            assert!(!name.is_empty());
        }
    }
}

//! Equipment age resolution
//!
//! Tries, in order: a year embedded in the `manufacturing` text, a
//! brand-specific serial decoder, then any plausible year inside the
//! serial. Years after the reference year are treated as decoding errors
//! and skipped, so a resolved age is never negative.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::{AgeEstimate, AgeSource, EquipmentDescriptor};

/// Confidence for a year read from the manufacturing field or a brand decoder
const DECODED_CONFIDENCE: u8 = 85;

/// Confidence for a year found by scanning the serial
const SCANNED_CONFIDENCE: u8 = 60;

fn manufacturing_year_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("valid year pattern"))
}

fn serial_year_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?:19|20)\d{2}").expect("valid year pattern"))
}

/// Resolve age relative to `reference_year`
pub fn resolve_age(descriptor: &EquipmentDescriptor, reference_year: i32) -> AgeEstimate {
    let candidates = [
        (
            descriptor
                .manufacturing
                .as_deref()
                .and_then(year_from_manufacturing),
            AgeSource::ManufacturingField,
        ),
        (
            descriptor
                .serial
                .as_deref()
                .and_then(|serial| decode_serial_year(serial, descriptor.brand.as_deref())),
            AgeSource::SerialDecoder,
        ),
        (
            descriptor
                .serial
                .as_deref()
                .and_then(|serial| scan_serial_year(serial, reference_year)),
            AgeSource::SerialScan,
        ),
    ];

    candidates
        .into_iter()
        .find_map(|(year, source)| {
            year.filter(|y| *y <= reference_year)
                .map(|year| estimate(year, source, reference_year))
        })
        .unwrap_or_else(AgeEstimate::unknown)
}

fn estimate(year: i32, source: AgeSource, reference_year: i32) -> AgeEstimate {
    let (estimated, confidence) = match source {
        AgeSource::SerialScan => (true, SCANNED_CONFIDENCE),
        AgeSource::ManufacturingField | AgeSource::SerialDecoder => (false, DECODED_CONFIDENCE),
    };
    AgeEstimate {
        age: Some((reference_year - year) as u32),
        manufacturing_year: Some(year),
        estimated,
        confidence,
        source: Some(source),
    }
}

fn year_from_manufacturing(text: &str) -> Option<i32> {
    manufacturing_year_pattern()
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
}

/// First plausible year inside the serial that is not in the future
fn scan_serial_year(serial: &str, reference_year: i32) -> Option<i32> {
    serial_year_pattern()
        .find_iter(serial)
        .filter_map(|m| m.as_str().parse::<i32>().ok())
        .find(|year| *year <= reference_year)
}

/// Two decimal digits at `offset` as a number
fn two_digits(serial: &str, offset: usize) -> Option<i32> {
    let bytes = serial.as_bytes();
    let tens = (*bytes.get(offset)? as char).to_digit(10)?;
    let ones = (*bytes.get(offset + 1)? as char).to_digit(10)?;
    Some((tens * 10 + ones) as i32)
}

/// Brand-specific decoding of the manufacturing year from a serial
pub fn decode_serial_year(serial: &str, brand: Option<&str>) -> Option<i32> {
    let serial = serial.trim();
    match brand?.trim().to_ascii_lowercase().as_str() {
        // Leading decade and year digits
        "carrier" | "trane" => {
            let yy = two_digits(serial, 0)?;
            Some(if yy < 40 { 2000 + yy } else { 1900 + yy })
        }
        // Year in positions 3-4
        "generac" => {
            let yy = two_digits(serial, 2)?;
            Some(if yy > 80 { 1900 + yy } else { 2000 + yy })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(brand: Option<&str>, serial: Option<&str>, manufacturing: Option<&str>) -> EquipmentDescriptor {
        EquipmentDescriptor {
            brand: brand.map(String::from),
            model: None,
            serial: serial.map(String::from),
            equipment_type: Some("furnace".to_string()),
            manufacturing: manufacturing.map(String::from),
        }
    }

    #[test]
    fn test_manufacturing_field_wins() {
        let d = descriptor(Some("carrier"), Some("09ABC"), Some("Mfg date: March 2015"));
        let est = resolve_age(&d, 2026);
        assert_eq!(est.age, Some(11));
        assert_eq!(est.manufacturing_year, Some(2015));
        assert_eq!(est.source, Some(AgeSource::ManufacturingField));
        assert_eq!(est.confidence, 85);
        assert!(!est.estimated);
    }

    #[test]
    fn test_carrier_serial_decoding() {
        let d = descriptor(Some("Carrier"), Some("15ABCDEF"), None);
        let est = resolve_age(&d, 2026);
        assert_eq!(est.manufacturing_year, Some(2015));
        assert_eq!(est.source, Some(AgeSource::SerialDecoder));

        assert_eq!(decode_serial_year("87XYZ", Some("trane")), Some(1987));
    }

    #[test]
    fn test_generac_serial_decoding() {
        assert_eq!(decode_serial_year("AB19123", Some("generac")), Some(2019));
        assert_eq!(decode_serial_year("AB95123", Some("GENERAC")), Some(1995));
        assert_eq!(decode_serial_year("AB", Some("generac")), None);
    }

    #[test]
    fn test_non_digit_serial_does_not_decode() {
        assert_eq!(decode_serial_year("XY1234", Some("carrier")), None);
        assert_eq!(decode_serial_year("1234", None), None);
        assert_eq!(decode_serial_year("1234", Some("lennox")), None);
    }

    #[test]
    fn test_generic_serial_scan_fallback() {
        let d = descriptor(Some("lennox"), Some("LX-2009-44871"), None);
        let est = resolve_age(&d, 2026);
        assert_eq!(est.manufacturing_year, Some(2009));
        assert_eq!(est.source, Some(AgeSource::SerialScan));
        assert!(est.estimated);
        assert_eq!(est.confidence, 60);
    }

    #[test]
    fn test_future_years_are_rejected() {
        // Decoder yields 2039, scan finds 2012
        let d = descriptor(Some("carrier"), Some("39X2012"), Some("built 2031"));
        let est = resolve_age(&d, 2026);
        assert_eq!(est.manufacturing_year, Some(2012));
        assert_eq!(est.source, Some(AgeSource::SerialScan));

        let only_future = descriptor(None, None, Some("2099"));
        assert_eq!(resolve_age(&only_future, 2026).age, None);
    }

    #[test]
    fn test_unknown_when_no_data() {
        let est = resolve_age(&EquipmentDescriptor::of_type("furnace"), 2026);
        assert_eq!(est, AgeEstimate::unknown());
        assert_eq!(est.confidence, 0);
    }

    #[test]
    fn test_current_year_is_age_zero() {
        let d = descriptor(None, None, Some("2026"));
        assert_eq!(resolve_age(&d, 2026).age, Some(0));
    }
}

//! Pure view computations: filtering, map framing, markers and table rows.

use std::collections::BTreeSet;

use crate::features::dashboard::dtos::{MapCenterDto, MapMarkerDto, TrainerRowDto};
use crate::features::trainers::models::EnrichedRecord;
use crate::shared::constants::{
    ALL_REGIONS, NATIONAL_CENTER_LAT, NATIONAL_CENTER_LON, NATIONAL_ZOOM, REGION_ZOOM,
};

/// "All" followed by the distinct regions present, sorted
pub fn region_options(records: &[EnrichedRecord]) -> Vec<String> {
    let regions: BTreeSet<&str> = records.iter().map(|r| r.region.as_str()).collect();

    std::iter::once(ALL_REGIONS)
        .chain(regions)
        .map(str::to_string)
        .collect()
}

pub fn filter_by_region<'a>(records: &'a [EnrichedRecord], region: &str) -> Vec<&'a EnrichedRecord> {
    if region == ALL_REGIONS {
        return records.iter().collect();
    }
    records.iter().filter(|r| r.region == region).collect()
}

/// Mean of the coordinates, or the national center for an empty set
pub fn map_center(records: &[&EnrichedRecord]) -> MapCenterDto {
    if records.is_empty() {
        return MapCenterDto {
            lat: NATIONAL_CENTER_LAT,
            lon: NATIONAL_CENTER_LON,
        };
    }

    let n = records.len() as f64;
    MapCenterDto {
        lat: records.iter().map(|r| r.latitude).sum::<f64>() / n,
        lon: records.iter().map(|r| r.longitude).sum::<f64>() / n,
    }
}

pub fn zoom_level(region: &str) -> u8 {
    if region == ALL_REGIONS {
        NATIONAL_ZOOM
    } else {
        REGION_ZOOM
    }
}

pub fn marker_label(record: &EnrichedRecord) -> String {
    format!(
        "{}\n📞 {}\n🕒 {}\n📍 {}",
        record.name, record.phone, record.timestamp, record.region
    )
}

pub fn marker(record: &EnrichedRecord) -> MapMarkerDto {
    MapMarkerDto {
        lat: record.latitude,
        lon: record.longitude,
        name: record.name.clone(),
        phone: record.phone.clone(),
        timestamp: record.timestamp.clone(),
        region: record.region.clone(),
        label: marker_label(record),
    }
}

pub fn table_row(record: &EnrichedRecord) -> TrainerRowDto {
    TrainerRowDto {
        name: record.name.clone(),
        phone: record.phone.clone(),
        latitude: record.latitude,
        longitude: record.longitude,
        timestamp: record.timestamp.clone(),
        region: record.region.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::constants::UNKNOWN_REGION;

    fn record(phone: &str, lat: f64, lon: f64, region: &str) -> EnrichedRecord {
        EnrichedRecord {
            phone: phone.to_string(),
            name: format!("Trainer {}", phone),
            latitude: lat,
            longitude: lon,
            timestamp: "t".to_string(),
            region: region.to_string(),
        }
    }

    fn sample() -> Vec<EnrichedRecord> {
        vec![
            record("1", 28.6, 77.2, "Delhi"),
            record("2", 19.0, 72.8, "Maharashtra"),
            record("3", 18.5, 73.8, "Maharashtra"),
            record("4", 10.0, 76.0, UNKNOWN_REGION),
        ]
    }

    #[test]
    fn test_region_options() {
        assert_eq!(
            region_options(&sample()),
            vec!["All", "Delhi", "Maharashtra", "Unknown"]
        );
        assert_eq!(region_options(&[]), vec!["All"]);
    }

    #[test]
    fn test_filter_by_region() {
        let records = sample();
        assert_eq!(filter_by_region(&records, "All").len(), 4);

        let phones: Vec<_> = filter_by_region(&records, "Maharashtra")
            .iter()
            .map(|r| r.phone.as_str())
            .collect();
        assert_eq!(phones, vec!["2", "3"]);

        assert_eq!(filter_by_region(&records, UNKNOWN_REGION).len(), 1);
        assert!(filter_by_region(&records, "Goa").is_empty());
    }

    #[test]
    fn test_map_center_of_empty_set_is_national() {
        let center = map_center(&[]);
        assert_eq!(center.lat, NATIONAL_CENTER_LAT);
        assert_eq!(center.lon, NATIONAL_CENTER_LON);
    }

    #[test]
    fn test_map_center_is_mean() {
        let records = sample();
        let subset = filter_by_region(&records, "Maharashtra");
        let center = map_center(&subset);
        assert!((center.lat - 18.75).abs() < 1e-9);
        assert!((center.lon - 73.3).abs() < 1e-9);

        let all = filter_by_region(&records, "All");
        let center = map_center(&all);
        assert!((center.lat - (28.6 + 19.0 + 18.5 + 10.0) / 4.0).abs() < 1e-9);
        assert!((center.lon - (77.2 + 72.8 + 73.8 + 76.0) / 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_all_zooms_out_further_than_any_region() {
        for region in ["Delhi", "Maharashtra", UNKNOWN_REGION, "Nowhere"] {
            assert!(zoom_level(ALL_REGIONS) < zoom_level(region));
        }
    }

    #[test]
    fn test_marker_label_lists_fields() {
        let label = marker_label(&record("9999999999", 28.6, 77.2, "Delhi"));
        assert_eq!(label, "Trainer 9999999999\n📞 9999999999\n🕒 t\n📍 Delhi");
    }
}

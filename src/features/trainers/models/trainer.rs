use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A trainer document exactly as stored in the realtime database.
///
/// Every field is optional on the wire; coordinates may be numbers or numeric
/// strings depending on the client app version that wrote them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTrainerRecord {
    #[serde(default)]
    pub latitude: Option<Value>,
    #[serde(default)]
    pub longitude: Option<Value>,
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub timestamp: Option<Value>,
}

/// A trainer with usable coordinates, keyed by phone number
#[derive(Debug, Clone, PartialEq)]
pub struct TrainerRecord {
    pub phone: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: String,
}

/// A trainer record with its resolved state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedRecord {
    pub phone: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: String,
    pub region: String,
}

/// Interpret a coordinate value; missing, zero, blank or unparseable is `None`
fn coordinate(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    (parsed.is_finite() && parsed != 0.0).then_some(parsed)
}

fn display_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

impl RawTrainerRecord {
    /// Validate into a [`TrainerRecord`], dropping records without coordinates
    pub fn into_record(self, phone: &str) -> Option<TrainerRecord> {
        let latitude = coordinate(self.latitude.as_ref())?;
        let longitude = coordinate(self.longitude.as_ref())?;

        Some(TrainerRecord {
            phone: phone.to_string(),
            name: display_text(self.name.as_ref()).unwrap_or_else(|| "Unknown".to_string()),
            latitude,
            longitude,
            timestamp: display_text(self.timestamp.as_ref()).unwrap_or_default(),
        })
    }
}

impl TrainerRecord {
    pub fn with_region(self, region: String) -> EnrichedRecord {
        EnrichedRecord {
            phone: self.phone,
            name: self.name,
            latitude: self.latitude,
            longitude: self.longitude,
            timestamp: self.timestamp,
            region,
        }
    }
}

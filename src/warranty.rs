/// Warranty lookup and decoding
///
/// `fetch_warranty` returns the raw response; `decode_warranty` is the
/// one place its shape is checked. A response missing any of the keys
/// below is rejected as a whole rather than partially exported:
///
/// - `data.machineInfo` with its nine detail fields
/// - `data.baseWarranties` and `data.upgradeWarranties` (array or null)
/// - `data.currentWarranty` (optional)
use crate::api::{self, Endpoints, Transport};
use crate::cell::{Cell, is_truthy};
use crate::error::{Error, Result};
use crate::types::{MachineInfo, WarrantyRecord, WarrantyReport};
use log::debug;
use serde_json::{Map, Value, json};

/// Country and language sent with the warranty lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    pub country: String,
    pub language: String,
}

impl Default for Locale {
    fn default() -> Self {
        Locale { country: "us".to_string(), language: "en".to_string() }
    }
}

pub fn warranty_payload(serial: &str, machine_type: &str, locale: &Locale) -> Value {
    json!({
        "serialNumber": serial,
        "machineType": machine_type,
        "country": locale.country,
        "language": locale.language,
    })
}

/// Fetch the raw warranty response for a serial number and machine type
pub fn fetch_warranty(
    transport: &dyn Transport,
    endpoints: &Endpoints,
    serial: &str,
    machine_type: &str,
    locale: &Locale,
) -> Result<Value> {
    debug!("fetching warranty for {} (type {})", serial, machine_type);
    let payload = warranty_payload(serial, machine_type, locale);
    let body = transport.post_json(&endpoints.warranty, &payload)?;
    api::decode_body(&endpoints.warranty, &body)
}

/// Decode a raw warranty response into a `WarrantyReport`
pub fn decode_warranty(response: &Value) -> Result<WarrantyReport> {
    let data = object_at(response, "data", "data")?;
    let machine = decode_machine_info(data)?;

    let base = decode_warranty_list(data, "baseWarranties")?;
    let upgrades = decode_warranty_list(data, "upgradeWarranties")?;
    let current = match data.get("currentWarranty") {
        None | Some(Value::Null) => None,
        Some(Value::Object(entry)) => Some(decode_record(entry)),
        Some(_) => return Err(Error::Shape("data.currentWarranty".to_string())),
    };

    debug!(
        "decoded {} base, {} upgrade and {} current warranties",
        base.len(),
        upgrades.len(),
        current.iter().count()
    );

    Ok(WarrantyReport { machine, base, upgrades, current })
}

fn object_at<'a>(parent: &'a Value, key: &str, path: &str) -> Result<&'a Map<String, Value>> {
    parent.get(key).and_then(Value::as_object).ok_or_else(|| Error::Shape(path.to_string()))
}

fn decode_machine_info(data: &Map<String, Value>) -> Result<MachineInfo> {
    let info = data
        .get("machineInfo")
        .and_then(Value::as_object)
        .ok_or_else(|| Error::Shape("data.machineInfo".to_string()))?;

    let required = |key: &str| -> Result<Cell> {
        info.get(key).map(Cell::from_json).ok_or_else(|| Error::Shape(format!("data.machineInfo.{}", key)))
    };

    Ok(MachineInfo {
        serial: required("serial")?,
        model: required("model")?,
        product_name: required("productName")?,
        build_date: required("buildDate")?,
        ship_to_country: required("shipToCountry")?,
        status: required("status")?,
        brand: required("brand")?,
        series: required("series")?,
        product_image: required("productImage")?,
        warranty_status: Cell::from_field(data.get("warrantyStatus")),
        out_of_warranty: is_truthy(data.get("oow")),
    })
}

fn decode_warranty_list(data: &Map<String, Value>, key: &str) -> Result<Vec<WarrantyRecord>> {
    match data.get(key) {
        Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(entries)) => entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                entry.as_object().map(decode_record).ok_or_else(|| Error::Shape(format!("data.{}[{}]", key, i)))
            })
            .collect(),
        _ => Err(Error::Shape(format!("data.{}", key))),
    }
}

fn decode_record(entry: &Map<String, Value>) -> WarrantyRecord {
    let field = |key: &str| Cell::from_field(entry.get(key));
    WarrantyRecord {
        name: field("name"),
        kind: field("type"),
        description: field("description"),
        duration: field("duration"),
        start_date: field("startDate"),
        end_date: field("endDate"),
        delivery_type_name: field("deliveryTypeName"),
        level: field("level"),
    }
}

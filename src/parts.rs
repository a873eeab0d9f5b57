/// Parts lookup
///
/// Parts come from two endpoints: the parts catalogued for the model,
/// and the "as-built" parts recorded for this exact unit. Both are
/// queried with the same payload and concatenated model-first.
use crate::api::{self, Endpoints, Transport};
use crate::cell::Cell;
use crate::error::Result;
use crate::types::PartRecord;
use log::{debug, warn};
use serde_json::{Value, json};
use std::collections::HashSet;

const PARTS_CHANNEL: &str = "ESUPPORT_PARTS";

pub fn parts_payload(serial: &str, machine_type: &str) -> Value {
    json!({
        "serialId": serial,
        "mtId": machine_type,
        "couponNumber": null,
        "source": null,
        "channel": PARTS_CHANNEL,
        "partFot": false,
        "firstGenCPU": false,
        "fetchProcessor": false,
    })
}

/// Fetch model parts followed by as-built parts, without deduplication
pub fn fetch_parts(
    transport: &dyn Transport,
    endpoints: &Endpoints,
    serial: &str,
    machine_type: &str,
) -> Result<Vec<Value>> {
    let payload = parts_payload(serial, machine_type);

    let mut parts = fetch_part_list(transport, &endpoints.parts_model, &payload)?;
    let as_built = fetch_part_list(transport, &endpoints.parts_as_built, &payload)?;
    debug!("fetched {} model parts and {} as-built parts", parts.len(), as_built.len());

    parts.extend(as_built);
    Ok(parts)
}

fn fetch_part_list(transport: &dyn Transport, url: &str, payload: &Value) -> Result<Vec<Value>> {
    let body = transport.post_json(url, payload)?;
    let response = api::decode_body(url, &body)?;
    Ok(part_list(response))
}

/// The `data` array of a parts response; anything else counts as no parts
fn part_list(response: Value) -> Vec<Value> {
    match response {
        Value::Object(mut fields) => match fields.remove("data") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Flatten and deduplicate parts by id, keeping the first occurrence
pub fn unique_parts(items: &[Value]) -> Vec<PartRecord> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();

    for item in items {
        let Some(fields) = item.as_object() else {
            warn!("skipping part entry that is not an object: {}", item);
            continue;
        };

        // Keyed on the raw JSON so 5 and "5" stay distinct
        let key = fields.get("id").unwrap_or(&Value::Null).to_string();
        if !seen.insert(key) {
            continue;
        }

        unique.push(PartRecord {
            id: Cell::from_field(fields.get("id")),
            name: Cell::from_field(fields.get("name")),
            substitutes: Cell::from_field(fields.get("substitutes")),
            commodity: Cell::from_field(fields.get("commodityVal")),
            image_urls: Cell::from_field(fields.get("imageUrls")),
        });
    }

    unique
}

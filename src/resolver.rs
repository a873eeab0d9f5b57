/// Machine type resolution
///
/// The product lookup returns a free-text product name such as
/// "ThinkPad T14 Gen 1 Type 20S0 - Intel". The machine type number is the
/// last "Type <token>" in that text.
use crate::api::{self, Endpoints, Transport};
use crate::error::{Error, Result};
use crate::types::MachineTypeInfo;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    static ref TYPE_PATTERN: Regex = Regex::new(r"Type (\w+)").expect("valid type pattern");
}

const TYPE_NAME_DELIMITER: &str = " - ";

/// Look up the machine type for a serial number
pub fn resolve_type(transport: &dyn Transport, endpoints: &Endpoints, serial: &str) -> Result<MachineTypeInfo> {
    debug!("resolving machine type for {}", serial);
    let body = transport.get(&endpoints.products, &[("productId", serial)])?;
    let response = api::decode_body(&endpoints.products, &body)?;
    let info = parse_type_lookup(serial, &response)?;
    debug!(
        "{}: product {:?} (name {:?}) has type {:?}",
        info.serial_number, info.full_type, info.type_name, info.type_number
    );
    Ok(info)
}

/// Extract `MachineTypeInfo` from a decoded product lookup response
///
/// Accepts a non-empty array (first element used) or a single object.
pub fn parse_type_lookup(serial: &str, response: &Value) -> Result<MachineTypeInfo> {
    let product = match response {
        Value::Array(items) => match items.first() {
            Some(first @ Value::Object(_)) => first,
            Some(other) => return Err(Error::Format(format!("first product is not an object: {}", other))),
            None => return Err(Error::Format("empty product list".to_string())),
        },
        Value::Object(_) => response,
        other => return Err(Error::Format(other.to_string())),
    };

    let full_type = match product.get("Name") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(name)) => name.clone(),
        Some(other) => return Err(Error::Format(format!("product Name is not a string: {}", other))),
    };

    Ok(MachineTypeInfo {
        serial_number: serial.to_string(),
        type_number: extract_type_number(&full_type),
        type_name: extract_type_name(&full_type),
        full_type,
    })
}

/// Last "Type <token>" match; later mentions override earlier ones
pub fn extract_type_number(text: &str) -> Option<String> {
    TYPE_PATTERN.captures_iter(text).last().map(|caps| caps[1].to_string())
}

pub fn extract_type_name(text: &str) -> Option<String> {
    text.split_once(TYPE_NAME_DELIMITER).map(|(name, _)| name.to_string())
}

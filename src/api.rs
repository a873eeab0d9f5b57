/// API module for talking to the vendor support site
///
/// This module provides the HTTP transport seam used by the lookup
/// steps, the endpoint table, and the single JSON decode point for
/// response bodies.
use crate::error::{Error, Result};
use log::{debug, warn};
use serde_json::Value;
use std::io::Read;

/// The support site rejects requests without a browser-like agent
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

pub const DEFAULT_API_BASE: &str = "https://pcsupport.lenovo.com/us/en/api/v4";

/// Resolved endpoint URLs for one API root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub products: String,
    pub warranty: String,
    pub parts_model: String,
    pub parts_as_built: String,
}

impl Endpoints {
    pub fn new(api_base: &str) -> Self {
        let base = api_base.trim_end_matches('/');
        Endpoints {
            products: format!("{}/mse/getproducts", base),
            warranty: format!("{}/upsell/redport/getIbaseInfo", base),
            parts_model: format!("{}/upsellAggregation/parts/model", base),
            parts_as_built: format!("{}/upsellAggregation/parts/asBuilt", base),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Endpoints::new(DEFAULT_API_BASE)
    }
}

/// Blocking request/response transport. Returns the raw response body.
pub trait Transport {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String>;

    fn post_json(&self, url: &str, body: &Value) -> Result<String>;
}

/// `Transport` over a shared `ureq` agent with transport-default timeouts
pub struct HttpTransport {
    agent: ureq::Agent,
}

impl HttpTransport {
    pub fn new() -> Self {
        HttpTransport { agent: ureq::AgentBuilder::new().user_agent(USER_AGENT).build() }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String> {
        debug!("GET {} {:?}", url, query);
        let mut request = self.agent.get(url);
        for (key, value) in query {
            request = request.query(key, value);
        }
        response_body(url, request.call())
    }

    fn post_json(&self, url: &str, body: &Value) -> Result<String> {
        debug!("POST {} {}", url, body);
        let result = self
            .agent
            .post(url)
            .set("accept", "application/json, text/plain, */*")
            .set("content-type", "application/json")
            .send_string(&body.to_string());
        response_body(url, result)
    }
}

/// Body of a finished exchange.
///
/// The site reports failures inside JSON envelopes, so an error status
/// only logs a warning and its body is still returned for decoding.
/// Only transport failures are errors here.
fn response_body(url: &str, result: std::result::Result<ureq::Response, ureq::Error>) -> Result<String> {
    match result {
        Ok(response) => read_body(url, response),
        Err(ureq::Error::Status(code, response)) => {
            warn!("{} answered HTTP {} {}", url, code, response.status_text());
            read_body(url, response)
        }
        Err(ureq::Error::Transport(transport)) => {
            Err(Error::Http { url: url.to_string(), message: transport.to_string() })
        }
    }
}

fn read_body(url: &str, response: ureq::Response) -> Result<String> {
    let mut body = String::new();
    response
        .into_reader()
        .read_to_string(&mut body)
        .map_err(|e| Error::Http { url: url.to_string(), message: e.to_string() })?;
    Ok(body)
}

/// Parse a response body as JSON
pub fn decode_body(url: &str, body: &str) -> Result<Value> {
    serde_json::from_str(body).map_err(|source| Error::Decode { url: url.to_string(), source })
}

#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use rental_scout::config::SearchConfig;
use rental_scout::providers::{RentalApi, SearchPayload};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// What the fake upstream answers for one branch
#[derive(Clone)]
pub enum Reply {
    Body(String),
    Fail(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Start,
    End,
}

#[derive(Debug, Clone)]
pub struct CallEvent {
    pub branch_id: String,
    pub phase: Phase,
    pub at: Instant,
}

/// In-memory upstream that records every search call
pub struct FakeRentalApi {
    catalog: Option<String>,
    replies: HashMap<String, Reply>,
    latency: Duration,
    pub events: Mutex<Vec<CallEvent>>,
    pub payloads: Mutex<Vec<SearchPayload>>,
    pub catalog_calls: AtomicUsize,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl FakeRentalApi {
    pub fn new(catalog: String) -> Self {
        Self {
            catalog: Some(catalog),
            replies: HashMap::new(),
            latency: Duration::from_millis(10),
            events: Mutex::new(Vec::new()),
            payloads: Mutex::new(Vec::new()),
            catalog_calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Upstream whose catalog endpoint is down
    pub fn without_catalog() -> Self {
        Self {
            catalog: None,
            ..Self::new(String::new())
        }
    }

    pub fn reply(mut self, branch_id: &str, reply: Reply) -> Self {
        self.replies.insert(branch_id.to_string(), reply);
        self
    }

    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn search_calls(&self) -> usize {
        self.payloads.lock().unwrap().len()
    }

    pub fn events(&self) -> Vec<CallEvent> {
        self.events.lock().unwrap().clone()
    }

    fn record(&self, branch_id: &str, phase: Phase) {
        self.events.lock().unwrap().push(CallEvent {
            branch_id: branch_id.to_string(),
            phase,
            at: Instant::now(),
        });
    }
}

#[async_trait]
impl RentalApi for FakeRentalApi {
    async fn fetch_branch_catalog(&self) -> Result<String> {
        self.catalog_calls.fetch_add(1, Ordering::SeqCst);
        match &self.catalog {
            Some(body) => Ok(body.clone()),
            None => anyhow::bail!("Branch catalog failed with status 503 Service Unavailable"),
        }
    }

    async fn search_branch(&self, payload: &SearchPayload) -> Result<String> {
        self.payloads.lock().unwrap().push(payload.clone());
        self.record(&payload.branch_id, Phase::Start);

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        tokio::time::sleep(self.latency).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.record(&payload.branch_id, Phase::End);

        match self.replies.get(&payload.branch_id) {
            Some(Reply::Body(body)) => Ok(body.clone()),
            Some(Reply::Fail(message)) => anyhow::bail!("{}", message),
            None => Ok(vehicles_body(&[])),
        }
    }

    fn source_name(&self) -> &'static str {
        "Fake"
    }
}

/// `(city_slug, reference_id, location_id, name)` entries as a catalog body
pub fn catalog_json(entries: &[(&str, &str, &str, &str)]) -> String {
    let data: Vec<Value> = entries
        .iter()
        .map(|(city, reference, location, name)| {
            json!({ "citySlug": city, "referenceId": reference, "id": location, "name": name })
        })
        .collect();
    json!({ "success": true, "data": data }).to_string()
}

/// Catalog with `count` branches in `city`, reference ids `{city}-0..count`
pub fn city_branches(city: &str, count: usize) -> Vec<(String, String, String, String)> {
    (0..count)
        .map(|i| {
            (
                city.to_string(),
                format!("{city}-{i}"),
                format!("{city}-loc-{i}"),
                format!("{city} branch {i}"),
            )
        })
        .collect()
}

pub fn catalog_of(branches: &[(String, String, String, String)]) -> String {
    let borrowed: Vec<(&str, &str, &str, &str)> = branches
        .iter()
        .map(|(c, r, l, n)| (c.as_str(), r.as_str(), l.as_str(), n.as_str()))
        .collect();
    catalog_json(&borrowed)
}

/// Search response with one vehicle per `(description, pay-now price)`
pub fn vehicles_body(vehicles: &[(&str, Option<f64>)]) -> String {
    let vehicles: Vec<Value> = vehicles
        .iter()
        .map(|(description, price)| {
            json!({
                "vehicleInfo": {
                    "vehicleDescription": description,
                    "fuelType": 1,
                    "transmissionType": 2,
                    "segment": 1,
                    "image": null
                },
                "priceInfo": {
                    "discountedPrice": price,
                    "discountedPriceStr": price.map(|p| format!("{:.2} TL", p)).unwrap_or_default(),
                    "netPrice": price.map(|p| p * 1.1),
                    "netPriceStr": "—",
                    "dailyPrice": null,
                    "dailyPriceStr": "N/A"
                }
            })
        })
        .collect();
    json!({ "data": { "vehicles": vehicles } }).to_string()
}

pub fn upstream_error_body(message: &str) -> String {
    json!({ "success": false, "error": { "message": message } }).to_string()
}

/// Default fan-out policy with a short pause so tests stay fast
pub fn fast_config() -> SearchConfig {
    SearchConfig {
        batch_delay: Duration::from_millis(30),
        ..SearchConfig::default()
    }
}

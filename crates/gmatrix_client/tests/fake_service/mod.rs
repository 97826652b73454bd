use std::sync::Mutex;

use gmatrix_client::{
    distance_matrix_client::{DistanceMatrixClient, DistanceMatrixClientParams},
    transport::{HttpResponse, HttpTransport, TransportError},
};
use serde_json::json;
use url::Url;

pub const FAKE_MATRIX_URL: &str = "https://matrix.test/maps/api/distancematrix/json";

/// In-memory distance matrix api.
///
/// Every element's distance text is `"<origin>-><destination>"` so tests can
/// check the position of each pair after merging.
#[derive(Default)]
pub struct FakeMatrixService {
    pub requests: Mutex<Vec<Url>>,
    /// Answers 403 to any request containing this origin
    pub reject_origin: Option<String>,
    /// Answers OVER_QUERY_LIMIT to any request containing this origin
    pub degraded_origin: Option<String>,
}

impl FakeMatrixService {
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requested_origins(&self) -> Vec<Vec<String>> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|url| split_param(url, "origins"))
            .collect()
    }

    pub fn max_request_length(&self) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|url| format!("{}?{}", url.path(), url.query().unwrap_or_default()).len())
            .max()
            .unwrap_or_default()
    }

    fn answer(&self, url: &Url) -> HttpResponse {
        let origins = split_param(url, "origins");
        let destinations = split_param(url, "destinations");

        if let Some(rejected) = &self.reject_origin {
            if origins.contains(rejected) {
                return HttpResponse {
                    status: 403,
                    body: "Forbidden".to_string(),
                };
            }
        }

        let status = match &self.degraded_origin {
            Some(degraded) if origins.contains(degraded) => "OVER_QUERY_LIMIT",
            _ => "OK",
        };

        let rows: Vec<_> = origins
            .iter()
            .map(|origin| {
                let elements: Vec<_> = destinations
                    .iter()
                    .map(|destination| {
                        json!({
                            "status": "OK",
                            "distance": { "text": format!("{origin}->{destination}"), "value": origin.len() * 1000 + destination.len() },
                            "duration": { "text": "1 min", "value": 60 },
                        })
                    })
                    .collect();
                json!({ "elements": elements })
            })
            .collect();

        let body = json!({
            "status": status,
            "origin_addresses": origins,
            "destination_addresses": destinations,
            "rows": rows,
        });

        HttpResponse {
            status: 200,
            body: body.to_string(),
        }
    }
}

impl HttpTransport for FakeMatrixService {
    async fn get(&self, url: Url) -> Result<HttpResponse, TransportError> {
        let response = self.answer(&url);
        self.requests.lock().unwrap().push(url);
        Ok(response)
    }
}

fn split_param(url: &Url, name: &str) -> Vec<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.split('|').map(str::to_string).collect())
        .unwrap_or_default()
}

pub const CLIENT_ID: &str = "clientID";
pub const SECRET_KEY: &str = "vNIXE0xscrmjlyV-12Nj_BvUPaw=";

pub fn create_client(
    service: FakeMatrixService,
    max_request_length: usize,
) -> DistanceMatrixClient<FakeMatrixService> {
    DistanceMatrixClient::with_transport(
        DistanceMatrixClientParams {
            matrix_url: Some(FAKE_MATRIX_URL.to_string()),
            max_request_length,
            ..Default::default()
        },
        service,
    )
    .unwrap()
}

pub fn create_signing_client(
    service: FakeMatrixService,
    max_request_length: usize,
) -> DistanceMatrixClient<FakeMatrixService> {
    DistanceMatrixClient::with_transport(
        DistanceMatrixClientParams {
            matrix_url: Some(FAKE_MATRIX_URL.to_string()),
            client_id: Some(CLIENT_ID.to_string()),
            secret_key: Some(SECRET_KEY.to_string()),
            max_request_length,
        },
        service,
    )
    .unwrap()
}

pub fn locations(prefix: &str, count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("{prefix}{i}")).collect()
}

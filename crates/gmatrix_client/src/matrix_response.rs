use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{error::DistanceMatrixError, travel_matrices::TravelMatrices};

/// Top level status of a matrix response.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatrixStatus {
    Ok,
    InvalidRequest,
    MaxElementsExceeded,
    MaxDimensionsExceeded,
    OverDailyLimit,
    OverQueryLimit,
    RequestDenied,
    UnknownError,
    #[serde(other)]
    Unknown,
}

/// Status of a single origin/destination pair.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ElementStatus {
    Ok,
    NotFound,
    ZeroResults,
    MaxRouteLengthExceeded,
    #[serde(other)]
    Unknown,
}

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct TextValue {
    pub text: String,
    /// Meters for distances, seconds for durations
    pub value: f64,
}

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct Fare {
    pub currency: String,
    pub value: f64,
    pub text: String,
}

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct Element {
    pub status: ElementStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<TextValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<TextValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_in_traffic: Option<TextValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fare: Option<Fare>,
}

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, PartialEq, Default)]
pub struct Row {
    pub elements: Vec<Element>,
}

/// Decoded distance matrix, possibly stitched together from several requests.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct MatrixResponse {
    pub status: MatrixStatus,

    #[serde(default)]
    pub origin_addresses: Vec<String>,

    #[serde(default)]
    pub destination_addresses: Vec<String>,

    #[serde(default)]
    pub rows: Vec<Row>,

    /// Statuses of every sub-request after the first one, in request order.
    /// Only present when the response was merged from split requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statuses: Option<Vec<MatrixStatus>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl MatrixResponse {
    pub fn element(&self, origin: usize, destination: usize) -> Option<&Element> {
        self.rows.get(origin)?.elements.get(destination)
    }

    /// One row per origin address and one element per destination address in every row.
    pub fn is_consistent(&self) -> bool {
        self.rows.len() == self.origin_addresses.len()
            && self
                .rows
                .iter()
                .all(|row| row.elements.len() == self.destination_addresses.len())
    }

    /// True when this response and every merged sub-response reported OK.
    pub fn all_ok(&self) -> bool {
        self.status == MatrixStatus::Ok
            && self
                .statuses
                .as_ref()
                .is_none_or(|statuses| statuses.iter().all(|s| *s == MatrixStatus::Ok))
    }

    pub fn travel_matrices(&self) -> TravelMatrices {
        let capacity = self.rows.len() * self.destination_addresses.len();
        let mut distances = Vec::with_capacity(capacity);
        let mut times = Vec::with_capacity(capacity);

        for element in self.rows.iter().flat_map(|row| &row.elements) {
            distances.push(element.distance.as_ref().map_or(f64::INFINITY, |d| d.value));
            times.push(element.duration.as_ref().map_or(f64::INFINITY, |d| d.value));
        }

        TravelMatrices { distances, times }
    }

    /// Appends the rows of a response fetched for the following origins.
    pub(crate) fn merge_origins(mut self, bottom: MatrixResponse) -> MatrixResponse {
        self.rows.extend(bottom.rows);
        self.origin_addresses.extend(bottom.origin_addresses);
        self.push_statuses(bottom.status, bottom.statuses);
        self
    }

    /// Appends, row by row, the elements of a response fetched for the
    /// following destinations.
    pub(crate) fn merge_destinations(
        mut self,
        right: MatrixResponse,
    ) -> Result<MatrixResponse, DistanceMatrixError> {
        if self.rows.len() != right.rows.len() {
            return Err(DistanceMatrixError::InconsistentRows {
                left: self.rows.len(),
                right: right.rows.len(),
            });
        }

        for (row, right_row) in self.rows.iter_mut().zip(right.rows) {
            row.elements.extend(right_row.elements);
        }
        self.destination_addresses
            .extend(right.destination_addresses);
        self.push_statuses(right.status, right.statuses);

        Ok(self)
    }

    fn push_statuses(&mut self, status: MatrixStatus, statuses: Option<Vec<MatrixStatus>>) {
        let merged = self.statuses.get_or_insert_with(Vec::new);
        merged.push(status);
        merged.extend(statuses.into_iter().flatten());
    }
}

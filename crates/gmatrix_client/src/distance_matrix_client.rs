use futures::future::BoxFuture;
use tracing::{debug, warn};
use url::Url;

use crate::{
    error::{ConfigError, DistanceMatrixError},
    matrix_request::{Locations, MatrixOptions},
    matrix_response::MatrixResponse,
    transport::{HttpTransport, ReqwestTransport},
    url_signer::UrlSigner,
};

pub const DISTANCE_MATRIX_API_URL: &str =
    "https://maps.googleapis.com/maps/api/distancematrix/json";

/// Longest `path?query` the api reliably accepts.
pub const MAX_REQUEST_LENGTH: usize = 1900;

const MATRIX_URL_ENV_VAR: &str = "GMATRIX_MATRIX_URL";
const CLIENT_ID_ENV_VAR: &str = "GMATRIX_CLIENT_ID";
const SECRET_KEY_ENV_VAR: &str = "GMATRIX_SECRET_KEY";
const MAX_REQUEST_LENGTH_ENV_VAR: &str = "GMATRIX_MAX_REQUEST_LENGTH";

#[derive(Debug, Clone)]
pub struct DistanceMatrixClientParams {
    pub matrix_url: Option<String>,
    pub client_id: Option<String>,
    pub secret_key: Option<String>,
    pub max_request_length: usize,
}

impl Default for DistanceMatrixClientParams {
    fn default() -> Self {
        Self {
            matrix_url: None,
            client_id: None,
            secret_key: None,
            max_request_length: MAX_REQUEST_LENGTH,
        }
    }
}

impl DistanceMatrixClientParams {
    /// Reads the `GMATRIX_*` environment variables, empty values count as unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let max_request_length = match env_var(MAX_REQUEST_LENGTH_ENV_VAR) {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidLength(value))?,
            None => MAX_REQUEST_LENGTH,
        };

        Ok(Self {
            matrix_url: env_var(MATRIX_URL_ENV_VAR),
            client_id: env_var(CLIENT_ID_ENV_VAR),
            secret_key: env_var(SECRET_KEY_ENV_VAR),
            max_request_length,
        })
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

/// One slice of the full query, borrowed from the caller's lists.
#[derive(Clone, Copy)]
struct SubQuery<'a> {
    origins: &'a [String],
    destinations: &'a [String],
    options: &'a MatrixOptions,
}

impl<'a> SubQuery<'a> {
    fn with_origins(self, origins: &'a [String]) -> Self {
        Self { origins, ..self }
    }

    fn with_destinations(self, destinations: &'a [String]) -> Self {
        Self {
            destinations,
            ..self
        }
    }
}

pub struct DistanceMatrixClient<T = ReqwestTransport> {
    matrix_url: Url,
    signer: Option<UrlSigner>,
    max_request_length: usize,
    transport: T,
}

impl DistanceMatrixClient<ReqwestTransport> {
    pub fn new(params: DistanceMatrixClientParams) -> Result<Self, ConfigError> {
        Self::with_transport(params, ReqwestTransport::default())
    }
}

impl<T> DistanceMatrixClient<T>
where
    T: HttpTransport + Sync,
{
    pub fn with_transport(
        params: DistanceMatrixClientParams,
        transport: T,
    ) -> Result<Self, ConfigError> {
        let signer = match (
            non_empty(params.client_id.as_deref()),
            non_empty(params.secret_key.as_deref()),
        ) {
            (Some(client_id), Some(secret_key)) => Some(UrlSigner::new(client_id, secret_key)?),
            (None, None) => None,
            _ => return Err(ConfigError::MissingCredential),
        };

        let matrix_url = Url::parse(
            non_empty(params.matrix_url.as_deref()).unwrap_or(DISTANCE_MATRIX_API_URL),
        )?;

        Ok(Self {
            matrix_url,
            signer,
            max_request_length: params.max_request_length,
            transport,
        })
    }

    pub fn matrix_url(&self) -> &Url {
        &self.matrix_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn is_signing(&self) -> bool {
        self.signer.is_some()
    }

    /// Fetches the full origins x destinations matrix.
    ///
    /// Requests longer than the configured limit are split in halves, on the
    /// origins first and on the destinations once a single origin remains.
    /// The halves are fetched one after the other and merged back in order.
    pub async fn fetch(
        &self,
        origins: impl Into<Locations>,
        destinations: impl Into<Locations>,
        options: &MatrixOptions,
    ) -> Result<MatrixResponse, DistanceMatrixError> {
        let origins = origins.into();
        let destinations = destinations.into();

        if origins.is_empty() {
            return Err(DistanceMatrixError::NoLocations("origins"));
        }
        if destinations.is_empty() {
            return Err(DistanceMatrixError::NoLocations("destinations"));
        }

        self.fetch_query(SubQuery {
            origins: origins.as_slice(),
            destinations: destinations.as_slice(),
            options,
        })
        .await
    }

    fn fetch_query<'a>(
        &'a self,
        query: SubQuery<'a>,
    ) -> BoxFuture<'a, Result<MatrixResponse, DistanceMatrixError>> {
        Box::pin(async move {
            let url = self.build_url(&query);
            let length = path_and_query(&url).len();

            if length <= self.max_request_length {
                return self.leaf_request(url).await;
            }

            if query.origins.len() > 1 {
                let (top, bottom) = query.origins.split_at(query.origins.len() / 2);
                debug!(
                    "DistanceMatrix: Request of {} characters, splitting {} origins into {} + {}",
                    length,
                    query.origins.len(),
                    top.len(),
                    bottom.len()
                );

                let top = self.fetch_query(query.with_origins(top)).await;
                let bottom = self.fetch_query(query.with_origins(bottom)).await;

                Ok(top?.merge_origins(bottom?))
            } else if query.destinations.len() > 1 {
                let (left, right) = query.destinations.split_at(query.destinations.len() / 2);
                debug!(
                    "DistanceMatrix: Request of {} characters, splitting {} destinations into {} + {}",
                    length,
                    query.destinations.len(),
                    left.len(),
                    right.len()
                );

                let left = self.fetch_query(query.with_destinations(left)).await;
                let right = self.fetch_query(query.with_destinations(right)).await;

                left?.merge_destinations(right?)
            } else {
                warn!(
                    "DistanceMatrix: Single pair request of {} characters is over the {} limit",
                    length, self.max_request_length
                );
                Err(DistanceMatrixError::RequestTooLarge {
                    length,
                    limit: self.max_request_length,
                })
            }
        })
    }

    fn build_url(&self, query: &SubQuery) -> Url {
        let mut url = self.matrix_url.clone();
        url.query_pairs_mut()
            .extend_pairs(query.options.query_pairs(query.origins, query.destinations));
        url
    }

    async fn leaf_request(&self, mut url: Url) -> Result<MatrixResponse, DistanceMatrixError> {
        if let Some(signer) = &self.signer {
            url.query_pairs_mut()
                .append_pair("client", signer.client_id());
            let signature = signer.sign(&path_and_query(&url));
            url.query_pairs_mut().append_pair("signature", &signature);
        }

        debug!(
            "DistanceMatrix: Requesting {} characters (signed: {})",
            path_and_query(&url).len(),
            self.signer.is_some()
        );

        let response = self.transport.get(url).await?;

        if !response.is_ok() {
            warn!("DistanceMatrix: API answered with status {}", response.status);
            return Err(DistanceMatrixError::Api {
                status: response.status,
                message: response.body,
            });
        }

        Ok(serde_json::from_str(&response.body)?)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// The part of the url the length limit and the signature apply to.
pub fn path_and_query(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}

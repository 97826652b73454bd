use clap::Args;
use gmatrix_client::{
    distance_matrix_client::{DistanceMatrixClient, DistanceMatrixClientParams},
    matrix_request::{Avoid, MatrixOptions, TravelMode, Units},
};
use tracing::info;

use crate::{
    output::{OutputFormat, print_response},
    parsers,
};

const API_KEY_ENV_VAR: &str = "GMATRIX_API_KEY";

#[derive(Args)]
pub struct GetMatrixArgs {
    /// Origin address or "lat,lng", repeat for several
    #[arg(short, long = "origin", required = true)]
    origins: Vec<String>,

    /// Destination address or "lat,lng", repeat for several
    #[arg(short, long = "destination", required = true)]
    destinations: Vec<String>,

    #[arg(long)]
    mode: Option<TravelMode>,

    #[arg(long)]
    units: Option<Units>,

    #[arg(long)]
    avoid: Option<Avoid>,

    #[arg(long)]
    language: Option<String>,

    /// Departure time (e.g., "now", "2024-06-01T08:00:00Z", epoch seconds)
    #[arg(long, value_parser = parsers::parse_timestamp)]
    departure_time: Option<jiff::Timestamp>,

    #[arg(long)]
    sensor: bool,

    /// Extra query parameter forwarded as is, repeatable
    #[arg(short, long = "param", value_parser = parsers::parse_key_value)]
    params: Vec<(String, String)>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

impl GetMatrixArgs {
    fn options(&self, api_key: Option<String>) -> MatrixOptions {
        let mut options = MatrixOptions::new().sensor(self.sensor);

        if let Some(key) = api_key {
            options = options.api_key(key);
        }
        if let Some(mode) = self.mode {
            options = options.mode(mode);
        }
        if let Some(units) = self.units {
            options = options.units(units);
        }
        if let Some(avoid) = self.avoid {
            options = options.avoid(avoid);
        }
        if let Some(language) = &self.language {
            options = options.language(language);
        }
        if let Some(departure_time) = self.departure_time {
            options = options.departure_time(departure_time);
        }
        for (key, value) in &self.params {
            options.set_param(key, value);
        }

        options
    }
}

pub async fn run(args: GetMatrixArgs) -> anyhow::Result<()> {
    let client = DistanceMatrixClient::new(DistanceMatrixClientParams::from_env()?)?;
    let api_key = std::env::var(API_KEY_ENV_VAR)
        .ok()
        .filter(|key| !key.is_empty());
    let options = args.options(api_key);

    info!(
        "Fetching {}x{} matrix from {}",
        args.origins.len(),
        args.destinations.len(),
        client.matrix_url()
    );

    let response = client
        .fetch(args.origins, args.destinations, &options)
        .await?;

    if let Some(statuses) = &response.statuses {
        info!("Merged {} sub-requests", statuses.len() + 1);
    }

    print_response(&response, args.format)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: GetMatrixArgs,
    }

    fn parse(args: &[&str]) -> GetMatrixArgs {
        TestCli::parse_from(std::iter::once("gmatrix").chain(args.iter().copied())).args
    }

    #[test]
    fn test_param_overrides_typed_flag_in_place() {
        let args = parse(&[
            "-o", "A", "-d", "B", "--mode", "walking", "--units", "metric", "-p", "mode=transit",
            "-p", "region=be",
        ]);

        let options = args.options(Some("secret".to_string()));

        assert_eq!(
            options.params(),
            &[
                ("key".to_string(), "secret".to_string()),
                ("mode".to_string(), "transit".to_string()),
                ("units".to_string(), "metric".to_string()),
                ("region".to_string(), "be".to_string()),
            ]
        );
        assert!(!options.is_sensor());
    }

    #[test]
    fn test_no_api_key() {
        let args = parse(&["-o", "A", "-o", "C", "-d", "B", "--sensor"]);

        let options = args.options(None);

        assert_eq!(options.get("key"), None);
        assert!(options.is_sensor());
        assert_eq!(args.origins, vec!["A", "C"]);
    }
}

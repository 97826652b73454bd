pub mod distance_matrix_client;
pub mod error;
pub mod matrix_request;
pub mod matrix_response;
pub mod transport;
pub mod travel_matrices;
pub mod url_signer;

use base64::{
    Engine as _,
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig, general_purpose::URL_SAFE},
};
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::error::ConfigError;

type HmacSha1 = Hmac<Sha1>;

/// Secrets are handed out url-safe encoded, sometimes without padding.
const SECRET_KEY_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Signs request urls for client-id (premium) accounts.
#[derive(Clone)]
pub struct UrlSigner {
    client_id: String,
    mac: HmacSha1,
}

impl UrlSigner {
    pub fn new(client_id: &str, secret_key: &str) -> Result<Self, ConfigError> {
        let decoded_key = SECRET_KEY_ENGINE.decode(secret_key.trim())?;
        let mac = HmacSha1::new_from_slice(&decoded_key)?;

        Ok(Self {
            client_id: client_id.to_string(),
            mac,
        })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Signs `path?query` and returns the url-safe base64 digest.
    pub fn sign(&self, path_and_query: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(path_and_query.as_bytes());
        URL_SAFE.encode(mac.finalize().into_bytes())
    }
}

impl std::fmt::Debug for UrlSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlSigner")
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

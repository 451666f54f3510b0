//! One-shot flash messages carried in a signed cookie.
//!
//! Messages use the `severity|text` form. Reading them hands back a
//! `Set-Cookie` value that clears the cookie, so each message is shown once.

use std::collections::BTreeMap;

use axum::http::header::{self, InvalidHeaderValue};
use axum::http::{HeaderMap, HeaderValue};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use thiserror::Error;
use tracing::warn;

type HmacSha256 = Hmac<Sha256>;

const COOKIE_MAX_AGE_SECS: u64 = 30 * 24 * 60 * 60;

#[derive(Debug, Error)]
pub enum FlashError {
    #[error("could not encode flash messages: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("flash cookie is not a valid header value: {0}")]
    Header(#[from] InvalidHeaderValue),
    #[error("flash signing key rejected: {0}")]
    Key(String),
}

#[derive(Debug, Default)]
pub struct TakenFlashes {
    /// Severity to message. A later message with the same severity wins.
    pub messages: BTreeMap<String, String>,
    pub clear_cookie: Option<HeaderValue>,
}

pub struct FlashStore {
    cookie_name: String,
    signing_key: SecretString,
}

impl FlashStore {
    pub fn new(cookie_name: impl Into<String>, signing_key: SecretString) -> Self {
        Self { cookie_name: cookie_name.into(), signing_key }
    }

    /// Queues `message` behind any flashes already pending on the request and
    /// returns the `Set-Cookie` value to send back.
    pub fn add_flash(
        &self,
        request_headers: &HeaderMap,
        message: impl Into<String>,
    ) -> Result<HeaderValue, FlashError> {
        let mut pending = self.read_pending(request_headers);
        pending.push(message.into());

        let encoded = encode_hex(&serde_json::to_vec(&pending)?);
        let signature = self.sign(encoded.as_bytes())?;
        let cookie = format!(
            "{}={encoded}.{signature}; Path=/; Max-Age={COOKIE_MAX_AGE_SECS}; HttpOnly; SameSite=Lax",
            self.cookie_name
        );
        Ok(HeaderValue::from_str(&cookie)?)
    }

    pub fn take_flashes(&self, request_headers: &HeaderMap) -> TakenFlashes {
        if self.cookie_value(request_headers).is_none() {
            return TakenFlashes::default();
        }

        let messages = self
            .read_pending(request_headers)
            .into_iter()
            .filter_map(|raw| {
                raw.split_once('|')
                    .map(|(severity, text)| (severity.to_string(), text.to_string()))
            })
            .collect();
        let clear_cookie = HeaderValue::from_str(&format!(
            "{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax",
            self.cookie_name
        ))
        .ok();

        TakenFlashes { messages, clear_cookie }
    }

    fn read_pending(&self, headers: &HeaderMap) -> Vec<String> {
        let Some(value) = self.cookie_value(headers) else {
            return Vec::new();
        };
        let Some((encoded, signature)) = value.rsplit_once('.') else {
            return Vec::new();
        };

        if !self.verify(encoded.as_bytes(), signature) {
            warn!(
                event_name = "web.flash.invalid_signature",
                cookie = %self.cookie_name,
                "discarding flash cookie with a bad signature"
            );
            return Vec::new();
        }

        decode_hex(encoded)
            .and_then(|bytes| serde_json::from_slice::<Vec<String>>(&bytes).ok())
            .unwrap_or_default()
    }

    fn cookie_value(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == self.cookie_name)
            .map(|(_, value)| value.to_string())
    }

    fn mac(&self) -> Result<HmacSha256, FlashError> {
        HmacSha256::new_from_slice(self.signing_key.expose_secret().as_bytes())
            .map_err(|error| FlashError::Key(error.to_string()))
    }

    fn sign(&self, payload: &[u8]) -> Result<String, FlashError> {
        let mut mac = self.mac()?;
        mac.update(payload);
        Ok(encode_hex(mac.finalize().into_bytes().as_slice()))
    }

    fn verify(&self, payload: &[u8], signature_hex: &str) -> bool {
        let Some(signature) = decode_hex(signature_hex) else {
            return false;
        };
        let Ok(mut mac) = self.mac() else {
            return false;
        };
        mac.update(payload);
        mac.verify_slice(&signature).is_ok()
    }
}

fn encode_hex(bytes: &[u8]) -> String {
    let mut output = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        output.push_str(&format!("{byte:02x}"));
    }
    output
}

fn decode_hex(input: &str) -> Option<Vec<u8>> {
    if input.len() % 2 != 0 || !input.is_ascii() {
        return None;
    }

    (0..input.len())
        .step_by(2)
        .map(|index| u8::from_str_radix(&input[index..index + 2], 16).ok())
        .collect()
}

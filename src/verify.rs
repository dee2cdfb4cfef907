use anyhow::{Context, Result, anyhow};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

const VERIFY_PATH: &str = "/api/verify";

#[derive(Debug, Serialize)]
struct VerifyRequest<'a> {
    email: &'a str,
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    #[serde(rename = "txId")]
    tx_id: Option<String>,
    error: Option<String>,
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"))
}

/// Trims and sanity-checks an address before it is sent anywhere.
pub fn normalize_email(email: &str) -> Result<&str> {
    let email = email.trim();
    if email.is_empty() {
        return Err(anyhow!("Email is required"));
    }
    if !email_pattern().is_match(email) {
        return Err(anyhow!("'{}' does not look like an email address", email));
    }
    Ok(email)
}

/// Client for the demo ledger endpoint. One request, no retries.
#[derive(Debug)]
pub struct VerifyClient {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl VerifyClient {
    pub fn new(base_url: &str) -> Self {
        let endpoint = format!("{}{}", base_url.trim_end_matches('/'), VERIFY_PATH);
        Self {
            endpoint,
            client: reqwest::blocking::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Records a verification for `email` and returns the transaction id.
    pub fn verify(&self, email: &str) -> Result<String> {
        let email = normalize_email(email)?;
        tracing::info!(endpoint = %self.endpoint, "sending verification");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&VerifyRequest { email })
            .send()
            .with_context(|| format!("Failed to reach {}", self.endpoint))?;

        let status = response.status();
        let text = response.text().unwrap_or_default();
        parse_response(status.is_success(), status.as_u16(), &text)
    }
}

fn parse_response(success: bool, status: u16, body: &str) -> Result<String> {
    let parsed: Option<VerifyResponse> = serde_json::from_str(body).ok();
    match parsed {
        Some(VerifyResponse { error: Some(error), .. }) => {
            Err(anyhow!("Verification failed ({}): {}", status, error))
        }
        Some(VerifyResponse { tx_id: Some(tx_id), .. }) if success => Ok(tx_id),
        _ if success => Err(anyhow!("Verification response had no txId: {}", body)),
        _ => Err(anyhow!("Verification failed with status {}: {}", status, body)),
    }
}

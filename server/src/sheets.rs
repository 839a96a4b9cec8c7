//! # Google Sheets
//!
//! Read-only view of the voting form's response sheet.
//!
//! ## Schema
//!
//! One row per form submission, columns as laid out by Google Forms:
//! - Column A (0): submission timestamp
//! - Column B (1): student name
//! - Column E (4): requested items, comma-separated when multiple boxes
//!   were ticked
//! - Columns C.. : further free-text answers, scanned only for the live
//!   request card
//!
//! ## Auth
//!
//! Service account flow: sign an RS256 assertion with the account's
//! private key, trade it for a bearer token, then hit the values endpoint.
//! The token is minted per fetch; at one real fetch per cool-down window
//! there is nothing worth caching.

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{config::Config, error::AppError};

const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const SHEETS_ENDPOINT: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";
const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

pub const RESPONSES_RANGE: &str = "Form Responses 1!A:Z";

#[derive(Serialize)]
struct Claims {
    iss: String,
    scope: String,
    aud: String,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct ValuesResponse {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

pub async fn fetch_rows(http: &Client, config: &Config) -> Result<Vec<Vec<String>>, AppError> {
    let token = fetch_access_token(http, config).await?;

    let url = format!(
        "{SHEETS_ENDPOINT}/{}/values/{}",
        config.spreadsheet_id,
        RESPONSES_RANGE.replace(' ', "%20")
    );

    let response = http.get(&url).bearer_auth(&token).send().await.map_err(|e| {
        error!("Sheets values request failed: {e}");
        AppError::FetchFailed
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        error!("Sheets values request returned {status}: {body}");
        return Err(AppError::FetchFailed);
    }

    let values: ValuesResponse = response.json().await.map_err(|e| {
        error!("Failed to decode sheet values: {e}");
        AppError::FetchFailed
    })?;

    Ok(values.values)
}

async fn fetch_access_token(http: &Client, config: &Config) -> Result<String, AppError> {
    let assertion = sign_assertion(config)?;

    let response = http
        .post(TOKEN_ENDPOINT)
        .form(&[("grant_type", GRANT_TYPE), ("assertion", assertion.as_str())])
        .send()
        .await
        .map_err(|e| {
            error!("Token exchange request failed: {e}");
            AppError::FetchFailed
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        error!("Token exchange returned {status}: {body}");
        return Err(AppError::FetchFailed);
    }

    let token: TokenResponse = response.json().await.map_err(|e| {
        error!("Failed to decode token response: {e}");
        AppError::FetchFailed
    })?;

    Ok(token.access_token)
}

fn sign_assertion(config: &Config) -> Result<String, AppError> {
    let now = Utc::now().timestamp();

    let claims = Claims {
        iss: config.sheets_client_email.clone(),
        scope: SCOPE.to_string(),
        aud: TOKEN_ENDPOINT.to_string(),
        iat: now,
        exp: now + 3600,
    };

    let key = EncodingKey::from_rsa_pem(config.sheets_private_key.as_bytes()).map_err(|e| {
        error!("Invalid service account key: {e}");
        AppError::FetchFailed
    })?;

    encode(&Header::new(Algorithm::RS256), &claims, &key).map_err(|e| {
        error!("Failed to sign token assertion: {e}");
        AppError::FetchFailed
    })
}

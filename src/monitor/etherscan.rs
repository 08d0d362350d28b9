//! Transaction history from an Etherscan-compatible indexer

use alloy_primitives::{hex, Address, Bytes, TxHash};
use log::{debug, info};
use serde::Deserialize;
use std::str::FromStr;

use crate::errors::{MonitorError, MonitorResult};
use crate::models::record::RawRecord;
use crate::monitor::RecordSource;

/// Response envelope of the `account/txlist` endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct TxListResponse {
    pub status: String,
    pub message: String,
    /// A list of transactions on success, an error string otherwise
    pub result: serde_json::Value,
}

/// One transaction as reported by the indexer; every field is a string
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IndexedTransaction {
    pub hash: String,
    pub block_number: String,
    pub time_stamp: String,
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub is_error: String,
}

fn parse_field<T: FromStr>(value: &str, field: &str, hash: &str) -> MonitorResult<T> {
    value
        .parse()
        .map_err(|_| MonitorError::Rpc(format!("invalid {} `{}` in transaction {}", field, value, hash)))
}

impl IndexedTransaction {
    /// Convert to a record.
    ///
    /// Contract creations and reverted transactions yield `None`: neither
    /// can carry a governance call that took effect.
    pub fn into_record(self) -> MonitorResult<Option<RawRecord>> {
        if self.to.is_empty() {
            debug!("Skipping contract creation {}", self.hash);
            return Ok(None);
        }
        if self.is_error == "1" {
            debug!("Skipping reverted transaction {}", self.hash);
            return Ok(None);
        }

        let input = self.input.strip_prefix("0x").unwrap_or(&self.input);
        let payload = hex::decode(input)
            .map_err(|e| MonitorError::Rpc(format!("invalid input in transaction {}: {}", self.hash, e)))?;

        Ok(Some(RawRecord {
            hash: parse_field::<TxHash>(&self.hash, "hash", &self.hash)?,
            from: parse_field::<Address>(&self.from, "from", &self.hash)?,
            to: Some(parse_field::<Address>(&self.to, "to", &self.hash)?),
            block_number: parse_field(&self.block_number, "blockNumber", &self.hash)?,
            timestamp: parse_field(&self.time_stamp, "timeStamp", &self.hash)?,
            payload: Bytes::from(payload),
        }))
    }
}

/// Unwrap a `txlist` response into records
pub(crate) fn parse_response(response: TxListResponse) -> MonitorResult<Vec<RawRecord>> {
    if response.status != "1" {
        // An account without history is reported as an error with an empty list
        if response.result.as_array().map_or(false, |list| list.is_empty()) {
            return Ok(Vec::new());
        }
        let detail = response
            .result
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| response.result.to_string());
        return Err(MonitorError::Rpc(format!("{}: {}", response.message, detail)));
    }

    let transactions: Vec<IndexedTransaction> = serde_json::from_value(response.result)?;
    let mut records = Vec::with_capacity(transactions.len());
    for transaction in transactions {
        if let Some(record) = transaction.into_record()? {
            records.push(record);
        }
    }
    Ok(records)
}

/// Client for the `account/txlist` endpoint
pub struct EtherscanSource {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

impl EtherscanSource {
    /// Create a new client for the given API URL
    pub fn new(api_url: &str, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.to_string(),
            api_key,
        }
    }
}

impl RecordSource for EtherscanSource {
    async fn fetch_history(&self, account: &Address, limit: usize) -> MonitorResult<Vec<RawRecord>> {
        info!("Fetching up to {} transactions of {} from {}", limit, account, self.api_url);

        let account = account.to_string();
        let offset = limit.to_string();
        let mut query = vec![
            ("module", "account"),
            ("action", "txlist"),
            ("address", account.as_str()),
            ("startblock", "0"),
            ("endblock", "99999999"),
            ("page", "1"),
            ("offset", offset.as_str()),
            ("sort", "desc"),
        ];
        if let Some(key) = &self.api_key {
            query.push(("apikey", key.as_str()));
        }

        let response: TxListResponse = self
            .client
            .get(&self.api_url)
            .query(&query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let records = parse_response(response)?;
        info!("Fetched {} transactions", records.len());
        Ok(records)
    }
}

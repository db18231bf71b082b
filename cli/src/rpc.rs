//! Soroban JSON-RPC client for the payroll contract's `paid` events.
//!
//! Calls the `getEvents` RPC method and returns one [`PaidEvent`] per asset
//! transfer a payday made.
//!
//! # XDR layout produced by the payroll contract
//!
//! ```text
//! topics[0]  ScVal::Symbol("paid")
//! topics[1]  ScVal::U64(<employee id>)
//! data       ScVal::Vec([
//!                ScVal::Address(<account>),   // employee's payable account
//!                ScVal::Address(<asset>),     // asset contract paid out
//!                ScVal::I128(Int128Parts),    // amount in the asset's units
//!            ])
//! ```

use anyhow::{bail, Context, Result};
use base64::{engine::general_purpose::STANDARD as B64, Engine};
use serde::Deserialize;
use stellar_xdr::curr::{
    AccountId, Hash, Int128Parts, Limits, PublicKey, ReadXdr, ScAddress, ScVal, ScVec,
};

/// Topic symbol of one payday transfer.
const PAID_TOPIC: &str = "paid";

// ── Public types ──────────────────────────────────────────────────────────────

/// A decoded `paid` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaidEvent {
    pub employee_id: u64,
    /// StrKey of the account that received the payout.
    pub account: String,
    /// StrKey (C…) of the asset contract.
    pub asset: String,
    pub amount: i128,
    /// ISO-8601 timestamp from the ledger that closed the event.
    pub ledger_closed_at: String,
}

// ── JSON-RPC response types ───────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<GetEventsResult>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct GetEventsResult {
    events: Vec<RawEvent>,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(rename = "ledgerClosedAt")]
    ledger_closed_at: String,
    topic: Vec<String>,
    value: String,
    #[serde(rename = "inSuccessfulContractCall")]
    in_successful_contract_call: bool,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Fetch every `paid` event emitted by `contract_id` from `start_ledger` on.
pub fn fetch_paid_events(rpc_url: &str, contract_id: &str, start_ledger: u32) -> Result<Vec<PaidEvent>> {
    let body = serde_json::json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "getEvents",
        "params": {
            "startLedger": start_ledger,
            "filters": [{
                "type": "contract",
                "contractIds": [contract_id]
            }],
            "pagination": { "limit": 200 }
        }
    });

    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .context("Failed to build HTTP client")?;

    let resp: RpcResponse = client
        .post(rpc_url)
        .json(&body)
        .send()
        .context("Failed to reach Soroban RPC — check your --rpc-url")?
        .json()
        .context("Failed to parse Soroban RPC response")?;

    if let Some(err) = resp.error {
        bail!("Soroban RPC error: {}", err);
    }

    let mut out = Vec::new();
    for ev in resp.result.map(|r| r.events).unwrap_or_default() {
        if !ev.in_successful_contract_call {
            continue;
        }
        if let Some(event) = try_decode_paid_event(&ev)? {
            out.push(event);
        }
    }
    Ok(out)
}

// ── XDR decoding helpers ──────────────────────────────────────────────────────

/// Decode `ev` as a `paid` event. Other events of the contract yield `Ok(None)`.
fn try_decode_paid_event(ev: &RawEvent) -> Result<Option<PaidEvent>> {
    if ev.topic.len() != 2 {
        return Ok(None);
    }

    let topic0 = decode_scval(&ev.topic[0]).context("Failed to decode event topic[0]")?;
    match &topic0 {
        ScVal::Symbol(s) if s.as_slice() == PAID_TOPIC.as_bytes() => {}
        _ => return Ok(None),
    }

    let employee_id = match decode_scval(&ev.topic[1]).context("Failed to decode event topic[1]")? {
        ScVal::U64(id) => id,
        other => bail!("Expected ScVal::U64 employee id, got {:?}", other),
    };

    let data = decode_scval(&ev.value).context("Failed to decode event data")?;
    let vec = match data {
        ScVal::Vec(Some(v)) => v,
        _ => bail!("Expected ScVal::Vec for paid event data"),
    };

    Ok(Some(PaidEvent {
        employee_id,
        account: extract_address(&vec, 0)?,
        asset: extract_address(&vec, 1)?,
        amount: extract_i128(&vec, 2)?,
        ledger_closed_at: ev.ledger_closed_at.clone(),
    }))
}

fn decode_scval(b64: &str) -> Result<ScVal> {
    let bytes = B64
        .decode(b64)
        .context("Failed to base64-decode XDR ScVal")?;
    ScVal::from_xdr(&bytes, Limits::none()).context("Failed to XDR-decode ScVal")
}

fn extract_address(vec: &ScVec, idx: usize) -> Result<String> {
    match vec.get(idx) {
        Some(ScVal::Address(addr)) => Ok(scaddress_to_strkey(addr)),
        Some(other) => bail!("Expected ScVal::Address at index {idx}, got {:?}", other),
        None => bail!("Missing element at index {idx} in event data Vec"),
    }
}

fn extract_i128(vec: &ScVec, idx: usize) -> Result<i128> {
    match vec.get(idx) {
        Some(ScVal::I128(Int128Parts { hi, lo })) => Ok(((*hi as i128) << 64) | (*lo as i128)),
        Some(other) => bail!("Expected ScVal::I128 at index {idx}, got {:?}", other),
        None => bail!("Missing element at index {idx} in event data Vec"),
    }
}

/// Render an `ScAddress` as a G… (account) or C… (contract) StrKey.
fn scaddress_to_strkey(addr: &ScAddress) -> String {
    match addr {
        ScAddress::Account(AccountId(PublicKey::PublicKeyTypeEd25519(bytes))) => {
            let pk = stellar_strkey::ed25519::PublicKey(bytes.0);
            stellar_strkey::Strkey::PublicKeyEd25519(pk).to_string()
        }
        ScAddress::Contract(Hash(bytes)) => {
            stellar_strkey::Strkey::Contract(stellar_strkey::Contract(*bytes)).to_string()
        }
    }
}

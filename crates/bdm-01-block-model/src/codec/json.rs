//! # JSON Block Codec
//!
//! Objects are tagged by `"type"`. Hashes and signatures are uppercase hex,
//! accounts use the account string, `work` is 16 lowercase hex digits. A send
//! balance is 32 hex digits while a state balance is a decimal string.

use serde::Deserialize;
use serde_json::{json, Value};
use shared_types::{Account, Amount, BlockHash, Link, Signature};

use crate::domain::{
    Block, ChangeBlock, DeserializationError, OpenBlock, ReceiveBlock, SendBlock, StateBlock,
};

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum BlockJson {
    Send {
        previous: BlockHash,
        destination: Account,
        balance: String,
        work: String,
        signature: Signature,
    },
    Receive {
        previous: BlockHash,
        source: BlockHash,
        work: String,
        signature: Signature,
    },
    Open {
        source: BlockHash,
        representative: Account,
        account: Account,
        work: String,
        signature: Signature,
    },
    Change {
        previous: BlockHash,
        representative: Account,
        work: String,
        signature: Signature,
    },
    State {
        account: Account,
        previous: BlockHash,
        representative: Account,
        balance: String,
        link: String,
        work: String,
        signature: Signature,
    },
}

fn encode_work(work: u64) -> String {
    format!("{:016x}", work)
}

fn decode_work(text: &str) -> Result<u64, DeserializationError> {
    if text.is_empty() || text.len() > 16 {
        return Err(DeserializationError::InvalidField {
            field: "work",
            reason: format!("expected 1 to 16 hex digits, got {}", text.len()),
        });
    }
    u64::from_str_radix(text, 16).map_err(|e| DeserializationError::InvalidField {
        field: "work",
        reason: e.to_string(),
    })
}

/// A state link may be written either as an account string or as hex.
fn decode_link(text: &str) -> Result<Link, DeserializationError> {
    Account::decode_account(text)
        .map(Link::from)
        .or_else(|_| Link::decode_hex(text))
        .map_err(|e| DeserializationError::InvalidField {
            field: "link",
            reason: e.to_string(),
        })
}

fn invalid_balance(e: shared_types::EncodingError) -> DeserializationError {
    DeserializationError::InvalidField {
        field: "balance",
        reason: e.to_string(),
    }
}

impl Block {
    pub fn to_json_value(&self) -> Value {
        match self {
            Block::Send(b) => json!({
                "type": "send",
                "previous": b.previous().encode_hex(),
                "destination": b.destination().encode_account(),
                "balance": b.balance().encode_hex(),
                "work": encode_work(b.work()),
                "signature": b.signature().encode_hex(),
            }),
            Block::Receive(b) => json!({
                "type": "receive",
                "previous": b.previous().encode_hex(),
                "source": b.source().encode_hex(),
                "work": encode_work(b.work()),
                "signature": b.signature().encode_hex(),
            }),
            Block::Open(b) => json!({
                "type": "open",
                "source": b.source().encode_hex(),
                "representative": b.representative().encode_account(),
                "account": b.account().encode_account(),
                "work": encode_work(b.work()),
                "signature": b.signature().encode_hex(),
            }),
            Block::Change(b) => json!({
                "type": "change",
                "previous": b.previous().encode_hex(),
                "representative": b.representative().encode_account(),
                "work": encode_work(b.work()),
                "signature": b.signature().encode_hex(),
            }),
            Block::State(b) => json!({
                "type": "state",
                "account": b.account().encode_account(),
                "previous": b.previous().encode_hex(),
                "representative": b.representative().encode_account(),
                "balance": b.balance().to_string(),
                "link": b.link().encode_hex(),
                "link_as_account": b.link().as_account().encode_account(),
                "signature": b.signature().encode_hex(),
                "work": encode_work(b.work()),
            }),
        }
    }

    /// Pretty-printed JSON text.
    pub fn to_json(&self) -> String {
        format!("{:#}", self.to_json_value())
    }
}

pub fn deserialize_block_json(text: &str) -> Result<Block, DeserializationError> {
    let parsed: BlockJson = serde_json::from_str(text)
        .map_err(|e| DeserializationError::InvalidJson(e.to_string()))?;
    block_from_json(parsed)
}

pub fn deserialize_block_json_value(value: Value) -> Result<Block, DeserializationError> {
    let parsed: BlockJson = serde_json::from_value(value)
        .map_err(|e| DeserializationError::InvalidJson(e.to_string()))?;
    block_from_json(parsed)
}

fn block_from_json(parsed: BlockJson) -> Result<Block, DeserializationError> {
    let block = match parsed {
        BlockJson::Send {
            previous,
            destination,
            balance,
            work,
            signature,
        } => Block::Send(SendBlock::from_parts(
            previous,
            destination,
            Amount::decode_hex(&balance).map_err(invalid_balance)?,
            signature,
            decode_work(&work)?,
        )),
        BlockJson::Receive {
            previous,
            source,
            work,
            signature,
        } => Block::Receive(ReceiveBlock::from_parts(
            previous,
            source,
            signature,
            decode_work(&work)?,
        )),
        BlockJson::Open {
            source,
            representative,
            account,
            work,
            signature,
        } => Block::Open(OpenBlock::from_parts(
            source,
            representative,
            account,
            signature,
            decode_work(&work)?,
        )),
        BlockJson::Change {
            previous,
            representative,
            work,
            signature,
        } => Block::Change(ChangeBlock::from_parts(
            previous,
            representative,
            signature,
            decode_work(&work)?,
        )),
        BlockJson::State {
            account,
            previous,
            representative,
            balance,
            link,
            work,
            signature,
        } => Block::State(StateBlock::from_parts(
            account,
            previous,
            representative,
            Amount::decode_dec(&balance).map_err(invalid_balance)?,
            decode_link(&link)?,
            signature,
            decode_work(&work)?,
        )),
    };
    Ok(block)
}

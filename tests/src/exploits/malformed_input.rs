//! # Malformed Input
//!
//! Truncated, mistagged and padded encodings must be rejected with a typed
//! error, and damaged store entries must surface as store errors rather
//! than as wrong balances.

#[cfg(test)]
mod tests {
    use bdm_01_block_model::test_utils::{keypair, sample_blocks};
    use bdm_01_block_model::{
        block_from_bytes, deserialize_block_json, serialize_block, Block, BlockType,
        DeserializationError,
    };
    use bdm_02_ledger_store::{
        AccountInfo, BlockInfo, KeyPrefix, LedgerStore, PendingInfo, PendingKey, RecordError,
        StoreError,
    };
    use bdm_04_chain_walk::WalkError;
    use bdm_05_voting::{Vote, VoteError};
    use shared_types::{Account, EncodingError, StreamError};
    use std::sync::Arc;

    use crate::fixtures::blocks::send;
    use crate::fixtures::Replay;

    #[test]
    fn test_every_truncation_of_every_block_is_rejected() {
        for block in sample_blocks() {
            let bytes = serialize_block(&block);
            for len in 0..bytes.len() {
                assert!(
                    matches!(
                        block_from_bytes(&bytes[..len]),
                        Err(DeserializationError::Truncated(StreamError::UnexpectedEnd { .. }))
                    ),
                    "{} block cut to {} bytes",
                    block.block_type(),
                    len
                );
            }
        }
    }

    #[test]
    fn test_unknown_and_reserved_tags() {
        for tag in [0u8, 1, 7, 0xFF] {
            let mut bytes = vec![tag];
            bytes.extend_from_slice(&[0u8; 216]);
            assert_eq!(
                block_from_bytes(&bytes),
                Err(DeserializationError::UnknownBlockType(tag))
            );
        }
    }

    #[test]
    fn test_trailing_bytes_after_block() {
        for block in sample_blocks() {
            let mut bytes = serialize_block(&block);
            bytes.extend_from_slice(&[0xAA; 3]);
            assert_eq!(
                block_from_bytes(&bytes),
                Err(DeserializationError::TrailingBytes(3))
            );
        }
    }

    #[test]
    fn test_retagged_body_does_not_decode_as_original() {
        let block = sample_blocks()
            .into_iter()
            .find(|b| b.block_type() == BlockType::Receive)
            .unwrap();
        let mut bytes = serialize_block(&block);
        bytes[0] = BlockType::Change.as_u8();
        let decoded = block_from_bytes(&bytes).unwrap();
        assert_eq!(decoded.block_type(), BlockType::Change);
        assert_ne!(decoded.hash(), block.hash());
    }

    #[test]
    fn test_json_account_with_bad_checksum() {
        let key = keypair(0x41);
        let block = send(&key, Default::default(), key.account(), 1);
        let json = block.to_json();

        let encoded = key.account().encode_account();
        let last = encoded.chars().last().unwrap();
        let swapped = if last == '1' { '3' } else { '1' };
        let mut tampered_account = encoded.clone();
        tampered_account.pop();
        tampered_account.push(swapped);

        assert_eq!(
            Account::decode_account(&tampered_account),
            Err(EncodingError::AccountChecksum)
        );
        let tampered = json.replace(&encoded, &tampered_account);
        assert!(matches!(
            deserialize_block_json(&tampered),
            Err(DeserializationError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_json_missing_field_and_wrong_type() {
        assert!(matches!(
            deserialize_block_json(r#"{"type":"send"}"#),
            Err(DeserializationError::InvalidJson(_))
        ));
        assert!(matches!(
            deserialize_block_json(r#"{"type":"bogus"}"#),
            Err(DeserializationError::InvalidJson(_))
        ));
        assert!(matches!(
            deserialize_block_json("[]"),
            Err(DeserializationError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_record_lengths_are_exact() {
        let short = |record: &'static str, expected: usize, actual: usize| {
            RecordError::InvalidLength {
                record,
                expected,
                actual,
            }
        };
        assert_eq!(
            AccountInfo::from_bytes(&[0; 127]),
            Err(short("account_info", 128, 127))
        );
        assert_eq!(
            AccountInfo::from_bytes(&[0; 129]),
            Err(short("account_info", 128, 129))
        );
        assert!(PendingKey::from_bytes(&[0; 63]).is_err());
        assert!(PendingInfo::from_bytes(&[0; 49]).is_err());
        assert!(BlockInfo::from_bytes(&[]).is_err());
    }

    #[test]
    fn test_vote_with_damaged_block() {
        let key = keypair(0x42);
        let block = sample_blocks().remove(0);
        let vote = Vote::new(key.account(), key.private_key(), 9, Arc::new(block));
        let bytes = vote.to_bytes();

        let mut bad_tag = bytes.clone();
        bad_tag[Vote::HEADER_SIZE] = 0x09;
        assert_eq!(
            Vote::from_bytes(&bad_tag),
            Err(VoteError::InvalidBlock(DeserializationError::UnknownBlockType(9)))
        );

        assert!(matches!(
            Vote::from_bytes(&bytes[..Vote::HEADER_SIZE - 1]),
            Err(VoteError::Truncated(_))
        ));
        assert!(matches!(
            Vote::from_bytes(&bytes[..bytes.len() - 1]),
            Err(VoteError::InvalidBlock(DeserializationError::Truncated(_)))
        ));
    }

    #[test]
    fn test_corrupt_account_entry_surfaces_as_store_error() {
        let replay = Replay::new();
        let genesis = replay.params.genesis_account();
        let store = replay.store();

        let mut txn = store.tx_begin_write();
        txn.put(KeyPrefix::account_key(&genesis), vec![0u8; 17]);
        store.commit(txn).unwrap();

        let txn = store.tx_begin_read();
        assert!(matches!(
            replay.ledger.account_balance(&txn, &genesis),
            Err(WalkError::Store(StoreError::Corrupt {
                table: "accounts",
                ..
            }))
        ));
    }

    #[test]
    fn test_corrupt_block_entry_surfaces_as_store_error() {
        let replay = Replay::new();
        let hash = replay.params.genesis().hash();
        let store = replay.store();

        let mut txn = store.tx_begin_write();
        txn.put(KeyPrefix::block_key(&hash), vec![BlockType::Open.as_u8(), 1, 2, 3]);
        store.commit(txn).unwrap();

        let txn = store.tx_begin_read();
        for result in [
            replay.ledger.amount(&txn, &hash),
            replay.ledger.balance(&txn, &hash),
        ] {
            assert!(matches!(
                result,
                Err(WalkError::Store(StoreError::Block(
                    DeserializationError::Truncated(_)
                )))
            ));
        }
    }

    #[test]
    fn test_corrupt_block_info_cache() {
        let replay = Replay::new();
        let store = replay.store();
        let hash = replay.params.genesis().hash();

        let mut txn = store.tx_begin_write();
        txn.put(KeyPrefix::block_info_key(&hash), vec![0u8; 47]);
        store.commit(txn).unwrap();

        let txn = store.tx_begin_read();
        assert!(matches!(
            store.block_info_get(&txn, &hash),
            Err(StoreError::Corrupt {
                table: "block_info",
                source: RecordError::InvalidLength { expected: 48, actual: 47, .. },
            })
        ));
    }

    #[test]
    fn test_sample_blocks_cover_every_kind() {
        let kinds: Vec<BlockType> = sample_blocks().iter().map(Block::block_type).collect();
        for kind in [
            BlockType::Send,
            BlockType::Receive,
            BlockType::Open,
            BlockType::Change,
            BlockType::State,
        ] {
            assert!(kinds.contains(&kind), "{:?}", kind);
        }
    }
}

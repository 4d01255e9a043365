//! # Chain Replay
//!
//! Replays multi-account histories and checks that the chain-walk queries
//! agree with the bookkeeping kept in `account_info`, `pending` and
//! `representation`.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bdm_01_block_model::test_utils::keypair;
    use bdm_01_block_model::Block;
    use bdm_02_ledger_store::{FileBackedKVStore, KvLedgerStore, LedgerStore, PendingKey};
    use bdm_03_genesis::{Network, NetworkParameters};
    use shared_crypto::KeyPair;
    use shared_types::{Account, Amount, Link};

    use crate::fixtures::blocks::{change, open, receive, send, state};
    use crate::fixtures::{ProcessResult, Replay};

    const MAX: u128 = u128::MAX;

    struct History {
        genesis: KeyPair,
        alice: KeyPair,
        bob: KeyPair,
        carol: KeyPair,
        blocks: Vec<Block>,
    }

    /// ```text
    /// genesis: send 1000 -> alice, send 500 -> bob, receive bob's 100
    /// alice:   open(rep alice), send 300 -> bob, change(rep carol)
    /// bob:     open(rep alice), receive alice's 300, send 100 -> genesis
    /// ```
    fn history(replay: &Replay) -> History {
        let genesis = replay.params.test_genesis_key().cloned().unwrap();
        let alice = keypair(0x11);
        let bob = keypair(0x12);
        let carol = keypair(0x13);
        let g = genesis.account();
        let a = alice.account();
        let b = bob.account();

        let g_send_a = send(&genesis, replay.params.genesis().hash(), a, MAX - 1000);
        let g_send_b = send(&genesis, g_send_a.hash(), b, MAX - 1500);
        let a_open = open(&alice, g_send_a.hash(), a);
        let b_open = open(&bob, g_send_b.hash(), a);
        let a_send_b = send(&alice, a_open.hash(), b, 700);
        let b_receive = receive(&bob, b_open.hash(), a_send_b.hash());
        let a_change = change(&alice, a_send_b.hash(), carol.account());
        let b_send_g = send(&bob, b_receive.hash(), g, 700);
        let g_receive = receive(&genesis, g_send_b.hash(), b_send_g.hash());

        History {
            genesis,
            alice,
            bob,
            carol,
            blocks: vec![
                g_send_a, g_send_b, a_open, b_open, a_send_b, b_receive, a_change, b_send_g,
                g_receive,
            ],
        }
    }

    fn assert_heads_match_account_info(replay: &Replay) {
        let store = replay.store();
        let txn = store.tx_begin_read();
        for (account, info) in store.accounts(&txn).unwrap() {
            assert_eq!(
                replay.ledger.balance(&txn, &info.head).unwrap(),
                info.balance,
                "balance of {}",
                account
            );
            assert_eq!(
                replay.ledger.representative(&txn, &info.head).unwrap(),
                info.rep_block,
                "rep block of {}",
                account
            );
        }
    }

    #[test]
    fn test_replayed_history_balances() {
        let replay = Replay::new();
        let h = history(&replay);
        replay.process_all(&h.blocks);

        let txn = replay.store().tx_begin_read();
        let ledger = &replay.ledger;
        let balance = |key: &KeyPair| ledger.account_balance(&txn, &key.account()).unwrap();

        assert_eq!(balance(&h.genesis), Amount::raw(MAX - 1400));
        assert_eq!(balance(&h.alice), Amount::raw(700));
        assert_eq!(balance(&h.bob), Amount::raw(700));
        assert_heads_match_account_info(&replay);
    }

    #[test]
    fn test_replayed_history_amounts() {
        let replay = Replay::new();
        let h = history(&replay);
        replay.process_all(&h.blocks);

        let txn = replay.store().tx_begin_read();
        let amount = |block: &Block| replay.ledger.amount(&txn, &block.hash()).unwrap();

        assert_eq!(amount(&h.blocks[0]), Amount::raw(1000));
        assert_eq!(amount(&h.blocks[1]), Amount::raw(500));
        assert_eq!(amount(&h.blocks[2]), Amount::raw(1000));
        assert_eq!(amount(&h.blocks[4]), Amount::raw(300));
        assert_eq!(amount(&h.blocks[5]), Amount::raw(300));
        assert_eq!(amount(&h.blocks[6]), Amount::ZERO);
        assert_eq!(amount(&h.blocks[8]), Amount::raw(100));
    }

    #[test]
    fn test_weights_account_for_whole_supply() {
        let replay = Replay::new();
        let h = history(&replay);
        replay.process_all(&h.blocks);

        let txn = replay.store().tx_begin_read();
        let weight = |account: Account| replay.ledger.weight(&txn, &account).unwrap();

        assert_eq!(weight(h.genesis.account()), Amount::raw(MAX - 1400));
        assert_eq!(weight(h.carol.account()), Amount::raw(700));
        assert_eq!(weight(h.alice.account()), Amount::raw(700));
        assert_eq!(weight(h.bob.account()), Amount::ZERO);

        let total = [&h.genesis, &h.alice, &h.bob, &h.carol]
            .iter()
            .map(|key| weight(key.account()))
            .try_fold(Amount::ZERO, |sum, w| sum.checked_add(w));
        assert_eq!(total, Some(Amount::MAX));
    }

    #[test]
    fn test_pending_entries_are_consumed() {
        let replay = Replay::new();
        let h = history(&replay);
        replay.process_all(&h.blocks[..5]);

        let store = replay.store();
        let txn = store.tx_begin_read();
        let pending = store.pending_for(&txn, &h.bob.account()).unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].0, PendingKey::new(h.bob.account(), h.blocks[4].hash()));
        assert_eq!(pending[0].1.amount, Amount::raw(300));
        assert_eq!(pending[0].1.source, h.alice.account());
        drop(txn);

        replay.process_all(&h.blocks[5..]);
        let txn = store.tx_begin_read();
        assert!(store.pending_for(&txn, &h.bob.account()).unwrap().is_empty());
        assert!(store.pending_for(&txn, &h.genesis.account()).unwrap().is_empty());
    }

    #[test]
    fn test_change_caches_block_info() {
        let replay = Replay::new();
        let h = history(&replay);
        replay.process_all(&h.blocks);

        let store = replay.store();
        let txn = store.tx_begin_read();
        let info = store.block_info_get(&txn, &h.blocks[6].hash()).unwrap().unwrap();
        assert_eq!(info.account, h.alice.account());
        assert_eq!(info.balance, Amount::raw(700));
    }

    #[test]
    fn test_frontiers_track_heads() {
        let replay = Replay::new();
        let h = history(&replay);
        replay.process_all(&h.blocks);

        let store = replay.store();
        let txn = store.tx_begin_read();
        for (account, info) in store.accounts(&txn).unwrap() {
            assert_eq!(store.frontier_get(&txn, &info.head).unwrap(), Some(account));
        }
        assert_eq!(store.frontier_get(&txn, &h.blocks[2].hash()).unwrap(), None);
    }

    #[test]
    fn test_replay_is_idempotent() {
        let replay = Replay::new();
        let h = history(&replay);
        replay.process_all(&h.blocks);

        for block in &h.blocks {
            assert_eq!(replay.process(block), ProcessResult::Old);
        }
        let txn = replay.store().tx_begin_read();
        assert_eq!(replay.ledger.block_counts(&txn).unwrap().sum(), 10);
    }

    #[test]
    fn test_state_blocks_interleave_with_legacy() {
        let replay = Replay::new();
        let h = history(&replay);
        replay.process_all(&h.blocks);

        let dave = keypair(0x14);
        let g_head = h.blocks[8].hash();
        let g_state_send = state(
            &h.genesis,
            g_head,
            h.genesis.account(),
            MAX - 1450,
            Link::from(dave.account()),
        );
        let d_open = state(
            &dave,
            shared_types::BlockHash::zero(),
            h.carol.account(),
            50,
            Link::from(g_state_send.hash()),
        );
        let d_send = state(
            &dave,
            d_open.hash(),
            h.carol.account(),
            20,
            Link::from(h.alice.account()),
        );
        let a_receive = receive(&h.alice, h.blocks[6].hash(), d_send.hash());
        replay.process_all(&[g_state_send.clone(), d_open.clone(), d_send.clone(), a_receive.clone()]);

        let txn = replay.store().tx_begin_read();
        let ledger = &replay.ledger;
        assert_eq!(ledger.amount(&txn, &g_state_send.hash()).unwrap(), Amount::raw(50));
        assert_eq!(ledger.amount(&txn, &d_open.hash()).unwrap(), Amount::raw(50));
        assert_eq!(ledger.amount(&txn, &d_send.hash()).unwrap(), Amount::raw(30));
        assert_eq!(ledger.amount(&txn, &a_receive.hash()).unwrap(), Amount::raw(30));
        assert_eq!(ledger.balance(&txn, &a_receive.hash()).unwrap(), Amount::raw(730));
        assert_eq!(
            ledger.representative(&txn, &a_receive.hash()).unwrap(),
            h.blocks[6].hash()
        );
        assert_eq!(ledger.weight(&txn, &h.carol.account()).unwrap(), Amount::raw(750));
        assert_heads_match_account_info(&replay);
    }

    #[test]
    fn test_file_backed_replay_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.db");
        let params = NetworkParameters::new(Network::Test).unwrap();

        let blocks = {
            let store: Arc<dyn LedgerStore> =
                Arc::new(KvLedgerStore::new(FileBackedKVStore::open(&path).unwrap()));
            let replay = Replay::with_store(params.clone(), store);
            let h = history(&replay);
            replay.process_all(&h.blocks[..6]);
            h.blocks
        };

        let store: Arc<dyn LedgerStore> =
            Arc::new(KvLedgerStore::new(FileBackedKVStore::open(&path).unwrap()));
        let replay = Replay::with_store(params, store);
        for block in &blocks[..6] {
            assert_eq!(replay.process(block), ProcessResult::Old);
        }
        replay.process_all(&blocks[6..]);
        assert_heads_match_account_info(&replay);

        let txn = replay.store().tx_begin_read();
        assert_eq!(replay.ledger.block_counts(&txn).unwrap().sum(), 10);
    }
}

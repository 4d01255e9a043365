//! A small two-account ledger used by chain-walk tests here and in the
//! workspace test suite.
//!
//! ```text
//! genesis: open(MAX) -> send1(-100 to alice) -> send2(-30 to alice)
//! alice:   open(send1) -> send(-50 to genesis) -> receive(send2) -> change(rep)
//! ```
//!
//! Alice's balances along her chain are 100, 50, 80, 80.

use std::sync::Arc;

use bdm_01_block_model::test_utils::keypair;
use bdm_01_block_model::{Block, ChangeBlock, OpenBlock, ReceiveBlock, SendBlock};
use bdm_02_ledger_store::{
    AccountInfo, FixedTimeSource, InMemoryKVStore, KvLedgerStore, LedgerStore,
};
use bdm_03_genesis::{LedgerConstants, Network, NetworkParameters};
use shared_crypto::KeyPair;
use shared_types::{Amount, BlockHash};

use crate::ledger::Ledger;

pub struct TestChain {
    pub params: NetworkParameters,
    pub constants: LedgerConstants,
    pub store: Arc<KvLedgerStore<InMemoryKVStore>>,
    pub genesis_key: KeyPair,
    pub alice: KeyPair,
    pub rep: KeyPair,
    pub genesis_send1: Block,
    pub alice_open: Block,
    pub alice_send: Block,
    pub genesis_send2: Block,
    pub alice_receive: Block,
    pub alice_change: Block,
}

impl TestChain {
    pub fn build() -> Self {
        let params = NetworkParameters::new(Network::Test).expect("test network parameters");
        let constants = params.ledger_constants();
        let genesis_key = params
            .test_genesis_key()
            .cloned()
            .expect("test network has a genesis key");
        let alice = keypair(0xA1);
        let rep = keypair(0xB2);
        let g = genesis_key.account();
        let a = alice.account();

        let genesis_send1 = Block::from(SendBlock::new(
            params.genesis().hash(),
            a,
            Amount::raw(u128::MAX - 100),
            genesis_key.private_key(),
            &g,
            0,
        ));
        let alice_open = Block::from(OpenBlock::new(
            genesis_send1.hash(),
            a,
            a,
            alice.private_key(),
            &a,
            0,
        ));
        let alice_send = Block::from(SendBlock::new(
            alice_open.hash(),
            g,
            Amount::raw(50),
            alice.private_key(),
            &a,
            0,
        ));
        let genesis_send2 = Block::from(SendBlock::new(
            genesis_send1.hash(),
            a,
            Amount::raw(u128::MAX - 130),
            genesis_key.private_key(),
            &g,
            0,
        ));
        let alice_receive = Block::from(ReceiveBlock::new(
            alice_send.hash(),
            genesis_send2.hash(),
            alice.private_key(),
            &a,
            0,
        ));
        let alice_change = Block::from(ChangeBlock::new(
            alice_receive.hash(),
            rep.account(),
            alice.private_key(),
            &a,
            0,
        ));

        let store = Arc::new(KvLedgerStore::new_in_memory());
        {
            let mut txn = store.tx_begin_write();
            params
                .genesis()
                .initialize(&*store, &mut txn, &FixedTimeSource(0))
                .expect("genesis on empty store");
            store.commit(txn).expect("commit genesis");
        }

        let chain = Self {
            params,
            constants,
            store,
            genesis_key,
            alice,
            rep,
            genesis_send1,
            alice_open,
            alice_send,
            genesis_send2,
            alice_receive,
            alice_change,
        };
        chain.insert(&[
            &chain.genesis_send1,
            &chain.alice_open,
            &chain.alice_send,
            &chain.genesis_send2,
            &chain.alice_receive,
            &chain.alice_change,
        ]);

        let mut txn = chain.store.tx_begin_write();
        let open = chain.alice_open.hash();
        let change = chain.alice_change.hash();
        chain.store.account_put(
            &mut txn,
            &g,
            &AccountInfo::new(
                chain.genesis_send2.hash(),
                chain.genesis_hash(),
                chain.genesis_hash(),
                Amount::raw(u128::MAX - 130),
                0,
                3,
            ),
        );
        chain.store.account_put(
            &mut txn,
            &a,
            &AccountInfo::new(change, change, open, Amount::raw(80), 0, 4),
        );
        chain
            .store
            .representation_put(&mut txn, &g, Amount::raw(u128::MAX - 130));
        chain
            .store
            .representation_put(&mut txn, &chain.rep.account(), Amount::raw(80));
        chain.store.commit(txn).expect("commit account entries");

        chain
    }

    pub fn genesis_hash(&self) -> BlockHash {
        self.params.genesis().hash()
    }

    pub fn ledger(&self) -> Ledger {
        Ledger::new(self.store.clone(), self.constants)
    }

    /// Store `blocks` in one committed transaction.
    pub fn insert(&self, blocks: &[&Block]) {
        let mut txn = self.store.tx_begin_write();
        for block in blocks {
            self.store.block_put(&mut txn, &block.hash(), block);
        }
        self.store.commit(txn).expect("commit blocks");
    }

    /// Append a receive of `source` to alice's chain without checking that
    /// `source` exists.
    pub fn receive_from(&self, source: &BlockHash) -> Block {
        let block = Block::from(ReceiveBlock::new(
            self.alice_change.hash(),
            *source,
            self.alice.private_key(),
            &self.alice.account(),
            0,
        ));
        self.insert(&[&block]);
        block
    }
}

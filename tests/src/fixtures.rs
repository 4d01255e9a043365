//! # Ledger Replay
//!
//! Applies blocks to a store the way a node's block processor would, keeping
//! every metadata table consistent, so scenarios can check the chain-walk
//! queries against the bookkeeping.

use std::sync::Arc;

use bdm_01_block_model::{Block, StateBlock};
use bdm_02_ledger_store::{
    AccountInfo, BlockInfo, FixedTimeSource, KvLedgerStore, LedgerStore, PendingInfo, PendingKey,
    TimeSource, WriteTransaction,
};
use bdm_03_genesis::{Network, NetworkParameters};
use bdm_04_chain_walk::Ledger;
use shared_types::{Account, Amount, BlockHash};

/// Result of replaying one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessResult {
    Progress,
    /// Already in the store.
    Old,
    BadSignature,
    /// Predecessor not in the store.
    GapPrevious,
    /// Source block not in the store.
    GapSource,
    /// Source exists but is not pending for this account.
    Unreceivable,
    /// Predecessor is not the account's head, or the account is already open.
    Fork,
    /// Send of more than the account holds.
    NegativeSpend,
    /// State block whose balance change does not match its link.
    BalanceMismatch,
}

pub struct Replay {
    pub params: NetworkParameters,
    pub ledger: Ledger,
    clock: FixedTimeSource,
}

impl Replay {
    /// Test network ledger in memory, holding only genesis.
    pub fn new() -> Self {
        let params = NetworkParameters::new(Network::Test).expect("test network parameters");
        let store: Arc<dyn LedgerStore> = Arc::new(KvLedgerStore::new_in_memory());
        Self::with_store(params, store)
    }

    /// Replay onto `store`, seeding genesis if it is empty.
    pub fn with_store(params: NetworkParameters, store: Arc<dyn LedgerStore>) -> Self {
        let clock = FixedTimeSource(1_600_000_000);
        {
            let mut txn = store.tx_begin_write();
            if params.genesis().initialize(store.as_ref(), &mut txn, &clock).is_ok() {
                store.commit(txn).expect("commit genesis");
            }
        }
        let ledger = Ledger::new(store, params.ledger_constants());
        Self {
            params,
            ledger,
            clock,
        }
    }

    pub fn store(&self) -> &dyn LedgerStore {
        self.ledger.store()
    }

    /// Apply `block` in its own transaction; nothing is written unless the
    /// result is [`ProcessResult::Progress`].
    pub fn process(&self, block: &Block) -> ProcessResult {
        let store = self.store();
        let mut txn = store.tx_begin_write();
        let result = self.apply(&mut txn, block);
        if result == ProcessResult::Progress {
            store.commit(txn).expect("commit replayed block");
        }
        result
    }

    /// Apply every block, panicking on the first that does not progress.
    pub fn process_all(&self, blocks: &[Block]) {
        for block in blocks {
            let result = self.process(block);
            assert_eq!(
                result,
                ProcessResult::Progress,
                "{} block {}",
                block.block_type(),
                block.hash()
            );
        }
    }

    fn apply(&self, txn: &mut WriteTransaction<'_>, block: &Block) -> ProcessResult {
        let store = self.store();
        let hash = block.hash();
        if store.block_exists(&*txn, &hash).expect("block lookup") {
            return ProcessResult::Old;
        }

        if let Block::State(state) = block {
            return self.apply_state(txn, state);
        }

        // Legacy blocks: find the owning account.
        let (account, info) = match block {
            Block::Open(open) => {
                let account = open.account();
                if store.account_get(&*txn, &account).expect("account lookup").is_some() {
                    return ProcessResult::Fork;
                }
                (account, None)
            }
            _ => {
                let previous = block.previous();
                match store.frontier_get(&*txn, &previous).expect("frontier lookup") {
                    Some(account) => (
                        account,
                        store.account_get(&*txn, &account).expect("account lookup"),
                    ),
                    None if store.block_exists(&*txn, &previous).expect("block lookup") => {
                        return ProcessResult::Fork
                    }
                    None => return ProcessResult::GapPrevious,
                }
            }
        };
        if block.verify_signature(&account).is_err() {
            return ProcessResult::BadSignature;
        }

        let prior = info.map(|info| info.balance).unwrap_or(Amount::ZERO);
        let old_rep = match &info {
            Some(info) => Some(self.representative_at(txn, &info.head)),
            None => None,
        };

        let (balance, new_rep) = match block {
            Block::Send(send) => {
                let Some(amount) = prior.checked_sub(send.balance()) else {
                    return ProcessResult::NegativeSpend;
                };
                store.pending_put(
                    txn,
                    &PendingKey::new(send.destination(), hash),
                    &PendingInfo::new(account, amount),
                );
                (send.balance(), old_rep)
            }
            Block::Receive(receive) => match self.take_pending(txn, account, receive.source()) {
                Ok(amount) => (prior.wrapping_add(amount), old_rep),
                Err(result) => return result,
            },
            Block::Open(open) => match self.take_pending(txn, account, open.source()) {
                Ok(amount) => (amount, Some(open.representative())),
                Err(result) => return result,
            },
            Block::Change(change) => {
                store.block_info_put(txn, &hash, &BlockInfo::new(account, prior));
                (prior, Some(change.representative()))
            }
            Block::State(_) => unreachable!("state blocks handled above"),
        };

        if let Some(rep) = old_rep {
            self.sub_weight(txn, &rep, prior);
        }
        if let Some(rep) = new_rep {
            self.add_weight(txn, &rep, balance);
        }

        let rep_block = match (block, &info) {
            (Block::Send(_) | Block::Receive(_), Some(info)) => info.rep_block,
            _ => hash,
        };
        let open_block = info.map(|info| info.open_block).unwrap_or(hash);
        let block_count = info.map(|info| info.block_count).unwrap_or(0) + 1;

        store.block_put(txn, &hash, block);
        self.advance_head(txn, account, &block.previous(), hash);
        store.account_put(
            txn,
            &account,
            &AccountInfo::new(
                hash,
                rep_block,
                open_block,
                balance,
                self.clock.now(),
                block_count,
            ),
        );
        ProcessResult::Progress
    }

    fn apply_state(&self, txn: &mut WriteTransaction<'_>, state: &StateBlock) -> ProcessResult {
        let store = self.store();
        let hash = state.hash();
        let account = state.account();
        if Block::State(state.clone()).verify_signature(&account).is_err() {
            return ProcessResult::BadSignature;
        }

        let info = store.account_get(&*txn, &account).expect("account lookup");
        match &info {
            Some(info) if info.head != state.previous() => {
                let previous = state.previous();
                return if previous.is_zero()
                    || store.block_exists(&*txn, &previous).expect("block lookup")
                {
                    ProcessResult::Fork
                } else {
                    ProcessResult::GapPrevious
                };
            }
            None if !state.previous().is_zero() => return ProcessResult::GapPrevious,
            _ => {}
        }

        let prior = info.map(|info| info.balance).unwrap_or(Amount::ZERO);
        let link = state.link();
        if state.balance() < prior {
            store.pending_put(
                txn,
                &PendingKey::new(link.as_account(), hash),
                &PendingInfo::new(account, prior.abs_diff(state.balance())),
            );
        } else if state.balance() > prior {
            match self.take_pending(txn, account, link.as_block_hash()) {
                Ok(amount) if amount == state.balance().abs_diff(prior) => {}
                Ok(_) => return ProcessResult::BalanceMismatch,
                Err(result) => return result,
            }
        } else if !link.is_zero() {
            return ProcessResult::BalanceMismatch;
        }

        if let Some(info) = &info {
            let old_rep = self.representative_at(txn, &info.head);
            self.sub_weight(txn, &old_rep, prior);
        }
        self.add_weight(txn, &state.representative(), state.balance());

        let open_block = info.map(|info| info.open_block).unwrap_or(hash);
        let block_count = info.map(|info| info.block_count).unwrap_or(0) + 1;
        store.block_put(txn, &hash, &Block::State(state.clone()));
        self.advance_head(txn, account, &state.previous(), hash);
        store.account_put(
            txn,
            &account,
            &AccountInfo::new(
                hash,
                hash,
                open_block,
                state.balance(),
                self.clock.now(),
                block_count,
            ),
        );
        ProcessResult::Progress
    }

    /// Consume the pending entry for `source` addressed to `account`.
    fn take_pending(
        &self,
        txn: &mut WriteTransaction<'_>,
        account: Account,
        source: BlockHash,
    ) -> Result<Amount, ProcessResult> {
        let store = self.store();
        if !store.block_exists(&*txn, &source).expect("block lookup") {
            return Err(ProcessResult::GapSource);
        }
        let key = PendingKey::new(account, source);
        let pending = store
            .pending_get(&*txn, &key)
            .expect("pending lookup")
            .ok_or(ProcessResult::Unreceivable)?;
        store.pending_del(txn, &key);
        Ok(pending.amount)
    }

    fn representative_at(&self, txn: &WriteTransaction<'_>, head: &BlockHash) -> Account {
        self.ledger
            .representative_account(txn, head)
            .expect("representative of account head")
    }

    fn advance_head(
        &self,
        txn: &mut WriteTransaction<'_>,
        account: Account,
        previous: &BlockHash,
        head: BlockHash,
    ) {
        let store = self.store();
        if !previous.is_zero() {
            store.frontier_del(txn, previous);
        }
        store.frontier_put(txn, &head, &account);
    }

    fn add_weight(&self, txn: &mut WriteTransaction<'_>, rep: &Account, amount: Amount) {
        let store = self.store();
        let weight = store.representation_get(&*txn, rep).expect("weight lookup");
        let weight = weight.checked_add(amount).expect("weight overflow");
        store.representation_put(txn, rep, weight);
    }

    fn sub_weight(&self, txn: &mut WriteTransaction<'_>, rep: &Account, amount: Amount) {
        let store = self.store();
        let weight = store.representation_get(&*txn, rep).expect("weight lookup");
        let weight = weight.checked_sub(amount).expect("weight underflow");
        store.representation_put(txn, rep, weight);
    }
}

impl Default for Replay {
    fn default() -> Self {
        Self::new()
    }
}

/// Signed block constructors with zero work, for building scenarios.
pub mod blocks {
    use bdm_01_block_model::{Block, ChangeBlock, OpenBlock, ReceiveBlock, SendBlock, StateBlock};
    use shared_crypto::KeyPair;
    use shared_types::{Account, Amount, BlockHash, Link};

    pub fn send(key: &KeyPair, previous: BlockHash, destination: Account, balance: u128) -> Block {
        Block::from(SendBlock::new(
            previous,
            destination,
            Amount::raw(balance),
            key.private_key(),
            &key.account(),
            0,
        ))
    }

    pub fn receive(key: &KeyPair, previous: BlockHash, source: BlockHash) -> Block {
        Block::from(ReceiveBlock::new(
            previous,
            source,
            key.private_key(),
            &key.account(),
            0,
        ))
    }

    pub fn open(key: &KeyPair, source: BlockHash, representative: Account) -> Block {
        Block::from(OpenBlock::new(
            source,
            representative,
            key.account(),
            key.private_key(),
            &key.account(),
            0,
        ))
    }

    pub fn change(key: &KeyPair, previous: BlockHash, representative: Account) -> Block {
        Block::from(ChangeBlock::new(
            previous,
            representative,
            key.private_key(),
            &key.account(),
            0,
        ))
    }

    pub fn state(
        key: &KeyPair,
        previous: BlockHash,
        representative: Account,
        balance: u128,
        link: Link,
    ) -> Block {
        Block::from(StateBlock::new(
            key.account(),
            previous,
            representative,
            Amount::raw(balance),
            link,
            key.private_key(),
            &key.account(),
            0,
        ))
    }
}

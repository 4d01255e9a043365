//! # Fork Voting
//!
//! An account signs two blocks on the same predecessor. The ledger keeps
//! the first; representatives vote over the wire and the tally is weighed
//! with the delegated weight the ledger reports.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use bdm_01_block_model::test_utils::keypair;
    use bdm_01_block_model::Block;
    use bdm_02_ledger_store::Transaction;
    use bdm_05_voting::{TallyResult, Vote, Votes};
    use shared_crypto::KeyPair;
    use shared_types::{Amount, BlockHash};

    use crate::fixtures::blocks::{open, send};
    use crate::fixtures::{ProcessResult, Replay};

    const MAX: u128 = u128::MAX;

    struct Fork {
        replay: Replay,
        genesis: KeyPair,
        rep1: KeyPair,
        rep2: KeyPair,
        alice_open: Block,
        to_bob: Block,
        to_carol: Block,
    }

    /// rep1 holds 600 and rep2 holds 300 plus alice's delegation. Alice
    /// then signs two sends on her open block.
    fn fork() -> Fork {
        let replay = Replay::new();
        let genesis = replay.params.test_genesis_key().cloned().unwrap();
        let rep1 = keypair(0x31);
        let rep2 = keypair(0x32);
        let alice = keypair(0x33);

        let g1 = send(&genesis, replay.params.genesis().hash(), rep1.account(), MAX - 600);
        let g2 = send(&genesis, g1.hash(), rep2.account(), MAX - 900);
        let g3 = send(&genesis, g2.hash(), alice.account(), MAX - 1000);
        let r1_open = open(&rep1, g1.hash(), rep1.account());
        let r2_open = open(&rep2, g2.hash(), rep2.account());
        let alice_open = open(&alice, g3.hash(), rep2.account());
        replay.process_all(&[g1, g2, g3, r1_open, r2_open, alice_open.clone()]);

        let to_bob = send(&alice, alice_open.hash(), keypair(0x34).account(), 40);
        let to_carol = send(&alice, alice_open.hash(), keypair(0x35).account(), 10);

        Fork {
            replay,
            genesis,
            rep1,
            rep2,
            alice_open,
            to_bob,
            to_carol,
        }
    }

    /// Sign, ship and decode a vote the way a peer would receive it.
    fn over_the_wire(key: &KeyPair, sequence: u64, block: &Block) -> Vote {
        let vote = Vote::new(key.account(), key.private_key(), sequence, Arc::new(block.clone()));
        let received = Vote::from_bytes(&vote.to_bytes()).unwrap();
        received.validate().unwrap();
        received
    }

    fn weighted(votes: &Votes, replay: &Replay, txn: &dyn Transaction) -> HashMap<BlockHash, Amount> {
        let mut totals: HashMap<BlockHash, Amount> = HashMap::new();
        for (account, block) in votes.rep_votes() {
            let weight = replay.ledger.weight(txn, account).unwrap();
            let total = totals.entry(block.hash()).or_insert(Amount::ZERO);
            *total = total.checked_add(weight).unwrap();
        }
        totals
    }

    #[test]
    fn test_second_block_on_same_predecessor_is_a_fork() {
        let f = fork();
        assert_eq!(f.replay.process(&f.to_bob), ProcessResult::Progress);
        assert_eq!(f.replay.process(&f.to_carol), ProcessResult::Fork);

        let txn = f.replay.store().tx_begin_read();
        assert!(!f.replay.store().block_exists(&txn, &f.to_carol.hash()).unwrap());
        assert_eq!(f.to_bob.root(), f.to_carol.root());
        assert_eq!(f.to_bob.root(), f.alice_open.hash());
    }

    #[test]
    fn test_weighted_tally_of_conflicting_votes() {
        let f = fork();
        f.replay.process_all(&[f.to_bob.clone()]);

        let mut votes = Votes::new(Arc::new(f.to_bob.clone()), f.replay.params.not_an_account());
        assert_eq!(votes.id(), f.alice_open.hash());

        assert_eq!(votes.vote(&over_the_wire(&f.rep1, 1, &f.to_carol)), TallyResult::Vote);
        assert_eq!(votes.vote(&over_the_wire(&f.rep2, 1, &f.to_bob)), TallyResult::Vote);
        assert!(!votes.uncontested());

        let txn = f.replay.store().tx_begin_read();
        let totals = weighted(&votes, &f.replay, &txn);
        assert_eq!(totals[&f.to_carol.hash()], Amount::raw(600));
        assert_eq!(totals[&f.to_bob.hash()], Amount::raw(340));

        assert_eq!(votes.vote(&over_the_wire(&f.genesis, 1, &f.to_bob)), TallyResult::Vote);
        let totals = weighted(&votes, &f.replay, &txn);
        assert_eq!(totals[&f.to_bob.hash()], Amount::raw(MAX - 1000 + 340));
    }

    #[test]
    fn test_representative_switches_then_confirms() {
        let f = fork();
        f.replay.process_all(&[f.to_bob.clone()]);

        let mut votes = Votes::new(Arc::new(f.to_bob.clone()), f.replay.params.not_an_account());
        assert_eq!(votes.vote(&over_the_wire(&f.rep1, 1, &f.to_carol)), TallyResult::Vote);
        assert_eq!(votes.vote(&over_the_wire(&f.rep1, 2, &f.to_bob)), TallyResult::Changed);
        assert_eq!(votes.vote(&over_the_wire(&f.rep1, 3, &f.to_bob)), TallyResult::Confirm);

        assert!(votes.uncontested());
        assert_eq!(votes.rep_votes().len(), 2);
        assert_eq!(**votes.block_for(&f.rep1.account()).unwrap(), f.to_bob);
    }

    #[test]
    fn test_competing_opens_share_the_account_root() {
        let replay = Replay::new();
        let genesis = replay.params.test_genesis_key().cloned().unwrap();
        let dave = keypair(0x36);

        let g1 = send(&genesis, replay.params.genesis().hash(), dave.account(), MAX - 10);
        let g2 = send(&genesis, g1.hash(), dave.account(), MAX - 30);
        replay.process_all(&[g1.clone(), g2.clone()]);

        let first = open(&dave, g1.hash(), dave.account());
        let second = open(&dave, g2.hash(), dave.account());
        assert_eq!(replay.process(&first), ProcessResult::Progress);
        assert_eq!(replay.process(&second), ProcessResult::Fork);

        let votes = Votes::new(Arc::new(second), replay.params.not_an_account());
        assert_eq!(votes.id().as_bytes(), dave.account().as_bytes());
        assert_eq!(votes.id(), first.root());
    }
}

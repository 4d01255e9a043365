//! # Ledger Benchmarks
//!
//! | Group | Measures |
//! |-------|----------|
//! | `block-codec` | hashing, binary encode and decode per block kind |
//! | `chain-walk` | balance of a receive chain with no `block_info` cache |
//! | `votes` | vote signature validation, wire decode, tally |

use std::sync::Arc;
use std::time::Duration;

use bdm_01_block_model::test_utils::{keypair, sample_blocks};
use bdm_01_block_model::{block_from_bytes, serialize_block, Block};
use bdm_05_voting::{Vote, Votes};
use bdm_tests::fixtures::blocks::{open, receive, send};
use bdm_tests::fixtures::Replay;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use shared_types::{Account, BlockHash};

fn bench_block_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("block-codec");

    for block in sample_blocks() {
        let kind = block.block_type().as_str();
        let bytes = serialize_block(&block);

        group.bench_function(BenchmarkId::new("hash", kind), |b| {
            b.iter(|| black_box(block.hash()))
        });
        group.bench_function(BenchmarkId::new("serialize", kind), |b| {
            b.iter(|| black_box(serialize_block(&block)))
        });
        group.bench_function(BenchmarkId::new("deserialize", kind), |b| {
            b.iter(|| black_box(block_from_bytes(&bytes).is_ok()))
        });
    }

    group.finish();
}

/// Genesis sends `length` times to one account, which receives each send.
fn receive_chain(length: usize) -> (Replay, BlockHash) {
    let replay = Replay::new();
    let genesis = replay.params.test_genesis_key().cloned().expect("test network key");
    let mut rng = rand::thread_rng();
    let alice = keypair(rng.gen_range(0x80..=0xFF));

    let mut g_head = replay.params.genesis().hash();
    let mut g_balance = u128::MAX;
    let mut a_head: Option<BlockHash> = None;

    for _ in 0..length {
        g_balance -= rng.gen_range(1..1_000u128);
        let g_send = send(&genesis, g_head, alice.account(), g_balance);
        let a_block = match a_head {
            None => open(&alice, g_send.hash(), alice.account()),
            Some(previous) => receive(&alice, previous, g_send.hash()),
        };
        g_head = g_send.hash();
        a_head = Some(a_block.hash());
        replay.process_all(&[g_send, a_block]);
    }

    (replay, a_head.expect("chain has at least one block"))
}

fn bench_chain_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain-walk");
    group.measurement_time(Duration::from_secs(10));

    for length in [10usize, 100, 1_000] {
        let (replay, head) = receive_chain(length);
        let txn = replay.store().tx_begin_read();

        group.throughput(Throughput::Elements(length as u64));
        group.bench_with_input(BenchmarkId::new("balance", length), &head, |b, head| {
            b.iter(|| black_box(replay.ledger.balance(&txn, head).is_ok()))
        });
        group.bench_with_input(BenchmarkId::new("representative", length), &head, |b, head| {
            b.iter(|| black_box(replay.ledger.representative(&txn, head).is_ok()))
        });
    }

    group.finish();
}

fn bench_votes(c: &mut Criterion) {
    let mut group = c.benchmark_group("votes");
    let block: Arc<Block> = Arc::new(sample_blocks().remove(0));
    let key = keypair(0x10);
    let vote = Vote::new(key.account(), key.private_key(), 1, block.clone());
    let bytes = vote.to_bytes();

    group.bench_function("validate", |b| b.iter(|| black_box(vote.validate().is_ok())));
    group.bench_function("from_bytes", |b| {
        b.iter(|| black_box(Vote::from_bytes(&bytes).is_ok()))
    });

    for reps in [10usize, 100] {
        let votes: Vec<Vote> = (0..reps)
            .map(|i| {
                let rep = keypair(i as u8);
                Vote::new(rep.account(), rep.private_key(), 1, block.clone())
            })
            .collect();

        group.throughput(Throughput::Elements(reps as u64));
        group.bench_with_input(BenchmarkId::new("tally", reps), &votes, |b, votes| {
            b.iter(|| {
                let mut tally = Votes::new(block.clone(), Account::from_bytes([0xFF; 32]));
                for vote in votes {
                    black_box(tally.vote(vote));
                }
                tally.uncontested()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_block_codec, bench_chain_walk, bench_votes);
criterion_main!(benches);

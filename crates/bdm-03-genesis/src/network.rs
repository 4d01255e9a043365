//! # Network Parameters
//!
//! Everything that differs between the test, beta and live networks, chosen
//! once at startup and passed explicitly to whatever needs it.

use std::fmt;
use std::str::FromStr;

use rand::RngCore;
use shared_crypto::KeyPair;
use shared_types::{Account, Amount, BlockHash, RawKey};

use crate::errors::GenesisError;
use crate::genesis::Genesis;

const TEST_PRIVATE_KEY: &str = "34F0A37AAD20F4A260F0A5B3CB3D7FB50673212263E58A380BC10474BB039CE4";

const TEST_GENESIS: &str = r#"{
    "type": "open",
    "source": "B0311EA55708D6A53C75CDBF88300259C6D018522FE3D4D0A242E431F9E8B6D0",
    "representative": "bdm_3e3j5tkog48pnny9dmfzj1r16pg8t1e76dz5tmac6iq689wyjfpiij4txtdo",
    "account": "bdm_3e3j5tkog48pnny9dmfzj1r16pg8t1e76dz5tmac6iq689wyjfpiij4txtdo",
    "work": "9680625b39d3363d",
    "signature": "ECDA914373A2F0CA1296475BAEE40500A7F0A7AD72A5A80C81D7FAB7F6C802B2CC7DB50F5DD0FB25B2EF11761FA7344A158DD5A700B21BD47DE5BD0F63153A02"
}"#;

const BETA_GENESIS: &str = r#"{
    "type": "open",
    "source": "499D3E2FC2DB9FC2D0D4C445AD073C713E5634D7B2BBF24F57A727A1BABF68AB",
    "representative": "bdm_1kex9rqw7pwzrdafbj47on5mrwbycrtfheouyb9ohbs9n8xdyt7d4xso99rb",
    "account": "bdm_1kex9rqw7pwzrdafbj47on5mrwbycrtfheouyb9ohbs9n8xdyt7d4xso99rb",
    "work": "f066e9305cbee8c8",
    "signature": "45776E6CE2011A662BF1F59D4C7376FCF1249B31D345F582CC62381BB902C28C20EDE58FF57772D7CD65365FB4C3CD158C4FECE63AB3B0E0B0CC87A8ECC24607"
}"#;

const LIVE_GENESIS: &str = r#"{
    "type": "open",
    "source": "40C8E1D867DA316ED2404C8A69624FFCFF884B0ADBB26B58F7A0C27C0E044A34",
    "representative": "bdm_1i8aw9e8hpjjfub61m6cf7j6zz9zj37iopxkffehha84hi91akjn1n9s51fg",
    "account": "bdm_1i8aw9e8hpjjfub61m6cf7j6zz9zj37iopxkffehha84hi91akjn1n9s51fg",
    "work": "e6bdfde84acdea33",
    "signature": "2EA5AD03F2925707F25E1245E821042EEAFE8DEDD5E50A913B8E65DD13945B73654E63BDC8D23AA4B315BE60FE8E75103D00A95B24C6EA916A8A1145296C1903"
}"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    Test,
    Beta,
    Live,
}

impl Network {
    pub fn as_str(self) -> &'static str {
        match self {
            Network::Test => "test",
            Network::Beta => "beta",
            Network::Live => "live",
        }
    }

    /// Embedded JSON description of this network's genesis block.
    pub fn genesis_json(self) -> &'static str {
        match self {
            Network::Test => TEST_GENESIS,
            Network::Beta => BETA_GENESIS,
            Network::Live => LIVE_GENESIS,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = GenesisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "test" => Ok(Network::Test),
            "beta" => Ok(Network::Beta),
            "live" => Ok(Network::Live),
            _ => Err(GenesisError::UnknownNetwork(s.to_string())),
        }
    }
}

/// The constants chain walking depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerConstants {
    pub genesis_account: Account,
    pub genesis_amount: Amount,
}

/// Immutable per-network configuration.
#[derive(Debug, Clone)]
pub struct NetworkParameters {
    network: Network,
    genesis: Genesis,
    genesis_amount: Amount,
    burn_account: Account,
    not_a_block: BlockHash,
    not_an_account: Account,
    zero_key: KeyPair,
    test_genesis_key: Option<KeyPair>,
}

impl NetworkParameters {
    /// Parse the embedded genesis for `network` and draw fresh sentinels.
    ///
    /// `not_a_block` and `not_an_account` are random per process, so no two
    /// nodes share sentinel values.
    pub fn new(network: Network) -> Result<Self, GenesisError> {
        let genesis = Genesis::parse(network.genesis_json())?;

        let mut rng = rand::rngs::OsRng;
        let mut not_a_block = [0u8; 32];
        let mut not_an_account = [0u8; 32];
        rng.fill_bytes(&mut not_a_block);
        rng.fill_bytes(&mut not_an_account);

        let test_genesis_key = match network {
            Network::Test => Some(
                KeyPair::from_private_hex(TEST_PRIVATE_KEY)
                    .map_err(|e| GenesisError::InvalidKey(e.to_string()))?,
            ),
            Network::Beta | Network::Live => None,
        };

        Ok(Self {
            network,
            genesis,
            genesis_amount: Amount::MAX,
            burn_account: Account::zero(),
            not_a_block: BlockHash::from_bytes(not_a_block),
            not_an_account: Account::from_bytes(not_an_account),
            zero_key: KeyPair::from_private(RawKey::from_bytes([0u8; 32])),
            test_genesis_key,
        })
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn genesis(&self) -> &Genesis {
        &self.genesis
    }

    pub fn genesis_account(&self) -> Account {
        self.genesis.account()
    }

    /// The entire supply, minted by the genesis block.
    pub fn genesis_amount(&self) -> Amount {
        self.genesis_amount
    }

    /// Destination whose sends can never be received.
    pub fn burn_account(&self) -> Account {
        self.burn_account
    }

    pub fn not_a_block(&self) -> BlockHash {
        self.not_a_block
    }

    /// Sentinel voter standing for this node's own tentative choice.
    pub fn not_an_account(&self) -> Account {
        self.not_an_account
    }

    pub fn zero_key(&self) -> &KeyPair {
        &self.zero_key
    }

    /// Private key of the test genesis account; only known on the test network.
    pub fn test_genesis_key(&self) -> Option<&KeyPair> {
        self.test_genesis_key.as_ref()
    }

    pub fn ledger_constants(&self) -> LedgerConstants {
        LedgerConstants {
            genesis_account: self.genesis_account(),
            genesis_amount: self.genesis_amount,
        }
    }
}

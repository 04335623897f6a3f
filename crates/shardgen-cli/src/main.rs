//! filegen — genesis file generator for a sharded test network.
//!
//! Steps:
//!   1. Validate the sizing flags and parse the amounts
//!   2. Build the requested generation strategy and run it
//!   3. Optionally overwrite the last accounts with the demo addresses
//!   4. Check the generated accounts against the total supply
//!   5. Write genesis.json, nodesSetup.json and the PEM key files

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{bail, Context};
use clap::Parser;
use num_bigint::BigInt;
use tracing::info;

use shardgen_check::InitialAccountsChecker;
use shardgen_core::amount::parse_non_negative;
use shardgen_core::constants::{
    DEFAULT_CHAIN_ID, DEFAULT_HYSTERESIS, DEFAULT_INITIAL_RATING, DEFAULT_MINIMUM_INITIAL_BALANCE,
    DEFAULT_MIN_TX_VERSION, DEFAULT_NODE_PRICE, DEFAULT_ROUND_DURATION_MS, DEFAULT_TOTAL_SUPPLY,
    DEFAULT_VM_TYPE, DEFAULT_WALLET_HRP, STAKED_TYPE, VALIDATOR_PUB_KEY_LEN, WALLET_PUB_KEY_LEN,
};
use shardgen_crypto::{
    Bech32PubkeyConverter, BlsKeyGenerator, Ed25519KeyGenerator, HexPubkeyConverter, KeccakAddressDeriver,
    PubkeyConverter, SeededRandomizer,
};
use shardgen_generate::{apply_demo_addresses, create_data_generator, ArgBaseGenerator, ArgDataGenerator, DemoAddresses};
use shardgen_output::{create_output_handler_argument, NodesSetupConfig, OutputHandler, ShardCoordinator};

#[derive(Parser, Debug)]
#[command(name = "filegen", version, about = "Generate genesis and node setup files for a sharded network")]
struct Args {
    /// Directory receiving the generated files.
    #[arg(long, default_value = "output")]
    output_directory: PathBuf,

    #[arg(long, default_value_t = 3)]
    num_shards: u32,

    #[arg(long, default_value_t = 4)]
    num_validators_per_shard: u32,

    #[arg(long, default_value_t = 1)]
    num_observers_per_shard: u32,

    #[arg(long, default_value_t = 4)]
    num_validators_meta: u32,

    #[arg(long, default_value_t = 1)]
    num_observers_meta: u32,

    #[arg(long, default_value_t = 3)]
    consensus_group_size: u32,

    #[arg(long, default_value_t = 3)]
    meta_consensus_group_size: u32,

    /// Total supply in base units.
    #[arg(long, default_value = DEFAULT_TOTAL_SUPPLY)]
    total_supply: String,

    /// Stake required per validator, in base units.
    #[arg(long, default_value = DEFAULT_NODE_PRICE)]
    node_price: String,

    /// Floor balance in richest-account mode and claim-gas balance of each
    /// delegator, in base units.
    #[arg(long, default_value = DEFAULT_MINIMUM_INITIAL_BALANCE)]
    minimum_balance: String,

    #[arg(long, default_value_t = DEFAULT_INITIAL_RATING)]
    initial_rating: u32,

    /// Round duration in milliseconds.
    #[arg(long, default_value_t = DEFAULT_ROUND_DURATION_MS)]
    round_duration: u64,

    #[arg(long, default_value_t = DEFAULT_HYSTERESIS)]
    hysteresis: f32,

    #[arg(long)]
    adaptivity: bool,

    #[arg(long, default_value = DEFAULT_CHAIN_ID)]
    chain_id: String,

    /// Minimum transaction version.
    #[arg(long, default_value_t = DEFAULT_MIN_TX_VERSION)]
    tx_version: u32,

    /// One of `direct`, `delegated`, `mixed`.
    #[arg(long, default_value = STAKED_TYPE)]
    generation_type: String,

    /// Give every wallet the minimum balance and the rest to the first one.
    #[arg(long)]
    richest_account: bool,

    #[arg(long, default_value_t = 1)]
    max_num_nodes_on_owner: usize,

    #[arg(long, default_value_t = 0)]
    num_additional_accounts: usize,

    #[arg(long, default_value_t = 0)]
    num_delegators: usize,

    /// Validators staked through the delegation contract (mixed only).
    #[arg(long, default_value_t = 0)]
    num_delegated_nodes: usize,

    /// Address deploying the delegation contract.
    #[arg(long, default_value = "erd1ulhw20j7jvgfgak5p05kv667k5k9f320sgef5ayxkt9784ql0zssrzyhjp")]
    delegation_owner_public_key: String,

    #[arg(long, default_value_t = 0)]
    delegation_owner_nonce: u64,

    /// Hex-encoded VM type of the delegation contract.
    #[arg(long, default_value = DEFAULT_VM_TYPE)]
    vm_type: String,

    #[arg(long, default_value = DEFAULT_WALLET_HRP)]
    wallet_hrp: String,

    /// Rotate wallet keys through all shards.
    #[arg(long)]
    generate_in_all_shards: bool,

    /// Also write accounts.json for the transaction generator.
    #[arg(long)]
    txgen: bool,

    /// Also write delegators.pem.
    #[arg(long)]
    delegators_file: bool,

    /// Seed for validator grouping; random when absent.
    #[arg(long)]
    seed: Option<u64>,

    /// faucet,web,controller,sponsor addresses replacing the last four
    /// accounts.
    #[arg(long, value_delimiter = ',')]
    demo_addresses: Vec<String>,
}

impl Args {
    fn num_validators(&self) -> anyhow::Result<usize> {
        node_count(self.num_shards, self.num_validators_per_shard, self.num_validators_meta)
            .context("number of validators does not fit in u32")
    }

    fn num_observers(&self) -> anyhow::Result<usize> {
        node_count(self.num_shards, self.num_observers_per_shard, self.num_observers_meta)
            .context("number of observers does not fit in u32")
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.num_shards < 1 {
            bail!("num-shards must be at least 1");
        }
        if self.num_validators_per_shard < 1 {
            bail!("num-validators-per-shard must be at least 1");
        }
        if self.num_validators_meta < 1 {
            bail!("num-validators-meta must be at least 1");
        }
        if self.consensus_group_size < 1 || self.consensus_group_size > self.num_validators_per_shard {
            bail!(
                "consensus-group-size {} must be between 1 and num-validators-per-shard {}",
                self.consensus_group_size,
                self.num_validators_per_shard
            );
        }
        if self.meta_consensus_group_size < 1 || self.meta_consensus_group_size > self.num_validators_meta {
            bail!(
                "meta-consensus-group-size {} must be between 1 and num-validators-meta {}",
                self.meta_consensus_group_size,
                self.num_validators_meta
            );
        }
        if !self.demo_addresses.is_empty() && self.demo_addresses.len() != 4 {
            bail!("demo-addresses takes exactly four addresses: faucet,web,controller,sponsor");
        }
        self.num_validators()?;
        self.num_observers()?;
        Ok(())
    }

    fn demo(&self) -> Option<DemoAddresses> {
        match self.demo_addresses.as_slice() {
            [faucet, web, controller, sponsor] => Some(DemoAddresses {
                faucet: faucet.clone(),
                web: web.clone(),
                controller: controller.clone(),
                sponsor: sponsor.clone(),
            }),
            _ => None,
        }
    }
}

struct Amounts {
    total_supply: BigInt,
    node_price: BigInt,
    minimum_balance: BigInt,
}

fn parse_amounts(args: &Args) -> anyhow::Result<Amounts> {
    Ok(Amounts {
        total_supply: parse_non_negative(&args.total_supply).context("parsing total-supply")?,
        node_price: parse_non_negative(&args.node_price).context("parsing node-price")?,
        minimum_balance: parse_non_negative(&args.minimum_balance).context("parsing minimum-balance")?,
    })
}

fn node_count(num_shards: u32, per_shard: u32, meta: u32) -> Option<usize> {
    let total = num_shards.checked_mul(per_shard)?.checked_add(meta)?;
    usize::try_from(total).ok()
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    run(Args::parse())
}

fn run(args: Args) -> anyhow::Result<()> {
    let started = Instant::now();
    args.validate()?;
    let amounts = parse_amounts(&args)?;
    let num_validators = args.num_validators()?;
    let num_observers = args.num_observers()?;

    let wallet_converter: Arc<dyn PubkeyConverter> = Arc::new(
        Bech32PubkeyConverter::new(WALLET_PUB_KEY_LEN, &args.wallet_hrp).context("creating wallet converter")?,
    );
    let validator_converter: Arc<dyn PubkeyConverter> =
        Arc::new(HexPubkeyConverter::new(VALIDATOR_PUB_KEY_LEN).context("creating validator converter")?);

    info!(
        generation_type = %args.generation_type,
        shards = args.num_shards,
        validators = num_validators,
        observers = num_observers,
        "starting generation"
    );

    // ── Generation ────────────────────────────────────────────────────────────
    let mut strategy = create_data_generator(ArgDataGenerator {
        generation_type: args.generation_type.clone(),
        base: ArgBaseGenerator {
            key_generator_for_validators: Some(Box::new(BlsKeyGenerator)),
            key_generator_for_wallets: Some(Box::new(Ed25519KeyGenerator)),
            wallet_pub_key_converter: Some(wallet_converter.clone()),
            validator_pub_key_converter: Some(validator_converter.clone()),
            num_validator_bls_keys: num_validators,
            num_observer_bls_keys: num_observers,
            num_additional_wallet_keys: args.num_additional_accounts,
            richest_account_mode: args.richest_account,
            node_price: Some(amounts.node_price.clone()),
            total_supply: amounts.total_supply.clone(),
            minimum_balance: amounts.minimum_balance,
            initial_rating: args.initial_rating,
            num_shards: args.num_shards,
            generate_in_all_shards: args.generate_in_all_shards,
        },
        max_num_nodes_on_owner: args.max_num_nodes_on_owner,
        int_randomizer: Some(Box::new(SeededRandomizer::new(args.seed))),
        delegation_owner_pk_string: args.delegation_owner_public_key.clone(),
        delegation_owner_nonce: args.delegation_owner_nonce,
        vm_type: args.vm_type.clone(),
        num_delegators: args.num_delegators,
        num_delegated_nodes: args.num_delegated_nodes,
        address_deriver: Box::new(KeccakAddressDeriver::new(wallet_converter.address_len())),
    })
    .context("creating data generator")?;

    let mut output = strategy.generate().context("generating data")?;

    if let Some(demo) = args.demo() {
        apply_demo_addresses(&mut output.initial_accounts, &demo, wallet_converter.as_ref())
            .context("applying demo addresses")?;
    }

    // ── Genesis gate ──────────────────────────────────────────────────────────
    let checker = InitialAccountsChecker::new(Some(amounts.node_price), Some(amounts.total_supply))
        .context("creating initial accounts checker")?;
    checker
        .check_initial_accounts(&output.initial_accounts)
        .context("checking initial accounts")?;

    // ── Output ────────────────────────────────────────────────────────────────
    std::fs::create_dir_all(&args.output_directory)
        .with_context(|| format!("creating output directory {}", args.output_directory.display()))?;

    let shard_coordinator = ShardCoordinator::new(args.num_shards).context("creating shard coordinator")?;
    let arg_output = create_output_handler_argument(
        &args.output_directory,
        validator_converter,
        wallet_converter,
        shard_coordinator,
        args.txgen,
        args.delegators_file,
        NodesSetupConfig {
            round_duration: args.round_duration,
            consensus_group_size: args.consensus_group_size,
            num_of_nodes_per_shard: args.num_validators_per_shard,
            metachain_consensus_group_size: args.meta_consensus_group_size,
            num_of_metachain_nodes: args.num_validators_meta,
            hysteresis: args.hysteresis,
            adaptivity: args.adaptivity,
            chain_id: args.chain_id.clone(),
            min_transaction_version: args.tx_version,
        },
    )
    .context("creating output files")?;

    let mut handler = OutputHandler::new(arg_output).context("creating output handler")?;
    handler.write_data(&output).context("writing output files")?;

    info!(
        directory = %args.output_directory.display(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "files generated"
    );
    Ok(())
}

use std::path::Path;
use std::sync::Arc;

use shardgen_core::{BlsKey, GenError, GeneratorOutput, InitialAccount, InitialNode, NodesSetup, WalletKey};
use shardgen_crypto::PubkeyConverter;
use tracing::{debug, info};

use crate::config::NodesSetupConfig;
use crate::file_handler::FileHandler;
use crate::shard::ShardCoordinator;
use crate::txgen::txgen_accounts;

pub const WALLET_KEY_FILE_NAME: &str = "walletKey.pem";
pub const VALIDATOR_KEY_FILE_NAME: &str = "validatorKey.pem";
pub const GENESIS_FILE_NAME: &str = "genesis.json";
pub const NODES_SETUP_FILE_NAME: &str = "nodesSetup.json";
pub const TXGEN_ACCOUNTS_FILE_NAME: &str = "accounts.json";
pub const DELEGATORS_FILE_NAME: &str = "delegators.pem";

#[derive(Default)]
pub struct ArgOutputHandler {
    pub wallet_handler: Option<FileHandler>,
    pub validator_key_handler: Option<FileHandler>,
    pub genesis_handler: Option<FileHandler>,
    pub nodes_setup_handler: Option<FileHandler>,
    /// Optional; no `accounts.json` is written without it.
    pub txgen_accounts_handler: Option<FileHandler>,
    /// Optional; no `delegators.pem` is written without it.
    pub delegators_handler: Option<FileHandler>,
    pub validator_pub_key_converter: Option<Arc<dyn PubkeyConverter>>,
    pub wallet_pub_key_converter: Option<Arc<dyn PubkeyConverter>>,
    pub shard_coordinator: Option<ShardCoordinator>,
    pub nodes_setup: NodesSetupConfig,
}

/// Create the file handlers of every output file inside
/// `output_directory`.
pub fn create_output_handler_argument(
    output_directory: &Path,
    validator_pub_key_converter: Arc<dyn PubkeyConverter>,
    wallet_pub_key_converter: Arc<dyn PubkeyConverter>,
    shard_coordinator: ShardCoordinator,
    output_txgen_accounts: bool,
    output_delegators: bool,
    nodes_setup: NodesSetupConfig,
) -> Result<ArgOutputHandler, GenError> {
    let optional = |enabled: bool, name: &str| -> Result<Option<FileHandler>, GenError> {
        if !enabled {
            return Ok(None);
        }
        FileHandler::new(output_directory, name).map(Some)
    };

    Ok(ArgOutputHandler {
        wallet_handler: Some(FileHandler::new(output_directory, WALLET_KEY_FILE_NAME)?),
        nodes_setup_handler: Some(FileHandler::new(output_directory, NODES_SETUP_FILE_NAME)?),
        genesis_handler: Some(FileHandler::new(output_directory, GENESIS_FILE_NAME)?),
        validator_key_handler: Some(FileHandler::new(output_directory, VALIDATOR_KEY_FILE_NAME)?),
        txgen_accounts_handler: optional(output_txgen_accounts, TXGEN_ACCOUNTS_FILE_NAME)?,
        delegators_handler: optional(output_delegators, DELEGATORS_FILE_NAME)?,
        validator_pub_key_converter: Some(validator_pub_key_converter),
        wallet_pub_key_converter: Some(wallet_pub_key_converter),
        shard_coordinator: Some(shard_coordinator),
        nodes_setup,
    })
}

/// Writes a [`GeneratorOutput`] to the output files.
pub struct OutputHandler {
    wallet_handler: FileHandler,
    validator_key_handler: FileHandler,
    genesis_handler: FileHandler,
    nodes_setup_handler: FileHandler,
    txgen_accounts_handler: Option<FileHandler>,
    delegators_handler: Option<FileHandler>,
    validator_pub_key_converter: Arc<dyn PubkeyConverter>,
    wallet_pub_key_converter: Arc<dyn PubkeyConverter>,
    shard_coordinator: ShardCoordinator,
    nodes_setup: NodesSetupConfig,
}

impl OutputHandler {
    pub fn new(arg: ArgOutputHandler) -> Result<Self, GenError> {
        let wallet_handler = arg
            .wallet_handler
            .ok_or(GenError::NilFileHandler { field: "WalletHandler" })?;
        let validator_key_handler = arg
            .validator_key_handler
            .ok_or(GenError::NilFileHandler { field: "ValidatorKeyHandler" })?;
        let genesis_handler = arg
            .genesis_handler
            .ok_or(GenError::NilFileHandler { field: "GenesisHandler" })?;
        let nodes_setup_handler = arg
            .nodes_setup_handler
            .ok_or(GenError::NilFileHandler { field: "NodesSetupHandler" })?;
        let validator_pub_key_converter = arg
            .validator_pub_key_converter
            .ok_or(GenError::NilPubKeyConverter { field: "ValidatorPubKeyConverter" })?;
        let wallet_pub_key_converter = arg
            .wallet_pub_key_converter
            .ok_or(GenError::NilPubKeyConverter { field: "WalletPubKeyConverter" })?;
        let shard_coordinator = arg
            .shard_coordinator
            .ok_or(GenError::NilValue { field: "ShardCoordinator" })?;

        Ok(Self {
            wallet_handler,
            validator_key_handler,
            genesis_handler,
            nodes_setup_handler,
            txgen_accounts_handler: arg.txgen_accounts_handler,
            delegators_handler: arg.delegators_handler,
            validator_pub_key_converter,
            wallet_pub_key_converter,
            shard_coordinator,
            nodes_setup: arg.nodes_setup,
        })
    }

    pub fn write_data(&mut self, output: &GeneratorOutput) -> Result<(), GenError> {
        self.write_nodes_setup(&output.initial_nodes)?;
        self.write_genesis_file(&output.initial_accounts)?;
        self.write_validator_keys(&output.validator_bls_keys, &output.observer_bls_keys)?;
        self.write_wallet_keys(&output.wallet_keys)?;
        self.write_delegator_keys(&output.delegator_keys)?;
        self.write_txgen_accounts(&output.additional_keys)?;

        info!(
            accounts = output.initial_accounts.len(),
            nodes = output.initial_nodes.len(),
            wallets = output.wallet_keys.len(),
            delegators = output.delegator_keys.len(),
            "output files written"
        );
        Ok(())
    }

    fn write_nodes_setup(&mut self, initial_nodes: &[InitialNode]) -> Result<(), GenError> {
        let cfg = &self.nodes_setup;
        let setup = NodesSetup {
            start_time: 0,
            round_duration: cfg.round_duration,
            consensus_group_size: cfg.consensus_group_size,
            min_nodes_per_shard: cfg.num_of_nodes_per_shard,
            meta_chain_consensus_group_size: cfg.metachain_consensus_group_size,
            meta_chain_min_nodes: cfg.num_of_metachain_nodes,
            hysteresis: cfg.hysteresis,
            adaptivity: cfg.adaptivity,
            chain_id: cfg.chain_id.clone(),
            min_transaction_version: cfg.min_transaction_version,
            initial_nodes: initial_nodes.to_vec(),
        };
        self.nodes_setup_handler.write_object_in_file(&setup)
    }

    fn write_genesis_file(&mut self, initial_accounts: &[InitialAccount]) -> Result<(), GenError> {
        self.genesis_handler.write_object_in_file(initial_accounts)
    }

    fn write_validator_keys(&mut self, validators: &[BlsKey], observers: &[BlsKey]) -> Result<(), GenError> {
        for key in validators.iter().chain(observers) {
            let pk = self.validator_pub_key_converter.encode(&key.pub_key_bytes)?;
            self.validator_key_handler
                .save_sk_to_pem_file(&pk, &key.priv_key_bytes)?;
        }
        Ok(())
    }

    fn write_wallet_keys(&mut self, wallets: &[WalletKey]) -> Result<(), GenError> {
        save_wallet_keys(&mut self.wallet_handler, self.wallet_pub_key_converter.as_ref(), wallets)
    }

    fn write_delegator_keys(&mut self, delegators: &[WalletKey]) -> Result<(), GenError> {
        match self.delegators_handler.as_mut() {
            Some(handler) => save_wallet_keys(handler, self.wallet_pub_key_converter.as_ref(), delegators),
            None => {
                debug!("delegators file not requested, skipping delegator keys");
                Ok(())
            }
        }
    }

    fn write_txgen_accounts(&mut self, additional: &[WalletKey]) -> Result<(), GenError> {
        let Some(handler) = self.txgen_accounts_handler.as_mut() else {
            debug!("txgen accounts file not requested, skipping");
            return Ok(());
        };
        let accounts = txgen_accounts(
            additional,
            self.wallet_pub_key_converter.as_ref(),
            &self.shard_coordinator,
        )?;
        handler.write_object_in_file(&accounts)
    }
}

fn save_wallet_keys(
    handler: &mut FileHandler,
    converter: &dyn PubkeyConverter,
    keys: &[WalletKey],
) -> Result<(), GenError> {
    for key in keys {
        let address = converter.encode(&key.pub_key_bytes)?;
        handler.save_sk_to_pem_file(&address, &key.priv_key_bytes)?;
    }
    Ok(())
}

pub mod config;
pub mod file_handler;
pub mod handler;
pub mod shard;
pub mod txgen;

pub use config::NodesSetupConfig;
pub use file_handler::FileHandler;
pub use handler::{create_output_handler_argument, ArgOutputHandler, OutputHandler};
pub use shard::ShardCoordinator;
pub use txgen::TxgenAccount;

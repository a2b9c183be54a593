use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("client error: {0}")]
    Client(#[from] fundflow_client::ClientError),

    #[error("transaction building failed: {0}")]
    TransactionBuild(#[from] fundflow_sdk::TransactionBuilderError),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("{0}")]
    NotAllowed(String),
}

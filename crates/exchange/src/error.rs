use {alloy::primitives::Address, model::params::ParamsError};

/// Failures of the order library.
///
/// Validity codes returned by the verifier are values, not errors. An order
/// that fails a check still verifies successfully.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The operation needs a signing identity but the exchange was created in
    /// read-only mode.
    #[error("no signing identity configured")]
    Signer,
    #[error("order signer {maker} is not the signing identity {identity}")]
    SignerMismatch { maker: Address, identity: Address },
    #[error(transparent)]
    Timestamp(#[from] TimestampError),
    #[error(transparent)]
    Params(#[from] ParamsError),
    #[error("got {orders} orders but {signatures} signatures")]
    BatchMismatch { orders: usize, signatures: usize },
    #[error("signing failed: {0:#}")]
    Signing(anyhow::Error),
    #[error("ledger read failed: {0:#}")]
    Remote(anyhow::Error),
}

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum TimestampError {
    #[error("{field} {value} is not expressed in seconds")]
    NotSeconds { field: &'static str, value: u64 },
    #[error("start time {start} is not before end time {end}")]
    StartNotBeforeEnd { start: u64, end: u64 },
}

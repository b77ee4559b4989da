pub use lib_core::*;
pub use lib_networking::*;

/// Resolves the public IP with the fixed endpoint and timeout.
pub async fn run() -> Result<LookupResult, CliError> {
    Ok(IpResolver::new().lookup().await?)
}

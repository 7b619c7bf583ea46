//! # deskpull SDK
//!
//! Client library for pulling ticket-queue and account-directory data
//! into Polars dataframes.
//!
//! The SDK provides:
//!
//! * [`EnvFile`] / [`QueueCredentials`] / [`DirectoryKeys`] — secrets
//!   looked up by file path, resolved before any network call.
//! * [`QueueClient`] — client-credentials token exchange plus the
//!   authenticated ticket pull.
//! * [`DirectoryClient`] — keyed REST pulls for users, licenses and
//!   license allocations.
//! * [`snapshot`] — JSON persistence of the last successful pull for
//!   offline re-runs.
//! * [`records_to_frame`] — schema-inferred dataframe construction.
//! * [`PullError`] — unified error type for all SDK operations.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use deskpull_sdk::{records_to_frame, EnvFile, QueueClient, QueueCredentials};
//!
//! # async fn run() -> Result<(), deskpull_sdk::PullError> {
//! let env = EnvFile::load(".env")?;
//! let creds = QueueCredentials::from_env_file(&env)?;
//!
//! let client = QueueClient::connect_with_client_credentials(
//!     "https://id.example.com",
//!     "https://desk.example.com",
//!     &creds,
//! )
//! .await?;
//!
//! let tickets = client.fetch_open_tickets().await?;
//! let frame = records_to_frame(&tickets)?;
//! println!("{frame}");
//! # Ok(())
//! # }
//! ```

pub mod credentials;
pub mod directory;
pub mod error;
pub mod frame;
pub mod queue;
pub mod snapshot;

pub use credentials::{DirectoryKey, DirectoryKeys, EnvFile, QueueCredentials};
pub use directory::DirectoryClient;
pub use error::PullError;
pub use frame::{keyed_records_to_frame, records_to_frame};
pub use queue::QueueClient;
pub use snapshot::{load_snapshot, write_snapshot};

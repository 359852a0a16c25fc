//! Concurrent, time-budgeted load of the three roster tables.

use std::time::Duration;

use bv_directory::{Directory, DirectoryError};
use thiserror::Error;

use super::source::{RosterSource, SourceError};

/// Errors that can occur while loading the directory.
#[derive(Debug, Error)]
pub enum LoadError {
    /// One of the three tables could not be downloaded.
    #[error("failed to fetch reference data: {0}")]
    Source(#[from] SourceError),

    /// A downloaded table could not be parsed.
    #[error("reference data failed to parse: {0}")]
    Parse(#[from] DirectoryError),

    /// The combined download did not finish within the budget.
    #[error("loading reference data exceeded the {}s budget", .budget.as_secs())]
    Timeout {
        /// The budget that was exceeded.
        budget: Duration,
    },
}

/// Fetch all three roster tables concurrently and build a [`Directory`].
///
/// The three downloads run in parallel and share a single time budget. The
/// load is all-or-nothing: the first fetch failure cancels the others, and a
/// parse failure in any table fails the whole load. A partially populated
/// directory is never returned.
pub async fn load_directory(
    source: &dyn RosterSource,
    budget: Duration,
) -> Result<Directory, LoadError> {
    let fetches = async {
        tokio::try_join!(
            source.fetch_senators(),
            source.fetch_assembly(),
            source.fetch_districts(),
        )
    };

    let (senators, assembly, districts) = tokio::time::timeout(budget, fetches)
        .await
        .map_err(|_| LoadError::Timeout { budget })??;

    let directory = Directory::from_csv(&senators, &assembly, &districts)?;

    tracing::info!(
        senators = directory.senators().len(),
        assembly = directory.assembly_members().len(),
        districts = directory.districts().len(),
        "reference data loaded"
    );

    Ok(directory)
}

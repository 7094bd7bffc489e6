//! Reloading a shared session from a source.

use tokio::sync::Mutex;
use tracing::{info, warn};

use worddrill_core::error::FetchError;
use worddrill_core::ingest::{load_dataset, IngestReport};
use worddrill_core::session::PracticeSession;
use worddrill_core::traits::DatasetSource;

/// Result of a [`reload`].
#[derive(Debug, Clone)]
pub enum ReloadOutcome {
    /// The pool was replaced with `records` items.
    Installed { records: usize, report: IngestReport },
    /// A newer reload started while this one was fetching; its data was dropped.
    Superseded,
}

/// Fetch a fresh pool for `session` from `source`.
///
/// The lock is held only to take a load ticket and to install the result,
/// never across the fetch. On a fetch error the session keeps its current pool.
///
/// The most recent request wins even when it fails: its ticket is taken
/// before fetching, so an older reload still in flight comes back
/// [`ReloadOutcome::Superseded`] and the pool from before both requests stays.
pub async fn reload(
    session: &Mutex<PracticeSession>,
    source: &dyn DatasetSource,
) -> Result<ReloadOutcome, FetchError> {
    let (ticket, kind) = {
        let mut guard = session.lock().await;
        (guard.begin_load(), guard.mode().dataset_kind())
    };

    let ingestion = match load_dataset(source, kind).await {
        Ok(ingestion) => ingestion,
        Err(e) => {
            warn!(source = source.name(), error = %e, "dataset fetch failed");
            return Err(e);
        }
    };

    let records = ingestion.records.len();
    let mut guard = session.lock().await;
    if guard.finish_load(ticket, ingestion.records) {
        info!(source = source.name(), records, "session reloaded");
        Ok(ReloadOutcome::Installed {
            records,
            report: ingestion.report,
        })
    } else {
        Ok(ReloadOutcome::Superseded)
    }
}

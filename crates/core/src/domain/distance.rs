// Distance Record - per-job travel metadata

use serde::{Deserialize, Serialize};

use super::job::JobId;

/// Travel record attached 1:1 to a job by `job_id`.
///
/// Values are free text as entered by admins ("10 km", "2 h"); the service
/// upserts them and never reads them back through this surface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distance {
    pub job_id: JobId,
    pub distance: String,
    pub time: String,
}

//! Best-effort activity feed writer shared by the mutating services.

use crate::domain::{ActivityRepository, NewActivity};

/// Append an entry to the activity feed.
///
/// A failed insert is logged and swallowed; the mutation it describes has
/// already been committed.
pub async fn record_activity<A>(repo: &A, activity: NewActivity)
where
    A: ActivityRepository + ?Sized,
{
    if let Err(e) = repo.create(&activity).await {
        tracing::warn!(
            activity_type = activity.activity_type.as_str(),
            reference_id = ?activity.reference_id,
            error = %e,
            "Failed to record activity"
        );
    }
}

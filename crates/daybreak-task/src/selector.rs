use daybreak_cloud::InstanceApi;
use daybreak_common::{FilterTerm, InstanceRef, InstanceState, TaskError};

/// Tag whose value names the UTC hour an instance should be started at.
pub const SCHEDULE_TAG: &str = "scheduled_on";

/// One read-only listing call: stopped instances whose schedule tag equals
/// `hour` (zero-padded two-digit, from the invocation clock). An empty
/// result is a normal outcome.
pub async fn select_due_instances(
    api: &dyn InstanceApi,
    hour: &str,
) -> Result<Vec<InstanceRef>, TaskError> {
    let filters = [
        FilterTerm::tag(SCHEDULE_TAG, hour),
        FilterTerm::state(InstanceState::Stopped),
    ];
    api.list(&filters).await.map_err(TaskError::Listing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use daybreak_cloud::MemoryInstanceApi;

    #[tokio::test]
    async fn matches_hour_tag_and_stopped_state() {
        let api = MemoryInstanceApi::new();
        api.add_instance("i-due", InstanceState::Stopped, &[(SCHEDULE_TAG, "14")])
            .await;
        api.add_instance("i-other-hour", InstanceState::Stopped, &[(SCHEDULE_TAG, "15")])
            .await;
        api.add_instance("i-running", InstanceState::Running, &[(SCHEDULE_TAG, "14")])
            .await;
        api.add_instance("i-untagged", InstanceState::Stopped, &[])
            .await;

        let got = select_due_instances(&api, "14").await.unwrap();
        assert_eq!(got, vec![InstanceRef::new("i-due", InstanceState::Stopped)]);
    }

    #[tokio::test]
    async fn empty_selection_is_ok() {
        let api = MemoryInstanceApi::new();
        let got = select_due_instances(&api, "09").await.unwrap();
        assert!(got.is_empty());
    }

    #[tokio::test]
    async fn listing_failure_maps_to_listing_error() {
        let api = MemoryInstanceApi::new();
        api.fail_listing("transport down").await;

        let err = select_due_instances(&api, "14").await.unwrap_err();
        assert!(matches!(err, TaskError::Listing(_)));
        assert!(err.to_string().contains("instance listing failed"));
    }
}

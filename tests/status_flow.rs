mod common;

use chrono::{TimeZone, Utc};
use common::RecordingGateway;
use procure_portal::workflows::procurement::{
    ApplicationId, ApplicationStatus, AppliedServiceView, ProcurementId, StatusTransitionFlow,
};

fn pending_record() -> AppliedServiceView {
    AppliedServiceView {
        application_id: ApplicationId("APP-77".to_string()),
        post_id: ProcurementId("NREP-PRF-2024-014".to_string()),
        status: ApplicationStatus::Pending,
        comments: String::new(),
        updated_at: Utc.with_ymd_and_hms(2024, 11, 1, 8, 0, 0).unwrap(),
    }
}

#[test]
fn confirmed_update_adopts_the_backend_record() {
    let gateway = RecordingGateway::new();
    let confirmed = AppliedServiceView {
        status: ApplicationStatus::UnderReview,
        comments: "Shortlisted for technical evaluation".to_string(),
        updated_at: Utc.with_ymd_and_hms(2024, 11, 2, 9, 30, 0).unwrap(),
        ..pending_record()
    };
    gateway.set_status_response(Ok(confirmed.clone()));

    let mut flow = StatusTransitionFlow::new(&pending_record());
    let view = flow
        .update(
            &gateway,
            ApplicationStatus::UnderReview,
            "Shortlisted for technical evaluation",
        )
        .expect("backend accepted");

    assert_eq!(view.status, ApplicationStatus::UnderReview);
    assert_eq!(view.updated_at, confirmed.updated_at);

    let updates = gateway.status_updates.lock().unwrap();
    let (id, update) = updates.last().expect("one update sent");
    assert_eq!(id.0, "APP-77");
    assert_eq!(update.status, ApplicationStatus::UnderReview);
    assert_eq!(update.comments, "Shortlisted for technical evaluation");
}

#[test]
fn rejected_update_rolls_the_view_back() {
    let gateway = RecordingGateway::new();
    gateway.set_status_response(Err((502, "upstream unavailable".to_string())));

    let record = pending_record();
    let mut flow = StatusTransitionFlow::new(&record);
    let err = flow
        .update(&gateway, ApplicationStatus::Approved, "Looks good")
        .expect_err("backend rejected");

    assert_eq!(err.to_string(), "Failed to update status. Please try again.");
    assert_eq!(flow.view().status, ApplicationStatus::Pending);
    assert_eq!(flow.view().comments, record.comments);
    assert_eq!(flow.view().updated_at, record.updated_at);
}

#[test]
fn any_status_may_move_to_any_other() {
    let gateway = RecordingGateway::new();
    let mut flow = StatusTransitionFlow::new(&AppliedServiceView {
        status: ApplicationStatus::Rejected,
        ..pending_record()
    });
    let confirmed = AppliedServiceView {
        status: ApplicationStatus::Approved,
        ..pending_record()
    };
    gateway.set_status_response(Ok(confirmed));

    let view = flow
        .update(&gateway, ApplicationStatus::Approved, "Re-evaluated on appeal")
        .expect("reversal allowed");
    assert_eq!(view.status, ApplicationStatus::Approved);
}

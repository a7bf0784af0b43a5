mod common;

use chrono::NaiveDate;
use common::{empty_session, staff_session, RecordingGateway};
use procure_portal::forms::attachment::FileCandidate;
use procure_portal::forms::payload::FormPayload;
use procure_portal::gateway::SubmissionOutcome;
use procure_portal::workflows::procurement::{PostingError, ProcurementPostForm};
use serde_json::json;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn filled_form() -> ProcurementPostForm {
    let session = staff_session("STF-0042");
    let mut form = ProcurementPostForm::open(&session).expect("staff signed in");
    form.set_category("Renewable Energy");
    form.set_title("Solar mini-grid construction");
    form.set_introduction("Request for proposals.");
    form.set_description("Design, supply and install a 50kW mini-grid.");
    form.set_issuance_date(date(2024, 10, 1));
    form.set_submission_deadline(date(2024, 11, 15));
    form.set_questions_deadline(date(2024, 10, 20));
    form.set_contract_award_date(date(2024, 12, 10));
    form.deliverables().edit_entry(0, "Feasibility report");
    form.submission_requirements().edit_entry(0, "Company profile");
    form.evaluation_criteria().edit_entry(0, "Technical capacity");
    form
}

#[test]
fn opening_requires_a_staff_session() {
    let result = ProcurementPostForm::open(&empty_session());
    assert!(matches!(result, Err(PostingError::NoStaffSession)));
}

#[test]
fn incomplete_drafts_are_not_published() {
    let gateway = RecordingGateway::new();
    let session = staff_session("STF-0042");
    let mut form = ProcurementPostForm::open(&session).expect("staff signed in");
    form.set_title("Solar mini-grid construction");

    let result = form.submit(&gateway);
    assert!(matches!(result, Err(PostingError::MissingRequiredFields)));
    assert_eq!(gateway.payload_count(), 0);
}

#[test]
fn published_post_encodes_lists_as_json_strings() {
    let gateway = RecordingGateway::respond_with(SubmissionOutcome::Success(json!({
        "success": true,
        "data": { "procureID": "NREP-PRF-2024-014" },
    })));
    let mut form = filled_form();
    form.terms_and_conditions().edit_entry(0, "Bid validity 90 days");
    form.attach_other_documents(FileCandidate::new("annex.pdf", vec![0u8; 256]))
        .expect("accepted");

    let outcome = form.submit(&gateway).expect("submission ran");
    assert!(outcome.is_success());
    assert_eq!(form.created_post_id(), Some("NREP-PRF-2024-014"));

    let payload = gateway.last_payload();
    assert_eq!(payload.scalar("createdBy"), Some("STF-0042"));
    assert_eq!(payload.scalar("issuanceDate"), Some("2024-10-01"));
    assert_eq!(payload.scalar("submissionDeadline"), Some("2024-11-15"));
    assert_eq!(
        FormPayload::encode_array(payload.array("deliverables").expect("present")),
        r#"["Feasibility report"]"#
    );
    assert!(payload.array("termsAndConditions").is_some());
    assert!(payload.file("otherDocuments").is_some());
}

#[test]
fn blank_terms_section_is_omitted_from_the_payload() {
    let gateway = RecordingGateway::new();
    let mut form = filled_form();

    form.submit(&gateway).expect("submission ran");
    let payload = gateway.last_payload();
    assert!(payload.array("termsAndConditions").is_none());
    assert!(payload.file("otherDocuments").is_none());
}

#[test]
fn successful_publication_clears_the_draft_for_the_next_post() {
    let gateway = RecordingGateway::respond_with(SubmissionOutcome::Success(json!({
        "data": { "procureID": "NREP-PRF-2024-015" },
    })));
    let mut form = filled_form();
    form.submit(&gateway).expect("submission ran");

    // The author survives the reset; everything else starts blank.
    let result = form.submit(&gateway);
    assert!(matches!(result, Err(PostingError::MissingRequiredFields)));
    assert_eq!(gateway.payload_count(), 1);
    assert_eq!(form.created_post_id(), Some("NREP-PRF-2024-015"));
}

#[test]
fn failed_publication_keeps_the_draft() {
    let gateway =
        RecordingGateway::respond_with(SubmissionOutcome::Failure("upstream error".to_string()));
    let mut form = filled_form();

    let outcome = form.submit(&gateway).expect("submission ran");
    assert!(matches!(outcome, SubmissionOutcome::Failure(_)));
    assert!(form.created_post_id().is_none());

    gateway.set_submission_response(SubmissionOutcome::Success(json!({ "data": {} })));
    let retry = form.submit(&gateway).expect("retry ran");
    assert!(retry.is_success());
    assert_eq!(gateway.payload_count(), 2);
}

use assert_matches::assert_matches;
use chrono::{Duration, TimeZone, Utc};
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use waitlist_cell::{
    EnqueueWaitlistRequest, FreedSlot, NotifyError, SlotNotifier, WaitlistEntry,
    WaitlistPriority, WebhookNotifier,
};

fn entry() -> WaitlistEntry {
    WaitlistEntry::new(
        EnqueueWaitlistRequest {
            patient_id: Uuid::new_v4(),
            service_type: "Consulta Geral".to_string(),
            provider_id: None,
            priority: WaitlistPriority::Convenience,
            notes: None,
        },
        Utc.with_ymd_and_hms(2026, 9, 7, 10, 0, 0).unwrap(),
    )
}

fn freed_slot(provider_id: Option<Uuid>) -> FreedSlot {
    FreedSlot {
        service_type: "Consulta Geral".to_string(),
        provider_id,
        start: Utc.with_ymd_and_hms(2026, 9, 7, 10, 0, 0).unwrap() + Duration::hours(2),
    }
}

#[tokio::test]
async fn test_successful_delivery_posts_the_offer_payload() {
    let server = MockServer::start().await;
    let entry = entry();
    let freed = freed_slot(Some(Uuid::new_v4()));

    Mock::given(method("POST"))
        .and(path("/notify"))
        .and(body_partial_json(serde_json::json!({
            "waitlist_entry_id": entry.id,
            "patient_id": entry.patient_id,
            "service_type": "Consulta Geral",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = WebhookNotifier::new(format!("{}/notify", server.uri()), 5);

    let result = notifier.notify(&entry, &freed).await;

    assert!(result.is_ok(), "2xx responses count as delivered");
}

#[tokio::test]
async fn test_server_error_is_reported_as_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/notify"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let notifier = WebhookNotifier::new(format!("{}/notify", server.uri()), 5);

    let result = notifier.notify(&entry(), &freed_slot(None)).await;

    assert_matches!(result, Err(NotifyError::Rejected(500)));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_a_delivery_error() {
    // Nothing listens on this port.
    let notifier = WebhookNotifier::new("http://127.0.0.1:9/notify".to_string(), 1);

    let result = notifier.notify(&entry(), &freed_slot(None)).await;

    assert_matches!(result, Err(NotifyError::Delivery(_)));
}

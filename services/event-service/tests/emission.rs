//! End-to-end emission through the recording store.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use mws_event_service::{EmissionError, EmissionService, PluginContext, RawEvent, StoreError};
use mws_events::{
    registry_from_toml_str, AssociatedObject, EscalationLevel, EventDefinitionSpec, Registry,
    Severity,
};
use mws_testing::{RecordingStore, StaticMessages};

fn jobs_registry() -> Arc<Registry> {
    Arc::new(
        Registry::build(
            vec![
                EventDefinitionSpec::new("Submit", Severity::Info, EscalationLevel::User),
                EventDefinitionSpec::new("Cancel", Severity::Error, EscalationLevel::Admin),
            ],
            "Jobs",
        )
        .unwrap(),
    )
}

fn messages() -> Arc<StaticMessages> {
    Arc::new(
        StaticMessages::new()
            .with("Jobs.Submit.message", "Job {0} submitted")
            .with("Jobs.Cancel.message", "Job {0} was cancelled by {1}")
            .with("Jobs.Cancel.comment", "Raised when a job is cancelled"),
    )
}

fn service(store: Arc<RecordingStore>) -> EmissionService {
    EmissionService::new(
        PluginContext::new("MyPlugin", "inst1"),
        jobs_registry(),
        store,
        messages(),
    )
}

#[tokio::test]
async fn catalog_event_resolves_all_identifiers() {
    let store = Arc::new(RecordingStore::new());
    let service = service(store.clone());
    let date = Utc.with_ymd_and_hms(2024, 5, 4, 10, 30, 0).unwrap();
    let cancel = service.registry().get("Cancel").unwrap().clone();

    let event = service
        .create_catalog_event(
            Some(date),
            &cancel,
            vec!["42".to_string(), "alice".to_string()],
            vec![AssociatedObject::new("Job", "42")],
        )
        .await
        .unwrap();

    assert_eq!(event.date, date);
    assert_eq!(event.severity, Severity::Error);
    assert_eq!(event.escalation_level, EscalationLevel::Admin);
    assert_eq!(event.code.local(), 1);
    assert_eq!(event.code.component(), 0xFF);
    assert_eq!(event.event_type.as_deref(), Some("Cancel"));
    assert_eq!(event.origin, "MWS/plugins/MyPlugin/inst1/Jobs/Cancel");
    assert_eq!(event.message, "Job 42 was cancelled by alice");
    assert_eq!(event.arguments, vec!["42", "alice"]);
    assert_eq!(event.associated_objects, vec![AssociatedObject::new("Job", "42")]);
    assert_eq!(store.events(), vec![event]);
}

#[tokio::test]
async fn emit_by_name_uses_first_code() {
    let store = Arc::new(RecordingStore::new());
    let service = service(store.clone());

    let event = service
        .emit("submit", vec!["7".to_string()], vec![])
        .await
        .unwrap();

    assert_eq!(event.code.local(), 0);
    assert_eq!(event.message, "Job 7 submitted");
    assert_eq!(event.origin, "MWS/plugins/MyPlugin/inst1/Jobs/Submit");
    assert_eq!(store.calls(), 1);
}

#[tokio::test]
async fn empty_message_never_reaches_store() {
    let store = Arc::new(RecordingStore::new());
    let service = service(store.clone());

    let err = service
        .create_event(RawEvent::new(Severity::Info, EscalationLevel::User, 3, ""))
        .await
        .unwrap_err();

    assert!(matches!(err, EmissionError::EmptyMessage));
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn empty_resolved_message_never_reaches_store() {
    let store = Arc::new(RecordingStore::new());
    let service = EmissionService::new(
        PluginContext::new("MyPlugin", "inst1"),
        jobs_registry(),
        store.clone(),
        Arc::new(StaticMessages::new().with("Jobs.Submit.message", "")),
    );

    let err = service.emit("Submit", vec![], vec![]).await.unwrap_err();

    assert!(matches!(err, EmissionError::EmptyMessage));
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn unresolvable_message_is_an_error() {
    let store = Arc::new(RecordingStore::new());
    let service = EmissionService::new(
        PluginContext::new("MyPlugin", "inst1"),
        jobs_registry(),
        store.clone(),
        Arc::new(StaticMessages::new()),
    );

    let err = service.emit("Cancel", vec![], vec![]).await.unwrap_err();

    assert!(matches!(err, EmissionError::Message(_)));
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn missing_plugin_type_fails_origin() {
    let store = Arc::new(RecordingStore::new());
    let service = EmissionService::new(
        PluginContext::new("", "inst1"),
        jobs_registry(),
        store.clone(),
        messages(),
    );

    let err = service
        .create_event(RawEvent::new(Severity::Info, EscalationLevel::User, 0, "hello"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        EmissionError::MissingPluginIdentity { field: "type" }
    ));
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn raw_event_without_suffix_uses_base_origin() {
    let store = Arc::new(RecordingStore::new());
    let service = service(store.clone());

    let event = service
        .create_event(
            RawEvent::new(Severity::Fatal, EscalationLevel::Internal, 12, "panic")
                .event_type("Plugin Crash"),
        )
        .await
        .unwrap();

    assert_eq!(event.origin, "MWS/plugins/MyPlugin/inst1");
    assert_eq!(event.event_type.as_deref(), Some("Plugin Crash"));
    assert_eq!(event.code.severity(), Severity::Fatal);
    assert_eq!(event.code.escalation(), EscalationLevel::Internal);
}

#[tokio::test]
async fn store_failure_is_surfaced() {
    let store = Arc::new(RecordingStore::failing());
    let service = service(store.clone());

    let err = service.emit("Submit", vec![], vec![]).await.unwrap_err();

    assert!(matches!(err, EmissionError::Store(StoreError::Unavailable(_))));
    assert_eq!(store.calls(), 1);
    assert!(store.events().is_empty());
}

#[tokio::test]
async fn comment_is_resolved_from_catalog() {
    let service = service(Arc::new(RecordingStore::new()));
    let cancel = service.registry().get("Cancel").unwrap().clone();
    assert_eq!(
        service.comment_for(&cancel).await.unwrap(),
        "Raised when a job is cancelled"
    );
}

#[tokio::test]
async fn catalog_document_overrides_flow_into_events() {
    let registry = registry_from_toml_str(
        r#"
name = "NodeEvents"
type_prefix = "Node"
origin_suffix = "Nodes"

[[events]]
name = "Modify"
severity = "warn"
escalation = "power_user"
"#,
    )
    .unwrap();
    let store = Arc::new(RecordingStore::new());
    let service = EmissionService::new(
        PluginContext::new("Native", "native1").with_component_code(0x10),
        Arc::new(registry),
        store.clone(),
        Arc::new(StaticMessages::new().with("NodeEvents.Modify.message", "Node {0} modified")),
    );

    let event = service
        .emit(
            "Modify",
            vec!["node1".to_string()],
            vec![AssociatedObject::new("Node", "node1")],
        )
        .await
        .unwrap();

    assert_eq!(event.event_type.as_deref(), Some("Node Modify"));
    assert_eq!(event.origin, "MWS/plugins/Native/native1/Nodes");
    assert_eq!(event.code.value(), 0x5100_0000);
}

#[tokio::test]
async fn concurrent_emission_records_every_call() {
    let store = Arc::new(RecordingStore::new());
    let service = Arc::new(service(store.clone()));

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.emit("Submit", vec![i.to_string()], vec![]).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(store.events().len(), 16);
}

//! Dead-letter handler scenarios.

use shopcanary_core::FailureBody;
use shopcanary_integration_tests::harness::sqs_event;
use shopcanary_lambda::DeadLetterHandler;
use shopcanary_store::MemoryRecordStore;

#[tokio::test]
async fn non_json_body_is_stored_unchanged() {
    let store = MemoryRecordStore::new();
    let handler = DeadLetterHandler::new(store.clone());

    handler
        .handle(sqs_event("m-dead", "not json"))
        .await
        .expect("recording succeeds");

    let record = store.failure("m-dead").expect("record written");
    assert_eq!(record.body, FailureBody::Raw("not json".to_string()));
    assert_eq!(record.error, "m-dead");
    assert_eq!(record.batch, None);
}

#[tokio::test]
async fn json_body_is_stored_parsed_with_batch() {
    let store = MemoryRecordStore::new();
    let handler = DeadLetterHandler::new(store.clone());

    handler
        .handle(sqs_event(
            "m-dead-json",
            r#"{"batch":"1700000000","shop":"shopA"}"#,
        ))
        .await
        .expect("recording succeeds");

    let record = store.failure("m-dead-json").expect("record written");
    assert!(matches!(record.body, FailureBody::Json(_)));
    assert_eq!(record.batch, Some("1700000000".to_string()));
}

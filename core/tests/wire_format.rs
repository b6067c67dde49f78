use completion_stats_core::{CompletionEvent, DownPressed};

#[test]
fn test_events_serialize_with_snake_case_type_tag() {
    let event = CompletionEvent::DownPressed(DownPressed {
        session_uid: "s1".to_string(),
        sequence: 3,
        new_position: 1,
    });

    let value = serde_json::to_value(&event).expect("event should serialize");
    assert_eq!(
        value,
        serde_json::json!({
            "type": "down_pressed",
            "session_uid": "s1",
            "sequence": 3,
            "new_position": 1,
        })
    );
}

#[test]
fn test_events_deserialize_from_tagged_line() {
    let line = r#"{"type":"typed","session_uid":"s1","sequence":4,"visible_item_ids":[0,1],"added_item_ids":[],"new_position":0}"#;
    let event: CompletionEvent = serde_json::from_str(line).expect("line should parse");
    match event {
        CompletionEvent::Typed(typed) => {
            assert_eq!(typed.visible_item_ids, vec![0, 1]);
            assert_eq!(typed.new_position, 0);
        }
        other => panic!("unexpected variant: {other:?}"),
    }
}

#![no_main]

use completion_stats_core::{
    Backspace, CompletionEvent, DownPressed, ExplicitSelect, SessionCancelled, SessionStarted,
    Typed, TypedSelect, UpPressed,
};
use completion_stats_replay::classify_log;
use libfuzzer_sys::fuzz_target;

const MAX_INPUT_BYTES: usize = 8 * 1024;
const MAX_EVENTS: usize = 512;

fn started(sequence: u64, item_count: u32) -> CompletionEvent {
    CompletionEvent::SessionStarted(
        SessionStarted::builder()
            .session_uid("fuzz-session")
            .sequence(sequence)
            .language("fuzz")
            .item_ids((0..item_count).collect::<Vec<_>>())
            .build(),
    )
}

fn synthesize_events(data: &[u8]) -> Vec<CompletionEvent> {
    let session = "fuzz-session";
    let mut events: Vec<CompletionEvent> = Vec::new();

    if data.first().map(|b| b % 5 != 0).unwrap_or(true) {
        events.push(started(0, (data.len() % 7) as u32));
    }

    for (idx, byte) in data.iter().enumerate() {
        if events.len() >= MAX_EVENTS {
            break;
        }
        let sequence = idx as u64 + 1;

        match byte % 8 {
            0 => events.push(CompletionEvent::UpPressed(UpPressed {
                session_uid: session.to_string(),
                sequence,
                new_position: (*byte as usize / 8) % 6,
            })),
            1 => events.push(CompletionEvent::DownPressed(DownPressed {
                session_uid: session.to_string(),
                sequence,
                new_position: (*byte as usize / 8) % 6,
            })),
            2 => events.push(CompletionEvent::Typed(
                Typed::builder()
                    .session_uid(session)
                    .sequence(sequence)
                    .visible_item_ids(vec![(*byte % 5) as u32, (*byte % 3) as u32])
                    .added_item_ids(Vec::new())
                    .new_position((*byte as usize / 16) % 4)
                    .build(),
            )),
            3 => events.push(CompletionEvent::Typed(
                Typed::builder()
                    .session_uid(session)
                    .sequence(sequence)
                    .visible_item_ids(vec![(*byte % 5) as u32, 90 + (*byte % 3) as u32])
                    .added_item_ids(vec![90 + (*byte % 3) as u32])
                    .new_position(0)
                    .build(),
            )),
            4 => events.push(CompletionEvent::Backspace(
                Backspace::builder()
                    .session_uid(session)
                    .sequence(sequence)
                    .visible_item_ids((0..(*byte % 6) as u32).collect::<Vec<_>>())
                    .added_item_ids(Vec::new())
                    .new_position((*byte as usize / 32) % 4)
                    .build(),
            )),
            5 => events.push(CompletionEvent::ExplicitSelect(ExplicitSelect {
                session_uid: session.to_string(),
                sequence,
                selected_position: (*byte as usize / 16) % 4,
                selected_item_id: *byte as u32,
            })),
            6 => events.push(CompletionEvent::TypedSelect(TypedSelect {
                session_uid: session.to_string(),
                sequence,
                selected_position: (*byte as usize / 16) % 4,
                selected_item_id: *byte as u32,
            })),
            _ => {
                if byte % 2 == 0 {
                    events.push(CompletionEvent::SessionCancelled(SessionCancelled {
                        session_uid: session.to_string(),
                        sequence,
                    }));
                } else {
                    events.push(started(sequence, (*byte % 4) as u32));
                }
            }
        }
    }

    events
}

fuzz_target!(|data: &[u8]| {
    if data.is_empty() || data.len() > MAX_INPUT_BYTES {
        return;
    }

    // Classification must never panic, whatever the UI claims happened.
    let _ = classify_log(synthesize_events(data));
});

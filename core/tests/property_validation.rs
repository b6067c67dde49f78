use completion_stats_core::{
    CompletionEvent, DownPressed, SessionStarted, SessionValidator, Typed, UpPressed,
};
use proptest::prelude::*;

fn started(item_count: usize) -> SessionStarted {
    SessionStarted::builder()
        .session_uid("prop-session")
        .sequence(0)
        .language("Rust")
        .item_ids((0..item_count as u32).collect::<Vec<_>>())
        .build()
}

fn up(sequence: u64, new_position: usize) -> CompletionEvent {
    CompletionEvent::UpPressed(UpPressed {
        session_uid: "prop-session".to_string(),
        sequence,
        new_position,
    })
}

fn down(sequence: u64, new_position: usize) -> CompletionEvent {
    CompletionEvent::DownPressed(DownPressed {
        session_uid: "prop-session".to_string(),
        sequence,
        new_position,
    })
}

proptest! {
    #[test]
    fn prop_correct_modular_walk_stays_valid(
        item_count in 1usize..16,
        moves in prop::collection::vec(any::<bool>(), 0..64),
    ) {
        let mut validator = SessionValidator::new(&started(item_count));
        let mut position = 0usize;

        for (idx, go_up) in moves.iter().enumerate() {
            position = if *go_up {
                (position + item_count - 1) % item_count
            } else {
                (position + 1) % item_count
            };
            let event = if *go_up {
                up(idx as u64 + 1, position)
            } else {
                down(idx as u64 + 1, position)
            };
            validator.accept(&event);
            prop_assert!(validator.is_session_valid());
        }

        prop_assert_eq!(validator.current_position(), position);
    }
}

proptest! {
    #[test]
    fn prop_down_skipping_a_slot_condemns(
        item_count in 3usize..16,
        offset in 2usize..16,
    ) {
        prop_assume!(offset < item_count);

        let mut validator = SessionValidator::new(&started(item_count));
        validator.accept(&down(1, offset % item_count));
        prop_assert!(!validator.is_session_valid());
    }
}

proptest! {
    #[test]
    fn prop_full_down_cycle_returns_to_start(item_count in 1usize..32) {
        let mut validator = SessionValidator::new(&started(item_count));
        for step in 1..=item_count {
            validator.accept(&down(step as u64, step % item_count));
            prop_assert!(validator.is_session_valid());
        }
        prop_assert_eq!(validator.current_position(), 0);
    }
}

proptest! {
    #[test]
    fn prop_prefix_narrowing_stays_valid(
        item_count in 1usize..32,
        cuts in prop::collection::vec(0usize..8, 0..8),
    ) {
        let mut validator = SessionValidator::new(&started(item_count));
        let mut len = item_count;

        for (idx, cut) in cuts.iter().enumerate() {
            len = len.saturating_sub(*cut);
            let visible: Vec<u32> = (0..len as u32).collect();
            validator.accept(&CompletionEvent::Typed(
                Typed::builder()
                    .session_uid("prop-session")
                    .sequence(idx as u64 + 1)
                    .visible_item_ids(visible)
                    .added_item_ids(Vec::new())
                    .new_position(0)
                    .build(),
            ));
            prop_assert!(validator.is_session_valid());
        }
    }
}

proptest! {
    #[test]
    fn prop_undeclared_foreign_id_condemns(
        item_count in 1usize..16,
        foreign_offset in 0u32..8,
    ) {
        let foreign = item_count as u32 + foreign_offset;
        let mut validator = SessionValidator::new(&started(item_count));
        validator.accept(&CompletionEvent::Typed(
            Typed::builder()
                .session_uid("prop-session")
                .sequence(1)
                .visible_item_ids(vec![foreign])
                .added_item_ids(Vec::new())
                .new_position(0)
                .build(),
        ));
        prop_assert!(!validator.is_session_valid());
    }
}

proptest! {
    #[test]
    fn prop_invalidity_is_sticky_under_any_suffix(
        item_count in 2usize..16,
        moves in prop::collection::vec(any::<bool>(), 1..32),
    ) {
        let mut validator = SessionValidator::new(&started(item_count));

        // Up from position 0 must land on the last slot; claiming 0 is a
        // contradiction for any list with at least two entries.
        validator.accept(&up(1, 0));
        prop_assert!(!validator.is_session_valid());

        // Feed a perfectly well-formed walk afterwards; the verdict holds.
        let mut position = 0usize;
        for (idx, go_up) in moves.iter().enumerate() {
            position = if *go_up {
                (position + item_count - 1) % item_count
            } else {
                (position + 1) % item_count
            };
            let event = if *go_up {
                up(idx as u64 + 2, position)
            } else {
                down(idx as u64 + 2, position)
            };
            validator.accept(&event);
            prop_assert!(!validator.is_session_valid());
        }
    }
}

//! Property-based tests for the transcript
//!
//! These verify the projection and reset invariants across arbitrary
//! turn sequences.

use super::*;
use proptest::prelude::*;

fn arb_role() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::User), Just(Role::Assistant)]
}

fn arb_image() -> impl Strategy<Value = Option<ImageAttachment>> {
    proptest::option::of(("[A-Za-z0-9+/]{0,24}", "png|jpeg|webp").prop_map(
        |(data, subtype)| ImageAttachment {
            data,
            media_type: format!("image/{subtype}"),
        },
    ))
}

fn arb_turn() -> impl Strategy<Value = Turn> {
    (arb_role(), "[a-zA-Z0-9 ?.]{0,40}", arb_image()).prop_map(|(role, text, image)| Turn {
        role,
        text,
        image,
        created_at: Utc::now(),
    })
}

proptest! {
    /// The Nth history entry's role and text match the Nth turn's,
    /// with image fields stripped by construction.
    #[test]
    fn history_projection_preserves_order(turns in proptest::collection::vec(arb_turn(), 0..16)) {
        let mut store = ConversationStore::new();
        for turn in &turns {
            store.append(turn.clone());
        }

        let history = store.as_history();
        prop_assert_eq!(history.len(), turns.len());
        for (entry, turn) in history.iter().zip(&turns) {
            prop_assert_eq!(entry.role, turn.role);
            prop_assert_eq!(&entry.text, &turn.text);
        }
    }

    /// clear always yields an empty transcript regardless of prior size
    #[test]
    fn clear_empties_any_transcript(turns in proptest::collection::vec(arb_turn(), 0..16)) {
        let mut store = ConversationStore::new();
        for turn in turns {
            store.append(turn);
        }

        store.clear();
        prop_assert!(store.is_empty());
        prop_assert_eq!(store.as_history().len(), 0);
    }
}

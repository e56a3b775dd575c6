#[cfg(test)]
mod tests {
    use crate::extract::{first_free_slot, slot_candidates};
    use proptest::prelude::*;
    use serde_json::{json, Value};

    // Helper function to build slot objects from (id, reserved) pairs
    fn slot_list(slots: &[(u32, bool)]) -> Vec<Value> {
        slots
            .iter()
            .map(|(id, reserved)| {
                json!({
                    "@id": format!("/api/slots/{}", id),
                    "@type": "Slot",
                    "datetime": "2025-08-11T13:10:52+00:00",
                    "reserved": reserved,
                })
            })
            .collect()
    }

    proptest! {
        // The three collection shapes expose the same candidates
        #[test]
        fn test_collection_shapes_agree(
            slots in prop::collection::vec((1..10_000u32, any::<bool>()), 0..20),
        ) {
            let members = slot_list(&slots);

            let hydra = json!({
                "@context": "/api/contexts/Slot",
                "@id": "/api/slots",
                "hydra:member": members.clone(),
                "hydra:totalItems": members.len(),
            });
            let bare = Value::Array(members.clone());
            let single_field = json!({
                "totalItems": members.len(),
                "items": members.clone(),
            });

            prop_assert_eq!(slot_candidates(&hydra), members.as_slice());
            prop_assert_eq!(slot_candidates(&bare), members.as_slice());
            prop_assert_eq!(slot_candidates(&single_field), members.as_slice());

            let expected = slots
                .iter()
                .find(|(_, reserved)| !reserved)
                .map(|(id, _)| format!("/api/slots/{}", id));
            prop_assert_eq!(first_free_slot(slot_candidates(&hydra)), expected.clone());
            prop_assert_eq!(first_free_slot(slot_candidates(&bare)), expected.clone());
            prop_assert_eq!(first_free_slot(slot_candidates(&single_field)), expected);
        }

        // A fully booked listing never yields a slot
        #[test]
        fn test_all_reserved_never_selected(ids in prop::collection::vec(1..10_000u32, 0..20)) {
            let slots: Vec<(u32, bool)> = ids.into_iter().map(|id| (id, true)).collect();
            let bare = Value::Array(slot_list(&slots));
            prop_assert_eq!(first_free_slot(slot_candidates(&bare)), None);
        }
    }
}

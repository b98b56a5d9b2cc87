use super::CombinedUserData;
use serde::{Deserialize, Serialize};

/// A generated roast plus its provenance snapshot, ready to persist.
/// Immutable after creation; only the visibility flag may change later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roast {
    pub id: String,
    pub user_id: Option<uuid::Uuid>,
    pub roast_text: String,
    pub sources: Vec<String>,
    pub raw_data: serde_json::Value,
    pub inputs: serde_json::Value,
    pub is_public: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Roast {
    pub fn new(user_id: Option<uuid::Uuid>, roast_text: String, combined: &CombinedUserData) -> Self {
        Self {
            id: short_id(),
            user_id,
            roast_text,
            sources: combined.sources(),
            raw_data: combined.as_view(),
            inputs: serde_json::to_value(&combined.inputs)
                .unwrap_or_else(|_| serde_json::json!({})),
            is_public: true,
            created_at: None,
        }
    }
}

/// Short shareable id: the first segment of a v4 uuid.
fn short_id() -> String {
    uuid::Uuid::new_v4().to_string()[..8].to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Fragment, RoastInputs};

    #[test]
    fn ids_are_short_and_unique() {
        let a = short_id();
        let b = short_id();
        assert_eq!(a.len(), 8);
        assert_ne!(a, b);
    }

    #[test]
    fn new_roast_snapshots_sources_and_inputs() {
        let combined = CombinedUserData::new(
            Fragment::Absent,
            Fragment::Absent,
            Fragment::Absent,
            Fragment::Absent,
            RoastInputs {
                anilist_user: Some("weeb42".to_owned()),
                ..Default::default()
            },
        );
        let roast = Roast::new(None, "ouch".to_owned(), &combined);
        assert!(roast.is_public);
        assert!(roast.sources.is_empty());
        assert_eq!(roast.inputs["anilist_user"], "weeb42");
        assert_eq!(roast.raw_data["sources"], serde_json::json!([]));
    }
}

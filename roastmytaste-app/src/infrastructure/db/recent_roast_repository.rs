use super::entities::{recent_roast, roast, RecentRoast, Roast};
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};
use std::sync::Arc;
use uuid::Uuid;

/// Most-recent views kept per user; older rows are evicted on every write.
const RECENT_VIEW_CAP: u64 = 20;

/// Bounded per-user index of recently viewed roasts.
#[derive(Clone)]
pub struct RecentRoastRepository {
    db: Arc<DatabaseConnection>,
}

impl RecentRoastRepository {
    pub fn new(db: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { db: db.into() }
    }

    /// Upsert the (user, roast) pair with a fresh timestamp, then evict
    /// everything beyond the cap.
    pub async fn record_view(&self, user_id: Uuid, roast_id: &str) -> Result<(), DbErr> {
        let now = chrono::Utc::now();

        let existing = RecentRoast::find_by_id((user_id, roast_id.to_owned()))
            .one(self.db.as_ref())
            .await?;

        match existing {
            Some(entry) => {
                let mut active: recent_roast::ActiveModel = entry.into();
                active.viewed_at = Set(now);
                active.update(self.db.as_ref()).await?;
            }
            None => {
                let active = recent_roast::ActiveModel {
                    user_id: Set(user_id),
                    roast_id: Set(roast_id.to_owned()),
                    viewed_at: Set(now),
                };
                active.insert(self.db.as_ref()).await?;
            }
        }

        self.prune(user_id).await
    }

    async fn prune(&self, user_id: Uuid) -> Result<(), DbErr> {
        let stale = RecentRoast::find()
            .filter(recent_roast::Column::UserId.eq(user_id))
            .order_by_desc(recent_roast::Column::ViewedAt)
            .offset(RECENT_VIEW_CAP)
            .all(self.db.as_ref())
            .await?;

        if stale.is_empty() {
            return Ok(());
        }

        let stale_ids: Vec<String> = stale.into_iter().map(|entry| entry.roast_id).collect();
        RecentRoast::delete_many()
            .filter(recent_roast::Column::UserId.eq(user_id))
            .filter(recent_roast::Column::RoastId.is_in(stale_ids))
            .exec(self.db.as_ref())
            .await?;

        Ok(())
    }

    /// Roasts the user viewed most recently, newest first. Views whose roast
    /// no longer exists are skipped.
    pub async fn list_recent(
        &self,
        user_id: Uuid,
        limit: u64,
    ) -> Result<Vec<roast::Model>, DbErr> {
        let entries = RecentRoast::find()
            .filter(recent_roast::Column::UserId.eq(user_id))
            .order_by_desc(recent_roast::Column::ViewedAt)
            .limit(limit)
            .find_also_related(Roast)
            .all(self.db.as_ref())
            .await?;

        Ok(entries
            .into_iter()
            .filter_map(|(_, roast)| roast)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn view(user_id: Uuid, roast_id: &str, secs_ago: i64) -> recent_roast::Model {
        recent_roast::Model {
            user_id,
            roast_id: roast_id.to_owned(),
            viewed_at: chrono::Utc::now() - chrono::Duration::seconds(secs_ago),
        }
    }

    fn roast(id: &str) -> roast::Model {
        roast::Model {
            id: id.to_owned(),
            user_id: None,
            roast_text: "ouch".to_owned(),
            sources: serde_json::json!([]),
            raw_data: serde_json::json!({}),
            inputs: serde_json::json!({}),
            is_public: true,
            created_at: Some(chrono::Utc::now()),
        }
    }

    #[tokio::test]
    async fn reviewing_refreshes_the_existing_row() {
        let user_id = Uuid::new_v4();
        let existing = view(user_id, "abcd1234", 600);
        let refreshed = view(user_id, "abcd1234", 0);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                vec![existing],  // lookup finds the pair
                vec![refreshed], // update returning
                vec![],          // prune finds nothing stale
            ])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let repo = RecentRoastRepository::new(db);
        assert!(repo.record_view(user_id, "abcd1234").await.is_ok());
    }

    #[tokio::test]
    async fn first_view_inserts_and_evicts_the_overflow() {
        let user_id = Uuid::new_v4();
        let inserted = view(user_id, "ffff0000", 0);
        let stale = view(user_id, "00000000", 9000);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                vec![],             // lookup misses
                vec![inserted],     // insert returning
                vec![stale],        // prune: one row beyond the cap
            ])
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
            .into_connection();

        let repo = RecentRoastRepository::new(db);
        assert!(repo.record_view(user_id, "ffff0000").await.is_ok());
    }

    #[tokio::test]
    async fn list_recent_returns_roasts_newest_first() {
        let user_id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                (view(user_id, "aaaa1111", 10), roast("aaaa1111")),
                (view(user_id, "bbbb2222", 20), roast("bbbb2222")),
            ]])
            .into_connection();

        let repo = RecentRoastRepository::new(db);
        let roasts = repo.list_recent(user_id, 10).await.unwrap();
        let ids: Vec<&str> = roasts.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["aaaa1111", "bbbb2222"]);
    }
}

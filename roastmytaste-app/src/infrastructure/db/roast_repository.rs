use super::entities::{roast, Roast};
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr, PaginatorTrait};
use serde::Serialize;
use std::sync::Arc;

#[derive(Clone)]
pub struct RoastRepository {
    db: Arc<DatabaseConnection>,
}

/// Feed pagination summary, computed from the total row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub total: u64,
    pub page: u64,
    pub pages: u64,
    pub per_page: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageMeta {
    pub fn new(total: u64, page: u64, per_page: u64) -> Self {
        let page = page.max(1);
        let pages = total.div_ceil(per_page);
        Self {
            total,
            page,
            pages,
            per_page,
            has_next: page < pages,
            has_prev: page > 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PublicPage {
    pub roasts: Vec<roast::Model>,
    pub meta: PageMeta,
}

impl RoastRepository {
    pub fn new(db: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { db: db.into() }
    }

    pub async fn create(&self, roast_data: &crate::domain::Roast) -> Result<roast::Model, DbErr> {
        let active = roast::ActiveModel {
            id: Set(roast_data.id.clone()),
            user_id: Set(roast_data.user_id),
            roast_text: Set(roast_data.roast_text.clone()),
            sources: Set(serde_json::json!(roast_data.sources)),
            raw_data: Set(roast_data.raw_data.clone()),
            inputs: Set(roast_data.inputs.clone()),
            is_public: Set(roast_data.is_public),
            created_at: Set(Some(chrono::Utc::now())),
        };
        active.insert(self.db.as_ref()).await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<roast::Model>, DbErr> {
        Roast::find_by_id(id.to_owned()).one(self.db.as_ref()).await
    }

    /// Fetch a set of roasts by id; callers re-impose their own ordering.
    pub async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<roast::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Roast::find()
            .filter(roast::Column::Id.is_in(ids.iter().cloned()))
            .all(self.db.as_ref())
            .await
    }

    /// Public feed page, newest first. `page` is 1-based.
    pub async fn find_public_page(&self, page: u64, per_page: u64) -> Result<PublicPage, DbErr> {
        let paginator = Roast::find()
            .filter(roast::Column::IsPublic.eq(true))
            .order_by_desc(roast::Column::CreatedAt)
            .paginate(self.db.as_ref(), per_page);

        let total = paginator.num_items().await?;
        let meta = PageMeta::new(total, page, per_page);
        let roasts = paginator.fetch_page(meta.page - 1).await?;

        Ok(PublicPage { roasts, meta })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_partial_last_page_has_prev_but_not_next() {
        let meta = PageMeta::new(25, 2, 20);
        assert_eq!(meta.pages, 2);
        assert!(meta.has_prev);
        assert!(!meta.has_next);
    }

    #[test]
    fn a_full_first_page_has_next_but_not_prev() {
        let meta = PageMeta::new(25, 1, 20);
        assert!(meta.has_next);
        assert!(!meta.has_prev);
    }

    #[test]
    fn an_empty_feed_has_no_pages_at_all() {
        let meta = PageMeta::new(0, 1, 20);
        assert_eq!(meta.pages, 0);
        assert!(!meta.has_next);
        assert!(!meta.has_prev);
    }

    #[test]
    fn page_zero_is_clamped_to_one() {
        let meta = PageMeta::new(10, 0, 20);
        assert_eq!(meta.page, 1);
    }
}

// db/subscriptiondb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::subscriptionmodels::Subscription;

#[async_trait]
pub trait SubscriptionExt {
    async fn get_active_subscriptions(
        &self,
        user_id: Uuid,
        subscription_id: Option<Uuid>,
    ) -> Result<Vec<Subscription>, sqlx::Error>;
}

#[async_trait]
impl SubscriptionExt for DBClient {
    async fn get_active_subscriptions(
        &self,
        user_id: Uuid,
        subscription_id: Option<Uuid>,
    ) -> Result<Vec<Subscription>, sqlx::Error> {
        sqlx::query_as::<_, Subscription>(
            r#"
            SELECT * FROM subscriptions
            WHERE user_id = $1
              AND status = 'active'
              AND ($2::uuid IS NULL OR id = $2)
            ORDER BY next_billing ASC
            "#,
        )
        .bind(user_id)
        .bind(subscription_id)
        .fetch_all(&self.pool)
        .await
    }
}

// service/reputation_service.rs
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    db::{db::DBClient, userdb::UserExt},
    models::usermodel::User,
    service::error::ServiceError,
};

pub const PROJECT_CREATED_POINTS: i32 = 10;
pub const COLLABORATION_ACCEPTED_POINTS: i32 = 15;

#[derive(Debug, Clone)]
pub struct ReputationService {
    db_client: Arc<DBClient>,
}

impl ReputationService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    /// Register a qualifying activity for today and persist the resulting
    /// streak. One increment per calendar day; a gap longer than a day
    /// resets the streak.
    pub async fn record_contribution(&self, user: &User) -> Result<User, ServiceError> {
        let today = Utc::now().date_naive();
        let streak = next_streak(
            user.contribution_streak,
            user.last_contribution_date,
            today,
        );

        let updated = self
            .db_client
            .set_contribution_streak(user.id, streak, today)
            .await?;

        Ok(updated)
    }

    /// Add reputation points, log the event, and grant any badge whose
    /// threshold the new total clears. Points update and event log share
    /// one transaction.
    pub async fn award_points(
        &self,
        user_id: Uuid,
        points: i32,
        category: &str,
        reason: String,
    ) -> Result<i32, ServiceError> {
        let mut tx = self.db_client.pool.begin().await?;

        let new_total: i32 = sqlx::query_scalar(
            r#"
            UPDATE users
            SET reputation_points = reputation_points + $1, updated_at = NOW()
            WHERE id = $2
            RETURNING reputation_points
            "#,
        )
        .bind(points)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO reputation_events (user_id, category, points, reason, created_at)
            VALUES ($1, $2, $3, $4, NOW())
            "#,
        )
        .bind(user_id)
        .bind(category)
        .bind(points)
        .bind(&reason)
        .execute(&mut *tx)
        .await?;

        // Grant every badge the new total qualifies for
        sqlx::query(
            r#"
            INSERT INTO user_badges (user_id, badge_id)
            SELECT $1, b.id
            FROM badges b
            WHERE b.points_required <= $2
            ON CONFLICT (user_id, badge_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(new_total)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            "Reputation: {} {:+} points ({}) -> {}",
            user_id,
            points,
            category,
            new_total
        );

        Ok(new_total)
    }
}

/// Streak transition rule. Same-day activity leaves the streak alone,
/// a one-day gap extends it, anything longer starts over.
fn next_streak(current: i32, last: Option<NaiveDate>, today: NaiveDate) -> i32 {
    match last {
        Some(last) => {
            let days = (today - last).num_days();
            if days == 1 {
                current + 1
            } else if days > 1 {
                1
            } else {
                current
            }
        }
        None => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn first_contribution_starts_at_one() {
        assert_eq!(next_streak(0, None, day(2026, 3, 10)), 1);
    }

    #[test]
    fn consecutive_day_increments() {
        assert_eq!(next_streak(4, Some(day(2026, 3, 9)), day(2026, 3, 10)), 5);
    }

    #[test]
    fn gap_resets_to_one() {
        assert_eq!(next_streak(12, Some(day(2026, 3, 1)), day(2026, 3, 10)), 1);
    }

    #[test]
    fn same_day_is_a_no_op() {
        assert_eq!(next_streak(7, Some(day(2026, 3, 10)), day(2026, 3, 10)), 7);
    }
}

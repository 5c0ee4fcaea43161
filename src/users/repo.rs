use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::config::ReplaceStrategy;

use super::repo_types::{AppearanceSettings, BasicUpdate, ItemDraft, ItemKind, NewUser, PageItem, User};

const USER_COLUMNS: &str = "id, first_name, last_name, email, username, password_hash, category, \
     profile_photo, bio, banner_color, layout, button_style, font, theme, created_at, updated_at";

impl User {
    /// Find a user by email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(db)
        .await
    }

    /// Advisory uniqueness pre-check for signup; the unique constraints are
    /// the authoritative arbiter under races.
    pub async fn find_by_email_or_username(
        db: &PgPool,
        email: &str,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1 OR username = $2"
        ))
        .bind(email)
        .bind(username)
        .fetch_optional(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await
    }

    /// Create a new user with hashed password. Appearance and banner take
    /// the schema defaults.
    pub async fn create(db: &PgPool, new_user: NewUser) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (first_name, last_name, email, username, password_hash, category, profile_photo) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(new_user.first_name)
        .bind(new_user.last_name)
        .bind(new_user.email)
        .bind(new_user.username)
        .bind(new_user.password_hash)
        .bind(new_user.category)
        .bind(new_user.profile_photo)
        .fetch_one(db)
        .await
    }

    /// Partial update of the basic profile fields. COALESCE keeps stored
    /// values where the caller supplied nothing.
    pub async fn update_basic(
        db: &PgPool,
        id: Uuid,
        fields: BasicUpdate,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET \
                 first_name = COALESCE($2, first_name), \
                 last_name = COALESCE($3, last_name), \
                 bio = COALESCE($4, bio), \
                 profile_photo = COALESCE($5, profile_photo), \
                 username = COALESCE($6, username), \
                 category = COALESCE($7, category), \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(fields.first_name)
        .bind(fields.last_name)
        .bind(fields.bio)
        .bind(fields.profile_photo)
        .bind(fields.username)
        .bind(fields.category)
        .fetch_optional(db)
        .await
    }

    pub async fn update_appearance(
        db: &PgPool,
        id: Uuid,
        banner_color: &str,
        appearance: AppearanceSettings,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET \
                 banner_color = $2, layout = $3, button_style = $4, font = $5, theme = $6, \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(banner_color)
        .bind(appearance.layout)
        .bind(appearance.button_style)
        .bind(appearance.font)
        .bind(appearance.theme)
        .fetch_optional(db)
        .await
    }
}

impl PageItem {
    /// All links and shops for one user, in page order.
    pub async fn list_for_user(db: &PgPool, user_id: Uuid) -> Result<Vec<PageItem>, sqlx::Error> {
        sqlx::query_as::<_, PageItem>(
            "SELECT id, user_id, kind, title, url, enabled, click_count, position \
             FROM page_items WHERE user_id = $1 ORDER BY kind, position",
        )
        .bind(user_id)
        .fetch_all(db)
        .await
    }

    /// Replace one kind's whole sequence in a single transaction: read the
    /// existing counters, delete, re-insert in submitted order. Counter
    /// carry-over follows `strategy`.
    pub async fn replace_for_user(
        db: &PgPool,
        user_id: Uuid,
        kind: ItemKind,
        drafts: Vec<ItemDraft>,
        strategy: ReplaceStrategy,
    ) -> Result<(), sqlx::Error> {
        let mut tx = db.begin().await?;

        let existing: Vec<(Uuid, i64)> = sqlx::query_as(
            "SELECT id, click_count FROM page_items WHERE user_id = $1 AND kind = $2",
        )
        .bind(user_id)
        .bind(kind)
        .fetch_all(&mut *tx)
        .await?;
        let existing: HashMap<Uuid, i64> = existing.into_iter().collect();

        sqlx::query("DELETE FROM page_items WHERE user_id = $1 AND kind = $2")
            .bind(user_id)
            .bind(kind)
            .execute(&mut *tx)
            .await?;

        for (position, draft) in drafts.into_iter().enumerate() {
            let id = draft.id.unwrap_or_else(Uuid::new_v4);
            let stored = draft.id.and_then(|id| existing.get(&id).copied());
            let click_count = resolved_click_count(strategy, stored, draft.click_count);
            sqlx::query(
                "INSERT INTO page_items (id, user_id, kind, title, url, enabled, click_count, position) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            )
            .bind(id)
            .bind(user_id)
            .bind(kind)
            .bind(&draft.title)
            .bind(&draft.url)
            .bind(draft.enabled)
            .bind(click_count)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }

        // The sequence is part of the user's document: touch its
        // modification instant in the same transaction.
        sqlx::query("UPDATE users SET updated_at = now() WHERE id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Atomic counter increment at the storage layer; returns whether a row
    /// matched. Never read-modify-write, so concurrent visitor clicks can't
    /// lose updates.
    pub async fn increment_click(
        db: &PgPool,
        item_id: Uuid,
        kind: ItemKind,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE page_items SET click_count = click_count + 1 WHERE id = $1 AND kind = $2",
        )
        .bind(item_id)
        .bind(kind)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Counter carried onto a re-inserted item during a sequence replace.
pub fn resolved_click_count(
    strategy: ReplaceStrategy,
    stored: Option<i64>,
    supplied: Option<i64>,
) -> i64 {
    match (strategy, stored) {
        (ReplaceStrategy::Merge, Some(stored)) => stored,
        _ => supplied.unwrap_or(0).max(0),
    }
}

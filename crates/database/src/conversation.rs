//! Coach conversation persistence.
//!
//! Messages are stored as one JSON array per conversation and are always
//! written wholesale; there is no per-message table.

use sqlx::types::Json;
use sqlx::SqlitePool;

use crate::error::DatabaseError;
use crate::models::{ConversationRecord, StoredTurn};
use crate::{new_id, Result};

/// Create a conversation for a user.
pub async fn create_conversation(
    pool: &SqlitePool,
    owner: &str,
    title: &str,
    messages: &[StoredTurn],
    context_summary: &str,
) -> Result<ConversationRecord> {
    let record = sqlx::query_as::<_, ConversationRecord>(
        r#"
        INSERT INTO coach_conversations (id, owner, title, messages, context_summary)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, owner, title, messages, context_summary, created_at, updated_at
        "#,
    )
    .bind(new_id())
    .bind(owner)
    .bind(title)
    .bind(Json(messages))
    .bind(context_summary)
    .fetch_one(pool)
    .await?;

    Ok(record)
}

/// Get the most recently created conversation for a user.
pub async fn latest_for_owner(
    pool: &SqlitePool,
    owner: &str,
) -> Result<Option<ConversationRecord>> {
    let record = sqlx::query_as::<_, ConversationRecord>(
        r#"
        SELECT id, owner, title, messages, context_summary, created_at, updated_at
        FROM coach_conversations
        WHERE owner = ?
        ORDER BY created_at DESC, rowid DESC
        LIMIT 1
        "#,
    )
    .bind(owner)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// Replace a conversation's messages and context summary.
pub async fn update_conversation(
    pool: &SqlitePool,
    id: &str,
    messages: &[StoredTurn],
    context_summary: &str,
) -> Result<ConversationRecord> {
    let record = sqlx::query_as::<_, ConversationRecord>(
        r#"
        UPDATE coach_conversations
        SET messages = ?,
            context_summary = ?,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        RETURNING id, owner, title, messages, context_summary, created_at, updated_at
        "#,
    )
    .bind(Json(messages))
    .bind(context_summary)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    record.ok_or_else(|| DatabaseError::NotFound {
        entity: "conversation",
        id: id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_db;

    fn turn(role: &str, content: &str) -> StoredTurn {
        StoredTurn {
            role: role.to_string(),
            content: content.to_string(),
            timestamp: "2026-10-19T08:00:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_fetch_latest() {
        let db = test_db().await;
        let messages = vec![turn("user", "Hi"), turn("assistant", "Hello!")];

        let created = create_conversation(db.pool(), "user-1", "Chat Oct 19", &messages, "ctx")
            .await
            .unwrap();
        assert!(!created.id.is_empty());
        assert_eq!(created.messages.0, messages);

        let latest = latest_for_owner(db.pool(), "user-1").await.unwrap().unwrap();
        assert_eq!(latest.id, created.id);
        assert_eq!(latest.title, "Chat Oct 19");
        assert_eq!(latest.context_summary, "ctx");
    }

    #[tokio::test]
    async fn test_latest_prefers_newest() {
        let db = test_db().await;
        create_conversation(db.pool(), "user-1", "Old", &[], "").await.unwrap();
        let newer = create_conversation(db.pool(), "user-1", "New", &[], "").await.unwrap();
        create_conversation(db.pool(), "user-2", "Other", &[], "").await.unwrap();

        let latest = latest_for_owner(db.pool(), "user-1").await.unwrap().unwrap();
        assert_eq!(latest.id, newer.id);
    }

    #[tokio::test]
    async fn test_update_replaces_messages() {
        let db = test_db().await;
        let created = create_conversation(
            db.pool(),
            "user-1",
            "Chat",
            &[turn("user", "Hi"), turn("assistant", "Hello!")],
            "old ctx",
        )
        .await
        .unwrap();

        let replacement = vec![
            turn("user", "Hi"),
            turn("assistant", "Hello!"),
            turn("user", "Plan my week"),
            turn("assistant", "Sure"),
        ];
        let updated = update_conversation(db.pool(), &created.id, &replacement, "new ctx")
            .await
            .unwrap();

        assert_eq!(updated.messages.0.len(), 4);
        assert_eq!(updated.messages.0[2].content, "Plan my week");
        assert_eq!(updated.context_summary, "new ctx");
        assert_eq!(updated.title, "Chat");
    }

    #[tokio::test]
    async fn test_update_missing_conversation() {
        let db = test_db().await;
        let err = update_conversation(db.pool(), "nope", &[], "").await.unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { entity: "conversation", .. }));
    }
}

use crate::db::models::{DbReminder, ReminderCreate};
use crate::db::schema::SQLITE_INIT;
use crate::error::RelayError;
use chrono::Utc;
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::{str::FromStr, time::Duration};
use tracing::{debug, info};

const REMINDER_COLUMNS: &str =
    "id, title, content, remind_time, status, cron_job_id, created_at, sent_at";

#[derive(Debug)]
pub enum DbActorMessage {
    /// Insert a reminder and return its id.
    Insert(ReminderCreate, RpcReplyPort<Result<String, RelayError>>),

    /// Conditionally flip a pending reminder to sent, returning the claimed row.
    ClaimPending(String, RpcReplyPort<Result<Option<DbReminder>, RelayError>>),

    /// Delete a reminder by id, returning rows affected.
    Delete(String, RpcReplyPort<Result<u64, RelayError>>),

    /// Get a reminder by id.
    Get(String, RpcReplyPort<Result<Option<DbReminder>, RelayError>>),
}

#[derive(Clone)]
pub struct DbActorHandle {
    actor: ActorRef<DbActorMessage>,
}

impl DbActorHandle {
    pub async fn insert(&self, create: ReminderCreate) -> Result<String, RelayError> {
        ractor::call!(self.actor, DbActorMessage::Insert, create)
            .map_err(|e| RelayError::RactorError(format!("DbActor Insert RPC failed: {e}")))?
    }

    pub async fn claim_pending(&self, id: &str) -> Result<Option<DbReminder>, RelayError> {
        ractor::call!(self.actor, DbActorMessage::ClaimPending, id.to_string()).map_err(|e| {
            RelayError::RactorError(format!("DbActor ClaimPending RPC failed: {e}"))
        })?
    }

    pub async fn delete(&self, id: &str) -> Result<u64, RelayError> {
        ractor::call!(self.actor, DbActorMessage::Delete, id.to_string())
            .map_err(|e| RelayError::RactorError(format!("DbActor Delete RPC failed: {e}")))?
    }

    pub async fn get(&self, id: &str) -> Result<Option<DbReminder>, RelayError> {
        ractor::call!(self.actor, DbActorMessage::Get, id.to_string())
            .map_err(|e| RelayError::RactorError(format!("DbActor Get RPC failed: {e}")))?
    }
}

struct DbActorState {
    pool: SqlitePool,
}

struct DbActor;

#[ractor::async_trait]
impl Actor for DbActor {
    type Msg = DbActorMessage;
    type State = DbActorState;
    type Arguments = String;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        database_url: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        let connect_opts = SqliteConnectOptions::from_str(database_url.as_str())
            .map_err(|e| ActorProcessingErr::from(format!("invalid database url: {e}")))?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5))
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .connect_with(connect_opts)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db connect failed: {e}")))?;

        apply_schema(&pool)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db schema init failed: {e}")))?;

        info!("DbActor initialized");
        Ok(DbActorState { pool })
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            DbActorMessage::Insert(create, reply) => {
                let res = self.insert(&state.pool, create).await;
                let _ = reply.send(res);
            }
            DbActorMessage::ClaimPending(id, reply) => {
                let res = self.claim_pending(&state.pool, &id).await;
                let _ = reply.send(res);
            }
            DbActorMessage::Delete(id, reply) => {
                let res = self.delete(&state.pool, &id).await;
                let _ = reply.send(res);
            }
            DbActorMessage::Get(id, reply) => {
                let res = self.get(&state.pool, &id).await;
                let _ = reply.send(res);
            }
        }
        Ok(())
    }
}

impl DbActor {
    async fn insert(&self, pool: &SqlitePool, create: ReminderCreate) -> Result<String, RelayError> {
        let id = create
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        let id: String = sqlx::query_scalar(
            r#"
        INSERT INTO reminders (id, title, content, remind_time, status, cron_job_id, created_at)
        VALUES (?, ?, ?, ?, 0, ?, ?)
        RETURNING id
        "#,
        )
        .bind(id)
        .bind(create.title)
        .bind(create.content)
        .bind(create.remind_time)
        .bind(create.cron_job_id)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(id)
    }

    async fn claim_pending(
        &self,
        pool: &SqlitePool,
        id: &str,
    ) -> Result<Option<DbReminder>, RelayError> {
        // Single statement: the status guard and the write are evaluated together.
        let row = sqlx::query_as::<_, DbReminder>(&format!(
            r#"
        UPDATE reminders
        SET status = 1, sent_at = ?
        WHERE id = ? AND status = 0
        RETURNING {REMINDER_COLUMNS}
        "#
        ))
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(pool)
        .await?;

        debug!(id, claimed = row.is_some(), "DbActor claim_pending");
        Ok(row)
    }

    async fn delete(&self, pool: &SqlitePool, id: &str) -> Result<u64, RelayError> {
        let result = sqlx::query("DELETE FROM reminders WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        debug!(id, rows = result.rows_affected(), "DbActor delete");
        Ok(result.rows_affected())
    }

    async fn get(&self, pool: &SqlitePool, id: &str) -> Result<Option<DbReminder>, RelayError> {
        let row = sqlx::query_as::<_, DbReminder>(&format!(
            r#"
        SELECT {REMINDER_COLUMNS}
        FROM reminders
        WHERE id = ?
        "#
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(row)
    }
}

/// Spawn the database actor and return a cloneable handle.
pub async fn spawn(database_url: &str) -> DbActorHandle {
    let (actor, _jh) = ractor::Actor::spawn(None, DbActor, database_url.to_string())
        .await
        .expect("failed to spawn DbActor");

    DbActorHandle { actor }
}

async fn apply_schema(pool: &SqlitePool) -> Result<(), RelayError> {
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}

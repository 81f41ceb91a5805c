use crate::db::models::{DbQuote, DbSavedQuote};
use crate::db::patch::{SavedQuoteCreate, SavedQuotePatch};
use crate::db::schema::SQLITE_INIT;
use crate::db::traits::QuoteStore;
use crate::error::LuminousError;
use crate::service::pagination;
use crate::types::{QuotePage, Quotation};
use async_trait::async_trait;
use chrono::Utc;
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::{str::FromStr, time::Duration};
use tracing::{debug, info};

#[derive(Debug)]
pub enum DbActorMessage {
    /// Insert a quotation unless the exact (text, author) pair exists; replies whether a row was written.
    InsertQuoteIfAbsent(String, String, RpcReplyPort<Result<bool, LuminousError>>),

    /// List all cached quotations, ascending id.
    ListQuotes(RpcReplyPort<Result<Vec<DbQuote>, LuminousError>>),

    /// List up to `limit` cached quotations with id greater than `cursor`.
    ListQuotesAfter(
        Option<i64>,
        u32,
        RpcReplyPort<Result<Vec<DbQuote>, LuminousError>>,
    ),

    CountQuotes(RpcReplyPort<Result<i64, LuminousError>>),

    /// List saved selections, oldest first.
    ListSavedQuotes(RpcReplyPort<Result<Vec<DbSavedQuote>, LuminousError>>),

    CreateSavedQuote(
        SavedQuoteCreate,
        RpcReplyPort<Result<DbSavedQuote, LuminousError>>,
    ),

    /// Patch a saved selection by id; replies `None` when the id does not exist.
    PatchSavedQuote(
        i64,
        SavedQuotePatch,
        RpcReplyPort<Result<Option<DbSavedQuote>, LuminousError>>,
    ),

    /// Delete a saved selection by id; replies whether a row was removed.
    DeleteSavedQuote(i64, RpcReplyPort<Result<bool, LuminousError>>),
}

#[derive(Clone)]
pub struct DbActorHandle {
    actor: ActorRef<DbActorMessage>,
}

impl DbActorHandle {
    pub async fn insert_quote_if_absent(
        &self,
        text: &str,
        author: &str,
    ) -> Result<bool, LuminousError> {
        ractor::call!(
            self.actor,
            DbActorMessage::InsertQuoteIfAbsent,
            text.to_string(),
            author.to_string()
        )
        .map_err(|e| {
            LuminousError::RactorError(format!("DbActor InsertQuoteIfAbsent RPC failed: {e}"))
        })?
    }

    pub async fn list_quotes(&self) -> Result<Vec<DbQuote>, LuminousError> {
        ractor::call!(self.actor, DbActorMessage::ListQuotes)
            .map_err(|e| LuminousError::RactorError(format!("DbActor ListQuotes RPC failed: {e}")))?
    }

    pub async fn list_quotes_after(
        &self,
        cursor: Option<i64>,
        limit: u32,
    ) -> Result<Vec<DbQuote>, LuminousError> {
        ractor::call!(self.actor, DbActorMessage::ListQuotesAfter, cursor, limit)
            .map_err(|e| {
            LuminousError::RactorError(format!("DbActor ListQuotesAfter RPC failed: {e}"))
        })?
    }

    pub async fn count_quotes(&self) -> Result<i64, LuminousError> {
        ractor::call!(self.actor, DbActorMessage::CountQuotes).map_err(|e| {
            LuminousError::RactorError(format!("DbActor CountQuotes RPC failed: {e}"))
        })?
    }

    pub async fn list_saved_quotes(&self) -> Result<Vec<DbSavedQuote>, LuminousError> {
        ractor::call!(self.actor, DbActorMessage::ListSavedQuotes).map_err(|e| {
            LuminousError::RactorError(format!("DbActor ListSavedQuotes RPC failed: {e}"))
        })?
    }

    pub async fn create_saved_quote(
        &self,
        create: SavedQuoteCreate,
    ) -> Result<DbSavedQuote, LuminousError> {
        ractor::call!(self.actor, DbActorMessage::CreateSavedQuote, create).map_err(|e| {
            LuminousError::RactorError(format!("DbActor CreateSavedQuote RPC failed: {e}"))
        })?
    }

    pub async fn patch_saved_quote(
        &self,
        id: i64,
        patch: SavedQuotePatch,
    ) -> Result<Option<DbSavedQuote>, LuminousError> {
        ractor::call!(self.actor, DbActorMessage::PatchSavedQuote, id, patch).map_err(|e| {
            LuminousError::RactorError(format!("DbActor PatchSavedQuote RPC failed: {e}"))
        })?
    }

    pub async fn delete_saved_quote(&self, id: i64) -> Result<bool, LuminousError> {
        ractor::call!(self.actor, DbActorMessage::DeleteSavedQuote, id).map_err(|e| {
            LuminousError::RactorError(format!("DbActor DeleteSavedQuote RPC failed: {e}"))
        })?
    }
}

#[async_trait]
impl QuoteStore for DbActorHandle {
    async fn insert_if_absent(&self, text: &str, author: &str) -> Result<bool, LuminousError> {
        self.insert_quote_if_absent(text, author).await
    }

    async fn read_all(&self) -> Result<Vec<Quotation>, LuminousError> {
        let rows = self.list_quotes().await?;
        Ok(rows.into_iter().map(Quotation::from).collect())
    }

    async fn read_page_after(
        &self,
        cursor: Option<i64>,
        limit: u32,
    ) -> Result<QuotePage, LuminousError> {
        let limit = pagination::clamp_limit(Some(i64::from(limit)));
        // One extra row tells whether another page exists.
        let rows = self.list_quotes_after(cursor, limit + 1).await?;
        let window = rows.into_iter().map(Quotation::from).collect();
        Ok(pagination::window(window, limit))
    }

    async fn count(&self) -> Result<i64, LuminousError> {
        self.count_quotes().await
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
            DbActorMessage::InsertQuoteIfAbsent(text, author, reply) => {
                let res = self.insert_quote_if_absent(&state.pool, &text, &author).await;
                let _ = reply.send(res);
            }
            DbActorMessage::ListQuotes(reply) => {
                let res = self.list_quotes(&state.pool).await;
                let _ = reply.send(res);
            }
            DbActorMessage::ListQuotesAfter(cursor, limit, reply) => {
                let res = self.list_quotes_after(&state.pool, cursor, limit).await;
                let _ = reply.send(res);
            }
            DbActorMessage::CountQuotes(reply) => {
                let res = self.count_quotes(&state.pool).await;
                let _ = reply.send(res);
            }
            DbActorMessage::ListSavedQuotes(reply) => {
                let res = self.list_saved_quotes(&state.pool).await;
                let _ = reply.send(res);
            }
            DbActorMessage::CreateSavedQuote(create, reply) => {
                let res = self.create_saved_quote(&state.pool, create).await;
                let _ = reply.send(res);
            }
            DbActorMessage::PatchSavedQuote(id, patch, reply) => {
                let res = self.patch_saved_quote(&state.pool, id, patch).await;
                let _ = reply.send(res);
            }
            DbActorMessage::DeleteSavedQuote(id, reply) => {
                let res = self.delete_saved_quote(&state.pool, id).await;
                let _ = reply.send(res);
            }
        }
        Ok(())
    }
}

impl DbActor {
    async fn insert_quote_if_absent(
        &self,
        pool: &SqlitePool,
        text: &str,
        author: &str,
    ) -> Result<bool, LuminousError> {
        let res = sqlx::query(
            r#"
        INSERT INTO quotes (quote_text, quote_author, saved_at)
        VALUES (?, ?, ?)
        ON CONFLICT(quote_text, quote_author) DO NOTHING
        "#,
        )
        .bind(text)
        .bind(author)
        .bind(Utc::now())
        .execute(pool)
        .await?;

        let inserted = res.rows_affected() > 0;
        debug!(inserted, author, "Quote cache insert-if-absent");
        Ok(inserted)
    }

    async fn list_quotes(&self, pool: &SqlitePool) -> Result<Vec<DbQuote>, LuminousError> {
        let rows = sqlx::query_as::<_, DbQuote>(
            r#"
        SELECT id, quote_text, quote_author, saved_at
        FROM quotes
        ORDER BY id
        "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    async fn list_quotes_after(
        &self,
        pool: &SqlitePool,
        cursor: Option<i64>,
        limit: u32,
    ) -> Result<Vec<DbQuote>, LuminousError> {
        let rows = sqlx::query_as::<_, DbQuote>(
            r#"
        SELECT id, quote_text, quote_author, saved_at
        FROM quotes
        WHERE ?1 IS NULL OR id > ?1
        ORDER BY id
        LIMIT ?2
        "#,
        )
        .bind(cursor)
        .bind(i64::from(limit))
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    async fn count_quotes(&self, pool: &SqlitePool) -> Result<i64, LuminousError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quotes")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    async fn list_saved_quotes(
        &self,
        pool: &SqlitePool,
    ) -> Result<Vec<DbSavedQuote>, LuminousError> {
        let rows = sqlx::query_as::<_, DbSavedQuote>(
            r#"
        SELECT id, quote_text, quote_author, background_url, font_family, created_at
        FROM saved_quotes
        ORDER BY created_at, id
        "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    async fn create_saved_quote(
        &self,
        pool: &SqlitePool,
        create: SavedQuoteCreate,
    ) -> Result<DbSavedQuote, LuminousError> {
        let row = sqlx::query_as::<_, DbSavedQuote>(
            r#"
        INSERT INTO saved_quotes (quote_text, quote_author, background_url, font_family, created_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, quote_text, quote_author, background_url, font_family, created_at
        "#,
        )
        .bind(create.quote_text)
        .bind(create.quote_author)
        .bind(create.background_url)
        .bind(create.font_family)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(row)
    }

    async fn patch_saved_quote(
        &self,
        pool: &SqlitePool,
        id: i64,
        patch: SavedQuotePatch,
    ) -> Result<Option<DbSavedQuote>, LuminousError> {
        let row = sqlx::query_as::<_, DbSavedQuote>(
            r#"
        UPDATE saved_quotes
        SET
            background_url = COALESCE(?, background_url),
            font_family = COALESCE(?, font_family)
        WHERE id = ?
        RETURNING id, quote_text, quote_author, background_url, font_family, created_at
        "#,
        )
        .bind(patch.background_url)
        .bind(patch.font_family)
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(row)
    }

    async fn delete_saved_quote(&self, pool: &SqlitePool, id: i64) -> Result<bool, LuminousError> {
        let res = sqlx::query("DELETE FROM saved_quotes WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}

/// Spawn the database actor and return a cloneable handle.
pub async fn spawn(database_url: &str) -> DbActorHandle {
    let (actor, _jh) = ractor::Actor::spawn(None, DbActor, database_url.to_string())
        .await
        .expect("failed to spawn DbActor");

    DbActorHandle { actor }
}

async fn apply_schema(pool: &SqlitePool) -> Result<(), LuminousError> {
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}

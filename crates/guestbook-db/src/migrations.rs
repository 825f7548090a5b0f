use tokio_postgres::Client;
use tracing::debug;

use crate::DbError;

/// Idempotent schema bootstrap, run on every freshly acquired connection.
pub async fn run(client: &Client) -> Result<(), DbError> {
    client
        .batch_execute(
            "
            CREATE TABLE IF NOT EXISTS wishes (
                id          BIGSERIAL PRIMARY KEY,
                name        TEXT NOT NULL DEFAULT '',
                message     TEXT NOT NULL,
                created_at  TIMESTAMPTZ NOT NULL DEFAULT now()
            );

            CREATE INDEX IF NOT EXISTS idx_wishes_created_at
                ON wishes (created_at DESC);

            -- Keyset pagination: (created_at, id) < ($1, $2)
            CREATE INDEX IF NOT EXISTS idx_wishes_created_at_id
                ON wishes (created_at DESC, id DESC);
            ",
        )
        .await?;

    debug!("Schema bootstrap complete");
    Ok(())
}

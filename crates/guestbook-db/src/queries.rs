use async_trait::async_trait;
use tokio_postgres::Row;

use guestbook_types::models::{NewWish, Wish};

use crate::connection::PgStore;
use crate::cursor::Cursor;
use crate::models::HealthStats;
use crate::{DbError, WishStore};

const WISH_COLUMNS: &str = "id, name, message, created_at";

#[async_trait]
impl WishStore for PgStore {
    async fn insert_wish(&self, wish: &NewWish) -> Result<Wish, DbError> {
        let sql = format!("INSERT INTO wishes (name, message) VALUES ($1, $2) RETURNING {WISH_COLUMNS}");
        let row = self
            .client()?
            .query_one(sql.as_str(), &[&wish.name, &wish.message])
            .await?;
        Ok(wish_from_row(&row))
    }

    async fn list_wishes(&self, limit: u32, cursor: Option<Cursor>) -> Result<Vec<Wish>, DbError> {
        let client = self.client()?;
        let limit = i64::from(limit);

        let rows = match cursor {
            None => {
                let sql = format!(
                    "SELECT {WISH_COLUMNS} FROM wishes
                     ORDER BY created_at DESC, id DESC
                     LIMIT $1"
                );
                client.query(sql.as_str(), &[&limit]).await?
            }
            Some(cursor) => {
                // Row-value comparison matches the composite index order.
                let sql = format!(
                    "SELECT {WISH_COLUMNS} FROM wishes
                     WHERE (created_at, id) < ($1, $2)
                     ORDER BY created_at DESC, id DESC
                     LIMIT $3"
                );
                client
                    .query(sql.as_str(), &[&cursor.created_at, &cursor.id, &limit])
                    .await?
            }
        };

        Ok(rows.iter().map(wish_from_row).collect())
    }

    async fn health(&self) -> Result<HealthStats, DbError> {
        let client = self.client()?;

        let row = client
            .query_one(
                "SELECT current_database()::text,
                        COALESCE(current_schema(), '')::text,
                        to_regclass('wishes') IS NOT NULL",
                &[],
            )
            .await?;
        let wishes_table: bool = row.get(2);

        let count: i64 = if wishes_table {
            client.query_one("SELECT count(*) FROM wishes", &[]).await?.get(0)
        } else {
            0
        };

        Ok(HealthStats {
            database: row.get(0),
            schema: row.get(1),
            wishes_table,
            count,
        })
    }

    async fn close(&mut self) {
        self.shutdown().await;
    }
}

fn wish_from_row(row: &Row) -> Wish {
    Wish {
        id: row.get(0),
        name: row.get(1),
        message: row.get(2),
        created_at: row.get(3),
    }
}

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode},
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use http_body_util::BodyExt;
use tower::ServiceExt;

use guestbook_api::{AppStateInner, router};
use guestbook_db::{Connector, Cursor, DbError, HealthStats, WishStore};
use guestbook_types::models::{NewWish, Wish};

/// In-memory stand-in for PostgreSQL with the same keyset semantics.
#[derive(Default)]
pub struct MemoryDb {
    pub rows: Mutex<Vec<Wish>>,
    next_id: AtomicI64,
    pub acquired: AtomicUsize,
    pub closed: AtomicUsize,
    pub fail_queries: AtomicBool,
}

impl MemoryDb {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Insert `count` rows, several of them sharing a timestamp.
    pub fn seed(&self, count: usize) {
        let base = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        for i in 0..count {
            let created_at = base + Duration::seconds((i / 3) as i64);
            self.push(format!("visitor {i}"), format!("wish {i}"), created_at);
        }
    }

    pub fn push(&self, name: String, message: String, created_at: DateTime<Utc>) -> Wish {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let wish = Wish { id, name, message, created_at };
        self.rows.lock().unwrap().push(wish.clone());
        wish
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

pub struct MemoryConnector(pub Arc<MemoryDb>);

#[async_trait]
impl Connector for MemoryConnector {
    async fn acquire(&self) -> Result<Box<dyn WishStore>, DbError> {
        self.0.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MemoryStore { db: self.0.clone(), open: true }))
    }
}

/// Connector whose every connection attempt times out.
pub struct UnreachableConnector;

#[async_trait]
impl Connector for UnreachableConnector {
    async fn acquire(&self) -> Result<Box<dyn WishStore>, DbError> {
        Err(DbError::ConnectTimeout)
    }
}

struct MemoryStore {
    db: Arc<MemoryDb>,
    open: bool,
}

impl MemoryStore {
    fn check(&self) -> Result<(), DbError> {
        if !self.open || self.db.fail_queries.load(Ordering::SeqCst) {
            return Err(DbError::Closed);
        }
        Ok(())
    }
}

#[async_trait]
impl WishStore for MemoryStore {
    async fn insert_wish(&self, wish: &NewWish) -> Result<Wish, DbError> {
        self.check()?;
        Ok(self.db.push(wish.name.clone(), wish.message.clone(), Utc::now()))
    }

    async fn list_wishes(&self, limit: u32, cursor: Option<Cursor>) -> Result<Vec<Wish>, DbError> {
        self.check()?;
        let mut rows: Vec<Wish> = self
            .db
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|w| match cursor {
                Some(c) => (w.created_at, w.id) < (c.created_at, c.id),
                None => true,
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn health(&self) -> Result<HealthStats, DbError> {
        self.check()?;
        Ok(HealthStats {
            database: "memory".into(),
            schema: "public".into(),
            wishes_table: true,
            count: self.db.len() as i64,
        })
    }

    async fn close(&mut self) {
        if self.open {
            self.open = false;
            self.db.closed.fetch_add(1, Ordering::SeqCst);
        }
    }
}

pub fn app(db: &Arc<MemoryDb>) -> Router {
    router(AppStateInner::new(Some(Arc::new(MemoryConnector(db.clone())))))
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let (parts, body) = response.into_parts();
    let bytes = body.collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (parts.status, parts.headers, json)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

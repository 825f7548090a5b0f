//! Runs against a live PostgreSQL only when `GUESTBOOK_TEST_DATABASE_URL` is
//! set; otherwise every test returns immediately.

use std::time::Duration;

use guestbook_db::{Connector, Cursor, PgConnector, WishStore, fetch_page};
use guestbook_types::models::NewWish;

fn connector() -> Option<PgConnector> {
    let url = std::env::var("GUESTBOOK_TEST_DATABASE_URL").ok()?;
    Some(PgConnector::new(&url, Duration::from_secs(5), Duration::from_secs(5)).unwrap())
}

#[tokio::test]
async fn insert_then_page_through() {
    let Some(connector) = connector() else { return };
    let mut store = connector.acquire().await.unwrap();

    let marker = format!("pg-test-{}", std::process::id());
    let mut inserted = Vec::new();
    for i in 0..5 {
        let wish = store
            .insert_wish(&NewWish { name: marker.clone(), message: format!("message {i}") })
            .await
            .unwrap();
        assert!(wish.id > 0);
        inserted.push(wish);
    }

    // Newest first; ids of this run must appear in strictly decreasing order.
    let mut seen = Vec::new();
    let mut cursor: Option<Cursor> = None;
    loop {
        let page = fetch_page(store.as_ref(), 2, cursor).await.unwrap();
        for pair in page.wishes.windows(2) {
            assert!((pair[0].created_at, pair[0].id) > (pair[1].created_at, pair[1].id));
        }
        seen.extend(page.wishes.iter().filter(|w| w.name == marker).map(|w| w.id));
        if !page.has_more {
            break;
        }
        cursor = page.next_cursor.as_deref().and_then(Cursor::decode);
    }

    let mut expected: Vec<i64> = inserted.iter().map(|w| w.id).collect();
    expected.reverse();
    assert_eq!(seen, expected);

    let health = store.health().await.unwrap();
    assert!(health.wishes_table);
    assert!(health.count >= 5);

    store.close().await;
    assert!(store.health().await.is_err());
}

#[test]
fn rejects_garbage_connection_string() {
    let result = PgConnector::new("postgres://user@host:notaport/db", Duration::from_secs(1), Duration::from_secs(1));
    assert!(result.is_err());
}

//! Concurrent writers over one store

use crate::test_utils::*;
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_increments_of_existing_counter_are_not_lost() {
    let db = Arc::new(test_db().await);
    db.set(&path!["stats", "hits"], json!(0)).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let db = Arc::clone(&db);
        handles.push(tokio::spawn(async move {
            for _ in 0..25 {
                db.inc(&path!["stats", "hits"], 1).await.unwrap();
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }
    assert_eq!(db.get(&path!["stats", "hits"]).await.unwrap(), Some(json!(200)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_deep_writes_to_distinct_branches() {
    let db = Arc::new(test_db().await);
    // Root writes replace the document, so it must exist before writers race
    db.set(&path!["tree"], json!({})).await.unwrap();

    let mut handles = Vec::new();
    for i in 0..16 {
        let db = Arc::clone(&db);
        handles.push(tokio::spawn(async move {
            db.set(&path!["tree", format!("b{}", i), "leaf"], json!(i))
                .await
                .unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }
    assert_eq!(db.keys(&path!["tree"]).await.unwrap().len(), 16);
    for i in 0..16 {
        assert_eq!(
            db.get(&path!["tree", format!("b{}", i), "leaf"]).await.unwrap(),
            Some(json!(i))
        );
    }
}

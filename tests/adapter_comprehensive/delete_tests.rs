//! del / del_all

use crate::test_utils::*;

#[tokio::test]
async fn del_removes_value() {
    let db = test_db().await;
    db.set(&path!["foo", "bar"], json!("baz")).await.unwrap();
    db.set(&path!["foo", "keep"], json!(1)).await.unwrap();
    db.del(&path!["foo", "bar"]).await.unwrap();
    assert_eq!(db.get(&path!["foo", "bar"]).await.unwrap(), None);
    assert_eq!(db.get(&path!["foo"]).await.unwrap(), Some(json!({"keep": 1})));
}

#[tokio::test]
async fn del_absent_is_noop() {
    let db = test_db().await;
    let p = db.del(&path!["foo", "bar"]).await.unwrap();
    assert_eq!(p, path!["foo", "bar"]);
    assert_eq!(db.get(&path!["foo", "bar"]).await.unwrap(), None);
}

#[tokio::test]
async fn del_document_key_removes_document() {
    let db = test_db().await;
    db.set(&path!["foo", "a", "b"], json!(1)).await.unwrap();
    db.set(&path!["other", "x"], json!(1)).await.unwrap();
    db.del(&path!["foo"]).await.unwrap();
    assert_eq!(db.get(&path!["foo"]).await.unwrap(), None);
    let all = db.get_all().await.unwrap();
    assert_eq!(all.keys().collect::<Vec<_>>(), vec!["other"]);
}

#[tokio::test]
async fn del_last_field_removes_document() {
    let db = test_db().await;
    db.set(&path!["foo", "bar"], json!(1)).await.unwrap();
    db.del(&path!["foo", "bar"]).await.unwrap();
    assert!(db.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn del_nested_field_keeps_emptied_container() {
    let db = test_db().await;
    db.set(&path!["foo", "a", "b"], json!(1)).await.unwrap();
    db.del(&path!["foo", "a", "b"]).await.unwrap();
    assert_eq!(db.get(&path!["foo"]).await.unwrap(), Some(json!({"a": {}})));
}

#[tokio::test]
async fn del_absent_field_keeps_empty_document() {
    let db = test_db().await;
    db.set(&path!["foo"], json!({})).await.unwrap();
    db.del(&path!["foo", "missing"]).await.unwrap();
    assert_eq!(db.get(&path!["foo"]).await.unwrap(), Some(json!({})));
}

#[tokio::test]
async fn del_all_empties_namespace() {
    let db = test_db().await;
    db.set(&path!["a", "x"], json!(1)).await.unwrap();
    db.set(&path!["b"], json!("doc")).await.unwrap();
    db.set(&path!["c", "y", "z"], json!(true)).await.unwrap();

    let mut removed = db.del_all().await.unwrap();
    removed.sort();
    assert_eq!(removed, vec!["a", "b", "c"]);
    assert!(db.get_all().await.unwrap().is_empty());
    assert_eq!(db.store().document_count(), 0);
}

#[tokio::test]
async fn del_all_on_empty_namespace() {
    let db = test_db().await;
    assert!(db.del_all().await.unwrap().is_empty());
}

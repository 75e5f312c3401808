//! add / add_document

use crate::test_utils::*;
use std::collections::HashSet;

#[tokio::test]
async fn add_returns_retrievable_path() {
    let db = test_db().await;
    let obj = json!({"bar": "baz"});
    let p = db.add(&path!["foo"], obj.clone()).await.unwrap();
    assert_eq!(p.doc(), "foo");
    assert_eq!(p.field().len(), 1);
    assert_eq!(db.get(&p).await.unwrap(), Some(obj));
}

#[tokio::test]
async fn add_identifier_shape_follows_config() {
    let db = DeepBase::in_memory(
        DeepBaseConfig::new()
            .with_name("ids")
            .with_id_alphabet("xyz")
            .with_id_length(16),
    )
    .unwrap();
    db.connect().await.unwrap();

    let p = db.add(&path!["foo"], json!(1)).await.unwrap();
    let id = p.last_segment();
    assert_eq!(id.len(), 16);
    assert!(id.chars().all(|c| "xyz".contains(c)));
}

#[tokio::test]
async fn add_identifiers_are_fresh() {
    let db = test_db().await;
    let mut seen = HashSet::new();
    for i in 0..200 {
        let p = db.add(&path!["items"], json!(i)).await.unwrap();
        assert!(seen.insert(p.last_segment().to_string()));
    }
    assert_eq!(db.keys(&path!["items"]).await.unwrap().len(), 200);
}

#[tokio::test]
async fn add_below_nested_prefix() {
    let db = test_db().await;
    let p = db.add(&path!["org", "team", "members"], json!({"name": "anya"})).await.unwrap();
    assert_eq!(p.segments().len(), 4);
    assert_eq!(db.get(&p.clone().key("name")).await.unwrap(), Some(json!("anya")));
}

#[tokio::test]
async fn add_document_at_top_level() {
    let db = test_db().await;
    let p = db.add_document(json!({"kind": "log"})).await.unwrap();
    assert!(p.is_document());
    let all = db.get_all().await.unwrap();
    assert_eq!(all[p.doc()], json!({"kind": "log"}));
}

//! Walkthrough of a config/user session

use crate::test_utils::*;

#[tokio::test]
async fn config_language_upper_cased() {
    let db = test_db().await;
    db.set(&path!["config", "lang"], json!("en")).await.unwrap();
    assert_eq!(db.get(&path!["config", "lang"]).await.unwrap(), Some(json!("en")));

    db.upd(&path!["config", "lang"], |v| {
        v.and_then(|v| v.as_str().map(|s| json!(s.to_uppercase())))
    })
    .await
    .unwrap();
    assert_eq!(db.get(&path!["config", "lang"]).await.unwrap(), Some(json!("EN")));
}

#[tokio::test]
async fn user_visit_counter() {
    let db = test_db().await;
    let user = db.add(&path!["user"], json!({"name": "martin"})).await.unwrap();
    assert_eq!(user.doc(), "user");
    assert_eq!(db.get(&user.clone().key("name")).await.unwrap(), Some(json!("martin")));

    let count = user.clone().key("count");
    db.inc(&count, 1).await.unwrap();
    db.inc(&count, 1).await.unwrap();
    assert_eq!(db.get(&count).await.unwrap(), Some(json!(2)));

    let anya = db.add(&path!["user"], json!({"name": "anya"})).await.unwrap();
    assert_eq!(
        db.keys(&path!["user"]).await.unwrap(),
        vec![user.last_segment().to_string(), anya.last_segment().to_string()]
    );

    let all = db.get_all().await.unwrap();
    assert_eq!(
        all["user"][user.last_segment()],
        json!({"name": "martin", "count": 2})
    );
}

#[tokio::test]
async fn upd_multiplies_number() {
    let db = test_db().await;
    db.set(&path!["foo", "bar"], json!(2)).await.unwrap();
    db.upd(&path!["foo", "bar"], |v| {
        v.and_then(|v| v.as_i64()).map(|n| json!(n * 3))
    })
    .await
    .unwrap();
    assert_eq!(db.get(&path!["foo", "bar"]).await.unwrap(), Some(json!(6)));
}

#[tokio::test]
async fn upd_sees_none_for_absent_and_can_delete() {
    let db = test_db().await;
    db.upd(&path!["foo", "bar"], |v| {
        assert!(v.is_none());
        Some(json!("created"))
    })
    .await
    .unwrap();
    assert_eq!(db.get(&path!["foo", "bar"]).await.unwrap(), Some(json!("created")));

    db.upd(&path!["foo", "bar"], |_| None).await.unwrap();
    assert_eq!(db.get(&path!["foo", "bar"]).await.unwrap(), None);
}

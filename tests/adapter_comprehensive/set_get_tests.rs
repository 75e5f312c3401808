//! set / get
//!
//! Round-trips, overwrites, auto-vivification and the absence marker.

use crate::test_utils::*;

#[tokio::test]
async fn set_then_get_returns_value() {
    let db = test_db().await;
    db.set(&path!["foo", "bar"], json!("baz")).await.unwrap();
    assert_eq!(db.get(&path!["foo", "bar"]).await.unwrap(), Some(json!("baz")));
}

#[tokio::test]
async fn set_round_trips_every_json_type() {
    let db = test_db().await;
    let values = vec![
        json!(null),
        json!(true),
        json!(-7),
        json!(2.5),
        json!("text"),
        json!([1, "two", {"three": 3}]),
        json!({"nested": {"deep": [true]}}),
    ];
    for (i, value) in values.into_iter().enumerate() {
        let p = path!["types", format!("v{}", i)];
        db.set(&p, value.clone()).await.unwrap();
        assert_eq!(db.get(&p).await.unwrap(), Some(value));
    }
}

#[tokio::test]
async fn set_overwrites_existing_value() {
    let db = test_db().await;
    db.set(&path!["foo", "bar"], json!("baz")).await.unwrap();
    db.set(&path!["foo", "bar"], json!("qux")).await.unwrap();
    assert_eq!(db.get(&path!["foo", "bar"]).await.unwrap(), Some(json!("qux")));
}

#[tokio::test]
async fn set_whole_document() {
    let db = test_db().await;
    db.set(&path!["doc"], json!({"a": 1})).await.unwrap();
    assert_eq!(db.get(&path!["doc", "a"]).await.unwrap(), Some(json!(1)));
    db.set(&path!["doc"], json!([1, 2])).await.unwrap();
    assert_eq!(db.get(&path!["doc"]).await.unwrap(), Some(json!([1, 2])));
}

#[tokio::test]
async fn set_vivifies_missing_containers() {
    let db = test_db().await;
    db.set(&path!["key", "a", "b", "c"], json!("v")).await.unwrap();
    assert_eq!(db.get(&path!["key", "a", "b", "c"]).await.unwrap(), Some(json!("v")));
    assert_eq!(db.get(&path!["key", "a", "b"]).await.unwrap(), Some(json!({"c": "v"})));
}

#[tokio::test]
async fn set_vivifies_below_existing_branch() {
    let db = test_db().await;
    db.set(&path!["key", "a", "x"], json!(1)).await.unwrap();
    db.set(&path!["key", "a", "b", "c"], json!(2)).await.unwrap();
    assert_eq!(
        db.get(&path!["key"]).await.unwrap(),
        Some(json!({"a": {"x": 1, "b": {"c": 2}}}))
    );
}

#[tokio::test]
async fn set_none_behaves_like_del() {
    let db = test_db().await;
    db.set(&path!["foo", "bar"], json!("baz")).await.unwrap();
    db.set(&path!["foo", "bar"], None).await.unwrap();
    assert_eq!(db.get(&path!["foo", "bar"]).await.unwrap(), None);

    db.set(&path!["foo", "keep"], json!(1)).await.unwrap();
    db.set(&path!["foo", "gone"], json!(2)).await.unwrap();
    db.set(&path!["foo", "gone"], None).await.unwrap();
    let via_set = db.get(&path!["foo"]).await.unwrap();

    db.set(&path!["foo", "gone"], json!(2)).await.unwrap();
    db.del(&path!["foo", "gone"]).await.unwrap();
    assert_eq!(db.get(&path!["foo"]).await.unwrap(), via_set);
}

#[tokio::test]
async fn set_none_on_absent_path_is_noop() {
    let db = test_db().await;
    db.set(&path!["foo", "bar"], None).await.unwrap();
    assert_eq!(db.get(&path!["foo", "bar"]).await.unwrap(), None);
    assert!(db.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn set_returns_path_without_value() {
    let db = test_db().await;
    let p = db.set(&path!["a", "b", "c"], json!(0)).await.unwrap();
    assert_eq!(p.segments(), vec!["a", "b", "c"]);
}

#[tokio::test]
async fn get_absent_is_none() {
    let db = test_db().await;
    assert_eq!(db.get(&path!["foo", "bar"]).await.unwrap(), None);
    db.set(&path!["foo", "other"], json!(1)).await.unwrap();
    assert_eq!(db.get(&path!["foo", "bar"]).await.unwrap(), None);
    assert_eq!(db.get(&path!["foo", "other", "below"]).await.unwrap(), None);
}

#[tokio::test]
async fn invalid_segments_are_rejected() {
    let db = test_db().await;
    for p in [path!["foo", "a.b"], path!["foo", ""], path![""]] {
        let err = db.set(&p, json!(1)).await.unwrap_err();
        assert!(matches!(err, Error::InvalidPath(_)), "{:?}", p);
        assert!(matches!(db.get(&p).await, Err(Error::InvalidPath(_))));
    }
    assert!(db.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn field_path_parsed_from_query() {
    let db = test_db().await;
    let p = DocPath::from_parts("settings", "theme.color".parse().unwrap());
    db.set(&p, json!("dark")).await.unwrap();
    assert_eq!(
        db.get(&path!["settings", "theme", "color"]).await.unwrap(),
        Some(json!("dark"))
    );
}

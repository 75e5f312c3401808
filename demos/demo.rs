//! DeepBase walkthrough
//!
//! ```bash
//! cargo run --example demo
//! ```
//!
//! Uses the in-process store. With the `redis` feature and a RedisJSON
//! server, swap `DeepBase::in_memory` for `DeepBase::open`.

use deepbase::{json, path, DeepBase, DeepBaseConfig, Result};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let db = DeepBase::in_memory(DeepBaseConfig::new().with_name("demo"))?;
    db.connect().await?;

    // set / get
    db.set(&path!["config", "lang"], json!("en")).await?;
    println!("config.lang = {:?}", db.get(&path!["config", "lang"]).await?);

    // add returns the full path, identifier included
    let martin = db.add(&path!["user"], json!({"name": "martin"})).await?;
    println!("added {}", martin);
    println!(
        "{}.name = {:?}",
        martin,
        db.get(&martin.clone().key("name")).await?
    );

    // inc on a missing field starts from zero
    db.inc(&martin.clone().key("count"), 1).await?;
    db.inc(&martin.clone().key("count"), 1).await?;
    println!(
        "{}.count = {:?}",
        martin,
        db.get(&martin.clone().key("count")).await?
    );

    db.add(&path!["user"], json!({"name": "anya"})).await?;
    println!("user ids = {:?}", db.keys(&path!["user"]).await?);

    // upd
    db.upd(&path!["config", "lang"], |v| {
        v.and_then(|v| v.as_str().map(|s| json!(s.to_uppercase())))
    })
    .await?;
    println!("config.lang = {:?}", db.get(&path!["config", "lang"]).await?);

    let snapshot = db.get_all().await?;
    println!(
        "{}",
        serde_json::to_string_pretty(&snapshot).unwrap_or_default()
    );

    db.disconnect().await?;
    Ok(())
}

//! Snapshot persistence tests
//!
//! A snapshot must survive a save/load round trip with the full model
//! intact, including behaviors, constraints, and vendor parameters.

use sqlforge::behavior::{Behavior, TimestampableBehavior};
use sqlforge::model::{
    Column, Database, DefaultValue, ForeignKey, ForeignKeyAction, IdMethod, Index, Table, Unique,
    VendorInfo,
};
use sqlforge::snapshot::{ORIGIN_UUID, SNAPSHOT_VERSION, SchemaSnapshot};
use sqlforge_types::{ColumnType, Dialect};

fn sample_database() -> Database {
    let mut db = Database::new("bookstore");
    db.add_table(
        Table::new("books")
            .with_schema("catalog")
            .with_id_method(IdMethod::Native)
            .with_description("All the books")
            .with_column(
                Column::new("id", ColumnType::Integer)
                    .primary_key()
                    .auto_increment(),
            )
            .with_column(
                Column::new("title", ColumnType::Varchar)
                    .with_size(255)
                    .not_null()
                    .with_default(DefaultValue::literal("untitled")),
            )
            .with_column(Column::new("author_id", ColumnType::Integer))
            .with_unique(Unique::new("books_title_key", vec!["title".to_string()]))
            .with_index(Index::new(
                "books_author_id_idx",
                vec!["author_id".to_string()],
            ))
            .with_foreign_key(
                ForeignKey::new(
                    "books_author_id_fkey",
                    vec!["author_id".to_string()],
                    "authors",
                    vec!["id".to_string()],
                )
                .on_delete(ForeignKeyAction::Cascade),
            )
            .with_behavior(Behavior::Timestampable(TimestampableBehavior::default()))
            .with_vendor_info("pgsql", VendorInfo::new().with_parameter("schema", "catalog")),
    )
    .unwrap();
    db
}

#[test]
fn test_json_round_trip_preserves_the_model() {
    let snapshot = SchemaSnapshot::new(Dialect::Postgres, sample_database());
    let json = snapshot.to_json().unwrap();
    let restored = SchemaSnapshot::from_json(&json).unwrap();

    assert_eq!(restored.version, SNAPSHOT_VERSION);
    assert_eq!(restored.dialect, Dialect::Postgres);
    assert_eq!(restored.id, snapshot.id);
    assert_eq!(restored.database, snapshot.database);
}

#[test]
fn test_save_and_load_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshots").join("0001.json");

    let snapshot = SchemaSnapshot::new(Dialect::Postgres, sample_database());
    snapshot.save(&path).unwrap();

    let restored = SchemaSnapshot::load(&path).unwrap();
    assert_eq!(restored.database, snapshot.database);
    assert!(
        restored
            .database
            .table("books")
            .unwrap()
            .behavior("timestampable")
            .is_some()
    );
}

#[test]
fn test_first_snapshot_points_at_the_origin() {
    let snapshot = SchemaSnapshot::new(Dialect::Generic, Database::new("empty"));
    assert_eq!(snapshot.prev_id, ORIGIN_UUID);
    assert!(snapshot.is_empty());
}

#[test]
fn test_snapshots_chain_through_prev_id() {
    let first = SchemaSnapshot::new(Dialect::Postgres, sample_database());
    let second = SchemaSnapshot::new(Dialect::Postgres, sample_database())
        .with_prev_id(first.id.clone());
    assert_eq!(second.prev_id, first.id);
    assert_ne!(second.id, first.id);
}

#[test]
fn test_load_rejects_malformed_json() {
    assert!(SchemaSnapshot::from_json("{\"version\": 1").is_err());
}

#[test]
fn test_behaviors_survive_with_their_configuration() {
    let mut db = Database::new("blog");
    let mut params = std::collections::BTreeMap::new();
    params.insert("disable_updated_at".to_string(), "true".to_string());
    db.add_table(
        Table::new("posts")
            .with_behavior(Behavior::from_params("timestampable", &params).unwrap()),
    )
    .unwrap();

    let snapshot = SchemaSnapshot::new(Dialect::Postgres, db);
    let json = snapshot.to_json().unwrap();
    let restored = SchemaSnapshot::from_json(&json).unwrap();

    match restored
        .database
        .table("posts")
        .unwrap()
        .behavior("timestampable")
    {
        Some(Behavior::Timestampable(config)) => assert!(!config.with_updated_at()),
        other => panic!("behavior lost in round trip: {:?}", other),
    }
}

//! PostgreSQL DDL generation tests
//!
//! These tests verify that the Postgres platform renders dialect-correct
//! CREATE/DROP statements for tables, constraints, sequences, schemas, and
//! comments from the schema model.

use sqlforge::model::{
    Column, Database, DefaultValue, ForeignKey, ForeignKeyAction, IdMethod, Index, Table, Unique,
    VendorInfo,
};
use sqlforge::platform::{self, IdGeneration, PgsqlPlatform, Platform};
use sqlforge_types::{ColumnType, Dialect};

// =============================================================================
// Helper Functions
// =============================================================================

fn column(name: &str, column_type: ColumnType) -> Column {
    Column::new(name, column_type)
}

fn serial_pk() -> Column {
    Column::new("id", ColumnType::Integer)
        .primary_key()
        .auto_increment()
}

/// Table with a native serial primary key
fn native_table(name: &str) -> Table {
    Table::new(name)
        .with_id_method(IdMethod::Native)
        .with_column(serial_pk())
}

fn pgsql() -> PgsqlPlatform {
    PgsqlPlatform::new()
}

// =============================================================================
// Column DDL
// =============================================================================

#[test]
fn test_auto_increment_column_substitutes_serial() {
    let table = native_table("orders");
    let ddl = pgsql().column_ddl(table.column("id").unwrap(), &table);
    assert_eq!(ddl, "\"id\" serial NOT NULL");
}

#[test]
fn test_bigint_auto_increment_substitutes_bigserial() {
    let table = Table::new("events")
        .with_id_method(IdMethod::Native)
        .with_column(
            Column::new("id", ColumnType::BigInt)
                .primary_key()
                .auto_increment(),
        );
    let ddl = pgsql().column_ddl(table.column("id").unwrap(), &table);
    assert_eq!(ddl, "\"id\" bigserial NOT NULL");
}

#[test]
fn test_serial_never_takes_a_size_suffix() {
    // Even a stray size on the domain must not leak onto the serial type.
    let table = Table::new("orders")
        .with_id_method(IdMethod::Native)
        .with_column(
            Column::new("id", ColumnType::Integer)
                .primary_key()
                .auto_increment()
                .with_size(11),
        );
    let ddl = pgsql().column_ddl(table.column("id").unwrap(), &table);
    assert_eq!(ddl, "\"id\" serial NOT NULL");
}

#[test]
fn test_explicit_id_parameters_disable_substitution() {
    let table = Table::new("orders")
        .with_id_method(IdMethod::Native)
        .with_id_method_parameter("orders_seq")
        .with_column(serial_pk());
    let ddl = pgsql().column_ddl(table.column("id").unwrap(), &table);
    assert_eq!(ddl, "\"id\" INTEGER NOT NULL");
}

#[test]
fn test_varchar_column_with_size() {
    let table = Table::new("books").with_column(
        column("title", ColumnType::Varchar).with_size(255).not_null(),
    );
    let ddl = pgsql().column_ddl(table.column("title").unwrap(), &table);
    assert_eq!(ddl, "\"title\" VARCHAR(255) NOT NULL");
}

#[test]
fn test_sizeless_types_drop_the_size() {
    // LONGVARCHAR maps to TEXT, which takes no size on Postgres.
    let table = Table::new("books")
        .with_column(column("summary", ColumnType::LongVarchar).with_size(500));
    let ddl = pgsql().column_ddl(table.column("summary").unwrap(), &table);
    assert_eq!(ddl, "\"summary\" TEXT");
}

#[test]
fn test_literal_string_default() {
    let table = Table::new("books").with_column(
        column("status", ColumnType::Varchar)
            .with_size(32)
            .with_default(DefaultValue::literal("draft")),
    );
    let ddl = pgsql().column_ddl(table.column("status").unwrap(), &table);
    assert_eq!(ddl, "\"status\" VARCHAR(32) DEFAULT 'draft'");
}

#[test]
fn test_boolean_default_uses_postgres_literals() {
    let table = Table::new("books").with_column(
        column("in_print", ColumnType::Boolean).with_default(DefaultValue::literal("true")),
    );
    let ddl = pgsql().column_ddl(table.column("in_print").unwrap(), &table);
    assert_eq!(ddl, "\"in_print\" BOOLEAN DEFAULT 't'");
}

#[test]
fn test_expression_default_is_emitted_verbatim() {
    let table = Table::new("books").with_column(
        column("created_at", ColumnType::Timestamp)
            .not_null()
            .with_default(DefaultValue::expr("CURRENT_TIMESTAMP")),
    );
    let ddl = pgsql().column_ddl(table.column("created_at").unwrap(), &table);
    assert_eq!(
        ddl,
        "\"created_at\" TIMESTAMP DEFAULT CURRENT_TIMESTAMP NOT NULL"
    );
}

// =============================================================================
// Table DDL
// =============================================================================

#[test]
fn test_add_table_ddl_full_layout() {
    let table = native_table("books")
        .with_column(column("title", ColumnType::Varchar).with_size(255).not_null())
        .with_unique(Unique::new(
            "books_title_key",
            vec!["title".to_string()],
        ));
    let expected = "CREATE SEQUENCE \"books_id_seq\";\n\
                    CREATE TABLE \"books\" (\n\
                    \t\"id\" serial NOT NULL,\n\
                    \t\"title\" VARCHAR(255) NOT NULL,\n\
                    \tCONSTRAINT \"books_pkey\" PRIMARY KEY (\"id\"),\n\
                    \tCONSTRAINT \"books_title_key\" UNIQUE (\"title\")\n\
                    );\n";
    assert_eq!(pgsql().add_table_ddl(&table), expected);
}

#[test]
fn test_drop_then_add_is_an_idempotent_recreate() {
    let table = Table::new("users")
        .with_schema("app")
        .with_column(column("name", ColumnType::Varchar).with_size(64));
    let platform = pgsql();

    let drop = platform.drop_table_ddl(&table);
    assert_eq!(drop, "DROP TABLE IF EXISTS \"app\".\"users\" CASCADE;\n");

    let add = platform.add_table_ddl(&table);
    assert!(add.starts_with("CREATE TABLE \"app\".\"users\" (\n"));
}

#[test]
fn test_vendor_schema_parameter_wraps_statements_in_search_path() {
    let table = Table::new("books")
        .with_vendor_info(
            "pgsql",
            VendorInfo::new().with_parameter("schema", "catalog"),
        )
        .with_column(column("title", ColumnType::Varchar).with_size(255));
    let ddl = pgsql().add_table_ddl(&table);
    assert!(ddl.starts_with("SET search_path TO \"catalog\";\n"));
    assert!(ddl.ends_with("SET search_path TO public;\n"));

    let drop = pgsql().drop_table_ddl(&table);
    assert!(drop.starts_with("SET search_path TO \"catalog\";\n"));
    assert!(drop.contains("DROP TABLE IF EXISTS \"books\" CASCADE;\n"));
    assert!(drop.ends_with("SET search_path TO public;\n"));
}

#[test]
fn test_drop_table_mirrors_sequence_drop() {
    let table = native_table("orders");
    let drop = pgsql().drop_table_ddl(&table);
    assert!(drop.contains("DROP TABLE IF EXISTS \"orders\" CASCADE;\n"));
    assert!(drop.contains("DROP SEQUENCE \"orders_id_seq\";\n"));

    // Explicit id parameters mean the sequence is managed elsewhere.
    let managed = native_table("orders2").with_id_method_parameter("orders_seq");
    let drop = pgsql().drop_table_ddl(&managed);
    assert!(!drop.contains("DROP SEQUENCE"));
}

#[test]
fn test_table_and_column_comments() {
    let table = Table::new("books")
        .with_description("All the books")
        .with_column(
            column("title", ColumnType::Varchar)
                .with_size(255)
                .with_description("Book's title"),
        );
    let ddl = pgsql().add_table_ddl(&table);
    assert!(ddl.contains("COMMENT ON TABLE \"books\" IS 'All the books';\n"));
    // Single quotes in descriptions are doubled.
    assert!(ddl.contains("COMMENT ON COLUMN \"books\".\"title\" IS 'Book''s title';\n"));
}

#[test]
fn test_drop_unique_is_an_alter_table_drop_constraint() {
    // Uniques live as table constraints, not standalone indexes.
    let table = Table::new("books")
        .with_schema("catalog")
        .with_column(column("title", ColumnType::Varchar).with_size(255));
    let unique = Unique::new("books_title_key", vec!["title".to_string()]);
    assert_eq!(
        pgsql().drop_unique_ddl(&unique, &table),
        "ALTER TABLE \"catalog\".\"books\" DROP CONSTRAINT \"books_title_key\";\n"
    );
}

#[test]
fn test_foreign_key_renders_referential_actions() {
    let fk = ForeignKey::new(
        "books_author_id_fkey",
        vec!["author_id".to_string()],
        "authors",
        vec!["id".to_string()],
    )
    .on_update(ForeignKeyAction::Restrict)
    .on_delete(ForeignKeyAction::SetNull);
    assert_eq!(
        pgsql().foreign_key_ddl(&fk),
        "CONSTRAINT \"books_author_id_fkey\" FOREIGN KEY (\"author_id\") \
         REFERENCES \"authors\" (\"id\") ON UPDATE RESTRICT ON DELETE SET NULL"
    );
}

#[test]
fn test_foreign_key_references_qualified_foreign_table() {
    let fk = ForeignKey::new(
        "books_author_id_fkey",
        vec!["author_id".to_string()],
        "authors",
        vec!["id".to_string()],
    )
    .with_foreign_schema("people")
    .on_delete(ForeignKeyAction::Cascade);
    let table = Table::new("books").with_schema("catalog");
    assert_eq!(
        pgsql().add_foreign_key_ddl(&fk, &table),
        "ALTER TABLE \"catalog\".\"books\" ADD CONSTRAINT \"books_author_id_fkey\" \
         FOREIGN KEY (\"author_id\") REFERENCES \"people\".\"authors\" (\"id\") \
         ON DELETE CASCADE;\n"
    );
}

#[test]
fn test_identifier_quoting_can_be_disabled() {
    let mut platform = pgsql();
    platform.set_identifier_quoting(false);
    let table = Table::new("books").with_column(column("title", ColumnType::Varchar));
    assert!(platform.add_table_ddl(&table).contains("CREATE TABLE books"));
}

// =============================================================================
// Sequence names
// =============================================================================

#[test]
fn test_sequence_name_derived_from_auto_increment_column() {
    let table = native_table("orders");
    assert_eq!(
        pgsql().sequence_name(&table),
        Some("orders_id_seq".to_string())
    );
}

#[test]
fn test_sequence_name_explicit_parameter_wins() {
    let table = native_table("orders").with_id_method_parameter("orders_seq");
    assert_eq!(pgsql().sequence_name(&table), Some("orders_seq".to_string()));
}

#[test]
fn test_sequence_name_none_without_native_id_method() {
    let table = Table::new("orders").with_column(serial_pk());
    assert_eq!(pgsql().sequence_name(&table), None);
}

#[test]
fn test_sequence_name_cache_keyed_by_parameters() {
    let platform = pgsql();
    let table = native_table("orders");
    assert_eq!(
        platform.sequence_name(&table),
        Some("orders_id_seq".to_string())
    );
    // Same platform instance, changed parameters: no stale cache hit.
    let table = table.with_id_method_parameter("orders_seq");
    assert_eq!(
        platform.sequence_name(&table),
        Some("orders_seq".to_string())
    );
}

#[test]
fn test_identifier_fetch_requires_a_sequence() {
    let platform = pgsql();
    let keyless = Table::new("audit").with_column(column("note", ColumnType::Varchar));
    assert!(platform.identifier_fetch_snippet(&keyless).is_err());

    let keyed = native_table("orders");
    let snippet = platform.identifier_fetch_snippet(&keyed).unwrap();
    assert!(snippet.contains("nextval('orders_id_seq')"));
}

// =============================================================================
// Database-level DDL
// =============================================================================

fn bookstore() -> Database {
    let mut db = Database::new("bookstore");
    db.add_table(
        native_table("books")
            .with_schema("catalog")
            .with_column(column("title", ColumnType::Varchar).with_size(255).not_null())
            .with_column(column("author_id", ColumnType::Integer))
            .with_foreign_key(ForeignKey::new(
                "books_author_id_fkey",
                vec!["author_id".to_string()],
                "authors",
                vec!["id".to_string()],
            ))
            .with_index(Index::new(
                "books_author_id_idx",
                vec!["author_id".to_string()],
            )),
    )
    .unwrap();
    db.add_table(
        native_table("authors")
            .with_schema("catalog")
            .with_column(column("name", ColumnType::Varchar).with_size(128).not_null()),
    )
    .unwrap();
    db
}

#[test]
fn test_foreign_keys_come_after_all_create_tables() {
    // "books" references "authors", which is declared second; the FK pass
    // runs after every table exists.
    let ddl = pgsql().add_tables_ddl(&bookstore());

    let create_books = ddl.find("CREATE TABLE \"catalog\".\"books\"").unwrap();
    let create_authors = ddl.find("CREATE TABLE \"catalog\".\"authors\"").unwrap();
    let add_fk = ddl
        .find("ALTER TABLE \"catalog\".\"books\" ADD CONSTRAINT \"books_author_id_fkey\"")
        .unwrap();
    assert!(create_books < add_fk);
    assert!(create_authors < add_fk);
}

#[test]
fn test_schemas_are_created_once_and_first() {
    let ddl = pgsql().add_tables_ddl(&bookstore());
    assert_eq!(ddl.matches("CREATE SCHEMA \"catalog\";\n").count(), 1);
    assert_eq!(
        ddl.matches("DROP SCHEMA IF EXISTS \"catalog\" CASCADE;\n").count(),
        1
    );
    assert!(ddl.contains("CREATE OR REPLACE FUNCTION \"catalog\".trigger_set_timestamp()"));

    let create_schema = ddl.find("CREATE SCHEMA").unwrap();
    let first_table = ddl.find("CREATE TABLE").unwrap();
    assert!(create_schema < first_table);
}

#[test]
fn test_database_ddl_is_wrapped_in_a_transaction() {
    let ddl = pgsql().add_tables_ddl(&bookstore());
    assert!(ddl.starts_with("BEGIN;\n"));
    assert!(ddl.ends_with("COMMIT;\n"));
}

#[test]
fn test_indices_are_emitted_with_their_table() {
    let ddl = pgsql().add_tables_ddl(&bookstore());
    assert!(ddl.contains(
        "CREATE INDEX \"books_author_id_idx\" ON \"catalog\".\"books\" (\"author_id\");\n"
    ));
}

#[test]
fn test_skip_ddl_tables_are_excluded() {
    let mut db = bookstore();
    db.add_table({
        let mut t = Table::new("lookup_only");
        t.skip_ddl = true;
        t.add_column(column("code", ColumnType::Char).with_size(2));
        t
    })
    .unwrap();
    let ddl = pgsql().add_tables_ddl(&db);
    assert!(!ddl.contains("lookup_only"));
}

// =============================================================================
// Registry
// =============================================================================

#[test]
fn test_registry_resolves_known_dialects() {
    assert_eq!(
        platform::for_dialect(Dialect::Postgres).dialect(),
        Dialect::Postgres
    );
    assert_eq!(
        platform::from_identifier("pgsql").unwrap().dialect(),
        Dialect::Postgres
    );
    assert_eq!(
        platform::from_identifier("generic").unwrap().dialect(),
        Dialect::Generic
    );
}

#[test]
fn test_registry_rejects_unknown_identifier_at_selection_time() {
    assert!(platform::from_identifier("oracle9i").is_err());
}

#[test]
fn test_id_generation_strategy_per_dialect() {
    assert_eq!(pgsql().native_id_method(), IdGeneration::Serial);
    assert_eq!(
        platform::for_dialect(Dialect::Generic).native_id_method(),
        IdGeneration::Identity
    );
    // Identity dialects never own a sequence, so none is created.
    let table = native_table("orders");
    assert_eq!(
        platform::for_dialect(Dialect::Generic).add_sequence_ddl(&table),
        ""
    );
}

// =============================================================================
// Generic platform baseline
// =============================================================================

#[test]
fn test_generic_platform_uses_identity_clause_and_numeric_booleans() {
    let platform = platform::for_dialect(Dialect::Generic);
    let table = Table::new("flags")
        .with_column(serial_pk())
        .with_column(
            column("enabled", ColumnType::Boolean).with_default(DefaultValue::literal("yes")),
        );
    let ddl = platform.column_ddl(table.column("id").unwrap(), &table);
    assert_eq!(ddl, "\"id\" INTEGER NOT NULL IDENTITY");
    let ddl = platform.column_ddl(table.column("enabled").unwrap(), &table);
    assert_eq!(ddl, "\"enabled\" BOOLEAN DEFAULT 1");
}

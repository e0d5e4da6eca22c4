//! Embedded migrations produce the expected schema and are idempotent.

use calculator_backend::outbound::persistence::apply_migrations;
use postgres::{Client, NoTls};
use rstest::rstest;

mod support;

use support::embedded_postgres::provision_migrated_database;
use support::{format_postgres_error, handle_cluster_setup_failure};

fn column_type(client: &mut Client, table: &str, column: &str) -> Option<String> {
    client
        .query_opt(
            "SELECT data_type || coalesce('(' || numeric_precision || ',' || numeric_scale || ')', '') \
             FROM information_schema.columns WHERE table_name = $1 AND column_name = $2",
            &[&table, &column],
        )
        .unwrap_or_else(|err| panic!("column query failed: {}", format_postgres_error(&err)))
        .map(|row| row.get(0))
}

#[rstest]
fn migrations_create_calculator_schema() {
    let database = match provision_migrated_database() {
        Ok(database) => database,
        Err(reason) => {
            handle_cluster_setup_failure::<()>(reason);
            return;
        }
    };

    let mut client = Client::connect(database.url(), NoTls)
        .unwrap_or_else(|err| panic!("connect failed: {}", format_postgres_error(&err)));

    for column in ["a", "b", "result"] {
        assert_eq!(
            column_type(&mut client, "calculations", column).as_deref(),
            Some("numeric(10,2)"),
            "calculations.{column}"
        );
    }
    assert_eq!(
        column_type(&mut client, "calculations", "type").as_deref(),
        Some("character varying")
    );
    assert_eq!(
        column_type(&mut client, "users", "created_at").as_deref(),
        Some("timestamp with time zone")
    );

    let reapplied = apply_migrations(database.url()).expect("second run succeeds");
    assert_eq!(reapplied, 0);
}

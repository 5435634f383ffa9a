use crate::database::Connection;
use crate::database::error::DatabaseError;
use crate::database::libsql::libsql_connection;
use libsql::Value;
use libsql::params::Params;
use rust_embed::RustEmbed;
use std::collections::BTreeMap;
use tracing::info;

#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/migrations"]
struct Migrations;

/// Applies every embedded migration that isn't recorded in `applied_migration` yet, in file name order.
pub async fn run_migrations(connection: &mut dyn Connection) -> Result<(), DatabaseError> {
	let connection = libsql_connection(connection)?;
	let migrations = Migrations::iter()
		.filter_map(|file_name| Migrations::get(&file_name).map(|file| (file_name, file)))
		.collect::<BTreeMap<_, _>>();

	let transaction = connection.transaction().await?;
	transaction
		.execute(
			r"CREATE TABLE IF NOT EXISTS applied_migration (
				name TEXT PRIMARY KEY NOT NULL
			)",
			(),
		)
		.await?;

	for (file_name, migration) in &migrations {
		let name = Value::Text(file_name.to_string());
		let already_applied = transaction
			.query(
				r"SELECT 1 FROM applied_migration WHERE name = ?1",
				Params::Positional(vec![name.clone()]),
			)
			.await?
			.next()
			.await?
			.is_some();
		if already_applied {
			continue;
		}

		let sql = std::str::from_utf8(migration.data.as_ref()).map_err(|error| DatabaseError::Migration(error.into()))?;
		transaction.execute_batch(sql).await?;
		transaction
			.execute(
				r"INSERT INTO applied_migration(name) VALUES (?1)",
				Params::Positional(vec![name]),
			)
			.await?;
		info!(migration = %file_name, "Applied migration");
	}
	transaction.commit().await?;

	Ok(())
}

use crate::configuration::{Configuration, DatabaseBackend};
use crate::database::libsql::{LibSqlRepository, open_local};
use crate::database::sqlite::{SqliteDatabase, SqliteRepository};
use crate::database::{Connection, Database, Repository};
use crate::room::RoomRegistry;
use crate::room::code::RoomCodeGenerator;
use anyhow::Context;
use std::sync::Arc;
use tracing::info;

pub struct ApplicationContext {
	pub configuration: Configuration,
	pub database: Arc<dyn Database>,
	pub room_registry: RoomRegistry,
}

impl ApplicationContext {
	pub async fn new(configuration: Configuration) -> anyhow::Result<ApplicationContext> {
		let (database, repository) = open_database(&configuration).await?;
		let room_registry = RoomRegistry::new(
			repository,
			RoomCodeGenerator::new(configuration.code_generation_attempts),
		);

		Ok(Self {
			configuration,
			database,
			room_registry,
		})
	}

	pub async fn connection(&self) -> anyhow::Result<Box<dyn Connection>> {
		self.database
			.connection()
			.await
			.context("Failed to get database connection")
	}
}

async fn open_database(configuration: &Configuration) -> anyhow::Result<(Arc<dyn Database>, Arc<dyn Repository>)> {
	let url = configuration.database.url.as_str();
	let backend = configuration.database.backend;
	info!(?backend, url, "Opening database");

	match backend {
		DatabaseBackend::Sqlite => {
			let mut database = SqliteDatabase::connect(url).await?;
			database.migrate().await.context("Failed to migrate SQLite database")?;
			Ok((Arc::new(database), Arc::new(SqliteRepository)))
		}
		DatabaseBackend::LibSql => {
			let mut pool = open_local(url).await?;
			pool.migrate().await.context("Failed to migrate libsql database")?;
			Ok((Arc::new(pool), Arc::new(LibSqlRepository)))
		}
	}
}

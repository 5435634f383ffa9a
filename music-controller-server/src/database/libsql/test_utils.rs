use crate::database::libsql::{LibSqlRepository, open_local};
use crate::database::test::TestFactory;
use crate::database::{Connection, Database, Repository};
use std::sync::Arc;

pub struct LibSqlTestFactory;

impl TestFactory for LibSqlTestFactory {
	async fn connection() -> Box<dyn Connection> {
		Self::database()
			.await
			.connection()
			.await
			.expect("Failed to connect to database")
	}

	async fn database() -> Arc<dyn Database> {
		let mut pool = open_local(":memory:").await.expect("Failed to open libsql pool");

		pool.migrate().await.expect("Failed to migrate database");

		Arc::new(pool)
	}

	fn repository() -> Arc<dyn Repository> {
		Arc::new(LibSqlRepository)
	}
}

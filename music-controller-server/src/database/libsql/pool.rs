use deadpool::managed::{Manager, Metrics, Object, Pool, RecycleError, RecycleResult};

pub type LibSqlPool = Pool<LibSqlManager, Object<LibSqlManager>>;

/// How long a connection waits for a write lock held by another connection.
const BUSY_TIMEOUT_MILLISECONDS: u32 = 5_000;

pub struct LibSqlManager {
	database: libsql::Database,
}

impl LibSqlManager {
	pub fn new(database: libsql::Database) -> Self {
		Self { database }
	}
}

impl Manager for LibSqlManager {
	type Type = libsql::Connection;
	type Error = libsql::Error;

	async fn create(&self) -> Result<Self::Type, Self::Error> {
		let connection = self.database.connect()?;
		// PRAGMA busy_timeout answers with a row, so it can't go through `execute`.
		connection
			.query(&format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MILLISECONDS}"), ())
			.await?;
		Ok(connection)
	}

	async fn recycle(&self, connection: &mut Self::Type, _metrics: &Metrics) -> RecycleResult<Self::Error> {
		let mut rows = connection.query("SELECT 1", ()).await?;
		let Some(first) = rows.next().await? else {
			return Err(RecycleError::Message("Ping query returned zero results".into()));
		};

		if first.get::<i64>(0).map_err(RecycleError::Backend)? != 1 {
			return Err(RecycleError::Message("Ping query returned unexpected result".into()));
		}

		Ok(())
	}
}

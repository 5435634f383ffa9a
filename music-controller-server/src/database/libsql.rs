use crate::database::{Connection, Database, Repository};
use crate::room::repository::RoomRepository;
use anyhow::anyhow;
use async_trait::async_trait;
use deadpool::managed::{Object, PoolError};
use std::any::Any;
use std::ops::DerefMut;

mod migration;
mod pool;
mod room;
#[cfg(test)]
pub mod test_utils;

use crate::database::error::DatabaseError;
use crate::database::libsql::pool::LibSqlManager;
pub use pool::LibSqlPool;

/// `SQLITE_CONSTRAINT`, extended result codes share these lower bits.
const SQLITE_CONSTRAINT: i32 = 19;

pub async fn open_local(path: &str) -> Result<LibSqlPool, DatabaseError> {
	let database = libsql::Builder::new_local(path).build().await?;
	let manager = LibSqlManager::new(database);

	// Every connection to an in-memory database sees its own database.
	let maximum_size = if path == ":memory:" { 1 } else { maximum_pool_size() };
	LibSqlPool::builder(manager)
		.max_size(maximum_size)
		.build()
		.map_err(|error| DatabaseError::Connection(error.into()))
}

fn maximum_pool_size() -> usize {
	std::thread::available_parallelism().map_or(4, usize::from) * 2
}

#[async_trait]
impl Database for LibSqlPool {
	async fn migrate(&mut self) -> Result<(), DatabaseError> {
		let mut connection = self.connection().await?;
		migration::run_migrations(connection.as_mut()).await?;

		Ok(())
	}

	async fn connection(&self) -> Result<Box<dyn Connection>, DatabaseError> {
		self.get()
			.await
			.map(|connection| Box::new(connection) as Box<dyn Connection>)
			.map_err(Into::into)
	}
}

impl Connection for Object<LibSqlManager> {}

#[derive(Default, Clone, Copy)]
pub struct LibSqlRepository;

impl Repository for LibSqlRepository {
	fn room(&self) -> &dyn RoomRepository {
		self
	}
}

impl From<PoolError<libsql::Error>> for DatabaseError {
	fn from(pool_error: PoolError<libsql::Error>) -> Self {
		use PoolError::*;
		match pool_error {
			Timeout(_) => Self::Timeout(pool_error.into()),
			Backend(error) => error.into(),
			Closed | NoRuntimeSpecified | PostCreateHook(_) => Self::Connection(pool_error.into()),
		}
	}
}

impl From<libsql::Error> for DatabaseError {
	fn from(error: libsql::Error) -> Self {
		use libsql::Error::*;
		let violation = match &error {
			SqliteFailure(code, message) => constraint_violation(*code, message),
			_ => None,
		};
		if let Some(violation) = violation {
			return violation(error.into());
		}

		match error {
			ToSqlConversionFailure(_) => Self::Encode(error.into()),
			QueryReturnedNoRows => Self::NotFound(error.into()),
			InvalidColumnIndex | InvalidColumnType => Self::Decode(error.into()),
			ConnectionFailed(_) | InvalidUTF8Path | InvalidParserState(_) | InvalidTlsConfiguration(_) => {
				Self::Connection(error.into())
			}
			_ => Self::Database(error.into()),
		}
	}
}

fn constraint_violation(code: i32, message: &str) -> Option<fn(anyhow::Error) -> DatabaseError> {
	if code & 0xff != SQLITE_CONSTRAINT {
		return None;
	}

	let violation: fn(anyhow::Error) -> DatabaseError = if message.contains("UNIQUE constraint failed") {
		DatabaseError::UniqueViolation
	} else {
		DatabaseError::OtherConstraintViolation
	};
	Some(violation)
}

fn libsql_connection(connection: &mut dyn Connection) -> Result<&mut libsql::Connection, DatabaseError> {
	let type_name = connection.type_name();

	let connection: &mut dyn Any = connection;
	connection
		.downcast_mut::<Object<LibSqlManager>>()
		.map(DerefMut::deref_mut)
		.ok_or_else(|| DatabaseError::DatabaseMismatch(anyhow!("Expected LibSql connection, got {type_name}")))
}

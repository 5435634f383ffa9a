use super::{SqliteRepository, sqlite_connection};
use crate::database::Connection;
use crate::database::error::DatabaseError;
use crate::room::code::RoomCode;
use crate::room::model::{Room, RoomSettings};
use crate::room::repository::RoomRepository;
use crate::types::date_time::DateTime;
use async_trait::async_trait;
use sqlx::{query, query_as, query_scalar};

#[async_trait]
impl RoomRepository for SqliteRepository {
	async fn get(&self, connection: &mut dyn Connection, code: &RoomCode) -> Result<Option<Room>, DatabaseError> {
		let connection = sqlite_connection(connection)?;

		query_as(
			r"SELECT id, code, host, guest_can_pause, votes_to_skip, created_at
			FROM room
			WHERE code = ?1",
		)
		.bind(code)
		.fetch_optional(connection)
		.await
		.map_err(Into::into)
	}

	async fn get_by_host(&self, connection: &mut dyn Connection, host: &str) -> Result<Option<Room>, DatabaseError> {
		let connection = sqlite_connection(connection)?;

		query_as(
			r"SELECT id, code, host, guest_can_pause, votes_to_skip, created_at
			FROM room
			WHERE host = ?1",
		)
		.bind(host)
		.fetch_optional(connection)
		.await
		.map_err(Into::into)
	}

	async fn code_exists(&self, connection: &mut dyn Connection, code: &RoomCode) -> Result<bool, DatabaseError> {
		let connection = sqlite_connection(connection)?;

		let exists: i64 = query_scalar(r"SELECT EXISTS(SELECT 1 FROM room WHERE code = ?1)")
			.bind(code)
			.fetch_one(connection)
			.await?;
		Ok(exists != 0)
	}

	async fn create(
		&self,
		connection: &mut dyn Connection,
		code: &RoomCode,
		host: &str,
		settings: RoomSettings,
	) -> Result<Room, DatabaseError> {
		let connection = sqlite_connection(connection)?;

		let created_at = DateTime::now();
		query_as(
			r"INSERT INTO room(code, host, guest_can_pause, votes_to_skip, created_at) VALUES (?1, ?2, ?3, ?4, ?5)
			RETURNING
				id,
				code,
				host,
				guest_can_pause,
				votes_to_skip,
				created_at",
		)
		.bind(code)
		.bind(host)
		.bind(settings.guest_can_pause)
		.bind(settings.votes_to_skip)
		.bind(created_at)
		.fetch_one(connection)
		.await
		.map_err(Into::into)
	}

	async fn update(&self, connection: &mut dyn Connection, room: &Room) -> Result<Room, DatabaseError> {
		let connection = sqlite_connection(connection)?;

		query_as(
			r"UPDATE room SET guest_can_pause = ?2, votes_to_skip = ?3
			WHERE id = ?1
			RETURNING
				id,
				code,
				host,
				guest_can_pause,
				votes_to_skip,
				created_at",
		)
		.bind(room.id)
		.bind(room.guest_can_pause)
		.bind(room.votes_to_skip)
		.fetch_one(connection)
		.await
		.map_err(Into::into)
	}

	async fn remove(&self, connection: &mut dyn Connection, code: &RoomCode) -> Result<(), DatabaseError> {
		let connection = sqlite_connection(connection)?;

		query(r"DELETE FROM room WHERE code = ?1")
			.bind(code)
			.execute(connection)
			.await?;
		Ok(())
	}

	async fn list(&self, connection: &mut dyn Connection) -> Result<Vec<Room>, DatabaseError> {
		let connection = sqlite_connection(connection)?;

		query_as(
			r"SELECT id, code, host, guest_can_pause, votes_to_skip, created_at
			FROM room
			ORDER BY id ASC",
		)
		.fetch_all(connection)
		.await
		.map_err(Into::into)
	}
}

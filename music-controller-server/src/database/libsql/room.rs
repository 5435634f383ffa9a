use crate::database::Connection;
use crate::database::error::DatabaseError;
use crate::database::libsql::{LibSqlRepository, libsql_connection};
use crate::room::code::RoomCode;
use crate::room::model::{Room, RoomSettings};
use crate::room::repository::RoomRepository;
use crate::types::date_time::DateTime;
use async_trait::async_trait;
use libsql::params::Params;
use libsql::{Rows, Value};

const ROOM_COLUMNS: &str = "id, code, host, guest_can_pause, votes_to_skip, created_at";

#[async_trait]
impl RoomRepository for LibSqlRepository {
	async fn get(&self, connection: &mut dyn Connection, code: &RoomCode) -> Result<Option<Room>, DatabaseError> {
		let connection = libsql_connection(connection)?;

		let rows = connection
			.query(
				&format!("SELECT {ROOM_COLUMNS} FROM room WHERE code = ?1"),
				Params::Positional(vec![code.clone().into()]),
			)
			.await?;
		next_room(rows).await
	}

	async fn get_by_host(&self, connection: &mut dyn Connection, host: &str) -> Result<Option<Room>, DatabaseError> {
		let connection = libsql_connection(connection)?;

		let rows = connection
			.query(
				&format!("SELECT {ROOM_COLUMNS} FROM room WHERE host = ?1"),
				Params::Positional(vec![Value::Text(host.to_owned())]),
			)
			.await?;
		next_room(rows).await
	}

	async fn code_exists(&self, connection: &mut dyn Connection, code: &RoomCode) -> Result<bool, DatabaseError> {
		let connection = libsql_connection(connection)?;

		let exists = connection
			.query(
				r"SELECT 1 FROM room WHERE code = ?1",
				Params::Positional(vec![code.clone().into()]),
			)
			.await?
			.next()
			.await?
			.is_some();
		Ok(exists)
	}

	async fn create(
		&self,
		connection: &mut dyn Connection,
		code: &RoomCode,
		host: &str,
		settings: RoomSettings,
	) -> Result<Room, DatabaseError> {
		let connection = libsql_connection(connection)?;

		let created_at = DateTime::now();
		let rows = connection
			.query(
				&format!(
					r"INSERT INTO room(code, host, guest_can_pause, votes_to_skip, created_at) VALUES (?1, ?2, ?3, ?4, ?5)
					RETURNING {ROOM_COLUMNS}"
				),
				Params::Positional(vec![
					code.clone().into(),
					Value::Text(host.to_owned()),
					Value::Integer(i64::from(settings.guest_can_pause)),
					Value::Integer(i64::from(settings.votes_to_skip)),
					created_at.into(),
				]),
			)
			.await?;
		expect_room(rows).await
	}

	async fn update(&self, connection: &mut dyn Connection, room: &Room) -> Result<Room, DatabaseError> {
		let connection = libsql_connection(connection)?;

		let rows = connection
			.query(
				&format!(
					r"UPDATE room SET guest_can_pause = ?2, votes_to_skip = ?3
					WHERE id = ?1
					RETURNING {ROOM_COLUMNS}"
				),
				Params::Positional(vec![
					Value::Integer(room.id),
					Value::Integer(i64::from(room.guest_can_pause)),
					Value::Integer(i64::from(room.votes_to_skip)),
				]),
			)
			.await?;
		expect_room(rows).await
	}

	async fn remove(&self, connection: &mut dyn Connection, code: &RoomCode) -> Result<(), DatabaseError> {
		let connection = libsql_connection(connection)?;

		connection
			.execute(
				r"DELETE FROM room WHERE code = ?1",
				Params::Positional(vec![code.clone().into()]),
			)
			.await?;
		Ok(())
	}

	async fn list(&self, connection: &mut dyn Connection) -> Result<Vec<Room>, DatabaseError> {
		let connection = libsql_connection(connection)?;

		let mut rows = connection
			.query(&format!("SELECT {ROOM_COLUMNS} FROM room ORDER BY id ASC"), ())
			.await?;

		let mut rooms = Vec::new();
		while let Some(row) = rows.next().await? {
			rooms.push(Room::try_from(row).map_err(DatabaseError::Decode)?);
		}
		Ok(rooms)
	}
}

async fn next_room(mut rows: Rows) -> Result<Option<Room>, DatabaseError> {
	rows.next()
		.await?
		.map(Room::try_from)
		.transpose()
		.map_err(DatabaseError::Decode)
}

async fn expect_room(rows: Rows) -> Result<Room, DatabaseError> {
	next_room(rows)
		.await?
		.ok_or(libsql::Error::QueryReturnedNoRows)
		.map_err(Into::into)
}

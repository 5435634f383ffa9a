use crate::database::Connection;
use crate::database::Repository;
use crate::database::error::DatabaseError;
use crate::room::code::{RoomCode, RoomCodeGenerator};
use crate::room::error::RoomError;
use crate::room::host::Host;
use crate::room::model::{Room, RoomSettings};
use std::sync::Arc;
use tracing::{info, warn};

pub mod code;
pub mod error;
pub mod host;
pub mod model;
pub mod repository;

/// Owns the stored rooms and hands out unique codes for new ones.
pub struct RoomRegistry {
	repository: Arc<dyn Repository>,
	code_generator: RoomCodeGenerator,
}

impl RoomRegistry {
	pub fn new(repository: Arc<dyn Repository>, code_generator: RoomCodeGenerator) -> Self {
		Self {
			repository,
			code_generator,
		}
	}

	/// Creates a room for `host` under a freshly generated code.
	///
	/// Generating the code and inserting the room are retried together, since another
	/// room may take the code between the check and the insert. Every draw of every retry
	/// counts against the same attempt limit.
	pub async fn create_room(
		&self,
		connection: &mut dyn Connection,
		host: &str,
		settings: RoomSettings,
	) -> Result<Room, RoomError> {
		let host = Host::parse(host)?;
		validate_settings(settings)?;

		let rooms = self.repository.room();
		let mut attempts = 0;
		loop {
			let code = self
				.code_generator
				.generate_within(connection, rooms, &mut attempts)
				.await?;
			match rooms.create(connection, &code, host.as_str(), settings).await {
				Ok(room) => {
					info!(code = %room.code, host = %room.host, "Created room");
					return Ok(room);
				}
				Err(DatabaseError::UniqueViolation(error)) => {
					if rooms.get_by_host(connection, host.as_str()).await?.is_some() {
						return Err(RoomError::HostAlreadyHasRoom);
					}

					warn!(attempt = attempts, %code, %error, "Room code was taken before insert, retrying");
				}
				Err(error) => return Err(error.into()),
			}
		}
	}

	pub async fn get_room(&self, connection: &mut dyn Connection, code: &RoomCode) -> Result<Room, RoomError> {
		self.repository
			.room()
			.get(connection, code)
			.await?
			.ok_or(RoomError::RoomNotFound)
	}

	pub async fn room_of_host(&self, connection: &mut dyn Connection, host: &str) -> Result<Option<Room>, RoomError> {
		let host = Host::parse(host)?;
		self.repository
			.room()
			.get_by_host(connection, host.as_str())
			.await
			.map_err(Into::into)
	}

	/// Changes what guests may do in the room, its code, host and creation time stay as they are.
	pub async fn update_settings(
		&self,
		connection: &mut dyn Connection,
		code: &RoomCode,
		settings: RoomSettings,
	) -> Result<Room, RoomError> {
		validate_settings(settings)?;

		let room = self.get_room(connection, code).await?;
		let updated_room = self
			.repository
			.room()
			.update(
				connection,
				&Room {
					guest_can_pause: settings.guest_can_pause,
					votes_to_skip: settings.votes_to_skip,
					..room
				},
			)
			.await
			.map_err(|error| match error {
				DatabaseError::NotFound(_) => RoomError::RoomNotFound,
				other => other.into(),
			})?;

		info!(
			code = %updated_room.code,
			guest_can_pause = settings.guest_can_pause,
			votes_to_skip = settings.votes_to_skip,
			"Updated room settings"
		);
		Ok(updated_room)
	}

	/// Removing a room that doesn't exist is not an error.
	pub async fn remove_room(&self, connection: &mut dyn Connection, code: &RoomCode) -> Result<(), RoomError> {
		self.repository.room().remove(connection, code).await?;
		info!(%code, "Removed room");
		Ok(())
	}

	pub async fn list_rooms(&self, connection: &mut dyn Connection) -> Result<Vec<Room>, RoomError> {
		self.repository.room().list(connection).await.map_err(Into::into)
	}
}

fn validate_settings(settings: RoomSettings) -> Result<(), RoomError> {
	if settings.votes_to_skip == 0 {
		return Err(RoomError::InvalidVotesToSkip);
	}

	Ok(())
}

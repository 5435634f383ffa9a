use crate::database::error::DatabaseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoomError {
	#[error("Host was empty or whitespace-only.")]
	EmptyHost,
	#[error("Host is too long. (>50 characters)")]
	HostTooLong,
	#[error("Host already has a room.")]
	HostAlreadyHasRoom,
	#[error("Votes to skip must be at least 1.")]
	InvalidVotesToSkip,
	#[error("Invalid room code: '{0}'")]
	InvalidRoomCode(String),
	#[error("Room not found.")]
	RoomNotFound,
	#[error("No unused room code found after {limit} attempts.")]
	CodeAttemptsExhausted { limit: usize },
	#[error("Database error: {0}")]
	Database(#[from] DatabaseError),
}

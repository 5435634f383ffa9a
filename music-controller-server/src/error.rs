use crate::configuration::ConfigurationError;
use crate::database::error::DatabaseError;
use crate::room::error::RoomError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MusicControllerError {
	#[error("Failed to load configuration: {0}")]
	Configuration(#[from] ConfigurationError),
	#[error("Failed to open database: {0}")]
	Database(#[from] DatabaseError),
	#[error("{0}")]
	Room(#[from] RoomError),
	#[error("Failed to start: {0}")]
	Startup(#[from] anyhow::Error),
}

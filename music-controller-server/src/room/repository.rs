use crate::database::Connection;
use crate::database::error::DatabaseError;
use crate::room::code::RoomCode;
use crate::room::model;
use async_trait::async_trait;
use static_assertions::assert_obj_safe;


#[async_trait]
pub trait RoomRepository: Send + Sync + 'static {
	async fn get(&self, connection: &mut dyn Connection, code: &RoomCode)
	-> Result<Option<model::Room>, DatabaseError>;
	async fn get_by_host(
		&self,
		connection: &mut dyn Connection,
		host: &str,
	) -> Result<Option<model::Room>, DatabaseError>;
	async fn code_exists(&self, connection: &mut dyn Connection, code: &RoomCode) -> Result<bool, DatabaseError>;
	async fn create(
		&self,
		connection: &mut dyn Connection,
		code: &RoomCode,
		host: &str,
		settings: model::RoomSettings,
	) -> Result<model::Room, DatabaseError>;
	/// Stores the settings of `room`, everything else is left untouched.
	async fn update(&self, connection: &mut dyn Connection, room: &model::Room) -> Result<model::Room, DatabaseError>;
	async fn remove(&self, connection: &mut dyn Connection, code: &RoomCode) -> Result<(), DatabaseError>;
	async fn list(&self, connection: &mut dyn Connection) -> Result<Vec<model::Room>, DatabaseError>;
}

assert_obj_safe!(RoomRepository);

use crate::room::code::RoomCode;
use crate::types::date_time::DateTime;
use anyhow::Context;
use sqlx::FromRow;

#[derive(FromRow, Clone, Debug, PartialEq, Eq)]
pub struct Room {
	pub id: i64,
	pub code: RoomCode,
	pub host: String,
	pub guest_can_pause: bool,
	pub votes_to_skip: u32,
	pub created_at: DateTime,
}

impl Room {
	pub fn settings(&self) -> RoomSettings {
		RoomSettings {
			guest_can_pause: self.guest_can_pause,
			votes_to_skip: self.votes_to_skip,
		}
	}
}

impl TryFrom<libsql::Row> for Room {
	type Error = anyhow::Error;

	fn try_from(row: libsql::Row) -> anyhow::Result<Self> {
		let id = row.get(0)?;
		let code = row.get_value(1)?;
		let host = row.get(2)?;
		let guest_can_pause = row.get::<i64>(3)?;
		let votes_to_skip = row.get::<i64>(4)?;
		let created_at = row.get_value(5)?;

		Ok(Self {
			id,
			code: code.try_into()?,
			host,
			guest_can_pause: guest_can_pause != 0,
			votes_to_skip: u32::try_from(votes_to_skip).context("votes_to_skip out of range")?,
			created_at: created_at.try_into()?,
		})
	}
}

/// The part of a room its host may change after creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoomSettings {
	pub guest_can_pause: bool,
	pub votes_to_skip: u32,
}

impl Default for RoomSettings {
	fn default() -> Self {
		Self {
			guest_can_pause: false,
			votes_to_skip: 1,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_settings_do_not_let_guests_pause_and_skip_after_one_vote() {
		let RoomSettings {
			guest_can_pause,
			votes_to_skip,
		} = RoomSettings::default();

		assert!(!guest_can_pause);
		assert_eq!(1, votes_to_skip);
	}
}

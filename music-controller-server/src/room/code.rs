use crate::database::Connection;
use crate::room::error::RoomError;
use crate::room::repository::RoomRepository;
use anyhow::anyhow;
use rand::Rng;
use tracing::{debug, warn};

/// Length of every generated room code.
pub const GENERATED_CODE_LENGTH: usize = 6;
/// Storage leaves some slack beyond the generated length.
pub const MAXIMUM_CODE_LENGTH: usize = 8;

/// Short uppercase alphabetic identifier used to join a room.
#[derive(sqlx::Type, derive_more::Display, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[sqlx(transparent)]
pub struct RoomCode(String);

impl RoomCode {
	/// Parses user supplied input, accepting lowercase letters by upper-casing them.
	pub fn parse(text: &str) -> Result<Self, RoomError> {
		let code = text.trim().to_ascii_uppercase();
		if code.is_empty() || code.len() > MAXIMUM_CODE_LENGTH || !code.bytes().all(|byte| byte.is_ascii_uppercase()) {
			return Err(RoomError::InvalidRoomCode(text.to_owned()));
		}

		Ok(Self(code))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<RoomCode> for libsql::Value {
	fn from(RoomCode(code): RoomCode) -> libsql::Value {
		libsql::Value::Text(code)
	}
}

impl TryFrom<libsql::Value> for RoomCode {
	type Error = anyhow::Error;

	fn try_from(value: libsql::Value) -> anyhow::Result<Self> {
		let libsql::Value::Text(text) = value else {
			return Err(anyhow!("Expected text value"));
		};

		RoomCode::parse(&text).map_err(Into::into)
	}
}

/// Produces candidate codes for the [`RoomCodeGenerator`].
pub trait CodeSource: Send + Sync {
	fn draw(&self) -> RoomCode;
}

/// Draws every letter uniformly from `A..=Z`, repetition allowed.
#[derive(Default, Clone, Copy)]
pub struct RandomCodeSource;

impl CodeSource for RandomCodeSource {
	fn draw(&self) -> RoomCode {
		let mut rng = rand::rng();
		let code = (0..GENERATED_CODE_LENGTH)
			.map(|_| char::from(rng.random_range(b'A'..=b'Z')))
			.collect();
		RoomCode(code)
	}
}

pub struct RoomCodeGenerator {
	source: Box<dyn CodeSource>,
	maximum_attempts: usize,
}

impl RoomCodeGenerator {
	pub fn new(maximum_attempts: usize) -> Self {
		Self::with_source(RandomCodeSource, maximum_attempts)
	}

	pub fn with_source(source: impl CodeSource + 'static, maximum_attempts: usize) -> Self {
		Self {
			source: Box::new(source),
			maximum_attempts,
		}
	}

	/// Draws codes until one is not used by any stored room.
	///
	/// The result is only unique at the time of the check. Inserting it may still collide,
	/// the unique constraint on `room.code` decides in the end.
	pub async fn generate(
		&self,
		connection: &mut dyn Connection,
		rooms: &dyn RoomRepository,
	) -> Result<RoomCode, RoomError> {
		self.generate_within(connection, rooms, &mut 0).await
	}

	/// Like [`Self::generate`], but draws count against `attempts`, which callers retrying
	/// an insert share across calls so the total number of draws stays within the limit.
	pub(crate) async fn generate_within(
		&self,
		connection: &mut dyn Connection,
		rooms: &dyn RoomRepository,
		attempts: &mut usize,
	) -> Result<RoomCode, RoomError> {
		while *attempts < self.maximum_attempts {
			*attempts += 1;
			let attempt = *attempts;
			let code = self.source.draw();
			if !rooms.code_exists(connection, &code).await? {
				debug!(attempt, %code, "Generated room code");
				return Ok(code);
			}

			debug!(attempt, %code, "Room code already taken, drawing another one");
		}

		warn!(limit = self.maximum_attempts, "Failed to find an unused room code");
		Err(RoomError::CodeAttemptsExhausted {
			limit: self.maximum_attempts,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::database::TestFactory;
	use crate::database::test::DefaultTestFactory;
	use crate::room::model::RoomSettings;
	use crate::utils::fake_code_source::FakeCodeSource;

	#[test]
	fn random_codes_are_six_uppercase_letters() {
		for _ in 0..1000 {
			let code = RandomCodeSource.draw();

			assert_eq!(GENERATED_CODE_LENGTH, code.as_str().len());
			assert!(
				code.as_str().bytes().all(|byte| byte.is_ascii_uppercase()),
				"Unexpected character in {code}"
			);
		}
	}

	#[test]
	fn parses_lowercase_code() {
		let code = RoomCode::parse(" abcdef ").expect("Failed to parse code");

		assert_eq!("ABCDEF", code.as_str());
	}

	#[test]
	fn rejects_codes_that_do_not_fit_in_storage() {
		assert!(matches!(RoomCode::parse(""), Err(RoomError::InvalidRoomCode(_))));
		assert!(matches!(RoomCode::parse("ABCDEFGHI"), Err(RoomError::InvalidRoomCode(_))));
		assert!(matches!(RoomCode::parse("ABC123"), Err(RoomError::InvalidRoomCode(_))));
		RoomCode::parse("ABCDEFGH").expect("Eight letters should be accepted");
	}

	#[tokio::test]
	async fn accepts_any_code_on_empty_store() {
		let mut connection = DefaultTestFactory::connection().await;
		let repository = DefaultTestFactory::repository();
		let generator = RoomCodeGenerator::with_source(FakeCodeSource::new(["QWERTY"]), 1);

		let code = generator
			.generate(&mut *connection, repository.room())
			.await
			.expect("Failed to generate code");

		assert_eq!("QWERTY", code.as_str());
	}

	#[tokio::test]
	async fn discards_codes_of_existing_rooms() {
		let mut connection = DefaultTestFactory::connection().await;
		let repository = DefaultTestFactory::repository();
		for (code, host) in [("AAAAAA", "alice"), ("BBBBBB", "bob")] {
			repository
				.room()
				.create(
					&mut *connection,
					&RoomCode::parse(code).expect("Invalid code"),
					host,
					RoomSettings::default(),
				)
				.await
				.expect("Failed to create room");
		}
		let generator = RoomCodeGenerator::with_source(FakeCodeSource::new(["AAAAAA", "BBBBBB", "CCCCCC"]), 3);

		let code = generator
			.generate(&mut *connection, repository.room())
			.await
			.expect("Failed to generate code");

		assert_eq!("CCCCCC", code.as_str());
	}

	#[tokio::test]
	async fn gives_up_after_maximum_attempts() {
		let mut connection = DefaultTestFactory::connection().await;
		let repository = DefaultTestFactory::repository();
		let taken = RoomCode::parse("AAAAAA").expect("Invalid code");
		repository
			.room()
			.create(&mut *connection, &taken, "alice", RoomSettings::default())
			.await
			.expect("Failed to create room");
		let generator = RoomCodeGenerator::with_source(FakeCodeSource::new(["AAAAAA"; 4]), 3);

		let result = generator.generate(&mut *connection, repository.room()).await;

		assert!(matches!(result, Err(RoomError::CodeAttemptsExhausted { limit: 3 })));
	}
}

use crate::room::error::RoomError;

pub const MAXIMUM_HOST_LENGTH: usize = 50;

/// Identifier of the participant owning a room, e.g. a session key.
#[derive(derive_more::Display, derive_more::Deref, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Host(String);

impl Host {
	pub fn parse(host: &str) -> Result<Self, RoomError> {
		// Stored as given, so " alice" and "alice" are different hosts.
		if host.trim().is_empty() {
			return Err(RoomError::EmptyHost);
		}

		// Counted in characters, like the `length()` check in the schema.
		if host.chars().count() > MAXIMUM_HOST_LENGTH {
			return Err(RoomError::HostTooLong);
		}

		Ok(Self(host.to_owned()))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn should_not_accept_empty_host() {
		assert!(matches!(Host::parse(""), Err(RoomError::EmptyHost)));
	}

	#[test]
	fn should_not_accept_blank_host() {
		assert!(matches!(Host::parse("  	 "), Err(RoomError::EmptyHost)));
	}

	#[test]
	fn should_keep_host_as_given() {
		let host = Host::parse("  session-key ").expect("Failed to parse host");

		assert_eq!("  session-key ", host.as_str());
	}

	#[test]
	fn should_accept_host_of_50_characters() {
		let host = "ü".repeat(MAXIMUM_HOST_LENGTH);

		Host::parse(&host).expect("Host with valid length was rejected");
	}

	#[test]
	fn should_not_accept_host_longer_than_50_characters() {
		let host = "a".repeat(MAXIMUM_HOST_LENGTH + 1);

		assert!(matches!(Host::parse(&host), Err(RoomError::HostTooLong)));
	}
}

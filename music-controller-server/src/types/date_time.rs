use anyhow::{Context, anyhow};
use chrono::Utc;
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::{Database, Decode, Encode};

#[derive(
	derive_more::From,
	derive_more::Into,
	derive_more::Deref,
	derive_more::DerefMut,
	derive_more::Display,
	Debug,
	Clone,
	Copy,
	PartialEq,
	Eq,
	PartialOrd,
	Ord,
)]
pub struct DateTime(chrono::DateTime<Utc>);

impl DateTime {
	pub fn now() -> Self {
		Self(Utc::now())
	}
}

impl<'r, Db> Decode<'r, Db> for DateTime
where
	Db: Database,
	chrono::DateTime<Utc>: Decode<'r, Db>,
{
	fn decode(value: <Db as Database>::ValueRef<'r>) -> Result<Self, BoxDynError> {
		chrono::DateTime::<Utc>::decode(value).map(DateTime)
	}
}

impl<'q, Db> Encode<'q, Db> for DateTime
where
	Db: Database,
	chrono::DateTime<Utc>: Encode<'q, Db>,
{
	fn encode_by_ref(&self, buffer: &mut <Db as Database>::ArgumentBuffer<'q>) -> Result<IsNull, BoxDynError> {
		self.0.encode_by_ref(buffer)
	}
}

impl<Db> sqlx::Type<Db> for DateTime
where
	Db: Database,
	chrono::DateTime<Utc>: sqlx::Type<Db>,
{
	fn type_info() -> Db::TypeInfo {
		chrono::DateTime::<Utc>::type_info()
	}

	fn compatible(type_info: &Db::TypeInfo) -> bool {
		chrono::DateTime::<Utc>::compatible(type_info)
	}
}

impl From<DateTime> for libsql::Value {
	fn from(date_time: DateTime) -> libsql::Value {
		libsql::Value::Text(date_time.to_rfc3339())
	}
}

impl TryFrom<libsql::Value> for DateTime {
	type Error = anyhow::Error;

	fn try_from(value: libsql::Value) -> anyhow::Result<Self> {
		let libsql::Value::Text(text) = value else {
			return Err(anyhow!("Expected text value"));
		};

		text.parse().map(DateTime).context("Failed to parse DateTime")
	}
}

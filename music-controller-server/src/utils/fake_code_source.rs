use crate::room::code::{CodeSource, RoomCode};
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Hands out a fixed sequence of codes, panics once it runs dry.
#[derive(Debug, Default)]
pub struct FakeCodeSource {
	codes: Mutex<VecDeque<RoomCode>>,
}

impl FakeCodeSource {
	pub fn new<'a>(codes: impl IntoIterator<Item = &'a str>) -> Self {
		let codes = codes
			.into_iter()
			.map(|code| RoomCode::parse(code).expect("Invalid fake room code"))
			.collect();
		Self {
			codes: Mutex::new(codes),
		}
	}
}

impl CodeSource for FakeCodeSource {
	fn draw(&self) -> RoomCode {
		self.codes.lock().pop_front().expect("Fake code source ran out of codes")
	}
}

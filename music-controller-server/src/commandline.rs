use crate::configuration::Configuration;
use crate::context::ApplicationContext;
use crate::error::MusicControllerError;
use crate::room::code::RoomCode;
use crate::room::model::{Room, RoomSettings};
use tracing_subscriber::EnvFilter;

#[derive(clap::Parser)]
pub struct Commandline {
	#[clap(short = 'c', long = "config-file", default_value = "configuration.toml")]
	pub configuration_file_path: String,
	#[clap(subcommand)]
	pub command: Option<BaseCommand>,
}

#[derive(clap::Subcommand, Default)]
pub enum BaseCommand {
	/// Create a room with a freshly generated code
	CreateRoom {
		#[clap(long)]
		host: String,
		#[clap(long)]
		guest_can_pause: bool,
		#[clap(long, default_value_t = 1)]
		votes_to_skip: u32,
	},
	/// Show the room with the given code
	ShowRoom { code: String },
	/// Show the room owned by a host, if any
	ShowHostRoom { host: String },
	/// Change what guests may do in a room
	UpdateRoom {
		code: String,
		#[clap(long)]
		guest_can_pause: Option<bool>,
		#[clap(long)]
		votes_to_skip: Option<u32>,
	},
	/// Remove the room with the given code
	RemoveRoom { code: String },
	/// List all rooms
	#[default]
	ListRooms,
	/// Print the configuration
	Configuration,
}

impl Commandline {
	pub async fn run(self) -> Result<(), MusicControllerError> {
		let configuration = Configuration::from_file(&self.configuration_file_path)?;

		tracing_subscriber::fmt()
			.with_env_filter(EnvFilter::new(&configuration.log_filters))
			.with_writer(std::io::stderr)
			.init();

		let application_context = ApplicationContext::new(configuration).await?;
		for line in run_command(&application_context, self.command.unwrap_or_default()).await? {
			println!("{line}");
		}
		Ok(())
	}
}

/// Runs a room command and returns the lines to print.
async fn run_command(
	application_context: &ApplicationContext,
	command: BaseCommand,
) -> Result<Vec<String>, MusicControllerError> {
	let mut connection = application_context.connection().await?;
	let registry = &application_context.room_registry;

	use BaseCommand::*;
	let lines = match command {
		CreateRoom {
			host,
			guest_can_pause,
			votes_to_skip,
		} => {
			let settings = RoomSettings {
				guest_can_pause,
				votes_to_skip,
			};
			let room = registry.create_room(&mut *connection, &host, settings).await?;
			vec![describe(&room)]
		}
		ShowRoom { code } => {
			let room = registry.get_room(&mut *connection, &RoomCode::parse(&code)?).await?;
			vec![describe(&room)]
		}
		ShowHostRoom { host } => match registry.room_of_host(&mut *connection, &host).await? {
			Some(room) => vec![describe(&room)],
			None => vec![format!("{host} has no room")],
		},
		UpdateRoom {
			code,
			guest_can_pause,
			votes_to_skip,
		} => {
			let code = RoomCode::parse(&code)?;
			let current = registry.get_room(&mut *connection, &code).await?.settings();
			let settings = RoomSettings {
				guest_can_pause: guest_can_pause.unwrap_or(current.guest_can_pause),
				votes_to_skip: votes_to_skip.unwrap_or(current.votes_to_skip),
			};
			let room = registry.update_settings(&mut *connection, &code, settings).await?;
			vec![describe(&room)]
		}
		RemoveRoom { code } => {
			let code = RoomCode::parse(&code)?;
			registry.remove_room(&mut *connection, &code).await?;
			vec![format!("Removed room {code}")]
		}
		ListRooms => registry
			.list_rooms(&mut *connection)
			.await?
			.iter()
			.map(describe)
			.collect(),
		BaseCommand::Configuration => vec![format!("{:#?}", application_context.configuration)],
	};
	Ok(lines)
}

fn describe(room: &Room) -> String {
	let Room {
		id: _,
		code,
		host,
		guest_can_pause,
		votes_to_skip,
		created_at,
	} = room;
	format!(
		"{code} host={host} guest_can_pause={guest_can_pause} votes_to_skip={votes_to_skip} created_at={}",
		created_at.to_rfc3339()
	)
}

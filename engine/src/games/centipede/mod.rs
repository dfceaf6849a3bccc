mod blast;
mod blaster;
mod centipede;
mod game_state;
mod grid;
mod mushroom;
mod session;
mod settings;
mod snapshot;
mod steering;
mod types;

pub use blast::Blast;
pub use blaster::Blaster;
pub use centipede::Centipede;
pub use game_state::CentipedeGameState;
pub use grid::{Grid, GridError};
pub use mushroom::Mushroom;
pub use session::{CentipedeSession, CentipedeSessionState};
pub use settings::CentipedeSessionSettings;
pub use snapshot::{BlastView, BlasterView, CentipedeView, GameInfo, MushroomView, Snapshot};
pub use types::{Direction, PlayerCommand, Point, TileKind};

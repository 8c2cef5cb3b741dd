pub mod combat;
pub mod config;
pub mod content;
pub mod feedback;
pub mod game;
pub mod grid;
pub mod input;
pub mod journal;
pub mod journal_file;
pub mod mapgen;
pub mod pathfield;
pub mod progression;
pub mod render;
pub mod replay;
pub mod rng;
pub mod state;
pub mod types;

pub use config::{ConfigError, GameConfig, RenderConfig};
pub use feedback::{FeedbackEvent, FrameFeedback, SoundCue};
pub use game::{CastError, FrameOutput, Game};
pub use input::ControlState;
pub use journal::{InputJournal, InputPayload, InputRecord};
pub use progression::{MemoryStore, ProgressionError, ProgressionSnapshot, ProgressionStore};
pub use render::{FrameReport, RenderScene, Surface};
pub use replay::*;
pub use state::GameState;
pub use types::*;

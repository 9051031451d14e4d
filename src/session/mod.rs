//! The interactive game session: pool bookkeeping, key handling and the
//! play / guess / resolve state machine.

mod input;
mod machine;
mod pool;
mod view;

pub use input::{char_command, line_command, Command, InputMode, Key};
pub use machine::{
    Frontend, Session, SessionConfig, DEBUG_POOL_SIZE, DEFAULT_FEEDBACK_PAUSE,
};
pub use pool::{PoolPolicy, UnguessedPool};
pub use view::{Phase, Resolution, SessionView, StatusKind, StatusMessage};

pub mod color;
pub mod config;
pub mod error;
pub mod fair_rng;
pub mod outcome;
pub mod shared_wheel_game;
pub mod snapshot;
pub mod spin;
pub mod wobble;

pub use config::{SpinConfig, WheelConfig, WobbleConfig};
pub use error::{SnapshotError, WheelError};
pub use fair_rng::FairRng;
pub use outcome::{Face, Outcome, OutcomeKind, OutcomeRegistry, OutcomeSpec};
pub use shared_wheel_game::{Frame, ResetCause, Selection, WheelEvent, WheelGame};
pub use snapshot::{MemoryStore, Snapshot, SnapshotStore};

#![forbid(unsafe_code)]

//! Runtime: timed playback, undo history and the session facade.
//!
//! # Role in algoviz
//! `algoviz-runtime` turns the step logs produced by `algoviz-core` into
//! something a front end can drive. Nothing here spawns threads or owns a
//! clock: callers feed elapsed time through [`PlaybackSession::tick`] and
//! render whatever [`PlaybackSession::elements`] returns.
//!
//! # Primary responsibilities
//! - **PlaybackController**: Idle/Playing/Paused/Stopped cursor with a
//!   single interval timer.
//! - **SortRun**: a run as a [`StepSource`], live or precomputed.
//! - **HistoryStack**: bounded snapshot undo/redo.
//! - **SessionConfig**: TOML/JSON configuration with validation.
//! - **PlaybackSession**: ties the above to a live array.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use algoviz_runtime::{PlaybackSession, Speed};
//!
//! let mut session = PlaybackSession::default();
//! session.load(&[5, 3, 4, 1, 2]);
//! session.set_speed(Speed::Fast);
//! session.play();
//! let report = session.tick(Duration::from_secs(10));
//! assert!(report.finished.is_some());
//! assert_eq!(session.values(), vec![1, 2, 3, 4, 5]);
//! ```

pub mod config;
pub mod error;
pub mod history;
pub mod playback;
pub mod run;
pub mod session;
pub mod speed;

pub use config::{GeneratorConfig, MAX_GENERATED_LEN, PlaybackConfig, SessionConfig};
pub use error::{ConfigError, Result, SessionError};
pub use history::{HistoryConfig, HistoryStack};
pub use playback::{
    PlaybackController, PlaybackMode, StepSource, StepTimer, TickOutcome, TimerId,
};
pub use run::{RunMode, SortRun};
pub use session::{PlaybackSession, RunObserver, RunSummary, TickReport};
pub use speed::{ParseSpeedError, Speed, SpeedTable};

//! # Animation Module
//!
//! Time-based linear tweening of the stage, sequenced behind a single lock.
//!
//! ## Architecture
//!
//! - [`tween`] - A tween descriptor: start time, duration and the property tracks it drives
//! - [`dispatcher`] - Advances every scheduled [`Transition`] once per frame and hands
//!   back completion payloads; a transition completes only when all of its tweens do
//! - [`transitions`] - Builders for the three named transitions
//! - [`rotation`] - Ambient rotation applied every frame between transitions
//! - [`lock`] - Idle/Busy gate serialising transitions
//! - [`sequencer`] - The state machine tying lock, rotation, navigation and dispatcher together
//! - [`clock`] - Monotonic frame clock
//!
//! ## Usage
//!
//! ```no_run
//! use std::time::Duration;
//! use vitrine::animation::Sequencer;
//! use vitrine::config::ShowcaseConfig;
//! use vitrine::navigation::NavPoint;
//!
//! let config = ShowcaseConfig::default();
//! let mut stage = config.initial_stage(true);
//! let mut sequencer = Sequencer::new(&config);
//!
//! sequencer.request(NavPoint::Point3, &mut stage, Duration::ZERO);
//! sequencer.frame(&mut stage, Duration::from_millis(16));
//! ```

pub mod clock;
pub mod dispatcher;
pub mod lock;
pub mod rotation;
pub mod sequencer;
pub mod transitions;
pub mod tween;

pub use clock::FrameClock;
pub use dispatcher::{FrameDispatcher, Transition};
pub use lock::{AnimationLock, LockState};
pub use rotation::RotationMode;
pub use sequencer::{RequestOutcome, Sequencer};
pub use transitions::TransitionKind;
pub use tween::{Track, Tween};

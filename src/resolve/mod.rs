//! Order resolution.
//!
//! Resolves a set of simultaneous orders into outcomes (succeeds, fails,
//! dislodged) using the Kruijswijk algorithm, then carries a game forward
//! through retreats, builds, and phase transitions.

pub mod build;
pub mod kruijswijk;
pub mod phase;
pub mod retreat;

pub use build::{apply_builds, resolve_builds, BuildResult};
pub use kruijswijk::{apply_resolution, DislodgedUnit, OrderResult, Resolver, ResolvedOrder};
pub use phase::{advance_state, is_game_over, needs_build_phase, next_phase, update_sc_ownership};
pub use retreat::{apply_retreats, resolve_retreats, RetreatResult};

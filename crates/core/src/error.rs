//! Error types for herald-core.

use crate::scene::Route;
use crate::view::Id;
use thiserror::Error;

/// Errors raised while wiring proxies into a navigation tree.
///
/// None of these are transient: they signal an integration mistake in the
/// host and are meant to surface immediately.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// The navigation context was built without a required capability
    #[error("navigation context is missing its {0}")]
    MissingCapability(&'static str),
    /// No screen is on the stack
    #[error("no active scene")]
    NoActiveScene,
    /// The route is not hosted by any screen on the stack
    #[error("route {0} is not on the scene stack")]
    RouteNotOnStack(Route),
    /// No mounted participant has this id
    #[error("unknown participant {0}")]
    UnknownParticipant(Id),
    /// The participant exists but has a different concrete type
    #[error("participant {0} has an unexpected type")]
    UnexpectedParticipant(Id),
}

//! Base trait for intents in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - Value changes typed into an input
/// - Blur/touch events
/// - Data arriving from the network that reshapes a form
///
/// Intents are processed by reducers to produce new states.
pub trait Intent: Send + 'static {}

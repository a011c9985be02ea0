//! Centralized limits and rendering constants.
//!
//! Everything tunable in the signature engine lives here so that call sites
//! never carry magic numbers or marker strings.

// =============================================================================
// Supertype Walk Limits
// =============================================================================

/// Maximum depth of the guarded supertype walk.
///
/// Only consulted by `SubtypeCalculator::with_cycle_guard`. The unguarded
/// calculator follows the supertype graph as given and never consults it.
pub const MAX_SUPERTYPE_WALK_DEPTH: u32 = 256;

// =============================================================================
// Rendering Markers
// =============================================================================

/// Marker wrapped around a parameter's text span when a single parameter is
/// rendered inside its owning method signature.
///
/// ```text
/// int Owner::foo(String a, ===String b===)
/// ```
pub const PARAM_HIGHLIGHT_MARKER: &str = "===";

/// Token emitted in canonical signatures when a type variable is revisited
/// while its own bounds are still being rendered.
pub const CYCLE_PLACEHOLDER: &str = "%";

/// Qualified name of the implicit root class. A lone type-parameter bound
/// naming it is not rendered.
pub const IMPLICIT_ROOT_TYPE: &str = "java.lang.Object";

#[cfg(test)]
#[path = "../tests/limits_tests.rs"]
mod tests;

//! Explicit initialize/destroy pairing for owned simulation components
//!
//! Components that allocate on `initialize` and release on `destroy` carry a
//! [`Lifecycle`] tag. Misuse (initializing twice, destroying twice, using a
//! component that was never initialized) is a programmer error and panics
//! with the component name in the message.

/// Lifecycle state of a component with manual init/destroy pairing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    /// Constructed, nothing allocated yet
    #[default]
    Created,
    /// Resources allocated and wired
    Initialized,
    /// Resources released; may be initialized again
    Destroyed,
}

impl Lifecycle {
    /// Transition to `Initialized`
    ///
    /// Panics if the component is already initialized.
    #[track_caller]
    pub fn begin(&mut self, component: &str) {
        assert!(
            *self != Lifecycle::Initialized,
            "{}: initialize called on an already initialized instance",
            component
        );
        *self = Lifecycle::Initialized;
    }

    /// Transition to `Destroyed`, requiring a prior `initialize`
    #[track_caller]
    pub fn end(&mut self, component: &str) {
        assert!(
            *self == Lifecycle::Initialized,
            "{}: destroy called on an instance that is not initialized ({:?})",
            component,
            self
        );
        *self = Lifecycle::Destroyed;
    }

    /// Transition to `Destroyed` from either `Created` or `Initialized`
    ///
    /// Used by owned sub-components, which the owner destroys whether or not
    /// they were ever configured. Destroying twice still panics.
    #[track_caller]
    pub fn release(&mut self, component: &str) {
        assert!(
            *self != Lifecycle::Destroyed,
            "{}: destroy called twice",
            component
        );
        *self = Lifecycle::Destroyed;
    }

    /// Panic unless initialized
    #[inline]
    #[track_caller]
    pub fn assert_live(&self, component: &str) {
        assert!(
            *self == Lifecycle::Initialized,
            "{}: used before initialize or after destroy ({:?})",
            component,
            self
        );
    }

    /// Whether resources are currently held
    #[inline]
    pub fn is_initialized(&self) -> bool {
        *self == Lifecycle::Initialized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_cycle() {
        let mut state = Lifecycle::default();
        assert_eq!(state, Lifecycle::Created);

        state.begin("Test");
        assert!(state.is_initialized());

        state.end("Test");
        assert_eq!(state, Lifecycle::Destroyed);

        // Re-initialization after destroy is allowed
        state.begin("Test");
        assert!(state.is_initialized());
    }

    #[test]
    #[should_panic(expected = "already initialized")]
    fn test_double_begin_panics() {
        let mut state = Lifecycle::default();
        state.begin("Test");
        state.begin("Test");
    }

    #[test]
    #[should_panic(expected = "not initialized")]
    fn test_end_without_begin_panics() {
        let mut state = Lifecycle::default();
        state.end("Test");
    }

    #[test]
    fn test_release_from_created() {
        let mut state = Lifecycle::default();
        state.release("Test");
        assert_eq!(state, Lifecycle::Destroyed);
    }

    #[test]
    #[should_panic(expected = "destroy called twice")]
    fn test_double_release_panics() {
        let mut state = Lifecycle::default();
        state.release("Test");
        state.release("Test");
    }

    #[test]
    #[should_panic(expected = "used before initialize")]
    fn test_assert_live_panics_when_created() {
        Lifecycle::default().assert_live("Test");
    }
}

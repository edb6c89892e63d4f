//! Error types for addon loading.

use thiserror::Error;

/// Failure to load an addon.
///
/// Carries the human-readable cause supplied at construction. The message
/// is immutable for the lifetime of the value: [`AddonLoadError::message`]
/// and the `Display` impl both return it verbatim.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct AddonLoadError {
    message: String,
}

impl AddonLoadError {
    /// Create a new error with the given message.
    ///
    /// Any string is accepted, including the empty string; the message is
    /// stored without validation or transformation.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The message supplied at construction, unchanged.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result type for addon operations.
pub type AddonResult<T> = std::result::Result<T, AddonLoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn load_something() -> AddonResult<()> {
        Err(AddonLoadError::new("missing manifest file"))
    }

    fn load_indirectly() -> AddonResult<()> {
        load_something()?;
        Ok(())
    }

    #[test]
    fn test_message_round_trip() {
        let err = AddonLoadError::new("missing manifest file");
        assert_eq!(err.message(), "missing manifest file");
    }

    #[test]
    fn test_empty_message() {
        let err = AddonLoadError::new("");
        assert_eq!(err.message(), "");
        assert_eq!(err.to_string(), "");
    }

    #[test]
    fn test_unicode_and_control_characters() {
        let msg = "Fehler beim Laden:\n\tдополнение не найдено — 插件丢失\u{7}";
        let err = AddonLoadError::new(msg);
        assert_eq!(err.message(), msg);
        assert_eq!(err.to_string(), msg);
    }

    #[test]
    fn test_repeated_retrieval_is_stable() {
        let err = AddonLoadError::new("broken archive");
        assert_eq!(err.message(), err.message());
        assert_eq!(err.message(), "broken archive");
    }

    #[test]
    fn test_display_matches_message() {
        let err = AddonLoadError::new("addon file does not exist: a.jar");
        assert_eq!(err.to_string(), err.message());
    }

    #[test]
    fn test_propagation_preserves_message() {
        let err = load_indirectly().unwrap_err();
        assert_eq!(err.message(), "missing manifest file");
    }

    #[test]
    fn test_works_as_error_trait_object() {
        let err: Box<dyn std::error::Error> = Box::new(AddonLoadError::new("boxed"));
        assert_eq!(err.to_string(), "boxed");
    }
}

//! Result type alias for Hearth

use super::errors::HearthError;

/// Result type alias for Hearth operations
///
/// # Examples
///
/// ```
/// use hearth::domain::result::Result;
/// use hearth::domain::errors::HearthError;
///
/// fn failing_function() -> Result<()> {
///     Err(HearthError::InvalidInput("photo URL has no extension".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, HearthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<u64> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}

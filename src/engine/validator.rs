use crate::utils::{
    config::FormatterSelection,
    error::ValidationError,
    types::RunMode,
};

/// Check a formatter selection before anything is launched.
///
/// At least one formatter must be enabled, and CSharpier cannot be combined
/// with `dotnet format whitespace` since both rewrite whitespace.
pub fn validate(selection: &FormatterSelection, mode: RunMode) -> Result<(), ValidationError> {
    if !selection.steps().iter().any(|(_, enabled)| *enabled) {
        return Err(ValidationError::NoFormatterSelected { mode });
    }

    if selection.csharpier && selection.whitespace {
        return Err(ValidationError::ConflictingWhitespaceFormatters { mode });
    }

    Ok(())
}

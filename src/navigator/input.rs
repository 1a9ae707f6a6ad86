use std::num::IntErrorKind;

use thiserror::Error;

/// Recoverable input problems. The screen stays where it is and the user
/// is asked again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum NavError {
    #[error("selection is not one of the listed options")]
    InvalidSelection,
    #[error("selection is not a number")]
    NonNumericInput,
}

/// Parse a numbered menu choice. `0` is always accepted (back/exit);
/// otherwise the number must be within `1..=max`.
pub fn parse_choice(input: &str, max: usize) -> Result<usize, NavError> {
    let choice: usize = input.trim().parse().map_err(|e: std::num::ParseIntError| {
        match e.kind() {
            IntErrorKind::PosOverflow => NavError::InvalidSelection,
            _ => NavError::NonNumericInput,
        }
    })?;
    if choice <= max {
        Ok(choice)
    } else {
        Err(NavError::InvalidSelection)
    }
}

/// Yes/no prompts: `e`/`evet` (and `y`/`yes`) mean yes, anything else no.
pub fn is_affirmative(input: &str) -> bool {
    matches!(
        input.trim().to_lowercase().as_str(),
        "e" | "evet" | "y" | "yes"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choice_in_range() {
        assert_eq!(parse_choice("3", 6), Ok(3));
        assert_eq!(parse_choice(" 0 \n", 6), Ok(0));
    }

    #[test]
    fn test_parse_choice_out_of_range() {
        assert_eq!(parse_choice("9", 6), Err(NavError::InvalidSelection));
        assert_eq!(
            parse_choice("99999999999999999999999", 6),
            Err(NavError::InvalidSelection)
        );
    }

    #[test]
    fn test_parse_choice_non_numeric() {
        assert_eq!(parse_choice("abc", 6), Err(NavError::NonNumericInput));
        assert_eq!(parse_choice("", 6), Err(NavError::NonNumericInput));
        assert_eq!(parse_choice("-1", 6), Err(NavError::NonNumericInput));
    }

    #[test]
    fn test_affirmative_answers() {
        assert!(is_affirmative("e"));
        assert!(is_affirmative("E\n"));
        assert!(is_affirmative("Evet"));
        assert!(!is_affirmative("h"));
        assert!(!is_affirmative(""));
    }
}

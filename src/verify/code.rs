use super::error::FormError;

/// Number of single character inputs that make up a verification code.
pub const CODE_LENGTH: usize = 6;

/// The six positional code inputs, each capped at one character.
///
/// Digits are expected but not enforced; an empty slot simply contributes
/// nothing to [`CodeFields::code`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeFields {
    slots: [Option<char>; CODE_LENGTH],
}

impl CodeFields {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the fields from positional values, applying the same one
    /// character cap as [`CodeFields::set`]. Extra values are ignored.
    #[must_use]
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut fields = Self::new();
        for (slot, value) in fields.slots.iter_mut().zip(values) {
            *slot = first_char(value.as_ref());
        }
        fields
    }

    /// Stores the first character of `value` at `index`; an empty value clears it.
    ///
    /// # Errors
    /// Returns [`FormError::FieldOutOfRange`] when `index >= CODE_LENGTH`.
    pub fn set(&mut self, index: usize, value: &str) -> Result<(), FormError> {
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(FormError::FieldOutOfRange(index))?;
        *slot = first_char(value);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<char> {
        self.slots.get(index).copied().flatten()
    }

    /// Concatenation of the slots in positional order 0..5.
    #[must_use]
    pub fn code(&self) -> String {
        self.slots.iter().flatten().collect()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }
}

fn first_char(value: &str) -> Option<char> {
    value.chars().next()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn code_concatenates_in_positional_order() {
        let mut fields = CodeFields::new();
        // Fill out of order, the code must still follow slot order.
        for (index, value) in [(5, "6"), (0, "1"), (3, "4"), (1, "2"), (4, "5"), (2, "3")] {
            fields.set(index, value).unwrap();
        }
        assert_eq!(fields.code(), "123456");
        assert!(fields.is_complete());
    }

    #[test]
    fn set_keeps_only_the_first_character() {
        let mut fields = CodeFields::new();
        fields.set(0, "98").unwrap();
        assert_eq!(fields.get(0), Some('9'));
        assert_eq!(fields.code(), "9");
    }

    #[test]
    fn empty_value_clears_the_slot() {
        let mut fields = CodeFields::from_values(["1", "2", "3", "4", "5", "6"]);
        fields.set(2, "").unwrap();
        assert_eq!(fields.get(2), None);
        assert_eq!(fields.code(), "12456");
        assert!(!fields.is_complete());
    }

    #[test]
    fn incomplete_fields_yield_a_shorter_code() {
        let fields = CodeFields::from_values(["4", "", "2"]);
        assert_eq!(fields.code(), "42");
    }

    #[test]
    fn non_digit_characters_are_accepted() {
        let fields = CodeFields::from_values(["a", "b", "c", "d", "e", "f"]);
        assert_eq!(fields.code(), "abcdef");
    }

    #[test]
    fn set_out_of_range_is_rejected() {
        let mut fields = CodeFields::new();
        assert_eq!(fields.set(6, "1"), Err(FormError::FieldOutOfRange(6)));
        assert_eq!(fields, CodeFields::new());
    }

    #[test]
    fn from_values_ignores_extra_values() {
        let fields = CodeFields::from_values(["1", "2", "3", "4", "5", "6", "7"]);
        assert_eq!(fields.code(), "123456");
    }
}

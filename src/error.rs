use crate::model::Field;

/// A card record that does not have the shape a clock face needs
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("card is missing required field '{0}'")]
    Missing(Field),

    #[error("card field '{0}' must not be empty")]
    Empty(Field),

    #[error("card field '{field}' must be {expected}, found {found}")]
    WrongType {
        field: Field,
        expected: &'static str,
        found: &'static str,
    },
}

impl ValidationError {
    pub fn wrong_type(field: Field, expected: &'static str, found: &'static str) -> Self {
        Self::WrongType {
            field,
            expected,
            found,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_wire_field() {
        let err = ValidationError::Missing(Field::Tz);
        assert_eq!(err.to_string(), "card is missing required field 'tz'");

        let err = ValidationError::Empty(Field::Tz);
        assert_eq!(err.to_string(), "card field 'tz' must not be empty");

        let err = ValidationError::wrong_type(Field::Format24, "a flag", "text");
        assert!(err.to_string().contains("'format24' must be a flag"));
    }
}

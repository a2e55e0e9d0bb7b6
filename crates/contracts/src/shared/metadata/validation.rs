//! Validation rules for metadata fields

/// Validation rules for a field
/// Copy trait for efficient passing
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ValidationRules {
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

impl ValidationRules {
    /// Create empty validation rules (all optional, no constraints)
    pub const fn none() -> Self {
        Self {
            required: false,
            min: None,
            max: None,
            min_length: None,
            max_length: None,
        }
    }

    /// Create validation rules for required field
    pub const fn required() -> Self {
        Self {
            required: true,
            min: None,
            max: None,
            min_length: None,
            max_length: None,
        }
    }

    pub const fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub const fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Check if field is required
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Validate a string value against the rules
    pub fn validate_string(&self, value: &str, field_label: &str) -> Result<(), String> {
        if self.required && value.trim().is_empty() {
            return Err(format!("{} не может быть пустым", field_label));
        }

        if let Some(min) = self.min_length {
            if !value.is_empty() && value.chars().count() < min {
                return Err(format!(
                    "{} должен содержать минимум {} символов",
                    field_label, min
                ));
            }
        }

        if let Some(max) = self.max_length {
            if value.chars().count() > max {
                return Err(format!(
                    "{} не должен превышать {} символов",
                    field_label, max
                ));
            }
        }

        Ok(())
    }

    /// Validate a numeric value against min/max rules
    pub fn validate_number(&self, value: f64, field_label: &str) -> Result<(), String> {
        if let Some(min) = self.min {
            if value < min {
                return Err(format!("{} должен быть не менее {}", field_label, min));
            }
        }

        if let Some(max) = self.max {
            if value > max {
                return Err(format!("{} должен быть не более {}", field_label, max));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_blank() {
        let rules = ValidationRules::required();
        assert!(rules.validate_string("", "Имя").is_err());
        assert!(rules.validate_string("   ", "Имя").is_err());
        assert!(rules.validate_string("ok", "Имя").is_ok());
    }

    #[test]
    fn length_bounds_apply() {
        let rules = ValidationRules {
            min_length: Some(3),
            max_length: Some(5),
            ..ValidationRules::none()
        };
        assert!(rules.validate_string("ab", "Код").is_err());
        assert!(rules.validate_string("abc", "Код").is_ok());
        assert!(rules.validate_string("abcdef", "Код").is_err());
        // пустое значение не проверяется на min_length, пока поле не required
        assert!(rules.validate_string("", "Код").is_ok());
    }

    #[test]
    fn numeric_bounds_apply() {
        let rules = ValidationRules::none().with_min(0.0);
        assert!(rules.validate_number(-1.0, "Цена").is_err());
        assert!(rules.validate_number(0.0, "Цена").is_ok());
    }
}

//! Табличная валидация форм: каждая форма описывает свои поля одной
//! статической таблицей правил вместо разрозненных проверок в коде.

use super::validation::ValidationRules;

/// Значение поля формы, переданное на проверку
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
}

/// Правило одного поля формы
pub struct FieldRule {
    /// Ключ поля в DTO
    pub field: &'static str,
    /// Подпись поля для сообщения об ошибке
    pub label: &'static str,
    pub rules: ValidationRules,
}

impl FieldRule {
    pub const fn new(field: &'static str, label: &'static str, rules: ValidationRules) -> Self {
        Self {
            field,
            label,
            rules,
        }
    }
}

/// Проверить значения формы по таблице правил.
///
/// `read` отдаёт текущее значение поля по его ключу; `None` — поле в
/// форме отсутствует (проверяется только required). Возвращается первая
/// ошибка, как в формах деталей.
pub fn validate_form<'a>(
    table: &[FieldRule],
    read: impl Fn(&'static str) -> Option<FieldValue<'a>>,
) -> Result<(), String> {
    for rule in table {
        match read(rule.field) {
            Some(FieldValue::Text(value)) => {
                rule.rules.validate_string(value, rule.label)?;
            }
            Some(FieldValue::Number(value)) => {
                rule.rules.validate_number(value, rule.label)?;
            }
            None => {
                if rule.rules.is_required() {
                    return Err(format!("{} не может быть пустым", rule.label));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &[FieldRule] = &[
        FieldRule::new(
            "description",
            "Наименование",
            ValidationRules::required(),
        ),
        FieldRule::new(
            "email",
            "Email",
            ValidationRules {
                min_length: Some(5),
                ..ValidationRules::none()
            },
        ),
    ];

    #[test]
    fn first_failing_rule_wins() {
        let err = validate_form(TABLE, |field| match field {
            "description" => Some(FieldValue::Text("")),
            "email" => Some(FieldValue::Text("x@y")),
            _ => None,
        })
        .unwrap_err();
        assert!(err.contains("Наименование"));
    }

    #[test]
    fn valid_form_passes() {
        let ok = validate_form(TABLE, |field| match field {
            "description" => Some(FieldValue::Text("ООО Ромашка")),
            "email" => Some(FieldValue::Text("a@b.ru")),
            _ => None,
        });
        assert!(ok.is_ok());
    }

    #[test]
    fn missing_required_field_fails() {
        let err = validate_form(TABLE, |_| None).unwrap_err();
        assert!(err.contains("Наименование"));
    }
}

use chrono::NaiveDate;

/// Типизированное значение поля записи для фильтров и сортировки
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Строковое поле
    Text(String),
    /// Числовое поле
    Number(f64),
    /// Дата в ISO-формате ("2026-03-15" или "2026-03-15T10:20:30Z").
    /// Сравнивается с точностью до дня; непарсибельное значение
    /// считается отсутствующим.
    Date(String),
    /// Логический флаг
    Flag(bool),
    /// Массив строк (например, теги)
    TextList(Vec<String>),
}

impl FieldValue {
    /// Значение как набор строк-членов для фильтра "значение из списка".
    /// Для массива — каждый элемент, для скаляра — одна строка.
    pub fn as_members(&self) -> Vec<String> {
        match self {
            FieldValue::Text(s) => vec![s.clone()],
            FieldValue::Number(n) => vec![format_number(*n)],
            FieldValue::Date(s) => vec![s.clone()],
            FieldValue::Flag(b) => vec![b.to_string()],
            FieldValue::TextList(items) => items.clone(),
        }
    }

    /// Дата с точностью до дня, если значение — парсибельная дата
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(raw) => parse_day(raw),
            _ => None,
        }
    }
}

/// Распарсить день из ISO-строки даты или даты-времени
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.split('T').next().unwrap_or(raw);
    NaiveDate::parse_from_str(date_part.trim(), "%Y-%m-%d").ok()
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Запись списка: что искать и как читать поля.
///
/// `search_fields` — проекция для текстового поиска (скалярные значения
/// записи строками), `field` — типизированный доступ к полю по ключу
/// колонки. Отсутствующее поле — `None`.
pub trait ListRecord {
    fn search_fields(&self) -> Vec<String>;

    fn field(&self, key: &str) -> Option<FieldValue>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_day_accepts_date_and_datetime() {
        assert_eq!(
            parse_day("2026-03-15"),
            NaiveDate::from_ymd_opt(2026, 3, 15)
        );
        assert_eq!(
            parse_day("2026-03-15T14:02:26.123Z"),
            NaiveDate::from_ymd_opt(2026, 3, 15)
        );
    }

    #[test]
    fn parse_day_rejects_garbage() {
        assert_eq!(parse_day(""), None);
        assert_eq!(parse_day("not-a-date"), None);
        assert_eq!(parse_day("15.03.2026"), None);
    }

    #[test]
    fn members_of_list_are_elements() {
        let v = FieldValue::TextList(vec!["crm".into(), "release".into()]);
        assert_eq!(v.as_members(), vec!["crm".to_string(), "release".to_string()]);
    }

    #[test]
    fn members_of_number_have_no_trailing_zeros() {
        assert_eq!(FieldValue::Number(100.0).as_members(), vec!["100"]);
        assert_eq!(FieldValue::Number(99.5).as_members(), vec!["99.5"]);
    }
}

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;

use super::record::{parse_day, ListRecord};

/// Предикат фильтра по одному полю.
///
/// Неактивный предикат (пустой набор значений, диапазон без границ)
/// пропускает все записи. Активный предикат отбрасывает запись, у
/// которой поле отсутствует или не парсится.
pub enum FilterPredicate<T> {
    /// Значение поля входит в выбранный набор; для массивов — хотя бы
    /// один элемент. Пустой набор означает "фильтр выключен".
    InSet(HashSet<String>),
    /// Дата поля в диапазоне `[from, to]` включительно, с точностью до
    /// дня. Отсутствующая граница — диапазон открыт с этой стороны.
    DateRange {
        from: Option<String>,
        to: Option<String>,
    },
    /// Произвольный предикат
    Custom(Arc<dyn Fn(&T) -> bool + Send + Sync>),
}

impl<T> FilterPredicate<T> {
    pub fn in_set<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterPredicate::InSet(values.into_iter().map(Into::into).collect())
    }

    pub fn date_range(from: Option<String>, to: Option<String>) -> Self {
        FilterPredicate::DateRange { from, to }
    }

    pub fn custom(f: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        FilterPredicate::Custom(Arc::new(f))
    }

    /// Участвует ли предикат в отборе
    pub fn is_active(&self) -> bool {
        match self {
            FilterPredicate::InSet(values) => !values.is_empty(),
            FilterPredicate::DateRange { from, to } => {
                parse_bound(from).is_some() || parse_bound(to).is_some()
            }
            FilterPredicate::Custom(_) => true,
        }
    }
}

impl<T: ListRecord> FilterPredicate<T> {
    /// Проходит ли запись предикат по полю `key`
    pub fn matches(&self, record: &T, key: &str) -> bool {
        match self {
            FilterPredicate::InSet(values) => {
                if values.is_empty() {
                    return true;
                }
                match record.field(key) {
                    Some(value) => value.as_members().iter().any(|m| values.contains(m)),
                    None => false,
                }
            }
            FilterPredicate::DateRange { from, to } => {
                let from = parse_bound(from);
                let to = parse_bound(to);
                if from.is_none() && to.is_none() {
                    return true;
                }
                let Some(day) = record.field(key).and_then(|v| v.as_date()) else {
                    return false;
                };
                if let Some(from) = from {
                    if day < from {
                        return false;
                    }
                }
                if let Some(to) = to {
                    if day > to {
                        return false;
                    }
                }
                true
            }
            FilterPredicate::Custom(f) => f(record),
        }
    }
}

/// Граница диапазона: пустая или непарсибельная строка — границы нет
fn parse_bound(bound: &Option<String>) -> Option<NaiveDate> {
    bound.as_deref().and_then(parse_day)
}

impl<T> Clone for FilterPredicate<T> {
    fn clone(&self) -> Self {
        match self {
            FilterPredicate::InSet(values) => FilterPredicate::InSet(values.clone()),
            FilterPredicate::DateRange { from, to } => FilterPredicate::DateRange {
                from: from.clone(),
                to: to.clone(),
            },
            FilterPredicate::Custom(f) => FilterPredicate::Custom(Arc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for FilterPredicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterPredicate::InSet(values) => f.debug_tuple("InSet").field(values).finish(),
            FilterPredicate::DateRange { from, to } => f
                .debug_struct("DateRange")
                .field("from", from)
                .field("to", to)
                .finish(),
            FilterPredicate::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::record::FieldValue;
    use super::*;

    #[derive(Clone)]
    struct Row {
        status: Option<String>,
        date: Option<String>,
        tags: Vec<String>,
    }

    impl ListRecord for Row {
        fn search_fields(&self) -> Vec<String> {
            Vec::new()
        }

        fn field(&self, key: &str) -> Option<FieldValue> {
            match key {
                "status" => self.status.clone().map(FieldValue::Text),
                "date" => self.date.clone().map(FieldValue::Date),
                "tags" => Some(FieldValue::TextList(self.tags.clone())),
                _ => None,
            }
        }
    }

    fn row(status: Option<&str>, date: Option<&str>) -> Row {
        Row {
            status: status.map(str::to_string),
            date: date.map(str::to_string),
            tags: Vec::new(),
        }
    }

    #[test]
    fn empty_set_is_inactive_and_matches_everything() {
        let p: FilterPredicate<Row> = FilterPredicate::in_set(Vec::<String>::new());
        assert!(!p.is_active());
        assert!(p.matches(&row(None, None), "status"));
    }

    #[test]
    fn set_matches_by_membership() {
        let p: FilterPredicate<Row> = FilterPredicate::in_set(["active"]);
        assert!(p.matches(&row(Some("active"), None), "status"));
        assert!(!p.matches(&row(Some("closed"), None), "status"));
        // отсутствующее поле не проходит активный фильтр
        assert!(!p.matches(&row(None, None), "status"));
    }

    #[test]
    fn set_matches_any_list_element() {
        let p: FilterPredicate<Row> = FilterPredicate::in_set(["crm"]);
        let mut r = row(None, None);
        r.tags = vec!["release".into(), "crm".into()];
        assert!(p.matches(&r, "tags"));
        r.tags = vec!["release".into()];
        assert!(!p.matches(&r, "tags"));
    }

    #[test]
    fn date_range_is_inclusive_and_day_granular() {
        let p: FilterPredicate<Row> =
            FilterPredicate::date_range(Some("2026-01-01".into()), Some("2026-01-31".into()));
        assert!(p.matches(&row(None, Some("2026-01-01")), "date"));
        assert!(p.matches(&row(None, Some("2026-01-31T23:59:59Z")), "date"));
        assert!(!p.matches(&row(None, Some("2026-02-01")), "date"));
    }

    #[test]
    fn open_ended_range_keeps_later_dates() {
        let p: FilterPredicate<Row> = FilterPredicate::date_range(Some("2026-01-01".into()), None);
        assert!(p.matches(&row(None, Some("2030-12-31")), "date"));
        assert!(!p.matches(&row(None, Some("2025-12-31")), "date"));
        // непарсибельная дата записи отбрасывается активным фильтром
        assert!(!p.matches(&row(None, Some("soon")), "date"));
        assert!(!p.matches(&row(None, None), "date"));
    }

    #[test]
    fn blank_bounds_deactivate_range() {
        let p: FilterPredicate<Row> = FilterPredicate::date_range(Some(String::new()), None);
        assert!(!p.is_active());
        assert!(p.matches(&row(None, None), "date"));
    }
}

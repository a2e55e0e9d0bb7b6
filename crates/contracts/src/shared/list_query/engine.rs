use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use thiserror::Error;

use super::filter::FilterPredicate;
use super::record::{FieldValue, ListRecord};

/// Запрошенная страница. Индекс 1-based, как в элементах управления
/// пагинацией.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub index: usize,
    pub size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            index: 1,
            size: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
    None,
}

/// Сортировка по одной колонке
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn none() -> Self {
        Self {
            key: String::new(),
            direction: SortDirection::None,
        }
    }

    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Клик по заголовку: та же колонка — смена направления, новая —
    /// сортировка по возрастанию
    pub fn toggle(&mut self, key: &str) {
        if self.key == key {
            self.direction = match self.direction {
                SortDirection::Asc => SortDirection::Desc,
                _ => SortDirection::Asc,
            };
        } else {
            self.key = key.to_string();
            self.direction = SortDirection::Asc;
        }
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::none()
    }
}

/// Текущий запрос страницы-списка: поиск, фильтры, сортировка, страница
#[derive(Debug, Clone)]
pub struct QuerySpec<T> {
    pub search: String,
    pub filters: BTreeMap<String, FilterPredicate<T>>,
    pub sort: SortSpec,
    pub page: PageRequest,
}

impl<T> QuerySpec<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sort(sort: SortSpec) -> Self {
        Self {
            sort,
            ..Self::default()
        }
    }

    /// Установить фильтр поля; неактивный предикат снимает фильтр
    pub fn set_filter(&mut self, key: impl Into<String>, predicate: FilterPredicate<T>) {
        let key = key.into();
        if predicate.is_active() {
            self.filters.insert(key, predicate);
        } else {
            self.filters.remove(&key);
        }
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    /// Количество активных фильтров (для бейджа на панели фильтров)
    pub fn active_filter_count(&self) -> usize {
        self.filters.values().filter(|p| p.is_active()).count()
    }
}

impl<T> Default for QuerySpec<T> {
    fn default() -> Self {
        Self {
            search: String::new(),
            filters: BTreeMap::new(),
            sort: SortSpec::none(),
            page: PageRequest::default(),
        }
    }
}

/// Результат конвейера
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult<T> {
    /// Строки видимой страницы
    pub page_items: Vec<T>,
    /// Сколько всего записей прошло поиск и фильтры
    pub total_count: usize,
    /// Полный отфильтрованный и отсортированный набор (для экспорта)
    pub all_matching: Vec<T>,
}

impl<T> QueryResult<T> {
    pub fn empty() -> Self {
        Self {
            page_items: Vec::new(),
            total_count: 0,
            all_matching: Vec::new(),
        }
    }

    /// Число страниц при текущем размере страницы
    pub fn total_pages(&self, page_size: usize) -> usize {
        if self.total_count == 0 || page_size == 0 {
            0
        } else {
            (self.total_count + page_size - 1) / page_size
        }
    }
}

/// Структурно некорректный запрос — ошибка вызывающего кода, а не данных
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("page size must be positive, got {0}")]
    InvalidPageSize(usize),
}

/// Прогнать коллекцию через поиск, фильтры, сортировку и пагинацию.
///
/// Коллекция и спецификация не изменяются. Битые значения полей не
/// считаются ошибкой: активный фильтр их отбрасывает, сортировка ставит
/// в конец. Страница за пределами набора — пустая `page_items` при
/// корректном `total_count`; индекс страницы здесь не подрезается, это
/// забота вызывающего.
pub fn execute<T>(collection: &[T], spec: &QuerySpec<T>) -> Result<QueryResult<T>, QueryError>
where
    T: ListRecord + Clone,
{
    if spec.page.size == 0 {
        return Err(QueryError::InvalidPageSize(spec.page.size));
    }

    let needle = spec.search.trim().to_lowercase();

    let mut matching: Vec<&T> = collection
        .iter()
        .filter(|record| {
            needle.is_empty()
                || record
                    .search_fields()
                    .iter()
                    .any(|value| value.to_lowercase().contains(&needle))
        })
        .filter(|record| {
            spec.filters
                .iter()
                .all(|(key, predicate)| predicate.matches(record, key))
        })
        .collect();

    if spec.sort.direction != SortDirection::None && !spec.sort.key.is_empty() {
        // Vec::sort_by стабильна: равные ключи сохраняют порядок после фильтров
        matching.sort_by(|a, b| compare_records(*a, *b, &spec.sort));
    }

    let all_matching: Vec<T> = matching.into_iter().cloned().collect();
    let total_count = all_matching.len();

    let page_items = match spec.page.index.checked_sub(1) {
        Some(zero_based) => {
            let start = zero_based.saturating_mul(spec.page.size);
            if start < total_count {
                let end = (start + spec.page.size).min(total_count);
                all_matching[start..end].to_vec()
            } else {
                Vec::new()
            }
        }
        // index == 0 трактуем как страницу за пределами набора
        None => Vec::new(),
    };

    Ok(QueryResult {
        page_items,
        total_count,
        all_matching,
    })
}

/// Уникальные значения поля по коллекции — для наполнения выпадающих
/// списков фильтров. Пустые строки пропускаются.
pub fn distinct_values<T: ListRecord>(items: &[T], key: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    for item in items {
        if let Some(value) = item.field(key) {
            for member in value.as_members() {
                if !member.is_empty() {
                    seen.insert(member);
                }
            }
        }
    }
    seen.into_iter().collect()
}

/// Ключ сортировки, нормализованный по типу значения
enum SortKey {
    Date(NaiveDate),
    Number(f64),
    Flag(bool),
    Text(String),
}

fn sort_key(value: FieldValue) -> Option<SortKey> {
    match value {
        FieldValue::Date(_) => value.as_date().map(SortKey::Date),
        FieldValue::Number(n) => {
            if n.is_nan() {
                None
            } else {
                Some(SortKey::Number(n))
            }
        }
        FieldValue::Flag(b) => Some(SortKey::Flag(b)),
        FieldValue::Text(s) => Some(SortKey::Text(s.to_lowercase())),
        FieldValue::TextList(items) => Some(SortKey::Text(items.join(", ").to_lowercase())),
    }
}

fn compare_records<T: ListRecord>(a: &T, b: &T, sort: &SortSpec) -> Ordering {
    let ka = a.field(&sort.key).and_then(sort_key);
    let kb = b.field(&sort.key).and_then(sort_key);

    match (ka, kb) {
        // отсутствующие и битые значения всегда в конце, независимо от
        // направления
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(ka), Some(kb)) => {
            let ordering = compare_keys(&ka, &kb);
            if sort.direction == SortDirection::Desc {
                ordering.reverse()
            } else {
                ordering
            }
        }
    }
}

fn compare_keys(a: &SortKey, b: &SortKey) -> Ordering {
    match (a, b) {
        (SortKey::Date(x), SortKey::Date(y)) => x.cmp(y),
        (SortKey::Number(x), SortKey::Number(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        (SortKey::Flag(x), SortKey::Flag(y)) => x.cmp(y),
        (SortKey::Text(x), SortKey::Text(y)) => x.cmp(y),
        // разнотипные значения одного поля: стабильный порядок по типу
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(key: &SortKey) -> u8 {
    match key {
        SortKey::Date(_) => 0,
        SortKey::Number(_) => 1,
        SortKey::Flag(_) => 2,
        SortKey::Text(_) => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
        name: String,
        status: String,
        price: f64,
        created_at: Option<String>,
    }

    impl Row {
        fn new(id: u32, name: &str, status: &str, price: f64, created_at: Option<&str>) -> Self {
            Self {
                id,
                name: name.to_string(),
                status: status.to_string(),
                price,
                created_at: created_at.map(str::to_string),
            }
        }
    }

    impl ListRecord for Row {
        fn search_fields(&self) -> Vec<String> {
            vec![
                self.name.clone(),
                self.status.clone(),
                self.price.to_string(),
            ]
        }

        fn field(&self, key: &str) -> Option<FieldValue> {
            match key {
                "name" => Some(FieldValue::Text(self.name.clone())),
                "status" => Some(FieldValue::Text(self.status.clone())),
                "price" => Some(FieldValue::Number(self.price)),
                "created_at" => self.created_at.clone().map(FieldValue::Date),
                _ => None,
            }
        }
    }

    fn sample() -> Vec<Row> {
        // 25 строк: 17 active / 8 inactive
        (1..=25)
            .map(|i| {
                let status = if i <= 17 { "active" } else { "inactive" };
                let day = format!("2026-01-{:02}", (i % 28) + 1);
                Row::new(i, &format!("record {i}"), status, f64::from(i) * 10.0, Some(&day))
            })
            .collect()
    }

    fn spec() -> QuerySpec<Row> {
        QuerySpec::new()
    }

    #[test]
    fn repeated_execution_is_deterministic() {
        let rows = sample();
        let mut q = spec();
        q.search = "record".into();
        q.set_filter("status", FilterPredicate::in_set(["active"]));
        q.sort = SortSpec::desc("price");
        q.page = PageRequest { index: 2, size: 5 };

        let first = execute(&rows, &q).unwrap();
        let second = execute(&rows, &q).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn total_count_matches_full_matching_set() {
        let rows = sample();
        let mut q = spec();
        q.set_filter("status", FilterPredicate::in_set(["inactive"]));
        let result = execute(&rows, &q).unwrap();
        assert_eq!(result.total_count, result.all_matching.len());
        assert_eq!(result.total_count, 8);
    }

    #[test]
    fn page_never_exceeds_requested_size() {
        let rows = sample();
        let mut q = spec();
        q.page = PageRequest { index: 1, size: 10 };
        let result = execute(&rows, &q).unwrap();
        assert_eq!(result.page_items.len(), 10);

        q.page = PageRequest { index: 3, size: 10 };
        let tail = execute(&rows, &q).unwrap();
        assert_eq!(tail.page_items.len(), 5);
        assert_eq!(tail.total_count, 25);
    }

    #[test]
    fn adding_a_filter_never_grows_the_result() {
        let rows = sample();
        let mut q = spec();
        q.search = "record".into();
        let base = execute(&rows, &q).unwrap();

        q.set_filter(
            "created_at",
            FilterPredicate::date_range(Some("2026-01-10".into()), None),
        );
        let narrowed = execute(&rows, &q).unwrap();
        assert!(narrowed.total_count <= base.total_count);
    }

    #[test]
    fn equal_sort_keys_keep_filtered_order() {
        // B раньше A в исходной коллекции, цены равны
        let rows = vec![
            Row::new(2, "B", "active", 100.0, Some("2026-01-02")),
            Row::new(1, "A", "active", 100.0, Some("2026-01-01")),
            Row::new(3, "C", "active", 50.0, Some("2026-01-03")),
        ];
        let mut q = spec();
        q.sort = SortSpec::asc("price");
        let result = execute(&rows, &q).unwrap();
        let ids: Vec<u32> = result.all_matching.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn empty_search_is_a_no_op() {
        let rows = sample();
        let mut with_blank = spec();
        with_blank.search = "   ".into();
        let a = execute(&rows, &with_blank).unwrap();
        let b = execute(&rows, &spec()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn out_of_range_page_is_empty_with_correct_total() {
        let rows = sample();
        let mut q = spec();
        q.set_filter("status", FilterPredicate::in_set(["active"]));
        q.page = PageRequest { index: 3, size: 10 };
        let result = execute(&rows, &q).unwrap();
        assert!(result.page_items.is_empty());
        assert_eq!(result.total_count, 17);
    }

    #[test]
    fn page_index_zero_is_out_of_range() {
        let rows = sample();
        let mut q = spec();
        q.page = PageRequest { index: 0, size: 10 };
        let result = execute(&rows, &q).unwrap();
        assert!(result.page_items.is_empty());
        assert_eq!(result.total_count, 25);
    }

    #[test]
    fn zero_page_size_is_a_caller_bug() {
        let rows = sample();
        let mut q = spec();
        q.page = PageRequest { index: 1, size: 0 };
        assert_eq!(
            execute(&rows, &q).unwrap_err(),
            QueryError::InvalidPageSize(0)
        );
    }

    #[test]
    fn status_filter_with_first_page() {
        // 25 записей, 17 активных, страница 10 — как на типовой странице
        let rows = sample();
        let mut q = spec();
        q.set_filter("status", FilterPredicate::in_set(["active"]));
        q.page = PageRequest { index: 1, size: 10 };
        let result = execute(&rows, &q).unwrap();
        assert_eq!(result.total_count, 17);
        assert_eq!(result.page_items.len(), 10);
    }

    #[test]
    fn missing_dates_sort_last_even_descending() {
        let rows = vec![
            Row::new(1, "old", "active", 1.0, Some("2024-05-01")),
            Row::new(2, "none", "active", 1.0, None),
            Row::new(3, "new", "active", 1.0, Some("2026-07-15")),
            Row::new(4, "broken", "active", 1.0, Some("n/a")),
            Row::new(5, "mid", "active", 1.0, Some("2025-01-01")),
        ];
        let mut q = spec();
        q.sort = SortSpec::desc("created_at");
        let result = execute(&rows, &q).unwrap();
        let ids: Vec<u32> = result.all_matching.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 5, 1, 2, 4]);

        q.sort = SortSpec::asc("created_at");
        let result = execute(&rows, &q).unwrap();
        let ids: Vec<u32> = result.all_matching.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 5, 3, 2, 4]);
    }

    #[test]
    fn search_is_case_insensitive() {
        let rows = vec![
            Row::new(1, "Alice Smith", "active", 1.0, None),
            Row::new(2, "bob", "active", 1.0, None),
            Row::new(3, "SMITHSON", "active", 1.0, None),
        ];
        let mut q = spec();
        q.search = "smith".into();
        let result = execute(&rows, &q).unwrap();
        let ids: Vec<u32> = result.all_matching.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn open_date_range_keeps_later_dates_drops_broken() {
        let rows = vec![
            Row::new(1, "a", "active", 1.0, Some("2023-12-31")),
            Row::new(2, "b", "active", 1.0, Some("2024-01-01")),
            Row::new(3, "c", "active", 1.0, Some("2026-06-01")),
            Row::new(4, "d", "active", 1.0, Some("later")),
        ];
        let mut q = spec();
        q.set_filter(
            "created_at",
            FilterPredicate::date_range(Some("2024-01-01".into()), None),
        );
        let result = execute(&rows, &q).unwrap();
        let ids: Vec<u32> = result.all_matching.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn filters_are_conjunctive_with_search() {
        let rows = vec![
            Row::new(1, "alpha", "active", 1.0, Some("2026-01-01")),
            Row::new(2, "alpha", "closed", 1.0, Some("2026-01-02")),
            Row::new(3, "beta", "active", 1.0, Some("2026-01-03")),
        ];
        let mut q = spec();
        q.search = "alpha".into();
        q.set_filter("status", FilterPredicate::in_set(["active"]));
        let result = execute(&rows, &q).unwrap();
        let ids: Vec<u32> = result.all_matching.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn custom_predicate_applies() {
        let rows = sample();
        let mut q = spec();
        q.set_filter("price", FilterPredicate::custom(|r: &Row| r.price >= 200.0));
        let result = execute(&rows, &q).unwrap();
        assert_eq!(result.total_count, 6);
        assert!(result.all_matching.iter().all(|r| r.price >= 200.0));
    }

    #[test]
    fn empty_collection_yields_empty_result() {
        let rows: Vec<Row> = Vec::new();
        let mut q = spec();
        q.search = "anything".into();
        let result = execute(&rows, &q).unwrap();
        assert_eq!(result, QueryResult::empty());
    }

    #[test]
    fn inputs_are_not_mutated() {
        let rows = sample();
        let before = rows.clone();
        let mut q = spec();
        q.sort = SortSpec::desc("price");
        let _ = execute(&rows, &q).unwrap();
        assert_eq!(rows, before);
    }

    #[test]
    fn distinct_values_are_sorted_and_unique() {
        let rows = sample();
        assert_eq!(
            distinct_values(&rows, "status"),
            vec!["active".to_string(), "inactive".to_string()]
        );
        assert!(distinct_values(&rows, "unknown").is_empty());
    }

    #[test]
    fn total_pages_rounds_up() {
        let rows = sample();
        let result = execute(&rows, &spec()).unwrap();
        assert_eq!(result.total_pages(10), 3);
        assert_eq!(result.total_pages(25), 1);
        assert_eq!(QueryResult::<Row>::empty().total_pages(10), 0);
    }

    #[test]
    fn toggle_flips_direction_on_same_key() {
        let mut sort = SortSpec::asc("name");
        sort.toggle("name");
        assert_eq!(sort.direction, SortDirection::Desc);
        sort.toggle("price");
        assert_eq!(sort.key, "price");
        assert_eq!(sort.direction, SortDirection::Asc);
    }
}

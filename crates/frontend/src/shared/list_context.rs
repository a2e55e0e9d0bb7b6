//! Состояние одной страницы-списка.
//!
//! Контейнер создаётся страницей при монтировании и живёт вместе с ней;
//! никакого глобального стора у списков нет. Любая мутация запроса
//! синхронно прогоняет конвейер `list_query` и обновляет проекции
//! результата, на которые подписана таблица.

use std::collections::HashSet;

use leptos::prelude::*;

use contracts::shared::list_query::{
    execute, FilterPredicate, ListRecord, QueryResult, QuerySpec, SortDirection, SortSpec,
};

pub struct ListContext<T: Send + Sync + 'static> {
    /// Сырые строки с сервера — единственный источник данных конвейера
    pub all_rows: RwSignal<Vec<T>>,
    /// Текущий запрос: поиск, фильтры, сортировка, страница
    pub spec: RwSignal<QuerySpec<T>>,

    // Проекции последнего результата конвейера
    pub page_items: RwSignal<Vec<T>>,
    pub all_matching: RwSignal<Vec<T>>,
    pub total_count: RwSignal<usize>,
    pub total_pages: RwSignal<usize>,

    pub selected_ids: RwSignal<HashSet<String>>,
    pub is_loaded: RwSignal<bool>,

    id_of: fn(&T) -> String,
}

// Контейнер — пачка Copy-сигналов, поэтому Copy сам, независимо от T
impl<T: Send + Sync + 'static> Clone for ListContext<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for ListContext<T> {}

impl<T> ListContext<T>
where
    T: ListRecord + Clone + Send + Sync + 'static,
{
    pub fn new(id_of: fn(&T) -> String, default_sort: SortSpec) -> Self {
        Self {
            all_rows: RwSignal::new(Vec::new()),
            spec: RwSignal::new(QuerySpec::with_sort(default_sort)),
            page_items: RwSignal::new(Vec::new()),
            all_matching: RwSignal::new(Vec::new()),
            total_count: RwSignal::new(0),
            total_pages: RwSignal::new(0),
            selected_ids: RwSignal::new(HashSet::new()),
            is_loaded: RwSignal::new(false),
            id_of,
        }
    }

    /// Прогнать конвейер и обновить проекции. Если текущая страница
    /// оказалась за концом набора (сменился фильтр, перечитали данные),
    /// индекс подрезается до последней страницы — сам конвейер этого
    /// не делает.
    pub fn refresh(&self) {
        let rows = self.all_rows.get_untracked();
        let mut spec = self.spec.get_untracked();

        let mut result = match execute(&rows, &spec) {
            Ok(result) => result,
            Err(e) => {
                log::error!("list query failed: {}", e);
                QueryResult::empty()
            }
        };

        let pages = result.total_pages(spec.page.size);
        if pages > 0 && spec.page.index > pages {
            spec.page.index = pages;
            self.spec.set(spec.clone());
            result = match execute(&rows, &spec) {
                Ok(result) => result,
                Err(e) => {
                    log::error!("list query failed: {}", e);
                    QueryResult::empty()
                }
            };
        }

        self.total_pages.set(pages);
        self.total_count.set(result.total_count);
        self.page_items.set(result.page_items);
        self.all_matching.set(result.all_matching);
    }

    /// Заменить коллекцию свежими данными сервера
    pub fn set_rows(&self, rows: Vec<T>) {
        self.all_rows.set(rows);
        self.spec.update(|s| s.page.index = 1);
        self.is_loaded.set(true);
        self.refresh();
    }

    pub fn set_search(&self, text: String) {
        self.spec.update(|s| {
            s.search = text;
            s.page.index = 1;
        });
        self.refresh();
    }

    pub fn toggle_sort(&self, key: &str) {
        self.spec.update(|s| {
            s.sort.toggle(key);
            s.page.index = 1;
        });
        self.refresh();
    }

    pub fn set_filter(&self, key: &str, predicate: FilterPredicate<T>) {
        self.spec.update(|s| {
            s.set_filter(key, predicate);
            s.page.index = 1;
        });
        self.refresh();
    }

    pub fn clear_filters(&self) {
        self.spec.update(|s| {
            s.clear_filters();
            s.page.index = 1;
        });
        self.refresh();
    }

    pub fn go_to_page(&self, index: usize) {
        self.spec.update(|s| s.page.index = index.max(1));
        self.refresh();
    }

    pub fn set_page_size(&self, size: usize) {
        if size == 0 {
            return;
        }
        self.spec.update(|s| {
            s.page.size = size;
            s.page.index = 1;
        });
        self.refresh();
    }

    // Реактивные чтения для заголовков и панели фильтров

    pub fn search(&self) -> String {
        self.spec.with(|s| s.search.clone())
    }

    pub fn sort_field(&self) -> String {
        self.spec.with(|s| s.sort.key.clone())
    }

    pub fn sort_ascending(&self) -> bool {
        self.spec.with(|s| s.sort.direction != SortDirection::Desc)
    }

    pub fn active_filter_count(&self) -> usize {
        self.spec.with(|s| s.active_filter_count())
    }

    pub fn page_index(&self) -> usize {
        self.spec.with(|s| s.page.index)
    }

    pub fn page_size(&self) -> usize {
        self.spec.with(|s| s.page.size)
    }

    // Выбор строк для пакетных операций

    pub fn toggle_selection(&self, id: String, checked: bool) {
        self.selected_ids.update(|s| {
            if checked {
                s.insert(id);
            } else {
                s.remove(&id);
            }
        });
    }

    /// Отметить или снять все строки видимой страницы
    pub fn toggle_all(&self, check_all: bool) {
        if check_all {
            let ids: Vec<String> = self
                .page_items
                .get_untracked()
                .iter()
                .map(self.id_of)
                .collect();
            self.selected_ids.update(|s| {
                s.clear();
                s.extend(ids);
            });
        } else {
            self.selected_ids.update(|s| s.clear());
        }
    }

    pub fn clear_selection(&self) {
        self.selected_ids.update(|s| s.clear());
    }

    pub fn selected_count(&self) -> usize {
        self.selected_ids.with(|s| s.len())
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_ids.with(|s| s.contains(id))
    }

    /// Полный отфильтрованный набор для экспорта
    pub fn export_rows(&self) -> Vec<T> {
        self.all_matching.get_untracked()
    }
}

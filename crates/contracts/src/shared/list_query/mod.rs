//! Общий конвейер списков: поиск → фильтры → сортировка → пагинация.
//!
//! Каждая страница-список консоли считает видимые строки через
//! [`execute`] вместо собственной копии этой логики. Конвейер чистый:
//! не трогает ни коллекцию, ни спецификацию запроса, результат
//! детерминирован для одинаковых входов.

pub mod engine;
pub mod filter;
pub mod record;

// Re-exports
pub use engine::{distinct_values, execute, QueryError, QueryResult};
pub use engine::{PageRequest, QuerySpec, SortDirection, SortSpec};
pub use filter::FilterPredicate;
pub use record::{FieldValue, ListRecord};

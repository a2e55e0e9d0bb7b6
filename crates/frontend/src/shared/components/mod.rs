pub mod date_range_picker;
pub mod filter_panel;
pub mod pagination_controls;
pub mod table;

pub use date_range_picker::DateRangePicker;
pub use filter_panel::{FilterPanel, FilterTag};
pub use pagination_controls::PaginationControls;
pub use table::{SortableHeaderCell, TableCellCheckbox, TableHeaderCheckbox};

//! Переиспользуемые ячейки таблиц списков

use std::collections::HashSet;

use leptos::prelude::*;
use thaw::*;
use wasm_bindgen::JsCast;

use crate::shared::list_utils::{get_sort_class, get_sort_indicator};

/// Сортируемая ячейка заголовка таблицы: подпись + индикатор (▲▼),
/// клик переключает сортировку.
#[component]
pub fn SortableHeaderCell(
    /// Текст заголовка
    #[prop(into)]
    label: String,

    /// Поле для сортировки
    #[prop(into)]
    sort_field: String,

    /// Текущее поле сортировки из state
    #[prop(into)]
    current_sort_field: Signal<String>,

    /// Направление сортировки из state
    #[prop(into)]
    sort_ascending: Signal<bool>,

    /// Callback при клике на заголовок
    on_sort: Callback<String>,

    /// Минимальная ширина колонки
    #[prop(optional, default = 100.0)]
    min_width: f64,
) -> impl IntoView {
    let sort_field_for_click = sort_field.clone();
    let sort_field_for_indicator = sort_field.clone();
    let sort_field_for_class = sort_field.clone();

    let handle_click = move |_| {
        on_sort.run(sort_field_for_click.clone());
    };

    view! {
        <TableHeaderCell resizable=false min_width=min_width>
            <div
                class="table__sortable-header"
                style="cursor: pointer;"
                on:click=handle_click
            >
                {label}
                <span class=move || {
                    get_sort_class(&current_sort_field.get(), &sort_field_for_class)
                }>
                    {move || {
                        get_sort_indicator(
                            &current_sort_field.get(),
                            &sort_field_for_indicator,
                            sort_ascending.get()
                        )
                    }}
                </span>
            </div>
        </TableHeaderCell>
    }
}

/// Чекбокс в ячейке таблицы для выбора отдельной строки
#[component]
pub fn TableCellCheckbox(
    /// ID текущего элемента
    #[prop(into)]
    item_id: String,

    /// Выбранные ID
    #[prop(into)]
    selected: Signal<HashSet<String>>,

    /// Callback при изменении (item_id, checked)
    on_change: Callback<(String, bool)>,
) -> impl IntoView {
    let item_id_for_checked = item_id.clone();
    let item_id_for_change = item_id.clone();

    view! {
        <TableCell class="fixed-checkbox-column" on:click=|e| e.stop_propagation()>
            <input
                type="checkbox"
                class="table__checkbox"
                prop:checked=move || selected.get().contains(&item_id_for_checked)
                on:change=move |ev| {
                    let checked = event_target_checked(&ev);
                    on_change.run((item_id_for_change.clone(), checked));
                }
            />
        </TableCell>
    }
}

/// Чекбокс в заголовке таблицы: выбрать все / снять все, с
/// indeterminate-состоянием при частичном выборе.
#[component]
pub fn TableHeaderCheckbox<T>(
    /// Строки видимой страницы
    #[prop(into)]
    items: Signal<Vec<T>>,

    /// Выбранные ID
    #[prop(into)]
    selected: Signal<HashSet<String>>,

    /// Функция для получения ID из item
    get_id: Callback<T, String>,

    /// Callback при изменении (true = выбрать все, false = снять все)
    on_change: Callback<bool>,
) -> impl IntoView
where
    T: Clone + Send + Sync + 'static,
{
    let checkbox_state = Signal::derive(move || {
        let current_items = items.get();
        let sel = selected.get();

        if current_items.is_empty() {
            return CheckboxState::Unchecked;
        }

        let selected_count = current_items
            .iter()
            .filter(|&item| {
                let id = get_id.run(item.clone());
                sel.contains(&id)
            })
            .count();

        if selected_count == 0 {
            CheckboxState::Unchecked
        } else if selected_count == current_items.len() {
            CheckboxState::Checked
        } else {
            CheckboxState::Indeterminate
        }
    });

    let checkbox_ref = NodeRef::<leptos::html::Input>::new();

    // indeterminate выставляется только через DOM
    Effect::new(move |_| {
        if let Some(input) = checkbox_ref.get() {
            let state = checkbox_state.get();
            if let Some(input_el) = input.dyn_ref::<web_sys::HtmlInputElement>() {
                let is_indeterminate = matches!(state, CheckboxState::Indeterminate);
                input_el.set_indeterminate(is_indeterminate);
            }
        }
    });

    view! {
        <TableHeaderCell resizable=false class="fixed-checkbox-column">
            <input
                node_ref=checkbox_ref
                type="checkbox"
                class="table__checkbox"
                prop:checked=move || matches!(checkbox_state.get(), CheckboxState::Checked)
                on:change=move |ev| {
                    let checked = event_target_checked(&ev);
                    on_change.run(checked);
                }
            />
        </TableHeaderCell>
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum CheckboxState {
    Unchecked,
    Checked,
    Indeterminate,
}

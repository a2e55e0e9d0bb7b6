use std::rc::Rc;

use contracts::domain::a004_continent::aggregate::Continent;
use contracts::domain::common::AggregateRoot;
use contracts::shared::list_query::SortSpec;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a004_continent::ui::details::ContinentDetails;
use crate::shared::components::PaginationControls;
use crate::shared::data_access;
use crate::shared::export::{export_to_csv, CsvExportable};
use crate::shared::icons::icon;
use crate::shared::list_context::ListContext;
use crate::shared::list_utils::{get_sort_indicator, highlight_matches, SearchInput};

impl CsvExportable for Continent {
    fn headers() -> Vec<&'static str> {
        vec!["Код", "Название", "Код ISO", "Стран"]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.base.code.clone(),
            self.base.description.clone(),
            self.iso_code.clone(),
            self.country_count.to_string(),
        ]
    }
}

/// Справочник небольшой, фильтров кроме поиска нет
#[component]
pub fn ContinentList() -> impl IntoView {
    let ctx = ListContext::new(
        |c: &Continent| c.to_string_id(),
        SortSpec::asc("description"),
    );
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let (show_modal, set_show_modal) = signal(false);
    let (editing_id, set_editing_id) = signal::<Option<String>>(None);

    let load = move || {
        spawn_local(async move {
            set_loading.set(true);
            set_error.set(None);
            match data_access::fetch_collection::<Continent>(&Continent::api_path()).await {
                Ok(items) => ctx.set_rows(items),
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        if !ctx.is_loaded.get_untracked() {
            load();
        }
    });

    let open_details = move |id: Option<String>| {
        set_editing_id.set(id);
        set_show_modal.set(true);
    };

    let delete_selected = move || {
        let ids: Vec<String> = ctx.selected_ids.get_untracked().into_iter().collect();
        if ids.is_empty() {
            return;
        }
        let confirmed = web_sys::window()
            .map(|w| {
                w.confirm_with_message(&format!("Удалить выбранные элементы ({})?", ids.len()))
                    .unwrap_or(false)
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            if let Err(e) = data_access::remove_many(&Continent::api_path(), &ids).await {
                set_error.set(Some(e.to_string()));
            }
            ctx.clear_selection();
            load();
        });
    };

    let handle_export = move || {
        let rows = ctx.export_rows();
        if rows.is_empty() {
            if let Some(win) = web_sys::window() {
                let _ = win.alert_with_message("Нет данных для экспорта");
            }
            return;
        }
        if let Err(e) = export_to_csv(&rows, "континенты.csv") {
            if let Some(win) = web_sys::window() {
                let _ = win.alert_with_message(&format!("Ошибка экспорта: {}", e));
            }
        }
    };

    let selected_count = Signal::derive(move || ctx.selected_count());

    view! {
        <div class="page">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Континенты"</h1>
                    <span class="badge badge--primary">
                        {move || ctx.total_count.get().to_string()}
                    </span>
                </div>
                <div class="page__header-right">
                    <SearchInput
                        value=Signal::derive(move || ctx.search())
                        on_change=Callback::new(move |val: String| ctx.set_search(val))
                        placeholder="Поиск...".to_string()
                    />
                    <button class="btn btn-primary" on:click=move |_| open_details(None)>
                        {icon("plus")}
                        {"Добавить"}
                    </button>
                    <button class="btn btn-success" on:click=move |_| handle_export()>
                        {icon("excel")}
                        {"CSV"}
                    </button>
                    <button
                        class="btn btn-danger"
                        on:click=move |_| delete_selected()
                        disabled=move || selected_count.get() == 0
                    >
                        {icon("delete")}
                        {move || format!("Удалить ({})", selected_count.get())}
                    </button>
                    <button
                        class="btn btn-secondary"
                        on:click=move |_| load()
                        disabled=move || loading.get()
                    >
                        {icon("refresh")}
                        {"Обновить"}
                    </button>
                </div>
            </div>

            <div class="page__content">
                <div class="list-toolbar">
                    <PaginationControls
                        current_page=Signal::derive(move || ctx.page_index())
                        total_pages=Signal::derive(move || ctx.total_pages.get())
                        total_count=Signal::derive(move || ctx.total_count.get())
                        page_size=Signal::derive(move || ctx.page_size())
                        on_page_change=Callback::new(move |page| ctx.go_to_page(page))
                        on_page_size_change=Callback::new(move |size| ctx.set_page_size(size))
                    />
                </div>

                {move || error.get().map(|e| view! { <div class="error">{e}</div> })}

                <div class="table-container">
                    <table>
                        <thead>
                            <tr>
                                <th class="fixed-checkbox-column">
                                    <input
                                        type="checkbox"
                                        class="table__checkbox"
                                        prop:checked=move || {
                                            let items = ctx.page_items.get();
                                            !items.is_empty()
                                                && ctx.selected_ids.with(|s| {
                                                    items.iter().all(|i| s.contains(&i.to_string_id()))
                                                })
                                        }
                                        on:change=move |ev| ctx.toggle_all(event_target_checked(&ev))
                                    />
                                </th>
                                <th class="cursor-pointer user-select-none" on:click=move |_| ctx.toggle_sort("code") title="Сортировать">
                                    {move || format!("Код{}", get_sort_indicator(&ctx.sort_field(), "code", ctx.sort_ascending()))}
                                </th>
                                <th class="cursor-pointer user-select-none" on:click=move |_| ctx.toggle_sort("description") title="Сортировать">
                                    {move || format!("Название{}", get_sort_indicator(&ctx.sort_field(), "description", ctx.sort_ascending()))}
                                </th>
                                <th class="cursor-pointer user-select-none" on:click=move |_| ctx.toggle_sort("iso_code") title="Сортировать">
                                    {move || format!("Код ISO{}", get_sort_indicator(&ctx.sort_field(), "iso_code", ctx.sort_ascending()))}
                                </th>
                                <th class="cursor-pointer user-select-none" on:click=move |_| ctx.toggle_sort("country_count") title="Сортировать">
                                    {move || format!("Стран{}", get_sort_indicator(&ctx.sort_field(), "country_count", ctx.sort_ascending()))}
                                </th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                let current_filter = ctx.search();
                                ctx.page_items.get().into_iter().map(|item| {
                                    let id = item.to_string_id();
                                    let id_for_edit = id.clone();
                                    let id_for_checkbox = id.clone();
                                    view! {
                                        <tr on:click=move |_| open_details(Some(id_for_edit.clone()))>
                                            <td on:click=|e| e.stop_propagation()>
                                                <input
                                                    type="checkbox"
                                                    class="table__checkbox"
                                                    prop:checked={
                                                        let id = id.clone();
                                                        move || ctx.selected_ids.with(|s| s.contains(&id))
                                                    }
                                                    on:change=move |ev| {
                                                        ctx.toggle_selection(
                                                            id_for_checkbox.clone(),
                                                            event_target_checked(&ev),
                                                        )
                                                    }
                                                />
                                            </td>
                                            <td>{item.base.code.clone()}</td>
                                            <td>{highlight_matches(&item.base.description, &current_filter)}</td>
                                            <td>{item.iso_code.clone()}</td>
                                            <td style="font-variant-numeric: tabular-nums;">{item.country_count}</td>
                                        </tr>
                                    }
                                }).collect_view()
                            }}
                        </tbody>
                    </table>
                </div>
            </div>

            {move || if show_modal.get() {
                view! {
                    <div class="modal-overlay">
                        <div class="modal-content">
                            <ContinentDetails
                                id=editing_id.get()
                                on_saved=Rc::new(move |_| {
                                    set_show_modal.set(false);
                                    set_editing_id.set(None);
                                    load();
                                })
                                on_cancel=Rc::new(move |_| {
                                    set_show_modal.set(false);
                                    set_editing_id.set(None);
                                })
                            />
                        </div>
                    </div>
                }.into_any()
            } else {
                view! { <></> }.into_any()
            }}
        </div>
    }
}

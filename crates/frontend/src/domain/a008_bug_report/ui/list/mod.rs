use std::rc::Rc;

use contracts::domain::a008_bug_report::aggregate::BugReport;
use contracts::domain::common::AggregateRoot;
use contracts::shared::list_query::{distinct_values, FilterPredicate, SortSpec};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a008_bug_report::ui::details::BugReportDetails;
use crate::shared::components::{DateRangePicker, FilterPanel, PaginationControls};
use crate::shared::data_access;
use crate::shared::date_utils::format_date;
use crate::shared::export::{export_to_csv, CsvExportable};
use crate::shared::icons::icon;
use crate::shared::list_context::ListContext;
use crate::shared::list_utils::{get_sort_indicator, SearchInput};

impl CsvExportable for BugReport {
    fn headers() -> Vec<&'static str> {
        vec!["Код", "Дата", "Заголовок", "Модуль", "Важность", "Статус", "Автор"]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.base.code.clone(),
            self.reported_at.clone(),
            self.base.description.clone(),
            self.module.clone(),
            self.severity.clone(),
            self.status.clone(),
            self.reported_by.clone(),
        ]
    }
}

fn severity_badge_class(severity: &str) -> &'static str {
    match severity {
        "critical" => "badge badge--danger",
        "major" => "badge badge--warning",
        "minor" => "badge badge--neutral",
        _ => "badge",
    }
}

#[component]
pub fn BugReportList() -> impl IntoView {
    let ctx = ListContext::new(
        |b: &BugReport| b.to_string_id(),
        SortSpec::desc("reported_at"),
    );
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let is_filter_expanded = RwSignal::new(false);
    let (show_modal, set_show_modal) = signal(false);
    let (editing_id, set_editing_id) = signal::<Option<String>>(None);

    let (severity_filter, set_severity_filter) = signal(String::new());
    let (status_filter, set_status_filter) = signal(String::new());
    let (module_filter, set_module_filter) = signal(String::new());
    let (date_from, set_date_from) = signal(String::new());
    let (date_to, set_date_to) = signal(String::new());

    let load = move || {
        spawn_local(async move {
            set_loading.set(true);
            set_error.set(None);
            match data_access::fetch_collection::<BugReport>(&BugReport::api_path()).await {
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

    let severity_options =
        Signal::derive(move || distinct_values(&ctx.all_rows.get(), "severity"));
    let status_options = Signal::derive(move || distinct_values(&ctx.all_rows.get(), "status"));
    let module_options = Signal::derive(move || distinct_values(&ctx.all_rows.get(), "module"));

    let apply_severity = move |value: String| {
        set_severity_filter.set(value.clone());
        let selected: Vec<String> = if value.is_empty() { Vec::new() } else { vec![value] };
        ctx.set_filter("severity", FilterPredicate::in_set(selected));
    };

    let apply_status = move |value: String| {
        set_status_filter.set(value.clone());
        let selected: Vec<String> = if value.is_empty() { Vec::new() } else { vec![value] };
        ctx.set_filter("status", FilterPredicate::in_set(selected));
    };

    let apply_module = move |value: String| {
        set_module_filter.set(value.clone());
        let selected: Vec<String> = if value.is_empty() { Vec::new() } else { vec![value] };
        ctx.set_filter("module", FilterPredicate::in_set(selected));
    };

    let apply_dates = move |(from, to): (String, String)| {
        set_date_from.set(from.clone());
        set_date_to.set(to.clone());
        let from = (!from.is_empty()).then_some(from);
        let to = (!to.is_empty()).then_some(to);
        ctx.set_filter("reported_at", FilterPredicate::date_range(from, to));
    };

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
                w.confirm_with_message(&format!("Удалить выбранные баг-репорты ({})?", ids.len()))
                    .unwrap_or(false)
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            if let Err(e) = data_access::remove_many(&BugReport::api_path(), &ids).await {
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
        if let Err(e) = export_to_csv(&rows, "баг-репорты.csv") {
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
                    <h1 class="page__title">"Баг-репорты"</h1>
                    <span class="badge badge--primary">
                        {move || ctx.total_count.get().to_string()}
                    </span>
                </div>
                <div class="page__header-right">
                    <SearchInput
                        value=Signal::derive(move || ctx.search())
                        on_change=Callback::new(move |val: String| ctx.set_search(val))
                        placeholder="Поиск по баг-репортам...".to_string()
                    />
                    <button class="btn btn-primary" on:click=move |_| open_details(None)>
                        {icon("plus")}
                        {"Новый баг-репорт"}
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
                        {move || if loading.get() { "Загрузка..." } else { "Обновить" }}
                    </button>
                </div>
            </div>

            <div class="page__content">
                <FilterPanel
                    is_expanded=is_filter_expanded
                    active_filters_count=Signal::derive(move || ctx.active_filter_count())
                    pagination_controls=move || view! {
                        <PaginationControls
                            current_page=Signal::derive(move || ctx.page_index())
                            total_pages=Signal::derive(move || ctx.total_pages.get())
                            total_count=Signal::derive(move || ctx.total_count.get())
                            page_size=Signal::derive(move || ctx.page_size())
                            on_page_change=Callback::new(move |page| ctx.go_to_page(page))
                            on_page_size_change=Callback::new(move |size| ctx.set_page_size(size))
                        />
                    }.into_any()
                    filter_content=move || view! {
                        <div class="filter-row">
                            <div class="filter-field">
                                <label>"Важность:"</label>
                                <select
                                    class="form-control"
                                    prop:value=move || severity_filter.get()
                                    on:change=move |ev| apply_severity(event_target_value(&ev))
                                >
                                    <option value="">"Любая"</option>
                                    {move || severity_options.get().into_iter().map(|s| {
                                        view! { <option value={s.clone()}>{s.clone()}</option> }
                                    }).collect_view()}
                                </select>
                            </div>
                            <div class="filter-field">
                                <label>"Статус:"</label>
                                <select
                                    class="form-control"
                                    prop:value=move || status_filter.get()
                                    on:change=move |ev| apply_status(event_target_value(&ev))
                                >
                                    <option value="">"Все статусы"</option>
                                    {move || status_options.get().into_iter().map(|s| {
                                        view! { <option value={s.clone()}>{s.clone()}</option> }
                                    }).collect_view()}
                                </select>
                            </div>
                            <div class="filter-field">
                                <label>"Модуль:"</label>
                                <select
                                    class="form-control"
                                    prop:value=move || module_filter.get()
                                    on:change=move |ev| apply_module(event_target_value(&ev))
                                >
                                    <option value="">"Все модули"</option>
                                    {move || module_options.get().into_iter().map(|m| {
                                        view! { <option value={m.clone()}>{m.clone()}</option> }
                                    }).collect_view()}
                                </select>
                            </div>
                            <DateRangePicker
                                date_from=date_from
                                date_to=date_to
                                on_change=Callback::new(apply_dates)
                                label="Период:".to_string()
                            />
                        </div>
                    }.into_any()
                />

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
                                <th class="cursor-pointer user-select-none" on:click=move |_| ctx.toggle_sort("reported_at") title="Сортировать">
                                    {move || format!("Дата{}", get_sort_indicator(&ctx.sort_field(), "reported_at", ctx.sort_ascending()))}
                                </th>
                                <th class="cursor-pointer user-select-none" on:click=move |_| ctx.toggle_sort("description") title="Сортировать">
                                    {move || format!("Заголовок{}", get_sort_indicator(&ctx.sort_field(), "description", ctx.sort_ascending()))}
                                </th>
                                <th class="cursor-pointer user-select-none" on:click=move |_| ctx.toggle_sort("module") title="Сортировать">
                                    {move || format!("Модуль{}", get_sort_indicator(&ctx.sort_field(), "module", ctx.sort_ascending()))}
                                </th>
                                <th class="cursor-pointer user-select-none" on:click=move |_| ctx.toggle_sort("severity") title="Сортировать">
                                    {move || format!("Важность{}", get_sort_indicator(&ctx.sort_field(), "severity", ctx.sort_ascending()))}
                                </th>
                                <th class="cursor-pointer user-select-none" on:click=move |_| ctx.toggle_sort("status") title="Сортировать">
                                    {move || format!("Статус{}", get_sort_indicator(&ctx.sort_field(), "status", ctx.sort_ascending()))}
                                </th>
                                <th class="cursor-pointer user-select-none" on:click=move |_| ctx.toggle_sort("reported_by") title="Сортировать">
                                    {move || format!("Автор{}", get_sort_indicator(&ctx.sort_field(), "reported_by", ctx.sort_ascending()))}
                                </th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                ctx.page_items.get().into_iter().map(|item| {
                                    let id = item.to_string_id();
                                    let id_for_edit = id.clone();
                                    let id_for_checkbox = id.clone();
                                    let severity = item.severity.clone();
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
                                            <td>{format_date(&item.reported_at)}</td>
                                            <td>{item.base.description.clone()}</td>
                                            <td>{item.module.clone()}</td>
                                            <td>
                                                <span class=severity_badge_class(&severity)>
                                                    {if severity.is_empty() { "—".to_string() } else { severity.clone() }}
                                                </span>
                                            </td>
                                            <td>{item.status.clone()}</td>
                                            <td>{item.reported_by.clone()}</td>
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
                            <BugReportDetails
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

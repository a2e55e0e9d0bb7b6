use std::rc::Rc;

use contracts::domain::a005_job_application::aggregate::JobApplication;
use contracts::domain::common::AggregateRoot;
use contracts::shared::list_query::{distinct_values, FilterPredicate, SortSpec};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a005_job_application::ui::details::JobApplicationDetails;
use crate::shared::components::{DateRangePicker, FilterPanel, PaginationControls};
use crate::shared::data_access;
use crate::shared::date_utils::format_date;
use crate::shared::export::{export_to_csv, CsvExportable};
use crate::shared::icons::icon;
use crate::shared::list_context::ListContext;
use crate::shared::list_utils::{get_sort_indicator, SearchInput};

impl CsvExportable for JobApplication {
    fn headers() -> Vec<&'static str> {
        vec!["Код", "Соискатель", "Email", "Вакансия", "Дата отклика", "Статус"]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.base.code.clone(),
            self.applicant_name.clone(),
            self.email.clone(),
            self.position.clone(),
            self.applied_at.clone(),
            self.status.clone(),
        ]
    }
}

#[component]
pub fn JobApplicationList() -> impl IntoView {
    let ctx = ListContext::new(
        |a: &JobApplication| a.to_string_id(),
        SortSpec::desc("applied_at"),
    );
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let is_filter_expanded = RwSignal::new(false);
    let (show_modal, set_show_modal) = signal(false);
    let (editing_id, set_editing_id) = signal::<Option<String>>(None);

    let (status_filter, set_status_filter) = signal(String::new());
    let (position_filter, set_position_filter) = signal(String::new());
    let (date_from, set_date_from) = signal(String::new());
    let (date_to, set_date_to) = signal(String::new());

    let load = move || {
        spawn_local(async move {
            set_loading.set(true);
            set_error.set(None);
            match data_access::fetch_collection::<JobApplication>(&JobApplication::api_path())
                .await
            {
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

    let status_options = Signal::derive(move || distinct_values(&ctx.all_rows.get(), "status"));
    let position_options =
        Signal::derive(move || distinct_values(&ctx.all_rows.get(), "position"));

    let apply_status = move |value: String| {
        set_status_filter.set(value.clone());
        let selected: Vec<String> = if value.is_empty() { Vec::new() } else { vec![value] };
        ctx.set_filter("status", FilterPredicate::in_set(selected));
    };

    let apply_position = move |value: String| {
        set_position_filter.set(value.clone());
        let selected: Vec<String> = if value.is_empty() { Vec::new() } else { vec![value] };
        ctx.set_filter("position", FilterPredicate::in_set(selected));
    };

    let apply_dates = move |(from, to): (String, String)| {
        set_date_from.set(from.clone());
        set_date_to.set(to.clone());
        let from = (!from.is_empty()).then_some(from);
        let to = (!to.is_empty()).then_some(to);
        ctx.set_filter("applied_at", FilterPredicate::date_range(from, to));
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
                w.confirm_with_message(&format!("Удалить выбранные отклики ({})?", ids.len()))
                    .unwrap_or(false)
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            if let Err(e) = data_access::remove_many(&JobApplication::api_path(), &ids).await {
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
        if let Err(e) = export_to_csv(&rows, "отклики.csv") {
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
                    <h1 class="page__title">"Отклики на вакансии"</h1>
                    <span class="badge badge--primary">
                        {move || ctx.total_count.get().to_string()}
                    </span>
                </div>
                <div class="page__header-right">
                    <SearchInput
                        value=Signal::derive(move || ctx.search())
                        on_change=Callback::new(move |val: String| ctx.set_search(val))
                        placeholder="Поиск по откликам...".to_string()
                    />
                    <button class="btn btn-primary" on:click=move |_| open_details(None)>
                        {icon("plus")}
                        {"Новый отклик"}
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
                                <label>"Вакансия:"</label>
                                <select
                                    class="form-control"
                                    prop:value=move || position_filter.get()
                                    on:change=move |ev| apply_position(event_target_value(&ev))
                                >
                                    <option value="">"Все вакансии"</option>
                                    {move || position_options.get().into_iter().map(|p| {
                                        view! { <option value={p.clone()}>{p.clone()}</option> }
                                    }).collect_view()}
                                </select>
                            </div>
                            <DateRangePicker
                                date_from=date_from
                                date_to=date_to
                                on_change=Callback::new(apply_dates)
                                label="Отклик:".to_string()
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
                                <th class="cursor-pointer user-select-none" on:click=move |_| ctx.toggle_sort("applied_at") title="Сортировать">
                                    {move || format!("Дата{}", get_sort_indicator(&ctx.sort_field(), "applied_at", ctx.sort_ascending()))}
                                </th>
                                <th class="cursor-pointer user-select-none" on:click=move |_| ctx.toggle_sort("applicant_name") title="Сортировать">
                                    {move || format!("Соискатель{}", get_sort_indicator(&ctx.sort_field(), "applicant_name", ctx.sort_ascending()))}
                                </th>
                                <th class="cursor-pointer user-select-none" on:click=move |_| ctx.toggle_sort("email") title="Сортировать">
                                    {move || format!("Email{}", get_sort_indicator(&ctx.sort_field(), "email", ctx.sort_ascending()))}
                                </th>
                                <th class="cursor-pointer user-select-none" on:click=move |_| ctx.toggle_sort("position") title="Сортировать">
                                    {move || format!("Вакансия{}", get_sort_indicator(&ctx.sort_field(), "position", ctx.sort_ascending()))}
                                </th>
                                <th class="cursor-pointer user-select-none" on:click=move |_| ctx.toggle_sort("status") title="Сортировать">
                                    {move || format!("Статус{}", get_sort_indicator(&ctx.sort_field(), "status", ctx.sort_ascending()))}
                                </th>
                                <th>{"Резюме"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                ctx.page_items.get().into_iter().map(|item| {
                                    let id = item.to_string_id();
                                    let id_for_edit = id.clone();
                                    let id_for_checkbox = id.clone();
                                    let resume = item.resume_url.clone();
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
                                            <td>{format_date(&item.applied_at)}</td>
                                            <td>{item.applicant_name.clone()}</td>
                                            <td>{item.email.clone()}</td>
                                            <td>{item.position.clone()}</td>
                                            <td>{item.status.clone()}</td>
                                            <td on:click=|e| e.stop_propagation()>
                                                {match resume {
                                                    Some(url) => view! {
                                                        <a href={url} target="_blank" class="table__link">
                                                            {"Открыть"}
                                                        </a>
                                                    }.into_any(),
                                                    None => view! { <span>{"—"}</span> }.into_any(),
                                                }}
                                            </td>
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
                            <JobApplicationDetails
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

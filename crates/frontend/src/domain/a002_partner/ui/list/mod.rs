use std::rc::Rc;

use contracts::domain::a002_partner::aggregate::Partner;
use contracts::domain::common::AggregateRoot;
use contracts::shared::list_query::{distinct_values, FilterPredicate, SortSpec};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a002_partner::ui::details::PartnerDetails;
use crate::shared::components::{DateRangePicker, FilterPanel, FilterTag, PaginationControls};
use crate::shared::data_access;
use crate::shared::date_utils::format_date;
use crate::shared::export::{export_to_csv, CsvExportable};
use crate::shared::icons::icon;
use crate::shared::list_context::ListContext;
use crate::shared::list_utils::{get_sort_indicator, highlight_matches, SearchInput};

impl CsvExportable for Partner {
    fn headers() -> Vec<&'static str> {
        vec![
            "Код",
            "Название",
            "Контактное лицо",
            "Email",
            "Телефон",
            "Страна",
            "KYC",
            "Тип",
            "Дата регистрации",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.base.code.clone(),
            self.base.description.clone(),
            self.contact_person.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.country.clone(),
            self.kyc_status.clone(),
            self.partner_type.clone(),
            self.registered_at.clone(),
        ]
    }
}

/// Бейдж KYC: сырое значение API, известные подсвечиваем
fn kyc_badge_class(status: &str) -> &'static str {
    match status {
        "verified" => "badge badge--success",
        "pending" => "badge badge--warning",
        "rejected" => "badge badge--danger",
        _ => "badge",
    }
}

#[component]
pub fn PartnerList() -> impl IntoView {
    let ctx = ListContext::new(
        |p: &Partner| p.to_string_id(),
        SortSpec::asc("description"),
    );
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let is_filter_expanded = RwSignal::new(false);
    let (show_modal, set_show_modal) = signal(false);
    let (editing_id, set_editing_id) = signal::<Option<String>>(None);

    let (kyc_filter, set_kyc_filter) = signal(String::new());
    let (country_filter, set_country_filter) = signal(String::new());
    let (date_from, set_date_from) = signal(String::new());
    let (date_to, set_date_to) = signal(String::new());

    let load = move || {
        spawn_local(async move {
            set_loading.set(true);
            set_error.set(None);
            match data_access::fetch_collection::<Partner>(&Partner::api_path()).await {
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

    let kyc_options = Signal::derive(move || distinct_values(&ctx.all_rows.get(), "kyc_status"));
    let country_options = Signal::derive(move || distinct_values(&ctx.all_rows.get(), "country"));

    let apply_kyc = move |value: String| {
        set_kyc_filter.set(value.clone());
        let selected: Vec<String> = if value.is_empty() { Vec::new() } else { vec![value] };
        ctx.set_filter("kyc_status", FilterPredicate::in_set(selected));
    };

    let apply_country = move |value: String| {
        set_country_filter.set(value.clone());
        let selected: Vec<String> = if value.is_empty() { Vec::new() } else { vec![value] };
        ctx.set_filter("country", FilterPredicate::in_set(selected));
    };

    let apply_dates = move |(from, to): (String, String)| {
        set_date_from.set(from.clone());
        set_date_to.set(to.clone());
        let from = (!from.is_empty()).then_some(from);
        let to = (!to.is_empty()).then_some(to);
        ctx.set_filter("registered_at", FilterPredicate::date_range(from, to));
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
                w.confirm_with_message(&format!("Удалить выбранных партнёров ({})?", ids.len()))
                    .unwrap_or(false)
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            if let Err(e) = data_access::remove_many(&Partner::api_path(), &ids).await {
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
        if let Err(e) = export_to_csv(&rows, "партнёры.csv") {
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
                    <h1 class="page__title">"Партнёры"</h1>
                    <span class="badge badge--primary">
                        {move || ctx.total_count.get().to_string()}
                    </span>
                </div>
                <div class="page__header-right">
                    <SearchInput
                        value=Signal::derive(move || ctx.search())
                        on_change=Callback::new(move |val: String| ctx.set_search(val))
                        placeholder="Поиск по партнёрам...".to_string()
                    />
                    <button class="btn btn-primary" on:click=move |_| open_details(None)>
                        {icon("plus")}
                        {"Новый партнёр"}
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
                                <label>"KYC:"</label>
                                <select
                                    class="form-control"
                                    prop:value=move || kyc_filter.get()
                                    on:change=move |ev| apply_kyc(event_target_value(&ev))
                                >
                                    <option value="">"Все статусы"</option>
                                    {move || kyc_options.get().into_iter().map(|s| {
                                        view! { <option value={s.clone()}>{s.clone()}</option> }
                                    }).collect_view()}
                                </select>
                            </div>
                            <div class="filter-field">
                                <label>"Страна:"</label>
                                <select
                                    class="form-control"
                                    prop:value=move || country_filter.get()
                                    on:change=move |ev| apply_country(event_target_value(&ev))
                                >
                                    <option value="">"Все страны"</option>
                                    {move || country_options.get().into_iter().map(|c| {
                                        view! { <option value={c.clone()}>{c.clone()}</option> }
                                    }).collect_view()}
                                </select>
                            </div>
                            <DateRangePicker
                                date_from=date_from
                                date_to=date_to
                                on_change=Callback::new(apply_dates)
                                label="Регистрация:".to_string()
                            />
                        </div>
                    }.into_any()
                    filter_tags=move || view! {
                        <div class="filter-tags">
                            {move || {
                                let kyc = kyc_filter.get();
                                (!kyc.is_empty()).then(|| view! {
                                    <FilterTag
                                        label=format!("KYC: {}", kyc)
                                        on_remove=Callback::new(move |_| apply_kyc(String::new()))
                                    />
                                })
                            }}
                            {move || {
                                let country = country_filter.get();
                                (!country.is_empty()).then(|| view! {
                                    <FilterTag
                                        label=format!("Страна: {}", country)
                                        on_remove=Callback::new(move |_| apply_country(String::new()))
                                    />
                                })
                            }}
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
                                <th class="cursor-pointer user-select-none" on:click=move |_| ctx.toggle_sort("code") title="Сортировать">
                                    {move || format!("Код{}", get_sort_indicator(&ctx.sort_field(), "code", ctx.sort_ascending()))}
                                </th>
                                <th class="cursor-pointer user-select-none" on:click=move |_| ctx.toggle_sort("description") title="Сортировать">
                                    {move || format!("Название{}", get_sort_indicator(&ctx.sort_field(), "description", ctx.sort_ascending()))}
                                </th>
                                <th class="cursor-pointer user-select-none" on:click=move |_| ctx.toggle_sort("contact_person") title="Сортировать">
                                    {move || format!("Контактное лицо{}", get_sort_indicator(&ctx.sort_field(), "contact_person", ctx.sort_ascending()))}
                                </th>
                                <th class="cursor-pointer user-select-none" on:click=move |_| ctx.toggle_sort("email") title="Сортировать">
                                    {move || format!("Email{}", get_sort_indicator(&ctx.sort_field(), "email", ctx.sort_ascending()))}
                                </th>
                                <th class="cursor-pointer user-select-none" on:click=move |_| ctx.toggle_sort("country") title="Сортировать">
                                    {move || format!("Страна{}", get_sort_indicator(&ctx.sort_field(), "country", ctx.sort_ascending()))}
                                </th>
                                <th class="cursor-pointer user-select-none" on:click=move |_| ctx.toggle_sort("kyc_status") title="Сортировать">
                                    {move || format!("KYC{}", get_sort_indicator(&ctx.sort_field(), "kyc_status", ctx.sort_ascending()))}
                                </th>
                                <th class="cursor-pointer user-select-none" on:click=move |_| ctx.toggle_sort("registered_at") title="Сортировать">
                                    {move || format!("Регистрация{}", get_sort_indicator(&ctx.sort_field(), "registered_at", ctx.sort_ascending()))}
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
                                    let kyc = item.kyc_status.clone();
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
                                            <td>{highlight_matches(&item.base.code, &current_filter)}</td>
                                            <td>{highlight_matches(&item.base.description, &current_filter)}</td>
                                            <td>{highlight_matches(&item.contact_person, &current_filter)}</td>
                                            <td>{highlight_matches(&item.email, &current_filter)}</td>
                                            <td>{item.country.clone()}</td>
                                            <td>
                                                <span class=kyc_badge_class(&kyc)>
                                                    {if kyc.is_empty() { "—".to_string() } else { kyc.clone() }}
                                                </span>
                                            </td>
                                            <td>{format_date(&item.registered_at)}</td>
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
                            <PartnerDetails
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

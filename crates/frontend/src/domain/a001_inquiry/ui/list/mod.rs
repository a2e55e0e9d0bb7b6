use std::rc::Rc;

use contracts::domain::a001_inquiry::aggregate::Inquiry;
use contracts::domain::common::AggregateRoot;
use contracts::shared::list_query::{distinct_values, FilterPredicate, SortSpec};
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_inquiry::ui::details::InquiryDetails;
use crate::shared::components::table::{
    SortableHeaderCell, TableCellCheckbox, TableHeaderCheckbox,
};
use crate::shared::components::{DateRangePicker, FilterPanel, PaginationControls};
use crate::shared::data_access;
use crate::shared::date_utils::format_date;
use crate::shared::export::{export_to_csv, CsvExportable};
use crate::shared::list_context::ListContext;
use crate::shared::list_utils::SearchInput;

impl CsvExportable for Inquiry {
    fn headers() -> Vec<&'static str> {
        vec![
            "Код",
            "Дата",
            "Тема",
            "Контактное лицо",
            "Компания",
            "Email",
            "Страна",
            "Статус",
            "Источник",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.base.code.clone(),
            self.inquiry_date.clone(),
            self.base.description.clone(),
            self.contact_person_name.clone(),
            self.company_name.clone(),
            self.email.clone(),
            self.country.clone(),
            self.status.clone(),
            self.source.clone(),
        ]
    }
}

/// Бейдж статуса: известные значения подсвечиваем, остальные выводим
/// как есть
fn status_badge_class(status: &str) -> &'static str {
    match status {
        "new" => "badge badge--primary",
        "in_progress" => "badge badge--warning",
        "converted" => "badge badge--success",
        "closed" => "badge badge--neutral",
        _ => "badge",
    }
}

#[component]
pub fn InquiryList() -> impl IntoView {
    let ctx = ListContext::new(
        |i: &Inquiry| i.to_string_id(),
        SortSpec::desc("inquiry_date"),
    );
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let is_filter_expanded = RwSignal::new(false);
    let (show_modal, set_show_modal) = signal(false);
    let (editing_id, set_editing_id) = signal::<Option<String>>(None);

    // Локальные значения контролов фильтров (сам отбор живёт в QuerySpec)
    let (status_filter, set_status_filter) = signal(String::new());
    let (country_filter, set_country_filter) = signal(String::new());
    let (date_from, set_date_from) = signal(String::new());
    let (date_to, set_date_to) = signal(String::new());

    let load = move || {
        spawn_local(async move {
            set_loading.set(true);
            set_error.set(None);
            match data_access::fetch_collection::<Inquiry>(&Inquiry::api_path()).await {
                Ok(items) => {
                    log!("Loaded {} inquiries", items.len());
                    ctx.set_rows(items);
                }
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

    // Варианты для выпадающих списков — по полной коллекции, чтобы
    // выбор одного значения не прятал остальные
    let status_options =
        Signal::derive(move || distinct_values(&ctx.all_rows.get(), "status"));
    let country_options =
        Signal::derive(move || distinct_values(&ctx.all_rows.get(), "country"));

    let apply_status = move |value: String| {
        set_status_filter.set(value.clone());
        let selected: Vec<String> = if value.is_empty() { Vec::new() } else { vec![value] };
        ctx.set_filter("status", FilterPredicate::in_set(selected));
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
        ctx.set_filter("inquiry_date", FilterPredicate::date_range(from, to));
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
                w.confirm_with_message(&format!("Удалить выбранные обращения ({})?", ids.len()))
                    .unwrap_or(false)
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            if let Err(e) = data_access::remove_many(&Inquiry::api_path(), &ids).await {
                set_error.set(Some(e.to_string()));
            }
            ctx.clear_selection();
            // Перечитываем каноническую коллекцию вместо локальной правки
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
        if let Err(e) = export_to_csv(&rows, "обращения.csv") {
            if let Some(win) = web_sys::window() {
                let _ = win.alert_with_message(&format!("Ошибка экспорта: {}", e));
            }
        }
    };

    let sort_field = Signal::derive(move || ctx.sort_field());
    let sort_ascending = Signal::derive(move || ctx.sort_ascending());
    let on_sort = Callback::new(move |field: String| ctx.toggle_sort(&field));
    let page_items = Signal::derive(move || ctx.page_items.get());
    let selected = Signal::derive(move || ctx.selected_ids.get());
    let selected_count = Signal::derive(move || ctx.selected_count());
    let active_filters_count = Signal::derive(move || ctx.active_filter_count());

    view! {
        <div class="page">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Обращения"</h1>
                    <span class="badge badge--primary">
                        {move || ctx.total_count.get().to_string()}
                    </span>
                </div>
                <div class="page__header-right">
                    <SearchInput
                        value=Signal::derive(move || ctx.search())
                        on_change=Callback::new(move |val: String| ctx.set_search(val))
                        placeholder="Поиск по обращениям...".to_string()
                    />
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| open_details(None)
                    >
                        "Новое обращение"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| handle_export()
                    >
                        "CSV"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| delete_selected()
                        disabled=Signal::derive(move || selected_count.get() == 0)
                    >
                        {move || format!("Удалить ({})", selected_count.get())}
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| load()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {move || if loading.get() { "Загрузка..." } else { "Обновить" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <FilterPanel
                    is_expanded=is_filter_expanded
                    active_filters_count=active_filters_count
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
                        <Flex gap=FlexGap::Small align=FlexAlign::End>
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
                                label="Период:".to_string()
                            />
                        </Flex>
                    }.into_any()
                />

                {move || error.get().map(|err| view! {
                    <div class="alert alert--error">{err}</div>
                })}

                <div class="table-wrapper">
                    <Table attr:style="width: 100%; min-width: 1100px;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCheckbox
                                    items=page_items
                                    selected=selected
                                    get_id=Callback::new(|row: Inquiry| row.to_string_id())
                                    on_change=Callback::new(move |check_all| ctx.toggle_all(check_all))
                                />
                                <SortableHeaderCell
                                    label="Дата"
                                    sort_field="inquiry_date"
                                    current_sort_field=sort_field
                                    sort_ascending=sort_ascending
                                    on_sort=on_sort
                                    min_width=110.0
                                />
                                <SortableHeaderCell
                                    label="Код"
                                    sort_field="code"
                                    current_sort_field=sort_field
                                    sort_ascending=sort_ascending
                                    on_sort=on_sort
                                    min_width=110.0
                                />
                                <SortableHeaderCell
                                    label="Тема"
                                    sort_field="description"
                                    current_sort_field=sort_field
                                    sort_ascending=sort_ascending
                                    on_sort=on_sort
                                    min_width=220.0
                                />
                                <SortableHeaderCell
                                    label="Контактное лицо"
                                    sort_field="contact_person_name"
                                    current_sort_field=sort_field
                                    sort_ascending=sort_ascending
                                    on_sort=on_sort
                                    min_width=170.0
                                />
                                <SortableHeaderCell
                                    label="Компания"
                                    sort_field="company_name"
                                    current_sort_field=sort_field
                                    sort_ascending=sort_ascending
                                    on_sort=on_sort
                                    min_width=160.0
                                />
                                <SortableHeaderCell
                                    label="Страна"
                                    sort_field="country"
                                    current_sort_field=sort_field
                                    sort_ascending=sort_ascending
                                    on_sort=on_sort
                                    min_width=120.0
                                />
                                <SortableHeaderCell
                                    label="Статус"
                                    sort_field="status"
                                    current_sort_field=sort_field
                                    sort_ascending=sort_ascending
                                    on_sort=on_sort
                                    min_width=120.0
                                />
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            <For
                                each=move || ctx.page_items.get()
                                key=|item| item.to_string_id()
                                children=move |item| {
                                    let item_id = item.to_string_id();
                                    let item_id_for_click = item_id.clone();
                                    let formatted_date = format_date(&item.inquiry_date);
                                    let status = item.status.clone();
                                    view! {
                                        <TableRow>
                                            <TableCellCheckbox
                                                item_id=item_id.clone()
                                                selected=selected
                                                on_change=Callback::new(move |(id, checked)| {
                                                    ctx.toggle_selection(id, checked)
                                                })
                                            />
                                            <TableCell>
                                                <TableCellLayout>
                                                    <a href="#" class="table__link"
                                                        on:click=move |e| {
                                                            e.prevent_default();
                                                            open_details(Some(item_id_for_click.clone()));
                                                        }
                                                    >
                                                        {formatted_date}
                                                    </a>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{item.base.code.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {item.base.description.clone()}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {item.contact_person_name.clone()}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {item.company_name.clone()}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{item.country.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span class=status_badge_class(&status)>
                                                        {if status.is_empty() { "—".to_string() } else { status.clone() }}
                                                    </span>
                                                </TableCellLayout>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>
            </div>

            {move || if show_modal.get() {
                view! {
                    <div class="modal-overlay">
                        <div class="modal-content">
                            <InquiryDetails
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

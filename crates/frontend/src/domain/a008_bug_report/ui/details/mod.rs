use std::rc::Rc;

use contracts::domain::a008_bug_report::aggregate::{BugReport, BugReportDto, FORM_RULES};
use contracts::domain::common::AggregateRoot;
use contracts::shared::metadata::{validate_form, FormValue};
use leptos::prelude::*;

use crate::shared::data_access;
use crate::shared::icons::icon;

fn to_dto(aggregate: BugReport) -> BugReportDto {
    BugReportDto {
        id: Some(aggregate.to_string_id()),
        code: Some(aggregate.base.code),
        description: aggregate.base.description,
        module: aggregate.module,
        severity: aggregate.severity,
        status: aggregate.status,
        reported_by: aggregate.reported_by,
        reported_at: aggregate.reported_at,
        comment: aggregate.base.comment,
    }
}

fn validate(dto: &BugReportDto) -> Result<(), String> {
    validate_form(FORM_RULES, |field| match field {
        "description" => Some(FormValue::Text(dto.description.as_str())),
        "module" => Some(FormValue::Text(dto.module.as_str())),
        "reported_by" => Some(FormValue::Text(dto.reported_by.as_str())),
        _ => None,
    })
}

#[component]
pub fn BugReportDetails(
    id: Option<String>,
    on_saved: Rc<dyn Fn(())>,
    on_cancel: Rc<dyn Fn(())>,
) -> impl IntoView {
    let form = RwSignal::new(BugReportDto::default());
    let error = RwSignal::new(None::<String>);

    if let Some(existing_id) = id {
        wasm_bindgen_futures::spawn_local(async move {
            match data_access::fetch_by_id::<BugReport>(&BugReport::api_path(), &existing_id).await
            {
                Ok(aggregate) => form.set(to_dto(aggregate)),
                Err(e) => error.set(Some(format!("Ошибка загрузки: {}", e))),
            }
        });
    }

    let save = {
        let on_saved = on_saved.clone();
        move |_| {
            let current = form.get();
            if let Err(message) = validate(&current) {
                error.set(Some(message));
                return;
            }
            let on_saved = on_saved.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = match current.id.clone() {
                    Some(id) => {
                        data_access::update::<BugReport, _>(&BugReport::api_path(), &id, &current)
                            .await
                    }
                    None => {
                        data_access::create::<BugReport, _>(&BugReport::api_path(), &current).await
                    }
                };
                match result {
                    Ok(_) => (on_saved)(()),
                    Err(e) => error.set(Some(format!("Ошибка сохранения: {}", e))),
                }
            });
        }
    };

    let is_edit = move || form.get().id.is_some();

    view! {
        <div class="details-container bug-report-details">
            <div class="details-header">
                <h3>
                    {move || if is_edit() { "Редактирование баг-репорта" } else { "Новый баг-репорт" }}
                </h3>
            </div>

            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="details-form">
                <div class="form-group">
                    <label for="description">{"Заголовок"}</label>
                    <input
                        type="text"
                        id="description"
                        prop:value=move || form.get().description
                        on:input=move |ev| {
                            form.update(|f| f.description = event_target_value(&ev));
                        }
                        placeholder="Что сломалось"
                    />
                </div>

                <div class="form-group">
                    <label for="module">{"Модуль"}</label>
                    <input
                        type="text"
                        id="module"
                        prop:value=move || form.get().module
                        on:input=move |ev| {
                            form.update(|f| f.module = event_target_value(&ev));
                        }
                        placeholder="Страница или раздел консоли"
                    />
                </div>

                <div class="form-group">
                    <label for="severity">{"Важность"}</label>
                    <select
                        id="severity"
                        class="form-control"
                        prop:value=move || form.get().severity
                        on:change=move |ev| {
                            form.update(|f| f.severity = event_target_value(&ev));
                        }
                    >
                        <option value="">{"—"}</option>
                        <option value="minor">{"minor"}</option>
                        <option value="major">{"major"}</option>
                        <option value="critical">{"critical"}</option>
                    </select>
                </div>

                <div class="form-group">
                    <label for="status">{"Статус"}</label>
                    <input
                        type="text"
                        id="status"
                        prop:value=move || form.get().status
                        on:input=move |ev| {
                            form.update(|f| f.status = event_target_value(&ev));
                        }
                    />
                </div>

                <div class="form-group">
                    <label for="reported_by">{"Автор"}</label>
                    <input
                        type="text"
                        id="reported_by"
                        prop:value=move || form.get().reported_by
                        on:input=move |ev| {
                            form.update(|f| f.reported_by = event_target_value(&ev));
                        }
                    />
                </div>

                <div class="form-group">
                    <label for="reported_at">{"Дата регистрации"}</label>
                    <input
                        type="date"
                        id="reported_at"
                        prop:value=move || form.get().reported_at
                        on:change=move |ev| {
                            form.update(|f| f.reported_at = event_target_value(&ev));
                        }
                    />
                </div>

                <div class="form-group">
                    <label for="comment">{"Комментарий"}</label>
                    <textarea
                        id="comment"
                        prop:value=move || form.get().comment.clone().unwrap_or_default()
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| {
                                f.comment = if value.is_empty() { None } else { Some(value) };
                            });
                        }
                        placeholder="Шаги воспроизведения"
                        rows="4"
                    />
                </div>
            </div>

            <div class="details-actions">
                <button class="btn btn-primary" on:click=save>
                    {icon("save")}
                    {move || if is_edit() { "Сохранить" } else { "Создать" }}
                </button>
                <button class="btn btn-secondary" on:click=move |_| (on_cancel)(())>
                    {icon("cancel")}
                    {"Отмена"}
                </button>
            </div>
        </div>
    }
}

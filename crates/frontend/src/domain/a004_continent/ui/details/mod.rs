use std::rc::Rc;

use contracts::domain::a004_continent::aggregate::{Continent, ContinentDto, FORM_RULES};
use contracts::domain::common::AggregateRoot;
use contracts::shared::metadata::{validate_form, FormValue};
use leptos::prelude::*;

use crate::shared::data_access;
use crate::shared::icons::icon;

fn to_dto(aggregate: Continent) -> ContinentDto {
    ContinentDto {
        id: Some(aggregate.to_string_id()),
        code: Some(aggregate.base.code),
        description: aggregate.base.description,
        iso_code: aggregate.iso_code,
        country_count: Some(aggregate.country_count),
        comment: aggregate.base.comment,
    }
}

fn validate(dto: &ContinentDto) -> Result<(), String> {
    validate_form(FORM_RULES, |field| match field {
        "description" => Some(FormValue::Text(dto.description.as_str())),
        "iso_code" => Some(FormValue::Text(dto.iso_code.as_str())),
        _ => None,
    })
}

#[component]
pub fn ContinentDetails(
    id: Option<String>,
    on_saved: Rc<dyn Fn(())>,
    on_cancel: Rc<dyn Fn(())>,
) -> impl IntoView {
    let form = RwSignal::new(ContinentDto::default());
    let error = RwSignal::new(None::<String>);

    if let Some(existing_id) = id {
        wasm_bindgen_futures::spawn_local(async move {
            match data_access::fetch_by_id::<Continent>(&Continent::api_path(), &existing_id).await
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
                        data_access::update::<Continent, _>(&Continent::api_path(), &id, &current)
                            .await
                    }
                    None => {
                        data_access::create::<Continent, _>(&Continent::api_path(), &current).await
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
        <div class="details-container continent-details">
            <div class="details-header">
                <h3>
                    {move || if is_edit() { "Редактирование континента" } else { "Новый континент" }}
                </h3>
            </div>

            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="details-form">
                <div class="form-group">
                    <label for="description">{"Название"}</label>
                    <input
                        type="text"
                        id="description"
                        prop:value=move || form.get().description
                        on:input=move |ev| {
                            form.update(|f| f.description = event_target_value(&ev));
                        }
                    />
                </div>

                <div class="form-group">
                    <label for="iso_code">{"Код ISO"}</label>
                    <input
                        type="text"
                        id="iso_code"
                        maxlength="2"
                        prop:value=move || form.get().iso_code
                        on:input=move |ev| {
                            form.update(|f| f.iso_code = event_target_value(&ev));
                        }
                        placeholder="EU, AS, ..."
                    />
                </div>

                <div class="form-group">
                    <label for="country_count">{"Количество стран"}</label>
                    <input
                        type="number"
                        id="country_count"
                        prop:value=move || {
                            form.get().country_count.map(|c| c.to_string()).unwrap_or_default()
                        }
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.country_count = value.parse().ok());
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
                        rows="3"
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

use std::rc::Rc;

use contracts::domain::a007_wall_listing::aggregate::{WallListing, WallListingDto, FORM_RULES};
use contracts::domain::common::AggregateRoot;
use contracts::shared::metadata::{validate_form, FormValue};
use leptos::prelude::*;

use crate::shared::data_access;
use crate::shared::icons::icon;

fn to_dto(aggregate: WallListing) -> WallListingDto {
    WallListingDto {
        id: Some(aggregate.to_string_id()),
        code: Some(aggregate.base.code),
        description: aggregate.base.description,
        category: aggregate.category,
        price: Some(aggregate.price),
        currency: if aggregate.currency.is_empty() {
            None
        } else {
            Some(aggregate.currency)
        },
        city: if aggregate.city.is_empty() {
            None
        } else {
            Some(aggregate.city)
        },
        status: aggregate.status,
        published_at: aggregate.published_at,
        comment: aggregate.base.comment,
    }
}

fn validate(dto: &WallListingDto) -> Result<(), String> {
    validate_form(FORM_RULES, |field| match field {
        "description" => Some(FormValue::Text(dto.description.as_str())),
        "category" => Some(FormValue::Text(dto.category.as_str())),
        "price" => dto.price.map(FormValue::Number),
        _ => None,
    })
}

#[component]
pub fn WallListingDetails(
    id: Option<String>,
    on_saved: Rc<dyn Fn(())>,
    on_cancel: Rc<dyn Fn(())>,
) -> impl IntoView {
    let form = RwSignal::new(WallListingDto::default());
    let error = RwSignal::new(None::<String>);

    if let Some(existing_id) = id {
        wasm_bindgen_futures::spawn_local(async move {
            match data_access::fetch_by_id::<WallListing>(&WallListing::api_path(), &existing_id)
                .await
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
                        data_access::update::<WallListing, _>(
                            &WallListing::api_path(),
                            &id,
                            &current,
                        )
                        .await
                    }
                    None => {
                        data_access::create::<WallListing, _>(&WallListing::api_path(), &current)
                            .await
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
        <div class="details-container wall-listing-details">
            <div class="details-header">
                <h3>
                    {move || if is_edit() { "Редактирование объявления" } else { "Новое объявление" }}
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
                    />
                </div>

                <div class="form-group">
                    <label for="category">{"Категория"}</label>
                    <input
                        type="text"
                        id="category"
                        prop:value=move || form.get().category
                        on:input=move |ev| {
                            form.update(|f| f.category = event_target_value(&ev));
                        }
                    />
                </div>

                <div class="form-group">
                    <label for="price">{"Цена"}</label>
                    <input
                        type="number"
                        id="price"
                        step="0.01"
                        prop:value=move || {
                            form.get().price.map(|p| p.to_string()).unwrap_or_default()
                        }
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.price = value.parse().ok());
                        }
                    />
                </div>

                <div class="form-group">
                    <label for="currency">{"Валюта"}</label>
                    <input
                        type="text"
                        id="currency"
                        maxlength="3"
                        prop:value=move || form.get().currency.clone().unwrap_or_default()
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| {
                                f.currency = if value.is_empty() { None } else { Some(value) };
                            });
                        }
                        placeholder="RUB / USD / EUR"
                    />
                </div>

                <div class="form-group">
                    <label for="city">{"Город"}</label>
                    <input
                        type="text"
                        id="city"
                        prop:value=move || form.get().city.clone().unwrap_or_default()
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| {
                                f.city = if value.is_empty() { None } else { Some(value) };
                            });
                        }
                    />
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
                    <label for="published_at">{"Дата публикации"}</label>
                    <input
                        type="date"
                        id="published_at"
                        prop:value=move || form.get().published_at.clone().unwrap_or_default()
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| {
                                f.published_at = if value.is_empty() { None } else { Some(value) };
                            });
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

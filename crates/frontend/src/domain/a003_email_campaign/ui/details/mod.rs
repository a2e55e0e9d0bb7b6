use std::rc::Rc;

use contracts::domain::a003_email_campaign::aggregate::{
    EmailCampaign, EmailCampaignDto, FORM_RULES,
};
use contracts::domain::common::AggregateRoot;
use contracts::shared::metadata::{validate_form, FormValue};
use leptos::prelude::*;

use crate::shared::data_access;
use crate::shared::icons::icon;

fn to_dto(aggregate: EmailCampaign) -> EmailCampaignDto {
    EmailCampaignDto {
        id: Some(aggregate.to_string_id()),
        code: Some(aggregate.base.code),
        description: aggregate.base.description,
        subject: aggregate.subject,
        audience: if aggregate.audience.is_empty() {
            None
        } else {
            Some(aggregate.audience)
        },
        status: aggregate.status,
        scheduled_at: aggregate.scheduled_at,
        sent_count: Some(aggregate.sent_count),
        comment: aggregate.base.comment,
    }
}

fn validate(dto: &EmailCampaignDto) -> Result<(), String> {
    validate_form(FORM_RULES, |field| match field {
        "description" => Some(FormValue::Text(dto.description.as_str())),
        "subject" => Some(FormValue::Text(dto.subject.as_str())),
        _ => None,
    })
}

#[component]
pub fn EmailCampaignDetails(
    id: Option<String>,
    on_saved: Rc<dyn Fn(())>,
    on_cancel: Rc<dyn Fn(())>,
) -> impl IntoView {
    let form = RwSignal::new(EmailCampaignDto::default());
    let error = RwSignal::new(None::<String>);

    if let Some(existing_id) = id {
        wasm_bindgen_futures::spawn_local(async move {
            match data_access::fetch_by_id::<EmailCampaign>(&EmailCampaign::api_path(), &existing_id)
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
                        data_access::update::<EmailCampaign, _>(
                            &EmailCampaign::api_path(),
                            &id,
                            &current,
                        )
                        .await
                    }
                    None => {
                        data_access::create::<EmailCampaign, _>(&EmailCampaign::api_path(), &current)
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
        <div class="details-container campaign-details">
            <div class="details-header">
                <h3>
                    {move || if is_edit() { "Редактирование рассылки" } else { "Новая рассылка" }}
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
                    <label for="subject">{"Тема письма"}</label>
                    <input
                        type="text"
                        id="subject"
                        prop:value=move || form.get().subject
                        on:input=move |ev| {
                            form.update(|f| f.subject = event_target_value(&ev));
                        }
                    />
                </div>

                <div class="form-group">
                    <label for="audience">{"Аудитория"}</label>
                    <input
                        type="text"
                        id="audience"
                        prop:value=move || form.get().audience.clone().unwrap_or_default()
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| {
                                f.audience = if value.is_empty() { None } else { Some(value) };
                            });
                        }
                        placeholder="Сегмент получателей"
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
                        placeholder="Сырое значение API"
                    />
                </div>

                <div class="form-group">
                    <label for="scheduled_at">{"Дата отправки"}</label>
                    <input
                        type="date"
                        id="scheduled_at"
                        prop:value=move || form.get().scheduled_at.clone().unwrap_or_default()
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| {
                                f.scheduled_at = if value.is_empty() { None } else { Some(value) };
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

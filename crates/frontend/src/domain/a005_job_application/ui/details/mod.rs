use std::rc::Rc;

use contracts::domain::a005_job_application::aggregate::{
    JobApplication, JobApplicationDto, FORM_RULES,
};
use contracts::domain::common::AggregateRoot;
use contracts::shared::metadata::{validate_form, FormValue};
use leptos::prelude::*;

use crate::shared::data_access;
use crate::shared::icons::icon;

fn to_dto(aggregate: JobApplication) -> JobApplicationDto {
    JobApplicationDto {
        id: Some(aggregate.to_string_id()),
        code: Some(aggregate.base.code),
        description: aggregate.base.description,
        applicant_name: aggregate.applicant_name,
        email: aggregate.email,
        position: aggregate.position,
        applied_at: aggregate.applied_at,
        status: aggregate.status,
        resume_url: aggregate.resume_url,
        comment: aggregate.base.comment,
    }
}

fn validate(dto: &JobApplicationDto) -> Result<(), String> {
    validate_form(FORM_RULES, |field| match field {
        "applicant_name" => Some(FormValue::Text(dto.applicant_name.as_str())),
        "position" => Some(FormValue::Text(dto.position.as_str())),
        "email" => Some(FormValue::Text(dto.email.as_str())),
        _ => None,
    })
}

#[component]
pub fn JobApplicationDetails(
    id: Option<String>,
    on_saved: Rc<dyn Fn(())>,
    on_cancel: Rc<dyn Fn(())>,
) -> impl IntoView {
    let form = RwSignal::new(JobApplicationDto::default());
    let error = RwSignal::new(None::<String>);

    if let Some(existing_id) = id {
        wasm_bindgen_futures::spawn_local(async move {
            match data_access::fetch_by_id::<JobApplication>(
                &JobApplication::api_path(),
                &existing_id,
            )
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
                        data_access::update::<JobApplication, _>(
                            &JobApplication::api_path(),
                            &id,
                            &current,
                        )
                        .await
                    }
                    None => {
                        data_access::create::<JobApplication, _>(
                            &JobApplication::api_path(),
                            &current,
                        )
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
        <div class="details-container job-application-details">
            <div class="details-header">
                <h3>
                    {move || if is_edit() { "Редактирование отклика" } else { "Новый отклик" }}
                </h3>
            </div>

            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="details-form">
                <div class="form-group">
                    <label for="applicant_name">{"Соискатель"}</label>
                    <input
                        type="text"
                        id="applicant_name"
                        prop:value=move || form.get().applicant_name
                        on:input=move |ev| {
                            form.update(|f| f.applicant_name = event_target_value(&ev));
                        }
                        placeholder="Имя и фамилия"
                    />
                </div>

                <div class="form-group">
                    <label for="email">{"Email"}</label>
                    <input
                        type="email"
                        id="email"
                        prop:value=move || form.get().email
                        on:input=move |ev| {
                            form.update(|f| f.email = event_target_value(&ev));
                        }
                    />
                </div>

                <div class="form-group">
                    <label for="position">{"Вакансия"}</label>
                    <input
                        type="text"
                        id="position"
                        prop:value=move || form.get().position
                        on:input=move |ev| {
                            form.update(|f| f.position = event_target_value(&ev));
                        }
                    />
                </div>

                <div class="form-group">
                    <label for="applied_at">{"Дата отклика"}</label>
                    <input
                        type="date"
                        id="applied_at"
                        prop:value=move || form.get().applied_at
                        on:change=move |ev| {
                            form.update(|f| f.applied_at = event_target_value(&ev));
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
                    <label for="resume_url">{"Ссылка на резюме"}</label>
                    <input
                        type="url"
                        id="resume_url"
                        prop:value=move || form.get().resume_url.clone().unwrap_or_default()
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| {
                                f.resume_url = if value.is_empty() { None } else { Some(value) };
                            });
                        }
                        placeholder="https://..."
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

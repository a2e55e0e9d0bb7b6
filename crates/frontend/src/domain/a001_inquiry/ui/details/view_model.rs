use std::rc::Rc;

use contracts::domain::a001_inquiry::aggregate::{Inquiry, InquiryDto, FORM_RULES};
use contracts::domain::common::AggregateRoot;
use contracts::shared::metadata::{validate_form, FormValue};
use leptos::prelude::*;

use crate::shared::data_access;

/// ViewModel формы обращения
#[derive(Clone)]
pub struct InquiryDetailsViewModel {
    pub form: RwSignal<InquiryDto>,
    pub error: RwSignal<Option<String>>,
}

fn to_dto(aggregate: Inquiry) -> InquiryDto {
    InquiryDto {
        id: Some(aggregate.to_string_id()),
        code: Some(aggregate.base.code),
        description: aggregate.base.description,
        contact_person_name: aggregate.contact_person_name,
        company_name: if aggregate.company_name.is_empty() {
            None
        } else {
            Some(aggregate.company_name)
        },
        email: aggregate.email,
        phone: if aggregate.phone.is_empty() {
            None
        } else {
            Some(aggregate.phone)
        },
        country: if aggregate.country.is_empty() {
            None
        } else {
            Some(aggregate.country)
        },
        status: aggregate.status,
        inquiry_date: aggregate.inquiry_date,
        source: if aggregate.source.is_empty() {
            None
        } else {
            Some(aggregate.source)
        },
        assigned_to: aggregate.assigned_to,
        comment: aggregate.base.comment,
    }
}

impl InquiryDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(InquiryDto::default()),
            error: RwSignal::new(None),
        }
    }

    pub fn is_edit_mode(&self) -> impl Fn() -> bool + '_ {
        move || self.form.get().id.is_some()
    }

    /// Проверка формы по декларативной таблице правил
    pub fn validate(dto: &InquiryDto) -> Result<(), String> {
        validate_form(FORM_RULES, |field| match field {
            "description" => Some(FormValue::Text(dto.description.as_str())),
            "contact_person_name" => Some(FormValue::Text(dto.contact_person_name.as_str())),
            "email" => Some(FormValue::Text(dto.email.as_str())),
            _ => None,
        })
    }

    /// Load form data from server if ID is provided
    pub fn load_if_needed(&self, id: Option<String>) {
        if let Some(existing_id) = id {
            let form = self.form;
            let error = self.error;
            wasm_bindgen_futures::spawn_local(async move {
                match data_access::fetch_by_id::<Inquiry>(&Inquiry::api_path(), &existing_id).await
                {
                    Ok(aggregate) => form.set(to_dto(aggregate)),
                    Err(e) => error.set(Some(format!("Ошибка загрузки: {}", e))),
                }
            });
        }
    }

    /// Save form data to server
    pub fn save_command(&self, on_saved: Rc<dyn Fn(())>) {
        let current = self.form.get();

        if let Err(message) = Self::validate(&current) {
            self.error.set(Some(message));
            return;
        }

        let error = self.error;
        wasm_bindgen_futures::spawn_local(async move {
            let result = match current.id.clone() {
                Some(id) => {
                    data_access::update::<Inquiry, _>(&Inquiry::api_path(), &id, &current).await
                }
                None => data_access::create::<Inquiry, _>(&Inquiry::api_path(), &current).await,
            };
            match result {
                Ok(_) => (on_saved)(()),
                Err(e) => error.set(Some(format!("Ошибка сохранения: {}", e))),
            }
        });
    }
}

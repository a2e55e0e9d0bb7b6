use std::rc::Rc;

use contracts::domain::a002_partner::aggregate::{Partner, PartnerDto, FORM_RULES};
use contracts::domain::common::AggregateRoot;
use contracts::shared::metadata::{validate_form, FormValue};
use leptos::prelude::*;

use crate::shared::data_access;

/// ViewModel формы партнёра
#[derive(Clone)]
pub struct PartnerDetailsViewModel {
    pub form: RwSignal<PartnerDto>,
    pub error: RwSignal<Option<String>>,
}

fn to_dto(aggregate: Partner) -> PartnerDto {
    PartnerDto {
        id: Some(aggregate.to_string_id()),
        code: Some(aggregate.base.code),
        description: aggregate.base.description,
        contact_person: aggregate.contact_person,
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
        kyc_status: aggregate.kyc_status,
        partner_type: if aggregate.partner_type.is_empty() {
            None
        } else {
            Some(aggregate.partner_type)
        },
        registered_at: aggregate.registered_at,
        comment: aggregate.base.comment,
    }
}

impl PartnerDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(PartnerDto::default()),
            error: RwSignal::new(None),
        }
    }

    pub fn is_edit_mode(&self) -> impl Fn() -> bool + '_ {
        move || self.form.get().id.is_some()
    }

    pub fn validate(dto: &PartnerDto) -> Result<(), String> {
        validate_form(FORM_RULES, |field| match field {
            "description" => Some(FormValue::Text(dto.description.as_str())),
            "contact_person" => Some(FormValue::Text(dto.contact_person.as_str())),
            "email" => Some(FormValue::Text(dto.email.as_str())),
            _ => None,
        })
    }

    pub fn load_if_needed(&self, id: Option<String>) {
        if let Some(existing_id) = id {
            let form = self.form;
            let error = self.error;
            wasm_bindgen_futures::spawn_local(async move {
                match data_access::fetch_by_id::<Partner>(&Partner::api_path(), &existing_id).await
                {
                    Ok(aggregate) => form.set(to_dto(aggregate)),
                    Err(e) => error.set(Some(format!("Ошибка загрузки: {}", e))),
                }
            });
        }
    }

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
                    data_access::update::<Partner, _>(&Partner::api_path(), &id, &current).await
                }
                None => data_access::create::<Partner, _>(&Partner::api_path(), &current).await,
            };
            match result {
                Ok(_) => (on_saved)(()),
                Err(e) => error.set(Some(format!("Ошибка сохранения: {}", e))),
            }
        });
    }
}

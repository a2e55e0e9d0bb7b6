use super::view_model::InquiryDetailsViewModel;
use crate::shared::icons::icon;
use leptos::prelude::*;
use std::rc::Rc;

#[component]
pub fn InquiryDetails(
    id: Option<String>,
    on_saved: Rc<dyn Fn(())>,
    on_cancel: Rc<dyn Fn(())>,
) -> impl IntoView {
    let vm = InquiryDetailsViewModel::new();
    vm.load_if_needed(id);

    let vm_clone = vm.clone();

    view! {
        <div class="details-container inquiry-details">
            <div class="details-header">
                <h3>
                    {
                        let vm = vm_clone.clone();
                        move || if vm.is_edit_mode()() { "Редактирование обращения" } else { "Новое обращение" }
                    }
                </h3>
            </div>

            {
                let vm = vm_clone.clone();
                move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })
            }

            <div class="details-form">
                <div class="form-group">
                    <label for="description">{"Тема обращения"}</label>
                    <input
                        type="text"
                        id="description"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.form.get().description
                        }
                        on:input={
                            let vm = vm_clone.clone();
                            move |ev| {
                                vm.form.update(|f| f.description = event_target_value(&ev));
                            }
                        }
                        placeholder="Коротко о сути запроса"
                    />
                </div>

                <div class="form-group">
                    <label for="contact_person_name">{"Контактное лицо"}</label>
                    <input
                        type="text"
                        id="contact_person_name"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.form.get().contact_person_name
                        }
                        on:input={
                            let vm = vm_clone.clone();
                            move |ev| {
                                vm.form.update(|f| f.contact_person_name = event_target_value(&ev));
                            }
                        }
                        placeholder="Имя и фамилия"
                    />
                </div>

                <div class="form-group">
                    <label for="company_name">{"Компания"}</label>
                    <input
                        type="text"
                        id="company_name"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.form.get().company_name.clone().unwrap_or_default()
                        }
                        on:input={
                            let vm = vm_clone.clone();
                            move |ev| {
                                let value = event_target_value(&ev);
                                vm.form.update(|f| {
                                    f.company_name = if value.is_empty() { None } else { Some(value) };
                                });
                            }
                        }
                        placeholder="Необязательно"
                    />
                </div>

                <div class="form-group">
                    <label for="email">{"Email"}</label>
                    <input
                        type="email"
                        id="email"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.form.get().email
                        }
                        on:input={
                            let vm = vm_clone.clone();
                            move |ev| {
                                vm.form.update(|f| f.email = event_target_value(&ev));
                            }
                        }
                        placeholder="name@example.com"
                    />
                </div>

                <div class="form-group">
                    <label for="phone">{"Телефон"}</label>
                    <input
                        type="tel"
                        id="phone"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.form.get().phone.clone().unwrap_or_default()
                        }
                        on:input={
                            let vm = vm_clone.clone();
                            move |ev| {
                                let value = event_target_value(&ev);
                                vm.form.update(|f| {
                                    f.phone = if value.is_empty() { None } else { Some(value) };
                                });
                            }
                        }
                        placeholder="Необязательно"
                    />
                </div>

                <div class="form-group">
                    <label for="country">{"Страна"}</label>
                    <input
                        type="text"
                        id="country"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.form.get().country.clone().unwrap_or_default()
                        }
                        on:input={
                            let vm = vm_clone.clone();
                            move |ev| {
                                let value = event_target_value(&ev);
                                vm.form.update(|f| {
                                    f.country = if value.is_empty() { None } else { Some(value) };
                                });
                            }
                        }
                    />
                </div>

                <div class="form-group">
                    <label for="inquiry_date">{"Дата обращения"}</label>
                    <input
                        type="date"
                        id="inquiry_date"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.form.get().inquiry_date
                        }
                        on:change={
                            let vm = vm_clone.clone();
                            move |ev| {
                                vm.form.update(|f| f.inquiry_date = event_target_value(&ev));
                            }
                        }
                    />
                </div>

                <div class="form-group">
                    <label for="status">{"Статус"}</label>
                    <input
                        type="text"
                        id="status"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.form.get().status
                        }
                        on:input={
                            let vm = vm_clone.clone();
                            move |ev| {
                                vm.form.update(|f| f.status = event_target_value(&ev));
                            }
                        }
                        placeholder="Как в CRM, без преобразований"
                    />
                </div>

                <div class="form-group">
                    <label for="comment">{"Комментарий"}</label>
                    <textarea
                        id="comment"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.form.get().comment.clone().unwrap_or_default()
                        }
                        on:input={
                            let vm = vm_clone.clone();
                            move |ev| {
                                let value = event_target_value(&ev);
                                vm.form.update(|f| {
                                    f.comment = if value.is_empty() { None } else { Some(value) };
                                });
                            }
                        }
                        placeholder="Дополнительная информация (необязательно)"
                        rows="3"
                    />
                </div>
            </div>

            <div class="details-actions">
                <button
                    class="btn btn-primary"
                    on:click={
                        let vm = vm_clone.clone();
                        let on_saved = on_saved.clone();
                        move |_| vm.save_command(on_saved.clone())
                    }
                >
                    {icon("save")}
                    {
                        let vm = vm_clone.clone();
                        move || if vm.is_edit_mode()() { "Сохранить" } else { "Создать" }
                    }
                </button>
                <button
                    class="btn btn-secondary"
                    on:click=move |_| (on_cancel)(())
                >
                    {icon("cancel")}
                    {"Отмена"}
                </button>
            </div>
        </div>
    }
}

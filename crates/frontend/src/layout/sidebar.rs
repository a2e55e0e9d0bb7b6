use leptos::prelude::*;

use super::shell::ActivePage;
use crate::shared::icons::icon;

const PAGES: &[(ActivePage, &str)] = &[
    (ActivePage::Inquiries, "inquiries"),
    (ActivePage::Partners, "partners"),
    (ActivePage::EmailCampaigns, "campaigns"),
    (ActivePage::Continents, "continents"),
    (ActivePage::JobApplications, "applications"),
    (ActivePage::ExportMappingLog, "export-log"),
    (ActivePage::WallListings, "wall"),
    (ActivePage::BugReports, "bugs"),
    (ActivePage::Blogs, "blog"),
];

#[component]
pub fn Sidebar(active: RwSignal<ActivePage>) -> impl IntoView {
    view! {
        <nav class="sidebar">
            <div class="sidebar__brand">"CRM Console"</div>
            <ul class="sidebar__menu">
                {PAGES
                    .iter()
                    .map(|&(page, icon_name)| {
                        view! {
                            <li
                                class=move || {
                                    if active.get() == page {
                                        "sidebar__item sidebar__item--active"
                                    } else {
                                        "sidebar__item"
                                    }
                                }
                                on:click=move |_| active.set(page)
                            >
                                {icon(icon_name)}
                                <span>{page.title()}</span>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </nav>
    }
}

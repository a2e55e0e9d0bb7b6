use leptos::prelude::*;

use crate::domain::a001_inquiry::ui::list::InquiryList;
use crate::domain::a002_partner::ui::list::PartnerList;
use crate::domain::a003_email_campaign::ui::list::EmailCampaignList;
use crate::domain::a004_continent::ui::list::ContinentList;
use crate::domain::a005_job_application::ui::list::JobApplicationList;
use crate::domain::a006_export_mapping_log::ui::list::ExportMappingLogList;
use crate::domain::a007_wall_listing::ui::list::WallListingList;
use crate::domain::a008_bug_report::ui::list::BugReportList;
use crate::domain::a009_blog::ui::list::BlogList;

/// Открытая страница консоли
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePage {
    Inquiries,
    Partners,
    EmailCampaigns,
    Continents,
    JobApplications,
    ExportMappingLog,
    WallListings,
    BugReports,
    Blogs,
}

impl ActivePage {
    pub fn title(&self) -> &'static str {
        match self {
            ActivePage::Inquiries => "Обращения",
            ActivePage::Partners => "Партнёры",
            ActivePage::EmailCampaigns => "Email-рассылки",
            ActivePage::Continents => "Континенты",
            ActivePage::JobApplications => "Отклики на вакансии",
            ActivePage::ExportMappingLog => "Журнал выгрузок",
            ActivePage::WallListings => "Объявления",
            ActivePage::BugReports => "Баг-репорты",
            ActivePage::Blogs => "Блог",
        }
    }
}

/// Каркас консоли: сайдбар слева, активная страница в центре.
/// Каждая страница монтируется заново при переключении, вместе со своим
/// состоянием списка.
#[component]
pub fn Shell() -> impl IntoView {
    let active = RwSignal::new(ActivePage::Inquiries);

    view! {
        <div class="shell">
            <crate::layout::Sidebar active=active />
            <main class="shell__center">
                {move || match active.get() {
                    ActivePage::Inquiries => view! { <InquiryList /> }.into_any(),
                    ActivePage::Partners => view! { <PartnerList /> }.into_any(),
                    ActivePage::EmailCampaigns => view! { <EmailCampaignList /> }.into_any(),
                    ActivePage::Continents => view! { <ContinentList /> }.into_any(),
                    ActivePage::JobApplications => view! { <JobApplicationList /> }.into_any(),
                    ActivePage::ExportMappingLog => view! { <ExportMappingLogList /> }.into_any(),
                    ActivePage::WallListings => view! { <WallListingList /> }.into_any(),
                    ActivePage::BugReports => view! { <BugReportList /> }.into_any(),
                    ActivePage::Blogs => view! { <BlogList /> }.into_any(),
                }}
            </main>
        </div>
    }
}

pub mod common;

pub mod a001_inquiry;
pub mod a002_partner;
pub mod a003_email_campaign;
pub mod a004_continent;
pub mod a005_job_application;
pub mod a006_export_mapping_log;
pub mod a007_wall_listing;
pub mod a008_bug_report;
pub mod a009_blog;

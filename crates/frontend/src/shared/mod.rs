pub mod api_utils;
pub mod components;
pub mod data_access;
pub mod date_utils;
pub mod export;
pub mod icons;
pub mod list_context;
pub mod list_utils;

use leptos::prelude::*;

use crate::layout::Shell;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <Shell />
    }
}

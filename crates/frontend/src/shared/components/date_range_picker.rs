use chrono::{Datelike, Duration, NaiveDate, Utc};
use leptos::prelude::*;

/// DateRangePicker component - переиспользуемый компонент для выбора
/// периода дат: два поля ввода и кнопки быстрого выбора месяца.
#[component]
pub fn DateRangePicker(
    /// Значение даты "от" в формате yyyy-mm-dd
    #[prop(into)]
    date_from: Signal<String>,

    /// Значение даты "до" в формате yyyy-mm-dd
    #[prop(into)]
    date_to: Signal<String>,

    /// Callback при изменении диапазона дат (from, to)
    on_change: Callback<(String, String)>,

    /// Опциональная метка для компонента
    #[prop(optional)]
    label: Option<String>,
) -> impl IntoView {
    let on_from_change = move |new_from: String| {
        let current_to = date_to.get_untracked();
        on_change.run((new_from, current_to));
    };

    let on_to_change = move |new_to: String| {
        let current_from = date_from.get_untracked();
        on_change.run((current_from, new_to));
    };

    // Установить текущий месяц
    let on_current_month = move |_| {
        let now = Utc::now().date_naive();
        let (start, end) = month_bounds(now.year(), now.month());
        on_change.run((start, end));
    };

    // Предыдущий месяц относительно текущей даты "от"
    let on_previous_month = move |_| {
        let current_from = date_from.get_untracked();
        let base = NaiveDate::parse_from_str(&current_from, "%Y-%m-%d")
            .unwrap_or_else(|_| Utc::now().date_naive());
        let (year, month) = if base.month() == 1 {
            (base.year() - 1, 12)
        } else {
            (base.year(), base.month() - 1)
        };
        let (start, end) = month_bounds(year, month);
        on_change.run((start, end));
    };

    let on_clear = move |_| {
        on_change.run((String::new(), String::new()));
    };

    view! {
        <div class="date-range">
            {label.map(|text| view! { <span class="date-range__label">{text}</span> })}
            <input
                type="date"
                class="date-range__input"
                prop:value=move || date_from.get()
                on:change=move |ev| on_from_change(event_target_value(&ev))
            />
            <span class="date-range__dash">"—"</span>
            <input
                type="date"
                class="date-range__input"
                prop:value=move || date_to.get()
                on:change=move |ev| on_to_change(event_target_value(&ev))
            />
            <button class="btn btn-light" on:click=on_current_month>
                "Текущий месяц"
            </button>
            <button class="btn btn-light" on:click=on_previous_month>
                "Предыдущий"
            </button>
            <button class="btn btn-light" on:click=on_clear>
                "Сбросить"
            </button>
        </div>
    }
}

/// Первый и последний день месяца строками yyyy-mm-dd
fn month_bounds(year: i32, month: u32) -> (String, String) {
    let month_start = NaiveDate::from_ymd_opt(year, month, 1).expect("Invalid month start date");
    let month_end = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
            .map(|d| d - Duration::days(1))
            .expect("Invalid month end date")
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
            .map(|d| d - Duration::days(1))
            .expect("Invalid month end date")
    };
    (
        month_start.format("%Y-%m-%d").to_string(),
        month_end.format("%Y-%m-%d").to_string(),
    )
}

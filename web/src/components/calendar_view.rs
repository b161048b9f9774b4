use chrono::{Datelike, NaiveDate};
use leptos::prelude::*;
use thaw::*;

use crate::calendar::{CalendarState, Direction, WEEKDAY_LABELS};

/// Month grid with bounded navigation. `on_date_selected` fires only when
/// the selection actually changes.
#[component]
pub fn CalendarView(
    calendar: RwSignal<CalendarState>,
    on_date_selected: impl Fn(NaiveDate) + 'static + Copy + Send + Sync,
) -> impl IntoView {
    let navigate_month = move |direction: Direction| {
        calendar.update(|c| {
            c.navigate(direction);
        });
    };

    let select_day = move |date: NaiveDate| {
        let changed = calendar.try_update(|c| c.select_date(Some(date))).flatten();
        if let Some(date) = changed {
            on_date_selected(date);
        }
    };

    view! {
        <div class="calendar-view">
            <div class="calendar-navigation">
                <Button
                    appearance=ButtonAppearance::Subtle
                    size=ButtonSize::Small
                    on_click=move |_| navigate_month(Direction::Previous)
                    disabled=Signal::derive(move || !calendar.with(|c| c.can_navigate(Direction::Previous)))
                >
                    "←"
                </Button>

                <h2 class="current-month">
                    {move || calendar.with(|c| c.displayed().label())}
                </h2>

                <Button
                    appearance=ButtonAppearance::Subtle
                    size=ButtonSize::Small
                    on_click=move |_| navigate_month(Direction::Next)
                    disabled=Signal::derive(move || !calendar.with(|c| c.can_navigate(Direction::Next)))
                >
                    "→"
                </Button>
            </div>

            <div class="calendar-weekdays">
                {WEEKDAY_LABELS
                    .iter()
                    .map(|label| view! { <div class="weekday">{*label}</div> })
                    .collect::<Vec<_>>()}
            </div>

            <div class="calendar-days">
                {move || {
                    calendar
                        .with(|c| c.days())
                        .into_iter()
                        .map(|cell| match cell {
                            Some(day) => {
                                let date = day.date;
                                view! {
                                    <button
                                        class="calendar-day"
                                        class:past=day.is_past
                                        class:today=day.is_today
                                        class:selected=day.is_selected
                                        class:unavailable={day.is_disabled && !day.is_past}
                                        disabled=day.is_disabled
                                        on:click=move |_| select_day(date)
                                    >
                                        {date.day()}
                                    </button>
                                }
                                .into_any()
                            }
                            None => view! { <div class="calendar-day empty"></div> }.into_any(),
                        })
                        .collect::<Vec<_>>()
                }}
            </div>
        </div>
    }
}

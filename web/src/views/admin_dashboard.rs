use leptos::prelude::*;
use thaw::{Spinner, SpinnerSize};

use crate::calendar::local_today;
use crate::components::{AvailabilityPanel, CalendarView, ErrorView};
use crate::components::availability_editor::load_day_windows;
use crate::config::CalendarSettings;
use crate::scheduling::AvailabilityEditor;
use crate::server::get_calendar_settings;

/// Opening-hours management: pick a day, then edit its time windows.
#[component]
pub fn AdminDashboard() -> impl IntoView {
    let calendar = RwSignal::new(CalendarSettings::default().admin_calendar(local_today()));
    let editor = RwSignal::new(AvailabilityEditor::new());
    // The grid is only shown once the browser has anchored it on its own date.
    let calendar_ready = RwSignal::new(false);

    let settings = Resource::new(|| (), |_| async move { get_calendar_settings().await });

    Effect::new(move |_| {
        let settings = match settings.get() {
            Some(Ok(settings)) => settings,
            Some(Err(_)) => CalendarSettings::default(),
            None => return,
        };
        let dropped = calendar
            .try_update(|c| settings.configure_admin(c, local_today()))
            .flatten();
        if dropped.is_some() {
            editor.update(|e| e.deselect());
        }
        calendar_ready.set(true);
    });

    let on_date_selected = move |date| load_day_windows(editor, date);

    view! {
        <div class="admin-dashboard">
            <div class="admin-dashboard-header">
                <h1>"Availability"</h1>
                <p>"Choose a day and set the hours clients can book"</p>
            </div>

            <Suspense>
                {move || {
                    settings
                        .get()
                        .and_then(|result| result.err())
                        .map(|e| view! { <ErrorView message=Some(format!("Could not load calendar settings: {}", e)) /> })
                }}
            </Suspense>

            <div class="admin-dashboard-grid">
                <div class="admin-card">
                    <Show
                        when=move || calendar_ready.get()
                        fallback=|| view! { <Spinner size=SpinnerSize::Small /> }
                    >
                        <CalendarView calendar on_date_selected />
                    </Show>
                </div>
                <div class="admin-card">
                    <AvailabilityPanel editor />
                    <Show when=move || editor.with(|e| e.selected().is_none())>
                        <p class="admin-card-hint">"Select a date to see its opening hours."</p>
                    </Show>
                </div>
            </div>
        </div>
    }
}

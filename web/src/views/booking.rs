use leptos::prelude::*;
use thaw::{Spinner, SpinnerSize};

use crate::calendar::local_today;
use crate::components::slot_picker::load_available_times;
use crate::components::{CalendarView, ErrorView, SlotPickerPanel};
use crate::config::CalendarSettings;
use crate::scheduling::{SlotPicker, SlotPickerStep};
use crate::server::get_calendar_settings;

#[component]
pub fn AgentCard(
    #[prop(into)] name: String,
    #[prop(into)] headline: String,
    #[prop(into)] call_to_action: String,
) -> impl IntoView {
    view! {
        <article class="agent-card">
            <div class="agent-card-avatar">
                {name.chars().next().map(|c| c.to_string()).unwrap_or_default()}
            </div>
            <h4 class="agent-card-name">{name}</h4>
            <p class="agent-card-text">{headline}</p>
            <p class="agent-card-text">
                <strong>{call_to_action}</strong>
            </p>
        </article>
    }
}

/// Public booking page. Days outside the agent's schedule are disabled and
/// the calendar is hidden while the contact form is open.
#[component]
pub fn BookingPage() -> impl IntoView {
    let calendar = RwSignal::new(CalendarSettings::default().client_calendar(local_today()));
    let picker = RwSignal::new(SlotPicker::new());

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
            .try_update(|c| settings.configure_client(c, local_today()))
            .flatten();
        if dropped.is_some() {
            picker.update(|p| p.deselect());
        }
        calendar_ready.set(true);
    });

    let form_open = Memo::new(move |_| picker.with(|p| p.step() == SlotPickerStep::FormOpen));
    let on_date_selected = move |date| load_available_times(picker, date);

    view! {
        <div class="booking-page">
            <header class="booking-page-header">
                <h1>"Book a consultation"</h1>
            </header>

            <div class="booking-page-columns">
                <div class="booking-page-column">
                    <AgentCard
                        name="Your credit advisor"
                        headline="Over thirty years helping clients find the right loan for their needs."
                        call_to_action="Book a free consultation today!"
                    />
                </div>

                <div class="booking-page-column">
                    <Suspense>
                        {move || {
                            settings
                                .get()
                                .and_then(|result| result.err())
                                .map(|e| view! { <ErrorView message=Some(format!("Could not load calendar settings: {}", e)) /> })
                        }}
                    </Suspense>

                    <div class="booking-calendar" class:hidden=move || form_open.get()>
                        <Show
                            when=move || calendar_ready.get()
                            fallback=|| view! { <Spinner size=SpinnerSize::Small /> }
                        >
                            <CalendarView calendar on_date_selected />
                        </Show>
                    </div>
                    <SlotPickerPanel picker />
                </div>
            </div>
        </div>
    }
}

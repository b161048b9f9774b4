use chrono::NaiveDate;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_query_map;
use shared_types::DATE_FORMAT;

#[component]
pub fn BookingConfirmation() -> impl IntoView {
    let query = use_query_map();

    let appointment = move || {
        let query = query.read();
        let date = query
            .get("date")
            .and_then(|d| NaiveDate::parse_from_str(&d, DATE_FORMAT).ok())?;
        let time = query.get("time").filter(|t| !t.is_empty())?;
        Some(format!("{} at {}", date.format("%A %d %B %Y"), time))
    };

    view! {
        <div class="booking-confirmation-container">
            <div class="booking-confirmation-content">
                <div class="booking-confirmation-header">
                    <div class="booking-confirmation-success-icon">"✓"</div>
                    <h1 class="booking-confirmation-title">"Thank you for your booking!"</h1>
                    <p class="booking-confirmation-subtitle">
                        "We appreciate your trust and look forward to meeting you."
                    </p>
                </div>

                {move || {
                    appointment()
                        .map(|when| {
                            view! {
                                <div class="booking-confirmation-reference">
                                    <h2 class="booking-confirmation-reference-title">"Your appointment"</h2>
                                    <p class="booking-confirmation-reference-number">{when}</p>
                                </div>
                            }
                        })
                }}

                <div class="booking-confirmation-actions">
                    <A href="/">"Back to the calendar"</A>
                </div>
            </div>
        </div>
    }
}

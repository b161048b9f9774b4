use chrono::NaiveDate;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use shared_types::{format_date, TimeSlot};
use thaw::*;

use crate::components::notice::NoticeBar;
use crate::error::ApiError;
use crate::scheduling::{ContactDetails, SlotPicker, SlotPickerStep};
use crate::server::{get_available_times, submit_booking};

/// Resets the picker onto `date` and loads the bookable times for it.
pub fn load_available_times(picker: RwSignal<SlotPicker>, date: NaiveDate) {
    let Some(ticket) = picker.try_update(|p| p.select_date(date)) else {
        return;
    };

    spawn_local(async move {
        let result = get_available_times(ticket.date())
            .await
            .map_err(ApiError::from);
        picker.update(|p| {
            p.apply_fetch(ticket, result);
        });
    });
}

fn send_booking(picker: RwSignal<SlotPicker>, contact: ContactDetails) {
    let Some(Ok((ticket, request))) = picker.try_update(|p| p.submit(&contact)) else {
        return;
    };

    spawn_local(async move {
        let result = submit_booking(request).await.map_err(ApiError::from);
        picker.update(|p| {
            if let Err(e) = p.finish_submit(ticket, result) {
                leptos::logging::error!("Failed to submit booking: {}", e);
            }
        });
    });
}

#[component]
fn SlotGrid(picker: RwSignal<SlotPicker>) -> impl IntoView {
    let can_confirm = Signal::derive(move || picker.with(|p| p.step() == SlotPickerStep::TimeSelected));

    view! {
        <div class="time-slots-section">
            {move || {
                let (loading, slots, chosen) = picker.with(|p| {
                    (p.is_loading(), p.slots().to_vec(), p.chosen().cloned())
                });

                if loading {
                    view! {
                        <div class="time-slots-loading">
                            <Spinner size=SpinnerSize::Small />
                        </div>
                    }
                        .into_any()
                } else if slots.is_empty() {
                    view! { <p class="time-slots-empty">"No available times for this date."</p> }
                        .into_any()
                } else {
                    view! {
                        <div class="time-slots-grid">
                            {slots
                                .into_iter()
                                .map(|slot| {
                                    let is_chosen = chosen.as_ref() == Some(&slot);
                                    let label = slot.to_string();
                                    view! {
                                        <button
                                            class="time-slot"
                                            class:selected=is_chosen
                                            on:click=move |_| pick_slot(picker, slot.clone())
                                        >
                                            {label}
                                        </button>
                                    }
                                })
                                .collect::<Vec<_>>()}
                        </div>
                    }
                        .into_any()
                }
            }}

            <div class="time-slots-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || !can_confirm.get())
                    on_click=move |_| picker.update(|p| {
                        if let Err(e) = p.confirm() {
                            leptos::logging::warn!("{}", e);
                        }
                    })
                >
                    "Confirm time"
                </Button>
            </div>
        </div>
    }
}

fn pick_slot(picker: RwSignal<SlotPicker>, slot: TimeSlot) {
    picker.update(|p| {
        if let Err(e) = p.select_time(slot) {
            leptos::logging::warn!("{}", e);
        }
    });
}

#[component]
fn ContactForm(picker: RwSignal<SlotPicker>) -> impl IntoView {
    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());

    let is_submitting = Signal::derive(move || picker.with(|p| p.is_submitting()));
    let summary = move || {
        picker.with(|p| match (p.selected_date(), p.chosen()) {
            (Some(date), Some(time)) => format!("{} at {}", date.format("%A %d %B %Y"), time),
            _ => String::new(),
        })
    };

    let handle_submit = move || {
        let contact = ContactDetails::new(first_name.get(), last_name.get(), email.get());
        send_booking(picker, contact);
    };

    view! {
        <form class="booking-form-content" on:submit=move |ev| {
            ev.prevent_default();
            handle_submit();
        }>
            <p class="booking-form-summary">{summary}</p>

            <div class="form-row">
                <div class="form-group">
                    <label for="first-name">"First name *"</label>
                    <Input id="first-name" placeholder="First name" value=first_name />
                </div>
                <div class="form-group">
                    <label for="last-name">"Last name *"</label>
                    <Input id="last-name" placeholder="Last name" value=last_name />
                </div>
            </div>
            <div class="form-group">
                <label for="email">"Email address *"</label>
                <Input
                    id="email"
                    input_type=InputType::Email
                    placeholder="your@email.com"
                    value=email
                />
            </div>

            <div class="form-actions">
                <Button
                    appearance=ButtonAppearance::Subtle
                    disabled=is_submitting
                    on_click=move |_| picker.update(|p| {
                        if let Err(e) = p.back() {
                            leptos::logging::warn!("{}", e);
                        }
                    })
                >
                    "Back"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    button_type=ButtonType::Submit
                    disabled=is_submitting
                    loading=is_submitting
                >
                    "Book appointment"
                </Button>
            </div>
        </form>
    }
}

/// Client-side time selection and booking form for the selected date.
/// Redirects to the thank-you page once the booking is accepted.
#[component]
pub fn SlotPickerPanel(picker: RwSignal<SlotPicker>) -> impl IntoView {
    let navigate = use_navigate();
    let step = Memo::new(move |_| picker.with(|p| p.step()));
    let has_date = Memo::new(move |_| picker.with(|p| p.selected_date().is_some()));

    Effect::new(move |_| {
        if step.get() != SlotPickerStep::Submitted {
            return;
        }
        let Some(booked) = picker.with_untracked(|p| p.booked().cloned()) else {
            return;
        };
        let path = format!(
            "/thankyou?date={}&time={}",
            urlencoding::encode(&format_date(booked.date)),
            urlencoding::encode(booked.time.as_str()),
        );
        navigate(&path, Default::default());
    });

    view! {
        <Show when=move || has_date.get()>
            <div class="slot-picker-panel">
                {move || match step.get() {
                    SlotPickerStep::Browsing | SlotPickerStep::TimeSelected => {
                        view! { <SlotGrid picker /> }.into_any()
                    }
                    SlotPickerStep::FormOpen => view! { <ContactForm picker /> }.into_any(),
                    SlotPickerStep::Submitted => {
                        view! { <p class="slot-picker-redirect">"Booking confirmed, redirecting..."</p> }
                            .into_any()
                    }
                }}

                {move || picker.with(|p| p.notice().cloned()).map(|notice| view! { <NoticeBar notice /> })}
            </div>
        </Show>
    }
}

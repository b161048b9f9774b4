use chrono::NaiveDate;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::components::notice::NoticeBar;
use crate::error::ApiError;
use crate::scheduling::{AvailabilityEditor, WindowField};
use crate::server::{get_day_windows, save_day_windows};

/// Resets the editor onto `date` and loads that day's windows.
pub fn load_day_windows(editor: RwSignal<AvailabilityEditor>, date: NaiveDate) {
    let Some(ticket) = editor.try_update(|e| e.select_date(date)) else {
        return;
    };

    spawn_local(async move {
        let result = get_day_windows(ticket.date()).await.map_err(ApiError::from);
        if let Err(e) = &result {
            leptos::logging::error!("Failed to fetch availability for {}: {}", ticket.date(), e);
        }
        editor.update(|e| {
            e.apply_fetch(ticket, result);
        });
    });
}

fn save_windows(editor: RwSignal<AvailabilityEditor>) {
    let Some(Ok((ticket, request))) = editor.try_update(|e| e.prepare_save()) else {
        return;
    };

    spawn_local(async move {
        let result = save_day_windows(request).await.map_err(ApiError::from);
        editor.update(|e| {
            e.finish_save(ticket, result);
        });
    });
}

#[component]
fn WindowRow(editor: RwSignal<AvailabilityEditor>, index: usize) -> impl IntoView {
    let field_value = move |field: WindowField| {
        editor.with(|e| {
            e.windows()
                .get(index)
                .map(|w| match field {
                    WindowField::From => w.from.clone(),
                    WindowField::To => w.to.clone(),
                })
                .unwrap_or_default()
        })
    };

    view! {
        <div class="time-window-row">
            <input
                type="time"
                class="time-window-input"
                prop:value=move || field_value(WindowField::From)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    editor.update(|e| {
                        e.edit_window(index, WindowField::From, value);
                    });
                }
            />
            <span class="time-window-separator">"–"</span>
            <input
                type="time"
                class="time-window-input"
                prop:value=move || field_value(WindowField::To)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    editor.update(|e| {
                        e.edit_window(index, WindowField::To, value);
                    });
                }
            />
            <Button
                appearance=ButtonAppearance::Subtle
                size=ButtonSize::Small
                on_click=move |_| editor.update(|e| {
                    e.remove_window(index);
                })
            >
                "✕"
            </Button>
        </div>
    }
}

/// Admin panel listing the opening windows of the selected date.
#[component]
pub fn AvailabilityPanel(editor: RwSignal<AvailabilityEditor>) -> impl IntoView {
    let selected = Memo::new(move |_| editor.with(|e| e.selected()));
    let is_loading = Signal::derive(move || editor.with(|e| e.is_loading()));
    let is_saving = Signal::derive(move || editor.with(|e| e.is_saving()));

    view! {
        <Show when=move || selected.get().is_some()>
            <div class="availability-panel">
                <h3 class="availability-panel-title">
                    {move || {
                        selected
                            .get()
                            .map(|date| format!("Opening hours for {}", date.format("%d/%m/%Y")))
                            .unwrap_or_default()
                    }}
                </h3>

                {move || {
                    if is_loading.get() {
                        view! {
                            <div class="availability-panel-loading">
                                <Spinner size=SpinnerSize::Small />
                            </div>
                        }
                            .into_any()
                    } else {
                        view! {
                            <div class="time-window-list">
                                <For
                                    each=move || 0..editor.with(|e| e.windows().len())
                                    key=|index| *index
                                    children=move |index| view! { <WindowRow editor index /> }
                                />
                                <Show when=move || editor.with(|e| e.windows().is_empty())>
                                    <p class="time-window-empty">"No opening hours yet for this date."</p>
                                </Show>
                            </div>
                        }
                            .into_any()
                    }
                }}

                <div class="availability-panel-actions">
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| editor.update(|e| e.add_window())
                        disabled=is_loading
                    >
                        "+ Add time window"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| save_windows(editor)
                        disabled=Signal::derive(move || is_loading.get() || is_saving.get())
                        loading=is_saving
                    >
                        "Save availability"
                    </Button>
                </div>

                {move || editor.with(|e| e.notice().cloned()).map(|notice| view! { <NoticeBar notice /> })}
            </div>
        </Show>
    }
}

use leptos::prelude::*;
use thaw::{MessageBar, MessageBarIntent};

use crate::scheduling::{Notice, NoticeIntent};

#[component]
pub fn ErrorView(message: Option<String>) -> impl IntoView {
    view! {
        <MessageBar intent=MessageBarIntent::Error>
            {message.unwrap_or_else(|| "An error occurred. Please try again.".to_string())}
        </MessageBar>
    }
}

/// Success or failure message of a panel action.
#[component]
pub fn NoticeBar(notice: Notice) -> impl IntoView {
    let intent = match notice.intent {
        NoticeIntent::Success => MessageBarIntent::Success,
        NoticeIntent::Error => MessageBarIntent::Error,
    };

    view! {
        <div class="panel-notice">
            <MessageBar intent=intent>{notice.message}</MessageBar>
        </div>
    }
}

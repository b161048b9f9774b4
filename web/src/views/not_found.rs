use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="not-found">
            <div class="not-found-code">"404"</div>
            <h1>"Page Not Found"</h1>
            <p>"The page you're looking for doesn't exist or may have been moved."</p>
            <A href="/">"Book an appointment"</A>
        </div>
    }
}

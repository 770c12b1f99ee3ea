use leptos::prelude::*;

/// Small inline loading indicator.
#[component]
pub fn Spinner() -> impl IntoView {
    view! {
        <div class="flex justify-center" role="status" aria-label="Loading">
            <div class="h-6 w-6 animate-spin rounded-full border-2 border-gray-300 border-t-blue-600"></div>
        </div>
    }
}

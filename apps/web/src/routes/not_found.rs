use crate::components::AppShell;
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <AppShell>
            <div class="max-w-screen-md mx-auto text-center py-12">
                <h1 class="mb-4 text-4xl font-extrabold text-gray-900 dark:text-white">"404"</h1>
                <p class="mb-8 text-gray-500 dark:text-gray-400">
                    "That page does not exist."
                </p>
                <A
                    href="/"
                    {..}
                    class="text-blue-700 hover:underline dark:text-blue-500"
                >
                    "Back to the dashboard"
                </A>
            </div>
        </AppShell>
    }
}

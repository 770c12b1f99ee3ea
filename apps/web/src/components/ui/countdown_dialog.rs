//! Modal dialog with a live countdown, shared by the inactivity warning and
//! the session-expiry notice.

use leptos::prelude::*;
use session_guard::format_mm_ss;

/// Blocking dialog with a countdown and one or two actions. The countdown
/// value is owned by the caller and re-rendered as it ticks.
#[component]
pub fn CountdownDialog(
    title: &'static str,
    message: &'static str,
    remaining_ms: i64,
    primary_label: &'static str,
    on_primary: Callback<()>,
    #[prop(optional, strip_option)] secondary_label: Option<&'static str>,
    #[prop(optional, strip_option)] on_secondary: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/50" role="dialog" aria-modal="true">
            <div class="mx-4 w-full max-w-md rounded-lg bg-white p-6 shadow-xl dark:bg-gray-800">
                <h2 class="mb-2 text-xl font-bold text-gray-900 dark:text-white">{title}</h2>
                <p class="mb-4 text-gray-600 dark:text-gray-300">{message}</p>
                <p class="mb-6 text-center font-mono text-3xl text-gray-900 dark:text-white">
                    {format_mm_ss(remaining_ms)}
                </p>
                <div class="flex justify-end gap-3">
                    {secondary_label
                        .zip(on_secondary)
                        .map(|(label, on_secondary)| {
                            view! {
                                <button
                                    type="button"
                                    class="rounded-lg border border-gray-300 px-5 py-2.5 text-sm font-medium text-gray-900 hover:bg-gray-100 dark:border-gray-600 dark:text-white dark:hover:bg-gray-700"
                                    on:click=move |_| on_secondary.run(())
                                >
                                    {label}
                                </button>
                            }
                        })}
                    <button
                        type="button"
                        class="rounded-lg bg-blue-700 px-5 py-2.5 text-sm font-medium text-white hover:bg-blue-800 dark:bg-blue-600 dark:hover:bg-blue-700"
                        on:click=move |_| on_primary.run(())
                    >
                        {primary_label}
                    </button>
                </div>
            </div>
        </div>
    }
}

use crate::app_lib::AppError;
use crate::components::{Alert, AlertKind, AppShell, Button, Spinner};
use crate::features::auth::guards::RequireAuth;
use crate::features::profile::client;
use crate::features::profile::types::{Profile, ProfileUpdate};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

const INPUT_CLASS: &str = "bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:placeholder-gray-400 dark:text-white dark:focus:ring-blue-500 dark:focus:border-blue-500";
const LABEL_CLASS: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";

#[component]
pub fn ProfilePage() -> impl IntoView {
    view! {
        <RequireAuth>
            <AppShell>
                <ProfileForm />
            </AppShell>
        </RequireAuth>
    }
}

#[component]
fn ProfileForm() -> impl IntoView {
    let (profile, set_profile) = signal::<Option<Profile>>(None);
    let (display_name, set_display_name) = signal(String::new());
    let (locale, set_locale) = signal(String::new());
    let (error, set_error) = signal::<Option<AppError>>(None);
    let (saved, set_saved) = signal(false);

    // Load once on mount; the guard already ensures a session exists.
    Effect::new(move |_| {
        spawn_local(async move {
            match client::fetch_profile().await {
                Ok(loaded) => {
                    set_display_name.set(loaded.display_name.clone().unwrap_or_default());
                    set_locale.set(loaded.locale.clone().unwrap_or_default());
                    set_profile.set(Some(loaded));
                }
                Err(err) => set_error.set(Some(err)),
            }
        });
    });

    let save_action = Action::new_local(move |update: &ProfileUpdate| {
        let update = update.clone();
        async move { client::update_profile(&update).await }
    });

    Effect::new(move |_| {
        if let Some(result) = save_action.value().get() {
            match result {
                Ok(updated) => {
                    set_profile.set(Some(updated));
                    set_saved.set(true);
                }
                Err(err) => set_error.set(Some(err)),
            }
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);
        set_saved.set(false);

        let display_name_value = display_name.get_untracked().trim().to_string();
        let locale_value = locale.get_untracked().trim().to_string();
        save_action.dispatch(ProfileUpdate {
            display_name: (!display_name_value.is_empty()).then_some(display_name_value),
            locale: (!locale_value.is_empty()).then_some(locale_value),
        });
    };

    view! {
        {move || match profile.get() {
            None => view! { <Spinner /> }.into_any(),
            Some(loaded) => {
                view! {
                    <form class="max-w-sm mx-auto" on:submit=on_submit>
                        <div class="mb-5">
                            <label class=LABEL_CLASS for="email">
                                "Email"
                            </label>
                            <input
                                id="email"
                                type="email"
                                class=INPUT_CLASS
                                prop:value=loaded.email.clone()
                                disabled
                            />
                        </div>
                        <div class="mb-5">
                            <label class=LABEL_CLASS for="display-name">
                                "Display name"
                            </label>
                            <input
                                id="display-name"
                                type="text"
                                class=INPUT_CLASS
                                prop:value=move || display_name.get()
                                on:input=move |event| set_display_name.set(event_target_value(&event))
                            />
                        </div>
                        <div class="mb-5">
                            <label class=LABEL_CLASS for="locale">
                                "Locale"
                            </label>
                            <input
                                id="locale"
                                type="text"
                                class=INPUT_CLASS
                                placeholder="de-DE"
                                prop:value=move || locale.get()
                                on:input=move |event| set_locale.set(event_target_value(&event))
                            />
                        </div>
                        <Button button_type="submit" disabled=save_action.pending()>
                            "Save changes"
                        </Button>
                        {move || {
                            saved
                                .get()
                                .then_some(
                                    view! {
                                        <div class="mt-4">
                                            <Alert
                                                kind=AlertKind::Success
                                                message="Profile saved.".to_string()
                                            />
                                        </div>
                                    },
                                )
                        }}
                        {move || {
                            error
                                .get()
                                .map(|err| {
                                    view! {
                                        <div class="mt-4">
                                            <Alert kind=AlertKind::Error message=err.user_message() />
                                        </div>
                                    }
                                })
                        }}
                    </form>
                }
                    .into_any()
            }
        }}
    }
}

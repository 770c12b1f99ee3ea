use crate::app_lib::AppError;
use crate::components::{Alert, AlertKind, AppShell, Button, Spinner};
use crate::features::auth::client;
use crate::features::auth::types::{ResendVerificationRequest, SignupRequest};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

const INPUT_CLASS: &str = "bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:placeholder-gray-400 dark:text-white dark:focus:ring-blue-500 dark:focus:border-blue-500";
const LABEL_CLASS: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";

#[component]
pub fn SignUpPage() -> impl IntoView {
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<AppError>>(None);
    let (submitted, set_submitted) = signal(false);

    let signup_action = Action::new_local(move |request: &SignupRequest| {
        let request = request.clone();
        async move { client::signup(&request).await }
    });

    Effect::new(move |_| {
        if let Some(result) = signup_action.value().get() {
            match result {
                Ok(()) => set_submitted.set(true),
                Err(err) => set_error.set(Some(err)),
            }
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);

        let email_value = email.get_untracked().trim().to_string();
        let password_value = password.get_untracked();
        if email_value.is_empty() || password_value.len() < 8 {
            set_error.set(Some(AppError::Config(
                "Email and a password of at least 8 characters are required.".to_string(),
            )));
            return;
        }

        signup_action.dispatch(SignupRequest {
            email: email_value,
            password: password_value,
        });
    };

    let resend = move |_| {
        let email_value = email.get_untracked().trim().to_string();
        spawn_local(async move {
            let _ = client::resend_verification(&ResendVerificationRequest { email: email_value })
                .await;
        });
    };

    view! {
        <AppShell>
            <Show
                when=move || submitted.get()
                fallback=move || {
                    view! {
                        <form class="max-w-sm mx-auto" on:submit=on_submit>
                            <div class="mb-5">
                                <label class=LABEL_CLASS for="email">
                                    "Your email"
                                </label>
                                <input
                                    id="email"
                                    type="email"
                                    class=INPUT_CLASS
                                    autocomplete="email"
                                    placeholder="name@inbox.im"
                                    required
                                    on:input=move |event| set_email.set(event_target_value(&event))
                                />
                            </div>
                            <div class="mb-5">
                                <label class=LABEL_CLASS for="password">
                                    "Choose a password"
                                </label>
                                <input
                                    id="password"
                                    type="password"
                                    class=INPUT_CLASS
                                    autocomplete="new-password"
                                    minlength="8"
                                    required
                                    on:input=move |event| set_password.set(event_target_value(&event))
                                />
                            </div>
                            <Button button_type="submit" disabled=signup_action.pending()>
                                "Create account"
                            </Button>
                            {move || {
                                signup_action
                                    .pending()
                                    .get()
                                    .then_some(view! { <div class="mt-4"><Spinner /></div> })
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
                }
            >
                <div class="max-w-sm mx-auto space-y-4">
                    <Alert
                        kind=AlertKind::Success
                        message="Almost there. Check your inbox for the verification link.".to_string()
                    />
                    <button
                        type="button"
                        class="text-sm text-blue-700 hover:underline dark:text-blue-500"
                        on:click=resend
                    >
                        "Resend verification email"
                    </button>
                </div>
            </Show>
        </AppShell>
    }
}

use crate::app_lib::AppError;
use crate::components::{Alert, AlertKind, AppShell, Button, Spinner};
use crate::features::contact::client;
use crate::features::contact::types::ContactMessage;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;

const INPUT_CLASS: &str = "bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:placeholder-gray-400 dark:text-white dark:focus:ring-blue-500 dark:focus:border-blue-500";
const LABEL_CLASS: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";

#[component]
pub fn ContactPage() -> impl IntoView {
    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (message, set_message) = signal(String::new());
    let (error, set_error) = signal::<Option<AppError>>(None);
    let (sent, set_sent) = signal(false);

    let send_action = Action::new_local(move |message: &ContactMessage| {
        let message = message.clone();
        async move { client::send_message(&message).await }
    });

    Effect::new(move |_| {
        if let Some(result) = send_action.value().get() {
            match result {
                Ok(()) => set_sent.set(true),
                Err(err) => set_error.set(Some(err)),
            }
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);

        let name_value = name.get_untracked().trim().to_string();
        let email_value = email.get_untracked().trim().to_string();
        let message_value = message.get_untracked().trim().to_string();
        if name_value.is_empty() || email_value.is_empty() || message_value.is_empty() {
            set_error.set(Some(AppError::Config(
                "Name, email, and message are required.".to_string(),
            )));
            return;
        }

        send_action.dispatch(ContactMessage {
            name: name_value,
            email: email_value,
            message: message_value,
        });
    };

    view! {
        <AppShell>
            <Show
                when=move || sent.get()
                fallback=move || {
                    view! {
                        <form class="max-w-lg mx-auto" on:submit=on_submit>
                            <div class="mb-5">
                                <label class=LABEL_CLASS for="name">
                                    "Your name"
                                </label>
                                <input
                                    id="name"
                                    type="text"
                                    class=INPUT_CLASS
                                    required
                                    on:input=move |event| set_name.set(event_target_value(&event))
                                />
                            </div>
                            <div class="mb-5">
                                <label class=LABEL_CLASS for="email">
                                    "Your email"
                                </label>
                                <input
                                    id="email"
                                    type="email"
                                    class=INPUT_CLASS
                                    autocomplete="email"
                                    required
                                    on:input=move |event| set_email.set(event_target_value(&event))
                                />
                            </div>
                            <div class="mb-5">
                                <label class=LABEL_CLASS for="message">
                                    "Message"
                                </label>
                                <textarea
                                    id="message"
                                    rows="6"
                                    class=INPUT_CLASS
                                    required
                                    on:input=move |event| set_message.set(event_target_value(&event))
                                ></textarea>
                            </div>
                            <Button button_type="submit" disabled=send_action.pending()>
                                "Send message"
                            </Button>
                            {move || {
                                send_action
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
                <div class="max-w-lg mx-auto">
                    <Alert
                        kind=AlertKind::Success
                        message="Thanks for reaching out. We will get back to you shortly.".to_string()
                    />
                </div>
            </Show>
        </AppShell>
    }
}

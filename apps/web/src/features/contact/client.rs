//! Client for the contact form endpoint.

use crate::app_lib::{AppError, post_json};
use crate::features::contact::types::ContactMessage;

pub async fn send_message(message: &ContactMessage) -> Result<(), AppError> {
    post_json("/v1/contact", message).await
}

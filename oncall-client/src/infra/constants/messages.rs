//! User-facing notification texts for store operations.

use crate::infra::notifications::NotificationMessages;

pub const CREATE_INTEGRATION: NotificationMessages =
    NotificationMessages::failure("There was an issue creating Integration. Please try again.");

pub const UPDATE_INTEGRATION: NotificationMessages =
    NotificationMessages::failure("There was an issue updating Integration. Please try again.");

pub const GENERATE_TOKEN: NotificationMessages =
    NotificationMessages::failure("There was an error generating the token. Please try again");

pub const SAVE_INTEGRATION: NotificationMessages = NotificationMessages {
    success: Some("Integration has been saved"),
    failure: Some("Failed to save integration"),
};

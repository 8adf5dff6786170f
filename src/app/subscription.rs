// SPDX-License-Identifier: MPL-2.0
//! Subscriptions for the application.

use super::Message;
use iced::{time, Subscription};
use std::time::Duration;

/// Creates a periodic tick subscription that redraws toast countdown bars.
///
/// Only active while at least one toast is open; an idle application gets
/// no wakeups.
pub fn create_tick_subscription(has_open_toasts: bool) -> Subscription<Message> {
    if has_open_toasts {
        time::every(Duration::from_millis(100)).map(Message::Tick)
    } else {
        Subscription::none()
    }
}

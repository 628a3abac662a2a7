use std::sync::Arc;
use std::time::Instant;

use crate::channel::{create_channel_registry, ChannelRegistry};
use crate::config::Settings;
use crate::ledger::{create_ledger, DeliveryLedger};
use crate::notification::NotificationDispatcher;
use crate::users::{create_user_registry, UserRegistry};

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub users: Arc<UserRegistry>,
    pub channels: Arc<ChannelRegistry>,
    pub ledger: Arc<dyn DeliveryLedger>,
    pub dispatcher: Arc<NotificationDispatcher>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let users = create_user_registry();
        let channels = create_channel_registry(&settings.channels);
        let ledger = create_ledger();
        let dispatcher = Arc::new(NotificationDispatcher::new(
            users.clone(),
            channels.clone(),
            ledger.clone(),
        ));

        Self {
            settings: Arc::new(settings),
            users,
            channels,
            ledger,
            dispatcher,
            start_time: Instant::now(),
        }
    }
}

pub mod error;

pub mod config;

pub mod store;
pub use store::{RecentState, RecentStore};

pub mod api {
    pub mod gateway;
    pub use gateway::SearchGateway;
}

pub mod controller {

    pub mod actions;
    pub use actions::Action;

    pub mod event_loop;
    pub use event_loop::{EventLoop, TaskResult};
}

pub mod model {
    pub mod app_state;

    pub mod overlay;
    pub use overlay::{OverlayEffect, Phase, SearchOverlayState};

    pub mod search;
    pub use search::{ResultEntry, ResultSet};
}

pub mod tasks {
    pub mod build_index_task;

    pub mod search_task;
}

pub mod view {
    pub mod icons;

    pub mod theme;

    pub mod ui;

    pub mod components {
        pub mod help_overlay;
        pub use help_overlay::HelpOverlay;
        pub mod home_panel;
        pub use home_panel::HomePanel;
        pub mod notification_overlay;
        pub use notification_overlay::NotificationOverlay;
        pub mod result_list;
        pub use result_list::ResultList;
        pub mod search_overlay;
        pub use search_overlay::SearchOverlay;
        pub mod status_bar;
        pub use status_bar::StatusBar;
    }

    pub use components::*;
}

pub use view::*;

pub mod logging;
pub use logging::Logger;

pub use error::AppError;

pub use model::{app_state::AppState, overlay::SearchOverlayState, search::ResultSet};

//! Page state machines. Each controller owns its view state and talks to the
//! API through [`ApiClient`](crate::api::ApiClient); rendering is left to the
//! [`Notifier`](crate::ui::Notifier) and [`Navigator`](crate::ui::Navigator)
//! it is given.

pub mod bookmarks;
pub mod gig_detail;
pub mod search;
pub mod step_form;
pub mod wizard;

pub use bookmarks::{BookmarkController, FavoritesStore};
pub use gig_detail::GigDetailController;
pub use search::{SearchController, SearchMessage};
pub use step_form::{AttachOutcome, StepFormController, SubmitOutcome};
pub use wizard::{Step, StepStatus};

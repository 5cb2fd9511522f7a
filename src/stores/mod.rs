// Client state
// Stores hold the state screens share and the logic that keeps it consistent

pub mod app_state;
pub mod composer;
pub mod local_store;
pub mod notice;
pub mod paginated_list;
pub mod row_actions;
pub mod row_state;
pub mod session;
pub mod signup;

pub use app_state::{Action, AppState, AppStore};
pub use notice::{Notice, NoticeKind};
pub use paginated_list::{MergeOrder, PaginatedList, RequestToken};
pub use row_state::{RowFetch, RowFlag};

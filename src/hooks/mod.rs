pub mod use_click_outside;
pub mod use_in_view;
pub mod use_infinite_scroll;
pub mod use_paginated_list;
pub mod use_row_flag;

pub use use_click_outside::use_click_outside;
pub use use_in_view::use_in_view;
pub use use_infinite_scroll::use_infinite_scroll;
pub use use_paginated_list::{use_paginated_list, use_post_feed, PagedList};
pub use use_row_flag::{use_row_flag, RowToggle};

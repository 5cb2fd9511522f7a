// UI Components
// Reusable pieces shared by the route screens

pub mod composer;
pub mod confirm_modal;
pub mod icons;
pub mod loading;
pub mod media_picker;
pub mod otp_input;
pub mod post_actions;
pub mod post_card;
pub mod post_details;
pub mod room_row;
pub mod session_gate;
pub mod toast;

pub use composer::CreatePost;
pub use confirm_modal::ConfirmModal;
pub use loading::{ErrorPanel, Loading, PostSkeleton};
pub use otp_input::OtpInput;
pub use post_actions::PostActions;
pub use post_card::{Avatar, PostCard};
pub use post_details::PostDetails;
pub use room_row::RoomRow;
pub use session_gate::{use_viewer, SessionGate};
pub use toast::{use_toast, ToastProvider};

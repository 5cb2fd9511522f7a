use dioxus::prelude::*;

/// Icon size prop
#[derive(Props, Clone, PartialEq)]
pub struct IconProps {
    #[props(default = "w-5 h-5".to_string())]
    pub class: String,
    #[props(default = false)]
    pub filled: bool,
}

/// Shared 24x24 stroked svg frame
#[component]
fn IconFrame(class: String, filled: bool, children: Element) -> Element {
    let fill_value = if filled { "currentColor" } else { "none" };
    rsx! {
        svg {
            class: "{class}",
            xmlns: "http://www.w3.org/2000/svg",
            width: "24",
            height: "24",
            view_box: "0 0 24 24",
            fill: "{fill_value}",
            stroke: "currentColor",
            stroke_width: "2",
            stroke_linecap: "round",
            stroke_linejoin: "round",
            {children}
        }
    }
}

#[component]
pub fn HomeIcon(props: IconProps) -> Element {
    rsx! {
        IconFrame { class: props.class, filled: false,
            path { d: "m3 9 9-7 9 7v11a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2z" }
            polyline { points: "9 22 9 12 15 12 15 22" }
        }
    }
}

#[component]
pub fn MailIcon(props: IconProps) -> Element {
    rsx! {
        IconFrame { class: props.class, filled: false,
            rect { width: "20", height: "16", x: "2", y: "4", rx: "2" }
            path { d: "m22 7-8.97 5.7a1.94 1.94 0 0 1-2.06 0L2 7" }
        }
    }
}

#[component]
pub fn UserIcon(props: IconProps) -> Element {
    rsx! {
        IconFrame { class: props.class, filled: false,
            path { d: "M19 21v-2a4 4 0 0 0-4-4H9a4 4 0 0 0-4 4v2" }
            circle { cx: "12", cy: "7", r: "4" }
        }
    }
}

#[component]
pub fn HeartIcon(props: IconProps) -> Element {
    rsx! {
        IconFrame { class: props.class, filled: props.filled,
            path { d: "M19 14c1.49-1.46 3-3.21 3-5.5A5.5 5.5 0 0 0 16.5 3c-1.76 0-3 .5-4.5 2-1.5-1.5-2.74-2-4.5-2A5.5 5.5 0 0 0 2 8.5c0 2.3 1.5 4.05 3 5.5l7 7Z" }
        }
    }
}

#[component]
pub fn BookmarkIcon(props: IconProps) -> Element {
    rsx! {
        IconFrame { class: props.class, filled: props.filled,
            path { d: "m19 21-7-4-7 4V5a2 2 0 0 1 2-2h10a2 2 0 0 1 2 2v16z" }
        }
    }
}

#[component]
pub fn MessageCircleIcon(props: IconProps) -> Element {
    rsx! {
        IconFrame { class: props.class, filled: false,
            path { d: "M7.9 20A9 9 0 1 0 4 16.1L2 22Z" }
        }
    }
}

#[component]
pub fn MoreHorizontalIcon(props: IconProps) -> Element {
    rsx! {
        IconFrame { class: props.class, filled: false,
            circle { cx: "12", cy: "12", r: "1" }
            circle { cx: "19", cy: "12", r: "1" }
            circle { cx: "5", cy: "12", r: "1" }
        }
    }
}

#[component]
pub fn ImageIcon(props: IconProps) -> Element {
    rsx! {
        IconFrame { class: props.class, filled: false,
            rect { width: "18", height: "18", x: "3", y: "3", rx: "2" }
            circle { cx: "9", cy: "9", r: "2" }
            path { d: "m21 15-3.086-3.086a2 2 0 0 0-2.828 0L6 21" }
        }
    }
}

#[component]
pub fn VideoIcon(props: IconProps) -> Element {
    rsx! {
        IconFrame { class: props.class, filled: false,
            path { d: "m16 13 5.223 3.482a.5.5 0 0 0 .777-.416V7.87a.5.5 0 0 0-.752-.432L16 10.5" }
            rect { x: "2", y: "6", width: "14", height: "12", rx: "2" }
        }
    }
}

#[component]
pub fn TrashIcon(props: IconProps) -> Element {
    rsx! {
        IconFrame { class: props.class, filled: false,
            path { d: "M3 6h18" }
            path { d: "M19 6v14c0 1-1 2-2 2H7c-1 0-2-1-2-2V6" }
            path { d: "M8 6V4c0-1 1-2 2-2h4c1 0 2 1 2 2v2" }
        }
    }
}

#[component]
pub fn ArrowLeftIcon(props: IconProps) -> Element {
    rsx! {
        IconFrame { class: props.class, filled: false,
            path { d: "m12 19-7-7 7-7" }
            path { d: "M19 12H5" }
        }
    }
}

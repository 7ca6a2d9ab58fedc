use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {SiteHeader, header, "sticky top-0 z-40 w-full border-b bg-background/95 backdrop-blur"}
    clx! {HeaderBar, div, "mx-auto flex w-full max-w-[1200px] items-center justify-between gap-4 px-4 py-3"}
    clx! {SiteFooter, footer, "mx-auto w-full max-w-[1200px] border-t px-4 py-6 text-xs text-muted-foreground"}
    clx! {TocTitle, div, "toc-title mb-2 text-xs font-semibold uppercase tracking-wide text-muted-foreground"}
}

#[allow(unused_imports)]
pub use components::*;

use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, HeaderBar, SiteFooter, SiteHeader, TocTitle,
};
use crate::config::Section;
use crate::content;
use crate::router;
use crate::state::{AppContext, AppState, Theme};
use crate::toc;
use icons::{Menu, Moon, Sun};
use leptos::prelude::*;
use leptos_dom::helpers::WindowListenerHandle;
use tw_merge::tw_merge;

/// One navigation control per section; the active one is emphasised. Used in
/// both the desktop bar and the mobile panel, which auto-closes on select.
#[component]
fn SectionNavButton(section: Section) -> impl IntoView {
    let state = expect_context::<AppContext>().0;
    let id = section.id.clone();
    let id_for_active = section.id.clone();
    let label = section.nav_label();
    let is_active = move || state.sections.get() == id_for_active;

    view! {
        <button
            type="button"
            data-section-id=section.id.clone()
            class=move || {
                tw_merge!(
                    "rounded-md px-3 py-1.5 text-sm",
                    if is_active() {
                        "font-semibold text-foreground"
                    } else {
                        "text-muted-foreground hover:text-foreground"
                    }
                )
            }
            on:click=move |_| state.select_section(&id)
        >
            {label}
        </button>
    }
}

#[component]
fn ThemeToggle() -> impl IntoView {
    let state = expect_context::<AppContext>().0;

    view! {
        <Button
            variant=ButtonVariant::Ghost
            size=ButtonSize::Icon
            attr:aria-label="Toggle theme"
            on:click=move |_| state.theme.toggle()
        >
            <Show
                when=move || state.theme.get() == Theme::Dark
                fallback=|| view! { <Sun /> }
            >
                <Moon />
            </Show>
        </Button>
    }
}

/// One region per configured section; exactly one is visible at a time. The
/// article markup comes from the build pipeline verbatim.
#[component]
pub(crate) fn SectionRegion(section: Section) -> impl IntoView {
    let state = expect_context::<AppContext>().0;
    let id_for_active = section.id.clone();

    view! {
        <section
            id=section.id.clone()
            class=move || {
                if state.sections.get() == id_for_active {
                    ""
                } else {
                    "hidden"
                }
            }
        >
            <article
                class="prose prose-neutral max-w-none dark:prose-invert"
                inner_html=section.html.clone()
            ></article>
        </section>
    }
}

/// "On this page" block for one section. The TOC controller fills the inner
/// container and hides the whole `nav` when a rebind yields no entries.
#[component]
fn SectionTocPanel(section_id: String) -> impl IntoView {
    let state = expect_context::<AppContext>().0;
    let id_for_active = section_id.clone();
    let container_class = format!("toc-{section_id}");

    view! {
        <nav class=move || {
            if state.sections.get() == id_for_active {
                "sticky top-20 text-sm"
            } else {
                "hidden"
            }
        }>
            <TocTitle>"On this page"</TocTitle>
            <div class=container_class></div>
        </nav>
    }
}

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new();
    provide_context(AppContext(state));

    let sections = state.config.with_value(|c| c.sections.clone());
    let title = state
        .config
        .with_value(|c| c.title.clone())
        .unwrap_or_else(|| "Documentation".to_string());
    let repo_url = state.config.with_value(|c| c.repo_url.clone());
    let footer = state.config.with_value(|c| c.footer.clone());

    // Global listeners live for the page lifetime; keep the handles alive.
    let router_handle: StoredValue<Option<WindowListenerHandle>> = StoredValue::new(None);
    let toc_handle: StoredValue<Option<WindowListenerHandle>> = StoredValue::new(None);
    let marker_handle: StoredValue<Option<WindowListenerHandle>> = StoredValue::new(None);

    // Startup pass, after the section regions are in the DOM: badge-row
    // classification, hash-link delegation, then the initial TOC bind.
    Effect::new(move |_| {
        content::classify_image_rows();
        router_handle.set_value(Some(router::install(state.sections)));
        marker_handle.set_value(Some(toc::install_active_link_marker()));
        toc_handle.set_value(Some(toc::setup(&state.sections.get_untracked())));
    });

    let desktop_nav = sections.clone();
    let mobile_nav = sections.clone();
    let toc_panels = sections.clone();

    view! {
        <div class="min-h-screen bg-background text-foreground">
            <SiteHeader>
                <HeaderBar>
                    <span class="text-sm font-semibold">{title}</span>

                    <nav id="main-nav" class="hidden items-center gap-1 md:flex">
                        {desktop_nav
                            .into_iter()
                            .map(|section| view! { <SectionNavButton section=section /> })
                            .collect_view()}
                    </nav>

                    <div class="flex items-center gap-2">
                        {repo_url
                            .map(|url| {
                                view! {
                                    <Button
                                        href=url
                                        variant=ButtonVariant::Outline
                                        size=ButtonSize::Sm
                                    >
                                        "Repository"
                                    </Button>
                                }
                            })}
                        <ThemeToggle />
                        <Button
                            variant=ButtonVariant::Ghost
                            size=ButtonSize::Icon
                            class="md:hidden"
                            attr:aria-label="Toggle navigation"
                            on:click=move |_| state.toggle_nav()
                        >
                            <Menu />
                        </Button>
                    </div>
                </HeaderBar>

                // Mobile panel; the burger toggles it, selecting closes it.
                <div class=move || {
                    if state.nav_open.get() {
                        "flex flex-col border-t px-4 py-2 md:hidden"
                    } else {
                        "hidden"
                    }
                }>
                    <nav id="mobile-nav" class="flex flex-col gap-1">
                        {mobile_nav
                            .into_iter()
                            .map(|section| view! { <SectionNavButton section=section /> })
                            .collect_view()}
                    </nav>
                </div>
            </SiteHeader>

            <main class="mx-auto grid w-full max-w-[1200px] gap-8 px-4 py-8 lg:grid-cols-[minmax(0,1fr)_240px]">
                <div class="min-w-0">
                    {sections
                        .into_iter()
                        .map(|section| view! { <SectionRegion section=section /> })
                        .collect_view()}
                </div>
                <aside class="hidden lg:block">
                    {toc_panels
                        .into_iter()
                        .map(|section| view! { <SectionTocPanel section_id=section.id /> })
                        .collect_view()}
                </aside>
            </main>

            {footer.map(|text| view! { <SiteFooter>{text}</SiteFooter> })}
        </div>
    }
}

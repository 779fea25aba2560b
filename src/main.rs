use dioxus::prelude::*;
use scribe::components::App as ScribeApp;

const MAIN_CSS: Asset = asset!("/assets/scribe.css");

fn main() {
    // Cross-platform logger (web console + desktop stdout).
    // DEBUG level for development builds, INFO for release builds.
    #[cfg(debug_assertions)]
    dioxus::logger::init(dioxus::logger::tracing::Level::DEBUG).expect("logger failed to init");
    #[cfg(not(debug_assertions))]
    dioxus::logger::init(dioxus::logger::tracing::Level::INFO).expect("logger failed to init");

    // Platform-specific launch configuration
    #[cfg(feature = "desktop")]
    {
        use dioxus::desktop::{Config, LogicalSize, WindowBuilder};

        let config = Config::default().with_window(
            WindowBuilder::new()
                .with_title("Scribe")
                .with_resizable(true)
                .with_inner_size(LogicalSize::new(1100.0, 820.0))
                .with_min_inner_size(LogicalSize::new(720.0, 520.0))
                .with_transparent(false),
        );

        dioxus::LaunchBuilder::desktop()
            .with_cfg(config)
            .launch(Root);
    }

    #[cfg(feature = "mobile")]
    {
        dioxus::LaunchBuilder::mobile().launch(Root);
    }

    #[cfg(feature = "web")]
    {
        dioxus::launch(Root);
    }

    // Headless builds (tests, docs) select no renderer; nothing to launch.
    #[cfg(not(any(feature = "desktop", feature = "mobile", feature = "web")))]
    {
        let _ = Root;
        eprintln!("scribe was built without a renderer feature (desktop/web/mobile)");
    }
}

#[component]
fn Root() -> Element {
    rsx! {
        // CSS loading: asset! macro has issues on desktop, use include_str! as workaround
        if cfg!(target_arch = "wasm32") {
            document::Stylesheet { href: MAIN_CSS }
        } else {
            style { {include_str!("../assets/scribe.css")} }
        }

        body { class: "sc-body",
            ScribeApp {}
        }
    }
}

//! Countdown widget

use jiff::Timestamp;
use leptos::{ev::MouseEvent, prelude::*, task};
use reqwest::Client;
use tracing::{debug, warn};

use countdown::{
    countdown::{CountdownSession, EXPIRED_TEXT, Phase, TICK_INTERVAL, Tick, UrgencyEffect},
    timers::Timer,
};

use crate::{
    client::fetch_timer,
    mount::MountConfig,
    notice::{Notice, Unavailable},
};

const STYLES: &str = r"
.countdown-timer-container { padding: 1em; margin: 1em 0; border-radius: 8px; text-align: center; transition: background-color 0.3s; }
.countdown-timer-pulse { background-color: #fff0f0; animation: countdown-timer-pulse 1s infinite; }
.countdown-timer-banner { display: none; margin-top: 0.5em; padding: 0.5em; background: #ff4d4f; color: #fff; font-weight: bold; border-radius: 4px; }
.countdown-timer-banner.countdown-timer-visible { display: block; }
.countdown-timer-overlay { position: fixed; inset: 0; background: rgba(0, 0, 0, 0.6); display: flex; align-items: center; justify-content: center; z-index: 9999; }
.countdown-timer-popup { background: #fff; padding: 2em; border-radius: 12px; max-width: 90%; text-align: center; }
.countdown-timer-popup-display { font-size: 2em; font-weight: bold; margin: 0.5em 0; }
.countdown-timer-close { margin-top: 1em; padding: 0.75em 1.5em; border: 0; border-radius: 6px; background: #000; color: #fff; cursor: pointer; }
.countdown-timer-notice { padding: 1em; margin: 1em 0; border: 1px dashed #ccc; border-radius: 8px; text-align: center; color: #666; }
@keyframes countdown-timer-pulse { 0%, 100% { transform: scale(1); } 50% { transform: scale(1.03); } }
";

/// What every countdown surface currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TimerDisplay {
    pub text: String,
    pub pulse: bool,
    pub banner: bool,
    pub popup: bool,
}

impl Default for TimerDisplay {
    fn default() -> Self {
        Self {
            text: "Loading...".to_string(),
            pulse: false,
            banner: false,
            popup: false,
        }
    }
}

impl TimerDisplay {
    /// Apply a tick. Returns whether the countdown keeps ticking.
    pub(crate) fn apply(&mut self, tick: Tick) -> bool {
        match tick {
            Tick::Running(frame) => {
                self.text = frame.remaining.to_string();
                self.popup = frame.popup_visible;

                match frame.effect {
                    Some(UrgencyEffect::Pulse) => self.pulse = true,
                    Some(UrgencyEffect::Banner) => self.banner = true,
                    None => {}
                }

                true
            }
            Tick::Expired => {
                EXPIRED_TEXT.clone_into(&mut self.text);

                false
            }
            Tick::Halted => false,
        }
    }
}

/// Resolves the timer of a mount point and renders it.
#[component]
pub(crate) fn CountdownWidget(config: MountConfig) -> impl IntoView {
    let resolved = RwSignal::new(None::<Result<Timer, Unavailable>>);

    task::spawn_local(async move {
        let client = Client::new();

        let outcome = fetch_timer(&client, &config)
            .await
            .map_err(|_error| Unavailable::NoTimer);

        if resolved.try_set(Some(outcome)).is_some() {
            debug!("widget unmounted before its timer resolved");
        }
    });

    move || match resolved.get() {
        None => ().into_any(),
        Some(Ok(timer)) => view! { <Countdown timer=timer /> }.into_any(),
        Some(Err(reason)) => view! { <Notice reason=reason /> }.into_any(),
    }
}

#[component]
fn Countdown(timer: Timer) -> impl IntoView {
    let session = StoredValue::new(CountdownSession::new(&timer));
    let display = RwSignal::new(TimerDisplay::default());
    let ticker = StoredValue::new(None::<IntervalHandle>);

    let stop = move || {
        if let Some(Some(handle)) = ticker.try_get_value() {
            handle.clear();
        }
    };

    let tick = move || {
        let Some(tick) = session.try_update_value(|session| session.tick(Timestamp::now())) else {
            return;
        };

        if !display
            .try_update(|display| display.apply(tick))
            .unwrap_or(false)
        {
            stop();
        }
    };

    tick();

    if session.with_value(CountdownSession::phase) == Phase::Running {
        match set_interval_with_handle(tick, TICK_INTERVAL) {
            Ok(handle) => ticker.set_value(Some(handle)),
            Err(error) => warn!("countdown interval not started: {error:?}"),
        }
    }

    on_cleanup(move || {
        session.try_update_value(CountdownSession::tear_down);
        stop();
    });

    let dismiss = move |_: MouseEvent| {
        session.update_value(CountdownSession::dismiss_popup);
        display.update(|display| display.popup = false);
    };

    let settings = &timer.settings;
    let font_size = settings.size.font_size();
    let container_style = format!("color: {}; font-size: {font_size};", settings.color);
    let popup_style = format!("color: {};", settings.color);

    let description = timer.description.clone().map(|description| {
        view! { <p class="countdown-timer-description">{description}</p> }
    });

    view! {
        <style>{STYLES}</style>
        <div
            class="countdown-timer-container"
            class:countdown-timer-pulse=move || display.with(|display| display.pulse)
            style=container_style
        >
            <h3 class="countdown-timer-heading">"Your Special Offer Ends In"</h3>
            <div class="countdown-timer-display" aria-live="polite">
                {move || display.with(|display| display.text.clone())}
            </div>
            {description}
            <div
                class="countdown-timer-banner"
                class:countdown-timer-visible=move || display.with(|display| display.banner)
            >
                "Hurry! Offer ends soon!"
            </div>
        </div>
        <Show when=move || display.with(|display| display.popup)>
            <div class="countdown-timer-overlay">
                <div class="countdown-timer-popup" role="dialog" aria-modal="true">
                    <h2>"⏰ HURRY! TIME IS RUNNING OUT!"</h2>
                    <p>"This special offer expires in:"</p>
                    <div class="countdown-timer-popup-display" style=popup_style.clone()>
                        {move || display.with(|display| display.text.clone())}
                    </div>
                    <p>"Don't miss out on this amazing deal!"</p>
                    <button type="button" class="countdown-timer-close" on:click=dismiss>
                        "Continue Shopping"
                    </button>
                </div>
            </div>
        </Show>
    }
}

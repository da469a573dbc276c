//! Placeholder notices

use leptos::prelude::*;

/// Why no countdown is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Unavailable {
    /// Neither the mount point nor the page names a product
    MissingProduct,

    /// The proxy returned no usable timer
    NoTimer,
}

impl Unavailable {
    pub(crate) const fn headline(self) -> &'static str {
        match self {
            Self::MissingProduct => "⚠️ Unable to detect product ID",
            Self::NoTimer => "⚠️ No active countdown timer for this product",
        }
    }

    pub(crate) const fn hint(self) -> &'static str {
        match self {
            Self::MissingProduct => "Make sure this block is added to a product page",
            Self::NoTimer => "Create a timer in the app admin to display it here",
        }
    }
}

#[component]
pub(crate) fn Notice(reason: Unavailable) -> impl IntoView {
    view! {
        <div class="countdown-timer-notice">
            <p class="countdown-timer-notice-headline">{reason.headline()}</p>
            <small class="countdown-timer-notice-hint">{reason.hint()}</small>
        </div>
    }
}

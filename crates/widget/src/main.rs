//! Storefront countdown widget
//!
//! Renders the active countdown timer of a product into every mount point of
//! a product page, with urgency effects once the end draws near.

mod client;
mod mount;
mod notice;
mod widget;

fn main() {
    console_error_panic_hook::set_once();

    #[cfg(target_arch = "wasm32")]
    tracing_wasm::set_as_global_default();

    mount::mount_all();
}

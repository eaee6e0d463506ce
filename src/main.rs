//! Packing List Frontend Entry Point

mod api;
mod app;
mod config;
mod controller;
mod csrf;
mod error;
mod lanes;
mod markup;
mod models;
mod navigation;
mod progress;
mod render;
mod store;
mod view_model;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}

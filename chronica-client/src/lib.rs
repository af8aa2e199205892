//! Headless client for the blog application.
//!
//! The browser client's behavior, re-architected as an explicit
//! view-controller: [`controller::BlogController`] is constructed once at
//! startup and owns every piece of view state. There are no ambient globals;
//! the HTTP gateway is a trait so the whole client can be driven in tests
//! without a network.

pub mod api;
pub mod controller;
pub mod forms;
pub mod notify;
pub mod overlay;
pub mod search;
pub mod view;

//! commit2act - A terminal client for the commit2act sustainability platform
//!
//! This library provides the admin-side editing of sustainability actions
//! (their items, icon and image validation labels), the user dashboard, and
//! the gateway to the hosted GraphQL API, along with an interactive UI built
//! with Ratatui.
//!
//! # Modules
//!
//! The library is organized into several key modules:
//!
//! * [`backend`] - Remote data gateway and its GraphQL implementation
//! * [`config`] - Application configuration management
//! * [`dashboard`] - Dashboard aggregation over the gateway
//! * [`editor`] - Action form state machine and field validation
//! * [`submission`] - Building submitted actions
//! * [`ui`] - Terminal user interface components

/// Remote data gateway abstraction and the GraphQL implementation
pub mod backend;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// Dashboard data aggregation
pub mod dashboard;

/// Action editing: form state machine, sub-forms and validity rules
pub mod editor;

/// Logging utilities for debugging and error tracking
pub mod logger;

/// Submitted action construction and scoring
pub mod submission;

/// Terminal user interface components and rendering
pub mod ui;

//! AuroraMart Storefront Core
//!
//! Platform-agnostic logic behind the storefront page enhancements.
//! This crate owns pricing, selection persistence and menu state without any
//! browser dependency; the `storefront-web` crate binds it to the DOM.

pub mod cart;
pub mod config;
pub mod dropdown;
pub mod error;
pub mod keys;
pub mod lightbox;
pub mod money;
pub mod numbers;
pub mod selection;
pub mod storage;

// Re-export commonly used types
pub use cart::{CartLine, CartSelection, QuantityEdit, SubtotalText, recommendation_panel_id};
pub use config::{
    DropdownConfig, LightboxConfig, SelectAllHook, SelectionConfig, StorefrontConfig,
};
pub use dropdown::{CategoryMenu, KeyResponse, PanelChange, PanelState};
pub use error::{ConfigError, StorefrontError};
pub use keys::Key;
pub use lightbox::{LightboxImage, LightboxKeyAction, LightboxState};
pub use money::{AmountExtractor, Money, parse_amount};
pub use selection::{DEFAULT_STORAGE_KEY, Selection, SelectionStore};
pub use storage::{MemoryStorage, MemoryStorageError, SelectionStorage};

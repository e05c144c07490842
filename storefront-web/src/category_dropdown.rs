//! Expand/collapse for nested category panels inside the navbar dropdown.
use std::cell::RefCell;
use std::rc::Rc;

use storefront_core::{CategoryMenu, DropdownConfig, Key, PanelChange, PanelState};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement};

use crate::{a11y, dom};

struct EntryBinding {
    entry: Element,
    toggle: Option<HtmlElement>,
    panel: Option<HtmlElement>,
}

struct MenuBinding {
    /// `None` for entries rendered outside any menu container.
    menu: Option<Element>,
    entries: Vec<EntryBinding>,
    state: CategoryMenu,
}

impl MenuBinding {
    fn apply(&self, changes: &[PanelChange], open_class: &str) {
        for change in changes {
            let Some(binding) = self.entries.get(change.index) else {
                continue;
            };
            let open = change.state == PanelState::Open;
            let classes = binding.entry.class_list();
            let _ = if open {
                classes.add_1(open_class)
            } else {
                classes.remove_1(open_class)
            };
            if let Some(toggle) = &binding.toggle {
                a11y::set_expanded(toggle, open);
            }
            if let Some(panel) = &binding.panel {
                panel.set_hidden(!open);
            }
        }
    }
}

#[derive(Clone)]
pub struct CategoryDropdown {
    config: Rc<DropdownConfig>,
    menus: Rc<RefCell<Vec<MenuBinding>>>,
}

impl CategoryDropdown {
    /// Collect every expandable entry under `scope`, grouped by menu.
    #[must_use]
    pub fn new(scope: &Element, config: DropdownConfig) -> Self {
        let mut menus: Vec<MenuBinding> = Vec::new();
        let toggle_query = format!(":scope > {}", config.toggle_selector);
        for entry in dom::query_all::<Element>(scope, &config.entry_selector) {
            let menu = dom::closest(&entry, &config.menu_selector);
            let binding = EntryBinding {
                toggle: dom::query_one(&entry, &toggle_query),
                panel: dom::query_one(&entry, &config.panel_selector),
                entry,
            };
            match menus.iter_mut().find(|m| m.menu == menu) {
                Some(existing) => existing.entries.push(binding),
                None => menus.push(MenuBinding {
                    menu,
                    entries: vec![binding],
                    state: CategoryMenu::default(),
                }),
            }
        }
        for menu in &mut menus {
            let len = menu.entries.len();
            menu.state = CategoryMenu::new(len);
            let closed: Vec<PanelChange> = (0..len)
                .map(|index| PanelChange {
                    index,
                    state: PanelState::Closed,
                })
                .collect();
            menu.apply(&closed, &config.open_class);
        }
        Self {
            config: Rc::new(config),
            menus: Rc::new(RefCell::new(menus)),
        }
    }

    #[must_use]
    pub fn menu_count(&self) -> usize {
        self.menus.borrow().len()
    }

    /// Index of the open entry in menu `menu`, if any.
    #[must_use]
    pub fn open_entry(&self, menu: usize) -> Option<usize> {
        self.menus.borrow().get(menu).and_then(|m| m.state.open_entry())
    }

    pub fn toggle(&self, menu: usize, entry: usize) {
        self.update(menu, |state| state.toggle(entry));
    }

    pub fn close(&self, menu: usize, entry: usize) {
        self.update(menu, |state| state.close(entry));
    }

    pub fn collapse_all(&self) {
        let mut menus = self.menus.borrow_mut();
        for binding in menus.iter_mut() {
            let changes = binding.state.collapse_all();
            binding.apply(&changes, &self.config.open_class);
        }
    }

    fn update(&self, menu: usize, transition: impl FnOnce(&mut CategoryMenu) -> Vec<PanelChange>) {
        let mut menus = self.menus.borrow_mut();
        let Some(binding) = menus.get_mut(menu) else {
            return;
        };
        let changes = transition(&mut binding.state);
        binding.apply(&changes, &self.config.open_class);
    }

    /// Wire toggles, outside clicks and the host dropdown's close event.
    ///
    /// # Errors
    /// Returns an error if a listener cannot be registered.
    pub fn mount(&self, document: &Document, scope: &Element) -> Result<usize, JsValue> {
        let toggles: Vec<(usize, usize, HtmlElement)> = self
            .menus
            .borrow()
            .iter()
            .enumerate()
            .flat_map(|(m, binding)| {
                binding
                    .entries
                    .iter()
                    .enumerate()
                    .filter_map(move |(e, entry)| entry.toggle.clone().map(|t| (m, e, t)))
            })
            .collect();

        for (menu, entry, toggle) in &toggles {
            let (menu, entry) = (*menu, *entry);
            let dropdown = self.clone();
            dom::listen(toggle, "click", move |event| {
                event.prevent_default();
                event.stop_propagation();
                dropdown.toggle(menu, entry);
            })?;

            let dropdown = self.clone();
            dom::listen(toggle, "keydown", move |event| {
                let key = dom::event_key(&event).map_or(Key::Other, |k| Key::from_key_value(&k));
                let response = {
                    let mut menus = dropdown.menus.borrow_mut();
                    let Some(binding) = menus.get_mut(menu) else {
                        return;
                    };
                    let response = binding.state.on_toggle_key(entry, key);
                    binding.apply(&response.changes, &dropdown.config.open_class);
                    response
                };
                if response.consume {
                    event.prevent_default();
                    event.stop_propagation();
                }
            })?;
        }

        let dropdown = self.clone();
        let menu_selector = self.config.menu_selector.clone();
        dom::listen(document, "click", move |event| {
            let inside_menu = dom::event_element(&event)
                .is_some_and(|target| dom::closest(&target, &menu_selector).is_some());
            if !inside_menu {
                dropdown.collapse_all();
            }
        })?;

        // Any host closing resets every entry on the page, nested or not.
        for host in dom::query_all::<Element>(scope, &self.config.host_selector) {
            let dropdown = self.clone();
            dom::listen(&host, &self.config.host_close_event, move |_| {
                dropdown.collapse_all();
            })?;
        }

        log::info!(
            "category dropdown mounted: {} toggles across {} menus",
            toggles.len(),
            self.menu_count()
        );
        Ok(toggles.len())
    }
}

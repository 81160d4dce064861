//! Menu selection model.
//!
//! A [`Menu`] is a non-empty, ordered list of [`MenuItem`]s with one active
//! selection. Navigation clamps at both ends instead of wrapping, and every
//! navigation call recomputes the selection flags so exactly one item is
//! marked selected.

mod item;

pub use item::MenuItem;

use crate::core::StateId;
use crate::hal::{Color, Font, HalError, Screen};
use thiserror::Error;

/// Errors raised when assembling a menu.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MenuError {
    #[error("A menu needs at least one item")]
    Empty,
}

/// Ordered list of selectable entries.
///
/// # Example
///
/// ```rust
/// use tickstate::core::StateId;
/// use tickstate::menu::{Menu, MenuItem};
///
/// let mut menu = Menu::new(MenuItem::new("Alarm", StateId::new(1)))
///     .with(MenuItem::new("Time", StateId::new(2)))
///     .with(MenuItem::new("Exit", StateId::new(0)));
///
/// menu.down();
/// menu.down();
/// menu.down();
/// assert_eq!(menu.index(), 2);
/// assert_eq!(menu.selected().label(), "Exit");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Menu {
    items: Vec<MenuItem>,
    index: usize,
}

const ORIGIN_X: i32 = 2;
const ORIGIN_Y: i32 = 1;
const LABEL_SCALE: u32 = 2;

impl Menu {
    /// Create a menu holding `first`, selected.
    pub fn new(first: MenuItem) -> Self {
        let mut menu = Self {
            items: vec![first],
            index: 0,
        };
        menu.update_select();
        menu
    }

    /// Append an item, builder style.
    pub fn with(mut self, item: MenuItem) -> Self {
        self.add(item);
        self
    }

    /// Append an item at the end. The current selection is kept.
    pub fn add(&mut self, item: MenuItem) {
        self.items.push(item);
        self.update_select();
    }

    /// Select the first item.
    pub fn reset(&mut self) {
        self.index = 0;
        self.update_select();
    }

    /// Move the selection one item up, stopping at the first.
    pub fn up(&mut self) {
        self.index = self.index.saturating_sub(1);
        self.update_select();
    }

    /// Move the selection one item down, stopping at the last.
    pub fn down(&mut self) {
        if self.index + 1 < self.items.len() {
            self.index += 1;
        }
        self.update_select();
    }

    /// The selected item.
    pub fn selected(&self) -> &MenuItem {
        &self.items[self.index]
    }

    /// Target state of the selected item.
    pub fn selected_target(&self) -> Option<StateId> {
        self.selected().next()
    }

    /// Zero-based index of the selected item.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false: menus are non-empty by construction.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Render the menu as a vertical list, highlighting the selection.
    ///
    /// The selected row is drawn as a filled bar across the screen with the
    /// label knocked out in black.
    pub fn draw(&self, screen: &mut dyn Screen, font: &Font) -> Result<(), HalError> {
        let row_height = font.height * LABEL_SCALE;
        let mut y = ORIGIN_Y;

        screen.clear()?;
        for item in &self.items {
            if item.is_selected() {
                screen.fill_rect(ORIGIN_X, y, screen.width(), row_height, Color::White)?;
                screen.draw_text(ORIGIN_X, y, LABEL_SCALE, item.label(), Color::Black)?;
            } else {
                screen.draw_text(ORIGIN_X, y, LABEL_SCALE, item.label(), Color::White)?;
            }
            y += row_height as i32;
        }
        screen.update()
    }

    fn update_select(&mut self) {
        for (i, item) in self.items.iter_mut().enumerate() {
            item.select(i == self.index);
        }
    }
}

impl TryFrom<Vec<MenuItem>> for Menu {
    type Error = MenuError;

    fn try_from(items: Vec<MenuItem>) -> Result<Self, Self::Error> {
        if items.is_empty() {
            return Err(MenuError::Empty);
        }
        let mut menu = Self { items, index: 0 };
        menu.update_select();
        Ok(menu)
    }
}

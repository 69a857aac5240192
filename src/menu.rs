//! Mobile navigation toggle.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Flip the menu. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// A navigation link was followed; the menu always ends up closed.
    pub fn on_nav_link_click(&mut self) {
        self.open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_closed() {
        assert!(!MobileMenu::default().is_open());
    }

    #[test]
    fn toggle_flips() {
        let mut m = MobileMenu::default();
        assert!(m.toggle());
        assert!(!m.toggle());
    }

    #[test]
    fn nav_click_closes() {
        let mut m = MobileMenu::default();
        m.toggle();
        m.on_nav_link_click();
        assert!(!m.is_open());
        m.on_nav_link_click();
        assert!(!m.is_open());
    }
}

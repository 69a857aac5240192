//! Mobile menu toggle.

use super::dom::{self, WebError};
use crate::config::MenuConfig;
use crate::menu::MobileMenu;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::{Document, Element};

pub fn init(document: &Document, config: &MenuConfig) -> Result<(), WebError> {
    let toggle = document.query_selector(&config.toggle_selector)?;
    let nav = document.query_selector(&config.nav_selector)?;
    let (Some(toggle), Some(nav)) = (toggle, nav) else {
        log::debug!("menu toggle or nav missing, mobile menu disabled");
        return Ok(());
    };

    let menu = Rc::new(RefCell::new(MobileMenu::default()));
    let targets = Rc::new([toggle.clone(), nav.clone()]);

    {
        let menu = Rc::clone(&menu);
        let targets = Rc::clone(&targets);
        let class = config.open_class.clone();
        dom::on(&toggle, "click", move |_| {
            let open = menu.borrow_mut().toggle();
            paint(&targets[..], open, &class);
        })?;
    }

    for link in dom::elements(nav.query_selector_all("a")?) {
        let menu = Rc::clone(&menu);
        let targets = Rc::clone(&targets);
        let class = config.open_class.clone();
        dom::on(&link, "click", move |_| {
            menu.borrow_mut().on_nav_link_click();
            paint(&targets[..], false, &class);
        })?;
    }
    Ok(())
}

fn paint(targets: &[Element], open: bool, class: &str) {
    for element in targets {
        dom::set_class(element, class, open);
    }
}
